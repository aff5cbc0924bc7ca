use scraper::{ElementRef, Html, Node};

use crate::day::Day;

const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "del", "dfn", "em", "i", "img",
    "ins", "kbd", "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u",
    "var",
];

pub fn day_header(day: Day) -> String {
    format!("# Day {}", day)
}

/// Convert a challenge description fragment to Markdown, headed by the day.
pub fn to_markdown(description_html: &str, day: Day) -> String {
    let fragment = Html::parse_fragment(description_html);
    let body = render_blocks(fragment.root_element()).join("\n\n");

    if body.is_empty() {
        format!("{}\n", day_header(day))
    } else {
        format!("{}\n\n{}\n", day_header(day), body)
    }
}

// ── Block level ──

#[derive(Default)]
struct Renderer {
    blocks: Vec<String>,
    pending: String,
}

fn render_blocks(el: ElementRef) -> Vec<String> {
    let mut r = Renderer::default();
    r.children(el);
    r.flush();
    r.blocks
}

impl Renderer {
    fn children(&mut self, el: ElementRef) {
        for child in el.children() {
            match child.value() {
                Node::Text(t) => append(&mut self.pending, &collapse(t)),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.element(child);
                    }
                }
                _ => {}
            }
        }
    }

    fn element(&mut self, el: ElementRef) {
        let name = el.value().name();
        if let Some(level) = heading_level(name) {
            self.flush();
            let text = tidy(&inline(el)).replace('\n', " ");
            self.push(format!("{} {}", "#".repeat(level), text));
            return;
        }

        match name {
            "p" if !has_code_block(el) => {
                self.flush();
                self.push(tidy(&inline(el)));
            }
            "pre" => {
                self.flush();
                self.push(fence(el));
            }
            "ul" | "ol" => {
                self.flush();
                self.push(list(el, "").join("\n"));
            }
            "blockquote" => {
                self.flush();
                self.push(quote(&render_blocks(el)));
            }
            "hr" => {
                self.flush();
                self.push("---".to_string());
            }
            n if INLINE_TAGS.contains(&n) && !has_code_block(el) => {
                let rendered = inline_element(el);
                append(&mut self.pending, &rendered);
            }
            // Anything else, or a wrapper around a code block, is a container so its text is kept.
            _ => {
                self.flush();
                self.children(el);
                self.flush();
            }
        }
    }

    fn flush(&mut self) {
        let text = tidy(&std::mem::take(&mut self.pending));
        self.push(text);
    }

    fn push(&mut self, block: String) {
        if !block.trim().is_empty() {
            self.blocks.push(block);
        }
    }
}

fn heading_level(name: &str) -> Option<usize> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn has_code_block(el: ElementRef) -> bool {
    el.descendants()
        .filter_map(ElementRef::wrap)
        .any(|e| e.value().name() == "pre")
}

fn fence(pre: ElementRef) -> String {
    let lang = std::iter::once(pre)
        .chain(pre.children().filter_map(ElementRef::wrap))
        .filter_map(|e| e.value().attr("class"))
        .flat_map(str::split_whitespace)
        .find_map(|c| c.strip_prefix("language-"))
        .unwrap_or("");

    let code: String = pre.text().collect();
    let code = code.trim_end_matches('\n');
    let marker = if code.contains("```") { "````" } else { "```" };
    format!("{marker}{lang}\n{code}\n{marker}")
}

fn list(el: ElementRef, indent: &str) -> Vec<String> {
    let ordered = el.value().name() == "ol";
    let mut number: usize = el
        .value()
        .attr("start")
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(1);

    let mut lines = Vec::new();
    for item in el.children().filter_map(ElementRef::wrap) {
        if item.value().name() != "li" {
            continue;
        }
        let marker = if ordered {
            format!("{}.", number)
        } else {
            "-".to_string()
        };
        let child_indent = format!("{}{}", indent, " ".repeat(marker.len() + 1));
        let (text, nested) = list_item(item, &child_indent);
        lines.push(format!("{}{} {}", indent, marker, text).trim_end().to_string());
        lines.extend(nested);
        number += 1;
    }
    lines
}

/// Returns the item's own text and the indented lines nested below it.
fn list_item(li: ElementRef, child_indent: &str) -> (String, Vec<String>) {
    let mut text = String::new();
    let mut nested = Vec::new();

    for child in li.children() {
        match child.value() {
            Node::Text(t) => append(&mut text, &collapse(t)),
            Node::Element(_) => {
                let Some(child) = ElementRef::wrap(child) else { continue };
                match child.value().name() {
                    "ul" | "ol" => nested.extend(list(child, child_indent)),
                    "pre" => nested.extend(fence(child).lines().map(|l| format!("{}{}", child_indent, l))),
                    "p" | "div" => {
                        append(&mut text, " ");
                        append(&mut text, &inline(child));
                    }
                    _ => append(&mut text, &inline_element(child)),
                }
            }
            _ => {}
        }
    }

    let text = tidy(&text).replace('\n', &format!("\n{}", child_indent));
    (text, nested)
}

fn quote(blocks: &[String]) -> String {
    blocks
        .join("\n\n")
        .lines()
        .map(|l| if l.is_empty() { ">".to_string() } else { format!("> {}", l) })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Inline level ──

fn inline(el: ElementRef) -> String {
    let mut out = String::new();
    for child in el.children() {
        match child.value() {
            Node::Text(t) => append(&mut out, &collapse(t)),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    append(&mut out, &inline_element(child));
                }
            }
            _ => {}
        }
    }
    out
}

fn inline_element(el: ElementRef) -> String {
    match el.value().name() {
        "strong" | "b" => emphasize("**", &inline(el)),
        "em" | "i" => emphasize("*", &inline(el)),
        "code" | "kbd" | "samp" => code_span(&el.text().collect::<String>()),
        "a" => {
            let text = inline(el);
            match el.value().attr("href") {
                Some(href) => format!("[{}]({})", text.trim(), href),
                None => text,
            }
        }
        "img" => {
            let alt = el.value().attr("alt").unwrap_or("");
            let src = el.value().attr("src").unwrap_or("");
            format!("![{}]({})", alt, src)
        }
        "br" => "\n".to_string(),
        _ => inline(el),
    }
}

/// Wrap with a marker while keeping surrounding spaces outside it.
fn emphasize(marker: &str, text: &str) -> String {
    let core = text.trim();
    if core.is_empty() {
        return text.to_string();
    }
    let lead = if text.starts_with(' ') { " " } else { "" };
    let trail = if text.ends_with(' ') { " " } else { "" };
    format!("{}{}{}{}{}", lead, marker, core, marker, trail)
}

fn code_span(code: &str) -> String {
    if code.contains('`') {
        format!("`` {} ``", code)
    } else {
        format!("`{}`", code)
    }
}

/// Collapse whitespace runs in a text node to single spaces.
fn collapse(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Append without doubling the space at the seam or starting a line with one.
fn append(out: &mut String, piece: &str) {
    let at_line_start = out.is_empty() || out.ends_with('\n');
    if (at_line_start || out.ends_with(' ')) && piece.starts_with(' ') {
        out.push_str(&piece[1..]);
    } else {
        out.push_str(piece);
    }
}

fn tidy(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u32) -> Day {
        Day::new(n).unwrap()
    }

    fn body(html: &str) -> String {
        let md = to_markdown(html, day(1));
        md.strip_prefix("# Day 1\n\n").unwrap_or(&md).trim_end().to_string()
    }

    #[test]
    fn hello() {
        assert_eq!(to_markdown("<p>Hello</p>", day(1)), "# Day 1\n\nHello\n");
    }

    #[test]
    fn empty_description_is_header_only() {
        assert_eq!(to_markdown("", day(12)), "# Day 12\n");
    }

    #[test]
    fn headings() {
        assert_eq!(body("<h2>Rules</h2><h4>Note</h4>"), "## Rules\n\n#### Note");
    }

    #[test]
    fn paragraphs_are_separated_by_one_blank_line() {
        assert_eq!(body("<p>One\n   two</p>\n\n<p>Three</p>"), "One two\n\nThree");
    }

    #[test]
    fn emphasis_and_links() {
        let md = body(r#"<p>Use <em>only</em> the <strong>first</strong> gift, see <a href="https://adventjs.dev">the site</a>.</p>"#);
        assert_eq!(md, "Use *only* the **first** gift, see [the site](https://adventjs.dev).");
    }

    #[test]
    fn inline_code_keeps_internal_whitespace() {
        assert_eq!(body("<p>Call <code>f(a,  b)</code> now</p>"), "Call `f(a,  b)` now");
    }

    #[test]
    fn code_block_is_fenced() {
        let md = body("<pre><code class=\"language-js\">const a = 1\n  if (a) {\n    go()\n  }\n</code></pre>");
        assert_eq!(md, "```js\nconst a = 1\n  if (a) {\n    go()\n  }\n```");
    }

    #[test]
    fn code_block_inside_inline_wrapper_keeps_whitespace() {
        let md = body("<div><span>See:<pre><code>a\n  b\n    c</code></pre></span></div>");
        assert_eq!(md, "See:\n\n```\na\n  b\n    c\n```");

        let md = body("<p>Example:<pre><code class=\"language-ts\">if (x) {\n  go()\n}</code></pre></p>");
        assert_eq!(md, "Example:\n\n```ts\nif (x) {\n  go()\n}\n```");
    }

    #[test]
    fn nested_lists() {
        let md = body("<ul><li>Toys<ul><li>Doll</li><li>Ball</li></ul></li><li>Food</li></ul>");
        assert_eq!(md, "- Toys\n  - Doll\n  - Ball\n- Food");
    }

    #[test]
    fn ordered_list() {
        let md = body("<ol><li>Wrap</li><li>Ship<ol><li>Sleigh</li></ol></li></ol>");
        assert_eq!(md, "1. Wrap\n2. Ship\n   1. Sleigh");
    }

    #[test]
    fn unknown_elements_keep_their_text() {
        let md = body("<custom-note>Keep me</custom-note><p>After</p>");
        assert_eq!(md, "Keep me\n\nAfter");
    }

    #[test]
    fn containers_are_transparent() {
        let md = body("<div><p>A</p><section><p>B <span>c</span></p></section></div>");
        assert_eq!(md, "A\n\nB c");
    }

    #[test]
    fn line_breaks_and_quotes() {
        assert_eq!(body("<p>a<br>b</p>"), "a\nb");
        assert_eq!(body("<blockquote><p>Ho</p><p>ho</p></blockquote>"), "> Ho\n>\n> ho");
    }

    #[test]
    fn entities_are_decoded_by_the_parser() {
        assert_eq!(body("<p>a &lt; b &amp;&amp; c</p>"), "a < b && c");
    }

    #[test]
    fn deterministic() {
        let html = std::fs::read_to_string("tests/fixtures/dom_page.html").unwrap();
        let first = to_markdown(&html, day(3));
        for _ in 0..3 {
            assert_eq!(to_markdown(&html, day(3)), first);
        }
    }

    #[test]
    fn state_blob_description() {
        let html = "<p>It's time to decorate the <strong>Christmas tree</strong>! Write a function that receives:</p>\n<ul>\n<li><code>ornament</code>: the character used for the tree</li>\n<li><code>height</code>: a positive integer</li>\n</ul>";
        let md = to_markdown(html, day(4));
        assert_eq!(
            md,
            "# Day 4\n\nIt's time to decorate the **Christmas tree**! Write a function that receives:\n\n\
             - `ornament`: the character used for the tree\n- `height`: a positive integer\n"
        );
    }
}
