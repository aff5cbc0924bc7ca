use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::ParseError;

// Only presentation wrappers are stripped, so generics like `Array<number>` survive.
static PRESENTATION_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?(?:div|span|p|pre|code|br|em|strong|b|i|u|mark|font|a)\b[^>]*>").unwrap()
});
// Editor output opens with a wrapper tag; plain source never does.
static MARKUP_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<(?:div|span|p|pre|code|br)\b[^>]*>").unwrap());
static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:<br\s*/?>|</(?:div|p|pre|li)\s*>)[ \t]*\n?").unwrap());
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<!--[\s\S]*?-->").unwrap());
static EXPORT_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s*\{\s*([A-Za-z_$][A-Za-z0-9_$]*)\s*\}\s*;?[ \t]*\n?").unwrap()
});
static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)(?:^|[;{}])[ \t]*(export[ \t]+)?(?:async[ \t]+)?(?:function(?:\s*\*\s*|\s+)([A-Za-z_$][A-Za-z0-9_$]*)\s*[(<]|const\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*[=:])",
    )
    .unwrap()
});
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").unwrap());

/// Starter function recovered from a challenge page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionData {
    pub function_name: String,
    pub function_code: String,
}

/// Clean raw starter text (editor markup or plain source) into embeddable code.
///
/// Plain source is taken verbatim apart from whitespace shaping; tags,
/// entities and comments are only treated as markup in editor output.
pub fn normalize(raw: &str) -> Result<FunctionData, ParseError> {
    let raw = raw.replace("\r\n", "\n");
    let (text, multiline) = if is_markup(&raw) {
        let multiline = raw.contains('\n') || LINE_BREAK_RE.is_match(&raw);
        (strip_markup(&raw, multiline), multiline)
    } else {
        let multiline = raw.contains('\n');
        (raw, multiline)
    };
    let text = shape_whitespace(&text, multiline);

    let (function_name, code) = recover_identifier(&text).ok_or(ParseError::NoIdentifier)?;
    let function_code = BLANK_RUN_RE.replace_all(&code, "\n\n").trim().to_string();

    debug!(function = %function_name, lines = function_code.lines().count(), "normalized starter code");
    Ok(FunctionData {
        function_name,
        function_code,
    })
}

fn is_markup(raw: &str) -> bool {
    MARKUP_START_RE.is_match(raw)
}

fn strip_markup(raw: &str, multiline: bool) -> String {
    let text = if multiline {
        LINE_BREAK_RE.replace_all(raw, "\n").into_owned()
    } else {
        raw.to_string()
    };
    let text = PRESENTATION_TAG_RE.replace_all(&text, "");
    let text = decode_entities(&text);
    COMMENT_RE.replace_all(&text, "").into_owned()
}

/// Decode the entity set editors emit for starter code.
fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

fn shape_whitespace(text: &str, multiline: bool) -> String {
    if multiline {
        let joined = text.lines().map(str::trim_end).collect::<Vec<_>>().join("\n");
        if joined.trim().contains('\n') {
            return joined;
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Export list first, then a `function name` / `const name =` declaration.
fn recover_identifier(text: &str) -> Option<(String, String)> {
    if let Some(caps) = EXPORT_LIST_RE.captures(text) {
        let name = caps[1].to_string();
        let code = EXPORT_LIST_RE.replace_all(text, "").into_owned();
        return Some((name, code));
    }

    let caps = DECLARATION_RE.captures(text)?;
    let name = caps.get(2).or_else(|| caps.get(3))?.as_str().to_string();

    // The generated file re-exports the name, so an inline `export` would duplicate it.
    let code = match caps.get(1) {
        Some(export) => format!("{}{}", &text[..export.start()], &text[export.end()..]),
        None => text.to_string(),
    };
    Some((name, code))
}
