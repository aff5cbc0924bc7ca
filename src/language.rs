use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output language of the generated solution and test files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[value(name = "ts")]
    TypeScript,
    #[value(name = "js")]
    JavaScript,
}

impl Language {
    pub fn extension(self) -> &'static str {
        match self {
            Language::TypeScript => "ts",
            Language::JavaScript => "js",
        }
    }

    /// Key of the starter code inside the page-state blob.
    pub fn state_key(self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&Language::JavaScript).unwrap();
        assert_eq!(json, "\"javascript\"");
        let lang: Language = serde_json::from_str("\"typescript\"").unwrap();
        assert_eq!(lang, Language::TypeScript);
    }

    #[test]
    fn extensions() {
        assert_eq!(Language::TypeScript.extension(), "ts");
        assert_eq!(Language::JavaScript.extension(), "js");
        assert_eq!(Language::default().state_key(), "typescript");
    }
}
