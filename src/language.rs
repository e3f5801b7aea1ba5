//! Content-type tags and parser selection.
//!
//! Maps editor language identifiers to the syntax parser the external
//! formatting engine should use, and decides which documents the
//! save-triggered path is allowed to touch.

use serde::Serialize;

/// Language identifier of a document, as reported by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Html,
    Javascript,
    JavascriptReact,
    Typescript,
    TypescriptReact,
    Vue,
    Svelte,
    Astro,
    Php,
    /// Anything not in the known vocabulary (json, css, ...)
    Other(String),
}

impl LanguageId {
    /// Parse an editor language identifier string
    pub fn parse(tag: &str) -> Self {
        match tag {
            "html" => LanguageId::Html,
            "javascript" => LanguageId::Javascript,
            "javascriptreact" => LanguageId::JavascriptReact,
            "typescript" => LanguageId::Typescript,
            "typescriptreact" => LanguageId::TypescriptReact,
            "vue" => LanguageId::Vue,
            "svelte" => LanguageId::Svelte,
            "astro" => LanguageId::Astro,
            "php" => LanguageId::Php,
            other => LanguageId::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LanguageId::Html => "html",
            LanguageId::Javascript => "javascript",
            LanguageId::JavascriptReact => "javascriptreact",
            LanguageId::Typescript => "typescript",
            LanguageId::TypescriptReact => "typescriptreact",
            LanguageId::Vue => "vue",
            LanguageId::Svelte => "svelte",
            LanguageId::Astro => "astro",
            LanguageId::Php => "php",
            LanguageId::Other(tag) => tag.as_str(),
        }
    }

    /// The engine parser for this language. Unknown languages fall back to
    /// the generic markup parser.
    pub fn parser(&self) -> Parser {
        match self {
            LanguageId::Javascript | LanguageId::JavascriptReact => Parser::Babel,
            LanguageId::Typescript | LanguageId::TypescriptReact => Parser::Typescript,
            LanguageId::Vue => Parser::Vue,
            LanguageId::Html
            | LanguageId::Svelte
            | LanguageId::Astro
            | LanguageId::Php
            | LanguageId::Other(_) => Parser::Html,
        }
    }

    /// Whether the save hook may rewrite documents of this language.
    /// Unknown languages are never touched on save.
    pub fn sortable_on_save(&self) -> bool {
        !matches!(self, LanguageId::Other(_))
    }

    /// All language tags the save hook is allowed to act on.
    pub fn save_allow_list() -> [&'static str; 9] {
        [
            "html",
            "javascript",
            "javascriptreact",
            "typescript",
            "typescriptreact",
            "vue",
            "svelte",
            "astro",
            "php",
        ]
    }
}

/// Parser selector passed to the external formatting engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Parser {
    Html,
    Babel,
    Typescript,
    Vue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!(LanguageId::parse("html"), LanguageId::Html);
        assert_eq!(LanguageId::parse("typescriptreact"), LanguageId::TypescriptReact);
        assert_eq!(LanguageId::parse("php"), LanguageId::Php);
    }

    #[test]
    fn test_parse_unknown_tag() {
        assert_eq!(
            LanguageId::parse("json"),
            LanguageId::Other("json".to_string())
        );
    }

    #[test]
    fn test_parser_mapping() {
        assert_eq!(LanguageId::Html.parser(), Parser::Html);
        assert_eq!(LanguageId::Javascript.parser(), Parser::Babel);
        assert_eq!(LanguageId::JavascriptReact.parser(), Parser::Babel);
        assert_eq!(LanguageId::Typescript.parser(), Parser::Typescript);
        assert_eq!(LanguageId::TypescriptReact.parser(), Parser::Typescript);
        assert_eq!(LanguageId::Vue.parser(), Parser::Vue);
        assert_eq!(LanguageId::Svelte.parser(), Parser::Html);
        assert_eq!(LanguageId::Astro.parser(), Parser::Html);
        assert_eq!(LanguageId::Php.parser(), Parser::Html);
    }

    #[test]
    fn test_unknown_language_defaults_to_html_parser() {
        assert_eq!(
            LanguageId::Other("ruby".to_string()).parser(),
            Parser::Html
        );
    }

    #[test]
    fn test_save_allow_list() {
        assert!(LanguageId::Php.sortable_on_save());
        assert!(LanguageId::Vue.sortable_on_save());
        assert!(!LanguageId::Other("json".to_string()).sortable_on_save());
        assert_eq!(LanguageId::save_allow_list().len(), 9);
    }

    #[test]
    fn test_parser_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Parser::Babel).unwrap(), "\"babel\"");
        assert_eq!(serde_json::to_string(&Parser::Html).unwrap(), "\"html\"");
    }
}
