//! Content formatting collaborator used by the summary fallback.

use pulldown_cmark::{html, Options, Parser};

/// Formatting mode a content module stores its bodies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentFormatting {
    /// Bodies are returned as stored.
    #[default]
    Plain,
    /// Bodies are Markdown and go through a [`ContentFormatter`] first.
    Markdown,
}

impl ContentFormatting {
    pub fn from_markdown_flag(markdown: bool) -> Self {
        if markdown {
            Self::Markdown
        } else {
            Self::Plain
        }
    }
}

/// A pure content-to-display transformation.
pub trait ContentFormatter: Send + Sync {
    fn format(&self, content: &str) -> String;
}

impl<F> ContentFormatter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn format(&self, content: &str) -> String {
        self(content)
    }
}

/// Renders Markdown to HTML via `pulldown_cmark`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl ContentFormatter for MarkdownFormatter {
    fn format(&self, content: &str) -> String {
        let options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(content, options);

        let mut html_output = String::with_capacity(content.len() + content.len() / 2);
        html::push_html(&mut html_output, parser);
        html_output
    }
}
