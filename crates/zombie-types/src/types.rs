use std::fmt;
use std::str::FromStr;

use crate::error::ZombieError;

/// A single source fragment to be grouped into an article.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Paragraph {
    pub content: String, // Markdown, kept verbatim for the final body
    #[serde(default)]
    pub sourcetext: Option<String>,
    #[serde(default)]
    pub sourceurl: Option<String>,
}

impl Paragraph {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            sourcetext: None,
            sourceurl: None,
        }
    }

    pub fn with_source_text(mut self, text: impl Into<String>) -> Self {
        self.sourcetext = Some(text.into());
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.sourceurl = Some(url.into());
        self
    }
}

/// How an article heading is framed when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    /// `<h2>{index} - {title}</h2>` followed directly by the body
    Html,
    /// `## {index} - {title}` followed by a blank line and the body
    Markdown,
}

impl FromStr for HeaderStyle {
    type Err = ZombieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "html" | "h2" => Ok(HeaderStyle::Html),
            "markdown" | "md" => Ok(HeaderStyle::Markdown),
            other => Err(ZombieError::InvalidConfig(format!(
                "Unknown header style: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for HeaderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderStyle::Html => write!(f, "html"),
            HeaderStyle::Markdown => write!(f, "markdown"),
        }
    }
}

/// A synthesized article: one per cluster or random group.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Article {
    pub index: usize, // Cluster id or group position
    pub title: String,
    pub body: String, // Paragraphs with citations, blank-line separated
}

impl Article {
    pub fn header(&self, style: HeaderStyle) -> String {
        match style {
            HeaderStyle::Html => format!("<h2>{} - {}</h2>", self.index, self.title),
            HeaderStyle::Markdown => format!("## {} - {}", self.index, self.title),
        }
    }

    /// Render the article as a single string, trailing newline included.
    pub fn render(&self, style: HeaderStyle) -> String {
        let header = self.header(style);
        match style {
            HeaderStyle::Html => format!("{}\n{}\n", header, self.body),
            HeaderStyle::Markdown => format!("{}\n\n{}\n", header, self.body),
        }
    }
}
