use serde::{Deserialize, Serialize};

const LINK_RESERVED_CHARS: &[char] = &['#', '^', '[', ']', '|', ':', '%', '\\'];

/// What to preview, independent of how the host renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreviewTarget {
    File {
        path: String,
    },
    Heading {
        path: String,
        heading: String,
    },
    Block {
        path: String,
        line: u32,
    },
    /// Pre-built link text, for lists whose items already know how to address their target.
    Link {
        linktext: String,
        #[serde(default)]
        source_path: String,
        #[serde(default)]
        line: Option<u32>,
    },
}

/// Arguments for the renderer's link preview primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    pub linktext: String,
    pub source_path: String,
    pub scroll: Option<u32>,
}

impl PreviewTarget {
    pub fn file(path: impl Into<String>) -> Self {
        Self::File { path: path.into() }
    }

    pub fn heading(path: impl Into<String>, heading: impl Into<String>) -> Self {
        Self::Heading {
            path: path.into(),
            heading: heading.into(),
        }
    }

    pub fn block(path: impl Into<String>, line: u32) -> Self {
        Self::Block {
            path: path.into(),
            line,
        }
    }

    pub fn link_request(&self) -> LinkRequest {
        match self {
            Self::File { path } => LinkRequest {
                linktext: path.clone(),
                source_path: String::new(),
                scroll: None,
            },
            Self::Heading { path, heading } => LinkRequest {
                linktext: format!("{path}#{}", strip_heading_for_link(heading)),
                source_path: String::new(),
                scroll: None,
            },
            Self::Block { path, line } => LinkRequest {
                linktext: path.clone(),
                source_path: String::new(),
                scroll: Some(*line),
            },
            Self::Link {
                linktext,
                source_path,
                line,
            } => LinkRequest {
                linktext: linktext.clone(),
                source_path: source_path.clone(),
                scroll: *line,
            },
        }
    }
}

/// Makes a heading usable after `#` in a link: reserved characters become spaces and
/// whitespace runs collapse.
pub fn strip_heading_for_link(heading: &str) -> String {
    heading
        .split(|c: char| c.is_whitespace() || LINK_RESERVED_CHARS.contains(&c))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
