//! Item shapes produced by the stock link suggester and the quick switcher, with the
//! normalizers that turn them into preview targets.

use super::PreviewTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkSuggestion {
    File { path: String },
    Alias { path: String, alias: String },
    /// Link to a note that does not exist yet.
    LinkText { linktext: String },
    Heading { path: String, heading: String, level: u8 },
    Block { path: String, line: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickSwitcherItem {
    File { path: String },
    HeadingsList { path: String, heading: String },
    SymbolList { path: String, line: u32 },
    FileBookmark { path: String, subpath: Option<String> },
    /// Bookmarks of searches, folders and other non-file kinds.
    OtherBookmark { kind: String },
}

pub fn normalize_link_suggestion(item: &LinkSuggestion) -> Option<PreviewTarget> {
    match item {
        LinkSuggestion::File { path } | LinkSuggestion::Alias { path, .. } => {
            Some(PreviewTarget::file(path.as_str()))
        }
        LinkSuggestion::LinkText { .. } => None,
        LinkSuggestion::Heading { path, heading, .. } => {
            Some(PreviewTarget::heading(path.as_str(), heading.as_str()))
        }
        LinkSuggestion::Block { path, line } => Some(PreviewTarget::block(path.as_str(), *line)),
    }
}

pub fn normalize_quick_switcher_item(item: &QuickSwitcherItem) -> Option<PreviewTarget> {
    match item {
        QuickSwitcherItem::File { path } => Some(PreviewTarget::file(path.as_str())),
        QuickSwitcherItem::HeadingsList { path, heading } => {
            Some(PreviewTarget::heading(path.as_str(), heading.as_str()))
        }
        QuickSwitcherItem::SymbolList { path, line } => {
            Some(PreviewTarget::block(path.as_str(), *line))
        }
        QuickSwitcherItem::FileBookmark {
            path,
            subpath: Some(subpath),
        } => Some(PreviewTarget::Link {
            linktext: format!("{path}{subpath}"),
            source_path: String::new(),
            line: None,
        }),
        QuickSwitcherItem::FileBookmark {
            path,
            subpath: None,
        } => Some(PreviewTarget::file(path.as_str())),
        QuickSwitcherItem::OtherBookmark { .. } => None,
    }
}
