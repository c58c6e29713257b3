//! Capabilities the embedding UI provides.
//!
//! The host owns the real widgets. A coordinator only talks to them through these traits,
//! and the host forwards its events (keys, pointer, selection, preview readiness) to the
//! coordinator as plain method calls.

use std::fmt;

use thiserror::Error;

use crate::geometry::{Point, Rect, Size};
use crate::input::{BindingId, KeyBinding};
use crate::preview::LinkRequest;

#[derive(Debug, Error)]
pub enum AttachError {
    #[error("suggestion list does not expose {capability}")]
    MissingCapability { capability: &'static str },
    #[error("no item normalizer registered for {list_type}")]
    UnregisteredList { list_type: &'static str },
}

pub type AttachResult<T> = std::result::Result<T, AttachError>;

/// Identity of one attached list instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub u64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list#{}", self.0)
    }
}

/// Sequence number of one spawn; later spawns always carry larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreviewTicket(pub u64);

impl fmt::Display for PreviewTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview#{}", self.0)
    }
}

/// The selectable part of a suggestion list.
pub trait Chooser<T> {
    fn values(&self) -> &[T];
    fn selected_index(&self) -> Option<usize>;
    fn move_up(&mut self);
    fn move_down(&mut self);

    fn selected_item(&self) -> Option<&T> {
        self.selected_index()
            .and_then(|index| self.values().get(index))
    }
}

/// Keymap scope of the list; bindings fire only while the list has focus.
pub trait InputScope {
    fn register(&mut self, binding: KeyBinding) -> BindingId;
    fn unregister(&mut self, id: BindingId);
}

/// A suggestion popover or modal the preview feature attaches to.
///
/// `chooser` and `scope_mut` return `None` when the host cannot provide them; attaching to
/// such a list fails with [`AttachError::MissingCapability`].
///
/// Moves made through [`Chooser::move_up`]/[`Chooser::move_down`] by the coordinator do not
/// need to be echoed back as selection changes.
pub trait SuggestionList {
    type Item;

    fn is_open(&self) -> bool;
    fn chooser(&self) -> Option<&dyn Chooser<Self::Item>>;
    fn chooser_mut(&mut self) -> Option<&mut dyn Chooser<Self::Item>>;
    fn scope_mut(&mut self) -> Option<&mut dyn InputScope>;
    fn bounds(&self) -> Option<Rect>;
    fn viewport(&self) -> Size;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRequest {
    pub owner: OwnerId,
    pub ticket: PreviewTicket,
    pub link: LinkRequest,
    /// Where the surface must be placed, overriding the renderer's own placement.
    pub anchor: Point,
    pub origin: Option<Point>,
}

/// The host's "show a preview for this link" primitive.
///
/// Rendering happens asynchronously; the host reports back through
/// `PreviewCoordinator::on_preview_ready` with the request's ticket once the surface is
/// attached and measured.
pub trait PreviewRenderer {
    fn open_preview(&mut self, request: &PreviewRequest) -> Box<dyn PreviewSurface>;
}

pub trait PreviewSurface {
    fn hide(&mut self);
    fn set_position(&mut self, anchor: Point);
}
