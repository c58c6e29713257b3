use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::geometry::{Point, Size};
use crate::host::{OwnerId, PreviewRenderer, PreviewRequest, PreviewSurface, PreviewTicket};

use super::{PreviewRegistry, PreviewTarget};

/// One spawned preview surface plus what the session knows about it.
pub(crate) struct LivePreview {
    owner: OwnerId,
    ticket: PreviewTicket,
    surface: Box<dyn PreviewSurface>,
    ready: bool,
    hidden: bool,
}

impl LivePreview {
    pub(crate) fn new(owner: OwnerId, ticket: PreviewTicket, surface: Box<dyn PreviewSurface>) -> Self {
        Self {
            owner,
            ticket,
            surface,
            ready: false,
            hidden: false,
        }
    }

    pub(crate) fn ticket(&self) -> PreviewTicket {
        self.ticket
    }

    pub(crate) fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn hide(&mut self) {
        if self.hidden {
            return;
        }
        self.hidden = true;
        self.surface.hide();
    }
}

impl fmt::Debug for LivePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LivePreview")
            .field("owner", &self.owner)
            .field("ticket", &self.ticket)
            .field("ready", &self.ready)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

pub(crate) type PreviewHandle = Rc<RefCell<LivePreview>>;

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub target: Option<PreviewTarget>,
    pub lazy_hide: bool,
    pub origin: Option<Point>,
    pub anchor: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyOutcome {
    /// The ticket was superseded or already hidden; nothing changed.
    Stale,
    /// The current preview is now on screen; `replaced` is true if a retained one was hidden.
    Shown { replaced: bool },
}

/// Owns at most one live preview for a single list.
///
/// With lazy hide, the previously shown preview is retained until its replacement reports
/// ready, so the user never sees an empty gap while navigating.
#[derive(Debug)]
pub struct PreviewSession {
    owner: OwnerId,
    registry: PreviewRegistry,
    current: Option<PreviewHandle>,
    retiring: Option<PreviewHandle>,
    next_ticket: u64,
    last_known_size: Option<Size>,
    last_pointer: Option<Point>,
}

impl PreviewSession {
    pub fn new(owner: OwnerId, registry: PreviewRegistry) -> Self {
        Self {
            owner,
            registry,
            current: None,
            retiring: None,
            next_ticket: 0,
            last_known_size: None,
            last_pointer: None,
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn current_ticket(&self) -> Option<PreviewTicket> {
        self.current.as_ref().map(|preview| preview.borrow().ticket)
    }

    pub fn is_current_ready(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|preview| preview.borrow().ready)
    }

    pub fn pending_replacement(&self) -> bool {
        self.retiring.is_some()
    }

    pub fn last_known_size(&self) -> Option<Size> {
        self.last_known_size
    }

    pub fn last_pointer(&self) -> Option<Point> {
        self.last_pointer
    }

    pub fn record_pointer(&mut self, pointer: Point) {
        self.last_pointer = Some(pointer);
    }

    pub fn spawn<R>(&mut self, renderer: &mut R, request: SpawnRequest) -> Option<PreviewTicket>
    where
        R: PreviewRenderer + ?Sized,
    {
        let Some(target) = request.target else {
            tracing::trace!(owner = %self.owner, "no preview target; spawn skipped");
            return None;
        };
        if let Some(origin) = request.origin {
            self.record_pointer(origin);
        }

        if request.lazy_hide {
            self.retire_current();
        } else {
            self.hide(false);
        }

        self.next_ticket += 1;
        let ticket = PreviewTicket(self.next_ticket);
        let surface = renderer.open_preview(&PreviewRequest {
            owner: self.owner,
            ticket,
            link: target.link_request(),
            anchor: request.anchor,
            origin: request.origin,
        });
        let handle = Rc::new(RefCell::new(LivePreview::new(self.owner, ticket, surface)));
        self.registry.claim(self.owner, &handle);
        self.current = Some(handle);

        tracing::debug!(
            owner = %self.owner,
            %ticket,
            lazy = request.lazy_hide,
            retained = self.retiring.is_some(),
            "spawned preview"
        );
        Some(ticket)
    }

    pub fn hide(&mut self, lazy: bool) {
        if lazy {
            self.retire_current();
            return;
        }
        if let Some(current) = self.current.take() {
            let ticket = {
                let mut preview = current.borrow_mut();
                preview.hide();
                preview.ticket
            };
            self.registry.release(self.owner, Some(ticket));
            tracing::debug!(owner = %self.owner, %ticket, "hid preview");
        }
        if let Some(retiring) = self.retiring.take() {
            retiring.borrow_mut().hide();
        }
    }

    pub fn on_ready(&mut self, ticket: PreviewTicket, size: Size) -> ReadyOutcome {
        let Some(current) = self.current.as_ref() else {
            tracing::debug!(owner = %self.owner, %ticket, "ready notification with no live preview");
            return ReadyOutcome::Stale;
        };
        {
            let mut preview = current.borrow_mut();
            if preview.ticket != ticket || preview.hidden {
                tracing::debug!(
                    owner = %self.owner,
                    %ticket,
                    current = %preview.ticket,
                    "discarding ready notification for superseded preview"
                );
                return ReadyOutcome::Stale;
            }
            preview.ready = true;
        }
        self.last_known_size = Some(size);

        let replaced = match self.retiring.take() {
            Some(retiring) => {
                retiring.borrow_mut().hide();
                true
            }
            None => false,
        };
        ReadyOutcome::Shown { replaced }
    }

    pub fn reposition(&mut self, anchor: Point) {
        if let Some(current) = self.current.as_ref() {
            let mut preview = current.borrow_mut();
            if !preview.hidden {
                preview.surface.set_position(anchor);
            }
        }
    }

    /// The surface closed on its own; forget it without asking it to hide again.
    pub fn on_dismissed(&mut self, ticket: PreviewTicket) -> bool {
        if self.current_ticket() == Some(ticket) {
            if let Some(current) = self.current.take() {
                current.borrow_mut().hidden = true;
            }
            // The retained preview shows the previous item; it must not outlive its replacement.
            if let Some(retiring) = self.retiring.take() {
                retiring.borrow_mut().hide();
            }
            self.registry.release(self.owner, Some(ticket));
            tracing::debug!(owner = %self.owner, %ticket, "preview dismissed itself");
            return true;
        }
        let retiring_matches = self
            .retiring
            .as_ref()
            .is_some_and(|preview| preview.borrow().ticket == ticket);
        if retiring_matches {
            if let Some(retiring) = self.retiring.take() {
                retiring.borrow_mut().hidden = true;
            }
            return true;
        }
        false
    }

    /// Forgets previews a sibling list hid by claiming the shared registry.
    pub fn prune_evicted(&mut self) -> bool {
        let mut pruned = false;
        if self.current.as_ref().is_some_and(|preview| preview.borrow().hidden) {
            self.current = None;
            pruned = true;
        }
        if self.retiring.as_ref().is_some_and(|preview| preview.borrow().hidden) {
            self.retiring = None;
            pruned = true;
        }
        if pruned {
            tracing::debug!(owner = %self.owner, "dropped previews evicted by a sibling list");
        }
        pruned
    }

    pub fn teardown(&mut self) {
        self.hide(false);
        self.registry.release(self.owner, None);
    }

    // Moves a shown preview aside until its replacement is ready. A preview that never became
    // ready has nothing on screen worth keeping, so it is abandoned instead.
    fn retire_current(&mut self) {
        let Some(current) = self.current.take() else {
            return;
        };
        let (ready, hidden) = {
            let preview = current.borrow();
            (preview.ready, preview.hidden)
        };
        if hidden {
            return;
        }
        if ready {
            if let Some(previous) = self.retiring.replace(current) {
                previous.borrow_mut().hide();
            }
        } else {
            let ticket = {
                let mut preview = current.borrow_mut();
                preview.hide();
                preview.ticket
            };
            tracing::debug!(owner = %self.owner, %ticket, "abandoned preview before it was ready");
        }
    }
}
