use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::host::{OwnerId, PreviewTicket};

use super::session::{LivePreview, PreviewHandle};

thread_local! {
    static SHARED_REGISTRY: PreviewRegistry = PreviewRegistry::new();
}

#[derive(Debug)]
struct OpenPreview {
    owner: OwnerId,
    ticket: PreviewTicket,
    // The claiming preview first, then any of the owner's earlier previews still on screen.
    previews: Vec<Weak<RefCell<LivePreview>>>,
}

impl OpenPreview {
    fn hide_all(&self) {
        for preview in self.previews.iter().filter_map(Weak::upgrade) {
            preview.borrow_mut().hide();
        }
    }
}

fn still_visible(preview: &Weak<RefCell<LivePreview>>) -> bool {
    preview
        .upgrade()
        .is_some_and(|preview| !preview.borrow().is_hidden())
}

#[derive(Debug, Default)]
struct RegistryState {
    open: RefCell<Option<OpenPreview>>,
    next_owner: Cell<u64>,
}

/// The single "currently open preview" slot shared by every coordinator.
///
/// Holds only weak references; the owning session keeps its previews alive. A claim by the
/// same owner carries forward its earlier previews that are still visible (a lazily retained
/// one), so a claim by a different owner hides all of them.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    state: Rc<RegistryState>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry shared by everything on the current (UI) thread.
    pub fn shared() -> Self {
        SHARED_REGISTRY.with(Clone::clone)
    }

    pub fn allocate_owner(&self) -> OwnerId {
        let id = self.state.next_owner.get() + 1;
        self.state.next_owner.set(id);
        OwnerId(id)
    }

    pub(crate) fn claim(&self, owner: OwnerId, handle: &PreviewHandle) {
        let ticket = handle.borrow().ticket();
        let mut previews = vec![Rc::downgrade(handle)];
        let previous = self.state.open.take();

        if let Some(previous) = previous {
            if previous.owner == owner {
                previews.extend(previous.previews.into_iter().filter(still_visible));
            } else {
                tracing::debug!(
                    %owner,
                    evicted_owner = %previous.owner,
                    evicted_ticket = %previous.ticket,
                    "evicting sibling preview"
                );
                previous.hide_all();
            }
        }

        self.state.open.replace(Some(OpenPreview {
            owner,
            ticket,
            previews,
        }));
    }

    /// Clears the slot if `owner` holds it (and, when given, with that exact ticket).
    pub(crate) fn release(&self, owner: OwnerId, ticket: Option<PreviewTicket>) -> bool {
        let mut open = self.state.open.borrow_mut();
        let owned = open.as_ref().is_some_and(|slot| {
            slot.owner == owner && ticket.is_none_or(|ticket| slot.ticket == ticket)
        });
        if owned {
            *open = None;
        }
        owned
    }

    pub fn open_owner(&self) -> Option<OwnerId> {
        self.state.open.borrow().as_ref().map(|slot| slot.owner)
    }

    pub fn open_ticket(&self) -> Option<PreviewTicket> {
        self.state.open.borrow().as_ref().map(|slot| slot.ticket)
    }

    /// Hides and forgets whatever is open, regardless of owner.
    pub fn evict_all(&self) {
        if let Some(previous) = self.state.open.take() {
            previous.hide_all();
        }
    }
}
