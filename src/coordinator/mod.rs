//! Per-list orchestration of modifier tracking, navigation and the preview session.

use std::rc::Rc;

use crate::config::PreviewConfig;
use crate::geometry::{Point, Size};
use crate::host::{
    AttachError, AttachResult, OwnerId, PreviewRenderer, PreviewTicket, SuggestionList,
};
use crate::input::{
    KeyDisposition, KeyEvent, ModifierTracker, ModifierTransition, NavigationDirection,
    NavigationInterceptor, Platform, PointerEvent,
};
use crate::preview::{
    compute_preview_anchor, PlacementInput, PreviewRegistry, PreviewSession, PreviewTarget,
    ReadyOutcome, SpawnRequest,
};
use crate::state::{PreviewEvent, PreviewState, StateMachine};

/// Maps a host-specific list item to what should be previewed for it.
pub type ItemNormalizer<T> = Rc<dyn Fn(&T) -> Option<PreviewTarget>>;

/// Hold-to-preview controller bound to one open suggestion list.
///
/// Create it when the list opens and drop (or [`detach`](Self::detach)) it when the list
/// closes. The host forwards key, pointer and selection events plus preview readiness; the
/// coordinator drives the list's chooser and the renderer in response.
pub struct PreviewCoordinator<L, R>
where
    L: SuggestionList,
    R: PreviewRenderer,
{
    owner: OwnerId,
    list: L,
    renderer: R,
    normalizer: ItemNormalizer<L::Item>,
    config: PreviewConfig,
    tracker: ModifierTracker,
    navigation: NavigationInterceptor,
    session: PreviewSession,
    machine: StateMachine,
    previewed_index: Option<usize>,
    detached: bool,
}

impl<L, R> PreviewCoordinator<L, R>
where
    L: SuggestionList,
    R: PreviewRenderer,
{
    pub fn attach(
        list: L,
        renderer: R,
        normalizer: ItemNormalizer<L::Item>,
        config: PreviewConfig,
        registry: PreviewRegistry,
    ) -> AttachResult<Self> {
        Self::attach_for_platform(
            list,
            renderer,
            normalizer,
            config,
            registry,
            Platform::current(),
        )
    }

    pub fn attach_for_platform(
        mut list: L,
        renderer: R,
        normalizer: ItemNormalizer<L::Item>,
        config: PreviewConfig,
        registry: PreviewRegistry,
        platform: Platform,
    ) -> AttachResult<Self> {
        if list.chooser().is_none() {
            tracing::error!("suggestion list has no chooser; quick preview disabled for it");
            return Err(AttachError::MissingCapability {
                capability: "chooser",
            });
        }

        let mut navigation = NavigationInterceptor::new();
        let Some(scope) = list.scope_mut() else {
            tracing::error!("suggestion list has no input scope; quick preview disabled for it");
            return Err(AttachError::MissingCapability {
                capability: "input scope",
            });
        };
        navigation.install(scope, config.modifier);

        let owner = registry.allocate_owner();
        tracing::debug!(%owner, modifier = ?config.modifier, "preview coordinator attached");

        Ok(Self {
            owner,
            list,
            renderer,
            normalizer,
            tracker: ModifierTracker::for_platform(config.modifier, platform),
            config,
            navigation,
            session: PreviewSession::new(owner, registry),
            machine: StateMachine::new(),
            previewed_index: None,
            detached: false,
        })
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn state(&self) -> PreviewState {
        self.machine.state()
    }

    pub fn is_modifier_held(&self) -> bool {
        self.tracker.is_held()
    }

    pub fn current_ticket(&self) -> Option<PreviewTicket> {
        self.session.current_ticket()
    }

    pub fn session(&self) -> &PreviewSession {
        &self.session
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut L {
        &mut self.list
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// False while the keep-list-open override is set; hosts consult this before closing.
    pub fn allows_close(&self) -> bool {
        !self.config.keep_list_open
    }

    pub fn on_key_down(&mut self, event: &KeyEvent) {
        let list_open = self.list.is_open();
        if self.tracker.on_key_down(event, list_open) == Some(ModifierTransition::Pressed) {
            self.apply(PreviewEvent::ModifierPressed);
            self.refresh_preview(false, None);
        }
    }

    pub fn on_key_up(&mut self, event: &KeyEvent) {
        if self.tracker.on_key_up(event) == Some(ModifierTransition::Released) {
            self.release();
        }
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent) {
        self.session.record_pointer(event.position);
        if self.tracker.on_pointer_move(event) == Some(ModifierTransition::Released) {
            self.release();
        }
    }

    /// Called by the host when one of the registered modifier+arrow bindings fires.
    pub fn on_navigate(&mut self, direction: NavigationDirection) -> KeyDisposition {
        if !self.navigation.intercepts(self.tracker.is_held()) {
            return KeyDisposition::PassThrough;
        }
        let Some(chooser) = self.list.chooser_mut() else {
            tracing::warn!(owner = %self.owner, "chooser disappeared; navigation not intercepted");
            return KeyDisposition::PassThrough;
        };
        match direction {
            NavigationDirection::Up => chooser.move_up(),
            NavigationDirection::Down => chooser.move_down(),
        }
        self.refresh_preview(self.config.lazy_hide, None);
        KeyDisposition::Consumed
    }

    /// Selection moved by pointer hover or programmatically.
    pub fn on_selection_changed(&mut self, origin: Option<&PointerEvent>) {
        if let Some(origin) = origin {
            self.session.record_pointer(origin.position);
        }
        if !self.tracker.is_held() {
            return;
        }
        self.reconcile_evicted();
        let index = self.list.chooser().and_then(|chooser| chooser.selected_index());
        if index == self.previewed_index && self.session.current_ticket().is_some() {
            return;
        }
        self.refresh_preview(self.config.lazy_hide, origin.map(|event| event.position));
    }

    pub fn on_preview_ready(&mut self, ticket: PreviewTicket, size: Size) {
        match self.session.on_ready(ticket, size) {
            ReadyOutcome::Stale => self.reconcile_evicted(),
            ReadyOutcome::Shown { replaced } => {
                if replaced || self.machine.state() == PreviewState::Replacing {
                    self.apply(PreviewEvent::ReplacementReady);
                }
                let anchor = self.resolve_anchor(self.session.last_pointer());
                self.session.reposition(anchor);
            }
        }
    }

    pub fn on_preview_dismissed(&mut self, ticket: PreviewTicket) {
        if self.session.on_dismissed(ticket) {
            self.sync_replacement_state();
        }
    }

    pub fn on_list_closed(&mut self) {
        self.session.hide(false);
        self.tracker.reset();
        self.previewed_index = None;
        self.apply(PreviewEvent::ListClosed);
    }

    pub fn detach(mut self) {
        self.teardown();
    }

    fn release(&mut self) {
        self.session.hide(false);
        self.previewed_index = None;
        self.apply(PreviewEvent::ModifierReleased);
    }

    fn refresh_preview(&mut self, lazy_hide: bool, origin: Option<Point>) {
        self.reconcile_evicted();
        let Some(chooser) = self.list.chooser() else {
            tracing::warn!(owner = %self.owner, "chooser disappeared; preview not refreshed");
            return;
        };
        let index = chooser.selected_index();
        let target = chooser.selected_item().and_then(|item| (self.normalizer)(item));
        self.previewed_index = index;

        if self.config.debug_log {
            tracing::info!(owner = %self.owner, ?index, ?target, "normalized suggestion item");
        }

        if target.is_none() {
            // Never leave a preview up that describes a different item than the selection.
            self.session.hide(false);
            self.sync_replacement_state();
            return;
        }

        let anchor = self.resolve_anchor(origin.or(self.session.last_pointer()));
        self.session.spawn(
            &mut self.renderer,
            SpawnRequest {
                target,
                lazy_hide,
                origin,
                anchor,
            },
        );

        if self.session.pending_replacement() {
            self.apply(PreviewEvent::ReplacementRequested);
        } else {
            self.sync_replacement_state();
        }
    }

    // A sibling list may have hidden our previews through the shared registry.
    fn reconcile_evicted(&mut self) {
        if self.session.prune_evicted() {
            self.sync_replacement_state();
        }
    }

    fn sync_replacement_state(&mut self) {
        if self.machine.state() == PreviewState::Replacing && !self.session.pending_replacement() {
            self.apply(PreviewEvent::PreviewCleared);
        }
    }

    fn resolve_anchor(&self, pointer: Option<Point>) -> Point {
        compute_preview_anchor(
            &self.config,
            PlacementInput {
                viewport: self.list.viewport(),
                list: self.list.bounds().unwrap_or_default(),
                popover: self.session.last_known_size(),
                pointer,
            },
        )
    }

    fn apply(&mut self, event: PreviewEvent) {
        if let Err(err) = self.machine.transition(event) {
            tracing::debug!(owner = %self.owner, %err, "preview state event ignored");
        }
    }

    fn teardown(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        self.session.teardown();
        match self.list.scope_mut() {
            Some(scope) => self.navigation.uninstall(scope),
            None => tracing::warn!(owner = %self.owner, "input scope gone; bindings not unregistered"),
        }
        self.tracker.reset();
        self.previewed_index = None;
        self.apply(PreviewEvent::ListClosed);
        tracing::debug!(owner = %self.owner, "preview coordinator detached");
    }
}

impl<L, R> Drop for PreviewCoordinator<L, R>
where
    L: SuggestionList,
    R: PreviewRenderer,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
