//! Recording fakes for the host traits.

use std::cell::RefCell;
use std::rc::Rc;

use crate::geometry::{Point, Rect, Size};
use crate::host::{
    Chooser, InputScope, PreviewRenderer, PreviewRequest, PreviewSurface, PreviewTicket,
    SuggestionList,
};
use crate::input::{BindingId, KeyBinding};

#[derive(Debug, Default)]
struct RenderLogState {
    opened: Vec<PreviewRequest>,
    hidden: Vec<PreviewTicket>,
    positions: Vec<(PreviewTicket, Point)>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct RenderLog {
    state: Rc<RefCell<RenderLogState>>,
}

impl RenderLog {
    pub(crate) fn surface(&self, ticket: PreviewTicket) -> Box<dyn PreviewSurface> {
        Box::new(MockSurface {
            ticket,
            log: self.clone(),
        })
    }

    pub(crate) fn opened(&self) -> Vec<PreviewRequest> {
        self.state.borrow().opened.clone()
    }

    pub(crate) fn opened_links(&self) -> Vec<String> {
        self.state
            .borrow()
            .opened
            .iter()
            .map(|request| request.link.linktext.clone())
            .collect()
    }

    pub(crate) fn hidden(&self) -> Vec<PreviewTicket> {
        self.state.borrow().hidden.clone()
    }

    pub(crate) fn hide_count(&self, ticket: PreviewTicket) -> usize {
        self.state
            .borrow()
            .hidden
            .iter()
            .filter(|hidden| **hidden == ticket)
            .count()
    }

    pub(crate) fn positions(&self) -> Vec<(PreviewTicket, Point)> {
        self.state.borrow().positions.clone()
    }
}

struct MockSurface {
    ticket: PreviewTicket,
    log: RenderLog,
}

impl PreviewSurface for MockSurface {
    fn hide(&mut self) {
        self.log.state.borrow_mut().hidden.push(self.ticket);
    }

    fn set_position(&mut self, anchor: Point) {
        self.log
            .state
            .borrow_mut()
            .positions
            .push((self.ticket, anchor));
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MockRenderer {
    log: RenderLog,
}

impl MockRenderer {
    pub(crate) fn new(log: RenderLog) -> Self {
        Self { log }
    }
}

impl PreviewRenderer for MockRenderer {
    fn open_preview(&mut self, request: &PreviewRequest) -> Box<dyn PreviewSurface> {
        self.log.state.borrow_mut().opened.push(request.clone());
        self.log.surface(request.ticket)
    }
}

#[derive(Debug, Default)]
pub(crate) struct MockScope {
    next_id: u64,
    bindings: Vec<(BindingId, KeyBinding)>,
}

impl MockScope {
    pub(crate) fn active_bindings(&self) -> Vec<KeyBinding> {
        self.bindings.iter().map(|(_, binding)| *binding).collect()
    }
}

impl InputScope for MockScope {
    fn register(&mut self, binding: KeyBinding) -> BindingId {
        self.next_id += 1;
        let id = BindingId(self.next_id);
        self.bindings.push((id, binding));
        id
    }

    fn unregister(&mut self, id: BindingId) {
        self.bindings.retain(|(existing, _)| *existing != id);
    }
}

#[derive(Debug, Clone)]
pub(crate) struct MockChooser<T> {
    pub(crate) values: Vec<T>,
    pub(crate) selected: Option<usize>,
}

impl<T> Chooser<T> for MockChooser<T> {
    fn values(&self) -> &[T] {
        &self.values
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn move_up(&mut self) {
        if self.values.is_empty() {
            return;
        }
        let last = self.values.len() - 1;
        self.selected = Some(match self.selected {
            Some(0) | None => last,
            Some(index) => index - 1,
        });
    }

    fn move_down(&mut self) {
        if self.values.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            Some(index) if index + 1 < self.values.len() => index + 1,
            _ => 0,
        });
    }
}

#[derive(Debug)]
pub(crate) struct MockList<T> {
    pub(crate) open: bool,
    pub(crate) chooser: Option<MockChooser<T>>,
    pub(crate) scope: Option<MockScope>,
    pub(crate) bounds: Option<Rect>,
    pub(crate) viewport: Size,
}

impl<T> MockList<T> {
    pub(crate) fn with_items(values: Vec<T>) -> Self {
        let selected = if values.is_empty() { None } else { Some(0) };
        Self {
            open: true,
            chooser: Some(MockChooser { values, selected }),
            scope: Some(MockScope::default()),
            bounds: Some(Rect::new(100.0, 50.0, 300.0, 90.0)),
            viewport: Size::new(1920.0, 1080.0),
        }
    }

    pub(crate) fn select(&mut self, index: usize) {
        if let Some(chooser) = self.chooser.as_mut() {
            chooser.selected = Some(index);
        }
    }

    pub(crate) fn active_bindings(&self) -> Vec<KeyBinding> {
        self.scope
            .as_ref()
            .map(MockScope::active_bindings)
            .unwrap_or_default()
    }
}

impl<T> SuggestionList for MockList<T> {
    type Item = T;

    fn is_open(&self) -> bool {
        self.open
    }

    fn chooser(&self) -> Option<&dyn Chooser<T>> {
        self.chooser
            .as_ref()
            .map(|chooser| chooser as &dyn Chooser<T>)
    }

    fn chooser_mut(&mut self) -> Option<&mut dyn Chooser<T>> {
        self.chooser
            .as_mut()
            .map(|chooser| chooser as &mut dyn Chooser<T>)
    }

    fn scope_mut(&mut self) -> Option<&mut dyn InputScope> {
        self.scope
            .as_mut()
            .map(|scope| scope as &mut dyn InputScope)
    }

    fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    fn viewport(&self) -> Size {
        self.viewport
    }
}
