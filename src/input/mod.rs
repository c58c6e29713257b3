mod modifier;
mod navigation;

pub use modifier::{
    Key, KeyEvent, ModifierKey, ModifierState, ModifierTracker, ModifierTransition, Platform,
    PointerEvent,
};
pub use navigation::{
    BindingId, KeyBinding, KeyDisposition, NavigationDirection, NavigationInterceptor,
};
