//! Host abstraction — the contract between the engine and the embedding UI
//! layer. The engine is a passive reactor: it consumes click and navigation
//! notifications on the host's thread and never initiates work of its own.

use anyhow::Result;

/// Handle to an element in the host UI tree.
///
/// Handles are owned values (an `Rc`, an id into an arena) and cheap to
/// clone; the engine never mutates one and never retains one past the event
/// currently being processed.
pub trait UiElement: Clone + 'static {
    fn tag_name(&self) -> String;

    /// All attributes of the element as (name, value) pairs.
    fn attributes(&self) -> Vec<(String, String)>;

    fn parent(&self) -> Option<Self>;
}

/// Handler invoked per click notification. The target is absent for
/// synthetic events that carry no originating element.
pub type ClickHandler<E> = Box<dyn Fn(Option<E>) -> Result<()>>;

/// Handler invoked per location change, with the new location.
pub type NavigationHandler = Box<dyn Fn(&str) -> Result<()>>;

/// The subscription surface the embedding layer provides.
///
/// Handler errors (typically a failing sink) propagate out of the host's
/// dispatch site; the engine applies no retry or suppression. A removed
/// subscription must never be invoked again — detach relies on that to rule
/// out delivery-after-teardown.
pub trait UiHost {
    type Element: UiElement;
    type Subscription;

    /// Current location string. Opaque to the engine — a path or a full URL.
    fn location(&self) -> String;

    fn subscribe_clicks(&self, handler: ClickHandler<Self::Element>) -> Self::Subscription;

    fn subscribe_navigation(&self, handler: NavigationHandler) -> Self::Subscription;

    fn unsubscribe(&self, subscription: Self::Subscription);
}
