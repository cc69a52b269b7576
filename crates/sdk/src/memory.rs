//! In-memory host — a single-threaded stand-in for a real UI tree, used by
//! the test suite and by embeddings that drive the engine manually.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::Result;

use crate::host::{ClickHandler, NavigationHandler, UiElement, UiHost};

/// An element in the in-memory tree. `Rc`-backed, so handles clone cheaply
/// and children keep their parent chain alive.
#[derive(Clone)]
pub struct MemoryElement {
    inner: Rc<ElementInner>,
}

struct ElementInner {
    tag: String,
    attributes: Vec<(String, String)>,
    parent: Option<MemoryElement>,
}

impl MemoryElement {
    pub fn new(tag: &str) -> Self {
        Self::with_attributes(tag, &[])
    }

    pub fn with_attributes(tag: &str, attributes: &[(&str, &str)]) -> Self {
        Self {
            inner: Rc::new(ElementInner {
                tag: tag.to_string(),
                attributes: attributes
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
                parent: None,
            }),
        }
    }

    /// A child of `parent` with the given tag and attributes.
    pub fn child_of(parent: &MemoryElement, tag: &str, attributes: &[(&str, &str)]) -> Self {
        Self {
            inner: Rc::new(ElementInner {
                tag: tag.to_string(),
                attributes: attributes
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
                parent: Some(parent.clone()),
            }),
        }
    }
}

impl UiElement for MemoryElement {
    fn tag_name(&self) -> String {
        self.inner.tag.clone()
    }

    fn attributes(&self) -> Vec<(String, String)> {
        self.inner.attributes.clone()
    }

    fn parent(&self) -> Option<Self> {
        self.inner.parent.clone()
    }
}

/// Token identifying one subscription on a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

/// In-memory [`UiHost`]: stores handlers keyed by token and dispatches them
/// synchronously from [`MemoryHost::click`] and [`MemoryHost::navigate`].
pub struct MemoryHost {
    location: RefCell<String>,
    click_handlers: RefCell<HashMap<u64, ClickHandler<MemoryElement>>>,
    navigation_handlers: RefCell<HashMap<u64, NavigationHandler>>,
    next_token: Cell<u64>,
}

impl MemoryHost {
    pub fn new(location: &str) -> Self {
        Self {
            location: RefCell::new(location.to_string()),
            click_handlers: RefCell::new(HashMap::new()),
            navigation_handlers: RefCell::new(HashMap::new()),
            next_token: Cell::new(0),
        }
    }

    /// Dispatch a click notification to every subscribed handler. The first
    /// handler error aborts dispatch and surfaces here.
    pub fn click(&self, target: Option<&MemoryElement>) -> Result<()> {
        for handler in self.click_handlers.borrow().values() {
            handler(target.cloned())?;
        }
        Ok(())
    }

    /// Change the current location and notify navigation subscribers.
    pub fn navigate(&self, url: &str) -> Result<()> {
        *self.location.borrow_mut() = url.to_string();
        for handler in self.navigation_handlers.borrow().values() {
            handler(url)?;
        }
        Ok(())
    }

    /// Total live subscriptions, both kinds.
    pub fn subscriber_count(&self) -> usize {
        self.click_handlers.borrow().len() + self.navigation_handlers.borrow().len()
    }

    fn mint_token(&self) -> u64 {
        let token = self.next_token.get();
        self.next_token.set(token + 1);
        token
    }
}

impl UiHost for MemoryHost {
    type Element = MemoryElement;
    type Subscription = SubscriptionToken;

    fn location(&self) -> String {
        self.location.borrow().clone()
    }

    fn subscribe_clicks(&self, handler: ClickHandler<MemoryElement>) -> SubscriptionToken {
        let token = self.mint_token();
        self.click_handlers.borrow_mut().insert(token, handler);
        SubscriptionToken(token)
    }

    fn subscribe_navigation(&self, handler: NavigationHandler) -> SubscriptionToken {
        let token = self.mint_token();
        self.navigation_handlers.borrow_mut().insert(token, handler);
        SubscriptionToken(token)
    }

    fn unsubscribe(&self, subscription: SubscriptionToken) {
        let SubscriptionToken(token) = subscription;
        self.click_handlers.borrow_mut().remove(&token);
        self.navigation_handlers.borrow_mut().remove(&token);
    }
}
