//! Container resize notifications.
//!
//! Resize events are queued per subscriber and drained by the panel that owns
//! the widget, so no callback ever holds a reference to a widget. Dropping a
//! [`ResizeSubscription`] deregisters it, which covers every teardown path.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// New container dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug)]
struct Listener {
    id: u64,
    container: String,
    pending: Option<Size>,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Listener>,
}

/// Dispatches container resizes to subscribed panels.
///
/// Single-threaded; clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct ResizeBus {
    registry: Rc<RefCell<Registry>>,
}

impl ResizeBus {
    /// Create a new bus with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in resizes of `container`.
    #[must_use]
    pub fn subscribe(&self, container: &str) -> ResizeSubscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push(Listener {
            id,
            container: container.to_string(),
            pending: None,
        });

        ResizeSubscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Record a resize of `container`. Later resizes overwrite earlier
    /// undelivered ones. Returns the number of listeners notified.
    pub fn notify(&self, container: &str, size: Size) -> usize {
        let mut registry = self.registry.borrow_mut();
        let mut delivered = 0;
        for listener in registry
            .listeners
            .iter_mut()
            .filter(|l| l.container == container)
        {
            listener.pending = Some(size);
            delivered += 1;
        }
        delivered
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// A live resize registration. Deregisters on drop.
#[derive(Debug)]
pub struct ResizeSubscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl ResizeSubscription {
    /// Take the most recent undelivered size, if any.
    pub fn take_pending(&self) -> Option<Size> {
        let registry = self.registry.upgrade()?;
        let mut registry = registry.borrow_mut();
        registry
            .listeners
            .iter_mut()
            .find(|l| l.id == self.id)
            .and_then(|l| l.pending.take())
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.retain(|l| l.id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Size = Size {
        width: 800,
        height: 200,
    };

    #[test]
    fn test_new_bus_is_empty() {
        let bus = ResizeBus::new();
        assert_eq!(bus.listener_count(), 0);
        assert_eq!(bus.notify("price", SIZE), 0);
    }

    #[test]
    fn test_notify_reaches_matching_container_only() {
        let bus = ResizeBus::new();
        let price = bus.subscribe("price");
        let macd = bus.subscribe("macd");

        assert_eq!(bus.notify("price", SIZE), 1);
        assert_eq!(price.take_pending(), Some(SIZE));
        assert_eq!(price.take_pending(), None);
        assert_eq!(macd.take_pending(), None);
    }

    #[test]
    fn test_latest_size_wins() {
        let bus = ResizeBus::new();
        let sub = bus.subscribe("price");

        bus.notify("price", SIZE);
        bus.notify("price", Size { width: 640, height: 480 });
        assert_eq!(sub.take_pending(), Some(Size { width: 640, height: 480 }));
    }

    #[test]
    fn test_drop_deregisters() {
        let bus = ResizeBus::new();
        let sub = bus.subscribe("price");
        let _other = bus.subscribe("price");
        assert_eq!(bus.listener_count(), 2);

        drop(sub);
        assert_eq!(bus.listener_count(), 1);
        assert_eq!(bus.notify("price", SIZE), 1);
    }

    #[test]
    fn test_subscription_outlives_bus() {
        let bus = ResizeBus::new();
        let sub = bus.subscribe("price");
        drop(bus);

        assert_eq!(sub.take_pending(), None);
        drop(sub);
    }
}
