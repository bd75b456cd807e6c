#![forbid(unsafe_code)]

//! Container width as an injected capability.
//!
//! The core never measures anything. The host implements [`WidthSource`]
//! over whatever it has (a resize observer, a terminal size, a fixed test
//! value) and the view pulls or subscribes through it. Every notification
//! is an idempotent "recompute layout now" trigger.

/// Identifier returned by [`WidthSource::subscribe`].
pub type ListenerId = u64;

/// Callback invoked with the new content-box width in pixels.
pub type WidthListener = Box<dyn FnMut(f64)>;

/// A host-provided source of container widths.
pub trait WidthSource {
    /// Current content-box width in pixels.
    fn current_width(&self) -> f64;

    /// Register a change listener.
    fn subscribe(&mut self, listener: WidthListener) -> ListenerId;

    /// Remove a listener; returns whether it was registered.
    fn unsubscribe(&mut self, id: ListenerId) -> bool;
}

/// A width source driven by explicit [`set_width`](Self::set_width) calls.
///
/// Listeners run synchronously, in subscription order, before `set_width`
/// returns.
pub struct ManualWidthSource {
    width: f64,
    listeners: Vec<(ListenerId, WidthListener)>,
    next_id: ListenerId,
}

impl std::fmt::Debug for ManualWidthSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualWidthSource")
            .field("width", &self.width)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ManualWidthSource {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    /// Update the width and notify listeners. Unchanged widths are ignored;
    /// returns whether listeners ran.
    pub fn set_width(&mut self, width: f64) -> bool {
        if width.to_bits() == self.width.to_bits() {
            return false;
        }
        self.width = width;
        tracing::trace!(width, listeners = self.listeners.len(), "width changed");
        for (_, listener) in &mut self.listeners {
            listener(width);
        }
        true
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl WidthSource for ManualWidthSource {
    fn current_width(&self) -> f64 {
        self.width
    }

    fn subscribe(&mut self, listener: WidthListener) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_see_changes_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut source = ManualWidthSource::new(800.0);

        let a = Rc::clone(&seen);
        source.subscribe(Box::new(move |w| a.borrow_mut().push(("a", w))));
        let b = Rc::clone(&seen);
        source.subscribe(Box::new(move |w| b.borrow_mut().push(("b", w))));

        assert!(source.set_width(1024.0));
        assert!(!source.set_width(1024.0));
        assert_eq!(*seen.borrow(), vec![("a", 1024.0), ("b", 1024.0)]);
        assert_eq!(source.current_width(), 1024.0);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let count = Rc::new(RefCell::new(0));
        let mut source = ManualWidthSource::new(0.0);
        let c = Rc::clone(&count);
        let id = source.subscribe(Box::new(move |_| *c.borrow_mut() += 1));

        source.set_width(500.0);
        assert!(source.unsubscribe(id));
        assert!(!source.unsubscribe(id));
        source.set_width(600.0);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(source.listener_count(), 0);
    }
}
