//! Timer-reset debouncing: every call replaces the pending timer and only the
//! latest generation is allowed to fire.

use gloo_timers::callback::Timeout;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Generation counter deciding which scheduled call is still current
#[derive(Clone, Default)]
pub struct DebounceGate {
    generation: Rc<Cell<u64>>,
}

impl DebounceGate {
    /// Starts a new generation, making every earlier ticket stale
    pub fn next(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.get() == ticket
    }

    /// Ties `f` to a new generation: it runs only if nothing was scheduled or
    /// cancelled after it
    pub fn wrap(&self, f: impl FnOnce() + 'static) -> impl FnOnce() + 'static {
        let ticket = self.next();
        let gate = self.clone();
        move || {
            if gate.is_current(ticket) {
                f();
            }
        }
    }
}

#[derive(Clone)]
pub struct Debouncer {
    gate: DebounceGate,
    delay_ms: u32,
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            gate: DebounceGate::default(),
            delay_ms,
            pending: Rc::new(RefCell::new(None)),
        }
    }

    pub fn call(&self, f: impl FnOnce() + 'static) {
        let timeout = Timeout::new(self.delay_ms, self.gate.wrap(f));
        // dropping the previous Timeout clears it
        *self.pending.borrow_mut() = Some(timeout);
    }

    /// Drops the pending call, if any
    pub fn cancel(&self) {
        self.gate.next();
        self.pending.borrow_mut().take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let gate = DebounceGate::default();
        let first = gate.next();
        let second = gate.next();
        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn(u32) -> Box<dyn FnOnce()>) {
        let fired = Rc::new(Cell::new(0));
        let sink = Rc::clone(&fired);
        let make = move |value: u32| -> Box<dyn FnOnce()> {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.set(value))
        };
        (fired, make)
    }

    #[test]
    fn test_later_call_resets_earlier_ones() {
        let gate = DebounceGate::default();
        let (fired, make) = counter();

        let first = gate.wrap(make(1));
        let second = gate.wrap(make(2));
        let third = gate.wrap(make(3));

        // timers fire in scheduling order; only the last call survives
        first();
        second();
        assert_eq!(fired.get(), 0);
        third();
        assert_eq!(fired.get(), 3);
    }

    #[test]
    fn test_cancel_drops_pending_call() {
        let gate = DebounceGate::default();
        let (fired, make) = counter();

        let pending = gate.wrap(make(1));
        gate.next();
        pending();
        assert_eq!(fired.get(), 0);

        let again = gate.wrap(make(2));
        again();
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_clones_share_generation() {
        let gate = DebounceGate::default();
        let other = gate.clone();
        let ticket = gate.next();
        other.next();
        assert!(!gate.is_current(ticket));
    }
}
