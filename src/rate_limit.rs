use crate::timing::{Scheduler, TimerHandle};
use std::{cell::Cell, rc::Rc};

/// At most one call per `interval_ms`, fired at the start of the window.
/// Calls inside an open window are dropped, not queued.
pub struct Throttle<A> {
    inner: Rc<ThrottleInner<A>>,
}

struct ThrottleInner<A> {
    action: Box<dyn Fn(A)>,
    interval_ms: u32,
    scheduler: Rc<dyn Scheduler>,
    window_open: Cell<bool>,
}

impl<A: 'static> Throttle<A> {
    pub fn new(
        scheduler: &Rc<dyn Scheduler>,
        interval_ms: u32,
        action: impl Fn(A) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(ThrottleInner {
                action: Box::new(action),
                interval_ms,
                scheduler: Rc::clone(scheduler),
                window_open: Cell::new(false),
            }),
        }
    }

    /// Returns whether the wrapped action ran.
    pub fn call(&self, arg: A) -> bool {
        if self.inner.window_open.replace(true) {
            return false;
        }

        let inner = Rc::clone(&self.inner);
        self.inner.scheduler.set_timeout(
            self.inner.interval_ms,
            Box::new(move || inner.window_open.set(false)),
        );

        (self.inner.action)(arg);
        true
    }
}

impl<A> Clone for Throttle<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Runs the action once `wait_ms` after the last call, with that call's
/// argument.
pub struct Debounce<A> {
    inner: Rc<DebounceInner<A>>,
}

struct DebounceInner<A> {
    action: Box<dyn Fn(A)>,
    wait_ms: u32,
    scheduler: Rc<dyn Scheduler>,
    pending: Cell<Option<TimerHandle>>,
}

impl<A: 'static> Debounce<A> {
    pub fn new(scheduler: &Rc<dyn Scheduler>, wait_ms: u32, action: impl Fn(A) + 'static) -> Self {
        Self {
            inner: Rc::new(DebounceInner {
                action: Box::new(action),
                wait_ms,
                scheduler: Rc::clone(scheduler),
                pending: Cell::new(None),
            }),
        }
    }

    pub fn call(&self, arg: A) {
        self.cancel();

        let inner = Rc::clone(&self.inner);
        let handle = self.inner.scheduler.set_timeout(
            self.inner.wait_ms,
            Box::new(move || {
                inner.pending.set(None);
                (inner.action)(arg);
            }),
        );
        self.inner.pending.set(Some(handle));
    }

    pub fn cancel(&self) {
        if let Some(handle) = self.inner.pending.take() {
            self.inner.scheduler.cancel(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.inner.pending.get().is_some()
    }
}

impl<A> Clone for Debounce<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::ManualScheduler;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn setup() -> (Rc<ManualScheduler>, Rc<dyn Scheduler>, Rc<RefCell<Vec<u32>>>) {
        let clock = Rc::new(ManualScheduler::default());
        let scheduler: Rc<dyn Scheduler> = clock.clone();
        (clock, scheduler, Rc::new(RefCell::new(Vec::new())))
    }

    #[test]
    fn throttle_fires_first_call_immediately() {
        let (_clock, scheduler, calls) = setup();
        let sink = Rc::clone(&calls);
        let throttled = Throttle::new(&scheduler, 100, move |value| sink.borrow_mut().push(value));

        assert!(throttled.call(1));
        assert_eq!(*calls.borrow(), vec![1]);
    }

    #[test]
    fn throttle_fires_once_per_window() {
        let (clock, scheduler, calls) = setup();
        let sink = Rc::clone(&calls);
        let throttled = Throttle::new(&scheduler, 100, move |value| sink.borrow_mut().push(value));

        // A call every 10ms for 350ms.
        for step in 0..35u32 {
            throttled.call(step);
            clock.advance(10);
        }

        assert_eq!(*calls.borrow(), vec![0, 10, 20, 30]);
    }

    #[test]
    fn throttle_drops_calls_inside_window_without_queueing() {
        let (clock, scheduler, calls) = setup();
        let sink = Rc::clone(&calls);
        let throttled = Throttle::new(&scheduler, 100, move |value| sink.borrow_mut().push(value));

        throttled.call(1);
        assert!(!throttled.call(2));
        assert!(!throttled.clone().call(3));
        clock.advance(500);

        assert_eq!(*calls.borrow(), vec![1]);
        assert!(throttled.call(4));
        assert_eq!(*calls.borrow(), vec![1, 4]);
    }

    #[test]
    fn separate_throttles_share_nothing() {
        let (_clock, scheduler, calls) = setup();
        let first_sink = Rc::clone(&calls);
        let second_sink = Rc::clone(&calls);
        let first = Throttle::new(&scheduler, 100, move |value| first_sink.borrow_mut().push(value));
        let second = Throttle::new(&scheduler, 100, move |value| second_sink.borrow_mut().push(value));

        assert!(first.call(1));
        assert!(second.call(2));
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[test]
    fn debounce_delivers_only_last_argument_once() {
        let (clock, scheduler, calls) = setup();
        let sink = Rc::clone(&calls);
        let debounced = Debounce::new(&scheduler, 150, move |value| sink.borrow_mut().push(value));

        for value in 1..=5 {
            debounced.call(value);
            clock.advance(100);
        }
        assert!(calls.borrow().is_empty());

        clock.advance(49);
        assert!(calls.borrow().is_empty());

        clock.advance(1);
        assert_eq!(*calls.borrow(), vec![5]);
        assert!(!debounced.is_pending());

        clock.advance(1_000);
        assert_eq!(*calls.borrow(), vec![5]);
    }

    #[test]
    fn debounce_cancel_drops_pending_call() {
        let (clock, scheduler, calls) = setup();
        let sink = Rc::clone(&calls);
        let debounced = Debounce::new(&scheduler, 150, move |value| sink.borrow_mut().push(value));

        debounced.call(7);
        debounced.cancel();
        clock.advance(1_000);

        assert!(calls.borrow().is_empty());
        assert_eq!(clock.pending(), 0);
    }
}
