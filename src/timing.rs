//! Deferred work on the page's event loop.
//!
//! Every delayed reaction in the site (rate limiters, the loading overlay,
//! the simulated form submission, notification lifetimes, counters) goes
//! through [`Scheduler`], so the behaviour can be driven by a virtual clock
//! in tests and by `setTimeout`/`setInterval` in the browser.

use log::debug;
use std::{cell::Cell, collections::VecDeque, ops::ControlFlow, rc::Rc};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

pub trait Scheduler {
    /// Runs `task` once after `delay_ms`.
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle;

    /// Runs `task` every `period_ms` until it returns `ControlFlow::Break`.
    fn set_interval(
        &self,
        period_ms: u32,
        task: Box<dyn FnMut() -> ControlFlow<()>>,
    ) -> TimerHandle;

    /// Drops a pending timer. Unknown or already fired handles are ignored.
    fn cancel(&self, handle: TimerHandle);
}

pub struct Step {
    name: &'static str,
    delay_ms: u32,
    action: Box<dyn FnOnce()>,
}

impl Step {
    pub fn new(name: &'static str, delay_ms: u32, action: impl FnOnce() + 'static) -> Self {
        Self {
            name,
            delay_ms,
            action: Box::new(action),
        }
    }
}

#[derive(Clone)]
pub struct SequenceHandle {
    scheduler: Rc<dyn Scheduler>,
    current: Rc<Cell<Option<TimerHandle>>>,
}

impl SequenceHandle {
    pub fn cancel(&self) {
        if let Some(handle) = self.current.take() {
            self.scheduler.cancel(handle);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.current.get().is_none()
    }
}

/// Runs `steps` one after another, each delay counted from the end of the
/// previous step.
pub fn run_sequence(scheduler: &Rc<dyn Scheduler>, steps: Vec<Step>) -> SequenceHandle {
    let current = Rc::new(Cell::new(None));
    schedule_next(Rc::clone(scheduler), steps.into(), Rc::clone(&current));

    SequenceHandle {
        scheduler: Rc::clone(scheduler),
        current,
    }
}

fn schedule_next(
    scheduler: Rc<dyn Scheduler>,
    mut steps: VecDeque<Step>,
    current: Rc<Cell<Option<TimerHandle>>>,
) {
    let Some(step) = steps.pop_front() else {
        current.set(None);
        return;
    };

    let Step {
        name,
        delay_ms,
        action,
    } = step;
    let next_scheduler = Rc::clone(&scheduler);
    let next_current = Rc::clone(&current);
    let handle = scheduler.set_timeout(
        delay_ms,
        Box::new(move || {
            debug!("sequence step `{name}` after {delay_ms}ms");
            action();
            schedule_next(next_scheduler, steps, next_current);
        }),
    );
    current.set(Some(handle));
}

#[cfg(test)]
pub(crate) use manual::ManualScheduler;

#[cfg(test)]
mod manual {
    use super::{Scheduler, TimerHandle};
    use std::{cell::RefCell, ops::ControlFlow};

    enum Task {
        Once(Box<dyn FnOnce()>),
        Repeat {
            period_ms: u64,
            task: Box<dyn FnMut() -> ControlFlow<()>>,
        },
    }

    struct Pending {
        handle: TimerHandle,
        due_ms: u64,
        order: u64,
        task: Task,
    }

    #[derive(Default)]
    struct ManualState {
        now_ms: u64,
        next_id: u64,
        next_order: u64,
        queue: Vec<Pending>,
    }

    /// Virtual clock: nothing runs until [`ManualScheduler::advance`].
    #[derive(Default)]
    pub struct ManualScheduler {
        state: RefCell<ManualState>,
    }

    impl ManualScheduler {
        pub fn now_ms(&self) -> u64 {
            self.state.borrow().now_ms
        }

        pub fn pending(&self) -> usize {
            self.state.borrow().queue.len()
        }

        pub fn advance(&self, delta_ms: u64) {
            let target = self.state.borrow().now_ms + delta_ms;

            loop {
                let next = {
                    let mut state = self.state.borrow_mut();
                    let position = state
                        .queue
                        .iter()
                        .enumerate()
                        .filter(|(_, pending)| pending.due_ms <= target)
                        .min_by_key(|(_, pending)| (pending.due_ms, pending.order))
                        .map(|(index, _)| index);

                    match position {
                        Some(index) => {
                            let pending = state.queue.remove(index);
                            state.now_ms = pending.due_ms;
                            Some(pending)
                        }
                        None => None,
                    }
                };

                let Some(pending) = next else {
                    break;
                };

                match pending.task {
                    Task::Once(task) => task(),
                    Task::Repeat {
                        period_ms,
                        mut task,
                    } => {
                        if task().is_continue() {
                            let mut state = self.state.borrow_mut();
                            let order = state.next_order;
                            state.next_order += 1;
                            state.queue.push(Pending {
                                handle: pending.handle,
                                due_ms: pending.due_ms + period_ms,
                                order,
                                task: Task::Repeat { period_ms, task },
                            });
                        }
                    }
                }
            }

            self.state.borrow_mut().now_ms = target;
        }

        fn push(&self, delay_ms: u32, task: Task) -> TimerHandle {
            let mut state = self.state.borrow_mut();
            state.next_id += 1;
            let handle = TimerHandle::new(state.next_id);
            let order = state.next_order;
            state.next_order += 1;
            let due_ms = state.now_ms + u64::from(delay_ms);
            state.queue.push(Pending {
                handle,
                due_ms,
                order,
                task,
            });
            handle
        }
    }

    impl Scheduler for ManualScheduler {
        fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
            self.push(delay_ms, Task::Once(task))
        }

        fn set_interval(
            &self,
            period_ms: u32,
            task: Box<dyn FnMut() -> ControlFlow<()>>,
        ) -> TimerHandle {
            self.push(
                period_ms,
                Task::Repeat {
                    period_ms: u64::from(period_ms),
                    task,
                },
            )
        }

        fn cancel(&self, handle: TimerHandle) {
            // Removed tasks are dropped after the borrow ends.
            let removed: Vec<Pending> = {
                let mut state = self.state.borrow_mut();
                let (removed, kept): (Vec<Pending>, Vec<Pending>) = std::mem::take(&mut state.queue)
                    .into_iter()
                    .partition(|pending| pending.handle == handle);
                state.queue = kept;
                removed
            };
            drop(removed);
        }
    }
}
