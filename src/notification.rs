//! Transient top-right notifications.
//!
//! A panel is mounted off-screen, slides in after a short delay so the CSS
//! transition runs, and slides out again on close or after its lifetime.
//! Live panels stack downwards instead of overlapping.

use crate::{
    error::Result,
    timing::{Scheduler, TimerHandle},
};
use log::{debug, warn};
use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

pub const ENTER_DELAY_MS: u32 = 100;
pub const LIFETIME_MS: u32 = 6_000;
pub const EXIT_TRANSITION_MS: u32 = 400;
pub const STACK_TOP_PX: f64 = 30.0;
pub const STACK_SPACING_PX: f64 = 96.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    #[default]
    Info,
}

impl NotificationKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notification notification-success",
            Self::Info => "notification notification-info",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Success => "var(--accent-green)",
            Self::Info => "var(--primary-blue)",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "fas fa-check-circle",
            Self::Info => "fas fa-info-circle",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

pub fn stack_top(position: usize) -> f64 {
    STACK_TOP_PX + STACK_SPACING_PX * position as f64
}

pub trait NotificationSurface {
    type Panel: Clone + 'static;

    /// Creates the panel off-screen at `top_px`. `on_close` is wired to the
    /// panel's close control.
    fn mount(
        &self,
        notification: &Notification,
        top_px: f64,
        on_close: Box<dyn Fn()>,
    ) -> Result<Self::Panel>;
    fn slide_in(&self, panel: &Self::Panel);
    fn slide_out(&self, panel: &Self::Panel);
    fn move_to(&self, panel: &Self::Panel, top_px: f64);
    fn remove(&self, panel: &Self::Panel);
}

/// What other controllers need from the presenter.
pub trait Notify {
    fn notify(&self, message: &str, kind: NotificationKind);
}

struct LiveNotification<P> {
    id: NotificationId,
    panel: P,
    auto_dismiss: Option<TimerHandle>,
    dismissing: bool,
}

pub struct Notifier<S: NotificationSurface> {
    inner: Rc<NotifierInner<S>>,
}

struct NotifierInner<S: NotificationSurface> {
    surface: S,
    scheduler: Rc<dyn Scheduler>,
    live: RefCell<Vec<LiveNotification<S::Panel>>>,
    next_id: Cell<u64>,
}

impl<S: NotificationSurface + 'static> Notifier<S> {
    pub fn new(surface: S, scheduler: &Rc<dyn Scheduler>) -> Self {
        Self {
            inner: Rc::new(NotifierInner {
                surface,
                scheduler: Rc::clone(scheduler),
                live: RefCell::new(Vec::new()),
                next_id: Cell::new(1),
            }),
        }
    }

    /// Returns `None` when the panel could not be created.
    pub fn show(&self, message: &str, kind: NotificationKind) -> Option<NotificationId> {
        NotifierInner::show(&self.inner, message, kind)
    }

    pub fn dismiss(&self, id: NotificationId) {
        NotifierInner::dismiss(&self.inner, id);
    }

    pub fn live_count(&self) -> usize {
        self.inner.live.borrow().len()
    }
}

impl<S: NotificationSurface + 'static> Notify for Notifier<S> {
    fn notify(&self, message: &str, kind: NotificationKind) {
        self.show(message, kind);
    }
}

impl<S: NotificationSurface + 'static> NotifierInner<S> {
    fn show(this: &Rc<Self>, message: &str, kind: NotificationKind) -> Option<NotificationId> {
        let id = NotificationId(this.next_id.get());
        this.next_id.set(id.0 + 1);

        let notification = Notification {
            message: message.to_string(),
            kind,
        };
        let top_px = stack_top(this.live.borrow().len());
        let on_close = {
            let weak = Rc::downgrade(this);
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    NotifierInner::dismiss(&inner, id);
                }
            })
        };
        let panel = match this.surface.mount(&notification, top_px, on_close) {
            Ok(panel) => panel,
            Err(error) => {
                warn!("notification not shown: {error}");
                return None;
            }
        };
        debug!("notification {} mounted ({kind:?})", id.0);

        this.live.borrow_mut().push(LiveNotification {
            id,
            panel,
            auto_dismiss: None,
            dismissing: false,
        });

        let weak = Rc::downgrade(this);
        this.scheduler.set_timeout(
            ENTER_DELAY_MS,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.slide_in(id);
                }
            }),
        );

        let weak: Weak<Self> = Rc::downgrade(this);
        let auto_dismiss = this.scheduler.set_timeout(
            LIFETIME_MS,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    NotifierInner::dismiss(&inner, id);
                }
            }),
        );
        if let Some(entry) = this.live.borrow_mut().iter_mut().find(|entry| entry.id == id) {
            entry.auto_dismiss = Some(auto_dismiss);
        }

        Some(id)
    }

    fn slide_in(&self, id: NotificationId) {
        let panel = self
            .live
            .borrow()
            .iter()
            .find(|entry| entry.id == id && !entry.dismissing)
            .map(|entry| entry.panel.clone());

        if let Some(panel) = panel {
            self.surface.slide_in(&panel);
        }
    }

    fn dismiss(this: &Rc<Self>, id: NotificationId) {
        let (panel, auto_dismiss) = {
            let mut live = this.live.borrow_mut();
            let Some(entry) = live
                .iter_mut()
                .find(|entry| entry.id == id && !entry.dismissing)
            else {
                return;
            };
            entry.dismissing = true;
            (entry.panel.clone(), entry.auto_dismiss.take())
        };

        if let Some(handle) = auto_dismiss {
            this.scheduler.cancel(handle);
        }
        this.surface.slide_out(&panel);
        debug!("notification {} dismissed", id.0);

        let weak = Rc::downgrade(this);
        this.scheduler.set_timeout(
            EXIT_TRANSITION_MS,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.remove(id);
                }
            }),
        );
    }

    fn remove(&self, id: NotificationId) {
        let (removed, remaining) = {
            let mut live = self.live.borrow_mut();
            let Some(position) = live.iter().position(|entry| entry.id == id) else {
                return;
            };
            let removed = live.remove(position);
            let remaining: Vec<S::Panel> = live.iter().map(|entry| entry.panel.clone()).collect();
            (removed, remaining)
        };

        self.surface.remove(&removed.panel);
        for (position, panel) in remaining.iter().enumerate() {
            self.surface.move_to(panel, stack_top(position));
        }
    }
}
