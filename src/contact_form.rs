use crate::{
    notification::{NotificationKind, Notify},
    timing::{run_sequence, Scheduler, SequenceHandle, Step},
};
use log::{debug, info};
use regex::Regex;
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    sync::OnceLock,
};

pub const SENDING_DELAY_MS: u32 = 2_000;
pub const RESET_DELAY_MS: u32 = 3_000;
pub const SENDING_LABEL: &str = "Sending...";
pub const SENT_LABEL: &str = "Message Sent!";
pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your message has been sent successfully. We will get back to you soon.";

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Email,
    Message,
}

impl FieldKind {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Message];

    pub fn input_id(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }

    pub fn error_id(self) -> &'static str {
        match self {
            Self::Name => "nameError",
            Self::Email => "emailError",
            Self::Message => "messageError",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldState {
    Valid,
    Invalid,
    Pristine,
}

impl FieldState {
    pub fn border_color(self) -> &'static str {
        match self {
            Self::Valid => "var(--accent-green)",
            Self::Invalid => "#ef4444",
            Self::Pristine => "#e2e8f0",
        }
    }

    pub fn shows_error(self) -> bool {
        matches!(self, Self::Invalid)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Sending,
    Sent,
}

impl SubmitPhase {
    pub fn is_disabled(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected,
    Sending,
    AlreadySending,
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

pub fn field_is_valid(kind: FieldKind, value: &str) -> bool {
    match kind {
        FieldKind::Email => email_pattern().is_match(value),
        FieldKind::Name | FieldKind::Message => !value.trim().is_empty(),
    }
}

pub trait FormView {
    fn field_value(&self, kind: FieldKind) -> String;
    fn show_field_state(&self, kind: FieldKind, state: FieldState);
    fn show_submit_phase(&self, phase: SubmitPhase);
    /// Restores every control to its initial value.
    fn reset(&self);
}

pub struct ContactForm<V> {
    view: Rc<V>,
    scheduler: Rc<dyn Scheduler>,
    notifier: Rc<dyn Notify>,
    phase: Rc<Cell<SubmitPhase>>,
    submission: RefCell<Option<SequenceHandle>>,
}

impl<V: FormView + 'static> ContactForm<V> {
    pub fn new(view: V, scheduler: &Rc<dyn Scheduler>, notifier: Rc<dyn Notify>) -> Self {
        Self {
            view: Rc::new(view),
            scheduler: Rc::clone(scheduler),
            notifier,
            phase: Rc::new(Cell::new(SubmitPhase::Idle)),
            submission: RefCell::new(None),
        }
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.submission
            .borrow()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn validate_field(&self, kind: FieldKind) -> bool {
        let valid = field_is_valid(kind, &self.view.field_value(kind));
        let state = if valid {
            FieldState::Valid
        } else {
            FieldState::Invalid
        };
        self.view.show_field_state(kind, state);
        valid
    }

    /// Paints every field, even after the first failure.
    pub fn validate_all(&self) -> bool {
        FieldKind::ALL
            .into_iter()
            .map(|kind| self.validate_field(kind))
            .fold(true, |all_valid, valid| all_valid && valid)
    }

    pub fn submit(&self) -> SubmitOutcome {
        if self.is_submitting() {
            debug!("contact form submit ignored while sending");
            return SubmitOutcome::AlreadySending;
        }

        if !self.validate_all() {
            debug!("contact form rejected by validation");
            return SubmitOutcome::Rejected;
        }

        info!("contact form submitted");
        self.set_phase(SubmitPhase::Sending);

        let sent = {
            let view = Rc::clone(&self.view);
            let phase = Rc::clone(&self.phase);
            let notifier = Rc::clone(&self.notifier);
            move || {
                phase.set(SubmitPhase::Sent);
                view.show_submit_phase(SubmitPhase::Sent);
                notifier.notify(SUCCESS_MESSAGE, NotificationKind::Success);
            }
        };
        let reset = {
            let view = Rc::clone(&self.view);
            let phase = Rc::clone(&self.phase);
            move || {
                view.reset();
                phase.set(SubmitPhase::Idle);
                view.show_submit_phase(SubmitPhase::Idle);
                for kind in FieldKind::ALL {
                    view.show_field_state(kind, FieldState::Pristine);
                }
            }
        };

        let handle = run_sequence(
            &self.scheduler,
            vec![
                Step::new("form-sent", SENDING_DELAY_MS, sent),
                Step::new("form-reset", RESET_DELAY_MS, reset),
            ],
        );
        *self.submission.borrow_mut() = Some(handle);

        SubmitOutcome::Sending
    }

    fn set_phase(&self, phase: SubmitPhase) {
        self.phase.set(phase);
        self.view.show_submit_phase(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::ManualScheduler;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeForm {
        values: RefCell<HashMap<FieldKind, String>>,
        states: RefCell<HashMap<FieldKind, FieldState>>,
        phases: RefCell<Vec<SubmitPhase>>,
        resets: Cell<u32>,
    }

    impl FakeForm {
        fn filled(name: &str, email: &str, message: &str) -> Self {
            let form = Self::default();
            form.values.borrow_mut().extend([
                (FieldKind::Name, name.to_string()),
                (FieldKind::Email, email.to_string()),
                (FieldKind::Message, message.to_string()),
            ]);
            form
        }
    }

    impl FormView for FakeForm {
        fn field_value(&self, kind: FieldKind) -> String {
            self.values.borrow().get(&kind).cloned().unwrap_or_default()
        }

        fn show_field_state(&self, kind: FieldKind, state: FieldState) {
            self.states.borrow_mut().insert(kind, state);
        }

        fn show_submit_phase(&self, phase: SubmitPhase) {
            self.phases.borrow_mut().push(phase);
        }

        fn reset(&self) {
            self.values.borrow_mut().clear();
            self.resets.set(self.resets.get() + 1);
        }
    }

    #[derive(Default)]
    struct FakeNotify {
        sent: RefCell<Vec<(String, NotificationKind)>>,
    }

    impl Notify for FakeNotify {
        fn notify(&self, message: &str, kind: NotificationKind) {
            self.sent.borrow_mut().push((message.to_string(), kind));
        }
    }

    fn form_with(view: FakeForm) -> (Rc<ManualScheduler>, Rc<FakeNotify>, ContactForm<FakeForm>) {
        let clock = Rc::new(ManualScheduler::default());
        let scheduler: Rc<dyn Scheduler> = clock.clone();
        let notify = Rc::new(FakeNotify::default());
        let form = ContactForm::new(view, &scheduler, notify.clone());
        (clock, notify, form)
    }

    #[test]
    fn email_rules() {
        assert!(field_is_valid(FieldKind::Email, "a@b.c"));
        assert!(field_is_valid(FieldKind::Email, "first.last@example.co.uk"));
        assert!(!field_is_valid(FieldKind::Email, "a@b"));
        assert!(!field_is_valid(FieldKind::Email, ""));
        assert!(!field_is_valid(FieldKind::Email, "a @b.c"));
        assert!(!field_is_valid(FieldKind::Email, "a@ b.c"));
        assert!(!field_is_valid(FieldKind::Email, "a@b@c.d"));
        assert!(!field_is_valid(FieldKind::Email, "a@.c"));
    }

    #[test]
    fn text_fields_need_non_blank_content() {
        assert!(field_is_valid(FieldKind::Name, " Ada "));
        assert!(!field_is_valid(FieldKind::Name, "   "));
        assert!(!field_is_valid(FieldKind::Message, "\n\t"));
    }

    #[test]
    fn whole_form_validation_paints_every_field() {
        let (_clock, _notify, form) = form_with(FakeForm::filled("", "ada@example.com", "Hello"));

        assert!(!form.validate_all());

        let states = form.view.states.borrow();
        assert_eq!(states.get(&FieldKind::Name), Some(&FieldState::Invalid));
        assert_eq!(states.get(&FieldKind::Email), Some(&FieldState::Valid));
        assert_eq!(states.get(&FieldKind::Message), Some(&FieldState::Valid));
    }

    #[test]
    fn invalid_submit_is_rejected_without_phase_change() {
        let (clock, notify, form) = form_with(FakeForm::filled("Ada", "not-an-email", "Hi"));

        assert_eq!(form.submit(), SubmitOutcome::Rejected);
        clock.advance(10_000);

        assert!(form.view.phases.borrow().is_empty());
        assert!(notify.sent.borrow().is_empty());
        assert_eq!(form.phase(), SubmitPhase::Idle);
    }

    #[test]
    fn valid_submit_walks_through_sending_sent_and_reset() {
        let (clock, notify, form) = form_with(FakeForm::filled("Ada", "ada@example.com", "Hello"));

        assert_eq!(form.submit(), SubmitOutcome::Sending);
        assert_eq!(form.phase(), SubmitPhase::Sending);
        assert!(form.phase().is_disabled());

        clock.advance(1_999);
        assert_eq!(form.phase(), SubmitPhase::Sending);
        assert!(notify.sent.borrow().is_empty());

        clock.advance(1);
        assert_eq!(form.phase(), SubmitPhase::Sent);
        assert!(form.phase().is_disabled());
        assert_eq!(
            *notify.sent.borrow(),
            vec![(SUCCESS_MESSAGE.to_string(), NotificationKind::Success)]
        );

        clock.advance(2_999);
        assert_eq!(form.phase(), SubmitPhase::Sent);

        clock.advance(1);
        assert_eq!(form.phase(), SubmitPhase::Idle);
        assert_eq!(
            *form.view.phases.borrow(),
            vec![SubmitPhase::Sending, SubmitPhase::Sent, SubmitPhase::Idle]
        );
        assert_eq!(form.view.resets.get(), 1);
        assert!(form
            .view
            .states
            .borrow()
            .values()
            .all(|state| *state == FieldState::Pristine));
    }

    #[test]
    fn second_submit_while_sending_is_ignored() {
        let (clock, notify, form) = form_with(FakeForm::filled("Ada", "ada@example.com", "Hello"));

        form.submit();
        clock.advance(500);
        assert_eq!(form.submit(), SubmitOutcome::AlreadySending);

        clock.advance(10_000);
        assert_eq!(notify.sent.borrow().len(), 1);
        assert_eq!(form.view.resets.get(), 1);
    }

    #[test]
    fn field_state_styles() {
        assert_eq!(FieldState::Invalid.border_color(), "#ef4444");
        assert!(FieldState::Invalid.shows_error());
        assert!(!FieldState::Pristine.shows_error());
    }
}
