//! Decorative hero and card effects.

use crate::timing::{run_sequence, Scheduler, Step};
use std::{cell::Cell, ops::ControlFlow, rc::Rc};

pub const PARALLAX_THROTTLE_MS: u32 = 16;
const PARALLAX_SPEED: f64 = 0.3;

pub const TYPEWRITER_START_DELAY_MS: u32 = 2_000;
pub const TYPEWRITER_CHAR_MS: u32 = 60;
pub const TYPEWRITER_CARET_LINGER_MS: u32 = 1_000;
pub const TYPEWRITER_CARET: &str = "2px solid var(--gold)";

pub const TILT_RESET: &str = "perspective(1000px) rotateX(0deg) rotateY(0deg)";
const TILT_DAMPING: f64 = 10.0;

/// Hero translation while it is still on screen.
pub fn parallax_offset(scroll: f64, hero_height: f64) -> Option<f64> {
    (scroll < hero_height).then(|| -(scroll * PARALLAX_SPEED))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

pub fn tilt_transform(rect: TiltRect, client_x: f64, client_y: f64) -> String {
    let x = client_x - rect.left;
    let y = client_y - rect.top;
    let rotate_x = (y - rect.height / 2.0) / TILT_DAMPING;
    let rotate_y = (rect.width / 2.0 - x) / TILT_DAMPING;
    format!("perspective(1000px) rotateX({rotate_x}deg) rotateY({rotate_y}deg)")
}

pub trait TypewriterView {
    fn text(&self) -> String;
    fn set_text(&self, text: &str);
    fn set_caret(&self, visible: bool);
}

/// Clears the element after a pause and types its original text back one
/// character at a time.
pub fn start_typewriter<V: TypewriterView + 'static>(view: Rc<V>, scheduler: &Rc<dyn Scheduler>) {
    let text = view.text();
    let typing_scheduler = Rc::clone(scheduler);

    run_sequence(
        scheduler,
        vec![Step::new("typewriter", TYPEWRITER_START_DELAY_MS, move || {
            view.set_text("");
            view.set_caret(true);
            type_out(view, text, typing_scheduler);
        })],
    );
}

fn type_out<V: TypewriterView + 'static>(view: Rc<V>, text: String, scheduler: Rc<dyn Scheduler>) {
    let characters: Vec<char> = text.chars().collect();
    let revealed = Cell::new(0usize);
    let caret_scheduler = Rc::clone(&scheduler);

    scheduler.set_interval(
        TYPEWRITER_CHAR_MS,
        Box::new(move || {
            let count = revealed.get();
            if count < characters.len() {
                let shown: String = characters[..=count].iter().collect();
                view.set_text(&shown);
                revealed.set(count + 1);
                return ControlFlow::Continue(());
            }

            let view = Rc::clone(&view);
            caret_scheduler.set_timeout(
                TYPEWRITER_CARET_LINGER_MS,
                Box::new(move || view.set_caret(false)),
            );
            ControlFlow::Break(())
        }),
    );
}
