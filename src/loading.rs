use crate::timing::{run_sequence, Scheduler, SequenceHandle, Step};
use std::rc::Rc;

pub const FADE_DELAY_MS: u32 = 1_200;
pub const HIDE_DELAY_MS: u32 = 500;
pub const HERO_ENTRANCE: &str = "fadeInUp 1.2s ease forwards";
pub const NAV_ENTRANCE: &str = "slideInDown 0.8s ease forwards";

pub trait LoadingView {
    fn fade_out(&self);
    fn hide(&self);
    fn start_entrance(&self);
}

/// Fades the overlay once the page has loaded, then removes it and plays the
/// hero and navigation entrances.
pub fn dismiss_loading_screen<V: LoadingView + 'static>(
    view: Rc<V>,
    scheduler: &Rc<dyn Scheduler>,
) -> SequenceHandle {
    let fading = Rc::clone(&view);
    run_sequence(
        scheduler,
        vec![
            Step::new("loading-fade", FADE_DELAY_MS, move || fading.fade_out()),
            Step::new("loading-hide", HIDE_DELAY_MS, move || {
                view.hide();
                view.start_entrance();
            }),
        ],
    )
}
