use log::debug;
use std::cell::Cell;

pub const SCROLL_THROTTLE_MS: u32 = 100;
pub const RESIZE_DEBOUNCE_MS: u32 = 150;
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;
const BACKDROP_THRESHOLD_PX: f64 = 50.0;
const HIDE_THRESHOLD_PX: f64 = 100.0;

pub trait NavigationView {
    fn set_menu_open(&self, open: bool);
    fn set_header_backdrop(&self, solid: bool);
    fn set_header_hidden(&self, hidden: bool);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeaderStyle {
    pub backdrop: bool,
    pub hidden: bool,
}

pub fn header_style(offset: f64, last_offset: f64) -> HeaderStyle {
    HeaderStyle {
        backdrop: offset > BACKDROP_THRESHOLD_PX,
        hidden: offset > last_offset && offset > HIDE_THRESHOLD_PX,
    }
}

pub struct Navigation<V> {
    view: V,
    menu_open: Cell<bool>,
    last_scroll: Cell<f64>,
}

impl<V: NavigationView> Navigation<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            menu_open: Cell::new(false),
            last_scroll: Cell::new(0.0),
        }
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open.get()
    }

    pub fn toggle_menu(&self) {
        self.set_menu_open(!self.menu_open.get());
    }

    pub fn close_menu(&self) {
        self.set_menu_open(false);
    }

    /// Escape only acts on an open menu.
    pub fn on_escape(&self) -> bool {
        if !self.menu_open.get() {
            return false;
        }
        self.close_menu();
        true
    }

    pub fn on_resize(&self, viewport_width: f64) {
        if viewport_width > MOBILE_BREAKPOINT_PX && self.menu_open.get() {
            self.close_menu();
        }
    }

    pub fn on_scroll(&self, offset: f64) {
        let style = header_style(offset, self.last_scroll.get());
        self.view.set_header_backdrop(style.backdrop);
        self.view.set_header_hidden(style.hidden);
        self.last_scroll.set(offset);
    }

    fn set_menu_open(&self, open: bool) {
        debug!("navigation menu open={open}");
        self.menu_open.set(open);
        self.view.set_menu_open(open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingView {
        calls: RefCell<Vec<String>>,
    }

    impl NavigationView for RecordingView {
        fn set_menu_open(&self, open: bool) {
            self.calls.borrow_mut().push(format!("menu:{open}"));
        }

        fn set_header_backdrop(&self, solid: bool) {
            self.calls.borrow_mut().push(format!("backdrop:{solid}"));
        }

        fn set_header_hidden(&self, hidden: bool) {
            self.calls.borrow_mut().push(format!("hidden:{hidden}"));
        }
    }

    fn take_calls(navigation: &Navigation<RecordingView>) -> Vec<String> {
        navigation.view.calls.borrow_mut().drain(..).collect()
    }

    #[test]
    fn toggle_flips_menu_and_mirrors_to_view() {
        let navigation = Navigation::new(RecordingView::default());

        navigation.toggle_menu();
        assert!(navigation.is_menu_open());
        navigation.toggle_menu();
        assert!(!navigation.is_menu_open());

        assert_eq!(take_calls(&navigation), vec!["menu:true", "menu:false"]);
    }

    #[test]
    fn escape_closes_only_open_menu() {
        let navigation = Navigation::new(RecordingView::default());

        assert!(!navigation.on_escape());
        assert!(take_calls(&navigation).is_empty());

        navigation.toggle_menu();
        take_calls(&navigation);
        assert!(navigation.on_escape());
        assert_eq!(take_calls(&navigation), vec!["menu:false"]);
    }

    #[test]
    fn link_activation_closes_menu() {
        let navigation = Navigation::new(RecordingView::default());

        navigation.toggle_menu();
        navigation.close_menu();

        assert!(!navigation.is_menu_open());
    }

    #[test]
    fn header_gets_backdrop_above_fifty_pixels() {
        assert!(!header_style(50.0, 0.0).backdrop);
        assert!(header_style(51.0, 0.0).backdrop);
    }

    #[test]
    fn header_hides_when_scrolling_down_past_hundred_pixels() {
        assert_eq!(
            header_style(150.0, 120.0),
            HeaderStyle {
                backdrop: true,
                hidden: true
            }
        );
        assert!(!header_style(90.0, 10.0).hidden);
        assert!(!header_style(140.0, 200.0).hidden);
    }

    #[test]
    fn scroll_direction_uses_previous_offset() {
        let navigation = Navigation::new(RecordingView::default());

        navigation.on_scroll(300.0);
        navigation.on_scroll(250.0);
        navigation.on_scroll(260.0);

        assert_eq!(
            take_calls(&navigation),
            vec![
                "backdrop:true",
                "hidden:true",
                "backdrop:true",
                "hidden:false",
                "backdrop:true",
                "hidden:true",
            ]
        );
    }

    #[test]
    fn widening_viewport_closes_open_menu() {
        let navigation = Navigation::new(RecordingView::default());

        navigation.toggle_menu();
        navigation.on_resize(600.0);
        assert!(navigation.is_menu_open());

        navigation.on_resize(1024.0);
        assert!(!navigation.is_menu_open());
    }
}
