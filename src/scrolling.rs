use std::cell::Cell;

pub const SCROLL_TOP_THROTTLE_MS: u32 = 100;
const SCROLL_TOP_THRESHOLD_PX: f64 = 400.0;
const ANCHOR_GUTTER_PX: f64 = 20.0;

/// Document offset to scroll to so the target clears the fixed header.
pub fn anchor_scroll_top(target_offset_top: f64, header_height: f64) -> f64 {
    target_offset_top - header_height - ANCHOR_GUTTER_PX
}

/// Fragment selector of a same-page link. A bare `#` names nothing.
pub fn same_page_fragment(href: &str) -> Option<&str> {
    let fragment = href.strip_prefix('#')?;
    (!fragment.is_empty()).then_some(href)
}

pub trait ScrollTopView {
    fn set_visible(&self, visible: bool);
}

pub struct ScrollTopButton<V> {
    view: V,
    visible: Cell<Option<bool>>,
}

impl<V: ScrollTopView> ScrollTopButton<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            visible: Cell::new(None),
        }
    }

    pub fn on_scroll(&self, offset: f64) {
        let visible = offset > SCROLL_TOP_THRESHOLD_PX;
        if self.visible.replace(Some(visible)) != Some(visible) {
            self.view.set_visible(visible);
        }
    }
}
