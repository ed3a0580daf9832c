use crate::{
    accessibility::{
        key_action, takes_focus_outline, KeyAction, KeyTarget, CTA_CLASS, FOCUS_OUTLINE,
        FOCUS_OUTLINE_OFFSET,
    },
    config::{
        ABOUT_CONTAINER_SELECTOR, ABOUT_SELECTOR, ACTIVE_CLASS, ANCHOR_SELECTOR, CONTACT_FORM_ID,
        COUNTERS_ATTRIBUTE, HEADER_SELECTOR, HERO_CONTENT_SELECTOR, HERO_SELECTOR,
        LOADING_SCREEN_ID, MENU_OPEN_CLASS, MENU_TOGGLE_ID, NAV_LINKS_ID, NAV_SELECTOR,
        REDUCED_MOTION_QUERY, REVEAL_SELECTOR, SUBMIT_SELECTOR, SUBTITLE_SELECTOR, TILT_SELECTOR,
    },
    contact_form::{
        ContactForm, FieldKind, FieldState, FormView, SubmitPhase, SENDING_LABEL, SENT_LABEL,
    },
    counter_board::{CounterBoard, CounterBoardProps, SchedulerRef},
    counters::parse_counters,
    effects::{
        parallax_offset, start_typewriter, tilt_transform, TiltRect, TypewriterView,
        PARALLAX_THROTTLE_MS, TILT_RESET, TYPEWRITER_CARET,
    },
    error::{Result, SiteError},
    loading::{dismiss_loading_screen, LoadingView, HERO_ENTRANCE, NAV_ENTRANCE},
    navigation::{Navigation, NavigationView, RESIZE_DEBOUNCE_MS, SCROLL_THROTTLE_MS},
    notification::{Notification, NotificationSurface, Notifier, Notify},
    rate_limit::{Debounce, Throttle},
    reveal::{reveal, seconds, Animation, RevealTarget, REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD},
    scrolling::{
        anchor_scroll_top, same_page_fragment, ScrollTopButton, ScrollTopView,
        SCROLL_TOP_THROTTLE_MS,
    },
    styles::{
        INJECTED_STYLES, NOTIFICATION_CLOSE_STYLE, NOTIFICATION_CONTENT_STYLE, NOTIFICATION_STYLE,
        SCROLL_TOP_STYLE,
    },
    timing::{Scheduler, TimerHandle},
};
use gloo_timers::callback::{Interval, Timeout};
use log::{debug, error, info, warn, Level};
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    ops::ControlFlow,
    rc::Rc,
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, ErrorEvent, Event, EventTarget,
    HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    MouseEvent, NodeList, ScrollBehavior, ScrollToOptions, Window,
};

const HEADER_SOLID_BACKGROUND: &str = "rgba(255, 255, 255, 0.95)";
const HEADER_BLUR: &str = "blur(10px)";
const CLOSE_HOVER_BACKGROUND: &str = "rgba(255, 255, 255, 0.2)";

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

/// `Scheduler` backed by browser timers. Dropping a gloo timer clears it, so
/// cancelling is just removing the entry.
#[derive(Clone, Default)]
pub struct BrowserScheduler {
    timers: Rc<BrowserTimers>,
}

#[derive(Default)]
struct BrowserTimers {
    last_id: Cell<u64>,
    timeouts: RefCell<HashMap<u64, Timeout>>,
    intervals: RefCell<HashMap<u64, Interval>>,
}

impl BrowserTimers {
    fn next_handle(&self) -> TimerHandle {
        let id = self.last_id.get() + 1;
        self.last_id.set(id);
        TimerHandle::new(id)
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
        let handle = self.timers.next_handle();
        let timers = Rc::clone(&self.timers);
        let timeout = Timeout::new(delay_ms, move || {
            // Release the map borrow before running, the task may schedule more.
            let fired = timers.timeouts.borrow_mut().remove(&handle.id());
            task();
            drop(fired);
        });
        self.timers
            .timeouts
            .borrow_mut()
            .insert(handle.id(), timeout);
        handle
    }

    fn set_interval(
        &self,
        period_ms: u32,
        mut task: Box<dyn FnMut() -> ControlFlow<()>>,
    ) -> TimerHandle {
        let handle = self.timers.next_handle();
        let timers = Rc::clone(&self.timers);
        let interval = Interval::new(period_ms, move || {
            if task().is_break() {
                let finished = timers.intervals.borrow_mut().remove(&handle.id());
                drop(finished);
            }
        });
        self.timers
            .intervals
            .borrow_mut()
            .insert(handle.id(), interval);
        handle
    }

    fn cancel(&self, handle: TimerHandle) {
        let timeout = self.timers.timeouts.borrow_mut().remove(&handle.id());
        let interval = self.timers.intervals.borrow_mut().remove(&handle.id());
        drop((timeout, interval));
    }
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<()> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
        .ok_or_else(|| SiteError::missing(format!("#{id}")))
}

fn query<T: JsCast>(document: &Document, selector: &str) -> Result<Option<T>> {
    Ok(document
        .query_selector(selector)?
        .and_then(|element| element.dyn_into::<T>().ok()))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|element| {
            SiteError::Dom(format!("unexpected element type for <{}>", element.tag_name()))
        })
}

fn body(document: &Document) -> Result<HtmlElement> {
    document.body().ok_or_else(|| SiteError::missing("body"))
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let _ = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

fn scroll_offset(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn apply_motion_preference(window: &Window, document: &Document) {
    if !prefers_reduced_motion(window) {
        return;
    }

    if let Some(root) = document
        .document_element()
        .and_then(|root| root.dyn_into::<HtmlElement>().ok())
    {
        set_style(&root, "--animation-duration", "0s");
        debug!("reduced motion requested");
    }
}

fn inject_styles(document: &Document) -> Result<()> {
    let style: Element = document.create_element("style")?;
    style.set_text_content(Some(INJECTED_STYLES));
    document
        .head()
        .ok_or_else(|| SiteError::missing("head"))?
        .append_child(&style)?;
    Ok(())
}

fn install_error_logger(window: &Window) -> Result<()> {
    listen(window, "error", |event| {
        if let Some(error_event) = event.dyn_ref::<ErrorEvent>() {
            error!(
                "JavaScript error: {} ({}:{})",
                error_event.message(),
                error_event.filename(),
                error_event.lineno()
            );
        }
    })
}

/// Observation of a set of elements; disconnects when dropped.
pub(crate) struct ViewportWatch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl ViewportWatch {
    fn keep_for_page(self) {
        std::mem::forget(self);
    }
}

impl Drop for ViewportWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub(crate) fn watch_viewport(
    targets: &[Element],
    threshold: f64,
    root_margin: &str,
    mut on_visible: impl FnMut(&Element, &IntersectionObserver) + 'static,
) -> Result<ViewportWatch> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    on_visible(&entry.target(), &observer);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    options.set_root_margin(root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for target in targets {
        observer.observe(target);
    }

    Ok(ViewportWatch {
        observer,
        _callback: callback,
    })
}

fn on_page_load(window: &Window, document: &Document, task: impl FnOnce() + 'static) -> Result<()> {
    if document.ready_state() == "complete" {
        task();
        return Ok(());
    }

    let mut task = Some(task);
    listen(window, "load", move |_| {
        if let Some(task) = task.take() {
            task();
        }
    })
}

struct DomLoading {
    overlay: HtmlElement,
    document: Document,
}

impl LoadingView for DomLoading {
    fn fade_out(&self) {
        set_style(&self.overlay, "opacity", "0");
    }

    fn hide(&self) {
        set_style(&self.overlay, "display", "none");
    }

    fn start_entrance(&self) {
        for (selector, animation) in [(HERO_CONTENT_SELECTOR, HERO_ENTRANCE), (NAV_SELECTOR, NAV_ENTRANCE)] {
            if let Ok(Some(element)) = query::<HtmlElement>(&self.document, selector) {
                set_style(&element, "animation", animation);
            }
        }
    }
}

fn init_loading_screen(window: &Window, document: &Document, scheduler: &Rc<dyn Scheduler>) -> Result<()> {
    let view = Rc::new(DomLoading {
        overlay: by_id(document, LOADING_SCREEN_ID)?,
        document: document.clone(),
    });
    let scheduler = Rc::clone(scheduler);
    on_page_load(window, document, move || {
        dismiss_loading_screen(view, &scheduler);
    })
}

struct DomNavigation {
    toggle: Element,
    links: Element,
    header: HtmlElement,
    body: HtmlElement,
}

impl NavigationView for DomNavigation {
    fn set_menu_open(&self, open: bool) {
        set_class(&self.toggle, ACTIVE_CLASS, open);
        set_class(&self.links, ACTIVE_CLASS, open);
        set_class(&self.body, MENU_OPEN_CLASS, open);
    }

    fn set_header_backdrop(&self, solid: bool) {
        let (background, filter) = if solid {
            (HEADER_SOLID_BACKGROUND, HEADER_BLUR)
        } else {
            ("transparent", "none")
        };
        set_style(&self.header, "background", background);
        set_style(&self.header, "backdrop-filter", filter);
    }

    fn set_header_hidden(&self, hidden: bool) {
        let transform = if hidden { "translateY(-100%)" } else { "translateY(0)" };
        set_style(&self.header, "transform", transform);
    }
}

fn init_navigation(
    window: &Window,
    document: &Document,
    scheduler: &Rc<dyn Scheduler>,
) -> Result<Rc<Navigation<DomNavigation>>> {
    let toggle: Element = by_id(document, MENU_TOGGLE_ID)?;
    let links: Element = by_id(document, NAV_LINKS_ID)?;
    let header = query::<HtmlElement>(document, HEADER_SELECTOR)?
        .ok_or_else(|| SiteError::missing(HEADER_SELECTOR))?;

    let navigation = Rc::new(Navigation::new(DomNavigation {
        toggle: toggle.clone(),
        links: links.clone(),
        header,
        body: body(document)?,
    }));

    {
        let navigation = Rc::clone(&navigation);
        listen(&toggle, "click", move |_| navigation.toggle_menu())?;
    }
    for link in elements(links.query_selector_all("a")?) {
        let navigation = Rc::clone(&navigation);
        listen(&link, "click", move |_| navigation.close_menu())?;
    }

    let on_scroll = {
        let navigation = Rc::clone(&navigation);
        Throttle::new(scheduler, SCROLL_THROTTLE_MS, move |offset: f64| {
            navigation.on_scroll(offset)
        })
    };
    let scrolled = window.clone();
    listen(window, "scroll", move |_| {
        on_scroll.call(scroll_offset(&scrolled));
    })?;

    let on_resize = {
        let navigation = Rc::clone(&navigation);
        Debounce::new(scheduler, RESIZE_DEBOUNCE_MS, move |width: f64| {
            navigation.on_resize(width)
        })
    };
    let resized = window.clone();
    listen(window, "resize", move |_| on_resize.call(viewport_width(&resized)))?;

    Ok(navigation)
}

impl RevealTarget for Element {
    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn sibling_index(&self) -> Option<usize> {
        let siblings = self.parent_element()?.children();
        (0..siblings.length()).position(|index| siblings.item(index).as_ref() == Some(self))
    }

    fn set_animation(&self, animation: &Animation) {
        if let Some(element) = self.dyn_ref::<HtmlElement>() {
            set_style(element, "animation", &animation.to_string());
        }
    }

    fn set_animation_delay(&self, delay_ms: u32) {
        if let Some(element) = self.dyn_ref::<HtmlElement>() {
            set_style(element, "animation-delay", &seconds(delay_ms));
        }
    }

    fn descendant(&self, selector: &str) -> Option<Self> {
        self.query_selector(selector).ok().flatten()
    }
}

fn init_scroll_reveal(document: &Document) -> Result<()> {
    let targets = elements(document.query_selector_all(REVEAL_SELECTOR)?);
    debug!("observing {} reveal targets", targets.len());
    watch_viewport(&targets, REVEAL_THRESHOLD, REVEAL_ROOT_MARGIN, |target, _| {
        reveal(target);
    })?
    .keep_for_page();
    Ok(())
}

struct DomField {
    kind: FieldKind,
    control: HtmlElement,
    error: HtmlElement,
}

impl DomField {
    fn value(&self) -> String {
        if let Some(input) = self.control.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.control.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            self.control.text_content().unwrap_or_default()
        }
    }
}

struct DomForm {
    form: HtmlFormElement,
    fields: Vec<DomField>,
    submit: HtmlButtonElement,
    idle_label: String,
}

impl DomForm {
    fn field(&self, kind: FieldKind) -> Option<&DomField> {
        self.fields.iter().find(|field| field.kind == kind)
    }
}

impl FormView for DomForm {
    fn field_value(&self, kind: FieldKind) -> String {
        self.field(kind).map(DomField::value).unwrap_or_default()
    }

    fn show_field_state(&self, kind: FieldKind, state: FieldState) {
        let Some(field) = self.field(kind) else {
            return;
        };
        set_style(&field.control, "border-color", state.border_color());
        let display = if state.shows_error() { "block" } else { "none" };
        set_style(&field.error, "display", display);
    }

    fn show_submit_phase(&self, phase: SubmitPhase) {
        self.submit.set_disabled(phase.is_disabled());
        match phase {
            SubmitPhase::Idle => {
                self.submit.set_inner_html(&self.idle_label);
                set_style(&self.submit, "background", "var(--gradient-primary)");
            }
            SubmitPhase::Sending => {
                self.submit.set_inner_html(&format!(
                    "<i class=\"fas fa-spinner fa-spin\"></i> {SENDING_LABEL}"
                ));
            }
            SubmitPhase::Sent => {
                self.submit
                    .set_inner_html(&format!("<i class=\"fas fa-check\"></i> {SENT_LABEL}"));
                set_style(&self.submit, "background", "var(--accent-green)");
            }
        }
    }

    fn reset(&self) {
        self.form.reset();
    }
}

fn init_contact_form(
    document: &Document,
    scheduler: &Rc<dyn Scheduler>,
    notifier: Rc<dyn Notify>,
) -> Result<()> {
    let form: HtmlFormElement = by_id(document, CONTACT_FORM_ID)?;
    let fields = FieldKind::ALL
        .into_iter()
        .map(|kind| -> Result<DomField> {
            Ok(DomField {
                kind,
                control: by_id(document, kind.input_id())?,
                error: by_id(document, kind.error_id())?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let submit = form
        .query_selector(SUBMIT_SELECTOR)?
        .and_then(|element| element.dyn_into::<HtmlButtonElement>().ok())
        .ok_or_else(|| SiteError::missing(SUBMIT_SELECTOR))?;

    let controls: Vec<(FieldKind, HtmlElement)> = fields
        .iter()
        .map(|field| (field.kind, field.control.clone()))
        .collect();
    let contact = Rc::new(ContactForm::new(
        DomForm {
            form: form.clone(),
            fields,
            idle_label: submit.inner_html(),
            submit,
        },
        scheduler,
        notifier,
    ));

    for (kind, control) in controls {
        let contact = Rc::clone(&contact);
        listen(&control, "input", move |_| {
            contact.validate_field(kind);
        })?;
    }

    listen(&form, "submit", move |event| {
        event.prevent_default();
        contact.submit();
    })
}

#[derive(Clone)]
struct DomPanel {
    root: HtmlElement,
    _listeners: Rc<Vec<Closure<dyn FnMut(Event)>>>,
}

struct DomNotifications {
    document: Document,
}

impl DomNotifications {
    fn on(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<Closure<dyn FnMut(Event)>> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(callback)
    }
}

impl NotificationSurface for DomNotifications {
    type Panel = DomPanel;

    fn mount(
        &self,
        notification: &Notification,
        top_px: f64,
        on_close: Box<dyn Fn()>,
    ) -> Result<DomPanel> {
        let kind = notification.kind;
        let root: HtmlElement = create(&self.document, "div")?;
        root.set_class_name(kind.css_class());
        root.set_attribute("role", "status")?;
        root.style().set_css_text(&format!(
            "{NOTIFICATION_STYLE} top: {top_px}px; background: {};",
            kind.background()
        ));

        let content: HtmlElement = create(&self.document, "div")?;
        content.set_class_name("notification-content");
        content.style().set_css_text(NOTIFICATION_CONTENT_STYLE);

        let icon: Element = self.document.create_element("i")?;
        icon.set_class_name(kind.icon());

        let message: Element = self.document.create_element("span")?;
        message.set_class_name("notification-message");
        message.set_text_content(Some(&notification.message));

        let close: HtmlButtonElement = create(&self.document, "button")?;
        close.set_class_name("notification-close");
        close.set_attribute("aria-label", "Close notification")?;
        close.style().set_css_text(NOTIFICATION_CLOSE_STYLE);
        let close_icon: Element = self.document.create_element("i")?;
        close_icon.set_class_name("fas fa-times");
        close.append_child(&close_icon)?;

        content.append_child(&icon)?;
        content.append_child(&message)?;
        content.append_child(&close)?;
        root.append_child(&content)?;

        let hovered = close.clone();
        let unhovered = close.clone();
        let listeners = vec![
            Self::on(&close, "click", move |_| on_close())?,
            Self::on(&close, "mouseenter", move |_| {
                set_style(&hovered, "background", CLOSE_HOVER_BACKGROUND)
            })?,
            Self::on(&close, "mouseleave", move |_| {
                set_style(&unhovered, "background", "none")
            })?,
        ];

        body(&self.document)?.append_child(&root)?;
        Ok(DomPanel {
            root,
            _listeners: Rc::new(listeners),
        })
    }

    fn slide_in(&self, panel: &DomPanel) {
        set_style(&panel.root, "transform", "translateX(0)");
    }

    fn slide_out(&self, panel: &DomPanel) {
        set_style(&panel.root, "transform", "translateX(400px)");
    }

    fn move_to(&self, panel: &DomPanel, top_px: f64) {
        set_style(&panel.root, "top", &format!("{top_px}px"));
    }

    fn remove(&self, panel: &DomPanel) {
        panel.root.remove();
    }
}

struct DomScrollTop {
    button: HtmlElement,
}

impl ScrollTopView for DomScrollTop {
    fn set_visible(&self, visible: bool) {
        let (opacity, visibility) = if visible { ("1", "visible") } else { ("0", "hidden") };
        set_style(&self.button, "opacity", opacity);
        set_style(&self.button, "visibility", visibility);
    }
}

fn init_scroll_to_top(window: &Window, document: &Document, scheduler: &Rc<dyn Scheduler>) -> Result<()> {
    let button: HtmlButtonElement = create(document, "button")?;
    button.set_class_name("scroll-to-top");
    button.set_inner_html("<i class=\"fas fa-arrow-up\"></i>");
    button.set_attribute("aria-label", "Scroll to top")?;
    button.style().set_css_text(SCROLL_TOP_STYLE);
    body(document)?.append_child(&button)?;

    let control = Rc::new(ScrollTopButton::new(DomScrollTop {
        button: HtmlElement::from(button.clone()),
    }));
    let on_scroll = Throttle::new(scheduler, SCROLL_TOP_THROTTLE_MS, move |offset: f64| {
        control.on_scroll(offset)
    });
    let scrolled = window.clone();
    listen(window, "scroll", move |_| {
        on_scroll.call(scroll_offset(&scrolled));
    })?;

    let clicked = window.clone();
    listen(&button, "click", move |_| smooth_scroll_to(&clicked, 0.0))?;

    let hovered = button.clone();
    listen(&button, "mouseenter", move |_| {
        set_style(&hovered, "transform", "scale(1.1)");
        set_style(&hovered, "background", "var(--gold)");
    })?;
    let unhovered = button.clone();
    listen(&button, "mouseleave", move |_| {
        set_style(&unhovered, "transform", "scale(1)");
        set_style(&unhovered, "background", "var(--gradient-primary)");
    })
}

fn init_smooth_scrolling(window: &Window, document: &Document) -> Result<()> {
    let header = query::<HtmlElement>(document, HEADER_SELECTOR)?;

    for anchor in elements(document.query_selector_all(ANCHOR_SELECTOR)?) {
        let link = anchor.clone();
        let window = window.clone();
        let document = document.clone();
        let header = header.clone();
        listen(&anchor, "click", move |event| {
            event.prevent_default();
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(selector) = same_page_fragment(&href) else {
                return;
            };
            let Some(target) = document
                .query_selector(selector)
                .ok()
                .flatten()
                .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            else {
                debug!("no scroll target for {href}");
                return;
            };
            let header_height = header
                .as_ref()
                .map(|header| f64::from(header.offset_height()))
                .unwrap_or(0.0);
            smooth_scroll_to(
                &window,
                anchor_scroll_top(f64::from(target.offset_top()), header_height),
            );
        })?;
    }

    Ok(())
}

fn init_parallax(window: &Window, document: &Document, scheduler: &Rc<dyn Scheduler>) -> Result<()> {
    let Some(hero) = query::<HtmlElement>(document, HERO_SELECTOR)? else {
        return Ok(());
    };

    let parallax = Throttle::new(scheduler, PARALLAX_THROTTLE_MS, move |scroll: f64| {
        if let Some(offset) = parallax_offset(scroll, f64::from(hero.offset_height())) {
            set_style(&hero, "transform", &format!("translateY({offset}px)"));
        }
    });
    let scrolled = window.clone();
    listen(window, "scroll", move |_| {
        parallax.call(scroll_offset(&scrolled));
    })
}

struct DomTypewriter {
    element: HtmlElement,
}

impl TypewriterView for DomTypewriter {
    fn text(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn set_caret(&self, visible: bool) {
        let border = if visible { TYPEWRITER_CARET } else { "none" };
        set_style(&self.element, "border-right", border);
    }
}

fn init_typewriter(document: &Document, scheduler: &Rc<dyn Scheduler>) -> Result<()> {
    if let Some(element) = query::<HtmlElement>(document, SUBTITLE_SELECTOR)? {
        start_typewriter(Rc::new(DomTypewriter { element }), scheduler);
    }
    Ok(())
}

fn init_counters(document: &Document, scheduler: &Rc<dyn Scheduler>) -> Result<()> {
    let Some(about) = query::<Element>(document, ABOUT_SELECTOR)? else {
        return Ok(());
    };
    let counters = parse_counters(about.get_attribute(COUNTERS_ATTRIBUTE).as_deref())?;
    let container = about
        .query_selector(ABOUT_CONTAINER_SELECTOR)?
        .ok_or_else(|| SiteError::missing(format!("{ABOUT_SELECTOR} {ABOUT_CONTAINER_SELECTOR}")))?;

    let root = document.create_element("div")?;
    container.append_child(&root)?;
    yew::Renderer::<CounterBoard>::with_root_and_props(
        root,
        CounterBoardProps {
            counters,
            scheduler: SchedulerRef(Rc::clone(scheduler)),
        },
    )
    .render();
    Ok(())
}

fn init_tilt(document: &Document) -> Result<()> {
    for element in elements(document.query_selector_all(TILT_SELECTOR)?) {
        let Ok(card) = element.dyn_into::<HtmlElement>() else {
            continue;
        };

        let tilted = card.clone();
        listen(&card, "mousemove", move |event| {
            let Some(pointer) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let bounds = tilted.get_bounding_client_rect();
            let rect = TiltRect {
                left: bounds.left(),
                top: bounds.top(),
                width: bounds.width(),
                height: bounds.height(),
            };
            let transform =
                tilt_transform(rect, f64::from(pointer.client_x()), f64::from(pointer.client_y()));
            set_style(&tilted, "transform", &transform);
        })?;

        let released = card.clone();
        listen(&card, "mouseleave", move |_| set_style(&released, "transform", TILT_RESET))?;
    }

    Ok(())
}

fn init_keyboard(document: &Document, navigation: Option<Rc<Navigation<DomNavigation>>>) -> Result<()> {
    listen(document, "keydown", move |event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let target = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlElement>().ok());
        let tag_name = target.as_ref().map(|target| target.tag_name()).unwrap_or_default();
        let is_cta = target
            .as_ref()
            .is_some_and(|target| target.class_list().contains(CTA_CLASS));

        match key_action(&key_event.key(), KeyTarget { tag_name: &tag_name, is_cta }) {
            Some(KeyAction::CloseMenu) => {
                if let Some(navigation) = &navigation {
                    navigation.on_escape();
                }
            }
            Some(KeyAction::Activate) => {
                if let Some(target) = &target {
                    target.click();
                }
            }
            None => {}
        }
    })
}

fn outlined_target(event: &Event) -> Option<HtmlElement> {
    event
        .target()?
        .dyn_into::<HtmlElement>()
        .ok()
        .filter(|element| takes_focus_outline(&element.tag_name()))
}

fn init_focus_outlines(document: &Document) -> Result<()> {
    listen(document, "focusin", |event| {
        if let Some(element) = outlined_target(&event) {
            set_style(&element, "outline", FOCUS_OUTLINE);
            set_style(&element, "outline-offset", FOCUS_OUTLINE_OFFSET);
        }
    })?;
    listen(document, "focusout", |event| {
        if let Some(element) = outlined_target(&event) {
            set_style(&element, "outline", "none");
        }
    })
}

fn report<T>(feature: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn!("{feature} disabled: {error}");
            None
        }
    }
}

fn start(window: &Window, document: &Document) {
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::default());
    let notifier: Rc<dyn Notify> = Rc::new(Notifier::new(
        DomNotifications {
            document: document.clone(),
        },
        &scheduler,
    ));

    report("loading screen", init_loading_screen(window, document, &scheduler));
    let navigation = report("navigation", init_navigation(window, document, &scheduler));
    report("scroll reveal", init_scroll_reveal(document));
    report("contact form", init_contact_form(document, &scheduler, notifier));
    report("scroll to top", init_scroll_to_top(window, document, &scheduler));
    report("smooth scrolling", init_smooth_scrolling(window, document));
    report("parallax", init_parallax(window, document, &scheduler));
    report("typewriter", init_typewriter(document, &scheduler));
    report("counters", init_counters(document, &scheduler));
    report("tilt", init_tilt(document));
    report("keyboard shortcuts", init_keyboard(document, navigation));
    report("focus outlines", init_focus_outlines(document));

    info!("site interactions ready");
}

pub fn run() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    };
    let _ = console_log::init_with_level(level);

    let window = window().expect("missing window");
    let document = window.document().expect("missing document");

    report("injected styles", inject_styles(&document));
    apply_motion_preference(&window, &document);
    report("error logging", install_error_logger(&window));

    if document.ready_state() == "loading" {
        let (ready_window, ready_document) = (window.clone(), document.clone());
        let mut pending = Some(move || start(&ready_window, &ready_document));
        report(
            "startup",
            listen(&document, "DOMContentLoaded", move |_| {
                if let Some(start) = pending.take() {
                    start();
                }
            }),
        );
    } else {
        start(&window, &document);
    }
}
