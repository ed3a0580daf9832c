//! Element contract with the page markup.

pub const LOADING_SCREEN_ID: &str = "loadingScreen";
pub const MENU_TOGGLE_ID: &str = "hamburger";
pub const NAV_LINKS_ID: &str = "navLinks";
pub const CONTACT_FORM_ID: &str = "contactForm";

pub const HEADER_SELECTOR: &str = "header";
pub const NAV_SELECTOR: &str = "nav";
pub const HERO_SELECTOR: &str = ".hero";
pub const HERO_CONTENT_SELECTOR: &str = ".hero-content";
pub const SUBTITLE_SELECTOR: &str = ".hero-subtitle";
pub const ABOUT_SELECTOR: &str = ".about";
pub const ABOUT_CONTAINER_SELECTOR: &str = ".container";
pub const SUBMIT_SELECTOR: &str = ".submit-btn";
pub const REVEAL_SELECTOR: &str = ".animate-on-scroll";
pub const TILT_SELECTOR: &str = ".service-pillar, .client-card, .feature-card";
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// JSON array of counters on the about section, see `counters::CounterSpec`.
pub const COUNTERS_ATTRIBUTE: &str = "data-counters";

pub const ACTIVE_CLASS: &str = "active";
pub const MENU_OPEN_CLASS: &str = "menu-open";

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
