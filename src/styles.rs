/// Keyframes and state rules the controllers rely on, injected once into
/// `<head>` so the page only has to provide its colour tokens.
pub const INJECTED_STYLES: &str = r#"
@keyframes slideInUp {
    from { opacity: 0; transform: translateY(40px); }
    to { opacity: 1; transform: translateY(0); }
}

@keyframes slideInDown {
    from { opacity: 0; transform: translateY(-40px); }
    to { opacity: 1; transform: translateY(0); }
}

@keyframes fadeInUp {
    from { opacity: 0; transform: translateY(30px); }
    to { opacity: 1; transform: translateY(0); }
}

@keyframes fadeInScale {
    from { opacity: 0; transform: scale(0.8); }
    to { opacity: 1; transform: scale(1); }
}

@keyframes slideInLeft {
    from { opacity: 0; transform: translateX(-50px); }
    to { opacity: 1; transform: translateX(0); }
}

@keyframes slideInRight {
    from { opacity: 0; transform: translateX(50px); }
    to { opacity: 1; transform: translateX(0); }
}

body.menu-open {
    overflow: hidden;
}

@media (max-width: 768px) {
    .counters-container {
        grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)) !important;
        gap: 1rem !important;
        padding: 2rem !important;
    }

    .scroll-to-top {
        bottom: 20px !important;
        right: 20px !important;
        width: 50px !important;
        height: 50px !important;
    }
}
"#;

pub const NOTIFICATION_STYLE: &str = "position: fixed; right: 30px; color: white; \
padding: 20px 25px; border-radius: 12px; box-shadow: var(--shadow-xl); z-index: 10000; \
transform: translateX(400px); transition: all 0.4s ease; max-width: 350px; \
border-left: 4px solid rgba(255, 255, 255, 0.3);";

pub const NOTIFICATION_CONTENT_STYLE: &str = "display: flex; align-items: center; gap: 12px;";

pub const NOTIFICATION_CLOSE_STYLE: &str = "background: none; border: none; color: white; \
cursor: pointer; margin-left: auto; padding: 4px; border-radius: 4px; \
transition: background 0.3s ease;";

pub const SCROLL_TOP_STYLE: &str = "position: fixed; bottom: 30px; right: 30px; width: 55px; \
height: 55px; background: var(--gradient-primary); color: white; border: none; \
border-radius: 50%; font-size: 18px; cursor: pointer; opacity: 0; visibility: hidden; \
transition: all 0.4s ease; z-index: 1000; box-shadow: var(--shadow-lg);";

pub const COUNTERS_CONTAINER_STYLE: &str = "display: grid; \
grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 2rem; margin-top: 4rem; \
padding: 3rem; background: var(--light-blue); border-radius: 20px;";

pub const COUNTER_CARD_STYLE: &str = "text-align: center; padding: 1.5rem; \
background: var(--white); border-radius: 15px; box-shadow: var(--shadow); \
transition: transform 0.3s ease;";

pub const COUNTER_ICON_STYLE: &str =
    "font-size: 2.5rem; color: var(--primary-blue); margin-bottom: 1rem;";

pub const COUNTER_NUMBER_STYLE: &str =
    "font-size: 2.5rem; font-weight: 700; color: var(--gold); margin-bottom: 0.5rem;";

pub const COUNTER_LABEL_STYLE: &str = "color: var(--medium-grey); font-weight: 500;";
