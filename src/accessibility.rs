pub const FOCUS_OUTLINE: &str = "3px solid var(--gold)";
pub const FOCUS_OUTLINE_OFFSET: &str = "2px";
pub const CTA_CLASS: &str = "cta-button";

const OUTLINED_TAGS: [&str; 5] = ["a", "button", "input", "textarea", "select"];
const NATIVELY_ACTIVATED_TAGS: [&str; 2] = ["a", "button"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    CloseMenu,
    Activate,
}

/// What the keyboard target looks like, as far as key handling cares.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyTarget<'a> {
    pub tag_name: &'a str,
    pub is_cta: bool,
}

pub fn key_action(key: &str, target: KeyTarget<'_>) -> Option<KeyAction> {
    match key {
        "Escape" => Some(KeyAction::CloseMenu),
        // Links and buttons already turn Enter into a click.
        "Enter" if target.is_cta && !is_one_of(target.tag_name, &NATIVELY_ACTIVATED_TAGS) => {
            Some(KeyAction::Activate)
        }
        _ => None,
    }
}

pub fn takes_focus_outline(tag_name: &str) -> bool {
    is_one_of(tag_name, &OUTLINED_TAGS)
}

fn is_one_of(tag_name: &str, tags: &[&str]) -> bool {
    tags.iter().any(|tag| tag.eq_ignore_ascii_case(tag_name))
}
