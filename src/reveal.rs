//! Scroll-triggered entrance animations.
//!
//! Elements tagged `.animate-on-scroll` receive the `animated` class the
//! first time they intersect the viewport. Card groups are staggered by
//! their position among siblings, and a few sections get a named keyframe
//! animation on top of the class.

use std::fmt;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const ANIMATED_CLASS: &str = "animated";
const STAGGER_STEP_MS: u32 = 100;
const STAGGERED_CLASSES: [&str; 3] = ["service-pillar", "client-card", "category-card"];

/// The element side of a reveal, implemented for DOM elements in the
/// browser and for fakes in tests.
pub trait RevealTarget: Sized {
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn sibling_index(&self) -> Option<usize>;
    fn set_animation(&self, animation: &Animation);
    fn set_animation_delay(&self, delay_ms: u32);
    fn descendant(&self, selector: &str) -> Option<Self>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animation {
    pub keyframes: &'static str,
    pub duration_ms: u32,
    pub delay_ms: u32,
}

impl Animation {
    const fn new(keyframes: &'static str, duration_ms: u32) -> Self {
        Self {
            keyframes,
            duration_ms,
            delay_ms: 0,
        }
    }

    const fn delayed(self, delay_ms: u32) -> Self {
        Self { delay_ms, ..self }
    }
}

impl fmt::Display for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ease {} forwards",
            self.keyframes,
            seconds(self.duration_ms),
            seconds(self.delay_ms)
        )
    }
}

pub fn seconds(ms: u32) -> String {
    format!("{}s", f64::from(ms) / 1000.0)
}

pub fn stagger_delay_ms(sibling_index: usize) -> u32 {
    u32::try_from(sibling_index)
        .unwrap_or(u32::MAX / STAGGER_STEP_MS)
        .saturating_mul(STAGGER_STEP_MS)
}

fn entrance_for<T: RevealTarget>(target: &T) -> Option<Animation> {
    if target.has_class("service-pillar") {
        Some(Animation::new("slideInUp", 800))
    } else if target.has_class("client-card") {
        Some(Animation::new("fadeInScale", 600))
    } else if target.has_class("contact-info") {
        Some(Animation::new("slideInLeft", 800))
    } else if target.has_class("contact-form") {
        Some(Animation::new("slideInRight", 800).delayed(200))
    } else {
        None
    }
}

const HERITAGE_PARTS: [(&str, Animation); 2] = [
    (".heritage-text", Animation::new("slideInLeft", 800)),
    (
        ".heritage-visual",
        Animation::new("slideInRight", 800).delayed(300),
    ),
];

/// Applies the entrance to `target`. Returns `false` when it had already
/// been revealed.
pub fn reveal<T: RevealTarget>(target: &T) -> bool {
    if target.has_class(ANIMATED_CLASS) {
        return false;
    }
    target.add_class(ANIMATED_CLASS);

    let stagger = STAGGERED_CLASSES
        .iter()
        .any(|class| target.has_class(class))
        .then(|| target.sibling_index().map(stagger_delay_ms))
        .flatten();

    match (entrance_for(target), stagger) {
        (Some(animation), stagger) => {
            let delay_ms = animation.delay_ms + stagger.unwrap_or(0);
            target.set_animation(&animation.delayed(delay_ms));
        }
        (None, Some(delay_ms)) => target.set_animation_delay(delay_ms),
        (None, None) => {}
    }

    if target.has_class("heritage-content") {
        for (selector, animation) in HERITAGE_PARTS {
            if let Some(part) = target.descendant(selector) {
                part.set_animation(&animation);
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::{cell::RefCell, rc::Rc};

    #[derive(Clone, Default)]
    struct FakeElement {
        classes: Rc<RefCell<Vec<String>>>,
        index: Option<usize>,
        animation: Rc<RefCell<Option<String>>>,
        delay: Rc<RefCell<Option<u32>>>,
        children: Vec<(&'static str, FakeElement)>,
    }

    impl FakeElement {
        fn with_classes(classes: &[&str], index: Option<usize>) -> Self {
            Self {
                classes: Rc::new(RefCell::new(
                    classes.iter().map(|class| class.to_string()).collect(),
                )),
                index,
                ..Self::default()
            }
        }

        fn animation(&self) -> Option<String> {
            self.animation.borrow().clone()
        }
    }

    impl RevealTarget for FakeElement {
        fn has_class(&self, class: &str) -> bool {
            self.classes.borrow().iter().any(|existing| existing == class)
        }

        fn add_class(&self, class: &str) {
            self.classes.borrow_mut().push(class.to_string());
        }

        fn sibling_index(&self) -> Option<usize> {
            self.index
        }

        fn set_animation(&self, animation: &Animation) {
            *self.animation.borrow_mut() = Some(animation.to_string());
        }

        fn set_animation_delay(&self, delay_ms: u32) {
            *self.delay.borrow_mut() = Some(delay_ms);
        }

        fn descendant(&self, selector: &str) -> Option<Self> {
            self.children
                .iter()
                .find(|(child_selector, _)| *child_selector == selector)
                .map(|(_, child)| child.clone())
        }
    }

    #[test]
    fn first_intersection_marks_element_animated() {
        let element = FakeElement::with_classes(&["animate-on-scroll"], Some(0));

        assert!(reveal(&element));
        assert!(element.has_class(ANIMATED_CLASS));
        assert_eq!(element.animation(), None);
    }

    #[test]
    fn later_intersections_are_no_ops() {
        let element = FakeElement::with_classes(&["animate-on-scroll", "category-card"], Some(2));

        assert!(reveal(&element));
        *element.delay.borrow_mut() = None;

        assert!(!reveal(&element));
        assert_eq!(*element.delay.borrow(), None);
        assert_eq!(
            element
                .classes
                .borrow()
                .iter()
                .filter(|class| *class == ANIMATED_CLASS)
                .count(),
            1
        );
    }

    #[test]
    fn category_cards_get_staggered_delay() {
        let element = FakeElement::with_classes(&["category-card"], Some(3));

        reveal(&element);

        assert_eq!(*element.delay.borrow(), Some(300));
    }

    #[test]
    fn staggered_cards_fold_delay_into_named_animation() {
        let first = FakeElement::with_classes(&["service-pillar"], Some(0));
        let third = FakeElement::with_classes(&["client-card"], Some(2));

        reveal(&first);
        reveal(&third);

        assert_eq!(first.animation().as_deref(), Some("slideInUp 0.8s ease 0s forwards"));
        assert_eq!(third.animation().as_deref(), Some("fadeInScale 0.6s ease 0.2s forwards"));
    }

    #[test]
    fn contact_form_slides_in_with_its_own_delay() {
        let element = FakeElement::with_classes(&["contact-form"], Some(1));

        reveal(&element);

        assert_eq!(element.animation().as_deref(), Some("slideInRight 0.8s ease 0.2s forwards"));
        assert_eq!(*element.delay.borrow(), None);
    }

    #[test]
    fn heritage_content_animates_its_parts() {
        let text = FakeElement::default();
        let visual = FakeElement::default();
        let mut section = FakeElement::with_classes(&["heritage-content"], Some(0));
        section.children = vec![(".heritage-text", text.clone()), (".heritage-visual", visual.clone())];

        reveal(&section);

        assert_eq!(text.animation().as_deref(), Some("slideInLeft 0.8s ease 0s forwards"));
        assert_eq!(visual.animation().as_deref(), Some("slideInRight 0.8s ease 0.3s forwards"));
    }

    #[test]
    fn stagger_delay_grows_by_hundred_milliseconds() {
        assert_eq!(stagger_delay_ms(0), 0);
        assert_eq!(stagger_delay_ms(4), 400);
        assert_eq!(seconds(1_200), "1.2s");
    }
}
