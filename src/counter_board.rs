use crate::{
    counters::{animate_counter, CounterAnimation, CounterSpec, COUNTER_VISIBILITY_THRESHOLD},
    frontend::watch_viewport,
    reveal::ANIMATED_CLASS,
    styles::{
        COUNTERS_CONTAINER_STYLE, COUNTER_CARD_STYLE, COUNTER_ICON_STYLE, COUNTER_LABEL_STYLE,
        COUNTER_NUMBER_STYLE,
    },
    timing::Scheduler,
};
use log::{debug, warn};
use std::rc::Rc;
use web_sys::{Element, MouseEvent};
use yew::prelude::*;

const COUNTER_HOVER_LIFT: &str = "translateY(-5px)";
const COUNTER_REST: &str = "translateY(0)";

/// Shared scheduler handle; props compare by identity.
#[derive(Clone)]
pub struct SchedulerRef(pub Rc<dyn Scheduler>);

impl PartialEq for SchedulerRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq)]
pub struct CounterBoardProps {
    pub counters: Vec<CounterSpec>,
    pub scheduler: SchedulerRef,
}

#[derive(Clone, PartialEq)]
struct CounterDisplays(Vec<String>);

impl Reducible for CounterDisplays {
    type Action = (usize, String);

    fn reduce(self: Rc<Self>, (index, text): Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if let Some(slot) = next.0.get_mut(index) {
            *slot = text;
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
struct CounterCardProps {
    spec: CounterSpec,
    value: AttrValue,
}

#[function_component(CounterCard)]
fn counter_card(props: &CounterCardProps) -> Html {
    let lifted = use_state(|| false);

    let onmouseenter = {
        let lifted = lifted.clone();
        Callback::from(move |_: MouseEvent| lifted.set(true))
    };
    let onmouseleave = {
        let lifted = lifted.clone();
        Callback::from(move |_: MouseEvent| lifted.set(false))
    };

    let transform = if *lifted { COUNTER_HOVER_LIFT } else { COUNTER_REST };
    let style = format!("{COUNTER_CARD_STYLE} transform: {transform};");

    html! {
        <div class="counter" {style} {onmouseenter} {onmouseleave}>
            <div class="counter-icon" style={COUNTER_ICON_STYLE}>
                <i class={props.spec.icon.clone()}></i>
            </div>
            <div class="counter-number" style={COUNTER_NUMBER_STYLE}>{props.value.clone()}</div>
            <div class="counter-label" style={COUNTER_LABEL_STYLE}>{props.spec.label.clone()}</div>
        </div>
    }
}

/// Statistic cards that count up once the board is half visible.
#[function_component(CounterBoard)]
pub fn counter_board(props: &CounterBoardProps) -> Html {
    let board_ref = use_node_ref();
    let revealed = use_state(|| false);
    let displays = {
        let counters = props.counters.clone();
        use_reducer(move || {
            CounterDisplays(
                counters
                    .iter()
                    .map(|spec| CounterAnimation::new(spec).display())
                    .collect(),
            )
        })
    };

    {
        let board_ref = board_ref.clone();
        let revealed = revealed.clone();
        let displays = displays.clone();
        let counters = props.counters.clone();
        let scheduler = props.scheduler.clone();

        use_effect_with((), move |_| {
            let watch = board_ref.cast::<Element>().and_then(|board| {
                let mut started = false;
                watch_viewport(
                    &[board],
                    COUNTER_VISIBILITY_THRESHOLD,
                    "0px",
                    move |target, observer| {
                        observer.unobserve(target);
                        if started {
                            return;
                        }
                        started = true;
                        revealed.set(true);
                        debug!("animating {} counters", counters.len());
                        for (index, spec) in counters.iter().enumerate() {
                            let displays = displays.clone();
                            animate_counter(&scheduler.0, spec, move |text| {
                                displays.dispatch((index, text))
                            });
                        }
                    },
                )
                .map_err(|error| warn!("counters will not animate: {error}"))
                .ok()
            });

            move || drop(watch)
        });
    }

    html! {
        <div
            ref={board_ref}
            class={classes!("counters-container", "animate-on-scroll", (*revealed).then_some(ANIMATED_CLASS))}
            style={COUNTERS_CONTAINER_STYLE}
        >
            { for props.counters.iter().zip(displays.0.iter()).map(|(spec, value)| html! {
                <CounterCard spec={spec.clone()} value={AttrValue::from(value.clone())} />
            }) }
        </div>
    }
}
