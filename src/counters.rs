use crate::{
    error::Result,
    timing::{Scheduler, TimerHandle},
};
use serde::Deserialize;
use std::{ops::ControlFlow, rc::Rc};

pub const COUNTER_TICK_MS: u32 = 30;
pub const COUNTER_STEPS: f64 = 60.0;
pub const COUNTER_VISIBILITY_THRESHOLD: f64 = 0.5;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CounterSpec {
    pub target: u32,
    #[serde(default)]
    pub suffix: String,
    pub label: String,
    #[serde(default)]
    pub icon: String,
}

impl CounterSpec {
    fn new(target: u32, suffix: &str, label: &str, icon: &str) -> Self {
        Self {
            target,
            suffix: suffix.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
        }
    }
}

pub fn default_counters() -> Vec<CounterSpec> {
    vec![
        CounterSpec::new(500, "+", "Happy Clients", "fas fa-users"),
        CounterSpec::new(1000, "+", "Projects Completed", "fas fa-project-diagram"),
        CounterSpec::new(99, "%", "Client Satisfaction", "fas fa-star"),
        CounterSpec::new(10, "+", "Years Experience", "fas fa-calendar-alt"),
    ]
}

/// Counters declared by the page, or the built-in set when it declares none.
pub fn parse_counters(raw: Option<&str>) -> Result<Vec<CounterSpec>> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(json) => Ok(serde_json::from_str(json)?),
        None => Ok(default_counters()),
    }
}

#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: f64,
    current: f64,
    increment: f64,
    suffix: String,
}

impl CounterAnimation {
    pub fn new(spec: &CounterSpec) -> Self {
        let target = f64::from(spec.target);
        Self {
            target,
            current: 0.0,
            increment: target / COUNTER_STEPS,
            suffix: spec.suffix.clone(),
        }
    }

    pub fn display(&self) -> String {
        format!("{}{}", self.current.floor() as u64, self.suffix)
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.target
    }

    pub fn tick(&mut self) -> ControlFlow<()> {
        self.current += self.increment;
        if self.current >= self.target {
            self.current = self.target;
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// Renders the starting value, then one frame per tick until the target.
pub fn animate_counter(
    scheduler: &Rc<dyn Scheduler>,
    spec: &CounterSpec,
    render: impl Fn(String) + 'static,
) -> TimerHandle {
    let mut animation = CounterAnimation::new(spec);
    render(animation.display());

    scheduler.set_interval(
        COUNTER_TICK_MS,
        Box::new(move || {
            let flow = animation.tick();
            render(animation.display());
            flow
        }),
    )
}
