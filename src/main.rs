#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod accessibility;
mod config;
mod contact_form;
mod counters;
mod effects;
mod error;
mod loading;
mod navigation;
mod notification;
mod rate_limit;
mod reveal;
mod scrolling;
mod styles;
mod timing;

#[cfg(target_arch = "wasm32")]
mod counter_board;
#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
