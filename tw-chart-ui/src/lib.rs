//! Shared Dioxus components and Plotly bridge for the Tidewatch dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for Plotly calls via `js_sys::eval()`
//! - `fetch`: the single snapshot request made by the page
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (containers, selectors, etc.)

pub mod components;
pub mod fetch;
pub mod js_bridge;
pub mod state;
