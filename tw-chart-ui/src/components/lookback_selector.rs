//! Lookback window selector.

use crate::state::AppState;
use dioxus::prelude::*;

const CHOICES: [(i64, &str); 4] = [(12, "12 hours"), (24, "1 day"), (48, "2 days"), (168, "1 week")];

/// Dropdown for how many hours of readings to request.
#[component]
pub fn LookbackSelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.lookback_hours)();

    let on_change = move |evt: Event<FormData>| {
        if let Ok(hours) = evt.value().parse::<i64>() {
            state.lookback_hours.set(hours);
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Show: "
                select {
                    onchange: on_change,
                    for (hours, text) in CHOICES {
                        option {
                            value: "{hours}",
                            selected: current == hours,
                            "{text}"
                        }
                    }
                }
            }
        }
    }
}
