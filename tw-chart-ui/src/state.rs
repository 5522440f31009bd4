//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use dioxus::prelude::*;
use tw_data::DashboardView;

/// Lookback offered first; matches the endpoint default.
pub const DEFAULT_LOOKBACK_HOURS: i64 = 48;

/// Numbers snapshot requests so a late response from an earlier
/// selection cannot overwrite a newer one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchTickets {
    latest: u64,
}

impl FetchTickets {
    /// Start a request; any ticket handed out before this one is now stale.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

/// Shared state for the dashboard page.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Prepared charts (None until the snapshot arrives)
    pub view: Signal<Option<DashboardView>>,
    /// Whether the snapshot request is still in flight
    pub loading: Signal<bool>,
    /// Error message if the fetch failed
    pub error_msg: Signal<Option<String>>,
    /// Hours of metrics and weather to request
    pub lookback_hours: Signal<i64>,
    /// The request whose response may update the view
    pub tickets: Signal<FetchTickets>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
            lookback_hours: Signal::new(DEFAULT_LOOKBACK_HOURS),
            tickets: Signal::new(FetchTickets::default()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_order_response_is_stale() {
        let mut tickets = FetchTickets::default();
        let twelve_hours = tickets.issue();
        let one_week = tickets.issue();

        // the week request answers first, then the 12 h one arrives late
        assert!(tickets.is_latest(one_week));
        assert!(!tickets.is_latest(twelve_hours));
    }

    #[test]
    fn reselecting_the_same_lookback_still_supersedes() {
        let mut tickets = FetchTickets::default();
        let first = tickets.issue();
        let _other = tickets.issue();
        let again = tickets.issue();
        assert!(!tickets.is_latest(first));
        assert!(tickets.is_latest(again));
    }
}
