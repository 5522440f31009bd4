//! Core types for the Tidewatch weather and surf dashboard.
//!
//! Everything in here is transient: records are built from a fetched
//! [`Snapshot`] and never mutated afterwards.

pub mod error;
pub mod forecast;
pub mod sample;
pub mod snapshot;
pub mod time;

pub use error::TidewatchError;
pub use forecast::{ForecastEntry, SurfRow};
pub use sample::{RawRecord, Sample, SeriesFields};
pub use snapshot::Snapshot;
