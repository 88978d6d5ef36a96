//! REST client for the curve store.
//!
//! The store is the sole mutator of curve state: every edit round-trips
//! through it and the full updated curve comes back. This crate provides a
//! non-blocking client for that API: requests are handed to a background
//! worker thread and answers are drained with `poll_events()` from the UI
//! loop, one frame at a time.

pub mod client;
pub mod protocol;

pub use client::{ApiClient, ApiConfig, ApiError};
pub use protocol::{CurveCreate, CurveEvent, CurveOutcome, CurveRequest, CurveUpdate, PointInsert, PointUpdate};
