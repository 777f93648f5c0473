//! Prediction request lifecycle.
//!
//! ```text
//!            submit                 resolve Ok
//!   Idle ─────────────▶ Pending ─────────────▶ Succeeded ─┐
//!                          │                               │ submit
//!                          │ resolve Err                   ▼
//!                          └──────────────▶ Failed ───▶ Pending
//! ```
//!
//! A submit that fails validation goes straight to Failed without ever
//! being Pending. `clear` drops `current` from Succeeded or Failed and leaves
//! everything else alone. There is no terminal state.
//!
//! With overlapping requests the status stays Pending until the last one
//! resolves; every success is still appended to history as it lands. A
//! failure recorded while others were in flight, including a rejected
//! submit, is not lost: the last resolution settles on Failed.

mod controller;
mod state;

pub use controller::{LifecycleEvent, PendingPrediction, PredictionController};
pub use state::{HistorySummary, LifecycleSnapshot, LifecycleStatus};
