//! Sliding-window admission gate for outbound requests.
//!
//! Every admission is timestamped in an in-memory log. A caller is admitted
//! when fewer than `limit` admissions are younger than the window; otherwise
//! it waits until the oldest one ages out and re-evaluates.

mod clock;
mod gate;


pub use clock::{Clock, TokioClock};
pub use gate::{Admission, RateGate};
