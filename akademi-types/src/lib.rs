//! Core type definitions for the Akademi client.
//!
//! Defines the identifier newtypes shared by storage, licensing, and auth,
//! plus the [`Clock`] abstraction that lets session expiry be tested without
//! waiting on wall time.

mod clock;
mod ids;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ids::{DeviceId, IdError, UserId};
