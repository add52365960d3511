//! Device identity, license redemption, and session lifecycle for the
//! Akademi course client.
//!
//! This crate is the stateful core behind the redeem page and the lesson
//! dashboard:
//! - Stable per-profile device identity for single-device code binding
//! - Redemption of license codes into 24-hour sessions
//! - Login-state queries, lazy expiry, and logout
//! - Fire-and-forget analytics hooks
//!
//! # Design principles
//!
//! - **One service object**: [`AuthService`] is built once at startup from a
//!   [`akademi_storage::ProfileStore`] and passed around; no ambient globals.
//! - **Pluggable backend**: the binding policy runs against the local store
//!   today; the `online` feature swaps in a network client at construction
//!   time without touching call sites.
//! - **No surprise failures**: redemption returns a displayable
//!   [`RedeemOutcome`] for every input, and malformed persisted state is
//!   logged and treated as absent.
//!
//! Known gap: the binding write and the session write are sequential with no
//! rollback. A failure between them leaves a code bound with no session;
//! the same device simply redeems again.

mod analytics;
mod backend;
mod device;
mod error;
mod service;
mod session;
pub mod telemetry;

pub use analytics::{Analytics, AnalyticsEvent, AnalyticsSink, LogSink, NoopSink, RecordedEvent};
pub use backend::{BINDING_KEY_PREFIX, CodeBackend, LocalBackend, RedeemGrant};
pub use device::{
    DEVICE_ID_KEY, DeviceIdentity, DeviceInfo, ProfileDeviceIdentity, generate_device_id,
};
pub use error::{AuthError, AuthResult};
pub use service::{
    AuthService, AuthState, MSG_DEVICE_CONFLICT, MSG_GENERIC_FAILURE, MSG_INVALID_FORMAT,
    MSG_SUCCESS, RedeemOutcome,
};
pub use session::{
    CODE_MASK_KEY, Package, SESSION_KEY, SESSION_TTL_SECS, Session, SessionStore, TOKEN_KEY,
};

#[cfg(feature = "online")]
mod remote;

#[cfg(feature = "online")]
pub use remote::{RemoteBackend, RemoteConfig};
