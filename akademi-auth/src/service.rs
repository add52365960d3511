//! The auth service: redemption orchestration plus the login-state facade.
//!
//! Constructed once at startup and passed to whatever consumes it; nothing
//! here is ambient global state. The UI layers (redeem page, dashboard)
//! only ever call the handful of methods on [`AuthService`].

use crate::backend::CodeBackend;
use crate::device::DeviceIdentity;
use crate::error::{AuthError, AuthResult};
use crate::session::{Session, SessionStore};
use akademi_license::{LicenseCode, MASK_PLACEHOLDER};
use akademi_storage::ProfileStore;
use akademi_types::{Clock, DeviceId};
use std::sync::Arc;
use tracing::{debug, warn};

/// Format hint shown when the entered code fails validation.
pub const MSG_INVALID_FORMAT: &str =
    "Invalid code format. Codes look like SA-XXXX-XXXX-XXXX.";
/// Shown when the code is bound to a different device.
pub const MSG_DEVICE_CONFLICT: &str =
    "This code is already in use on another device. The single-device policy blocks this login.";
/// Shown after a successful redemption.
pub const MSG_SUCCESS: &str = "✓ Login successful! Taking you to the dashboard...";
/// Generic fallback when storage or the backend fails.
pub const MSG_GENERIC_FAILURE: &str = "Connection error. Please try again.";

/// User-facing result of a redemption attempt. Never an error: every
/// failure mode becomes a displayable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemOutcome {
    /// Whether the redemption created a session.
    pub ok: bool,
    /// Status message for display.
    pub message: String,
}

impl RedeemOutcome {
    fn success(message: &str) -> Self {
        Self {
            ok: true,
            message: message.to_string(),
        }
    }

    fn failure(message: &str) -> Self {
        Self {
            ok: false,
            message: message.to_string(),
        }
    }
}

/// Result of the pure login-state query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// A token is present and no expiry has passed. The session record may
    /// be `None` if it went missing or unreadable; the token alone keeps
    /// the login alive until expiry can be observed.
    Active(Option<Session>),
    /// The session has expired but is still on disk, waiting for
    /// [`AuthService::purge_expired`] (or a composed `is_authed` call).
    Expired(Session),
    /// No token is persisted.
    Anonymous,
}

/// The auth core consumed by page rendering, status banners, and redirects.
pub struct AuthService {
    device: Arc<dyn DeviceIdentity>,
    backend: Arc<dyn CodeBackend>,
    clock: Arc<dyn Clock>,
    sessions: SessionStore,
}

impl AuthService {
    /// Wires the service for fully local operation: profile-backed device
    /// identity and the local redemption stub, on the system clock.
    pub fn local(store: Arc<dyn ProfileStore>) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(akademi_types::SystemClock);
        Self::new(
            store.clone(),
            Arc::new(crate::device::ProfileDeviceIdentity::new(store.clone())),
            Arc::new(crate::backend::LocalBackend::new(store, clock.clone())),
            clock,
        )
    }

    /// Wires the service from explicit parts. The backend choice (local
    /// stub vs. network client) is made here, not by editing call sites.
    pub fn new(
        store: Arc<dyn ProfileStore>,
        device: Arc<dyn DeviceIdentity>,
        backend: Arc<dyn CodeBackend>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            device,
            backend,
            clock,
            sessions: SessionStore::new(store),
        }
    }

    /// Redeems a raw user-entered code.
    ///
    /// Normalizes and validates, resolves the device, asks the backend to
    /// enforce the binding policy, then persists token, session, and masked
    /// code. On any failure nothing user-visible changes except the
    /// returned message. Resolves synchronously on the local backend.
    pub async fn redeem(&self, raw_code: &str) -> RedeemOutcome {
        match self.try_redeem(raw_code).await {
            Ok(()) => RedeemOutcome::success(MSG_SUCCESS),
            Err(AuthError::InvalidFormat(_)) => RedeemOutcome::failure(MSG_INVALID_FORMAT),
            Err(AuthError::DeviceConflict) => RedeemOutcome::failure(MSG_DEVICE_CONFLICT),
            Err(err) => {
                warn!(%err, "redemption failed");
                RedeemOutcome::failure(MSG_GENERIC_FAILURE)
            }
        }
    }

    async fn try_redeem(&self, raw_code: &str) -> AuthResult<()> {
        let code = LicenseCode::parse(raw_code)?;
        let device = self.device.current()?;
        let grant = self.backend.redeem(&code, &device).await?;

        let session = Session {
            user_id: grant.user_id,
            code,
            device_id: device,
            login_at: grant.login_at,
            package: grant.package,
            expires_at: grant.expires_at,
        };

        // The backend has already written the binding. If the save below
        // fails, the binding stays without a session; the same device can
        // still redeem again, so no compensation is attempted.
        self.sessions.save(&grant.token, &session)?;
        debug!(user = %session.user_id, "session created");
        Ok(())
    }

    /// Queries the login state without side effects.
    ///
    /// Storage trouble during the query is logged and reported as
    /// [`AuthState::Anonymous`]; the page stays usable.
    pub fn status(&self) -> AuthState {
        let token = match self.sessions.token() {
            Ok(token) => token,
            Err(err) => {
                warn!(%err, "token read failed");
                return AuthState::Anonymous;
            }
        };
        if token.is_none() {
            return AuthState::Anonymous;
        }

        match self.sessions.load() {
            Ok(Some(session)) if session.is_expired_at(self.clock.now()) => {
                AuthState::Expired(session)
            }
            Ok(session) => AuthState::Active(session),
            Err(err) => {
                warn!(%err, "session read failed");
                AuthState::Active(None)
            }
        }
    }

    /// Clears all session state if (and only if) the session has expired.
    /// Returns true when a purge happened. This is the explicit form of the
    /// cleanup `is_authed` performs implicitly.
    pub fn purge_expired(&self) -> bool {
        if !matches!(self.status(), AuthState::Expired(_)) {
            return false;
        }
        match self.sessions.clear() {
            Ok(()) => {
                debug!("expired session purged");
                true
            }
            Err(err) => {
                warn!(%err, "failed to purge expired session");
                false
            }
        }
    }

    /// Returns true while a non-expired session exists.
    ///
    /// Composes [`Self::status`] and [`Self::purge_expired`]: observing an
    /// expired session clears it as a side effect before returning false.
    pub fn is_authed(&self) -> bool {
        match self.status() {
            AuthState::Active(_) => true,
            AuthState::Expired(_) => {
                self.purge_expired();
                false
            }
            AuthState::Anonymous => false,
        }
    }

    /// Ends the session: best-effort backend notification, then a full
    /// clear of token, masked code, and session. Idempotent.
    pub async fn logout(&self) {
        match self.sessions.token() {
            Ok(Some(token)) => {
                if let Err(err) = self.backend.revoke(&token).await {
                    warn!(%err, "logout notification failed");
                }
            }
            Ok(None) => {}
            Err(err) => warn!(%err, "token read failed during logout"),
        }

        if let Err(err) = self.sessions.clear() {
            warn!(%err, "session clear failed");
        }
    }

    /// Returns the persisted session record, if one parses. Does not check
    /// expiry; use [`Self::status`] for that.
    pub fn session(&self) -> Option<Session> {
        self.sessions.load().ok().flatten()
    }

    /// Returns the persisted masked code, or the fixed placeholder.
    pub fn code_mask(&self) -> String {
        self.sessions
            .code_mask()
            .ok()
            .flatten()
            .unwrap_or_else(|| MASK_PLACEHOLDER.to_string())
    }

    /// Returns this device's id, creating one if needed.
    pub fn device_id(&self) -> AuthResult<DeviceId> {
        self.device.current()
    }
}
