//! Session records and their persistence.
//!
//! A session is the time-bounded proof of entitlement created by a
//! successful redemption. It lives in the profile store alongside the auth
//! token and the masked code; the three are written and cleared together.

use crate::error::AuthResult;
use akademi_license::LicenseCode;
use akademi_storage::ProfileStore;
use akademi_types::{DeviceId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// Storage key for the auth token.
pub const TOKEN_KEY: &str = "sa_demo_token_v1";
/// Storage key for the masked code shown in watermarks.
pub const CODE_MASK_KEY: &str = "sa_demo_code_mask_v1";
/// Storage key for the serialized session record.
pub const SESSION_KEY: &str = "sa_session_data";

/// Session lifetime: 24 hours, checked lazily on reads.
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Entitlement tier attached to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Package {
    /// Limited trial access.
    Trial,
    /// Full course access. Every local redemption grants this tier.
    PremiumPro,
}

/// A session record, serialized as camelCase JSON in the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// The user that redeemed the code.
    pub user_id: UserId,
    /// The normalized code this session came from.
    pub code: LicenseCode,
    /// The device the session was created on.
    pub device_id: DeviceId,
    /// When the session was created.
    pub login_at: DateTime<Utc>,
    /// Entitlement tier.
    pub package: Package,
    /// When the session stops being valid; always `login_at` + 24h at
    /// creation time.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Returns true once `now` has reached the expiry instant.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Persistence for the session record and its companion keys.
pub struct SessionStore {
    store: Arc<dyn ProfileStore>,
}

impl SessionStore {
    /// Creates a session store over the given profile store.
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Persists the token, the session, and the masked code, overwriting
    /// any prior login unconditionally.
    pub fn save(&self, token: &str, session: &Session) -> AuthResult<()> {
        let json = serde_json::to_string(session)?;
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(SESSION_KEY, &json)?;
        self.store.set(CODE_MASK_KEY, &session.code.masked())?;
        Ok(())
    }

    /// Returns the persisted auth token, if any.
    pub fn token(&self) -> AuthResult<Option<String>> {
        Ok(self.store.get(TOKEN_KEY)?)
    }

    /// Returns the persisted masked code, if any.
    pub fn code_mask(&self) -> AuthResult<Option<String>> {
        Ok(self.store.get(CODE_MASK_KEY)?)
    }

    /// Loads the session record.
    ///
    /// Missing data returns `Ok(None)`. Malformed data also returns
    /// `Ok(None)` — it is logged and treated as absent, never surfaced.
    pub fn load(&self) -> AuthResult<Option<Session>> {
        let Some(raw) = self.store.get(SESSION_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                warn!(%err, "persisted session malformed, treating as absent");
                Ok(None)
            }
        }
    }

    /// Removes token, masked code, and session together.
    ///
    /// The removes are sequential (single-threaded callers see them as one
    /// step); there is no partially-cleared state to support.
    pub fn clear(&self) -> AuthResult<()> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(CODE_MASK_KEY)?;
        self.store.remove(SESSION_KEY)?;
        Ok(())
    }
}
