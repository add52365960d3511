//! Pluggable redemption backend.
//!
//! The facade talks to a [`CodeBackend`] chosen at construction time: the
//! local stub that enforces bindings against the profile store, or (with the
//! `online` feature) a network client. The trait is async so swapping in the
//! network client changes no observable ordering; the local backend simply
//! resolves immediately.

use crate::device::DeviceInfo;
use crate::error::{AuthError, AuthResult};
use crate::session::{Package, SESSION_TTL_SECS};
use akademi_license::LicenseCode;
use akademi_storage::ProfileStore;
use akademi_types::{Clock, DeviceId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Storage key prefix for code-to-device bindings; the normalized code is
/// appended.
pub const BINDING_KEY_PREFIX: &str = "sa_demo_bound_";

/// What a successful redemption grants. The facade turns this into a
/// persisted [`crate::Session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemGrant {
    /// The user the code resolves to.
    pub user_id: UserId,
    /// Opaque token proving the session exists.
    pub token: String,
    /// Entitlement tier.
    pub package: Package,
    /// Session start.
    pub login_at: DateTime<Utc>,
    /// Session end.
    pub expires_at: DateTime<Utc>,
}

/// A redemption backend.
#[async_trait]
pub trait CodeBackend: Send + Sync {
    /// Redeems `code` for `device`, enforcing the single-device policy.
    ///
    /// # Errors
    ///
    /// [`AuthError::DeviceConflict`] when the code is already bound to a
    /// different device; no state is mutated in that case.
    async fn redeem(&self, code: &LicenseCode, device: &DeviceId) -> AuthResult<RedeemGrant>;

    /// Notifies the backend that `token` is being discarded. Best effort;
    /// bindings are never released.
    async fn revoke(&self, token: &str) -> AuthResult<()>;

    /// Collects the device description sent with online requests.
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo::collect()
    }
}

/// The profile-store-backed stub used while no server is configured.
///
/// Bindings live in the same store as the session keys, one entry per
/// redeemed code. A binding is written on first redemption, never updated,
/// and never deleted.
pub struct LocalBackend {
    store: Arc<dyn ProfileStore>,
    clock: Arc<dyn Clock>,
}

impl LocalBackend {
    /// Creates a local backend over the given store and clock.
    pub fn new(store: Arc<dyn ProfileStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn binding_key(code: &LicenseCode) -> String {
        format!("{BINDING_KEY_PREFIX}{code}")
    }
}

#[async_trait]
impl CodeBackend for LocalBackend {
    async fn redeem(&self, code: &LicenseCode, device: &DeviceId) -> AuthResult<RedeemGrant> {
        let key = Self::binding_key(code);
        match self.store.get(&key)? {
            Some(bound) if bound != device.as_str() => {
                debug!(code = %code.masked(), "code bound elsewhere, rejecting");
                return Err(AuthError::DeviceConflict);
            }
            Some(_) => {} // already bound to this device, re-login is fine
            None => self.store.set(&key, device.as_str())?,
        }

        let login_at = self.clock.now();
        Ok(RedeemGrant {
            user_id: UserId::new(format!("demo-user-{}", device.short())),
            token: format!("demo-token-{}", login_at.timestamp_millis()),
            package: Package::PremiumPro,
            login_at,
            expires_at: login_at + TimeDelta::seconds(SESSION_TTL_SECS),
        })
    }

    async fn revoke(&self, _token: &str) -> AuthResult<()> {
        // Nothing to tell; logout does not unbind the code.
        Ok(())
    }
}
