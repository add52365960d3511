//! Device identity for license binding.
//!
//! Each profile gets one stable pseudo-random [`DeviceId`], generated on
//! first use and persisted forever after. It identifies the device for the
//! single-device binding policy; it is not a security primitive.

use crate::error::AuthResult;
use akademi_storage::ProfileStore;
use akademi_types::DeviceId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::env;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};
use uuid::Uuid;

/// Storage key for the persisted device id.
pub const DEVICE_ID_KEY: &str = "sa_device_id_v1";

/// Resolves the identity of the current device.
///
/// A trait so the redemption flow can be exercised against a shared binding
/// store while pretending to run on different devices.
pub trait DeviceIdentity: Send + Sync {
    /// Returns the device id, creating and persisting one if needed.
    fn current(&self) -> AuthResult<DeviceId>;
}

/// The default identity provider: one id per profile store.
pub struct ProfileDeviceIdentity {
    store: Arc<dyn ProfileStore>,
}

impl ProfileDeviceIdentity {
    /// Creates a provider over the given profile store.
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }
}

impl DeviceIdentity for ProfileDeviceIdentity {
    fn current(&self) -> AuthResult<DeviceId> {
        if let Some(raw) = self.store.get(DEVICE_ID_KEY)? {
            match DeviceId::new(raw) {
                Ok(id) => return Ok(id),
                Err(err) => warn!(%err, "persisted device id unusable, regenerating"),
            }
        }

        let id = generate_device_id();
        self.store.set(DEVICE_ID_KEY, id.as_str())?;
        debug!(device = id.short(), "generated new device id");
        Ok(id)
    }
}

/// Generates a fresh device id.
///
/// Prefers OS entropy shaped as a UUID v4. If the entropy source is
/// unavailable, falls back to hashing host attributes and the current time
/// into 32 hex characters; lower quality, but the id only needs to be
/// stable and unique enough for binding.
#[must_use]
pub fn generate_device_id() -> DeviceId {
    let mut bytes = [0u8; 16];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => {
            // RFC 4122 version and variant bits
            bytes[6] = (bytes[6] & 0x0f) | 0x40;
            bytes[8] = (bytes[8] & 0x3f) | 0x80;
            DeviceId::from_uuid(Uuid::from_bytes(bytes))
        }
        Err(err) => {
            warn!(%err, "OS entropy unavailable, using fallback id generator");
            fallback_device_id()
        }
    }
}

fn fallback_device_id() -> DeviceId {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seed = format!(
        "{}|{}|{}|{}|{}",
        env::consts::OS,
        env::consts::ARCH,
        get_hostname(),
        std::process::id(),
        nanos
    );

    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    let hash = hasher.finalize();

    DeviceId::new(hex::encode(&hash[..16])).expect("sha256 hex is a well-formed id")
}

/// Descriptive attributes of the current device, sent with online
/// redemption requests so the server can label bound devices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    /// Operating system name.
    pub platform: String,
    /// CPU architecture.
    pub arch: String,
    /// Hostname.
    pub hostname: String,
    /// Locale, when the environment declares one.
    pub locale: Option<String>,
}

impl DeviceInfo {
    /// Collects information about the current device.
    #[must_use]
    pub fn collect() -> Self {
        Self {
            platform: env::consts::OS.to_string(),
            arch: env::consts::ARCH.to_string(),
            hostname: get_hostname(),
            locale: env::var("LANG").ok(),
        }
    }
}

fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}
