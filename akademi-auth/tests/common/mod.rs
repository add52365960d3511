//! Shared test helpers for auth tests.

#![allow(dead_code)]

use akademi_auth::{AuthResult, AuthService, DeviceIdentity, LocalBackend};
use akademi_storage::{MemoryStore, ProfileStore, StorageError, StorageResult};
use akademi_types::{Clock, DeviceId, ManualClock};
use std::sync::Arc;

/// A store whose writes always fail, as when the profile directory is gone
/// or the disk is full. Reads report nothing stored.
pub struct OfflineStore;

impl ProfileStore for OfflineStore {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("profile store offline".to_string()))
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("profile store offline".to_string()))
    }
}

/// A device identity pinned to a fixed id, so tests can act as "another
/// device" against a shared binding store.
pub struct FixedDevice(pub DeviceId);

impl DeviceIdentity for FixedDevice {
    fn current(&self) -> AuthResult<DeviceId> {
        Ok(self.0.clone())
    }
}

/// A deterministic 32-hex device id derived from a tag.
pub fn device(tag: u8) -> DeviceId {
    DeviceId::new(format!("{tag:032x}")).unwrap()
}

pub fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::from_system())
}

/// Builds a fully local service where sessions, bindings, and device id all
/// live in one store, like a single browser profile.
pub fn single_profile_service(
    store: Arc<MemoryStore>,
    dev: DeviceId,
    clock: Arc<ManualClock>,
) -> AuthService {
    let store: Arc<dyn ProfileStore> = store;
    let clock: Arc<dyn Clock> = clock;
    AuthService::new(
        store.clone(),
        Arc::new(FixedDevice(dev)),
        Arc::new(LocalBackend::new(store, clock.clone())),
        clock,
    )
}

/// Builds a fully local service over an arbitrary store implementation.
pub fn service_over(
    store: Arc<dyn ProfileStore>,
    dev: DeviceId,
    clock: Arc<ManualClock>,
) -> AuthService {
    let clock: Arc<dyn Clock> = clock;
    AuthService::new(
        store.clone(),
        Arc::new(FixedDevice(dev)),
        Arc::new(LocalBackend::new(store, clock.clone())),
        clock,
    )
}

/// Builds a service with its own session store but a shared binding store,
/// modeling a second device redeeming against the same backend.
pub fn service_with_shared_bindings(
    sessions: Arc<MemoryStore>,
    bindings: Arc<MemoryStore>,
    dev: DeviceId,
    clock: Arc<ManualClock>,
) -> AuthService {
    let sessions: Arc<dyn ProfileStore> = sessions;
    let bindings: Arc<dyn ProfileStore> = bindings;
    let clock: Arc<dyn Clock> = clock;
    AuthService::new(
        sessions,
        Arc::new(FixedDevice(dev)),
        Arc::new(LocalBackend::new(bindings, clock.clone())),
        clock,
    )
}
