//! Process-wide logging and fault capture.

use std::panic;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the tracing subscriber and a panic hook that logs otherwise
/// unhandled faults instead of letting them vanish. Call once at startup;
/// repeated calls are no-ops.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            tracing::error!(fault = %info, "unhandled fault");
            previous(info);
        }));
    });
}
