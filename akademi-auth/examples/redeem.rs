//! Drives the redemption flow from a terminal the way the web redeem page
//! does: normalize, redeem, print the status message.
//!
//! ```text
//! cargo run -p akademi-auth --example redeem -- SA-DEMO-2024
//! ```

use akademi_auth::{AuthService, telemetry};
use akademi_storage::FileStore;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    let raw = std::env::args().nth(1).unwrap_or_default();
    if raw.trim().is_empty() {
        eprintln!("usage: redeem <license-code>");
        std::process::exit(2);
    }

    let store = Arc::new(FileStore::open_default()?);
    let auth = AuthService::local(store);

    let outcome = auth.redeem(&raw).await;
    println!("{}", outcome.message);

    if outcome.ok {
        println!("device: {}", auth.device_id()?.short());
        println!("code:   {}", auth.code_mask());
        if let Some(session) = auth.session() {
            println!("until:  {}", session.expires_at);
        }
    }
    Ok(())
}
