//! License code handling for the Akademi client.
//!
//! Codes are user-entered credentials of the form `SA-XXXX-XXXX-XXXX`
//! (four-character uppercase alphanumeric segments), plus one fixed demo
//! literal. Everything here is pure string work:
//!
//! - [`normalize`] — canonicalize raw input (trim, uppercase, strip)
//! - [`is_valid_format`] — anchored grammar check after normalization
//! - [`mask`] — redact a code for on-screen display
//! - [`LicenseCode`] — a code that has passed normalize + validate
//!
//! Format validity says nothing about entitlement; whether a well-formed
//! code actually grants access is the redemption backend's call.

mod code;

pub use code::{DEMO_CODE, InvalidCode, LicenseCode, MASK_PLACEHOLDER, is_valid_format, mask, normalize};
