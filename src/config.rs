//! Typed view over the module's `MODULE_SHIPPING_UPSOAUTH_*` configuration rows.
//!
//! [`keys`] names every row and carries the defaults written at install time.
//! [`Settings`] parses a snapshot of those rows into typed options once per request so the
//! token manager, quoter, and admin helpers never re-read raw strings.

pub mod keys;
pub mod options;
pub mod settings;

pub use options::*;
pub use settings::*;
