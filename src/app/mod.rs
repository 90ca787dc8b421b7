//! Application module - feature operations over the authenticated gateway
//!
//! Each feature (auth, catalog, student, profile) is a set of thin async
//! functions that build typed payloads, route them through the gateway, and
//! decode typed responses. None of them recover from errors themselves; the
//! caller surfaces the message and may offer a retry.

pub mod auth;
pub mod catalog;
pub mod profile;
pub mod student;

pub use auth::*;
pub use catalog::*;
pub use profile::*;
pub use student::*;
