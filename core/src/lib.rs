//! Core components for signing AGCOD API requests.
//!
//! This crate provides the foundation for the giftsign workspace: the error
//! type shared by every signing stage, the SHA-256/HMAC helpers the SigV4
//! scheme is built from, time formatting for the `x-amz-date` header, and a
//! redaction helper so credentials never leak through `Debug` output.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
