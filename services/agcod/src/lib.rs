//! AWS SigV4 signing for the AGCOD (Amazon Gift Codes On Demand) API.
//!
//! The remote service independently recomputes the signature over the exact
//! request bytes, so everything here is about determinism: payloads serialize
//! the same way every time, the canonical request enumerates its five headers
//! in a fixed sorted order, and the wire headers are the very strings that
//! were canonicalized.
//!
//! The engine is synchronous and stateless. Every signing computation is a
//! pure function of the operation, its parameters, the payload encoding, and
//! an immutable [`SigningContext`]; concurrent requests need no coordination
//! as long as each gets its own context.
//!
//! ## Example
//!
//! ```
//! use giftsign_agcod::{
//!     Credential, Operation, PayloadEncoding, RequestParameters, RequestSigner, SigningContext,
//! };
//! use giftsign_core::time::parse_iso8601;
//!
//! # fn main() -> giftsign_core::Result<()> {
//! let params = RequestParameters {
//!     partner_id: Some("P1".to_string()),
//!     request_id: Some("P1req-0001".to_string()),
//!     currency_code: Some("USD".to_string()),
//!     amount: Some(25),
//!     ..Default::default()
//! };
//!
//! let ctx = SigningContext::new(
//!     Credential::new("access_key_id", "secret_access_key"),
//!     parse_iso8601("20240101T000000Z")?,
//! );
//!
//! let signer = RequestSigner::new(PayloadEncoding::Json);
//! let request = signer.sign(Operation::CreateGiftCard, &params, &ctx)?;
//!
//! assert_eq!(request.uri().path(), "/CreateGiftCard");
//! assert!(request.headers().contains_key(http::header::AUTHORIZATION));
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;

mod operation;
pub use operation::Operation;
pub use operation::PayloadEncoding;

mod params;
pub use params::RequestParameters;

mod payload;
pub use payload::FieldValue;
pub use payload::Payload;
pub use payload::SerializedPayload;

mod context;
pub use context::Credential;
pub use context::SigningContext;

mod canonical;
pub use canonical::CanonicalRequest;

pub mod sign;

mod assemble;
pub use assemble::RequestSigner;

mod diagnostics;
pub use diagnostics::extract_signature;
pub use diagnostics::Diagnostics;
