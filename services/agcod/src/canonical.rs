use std::fmt::Write;

use giftsign_core::hash::hex_sha256;
use giftsign_core::Result;
use percent_encoding::utf8_percent_encode;

use crate::constants::{
    ACCEPT_HEADER, AWS_URI_ENCODE_SET, CONTENT_HEADER, HOST_HEADER, QUERY_STRING,
    X_AMZ_DATE_HEADER, X_AMZ_TARGET_HEADER,
};
use crate::context::SigningContext;
use crate::operation::Operation;
use crate::payload::SerializedPayload;

/// The canonical request: the fixed-format string the remote verifier
/// recomputes on its side, plus the exact header pairs that must go on the
/// wire unaltered.
///
/// - [Create a canonical request](https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html)
#[derive(Debug, Clone)]
pub struct CanonicalRequest {
    headers: Vec<(&'static str, String)>,
    text: String,
}

impl CanonicalRequest {
    /// Build the canonical request for `operation` over the serialized
    /// payload.
    pub fn build(
        operation: Operation,
        payload: &SerializedPayload,
        ctx: &SigningContext,
    ) -> Result<Self> {
        let mut headers: Vec<(&'static str, String)> = vec![
            (ACCEPT_HEADER, payload.content_type.to_string()),
            (CONTENT_HEADER, payload.content_type.to_string()),
            (HOST_HEADER, ctx.host.clone()),
            (X_AMZ_DATE_HEADER, ctx.timestamp()),
            (X_AMZ_TARGET_HEADER, operation.target()),
        ];
        // The verifier enumerates headers sorted by lowercase name. Sorting
        // here makes insertion order above irrelevant and keeps the header
        // block and the signed-headers list in the same order.
        headers.sort_by(|a, b| a.0.cmp(b.0));

        let mut f = String::with_capacity(256);
        writeln!(f, "POST")?;
        writeln!(
            f,
            "{}",
            utf8_percent_encode(&operation.request_uri(), &AWS_URI_ENCODE_SET)
        )?;
        writeln!(f, "{QUERY_STRING}")?;
        for (name, value) in &headers {
            writeln!(f, "{name}:{value}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", signed_headers_list(&headers))?;
        write!(f, "{}", hex_sha256(&payload.bytes))?;

        Ok(Self { headers, text: f })
    }

    /// The canonical request string.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Hex SHA-256 of the canonical request string.
    pub fn hash(&self) -> String {
        hex_sha256(self.text.as_bytes())
    }

    /// The `;`-joined signed-headers list, in canonical order.
    pub fn signed_headers(&self) -> String {
        signed_headers_list(&self.headers)
    }

    /// The header pairs to put on the wire, in canonical order. These are the
    /// same strings that were canonicalized; they must not be altered before
    /// transmission.
    pub fn headers(&self) -> &[(&'static str, String)] {
        &self.headers
    }
}

fn signed_headers_list(headers: &[(&'static str, String)]) -> String {
    headers
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(";")
}
