use std::fmt;

use giftsign_core::{Error, Result};

/// Marker that precedes the signature inside an Authorization value.
const SIGNATURE_MARKER: &str = "Signature=";

/// A trace of every intermediate signing artifact, for debugging and
/// conformance testing against known SigV4 vectors.
///
/// The trace never contains the secret key; the closest it gets is the
/// derived key, which cannot be reversed into the secret.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    /// Serialized payload, as text.
    pub payload: String,
    /// Hex SHA-256 of the payload bytes.
    pub payload_hash: String,
    /// The full canonical request string.
    pub canonical_request: String,
    /// Hex SHA-256 of the canonical request.
    pub canonical_request_hash: String,
    /// The derived string to sign.
    pub string_to_sign: String,
    /// Hex form of the derived signing key.
    pub derived_key: String,
    /// The final signature.
    pub signature: String,
    /// Endpoint host the request is addressed to.
    pub host: String,
    /// Request URI, "/<OperationName>".
    pub request_uri: String,
    /// Wire headers in canonical order, Authorization last.
    pub headers: Vec<(String, String)>,
}

impl Diagnostics {
    /// The Authorization header value, if the trace captured one.
    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name == "Authorization")
            .map(|(_, value)| value.as_str())
    }
}

/// Locate the signature inside an Authorization value.
///
/// Used as a sanity check before transmission: a value without a non-empty
/// `Signature=` component is a `SignatureMalformed` error.
pub fn extract_signature(authorization: &str) -> Result<&str> {
    let start = authorization
        .find(SIGNATURE_MARKER)
        .map(|idx| idx + SIGNATURE_MARKER.len())
        .ok_or_else(|| {
            Error::signature_malformed("authorization value has no Signature= component")
        })?;

    let signature = &authorization[start..];
    if signature.is_empty() {
        return Err(Error::signature_malformed(
            "authorization value has an empty signature",
        ));
    }

    Ok(signature)
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PAYLOAD:")?;
        writeln!(f, "{}", self.payload)?;
        writeln!(f, "HASHED PAYLOAD:")?;
        writeln!(f, "{}", self.payload_hash)?;
        writeln!(f, "CANONICAL REQUEST:")?;
        writeln!(f, "{}", self.canonical_request)?;
        writeln!(f, "HASHED CANONICAL REQUEST:")?;
        writeln!(f, "{}", self.canonical_request_hash)?;
        writeln!(f, "STRING TO SIGN:")?;
        writeln!(f, "{}", self.string_to_sign)?;
        writeln!(f, "DERIVED SIGNING KEY:")?;
        writeln!(f, "{}", self.derived_key)?;
        writeln!(f, "SIGNATURE:")?;
        writeln!(f, "{}", self.signature)?;
        writeln!(f, "ENDPOINT:")?;
        writeln!(f, "{}", self.host)?;
        writeln!(f, "SIGNED REQUEST:")?;
        writeln!(f, "POST {} HTTP/1.1", self.request_uri)?;
        for (name, value) in &self.headers {
            writeln!(f, "{name}:{value}")?;
        }
        write!(f, "{}", self.payload)
    }
}
