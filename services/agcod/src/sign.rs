//! SigV4 signature derivation: string-to-sign, the scope-derived signing key,
//! and the final Authorization header value.
//!
//! - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/sigv4_signing.html)

use std::fmt::Write;

use giftsign_core::hash::{hex_hmac_sha256, hmac_sha256};
use giftsign_core::Result;
use log::debug;

use crate::constants::{AWS_SHA256_ALGORITHM, KEY_QUALIFIER, TERMINATION_STRING};
use crate::context::SigningContext;

/// Credential scope: "<date>/<region>/<service>/aws4_request".
pub fn credential_scope(ctx: &SigningContext) -> String {
    format!(
        "{}/{}/{}/{}",
        ctx.date(),
        ctx.region,
        ctx.service,
        TERMINATION_STRING
    )
}

/// Derive the string to sign from the canonical request hash.
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20240101T000000Z
/// 20240101/<region>/<service>/aws4_request
/// <hashed_canonical_request>
/// ```
pub fn string_to_sign(canonical_request_hash: &str, ctx: &SigningContext) -> Result<String> {
    let scope = credential_scope(ctx);
    debug!("calculated scope: {scope}");

    let mut f = String::new();
    writeln!(f, "{AWS_SHA256_ALGORITHM}")?;
    writeln!(f, "{}", ctx.timestamp())?;
    writeln!(f, "{scope}")?;
    write!(f, "{canonical_request_hash}")?;

    debug!("calculated string to sign: {f}");
    Ok(f)
}

/// Derive the signing key by chaining HMAC-SHA256 over date, region, service,
/// and the termination string, rooted at "AWS4" + secret key.
///
/// Each step's output keys the next step; the order is fixed by the verifier
/// and must not change. The key is ephemeral: recomputed per request and
/// never persisted.
pub fn signing_key(ctx: &SigningContext) -> Vec<u8> {
    // Sign secret
    let secret = format!("{KEY_QUALIFIER}{}", ctx.credential.secret_access_key);
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), ctx.date().as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), ctx.region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), ctx.service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), TERMINATION_STRING.as_bytes())
}

/// The final signature: lowercase hex HMAC-SHA256 of the string to sign under
/// the derived key.
pub fn signature(string_to_sign: &str, signing_key: &[u8]) -> String {
    hex_hmac_sha256(signing_key, string_to_sign.as_bytes())
}

/// Assemble the Authorization header value.
pub fn authorization_header(
    ctx: &SigningContext,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        AWS_SHA256_ALGORITHM,
        ctx.credential.access_key_id,
        credential_scope(ctx),
        signed_headers,
        signature
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Credential;
    use giftsign_core::time::parse_iso8601;
    use pretty_assertions::assert_eq;

    fn context_at(timestamp: &str) -> SigningContext {
        SigningContext::new(
            Credential::new("AKIDEXAMPLE", "test-secret"),
            parse_iso8601(timestamp).unwrap(),
        )
    }

    #[test]
    fn test_signing_key_golden_vector() {
        // Reference vector: secret "test-secret", date "20150830",
        // region "us-east-1", service "AGCODService".
        let ctx = context_at("20150830T123600Z");
        assert_eq!(
            hex::encode(signing_key(&ctx)),
            "d6628c4845bcc75dc3fe885dedd2fb5ae2d051d78f60a6952415b23d45573dda"
        );
    }

    #[test]
    fn test_string_to_sign_layout() {
        let ctx = context_at("20240101T000000Z");
        let sts = string_to_sign(
            "cf3e41dff79a5420e455dd946faea77215fdcd99c114910b7ccc9dab2861eea6",
            &ctx,
        )
        .expect("must derive");

        assert_eq!(
            sts,
            "AWS4-HMAC-SHA256\n\
             20240101T000000Z\n\
             20240101/us-east-1/AGCODService/aws4_request\n\
             cf3e41dff79a5420e455dd946faea77215fdcd99c114910b7ccc9dab2861eea6"
        );
    }

    #[test]
    fn test_signature_golden_vector() {
        let ctx = context_at("20240101T000000Z");
        let sts = string_to_sign(
            "cf3e41dff79a5420e455dd946faea77215fdcd99c114910b7ccc9dab2861eea6",
            &ctx,
        )
        .unwrap();
        let key = signing_key(&ctx);

        assert_eq!(
            signature(&sts, &key),
            "5fff905d1982aaa2074e0d3ac84bde9bfe7d09fc65bab0bc7b2706e2e2b7944e"
        );
    }

    #[test]
    fn test_signing_key_is_deterministic() {
        let ctx = context_at("20240101T000000Z");
        assert_eq!(signing_key(&ctx), signing_key(&ctx));
    }

    #[test]
    fn test_authorization_header_layout() {
        let ctx = context_at("20240101T000000Z");
        let value = authorization_header(
            &ctx,
            "accept;content-type;host;x-amz-date;x-amz-target",
            "deadbeef",
        );

        assert_eq!(
            value,
            "AWS4-HMAC-SHA256 \
             Credential=AKIDEXAMPLE/20240101/us-east-1/AGCODService/aws4_request, \
             SignedHeaders=accept;content-type;host;x-amz-date;x-amz-target, \
             Signature=deadbeef"
        );
    }
}
