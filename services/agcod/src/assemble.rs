use bytes::Bytes;
use giftsign_core::hash::hex_sha256;
use giftsign_core::Result;
use http::{header, HeaderValue, Request, Uri};

use crate::canonical::CanonicalRequest;
use crate::context::SigningContext;
use crate::diagnostics::{self, Diagnostics};
use crate::operation::{Operation, PayloadEncoding};
use crate::params::RequestParameters;
use crate::payload::Payload;
use crate::sign;

/// Signer that assembles a fully-specified AGCOD request: SigV4 headers plus
/// serialized body, ready to hand to a transport layer.
///
/// Signing is a pure function of its inputs. No I/O happens here; sending the
/// request, timeouts, and retries belong to the transport collaborator.
#[derive(Debug, Clone, Copy)]
pub struct RequestSigner {
    encoding: PayloadEncoding,
}

impl RequestSigner {
    /// Create a signer that serializes payloads under the given encoding.
    pub fn new(encoding: PayloadEncoding) -> Self {
        Self { encoding }
    }

    /// Sign one operation into an outbound request.
    pub fn sign(
        &self,
        operation: Operation,
        params: &RequestParameters,
        ctx: &SigningContext,
    ) -> Result<Request<Bytes>> {
        let (request, _) = self.sign_traced(operation, params, ctx)?;
        Ok(request)
    }

    /// Sign one operation, also returning the trace of every intermediate
    /// artifact for debugging or audit.
    pub fn sign_traced(
        &self,
        operation: Operation,
        params: &RequestParameters,
        ctx: &SigningContext,
    ) -> Result<(Request<Bytes>, Diagnostics)> {
        ctx.validate()?;

        let payload = Payload::build(operation, params)?;
        let serialized = payload.serialize(self.encoding)?;

        let creq = CanonicalRequest::build(operation, &serialized, ctx)?;
        let creq_hash = creq.hash();

        let string_to_sign = sign::string_to_sign(&creq_hash, ctx)?;
        let signing_key = sign::signing_key(ctx);
        let signature = sign::signature(&string_to_sign, &signing_key);
        let authorization = sign::authorization_header(ctx, &creq.signed_headers(), &signature);

        // Sanity check the produced value before anything can transmit it.
        diagnostics::extract_signature(&authorization)?;

        let uri: Uri = format!("https://{}{}", ctx.host, operation.request_uri()).parse()?;
        let mut builder = Request::post(uri);
        for (name, value) in creq.headers() {
            builder = builder.header(*name, value.as_str());
        }
        let mut request = builder.body(serialized.bytes.clone())?;

        let mut auth_value = HeaderValue::from_str(&authorization)?;
        auth_value.set_sensitive(true);
        request.headers_mut().insert(header::AUTHORIZATION, auth_value);

        let trace = Diagnostics {
            payload: String::from_utf8_lossy(&serialized.bytes).into_owned(),
            payload_hash: hex_sha256(&serialized.bytes),
            canonical_request: creq.as_str().to_string(),
            canonical_request_hash: creq_hash,
            string_to_sign,
            derived_key: hex::encode(&signing_key),
            signature,
            host: ctx.host.clone(),
            request_uri: operation.request_uri(),
            headers: creq
                .headers()
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .chain(std::iter::once(("Authorization".to_string(), authorization)))
                .collect(),
        };

        Ok((request, trace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Credential;
    use giftsign_core::time::parse_iso8601;
    use giftsign_core::ErrorKind;
    use pretty_assertions::assert_eq;

    fn context() -> SigningContext {
        SigningContext::new(
            Credential::new("AKIDEXAMPLE", "test-secret"),
            parse_iso8601("20240101T000000Z").unwrap(),
        )
    }

    fn create_params() -> RequestParameters {
        RequestParameters {
            partner_id: Some("P1".to_string()),
            request_id: Some("P1req-0001".to_string()),
            amount: Some(25),
            currency_code: Some("USD".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_create_gift_card_json() {
        let _ = env_logger::builder().is_test(true).try_init();

        let signer = RequestSigner::new(PayloadEncoding::Json);
        let request = signer
            .sign(Operation::CreateGiftCard, &create_params(), &context())
            .expect("must sign");

        assert_eq!(request.method(), http::Method::POST);
        assert_eq!(
            request.uri().to_string(),
            "https://agcod-v2.amazon.com/CreateGiftCard"
        );
        assert_eq!(
            std::str::from_utf8(request.body()).unwrap(),
            r#"{"partnerId":"P1","creationRequestId":"P1req-0001","value":{"currencyCode":"USD","amount":25}}"#
        );

        let headers = request.headers();
        assert_eq!(headers["accept"], "application/json");
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(headers["host"], "agcod-v2.amazon.com");
        assert_eq!(headers["x-amz-date"], "20240101T000000Z");
        assert_eq!(
            headers["x-amz-target"],
            "com.amazonaws.agcod.AGCODService.CreateGiftCard"
        );

        let authorization = headers[header::AUTHORIZATION].to_str().unwrap();
        assert!(authorization.starts_with("AWS4-HMAC-SHA256 Credential="));
        assert_eq!(
            authorization,
            "AWS4-HMAC-SHA256 \
             Credential=AKIDEXAMPLE/20240101/us-east-1/AGCODService/aws4_request, \
             SignedHeaders=accept;content-type;host;x-amz-date;x-amz-target, \
             Signature=5fff905d1982aaa2074e0d3ac84bde9bfe7d09fc65bab0bc7b2706e2e2b7944e"
        );
        assert!(headers[header::AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_signing_is_deterministic() {
        let signer = RequestSigner::new(PayloadEncoding::Xml);
        let (a, trace_a) = signer
            .sign_traced(Operation::CreateGiftCard, &create_params(), &context())
            .expect("must sign");
        let (b, trace_b) = signer
            .sign_traced(Operation::CreateGiftCard, &create_params(), &context())
            .expect("must sign");

        assert_eq!(a.body(), b.body());
        assert_eq!(a.headers(), b.headers());
        assert_eq!(trace_a.canonical_request, trace_b.canonical_request);
        assert_eq!(trace_a.string_to_sign, trace_b.string_to_sign);
        assert_eq!(trace_a.derived_key, trace_b.derived_key);
        assert_eq!(trace_a.signature, trace_b.signature);
    }

    #[test]
    fn test_trace_captures_artifacts_without_secret() {
        let signer = RequestSigner::new(PayloadEncoding::Json);
        let (_, trace) = signer
            .sign_traced(Operation::CreateGiftCard, &create_params(), &context())
            .expect("must sign");

        assert_eq!(
            trace.payload_hash,
            "99ff4fbaf27afec98cf31faa878ee31fcfba365a9c97d803c33f0011eb289f2e"
        );
        assert!(trace.canonical_request.starts_with("POST\n/CreateGiftCard\n\n"));
        assert_eq!(
            trace.derived_key,
            "2015bec452471bc9e4acba809d266063536cae33b254ad031b09ee000ade7dac"
        );
        assert_eq!(
            trace.signature,
            "5fff905d1982aaa2074e0d3ac84bde9bfe7d09fc65bab0bc7b2706e2e2b7944e"
        );
        assert_eq!(
            diagnostics::extract_signature(trace.authorization().unwrap()).unwrap(),
            trace.signature
        );

        let rendered = trace.to_string();
        assert!(rendered.contains("STRING TO SIGN:"));
        assert!(rendered.contains("POST /CreateGiftCard HTTP/1.1"));
        assert!(!rendered.contains("test-secret"));
    }

    #[test]
    fn test_invalid_context_is_rejected() {
        let signer = RequestSigner::new(PayloadEncoding::Json);
        let mut ctx = context();
        ctx.credential.secret_access_key.clear();

        let err = signer
            .sign(Operation::CreateGiftCard, &create_params(), &ctx)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContextInvalid);
    }

    #[test]
    fn test_missing_field_propagates() {
        let signer = RequestSigner::new(PayloadEncoding::Json);
        let mut params = create_params();
        params.amount = None;

        let err = signer
            .sign(Operation::CreateGiftCard, &params, &context())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
    }

    #[test]
    fn test_xml_request_uses_charset_content_type() {
        let signer = RequestSigner::new(PayloadEncoding::Xml);
        let request = signer
            .sign(Operation::CreateGiftCard, &create_params(), &context())
            .expect("must sign");

        assert_eq!(request.headers()["accept"], "charset=UTF-8");
        assert_eq!(request.headers()["content-type"], "charset=UTF-8");
        assert!(std::str::from_utf8(request.body())
            .unwrap()
            .starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    }
}
