use std::fmt::{Debug, Formatter};

use giftsign_core::time::{format_date, format_iso8601, DateTime};
use giftsign_core::utils::Redact;
use giftsign_core::{Error, Result};

use crate::constants::{DEFAULT_HOST, DEFAULT_REGION, DEFAULT_SERVICE};

/// Credential that holds the access key id and secret key.
#[derive(Default, Clone)]
pub struct Credential {
    /// Access key id for the AGCOD service.
    pub access_key_id: String,
    /// Secret access key for the AGCOD service.
    pub secret_access_key: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .finish()
    }
}

/// Everything one signing computation needs besides the operation and its
/// parameters: credential, region, service, host, and the signing time.
///
/// The context is an immutable value created fresh per request; concurrent
/// requests each get their own (in particular their own timestamp, since the
/// remote side enforces a signing-time validity window).
#[derive(Clone)]
pub struct SigningContext {
    /// The signing credential.
    pub credential: Credential,
    /// AWS region name, lowercase.
    pub region: String,
    /// AGCOD service name.
    pub service: String,
    /// Endpoint host the request is addressed to.
    pub host: String,
    /// UTC time this request is signed at.
    pub time: DateTime,
}

impl SigningContext {
    /// Create a context with the default region, service, and host.
    pub fn new(credential: Credential, time: DateTime) -> Self {
        Self {
            credential,
            region: DEFAULT_REGION.to_string(),
            service: DEFAULT_SERVICE.to_string(),
            host: DEFAULT_HOST.to_string(),
            time,
        }
    }

    /// Override the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Override the service name.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Override the endpoint host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Full `x-amz-date` timestamp, `YYYYMMDD'T'HHMMSS'Z'`.
    pub fn timestamp(&self) -> String {
        format_iso8601(self.time)
    }

    /// The 8-digit date-only form used in scope and key derivation.
    pub fn date(&self) -> String {
        format_date(self.time)
    }

    /// Reject a context that cannot produce a verifiable signature.
    ///
    /// Nothing is ever silently defaulted: an empty credential part, region,
    /// service, or host is a construction error the caller must fix.
    pub fn validate(&self) -> Result<()> {
        if self.credential.access_key_id.is_empty() {
            return Err(Error::context_invalid("access key id is empty"));
        }
        if self.credential.secret_access_key.is_empty() {
            return Err(Error::context_invalid("secret access key is empty"));
        }
        if self.region.is_empty() {
            return Err(Error::context_invalid("region is empty"));
        }
        if self.service.is_empty() {
            return Err(Error::context_invalid("service is empty"));
        }
        if self.host.is_empty() {
            return Err(Error::context_invalid("host is empty"));
        }

        Ok(())
    }
}

impl Debug for SigningContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningContext")
            .field("credential", &self.credential)
            .field("region", &self.region)
            .field("service", &self.service)
            .field("host", &self.host)
            .field("time", &self.time)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftsign_core::time::parse_iso8601;
    use giftsign_core::ErrorKind;

    fn context() -> SigningContext {
        SigningContext::new(
            Credential::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"),
            parse_iso8601("20240101T000000Z").unwrap(),
        )
    }

    #[test]
    fn test_defaults() {
        let ctx = context();
        assert_eq!(ctx.region, "us-east-1");
        assert_eq!(ctx.service, "AGCODService");
        assert_eq!(ctx.host, "agcod-v2.amazon.com");
        assert_eq!(ctx.timestamp(), "20240101T000000Z");
        assert_eq!(ctx.date(), "20240101");
        ctx.validate().expect("must be valid");
    }

    #[test]
    fn test_validate_rejects_empty_parts() {
        let cases: Vec<fn(SigningContext) -> SigningContext> = vec![
            |mut c| {
                c.credential.access_key_id.clear();
                c
            },
            |mut c| {
                c.credential.secret_access_key.clear();
                c
            },
            |c| c.with_region(""),
            |c| c.with_service(""),
            |c| c.with_host(""),
        ];

        for broken in cases {
            let err = broken(context()).validate().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ContextInvalid);
        }
    }

    #[test]
    fn test_debug_redacts_credential() {
        let out = format!("{:?}", context());
        assert!(!out.contains("wJalrXUtnFEMI"));
        assert!(out.contains("***"));
    }
}
