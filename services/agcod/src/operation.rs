use std::fmt;
use std::str::FromStr;

use giftsign_core::Error;

use crate::constants::{CONTENT_TYPE_JSON, CONTENT_TYPE_XML, TARGET_PREFIX};

/// Remote AGCOD operations this signer supports.
///
/// The operation decides the request URI, the `x-amz-target` value, and which
/// fields of [`crate::RequestParameters`] the payload must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Activate a physical gift card.
    ActivateGiftCard,
    /// Deactivate a previously activated card.
    DeactivateGiftCard,
    /// Check the activation status of a card.
    ActivationStatusCheck,
    /// Create a new gift card claim code.
    CreateGiftCard,
    /// Cancel a previously created claim code.
    CancelGiftCard,
    /// Fetch one page of gift card activity.
    GetGiftCardActivityPage,
}

impl Operation {
    /// Every supported operation, useful for exhaustive tests.
    pub const ALL: [Operation; 6] = [
        Operation::ActivateGiftCard,
        Operation::DeactivateGiftCard,
        Operation::ActivationStatusCheck,
        Operation::CreateGiftCard,
        Operation::CancelGiftCard,
        Operation::GetGiftCardActivityPage,
    ];

    /// The operation name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ActivateGiftCard => "ActivateGiftCard",
            Operation::DeactivateGiftCard => "DeactivateGiftCard",
            Operation::ActivationStatusCheck => "ActivationStatusCheck",
            Operation::CreateGiftCard => "CreateGiftCard",
            Operation::CancelGiftCard => "CancelGiftCard",
            Operation::GetGiftCardActivityPage => "GetGiftCardActivityPage",
        }
    }

    /// Request URI: "/<OperationName>".
    pub fn request_uri(&self) -> String {
        format!("/{}", self.name())
    }

    /// Value of the `x-amz-target` header.
    pub fn target(&self) -> String {
        format!("{}.{}", TARGET_PREFIX, self.name())
    }

    /// Root element name of the payload: "<OperationName>Request".
    pub fn payload_root(&self) -> String {
        format!("{}Request", self.name())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wire format of the request payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    /// XML element tree with an XML declaration.
    Xml,
    /// JSON object without the operation-name wrapper.
    Json,
}

impl PayloadEncoding {
    /// Content type sent in both the canonical request and the wire headers.
    pub fn content_type(&self) -> &'static str {
        match self {
            PayloadEncoding::Xml => CONTENT_TYPE_XML,
            PayloadEncoding::Json => CONTENT_TYPE_JSON,
        }
    }
}

impl FromStr for PayloadEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XML" | "xml" => Ok(PayloadEncoding::Xml),
            "JSON" | "json" => Ok(PayloadEncoding::Json),
            v => Err(Error::unsupported_encoding(format!(
                "payload encoding {v:?} is not supported, expected XML or JSON"
            ))),
        }
    }
}
