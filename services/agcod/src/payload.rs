use std::borrow::Cow;
use std::io;

use bytes::Bytes;
use giftsign_core::{Error, Result};
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;

use crate::operation::{Operation, PayloadEncoding};
use crate::params::RequestParameters;

/// One value in the payload tree.
///
/// The variant decides serialization: nested objects become child elements
/// (XML) or objects (JSON), booleans always render lowercase, and scalars use
/// their canonical string form. Making this a sum type keeps the
/// object-vs-scalar decision out of runtime type inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A string scalar.
    Str(String),
    /// An integer scalar.
    Int(i64),
    /// A boolean, rendered as `true`/`false`.
    Bool(bool),
    /// A nested field mapping, e.g. the `{currencyCode, amount}` money pair.
    Object(Vec<(&'static str, FieldValue)>),
}

impl FieldValue {
    /// Canonical text form of a scalar; `None` for nested objects.
    fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Str(s) => Some(Cow::Borrowed(s.as_str())),
            FieldValue::Int(i) => Some(Cow::Owned(i.to_string())),
            FieldValue::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            FieldValue::Object(_) => None,
        }
    }
}

/// Payload tree for one operation: a single root named
/// `<OperationName>Request` holding exactly the fields that operation
/// mandates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    root: String,
    fields: Vec<(&'static str, FieldValue)>,
}

/// Serialized payload bytes together with the content type they were
/// serialized under.
///
/// The content type here is the exact string that later appears as the
/// `accept` and `content-type` values in the canonical request; altering it
/// between serialization and canonicalization breaks the signature.
#[derive(Debug, Clone)]
pub struct SerializedPayload {
    /// The payload bytes to send as the request body.
    pub bytes: Bytes,
    /// The content type the payload was serialized under.
    pub content_type: &'static str,
}

impl Payload {
    /// Build the payload tree for `operation` from the caller's parameters.
    ///
    /// Fields the operation does not mandate are ignored; a mandated field
    /// that is absent is a `MissingField` error.
    pub fn build(operation: Operation, params: &RequestParameters) -> Result<Self> {
        let mut fields = Vec::with_capacity(7);
        fields.push((
            "partnerId",
            FieldValue::Str(require(&params.partner_id, "partnerId", operation)?),
        ));

        match operation {
            Operation::ActivateGiftCard => {
                fields.push((
                    "activationRequestId",
                    FieldValue::Str(require(&params.request_id, "activationRequestId", operation)?),
                ));
                fields.push((
                    "cardNumber",
                    FieldValue::Str(require(&params.card_number, "cardNumber", operation)?),
                ));
                fields.push(("value", money(params, operation)?));
            }
            Operation::DeactivateGiftCard => {
                fields.push((
                    "activationRequestId",
                    FieldValue::Str(require(&params.request_id, "activationRequestId", operation)?),
                ));
                fields.push((
                    "cardNumber",
                    FieldValue::Str(require(&params.card_number, "cardNumber", operation)?),
                ));
            }
            Operation::ActivationStatusCheck => {
                fields.push((
                    "statusCheckRequestId",
                    FieldValue::Str(require(
                        &params.request_id,
                        "statusCheckRequestId",
                        operation,
                    )?),
                ));
                fields.push((
                    "cardNumber",
                    FieldValue::Str(require(&params.card_number, "cardNumber", operation)?),
                ));
            }
            Operation::CreateGiftCard => {
                fields.push((
                    "creationRequestId",
                    FieldValue::Str(require(&params.request_id, "creationRequestId", operation)?),
                ));
                fields.push(("value", money(params, operation)?));
            }
            Operation::CancelGiftCard => {
                fields.push((
                    "creationRequestId",
                    FieldValue::Str(require(&params.request_id, "creationRequestId", operation)?),
                ));
                fields.push((
                    "gcId",
                    FieldValue::Str(require(&params.gc_id, "gcId", operation)?),
                ));
            }
            Operation::GetGiftCardActivityPage => {
                fields.push((
                    "requestId",
                    FieldValue::Str(require(&params.request_id, "requestId", operation)?),
                ));
                fields.push((
                    "utcStartDate",
                    FieldValue::Str(require(&params.utc_start_date, "utcStartDate", operation)?),
                ));
                fields.push((
                    "utcEndDate",
                    FieldValue::Str(require(&params.utc_end_date, "utcEndDate", operation)?),
                ));
                fields.push((
                    "pageIndex",
                    FieldValue::Int(require(&params.page_index, "pageIndex", operation)?),
                ));
                fields.push((
                    "pageSize",
                    FieldValue::Int(require(&params.page_size, "pageSize", operation)?),
                ));
                fields.push((
                    "showNoOps",
                    FieldValue::Bool(require(&params.show_no_ops, "showNoOps", operation)?),
                ));
            }
        }

        Ok(Payload {
            root: operation.payload_root(),
            fields,
        })
    }

    /// Name of the single root element, "<OperationName>Request".
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The fields under the root, in serialization order.
    pub fn fields(&self) -> &[(&'static str, FieldValue)] {
        &self.fields
    }

    /// Serialize the tree under the requested encoding.
    pub fn serialize(&self, encoding: PayloadEncoding) -> Result<SerializedPayload> {
        let bytes = match encoding {
            PayloadEncoding::Xml => self.to_xml()?,
            // JSON strips the operation-name wrapper: only the inner field
            // mapping goes on the wire. The wrapper key is carried
            // structurally in `root`, so there is nothing to discover by
            // iterating a map.
            PayloadEncoding::Json => serde_json::to_vec(&fields_to_json(&self.fields))
                .map_err(|e| {
                    Error::unexpected("failed to serialize payload as JSON").with_source(e)
                })?,
        };

        Ok(SerializedPayload {
            bytes: Bytes::from(bytes),
            content_type: encoding.content_type(),
        })
    }

    fn to_xml(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(256);
        let mut writer = Writer::new(&mut buf);

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;
        writer
            .create_element(self.root.as_str())
            .write_inner_content(|w| write_fields(w, &self.fields))
            .map_err(xml_error)?;

        Ok(buf)
    }
}

fn xml_error(e: io::Error) -> Error {
    Error::unexpected("failed to serialize payload as XML").with_source(e)
}

fn write_fields<W: io::Write>(
    writer: &mut Writer<W>,
    fields: &[(&'static str, FieldValue)],
) -> io::Result<()> {
    for (name, value) in fields {
        match value {
            FieldValue::Object(children) => {
                writer
                    .create_element(*name)
                    .write_inner_content(|w| write_fields(w, children))?;
            }
            scalar => {
                let text = scalar.as_text().expect("non-object value has text form");
                writer
                    .create_element(*name)
                    .write_text_content(BytesText::new(&text))?;
            }
        }
    }

    Ok(())
}

fn fields_to_json(fields: &[(&'static str, FieldValue)]) -> serde_json::Value {
    let mut map = serde_json::Map::with_capacity(fields.len());
    for (name, value) in fields {
        let v = match value {
            FieldValue::Str(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::from(*i),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Object(children) => fields_to_json(children),
        };
        map.insert((*name).to_string(), v);
    }

    serde_json::Value::Object(map)
}

fn money(params: &RequestParameters, operation: Operation) -> Result<FieldValue> {
    Ok(FieldValue::Object(vec![
        (
            "currencyCode",
            FieldValue::Str(require(&params.currency_code, "currencyCode", operation)?),
        ),
        (
            "amount",
            FieldValue::Int(require(&params.amount, "amount", operation)?),
        ),
    ]))
}

fn require<T: Clone>(field: &Option<T>, name: &str, operation: Operation) -> Result<T> {
    field
        .clone()
        .ok_or_else(|| Error::missing_field(format!("{name} is required for {operation}")))
}
