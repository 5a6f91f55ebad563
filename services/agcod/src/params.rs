/// Operation parameters supplied by the caller.
///
/// This is a bag of optional fields. Each [`crate::Operation`] mandates its
/// own subset; [`crate::Payload::build`] rejects a missing mandated field and
/// ignores everything else.
#[derive(Debug, Clone, Default)]
pub struct RequestParameters {
    /// Partner identifier, required by every operation.
    pub partner_id: Option<String>,
    /// Idempotency identifier for this request. Serialized under the
    /// operation-specific field name (`activationRequestId`,
    /// `creationRequestId`, `statusCheckRequestId`, or `requestId`).
    pub request_id: Option<String>,
    /// Gift card number, for activation-family operations.
    pub card_number: Option<String>,
    /// Monetary amount, paired with `currency_code`.
    pub amount: Option<i64>,
    /// ISO 4217 currency code, paired with `amount`.
    pub currency_code: Option<String>,
    /// Gift card id, for CancelGiftCard.
    pub gc_id: Option<String>,
    /// Activity window start, "yyyy-MM-ddTHH:mm:ss".
    pub utc_start_date: Option<String>,
    /// Activity window end, "yyyy-MM-ddTHH:mm:ss".
    pub utc_end_date: Option<String>,
    /// Zero-based page index for activity paging.
    pub page_index: Option<i64>,
    /// Page size for activity paging.
    pub page_size: Option<i64>,
    /// Whether no-op activity entries are included in the page.
    pub show_no_ops: Option<bool>,
}
