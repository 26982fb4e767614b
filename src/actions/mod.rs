mod bank_cheque;
mod contract;
mod credit_card;
mod health_card;
mod invoice;
mod marriage_certificate;
mod mortgage_document;
mod pay_stub;
mod registry;

pub use bank_cheque::BankChequeAction;
pub use contract::ContractAction;
pub use credit_card::CreditCardAction;
pub use health_card::HealthCardAction;
pub use invoice::InvoiceParserAction;
pub use marriage_certificate::MarriageCertificateAction;
pub use mortgage_document::MortgageDocumentAction;
pub use pay_stub::PayStubAction;
pub use registry::ActionRegistry;

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::client::Pdf4meClient;
use crate::error::Result;
use crate::input::{
    document_source_for_item, resolve_document, validate_content, validate_pdf_header,
};
use crate::parameters::ParameterSource;
use crate::payload::{
    attach_metadata, parse_result, DocumentRequest, OptionalFields, ResultMetadata,
};
use crate::types::InputItem;

/// Everything an action needs to process one host item.
#[derive(Clone, Copy)]
pub struct ActionContext<'a> {
    /// Client used for downloads and the pdf4me request.
    pub client: &'a Pdf4meClient,
    /// Host parameter resolution.
    pub parameters: &'a dyn ParameterSource,
    /// The item being processed.
    pub item: &'a InputItem,
    /// Position of the item in the host batch.
    pub item_index: usize,
}

/// A pdf4me document-AI operation.
#[async_trait]
pub trait Pdf4meAction: Send + Sync {
    /// Operation identifier selected by the host (e.g. `aiInvoiceParser`).
    fn name(&self) -> &'static str;
    /// Returns a human-readable description of what this action does.
    fn description(&self) -> &'static str;
    /// Returns alternative phrases that can trigger this action.
    fn similes(&self) -> Vec<&'static str>;
    /// pdf4me endpoint path.
    fn endpoint(&self) -> &'static str;
    /// Document name used when the host supplies none.
    fn default_doc_name(&self) -> &'static str;
    /// Message placed in `_metadata.message` on success.
    fn success_message(&self) -> &'static str;

    /// Whether the content must be a PDF.
    fn requires_pdf(&self) -> bool {
        true
    }

    /// Document-type specific fields read from the host parameters.
    fn optional_fields(
        &self,
        _parameters: &dyn ParameterSource,
        _item_index: usize,
    ) -> Result<OptionalFields> {
        Ok(OptionalFields::new())
    }

    /// Runs the operation for one item and returns the result with `_metadata`.
    async fn execute(&self, context: &ActionContext<'_>) -> Result<Value> {
        run_document_action(self, context).await
    }
}

/// Shared pipeline: resolve input, validate, submit, parse, tag with metadata.
pub async fn run_document_action<A>(action: &A, context: &ActionContext<'_>) -> Result<Value>
where
    A: Pdf4meAction + ?Sized,
{
    let ActionContext {
        client,
        parameters,
        item,
        item_index,
    } = *context;

    let source = document_source_for_item(parameters, item, item_index)?;
    let document = resolve_document(source, client).await?;
    validate_content(&document.content)?;
    if action.requires_pdf() {
        validate_pdf_header(&document.content)?;
    }

    let requested_name = parameters.get_string("docName", item_index, "");
    let doc_name = Some(requested_name.trim().to_string())
        .filter(|name| !name.is_empty())
        .or_else(|| document.file_name.clone())
        .unwrap_or_else(|| action.default_doc_name().to_string());
    let source_file_name = document.file_name.clone().unwrap_or_else(|| doc_name.clone());

    let optional = action.optional_fields(parameters, item_index)?;
    let request = DocumentRequest::new(doc_name, document.content, &optional);

    let completed = client.async_request(action.endpoint(), &request).await?;
    info!(
        operation = action.name(),
        item_index,
        polls = completed.polls,
        "pdf4me document processed"
    );

    let result = parse_result(&completed.body)?;
    let metadata = ResultMetadata::new(
        action.name(),
        action.success_message(),
        source_file_name,
        client.clock().utc_now(),
    )
    .with_fields(optional.metadata_fields());

    attach_metadata(result, &metadata)
}

/// Reads `customFieldKeys` into `CustomFieldKeys` when any are given.
pub(crate) fn custom_field_keys(
    parameters: &dyn ParameterSource,
    item_index: usize,
    fields: &mut OptionalFields,
) {
    let keys = parameters.get_string_list("customFieldKeys", item_index);
    if !keys.is_empty() {
        fields.insert("CustomFieldKeys", "customFieldKeys", keys);
    }
}

/// Reads the `documentType` hint into `DocumentType` when set.
pub(crate) fn document_type(
    parameters: &dyn ParameterSource,
    item_index: usize,
    fields: &mut OptionalFields,
) {
    let hint = parameters.get_string("documentType", item_index, "");
    let hint = hint.trim();
    if !hint.is_empty() {
        fields.insert("DocumentType", "documentType", hint);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde_json::json;

    use super::*;
    use crate::clock::ManualClock;
    use crate::config::PollPolicy;
    use crate::error::Pdf4meError;
    use crate::parameters::StaticParameters;
    use crate::test_utils::ScriptedTransport;
    use crate::transport::HttpResponse;
    use crate::types::BinaryData;

    pub(crate) const PDF_BYTES: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n";
    pub(crate) const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    pub(crate) fn client(transport: &Arc<ScriptedTransport>) -> Pdf4meClient {
        Pdf4meClient::with_parts(
            transport.clone(),
            Arc::new(ManualClock::new()),
            PollPolicy::new(Duration::from_secs(1), Duration::from_secs(10)),
        )
    }

    pub(crate) fn binary_item(bytes: &[u8], file_name: &str) -> InputItem {
        InputItem::from_json(json!({})).with_binary("data", BinaryData::new(bytes, file_name))
    }

    /// Runs `action` against a synchronous answer; returns the submitted payload and the result.
    pub(crate) async fn submitted_payload(
        action: &dyn Pdf4meAction,
        parameters: &StaticParameters,
        item: &InputItem,
    ) -> (Value, Value) {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_post(HttpResponse::new(200, r#"{"ok":true}"#));
        let client = client(&transport);
        let context = ActionContext {
            client: &client,
            parameters,
            item,
            item_index: 0,
        };

        let result = action.execute(&context).await.unwrap();
        let (path, payload) = transport.posts().remove(0);
        assert_eq!(path, action.endpoint());
        (payload, result)
    }

    #[tokio::test]
    async fn test_doc_name_falls_back_to_binary_file_name() {
        let params = StaticParameters::new();
        let item = binary_item(PDF_BYTES, "scan-0042.pdf");

        let (payload, result) = submitted_payload(&InvoiceParserAction, &params, &item).await;

        assert_eq!(payload["docName"], json!("scan-0042.pdf"));
        assert_eq!(payload["docContent"], json!(STANDARD.encode(PDF_BYTES)));
        assert_eq!(payload["IsAsync"], json!(true));
        assert_eq!(result["_metadata"]["sourceFileName"], json!("scan-0042.pdf"));
    }

    #[tokio::test]
    async fn test_explicit_doc_name_wins() {
        let params = StaticParameters::new().with("docName", "renamed.pdf");
        let item = binary_item(PDF_BYTES, "scan.pdf");

        let (payload, result) = submitted_payload(&ContractAction, &params, &item).await;

        assert_eq!(payload["docName"], json!("renamed.pdf"));
        assert_eq!(result["_metadata"]["sourceFileName"], json!("scan.pdf"));
    }

    #[tokio::test]
    async fn test_default_doc_name_for_base64_input() {
        let params = StaticParameters::new()
            .with("inputDataType", "base64")
            .with("base64Content", STANDARD.encode(PDF_BYTES));

        let (payload, result) =
            submitted_payload(&PayStubAction, &params, &InputItem::default()).await;

        assert_eq!(payload["docName"], json!("paystub.pdf"));
        assert_eq!(result["_metadata"]["sourceFileName"], json!("paystub.pdf"));
    }

    #[tokio::test]
    async fn test_non_pdf_rejected_before_request() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = client(&transport);
        let params = StaticParameters::new()
            .with("inputDataType", "base64")
            .with("base64Content", "bm90YXBkZg==");
        let item = InputItem::default();
        let context = ActionContext {
            client: &client,
            parameters: &params,
            item: &item,
            item_index: 0,
        };

        let err = InvoiceParserAction.execute(&context).await.unwrap_err();

        assert!(matches!(err, Pdf4meError::Validation { .. }));
        assert!(transport.posts().is_empty());
    }

    #[tokio::test]
    async fn test_empty_binary_rejected_before_request() {
        let transport = Arc::new(ScriptedTransport::new());
        let client = client(&transport);
        let params = StaticParameters::new();
        let item = binary_item(b"", "empty.png");
        let context = ActionContext {
            client: &client,
            parameters: &params,
            item: &item,
            item_index: 0,
        };

        let err = HealthCardAction.execute(&context).await.unwrap_err();

        assert!(matches!(err, Pdf4meError::Validation { .. }));
        assert!(transport.posts().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json_result_is_parse_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_post(HttpResponse::new(200, "<html>gateway</html>"));
        let client = client(&transport);
        let params = StaticParameters::new();
        let item = binary_item(PDF_BYTES, "a.pdf");
        let context = ActionContext {
            client: &client,
            parameters: &params,
            item: &item,
            item_index: 0,
        };

        let err = InvoiceParserAction.execute(&context).await.unwrap_err();

        assert!(matches!(err, Pdf4meError::Parse(_)));
    }
}
