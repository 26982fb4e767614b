use async_trait::async_trait;

use super::{custom_field_keys, Pdf4meAction};
use crate::error::Result;
use crate::parameters::ParameterSource;
use crate::payload::OptionalFields;

/// Extracts invoice data (vendor, totals, line items) from a PDF invoice.
pub struct InvoiceParserAction;

impl InvoiceParserAction {
    /// Creates a new instance of the invoice parser action.
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceParserAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pdf4meAction for InvoiceParserAction {
    fn name(&self) -> &'static str {
        "aiInvoiceParser"
    }

    fn description(&self) -> &'static str {
        "Extract structured invoice data from a PDF using pdf4me AI"
    }

    fn similes(&self) -> Vec<&'static str> {
        vec!["parse invoice", "extract invoice", "read invoice", "invoice ocr"]
    }

    fn endpoint(&self) -> &'static str {
        "/api/v2/ProcessInvoice"
    }

    fn default_doc_name(&self) -> &'static str {
        "invoice.pdf"
    }

    fn success_message(&self) -> &'static str {
        "Invoice processed successfully"
    }

    fn optional_fields(
        &self,
        parameters: &dyn ParameterSource,
        item_index: usize,
    ) -> Result<OptionalFields> {
        let mut fields = OptionalFields::new();
        custom_field_keys(parameters, item_index, &mut fields);
        Ok(fields)
    }
}
