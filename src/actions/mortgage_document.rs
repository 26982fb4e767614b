use async_trait::async_trait;

use super::{custom_field_keys, document_type, Pdf4meAction};
use crate::error::Result;
use crate::parameters::ParameterSource;
use crate::payload::OptionalFields;

/// Extracts borrower, property and loan terms from mortgage paperwork.
pub struct MortgageDocumentAction;

impl MortgageDocumentAction {
    /// Creates a new instance of the mortgage document action.
    pub fn new() -> Self {
        Self
    }
}

impl Default for MortgageDocumentAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pdf4meAction for MortgageDocumentAction {
    fn name(&self) -> &'static str {
        "aiProcessMortgageDocument"
    }

    fn description(&self) -> &'static str {
        "Extract borrower, property and loan details from a mortgage document"
    }

    fn similes(&self) -> Vec<&'static str> {
        vec!["parse mortgage", "extract loan terms", "read closing disclosure"]
    }

    fn endpoint(&self) -> &'static str {
        "/api/v2/ProcessMortgageDocument"
    }

    fn default_doc_name(&self) -> &'static str {
        "mortgage.pdf"
    }

    fn success_message(&self) -> &'static str {
        "Mortgage document processed successfully"
    }

    fn optional_fields(
        &self,
        parameters: &dyn ParameterSource,
        item_index: usize,
    ) -> Result<OptionalFields> {
        let mut fields = OptionalFields::new();
        document_type(parameters, item_index, &mut fields);
        custom_field_keys(parameters, item_index, &mut fields);
        Ok(fields)
    }
}
