use async_trait::async_trait;

use super::{custom_field_keys, Pdf4meAction};
use crate::error::Result;
use crate::parameters::ParameterSource;
use crate::payload::OptionalFields;

/// Extracts parties, dates and clauses from a PDF contract.
pub struct ContractAction;

impl ContractAction {
    /// Creates a new instance of the contract action.
    pub fn new() -> Self {
        Self
    }
}

impl Default for ContractAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pdf4meAction for ContractAction {
    fn name(&self) -> &'static str {
        "aiProcessContract"
    }

    fn description(&self) -> &'static str {
        "Extract parties, terms and key dates from a contract using pdf4me AI"
    }

    fn similes(&self) -> Vec<&'static str> {
        vec!["parse contract", "extract contract terms", "analyze agreement"]
    }

    fn endpoint(&self) -> &'static str {
        "/api/v2/ProcessContract"
    }

    fn default_doc_name(&self) -> &'static str {
        "contract.pdf"
    }

    fn success_message(&self) -> &'static str {
        "Contract processed successfully"
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
