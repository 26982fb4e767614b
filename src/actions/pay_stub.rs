use async_trait::async_trait;

use super::{custom_field_keys, Pdf4meAction};
use crate::error::Result;
use crate::parameters::ParameterSource;
use crate::payload::OptionalFields;

/// Extracts employer, pay period, earnings and deductions from a pay stub.
pub struct PayStubAction;

impl PayStubAction {
    /// Creates a new instance of the pay stub action.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PayStubAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pdf4meAction for PayStubAction {
    fn name(&self) -> &'static str {
        "aiProcessPayStub"
    }

    fn description(&self) -> &'static str {
        "Extract employer, pay period, earnings and deductions from a pay stub"
    }

    fn similes(&self) -> Vec<&'static str> {
        vec!["parse pay stub", "read payslip", "extract salary"]
    }

    fn endpoint(&self) -> &'static str {
        "/api/v2/ProcessPayStub"
    }

    fn default_doc_name(&self) -> &'static str {
        "paystub.pdf"
    }

    fn success_message(&self) -> &'static str {
        "Pay stub processed successfully"
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
