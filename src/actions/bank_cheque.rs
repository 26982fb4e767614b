use async_trait::async_trait;

use super::{custom_field_keys, Pdf4meAction};
use crate::error::Result;
use crate::parameters::ParameterSource;
use crate::payload::OptionalFields;

/// Reads payee, amount and MICR line from a bank cheque.
pub struct BankChequeAction;

impl BankChequeAction {
    /// Creates a new instance of the bank cheque action.
    pub fn new() -> Self {
        Self
    }
}

impl Default for BankChequeAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pdf4meAction for BankChequeAction {
    fn name(&self) -> &'static str {
        "aiProcessBankCheque"
    }

    fn description(&self) -> &'static str {
        "Extract payee, amount, date and MICR data from a bank cheque"
    }

    fn similes(&self) -> Vec<&'static str> {
        vec!["read cheque", "read check", "extract cheque amount"]
    }

    fn endpoint(&self) -> &'static str {
        "/api/v2/ProcessBankCheque"
    }

    fn default_doc_name(&self) -> &'static str {
        "cheque.png"
    }

    fn success_message(&self) -> &'static str {
        "Bank cheque processed successfully"
    }

    fn requires_pdf(&self) -> bool {
        false
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
