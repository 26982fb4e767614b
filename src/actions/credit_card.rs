use async_trait::async_trait;

use super::Pdf4meAction;
use crate::error::Result;
use crate::parameters::ParameterSource;
use crate::payload::OptionalFields;

/// Reads card holder, number and expiry from a credit card image.
pub struct CreditCardAction;

impl CreditCardAction {
    /// Creates a new instance of the credit card action.
    pub fn new() -> Self {
        Self
    }
}

impl Default for CreditCardAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pdf4meAction for CreditCardAction {
    fn name(&self) -> &'static str {
        "aiProcessCreditCard"
    }

    fn description(&self) -> &'static str {
        "Extract card holder, number and expiry date from a credit card image"
    }

    fn similes(&self) -> Vec<&'static str> {
        vec!["read credit card", "scan card", "extract card number"]
    }

    fn endpoint(&self) -> &'static str {
        "/api/v2/ProcessCreditCard"
    }

    fn default_doc_name(&self) -> &'static str {
        "creditcard.png"
    }

    fn success_message(&self) -> &'static str {
        "Credit card processed successfully"
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
        if parameters.get_bool("verifyCardNumber", item_index, false) {
            fields.insert("VerifyCardNumber", "verifyCardNumber", true);
        }
        Ok(fields)
    }
}
