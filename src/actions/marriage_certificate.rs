use async_trait::async_trait;

use super::{document_type, Pdf4meAction};
use crate::error::Result;
use crate::parameters::ParameterSource;
use crate::payload::OptionalFields;

/// Extracts spouses, date and place of marriage from a certificate.
pub struct MarriageCertificateAction;

impl MarriageCertificateAction {
    /// Creates a new instance of the marriage certificate action.
    pub fn new() -> Self {
        Self
    }
}

impl Default for MarriageCertificateAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pdf4meAction for MarriageCertificateAction {
    fn name(&self) -> &'static str {
        "aiProcessMarriageCertificate"
    }

    fn description(&self) -> &'static str {
        "Extract spouses, officiant, date and place from a marriage certificate"
    }

    fn similes(&self) -> Vec<&'static str> {
        vec!["read marriage certificate", "extract marriage record"]
    }

    fn endpoint(&self) -> &'static str {
        "/api/v2/ProcessMarriageCertificate"
    }

    fn default_doc_name(&self) -> &'static str {
        "marriage-certificate.pdf"
    }

    fn success_message(&self) -> &'static str {
        "Marriage certificate processed successfully"
    }

    fn optional_fields(
        &self,
        parameters: &dyn ParameterSource,
        item_index: usize,
    ) -> Result<OptionalFields> {
        let mut fields = OptionalFields::new();
        document_type(parameters, item_index, &mut fields);
        Ok(fields)
    }
}
