use async_trait::async_trait;

use super::Pdf4meAction;

/// Reads member and insurer details from a health insurance card scan.
pub struct HealthCardAction;

impl HealthCardAction {
    /// Creates a new instance of the health card action.
    pub fn new() -> Self {
        Self
    }
}

impl Default for HealthCardAction {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pdf4meAction for HealthCardAction {
    fn name(&self) -> &'static str {
        "aiProcessHealthCard"
    }

    fn description(&self) -> &'static str {
        "Extract member and insurer details from a health card image or PDF"
    }

    fn similes(&self) -> Vec<&'static str> {
        vec!["read health card", "scan insurance card", "extract member id"]
    }

    fn endpoint(&self) -> &'static str {
        "/api/v2/ProcessHealthCard"
    }

    fn default_doc_name(&self) -> &'static str {
        "healthcard.png"
    }

    fn success_message(&self) -> &'static str {
        "Health card processed successfully"
    }

    // Cards usually arrive as photos.
    fn requires_pdf(&self) -> bool {
        false
    }
}
