use async_trait::async_trait;
use serde_json::json;

use super::{Pdf4meProvider, ProviderContext, ProviderResult};
use crate::actions::ActionRegistry;

/// Lists the document-AI operations the plugin can run.
pub struct Pdf4meCapabilitiesProvider {
    registry: ActionRegistry,
}

impl Pdf4meCapabilitiesProvider {
    /// Creates a provider describing `registry`.
    pub fn new(registry: ActionRegistry) -> Self {
        Self { registry }
    }
}

impl Default for Pdf4meCapabilitiesProvider {
    fn default() -> Self {
        Self::new(ActionRegistry::with_defaults())
    }
}

#[async_trait]
impl Pdf4meProvider for Pdf4meCapabilitiesProvider {
    fn name(&self) -> &'static str {
        "pdf4me_capabilities"
    }

    fn description(&self) -> &'static str {
        "Provides the list of pdf4me document-AI operations"
    }

    async fn get(&self, context: &ProviderContext) -> ProviderResult {
        let has_api_key = context
            .state
            .get("hasApiKey")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let operations: Vec<_> = self
            .registry
            .actions()
            .iter()
            .map(|action| {
                json!({
                    "name": action.name(),
                    "description": action.description(),
                    "pdfOnly": action.requires_pdf(),
                })
            })
            .collect();

        let text = if has_api_key {
            format!(
                "pdf4me document AI is available with {} operations: {}",
                operations.len(),
                self.registry.names().join(", ")
            )
        } else {
            "pdf4me document AI is available but requires PDF4ME_API_KEY".to_string()
        };

        ProviderResult {
            text,
            data: Some(json!({
                "serviceAvailable": true,
                "configured": has_api_key,
                "inputDataTypes": ["binaryData", "base64", "url"],
                "operations": operations,
            })),
        }
    }
}
