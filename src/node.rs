//! Batch execution of one operation over the host's input items.

use serde_json::json;
use tracing::{info, warn};

use crate::actions::{ActionContext, ActionRegistry};
use crate::client::Pdf4meClient;
use crate::config::Pdf4meConfig;
use crate::error::{Pdf4meError, Result};
use crate::parameters::ParameterSource;
use crate::types::{InputItem, OutputItem};

/// Entry point the host calls with its parameters and input items.
#[derive(Debug, Clone)]
pub struct Pdf4meNode {
    client: Pdf4meClient,
    registry: ActionRegistry,
    continue_on_fail: bool,
}

impl Pdf4meNode {
    /// Creates a node with every operation registered.
    pub fn new(client: Pdf4meClient) -> Self {
        Self {
            client,
            registry: ActionRegistry::with_defaults(),
            continue_on_fail: false,
        }
    }

    /// Builds the client from `config` and takes `continue_on_fail` from it.
    pub fn from_config(config: Pdf4meConfig) -> Result<Self> {
        let continue_on_fail = config.continue_on_fail;
        let client = Pdf4meClient::new(config)?;
        Ok(Self::new(client).with_continue_on_fail(continue_on_fail))
    }

    /// When set, a failing item yields an error record instead of aborting the batch.
    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }

    /// Replaces the operation registry.
    pub fn with_registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Client shared by every operation.
    pub fn client(&self) -> &Pdf4meClient {
        &self.client
    }

    /// Registered operations.
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Whether failing items become error records.
    pub fn continue_on_fail(&self) -> bool {
        self.continue_on_fail
    }

    /// Runs the operation named by the `operation` parameter over `items`.
    pub async fn execute(
        &self,
        parameters: &dyn ParameterSource,
        items: &[InputItem],
    ) -> Result<Vec<OutputItem>> {
        let operation = parameters.get_string("operation", 0, "");
        self.execute_operation(&operation, parameters, items).await
    }

    /// Runs `operation` over `items` one at a time, in order.
    ///
    /// # Errors
    ///
    /// [`Pdf4meError::UnknownOperation`] before any item is touched, or the first
    /// item failure wrapped in [`Pdf4meError::Item`] unless continue-on-fail is set.
    pub async fn execute_operation(
        &self,
        operation: &str,
        parameters: &dyn ParameterSource,
        items: &[InputItem],
    ) -> Result<Vec<OutputItem>> {
        if self.registry.get(operation).is_none() {
            return Err(Pdf4meError::UnknownOperation(operation.to_string()));
        }

        let mut outputs = Vec::with_capacity(items.len());
        for (item_index, item) in items.iter().enumerate() {
            let context = ActionContext {
                client: &self.client,
                parameters,
                item,
                item_index,
            };

            match self.registry.execute(operation, &context).await {
                Ok(json) => outputs.push(OutputItem {
                    json,
                    paired_item: item_index,
                }),
                Err(e) if self.continue_on_fail => {
                    warn!(operation, item_index, code = %e.code(), "item failed: {}", e);
                    outputs.push(OutputItem {
                        json: error_record(&e, item),
                        paired_item: item_index,
                    });
                }
                Err(e) => return Err(Pdf4meError::item(item_index, e)),
            }
        }

        info!(operation, items = outputs.len(), "batch finished");
        Ok(outputs)
    }
}

fn error_record(error: &Pdf4meError, item: &InputItem) -> serde_json::Value {
    json!({
        "error": error.to_string(),
        "errorCode": error.code().to_string(),
        "input": item.json,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::actions::tests::{binary_item, client, PDF_BYTES};
    use crate::error::Pdf4meErrorCode;
    use crate::parameters::StaticParameters;
    use crate::test_utils::ScriptedTransport;
    use crate::transport::HttpResponse;

    fn items() -> Vec<InputItem> {
        let mut good = binary_item(PDF_BYTES, "a.pdf");
        good.json = json!({"id": 1});
        let mut bad = binary_item(b"not a pdf", "b.txt");
        bad.json = json!({"id": 2});
        vec![good, bad]
    }

    #[tokio::test]
    async fn test_unknown_operation_touches_nothing() {
        let transport = Arc::new(ScriptedTransport::new());
        let node = Pdf4meNode::new(client(&transport));
        let params = StaticParameters::new().with("operation", "aiTranslate");

        let err = node.execute(&params, &items()).await.unwrap_err();

        assert_eq!(err.code(), Pdf4meErrorCode::UnknownOperation);
        assert!(transport.posts().is_empty());
    }

    #[tokio::test]
    async fn test_failure_aborts_batch() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_post(HttpResponse::new(200, r#"{"total":"9.99"}"#));
        let node = Pdf4meNode::new(client(&transport));
        let params = StaticParameters::new().with("operation", "aiInvoiceParser");

        let err = node.execute(&params, &items()).await.unwrap_err();

        assert!(matches!(err, Pdf4meError::Item { index: 1, .. }));
        assert_eq!(err.code(), Pdf4meErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_continue_on_fail_emits_error_record() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_post(HttpResponse::new(200, r#"{"total":"9.99"}"#));
        let node = Pdf4meNode::new(client(&transport)).with_continue_on_fail(true);
        let params = StaticParameters::new().with("operation", "aiInvoiceParser");

        let outputs = node.execute(&params, &items()).await.unwrap();

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].paired_item, 0);
        assert_eq!(outputs[0].json["total"], json!("9.99"));
        assert_eq!(outputs[1].paired_item, 1);
        assert_eq!(outputs[1].json["errorCode"], json!("VALIDATION_ERROR"));
        assert_eq!(outputs[1].json["input"], json!({"id": 2}));
        assert!(outputs[1].json["error"].as_str().unwrap().contains("PDF"));
        assert_eq!(transport.posts().len(), 1);
    }

    #[tokio::test]
    async fn test_outputs_keep_item_order() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.push_post(HttpResponse::new(200, r#"{"n":1}"#));
        transport.push_post(HttpResponse::new(200, r#"{"n":2}"#));
        let node = Pdf4meNode::new(client(&transport));
        let params = StaticParameters::new()
            .with("docName", "first.pdf")
            .with_item(1, "docName", "second.pdf");
        let batch = vec![
            binary_item(PDF_BYTES, "a.pdf"),
            binary_item(PDF_BYTES, "b.pdf"),
        ];

        let outputs = node
            .execute_operation("aiProcessContract", &params, &batch)
            .await
            .unwrap();

        assert_eq!(outputs[0].json["n"], json!(1));
        assert_eq!(outputs[1].json["n"], json!(2));
        let posts = transport.posts();
        assert_eq!(posts[0].1["docName"], json!("first.pdf"));
        assert_eq!(posts[1].1["docName"], json!("second.pdf"));
    }
}
