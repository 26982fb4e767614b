use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::{
    ActionContext, BankChequeAction, ContractAction, CreditCardAction, HealthCardAction,
    InvoiceParserAction, MarriageCertificateAction, MortgageDocumentAction, PayStubAction,
    Pdf4meAction,
};
use crate::error::{Pdf4meError, Result};

/// Operation name to action lookup.
#[derive(Clone, Default)]
pub struct ActionRegistry {
    actions: HashMap<&'static str, Arc<dyn Pdf4meAction>>,
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("operations", &self.names())
            .finish()
    }
}

impl ActionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every document-AI operation.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(InvoiceParserAction::new()));
        registry.register(Arc::new(ContractAction::new()));
        registry.register(Arc::new(HealthCardAction::new()));
        registry.register(Arc::new(MortgageDocumentAction::new()));
        registry.register(Arc::new(BankChequeAction::new()));
        registry.register(Arc::new(CreditCardAction::new()));
        registry.register(Arc::new(PayStubAction::new()));
        registry.register(Arc::new(MarriageCertificateAction::new()));
        registry
    }

    /// Adds `action`, replacing any action already registered under its name.
    pub fn register(&mut self, action: Arc<dyn Pdf4meAction>) {
        self.actions.insert(action.name(), action);
    }

    /// Looks up the action registered as `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Pdf4meAction>> {
        self.actions.get(name).cloned()
    }

    /// Registered operation names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.actions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Registered actions, sorted by name.
    pub fn actions(&self) -> Vec<Arc<dyn Pdf4meAction>> {
        self.names()
            .into_iter()
            .filter_map(|name| self.get(name))
            .collect()
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether no operation is registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Runs the operation called `name` for one item.
    pub async fn execute(&self, name: &str, context: &ActionContext<'_>) -> Result<Value> {
        let action = self
            .get(name)
            .ok_or_else(|| Pdf4meError::UnknownOperation(name.to_string()))?;
        debug!(operation = name, item_index = context.item_index, "executing operation");
        action.execute(context).await
    }
}
