//! pdf4me document-AI plugin for elizaOS.
//!
//! This crate exposes pdf4me's document-AI extraction operations (invoices,
//! contracts, health cards, mortgage documents, bank cheques, credit cards,
//! pay stubs and marriage certificates) as plugin actions. Every operation goes
//! through a shared client that submits the document and, when pdf4me answers
//! `202 Accepted`, polls the returned location until the result is ready or the
//! configured deadline passes.

#![warn(missing_docs)]
#![deny(unsafe_code)]

/// Document-AI actions and the operation registry.
pub mod actions;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod node;
pub mod parameters;
pub mod payload;
/// Providers describing the plugin's capabilities.
pub mod providers;
pub mod service;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use client::{CompletedRequest, Pdf4meClient};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Pdf4meConfig, PollPolicy, DEFAULT_BASE_URL};
pub use error::{Pdf4meError, Pdf4meErrorCode, Result};
pub use input::{DocumentSource, InputMode, ResolvedDocument, PDF_HEADER_BASE64};
pub use node::Pdf4meNode;
pub use parameters::{ParameterSource, StaticParameters};
pub use payload::{DocumentRequest, OptionalFields, ResultMetadata};
pub use service::{Pdf4meService, PDF4ME_SERVICE_TYPE};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
pub use types::{BinaryData, InputItem, OutputItem};

pub use actions::{
    ActionContext, ActionRegistry, BankChequeAction, ContractAction, CreditCardAction,
    HealthCardAction, InvoiceParserAction, MarriageCertificateAction, MortgageDocumentAction,
    PayStubAction, Pdf4meAction,
};

pub use providers::{Pdf4meCapabilitiesProvider, Pdf4meProvider, ProviderContext, ProviderResult};

/// Creates a new pdf4me client using configuration from environment variables.
///
/// # Errors
///
/// Returns an error if `PDF4ME_API_KEY` is missing or the configuration is invalid.
pub fn create_client_from_env() -> Result<Pdf4meClient> {
    let config = Pdf4meConfig::from_env()?;
    Pdf4meClient::new(config)
}

/// Creates a node with every operation registered, configured from the environment.
///
/// # Errors
///
/// Returns an error if `PDF4ME_API_KEY` is missing or the configuration is invalid.
pub fn create_node_from_env() -> Result<Pdf4meNode> {
    Pdf4meNode::from_config(Pdf4meConfig::from_env()?)
}

/// The name identifier for the pdf4me plugin.
pub const PLUGIN_NAME: &str = "pdf4me";

/// A human-readable description of the pdf4me plugin's purpose.
pub const PLUGIN_DESCRIPTION: &str = "Document AI extraction for elizaOS through pdf4me";

/// The current version of the pdf4me plugin, derived from Cargo.toml.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");
