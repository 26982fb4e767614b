#![allow(missing_docs)]

use crate::error::Result;
use crate::node::Pdf4meNode;

pub const PDF4ME_SERVICE_TYPE: &str = "pdf4me";

/// Long-lived holder of the configured node.
pub struct Pdf4meService {
    node: Pdf4meNode,
}

impl Pdf4meService {
    pub const SERVICE_TYPE: &'static str = PDF4ME_SERVICE_TYPE;
    pub const CAPABILITY_DESCRIPTION: &'static str =
        "Document AI extraction through the pdf4me API";

    pub fn new(node: Pdf4meNode) -> Self {
        Self { node }
    }

    pub fn from_env() -> Result<Self> {
        let node = crate::create_node_from_env()?;
        Ok(Self::new(node))
    }

    #[must_use]
    pub fn node(&self) -> &Pdf4meNode {
        &self.node
    }

    pub async fn stop(&mut self) -> Result<()> {
        Ok(())
    }
}
