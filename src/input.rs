#![allow(missing_docs)]
//! Document input modes, normalization and validation.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use regex::Regex;
use tracing::debug;

use crate::client::Pdf4meClient;
use crate::error::{Pdf4meError, Result};
use crate::parameters::ParameterSource;
use crate::types::InputItem;

/// Base64 encoding of `%PDF-1`, the start of every PDF 1.x file.
pub const PDF_HEADER_BASE64: &str = "JVBERi0x";

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn data_uri_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| {
        Regex::new(r"(?i)^data:[^;,]*;base64,").expect("data URI pattern is valid")
    })
}

/// How an operation receives its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Binary attachment on the input item.
    BinaryData,
    /// Inline base64 string, optionally a data URI.
    Base64,
    /// Remote file fetched over HTTP.
    Url,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::BinaryData => "binaryData",
            InputMode::Base64 => "base64",
            InputMode::Url => "url",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = Pdf4meError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "binaryData" => Ok(InputMode::BinaryData),
            "base64" => Ok(InputMode::Base64),
            "url" => Ok(InputMode::Url),
            other => Err(Pdf4meError::validation(
                "inputDataType",
                format!("unsupported input data type: {}", other),
            )),
        }
    }
}

/// A document before it has been turned into base64.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Binary {
        data: Vec<u8>,
        file_name: Option<String>,
    },
    Base64 {
        content: String,
    },
    Url {
        url: String,
    },
}

/// Base64 content ready to be sent, plus the file name it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDocument {
    pub content: String,
    pub file_name: Option<String>,
}

/// Strips a `data:<mime>;base64,` prefix and all whitespace. Idempotent.
pub fn normalize_base64(content: &str) -> String {
    let trimmed = content.trim();
    let without_prefix = data_uri_prefix().replace(trimmed, "");
    without_prefix
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Rejects empty or undecodable base64 content.
pub fn validate_content(content: &str) -> Result<()> {
    if content.is_empty() {
        return Err(Pdf4meError::validation("docContent", "document content is empty"));
    }
    LENIENT.decode(content).map_err(|e| {
        Pdf4meError::validation("docContent", format!("invalid base64 content: {}", e))
    })?;
    Ok(())
}

/// Requires base64 content to start with an encoded `%PDF-1` header.
pub fn validate_pdf_header(content: &str) -> Result<()> {
    if content.starts_with(PDF_HEADER_BASE64) {
        Ok(())
    } else {
        Err(Pdf4meError::validation(
            "docContent",
            "content is not a PDF document (missing %PDF-1 header)",
        ))
    }
}

fn file_name_from_url(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()?
        .path_segments()?
        .next_back()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Turns any [`DocumentSource`] into normalized base64 content.
pub async fn resolve_document(
    source: DocumentSource,
    client: &Pdf4meClient,
) -> Result<ResolvedDocument> {
    match source {
        DocumentSource::Binary { data, file_name } => Ok(ResolvedDocument {
            content: STANDARD.encode(data),
            file_name,
        }),
        DocumentSource::Base64 { content } => Ok(ResolvedDocument {
            content: normalize_base64(&content),
            file_name: None,
        }),
        DocumentSource::Url { url } => {
            let bytes = client.download(&url).await?;
            debug!(%url, size = bytes.len(), "downloaded document");
            Ok(ResolvedDocument {
                content: STANDARD.encode(bytes),
                file_name: file_name_from_url(&url),
            })
        }
    }
}

/// Reads the input mode parameters for one host item.
///
/// Parameters: `inputDataType` (`binaryData`, `base64` or `url`), then
/// `binaryPropertyName`, `base64Content` or `fileUrl` respectively.
pub fn document_source_for_item(
    parameters: &dyn ParameterSource,
    item: &InputItem,
    item_index: usize,
) -> Result<DocumentSource> {
    let mode: InputMode = parameters
        .get_string("inputDataType", item_index, InputMode::BinaryData.as_str())
        .parse()?;

    match mode {
        InputMode::BinaryData => {
            let property = parameters.get_string("binaryPropertyName", item_index, "data");
            let binary = item.binary.get(&property).ok_or_else(|| {
                Pdf4meError::validation(
                    "binaryPropertyName",
                    format!("no binary data found in property '{}'", property),
                )
            })?;
            Ok(DocumentSource::Binary {
                data: binary.data.clone(),
                file_name: binary.file_name.clone(),
            })
        }
        InputMode::Base64 => {
            let content = parameters.get_string("base64Content", item_index, "");
            if content.trim().is_empty() {
                return Err(Pdf4meError::validation(
                    "base64Content",
                    "base64 content is required",
                ));
            }
            Ok(DocumentSource::Base64 { content })
        }
        InputMode::Url => {
            let url = parameters.get_string("fileUrl", item_index, "");
            if url.trim().is_empty() {
                return Err(Pdf4meError::validation("fileUrl", "file URL is required"));
            }
            Ok(DocumentSource::Url {
                url: url.trim().to_string(),
            })
        }
    }
}
