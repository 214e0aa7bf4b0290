//! Error types for discovery-document construction and parsing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Relation type '{relation_type}' resolves to both a direct and a templated link")]
    IncompatibleLinkKind { relation_type: String },

    #[error("Relation type '{relation_type}' maps to conflicting hrefs '{existing}' and '{conflicting}'")]
    ConflictingHref {
        relation_type: String,
        existing: String,
        conflicting: String,
    },

    #[error("Malformed discovery document: {0}")]
    MalformedDocument(String),

    #[error("Unknown {expected} token '{token}'")]
    UnknownEnumValue {
        expected: &'static str,
        token: String,
    },

    #[error("Invalid candidate: {0}")]
    InvalidCandidate(String),

    #[error("Failed to load document from {source_name}: {reason}")]
    Load { source_name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
