/// API request and response types

use serde::{Deserialize, Serialize};

/// A single alias entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Registered alias
    pub alias: String,
    /// Onion address it resolves to
    pub address: String,
}

/// Alias list response
#[derive(Debug, Serialize, Deserialize)]
pub struct AliasListResponse {
    /// Entries sorted by alias
    pub aliases: Vec<AliasEntry>,
    /// Total number of entries
    pub total: usize,
}

/// Body for PUT /api/aliases/:alias
#[derive(Debug, Serialize, Deserialize)]
pub struct SetAliasRequest {
    pub address: String,
}

/// Result of removing a single alias
#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveAliasResponse {
    pub alias: String,
    /// Whether the alias was present
    pub removed: bool,
}

/// Result of clearing the registry
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearAliasesResponse {
    /// Number of entries dropped
    pub removed: usize,
}

/// Hostname resolution response
#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveResponse {
    /// Host as requested
    pub host: String,
    /// Host after alias rewriting
    pub resolved: String,
    /// Whether an alias matched
    pub aliased: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}
