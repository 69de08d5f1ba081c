//! Diesel row models for keyed document persistence.

use super::schema::registry_documents;
use diesel::prelude::*;
use serde_json::Value;

/// Insert model for keyed documents.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = registry_documents)]
pub struct NewDocumentRow {
    /// Collection the document belongs to.
    pub collection: String,
    /// Reconciliation key.
    pub document_key: String,
    /// Full document body.
    pub document: Value,
}
