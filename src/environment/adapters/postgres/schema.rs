//! Diesel schema for keyed document persistence.

diesel::table! {
    /// Keyed JSONB documents grouped by collection.
    registry_documents (collection, document_key) {
        /// Collection the document belongs to.
        #[max_length = 100]
        collection -> Varchar,
        /// Reconciliation key, unique within the collection.
        #[max_length = 64]
        document_key -> Varchar,
        /// Full document body.
        document -> Jsonb,
    }
}
