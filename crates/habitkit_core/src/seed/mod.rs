//! Bulk import of habit definitions from seed documents.
//!
//! # Responsibility
//! - Merge a JSON habit list into the store without duplicating names.
//! - Keep all staged inserts inside one transaction.
//!
//! # Invariants
//! - Re-running the importer on the same file creates nothing new.
//! - Per-entry problems are absorbed; a broken document is fatal.

pub mod importer;
