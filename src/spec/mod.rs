//! # Spec Source
//!
//! Static, in-memory description of the API the generator replicates: the
//! endpoint list and the ordered field schema of every resource.
//!
//! Field intent is declared once. [`FieldRole::classify`] turns a field name into
//! an explicit role (external id, reference, long text, plain) when the
//! [`ResourceSchema`] is built; every later stage reads that role instead of
//! re-matching names.
mod catalog;
mod types;

pub use catalog::asana_catalog;
pub use types::*;
