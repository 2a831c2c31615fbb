//! # Schema Analyzer
//!
//! Derives two independent views from the API description's field mappings:
//!
//! - a relational schema ([`DbSchema`]): tables, ordered columns, nullability,
//!   defaults and foreign keys, used by the code and deployment emitters;
//! - an OpenAPI 3.0 document ([`generate_openapi`]), written as `api.yml`.
//!
//! Type mapping is permissive: an unknown type tag becomes a bounded varchar
//! column and a `string` API property rather than an error.

mod columns;
mod openapi;

pub use columns::*;
pub use openapi::*;
