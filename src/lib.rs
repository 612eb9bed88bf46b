//! Colfer code generator in Rust
//!
//! Takes a validated schema (packages of structs with ordered, typed
//! fields) and writes one Go source file per package with the marshal
//! and unmarshal routines for the Colfer wire encoding.

/// Package file emission
pub mod generate;
/// Schema data model and decoration
pub mod schema;
/// Generated-code fragments
mod templates;

pub use self::generate::{Error, generate};
pub use self::schema::{Field, Package, Struct, StructRef, Type, decorate};
