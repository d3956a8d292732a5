//! Record model and line codec for the LAL credential-list format.
//!
//! This crate provides the record types, the line grammar and the document
//! container used by the `lal` command-line tool.

pub mod codec;
pub mod document;
pub mod error;
pub mod models;

pub use codec::{decode, decode_document, encode, encode_document};
pub use document::Document;
pub use error::{LalError, Result};
pub use models::{Entry, Record};
