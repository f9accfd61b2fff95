//! # fn-restrict-ts
//!
//! Tree-sitter based tokenizers for fn-restrict.
//!
//! This crate plugs real grammars into `fn-restrict-core` through its
//! [`Tokenizer`](fn_restrict_core::Tokenizer) extension point:
//!
//! - [`PhpTokenizer`] turns PHP source into the flat token stream the
//!   restriction matcher scans

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod php;

pub use php::PhpTokenizer;
