//! Reader for the prefix syntax of typed expression trees.
//!
//! Trees render through their [`Display`](std::fmt::Display) implementation in the same syntax
//! this crate reads, so a rendered tree reads back into an equal tree. The exception is a constant
//! of an optional type: the syntax has no way to write one, so it reads back with the type of its
//! value, and `nil` does not read at all.
//!
//! ```
//! use tgp_core::{simplify, types::Type};
//! use tgp_reader::read;
//!
//! let node = read("(+ 0 (* v0 1))", &[Type::Integer]).unwrap();
//! assert_eq!(simplify(&node).to_string(), "v0");
//! ```

pub mod reader;
pub mod tokenizer;

pub use reader::{read, read_type, Reader};
