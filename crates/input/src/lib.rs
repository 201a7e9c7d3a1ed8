//! Module for parsing and validating MCNP input decks
//!
//! An input deck is read in full, split into its blocks, normalised, and every
//! card is handed to the grammar for its card family. The result is an
//! [McnpInput] model together with an [ErrorCollection] of everything that
//! was wrong with it.
//!
//! | Stage                     | Description                                          |
//! | ------------------------- | ---------------------------------------------------- |
//! | [preprocess]              | blocks, continuations, comments, repeat shorthand    |
//! | [parsers]                 | one grammar per card family, table driven dispatch   |
//! | [McnpInput]               | entities by id with a query interface                |
//! | [Validator]               | cross-reference and vocabulary checks                |
//!
//! Only a deck without its blank line separators fails outright. Everything
//! else is reported through the [ErrorCollection] while as much of the model
//! as possible is kept.
//!
//! # Quickstart example
//!
//! ```rust
//! # use mcnpkit_input::parse_input;
//! let text = "\
//! Example deck
//! 1 1 -7.8 -1 imp:n=1
//! 2 0 1 imp:n=0
//!
//! 1 so 10
//!
//! m1 26056 1.0
//! f4:n 1
//! ";
//!
//! let snapshot = parse_input(text).unwrap();
//! assert_eq!(snapshot.input.title, "Example deck");
//! assert_eq!(snapshot.input.cells.len(), 2);
//! assert!(snapshot.errors.is_empty());
//! ```
#![doc = include_str!("../readme.md")]

mod core;
mod diagnostic;
mod document;
mod error;
mod input;
pub mod parsers;
mod reader;
mod validate;
mod vocabulary;

// flatten public API and inline the documentation
#[doc(inline)]
pub use crate::core::*;

#[doc(inline)]
pub use diagnostic::{ErrorCode, ErrorCollection, ErrorEntry};

#[doc(inline)]
pub use document::Document;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use input::{
    parse_input, parse_input_with, read_input, read_input_with, Item, ItemKind, McnpInput,
    Snapshot,
};

#[doc(inline)]
pub use reader::{preprocess, Deck, Line};

#[doc(inline)]
pub use validate::Validator;

#[doc(inline)]
pub use vocabulary::{ParticleInfo, Snippet, Vocabulary};
