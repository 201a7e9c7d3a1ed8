//! `mcnpkit` is a modular toolkit for working with MCNP input decks
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use mcnpkit_utils as utils;

#[cfg(feature = "input")]
#[cfg_attr(docsrs, doc(cfg(feature = "input")))]
#[doc(inline)]
pub use mcnpkit_input as input;
