//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! MCNP input is free-form enough that most crates end up tidying the same
//! kinds of text: squeezing whitespace out of comments, stripping decorative
//! separators, and tightening `key = value` assignments.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod option_ext;
mod string_ext;

// Flatten
pub use option_ext::OptionExt;
pub use string_ext::StringExt;
