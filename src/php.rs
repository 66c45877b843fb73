//! Main module for phpcase functionality
//!
//! Layout
//!
//!     Analyzers:
//!         [reference] is the `token_get_all` style tokenizer, built on logos. [tolerant] holds the
//!         error-recovering lexer and parser whose output is serialized into fixtures. Both sit
//!         behind traits so the inspector never depends on a concrete analyzer.
//!
//!     Core:
//!         [normalization] re-segments reference tokens so each line break is its own token.
//!         [inspect] renders a single file in one of the three inspection modes, and [fixtures]
//!         walks a tree of sources and persists `.tokens` / `.tree` files next to them.
//!
//!     Glue:
//!         [dispatch] maps a command name onto the workflows, [config] loads layered settings and
//!         [error] is the error taxonomy shared by all of the above.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod fixtures;
pub mod inspect;
pub mod normalization;
pub mod reference;
pub mod serialize;
pub mod tolerant;

pub use dispatch::{dispatch, Command};
pub use error::PhpCaseError;
pub use inspect::{Inspector, Mode};
pub use normalization::{normalize, Token};
