//! Version parsing and ordering for release artifacts
//!
//! This module turns loosely structured version strings and artifact file
//! names into comparable values.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Grammar   │────▶│   Parser    │────▶│    Value    │
//! │  (options)  │     │(loose/strict│     │ (order key) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                                         ┌─────────────┐
//!                                         │   Release   │
//!                                         │ (sort, pick)│
//!                                         └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`channel`]: Release channels and their ranking
//! - [`error`]: Error types for the strict grammar and parser construction
//! - [`grammar`]: Grammar options and the regex patterns built from them
//! - [`parser`]: Lenient and strict parsing entry points
//! - [`release`]: Sorting, deduplication and latest-version selection
//! - [`value`]: `VersionValue`, its ordering key and canonical rendering

pub mod channel;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod release;
pub mod value;

pub use channel::Channel;
pub use error::{GrammarError, VersionError};
pub use grammar::GrammarOptions;
pub use parser::VersionParser;
pub use value::{Comparand, Revision, VersionValue};
