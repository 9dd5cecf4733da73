//! # reportscope-core
//!
//! Core library for reportscope - a terminal browser for published report
//! buckets.
//!
//! This library provides:
//! - The report index model (project → date → report names)
//! - A one-shot HTTP loader for the index document
//! - The cascading selection state machine and location derivation
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! Data flows through three stages:
//! - **Loader:** one fetch of the index JSON at startup, never retried
//! - **Selection:** in-memory cascade over the index; choosing a level
//!   clears everything below it
//! - **Derivation:** once project/date/report are all chosen and
//!   consistent, the content location is resolved under the configured
//!   origin and handed to whatever displays it
//!
//! ## Example
//!
//! ```rust
//! use reportscope_core::{ContentOrigin, ReportIndex, Selection};
//!
//! let index = ReportIndex::from_json(
//!     r#"{"proj1": {"2024-01-01": ["a.html", "b.html"]}}"#,
//! ).unwrap();
//!
//! let mut selection = Selection::new(index, ContentOrigin::default());
//! selection.set_project("proj1");
//! selection.set_date("2024-01-01");
//! selection.set_report("b.html").unwrap();
//! assert!(selection.derived_location().ends_with("/proj1/2024-01-01/b.html"));
//! ```

// Re-export commonly used items at the crate root
pub use config::{Config, ContentOrigin, IndexConfig, OriginMode};
pub use error::{Error, Result};
pub use index::ReportIndex;
pub use loader::IndexClient;
pub use selection::Selection;

// Public modules
pub mod config;
pub mod error;
pub mod index;
pub mod loader;
pub mod logging;
pub mod selection;
