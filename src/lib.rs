//! Deterministic keyword context selection for deep-analysis reports.
//!
//! `audit-context` cuts pasted records into fixed-size chunks, scores each
//! chunk by keyword containment against the user's query, and joins the best
//! few into the context block that precedes the directive sent to a remote
//! generation service. Selection is pure: identical `(query, text)` inputs
//! always produce identical output, byte-for-byte.
//!
//! ```
//! let context = audit_context::select_context("quarterly revenue", "Revenue rose 4% in Q3.");
//! assert_eq!(context, "Revenue rose 4% in Q3.");
//! ```

pub mod config;
pub mod document;
pub mod generation;
pub mod selection;
pub mod types;

pub use document::segment;
pub use selection::select_context;
