//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns such
//! as trace identifiers and request spans.

pub mod trace;

pub use trace::Trace;
