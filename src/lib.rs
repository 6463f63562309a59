//! Labels restaurant menus (regional focus, course count, menu size, dietary
//! coverage, price level) from plain menu text.
//!
//! The analysis itself lives in [`analyzer`] and is a pure function of the
//! text and an optional restaurant name. The other modules get text out of
//! PDFs and web pages, run batches, and write the results.

pub mod acquire;
pub mod analyzer;
pub mod cli;
pub mod error;
pub mod export;
pub mod keywords;
pub mod labels;
pub mod pipeline;
pub mod server;

pub use analyzer::{MenuAnalyzer, MenuItem, Section, analyze};
pub use error::{MenuError, Result};
pub use labels::{Label, MenuLabelRecord};
