//! Editing assistance for TLA+ modules.
//!
//! Both features work on a [`DocumentInfo`]: the symbols an outline pass
//! found in a module and the extent of its PlusCal algorithm, if any.

pub mod completion;
mod document;
pub mod navigation;

pub use document::{DocumentInfo, SymbolInfo};
