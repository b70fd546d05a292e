//! Pre-authored summary texts.

pub mod store;

pub use store::SummaryStore;
