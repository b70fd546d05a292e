//! Analysis modules.
//!
//! Score aggregation over the taxonomy and answer-pattern keys.

pub mod aggregator;
pub mod indicator;

pub use aggregator::*;
pub use indicator::answer_indicator;
