//! Shortage Summary Module
//!
//! Queries every tracked key once, classifies each outcome as active or
//! resolved and renders the weekly plain-text report.

pub mod generator;
pub mod provider;
pub mod types;


pub use generator::generate_summary;
pub use provider::ShortageSource;
pub use types::*;
