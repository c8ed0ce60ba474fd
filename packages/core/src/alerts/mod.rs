//! Delivery of the rendered summary.

pub mod email;

pub use email::{Delivery, EmailNotifier};
