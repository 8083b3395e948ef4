//! Resilient DNS Infrastructure Layer
pub mod dns;
pub mod probe;
pub mod repositories;
