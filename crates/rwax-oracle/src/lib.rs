//! Listing oracle: turns "smashed" single-line property listings into scored,
//! compliance-gated asset records ready for publication.

pub mod config;
pub mod error;
pub mod oracle;
pub mod telemetry;
