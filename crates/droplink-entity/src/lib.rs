//! # droplink-entity
//!
//! Domain entity models for DropLink.

pub mod share;

pub use share::payload::PayloadSource;
pub use share::{CreateShare, FilePayload, Share, ShareStatus};
