//! Share domain entities.

pub mod model;
pub mod payload;

pub use model::{CreateShare, Share, ShareStatus};
pub use payload::{FilePayload, PayloadSource};
