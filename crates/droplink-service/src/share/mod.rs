//! Share creation, redemption, and retention.

pub mod code;
pub mod service;
pub mod sweep;

pub use code::CodeGenerator;
pub use service::{CreateShareRequest, CreateShareResponse, FileUpload, RedeemedShare, ShareService};
pub use sweep::RetentionSweeper;
