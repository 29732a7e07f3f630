//! # droplink-service
//!
//! Business logic for DropLink: code generation, share creation and
//! redemption, and the background retention sweeper.

pub mod share;

pub use share::code::CodeGenerator;
pub use share::service::{
    CreateShareRequest, CreateShareResponse, FileUpload, RedeemedShare, ShareService,
};
pub use share::sweep::RetentionSweeper;
