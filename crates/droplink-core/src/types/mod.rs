//! Domain value types shared across crates.

pub mod code;

pub use code::ShareCode;
