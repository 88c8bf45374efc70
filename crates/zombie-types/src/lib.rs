//! Shared types for the zombie writer pipeline

pub mod citation;
pub mod error;
pub mod types;

pub use citation::citation;
pub use error::ZombieError;
pub use types::{Article, HeaderStyle, Paragraph};
