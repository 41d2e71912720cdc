//! # Tessera Core
//!
//! Packs procedurally generated vertex and index streams into
//! 16-bit-indexable geometry chunks.

pub mod error;
pub mod math;
pub mod mesh;

pub use error::{PackError, PackResult};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version.
pub fn init() {
    log::info!("Tessera Core v{} initialized", VERSION);
}
