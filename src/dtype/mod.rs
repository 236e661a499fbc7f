// src/dtype/mod.rs
// ============================================================================
// DTYPE - Sistema de tipos escalares Atom
// ============================================================================

pub mod registry;
pub mod types;

// Re-exports
pub use registry::Registry;
pub use types::{ByteOrder, DType, DTypeDescriptor, DTypeId, Kind};
