// src/lib.rs
// ============================================================================
// ATOM-TYPES - Sistema de tipos escalares (dtype, finfo/iinfo, bfloat16)
// ============================================================================

pub mod bf16;
pub mod dtype;
pub mod error;
pub mod limits;

// Re-exports principales
pub use bf16::{narrow, widen, Bf16};
pub use dtype::{ByteOrder, DType, DTypeDescriptor, DTypeId, Kind, Registry};
pub use error::{AtomError, Result};
pub use limits::{finfo, float_limits, iinfo, int_limits, limits, FloatInfo, IntInfo, NumericLimits};

/// Busca un dtype por nombre en el registro global
pub fn lookup(name: &str) -> Result<DType> {
    Registry::global().lookup_by_name(name)
}

/// Busca un dtype por índice en el registro global
pub fn lookup_id(index: usize) -> Result<DType> {
    Registry::global().lookup_by_id(index)
}

/// Todos los dtypes en orden de id
pub fn dtypes() -> impl ExactSizeIterator<Item = DType> + Clone {
    Registry::global().all()
}
