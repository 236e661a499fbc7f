// src/error.rs
// ============================================================================
// ERRORES - Tipos de error del sistema de tipos Atom
// ============================================================================
//
// Cuatro errores del núcleo (registro + límites) y dos de la capa de
// conversión en bloque. Todos son recuperables y se distinguen por variante.
//
// ============================================================================

use thiserror::Error;

use crate::dtype::{ByteOrder, Kind};

/// Errores devueltos por `atom-types`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtomError {
    /// Identificador fuera del catálogo
    #[error("dtype id {index} out of range (catalog has {count} types)")]
    OutOfRange { index: usize, count: usize },

    /// Ningún descriptor con ese nombre
    #[error("'{0}' is not a valid Atom data type")]
    UnknownTypeName(String),

    /// finfo sobre un entero, iinfo sobre un float, etc.
    #[error("{kind} dtype '{dtype}' not supported here, {hint}")]
    UnsupportedKind {
        dtype: &'static str,
        kind: Kind,
        hint: &'static str,
    },

    /// El kind es correcto pero el id no tiene tabla de límites
    #[error("limits not available for dtype '{0}'")]
    UnsupportedType(&'static str),

    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("byte order '{0}' cannot be used for multi-byte data")]
    UnsupportedByteOrder(ByteOrder),
}

/// Alias usado en todo el crate
pub type Result<T> = std::result::Result<T, AtomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = AtomError::OutOfRange { index: 99, count: 15 };
        assert_eq!(err.to_string(), "dtype id 99 out of range (catalog has 15 types)");

        let err = AtomError::UnknownTypeName("float128".into());
        assert_eq!(err.to_string(), "'float128' is not a valid Atom data type");

        let err = AtomError::UnsupportedKind {
            dtype: "int32",
            kind: Kind::SignedInteger,
            hint: "try iinfo for integers",
        };
        assert_eq!(
            err.to_string(),
            "signed integer dtype 'int32' not supported here, try iinfo for integers"
        );
    }

    #[test]
    fn test_variants_are_distinguishable() {
        let errs = [
            AtomError::OutOfRange { index: 0, count: 0 },
            AtomError::UnknownTypeName(String::new()),
            AtomError::UnsupportedType("bool"),
        ];
        assert!(matches!(errs[0], AtomError::OutOfRange { .. }));
        assert!(matches!(errs[1], AtomError::UnknownTypeName(_)));
        assert!(matches!(errs[2], AtomError::UnsupportedType(_)));
        assert_ne!(errs[0], errs[1]);
    }
}
