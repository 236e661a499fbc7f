// src/dtype/registry.rs
// ============================================================================
// REGISTRY - Catálogo estático de tipos Atom
// ============================================================================
//
// Los descriptores son datos `static` construidos en compilación. El registro
// se inicializa una sola vez (OnceLock) y a partir de ahí es solo lectura:
// cualquier número de hilos puede consultarlo sin locks.
//
// ============================================================================

use std::collections::HashSet;
use std::mem::{align_of, size_of};
use std::sync::OnceLock;

use log::debug;

use super::types::{ByteOrder, DType, DTypeDescriptor, DTypeId, Kind};
use crate::bf16::Bf16;
use crate::error::{AtomError, Result};

const fn descriptor(
    id: DTypeId,
    kind: Kind,
    type_code: char,
    byte_order: ByteOrder,
    element_size: usize,
    alignment: usize,
    name: &'static str,
) -> DTypeDescriptor {
    DTypeDescriptor {
        id,
        kind,
        type_code,
        byte_order,
        element_size,
        alignment,
        name,
    }
}

use super::types::ByteOrder::{Native, NotApplicable};

/// Catálogo indexado por `DTypeId`
static CATALOG: [DTypeDescriptor; DTypeId::COUNT] = [
    descriptor(DTypeId::Bool, Kind::Boolean, '?', NotApplicable, size_of::<bool>(), align_of::<bool>(), "bool"),
    descriptor(DTypeId::Int8, Kind::SignedInteger, 'b', NotApplicable, size_of::<i8>(), align_of::<i8>(), "int8"),
    descriptor(DTypeId::UInt8, Kind::UnsignedInteger, 'B', NotApplicable, size_of::<u8>(), align_of::<u8>(), "uint8"),
    descriptor(DTypeId::Int16, Kind::SignedInteger, 'h', Native, size_of::<i16>(), align_of::<i16>(), "int16"),
    descriptor(DTypeId::UInt16, Kind::UnsignedInteger, 'H', Native, size_of::<u16>(), align_of::<u16>(), "uint16"),
    descriptor(DTypeId::Int32, Kind::SignedInteger, 'i', Native, size_of::<i32>(), align_of::<i32>(), "int32"),
    descriptor(DTypeId::UInt32, Kind::UnsignedInteger, 'I', Native, size_of::<u32>(), align_of::<u32>(), "uint32"),
    descriptor(DTypeId::Int64, Kind::SignedInteger, 'q', Native, size_of::<i64>(), align_of::<i64>(), "int64"),
    descriptor(DTypeId::UInt64, Kind::UnsignedInteger, 'Q', Native, size_of::<u64>(), align_of::<u64>(), "uint64"),
    descriptor(DTypeId::Float16, Kind::Float, 'e', Native, size_of::<half::f16>(), align_of::<half::f16>(), "float16"),
    descriptor(DTypeId::Float32, Kind::Float, 'f', Native, size_of::<f32>(), align_of::<f32>(), "float32"),
    descriptor(DTypeId::Float64, Kind::Float, 'd', Native, size_of::<f64>(), align_of::<f64>(), "float64"),
    // Complejos: pareja de floats, alineación del componente
    descriptor(DTypeId::CFloat64, Kind::Complex, 'F', Native, size_of::<[f32; 2]>(), align_of::<f32>(), "cfloat64"),
    descriptor(DTypeId::CFloat128, Kind::Complex, 'D', Native, size_of::<[f64; 2]>(), align_of::<f64>(), "cfloat128"),
    // Kind 'V' para no chocar con un futuro float16 de kind 'f' e itemsize 2
    descriptor(DTypeId::BFloat16, Kind::Vendor, 'E', Native, size_of::<Bf16>(), align_of::<Bf16>(), "bfloat16"),
];

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Registro global de tipos
#[derive(Debug)]
pub struct Registry {
    entries: &'static [DTypeDescriptor; DTypeId::COUNT],
}

impl Registry {
    /// Devuelve el registro del proceso, inicializándolo la primera vez.
    ///
    /// Llamadas repetidas (desde cualquier hilo) devuelven la misma instancia.
    pub fn global() -> &'static Registry {
        REGISTRY.get_or_init(|| {
            let registry = Registry { entries: &CATALOG };
            debug_assert_eq!(registry.validate(), Ok(()));
            debug!("atom registry initialized with {} dtypes", registry.len());
            registry
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Acceso directo por id tipado (siempre en rango)
    pub fn get(&self, id: DTypeId) -> DType {
        let entries: &'static [DTypeDescriptor] = self.entries;
        DType(&entries[id.as_usize()])
    }

    /// Busca por índice crudo. O(1), sin allocations.
    pub fn lookup_by_id(&self, index: usize) -> Result<DType> {
        let entries: &'static [DTypeDescriptor] = self.entries;
        entries
            .get(index)
            .map(DType)
            .ok_or(AtomError::OutOfRange {
                index,
                count: entries.len(),
            })
    }

    /// Busca por nombre (comparación exacta, búsqueda lineal)
    pub fn lookup_by_name(&self, name: &str) -> Result<DType> {
        let entries: &'static [DTypeDescriptor] = self.entries;
        entries
            .iter()
            .find(|d| d.name == name)
            .map(DType)
            .ok_or_else(|| AtomError::UnknownTypeName(name.to_string()))
    }

    /// Todos los tipos en orden ascendente de id.
    ///
    /// Cada llamada produce un iterador nuevo; el iterador también es `Clone`.
    pub fn all(&self) -> impl ExactSizeIterator<Item = DType> + Clone + 'static {
        let entries: &'static [DTypeDescriptor] = self.entries;
        entries.iter().map(DType)
    }

    /// Comprueba los invariantes del catálogo
    pub fn validate(&self) -> std::result::Result<(), String> {
        let mut names = HashSet::new();
        let mut codes = HashSet::new();

        for (index, d) in self.entries.iter().enumerate() {
            if d.id.as_usize() != index {
                return Err(format!("{} stored at slot {} (id {})", d.name, index, d.id.as_usize()));
            }
            if d.name != d.id.name() {
                return Err(format!("slot {} named '{}', expected '{}'", index, d.name, d.id.name()));
            }
            if !names.insert(d.name) {
                return Err(format!("duplicate dtype name '{}'", d.name));
            }
            if !codes.insert(d.type_code) {
                return Err(format!("duplicate type code '{}'", d.type_code));
            }
            if d.element_size == 0 || d.alignment == 0 {
                return Err(format!("{} has zero size or alignment", d.name));
            }
            if d.element_size == 1 && d.byte_order != ByteOrder::NotApplicable {
                return Err(format!("{} is 1 byte but has byte order '{}'", d.name, d.byte_order));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completeness() {
        let registry = Registry::global();
        assert_eq!(registry.len(), DTypeId::COUNT);

        for index in 0..DTypeId::COUNT {
            let dt = registry.lookup_by_id(index).unwrap();
            assert_eq!(dt.id.as_usize(), index);
            assert_eq!(dt, registry.get(dt.id));
        }
    }

    #[test]
    fn test_out_of_range() {
        let err = Registry::global().lookup_by_id(DTypeId::COUNT).unwrap_err();
        assert!(matches!(err, AtomError::OutOfRange { index: 15, count: 15 }));
        assert!(Registry::global().lookup_by_id(usize::MAX).is_err());
    }

    #[test]
    fn test_name_roundtrip_is_identity() {
        let registry = Registry::global();
        for dt in registry.all() {
            let found = registry.lookup_by_name(dt.name).unwrap();
            assert!(std::ptr::eq(found.descriptor(), dt.descriptor()));
            assert_eq!(found, dt);
        }
    }

    #[test]
    fn test_unknown_name() {
        let registry = Registry::global();
        for name in ["", "Int32", "float128", "longdouble", "string", "int32 "] {
            assert_eq!(
                registry.lookup_by_name(name).unwrap_err(),
                AtomError::UnknownTypeName(name.to_string())
            );
        }
    }

    #[test]
    fn test_unique_names_and_codes() {
        let names: HashSet<_> = Registry::global().all().map(|d| d.name).collect();
        assert_eq!(names.len(), DTypeId::COUNT);
        let codes: HashSet<_> = Registry::global().all().map(|d| d.type_code).collect();
        assert_eq!(codes.len(), DTypeId::COUNT);
        assert!(Registry::global().validate().is_ok());
    }

    #[test]
    fn test_all_is_ordered_and_restartable() {
        let registry = Registry::global();
        let iter = registry.all();
        let first: Vec<_> = iter.clone().map(|d| d.id).collect();
        let second: Vec<_> = iter.map(|d| d.id).collect();
        assert_eq!(first, DTypeId::ALL.to_vec());
        assert_eq!(first, second);
        assert_eq!(registry.all().len(), DTypeId::COUNT);
    }

    #[test]
    fn test_identity_not_structural() {
        let registry = Registry::global();
        // Mismo tamaño, mismo byte order, distinto tipo
        let f16 = registry.get(DTypeId::Float16);
        let bf16 = registry.get(DTypeId::BFloat16);
        let i16 = registry.get(DTypeId::Int16);
        assert_eq!(f16.element_size, bf16.element_size);
        assert_ne!(f16, bf16);
        assert_ne!(bf16, i16);
    }

    #[test]
    fn test_catalog_values() {
        let registry = Registry::global();
        let expected = [
            ("bool", '?', 'b', '|', 1, 1),
            ("int8", 'b', 'i', '|', 1, 1),
            ("uint8", 'B', 'u', '|', 1, 1),
            ("int16", 'h', 'i', '=', 2, 2),
            ("uint16", 'H', 'u', '=', 2, 2),
            ("int32", 'i', 'i', '=', 4, 4),
            ("uint32", 'I', 'u', '=', 4, 4),
            ("int64", 'q', 'i', '=', 8, 8),
            ("uint64", 'Q', 'u', '=', 8, 8),
            ("float16", 'e', 'f', '=', 2, 2),
            ("float32", 'f', 'f', '=', 4, 4),
            ("float64", 'd', 'f', '=', 8, 8),
            ("cfloat64", 'F', 'c', '=', 8, 4),
            ("cfloat128", 'D', 'c', '=', 16, 8),
            ("bfloat16", 'E', 'V', '=', 2, 2),
        ];

        for (dt, (name, code, kind, order, size, align)) in registry.all().zip(expected) {
            assert_eq!(dt.name, name);
            assert_eq!(dt.type_code, code, "{}", name);
            assert_eq!(dt.kind.code(), kind, "{}", name);
            assert_eq!(dt.byte_order.code(), order, "{}", name);
            assert_eq!(dt.element_size, size, "{}", name);
            // i64/f64 pueden tener alineación 4 en algunos targets de 32 bits
            if size <= 4 || cfg!(target_pointer_width = "64") {
                assert_eq!(dt.alignment, align, "{}", name);
            }
        }
    }

    #[test]
    fn test_global_is_singleton_across_threads() {
        let here = Registry::global() as *const Registry as usize;
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| Registry::global() as *const Registry as usize))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), here);
        }
    }
}
