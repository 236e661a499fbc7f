// src/dtype/types.rs
// ============================================================================
// DTYPE TYPES - Identificadores, kinds, byte order y descriptores
// ============================================================================

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::registry::Registry;
use crate::error::{AtomError, Result};

/// Identificador estable de cada tipo del catálogo (denso, desde 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum DTypeId {
    Bool = 0,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float16,
    Float32,
    Float64,
    CFloat64,
    CFloat128,
    BFloat16,
}

impl DTypeId {
    /// Cardinalidad del catálogo
    pub const COUNT: usize = 15;

    /// Todos los ids en orden ascendente
    pub const ALL: [DTypeId; Self::COUNT] = [
        Self::Bool,
        Self::Int8,
        Self::UInt8,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Int64,
        Self::UInt64,
        Self::Float16,
        Self::Float32,
        Self::Float64,
        Self::CFloat64,
        Self::CFloat128,
        Self::BFloat16,
    ];

    pub fn as_usize(&self) -> usize {
        *self as usize
    }

    /// Convierte un índice crudo en id
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL.get(index).copied().ok_or(AtomError::OutOfRange {
            index,
            count: Self::COUNT,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Float16 => "float16",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::CFloat64 => "cfloat64",
            Self::CFloat128 => "cfloat128",
            Self::BFloat16 => "bfloat16",
        }
    }
}

// COUNT tiene que seguir al último id
const _: () = assert!(DTypeId::BFloat16 as usize + 1 == DTypeId::COUNT);

impl fmt::Display for DTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categoría del tipo. Decide si aplica finfo o iinfo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Boolean,
    SignedInteger,
    UnsignedInteger,
    Float,
    Complex,
    /// Tipos propios (bfloat16). Sigue la convención 'V' de ml_dtypes.
    Vendor,
}

impl Kind {
    /// Carácter legacy ('b', 'i', 'u', 'f', 'c', 'V')
    pub fn code(&self) -> char {
        match self {
            Self::Boolean => 'b',
            Self::SignedInteger => 'i',
            Self::UnsignedInteger => 'u',
            Self::Float => 'f',
            Self::Complex => 'c',
            Self::Vendor => 'V',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'b' => Some(Self::Boolean),
            'i' => Some(Self::SignedInteger),
            'u' => Some(Self::UnsignedInteger),
            'f' => Some(Self::Float),
            'c' => Some(Self::Complex),
            'V' => Some(Self::Vendor),
            _ => None,
        }
    }

    /// Kinds con finfo
    pub fn is_float_like(&self) -> bool {
        matches!(self, Self::Float | Self::Complex | Self::Vendor)
    }

    /// Kinds con iinfo
    pub fn is_integer_like(&self) -> bool {
        matches!(
            self,
            Self::Boolean | Self::SignedInteger | Self::UnsignedInteger
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Boolean => "boolean",
            Self::SignedInteger => "signed integer",
            Self::UnsignedInteger => "unsigned integer",
            Self::Float => "floating point",
            Self::Complex => "complex",
            Self::Vendor => "vendor-defined",
        };
        f.write_str(s)
    }
}

/// Endianness de un tipo multi-byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Tipos de 1 byte
    NotApplicable,
    Native,
    Little,
    Big,
}

impl ByteOrder {
    pub fn code(&self) -> char {
        match self {
            Self::NotApplicable => '|',
            Self::Native => '=',
            Self::Little => '<',
            Self::Big => '>',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '|' => Some(Self::NotApplicable),
            '=' => Some(Self::Native),
            '<' => Some(Self::Little),
            '>' => Some(Self::Big),
            _ => None,
        }
    }

    /// Resuelve `Native` al orden concreto del target
    pub fn resolve(self) -> Self {
        match self {
            Self::Native if cfg!(target_endian = "big") => Self::Big,
            Self::Native => Self::Little,
            other => other,
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Descriptor inmutable de un tipo escalar.
///
/// Las instancias canónicas viven en el catálogo estático; el resto del
/// crate solo maneja referencias a ellas a través de [`DType`].
#[derive(Debug, Serialize)]
pub struct DTypeDescriptor {
    pub id: DTypeId,
    pub kind: Kind,
    /// Código de un carácter (compatibilidad con NumPy)
    pub type_code: char,
    pub byte_order: ByteOrder,
    /// Tamaño de un elemento en bytes
    pub element_size: usize,
    /// Alineación requerida en bytes (en complejos, la del componente)
    pub alignment: usize,
    pub name: &'static str,
}

/// Handle a un descriptor canónico.
///
/// La igualdad es por identidad: dos handles son iguales si apuntan al mismo
/// descriptor del catálogo, nunca por comparación de campos.
#[derive(Clone, Copy)]
pub struct DType(pub(crate) &'static DTypeDescriptor);

impl DType {
    pub fn descriptor(&self) -> &'static DTypeDescriptor {
        self.0
    }

    pub fn id(&self) -> DTypeId {
        self.0.id
    }

    pub fn name(&self) -> &'static str {
        self.0.name
    }

    /// Alias de `element_size` (nombre NumPy)
    pub fn itemsize(&self) -> usize {
        self.0.element_size
    }

    pub fn bits(&self) -> u32 {
        (self.0.element_size * 8) as u32
    }
}

impl Deref for DType {
    type Target = DTypeDescriptor;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl PartialEq for DType {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for DType {}

impl Hash for DType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.0, state);
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name)
    }
}

impl fmt::Debug for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dtype('{}')", self.0.name)
    }
}

impl FromStr for DType {
    type Err = AtomError;

    fn from_str(s: &str) -> Result<Self> {
        Registry::global().lookup_by_name(s)
    }
}

impl From<DTypeId> for DType {
    fn from(id: DTypeId) -> Self {
        Registry::global().get(id)
    }
}

impl TryFrom<usize> for DType {
    type Error = AtomError;

    fn try_from(index: usize) -> Result<Self> {
        Registry::global().lookup_by_id(index)
    }
}

impl Serialize for DType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
