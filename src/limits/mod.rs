// src/limits/mod.rs
// ============================================================================
// LIMITS - finfo / iinfo para los tipos del catálogo
// ============================================================================
//
// Tablas literales indexadas por DTypeId. Nada se calcula en tiempo de
// ejecución: el conjunto de tipos es cerrado.
//
// Todos los valores son exactos en binario (potencias de 2 o constantes std).
// bfloat16 comparte exponente con binary32 y tiene 7 bits de mantisa:
//   max  = (2 - 2^-7) * 2^127 = 2^128 - 2^120
//   tiny = 2^-126,  subnormal = 2^-(126 + 7) = 2^-133
//
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::dtype::{DType, DTypeId};
use crate::error::{AtomError, Result};

/// Parámetros de máquina de un tipo flotante (o del componente de un complejo)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloatInfo {
    /// Tipo consultado (cfloat64 conserva su id aunque los campos sean de float32)
    pub dtype: DTypeId,
    pub bits: u32,
    /// Diferencia entre 1.0 y el siguiente flotante
    pub eps: f64,
    pub max: f64,
    /// Siempre -max
    pub min: f64,
    /// Dígitos decimales aproximados
    pub precision: u32,
    /// 10^-precision
    pub resolution: f64,
    /// Bits de mantisa (sin el implícito)
    pub nmant: u32,
    /// Bits de exponente
    pub nexp: u32,
    /// Menor exponente binario normal
    pub minexp: i32,
    /// Primer exponente que desborda
    pub maxexp: i32,
    /// Diferencia entre 1.0 y el flotante anterior
    pub epsneg: f64,
    /// eps = 2^machep
    pub machep: i32,
    /// epsneg = 2^negep
    pub negep: i32,
    pub smallest_normal: f64,
    pub smallest_subnormal: f64,
}

impl FloatInfo {
    /// Alias histórico de `smallest_normal`
    pub fn tiny(&self) -> f64 {
        self.smallest_normal
    }
}

const FLOAT16: FloatInfo = FloatInfo {
    dtype: DTypeId::Float16,
    bits: 16,
    eps: 0.0009765625,
    max: 65504.0,
    min: -65504.0,
    precision: 3,
    resolution: 1e-3,
    nmant: 10,
    nexp: 5,
    minexp: -14,
    maxexp: 16,
    epsneg: 0.00048828125,
    machep: -10,
    negep: -11,
    smallest_normal: 6.103515625e-05,
    smallest_subnormal: 5.960464477539063e-08,
};

const FLOAT32: FloatInfo = FloatInfo {
    dtype: DTypeId::Float32,
    bits: 32,
    eps: f32::EPSILON as f64,
    max: f32::MAX as f64,
    min: f32::MIN as f64,
    precision: 6,
    resolution: 1e-6,
    nmant: 23,
    nexp: 8,
    minexp: -126,
    maxexp: 128,
    epsneg: 5.960464477539063e-08,
    machep: -23,
    negep: -24,
    smallest_normal: f32::MIN_POSITIVE as f64,
    smallest_subnormal: 1.401298464324817e-45,
};

const FLOAT64: FloatInfo = FloatInfo {
    dtype: DTypeId::Float64,
    bits: 64,
    eps: f64::EPSILON,
    max: f64::MAX,
    min: f64::MIN,
    precision: 15,
    resolution: 1e-15,
    nmant: 52,
    nexp: 11,
    minexp: -1022,
    maxexp: 1024,
    epsneg: 1.1102230246251565e-16,
    machep: -52,
    negep: -53,
    smallest_normal: f64::MIN_POSITIVE,
    smallest_subnormal: 4.9406564584124654e-324,
};

const BFLOAT16: FloatInfo = FloatInfo {
    dtype: DTypeId::BFloat16,
    bits: 16,
    eps: 0.0078125,
    max: 3.3895313892515355e38,
    min: -3.3895313892515355e38,
    precision: 2,
    resolution: 1e-2,
    nmant: 7,
    nexp: 8,
    minexp: -126,
    maxexp: 128,
    epsneg: 0.00390625,
    machep: -7,
    negep: -8,
    smallest_normal: 1.1754943508222875e-38,
    smallest_subnormal: 9.183549615799121e-41,
};

/// Rango de un tipo entero (o bool)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntInfo {
    pub dtype: DTypeId,
    pub bits: u32,
    pub min: i64,
    pub max: u64,
}

/// finfo o iinfo según el kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NumericLimits {
    Float(FloatInfo),
    Int(IntInfo),
}

/// Límites de un tipo flotante, complejo o vendor (bfloat16).
///
/// Para complejos devuelve los del componente.
pub fn float_limits(dtype: DType) -> Result<FloatInfo> {
    if !dtype.kind.is_float_like() {
        return Err(AtomError::UnsupportedKind {
            dtype: dtype.name,
            kind: dtype.kind,
            hint: "finfo is only available for floating point and complex dtypes, try iinfo for integers",
        });
    }

    let table = match dtype.id {
        DTypeId::Float16 => FLOAT16,
        DTypeId::Float32 | DTypeId::CFloat64 => FLOAT32,
        DTypeId::Float64 | DTypeId::CFloat128 => FLOAT64,
        DTypeId::BFloat16 => BFLOAT16,
        DTypeId::Bool
        | DTypeId::Int8
        | DTypeId::UInt8
        | DTypeId::Int16
        | DTypeId::UInt16
        | DTypeId::Int32
        | DTypeId::UInt32
        | DTypeId::Int64
        | DTypeId::UInt64 => return Err(AtomError::UnsupportedType(dtype.name)),
    };

    Ok(FloatInfo {
        dtype: dtype.id,
        ..table
    })
}

/// Rango de un tipo entero o bool. `bits` sale del tamaño del elemento.
pub fn int_limits(dtype: DType) -> Result<IntInfo> {
    if !dtype.kind.is_integer_like() {
        return Err(AtomError::UnsupportedKind {
            dtype: dtype.name,
            kind: dtype.kind,
            hint: "iinfo is only available for integer and boolean dtypes, try finfo for floats",
        });
    }

    let (min, max): (i64, u64) = match dtype.id {
        DTypeId::Bool => (0, 1),
        DTypeId::Int8 => (i8::MIN as i64, i8::MAX as u64),
        DTypeId::UInt8 => (0, u8::MAX as u64),
        DTypeId::Int16 => (i16::MIN as i64, i16::MAX as u64),
        DTypeId::UInt16 => (0, u16::MAX as u64),
        DTypeId::Int32 => (i32::MIN as i64, i32::MAX as u64),
        DTypeId::UInt32 => (0, u32::MAX as u64),
        DTypeId::Int64 => (i64::MIN, i64::MAX as u64),
        DTypeId::UInt64 => (0, u64::MAX),
        DTypeId::Float16
        | DTypeId::Float32
        | DTypeId::Float64
        | DTypeId::CFloat64
        | DTypeId::CFloat128
        | DTypeId::BFloat16 => return Err(AtomError::UnsupportedType(dtype.name)),
    };

    Ok(IntInfo {
        dtype: dtype.id,
        bits: dtype.bits(),
        min,
        max,
    })
}

/// Enruta a finfo o iinfo según el kind
pub fn limits(dtype: DType) -> Result<NumericLimits> {
    if dtype.kind.is_integer_like() {
        int_limits(dtype).map(NumericLimits::Int)
    } else {
        float_limits(dtype).map(NumericLimits::Float)
    }
}

/// Alias con los nombres de NumPy
pub fn finfo(dtype: DType) -> Result<FloatInfo> {
    float_limits(dtype)
}

pub fn iinfo(dtype: DType) -> Result<IntInfo> {
    int_limits(dtype)
}

const RULE: &str = "---------------------------------------------------------------";

impl fmt::Display for FloatInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Machine parameters for {}", self.dtype)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "precision = {:>4}   resolution = {:e}", self.precision, self.resolution)?;
        writeln!(f, "machep = {:>7}   eps = {:e}", self.machep, self.eps)?;
        writeln!(f, "negep = {:>8}   epsneg = {:e}", self.negep, self.epsneg)?;
        writeln!(f, "minexp = {:>7}   tiny = {:e}", self.minexp, self.smallest_normal)?;
        writeln!(f, "maxexp = {:>7}   max = {:e}", self.maxexp, self.max)?;
        writeln!(f, "nexp = {:>9}   min = -max", self.nexp)?;
        writeln!(f, "nmant = {:>8}   bits = {}", self.nmant, self.bits)?;
        writeln!(f, "smallest_normal = {:e}   smallest_subnormal = {:e}", self.smallest_normal, self.smallest_subnormal)?;
        write!(f, "{}", RULE)
    }
}

impl fmt::Display for IntInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Machine parameters for {}", self.dtype)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "bits = {}", self.bits)?;
        writeln!(f, "min = {}", self.min)?;
        writeln!(f, "max = {}", self.max)?;
        write!(f, "{}", RULE)
    }
}

impl fmt::Display for NumericLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(info) => fmt::Display::fmt(info, f),
            Self::Int(info) => fmt::Display::fmt(info, f),
        }
    }
}
