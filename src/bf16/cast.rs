// src/bf16/cast.rs
// ============================================================================
// BIT CAST - Reinterpretación f32 <-> u32 y layout de binary32
// ============================================================================
//
//   [31]     signo
//   [30:23]  exponente (8 bits)
//   [22:0]   mantisa (23 bits)
//
// bfloat16 son los 16 bits altos de este layout.
//
// ============================================================================

pub const F32_SIGN_MASK: u32 = 0x8000_0000;
pub const F32_EXPONENT_MASK: u32 = 0x7F80_0000;
pub const F32_MANTISSA_MASK: u32 = 0x007F_FFFF;

pub const BF16_SIGN_MASK: u16 = 0x8000;
pub const BF16_EXPONENT_MASK: u16 = 0x7F80;
pub const BF16_MANTISSA_MASK: u16 = 0x007F;
/// Bit alto de la mantisa: a 1 = NaN silencioso
pub const BF16_QUIET_BIT: u16 = 0x0040;

/// Bits de un f32 tal cual, sin conversión numérica
#[inline(always)]
pub fn f32_to_bits(value: f32) -> u32 {
    value.to_bits()
}

#[inline(always)]
pub fn f32_from_bits(bits: u32) -> f32 {
    f32::from_bits(bits)
}

/// NaN = exponente todo a 1 y mantisa distinta de cero
#[inline(always)]
pub fn is_nan_bits(bits: u32) -> bool {
    (bits & F32_EXPONENT_MASK) == F32_EXPONENT_MASK && (bits & F32_MANTISSA_MASK) != 0
}

#[inline]
pub fn bf16_is_nan(bits: u16) -> bool {
    (bits & BF16_EXPONENT_MASK) == BF16_EXPONENT_MASK && (bits & BF16_MANTISSA_MASK) != 0
}

#[inline]
pub fn bf16_is_signaling_nan(bits: u16) -> bool {
    bf16_is_nan(bits) && (bits & BF16_QUIET_BIT) == 0
}
