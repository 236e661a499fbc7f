// src/bf16/mod.rs
// ============================================================================
// BF16 - Conversión float32 <-> bfloat16
// ============================================================================
//
// narrow: f32 -> bf16 con redondeo al par más cercano (RNE) y NaN silencioso
// widen:  bf16 -> f32 exacto (los 16 bits bajos de la mantisa a cero)
//
// Ambas son totales: cualquier patrón de bits de entrada es válido.
//
// ============================================================================

pub mod cast;
pub mod slice;

use std::fmt;

use cast::{f32_from_bits, f32_to_bits, is_nan_bits, BF16_QUIET_BIT};

// Re-exports
pub use slice::{
    decode_bytes, encode_bytes, narrow_slice, narrow_vec, par_narrow_vec, par_widen_vec,
    widen_slice, widen_vec,
};

/// Convierte un f32 a bfloat16 (bits crudos) con round-to-nearest-even.
///
/// Los NaN (cualquier signo o payload) salen siempre silenciosos: se fuerza el
/// bit alto de la mantisa, porque truncar un NaN señalizador podría dejar
/// la mantisa a cero y convertirlo en infinito.
#[inline]
pub fn narrow(value: f32) -> u16 {
    let bits = f32_to_bits(value);

    if is_nan_bits(bits) {
        return ((bits >> 16) as u16) | BF16_QUIET_BIT;
    }

    // Bit que quedará como LSB del resultado
    let lsb = (bits >> 16) & 1;
    // 0x7FFF + lsb: > medio redondea arriba, == medio va al par
    let rounding_bias = 0x0000_7FFF + lsb;

    // El acarreo puede subir al exponente (incluido el salto a infinito)
    (bits.wrapping_add(rounding_bias) >> 16) as u16
}

/// Convierte bfloat16 (bits crudos) a f32. Sin pérdida.
#[inline]
pub fn widen(bits: u16) -> f32 {
    f32_from_bits((bits as u32) << 16)
}

/// Valor bfloat16 almacenado como sus 16 bits.
///
/// `PartialEq`/`Hash` comparan patrones de bits, no valores IEEE
/// (`+0 != -0`, un NaN es igual a sí mismo).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Bf16(u16);

impl Bf16 {
    pub const ZERO: Bf16 = Bf16(0x0000);
    pub const NEG_ZERO: Bf16 = Bf16(0x8000);
    pub const ONE: Bf16 = Bf16(0x3F80);
    pub const INFINITY: Bf16 = Bf16(0x7F80);
    pub const NEG_INFINITY: Bf16 = Bf16(0xFF80);
    pub const NAN: Bf16 = Bf16(0x7FC0);
    /// Mayor finito: (2 - 2^-7) * 2^127
    pub const MAX: Bf16 = Bf16(0x7F7F);
    pub const MIN: Bf16 = Bf16(0xFF7F);
    /// Menor normal positivo: 2^-126
    pub const MIN_POSITIVE: Bf16 = Bf16(0x0080);
    /// Menor subnormal positivo: 2^-133
    pub const MIN_POSITIVE_SUBNORMAL: Bf16 = Bf16(0x0001);
    /// 2^-7
    pub const EPSILON: Bf16 = Bf16(0x3C00);

    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self(narrow(value))
    }

    #[inline]
    pub fn to_f32(self) -> f32 {
        widen(self.0)
    }

    pub fn is_nan(self) -> bool {
        cast::bf16_is_nan(self.0)
    }

    pub fn is_infinite(self) -> bool {
        (self.0 & !cast::BF16_SIGN_MASK) == Self::INFINITY.0
    }

    pub fn is_finite(self) -> bool {
        (self.0 & cast::BF16_EXPONENT_MASK) != cast::BF16_EXPONENT_MASK
    }

    pub fn is_sign_negative(self) -> bool {
        (self.0 & cast::BF16_SIGN_MASK) != 0
    }
}

impl From<f32> for Bf16 {
    fn from(value: f32) -> Self {
        Self::from_f32(value)
    }
}

impl From<Bf16> for f32 {
    fn from(value: Bf16) -> Self {
        value.to_f32()
    }
}

impl From<half::bf16> for Bf16 {
    fn from(value: half::bf16) -> Self {
        Self(value.to_bits())
    }
}

impl From<Bf16> for half::bf16 {
    fn from(value: Bf16) -> Self {
        half::bf16::from_bits(value.0)
    }
}

impl fmt::Display for Bf16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f32(), f)
    }
}

impl fmt::Debug for Bf16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bf16({:#06x} = {:?})", self.0, self.to_f32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_simple_values() {
        assert_eq!(narrow(0.0), 0x0000);
        assert_eq!(narrow(1.0), 0x3F80);
        assert_eq!(narrow(-2.0), 0xC000);
        assert_eq!(narrow(f32::INFINITY), 0x7F80);
        assert_eq!(narrow(f32::NEG_INFINITY), 0xFF80);
        assert_eq!(widen(0x3F80), 1.0);
        assert_eq!(widen(0x4049), 3.140625);
    }

    #[test]
    fn test_ties_to_even() {
        // Kept LSB par (0x3F80): exactamente a mitad -> se queda abajo
        assert_eq!(narrow(f32::from_bits(0x3F80_8000)), 0x3F80);
        // Kept LSB impar (0x3F81): exactamente a mitad -> sube al par
        assert_eq!(narrow(f32::from_bits(0x3F81_8000)), 0x3F82);
        // Ligeramente por encima / debajo de la mitad
        assert_eq!(narrow(f32::from_bits(0x3F80_8001)), 0x3F81);
        assert_eq!(narrow(f32::from_bits(0x3F81_7FFF)), 0x3F81);
        // Negativos: mismo comportamiento en magnitud
        assert_eq!(narrow(f32::from_bits(0xBF80_8000)), 0xBF80);
        assert_eq!(narrow(f32::from_bits(0xBF81_8000)), 0xBF82);
    }

    #[test]
    fn test_round_up_into_next_exponent() {
        // 1.9960938 (0x3FFF) + medio ulp con LSB impar -> 2.0
        assert_eq!(narrow(f32::from_bits(0x3FFF_8000)), 0x4000);
        assert_eq!(widen(0x4000), 2.0);
        // Mayor subnormal bf16 redondeando al menor normal
        assert_eq!(narrow(f32::from_bits(0x007F_C000)), 0x0080);
    }

    #[test]
    fn test_overflow_to_infinity() {
        // Justo por debajo del máximo bf16 y sin forzar redondeo
        assert_eq!(narrow(f32::from_bits(0x7F7F_7FFF)), 0x7F7F);
        // Empate sobre el máximo (LSB impar) -> infinito
        assert_eq!(narrow(f32::from_bits(0x7F7F_8000)), 0x7F80);
        assert_eq!(narrow(f32::MAX), 0x7F80);
        assert_eq!(narrow(f32::MIN), 0xFF80);
        assert!(widen(narrow(f32::MAX)).is_infinite());
    }

    #[test]
    fn test_signed_zero() {
        assert_eq!(narrow(-0.0), 0x8000);
        assert!(widen(0x8000).is_sign_negative());
        assert_eq!(widen(0x8000), 0.0);
        // Subnormal f32 diminuto -> cero con signo
        assert_eq!(narrow(f32::from_bits(0x8000_0001)), 0x8000);
    }

    #[test]
    fn test_nan_quieting() {
        // NaN señalizador cuya truncación daría infinito
        let snan = f32::from_bits(0x7F80_0001);
        assert!(snan.is_nan());
        let out = narrow(snan);
        assert_eq!(out, 0x7FC0);
        assert!(cast::bf16_is_nan(out));
        assert_ne!(out & BF16_QUIET_BIT, 0);

        // Señalizador con payload alto y signo negativo
        assert_eq!(narrow(f32::from_bits(0xFF81_0000)), 0xFFC1);
        // Silencioso ya: se preserva
        assert_eq!(narrow(f32::from_bits(0x7FC0_0000)), 0x7FC0);
        assert_eq!(narrow(f32::from_bits(0xFFC1_2345)), 0xFFC1);
        // El redondeo nunca convierte un NaN en otra cosa
        assert!(widen(narrow(f32::from_bits(0x7FFF_FFFF))).is_nan());
    }

    #[test]
    fn test_widen_is_exact_for_every_pattern() {
        for b in 0..=u16::MAX {
            let back = narrow(widen(b));
            if cast::bf16_is_signaling_nan(b) {
                assert_eq!(back, b | BF16_QUIET_BIT, "{:#06x}", b);
            } else {
                assert_eq!(back, b, "{:#06x}", b);
            }
            assert_eq!(widen(b).to_bits() & 0xFFFF, 0);
        }
    }

    #[test]
    fn test_roundtrip_error_bound() {
        let mut rng = StdRng::seed_from_u64(0xB16);
        for _ in 0..200_000 {
            let bits: u32 = rng.gen();
            let value = f32::from_bits(bits);
            if value.is_nan() {
                continue;
            }
            let back = widen(narrow(value)).to_bits();
            // Mismo signo y a lo sumo medio ulp de bf16 en espacio de bits
            assert_eq!(back & 0x8000_0000, bits & 0x8000_0000);
            assert!(back.abs_diff(bits) <= 0x8000, "{:#010x} -> {:#010x}", bits, back);

            // Exacto si ya cabe en 7 bits de mantisa
            let truncated = f32::from_bits(bits & 0xFFFF_0000);
            assert_eq!(widen(narrow(truncated)).to_bits(), bits & 0xFFFF_0000);
        }
    }

    #[test]
    fn test_matches_half_crate() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100_000 {
            let value = f32::from_bits(rng.gen());
            if value.is_nan() {
                continue;
            }
            assert_eq!(narrow(value), half::bf16::from_f32(value).to_bits());
        }
        for b in [0x0000u16, 0x3F80, 0x7F7F, 0x0001, 0x8000, 0xFF80] {
            assert_eq!(widen(b).to_bits(), half::bf16::from_bits(b).to_f32().to_bits());
        }
    }

    #[test]
    fn test_bf16_type() {
        let x = Bf16::from_f32(1.5);
        assert_eq!(x.to_bits(), 0x3FC0);
        assert_eq!(f32::from(x), 1.5);
        assert_eq!(x.to_string(), "1.5");
        assert_eq!(format!("{:?}", Bf16::ONE), "Bf16(0x3f80 = 1.0)");

        assert!(Bf16::NAN.is_nan());
        assert!(Bf16::NEG_INFINITY.is_infinite());
        assert!(!Bf16::NAN.is_infinite());
        assert!(!Bf16::INFINITY.is_finite());
        assert!(Bf16::MAX.is_finite());
        assert!(Bf16::NEG_ZERO.is_sign_negative());
        assert_ne!(Bf16::ZERO, Bf16::NEG_ZERO);
    }

    #[test]
    fn test_constants_match_half() {
        assert_eq!(Bf16::MAX.to_bits(), half::bf16::MAX.to_bits());
        assert_eq!(Bf16::MIN.to_bits(), half::bf16::MIN.to_bits());
        assert_eq!(Bf16::EPSILON.to_bits(), half::bf16::EPSILON.to_bits());
        assert_eq!(Bf16::MIN_POSITIVE.to_bits(), half::bf16::MIN_POSITIVE.to_bits());
        assert_eq!(
            Bf16::MIN_POSITIVE_SUBNORMAL.to_bits(),
            half::bf16::MIN_POSITIVE_SUBNORMAL.to_bits()
        );
        assert_eq!(Bf16::EPSILON.to_f32(), 0.0078125);

        let h: half::bf16 = Bf16::ONE.into();
        assert_eq!(h, half::bf16::ONE);
        assert_eq!(Bf16::from(half::bf16::NEG_INFINITY), Bf16::NEG_INFINITY);
    }
}
