// src/bf16/slice.rs
// ============================================================================
// BF16 SLICES - Conversión en bloque y empaquetado a bytes
// ============================================================================

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};
use rayon::prelude::*;

use super::{narrow, widen};
use crate::dtype::ByteOrder;
use crate::error::{AtomError, Result};

/// Convierte `src` en `dst` (mismo tamaño)
pub fn narrow_slice(src: &[f32], dst: &mut [u16]) -> Result<()> {
    if src.len() != dst.len() {
        return Err(AtomError::LengthMismatch {
            expected: src.len(),
            got: dst.len(),
        });
    }
    for (out, &x) in dst.iter_mut().zip(src) {
        *out = narrow(x);
    }
    Ok(())
}

pub fn widen_slice(src: &[u16], dst: &mut [f32]) -> Result<()> {
    if src.len() != dst.len() {
        return Err(AtomError::LengthMismatch {
            expected: src.len(),
            got: dst.len(),
        });
    }
    for (out, &b) in dst.iter_mut().zip(src) {
        *out = widen(b);
    }
    Ok(())
}

pub fn narrow_vec(src: &[f32]) -> Vec<u16> {
    src.iter().map(|&x| narrow(x)).collect()
}

pub fn widen_vec(src: &[u16]) -> Vec<f32> {
    src.iter().map(|&b| widen(b)).collect()
}

/// Igual que [`narrow_vec`] pero repartido en el pool de rayon
pub fn par_narrow_vec(src: &[f32]) -> Vec<u16> {
    src.par_iter().map(|&x| narrow(x)).collect()
}

pub fn par_widen_vec(src: &[u16]) -> Vec<f32> {
    src.par_iter().map(|&b| widen(b)).collect()
}

/// Empaqueta valores bf16 a bytes en el orden pedido.
/// `Native` se resuelve al orden del target.
pub fn encode_bytes(values: &[u16], order: ByteOrder) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; values.len() * 2];
    match order.resolve() {
        ByteOrder::Little => LittleEndian::write_u16_into(values, &mut buf),
        ByteOrder::Big => BigEndian::write_u16_into(values, &mut buf),
        other => return Err(AtomError::UnsupportedByteOrder(other)),
    }
    Ok(buf)
}

pub fn decode_bytes(data: &[u8], order: ByteOrder) -> Result<Vec<u16>> {
    if data.len() % 2 != 0 {
        return Err(AtomError::LengthMismatch {
            expected: data.len() + 1,
            got: data.len(),
        });
    }
    let mut values = vec![0u16; data.len() / 2];
    match order.resolve() {
        ByteOrder::Little => LittleEndian::read_u16_into(data, &mut values),
        ByteOrder::Big => BigEndian::read_u16_into(data, &mut values),
        other => return Err(AtomError::UnsupportedByteOrder(other)),
    }
    Ok(values)
}
