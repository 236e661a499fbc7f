// src/bin/bf16.rs
// ============================================================================
// ATOM-BF16 - Conversión float32 <-> bfloat16 desde la línea de comandos
// ============================================================================
//
// Uso:
//   atom-bf16 narrow 1.0 3.14159 -2.5
//   atom-bf16 widen 0x3f80 0x4049 16256
//
// ============================================================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;

use atom_types::bf16::{self, cast};

#[derive(Parser)]
#[command(name = "atom-bf16")]
#[command(about = "Convert between float32 and bfloat16 bit patterns")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    mode: Mode,

    /// JSON output
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// float32 -> bfloat16 (round-to-nearest-even)
    Narrow {
        /// Values to convert (nan / inf accepted)
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f32>,
    },
    /// bfloat16 bits -> float32
    Widen {
        /// Bit patterns, hex (0x3f80) or decimal
        #[arg(required = true)]
        bits: Vec<String>,
    },
}

/// Una fila de salida
#[derive(Debug, Serialize)]
struct Conversion {
    input: String,
    f32_bits: String,
    bf16_bits: String,
    value: f32,
}

fn parse_bits(s: &str) -> Result<u16> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.with_context(|| format!("Invalid bfloat16 bit pattern: '{}'", s))
}

fn narrow_row(value: f32) -> Conversion {
    let b = bf16::narrow(value);
    Conversion {
        input: value.to_string(),
        f32_bits: format!("{:#010x}", cast::f32_to_bits(value)),
        bf16_bits: format!("{:#06x}", b),
        value: bf16::widen(b),
    }
}

fn widen_row(input: &str, b: u16) -> Conversion {
    let value = bf16::widen(b);
    Conversion {
        input: input.to_string(),
        f32_bits: format!("{:#010x}", cast::f32_to_bits(value)),
        bf16_bits: format!("{:#06x}", b),
        value,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let rows: Vec<Conversion> = match &args.mode {
        Mode::Narrow { values } => values.iter().map(|&v| narrow_row(v)).collect(),
        Mode::Widen { bits } => bits
            .iter()
            .map(|s| Ok(widen_row(s, parse_bits(s)?)))
            .collect::<Result<_>>()?,
    };
    debug!("converted {} values", rows.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("  {:<16} {:<12} {:<8} {}", "input", "f32 bits", "bf16", "value");
    for row in &rows {
        println!("  {:<16} {:<12} {:<8} {:?}", row.input, row.f32_bits, row.bf16_bits, row.value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bits() {
        assert_eq!(parse_bits("0x3f80").unwrap(), 0x3F80);
        assert_eq!(parse_bits("0X7FC0").unwrap(), 0x7FC0);
        assert_eq!(parse_bits("16256").unwrap(), 0x3F80);
        assert!(parse_bits("0x1ffff").is_err());
        assert!(parse_bits("abc").is_err());
    }

    #[test]
    fn test_rows() {
        let row = narrow_row(3.14159);
        assert_eq!(row.bf16_bits, "0x4049");
        assert_eq!(row.value, 3.140625);

        let row = widen_row("0xff80", 0xFF80);
        assert_eq!(row.f32_bits, "0xff800000");
        assert_eq!(row.value, f32::NEG_INFINITY);
    }

    #[test]
    fn test_negative_values_parse() {
        let args = Args::parse_from(["atom-bf16", "narrow", "-2.5", "1.0"]);
        match args.mode {
            Mode::Narrow { values } => assert_eq!(values, vec![-2.5, 1.0]),
            Mode::Widen { .. } => panic!("expected narrow"),
        }
    }
}
