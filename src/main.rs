// src/main.rs
// ============================================================================
// ATOM-INFO CLI
// ============================================================================
//
// Uso:
//   atom-info                      # tabla con todo el catálogo
//   atom-info bfloat16 --limits    # descriptor + finfo
//   atom-info int8 --limits --json
//
// ============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use serde_json::json;

use atom_types::{limits, DType, Registry};

#[derive(Parser, Debug)]
#[command(name = "atom-info")]
#[command(about = "Inspect the Atom dtype catalog and machine limits")]
#[command(version)]
struct Args {
    /// DType name (e.g. int32, bfloat16). Omit to list the whole catalog
    #[arg(value_name = "DTYPE")]
    dtype: Option<String>,

    /// List every dtype (default when no DTYPE is given)
    #[arg(short, long)]
    list: bool,

    /// Also print finfo / iinfo
    #[arg(long)]
    limits: bool,

    /// JSON output
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let registry = Registry::global();
    debug!("catalog ready: {} dtypes", registry.len());

    match &args.dtype {
        Some(name) if !args.list => {
            let dtype = registry
                .lookup_by_name(name)
                .with_context(|| format!("Cannot resolve dtype '{}'", name))?;
            show_one(dtype, args.limits, args.json)
        }
        _ => show_catalog(registry, args.limits, args.json),
    }
}

fn show_catalog(registry: &Registry, with_limits: bool, as_json: bool) -> Result<()> {
    if as_json {
        let entries = registry
            .all()
            .map(|dt| entry_json(dt, with_limits))
            .collect::<Result<Vec<_>>>()?;
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("═══════════════════════════════════════════════════════════════");
    println!("  ATOM DTYPES ({} types)", registry.len());
    println!("═══════════════════════════════════════════════════════════════");
    println!("  {:>2}  {:<10} {:<18} {:>4} {:>5} {:>8} {:>5}", "id", "name", "kind", "char", "order", "itemsize", "align");
    for dt in registry.all() {
        println!(
            "  {:>2}  {:<10} {:<18} {:>4} {:>5} {:>8} {:>5}",
            dt.id.as_usize(),
            dt.name,
            dt.kind.to_string(),
            dt.type_code,
            dt.byte_order.code(),
            dt.element_size,
            dt.alignment,
        );
    }
    println!("═══════════════════════════════════════════════════════════════");

    if with_limits {
        for dt in registry.all() {
            println!("\n{}", limits(dt)?);
        }
    }
    Ok(())
}

fn show_one(dtype: DType, with_limits: bool, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&entry_json(dtype, with_limits)?)?);
        return Ok(());
    }

    println!("dtype('{}')", dtype);
    println!("  id:        {}", dtype.id.as_usize());
    println!("  kind:      {} ('{}')", dtype.kind, dtype.kind.code());
    println!("  char:      '{}'", dtype.type_code);
    println!("  byteorder: '{}'", dtype.byte_order.code());
    println!("  itemsize:  {}", dtype.element_size);
    println!("  alignment: {}", dtype.alignment);

    if with_limits {
        println!("\n{}", limits(dtype)?);
    }
    Ok(())
}

fn entry_json(dtype: DType, with_limits: bool) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(dtype)?;
    if with_limits {
        value["limits"] = serde_json::to_value(limits(dtype)?)?;
    }
    Ok(value)
}
