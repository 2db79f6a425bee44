//! Command-line front end for the sidewinder level generator.
//!
//! Generates a level, prints the validation summary, and optionally
//! writes the full level as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sw_core::generator::{GeneratorOptions, LevelGenerator};
use sw_core::rules::RuleSet;

/// Procedural platformer level generator
#[derive(Parser, Debug)]
#[command(name = "sidewinder")]
#[command(author, version, about = "Generate and validate platformer levels", long_about = None)]
struct Args {
    /// Level number (drives difficulty and enemy unlocks)
    #[arg(short = 'l', long = "level", default_value_t = 1)]
    level: u32,

    /// Level length in world units
    #[arg(short = 'L', long = "length", default_value_t = sw_core::consts::DEFAULT_LEVEL_LENGTH)]
    length: f64,

    /// Seed for reproducible generation
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Rules file (JSON); built-in defaults when omitted
    #[arg(short = 'r', long = "rules")]
    rules: Option<PathBuf>,

    /// Write the generated level as JSON to this file ("-" for stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long = "pretty")]
    pretty: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let rules = match &args.rules {
        Some(path) => RuleSet::load(path)?,
        None => RuleSet::default(),
    };

    let generator = LevelGenerator::new(rules);
    let generated = generator.generate(
        args.level,
        GeneratorOptions {
            length: args.length,
            seed: args.seed,
        },
    )?;

    let level = &generated.level;
    let summary = &generated.validation.summary;
    println!(
        "level {} ({}): {} sections, {} platforms, {} enemies, {} rings worth {}, {} jump pads",
        level.number,
        level.difficulty,
        level.sections.len(),
        level.platforms.len(),
        level.enemies.len(),
        level.rings.len(),
        level.total_ring_value(),
        level.jump_pads.len(),
    );
    println!(
        "seed {} | {} errors, {} warnings | {}",
        generated.metadata.seed, summary.total_errors, summary.total_warnings,
        summary.recommendation,
    );

    if let Some(path) = &args.output {
        let json = if args.pretty {
            serde_json::to_string_pretty(&generated)?
        } else {
            serde_json::to_string(&generated)?
        };
        if path.as_os_str() == "-" {
            println!("{json}");
        } else {
            std::fs::write(path, json)?;
            eprintln!("wrote {}", path.display());
        }
    }

    Ok(())
}
