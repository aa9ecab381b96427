//! CLI entrypoint for the bumpfmt conformance harness.

use std::path::{Path, PathBuf};

use bumpfmt_core::stdio::stdout_sink;
use bumpfmt_core::{FloatStyle, FormatConfig, Printf, WidthPolicy};
use bumpfmt_harness::demo::run_demo;
use bumpfmt_harness::structured_log::LogEmitter;
use bumpfmt_harness::{FixtureArg, FixtureSet, TestRunner, VerificationSummary};
use clap::{Parser, Subcommand};

/// Conformance tooling for bumpfmt.
#[derive(Debug, Parser)]
#[command(name = "bumpfmt-harness")]
#[command(about = "Conformance testing harness for bumpfmt")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the demonstration sequence to stdout.
    Demo {
        /// Width policy (`apply` or `ignore`); defaults to BUMPFMT_WIDTH.
        #[arg(long)]
        width: Option<String>,
        /// Float style (`reference` or `padded`); defaults to BUMPFMT_FLOAT.
        #[arg(long)]
        float: Option<String>,
    },
    /// Format one template and print the result to stdout.
    Render {
        /// Template text.
        #[arg(long)]
        template: String,
        /// Argument as `kind:value` (int, uint, double, str, char, ptr); repeatable.
        #[arg(long = "arg")]
        args: Vec<String>,
        #[arg(long)]
        width: Option<String>,
        #[arg(long)]
        float: Option<String>,
        /// `%f` decimals (0-9).
        #[arg(long)]
        precision: Option<usize>,
    },
    /// Verify the engine against fixture files.
    Verify {
        /// Fixture JSON file, or a directory of them.
        #[arg(long)]
        fixture: PathBuf,
        /// Structured JSONL log output path.
        #[arg(long)]
        log: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Demo { width, float } => {
            let config = build_config(width.as_deref(), float.as_deref(), None)?;
            run_demo(&mut stdout_sink(), config)?;
        }
        Command::Render {
            template,
            args,
            width,
            float,
            precision,
        } => {
            let config = build_config(width.as_deref(), float.as_deref(), precision)?;
            let parsed = args
                .iter()
                .map(|raw| raw.parse::<FixtureArg>())
                .collect::<Result<Vec<_>, _>>()?;
            let args: Vec<_> = parsed.iter().map(FixtureArg::to_arg).collect();
            Printf::with_config(config).printf(template.as_bytes(), &args)?;
        }
        Command::Verify { fixture, log } => {
            eprintln!("Verifying against fixtures in {}", fixture.display());
            let fixture_sets = load_fixture_sets(&fixture)?;
            let runner = TestRunner::new("fixture-verify");

            let mut results = Vec::new();
            if let Some(log_path) = &log {
                let mut emitter = LogEmitter::to_file(log_path, "fixture-verify")?;
                for set in &fixture_sets {
                    results.extend(runner.run_logged(set, &mut emitter)?);
                }
                eprintln!("Wrote structured log to {}", log_path.display());
            } else {
                for set in &fixture_sets {
                    results.extend(runner.run(set));
                }
            }

            let summary = VerificationSummary::from_results(results);
            for failed in summary.results.iter().filter(|r| !r.passed) {
                eprintln!("FAIL {}", failed.case_name);
                if let Some(diff) = &failed.diff {
                    eprintln!("{diff}");
                }
            }
            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                summary.total, summary.passed, summary.failed
            );
            if !summary.all_passed() {
                return Err("Conformance verification failed".into());
            }
        }
    }
    Ok(())
}

/// Env-derived defaults with any flag overrides applied.
fn build_config(
    width: Option<&str>,
    float: Option<&str>,
    precision: Option<usize>,
) -> Result<FormatConfig, Box<dyn std::error::Error>> {
    let mut config = FormatConfig::from_env();
    if let Some(width) = width {
        config = config.with_width(WidthPolicy::from_str_loose(width));
    }
    if let Some(float) = float {
        config = config.with_float_style(FloatStyle::from_str_loose(float));
    }
    if let Some(precision) = precision {
        config = config.with_float_precision(precision)?;
    }
    Ok(config)
}

fn load_fixture_sets(path: &Path) -> Result<Vec<FixtureSet>, Box<dyn std::error::Error>> {
    if path.is_file() {
        return Ok(vec![FixtureSet::from_file(path)?]);
    }

    let mut fixture_paths: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    fixture_paths.sort();

    let mut sets = Vec::new();
    for path in fixture_paths {
        match FixtureSet::from_file(&path) {
            Ok(set) => sets.push(set),
            Err(err) => eprintln!("Skipping {}: {}", path.display(), err),
        }
    }
    if sets.is_empty() {
        return Err(format!("No fixture JSON files found in {}", path.display()).into());
    }
    Ok(sets)
}
