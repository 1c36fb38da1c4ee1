use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

mod constants;
mod decimal;
mod error;
mod sequence;
mod special_functions;
mod reference;
mod analysis;
mod spacing;
mod summation;
mod record;
mod input;
mod report;

use constants::*;
use decimal::{Context, Decimal};
use error::SetupError;
use sequence::{ApproximationSequence, SequenceKind};
use analysis::*;
use summation::Summation;
use input::{Config, FromYaml, InputError};
use report::{Bytes, PrettyDuration, Seconds};

/// Measures how quickly different sequences converge to π
#[derive(Parser)]
#[command(name = "approx-pi", version)]
struct Cli {
    /// YAML file supplying defaults for options not given on the command line
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// File holding the digits of π to compare against
    #[arg(long, global = true, value_name = "FILE")]
    reference: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Correct digits at logarithmically spaced positions
    Convergence {
        /// Sequence(s) to analyse [default: all]
        #[arg(short, long = "sequence", value_name = "NAME")]
        sequences: Vec<String>,

        /// Number of positions to sample [default: 20]
        #[arg(long)]
        samples: Option<usize>,

        /// Significant digits used in the calculation [default: 50]
        #[arg(long)]
        precision: Option<usize>,

        /// The last position sampled is 10^stop [default: 4]
        #[arg(long)]
        stop: Option<i64>,

        /// Write one record per sequence, named after FILE
        #[arg(long, value_name = "FILE")]
        export_to: Option<PathBuf>,
    },

    /// Time needed to reach a number of correct digits
    Runtime {
        #[arg(short, long = "sequence", value_name = "NAME")]
        sequences: Vec<String>,

        /// Number of digit targets [default: 20]
        #[arg(long)]
        samples: Option<usize>,

        /// Largest number of digits to reach [default: 5]
        #[arg(long)]
        digits: Option<usize>,

        /// Give up once this position is reached [default: 1000000]
        #[arg(long)]
        bound: Option<i64>,

        #[arg(long, value_name = "FILE")]
        export_to: Option<PathBuf>,
    },

    /// Memory held by each sequence as the precision grows
    Memory {
        #[arg(short, long = "sequence", value_name = "NAME")]
        sequences: Vec<String>,

        /// Number of precisions to sample [default: 20]
        #[arg(long)]
        samples: Option<usize>,

        /// Largest precision [default: 5]
        #[arg(long)]
        digits: Option<usize>,

        #[arg(long, value_name = "FILE")]
        export_to: Option<PathBuf>,
    },

    /// Print the element at a given position of every sequence
    Sequences {
        /// [default: 20]
        #[arg(long)]
        position: Option<i64>,

        /// [default: 50]
        #[arg(long)]
        precision: Option<usize>,
    },

    /// Print integer sample points base^x, x evenly spaced over [START, STOP]
    Logspace {
        #[arg(allow_negative_numbers = true)]
        start: f64,

        #[arg(allow_negative_numbers = true)]
        stop: f64,

        /// [default: 5]
        #[arg(long)]
        samples: Option<usize>,

        /// [default: 10]
        #[arg(long)]
        base: Option<f64>,
    },

    /// Harmonic numbers H_n for n = 10^x, x evenly spaced over [START, STOP]
    Harmonic {
        #[arg(allow_negative_numbers = true)]
        start: f64,

        #[arg(allow_negative_numbers = true)]
        stop: f64,

        /// [default: 20]
        #[arg(long)]
        samples: Option<usize>,

        /// forward, kahan or pairwise [default: forward]
        #[arg(long)]
        algorithm: Option<String>,

        /// Sum in single rather than double precision
        #[arg(long)]
        single: bool,

        /// Write the sums and parameters to FILE
        #[arg(long, value_name = "FILE")]
        export_to: Option<PathBuf>,
    },

    /// Print a record written by --export-to
    Inspect {
        file: PathBuf,
    },
}

/// Chooses, in order, the command-line value, the value in the
/// configuration file or the default.
fn setting<T: FromYaml>(value: Option<T>, config: Option<&Config>, path: &str, default: T) -> Result<T, InputError> {
    if let Some(v) = value {
        return Ok(v);
    }
    match config {
        Some(config) => Ok(config.read_optional(path)?.unwrap_or(default)),
        None => Ok(default),
    }
}

/// Parses the requested sequence names, falling back to the configuration
/// file and then to all four sequences.
fn sequence_kinds(names: Vec<String>, config: Option<&Config>, command: &str) -> Result<Vec<SequenceKind>, Box<dyn Error>> {
    let names = setting(Some(names).filter(|n| !n.is_empty()), config, &format!("{}:sequences", command), vec![])?;
    if names.is_empty() {
        return Ok(SequenceKind::ALL.to_vec());
    }

    let kinds = names.iter()
        .map(|s| s.parse::<SequenceKind>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(kinds)
}

fn progress_bar(len: usize, prefix: &str) -> Result<ProgressBar, Box<dyn Error>> {
    let style = ProgressStyle::with_template("{prefix:>14.bold.cyan} [{bar:30}] {pos}/{len} {elapsed_precise}")?
        .progress_chars("=> ");
    let pb = ProgressBar::new(len as u64)
        .with_style(style)
        .with_prefix(prefix.to_owned());
    Ok(pb)
}

fn run_convergence(kinds: &[SequenceKind], ctx: &Context, reference: &Decimal, stop: i64, samples: usize, export_to: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let positions = sample_positions(stop, samples)?;
    println!("{} convergence at {} positions up to 10^{}, with {} digits...",
        "Measuring".bold().cyan(), positions.len(), stop, ctx.precision());

    for kind in kinds {
        let pb = progress_bar(positions.len(), kind.name())?;
        let mut points = Vec::with_capacity(positions.len());
        for point in convergence(*kind, ctx, reference, &positions) {
            points.push(point);
            pb.inc(1);
        }
        pb.finish_and_clear();

        println!("{}", kind.name().bold());
        println!("{:>14} {:>10} {:>18}", "position", "matching", "correct decimals");
        for p in points.iter() {
            let decimals = p.correct_decimals
                .map_or_else(|| "all".to_owned(), |d| d.to_string());
            println!("{:>14} {:>10} {:>18}", p.position, p.matching, decimals);
        }

        if let Some(path) = export_to {
            let path = record::suffixed(path, kind.name());
            let parameters = [json!(kind.name()), json!(ctx.precision()), json!(stop), json!(samples)];
            record::save(&path, &points, &parameters)?;
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct RuntimeSample {
    digits: usize,
    seconds: f64,
    seconds_per_digit: f64,
    position: i64,
    matching: usize,
    converged: bool,
}

fn run_runtime(kinds: &[SequenceKind], reference: &Decimal, digits: usize, samples: usize, bound: i64, export_to: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let ctx = Context::new(digits + 4)?;
    let targets = spacing::linspace_int(1, digits as i64, samples.min(digits))?;
    println!("{} runtime for {} digit targets up to {}, with {} digits...",
        "Measuring".bold().cyan(), targets.len(), digits, ctx.precision());

    for kind in kinds {
        let mut analysis = RuntimeAnalysis::with_bound(ApproximationSequence::new(*kind, &ctx), bound);
        let pb = progress_bar(targets.len(), kind.name())?;
        let mut rows = Vec::with_capacity(targets.len());
        for &target in targets.iter() {
            let target = target as usize;
            let m = analysis.approximation_up_to(&ctx, reference, target);
            let seconds = m.elapsed.as_secs_f64();
            rows.push(RuntimeSample {
                digits: target,
                seconds,
                seconds_per_digit: seconds / target as f64,
                position: analysis.sequence().current_position(),
                matching: m.matching,
                converged: m.state == HarnessState::Converged,
            });
            pb.inc(1);
        }
        pb.finish_and_clear();

        println!("{}", kind.name().bold());
        println!("{:>8} {:>12} {:>12} {:>10}", "digits", "total", "per digit", "position");
        for r in rows.iter() {
            let position = if r.converged {
                r.position.to_string()
            } else {
                format!("> {}", bound).yellow().to_string()
            };
            println!("{:>8} {:>12} {:>12} {:>10}", r.digits, Seconds(r.seconds), Seconds(r.seconds_per_digit), position);
        }

        if let Some(path) = export_to {
            let path = record::suffixed(path, kind.name());
            let parameters = [json!(kind.name()), json!(digits), json!(samples), json!(bound)];
            record::save(&path, &rows, &parameters)?;
        }
    }

    Ok(())
}

fn run_memory(kinds: &[SequenceKind], digits: usize, samples: usize, export_to: Option<&Path>) -> Result<(), Box<dyn Error>> {
    println!("{} memory use for precisions up to {} digits...", "Measuring".bold().cyan(), digits);

    for kind in kinds {
        let points = memory_usage(*kind, digits, samples)?;

        println!("{} (position {})", kind.name().bold(), kind.memory_position());
        println!("{:>10} {:>12}", "precision", "size");
        for p in points.iter() {
            println!("{:>10} {:>12}", p.precision, Bytes(p.bytes).to_string());
        }

        if let Some(path) = export_to {
            let path = record::suffixed(path, kind.name());
            let parameters = [json!(kind.name()), json!(digits), json!(samples), json!(kind.memory_position())];
            record::save(&path, &points, &parameters)?;
        }
    }

    Ok(())
}

fn run_sequences(positions: &[i64], ctx: &Context, reference: &Decimal) -> Result<(), Box<dyn Error>> {
    for &position in positions {
        if position < 0 {
            return Err(SetupError::out_of_range("position", 0, i64::MAX).into());
        }
        println!("{} position {}, with {} digits:", "Evaluating".bold().cyan(), position, ctx.precision());
        for kind in SequenceKind::ALL.iter() {
            let mut sequence = ApproximationSequence::new(*kind, ctx);
            if let Some(value) = sequence.at(ctx, position) {
                let matching = matching_digits(value, reference);
                match first_mismatch(value, reference) {
                    Some(m) => println!("{:>14} {} ({} digits, {} for {})", kind.name().bold(), value, matching, m.left, m.right),
                    None => println!("{:>14} {} ({} digits)", kind.name().bold(), value, matching),
                }
            }
        }
    }
    Ok(())
}

fn run_harmonic(start: f64, stop: f64, samples: usize, algorithm: Summation, single: bool, export_to: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let sums: Vec<(u64, f64)> = if single {
        summation::harmonic_sum::<f32>(start, stop, samples, algorithm)?
            .into_iter()
            .map(|(n, s)| (n, s as f64))
            .collect()
    } else {
        summation::harmonic_sum::<f64>(start, stop, samples, algorithm)?
    };

    let dtype = if single {"f32"} else {"f64"};
    println!("{} harmonic numbers by {} summation in {}:", "Computed".bold().cyan(), algorithm, dtype);
    for (n, s) in sums.iter() {
        println!("{:>14} {:.12}", n, s);
    }

    if let Some(path) = export_to {
        let values: Vec<f64> = sums.iter().map(|s| s.1).collect();
        let parameters = [json!(start), json!(stop), json!(samples), json!(algorithm.name()), json!(dtype)];
        record::save(path, &values, &parameters)?;
    }

    Ok(())
}

fn run_inspect(path: &Path) -> Result<(), Box<dyn Error>> {
    let (sequence, parameters) = record::load(path)?;
    println!("{} {} (version {})", "Loaded".bold().cyan(), path.display().to_string().bold().blue(), RECORD_VERSION);
    println!("parameters: {}", serde_json::to_string(&parameters)?);
    println!("{} elements:", sequence.len());
    for v in sequence.iter() {
        println!("    {}", v);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("approx_pi=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let runtime_start = Instant::now();

    let config = match &cli.config {
        Some(path) => {
            let mut config = Config::from_file(path)?;
            config.with_context("constants")?;
            Some(config)
        },
        None => None,
    };
    let config = config.as_ref();

    let reference = match &cli.reference {
        Some(path) => reference::load_reference(path)?,
        None => reference::pi().clone(),
    };

    match cli.command {
        Command::Convergence { sequences, samples, precision, stop, export_to } => {
            let kinds = sequence_kinds(sequences, config, "convergence")?;
            let samples = setting(samples, config, "convergence:samples", 20)?;
            let precision = setting(precision, config, "convergence:precision", 50)?;
            let stop = setting(stop, config, "convergence:stop", 4)?;
            let ctx = Context::new(precision)?;
            run_convergence(&kinds, &ctx, &reference, stop, samples, export_to.as_deref())?;
        },
        Command::Runtime { sequences, samples, digits, bound, export_to } => {
            let kinds = sequence_kinds(sequences, config, "runtime")?;
            let samples = setting(samples, config, "runtime:samples", 20)?;
            let digits = setting(digits, config, "runtime:digits", 5)?;
            let bound = setting(bound, config, "runtime:bound", DEFAULT_SAFETY_BOUND)?;
            if digits == 0 {
                return Err(SetupError::NonPositivePrecision.into());
            }
            run_runtime(&kinds, &reference, digits, samples, bound, export_to.as_deref())?;
        },
        Command::Memory { sequences, samples, digits, export_to } => {
            let kinds = sequence_kinds(sequences, config, "memory")?;
            let samples = setting(samples, config, "memory:samples", 20)?;
            let digits = setting(digits, config, "memory:digits", 5)?;
            run_memory(&kinds, digits, samples, export_to.as_deref())?;
        },
        Command::Sequences { position, precision } => {
            let positions = match (position, config) {
                (Some(p), _) => vec![p],
                (None, Some(config)) => match config.read_loop("sequences:position") {
                    Ok(v) => v,
                    Err(e) if e.kind() == input::InputErrorKind::Location => vec![20],
                    Err(e) => return Err(e.into()),
                },
                (None, None) => vec![20],
            };
            let precision = setting(precision, config, "sequences:precision", 50)?;
            let ctx = Context::new(precision)?;
            run_sequences(&positions, &ctx, &reference)?;
        },
        Command::Logspace { start, stop, samples, base } => {
            let samples = setting(samples, config, "logspace:samples", 5)?;
            let base = setting(base, config, "logspace:base", 10.0)?;
            let points = spacing::logspace_int(start, stop, samples, base)?;
            println!("{:?}", points);
        },
        Command::Harmonic { start, stop, samples, algorithm, single, export_to } => {
            let samples = setting(samples, config, "harmonic:samples", 20)?;
            let algorithm: Summation = setting(algorithm, config, "harmonic:algorithm", "forward".to_owned())?.parse()?;
            let single = single || setting(None, config, "harmonic:single", false)?;
            run_harmonic(start, stop, samples, algorithm, single, export_to.as_deref())?;
        },
        Command::Inspect { file } => {
            run_inspect(&file)?;
            return Ok(());
        },
    }

    println!("{} in {}.", "Completed".bold().bright_green(), PrettyDuration(runtime_start.elapsed()));
    Ok(())
}
