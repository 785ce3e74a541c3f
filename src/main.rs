//! Proof-of-Work Solver CLI
//!
//! Solves SHA-256 nonce challenges from the command line.
//!
//! # Usage
//!
//! - `powsolve <PREFIX> <TARGET_HEX>` - Print the smallest nonce, nothing else
//! - `solve` - Solve with worker, window and output options
//! - `verify` - Check a claimed nonce
//! - `benchmark` - Run performance benchmark
//!
//! With exactly two arguments the bare form always wins, so a prefix may be
//! named like a subcommand or start with `-`. Otherwise put `--` before the
//! prefix.
//!
//! Logs go to stderr and are controlled with `RUST_LOG`.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use powsolve::algorithm::{Nonces, Solver, Target, DEFAULT_BATCH_SIZE, DIGEST_SIZE};
use powsolve::config::SolveConfig;
use powsolve::report::SolveReport;

#[derive(Parser)]
#[command(name = "powsolve")]
#[command(author = "Cyberia")]
#[command(version = "0.1.0")]
#[command(about = "SHA-256 proof-of-work nonce solver")]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "A prefix that looks like a subcommand or a flag is taken literally \
when it is one of exactly two arguments; otherwise write `powsolve -- <PREFIX> <TARGET_HEX>`.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Challenge prefix
    #[arg(allow_hyphen_values = true)]
    prefix: Option<String>,

    /// Target threshold as hex (even number of digits)
    #[arg(allow_hyphen_values = true)]
    target: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the smallest nonce meeting the target
    Solve {
        /// Challenge prefix
        prefix: String,

        /// Target threshold as hex (even number of digits)
        target: String,

        /// Number of threads to use (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Nonces per work batch in parallel mode
        #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: u64,

        /// First nonce to try
        #[arg(long, default_value = "0")]
        start: u64,

        /// Give up after this nonce (inclusive)
        #[arg(long)]
        max_nonce: Option<u64>,

        /// Print a JSON report instead of the bare nonce
        #[arg(long)]
        json: bool,
    },

    /// Check that a nonce meets the target
    Verify {
        /// Challenge prefix
        prefix: String,

        /// Target threshold as hex (even number of digits)
        target: String,

        /// The nonce to check
        nonce: u64,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of hashes to compute
        #[arg(short, long, default_value = "1000000")]
        count: u64,

        /// Number of threads to use (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,
    },
}

fn main() {
    init_tracing();

    let cli = parse_cli(std::env::args_os()).unwrap_or_else(|e| e.exit());

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Parse the command line, giving the bare `<PREFIX> <TARGET_HEX>` form
/// priority whenever exactly two arguments follow the binary name
fn parse_cli<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    if let [bin, prefix, target] = args.as_slice() {
        let target_is_flag = target.to_string_lossy().starts_with('-');
        if prefix != "--" && !target_is_flag {
            return Cli::try_parse_from([bin, &OsString::from("--"), prefix, target]);
        }
    }

    Cli::try_parse_from(args)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Solve {
            prefix,
            target,
            threads,
            batch_size,
            start,
            max_nonce,
            json,
        }) => {
            let config = build_solve_config(threads, batch_size, start, max_nonce);
            cmd_solve(&prefix, &target, &config, json)
        }
        Some(Commands::Verify {
            prefix,
            target,
            nonce,
        }) => cmd_verify(&prefix, &target, nonce),
        Some(Commands::Benchmark { count, threads }) => cmd_benchmark(count, threads),
        None => match (cli.prefix, cli.target) {
            (Some(prefix), Some(target)) => {
                let config = build_solve_config(None, DEFAULT_BATCH_SIZE, 0, None);
                cmd_solve(&prefix, &target, &config, false)
            }
            _ => Cli::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "expected <PREFIX> <TARGET_HEX> or a subcommand",
                )
                .exit(),
        },
    }
}

/// Log to stderr so stdout carries only results
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "powsolve=warn,powsolve_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build solve config from CLI args
fn build_solve_config(
    threads: Option<usize>,
    batch_size: u64,
    start: u64,
    max_nonce: Option<u64>,
) -> SolveConfig {
    SolveConfig {
        threads: threads.unwrap_or_else(num_cpus::get),
        batch_size,
        start,
        max_nonce,
    }
}

fn cmd_solve(
    prefix: &str,
    target_hex: &str,
    config: &SolveConfig,
    json: bool,
) -> anyhow::Result<()> {
    config.validate()?;

    // Reject a bad target before spinning up any workers
    let target = Target::from_hex(target_hex)?;
    let solver = Solver::new(prefix, target);

    tracing::info!(
        prefix,
        target = target_hex,
        threads = config.threads,
        start = config.start,
        max_nonce = ?config.max_nonce,
        "solving challenge"
    );

    let start = Instant::now();
    let solution = powsolve::search(solver, config)?;
    let report = SolveReport::new(&solution, start.elapsed());

    tracing::info!(
        nonce = solution.nonce,
        hashes = report.hashes,
        elapsed_ms = report.elapsed_ms,
        hashrate = report.hashrate(),
        "challenge solved"
    );

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", report.nonce);
    }

    Ok(())
}

fn cmd_verify(prefix: &str, target_hex: &str, nonce: u64) -> anyhow::Result<()> {
    let solver = Solver::from_hex(prefix, target_hex)?;
    let digest = solver.digest(nonce);

    tracing::info!(nonce, digest = %hex::encode(digest), "verifying nonce");

    let valid = solver.verify(nonce);
    println!("{}", if valid { "valid" } else { "invalid" });

    if !valid {
        anyhow::bail!(
            "nonce {} does not meet target {} (digest {})",
            nonce,
            solver.target(),
            hex::encode(digest)
        );
    }

    Ok(())
}

fn cmd_benchmark(count: u64, threads: Option<usize>) -> anyhow::Result<()> {
    println!("Running benchmark with {} hashes...", count);

    // An all-zero target is effectively unreachable, so every nonce in the
    // window gets hashed
    let solver = Solver::new(
        "benchmark input data for the nonce solver",
        Target::from_bytes(vec![0u8; DIGEST_SIZE]),
    );

    let start = Instant::now();
    let found = solver.search(Nonces::new(0, count));
    let elapsed = start.elapsed();
    let hashrate = count as f64 / elapsed.as_secs_f64();

    println!("\nSingle thread:");
    println!("  Total hashes: {}", count);
    println!("  Time elapsed: {:.2}s", elapsed.as_secs_f64());
    println!("  Hashrate: {:.2} H/s", hashrate);

    let config = build_solve_config(threads, DEFAULT_BATCH_SIZE, 0, Some(count.saturating_sub(1)));
    if config.is_parallel() && count > 0 {
        let start = Instant::now();
        let parallel = powsolve::search(solver, &config);
        let elapsed = start.elapsed();
        let hashrate = count as f64 / elapsed.as_secs_f64();

        println!("\nParallel ({} threads):", config.threads);
        println!("  Time elapsed: {:.2}s", elapsed.as_secs_f64());
        println!("  Hashrate: {:.2} H/s", hashrate);

        if let Ok(solution) = parallel {
            println!("  (target hit at nonce {})", solution.nonce);
        }
    }

    if let Some(solution) = found {
        println!("\n  (target hit at nonce {})", solution.nonce);
    }

    Ok(())
}
