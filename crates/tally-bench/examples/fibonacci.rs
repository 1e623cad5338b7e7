//! Fibonacci generator backed by a record file.
//!
//! Demonstrates: generate → save → print, or load → print.
//!
//! Run with:
//!
//! ```text
//! cargo run -p tally-bench --example fibonacci -- 20            # generate 20, save to fibonacci.bin
//! cargo run -p tally-bench --example fibonacci -- 20 out.bin    # generate 20, save to out.bin
//! cargo run -p tally-bench --example fibonacci -- --load        # load fibonacci.bin
//! RUST_LOG=tally_store=debug cargo run -p tally-bench --example fibonacci -- --load out.bin
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use tally_bench::render_listing;
use tally_core::{fibonacci, Buffer, TallyError};
use tally_store::{load, save};

const DEFAULT_PATH: &str = "fibonacci.bin";

enum Action {
    Generate { count: usize, path: PathBuf },
    Load { path: PathBuf },
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Action, String> {
    let first = args
        .next()
        .ok_or_else(|| "usage: fibonacci <count> [path] | fibonacci --load [path]".to_string())?;
    let path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_PATH.to_string()));
    if first == "--load" {
        return Ok(Action::Load { path });
    }
    let count: i64 = first
        .parse()
        .map_err(|_| format!("count must be an integer, got {first:?}"))?;
    if count <= 0 {
        return Err("N must be positive, sorry.".to_string());
    }
    let count = usize::try_from(count).map_err(|_| format!("count {count} is too large"))?;
    Ok(Action::Generate { count, path })
}

fn run(action: Action) -> Result<Buffer, TallyError> {
    match action {
        Action::Generate { count, path } => {
            let fib = fibonacci(count)?;
            save(&fib, &path)?;
            tracing::info!(path = %path.display(), count, "generated and saved");
            Ok(fib)
        }
        Action::Load { path } => {
            let fib = load(&path)?;
            tracing::info!(path = %path.display(), count = fib.len(), "loaded");
            Ok(fib)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    println!("** Fibonacci numbers generator **");

    let action = match parse_args(std::env::args().skip(1)) {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    match run(action) {
        Ok(fib) => {
            print!("{}", render_listing("Fibonacci", &fib));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {e}", e.kind());
            ExitCode::FAILURE
        }
    }
}
