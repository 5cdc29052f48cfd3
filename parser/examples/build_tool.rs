//! A small build-tool style command line using subcommand dispatch.
//!
//! Run with:
//!
//! ```text
//! cargo run --example build_tool -- --verbose build --release app
//! ```

use std::env;
use std::process::ExitCode;

use argspec_core::{ArgumentRepository, ConfigError};
use argspec_parser::parse;

fn configure() -> Result<ArgumentRepository, ConfigError> {
    let mut repo: ArgumentRepository = ArgumentRepository::new();
    repo.add_switch(&["--verbose", "-v"])?;
    let mut commands = repo.add_subparsers("command")?;

    let build = commands.add_parser("build")?;
    build.add_switch(&["--release"])?;
    build
        .add_valued(&["--jobs", "-j"])?
        .set_default_value("1")
        .set_allowed_values(&["1", "2", "4", "8"]);
    build
        .add_positional("target")?
        .set_required()
        .set_max_count_unlimited();

    let clean = commands.add_parser("clean")?;
    clean.add_switch(&["--dry-run"])?;

    Ok(repo)
}

fn main() -> ExitCode {
    let repo = match configure() {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let argv: Vec<String> = env::args().skip(1).collect();
    match parse(&repo, &argv) {
        Ok(results) => {
            println!("{}", results.to_json());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
