//! Command entry: the application shell and its single `run` subcommand.

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Command, CommandFactory, FromArgMatches, Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::execute_run;
use crate::commands::run::RunOptions;

pub const APP_NAME: &str = "disco";

#[derive(Parser)]
#[command(
    name = "disco",
    version,
    about = "Discover container images, vulnerabilities, and licenses in currently deployed across your runtimes"
)]
struct Cli {
    /// Print a shell completion script and exit.
    #[arg(long = "generate-completion", value_name = "SHELL", global = true, hide = true)]
    generate_completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover images and write a report.
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Project identifier recorded in the report.
    #[arg(short = 'p', long = "project", value_name = "ID")]
    project: Option<String>,

    /// Write the report to this path instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    output: Option<PathBuf>,

    /// Report format (json or yaml). Unsupported values fall back to json.
    #[arg(short = 'f', long = "format", value_name = "FORMAT")]
    format: Option<String>,

    /// Local image artifact (saved archive or manifest) to report on.
    #[arg(long = "image-file", value_name = "PATH")]
    image_file: Option<PathBuf>,

    /// Remote image reference (e.g. registry coordinate) to report on.
    #[arg(long = "image-uri", value_name = "URI")]
    image_uri: Option<String>,
}

pub fn version_string(version: &str, commit: &str) -> String {
    format!("{version} (commit: {commit})")
}

pub fn build_command(version: &str, commit: &str) -> Command {
    Cli::command().version(version_string(version, commit))
}

/// Parse `args`, dispatch the selected subcommand, and attach context to any failure.
pub fn execute<I, T>(version: &str, commit: &str, args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    dispatch(version, commit, args).context("failed to run app")
}

fn dispatch<I, T>(version: &str, commit: &str, args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = build_command(version, commit);
    let matches = match command.try_get_matches_from_mut(args) {
        Ok(matches) => matches,
        Err(err) if !err.use_stderr() => {
            // --help and --version
            err.print()?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    let cli = Cli::from_arg_matches(&matches)?;

    if let Some(shell) = cli.generate_completion {
        let mut script = Vec::new();
        clap_complete::generate(shell, &mut command, APP_NAME, &mut script);
        io::stdout().lock().write_all(&script)?;
        return Ok(());
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            let options = RunOptions {
                project: args.project,
                output: args.output,
                format: args.format,
                image_file: args.image_file,
                image_uri: args.image_uri,
            };
            execute_run(options)?;
        }
        None => command.print_help()?,
    }

    Ok(())
}
