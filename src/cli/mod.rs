// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `aips-driver`
//! subcommands are contained in modules.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be optional
//! *and* usable in an arguments file.
//!
//! Only 3 things should be public in this module: `AipsDriver`,
//! `AipsDriver::run`, and `AipsDriverError`.

#[macro_use]
mod common;
mod clear;
mod error;
mod pca;
mod rmsd;
mod run;

pub use error::AipsDriverError;

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::info;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = r#"Drive AIPS (the Astronomical Image Processing System) from the command line.
Scripts are piped into a shell that runs AIPS in "no TV" mode."#
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct AipsDriver {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// Don't run AIPS; print the script that would be piped into the shell
    /// instead.
    #[clap(long)]
    #[clap(global = true)]
    dry_run: bool,

    /// Save the input arguments into a new TOML file that can be used to
    /// reproduce this run.
    #[clap(long)]
    #[clap(global = true)]
    save_toml: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(about = "Run AIPS commands given on the command line and/or in a script file.")]
    Run(run::RunArgs),

    #[clap(alias = "noise-map")]
    #[clap(about = r#"Make RMSD noise maps of FITS images with AIPS.
Each <basename>.fits is loaded, its noise map is written to <basename>.rmsd.fits, and the AIPS catalogue entries used are deleted."#)]
    Rmsd(rmsd::RmsdArgs),

    #[clap(about = "Clear the busy status of an AIPS catalogue entry and delete it.")]
    Clear(clear::ClearArgs),

    #[clap(alias = "list")]
    #[clap(about = "List the open AIPS catalogue entries.")]
    Pca(pca::PcaArgs),
}

impl AipsDriver {
    pub fn run(self) -> Result<(), AipsDriverError> {
        // Set up logging.
        let GlobalArgs {
            verbosity,
            dry_run,
            save_toml,
        } = self.global_opts;
        setup_logging(verbosity)?;

        // Print the version of aips-driver and its build-time information.
        let sub_command = match &self.command {
            Command::Run(_) => "run",
            Command::Rmsd(_) => "rmsd",
            Command::Clear(_) => "clear",
            Command::Pca(_) => "pca",
        };
        info!("aips-driver {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        macro_rules! merge_save_run {
            ($args:expr) => {{
                let args = $args.merge()?;
                if let Some(toml_file) = save_toml {
                    use std::{
                        fs::File,
                        io::{BufWriter, Write},
                    };

                    let toml_str = toml::to_string(&args).map_err(|e| {
                        AipsDriverError::Generic(format!("toml serialisation error: {e}"))
                    })?;
                    let mut f = BufWriter::new(File::create(&toml_file)?);
                    f.write_all(toml_str.as_bytes())?;
                    info!("Saved arguments to {}", toml_file.display());
                }
                args.run(dry_run)?;
            }};
        }

        match self.command {
            Command::Run(args) => merge_save_run!(args),
            Command::Rmsd(args) => merge_save_run!(args),
            Command::Clear(args) => merge_save_run!(args),
            Command::Pca(args) => merge_save_run!(args),
        }

        info!("aips-driver {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}

/// Write many info-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            info!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {}", hr);
    }
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
