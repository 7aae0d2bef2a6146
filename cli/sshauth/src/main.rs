//! sshauth CLI
//!
//! Prints a user's SSH public keys stored in S3, for sshd's
//! `AuthorizedKeysCommand`.

use std::io::Write;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use sa_error::SaError;
use tracing::{debug, error};

mod args;
mod flagfile;
mod logging;
mod run;
mod signal;
mod syslog;

use args::{Cli, UsageError};
use flagfile::FlagFile;
use logging::LogOptions;

/// Wrapper script printed by `--sshlogger`.
const SSHLOGGER: &str = include_str!("../assets/sshlogger.sh");

#[tokio::main]
async fn main() -> ExitCode {
    signal::ignore_sigpipe();

    let (argv, flag_file) =
        flagfile::load_args(flagfile::flag_file_path(), std::env::args_os());
    let args = Cli::parse_from(argv);

    // Initialize logging (stderr or syslog, so stdout only carries keys)
    let log_options = LogOptions {
        enabled: args.logging,
        debug: args.debug,
        syslog: args.syslog,
    };
    if let Err(e) = logging::init_logging(log_options) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    match &flag_file {
        FlagFile::Loaded { path, words } => {
            debug!(path = %path.display(), words, "Read flag file")
        }
        FlagFile::Unavailable { path, error } => {
            debug!(path = %path.display(), error = %error, "Unable to open flag file")
        }
    }

    if args.sshlogger {
        let _ = std::io::stdout().write_all(SSHLOGGER.as_bytes());
        return ExitCode::SUCCESS;
    }

    let target = match args.target() {
        Ok(target) => target,
        Err(e) => {
            usage_error(&e);
            return ExitCode::FAILURE;
        }
    };

    match run::execute(&args, &target).await {
        Ok(stats) => {
            debug!(
                user = %target.user,
                keys = stats.records_written,
                closed_early = stats.closed_early,
                duration_ms = stats.duration().map(|d| d.num_milliseconds()),
                "Done"
            );
            ExitCode::SUCCESS
        }
        // Listing failures are logged with their store detail where they happen
        Err(SaError::Listing(_)) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Report a usage problem with the full help text on stderr.
fn usage_error(e: &UsageError) {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "{e}");
    let _ = Cli::command().write_long_help(&mut stderr);
}
