//! Default flags read from a configuration file.
//!
//! The file holds command-line flags separated by whitespace. They are
//! placed in front of the real arguments, so anything given on the command
//! line wins. Long flags may be written with a single dash (`-bucket b`),
//! as older configuration files do.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// Flag file read when `SSHAUTH_FLAG_FILE` is not set.
pub const DEFAULT_FLAG_FILE: &str = "/etc/sshauth/sshauth.conf";

/// Environment variable naming an alternative flag file.
pub const FLAG_FILE_ENV: &str = "SSHAUTH_FLAG_FILE";

/// What happened when looking for the flag file.
///
/// Logging is not set up yet when the file is read, so the outcome is kept
/// and reported afterwards.
#[derive(Debug)]
pub enum FlagFile {
    Loaded { path: PathBuf, words: usize },
    Unavailable { path: PathBuf, error: io::Error },
}

/// Path of the flag file to read.
pub fn flag_file_path() -> PathBuf {
    std::env::var_os(FLAG_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FLAG_FILE))
}

/// Read the whitespace-separated words of a flag file.
pub fn read_flag_file(path: &Path) -> io::Result<Vec<OsString>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .split_whitespace()
        .map(|word| OsString::from(long_flag(word)))
        .collect())
}

/// Rewrite a single-dash long flag (`-bucket`, `-bucket=b`) to `--bucket`.
///
/// Short flags, `--` flags and plain values are returned unchanged.
fn long_flag(word: &str) -> String {
    match word.strip_prefix('-') {
        Some(name) if !name.starts_with('-') && name.chars().count() > 1 => format!("-{word}"),
        _ => word.to_string(),
    }
}

/// Insert `defaults` between the program name and the remaining arguments.
pub fn merge_args<I>(args: I, defaults: Vec<OsString>) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut merged = Vec::with_capacity(defaults.len() + 1);

    if let Some(program) = args.next() {
        merged.push(program);
    }
    merged.extend(defaults);
    merged.extend(args);
    merged
}

/// Load the flag file at `path` and merge it into `args`.
pub fn load_args<I>(path: PathBuf, args: I) -> (Vec<OsString>, FlagFile)
where
    I: IntoIterator<Item = OsString>,
{
    match read_flag_file(&path) {
        Ok(words) => {
            let count = words.len();
            (merge_args(args, words), FlagFile::Loaded { path, words: count })
        }
        Err(error) => (
            args.into_iter().collect(),
            FlagFile::Unavailable { path, error },
        ),
    }
}
