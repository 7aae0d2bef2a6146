//! CLI argument definitions for sshauth.

use clap::{ArgAction, Parser};

/// Extra help shown after the flag list.
const AFTER_HELP: &str = "\
Note: The final S3 path will be: s3://bucket/key/username

CONFIGURATION
Default configuration is done by defining flags in /etc/sshauth/sshauth.conf
(or the file named by SSHAUTH_FLAG_FILE), in the same way as on the command
line. Single-dash long flags in the file (-bucket myBucket) are read as
their double-dash form. Flags given on the command line override the ones
in the file.

AUTHLOG
When the authlog feature is enabled sshauth injects a command option for
each authorized key. The command is the one given by --authlog and receives
three arguments: the key name, the bucket, and the full key path. The
command originally supplied by the client is available in the
SSH_ORIGINAL_COMMAND environment variable.

Create sshlogger.sh:
  sshauth --sshlogger > /usr/local/bin/sshlogger.sh

Run sshauth with authlog enabled:
  sshauth --bucket myBucket --authlog /usr/local/bin/sshlogger.sh myUser";

/// Read authorized keys from S3 to be used with AuthorizedKeysCommand in sshd.
///
/// Every object under s3://<bucket>/<key>/<username>/ is printed to stdout
/// as one authorized key.
#[derive(Parser, Debug)]
#[command(name = "sshauth")]
#[command(version, about, long_about = None, after_help = AFTER_HELP)]
pub struct Cli {
    // === S3 Configuration ===
    /// S3 bucket name
    #[arg(long, env = "SSHAUTH_BUCKET", overrides_with = "bucket")]
    pub bucket: Option<String>,

    /// S3 key prefix under which user directories live
    #[arg(long, env = "SSHAUTH_KEY", default_value = "", overrides_with = "key")]
    pub key: String,

    /// AWS region, e.g. eu-west-1
    #[arg(long, env = "AWS_REGION", overrides_with = "region")]
    pub region: Option<String>,

    /// Custom S3 endpoint URL (S3-compatible stores, LocalStack)
    #[arg(long, env = "SSHAUTH_S3_ENDPOINT", overrides_with = "endpoint")]
    pub endpoint: Option<String>,

    // === Authlog ===
    /// Path to the sshlogger script injected as a command option
    #[arg(long, value_name = "PATH", overrides_with = "authlog")]
    pub authlog: Option<String>,

    /// Print the sshlogger script to stdout and exit
    #[arg(long, overrides_with = "sshlogger")]
    pub sshlogger: bool,

    // === Logging Options ===
    /// Enable logging via syslog
    #[arg(long, overrides_with = "syslog")]
    pub syslog: bool,

    /// Set to false to disable logging
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        value_name = "BOOL",
        overrides_with = "logging"
    )]
    pub logging: bool,

    /// Enable debug output
    #[arg(long, overrides_with = "debug")]
    pub debug: bool,

    /// User whose keys are printed
    #[arg(value_name = "USERNAME")]
    pub users: Vec<String>,
}

/// A usage problem found after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    MissingBucket,
    Username,
}

impl std::fmt::Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBucket => write!(f, "Error: S3 bucket is required"),
            Self::Username => write!(f, "Error: Username is required"),
        }
    }
}

/// Validated inputs for one key lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub bucket: String,
    pub prefix: String,
    pub user: String,
    pub authlog: Option<String>,
}

impl Cli {
    /// Check the bucket and the single positional user name.
    pub fn target(&self) -> Result<Target, UsageError> {
        let bucket = self
            .bucket
            .clone()
            .filter(|b| !b.is_empty())
            .ok_or(UsageError::MissingBucket)?;

        let user = match self.users.as_slice() {
            [user] if !user.is_empty() => user.clone(),
            _ => return Err(UsageError::Username),
        };

        Ok(Target {
            bucket,
            prefix: self.key.clone(),
            user,
            authlog: self.authlog.clone().filter(|p| !p.is_empty()),
        })
    }
}
