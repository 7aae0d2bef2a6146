//! Process signal setup.

/// Ignore SIGPIPE so a reader closing stdout surfaces as an `EPIPE` write
/// error instead of killing the process.
#[cfg(unix)]
pub fn ignore_sigpipe() {
    // SAFETY: SIG_IGN installs no handler code; the disposition is
    // process-wide and only changed here.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_IGN);
    }
}

#[cfg(not(unix))]
pub fn ignore_sigpipe() {}
