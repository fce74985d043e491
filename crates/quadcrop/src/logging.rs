// Author: Dustin Pilgrim
// License: MIT

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::pin;
use std::task::{Context, Poll, Waker};

use eventline::runtime::{self, LogLevel};

use crate::paths::{default_log_path, ensure_parent_dir};

pub const LOG_FILE: &str = "quadcrop.log";

/// Log file in use: `--log-file` if given, else the state dir default.
pub fn log_path(overridden: Option<&Path>) -> PathBuf {
    overridden
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_log_path(LOG_FILE))
}

pub fn level_for(verbose: bool) -> LogLevel {
    if verbose { LogLevel::Debug } else { LogLevel::Info }
}

/// File output always; console + colour only when verbose.
pub fn init_logging(log_path: &Path, verbose: bool) -> Result<(), String> {
    ensure_parent_dir(log_path).map_err(|e| format!("create log dir: {e}"))?;

    block_on(runtime::init());

    runtime::enable_file_output(log_path).map_err(|e| format!("enable file output: {e}"))?;
    runtime::enable_console_output(verbose);
    runtime::enable_console_color(verbose);
    runtime::set_log_level(level_for(verbose));

    Ok(())
}

// eventline's init is async but never actually waits on anything, so a
// busy-polling runner is enough.
fn block_on<F: Future>(fut: F) -> F::Output {
    let mut fut = pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());

    loop {
        if let Poll::Ready(v) = fut.as_mut().poll(&mut cx) {
            return v;
        }
        std::thread::yield_now();
    }
}
