use env_logger::{Builder, Env, Target};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Sets up `env_logger`. `RUST_LOG` picks the filter (default `warn`).
///
/// Records go to `log_file` when one is given. Otherwise they go to stderr,
/// unless `terminal_owned` says the TUI is drawing there, in which case they are dropped.
pub fn init_logging(log_file: Option<&Path>, terminal_owned: bool) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });
    if let Some(pipe) = log_pipe(log_file, terminal_owned)? {
        builder.target(Target::Pipe(pipe));
    }
    // A second init (e.g. from tests) keeps the first logger.
    let _ = builder.try_init();
    Ok(())
}

fn log_pipe(
    log_file: Option<&Path>,
    terminal_owned: bool,
) -> io::Result<Option<Box<dyn Write + Send>>> {
    match log_file {
        Some(path) => Ok(Some(Box::new(File::create(path)?))),
        None if terminal_owned => Ok(Some(Box::new(io::sink()))),
        None => Ok(None),
    }
}

// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_when_terminal_is_free() {
        assert!(log_pipe(None, false).unwrap().is_none());
    }

    #[test]
    fn test_records_dropped_while_tui_owns_terminal() {
        let mut pipe = log_pipe(None, true).unwrap().unwrap();
        writeln!(pipe, "not shown").unwrap();
    }

    #[test]
    fn test_log_file_wins() {
        let path = std::env::temp_dir().join("bizwordle_log_pipe_test.log");
        let mut pipe = log_pipe(Some(&path), true).unwrap().unwrap();
        writeln!(pipe, "hello").unwrap();
        drop(pipe);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let path = std::env::temp_dir().join("bizwordle_missing_dir").join("x.log");
        assert!(log_pipe(Some(&path), false).is_err());
    }
}
