use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

const DEFAULT_LOG_FILE: &str = "geoclock.log";

/// Where log records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// An explicit file always wins. The interactive UI owns the terminal, so it
/// falls back to a file in the temp dir instead of stderr.
pub fn select_target(log_file: Option<&Path>, interactive: bool) -> LogTarget {
    match log_file {
        Some(path) => LogTarget::File(path.to_path_buf()),
        None if interactive => LogTarget::File(std::env::temp_dir().join(DEFAULT_LOG_FILE)),
        None => LogTarget::Stderr,
    }
}

/// Installs the global logger. `RUST_LOG` wins over `debug`.
pub fn init(debug: bool, target: &LogTarget) -> color_eyre::Result<()> {
    let default_level = if debug { "debug" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    if debug && std::env::var_os("RUST_LOG").is_none() {
        builder.filter_module("geoclock", LevelFilter::Debug);
    }

    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
    }

    builder.try_init()?;
    Ok(())
}
