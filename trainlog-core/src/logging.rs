use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub use env_logger::Target;

pub fn init_logger(level: LevelFilter, target: Target) {
    let mut builder = env_logger::Builder::new();
    builder
        .format(move |buf, record| {
            writeln!(
                buf,
                "{}: {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(target)
        .filter_level(level);

    let _ = builder.try_init();

    log::set_max_level(level);
}

/// Sends log lines to `path` instead of the terminal, which the interactive
/// form owns.
pub fn init_file_logger(level: LevelFilter, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    init_logger(level, Target::Pipe(Box::new(file)));
    Ok(())
}

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    let lvl = match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => return None,
    };
    Some(lvl)
}

pub fn set_log_level(level: &str) -> bool {
    match parse_level(level) {
        Some(lvl) => {
            init_logger(lvl, Target::Stderr);
            true
        }
        None => false,
    }
}
