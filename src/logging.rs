// Logger setup for the binary. Library code only uses the `log` macros.
use anyhow::Result;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Installs a stderr logger; stdout stays reserved for command output.
pub fn init(level: LevelFilter) -> Result<()> {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)?;
    Ok(())
}
