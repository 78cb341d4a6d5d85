mod app;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use color_eyre::Result;
use geoclock::cli::CliArgs;
use geoclock::config::{self, ClockConfig};
use geoclock::engine::Viewport;
use geoclock::logging;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = ClockConfig::load()?;
    let headless = args.headless || !is_terminal();
    let log_target = logging::select_target(config.log_file.as_deref(), !headless);
    logging::init(args.debug || config::debug_enabled(), &log_target)?;
    log::debug!("starting with {config:?}, logging to {log_target:?}");

    if headless {
        let options = event::HeadlessOptions {
            frames: args.frames,
            tick_ms: config.tick_rate_ms,
            viewport: Viewport::new(args.width, args.height),
            json: args.json,
        };
        let mut engine = config.build_engine();
        return event::run_headless(&mut engine, &options);
    }

    let mut app = App::new(&config);
    let mut terminal = terminal::setup()?;

    let result = event::run(
        &mut terminal,
        &mut app,
        Duration::from_millis(config.tick_rate_ms),
    )
    .await;

    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
