// Export the clock core for the binary, headless runs and tests
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod logging;

pub use domain::{PhaseMode, Point, RouletteState, TimeMode};
pub use engine::{ClockCommand, Engine, FrameState};
