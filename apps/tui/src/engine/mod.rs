// Headless clock core: time resolution, roulette, phase cross-fade,
// viewport transform and derived geometry.

pub mod frame;
pub mod geometry;
pub mod input;
pub mod phase;
pub mod roulette;
pub mod time_source;
pub mod viewport;

pub use frame::{Engine, FrameState};
pub use input::ClockCommand;
pub use time_source::{ClockSource, FixedClock, SystemClock, TimeValue};
pub use viewport::{Transform, Viewport};
