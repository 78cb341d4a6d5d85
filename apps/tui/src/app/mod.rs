// App module for geoclock
// Holds the running engine and maps terminal keys onto clock commands

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::App;
