// UI module for geoclock
// Draws the clock screen and the help overlay

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub use screens::clock::canvas_viewport;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    screens::clock::render_clock(app, f);

    if app.show_help {
        let area = f.area();
        screens::help::render_help_popup(f, area);
    }
}
