// App module for agri-dashboard
// Holds the selection state and maps key presses onto it

pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, SelectorState, CHART_TAB_COUNT};
