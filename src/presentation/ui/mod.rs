pub mod display;
pub mod progress_bar;

pub use display::{helpers, DisplayHelper};
pub use progress_bar::TerminalProgress;
