//! Terminal front-end
//!
//! Line-oriented: events are printed as they happen and commands are read
//! one per line from stdin.

mod canvas;
mod input;
mod view;

pub use canvas::TerminalCanvas;
pub use input::{parse_line, HELP};
pub use view::TerminalView;
