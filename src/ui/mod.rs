pub mod components;
pub mod shortcuts;
pub mod tui;
