//! Screen building for the 16x2 character display

pub mod renderer;

pub use renderer::{Renderer, Screen, COLS, ROWS};
