//! Run-mode state and events

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{EyeSide, Mode};
