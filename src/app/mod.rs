//! UI adapters: they own the tick sources, translate key events into
//! engine calls and expose the state the widgets draw.
pub mod timer;
pub mod typing;

pub use timer::{Phase, PickerField, TimerApp};
pub use typing::TypingApp;
