//! Input contract: the fixed action set and where the frame loop reads it from.
//!
//! # Invariants
//! - The viewer core consumes actions, never raw key codes.
//! - Cursor samples do not go through this crate; they are delivered to the
//!   view context directly by the event pump.

pub mod action;
pub mod bindings;
pub mod source;

pub use action::{Action, Direction};
pub use bindings::KeyBindings;
pub use source::{InputSnapshot, InputSource};
