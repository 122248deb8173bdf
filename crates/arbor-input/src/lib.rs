//! Pointer event delivery with explicit subscription lifetimes.
//!
//! The embedding window loop forwards winit events into an [`InputHub`];
//! each connected controller holds an [`InputBinding`] and drains its queue
//! once per frame. Dropping the binding unregisters it, so listener
//! registration and removal are paired by construction rather than guarded
//! at runtime.

mod event;
mod hub;

pub use event::{PointerEvent, scroll_lines, window_to_ndc};
pub use hub::{InputBinding, InputHub};

pub use winit::event::MouseButton;
