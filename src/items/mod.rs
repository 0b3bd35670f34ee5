//! Read-only view models built from calculator state.

mod button;
mod value;

pub use button::{ButtonItem, ButtonVariant, alternate_action, keypad};
pub use value::{buffer_item, stack_items};
