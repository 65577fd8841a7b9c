//! Immediate-mode UI toolkit
//!
//! - Rectangle-based layout, rebuilt every frame
//! - Widgets report clicks through return values
//! - Macroquad for rendering and input

mod rect;
mod widgets;
mod input;
mod icons;
mod theme;
mod actions;
mod dialog;
mod sidebar;
mod text_input;
mod toast;

pub use rect::*;
pub use widgets::*;
pub use input::*;
pub use icons::*;
pub use theme::*;
pub use actions::*;
pub use dialog::*;
pub use sidebar::*;
pub use text_input::*;
pub use toast::*;
