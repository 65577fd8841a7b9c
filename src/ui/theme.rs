//! UI Theme - Shared colors and styling constants

use macroquad::prelude::Color;

// =============================================================================
// Base UI Colors
// =============================================================================

/// App background
pub const BG_COLOR: Color = Color::new(0.059, 0.067, 0.082, 1.0);

/// Sidebar and panel background
pub const PANEL_BG: Color = Color::new(0.086, 0.094, 0.114, 1.0);

/// Card background
pub const CARD_BG: Color = Color::new(0.11, 0.118, 0.14, 1.0);

/// Hovered list row / card
pub const CARD_HOVER: Color = Color::new(0.14, 0.15, 0.18, 1.0);

/// Panel and card borders
pub const BORDER_COLOR: Color = Color::new(0.2, 0.21, 0.25, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.93, 0.93, 0.95, 1.0);

/// Secondary text
pub const TEXT_MUTED: Color = Color::new(0.63, 0.63, 0.68, 1.0);

/// Dimmed text (placeholders, hints)
pub const TEXT_DIM: Color = Color::new(0.42, 0.42, 0.47, 1.0);

// =============================================================================
// Accents
// =============================================================================

/// Primary accent (buttons, selection)
pub const ACCENT_COLOR: Color = Color::new(0.231, 0.51, 0.965, 1.0);

/// Destructive actions and error text
pub const DESTRUCTIVE_COLOR: Color = Color::new(0.863, 0.149, 0.149, 1.0);

/// Selection outline in the viewport
pub const SELECTION_COLOR: Color = Color::new(0.98, 0.8, 0.08, 1.0);

/// Disabled button fill
pub const DISABLED_BG: Color = Color::new(0.2, 0.2, 0.22, 1.0);

/// Dark overlay behind modals
pub const MODAL_SHADE: Color = Color::new(0.0, 0.0, 0.0, 0.7);

// =============================================================================
// Font Sizes
// =============================================================================

/// Page title text size
pub const FONT_SIZE_TITLE: f32 = 28.0;

/// Header/title text size
pub const FONT_SIZE_HEADER: f32 = 18.0;

/// Standard content text size
pub const FONT_SIZE_CONTENT: f32 = 15.0;

/// Small/detail text size
pub const FONT_SIZE_SMALL: f32 = 13.0;
