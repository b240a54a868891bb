//! Theme module for keepsake-tui
//!
//! This module provides a centralized color palette and styling constants
//! for the "midnight valentine" aesthetic.

use ratatui::style::Color;
use ratatui::symbols::border;

/// Rounded corners for card-style blocks
pub const ROUNDED_BORDERS: border::Set = border::ROUNDED;

// ============================================================================
// Background Colors - Night Sky Palette
// ============================================================================

/// Primary background color - deepest night plum (#120a14)
pub const BG_PRIMARY: Color = Color::Rgb(18, 10, 20);

/// Secondary background color - slightly lighter (#1c1220)
pub const BG_SECONDARY: Color = Color::Rgb(28, 18, 32);

/// Tertiary background color - for highlighted areas (#2a1a30)
pub const BG_TERTIARY: Color = Color::Rgb(42, 26, 48);

/// Subtle border color (#33203a)
pub const BORDER_SUBTLE: Color = Color::Rgb(51, 32, 58);

// ============================================================================
// Accent Colors - Rose Primary
// ============================================================================

/// Primary rose accent color (#ff5e8a)
pub const ROSE_PRIMARY: Color = Color::Rgb(255, 94, 138);

/// Dimmed rose for secondary elements (#b04263)
pub const ROSE_DIM: Color = Color::Rgb(176, 66, 99);

/// Warm gold for highlights and the acceptance banner (#f5c06a)
pub const GOLD_ACCENT: Color = Color::Rgb(245, 192, 106);

/// Soft lavender for finished-state chrome (#9d8cff)
pub const LAVENDER: Color = Color::Rgb(157, 140, 255);

// ============================================================================
// Status Colors
// ============================================================================

/// Green success color (#4ade80)
pub const GREEN_SUCCESS: Color = Color::Rgb(74, 222, 128);

/// Amber warning color (#fbbf24)
pub const AMBER_WARNING: Color = Color::Rgb(251, 191, 36);

// ============================================================================
// Text Colors
// ============================================================================

/// Primary text color - warm white (#f4ecf2)
pub const TEXT_PRIMARY: Color = Color::Rgb(244, 236, 242);

/// Secondary text color - muted mauve (#b59ab0)
pub const TEXT_SECONDARY: Color = Color::Rgb(181, 154, 176);

/// Muted text color - for labels and hints (#70587a)
pub const TEXT_MUTED: Color = Color::Rgb(112, 88, 122);

/// Two-phase pulse between colors, driven by the animation tick
pub fn get_pulse_color(tick: u64, bright: Color, dim: Color) -> Color {
    if (tick / 4) % 2 == 0 { bright } else { dim }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_alternates() {
        assert_eq!(get_pulse_color(0, ROSE_PRIMARY, ROSE_DIM), ROSE_PRIMARY);
        assert_eq!(get_pulse_color(4, ROSE_PRIMARY, ROSE_DIM), ROSE_DIM);
        assert_eq!(get_pulse_color(8, ROSE_PRIMARY, ROSE_DIM), ROSE_PRIMARY);
    }
}
