// SPDX-License-Identifier: MPL-2.0
//! Design tokens: the shared palette and size scales of the interface.
//!
//! ```
//! use iced_cull::ui::design_tokens::{opacity, palette, spacing};
//! use iced::Color;
//!
//! let overlay_bg = Color {
//!     a: opacity::OVERLAY_STRONG,
//!     ..palette::BLACK
//! };
//! let padding = spacing::MD; // 16px
//! ```

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use iced::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_700: Color = Color::from_rgb(0.3, 0.3, 0.3);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);
    pub const GRAY_100: Color = Color::from_rgb(0.85, 0.85, 0.85);

    pub const PRIMARY_400: Color = Color::from_rgb(0.4, 0.7, 1.0);
    pub const PRIMARY_600: Color = Color::from_rgb(0.2, 0.5, 0.8);

    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OVERLAY_HOVER: f32 = 0.8;
}

// ============================================================================
// Spacing Scale (8px grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
}

// ============================================================================
// Component Sizes
// ============================================================================

pub mod sizing {
    pub const BUTTON_HEIGHT: f32 = 36.0;
    pub const TOAST_WIDTH: f32 = 320.0;

    /// Edge of a batch strip thumbnail.
    pub const THUMBNAIL: f32 = 72.0;

    /// Edge of a thumbnail in the queue overview.
    pub const OVERVIEW_THUMBNAIL: f32 = 24.0;
    /// Overview panel: one set per row, outlines, gaps and padding included.
    pub const OVERVIEW_WIDTH: f32 = 8.0 * (OVERVIEW_THUMBNAIL + 2.0 * super::border::WIDTH_MD)
        + 7.0 * super::spacing::XXS
        + 2.0 * super::spacing::XS;
}

// ============================================================================
// Typography
// ============================================================================

pub mod typography {
    pub const TITLE_MD: f32 = 20.0;
    pub const TITLE_SM: f32 = 18.0;
    pub const BODY_LG: f32 = 16.0;
    pub const BODY: f32 = 14.0;
    pub const CAPTION: f32 = 12.0;
}

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
    pub const WIDTH_MD: f32 = 2.0;

    /// Outline of the selected thumbnail.
    pub const WIDTH_SELECTED: f32 = 3.0;
}

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const MD: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 8.0,
    };
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::OVERLAY_MEDIUM > opacity::OVERLAY_SUBTLE);
    assert!(opacity::OVERLAY_HOVER > opacity::OVERLAY_STRONG);

    assert!(typography::TITLE_MD > typography::TITLE_SM);
    assert!(typography::BODY_LG > typography::BODY);
    assert!(typography::BODY > typography::CAPTION);

    assert!(border::WIDTH_SELECTED > border::WIDTH_MD);
    assert!(border::WIDTH_MD > border::WIDTH_SM);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_is_consistent() {
        assert_eq!(spacing::MD, spacing::XS * 2.0);
        assert_eq!(spacing::LG, spacing::MD * 1.5);
    }

    #[test]
    fn thumbnails_fit_a_batch_row() {
        // Eight thumbnails plus gaps stay under a typical window width
        let row = 8.0 * sizing::THUMBNAIL + 7.0 * spacing::XS;
        assert!(row < 1024.0);
    }

    #[test]
    fn strip_and_overview_share_the_default_window() {
        let strip = 8.0 * (sizing::THUMBNAIL + 2.0 * border::WIDTH_SELECTED)
            + 7.0 * spacing::XS
            + 2.0 * spacing::XS;
        let used = strip + spacing::SM + sizing::OVERVIEW_WIDTH + 2.0 * spacing::MD;
        assert!(used <= crate::app::WINDOW_DEFAULT_WIDTH as f32);
    }
}
