//! Camera-facing text billboards.
//!
//! A label is described here and rasterized elsewhere (see
//! `renderer::traits::LabelRasterizer`); the engine only needs to know the
//! text, colors and canvas geometry, and which bitmap the renderer should use.

use crate::api::types::LabelTextureId;

const ELLIPSIS: &str = "...";

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);
    pub const RED: Rgba = Rgba([255, 0, 0, 255]);
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);

    /// CSS color string for canvas APIs.
    pub fn css(&self) -> String {
        let [r, g, b, a] = self.0;
        format!("rgba({r}, {g}, {b}, {})", a as f32 / 255.0)
    }
}

/// Canvas and font geometry shared by every label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub font_px: u32,
    pub font_family: String,
    /// Baseline origin of the first glyph, in canvas pixels.
    pub origin: (f32, f32),
    pub outline_width: f32,
    /// Nominal horizontal advance as a fraction of the font size.
    pub glyph_advance: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            canvas_width: 256,
            canvas_height: 128,
            font_px: 32,
            font_family: "Arial".to_string(),
            origin: (10.0, 32.0),
            outline_width: 2.0,
            glyph_advance: 0.55,
        }
    }
}

impl LabelStyle {
    /// Width / height of the billboard (fixed 2:1 for the default canvas).
    pub fn aspect(&self) -> f32 {
        self.canvas_width as f32 / self.canvas_height as f32
    }

    /// CSS font shorthand, e.g. `32px Arial`.
    pub fn font(&self) -> String {
        format!("{}px {}", self.font_px, self.font_family)
    }

    /// Pixels between the text origin and the right canvas edge.
    pub fn room(&self) -> f32 {
        (self.canvas_width as f32 - self.origin.0).max(0.0)
    }

    /// Width of `text` assuming every glyph has the nominal advance. Used
    /// where no font metrics are available.
    pub fn estimate_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.font_px as f32 * self.glyph_advance
    }

    /// Truncate `text` to the canvas width using nominal glyph advances.
    pub fn fit_text(&self, text: &str) -> String {
        self.fit_text_by(text, |s| self.estimate_width(s))
    }

    /// Truncate `text` so that `measure` says it fits the canvas, ending in
    /// `...` when cut. `measure` returns a pixel width in the label font.
    pub fn fit_text_by(&self, text: &str, mut measure: impl FnMut(&str) -> f32) -> String {
        let room = self.room();
        if measure(text) <= room {
            return text.to_string();
        }
        let cuts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        for &end in cuts.iter().rev() {
            let candidate = format!("{}{}", &text[..end], ELLIPSIS);
            if measure(&candidate) <= room {
                return candidate;
            }
        }
        ELLIPSIS.to_string()
    }
}

/// Billboard component: text drawn onto a canvas, shown as a sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelComponent {
    /// Full text. The rasterizer fits it to the canvas when drawing.
    pub text: String,
    pub fill: Rgba,
    pub outline: Rgba,
    pub style: LabelStyle,
    /// Labels draw on top of geometry.
    pub depth_test: bool,
    /// Rasterized bitmap, filled in by the runner on the first frame.
    pub texture: Option<LabelTextureId>,
    /// Set when rasterization failed; the label is not retried.
    pub raster_failed: bool,
}

impl LabelComponent {
    /// Name label: red glyphs for hazardous objects, white otherwise, black outline.
    pub fn new(text: &str, hazardous: bool) -> Self {
        Self::with_style(text, hazardous, LabelStyle::default())
    }

    pub fn with_style(text: &str, hazardous: bool, style: LabelStyle) -> Self {
        Self {
            text: text.to_string(),
            fill: if hazardous { Rgba::RED } else { Rgba::WHITE },
            outline: Rgba::BLACK,
            style,
            depth_test: false,
            texture: None,
            raster_failed: false,
        }
    }

    pub fn needs_raster(&self) -> bool {
        self.texture.is_none() && !self.raster_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_flag_picks_fill() {
        assert_eq!(LabelComponent::new("Apophis", true).fill, Rgba::RED);
        assert_eq!(LabelComponent::new("Bennu", false).fill, Rgba::WHITE);
        assert_eq!(LabelComponent::new("Bennu", false).outline, Rgba::BLACK);
    }

    #[test]
    fn default_canvas_is_two_to_one() {
        assert_eq!(LabelStyle::default().aspect(), 2.0);
    }

    #[test]
    fn short_names_are_kept() {
        let label = LabelComponent::new("(2024 AB)", false);
        assert_eq!(label.text, "(2024 AB)");
    }

    #[test]
    fn long_names_are_truncated_with_ellipsis() {
        let style = LabelStyle::default();
        // 13 nominal glyphs of 17.6 px fit in 246 px, 14 do not
        let fitted = style.fit_text("455594 (2002 VX94)");
        assert_eq!(fitted, "455594 (20...");
        let label = LabelComponent::new("455594 (2002 VX94)", true);
        assert_eq!(label.text, "455594 (2002 VX94)");
    }

    #[test]
    fn measured_text_fits_more_than_the_estimate() {
        let style = LabelStyle::default();
        let name = "441987 (2010 NY65)";
        assert!(style.fit_text(name).ends_with("..."));
        // Narrow glyphs: 13 px each, 18 chars = 234 px
        assert_eq!(style.fit_text_by(name, |s| s.chars().count() as f32 * 13.0), name);

        // 20 px each: "...": 60 px, leaves room for 9 chars
        let fitted = style.fit_text_by(name, |s| s.chars().count() as f32 * 20.0);
        assert_eq!(fitted, "441987 (2...");
    }

    #[test]
    fn nothing_fits_leaves_only_the_ellipsis() {
        let style = LabelStyle::default();
        assert_eq!(style.fit_text_by("Eros", |_| 1000.0), "...");
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let style = LabelStyle::default();
        let text = "ééééééééééééééé";
        let fitted = style.fit_text(text);
        assert_eq!(fitted.chars().count(), 13);
        assert!(fitted.ends_with("..."));
    }

    #[test]
    fn css_strings() {
        assert_eq!(Rgba::RED.css(), "rgba(255, 0, 0, 1)");
        assert_eq!(LabelStyle::default().font(), "32px Arial");
    }
}
