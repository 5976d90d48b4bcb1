//! Text-label rasterization.
//!
//! Wraps and centers text on a white canvas sized to fit its lines, for
//! printing generated labels alongside regular images.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use tracing::debug;

/// Default label font size in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 48.0;

/// Blank border around the label text, in pixels.
const LABEL_INSET: u32 = 16;

const TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A font/scale pair used to measure, wrap, and draw label text.
pub struct LabelStyle<'a> {
    font: &'a FontRef<'a>,
    scale: PxScale,
}

impl<'a> LabelStyle<'a> {
    pub fn new(font: &'a FontRef<'a>, font_size: f32) -> Self {
        Self {
            font,
            scale: PxScale::from(font_size),
        }
    }

    /// Pixel width of `text` at this style, including kerning.
    pub fn measure(&self, text: &str) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0f32;
        let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

        for ch in text.chars() {
            let glyph_id = scaled.glyph_id(ch);
            if let Some(prev) = prev_glyph {
                width += scaled.kern(prev, glyph_id);
            }
            width += scaled.h_advance(glyph_id);
            prev_glyph = Some(glyph_id);
        }

        width.ceil() as u32
    }

    /// Line height at this style.
    pub fn line_height(&self) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as u32
    }

    /// Wrap `text` into lines no wider than `max_width` pixels.
    ///
    /// A single word wider than the limit is force-broken per character.
    pub fn wrap(&self, text: &str, max_width: u32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current_line = String::new();
        let mut current_width: u32 = 0;

        for word in text.split_inclusive(|c: char| c.is_whitespace()) {
            let word_width = self.measure(word);

            if current_width + word_width > max_width && !current_line.is_empty() {
                lines.push(current_line.trim_end().to_string());
                current_line = String::new();
                current_width = 0;
            }

            if word_width > max_width && current_line.is_empty() {
                let mut char_line = String::new();
                let mut char_width: u32 = 0;
                for ch in word.chars() {
                    let ch_w = self.measure(&ch.to_string());
                    if char_width + ch_w > max_width && !char_line.is_empty() {
                        lines.push(char_line);
                        char_line = String::new();
                        char_width = 0;
                    }
                    char_line.push(ch);
                    char_width += ch_w;
                }
                if !char_line.is_empty() {
                    current_line = char_line;
                    current_width = char_width;
                }
                continue;
            }

            current_line.push_str(word);
            current_width += word_width;
        }

        if !current_line.is_empty() {
            lines.push(current_line.trim_end().to_string());
        }

        if lines.is_empty() {
            lines.push(String::new());
        }

        lines
    }
}

/// Render `text` onto a white label of the given pixel width.
///
/// Input lines are kept, long lines are wrapped to the inset width, and each
/// line is drawn centered; the label height follows the line count.
pub fn render_label(font: &FontRef<'_>, text: &str, width: u32, font_size: f32) -> RgbaImage {
    let style = LabelStyle::new(font, font_size);
    let inner_width = width.saturating_sub(2 * LABEL_INSET).max(1);

    let lines: Vec<String> = if text.is_empty() {
        vec![String::new()]
    } else {
        text.lines()
            .flat_map(|line| style.wrap(line, inner_width))
            .collect()
    };

    let line_height = style.line_height();
    let height = line_height * lines.len() as u32 + 2 * LABEL_INSET;
    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);

    let mut y = LABEL_INSET as i32;
    for line in &lines {
        let line_width = style.measure(line) as i32;
        let x = ((width as i32) - line_width).max(0) / 2;
        draw_text_mut(&mut img, TEXT_COLOR, x, y, style.scale, font, line);
        y += line_height as i32;
    }

    debug!(width, height, lines = lines.len(), "Rendered text label");
    img
}
