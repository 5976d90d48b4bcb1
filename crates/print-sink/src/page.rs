//! In-memory page raster.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use layout_engine::{Rect, Size};

/// Opaque white, the page background.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// One page being rendered, as a white-backed RGBA raster.
///
/// Drawing clips at the page edges, so placements pushed out by margins
/// lose the overhang instead of failing.
#[derive(Debug, Clone)]
pub struct PageCanvas {
    image: RgbaImage,
}

impl PageCanvas {
    /// Create a blank white page of the given pixel size.
    pub fn new(size: Size) -> Self {
        Self {
            image: RgbaImage::from_pixel(size.width, size.height, WHITE),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    /// Fill a rectangle with white, clipped to the page.
    pub fn fill_white(&mut self, rect: Rect) {
        let x_end = rect.x.saturating_add(rect.width).min(self.image.width());
        let y_end = rect.y.saturating_add(rect.height).min(self.image.height());
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                self.image.put_pixel(x, y, WHITE);
            }
        }
    }

    /// Draw content into `dest`, scaling it to the destination size first.
    ///
    /// The content is alpha-composited over the page and clipped at the
    /// page edges.
    pub fn draw(&mut self, content: &DynamicImage, dest: Rect) {
        let scaled = if content.width() == dest.width && content.height() == dest.height {
            content.to_rgba8()
        } else {
            content
                .resize_exact(dest.width, dest.height, FilterType::Lanczos3)
                .to_rgba8()
        };

        for (dx, dy, pixel) in scaled.enumerate_pixels() {
            let target_x = dest.x.saturating_add(dx);
            let target_y = dest.y.saturating_add(dy);
            if target_x < self.image.width() && target_y < self.image.height() {
                let alpha = pixel[3] as f32 / 255.0;
                if alpha > 0.99 {
                    self.image.put_pixel(target_x, target_y, *pixel);
                } else if alpha > 0.01 {
                    let bg = self.image.get_pixel(target_x, target_y);
                    let blended = blend_pixel(bg, pixel, alpha);
                    self.image.put_pixel(target_x, target_y, blended);
                }
            }
        }
    }

    /// Reset the page to blank white.
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = WHITE;
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let inv = 1.0 - alpha;
    Rgba([
        (fg[0] as f32 * alpha + bg[0] as f32 * inv) as u8,
        (fg[1] as f32 * alpha + bg[1] as f32 * inv) as u8,
        (fg[2] as f32 * alpha + bg[2] as f32 * inv) as u8,
        255,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn solid_image(width: u32, height: u32, color: Rgba<u8>) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, color))
    }

    #[test]
    fn test_new_page_is_white() {
        let page = PageCanvas::new(Size::new(100, 50));
        assert_eq!(page.size(), Size::new(100, 50));
        assert_eq!(page.image().get_pixel(0, 0), &WHITE);
        assert_eq!(page.image().get_pixel(99, 49), &WHITE);
    }

    #[test]
    fn test_draw_places_content_at_dest() {
        let mut page = PageCanvas::new(Size::new(100, 100));
        let content = solid_image(10, 10, BLACK);
        page.draw(&content, Rect::new(20, 30, 10, 10));

        assert_eq!(page.image().get_pixel(20, 30), &BLACK);
        assert_eq!(page.image().get_pixel(29, 39), &BLACK);
        assert_eq!(page.image().get_pixel(19, 30), &WHITE);
        assert_eq!(page.image().get_pixel(30, 40), &WHITE);
    }

    #[test]
    fn test_draw_scales_content_to_dest() {
        let mut page = PageCanvas::new(Size::new(100, 100));
        let content = solid_image(4, 4, BLACK);
        page.draw(&content, Rect::new(0, 0, 50, 50));

        assert_eq!(page.image().get_pixel(25, 25), &BLACK);
        assert_eq!(page.image().get_pixel(60, 60), &WHITE);
    }

    #[test]
    fn test_draw_clips_at_page_edge() {
        let mut page = PageCanvas::new(Size::new(100, 100));
        let content = solid_image(50, 50, BLACK);
        // Partially out of bounds
        page.draw(&content, Rect::new(80, 80, 50, 50));

        assert_eq!(page.image().get_pixel(99, 99), &BLACK);
    }

    #[test]
    fn test_transparent_content_blends_over_white() {
        let mut page = PageCanvas::new(Size::new(10, 10));
        let content = solid_image(10, 10, Rgba([0, 0, 0, 128]));
        page.draw(&content, Rect::new(0, 0, 10, 10));

        let px = page.image().get_pixel(5, 5);
        assert!(px[0] > 100 && px[0] < 150, "blended gray, got {px:?}");
    }

    #[test]
    fn test_fill_white_clips() {
        let mut page = PageCanvas::new(Size::new(10, 10));
        let content = solid_image(10, 10, BLACK);
        page.draw(&content, Rect::new(0, 0, 10, 10));

        page.fill_white(Rect::new(5, 5, 100, 100));
        assert_eq!(page.image().get_pixel(4, 4), &BLACK);
        assert_eq!(page.image().get_pixel(5, 5), &WHITE);
        assert_eq!(page.image().get_pixel(9, 9), &WHITE);
    }

    #[test]
    fn test_clear_resets_page() {
        let mut page = PageCanvas::new(Size::new(10, 10));
        page.draw(&solid_image(10, 10, BLACK), Rect::new(0, 0, 10, 10));
        page.clear();
        assert_eq!(page.image().get_pixel(5, 5), &WHITE);
    }
}
