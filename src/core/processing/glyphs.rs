//! Colorbar annotations: tick values and the product label, rasterized with
//! rusttype from an embedded DejaVu Sans Mono.
use image::{Rgb, RgbImage};
use rusttype::{Font, Scale, point};

use crate::error::{Error, Result};

const FONT_DATA: &[u8] = include_bytes!("../../../assets/DejaVuSansMono.ttf");

pub struct TextPainter {
    font: Font<'static>,
    scale: Scale,
}

impl TextPainter {
    pub fn new(font_px: f32) -> Result<Self> {
        let font = Font::try_from_bytes(FONT_DATA)
            .ok_or_else(|| Error::UnsupportedFormat("embedded colorbar font".to_string()))?;
        Ok(Self {
            font,
            scale: Scale::uniform(font_px),
        })
    }

    /// Height of one line of text, ascent to descent.
    pub fn line_height(&self) -> u32 {
        let v = self.font.v_metrics(self.scale);
        (v.ascent - v.descent).ceil() as u32
    }

    /// Horizontal advance of `text`.
    pub fn text_width(&self, text: &str) -> u32 {
        self.font
            .layout(text, self.scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .map_or(0, |w| w.ceil().max(0.0) as u32)
    }

    /// Calls `plot(u, v, coverage)` for every covered pixel, with `u` along
    /// the baseline and `v` down from the top of the line.
    fn rasterize(&self, text: &str, mut plot: impl FnMut(i32, i32, f32)) {
        let ascent = self.font.v_metrics(self.scale).ascent;
        for glyph in self.font.layout(text, self.scale, point(0.0, ascent)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    plot(bb.min.x + gx as i32, bb.min.y + gy as i32, coverage)
                });
            }
        }
    }

    /// Draw `text` left to right with its line box at (`x`, `top`).
    pub fn draw(&self, canvas: &mut RgbImage, text: &str, x: i32, top: i32, color: Rgb<u8>) {
        self.rasterize(text, |u, v, c| blend(canvas, x + u, top + v, color, c));
    }

    /// Draw `text` reading bottom to top; the line box's left edge is at `x`
    /// and the text starts at row `bottom`.
    pub fn draw_vertical(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        x: i32,
        bottom: i32,
        color: Rgb<u8>,
    ) {
        self.rasterize(text, |u, v, c| blend(canvas, x + v, bottom - u, color, c));
    }
}

fn blend(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let a = coverage.clamp(0.0, 1.0);
    let px = canvas.get_pixel_mut(x, y);
    for (c, ink) in px.0.iter_mut().zip(color.0) {
        *c = (*c as f32 * (1.0 - a) + ink as f32 * a).round() as u8;
    }
}

/// Tick value text, two decimals like the display ranges it annotates.
pub fn format_tick(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn inked(img: &RgbImage) -> Vec<(u32, u32)> {
        img.enumerate_pixels()
            .filter(|(_, _, p)| **p != WHITE)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn metrics_grow_with_text() {
        let painter = TextPainter::new(12.0).unwrap();
        assert!(painter.line_height() >= 12);
        assert_eq!(painter.text_width(""), 0);
        let one = painter.text_width("0");
        assert!(one > 0);
        // monospace: four glyphs are four advances
        let four = painter.text_width("0.40");
        assert!(four >= 4 * one - 1 && four <= 4 * one + 1);
    }

    #[test]
    fn horizontal_text_stays_in_its_box() {
        let painter = TextPainter::new(12.0).unwrap();
        let mut img = RgbImage::from_pixel(60, 30, WHITE);
        painter.draw(&mut img, "1.00", 5, 8, Rgb([0, 0, 0]));
        let ink = inked(&img);
        assert!(!ink.is_empty());
        let w = painter.text_width("1.00");
        let h = painter.line_height();
        // one pixel of slack for antialiased edges
        for (x, y) in ink {
            assert!((4..=5 + w).contains(&x), "x={x}");
            assert!((7..=8 + h).contains(&y), "y={y}");
        }
    }

    #[test]
    fn vertical_text_runs_upward() {
        let painter = TextPainter::new(12.0).unwrap();
        let mut img = RgbImage::from_pixel(30, 120, WHITE);
        painter.draw_vertical(&mut img, "NDVI", 4, 100, Rgb([0, 0, 0]));
        let ink = inked(&img);
        assert!(!ink.is_empty());
        let len = painter.text_width("NDVI");
        let h = painter.line_height();
        for (x, y) in ink {
            assert!((3..=4 + h).contains(&x), "x={x}");
            assert!((99 - len..=101).contains(&y), "y={y}");
        }
    }

    #[test]
    fn drawing_off_canvas_is_clipped() {
        let painter = TextPainter::new(12.0).unwrap();
        let mut img = RgbImage::from_pixel(4, 4, WHITE);
        painter.draw(&mut img, "NDVI", -20, -20, Rgb([0, 0, 0]));
        painter.draw_vertical(&mut img, "NDVI", 50, 2, Rgb([0, 0, 0]));
        assert!(inked(&img).is_empty());
    }

    #[test]
    fn ticks_use_two_decimals() {
        assert_eq!(format_tick(0.4), "0.40");
        assert_eq!(format_tick(0.2), "0.20");
        assert_eq!(format_tick(-1.0), "-1.00");
    }
}
