use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use tracing::{debug, info};

use crate::core::params::DisplayRange;
use crate::core::processing::colormap::{ColorLut, ramp_color};
use crate::core::processing::glyphs::{TextPainter, format_tick};
use crate::core::processing::mask::MaskedRaster;
use crate::error::{Error, Result};
use crate::io::writers::jpeg::write_rgb_jpeg;
use crate::io::writers::metadata::{LegendMetadata, create_legend_sidecar};
use crate::io::writers::png::write_rgb_png;
use crate::types::{Colormap, OutputFormat, PixelCoord, Raster};

const MARKER_RADIUS: i32 = 4;
const MIN_CANVAS_HEIGHT: u32 = 16;
const MIN_BAR_WIDTH: u32 = 8;
const TEXT_PAD: u32 = 2;
const MIN_FONT_PX: f32 = 11.0;
const MAX_FONT_PX: f32 = 40.0;
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);

/// How one image is drawn: value range, ramp, mask color, marker and label.
#[derive(Debug, Clone)]
pub struct RenderSpec {
    pub range: DisplayRange,
    pub colormap: Colormap,
    pub mask_color: Rgb<u8>,
    pub marker_color: Rgb<u8>,
    pub center: Option<PixelCoord>,
    pub label: String,
}

impl RenderSpec {
    pub fn new(range: DisplayRange, label: impl Into<String>) -> Self {
        Self {
            range,
            colormap: Colormap::Gray,
            mask_color: Rgb([0, 0, 255]),
            marker_color: Rgb([255, 0, 0]),
            center: None,
            label: label.into(),
        }
    }

    pub fn with_center(mut self, center: Option<PixelCoord>) -> Self {
        self.center = center;
        self
    }
}

/// Canvas geometry: raster at the top-left, then the colorbar strip, its
/// tick values and the label reading bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLayout {
    pub plot_width: u32,
    pub plot_height: u32,
    pub bar_x: u32,
    pub bar_width: u32,
    pub tick_len: u32,
    pub tick_text_x: u32,
    pub label_x: u32,
    pub width: u32,
    pub height: u32,
}

impl CanvasLayout {
    /// `tick_text_width` is the widest tick value, `line_height` one line of
    /// text and `label_len` the label's length along the colorbar.
    pub fn new(rows: usize, cols: usize, tick_text_width: u32, line_height: u32, label_len: u32) -> Self {
        let plot_width = cols as u32;
        let plot_height = rows as u32;
        let bar_width = (plot_width / 25).max(MIN_BAR_WIDTH);
        let gap = bar_width / 2;
        let tick_len = (bar_width / 3).max(2);
        let bar_x = plot_width + gap;
        let tick_text_x = bar_x + bar_width + tick_len + TEXT_PAD;
        let label_x = tick_text_x + tick_text_width + 2 * TEXT_PAD;
        Self {
            plot_width,
            plot_height,
            bar_x,
            bar_width,
            tick_len,
            tick_text_x,
            label_x,
            width: label_x + line_height + TEXT_PAD,
            height: plot_height
                .max(MIN_CANVAS_HEIGHT)
                .max(label_len + 2 * TEXT_PAD),
        }
    }
}

/// Font size for a plot: grows with the raster, within readable bounds.
fn font_px(plot_height: usize) -> f32 {
    (plot_height as f32 / 60.0).clamp(MIN_FONT_PX, MAX_FONT_PX)
}

/// Drawing state for a single image; dropped once the file is written.
struct RenderContext<'a> {
    canvas: RgbImage,
    layout: CanvasLayout,
    lut: ColorLut,
    text: TextPainter,
    ticks: [String; 3],
    spec: &'a RenderSpec,
}

impl<'a> RenderContext<'a> {
    fn new(rows: usize, cols: usize, spec: &'a RenderSpec) -> Result<Self> {
        let text = TextPainter::new(font_px(rows))?;
        let DisplayRange { min, max } = spec.range;
        // top to bottom: vmax, midpoint, vmin
        let ticks = [max, (min + max) / 2.0, min].map(format_tick);
        let tick_text_width = ticks.iter().map(|t| text.text_width(t)).max().unwrap_or(0);
        let layout = CanvasLayout::new(
            rows,
            cols,
            tick_text_width,
            text.line_height(),
            text.text_width(&spec.label),
        );
        Ok(Self {
            canvas: RgbImage::from_pixel(layout.width, layout.height, BACKGROUND),
            layout,
            lut: ColorLut::new(spec.colormap),
            text,
            ticks,
            spec,
        })
    }

    fn draw_raster(&mut self, data: &MaskedRaster) {
        let DisplayRange { min, max } = self.spec.range;
        for ((row, col), &value) in data.data.indexed_iter() {
            let color = if data.valid[[row, col]] && value.is_finite() {
                self.lut.map(value, min, max)
            } else {
                self.spec.mask_color
            };
            self.canvas.put_pixel(col as u32, row as u32, color);
        }
    }

    /// Returns whether the marker landed inside the raster area.
    fn draw_marker(&mut self, center: PixelCoord) -> bool {
        let rows = self.layout.plot_height as usize;
        let cols = self.layout.plot_width as usize;
        if center.to_index(rows, cols).is_none() {
            debug!("Marker ({}, {}) outside {}x{} plot, skipped", center.x, center.y, cols, rows);
            return false;
        }
        draw_filled_circle_mut(
            &mut self.canvas,
            (center.x as i32, center.y as i32),
            MARKER_RADIUS,
            self.spec.marker_color,
        );
        true
    }

    fn draw_colorbar(&mut self) {
        let CanvasLayout {
            bar_x,
            bar_width,
            tick_len,
            height,
            ..
        } = self.layout;
        let span = (height - 1).max(1) as f64;
        for y in 0..height {
            let t = 1.0 - y as f64 / span;
            let color = ramp_color(self.spec.colormap, t);
            for x in bar_x..bar_x + bar_width {
                self.canvas.put_pixel(x, y, color);
            }
        }
        draw_hollow_rect_mut(
            &mut self.canvas,
            Rect::at(bar_x as i32, 0).of_size(bar_width, height),
            INK,
        );
        let right = (bar_x + bar_width) as f32;
        let line = self.text.line_height() as i32;
        let lowest_top = (height as i32 - line).max(0);
        let tick_rows = [0.0, (height - 1) as f32 / 2.0, (height - 1) as f32];
        for (y, value) in tick_rows.into_iter().zip(&self.ticks) {
            let y = y.round();
            draw_line_segment_mut(&mut self.canvas, (right, y), (right + tick_len as f32, y), INK);
            let top = (y as i32 - line / 2).clamp(0, lowest_top);
            self.text.draw(&mut self.canvas, value, self.layout.tick_text_x as i32, top, INK);
        }
    }

    /// Label centered along the colorbar, reading bottom to top.
    fn draw_label(&mut self) {
        let len = self.text.text_width(&self.spec.label) as i32;
        let bottom = (self.layout.height as i32 + len) / 2;
        self.text.draw_vertical(
            &mut self.canvas,
            &self.spec.label,
            self.layout.label_x as i32,
            bottom,
            INK,
        );
    }

    fn finish(self, output: &Path) -> Result<()> {
        let format = OutputFormat::from_path(output).ok_or_else(|| {
            Error::UnsupportedFormat(format!("cannot infer image format of {:?}", output))
        })?;
        match format {
            OutputFormat::Png => write_rgb_png(output, &self.canvas),
            OutputFormat::Jpeg => write_rgb_jpeg(output, &self.canvas),
        }
    }
}

/// Render a masked raster with colorbar and optional marker to `output`.
/// The colorbar carries tick values at vmax, the midpoint and vmin, and
/// `spec.label` beside it.
///
/// Masked or non-finite samples use `spec.mask_color`; finite values outside
/// the display range clip to the ends of the ramp. The parent directory must
/// already exist. A legend sidecar (`<output>.<ext>.json`) is written alongside.
pub fn render_masked(data: &MaskedRaster, output: &Path, spec: &RenderSpec) -> Result<CanvasLayout> {
    let (rows, cols) = data.dim();
    let mut ctx = RenderContext::new(rows, cols, spec)?;
    let layout = ctx.layout;

    ctx.draw_raster(data);
    let marked = spec.center.is_some_and(|c| ctx.draw_marker(c));
    ctx.draw_colorbar();
    ctx.draw_label();
    ctx.finish(output)?;

    let legend = LegendMetadata {
        label: spec.label.clone(),
        vmin: spec.range.min,
        vmax: spec.range.max,
        colormap: spec.colormap,
        mask_color: spec.mask_color.0,
        center: if marked { spec.center } else { None },
        plot_width: layout.plot_width,
        plot_height: layout.plot_height,
        colorbar_columns: [layout.bar_x, layout.bar_x + layout.bar_width],
        invalid_pixels: data.invalid_count(),
    };
    create_legend_sidecar(output, &legend)?;

    info!("Image saved to {:?}", output);
    Ok(layout)
}

/// Render a plain raster; only non-finite samples get the mask color.
pub fn render_raster(data: &Raster, output: &Path, spec: &RenderSpec) -> Result<CanvasLayout> {
    render_masked(&MaskedRaster::all_valid(data.clone()), output, spec)
}
