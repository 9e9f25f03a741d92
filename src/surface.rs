use std::io::Cursor;
use std::path::Path;

use egui::{Color32, ColorImage, Pos2, Rect, Vec2};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::error::SketchResult;

/// File name offered for "save as image"
pub const DEFAULT_EXPORT_NAME: &str = "sketch.png";

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// How painted pixels combine with what is already on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Normal painting: the source is composited over the destination
    #[default]
    SourceOver,
    /// Erasing: covered pixels become fully transparent
    DestinationOut,
}

/// The retained bitmap everything is painted onto.
///
/// The buffer is `pixel_ratio` times the logical size in each direction. All
/// painting takes logical coordinates; device pixel `(px, py)` samples the
/// logical point at its centre, `((px + 0.5) / ratio, (py + 0.5) / ratio)`.
/// Coverage is binary so painting the same primitives always produces the same
/// bytes.
pub struct RasterSurface {
    pixels: RgbaImage,
    pixel_ratio: f32,
    logical_size: Vec2,
    revision: u64,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("pixel_ratio", &self.pixel_ratio)
            .field("revision", &self.revision)
            .finish()
    }
}

impl RasterSurface {
    /// Allocate a transparent surface for a viewport of the given logical size
    pub fn new(logical_width: f32, logical_height: f32, pixel_ratio: f32) -> Self {
        let device = |logical: f32| (logical * pixel_ratio).ceil().max(0.0) as u32;
        Self {
            pixels: RgbaImage::new(device(logical_width), device(logical_height)),
            pixel_ratio,
            logical_size: Vec2::new(logical_width, logical_height),
            revision: 0,
        }
    }

    /// Device pixel width
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Device pixel height
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn logical_size(&self) -> Vec2 {
        self.logical_size
    }

    /// Bumped on every mutation, so hosts know when to re-upload the image
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// RGBA (straight alpha) of a device pixel, `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// True when no pixel has been painted (or everything was erased)
    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| *p == TRANSPARENT)
    }

    /// Reset every pixel to transparent
    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = TRANSPARENT;
        }
        self.revision += 1;
    }

    /// Composite `color` onto every device pixel inside `bounds` whose centre
    /// satisfies `covers`. Each pixel is touched at most once per call.
    pub(crate) fn fill_where(
        &mut self,
        bounds: Rect,
        color: Color32,
        blend: BlendMode,
        covers: impl Fn(Pos2) -> bool,
    ) {
        let ratio = self.pixel_ratio;
        let Some([x0, y0, x1, y1]) = device_range(bounds, ratio, self.width(), self.height())
        else {
            return;
        };

        for py in y0..y1 {
            for px in x0..x1 {
                let sample = Pos2::new((px as f32 + 0.5) / ratio, (py as f32 + 0.5) / ratio);
                if covers(sample) {
                    let dst = self.pixels.get_pixel_mut(px, py);
                    *dst = composite(*dst, color, blend);
                }
            }
        }
        self.revision += 1;
    }

    /// Composite `color` once onto every pixel claimed in `mask`
    pub(crate) fn composite_mask(&mut self, mask: &CoverageMask, color: Color32, blend: BlendMode) {
        let [ox, oy] = mask.origin;
        let width = mask.size[0] as usize;
        for (word_index, &word) in mask.bits.iter().enumerate() {
            let mut word = word;
            while word != 0 {
                let index = word_index * 64 + word.trailing_zeros() as usize;
                word &= word - 1;
                let px = ox + (index % width) as u32;
                let py = oy + (index / width) as u32;
                let dst = self.pixels.get_pixel_mut(px, py);
                *dst = composite(*dst, color, blend);
            }
        }
        self.revision += 1;
    }

    /// Encode the current contents as PNG bytes
    pub fn encode_png(&self) -> SketchResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.pixels.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Write the current contents to `path` as a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> SketchResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.encode_png()?)?;
        log::info!("Saved {}x{} image to {}", self.width(), self.height(), path.display());
        Ok(())
    }

    /// Snapshot for display as an egui texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixels.as_raw(),
        )
    }
}

/// Device pixels claimed by one primitive before it is composited.
///
/// Primitives made of many pieces (polylines, outlines) mark each piece over
/// its own bounds. A pixel claimed by several pieces is recorded once, so the
/// primitive still composites every pixel at most once.
pub(crate) struct CoverageMask {
    origin: [u32; 2],
    size: [u32; 2],
    pixel_ratio: f32,
    bits: Vec<u64>,
    covered: usize,
    samples: usize,
}

impl CoverageMask {
    /// An empty mask over the part of `bounds` that lies on `surface`
    pub(crate) fn new(surface: &RasterSurface, bounds: Rect) -> Self {
        let ratio = surface.pixel_ratio;
        let [x0, y0, x1, y1] =
            device_range(bounds, ratio, surface.width(), surface.height()).unwrap_or_default();
        let (width, height) = (x1 - x0, y1 - y0);
        Self {
            origin: [x0, y0],
            size: [width, height],
            pixel_ratio: ratio,
            bits: vec![0; (width as usize * height as usize).div_ceil(64)],
            covered: 0,
            samples: 0,
        }
    }

    /// Claim the pixels inside `bounds` whose centre satisfies `covers`.
    ///
    /// `span` returns, for the logical y of a pixel row, the logical x range
    /// that can hold covered centres; rows where it returns `None` are
    /// skipped. Only centres within one pixel of that range are tested.
    pub(crate) fn mark(
        &mut self,
        bounds: Rect,
        span: impl Fn(f32) -> Option<(f32, f32)>,
        covers: impl Fn(Pos2) -> bool,
    ) {
        let ratio = self.pixel_ratio;
        let [ox, oy] = self.origin;
        let [width, height] = self.size;
        let Some([x0, y0, x1, y1]) = device_range(bounds, ratio, ox + width, oy + height) else {
            return;
        };
        let (x0, y0) = (x0.max(ox), y0.max(oy));

        for py in y0..y1 {
            let sample_y = (py as f32 + 0.5) / ratio;
            let Some((lo, hi)) = span(sample_y) else {
                continue;
            };
            let row_x0 = ((lo * ratio).floor() - 1.0).max(x0 as f32) as u32;
            let row_x1 = ((hi * ratio).ceil() + 1.0).min(x1 as f32) as u32;

            for px in row_x0..row_x1 {
                self.samples += 1;
                if !covers(Pos2::new((px as f32 + 0.5) / ratio, sample_y)) {
                    continue;
                }
                let index = (py - oy) as usize * width as usize + (px - ox) as usize;
                let (word, bit) = (index / 64, 1u64 << (index % 64));
                if self.bits[word] & bit == 0 {
                    self.bits[word] |= bit;
                    self.covered += 1;
                }
            }
        }
    }

    /// Number of distinct pixels claimed
    pub(crate) fn covered_count(&self) -> usize {
        self.covered
    }

    /// Number of pixel centres tested so far
    pub(crate) fn samples(&self) -> usize {
        self.samples
    }
}

/// Device pixel range `[x0, y0, x1, y1)` whose centres can fall inside the
/// logical `bounds`, clipped to `width` x `height`
fn device_range(bounds: Rect, ratio: f32, width: u32, height: u32) -> Option<[u32; 4]> {
    if !bounds.is_finite() || bounds.min.x > bounds.max.x || bounds.min.y > bounds.max.y {
        return None;
    }
    let x0 = (bounds.min.x * ratio).floor().max(0.0) as u32;
    let y0 = (bounds.min.y * ratio).floor().max(0.0) as u32;
    let x1 = ((bounds.max.x * ratio).ceil().max(0.0) as u32).min(width);
    let y1 = ((bounds.max.y * ratio).ceil().max(0.0) as u32).min(height);
    (x0 < x1 && y0 < y1).then_some([x0, y0, x1, y1])
}

fn composite(dst: Rgba<u8>, color: Color32, blend: BlendMode) -> Rgba<u8> {
    match blend {
        BlendMode::DestinationOut => TRANSPARENT,
        BlendMode::SourceOver => {
            let src = color.to_srgba_unmultiplied();
            if src[3] == 255 {
                return Rgba(src);
            }
            if src[3] == 0 {
                return dst;
            }

            let sa = src[3] as f32 / 255.0;
            let da = dst.0[3] as f32 / 255.0;
            let out_a = sa + da * (1.0 - sa);
            let channel = |s: u8, d: u8| {
                let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
                c.round().clamp(0.0, 255.0) as u8
            };
            Rgba([
                channel(src[0], dst.0[0]),
                channel(src[1], dst.0[1]),
                channel(src[2], dst.0[2]),
                (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
            ])
        }
    }
}
