use image::imageops::{self, FilterType};
use image::RgbImage;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const UPPER_HALF_BLOCK: &str = "\u{2580}";

/// Decoded panel illustrations, keyed by resolved path. A file that fails to
/// load is remembered as missing so it is not retried every frame. Each image
/// also keeps its last scaled copy, so redraws at the same size skip resizing.
pub struct IllustrationCache {
    asset_dir: PathBuf,
    loaded: HashMap<PathBuf, Option<LoadedImage>>,
}

struct LoadedImage {
    source: RgbImage,
    scaled: Option<ScaledImage>,
}

struct ScaledImage {
    bounds: (u32, u32),
    image: RgbImage,
}

impl LoadedImage {
    fn fitted(&mut self, max_w: u32, max_h: u32) -> &RgbImage {
        let bounds = (max_w, max_h);
        if self.scaled.as_ref().is_some_and(|scaled| scaled.bounds != bounds) {
            self.scaled = None;
        }
        let source = &self.source;
        &self
            .scaled
            .get_or_insert_with(|| ScaledImage {
                bounds,
                image: scale_to_fit(source, max_w, max_h),
            })
            .image
    }
}

impl IllustrationCache {
    pub fn new(asset_dir: PathBuf) -> Self {
        Self {
            asset_dir,
            loaded: HashMap::new(),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.asset_dir.join(path)
        }
    }

    /// The image at `path` scaled to fit `max_w` x `max_h` pixels, or `None`
    /// when it cannot be loaded.
    pub fn fitted(&mut self, path: &Path, max_w: u32, max_h: u32) -> Option<&RgbImage> {
        let resolved = self.resolve(path);
        let loaded = self
            .loaded
            .entry(resolved)
            .or_insert_with_key(|resolved| {
                load_image(resolved).map(|source| LoadedImage {
                    source,
                    scaled: None,
                })
            })
            .as_mut()?;
        Some(loaded.fitted(max_w, max_h))
    }
}

fn scale_to_fit(source: &RgbImage, max_w: u32, max_h: u32) -> RgbImage {
    let (width, height) = fit_within(source.width(), source.height(), max_w, max_h);
    if width == 0 || height == 0 {
        RgbImage::new(0, 0)
    } else if (width, height) == source.dimensions() {
        source.clone()
    } else {
        imageops::resize(source, width, height, FilterType::Triangle)
    }
}

fn load_image(path: &Path) -> Option<RgbImage> {
    match image::open(path) {
        Ok(decoded) => {
            debug!(path = %path.display(), "loaded illustration");
            Some(decoded.to_rgb8())
        }
        Err(error) => {
            debug!(path = %path.display(), %error, "illustration unavailable");
            None
        }
    }
}

/// Largest size with the image's aspect ratio that fits in `max_w` x `max_h`.
pub(crate) fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if width == 0 || height == 0 || max_w == 0 || max_h == 0 {
        return (0, 0);
    }
    if u64::from(width) * u64::from(max_h) <= u64::from(height) * u64::from(max_w) {
        let scaled = u64::from(width) * u64::from(max_h) / u64::from(height);
        ((scaled as u32).max(1), max_h)
    } else {
        let scaled = u64::from(height) * u64::from(max_w) / u64::from(width);
        (max_w, (scaled as u32).max(1))
    }
}

/// Draws an already scaled image with two pixels per cell using the upper
/// half block, centred in the area. Pixels past the area are clipped.
pub(crate) struct HalfBlockImage<'a> {
    pub image: &'a RgbImage,
    pub background: Color,
}

impl Widget for HalfBlockImage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = self.image.width().min(u32::from(area.width));
        let height = self.image.height().min(u32::from(area.height) * 2);
        if width == 0 || height == 0 {
            return;
        }
        let offset_x = area.x + ((u32::from(area.width) - width) / 2) as u16;
        let rows = height.div_ceil(2);
        let offset_y = area.y + ((u32::from(area.height) - rows) / 2) as u16;
        let pixel = |x: u32, y: u32| {
            if y < height {
                let [r, g, b] = self.image.get_pixel(x, y).0;
                Color::Rgb(r, g, b)
            } else {
                self.background
            }
        };
        for row in 0..rows {
            for col in 0..width {
                let style = Style::default()
                    .fg(pixel(col, row * 2))
                    .bg(pixel(col, row * 2 + 1));
                buf.set_string(
                    offset_x + col as u16,
                    offset_y + row as u16,
                    UPPER_HALF_BLOCK,
                    style,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fit_within, HalfBlockImage, IllustrationCache};
    use image::RgbImage;
    use pretty_assertions::assert_eq;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Color;
    use ratatui::widgets::Widget;
    use std::path::Path;

    #[test]
    fn fit_keeps_aspect_ratio() {
        assert_eq!(fit_within(100, 50, 20, 20), (20, 10));
        assert_eq!(fit_within(50, 100, 20, 20), (10, 20));
        assert_eq!(fit_within(4, 4, 10, 6), (6, 6));
        assert_eq!(fit_within(1000, 1, 10, 10), (10, 1));
        assert_eq!(fit_within(0, 4, 10, 6), (0, 0));
    }

    #[test]
    fn cache_loads_relative_paths_and_remembers_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        RgbImage::from_pixel(4, 4, image::Rgb([200, 10, 10]))
            .save(dir.path().join("red.png"))
            .expect("save");
        let mut cache = IllustrationCache::new(dir.path().to_path_buf());

        let red = cache.fitted(Path::new("red.png"), 8, 8).expect("red loads");
        assert_eq!(red.dimensions(), (8, 8));
        assert!(cache.fitted(Path::new("missing.jpg"), 8, 8).is_none());
        assert!(cache.fitted(Path::new("missing.jpg"), 8, 8).is_none());
        assert_eq!(cache.loaded.len(), 2);
    }

    #[test]
    fn scaled_copy_is_reused_until_the_size_changes() {
        let dir = tempfile::tempdir().expect("tempdir");
        RgbImage::from_pixel(8, 4, image::Rgb([10, 200, 10]))
            .save(dir.path().join("wide.png"))
            .expect("save");
        let mut cache = IllustrationCache::new(dir.path().to_path_buf());
        let path = Path::new("wide.png");

        let first = cache.fitted(path, 4, 4).expect("loads");
        assert_eq!(first.dimensions(), (4, 2));
        let first_pixels = first.as_raw().as_ptr();
        let again = cache.fitted(path, 4, 4).expect("loads");
        assert_eq!(again.as_raw().as_ptr(), first_pixels);

        let larger = cache.fitted(path, 6, 6).expect("loads");
        assert_eq!(larger.dimensions(), (6, 3));
        assert_eq!(cache.fitted(path, 0, 6).expect("loads").dimensions(), (0, 0));
    }

    #[test]
    fn half_blocks_pair_vertical_pixels() {
        let mut image = RgbImage::from_pixel(2, 2, image::Rgb([255, 0, 0]));
        image.put_pixel(0, 1, image::Rgb([0, 0, 255]));
        image.put_pixel(1, 1, image::Rgb([0, 0, 255]));
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);
        HalfBlockImage {
            image: &image,
            background: Color::Black,
        }
        .render(area, &mut buf);

        let first = &buf.content[0];
        assert_eq!(first.symbol(), "\u{2580}");
        assert_eq!(first.fg, Color::Rgb(255, 0, 0));
        assert_eq!(first.bg, Color::Rgb(0, 0, 255));
    }
}
