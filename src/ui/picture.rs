//! Photo rendering functions
//!
//! Decodes manifest images once at startup and converts them into styled
//! ratatui lines using half-block characters, two pixel rows per cell.

use std::path::Path;

use image::imageops::FilterType;
use ratatui::prelude::*;

use crate::theme::{BG_SECONDARY, BORDER_SUBTLE, TEXT_MUTED};

// Maximum decoded size in cells; two pixel rows per cell row.
const MAX_COLS: u32 = 96;
const MAX_ROWS: u32 = 64;

/// A decoded photo, downscaled at load time to a bounded size.
#[derive(Debug, Clone)]
pub struct Photo {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Photo {
    /// Decode and downscale an image. Missing or undecodable files return
    /// `None`; the caller renders a placeholder instead.
    pub fn load(path: &Path) -> Option<Self> {
        let image = match image::ImageReader::open(path) {
            Ok(reader) => match reader.decode() {
                Ok(image) => image,
                Err(e) => {
                    tracing::warn!("could not decode {}: {}", path.display(), e);
                    return None;
                }
            },
            Err(e) => {
                tracing::warn!("could not open {}: {}", path.display(), e);
                return None;
            }
        };

        let scaled = image
            .resize(MAX_COLS, MAX_ROWS * 2, FilterType::Triangle)
            .to_rgba8();
        let (width, height) = scaled.dimensions();
        let pixels = scaled.pixels().map(|p| p.0).collect();

        Some(Self {
            width,
            height,
            pixels,
        })
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Render a photo into a cell grid as half-block art, preserving aspect
/// ratio and centering within the area. Returns one line per cell row.
pub fn photo_lines(photo: &Photo, cols: u16, rows: u16) -> Vec<Line<'static>> {
    let canvas_w = cols as u32;
    let canvas_h = rows as u32 * 2;
    if canvas_w == 0 || canvas_h == 0 || photo.width == 0 || photo.height == 0 {
        return Vec::new();
    }

    // Fit the image into the subpixel canvas.
    let scale = (canvas_w as f64 / photo.width as f64).min(canvas_h as f64 / photo.height as f64);
    let drawn_w = ((photo.width as f64 * scale) as u32).clamp(1, canvas_w);
    let drawn_h = ((photo.height as f64 * scale) as u32).clamp(1, canvas_h);
    let off_x = (canvas_w - drawn_w) / 2;
    let off_y = (canvas_h - drawn_h) / 2;

    let sample = |x: u32, y: u32| -> Option<Color> {
        if x < off_x || y < off_y || x >= off_x + drawn_w || y >= off_y + drawn_h {
            return None;
        }
        let src_x = (x - off_x) * photo.width / drawn_w;
        let src_y = (y - off_y) * photo.height / drawn_h;
        let [r, g, b, _] = photo.pixel(src_x, src_y);
        Some(Color::Rgb(r, g, b))
    };

    let mut lines = Vec::with_capacity(rows as usize);
    for row in 0..rows as u32 {
        let mut spans = Vec::with_capacity(cols as usize);
        for col in 0..canvas_w {
            let top = sample(col, row * 2);
            let bottom = sample(col, row * 2 + 1);
            let span = match (top, bottom) {
                (Some(fg), Some(bg)) => Span::styled("▀", Style::default().fg(fg).bg(bg)),
                (Some(fg), None) => Span::styled("▀", Style::default().fg(fg)),
                (None, Some(bg)) => Span::styled("▄", Style::default().fg(bg)),
                (None, None) => Span::raw(" "),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    lines
}

/// Broken-media placeholder for a photo that failed to load.
pub fn placeholder_lines(cols: u16, rows: u16, caption: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(rows as usize);
    let caption_row = rows / 2;
    for row in 0..rows {
        let line = if row == caption_row {
            let text = format!("✕ {caption}");
            let text = crate::ui::helpers::ellipsize(&text, cols as usize);
            let pad = (cols as usize).saturating_sub(text.chars().count()) / 2;
            Line::from(vec![
                Span::styled(" ".repeat(pad), Style::default().bg(BG_SECONDARY)),
                Span::styled(text, Style::default().fg(TEXT_MUTED).bg(BG_SECONDARY)),
            ])
        } else {
            Line::from(Span::styled(
                "░".repeat(cols as usize),
                Style::default().fg(BORDER_SUBTLE).bg(BG_SECONDARY),
            ))
        };
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, colors: &[[u8; 4]]) -> Photo {
        assert_eq!(colors.len() as u32, width * height);
        Photo {
            width,
            height,
            pixels: colors.to_vec(),
        }
    }

    #[test]
    fn test_photo_load_missing_file() {
        assert!(Photo::load(Path::new("/nonexistent/pic.jpg")).is_none());
    }

    #[test]
    fn test_half_block_pairs_rows() {
        // One column, two pixel rows: red over blue in a single cell.
        let photo = solid(1, 2, &[[255, 0, 0, 255], [0, 0, 255, 255]]);
        let lines = photo_lines(&photo, 1, 1);
        assert_eq!(lines.len(), 1);
        let span = &lines[0].spans[0];
        assert_eq!(span.content.as_ref(), "▀");
        assert_eq!(span.style.fg, Some(Color::Rgb(255, 0, 0)));
        assert_eq!(span.style.bg, Some(Color::Rgb(0, 0, 255)));
    }

    #[test]
    fn test_lines_match_requested_grid() {
        let photo = solid(2, 2, &[[1, 2, 3, 255]; 4]);
        let lines = photo_lines(&photo, 8, 4);
        assert_eq!(lines.len(), 4);
        for line in &lines {
            assert_eq!(line.spans.len(), 8);
        }
    }

    #[test]
    fn test_wide_image_letterboxes_vertically() {
        // 4x1 image into a 4x2-cell (4x4 subpixel) area: content occupies
        // one subpixel row, the rest stays blank.
        let photo = solid(4, 1, &[[9, 9, 9, 255]; 4]);
        let lines = photo_lines(&photo, 4, 2);
        let blank_cells = lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .filter(|span| span.content.as_ref() == " ")
            .count();
        assert!(blank_cells > 0);
    }

    #[test]
    fn test_zero_area_is_empty() {
        let photo = solid(1, 1, &[[0, 0, 0, 255]]);
        assert!(photo_lines(&photo, 0, 3).is_empty());
        assert!(photo_lines(&photo, 3, 0).is_empty());
    }

    #[test]
    fn test_placeholder_has_caption() {
        let lines = placeholder_lines(20, 5, "pic1.jpg");
        assert_eq!(lines.len(), 5);
        let caption_line = &lines[2];
        let text: String = caption_line
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert!(text.contains("pic1.jpg"));
    }
}
