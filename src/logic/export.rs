use base64::{engine::general_purpose::STANDARD, Engine as _};
use png::{BitDepth, ColorType, Encoder};

use crate::models::{
    garden::{PlotGrid, CELL_SIZE_PX},
    paint::{Rgba, GRID_LINE},
    Coordinate,
};

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// An RGBA8 pixel buffer, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Raster {
    #[cfg(test)]
    fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.pixels.get(i..i + 4).and_then(|p| p.try_into().ok())
    }
}

/// Draws every cell as a `cell_px` square, then the grid lines on top: one
/// pixel wide on every cell boundary, including the closing right/bottom edge.
pub fn render(grid: &PlotGrid, cell_px: u32) -> Raster {
    let width = grid.cols as u32 * cell_px;
    let height = grid.rows as u32 * cell_px;
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);

    for y in 0..height {
        for x in 0..width {
            let on_line = x % cell_px == 0
                || y % cell_px == 0
                || x == width - 1
                || y == height - 1;
            let color = if on_line {
                GRID_LINE
            } else {
                let at = Coordinate::new((y / cell_px) as usize, (x / cell_px) as usize);
                grid.get(at).unwrap_or_default().color()
            };
            pixels.extend_from_slice(&color);
        }
    }

    Raster {
        width,
        height,
        pixels,
    }
}

/// Encodes the grid as PNG at [`CELL_SIZE_PX`] pixels per cell. The output is
/// a pure function of the grid's current cells.
pub fn export_png(grid: &PlotGrid) -> Result<Vec<u8>, png::EncodingError> {
    let raster = render(grid, CELL_SIZE_PX);
    encode_png(&raster)
}

pub fn export_data_url(grid: &PlotGrid) -> Result<String, png::EncodingError> {
    let bytes = export_png(grid)?;
    Ok(format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(bytes)))
}

pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, png::EncodingError> {
    let mut buf = Vec::new();
    {
        let mut encoder = Encoder::new(&mut buf, raster.width, raster.height);
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&raster.pixels)?;
    }
    Ok(buf)
}

/// Download name for a plot: whitespace runs become `-`, lowercased, `.png`.
pub fn download_file_name(plot_name: &str) -> String {
    let slug = plot_name.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{}.png", slug.to_lowercase())
}
