use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{paint::CellPaint, Coordinate, Matrix};

/// Size of one grid cell in pixels.
pub const CELL_SIZE_PX: u32 = 20;

pub const MIN_WIDTH_UNITS: usize = 10;
pub const MAX_WIDTH_UNITS: usize = 60;
pub const MIN_HEIGHT_UNITS: usize = 10;
pub const MAX_HEIGHT_UNITS: usize = 40;

pub const DEFAULT_WIDTH_UNITS: usize = 30;
pub const DEFAULT_HEIGHT_UNITS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    #[error("width must be between 10 and 60 grid units, got {0}")]
    Width(usize),
    #[error("height must be between 10 and 40 grid units, got {0}")]
    Height(usize),
}

/// Plot dimensions in whole grid units, as chosen with the editor's sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    width: usize,
    height: usize,
}

impl GridDimensions {
    pub fn new(width: usize, height: usize) -> Result<Self, DimensionError> {
        if !(MIN_WIDTH_UNITS..=MAX_WIDTH_UNITS).contains(&width) {
            return Err(DimensionError::Width(width));
        }
        if !(MIN_HEIGHT_UNITS..=MAX_HEIGHT_UNITS).contains(&height) {
            return Err(DimensionError::Height(height));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width_px(&self) -> u32 {
        self.width as u32 * CELL_SIZE_PX
    }

    pub fn height_px(&self) -> u32 {
        self.height as u32 * CELL_SIZE_PX
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH_UNITS,
            height: DEFAULT_HEIGHT_UNITS,
        }
    }
}

/// The paintable plot: `rows × cols` cells, row-major.
///
/// Any size is representable here (including degenerate ones) so the
/// validator can be exercised on them; the editor only ever builds grids from
/// [`GridDimensions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotGrid {
    pub rows: usize,
    pub cols: usize,
    pub cells: Matrix<CellPaint>,
}

impl PlotGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![CellPaint::Unpainted; cols]; rows],
        }
    }

    pub fn from_dimensions(dims: GridDimensions) -> Self {
        Self::new(dims.height(), dims.width())
    }

    pub fn get(&self, at: Coordinate) -> Option<CellPaint> {
        self.cells.get(at.row).and_then(|r| r.get(at.col)).copied()
    }

    /// Overwrites one cell. Returns `false` when `at` is outside the grid.
    pub fn paint(&mut self, at: Coordinate, paint: CellPaint) -> bool {
        match self.cells.get_mut(at.row).and_then(|r| r.get_mut(at.col)) {
            Some(cell) => {
                *cell = paint;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(CellPaint::Unpainted);
        }
    }

    pub fn painted_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|r| r.iter())
            .filter(|c| c.is_painted())
            .count()
    }

    pub fn is_blank(&self) -> bool {
        self.painted_count() == 0
    }
}
