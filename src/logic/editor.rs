use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use thiserror::Error;

use crate::logic::{
    export,
    history::History,
    store::{PlotStore, StoreError},
    validator::{validate_plot, PlotRejection},
};
use crate::models::{
    garden::{DimensionError, GridDimensions, PlotGrid, CELL_SIZE_PX},
    paint::DrawingMode,
    plot::{iso_timestamp, storage_key, PlotRecord},
    Coordinate,
};

pub const DEFAULT_PLOT_NAME: &str = "My Garden Plot";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("plot rejected: {0}")]
    Rejected(#[from] PlotRejection),
    #[error("failed to encode plot image: {0}")]
    Export(#[from] png::EncodingError),
    #[error("failed to serialise plot record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to save plot: {0}")]
    Store(#[from] StoreError),
}

/// The plot designer: owns the grid, the active drawing mode and the stroke
/// history, and turns pointer gestures (in canvas pixels) into cell writes.
#[derive(Debug, Clone)]
pub struct PlotEditor {
    name: String,
    dims: GridDimensions,
    grid: PlotGrid,
    mode: DrawingMode,
    drawing: bool,
    history: History,
}

impl Default for PlotEditor {
    fn default() -> Self {
        Self::new(GridDimensions::default())
    }
}

impl PlotEditor {
    pub fn new(dims: GridDimensions) -> Self {
        let grid = PlotGrid::from_dimensions(dims);
        Self {
            name: DEFAULT_PLOT_NAME.to_owned(),
            dims,
            history: History::new(grid.clone()),
            grid,
            mode: DrawingMode::default(),
            drawing: false,
        }
    }

    pub fn grid(&self) -> &PlotGrid {
        &self.grid
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    /// Changes the layer future strokes paint into; existing cells are untouched.
    pub fn set_mode(&mut self, mode: DrawingMode) {
        self.mode = mode;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Rebuilds a blank grid at the new size and restarts history. Whatever
    /// was drawn is discarded without confirmation.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), DimensionError> {
        let dims = GridDimensions::new(width, height)?;
        let discarded = self.grid.painted_count();
        if discarded > 0 {
            warn!("Resizing plot to {width}x{height} discards {discarded} painted cell(s)");
        }
        self.dims = dims;
        self.grid = PlotGrid::from_dimensions(dims);
        self.history.reset(self.grid.clone());
        self.drawing = false;
        Ok(())
    }

    /// Maps a canvas pixel position to the cell under it. Positions outside the
    /// canvas (negative, past the edge, or not a number) map to `None`.
    pub fn point_to_cell(&self, x: f64, y: f64) -> Option<Coordinate> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let col = (x / CELL_SIZE_PX as f64).floor() as usize;
        let row = (y / CELL_SIZE_PX as f64).floor() as usize;
        (row < self.grid.rows && col < self.grid.cols).then(|| Coordinate::new(row, col))
    }

    pub fn begin_stroke(&mut self, x: f64, y: f64) {
        self.drawing = true;
        self.paint_at(x, y);
    }

    /// Paints the cell under the pointer if a stroke is active. Samples are
    /// not interpolated, so a fast pointer can skip cells.
    pub fn continue_stroke(&mut self, x: f64, y: f64) {
        if self.drawing {
            self.paint_at(x, y);
        }
    }

    /// Closes the stroke and records it as one undoable step. Calls without an
    /// active stroke (e.g. the pointer leaving an idle canvas) do nothing.
    pub fn end_stroke(&mut self) {
        if !self.drawing {
            return;
        }
        self.drawing = false;
        self.history.record(self.grid.clone());
        debug!(
            "Stroke recorded; history length {}, cursor {}",
            self.history.len(),
            self.history.cursor()
        );
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Restores the grid as it was before the last recorded stroke. Returns
    /// `false` when already at the initial snapshot.
    pub fn undo(&mut self) -> bool {
        if self.history.undo().is_none() {
            return false;
        }
        self.grid = self.history.current().clone();
        debug!("Undo to history cursor {}", self.history.cursor());
        true
    }

    /// Erases every cell. History restarts from the cleared grid, so earlier
    /// strokes cannot be undone afterwards.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.history.reset(self.grid.clone());
        self.drawing = false;
    }

    pub fn validate(&self) -> Result<(), PlotRejection> {
        validate_plot(&self.grid)
    }

    pub fn export_png(&self) -> Result<Vec<u8>, png::EncodingError> {
        export::export_png(&self.grid)
    }

    pub fn download_file_name(&self) -> String {
        export::download_file_name(&self.name)
    }

    /// Builds the record that [`PlotEditor::save`] hands to storage.
    pub fn plot_record(&self, now: DateTime<Utc>) -> Result<PlotRecord, png::EncodingError> {
        Ok(PlotRecord {
            name: self.name.clone(),
            image: export::export_data_url(&self.grid)?,
            width: self.dims.width_px(),
            height: self.dims.height_px(),
            grid_size: CELL_SIZE_PX,
            timestamp: iso_timestamp(now),
        })
    }

    /// Validates the drawing and writes it under `garden-plot-<epoch-millis>`.
    /// Nothing is written when validation fails. Returns the key used.
    pub fn save(&self, store: &mut impl PlotStore, now: DateTime<Utc>) -> Result<String, PersistError> {
        if let Err(rejection) = self.validate() {
            warn!("Plot '{}' not saved: {rejection}", self.name);
            return Err(rejection.into());
        }
        let record = self.plot_record(now)?;
        let key = storage_key(now);
        store.set_item(&key, serde_json::to_string(&record)?)?;
        info!("Plot '{}' saved under {key}", self.name);
        Ok(key)
    }

    fn paint_at(&mut self, x: f64, y: f64) {
        if let Some(at) = self.point_to_cell(x, y) {
            self.grid.paint(at, self.mode.paint());
        }
    }
}
