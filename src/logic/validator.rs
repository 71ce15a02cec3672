use std::fmt;

use thiserror::Error;

use crate::models::garden::PlotGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlotRejection {
    #[error("the plot grid has no cells")]
    Empty,
    #[error("the plot does not reach the {0} edge of the grid")]
    MissingEdge(Edge),
}

/// Accepts the drawing only if every edge of the grid (top row, bottom row,
/// left column, right column) holds at least one painted cell.
///
/// This checks edge presence, not enclosure: four painted corners with
/// nothing between them pass.
pub fn validate_plot(grid: &PlotGrid) -> Result<(), PlotRejection> {
    if grid.rows == 0 || grid.cols == 0 || grid.cells.is_empty() {
        return Err(PlotRejection::Empty);
    }
    let last_row = grid.rows - 1;
    let last_col = grid.cols - 1;

    let row_painted = |r: usize| {
        grid.cells
            .get(r)
            .is_some_and(|row| row.iter().any(|c| c.is_painted()))
    };
    let col_painted = |c: usize| {
        grid.cells
            .iter()
            .any(|row| row.get(c).is_some_and(|cell| cell.is_painted()))
    };

    if !row_painted(0) {
        return Err(PlotRejection::MissingEdge(Edge::Top));
    }
    if !row_painted(last_row) {
        return Err(PlotRejection::MissingEdge(Edge::Bottom));
    }
    if !col_painted(0) {
        return Err(PlotRejection::MissingEdge(Edge::Left));
    }
    if !col_painted(last_col) {
        return Err(PlotRejection::MissingEdge(Edge::Right));
    }
    Ok(())
}

pub fn is_valid_plot(grid: &PlotGrid) -> bool {
    validate_plot(grid).is_ok()
}
