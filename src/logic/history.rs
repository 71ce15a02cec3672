use crate::models::garden::PlotGrid;

/// Full-grid snapshots, one per completed stroke plus the initial blank grid.
///
/// Snapshots are taken at grid-unit resolution (one small enum per cell), so
/// keeping the whole grid per stroke stays cheap.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<PlotGrid>,
    cursor: usize,
}

impl History {
    /// A history holding only `initial`, cursor at 0.
    pub fn new(initial: PlotGrid) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    /// Drops every snapshot ahead of the cursor, appends `snapshot` and moves
    /// the cursor onto it.
    pub fn record(&mut self, snapshot: PlotGrid) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
    }

    /// Steps the cursor back one snapshot and returns it, or `None` at the start.
    pub fn undo(&mut self) -> Option<&PlotGrid> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    pub fn reset(&mut self, initial: PlotGrid) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
    }

    pub fn current(&self) -> &PlotGrid {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }
}
