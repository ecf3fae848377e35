use super::value_objects::{CellValue, ColumnId, ColumnSpec, DateRange};
use crate::domain::resources::{Day, Timestamp};
use serde::{Deserialize, Serialize};

/// One matrix row: a calendar day plus one cell per non-time column.
/// `cells.len()` always equals `columns.len() - 1`; days a series has no
/// data for hold `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    pub day: Day,
    pub cells: Vec<Option<CellValue>>,
}

impl MatrixRow {
    pub fn padded(day: Day, width: usize) -> Self {
        Self { day, cells: vec![None; width] }
    }

    /// A row with no surviving data is pruned after column excision
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

/// Domain entity - the shared chart matrix. Snapshots are immutable from
/// the host's point of view: the engine clones, mutates, and installs a
/// fresh `Arc`, so hosts detect refreshes by pointer identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMatrix {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<MatrixRow>,
    pub date_range: DateRange,
}

impl GraphMatrix {
    pub fn empty(now: Timestamp) -> Self {
        Self {
            columns: vec![ColumnSpec::Time],
            rows: Vec::new(),
            date_range: DateRange { start: now, end: now },
        }
    }

    /// Cells per row (the time column carries no cell)
    pub fn cell_width(&self) -> usize {
        self.columns.len() - 1
    }

    /// Number of metric columns (base series plus overlays)
    pub fn metric_count(&self) -> usize {
        self.columns.iter().filter(|c| c.metric_id().is_some()).count()
    }

    /// Column index of the metric column headed by `id`
    pub fn metric_offset(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.metric_id() == Some(id))
    }

    pub fn row_index(&self, day: Day) -> Option<usize> {
        self.rows.iter().position(|r| r.day == day)
    }

    /// Insert a padded row for every day not yet present, keeping rows
    /// sorted strictly ascending by day
    pub fn insert_missing_days(&mut self, days: &[Day]) {
        let width = self.cell_width();
        for day in days {
            if self.row_index(*day).is_none() {
                self.rows.push(MatrixRow::padded(*day, width));
            }
        }
        self.rows.sort_by_key(|r| r.day);
    }

    /// Append a 3-column block (metric, annotation, marker) and widen every
    /// row with `None` cells for it
    pub fn append_block(&mut self, metric: ColumnSpec, owner: ColumnId) {
        self.columns.push(metric);
        self.columns.push(ColumnSpec::Annotation { owner: owner.clone() });
        self.columns.push(ColumnSpec::Marker { owner });
        for row in &mut self.rows {
            row.cells.extend([None, None, None]);
        }
    }

    /// Splice the 3-column block starting at `offset` out of the header and
    /// every row
    pub fn excise_block(&mut self, offset: usize) {
        self.columns.drain(offset..offset + 3);
        let cell_offset = offset - 1; // cells carry no time column
        for row in &mut self.rows {
            row.cells.drain(cell_offset..cell_offset + 3);
        }
    }

    /// Drop rows whose day no longer has data for any active series
    pub fn prune_empty_rows(&mut self) {
        self.rows.retain(|r| !r.is_empty());
    }

    /// Re-assign sequential style slots after columns moved or vanished
    pub fn renumber_style_slots(&mut self) {
        let mut slot = 0;
        for column in &mut self.columns {
            if let ColumnSpec::Metric { style, .. } = column {
                style.slot = slot;
                slot += 1;
            }
        }
    }

    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.rows.iter().map(|r| r.day)
    }
}
