use super::entities::GraphMatrix;
use super::services::{events_on_day, marker, tooltip};
use super::value_objects::{CellValue, ColumnId, ColumnSpec, MarkerShape, SeriesStyle};
use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::logging::LogComponent;
use crate::domain::resources::{Day, Resource, ResourceId, ResourceSeries};
use crate::domain::time::{Clock, date_range, start_of_day, unique_days};
use crate::{log_debug, log_info, log_warn};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

const COMPONENT: LogComponent = LogComponent::Domain("MatrixEngine");

/// Per-resource fetch state. Absent resources are simply not tracked;
/// `Pending -> gone` is the cancellation transition.
#[derive(Debug, Clone)]
enum ResourceState {
    /// Fetch dispatched, not yet applied or discarded. `epoch` ties a
    /// resolution to the dispatch that produced it, so a stale result
    /// arriving after remove + re-add is discarded.
    Pending { epoch: u64 },
    /// Merged into the matrix. The fetched series is retained so the
    /// cumulative overlay is derived from the same snapshot as the base
    /// curve.
    Active { resource: Resource, series: ResourceSeries, overlay: bool },
}

/// Owns the live chart matrix and the per-resource state machine. All
/// mutation is synchronous; async orchestration lives in the application
/// layer. Every mutating operation installs a fresh snapshot so hosts
/// detect refreshes by `Arc` identity.
pub struct MatrixEngine {
    matrix: Arc<GraphMatrix>,
    states: HashMap<ResourceId, ResourceState>,
    next_epoch: u64,
    clock: Rc<dyn Clock>,
}

impl MatrixEngine {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        let matrix = Arc::new(GraphMatrix::empty(clock.now()));
        Self { matrix, states: HashMap::new(), next_epoch: 0, clock }
    }

    /// Current snapshot. A new `Arc` is installed on every observable
    /// mutation - the sole rendering contract.
    pub fn matrix(&self) -> Arc<GraphMatrix> {
        Arc::clone(&self.matrix)
    }

    /// Resource ids with a dispatched fetch not yet applied or discarded
    pub fn pending_ids(&self) -> Vec<ResourceId> {
        let mut ids: Vec<ResourceId> = self
            .states
            .iter()
            .filter(|(_, s)| matches!(s, ResourceState::Pending { .. }))
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort_by(|a, b| a.value().cmp(b.value()));
        ids
    }

    pub fn is_active(&self, id: &ResourceId) -> bool {
        matches!(self.states.get(id), Some(ResourceState::Active { .. }))
    }

    /// Transition Absent -> Pending and hand out the dispatch epoch the
    /// eventual resolution must present
    pub fn begin_fetch(&mut self, id: &ResourceId) -> u64 {
        self.next_epoch += 1;
        let epoch = self.next_epoch;
        if let Some(ResourceState::Active { .. }) =
            self.states.insert(id.clone(), ResourceState::Pending { epoch })
        {
            log_warn!(COMPONENT, "re-fetch dispatched for active resource {}", id.value());
        }
        epoch
    }

    /// Apply a resolved fetch. Returns false (and leaves the matrix
    /// untouched) when the resource was removed or re-dispatched while the
    /// fetch was in flight - the cancellation contract.
    pub fn complete_fetch(
        &mut self,
        resource: Resource,
        epoch: u64,
        series: ResourceSeries,
    ) -> bool {
        match self.states.get(&resource.id) {
            Some(ResourceState::Pending { epoch: current }) if *current == epoch => {}
            _ => {
                log_debug!(
                    COMPONENT,
                    "discarding stale fetch result for {}",
                    resource.id.value()
                );
                return false;
            }
        }
        self.merge_resource(&resource, &series);
        let id = resource.id.clone();
        self.states.insert(id, ResourceState::Active { resource, series, overlay: false });
        true
    }

    /// A fetch resolved to an error: clear the pending marker, leave the
    /// matrix untouched. Forwarding the error outward is the caller's job.
    pub fn fail_fetch(&mut self, id: &ResourceId, epoch: u64) {
        if let Some(ResourceState::Pending { epoch: current }) = self.states.get(id) {
            if *current == epoch {
                self.states.remove(id);
            }
        }
    }

    /// Remove a resource. Pending -> cancelled; Active -> its columns (and
    /// overlay, if any) are excised and now-empty rows pruned.
    pub fn remove_resource(&mut self, id: &ResourceId) -> ChartResult<()> {
        match self.states.get(id) {
            None => Err(ChartError::InvariantViolation(format!(
                "removal of untracked resource {}",
                id.value()
            ))),
            Some(ResourceState::Pending { .. }) => {
                self.states.remove(id);
                log_debug!(COMPONENT, "cancelled in-flight fetch for {}", id.value());
                Ok(())
            }
            Some(ResourceState::Active { overlay, .. }) => {
                let overlay = *overlay;
                let mut m = (*self.matrix).clone();
                if overlay {
                    let offset =
                        m.metric_offset(&ColumnId::cumulative(id)).ok_or_else(|| {
                            ChartError::InvariantViolation(format!(
                                "overlay columns missing for {}",
                                id.value()
                            ))
                        })?;
                    m.excise_block(offset);
                }
                let offset = m.metric_offset(&ColumnId::base(id)).ok_or_else(|| {
                    ChartError::InvariantViolation(format!(
                        "columns missing for active resource {}",
                        id.value()
                    ))
                })?;
                m.excise_block(offset);
                m.prune_empty_rows();
                m.renumber_style_slots();
                self.refresh_date_range(&mut m);
                self.matrix = Arc::new(m);
                self.states.remove(id);
                log_info!(COMPONENT, "removed resource {}", id.value());
                Ok(())
            }
        }
    }

    /// Append the counter-factual cumulative block for each resource.
    /// Resources that already carry an overlay are skipped with a warning;
    /// a non-active resource is an upstream bug.
    pub fn add_cumulative_overlay(&mut self, ids: &[ResourceId]) -> ChartResult<()> {
        for id in ids {
            if !matches!(self.states.get(id), Some(ResourceState::Active { .. })) {
                return Err(ChartError::InvariantViolation(format!(
                    "cumulative overlay requested for non-active resource {}",
                    id.value()
                )));
            }
        }
        let mut m = (*self.matrix).clone();
        for id in ids {
            let Some(ResourceState::Active { resource, series, overlay }) =
                self.states.get_mut(id)
            else {
                continue;
            };
            if *overlay {
                log_warn!(COMPONENT, "overlay already present for {}", id.value());
                continue;
            }
            Self::append_overlay_block(&mut m, resource, series);
            *overlay = true;
        }
        self.matrix = Arc::new(m);
        Ok(())
    }

    /// Splice out the cumulative block for each resource and compact the
    /// style slots. Validation precedes all mutation: a batch with one bad
    /// id leaves both the matrix and the overlay flags untouched.
    pub fn remove_cumulative_overlay(&mut self, ids: &[ResourceId]) -> ChartResult<()> {
        for id in ids {
            if !matches!(self.states.get(id), Some(ResourceState::Active { overlay: true, .. }))
            {
                return Err(ChartError::InvariantViolation(format!(
                    "cumulative overlay removal for {} without an overlay",
                    id.value()
                )));
            }
            if self.matrix.metric_offset(&ColumnId::cumulative(id)).is_none() {
                return Err(ChartError::InvariantViolation(format!(
                    "overlay columns missing for {}",
                    id.value()
                )));
            }
        }
        let mut m = (*self.matrix).clone();
        for id in ids {
            // Re-resolved per excision: offsets shift as blocks are spliced out
            if let Some(offset) = m.metric_offset(&ColumnId::cumulative(id)) {
                m.excise_block(offset);
            }
        }
        m.renumber_style_slots();
        self.matrix = Arc::new(m);
        for id in ids {
            if let Some(ResourceState::Active { overlay, .. }) = self.states.get_mut(id) {
                *overlay = false;
            }
        }
        Ok(())
    }

    /// Merge a fetched series into the matrix: new day rows first (padded
    /// across all existing columns), then the resource's 3-column block.
    fn merge_resource(&mut self, resource: &Resource, series: &ResourceSeries) {
        let mut m = (*self.matrix).clone();
        let new_days = unique_days(&[series]);
        m.insert_missing_days(&new_days);

        let column_id = ColumnId::base(&resource.id);
        let style = SeriesStyle {
            color: resource.color.clone(),
            dashed: false,
            slot: m.metric_count(),
        };
        m.append_block(
            ColumnSpec::Metric {
                id: column_id.clone(),
                label: resource.name.clone(),
                style,
            },
            column_id,
        );

        let cell_offset = m.cell_width() - 3;
        for (&at, &value) in &series.points {
            let day = start_of_day(at);
            let Some(row) = m.row_index(day) else { continue };
            let events = events_on_day(series, day);
            let note = tooltip(resource, day, value, &events);
            let point = marker(&events, &resource.color, MarkerShape::Circle);
            m.rows[row].cells[cell_offset] = Some(CellValue::Count(value));
            m.rows[row].cells[cell_offset + 1] = Some(CellValue::Note(note));
            m.rows[row].cells[cell_offset + 2] = point.map(CellValue::Point);
        }

        self.refresh_date_range(&mut m);
        self.matrix = Arc::new(m);
        log_info!(
            COMPONENT,
            "merged {} ({} days, {} events)",
            resource.id.value(),
            series.points.len(),
            series.events.len()
        );
    }

    /// Walk the retained series ascending, carrying the summed impact of
    /// events accepted on strictly earlier days
    fn append_overlay_block(m: &mut GraphMatrix, resource: &Resource, series: &ResourceSeries) {
        let column_id = ColumnId::cumulative(&resource.id);
        let style = SeriesStyle {
            color: resource.color.clone(),
            dashed: true,
            slot: m.metric_count(),
        };
        m.append_block(
            ColumnSpec::Metric {
                id: column_id.clone(),
                label: format!("{} (no recommendations)", resource.name),
                style,
            },
            column_id,
        );

        let cell_offset = m.cell_width() - 3;
        let mut carry = 0.0;
        let mut pending_events = series.events.iter().peekable();
        for (&at, &raw) in &series.points {
            let day = start_of_day(at);
            // Fold in events accepted before this day; same-day events only
            // affect later days.
            while let Some((accepted_at, event)) = pending_events.peek() {
                if start_of_day(**accepted_at) < day {
                    carry += event.impact;
                    pending_events.next();
                } else {
                    break;
                }
            }
            let adjusted = raw + carry;
            let Some(row) = m.row_index(day) else { continue };
            let events = events_on_day(series, day);
            let note = tooltip(resource, day, adjusted, &events);
            let point = marker(&events, &resource.color, MarkerShape::Circle);
            m.rows[row].cells[cell_offset] = Some(CellValue::Count(adjusted));
            m.rows[row].cells[cell_offset + 1] = Some(CellValue::Note(note));
            m.rows[row].cells[cell_offset + 2] = point.map(CellValue::Point);
        }
    }

    fn refresh_date_range(&self, m: &mut GraphMatrix) {
        let days: Vec<Day> = m.days().collect();
        m.date_range = date_range(days, self.clock.as_ref());
    }
}
