use crate::domain::chart::{GraphMatrix, MatrixEngine};
use crate::domain::errors::ChartResult;
use crate::domain::logging::LogComponent;
use crate::domain::resources::{ErrorSink, Resource, ResourceId, ResourceKind, SeriesGateway};
use crate::domain::time::Clock;
use crate::infrastructure::TimeBoundedCache;
use crate::{log_debug, log_error, log_info};
use futures::future::join_all;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

const COMPONENT: LogComponent = LogComponent::Application("ChartService");

/// Application service tying the matrix engine to the cache-backed gateway.
/// Cheaply cloneable; clones share the same engine and caches, so a host
/// can keep one handle for toggles and another for rendering.
pub struct ChartService {
    engine: Rc<RefCell<MatrixEngine>>,
    project_cache: Rc<RefCell<TimeBoundedCache>>,
    organization_cache: Rc<RefCell<TimeBoundedCache>>,
    gateway: Rc<dyn SeriesGateway>,
    sink: Rc<dyn ErrorSink>,
}

impl Clone for ChartService {
    fn clone(&self) -> Self {
        Self {
            engine: Rc::clone(&self.engine),
            project_cache: Rc::clone(&self.project_cache),
            organization_cache: Rc::clone(&self.organization_cache),
            gateway: Rc::clone(&self.gateway),
            sink: Rc::clone(&self.sink),
        }
    }
}

impl ChartService {
    pub fn new(
        gateway: Rc<dyn SeriesGateway>,
        sink: Rc<dyn ErrorSink>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            engine: Rc::new(RefCell::new(MatrixEngine::new(Rc::clone(&clock)))),
            project_cache: Rc::new(RefCell::new(TimeBoundedCache::new(Rc::clone(&clock)))),
            organization_cache: Rc::new(RefCell::new(TimeBoundedCache::new(clock))),
            gateway,
            sink,
        }
    }

    /// Current matrix snapshot; a new `Arc` per observable mutation
    pub fn matrix(&self) -> Arc<GraphMatrix> {
        self.engine.borrow().matrix()
    }

    pub fn pending_ids(&self) -> Vec<ResourceId> {
        self.engine.borrow().pending_ids()
    }

    pub fn is_active(&self, id: &ResourceId) -> bool {
        self.engine.borrow().is_active(id)
    }

    pub fn cache_for(&self, kind: ResourceKind) -> Rc<RefCell<TimeBoundedCache>> {
        match kind {
            ResourceKind::Project => Rc::clone(&self.project_cache),
            ResourceKind::Organization => Rc::clone(&self.organization_cache),
        }
    }

    /// Diff the desired resource set against the previous one (by id, the
    /// canonical key) and apply the resulting delta
    pub async fn apply_toggle(
        &self,
        previous: &[Resource],
        current: &[Resource],
    ) -> ChartResult<()> {
        let previous_ids: HashSet<&ResourceId> = previous.iter().map(|r| &r.id).collect();
        let current_ids: HashSet<&ResourceId> = current.iter().map(|r| &r.id).collect();
        let added: Vec<Resource> =
            current.iter().filter(|r| !previous_ids.contains(&r.id)).cloned().collect();
        let removed: Vec<ResourceId> = previous
            .iter()
            .filter(|r| !current_ids.contains(&r.id))
            .map(|r| r.id.clone())
            .collect();
        self.apply_delta(added, removed).await
    }

    /// Apply an add/remove delta. Removals are synchronous; additions
    /// dispatch fetches and this resolves once every one of them has
    /// applied or been discarded.
    pub async fn apply_delta(
        &self,
        added: Vec<Resource>,
        removed: Vec<ResourceId>,
    ) -> ChartResult<()> {
        log_info!(
            COMPONENT,
            "applying delta: {} added, {} removed",
            added.len(),
            removed.len()
        );
        for id in &removed {
            self.engine.borrow_mut().remove_resource(id)?;
        }

        let mut fetches = Vec::new();
        for resource in added {
            let epoch = self.engine.borrow_mut().begin_fetch(&resource.id);
            fetches.push(self.resolve(resource, epoch));
        }
        join_all(fetches).await;
        Ok(())
    }

    pub fn add_cumulative_overlay(&self, ids: &[ResourceId]) -> ChartResult<()> {
        self.engine.borrow_mut().add_cumulative_overlay(ids)
    }

    pub fn remove_cumulative_overlay(&self, ids: &[ResourceId]) -> ChartResult<()> {
        self.engine.borrow_mut().remove_cumulative_overlay(ids)
    }

    /// Resolve one dispatched fetch: cache first (synchronous), gateway on
    /// miss. Fetch failures are forwarded to the sink, never raised into
    /// the matrix mutation path.
    async fn resolve(&self, resource: Resource, epoch: u64) {
        let cache = self.cache_for(resource.kind);
        let cached = cache.borrow().get(&resource.id).cloned();
        if let Some(series) = cached {
            log_debug!(COMPONENT, "cache hit for {}", resource.id.value());
            self.engine.borrow_mut().complete_fetch(resource, epoch, series);
            return;
        }

        let fetch = self.gateway.fetch_series(&resource.id, resource.kind);
        match fetch.await {
            Ok(series) => {
                cache.borrow_mut().put(resource.id.clone(), series.clone());
                self.engine.borrow_mut().complete_fetch(resource, epoch, series);
            }
            Err(error) => {
                log_error!(
                    COMPONENT,
                    "fetch failed for {}: {}",
                    resource.id.value(),
                    error
                );
                self.engine.borrow_mut().fail_fetch(&resource.id, epoch);
                self.sink.report(&error);
            }
        }
    }
}
