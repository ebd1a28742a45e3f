//! Nearest-node resolution with a bounded, usage-counted memo
//!
//! Resolving "which graph node is near this world position" would otherwise
//! scan the usable set on every query. The cache keeps recent resolutions
//! keyed by query position and evicts the least-used entry once full. A graph
//! refresh invalidates everything lazily through the version counter.

use crate::astar::{manhattan_distance, to_grid_units};
use crate::config::NavConfig;
use crate::errors::{NavError, NavResult};
use crate::graph::{NodeGraph, NodeId};
use bevy::prelude::*;

#[derive(Debug, Clone)]
struct CacheEntry {
    position: Vec3,
    node: NodeId,
    uses: u32,
}

#[derive(Resource, Debug, Clone)]
pub struct NearestNodeCache {
    entries: Vec<CacheEntry>,
    capacity: usize,
    /// Manhattan tolerance for serving a cached entry, in world units.
    /// Matches the grid frequency: anything closer shares a nearest node.
    tolerance: f32,
    /// Radius of the local candidate scan tried before the full usable set
    local_radius: f32,
    seen_version: u64,
}

impl NearestNodeCache {
    pub fn new(capacity: usize, tolerance: f32, local_radius: f32) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity: capacity.max(1),
            tolerance,
            local_radius,
            seen_version: 0,
        }
    }

    pub fn from_config(config: &NavConfig) -> Self {
        Self::new(
            config.cache.capacity.get(),
            config.graph.grid_frequency.get(),
            config.cache.local_search_radius.get(),
        )
    }

    /// Resolve a world position to a usable graph node.
    ///
    /// Never returns an obstructed node: entries are dropped whenever the
    /// graph version moves, and misses only consult the usable set. Fails
    /// with [NavError::NoUsableNodes] when that set is empty.
    pub fn resolve(&mut self, position: Vec3, graph: &NodeGraph) -> NavResult<NodeId> {
        if self.seen_version != graph.version() {
            self.entries.clear();
            self.seen_version = graph.version();
        }

        // closest cached entry first; strict comparison keeps the oldest on ties
        let mut closest: Option<(usize, i32)> = None;
        for (index, entry) in self.entries.iter().enumerate() {
            let distance = manhattan_distance(entry.position, position);
            if closest.is_none_or(|(_, best)| distance < best) {
                closest = Some((index, distance));
            }
        }
        if let Some((index, distance)) = closest {
            if distance <= to_grid_units(self.tolerance) {
                self.entries[index].uses += 1;
                return Ok(self.entries[index].node);
            }
        }

        let node = self.lookup(position, graph)?;
        self.insert(position, node);
        Ok(node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Full scan fallback happens only when nothing usable is nearby
    fn lookup(&self, position: Vec3, graph: &NodeGraph) -> NavResult<NodeId> {
        if graph.usable().is_empty() {
            warn!("nearest-node lookup failed: usable set is empty");
            return Err(NavError::NoUsableNodes { position });
        }

        let local = self.nearest_usable(position, graph, Some(self.local_radius));
        match local.or_else(|| self.nearest_usable(position, graph, None)) {
            Some(node) => Ok(node),
            // usable set is non-empty, so the unbounded scan always finds one
            None => Err(NavError::NoUsableNodes { position }),
        }
    }

    fn nearest_usable(
        &self,
        position: Vec3,
        graph: &NodeGraph,
        radius: Option<f32>,
    ) -> Option<NodeId> {
        let mut nearest: Option<(NodeId, i32)> = None;
        for id in graph.usable() {
            let node_position = graph.node(*id).position;
            if let Some(radius) = radius {
                if node_position.distance(position) > radius {
                    continue;
                }
            }
            let distance = manhattan_distance(node_position, position);
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((*id, distance));
            }
        }
        nearest.map(|(id, _)| id)
    }

    fn insert(&mut self, position: Vec3, node: NodeId) {
        if self.entries.len() >= self.capacity {
            // evict the single least-used entry; ties go to the oldest
            let mut evict = 0;
            for (index, entry) in self.entries.iter().enumerate() {
                if entry.uses < self.entries[evict].uses {
                    evict = index;
                }
            }
            debug!(
                "nearest-node cache full, evicting entry at {position:?} ({uses} uses)",
                position = self.entries[evict].position,
                uses = self.entries[evict].uses
            );
            self.entries.remove(evict);
        }
        self.entries.push(CacheEntry {
            position,
            node,
            uses: 1,
        });
    }
}
