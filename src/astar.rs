//! Integer-cost A* over the usable node set
//!
//! Costs and heuristics are Manhattan distances over tenth-unit integers, so
//! every G and H is exact and searches are bit-for-bit reproducible. Ties in
//! the open set go to the earliest-inserted member.

use crate::cache::NearestNodeCache;
use crate::errors::{NavError, NavResult};
use crate::graph::{NodeGraph, NodeId};
use bevy::prelude::*;
use std::collections::HashMap;

/// Coordinates are scaled by 10 and rounded so distances stay in integers
pub(crate) fn to_grid_units(value: f32) -> i32 {
    (value * 10.0).round() as i32
}

/// Manhattan distance over the two horizontal axes, in tenth-unit integers.
/// The vertical axis is ignored: agents walk the ground, they do not climb.
pub fn manhattan_distance(a: Vec3, b: Vec3) -> i32 {
    (to_grid_units(b.x) - to_grid_units(a.x)).abs() + (to_grid_units(b.z) - to_grid_units(a.z)).abs()
}

/// Total Manhattan cost of a waypoint sequence
pub fn path_cost(path: &[Vec3]) -> i32 {
    path.windows(2)
        .map(|pair| manhattan_distance(pair[0], pair[1]))
        .sum()
}

/// Per-search bookkeeping for one usable node.
/// Rebuilt from scratch every call; instances never outlive the search.
#[derive(Debug, Clone)]
struct PathNode {
    node: NodeId,
    g: i32,
    h: i32,
    previous: Option<usize>,
}

/// Find a node path between two world positions.
///
/// Both endpoints resolve through the nearest-node cache; failure to resolve,
/// or exhausting the open set, is an ordinary [NavError::NoPath] — transient
/// obstruction routinely disconnects the graph and callers simply retry on a
/// later frame.
pub fn find_path(
    graph: &NodeGraph,
    cache: &mut NearestNodeCache,
    start: Vec3,
    end: Vec3,
) -> NavResult<Vec<Vec3>> {
    let Ok(start_id) = cache.resolve(start, graph) else {
        warn!("pathfinding failed: no node near start {start:?}");
        return Err(NavError::NoPath { start, end });
    };
    let Ok(end_id) = cache.resolve(end, graph) else {
        warn!("pathfinding failed: no node near end {end:?}");
        return Err(NavError::NoPath { start, end });
    };

    let start_position = graph.node(start_id).position;
    let end_position = graph.node(end_id).position;
    debug!(
        "pathfinding: {start:?} -> node {start_node:?}, {end:?} -> node {end_node:?}",
        start_node = start_id,
        end_node = end_id
    );

    if start_id == end_id {
        return Ok(vec![start_position]);
    }

    // fresh PathNode per usable node, one-to-one with the underlying set
    let mut nodes: Vec<PathNode> = Vec::with_capacity(graph.usable().len());
    let mut slots: HashMap<NodeId, usize> = HashMap::with_capacity(graph.usable().len());
    for (slot, id) in graph.usable().iter().enumerate() {
        nodes.push(PathNode {
            node: *id,
            g: 0,
            h: 0,
            previous: None,
        });
        slots.insert(*id, slot);
    }

    // resolve only answers from the usable set, so both lookups succeed
    let start_slot = slots[&start_id];
    let end_slot = slots[&end_id];
    nodes[start_slot].h = manhattan_distance(start_position, end_position);

    let mut open: Vec<usize> = vec![start_slot];
    let mut in_open = vec![false; nodes.len()];
    let mut closed = vec![false; nodes.len()];
    in_open[start_slot] = true;

    let mut found = false;
    // each pass closes one node, so usable-node count bounds the loop even if
    // a stale connection list would otherwise cycle
    for _ in 0..nodes.len() {
        if open.is_empty() {
            break;
        }

        // minimum G+H; the strict comparison keeps the earliest insertion on ties
        let mut best = 0;
        for (position, &candidate) in open.iter().enumerate() {
            let cost = nodes[candidate].g + nodes[candidate].h;
            let best_cost = nodes[open[best]].g + nodes[open[best]].h;
            if cost < best_cost {
                best = position;
            }
        }
        let current = open.remove(best);
        in_open[current] = false;

        if current == end_slot {
            found = true;
            break;
        }
        closed[current] = true;

        let current_id = nodes[current].node;
        let current_position = graph.node(current_id).position;
        let current_g = nodes[current].g;
        for connection in &graph.node(current_id).connections {
            // connections may reference obstructed nodes; those have no slot
            let Some(&neighbor) = slots.get(connection) else {
                continue;
            };
            if closed[neighbor] {
                continue;
            }

            let neighbor_position = graph.node(*connection).position;
            let candidate_g = current_g + manhattan_distance(current_position, neighbor_position);

            if in_open[neighbor] {
                if candidate_g < nodes[neighbor].g {
                    nodes[neighbor].g = candidate_g;
                    nodes[neighbor].previous = Some(current);
                }
                continue;
            }

            nodes[neighbor].g = candidate_g;
            nodes[neighbor].h = manhattan_distance(neighbor_position, end_position);
            nodes[neighbor].previous = Some(current);
            open.push(neighbor);
            in_open[neighbor] = true;
        }
    }

    if !found {
        debug!("pathfinding exhausted the open set: {start:?} -> {end:?}");
        return Err(NavError::NoPath { start, end });
    }

    // walk the predecessor chain back to the start, bounded like the search
    let mut path = Vec::new();
    let mut cursor = end_slot;
    let mut steps = 0;
    loop {
        path.push(graph.node(nodes[cursor].node).position);
        if cursor == start_slot {
            break;
        }
        let Some(previous) = nodes[cursor].previous else {
            debug_assert!(false, "reconstruction reached a node with no predecessor");
            error!("path reconstruction failed between {start:?} and {end:?}");
            return Err(NavError::BrokenPath);
        };
        cursor = previous;
        steps += 1;
        if steps > nodes.len() {
            debug_assert!(false, "reconstruction exceeded the usable node count");
            error!("path reconstruction cycled between {start:?} and {end:?}");
            return Err(NavError::BrokenPath);
        }
    }
    path.reverse();

    debug!(
        "path found: {waypoints} waypoints, cost {cost}",
        waypoints = path.len(),
        cost = nodes[end_slot].g
    );
    Ok(path)
}
