//! Walkable node graph with obstruction tracking
//!
//! The graph owns every sampled node plus the derived set of usable
//! (non-obstructed) ids. Refreshes recompute both atomically and bump a
//! version counter; dependents compare the counter instead of subscribing to
//! callbacks, so a stale cache simply notices on its next query.

use crate::collision::{CollisionChannel, CollisionQuery};
use crate::config::GraphSettings;
use bevy::prelude::*;

pub mod builder;

/// Index of a node within its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// A sampled walkable position and its graph connectivity
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub position: Vec3,
    pub obstructed: bool,
    pub connections: Vec<NodeId>,
}

/// The full node set plus the derived usable subset.
///
/// Owned explicitly and passed by reference into the cache and pathfinder;
/// multiple arenas simply hold separate graphs.
#[derive(Resource, Debug, Clone)]
pub struct NodeGraph {
    nodes: Vec<Node>,
    usable: Vec<NodeId>,
    /// Grid spacing used to regenerate connections, when known
    spacing: Option<f32>,
    connection_slack: f32,
    probe_radius: f32,
    version: u64,
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            usable: Vec::new(),
            spacing: None,
            connection_slack: 1.0,
            probe_radius: 0.5,
            version: 0,
        }
    }
}

impl NodeGraph {
    /// Build a graph from externally generated node positions.
    ///
    /// Connections follow the distance-threshold rule against the configured
    /// grid frequency; all nodes start unobstructed until the first refresh.
    pub fn from_positions(
        positions: impl IntoIterator<Item = Vec3>,
        settings: &GraphSettings,
    ) -> Self {
        let nodes: Vec<Node> = positions
            .into_iter()
            .enumerate()
            .map(|(index, position)| Node {
                id: NodeId(index),
                position,
                obstructed: false,
                connections: Vec::new(),
            })
            .collect();
        let usable = nodes.iter().map(|node| node.id).collect();

        let mut graph = Self {
            nodes,
            usable,
            spacing: Some(settings.grid_frequency.get()),
            connection_slack: settings.connection_slack.get(),
            probe_radius: settings.node_probe_radius.get(),
            version: 0,
        };
        graph.generate_connections();

        info!(
            "built node graph: {count} nodes, spacing {spacing:.2}",
            count = graph.nodes.len(),
            spacing = settings.grid_frequency.get()
        );
        graph
    }

    /// Build a graph whose connections were linked by the caller.
    ///
    /// Without a spacing value, refreshes update obstruction flags but leave
    /// the hand-linked connections alone.
    pub fn from_linked(nodes: Vec<(Vec3, Vec<usize>)>, probe_radius: f32) -> Self {
        let nodes: Vec<Node> = nodes
            .into_iter()
            .enumerate()
            .map(|(index, (position, connections))| Node {
                id: NodeId(index),
                position,
                obstructed: false,
                connections: connections.into_iter().map(NodeId).collect(),
            })
            .collect();
        let usable = nodes.iter().map(|node| node.id).collect();

        Self {
            nodes,
            usable,
            spacing: None,
            connection_slack: 1.0,
            probe_radius,
            version: 0,
        }
    }

    /// Re-evaluate every node's obstruction flag against the collision world,
    /// recompute the usable subset, regenerate connections when a spacing is
    /// known, and bump the version so dependents invalidate lazily.
    pub fn refresh_obstructions(&mut self, world: &dyn CollisionQuery) {
        if self.nodes.is_empty() {
            debug!("obstruction refresh skipped: graph has no nodes");
            return;
        }

        for node in &mut self.nodes {
            node.obstructed = !world
                .overlap_sphere(node.position, self.probe_radius, CollisionChannel::Obstacle)
                .is_empty();
        }
        self.usable = self
            .nodes
            .iter()
            .filter(|node| !node.obstructed)
            .map(|node| node.id)
            .collect();

        if self.spacing.is_some() {
            self.generate_connections();
        }

        self.version += 1;
        info!(
            "obstruction refresh: {usable}/{total} nodes usable, version {version}",
            usable = self.usable.len(),
            total = self.nodes.len(),
            version = self.version
        );
    }

    /// Regenerate every non-obstructed node's connections against all nodes.
    ///
    /// Obstructed neighbors stay listed; traversal filters them out through
    /// the usable set, so a cleared obstruction restores reachability on the
    /// next refresh without relinking the whole neighborhood.
    fn generate_connections(&mut self) {
        let Some(spacing) = self.spacing else {
            return;
        };
        let max_distance =
            round_to_hundredths(spacing * std::f32::consts::SQRT_2 * self.connection_slack);

        let positions: Vec<Vec3> = self.nodes.iter().map(|node| node.position).collect();
        for node in &mut self.nodes {
            if node.obstructed {
                continue;
            }
            node.connections.clear();
            for (index, position) in positions.iter().enumerate() {
                if index == node.id.0 {
                    continue;
                }
                if node.position.distance(*position) > max_distance {
                    continue;
                }
                node.connections.push(NodeId(index));
            }
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Ids of all currently non-obstructed nodes, in id order
    pub fn usable(&self) -> &[NodeId] {
        &self.usable
    }

    /// Incremented once per refresh, after the usable set has stabilised
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The connection threshold is rounded to hundredths, which keeps exact
/// diagonals (spacing * sqrt(2)) just outside it on uniform grids while
/// tolerating the position jitter of ground-snapped samples.
fn round_to_hundredths(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{CollisionChannel, CollisionShape, CollisionWorld};
    use crate::config::GraphSettings;

    fn grid_graph(size: usize) -> NodeGraph {
        let mut positions = Vec::new();
        for x in 0..size {
            for z in 0..size {
                positions.push(Vec3::new(x as f32, 0.0, z as f32));
            }
        }
        NodeGraph::from_positions(positions, &GraphSettings::default())
    }

    #[test]
    fn test_grid_connections_are_cardinal() {
        let graph = grid_graph(3);

        // corner, edge and center nodes of a 3x3 grid
        let corner = graph.node(NodeId(0));
        assert_eq!(corner.connections.len(), 2);

        let edge = graph.node(NodeId(1));
        assert_eq!(edge.connections.len(), 3);

        let center = graph.node(NodeId(4));
        assert_eq!(center.connections.len(), 4);

        // diagonals sit at sqrt(2), outside the rounded threshold
        assert!(!center.connections.contains(&NodeId(0)));
    }

    #[test]
    fn test_all_nodes_usable_before_refresh() {
        let graph = grid_graph(3);
        assert_eq!(graph.usable().len(), 9);
        assert_eq!(graph.version(), 0);
    }

    #[test]
    fn test_refresh_marks_obstructed_nodes() {
        let mut graph = grid_graph(3);
        let mut world = CollisionWorld::new();
        world.add_obstacle(Vec3::new(1.0, 0.0, 1.0), CollisionShape::Sphere { radius: 0.3 });

        graph.refresh_obstructions(&world);

        assert_eq!(graph.version(), 1);
        assert!(graph.node(NodeId(4)).obstructed);
        assert_eq!(graph.usable().len(), 8);
        assert!(!graph.usable().contains(&NodeId(4)));
    }

    #[test]
    fn test_usable_set_matches_flags() {
        let mut graph = grid_graph(4);
        let mut world = CollisionWorld::new();
        world.add_obstacle(Vec3::new(0.0, 0.0, 0.0), CollisionShape::Sphere { radius: 0.2 });
        world.add_obstacle(Vec3::new(2.0, 0.0, 3.0), CollisionShape::Sphere { radius: 0.2 });

        graph.refresh_obstructions(&world);

        for node in graph.nodes() {
            assert_eq!(!node.obstructed, graph.usable().contains(&node.id));
        }
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let mut graph = grid_graph(4);
        let mut world = CollisionWorld::new();
        world.add_obstacle(Vec3::new(1.0, 0.0, 2.0), CollisionShape::Sphere { radius: 0.4 });

        graph.refresh_obstructions(&world);
        let first: Vec<NodeId> = graph.usable().to_vec();
        graph.refresh_obstructions(&world);

        assert_eq!(graph.usable(), first.as_slice());
        assert_eq!(graph.version(), 2);
    }

    #[test]
    fn test_refresh_clears_when_obstacle_leaves() {
        let mut graph = grid_graph(3);
        let mut world = CollisionWorld::new();
        world.add_obstacle(Vec3::new(1.0, 0.0, 1.0), CollisionShape::Sphere { radius: 0.3 });

        graph.refresh_obstructions(&world);
        assert_eq!(graph.usable().len(), 8);

        world.clear_channel(CollisionChannel::Obstacle);
        graph.refresh_obstructions(&world);
        assert_eq!(graph.usable().len(), 9);
        assert_eq!(graph.version(), 2);
    }

    #[test]
    fn test_empty_graph_refresh_is_noop() {
        let mut graph = NodeGraph::default();
        let world = CollisionWorld::new();

        graph.refresh_obstructions(&world);
        assert_eq!(graph.version(), 0);
        assert!(graph.usable().is_empty());
    }

    #[test]
    fn test_from_linked_keeps_connections_across_refresh() {
        let mut graph = NodeGraph::from_linked(
            vec![
                (Vec3::ZERO, vec![1]),
                (Vec3::new(5.0, 0.0, 0.0), vec![0, 2]),
                (Vec3::new(10.0, 0.0, 0.0), vec![1]),
            ],
            0.5,
        );
        let world = CollisionWorld::new();

        graph.refresh_obstructions(&world);

        // hand-linked connections survive even though the nodes are far apart
        assert_eq!(graph.node(NodeId(1)).connections, vec![NodeId(0), NodeId(2)]);
    }
}
