pub mod astar;
pub mod cache;
pub mod collision;
pub mod config;
pub mod direction;
pub mod errors;
pub mod graph;
pub mod plugins;
pub mod steering;

// Selective re-exports for external consumers

// Plugins - host games need the plugin and its event
pub use plugins::{NavPlugin, ObstructionsRefreshed};

// Errors - every navigation call site handles these
pub use errors::{NavError, NavResult};

// Core navigation surface
pub use astar::{find_path, manhattan_distance, path_cost};
pub use cache::NearestNodeCache;
pub use collision::{
    CollisionChannel, CollisionQuery, CollisionShape, CollisionWorld, SurfaceHit,
};
pub use config::NavConfig;
pub use direction::{DIRECTION_COUNT, DirectionSet};
pub use graph::{Node, NodeGraph, NodeId, builder::grid_positions};
pub use steering::ObstacleDetection;
