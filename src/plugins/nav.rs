//! Bevy wiring for the navigation resources

use crate::cache::NearestNodeCache;
use crate::collision::CollisionWorld;
use crate::config::{self, NavConfig};
use crate::graph::NodeGraph;
use bevy::prelude::*;

/// Fired once per obstruction refresh, after the usable set has stabilised.
/// Systems holding node references re-query on receipt; pure pollers compare
/// [NodeGraph::version] instead.
#[derive(Event, Debug, Clone, Copy)]
pub struct ObstructionsRefreshed {
    pub version: u64,
    pub usable_count: usize,
}

#[derive(Resource)]
pub struct ObstructionRefreshTimer(pub Timer);

pub struct NavPlugin;

impl Plugin for NavPlugin {
    fn build(&self, app: &mut App) {
        let config = config::load_config();
        let cache = NearestNodeCache::from_config(&config);
        let timer = Timer::from_seconds(config.graph.refresh_interval.get(), TimerMode::Repeating);

        app.insert_resource(cache)
            // the game replaces this once its grid builder has run
            .insert_resource(NodeGraph::default())
            .insert_resource(CollisionWorld::default())
            .insert_resource(ObstructionRefreshTimer(timer))
            .insert_resource(config)
            .add_event::<ObstructionsRefreshed>()
            .add_systems(Update, refresh_obstructions);
    }
}

/// Periodic obstruction refresh. Episode resets and other off-schedule
/// refreshes call [NodeGraph::refresh_obstructions] on the resource directly.
fn refresh_obstructions(
    time: Res<Time>,
    mut timer: ResMut<ObstructionRefreshTimer>,
    mut graph: ResMut<NodeGraph>,
    world: Res<CollisionWorld>,
    mut refreshed: EventWriter<ObstructionsRefreshed>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    if graph.is_empty() {
        return;
    }

    graph.refresh_obstructions(&*world);
    refreshed.write(ObstructionsRefreshed {
        version: graph.version(),
        usable_count: graph.usable().len(),
    });
}
