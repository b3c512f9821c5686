use bevy::prelude::*;

/// Gates every per-tick gremlin, particle and telemetry system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, States)]
pub enum SimulationState {
    #[default]
    Running,
    Paused,
}
