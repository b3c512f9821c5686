//! Procedural legs: four arms that step toward an anchor under the body.

use bevy::prelude::*;

use crate::components::Facing;
use crate::effects::Effects;
use crate::events::SoundCue;
use crate::resources::GremlinConfig;
use crate::rig::Arm;

pub const LEG_COUNT: usize = 4;
const STAGGER: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Legs {
    arms: Vec<Arm>,
    /// Moving ticks each leg still waits before its first pose update.
    lead_in: Vec<u32>,
}

impl Legs {
    pub fn new(position: Vec2, config: &GremlinConfig) -> Self {
        let hip = position + Vec2::new(0.0, config.height);
        let arms = (0..LEG_COUNT)
            .map(|_| {
                let mut arm = Arm::new(hip);
                for _ in 0..config.leg_segments {
                    arm.add_segment(config.leg_segment_length);
                }
                arm.target = position;
                arm
            })
            .collect();
        let lead_in = (0..LEG_COUNT as u32)
            .map(|i| config.leg_step_offset * i)
            .collect();
        Self { arms, lead_in }
    }

    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    pub fn targets(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.arms.iter().map(|arm| arm.target)
    }

    /// Where the legs want to plant for a body at `position` facing `facing`.
    pub fn anchor(position: Vec2, facing: Facing, config: &GremlinConfig) -> Vec2 {
        let x = match facing {
            Facing::Left => position.x - config.leg_reach,
            Facing::Right => position.x + config.leg_reach,
            Facing::Up | Facing::Down => position.x,
        };
        Vec2::new(x, position.y + config.height + config.leg_drop)
    }

    /// One moving tick: replant legs that drifted too far from the anchor,
    /// re-hang the arms under the body and advance the poses of legs whose
    /// lead-in has elapsed.
    pub fn step(
        &mut self,
        position: Vec2,
        facing: Facing,
        config: &GremlinConfig,
        effects: &mut Effects,
    ) {
        let anchor = Self::anchor(position, facing, config);
        for (index, arm) in self.arms.iter_mut().enumerate() {
            if arm.target.distance(anchor) > config.step_distance {
                let stagger = if index == 0 { 0.0 } else { STAGGER };
                arm.target = anchor + Vec2::new(stagger, 0.0);
                effects.sound(SoundCue::Footstep);
            }
        }

        for (index, (arm, wait)) in self.arms.iter_mut().zip(&mut self.lead_in).enumerate() {
            arm.base = position
                + Vec2::new(
                    STAGGER * index as f32,
                    config.height + STAGGER * (index % 2) as f32,
                );
            if *wait == 0 {
                arm.update();
            } else {
                *wait -= 1;
            }
        }
    }
}
