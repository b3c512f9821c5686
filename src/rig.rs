//! Articulated limb used for procedural legs.
//!
//! An `Arm` is a chain of fixed-length segments rooted at `base`. Each
//! `update` drags the chain tip toward `target`, then re-roots the chain.

use bevy::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub angle: f32,
    pub length: f32,
}

impl Segment {
    pub fn end(&self) -> Vec2 {
        self.start + Vec2::from_angle(self.angle) * self.length
    }

    /// Turn toward `point` and slide back along the new heading so the
    /// segment ends exactly on it.
    fn drag_to(&mut self, point: Vec2) {
        let to_point = point - self.start;
        if to_point != Vec2::ZERO {
            self.angle = to_point.y.atan2(to_point.x);
        }
        self.start = point - Vec2::from_angle(self.angle) * self.length;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arm {
    pub base: Vec2,
    pub target: Vec2,
    segments: Vec<Segment>,
}

impl Arm {
    pub fn new(base: Vec2) -> Self {
        Self {
            base,
            target: base,
            segments: Vec::new(),
        }
    }

    /// Append a segment to the tip, initially pointing along +X.
    pub fn add_segment(&mut self, length: f32) {
        let start = self.segments.last().map_or(self.base, Segment::end);
        self.segments.push(Segment {
            start,
            angle: 0.0,
            length,
        });
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn tip(&self) -> Vec2 {
        self.segments.last().map_or(self.base, Segment::end)
    }

    /// Advance the pose one step toward `target`.
    pub fn update(&mut self) {
        let mut point = self.target;
        for segment in self.segments.iter_mut().rev() {
            segment.drag_to(point);
            point = segment.start;
        }

        let mut start = self.base;
        for segment in &mut self.segments {
            segment.start = start;
            start = segment.end();
        }
    }
}
