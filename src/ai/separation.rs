//! Local flocking: keep gremlins from piling onto each other.

use bevy::prelude::*;

/// What a gremlin can see of its peers during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peer {
    pub position: Vec2,
    pub alive: bool,
}

/// Steering correction away from every live peer closer than `desired`.
///
/// Each neighbour contributes one unit vector pointing away from it. The
/// average is renormalized, scaled to `max_speed`, and the current velocity
/// subtracted. Peers at exactly zero distance (including the gremlin's own
/// entry) are skipped. Zero when nobody is in range.
pub fn separation(
    position: Vec2,
    velocity: Vec2,
    peers: &[Peer],
    desired: f32,
    max_speed: f32,
) -> Vec2 {
    let mut sum = Vec2::ZERO;
    let mut count = 0usize;

    for peer in peers.iter().filter(|p| p.alive) {
        let away = position - peer.position;
        let distance = away.length();
        if distance > 0.0 && distance < desired {
            sum += away / distance;
            count += 1;
        }
    }

    if count == 0 {
        return Vec2::ZERO;
    }

    let average = sum / count as f32;
    average.normalize_or_zero() * max_speed - velocity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(x: f32, y: f32) -> Peer {
        Peer {
            position: Vec2::new(x, y),
            alive: true,
        }
    }

    #[test]
    fn pair_pushes_apart_symmetrically() {
        let peers = [peer(0.0, 0.0), peer(10.0, 0.0)];
        let a = separation(peers[0].position, Vec2::ZERO, &peers, 20.0, 0.3);
        let b = separation(peers[1].position, Vec2::ZERO, &peers, 20.0, 0.3);

        assert!((a - Vec2::new(-0.3, 0.0)).length() < 1e-6);
        assert!((b - Vec2::new(0.3, 0.0)).length() < 1e-6);
        assert!((a + b).length() < 1e-6);
    }

    #[test]
    fn diagonal_pair_pushes_along_connecting_line() {
        let peers = [peer(0.0, 0.0), peer(6.0, 8.0)];
        let a = separation(peers[0].position, Vec2::ZERO, &peers, 20.0, 0.3);
        assert!((a - Vec2::new(-0.18, -0.24)).length() < 1e-6);
    }

    #[test]
    fn current_velocity_is_subtracted() {
        let peers = [peer(0.0, 0.0), peer(10.0, 0.0)];
        let a = separation(peers[0].position, Vec2::new(0.1, 0.2), &peers, 20.0, 0.3);
        assert!((a - Vec2::new(-0.4, -0.2)).length() < 1e-6);
    }

    #[test]
    fn out_of_range_and_dead_peers_are_ignored() {
        let mut dead = peer(5.0, 0.0);
        dead.alive = false;
        let peers = [peer(0.0, 0.0), peer(25.0, 0.0), dead];
        let a = separation(Vec2::ZERO, Vec2::new(1.0, 1.0), &peers, 20.0, 0.3);
        assert_eq!(a, Vec2::ZERO);
    }

    #[test]
    fn neighbours_are_weighted_equally() {
        // One close neighbour and one far neighbour on opposite sides cancel out
        let peers = [peer(0.0, 0.0), peer(2.0, 0.0), peer(-19.0, 0.0)];
        let a = separation(Vec2::ZERO, Vec2::ZERO, &peers, 20.0, 0.3);
        assert_eq!(a, Vec2::ZERO);
    }
}
