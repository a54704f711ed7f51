use std::collections::VecDeque;

use super::Position;

/// Ordered waypoint sequence produced by a path service.
///
/// A path is owned by exactly one agent. It is only ever consumed front to
/// back; a different route means discarding the path and attaching a new one.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    waypoints: VecDeque<Position>,
    destination: Option<Position>,
}

impl Path {
    /// Builds a path from waypoints; the last waypoint is the destination.
    pub fn new(waypoints: impl IntoIterator<Item = Position>) -> Self {
        let waypoints: VecDeque<Position> = waypoints.into_iter().collect();
        let destination = waypoints.back().copied();
        Self {
            waypoints,
            destination,
        }
    }

    /// Pops the next waypoint to walk to.
    pub fn next_waypoint(&mut self) -> Option<Position> {
        self.waypoints.pop_front()
    }

    /// Peeks at the next waypoint without consuming it.
    pub fn peek(&self) -> Option<Position> {
        self.waypoints.front().copied()
    }

    pub fn has_more_waypoints(&self) -> bool {
        !self.waypoints.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.waypoints.len()
    }

    /// Final point of the route, kept after all waypoints are consumed.
    pub fn destination(&self) -> Option<Position> {
        self.destination
    }
}
