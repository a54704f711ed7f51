use arrayvec::ArrayVec;

use super::Position;

/// Number of waypoints in a patrol loop.
pub const PATROL_WAYPOINTS: usize = 4;

/// Per-solution scratch state.
///
/// Solutions run one at a time, so they share this block. Each solution
/// resets the fields it uses on entry; the patrol route survives across
/// sessions so an agent keeps walking the same loop.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrandState {
    /// Arrived at the solution's fixed destination (home, vendor, club).
    pub arrived: bool,
    pub explore_total: u32,
    pub explore_done: u32,
    pub patrol: PatrolRoute,
}

/// Lazily chosen patrol loop.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatrolRoute {
    pub waypoints: ArrayVec<Position, PATROL_WAYPOINTS>,
    /// Leg counter; `0` on a fresh route, then `1..=4`.
    pub leg: usize,
}

impl PatrolRoute {
    pub fn is_planned(&self) -> bool {
        self.waypoints.is_full()
    }

    /// Waypoint walked to when entering the patrol on the current leg.
    pub fn entry_waypoint(&self) -> Option<Position> {
        let index = match self.leg {
            1 => 1,
            2 => 2,
            3 => 3,
            _ => 0,
        };
        self.waypoints.get(index).copied()
    }

    /// Advances to the next leg and returns the waypoint to walk to.
    ///
    /// Legs wrap from 4 back to 1; leg `n` heads for waypoint `n + 1` and
    /// leg 4 closes the loop at the first waypoint.
    pub fn advance(&mut self) -> Option<Position> {
        self.leg += 1;
        if self.leg > PATROL_WAYPOINTS {
            self.leg = 1;
        }
        self.waypoints.get(self.leg % PATROL_WAYPOINTS).copied()
    }
}
