use std::sync::Arc;

use super::{CombatState, EntityId, ErrandState, Path, Position, SeekState};
use crate::catalog::{Assignment, GoalKind, SolutionKind};

/// Behavioral class of an agent.
///
/// The archetype weights every utility score and restricts which goals and
/// solutions the catalog offers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Archetype {
    Bandit,
    Entertainer,
    Soldier,
}

impl Archetype {
    /// Maps a 1-based roll to an archetype (1 bandit, 2 entertainer, 3 soldier).
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Bandit),
            2 => Some(Self::Entertainer),
            3 => Some(Self::Soldier),
            _ => None,
        }
    }

    /// Archetype this one hunts, if any.
    pub const fn rival(self) -> Option<Self> {
        match self {
            Self::Soldier => Some(Self::Bandit),
            Self::Bandit => Some(Self::Soldier),
            Self::Entertainer => None,
        }
    }
}

/// Internal needs driving utility scores.
///
/// Values drift without bounds; nothing clamps them.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Vitals {
    pub health: f64,
    pub fatigue: f64,
    pub happiness: f64,
    pub boredom: f64,
    pub money: f64,
}

impl Vitals {
    pub const fn new(health: f64, fatigue: f64, happiness: f64, boredom: f64, money: f64) -> Self {
        Self {
            health,
            fatigue,
            happiness,
            boredom,
            money,
        }
    }
}

/// Autonomous agent and all of its behavior state.
///
/// The goal/solution pair is private so it can only change through
/// [`Agent::install`] and [`Agent::clear_assignment`], which keep both halves
/// in lockstep.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id: EntityId,
    pub archetype: Archetype,
    pub vitals: Vitals,
    pub position: Position,
    pub alive: bool,

    current: Option<Assignment>,
    previous: Option<Assignment>,
    pub goal_interrupt: bool,
    pub resume_previous: bool,
    pub stagnation_ticks: u32,
    pub last_tick_goal: Option<GoalKind>,

    pub seek: SeekState,
    pub combat: CombatState,
    pub errand: ErrandState,

    path: Option<Path>,
    /// Point the movement collaborator was last asked to reach.
    pub move_destination: Option<Position>,
    /// Destination whose path could not be built yet; retried on think.
    pub pending_destination: Option<Position>,

    /// Goals permitted for this archetype, shared with the catalog.
    pub goal_list: Arc<[GoalKind]>,

    epoch: u64,
    nonce: u64,
    seed: u64,
}

impl Agent {
    pub fn new(
        id: EntityId,
        archetype: Archetype,
        vitals: Vitals,
        position: Position,
        goal_list: Arc<[GoalKind]>,
        seed: u64,
    ) -> Self {
        Self {
            id,
            archetype,
            vitals,
            position,
            alive: true,
            current: None,
            previous: None,
            goal_interrupt: false,
            resume_previous: false,
            stagnation_ticks: 0,
            last_tick_goal: None,
            seek: SeekState::default(),
            combat: CombatState::default(),
            errand: ErrandState::default(),
            path: None,
            move_destination: None,
            pending_destination: None,
            goal_list,
            epoch: 0,
            nonce: 0,
            seed,
        }
    }

    pub fn current(&self) -> Option<Assignment> {
        self.current
    }

    pub fn previous(&self) -> Option<Assignment> {
        self.previous
    }

    pub fn current_goal(&self) -> Option<GoalKind> {
        self.current.map(|a| a.goal)
    }

    pub fn current_solution(&self) -> Option<SolutionKind> {
        self.current.map(|a| a.solution)
    }

    /// Installs a new pair, remembering the outgoing one as previous.
    ///
    /// Bumps the assignment epoch so continuations scheduled by the outgoing
    /// solution are discarded.
    pub fn install(&mut self, assignment: Assignment) {
        if let Some(current) = self.current {
            self.previous = Some(current);
        }
        self.current = Some(assignment);
        self.epoch += 1;
    }

    /// Drops the active pair without touching the previous one.
    pub fn clear_assignment(&mut self) {
        self.current = None;
        self.epoch += 1;
    }

    /// Counter identifying the active assignment.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn path_mut(&mut self) -> Option<&mut Path> {
        self.path.as_mut()
    }

    /// Attaches a new path. Any previous path must already be released.
    pub fn attach_path(&mut self, path: Path) {
        self.path = Some(path);
    }

    pub fn take_path(&mut self) -> Option<Path> {
        self.path.take()
    }

    /// Base seed for this agent's random draws.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw counter; read by pure evaluators, advanced by [`Agent::next_nonce`].
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn next_nonce(&mut self) -> u64 {
        self.nonce += 1;
        self.nonce
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> Agent {
        Agent::new(
            EntityId(1),
            Archetype::Soldier,
            Vitals::default(),
            Position::ORIGIN,
            Arc::from(Vec::<GoalKind>::new()),
            0,
        )
    }

    #[test]
    fn test_install_tracks_previous_pair() {
        let mut agent = agent();
        let rest = Assignment::new(GoalKind::DoRest, SolutionKind::Relax);
        let hunt = Assignment::new(GoalKind::DoHunt, SolutionKind::PatrolArea);

        agent.install(rest);
        assert_eq!(agent.previous(), None);
        agent.install(hunt);
        assert_eq!(agent.current(), Some(hunt));
        assert_eq!(agent.previous(), Some(rest));
    }

    #[test]
    fn test_goal_and_solution_move_together() {
        let mut agent = agent();
        assert_eq!(agent.current_goal(), None);
        assert_eq!(agent.current_solution(), None);

        agent.install(Assignment::new(GoalKind::GoHome, SolutionKind::SeekHome));
        assert!(agent.current_goal().is_some() && agent.current_solution().is_some());

        agent.clear_assignment();
        assert!(agent.current_goal().is_none() && agent.current_solution().is_none());
    }

    #[test]
    fn test_epoch_changes_on_every_install() {
        let mut agent = agent();
        let start = agent.epoch();
        agent.install(Assignment::new(GoalKind::DoRest, SolutionKind::Sleep));
        agent.install(Assignment::new(GoalKind::DoRest, SolutionKind::Sleep));
        assert_eq!(agent.epoch(), start + 2);
    }

    #[test]
    fn test_archetype_codes() {
        assert_eq!(Archetype::from_code(1), Some(Archetype::Bandit));
        assert_eq!(Archetype::from_code(3), Some(Archetype::Soldier));
        assert_eq!(Archetype::from_code(4), None);
        assert_eq!(Archetype::Soldier.rival(), Some(Archetype::Bandit));
        assert_eq!(Archetype::Entertainer.rival(), None);
    }
}
