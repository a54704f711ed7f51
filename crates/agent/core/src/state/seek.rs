use super::{EntityId, Position};
use crate::env::EntityKinds;

/// Target-acquisition state of one agent.
///
/// Seeking walks the agent to a matching entity; detecting only notices one.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeekState {
    pub seeking: bool,
    /// Name filter; `None` accepts any entity of the requested kinds.
    pub object_name: Option<String>,
    pub object_kinds: EntityKinds,
    pub distance_away: f64,
    /// Locked-on target (set once a candidate is found or pathed toward).
    pub object: Option<EntityId>,
    pub last_known_position: Option<Position>,
    pub found: bool,
    /// Set when the agent resolved the target in place.
    pub on_object: bool,

    pub detecting: bool,
    pub detect_name: Option<String>,
    pub detect_kinds: EntityKinds,
    pub detect_found: bool,
    pub detect_object: Option<EntityId>,
}

impl SeekState {
    /// Clears every seek field back to its initial value.
    pub fn reset_seek(&mut self) {
        self.seeking = false;
        self.object_name = None;
        self.object_kinds = EntityKinds::empty();
        self.distance_away = 0.0;
        self.object = None;
        self.last_known_position = None;
        self.found = false;
        self.on_object = false;
    }

    /// Clears every detect field back to its initial value.
    pub fn reset_detect(&mut self) {
        self.detecting = false;
        self.detect_name = None;
        self.detect_kinds = EntityKinds::empty();
        self.detect_found = false;
        self.detect_object = None;
    }
}
