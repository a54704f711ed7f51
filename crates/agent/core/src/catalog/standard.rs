//! Stock archetype table.

use super::registry::GoalCatalogBuilder;
use super::{GoalKind as G, SolutionKind as S};
use crate::state::Archetype;

pub(super) fn register(builder: GoalCatalogBuilder) -> GoalCatalogBuilder {
    builder
        // Bandit
        .offer(Archetype::Bandit, G::DoExplore, &[S::ExploreArea])
        .offer(Archetype::Bandit, G::DoHunt, &[S::SeekAndDestroy, S::PatrolArea])
        .offer(Archetype::Bandit, G::DoRest, &[S::Relax, S::Sleep])
        .offer(Archetype::Bandit, G::GetFood, &[S::SeekFood, S::StealFood])
        .offer(Archetype::Bandit, G::GetHealth, &[S::SeekHealth, S::StealHealth])
        .offer(Archetype::Bandit, G::GoHome, &[S::SeekHome])
        .offer(Archetype::Bandit, G::HaveFun, &[S::Dance])
        // Entertainer
        .offer(Archetype::Entertainer, G::DoDefend, &[S::FleeArea])
        .offer(Archetype::Entertainer, G::DoExplore, &[S::ExploreArea])
        .offer(Archetype::Entertainer, G::DoRest, &[S::Relax, S::Sleep])
        .offer(Archetype::Entertainer, G::GetFood, &[S::BuyFood, S::StealFood])
        .offer(Archetype::Entertainer, G::GetHealth, &[S::BuyHealth, S::StealHealth])
        .offer(Archetype::Entertainer, G::GoHome, &[S::SeekHome])
        .offer(Archetype::Entertainer, G::HaveFun, &[S::Dance])
        // Soldier
        .offer(Archetype::Soldier, G::DoDefend, &[S::FleeArea])
        .offer(Archetype::Soldier, G::DoHunt, &[S::SeekAndDestroy, S::PatrolArea])
        .offer(Archetype::Soldier, G::DoRest, &[S::Relax, S::Sleep])
        .offer(Archetype::Soldier, G::GetFood, &[S::BuyFood, S::SeekFood])
        .offer(Archetype::Soldier, G::GetHealth, &[S::BuyHealth, S::SeekHealth])
        .offer(Archetype::Soldier, G::GoHome, &[S::SeekHome])
}
