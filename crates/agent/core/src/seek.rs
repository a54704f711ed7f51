//! Target acquisition.
//!
//! Seeking walks an agent toward the closest matching entity and declares it
//! found once close enough; detecting only notices one. Both resolve by
//! invoking the active solution's `on_reach_destination`.

use crate::context::BehaviorCtx;
use crate::env::{EntityKinds, EntityView, SpatialQuery};
use crate::solution::Hook;
use crate::state::{EntityId, Position};

/// Seek and detect operations.
pub struct TargetAcquisition;

impl TargetAcquisition {
    /// Arms seeking mode, resetting all previous seek state.
    ///
    /// Stops detecting; the two modes never run together.
    ///
    /// # Arguments
    ///
    /// * `name` - Only entities with this name match; `None` accepts any
    /// * `kinds` - Entity kinds to search
    /// * `distance_away` - "Close enough" distance; defaults to the configured one
    pub fn seek_object(
        ctx: &mut BehaviorCtx<'_>,
        name: Option<&str>,
        kinds: EntityKinds,
        distance_away: Option<f64>,
    ) {
        let distance_away = distance_away.unwrap_or(ctx.config.seek_distance_away);
        let seek = &mut ctx.agent.seek;
        seek.reset_seek();
        seek.seeking = true;
        seek.detecting = false;
        seek.object_name = name.map(str::to_owned);
        seek.object_kinds = kinds;
        seek.distance_away = distance_away;

        tracing::debug!(
            target: "agent::seek",
            agent = %ctx.agent.id,
            ?name,
            ?kinds,
            distance_away,
            "seek armed"
        );
    }

    /// Arms detect mode: notice a match without walking to it. Stops seeking.
    pub fn detect_object(ctx: &mut BehaviorCtx<'_>, name: Option<&str>, kinds: EntityKinds) {
        let seek = &mut ctx.agent.seek;
        seek.reset_detect();
        seek.detecting = true;
        seek.seeking = false;
        seek.detect_name = name.map(str::to_owned);
        seek.detect_kinds = kinds;
    }

    pub fn cancel_seek(ctx: &mut BehaviorCtx<'_>) {
        ctx.agent.seek.reset_seek();
    }

    pub fn cancel_detect(ctx: &mut BehaviorCtx<'_>) {
        ctx.agent.seek.reset_detect();
    }

    /// Locks onto `target` and paths toward it.
    pub fn lock_on(ctx: &mut BehaviorCtx<'_>, target: &EntityView) {
        let seek = &mut ctx.agent.seek;
        seek.found = true;
        seek.object = Some(target.id);
        seek.last_known_position = Some(target.position);
        ctx.travel_to(target.position);
    }

    /// Closest living entity around `origin` matching the filters.
    ///
    /// Excludes `exclude` (the searcher itself). The first of equally distant
    /// candidates wins.
    pub fn find_closest<S: SpatialQuery + ?Sized>(
        spatial: &S,
        origin: Position,
        radius: f64,
        exclude: EntityId,
        name: Option<&str>,
        kinds: EntityKinds,
    ) -> Option<EntityView> {
        spatial
            .radius_search(origin, radius, kinds)
            .into_iter()
            .filter(|e| e.id != exclude && !e.is_dead())
            .filter(|e| name.is_none_or(|n| e.name == n))
            .map(|e| (origin.distance(&e.position), e))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, e)| e)
    }

    /// Per-tick step of both modes.
    pub fn think(ctx: &mut BehaviorCtx<'_>) {
        if ctx.agent.seek.seeking {
            if ctx.agent.seek.found {
                Self::track(ctx);
            } else {
                Self::search(ctx);
            }
        }
        if ctx.alive() && ctx.agent.seek.detecting {
            Self::detect(ctx);
        }
    }

    fn search(ctx: &mut BehaviorCtx<'_>) {
        let seek = &ctx.agent.seek;
        let candidate = Self::find_closest(
            &*ctx.world,
            ctx.agent.position,
            ctx.config.seek_radius,
            ctx.agent.id,
            seek.object_name.as_deref(),
            seek.object_kinds,
        );

        match candidate {
            None => Self::wander(ctx),
            Some(target) => {
                let distance = ctx.agent.position.distance(&target.position);
                tracing::debug!(
                    target: "agent::seek",
                    agent = %ctx.agent.id,
                    target = %target.id,
                    distance,
                    "candidate found"
                );
                if distance < ctx.agent.seek.distance_away {
                    Self::resolve_close(ctx, &target);
                } else {
                    Self::lock_on(ctx, &target);
                }
            }
        }
    }

    fn track(ctx: &mut BehaviorCtx<'_>) {
        let Some(object) = ctx.agent.seek.object else {
            Self::cancel_seek(ctx);
            return;
        };

        let target = ctx
            .world
            .radius_search(ctx.agent.position, ctx.config.seek_radius, ctx.agent.seek.object_kinds)
            .into_iter()
            .find(|e| e.id == object);
        let target = match target {
            Some(target) if !target.is_dead() => target,
            _ => {
                tracing::debug!(target: "agent::seek", agent = %ctx.agent.id, target = %object, "target lost");
                Self::cancel_seek(ctx);
                return;
            }
        };

        if ctx.agent.position.distance(&target.position) < ctx.agent.seek.distance_away {
            Self::resolve_close(ctx, &target);
        } else {
            Self::follow(ctx, &target);
        }
    }

    /// Target within reach: actors need line of sight, anything else is found.
    fn resolve_close(ctx: &mut BehaviorCtx<'_>, target: &EntityView) {
        if target.is_actor() {
            if ctx.world.line_of_sight(ctx.agent.id, target.id) {
                Self::declare_found(ctx, target);
            } else if ctx.agent.seek.found {
                Self::follow(ctx, target);
            } else {
                Self::lock_on(ctx, target);
            }
        } else {
            if target.is_pickup() {
                ctx.teleport(target.position);
            }
            Self::declare_found(ctx, target);
        }
    }

    /// Re-paths only when the target moved or the path ran out.
    fn follow(ctx: &mut BehaviorCtx<'_>, target: &EntityView) {
        let moved = ctx
            .agent
            .seek
            .last_known_position
            .is_none_or(|last| last.distance(&target.position) > ctx.config.moved_tolerance);
        let stalled = ctx.agent.path().is_none() && ctx.agent.move_destination.is_none();
        if moved || stalled {
            Self::lock_on(ctx, target);
        }
    }

    fn declare_found(ctx: &mut BehaviorCtx<'_>, target: &EntityView) {
        let seek = &mut ctx.agent.seek;
        seek.seeking = false;
        seek.found = true;
        seek.on_object = true;
        seek.object = Some(target.id);
        seek.last_known_position = Some(target.position);
        tracing::debug!(target: "agent::seek", agent = %ctx.agent.id, target = %target.id, "found");

        ctx.release_path();
        ctx.invoke(Hook::ReachDestination);
    }

    fn wander(ctx: &mut BehaviorCtx<'_>) {
        let exhausted = ctx.agent.path().is_none_or(|path| !path.has_more_waypoints());
        if exhausted {
            let point = ctx.random_point();
            ctx.travel_to(point);
        }
    }

    fn detect(ctx: &mut BehaviorCtx<'_>) {
        let seek = &ctx.agent.seek;
        let Some(target) = Self::find_closest(
            &*ctx.world,
            ctx.agent.position,
            ctx.config.seek_radius,
            ctx.agent.id,
            seek.detect_name.as_deref(),
            seek.detect_kinds,
        ) else {
            return;
        };

        let seek = &mut ctx.agent.seek;
        seek.detecting = false;
        seek.detect_found = true;
        seek.detect_object = Some(target.id);
        tracing::debug!(target: "agent::seek", agent = %ctx.agent.id, target = %target.id, "detected");

        ctx.invoke(Hook::ReachDestination);
    }
}
