//! Goal arbitration.
//!
//! The arbiter owns the transitions of an agent's (goal, solution) pair:
//! fresh selection through the [`UtilityEvaluator`], forced interrupts and
//! resuming the pair that was active before an interrupt.

use crate::catalog::{Assignment, GoalKind, SolutionKind};
use crate::context::BehaviorCtx;
use crate::env::Animation;
use crate::scoring::UtilityEvaluator;
use crate::solution::Hook;

/// Assigns, interrupts and resumes goals.
pub struct GoalArbiter;

impl GoalArbiter {
    /// Installs `goal`/`solution` on the agent.
    ///
    /// # Interrupt and resume precedence
    ///
    /// - `goal_interrupt` set: it is cleared, `resume_previous` is armed and
    ///   the requested pair is installed.
    /// - otherwise, `resume_previous` set: it is cleared; if the remembered
    ///   previous pair differs from the current one, the previous pair is
    ///   resumed *instead of* the requested pair.
    ///
    /// # Returns
    ///
    /// `false` for a dead agent; otherwise whether a pair was installed.
    pub fn assign_goal(ctx: &mut BehaviorCtx<'_>, goal: GoalKind, solution: SolutionKind) -> bool {
        if !ctx.alive() {
            return false;
        }

        let agent = &mut *ctx.agent;
        if agent.goal_interrupt {
            agent.goal_interrupt = false;
            agent.resume_previous = true;
        } else if agent.resume_previous {
            agent.resume_previous = false;
            if agent.previous() != agent.current() {
                tracing::debug!(
                    target: "agent::arbiter",
                    agent = %agent.id,
                    requested = %Assignment::new(goal, solution),
                    "resuming interrupted goal instead"
                );
                return Self::resume_previous_solution(ctx);
            }
        }

        let assignment = Assignment::new(goal, solution);
        ctx.agent.install(assignment);
        tracing::info!(
            target: "agent::arbiter",
            agent = %ctx.agent.id,
            archetype = %ctx.agent.archetype,
            %goal,
            %solution,
            "goal assigned"
        );

        ctx.invoke(Hook::Enter);
        true
    }

    /// Selects and assigns a new goal and solution.
    ///
    /// # Arguments
    ///
    /// * `avoid_goal` - Exclude the current goal from selection
    /// * `avoid_solution` - Exclude the current solution from selection
    ///
    /// # Returns
    ///
    /// `false` if no goal or no solution scored non-negative.
    pub fn request_new_goal(ctx: &mut BehaviorCtx<'_>, avoid_goal: bool, avoid_solution: bool) -> bool {
        if !ctx.alive() {
            return false;
        }

        let avoid = if avoid_goal {
            ctx.agent.current_goal()
        } else {
            None
        };
        let catalog = ctx.catalog;
        let goal = UtilityEvaluator::select(
            &ctx.agent.goal_list,
            avoid,
            |g| catalog.goal_evaluator(g),
            ctx.agent,
            ctx.rng,
        );
        let Some((goal, score)) = goal else {
            tracing::debug!(target: "agent::arbiter", agent = %ctx.agent.id, "no eligible goal");
            return false;
        };
        tracing::debug!(target: "agent::arbiter", agent = %ctx.agent.id, %goal, score, "goal selected");

        match Self::select_solution(ctx, goal, avoid_solution) {
            Some(solution) => Self::assign_goal(ctx, goal, solution),
            None => false,
        }
    }

    /// Selects and assigns a new solution for the current goal.
    pub fn request_new_solution(ctx: &mut BehaviorCtx<'_>, avoid_solution: bool) -> bool {
        if !ctx.alive() {
            return false;
        }
        let Some(goal) = ctx.agent.current_goal() else {
            return false;
        };
        match Self::select_solution(ctx, goal, avoid_solution) {
            Some(solution) => Self::assign_goal(ctx, goal, solution),
            None => false,
        }
    }

    /// Re-installs the pair that was active before the current one.
    pub fn resume_previous_solution(ctx: &mut BehaviorCtx<'_>) -> bool {
        if !ctx.alive() {
            return false;
        }
        let Some(previous) = ctx.agent.previous() else {
            return false;
        };
        Self::assign_goal(ctx, previous.goal, previous.solution)
    }

    /// Common tail of every solution's exit hook.
    ///
    /// Restores the idle animation, drops the path and asks for the next goal.
    /// An agent that overstayed its goal must pick a different goal and
    /// solution. If nothing is eligible the pair is cleared so the next think
    /// tick retries.
    pub fn completed_solution(ctx: &mut BehaviorCtx<'_>) {
        if !ctx.alive() {
            return;
        }
        tracing::debug!(
            target: "agent::arbiter",
            agent = %ctx.agent.id,
            solution = ?ctx.agent.current_solution(),
            "solution completed"
        );

        ctx.animate(Animation::Look);
        ctx.release_path();

        let stagnant = ctx.agent.stagnation_ticks > ctx.config.stagnation_limit;
        if stagnant {
            ctx.agent.stagnation_ticks = 0;
        }
        if !Self::request_new_goal(ctx, stagnant, stagnant) {
            ctx.agent.clear_assignment();
        }
    }

    fn select_solution(ctx: &BehaviorCtx<'_>, goal: GoalKind, avoid_current: bool) -> Option<SolutionKind> {
        let avoid = if avoid_current {
            ctx.agent.current_solution()
        } else {
            None
        };
        let catalog = ctx.catalog;
        let candidates = catalog.solutions_for(ctx.agent.archetype, goal);
        let selected = UtilityEvaluator::select(
            candidates,
            avoid,
            |s| catalog.solution_evaluator(s),
            ctx.agent,
            ctx.rng,
        );
        match selected {
            Some((solution, score)) => {
                tracing::debug!(
                    target: "agent::arbiter",
                    agent = %ctx.agent.id,
                    %goal,
                    %solution,
                    score,
                    "solution selected"
                );
                Some(solution)
            }
            None => {
                tracing::debug!(
                    target: "agent::arbiter",
                    agent = %ctx.agent.id,
                    %goal,
                    "no eligible solution"
                );
                None
            }
        }
    }
}
