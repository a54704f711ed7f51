//! Cloneable façade for issuing commands to a launched runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! advancing the simulation or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use agent_core::{DamageResponse, EntityId};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::roster::AgentSnapshot;
use crate::runtime::AdvanceReport;
use crate::spawner::SpawnRequest;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Advance virtual time by `duration_ms`
    pub async fn advance(&self, duration_ms: u64) -> Result<AdvanceReport> {
        self.request(|reply| Command::Advance { duration_ms, reply })
            .await
    }

    /// Arm the population policy
    pub async fn start(&self) -> Result<()> {
        self.request(|reply| Command::Start { reply }).await
    }

    pub async fn spawn(&self, request: SpawnRequest) -> Result<EntityId> {
        self.request(|reply| Command::Spawn { request, reply }).await
    }

    /// Apply a hit; `None` if it killed the agent
    pub async fn damage(
        &self,
        agent: EntityId,
        attacker: EntityId,
        amount: f64,
    ) -> Result<Option<DamageResponse>> {
        self.request(|reply| Command::Damage {
            agent,
            attacker,
            amount,
            reply,
        })
        .await?
    }

    /// Assign a goal and solution by name
    pub async fn assign_goal(
        &self,
        agent: EntityId,
        goal: impl Into<String>,
        solution: impl Into<String>,
    ) -> Result<bool> {
        let (goal, solution) = (goal.into(), solution.into());
        self.request(|reply| Command::AssignGoal {
            agent,
            goal,
            solution,
            reply,
        })
        .await?
    }

    pub async fn kill(&self, agent: EntityId) -> Result<()> {
        self.request(|reply| Command::Kill { agent, reply }).await?
    }

    /// Query every live agent (read-only)
    pub async fn snapshot(&self) -> Result<Vec<AgentSnapshot>> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Roster` - Agents spawned and removed
    /// - `Topic::Behavior` - Goal changes and damage
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut roster_rx = handle.subscribe(Topic::Roster);
    /// while let Ok(event) = roster_rx.recv().await {
    ///     // Handle roster events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
