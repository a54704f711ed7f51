//! Simulation worker that owns the authoritative [`Runtime`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), applies
//! them to the runtime and replies over oneshot channels. Events reach
//! subscribers through the runtime's own event bus.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use agent_core::{DamageResponse, EntityId};

use crate::api::Result;
use crate::host::AgentHost;
use crate::roster::AgentSnapshot;
use crate::runtime::{AdvanceReport, Runtime};
use crate::spawner::SpawnRequest;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Advance virtual time.
    Advance {
        duration_ms: u64,
        reply: oneshot::Sender<AdvanceReport>,
    },
    /// Arm the population policy.
    Start { reply: oneshot::Sender<()> },
    Spawn {
        request: SpawnRequest,
        reply: oneshot::Sender<EntityId>,
    },
    /// Apply a hit of `amount` to `agent`.
    Damage {
        agent: EntityId,
        attacker: EntityId,
        amount: f64,
        reply: oneshot::Sender<Result<Option<DamageResponse>>>,
    },
    AssignGoal {
        agent: EntityId,
        goal: String,
        solution: String,
        reply: oneshot::Sender<Result<bool>>,
    },
    Kill {
        agent: EntityId,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Read-only view of every live agent.
    Snapshot {
        reply: oneshot::Sender<Vec<AgentSnapshot>>,
    },
}

/// Background task that processes runtime commands.
pub struct SimulationWorker<W> {
    runtime: Runtime<W>,
    command_rx: mpsc::Receiver<Command>,
}

impl<W: AgentHost> SimulationWorker<W> {
    pub fn new(runtime: Runtime<W>, command_rx: mpsc::Receiver<Command>) -> Self {
        tracing::info!(
            target: "runtime::worker",
            agents = runtime.roster().len(),
            "simulation worker initialized"
        );
        Self {
            runtime,
            command_rx,
        }
    }

    /// Main worker loop; ends when every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(target: "runtime::worker", "command channel closed, worker exiting");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Advance { duration_ms, reply } => {
                let report = self.runtime.advance(duration_ms);
                if reply.send(report).is_err() {
                    debug!("Advance reply channel closed (caller dropped)");
                }
            }
            Command::Start { reply } => {
                self.runtime.start();
                if reply.send(()).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::Spawn { request, reply } => {
                let id = self.runtime.spawn(request);
                if reply.send(id).is_err() {
                    debug!("Spawn reply channel closed (caller dropped)");
                }
            }
            Command::Damage {
                agent,
                attacker,
                amount,
                reply,
            } => {
                let result = self.runtime.damage(agent, attacker, amount);
                if reply.send(result).is_err() {
                    debug!("Damage reply channel closed (caller dropped)");
                }
            }
            Command::AssignGoal {
                agent,
                goal,
                solution,
                reply,
            } => {
                let result = self.runtime.assign_goal(agent, &goal, &solution);
                if reply.send(result).is_err() {
                    debug!("AssignGoal reply channel closed (caller dropped)");
                }
            }
            Command::Kill { agent, reply } => {
                let result = self.runtime.kill(agent);
                if reply.send(result).is_err() {
                    debug!("Kill reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.runtime.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
        }
    }
}
