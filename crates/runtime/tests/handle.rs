//! Async surface of a launched runtime.

use agent_core::{Archetype, Position, Tick};
use runtime::{Event, RosterEvent, Runtime, RuntimeError, SandboxWorld, SpawnRequest, Topic};

fn launch() -> (runtime::RuntimeHandle, tokio::task::JoinHandle<()>) {
    Runtime::builder()
        .world(SandboxWorld::default())
        .build()
        .expect("runtime builds")
        .launch()
}

#[tokio::test]
async fn test_handle_drives_worker() {
    let (handle, worker) = launch();
    let mut roster = handle.subscribe(Topic::Roster);

    let id = handle
        .spawn(SpawnRequest::archetype(Archetype::Soldier).at(Position::ORIGIN))
        .await
        .expect("worker alive");
    assert!(matches!(
        roster.recv().await,
        Ok(Event::Roster(RosterEvent::Spawned { agent, .. })) if agent == id
    ));

    let report = handle.advance(5_000).await.expect("worker alive");
    assert_eq!(report.now, Tick(5_000));

    let snapshot = handle.snapshot().await.expect("worker alive");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, id);
    assert!(snapshot[0].goal.is_some());

    assert!(handle.assign_goal(id, "doRest", "relax").await.expect("agent is live"));

    handle.kill(id).await.expect("agent is live");
    assert!(handle.snapshot().await.expect("worker alive").is_empty());
    assert!(matches!(
        handle.kill(id).await,
        Err(RuntimeError::UnknownAgent(_))
    ));

    drop(handle);
    worker.await.expect("worker exits cleanly");
}

#[tokio::test]
async fn test_population_through_handle() {
    let (handle, _worker) = launch();
    let mut roster = handle.subscribe(Topic::Roster);

    handle.start().await.expect("worker alive");
    // default policy: two agents after fifteen seconds
    handle.advance(15_000).await.expect("worker alive");

    let snapshot = handle.snapshot().await.expect("worker alive");
    assert_eq!(snapshot.len(), 2);
    for _ in 0..2 {
        assert!(matches!(
            roster.recv().await,
            Ok(Event::Roster(RosterEvent::Spawned { .. }))
        ));
    }
}

#[tokio::test]
async fn test_closed_worker_reports_channel_error() {
    let (handle, worker) = launch();
    worker.abort();
    let _ = worker.await;

    assert!(matches!(
        handle.advance(100).await,
        Err(RuntimeError::CommandChannelClosed)
    ));
}
