//! End-to-end tests driving a run-like lifecycle through the engine.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use waypoint::builder::{MachineBuilder, StateDefinitionBuilder, TransitionBuilder};
use waypoint::factory::MachineFactory;
use waypoint::machine::MachineError;
use waypoint::{event_enum, state_enum};

state_enum! {
    enum RunState {
        Created,
        Built,
        Running,
        Stopped,
        Failed,
        Deleted,
    }
    terminal: [Deleted]
}

event_enum! {
    enum RunEvent {
        Build,
        Run,
        Stop,
        Delete,
    }
}

type Builder = MachineBuilder<RunState, RunEvent, u32, u32>;
type DefBuilder = StateDefinitionBuilder<RunState, RunEvent, u32, u32>;
type EdgeBuilder = TransitionBuilder<RunState, RunEvent, u32, u32>;

/// Created --Build--> Built --Run--> Running --Stop--> Stopped, each hop
/// incrementing the context counter.
fn lifecycle_machine() -> waypoint::Machine<RunState, RunEvent, u32, u32> {
    lifecycle_builder().build().unwrap()
}

fn lifecycle_builder() -> Builder {
    fn counting_edge(event: RunEvent, target: RunState) -> EdgeBuilder {
        TransitionBuilder::new()
            .event(event)
            .to(target)
            .effect(|ctx, _input| Some(ctx.copied().unwrap_or(0) + 1))
    }

    Builder::new()
        .initial(RunState::Created)
        .context(0)
        .state(
            DefBuilder::new()
                .state(RunState::Created)
                .transition(counting_edge(RunEvent::Build, RunState::Built))
                .unwrap()
                .build()
                .unwrap(),
        )
        .state(
            DefBuilder::new()
                .state(RunState::Built)
                .transition(counting_edge(RunEvent::Run, RunState::Running))
                .unwrap()
                .build()
                .unwrap(),
        )
        .state(
            DefBuilder::new()
                .state(RunState::Running)
                .transition(counting_edge(RunEvent::Stop, RunState::Stopped))
                .unwrap()
                .build()
                .unwrap(),
        )
        .state(DefBuilder::new().state(RunState::Stopped).build().unwrap())
}

#[test]
fn reachable_target_is_reached_across_multiple_hops() {
    let machine = lifecycle_machine();

    let report = machine.go_to(&RunState::Stopped, &0).unwrap();

    assert!(report.reached_target);
    assert_eq!(report.reached, RunState::Stopped);
    assert_eq!(machine.current_state().unwrap(), RunState::Stopped);
    assert_eq!(machine.context().unwrap(), Some(3));

    let journal = machine.journal().unwrap();
    assert_eq!(
        journal.path(),
        vec![
            &RunState::Created,
            &RunState::Built,
            &RunState::Running,
            &RunState::Stopped
        ]
    );
}

#[test]
fn rejecting_guard_halts_partway_without_error() {
    // Three-hop path Created -> Built -> Running -> Stopped with the second
    // hop guarded shut: the machine must end at Built, not Created and not
    // Stopped, and the call must not error.
    let machine = Builder::new()
        .initial(RunState::Created)
        .context(0)
        .state(
            DefBuilder::new()
                .state(RunState::Created)
                .transition(EdgeBuilder::new().event(RunEvent::Build).to(RunState::Built))
                .unwrap()
                .build()
                .unwrap(),
        )
        .state(
            DefBuilder::new()
                .state(RunState::Built)
                .transition(
                    EdgeBuilder::new()
                        .event(RunEvent::Run)
                        .to(RunState::Running)
                        .when(|_ctx, _input| false),
                )
                .unwrap()
                .build()
                .unwrap(),
        )
        .state(
            DefBuilder::new()
                .state(RunState::Running)
                .transition(EdgeBuilder::new().event(RunEvent::Stop).to(RunState::Stopped))
                .unwrap()
                .build()
                .unwrap(),
        )
        .state(DefBuilder::new().state(RunState::Stopped).build().unwrap())
        .build()
        .unwrap();

    let report = machine.go_to(&RunState::Stopped, &0).unwrap();

    assert!(!report.reached_target);
    assert_eq!(report.reached, RunState::Built);
    assert_eq!(machine.current_state().unwrap(), RunState::Built);
    // The first hop stays applied: no rollback.
    assert_eq!(machine.journal().unwrap().records().len(), 1);
}

#[test]
fn no_path_diverts_to_configured_error_state() {
    let entry_hits = Arc::new(AtomicU32::new(0));
    let hits = Arc::clone(&entry_hits);

    let machine = lifecycle_builder()
        .error_state(
            DefBuilder::new()
                .state(RunState::Failed)
                .on_entry(move |_ctx| {
                    hits.fetch_add(1, Ordering::SeqCst);
                })
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    // Deleted is never declared, so no path exists.
    let report = machine.go_to(&RunState::Deleted, &0).unwrap();

    assert_eq!(report.reached, RunState::Failed);
    assert!(!report.reached_target);
    assert_eq!(machine.current_state().unwrap(), RunState::Failed);
    assert_eq!(entry_hits.load(Ordering::SeqCst), 1);
}

#[test]
fn no_path_without_error_state_is_a_structural_failure() {
    let machine = lifecycle_machine();

    let err = machine.go_to(&RunState::Deleted, &0).unwrap_err();

    assert!(matches!(err, MachineError::NoRecoveryPath { id } if id == machine.id()));
    assert_eq!(machine.current_state().unwrap(), RunState::Created);
    assert_eq!(machine.context().unwrap(), Some(0));
}

#[test]
fn concurrent_requests_are_serialized() {
    // Two threads transition along Created -> Built -> Running; each hop's
    // side effect does a non-atomic read-sleep-write increment. Lost updates
    // or interleaved effects would show up in the counter and the trace.
    let trace: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    fn racing_edge(
        event: RunEvent,
        target: RunState,
        trace: Arc<Mutex<Vec<&'static str>>>,
    ) -> EdgeBuilder {
        TransitionBuilder::new()
            .event(event)
            .to(target)
            .effect(move |ctx, _input| {
                trace.lock().unwrap().push("effect-start");
                let seen = ctx.copied().unwrap_or(0);
                thread::sleep(Duration::from_millis(150));
                trace.lock().unwrap().push("effect-end");
                Some(seen + 1)
            })
    }

    let machine = Arc::new(
        Builder::new()
            .initial(RunState::Created)
            .context(0)
            .state(
                DefBuilder::new()
                    .state(RunState::Created)
                    .transition(racing_edge(RunEvent::Build, RunState::Built, Arc::clone(&trace)))
                    .unwrap()
                    .build()
                    .unwrap(),
            )
            .state(
                DefBuilder::new()
                    .state(RunState::Built)
                    .transition(racing_edge(RunEvent::Run, RunState::Running, Arc::clone(&trace)))
                    .unwrap()
                    .build()
                    .unwrap(),
            )
            .state(DefBuilder::new().state(RunState::Running).build().unwrap())
            .build()
            .unwrap(),
    );

    let first = Arc::clone(&machine);
    let t1 = thread::spawn(move || {
        let _ = first.go_to(&RunState::Built, &0);
    });
    thread::sleep(Duration::from_millis(50));
    let second = Arc::clone(&machine);
    let t2 = thread::spawn(move || {
        let _ = second.go_to(&RunState::Running, &0);
    });

    t1.join().unwrap();
    t2.join().unwrap();

    // Both increments landed: no lost update.
    assert_eq!(machine.context().unwrap(), Some(2));
    assert_eq!(machine.current_state().unwrap(), RunState::Running);

    // Effects never overlapped.
    let trace = trace.lock().unwrap();
    assert_eq!(
        *trace,
        vec!["effect-start", "effect-end", "effect-start", "effect-end"]
    );
}

#[test]
fn factory_merges_independent_contributions() {
    // A "build" module and an "execute" module both contribute edges out of
    // Created without knowing about each other.
    let build_module = vec![
        DefBuilder::new()
            .state(RunState::Created)
            .transition(EdgeBuilder::new().event(RunEvent::Build).to(RunState::Built))
            .unwrap(),
        DefBuilder::new().state(RunState::Built),
    ];
    let execute_module = vec![
        DefBuilder::new()
            .state(RunState::Created)
            .transition(EdgeBuilder::new().event(RunEvent::Run).to(RunState::Running))
            .unwrap(),
        DefBuilder::new().state(RunState::Running),
    ];

    let factory = MachineFactory::new()
        .contribute(build_module)
        .unwrap()
        .contribute(execute_module)
        .unwrap();

    // One machine per direction: both targets are reachable from Created.
    let to_built = factory.create(RunState::Created, Some(0)).unwrap();
    assert!(to_built.go_to(&RunState::Built, &0).unwrap().reached_target);

    let to_running = factory.create(RunState::Created, Some(0)).unwrap();
    assert!(to_running.go_to(&RunState::Running, &0).unwrap().reached_target);
}

#[test]
fn listeners_and_hooks_fire_in_documented_order() {
    let trace: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let exit_trace = Arc::clone(&trace);
    let entry_trace = Arc::clone(&trace);
    let effect_trace = Arc::clone(&trace);
    let machine = Builder::new()
        .initial(RunState::Created)
        .context(0)
        .state(
            DefBuilder::new()
                .state(RunState::Created)
                .on_exit(move |_ctx| exit_trace.lock().unwrap().push("exit:Created".into()))
                .transition(
                    EdgeBuilder::new()
                        .event(RunEvent::Build)
                        .to(RunState::Built)
                        .effect(move |ctx, _input| {
                            effect_trace.lock().unwrap().push("effect:Build".into());
                            ctx.copied()
                        }),
                )
                .unwrap()
                .build()
                .unwrap(),
        )
        .state(
            DefBuilder::new()
                .state(RunState::Built)
                .on_entry(move |_ctx| entry_trace.lock().unwrap().push("entry:Built".into()))
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let event_trace = Arc::clone(&trace);
    machine.set_event_listener(RunEvent::Build, move |_ctx, _input| {
        event_trace.lock().unwrap().push("listener:Build".into());
    });
    let change_trace = Arc::clone(&trace);
    machine.set_state_change_listener(move |state, _ctx| {
        change_trace
            .lock()
            .unwrap()
            .push(format!("listener:changed-to-{state:?}"));
    });

    machine.go_to(&RunState::Built, &0).unwrap();

    let trace = trace.lock().unwrap();
    assert_eq!(
        *trace,
        vec![
            "exit:Created",
            "listener:Build",
            "listener:changed-to-Built",
            "entry:Built",
            "effect:Build",
        ]
    );
}

#[test]
fn requesting_the_current_state_is_a_no_op() {
    let machine = lifecycle_machine();
    let changes = Arc::new(AtomicU32::new(0));

    let counted = Arc::clone(&changes);
    machine.set_state_change_listener(move |_state, _ctx| {
        counted.fetch_add(1, Ordering::SeqCst);
    });

    let report = machine.go_to(&RunState::Created, &0).unwrap();

    assert!(report.reached_target);
    assert_eq!(report.reached, RunState::Created);
    assert_eq!(machine.context().unwrap(), Some(0));
    assert_eq!(changes.load(Ordering::SeqCst), 0);
    assert!(machine.journal().unwrap().records().is_empty());
}

#[test]
fn lock_timeout_is_surfaced_not_swallowed() {
    let machine = Arc::new(
        Builder::new()
            .initial(RunState::Created)
            .context(0)
            .lock_timeout(Duration::from_millis(50))
            .state(
                DefBuilder::new()
                    .state(RunState::Created)
                    .transition(
                        EdgeBuilder::new()
                            .event(RunEvent::Build)
                            .to(RunState::Built)
                            .effect(|ctx, _input| {
                                thread::sleep(Duration::from_millis(400));
                                ctx.copied()
                            }),
                    )
                    .unwrap()
                    .build()
                    .unwrap(),
            )
            .state(DefBuilder::new().state(RunState::Built).build().unwrap())
            .build()
            .unwrap(),
    );

    let holder = Arc::clone(&machine);
    let t = thread::spawn(move || {
        holder.go_to(&RunState::Built, &0).unwrap();
    });
    thread::sleep(Duration::from_millis(100));

    let err = machine.go_to(&RunState::Built, &0).unwrap_err();
    assert!(matches!(err, MachineError::LockTimeout { id, .. } if id == machine.id()));

    t.join().unwrap();
    // The holder's transition went through untouched.
    assert_eq!(machine.current_state().unwrap(), RunState::Built);
}

#[test]
fn terminal_state_is_reported() {
    let machine = Builder::new()
        .initial(RunState::Stopped)
        .state(
            DefBuilder::new()
                .state(RunState::Stopped)
                .transition(EdgeBuilder::new().event(RunEvent::Delete).to(RunState::Deleted))
                .unwrap()
                .build()
                .unwrap(),
        )
        .state(DefBuilder::new().state(RunState::Deleted).build().unwrap())
        .build()
        .unwrap();

    assert!(!machine.is_terminal().unwrap());
    machine.go_to(&RunState::Deleted, &0).unwrap();
    assert!(machine.is_terminal().unwrap());
}

#[test]
fn guard_sees_caller_input() {
    // Stop is only admitted for the run the machine manages.
    let machine = Builder::new()
        .initial(RunState::Running)
        .context(7)
        .state(
            DefBuilder::new()
                .state(RunState::Running)
                .transition(
                    EdgeBuilder::new()
                        .event(RunEvent::Stop)
                        .to(RunState::Stopped)
                        .when(|ctx, input| ctx == Some(input)),
                )
                .unwrap()
                .build()
                .unwrap(),
        )
        .state(DefBuilder::new().state(RunState::Stopped).build().unwrap())
        .build()
        .unwrap();

    let denied = machine.go_to(&RunState::Stopped, &8).unwrap();
    assert!(!denied.reached_target);
    assert_eq!(machine.current_state().unwrap(), RunState::Running);

    let admitted = machine.go_to(&RunState::Stopped, &7).unwrap();
    assert!(admitted.reached_target);
}
