use cooking_assistant::{
    recipe::{Recipe, RecipeStep},
    services::AlarmNotifier,
    state::{ActionResult, AppState, CookingSession, PrimaryAction, SessionEvent, TimerPhase},
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::time::{sleep, Duration};

#[derive(Debug, Default)]
struct CountingAlarm(AtomicUsize);

impl CountingAlarm {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl AlarmNotifier for CountingAlarm {
    fn play(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn setup(steps: Vec<RecipeStep>) -> (Arc<AppState>, Arc<CountingAlarm>) {
    let alarm = Arc::new(CountingAlarm::default());
    let session = CookingSession::new(Recipe::new("test", steps), alarm.clone()).unwrap();
    let state = Arc::new(AppState::new(
        session,
        "127.0.0.1".to_string(),
        0,
        Duration::from_secs(1),
    ));
    (state, alarm)
}

fn remaining(state: &AppState) -> u64 {
    state.summary().unwrap().timer.remaining_seconds
}

fn phase(state: &AppState) -> TimerPhase {
    state.summary().unwrap().timer.phase
}

#[tokio::test(start_paused = true)]
async fn test_five_second_step_runs_out_and_advances() {
    let (state, alarm) = setup(vec![
        RecipeStep::new("a", "Sear the steak", Some(5)),
        RecipeStep::new("next", "Rest", None),
    ]);

    let result = state.primary_action().unwrap();
    assert!(matches!(result, ActionResult::Timer { action: PrimaryAction::Started, .. }));
    assert_eq!(phase(&state), TimerPhase::Running);
    assert_eq!(remaining(&state), 5);

    sleep(Duration::from_millis(2_500)).await;
    assert_eq!(remaining(&state), 3);

    sleep(Duration::from_millis(2_600)).await;
    assert_eq!(phase(&state), TimerPhase::Completed);
    assert_eq!(remaining(&state), 0);
    assert_eq!(alarm.count(), 1);

    // Nothing keeps ticking after completion
    sleep(Duration::from_secs(10)).await;
    assert_eq!(alarm.count(), 1);

    let result = state.primary_action().unwrap();
    assert_eq!(result, ActionResult::Advanced { completed: 0, active: 1 });
    assert_eq!(alarm.count(), 1);
}

#[tokio::test]
async fn test_untimed_step_completes_on_first_press() {
    let (state, alarm) = setup(vec![RecipeStep::new("b", "Crack the eggs", None)]);

    assert_eq!(phase(&state), TimerPhase::NoTimer);
    let result = state.primary_action().unwrap();
    assert_eq!(result, ActionResult::Finished { completed: 0 });
    assert!(state.is_finished().unwrap());
    assert_eq!(alarm.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_pause_and_resume_preserve_remaining_time() {
    let (state, _alarm) = setup(vec![RecipeStep::new("c", "Simmer", Some(10))]);

    state.primary_action().unwrap();
    sleep(Duration::from_millis(3_500)).await;
    assert_eq!(remaining(&state), 7);

    let result = state.primary_action().unwrap();
    assert!(matches!(result, ActionResult::Timer { action: PrimaryAction::Paused, .. }));
    assert_eq!(phase(&state), TimerPhase::Paused);

    sleep(Duration::from_secs(20)).await;
    assert_eq!(remaining(&state), 7);

    let result = state.primary_action().unwrap();
    assert!(matches!(result, ActionResult::Timer { action: PrimaryAction::Resumed, .. }));
    assert!(state.summary().unwrap().timer.running);
    assert_eq!(remaining(&state), 7);

    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(remaining(&state), 6);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_presses_never_double_tick() {
    let (state, _alarm) = setup(vec![RecipeStep::new("d", "Knead", Some(30))]);

    // start, pause, resume, pause, resume in the same instant
    for _ in 0..5 {
        state.primary_action().unwrap();
    }
    assert_eq!(phase(&state), TimerPhase::Running);

    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(remaining(&state), 29);

    sleep(Duration::from_secs(2)).await;
    assert_eq!(remaining(&state), 27);
}

#[tokio::test(start_paused = true)]
async fn test_changing_step_discards_running_timer() {
    let (state, alarm) = setup(vec![
        RecipeStep::new("e", "Boil", Some(3)),
        RecipeStep::new("f", "Steep", Some(4)),
    ]);

    state.primary_action().unwrap();
    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(remaining(&state), 2);

    state.go_to(1).unwrap();
    let timer = state.summary().unwrap().timer;
    assert_eq!(timer.phase, TimerPhase::Idle);
    assert_eq!(timer.remaining_seconds, 4);
    assert!(!timer.started && !timer.running && !timer.completed);

    // The old countdown is gone: no ticks land on the new step, no alarm
    sleep(Duration::from_secs(10)).await;
    assert_eq!(remaining(&state), 4);
    assert_eq!(alarm.count(), 0);

    // Back to the first step: fresh again, not resumed
    state.go_to(0).unwrap();
    assert_eq!(phase(&state), TimerPhase::Idle);
    assert_eq!(remaining(&state), 3);
}

#[tokio::test(start_paused = true)]
async fn test_events_follow_the_countdown() {
    let (state, _alarm) = setup(vec![
        RecipeStep::new("g", "Bake", Some(2)),
        RecipeStep::new("h", "Cool", None),
    ]);
    let mut events = state.subscribe();
    let mut timer_rx = state.watch_timer();

    state.primary_action().unwrap();
    sleep(Duration::from_millis(2_100)).await;
    state.primary_action().unwrap();
    state.primary_action().unwrap();

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert_eq!(
        seen,
        vec![
            SessionEvent::TimerStarted { step_id: "g".into() },
            SessionEvent::TimerCompleted { step_id: "g".into() },
            SessionEvent::StepActivated { index: 1, step_id: "h".into() },
            SessionEvent::RecipeFinished,
        ]
    );

    assert!(timer_rx.has_changed().unwrap());
    assert_eq!(timer_rx.borrow_and_update().phase, TimerPhase::NoTimer);
    assert_eq!(state.get_last_action().0.as_deref(), Some("recipe-finished"));
}
