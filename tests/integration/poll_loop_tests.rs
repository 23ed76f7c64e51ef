//! PollLoop against mock adapters: refresh cadence, failure policies and
//! event rate limiting.

use super::mock_hw::{Call, RecordingSink, ScriptedSource, rig, writes};

use trafficlight::app::events::{Degradation, MonitorEvent};
use trafficlight::app::poll_loop::PollLoop;
use trafficlight::app::ports::StatusSource;
use trafficlight::config::{FetchFailurePolicy, MonitorConfig};
use trafficlight::error::{Error, FetchError};
use trafficlight::light::LightState;

const DEMO_BLUE: &str = r#"{"jobs":[{"name":"demo","color":"blue"}]}"#;
const DEMO_RED: &str = r#"{"jobs":[{"name":"demo","color":"red"}]}"#;

fn config(rate: u32, policy: FetchFailurePolicy) -> MonitorConfig {
    MonitorConfig {
        server: "http://ci".into(),
        job: "demo".into(),
        refresh_rate_secs: rate,
        on_fetch_failure: policy,
        ..MonitorConfig::default()
    }
}

fn retrying<S: StatusSource>(source: S, rate: u32) -> PollLoop<S> {
    PollLoop::new(source, &config(rate, FetchFailurePolicy::Retry))
}

/// Step `ticks` times and return the ticks on which a fetch happened.
fn fetch_ticks<S: StatusSource>(poll: &mut PollLoop<S>, ticks: u32) -> Vec<u32> {
    let (mut light, mut delay, _timeline) = rig();
    let mut sink = RecordingSink::new();
    let mut fetched = Vec::new();
    for tick in 0..ticks {
        let before = poll.fetch_count();
        let _ = poll.step(&mut light, &mut delay, &mut sink);
        if poll.fetch_count() > before {
            fetched.push(tick);
        }
    }
    fetched
}

fn is_degraded(e: &MonitorEvent) -> bool {
    matches!(e, MonitorEvent::Degraded(_))
}

// ── Refresh cadence ───────────────────────────────────────────

#[test]
fn steady_state_tick_writes_once_and_holds_one_second() {
    let mut poll = retrying(ScriptedSource::always(DEMO_BLUE), 30);
    let (mut light, mut delay, timeline) = rig();
    let mut sink = RecordingSink::new();

    assert!(poll.step(&mut light, &mut delay, &mut sink).is_continue());

    assert_eq!(
        *timeline.borrow(),
        vec![Call::Write(LightState::GREEN.port_value()), Call::Sleep(1000)]
    );
}

#[test]
fn counter_resets_only_after_passing_the_refresh_rate() {
    let mut poll = retrying(ScriptedSource::always(DEMO_BLUE), 30);
    assert_eq!(fetch_ticks(&mut poll, 63), vec![0, 31, 62]);
}

#[test]
fn small_refresh_rate_fetches_every_rate_plus_one_ticks() {
    let mut poll = retrying(ScriptedSource::always(DEMO_BLUE), 3);
    assert_eq!(fetch_ticks(&mut poll, 9), vec![0, 4, 8]);
    assert_eq!(poll.tick_counter(), 1);
}

#[test]
fn status_change_shows_up_only_at_next_refresh() {
    let source = ScriptedSource::new(vec![Ok(DEMO_BLUE.into()), Ok(DEMO_RED.into())]);
    let mut poll = retrying(source, 2);
    let (mut light, mut delay, timeline) = rig();
    let mut sink = RecordingSink::new();

    for _ in 0..4 {
        let _ = poll.step(&mut light, &mut delay, &mut sink);
    }

    let green = LightState::GREEN.port_value();
    let red = LightState::RED.port_value();
    assert_eq!(writes(&timeline), vec![green, green, green, red]);
    assert_eq!(
        sink.count(|e| matches!(e, MonitorEvent::LightChanged { .. })),
        2
    );
}

#[test]
fn every_fetch_targets_the_api_url() {
    let mut poll = retrying(ScriptedSource::always(DEMO_BLUE), 1);
    assert_eq!(fetch_ticks(&mut poll, 3), vec![0, 2]);
    assert_eq!(poll.url(), "http://ci/api/json");
}

// ── Fetch failure policies ────────────────────────────────────

#[test]
fn retry_policy_blinks_and_keeps_going() {
    let source = ScriptedSource::new(vec![ScriptedSource::unreachable(), Ok(DEMO_BLUE.into())]);
    let mut poll = retrying(source, 1);
    let (mut light, mut delay, timeline) = rig();
    let mut sink = RecordingSink::new();

    assert!(poll.step(&mut light, &mut delay, &mut sink).is_continue());
    assert_eq!(poll.state(), LightState::fallback());
    assert!(matches!(poll.degradation(), Some(Degradation::FetchFailed(_))));

    // Fallback blinks with every lamp on: 0b000 then the off value.
    assert_eq!(
        *timeline.borrow(),
        vec![Call::Write(0), Call::Sleep(500), Call::Write(0b111), Call::Sleep(500)]
    );

    // Tick 1 re-drives the fallback; tick 2 refreshes.
    assert!(poll.step(&mut light, &mut delay, &mut sink).is_continue());
    assert_eq!(poll.state(), LightState::fallback());
    assert!(poll.step(&mut light, &mut delay, &mut sink).is_continue());
    assert_eq!(poll.state(), LightState::GREEN);
    assert!(poll.degradation().is_none());
}

#[test]
fn exit_policy_halts_before_driving() {
    let source = ScriptedSource::new(vec![ScriptedSource::unreachable()]);
    let mut poll = PollLoop::new(source, &config(30, FetchFailurePolicy::Exit));
    let (mut light, mut delay, timeline) = rig();
    let mut sink = RecordingSink::new();

    let flow = poll.step(&mut light, &mut delay, &mut sink);

    assert!(matches!(flow.break_value(), Some(FetchError::Transport { .. })));
    assert!(timeline.borrow().is_empty(), "nothing driven after halt");
    assert!(matches!(sink.events.last(), Some(MonitorEvent::Halted(_))));
}

#[test]
fn run_returns_fetch_error_under_exit_policy() {
    let source = ScriptedSource::new(vec![
        Ok(DEMO_BLUE.into()),
        Err(FetchError::Status {
            url: "http://ci/api/json".into(),
            status: 503,
        }),
    ]);
    let mut poll = PollLoop::new(source, &config(2, FetchFailurePolicy::Exit));
    let (mut light, mut delay, _timeline) = rig();
    let mut sink = RecordingSink::new();

    let Err(err) = poll.run(&mut light, &mut delay, &mut sink);

    assert!(matches!(err, Error::Fetch(FetchError::Status { status: 503, .. })));
    // Ticks 0..=2 drive; the failed refresh on tick 3 stops before driving.
    assert_eq!(poll.tick_count(), 3);
    assert!(matches!(sink.events.first(), Some(MonitorEvent::Started { .. })));
}

// ── Event rate limiting ───────────────────────────────────────

#[test]
fn repeated_failure_is_reported_once() {
    let source = ScriptedSource::new(vec![ScriptedSource::unreachable()]);
    let mut poll = retrying(source, 1);
    let (mut light, mut delay, _timeline) = rig();
    let mut sink = RecordingSink::new();

    for _ in 0..6 {
        let _ = poll.step(&mut light, &mut delay, &mut sink);
    }

    assert_eq!(poll.fetch_count(), 3);
    assert_eq!(sink.count(is_degraded), 1);
}

#[test]
fn change_of_failure_kind_is_reported_again() {
    let source = ScriptedSource::new(vec![
        ScriptedSource::unreachable(),
        Ok("<html>maintenance</html>".into()),
        Ok(r#"{"jobs":[]}"#.into()),
    ]);
    let mut poll = retrying(source, 1);
    let (mut light, mut delay, _timeline) = rig();
    let mut sink = RecordingSink::new();

    // Refreshes on ticks 0, 2, 4 and 6.
    for _ in 0..7 {
        let _ = poll.step(&mut light, &mut delay, &mut sink);
    }

    let kinds: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            MonitorEvent::Degraded(d) => Some(d.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(poll.fetch_count(), 4);
    assert_eq!(kinds.len(), 3);
    assert!(matches!(kinds[0], Degradation::FetchFailed(_)));
    assert!(matches!(kinds[1], Degradation::ParseFailed(_)));
    assert_eq!(kinds[2], Degradation::UnknownJob("demo".into()));
}

#[test]
fn recovery_is_reported_once() {
    let source = ScriptedSource::new(vec![ScriptedSource::unreachable(), Ok(DEMO_RED.into())]);
    let mut poll = retrying(source, 1);
    let (mut light, mut delay, _timeline) = rig();
    let mut sink = RecordingSink::new();

    for _ in 0..6 {
        let _ = poll.step(&mut light, &mut delay, &mut sink);
    }

    assert_eq!(sink.count(|e| *e == MonitorEvent::Recovered), 1);
    assert_eq!(poll.state(), LightState::RED);
}
