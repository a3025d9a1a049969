//! Property-based tests for rate computation, sampling and axis layout.

use proptest::prelude::*;
use ratemeter::aggregate::{sample_history, span_start};
use ratemeter::axis::{rate_intervals, time_intervals};
use ratemeter::geom::{ScreenPoint, ScreenRect};
use ratemeter::units::{MIN_ELAPSED_TICKS, TICKS_PER_HOUR};
use ratemeter::{
    ChartScale, Ledger, RateCache, RateKey, RateMode, SamplingConfig, Skill, Tick, Tracker,
    Transform, compute_rate,
};

/// Build a ledger from `(gap, delta)` steps after a zero baseline at tick 0.
fn ledger_from(steps: &[(Tick, i64)]) -> (Ledger, Vec<(Tick, i64)>) {
    let mut ledger = Ledger::new();
    ledger.record(Skill::Mining, 0, 0).unwrap();
    let mut time = 0;
    let mut total = 0;
    let mut events = Vec::with_capacity(steps.len());
    for &(gap, delta) in steps {
        time += gap;
        total += delta;
        ledger.record(Skill::Mining, total, time).unwrap();
        events.push((time, delta));
    }
    (ledger, events)
}

fn steps() -> impl Strategy<Value = Vec<(Tick, i64)>> {
    prop::collection::vec((0u64..60, 0i64..2_000), 1..40)
}

/// One step of a live session.
#[derive(Debug, Clone)]
enum SessionOp {
    Advance(Tick),
    Gain(i64),
    /// Query relative to the current tick.
    Query(i64),
}

fn session_ops() -> impl Strategy<Value = Vec<SessionOp>> {
    prop::collection::vec(
        prop_oneof![
            (1u64..40).prop_map(SessionOp::Advance),
            (0i64..2_000).prop_map(SessionOp::Gain),
            (-60i64..60).prop_map(SessionOp::Query),
        ],
        1..80,
    )
}

fn sampling(mode: RateMode, window: Tick, use_cache: bool) -> SamplingConfig {
    SamplingConfig {
        span: 300,
        stride: 5,
        window,
        mode,
        use_cache,
        enabled_skills: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_cumulative_matches_formula(steps in steps(), query in 0u64..3_000) {
        let (ledger, events) = ledger_from(&steps);
        let first = events[0].0;
        let gained: i64 = events.iter().filter(|(t, _)| *t <= query).map(|(_, d)| d).sum();
        let elapsed = query.saturating_sub(first).max(MIN_ELAPSED_TICKS);
        let expected = gained * TICKS_PER_HOUR as i64 / elapsed as i64;
        let rate = compute_rate(ledger.entity(Skill::Mining), query, 100, RateMode::Cumulative);
        prop_assert_eq!(rate, expected);
    }

    #[test]
    fn prop_sliding_window_ignores_events_outside_window(
        steps in steps(),
        extra in 1i64..5_000,
        window in 1u64..300,
        query in 0u64..3_000,
    ) {
        let (ledger, events) = ledger_from(&steps);
        let rate = compute_rate(ledger.entity(Skill::Mining), query, window, RateMode::SlidingWindow);

        // same window contents, different history on both sides of it
        let mut other = Ledger::new();
        other.record(Skill::Mining, 0, 0).unwrap();
        let mut total = 0;
        if query >= window {
            total += extra;
            other.record(Skill::Mining, total, query - window).unwrap();
        }
        for (time, delta) in events.iter().filter(|(t, _)| *t <= query && *t + window > query) {
            total += delta;
            other.record(Skill::Mining, total, *time).unwrap();
        }
        other.record(Skill::Mining, total + extra, query + 1).unwrap();

        let other_rate = compute_rate(other.entity(Skill::Mining), query, window, RateMode::SlidingWindow);
        prop_assert_eq!(other_rate, rate);
    }

    #[test]
    fn prop_cache_matches_recompute(
        steps in steps(),
        queries in prop::collection::vec((0u64..3_000, 1u64..300, any::<bool>()), 1..30),
    ) {
        let (ledger, _) = ledger_from(&steps);
        let mut cache = RateCache::new();
        for (time, window, sliding) in queries {
            let mode = if sliding { RateMode::SlidingWindow } else { RateMode::Cumulative };
            let key = RateKey::new(Skill::Mining, time, window, mode);
            let cached = cache.get(&ledger, key);
            prop_assert_eq!(cached, cache.bypass(&ledger, key));
            prop_assert_eq!(cache.get(&ledger, key), cached);
        }
    }

    #[test]
    fn prop_tracker_cache_matches_recompute_while_recording(
        ops in session_ops(),
        window in 1u64..200,
        sliding in any::<bool>(),
    ) {
        let mode = if sliding { RateMode::SlidingWindow } else { RateMode::Cumulative };
        let cached = sampling(mode, window, true);
        let uncached = sampling(mode, window, false);
        let mut tracker = Tracker::new();
        tracker.record(Skill::Mining, 0).unwrap();
        let mut total = 0;
        let mut queried = Vec::new();
        for op in ops {
            match op {
                SessionOp::Advance(ticks) => {
                    for _ in 0..ticks {
                        tracker.advance();
                    }
                }
                SessionOp::Gain(delta) => {
                    total += delta;
                    tracker.record(Skill::Mining, total).unwrap();
                }
                SessionOp::Query(offset) => {
                    let time = tracker.current_time().saturating_add_signed(offset);
                    queried.push(time);
                    prop_assert_eq!(
                        tracker.rate_at(Skill::Mining, time, &cached),
                        tracker.rate_at(Skill::Mining, time, &uncached)
                    );
                }
            }
            // every earlier query still agrees after the ledger grew
            for &time in &queried {
                prop_assert_eq!(
                    tracker.rate_at(Skill::Mining, time, &cached),
                    tracker.rate_at(Skill::Mining, time, &uncached)
                );
            }
        }
    }

    #[test]
    fn prop_cached_rates_survive_later_events(
        steps in steps(),
        later in prop::collection::vec((1u64..60, 0i64..2_000), 1..10),
        window in 1u64..300,
    ) {
        let (mut ledger, events) = ledger_from(&steps);
        let query = events.last().map_or(0, |(t, _)| *t);
        let mut cache = RateCache::new();
        let keys = [
            RateKey::new(Skill::Mining, query, window, RateMode::SlidingWindow),
            RateKey::new(Skill::Mining, query, window, RateMode::Cumulative),
        ];
        let before: Vec<i64> = keys.iter().map(|key| cache.get(&ledger, *key)).collect();

        let mut time = query;
        let mut total = ledger.entity(Skill::Mining).unwrap().last_observed();
        for (gap, delta) in later {
            time += gap;
            total += delta;
            ledger.record(Skill::Mining, total, time).unwrap();
        }
        for (key, expected) in keys.iter().zip(before) {
            prop_assert_eq!(cache.get(&ledger, *key), expected);
            prop_assert_eq!(cache.bypass(&ledger, *key), expected);
        }
    }

    #[test]
    fn prop_sampling_cadence(
        current in 0u64..2_000,
        span in 0u64..1_000,
        stride in 1u64..50,
    ) {
        let (ledger, _) = ledger_from(&[(10, 100), (10, 100)]);
        let config = SamplingConfig {
            span,
            stride,
            window: 100,
            mode: RateMode::SlidingWindow,
            use_cache: true,
            enabled_skills: None,
        };
        let history = sample_history(&ledger, &mut RateCache::new(), Skill::Mining, current, &config);
        let start = span_start(current, span);
        let expected = (current - start).div_ceil(stride);
        prop_assert_eq!(history.len() as u64, expected);
        if let Some(first) = history.first() {
            prop_assert_eq!(first.time, start);
        }
        for pair in history.windows(2) {
            prop_assert_eq!(pair[1].time - pair[0].time, stride);
        }
        prop_assert!(history.iter().all(|sample| sample.time < current));
    }

    #[test]
    fn prop_rate_intervals_below_max(max in 0i64..5_000_000) {
        let intervals = rate_intervals(max);
        prop_assert!(intervals.iter().all(|value| *value < max));
        prop_assert!(intervals.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn prop_time_intervals_hold_anchors_once(start in 0u64..20_000, span in 0u64..20_000) {
        let end = start + span;
        let intervals = time_intervals(start, end);
        prop_assert_eq!(intervals.first().copied(), Some(start));
        prop_assert_eq!(intervals.last().copied(), Some(end));
        prop_assert!(intervals.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn prop_unmap_inverts_map_within_a_pixel(
        min in 0u64..10_000,
        span in 1u64..10_000,
        width in 20.0f32..2_000.0,
        fraction in 0.0f64..=1.0,
    ) {
        let screen = ScreenRect::new(ScreenPoint::new(30.0, 10.0), ScreenPoint::new(30.0 + width, 90.0));
        let transform = Transform::new(ChartScale::new(1_000, min, min + span), screen, 6.0).unwrap();
        let time = min as f64 + fraction * span as f64;
        let x = transform.map_time(time);
        let round_trip = transform.unmap_time(x);
        let ticks_per_pixel = span as f64 / width as f64;
        prop_assert!((round_trip - time).abs() <= ticks_per_pixel.max(1e-6));
        prop_assert!((transform.map_time(round_trip) - x).abs() <= 1.0);
    }
}
