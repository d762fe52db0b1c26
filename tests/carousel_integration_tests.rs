// Integration tests for the carousel engine
//
// Drives a Carousel over a RecordingSurface with explicit timestamps, checking the
// behavioral guarantees end to end: index bounds, single-flight transitions, the
// drag commit threshold, seamless looping, autoplay suspension, and teardown.

use loop_carousel::models::DropReason;
use loop_carousel::services::{Commit, PaddedSlot};
use loop_carousel::surface::SurfaceCall;
use loop_carousel::{
    Carousel, CarouselConfig, CarouselError, CarouselEvent, InputEvent, NavAction, Outcome,
    RecordingSurface,
};
use std::time::{Duration, Instant};

const ANIMATION: Duration = Duration::from_millis(300);

fn config(auto_play_ms: Option<u64>) -> CarouselConfig {
    CarouselConfig {
        container_id: "hero".to_string(),
        animation_duration_ms: 300,
        auto_play: auto_play_ms.is_some(),
        auto_play_duration_ms: auto_play_ms.unwrap_or(0),
    }
}

fn build(
    total: usize,
    width: f64,
    auto_play_ms: Option<u64>,
) -> (Carousel<RecordingSurface>, Instant) {
    let t0 = Instant::now();
    let surface = RecordingSurface::new(width, 300.0, total);
    let carousel = Carousel::new(&config(auto_play_ms), surface, t0).unwrap();
    (carousel, t0)
}

/// Run one navigation and let it complete; returns the completion instant
fn navigate_and_settle(
    carousel: &mut Carousel<RecordingSurface>,
    action: NavAction,
    now: Instant,
) -> Instant {
    assert_eq!(carousel.navigate(action, now), Outcome::Applied);
    let done = now + ANIMATION;
    carousel.poll_timers(done);
    assert!(carousel.snapshot().is_settled());
    done
}

/// Press at `start`, release at `end`, then let the resulting transition finish
fn drag(
    carousel: &mut Carousel<RecordingSurface>,
    start: f64,
    end: f64,
    now: Instant,
) -> Instant {
    assert!(
        carousel
            .handle_input(InputEvent::PointerDown { x: start }, now)
            .is_applied()
    );
    assert!(
        carousel
            .handle_input(InputEvent::PointerUp { x: end }, now)
            .is_applied()
    );
    let done = now + ANIMATION;
    carousel.poll_timers(done);
    done
}

#[test]
fn test_threshold_tie_break_at_exact_threshold_snaps_back() {
    let (mut carousel, t0) = build(4, 1000.0, None);
    let mut events = carousel.subscribe();

    drag(&mut carousel, 200.0, 300.0, t0);

    assert_eq!(carousel.snapshot().active_index, 1);
    let released = std::iter::from_fn(|| events.try_recv().ok()).find_map(|event| match event {
        CarouselEvent::DragReleased { delta, commit } => Some((delta, commit)),
        _ => None,
    });
    assert_eq!(released, Some((100.0, Commit::SnapBack)));
    // Snap-back still animates back to the resting offset
    assert_eq!(carousel.surface().current_translation(), Some(-1000.0));
}

#[test]
fn test_threshold_just_past_retreats_and_wraps() {
    let (mut carousel, t0) = build(4, 1000.0, None);

    drag(&mut carousel, 0.0, 100.01, t0);

    let state = carousel.snapshot();
    assert_eq!(state.active_index, 4);
    assert!(state.is_settled());
}

#[test]
fn test_threshold_just_past_leftward_advances() {
    let (mut carousel, t0) = build(4, 1000.0, None);

    drag(&mut carousel, 500.0, 399.99, t0);

    assert_eq!(carousel.snapshot().active_index, 2);
}

#[test]
fn test_loop_seamlessness_from_last_slide() {
    let (mut carousel, t0) = build(3, 800.0, None);
    let mut now = t0;
    now = navigate_and_settle(&mut carousel, NavAction::Advance, now);
    now = navigate_and_settle(&mut carousel, NavAction::Advance, now);
    assert_eq!(carousel.snapshot().active_index, 3);

    let before = carousel.surface().calls().len();
    assert!(carousel.advance(now).is_applied());
    carousel.poll_timers(now + ANIMATION);

    let calls = &carousel.surface().calls()[before..];
    assert_eq!(
        calls,
        &[
            SurfaceCall::SetAnimatedTranslation {
                x: -3200.0,
                duration: ANIMATION
            },
            SurfaceCall::ClearAnimation,
            SurfaceCall::SetTranslation(-800.0),
        ]
    );

    // The clone shown at position 4 mirrors slide 1, which rests at -800
    let padding = carousel.padded_sequence();
    assert_eq!(padding.slot(4), Some(PaddedSlot::CloneOfFirst));
    assert_eq!(padding.displayed_slide(4), Some(1));
    assert_eq!(carousel.snapshot().active_index, 1);
    assert_eq!(carousel.resting_offset(), -800.0);
}

#[test]
fn test_loop_seamlessness_from_first_slide_backwards() {
    let (mut carousel, t0) = build(3, 800.0, None);

    assert!(carousel.retreat(t0).is_applied());
    assert_eq!(carousel.surface().current_translation(), Some(0.0));
    assert_eq!(carousel.displayed_slide(), 3);

    carousel.poll_timers(t0 + ANIMATION);
    assert_eq!(carousel.snapshot().active_index, 3);
    assert_eq!(carousel.surface().current_translation(), Some(-2400.0));
}

#[test]
fn test_rapid_fire_advance_changes_index_once() {
    let (mut carousel, t0) = build(5, 600.0, None);

    assert_eq!(carousel.advance(t0), Outcome::Applied);
    assert_eq!(
        carousel.advance(t0 + Duration::from_millis(10)),
        Outcome::Dropped(DropReason::Transitioning)
    );

    carousel.poll_timers(t0 + ANIMATION);
    assert_eq!(carousel.snapshot().active_index, 2);
    assert_eq!(carousel.surface().animated_moves(), 1);
}

#[test]
fn test_round_trip_returns_to_start() {
    for total in 2..=6 {
        for start_steps in 0..total {
            let (mut carousel, t0) = build(total, 500.0, None);
            let mut now = t0;
            for _ in 0..start_steps {
                now = navigate_and_settle(&mut carousel, NavAction::Advance, now);
            }
            let start = carousel.snapshot().active_index;

            now = navigate_and_settle(&mut carousel, NavAction::Advance, now);
            navigate_and_settle(&mut carousel, NavAction::Retreat, now);

            assert_eq!(
                carousel.snapshot().active_index,
                start,
                "total={total} start={start}"
            );
        }
    }
}

#[test]
fn test_single_slide_carousel_loops_onto_itself() {
    let (mut carousel, t0) = build(1, 400.0, None);
    assert_eq!(carousel.surface().rendered_slides(), 3);

    let now = navigate_and_settle(&mut carousel, NavAction::Advance, t0);
    assert_eq!(carousel.snapshot().active_index, 1);

    navigate_and_settle(&mut carousel, NavAction::Retreat, now);
    assert_eq!(carousel.snapshot().active_index, 1);
    assert_eq!(carousel.surface().current_translation(), Some(-400.0));
}

#[test]
fn test_autoplay_suspended_while_dragging() {
    let (mut carousel, t0) = build(4, 800.0, Some(1000));
    let mut events = carousel.subscribe();
    assert_eq!(carousel.next_deadline(), Some(t0 + Duration::from_secs(1)));

    let press = t0 + Duration::from_millis(500);
    carousel.handle_input(InputEvent::PointerDown { x: 400.0 }, press);
    assert_eq!(carousel.next_deadline(), None);

    // Well past the original tick: nothing fires during the drag
    carousel.poll_timers(t0 + Duration::from_secs(5));
    carousel.handle_input(InputEvent::PointerMove { x: 380.0 }, t0 + Duration::from_secs(5));
    assert_eq!(carousel.snapshot().active_index, 1);
    assert!(carousel.snapshot().is_dragging);

    let release = t0 + Duration::from_secs(6);
    carousel.handle_input(InputEvent::PointerUp { x: 380.0 }, release);
    carousel.poll_timers(release + ANIMATION);

    // Timer re-armed a full period after the snap-back settles
    assert_eq!(
        carousel.next_deadline(),
        Some(release + ANIMATION + Duration::from_secs(1))
    );

    let received: Vec<_> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    assert!(!received.contains(&CarouselEvent::AutoplayTick));
    assert!(received.contains(&CarouselEvent::AutoplaySuspended));
    assert!(received.contains(&CarouselEvent::AutoplayResumed));
}

#[test]
fn test_autoplay_advances_and_wraps() {
    let (mut carousel, t0) = build(2, 800.0, Some(1000));
    let mut now = t0;

    for expected in [2, 1, 2] {
        now = carousel.next_deadline().unwrap();
        carousel.poll_timers(now);
        assert!(carousel.snapshot().is_transitioning);
        now += ANIMATION;
        carousel.poll_timers(now);
        assert_eq!(carousel.snapshot().active_index, expected);
    }

    assert_eq!(carousel.next_deadline(), Some(now + Duration::from_secs(1)));
}

#[test]
fn test_drag_during_transition_is_dropped() {
    let (mut carousel, t0) = build(3, 800.0, None);
    carousel.advance(t0);

    let outcome = carousel.handle_input(
        InputEvent::TouchStart { x: 100.0, y: 100.0 },
        t0 + Duration::from_millis(50),
    );
    assert_eq!(outcome, Outcome::Dropped(DropReason::Transitioning));

    // Following moves have no session and do not touch the surface
    let before = carousel.surface().calls().len();
    carousel.handle_input(
        InputEvent::TouchMove { x: 50.0, y: 100.0 },
        t0 + Duration::from_millis(60),
    );
    assert_eq!(carousel.surface().calls().len(), before);
}

#[test]
fn test_touch_gesture_commits_like_pointer() {
    let (mut carousel, t0) = build(3, 800.0, None);

    carousel.handle_input(InputEvent::TouchStart { x: 600.0, y: 100.0 }, t0);
    carousel.handle_input(InputEvent::TouchMove { x: 400.0, y: 110.0 }, t0);
    assert_eq!(carousel.surface().current_translation(), Some(-1000.0));
    carousel.handle_input(InputEvent::TouchEnd, t0);
    carousel.poll_timers(t0 + ANIMATION);

    assert_eq!(carousel.snapshot().active_index, 2);
}

#[test]
fn test_invalid_configurations_rejected() {
    let now = Instant::now();
    let empty = Carousel::new(&config(None), RecordingSurface::new(800.0, 300.0, 0), now);
    assert!(matches!(empty, Err(CarouselError::EmptyCarousel)));

    let zero_width = Carousel::new(&config(None), RecordingSurface::new(0.0, 300.0, 3), now);
    assert!(matches!(
        zero_width,
        Err(CarouselError::InvalidViewportWidth(_))
    ));

    let zero_period = Carousel::new(
        &CarouselConfig {
            auto_play: true,
            ..config(None)
        },
        RecordingSurface::new(800.0, 300.0, 3),
        now,
    );
    assert!(matches!(zero_period, Err(CarouselError::ZeroAutoPlayDuration)));
}

#[test]
fn test_teardown_drops_everything_after() {
    let (mut carousel, t0) = build(3, 800.0, Some(1000));
    carousel.handle_input(InputEvent::PointerDown { x: 300.0 }, t0);
    carousel.teardown();

    assert_eq!(carousel.next_deadline(), None);
    assert_eq!(
        carousel.advance(t0),
        Outcome::Dropped(DropReason::TornDown)
    );
    assert_eq!(
        carousel.handle_input(InputEvent::PointerMove { x: 100.0 }, t0),
        Outcome::Dropped(DropReason::TornDown)
    );
    assert!(!carousel.snapshot().is_dragging);
}
