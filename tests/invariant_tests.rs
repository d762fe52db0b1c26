// Property tests for the carousel engine
//
// Random interleavings of pointer/touch input, navigation clicks, and elapsed time,
// checked after every step against the engine's guarantees.

use loop_carousel::{
    Carousel, CarouselConfig, CarouselEvent, InputEvent, NavAction, RecordingSurface,
};
use proptest::prelude::*;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 300.0;

#[derive(Clone, Debug)]
enum Step {
    Input(InputEvent),
    Navigate(NavAction),
    Wait(u64),
}

fn input_strategy() -> impl Strategy<Value = InputEvent> {
    let x = -100.0..900.0f64;
    let y = -50.0..350.0f64;
    prop_oneof![
        x.clone().prop_map(|x| InputEvent::PointerDown { x }),
        x.clone().prop_map(|x| InputEvent::PointerMove { x }),
        x.clone().prop_map(|x| InputEvent::PointerUp { x }),
        Just(InputEvent::PointerLeave),
        (x.clone(), y.clone()).prop_map(|(x, y)| InputEvent::TouchStart { x, y }),
        (x, y).prop_map(|(x, y)| InputEvent::TouchMove { x, y }),
        Just(InputEvent::TouchEnd),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => input_strategy().prop_map(Step::Input),
        2 => prop_oneof![Just(NavAction::Advance), Just(NavAction::Retreat)]
            .prop_map(Step::Navigate),
        3 => (0u64..700).prop_map(Step::Wait),
    ]
}

struct Harness {
    carousel: Carousel<RecordingSurface>,
    events: broadcast::Receiver<CarouselEvent>,
    now: Instant,
    in_flight: usize,
}

impl Harness {
    fn new(total: usize, animation_ms: u64, auto_play_ms: Option<u64>) -> Self {
        let now = Instant::now();
        let config = CarouselConfig {
            container_id: "prop".to_string(),
            animation_duration_ms: animation_ms,
            auto_play: auto_play_ms.is_some(),
            auto_play_duration_ms: auto_play_ms.unwrap_or(0),
        };
        let surface = RecordingSurface::new(WIDTH, HEIGHT, total);
        let carousel = Carousel::new(&config, surface, now).unwrap();
        let events = carousel.subscribe();
        Self {
            carousel,
            events,
            now,
            in_flight: 0,
        }
    }

    fn apply(&mut self, step: &Step) {
        match *step {
            Step::Input(event) => {
                self.carousel.handle_input(event, self.now);
            }
            Step::Navigate(action) => {
                self.carousel.navigate(action, self.now);
            }
            Step::Wait(ms) => {
                self.now += Duration::from_millis(ms);
            }
        }
        self.carousel.poll_timers(self.now);
    }

    /// Count transitions that have started but not finished
    fn drain_events(&mut self) -> Result<(), TestCaseError> {
        while let Ok(event) = self.events.try_recv() {
            match event {
                CarouselEvent::TransitionStarted { .. } => self.in_flight += 1,
                CarouselEvent::TransitionFinished { .. } => {
                    prop_assert!(self.in_flight > 0, "finished a transition that never started");
                    self.in_flight -= 1;
                }
                _ => {}
            }
            prop_assert!(self.in_flight <= 1, "two transitions in flight");
        }
        Ok(())
    }

    fn check(&mut self) -> Result<(), TestCaseError> {
        self.drain_events()?;

        let state = self.carousel.snapshot();
        prop_assert_eq!(state.is_transitioning, self.in_flight == 1);

        if !state.is_transitioning {
            prop_assert!(
                state.is_on_real_slide(),
                "index {} out of 1..={} while idle",
                state.active_index,
                state.total_slides
            );
            prop_assert_eq!(self.carousel.displayed_slide(), state.active_index);
        } else {
            prop_assert!(state.active_index <= state.total_slides + 1);
        }

        if state.is_dragging {
            prop_assert!(!state.is_transitioning);
            prop_assert_eq!(self.carousel.next_deadline(), None);
        }
        Ok(())
    }
}

proptest! {
    #[test]
    fn index_stays_in_bounds_and_transitions_never_overlap(
        total in 1usize..6,
        animation_ms in 50u64..500,
        steps in proptest::collection::vec(step_strategy(), 1..80),
    ) {
        let mut harness = Harness::new(total, animation_ms, None);
        harness.check()?;

        for step in &steps {
            harness.apply(step);
            harness.check()?;
        }

        // Release any live drag and let everything settle
        harness.apply(&Step::Input(InputEvent::PointerLeave));
        harness.apply(&Step::Wait(animation_ms));
        harness.check()?;

        let state = harness.carousel.snapshot();
        prop_assert!(state.is_settled());
        prop_assert!(state.is_on_real_slide());
        prop_assert_eq!(
            harness.carousel.surface().current_translation(),
            Some(harness.carousel.resting_offset())
        );
    }

    #[test]
    fn autoplay_never_fires_during_a_drag(
        total in 2usize..5,
        period_ms in 200u64..1500,
        steps in proptest::collection::vec(step_strategy(), 1..60),
    ) {
        let mut harness = Harness::new(total, 300, Some(period_ms));
        let mut ticks = harness.carousel.subscribe();

        for step in &steps {
            let was_dragging = harness.carousel.snapshot().is_dragging;
            harness.apply(step);
            harness.check()?;

            let ticked = std::iter::from_fn(|| ticks.try_recv().ok())
                .any(|event| event == CarouselEvent::AutoplayTick);
            if was_dragging && matches!(step, Step::Wait(_)) {
                prop_assert!(!ticked, "autoplay ticked while a drag was live");
            }
        }
    }

    #[test]
    fn drag_commit_matches_threshold(
        total in 1usize..6,
        start in 0.0..WIDTH,
        delta in -300.0..300.0f64,
    ) {
        let mut harness = Harness::new(total, 300, None);
        harness.apply(&Step::Input(InputEvent::PointerDown { x: start }));
        harness.apply(&Step::Input(InputEvent::PointerUp { x: start + delta }));
        harness.apply(&Step::Wait(300));
        harness.check()?;

        let moved = harness.carousel.snapshot().active_index;
        let applied = (start + delta) - start;
        let expected = if applied > WIDTH * 0.1 {
            total
        } else if applied < -WIDTH * 0.1 {
            if total == 1 { 1 } else { 2 }
        } else {
            1
        };
        prop_assert_eq!(moved, expected);
    }
}
