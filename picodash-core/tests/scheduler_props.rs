use picodash_core::color::Rgb;
use picodash_core::config::RawWorkspace;
use picodash_core::scheduler::{Action, CycleScheduler, Transition};
use picodash_core::status::StatusIndicator;
use picodash_core::traits::{DrawSurface, HardwareError, IndicatorLed, TextSize};
use picodash_core::workspace::{Params, WorkspaceRegistry};
use proptest::prelude::*;

struct NullSurface;

impl DrawSurface for NullSurface {
    fn size(&self) -> (u16, u16) {
        (240, 135)
    }
    fn glyph_size(&self, _size: TextSize) -> (u16, u16) {
        (8, 13)
    }
    fn clear(&mut self, _color: Rgb) {}
    fn line(&mut self, _from: (i32, i32), _to: (i32, i32), _color: Rgb) {}
    fn fill_rect(&mut self, _x: i32, _y: i32, _w: u16, _h: u16, _color: Rgb) {}
    fn text(&mut self, _x: i32, _y: i32, _text: &str, _color: Rgb, _size: TextSize) {}
    fn present(&mut self) -> Result<(), HardwareError> {
        Ok(())
    }
}

struct NullLed;

impl IndicatorLed for NullLed {
    fn set_color(&mut self, _color: Rgb) -> Result<(), HardwareError> {
        Ok(())
    }
}

const RENDERERS: [&str; 5] = ["welcome", "time", "date", "system", "text"];

fn scheduler(
    display_times: &[i32],
    tick_ms: u32,
) -> CycleScheduler<NullSurface, NullLed> {
    let raw: Vec<RawWorkspace> = display_times
        .iter()
        .enumerate()
        .map(|(i, &secs)| RawWorkspace {
            name: heapless::String::try_from("ws").unwrap(),
            display_time_s: Some(secs),
            renderer: heapless::String::try_from(RENDERERS[i % RENDERERS.len()]).unwrap(),
            params: Params::new(),
        })
        .collect();
    let registry = WorkspaceRegistry::load(&raw).unwrap();
    CycleScheduler::new(
        registry,
        tick_ms,
        true,
        NullSurface,
        StatusIndicator::new(NullLed, 50),
    )
}

fn tick_ms() -> impl Strategy<Value = u32> {
    prop::sample::select(vec![10u32, 50, 100, 250, 1000])
}

proptest! {
    #[test]
    fn round_robin_with_configured_dwell(
        display_times in prop::collection::vec(1i32..=20, 1..=8),
        tick_ms in tick_ms(),
    ) {
        let mut s = scheduler(&display_times, tick_ms);
        let len = display_times.len();
        let mut ticks_here: u64 = 0;
        let mut visits = 0;

        while visits < 2 * len {
            ticks_here += 1;
            match s.advance() {
                Transition::Stay => {}
                Transition::Advanced { from, to } => {
                    prop_assert_eq!(to, (from + 1) % len);
                    let dwell = ticks_here * tick_ms as u64;
                    let configured = display_times[from] as u64 * 1000;
                    prop_assert!(dwell >= configured);
                    prop_assert!(dwell < configured + tick_ms as u64);
                    ticks_here = 0;
                    visits += 1;
                }
                other => prop_assert!(false, "unexpected transition {:?}", other),
            }
        }
    }

    #[test]
    fn paused_cycle_preserves_elapsed(
        display_times in prop::collection::vec(5i32..=20, 1..=6),
        before in 0u32..40,
        paused_ticks in 0u32..500,
    ) {
        let mut s = scheduler(&display_times, 100);
        for _ in 0..before {
            s.advance();
        }
        let index = s.state().current_index;
        let elapsed = s.state().elapsed_ms;

        s.submit(Action::ToggleAutoCycle);
        prop_assert_eq!(s.advance(), Transition::AutoCycle(false));
        for _ in 0..paused_ticks {
            prop_assert_eq!(s.advance(), Transition::Stay);
        }
        s.submit(Action::ToggleAutoCycle);
        prop_assert_eq!(s.advance(), Transition::AutoCycle(true));

        prop_assert_eq!(s.state().current_index, index);
        prop_assert_eq!(s.state().elapsed_ms, elapsed);
    }

    #[test]
    fn next_resets_and_wraps(
        display_times in prop::collection::vec(1i32..=20, 1..=8),
        steps in prop::collection::vec(0u32..30, 1..20),
    ) {
        let mut s = scheduler(&display_times, 100);
        let len = display_times.len();

        for ticks in steps {
            for _ in 0..ticks {
                s.advance();
            }
            let from = s.state().current_index;
            s.submit(Action::Next);
            prop_assert_eq!(s.advance(), Transition::Advanced { from, to: (from + 1) % len });
            prop_assert_eq!(s.state().elapsed_ms, 0);
        }
    }

    #[test]
    fn index_always_in_range(
        display_times in prop::collection::vec(1i32..=3, 1..=8),
        script in prop::collection::vec(0u8..5, 0..400),
    ) {
        let mut s = scheduler(&display_times, 250);
        for op in script {
            match op {
                0 => s.submit(Action::Next),
                1 => s.submit(Action::ShowDiagnostics),
                2 => s.submit(Action::ToggleAutoCycle),
                _ => {}
            }
            s.advance();
            prop_assert!(s.state().current_index < display_times.len());
        }
    }
}
