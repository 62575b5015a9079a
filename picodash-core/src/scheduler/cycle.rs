//! Cycle scheduler

use super::Action;
use crate::clock::DateTime;
use crate::color::Rgb;
use crate::connectivity::ConnectivityState;
use crate::memory::{MemoryMonitor, MemoryStats};
use crate::render::{
    self, RenderContext, RenderError, RendererDispatcher, RendererKind, Shifted, Slide,
};
use crate::status::StatusIndicator;
use crate::traits::{DrawSurface, HardwareError, IndicatorLed, MemoryProbe};
use crate::workspace::{WorkspaceDefinition, WorkspaceRegistry};

/// Position in the workspace cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleState {
    /// Always a valid registry index
    pub current_index: usize,
    /// Time spent on the current workspace while auto-cycling
    pub elapsed_ms: u32,
    pub auto_cycle_enabled: bool,
}

impl CycleState {
    /// First workspace, nothing elapsed
    pub const fn new(auto_cycle_enabled: bool) -> Self {
        Self {
            current_index: 0,
            elapsed_ms: 0,
            auto_cycle_enabled,
        }
    }
}

impl Default for CycleState {
    fn default() -> Self {
        Self::new(true)
    }
}

/// What a tick did to the cycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Same workspace (timer running or frozen)
    Stay,
    /// Moved to the next workspace, by `Next` or by the timer
    Advanced { from: usize, to: usize },
    /// Jumped to the diagnostics workspace
    Jumped { from: usize, to: usize },
    /// Auto-cycle switched on or off
    AutoCycle(bool),
    /// `ShowDiagnostics` with no diagnostics workspace configured
    DiagnosticsUnavailable,
}

/// Inputs for one tick that the scheduler does not own
#[derive(Debug, Clone, Copy)]
pub struct TickEnv {
    pub now: DateTime,
    pub connectivity: ConnectivityState,
    /// Measured time since the previous tick
    pub delta_ms: u32,
}

/// Outcome of one tick
///
/// Failures are carried as values so the caller can log them; none of them
/// stop the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    pub transition: Transition,
    pub render: Result<(), RenderError>,
    pub present: Result<(), HardwareError>,
    pub indicator: Result<(), HardwareError>,
}

/// Drives the workspace cycle
pub struct CycleScheduler<S, L> {
    registry: WorkspaceRegistry,
    state: CycleState,
    /// Single action slot; a newer action replaces an unconsumed one
    pending: Option<Action>,
    tick_ms: u32,
    /// Slide length between workspaces; 0 switches instantly
    transition_ms: u32,
    slide: Option<Slide>,
    dispatcher: RendererDispatcher,
    surface: S,
    indicator: StatusIndicator<L>,
}

impl<S: DrawSurface, L: IndicatorLed> CycleScheduler<S, L> {
    /// Create a new scheduler at the first workspace
    pub fn new(
        registry: WorkspaceRegistry,
        tick_ms: u32,
        auto_cycle: bool,
        surface: S,
        indicator: StatusIndicator<L>,
    ) -> Self {
        Self {
            registry,
            state: CycleState::new(auto_cycle),
            pending: None,
            tick_ms,
            transition_ms: 0,
            slide: None,
            dispatcher: RendererDispatcher::new(),
            surface,
            indicator,
        }
    }

    /// Slide between workspaces over `transition_ms`
    pub fn with_transition(mut self, transition_ms: u32) -> Self {
        self.transition_ms = transition_ms;
        self
    }

    /// Queue an action for the next tick (last one wins)
    pub fn submit(&mut self, action: Action) {
        self.pending = Some(action);
    }

    /// Apply the pending action or advance the timer by one nominal tick
    pub fn advance(&mut self) -> Transition {
        self.advance_by(self.tick_ms)
    }

    /// Apply the pending action or advance the timer by `delta_ms`
    ///
    /// A pending action is consumed and the timer does not run on that
    /// tick.
    pub fn advance_by(&mut self, delta_ms: u32) -> Transition {
        let from = self.state.current_index;

        if let Some(action) = self.pending.take() {
            return match action {
                Action::Next => {
                    let to = self.next_index();
                    self.go_to(to);
                    Transition::Advanced { from, to }
                }
                Action::ShowDiagnostics => match self.registry.diagnostics_index() {
                    Some(to) => {
                        self.go_to(to);
                        Transition::Jumped { from, to }
                    }
                    None => Transition::DiagnosticsUnavailable,
                },
                Action::ToggleAutoCycle => {
                    self.state.auto_cycle_enabled = !self.state.auto_cycle_enabled;
                    Transition::AutoCycle(self.state.auto_cycle_enabled)
                }
            };
        }

        if !self.state.auto_cycle_enabled {
            return Transition::Stay;
        }

        self.state.elapsed_ms = self.state.elapsed_ms.saturating_add(delta_ms);
        if self.state.elapsed_ms >= self.current().display_time_ms {
            let to = self.next_index();
            self.go_to(to);
            return Transition::Advanced { from, to };
        }

        Transition::Stay
    }

    /// Run one tick: update the state, then draw, present and set the LED
    pub fn tick<P: MemoryProbe>(
        &mut self,
        env: &TickEnv,
        memory: &mut MemoryMonitor<P>,
    ) -> TickReport {
        let transition = self.advance_by(env.delta_ms);
        self.update_slide(transition, env.delta_ms);
        let index = self.state.current_index;

        let slide = self.slide;
        let shown_from = slide.map(|slide| slide.from);
        let needs_memory = core::iter::once(index)
            .chain(shown_from)
            .any(|i| self.registry[i].renderer == RendererKind::System);
        if needs_memory {
            memory.sample();
        }
        let stats = memory.latest();

        let render = match slide {
            Some(slide) => {
                let (width, _) = self.surface.size();
                let offset = slide.offset(width, self.transition_ms);
                self.surface.clear(Rgb::BLACK);
                let outgoing = self.draw_workspace(slide.from, -offset, env, stats);
                let incoming = self.draw_workspace(index, width as i32 - offset, env, stats);
                outgoing.and(incoming)
            }
            None => self.draw_workspace(index, 0, env, stats),
        };
        let present = self.surface.present();
        let indicator = self.indicator.update(&self.state, &self.registry[index]);

        TickReport {
            transition,
            render,
            present,
            indicator,
        }
    }

    /// Slide in progress, if any
    pub fn slide(&self) -> Option<Slide> {
        self.slide
    }

    /// Show the boot screen and the startup colour
    pub fn splash(&mut self) -> Result<(), HardwareError> {
        render::splash(&mut self.surface);
        let present = self.surface.present();
        let led = self.indicator.startup();
        present.and(led)
    }

    /// Current cycle state
    pub fn state(&self) -> &CycleState {
        &self.state
    }

    /// The registry being cycled
    pub fn registry(&self) -> &WorkspaceRegistry {
        &self.registry
    }

    /// Workspace currently displayed
    pub fn current(&self) -> &WorkspaceDefinition {
        &self.registry[self.state.current_index]
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn indicator(&self) -> &StatusIndicator<L> {
        &self.indicator
    }

    /// Start, step or finish the slide for this tick
    ///
    /// Only moves to the next workspace slide; a diagnostics jump cuts
    /// straight to the target.
    fn update_slide(&mut self, transition: Transition, delta_ms: u32) {
        match transition {
            Transition::Advanced { from, to } if from != to && self.transition_ms > 0 => {
                self.slide = Some(Slide::new(from));
            }
            Transition::Advanced { .. } | Transition::Jumped { .. } => self.slide = None,
            _ => {
                if let Some(slide) = &mut self.slide {
                    slide.progress_ms = slide.progress_ms.saturating_add(delta_ms);
                    if slide.progress_ms >= self.transition_ms {
                        self.slide = None;
                    }
                }
            }
        }
    }

    /// Draw workspace `index` with its origin moved `dx` pixels right
    fn draw_workspace(
        &mut self,
        index: usize,
        dx: i32,
        env: &TickEnv,
        memory: MemoryStats,
    ) -> Result<(), RenderError> {
        let workspace = &self.registry[index];
        let ctx = RenderContext {
            now: env.now,
            connectivity: env.connectivity,
            memory,
            params: &workspace.params,
            workspace_name: &workspace.name,
            position: index,
            count: self.registry.len(),
            auto_cycle: self.state.auto_cycle_enabled,
        };

        if dx == 0 {
            self.dispatcher
                .draw(workspace.renderer, &ctx, &mut self.surface)
        } else {
            let mut shifted = Shifted::new(&mut self.surface, dx);
            self.dispatcher.draw(workspace.renderer, &ctx, &mut shifted)
        }
    }

    fn next_index(&self) -> usize {
        (self.state.current_index + 1) % self.registry.len()
    }

    fn go_to(&mut self, index: usize) {
        self.state.current_index = index;
        self.state.elapsed_ms = 0;
    }
}
