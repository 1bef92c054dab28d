// Work/rest countdown. Operations return the effects to apply to the screen, in order.

use crate::tick::{Tick, TickSource};
use std::time::{Duration, Instant};

pub const WORK_SECS: u32 = 1500;
pub const REST_SECS: u32 = 300;

const FULL: f64 = 1.0;
const EMPTY: f64 = 0.0;
const DRAIN: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Rest,
}

impl Phase {
    pub fn duration_secs(self) -> u32 {
        match self {
            Self::Work => WORK_SECS,
            Self::Rest => REST_SECS,
        }
    }

    pub fn complement(self) -> Self {
        match self {
            Self::Work => Self::Rest,
            Self::Rest => Self::Work,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Work => "🎯 FOCUS TIME",
            Self::Rest => "☕ REST",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonIcon {
    Start,
    Stop,
}

/// Instruction for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetLabel(String),
    SetTrackColor(Phase),
    /// Move the ring's stroke fraction toward `target`, starting at `from`
    /// or, when `None`, at whatever is on screen.
    AnimateProgress { from: Option<f64>, target: f64, duration: Duration },
    SetButtonIcon(ButtonIcon),
    /// A phase finished on its own and the next one took over.
    PhaseCompleted { next: Phase },
}

/// `M:SS`, minutes unpadded.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[derive(Debug)]
pub struct TimerController {
    phase: Phase,
    run_state: RunState,
    remaining: u32,
    ticks: TickSource,
}

impl TimerController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Work,
            run_state: RunState::Stopped,
            remaining: WORK_SECS,
            ticks: TickSource::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_ticking(&self) -> bool {
        self.ticks.is_active()
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticks.time_until_next(now)
    }

    pub fn initialize_display(&mut self) -> Vec<Effect> {
        self.remaining = WORK_SECS;
        vec![
            Effect::SetLabel(format_clock(self.remaining)),
            Effect::SetTrackColor(self.phase),
            Effect::SetButtonIcon(ButtonIcon::Start),
        ]
    }

    pub fn toggle_run_pause(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();

        match (self.run_state, self.phase) {
            (RunState::Stopped, _) => {
                tracing::info!(phase = ?self.phase, remaining = self.remaining, "timer started");
                self.run_state = RunState::Running;
                effects.push(Effect::SetButtonIcon(ButtonIcon::Stop));
                self.start_segment(now, &mut effects);
            }
            (RunState::Running, Phase::Work) => {
                tracing::info!(remaining = self.remaining, "work stopped, countdown reset");
                self.halt(&mut effects);
                self.remaining = WORK_SECS;
                effects.push(Effect::SetButtonIcon(ButtonIcon::Start));
                effects.push(Effect::SetLabel(format_clock(self.remaining)));
            }
            // Stopping during rest abandons the break and rearms a full work phase.
            (RunState::Running, Phase::Rest) => {
                tracing::info!(remaining = self.remaining, "rest aborted, back to work");
                self.halt(&mut effects);
                self.phase = Phase::Work;
                self.remaining = WORK_SECS;
                effects.push(Effect::SetButtonIcon(ButtonIcon::Start));
                effects.push(Effect::SetTrackColor(self.phase));
                effects.push(Effect::SetLabel(format_clock(self.remaining)));
            }
        }

        self.check_invariants();
        effects
    }

    /// Next tick due at `now`, if the countdown is running.
    pub fn poll_tick(&mut self, now: Instant) -> Option<Tick> {
        self.ticks.poll(now)
    }

    pub fn on_tick(&mut self, tick: Tick, now: Instant) -> Vec<Effect> {
        if !self.ticks.accepts(tick) || self.remaining == 0 {
            tracing::debug!(?tick, "dropping tick from a stopped segment");
            return Vec::new();
        }

        self.remaining -= 1;
        tracing::trace!(remaining = self.remaining, "tick");
        let mut effects = vec![Effect::SetLabel(format_clock(self.remaining))];

        if self.remaining == 0 {
            self.halt(&mut effects);
            self.phase = self.phase.complement();
            self.remaining = self.phase.duration_secs();
            effects.push(Effect::SetTrackColor(self.phase));
            effects.push(Effect::PhaseCompleted { next: self.phase });

            match self.phase {
                Phase::Work => {
                    effects.push(Effect::SetButtonIcon(ButtonIcon::Start));
                }
                Phase::Rest => {
                    self.run_state = RunState::Running;
                    self.start_segment(now, &mut effects);
                }
            }

            tracing::info!(phase = ?self.phase, remaining = self.remaining, "phase complete");
            effects.push(Effect::SetLabel(format_clock(self.remaining)));
        }

        self.check_invariants();
        effects
    }

    fn start_segment(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        self.ticks.start(now);
        // Each run segment fills from empty so the ring tracks elapsed time.
        effects.push(Effect::AnimateProgress {
            from: Some(EMPTY),
            target: FULL,
            duration: Duration::from_secs(u64::from(self.remaining) + 1),
        });
    }

    fn halt(&mut self, effects: &mut Vec<Effect>) {
        self.ticks.stop();
        self.run_state = RunState::Stopped;
        effects.push(Effect::AnimateProgress {
            from: None,
            target: EMPTY,
            duration: DRAIN,
        });
    }

    fn check_invariants(&self) {
        debug_assert!(self.remaining <= self.phase.duration_secs());
        debug_assert_eq!(self.ticks.is_active(), self.run_state == RunState::Running);
    }
}

impl Default for TimerController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick::TICK_PERIOD;

    /// Drives `n` ticks through the controller, one period apart.
    fn run_ticks(ctl: &mut TimerController, clock: &mut Instant, n: u32) -> Vec<Effect> {
        let mut last = Vec::new();
        for _ in 0..n {
            *clock += TICK_PERIOD;
            let tick = ctl.poll_tick(*clock).expect("tick source should be running");
            last = ctl.on_tick(tick, *clock);
        }
        last
    }

    fn label_of(effects: &[Effect]) -> Option<&str> {
        effects.iter().rev().find_map(|e| match e {
            Effect::SetLabel(s) => Some(s.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_initial_state() {
        let mut ctl = TimerController::new();
        let effects = ctl.initialize_display();

        assert_eq!(ctl.phase(), Phase::Work);
        assert_eq!(ctl.run_state(), RunState::Stopped);
        assert_eq!(ctl.remaining(), 1500);
        assert!(!ctl.is_ticking());
        assert_eq!(label_of(&effects), Some("25:00"));
        assert!(effects.contains(&Effect::SetButtonIcon(ButtonIcon::Start)));
        assert!(effects.contains(&Effect::SetTrackColor(Phase::Work)));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(1499), "24:59");
        assert_eq!(format_clock(609), "10:09");
        assert_eq!(format_clock(60), "1:00");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(0), "0:00");
        for r in 0..WORK_SECS {
            assert_eq!(format_clock(r), format!("{}:{:02}", r / 60, r % 60));
        }
    }

    #[test]
    fn test_start_fills_from_empty_over_remaining_plus_one() {
        let mut ctl = TimerController::new();
        let effects = ctl.toggle_run_pause(Instant::now());

        assert_eq!(ctl.run_state(), RunState::Running);
        assert!(ctl.is_ticking());
        assert_eq!(
            effects,
            vec![
                Effect::SetButtonIcon(ButtonIcon::Stop),
                Effect::AnimateProgress {
                    from: Some(0.0),
                    target: 1.0,
                    duration: Duration::from_secs(1501),
                },
            ]
        );
    }

    #[test]
    fn test_no_ticks_while_stopped() {
        let mut ctl = TimerController::new();
        let t0 = Instant::now();
        assert_eq!(ctl.poll_tick(t0 + Duration::from_secs(60)), None);
        assert_eq!(ctl.remaining(), WORK_SECS);
    }

    #[test]
    fn test_tick_decrements_and_labels() {
        let mut ctl = TimerController::new();
        let mut clock = Instant::now();
        ctl.toggle_run_pause(clock);

        let effects = run_ticks(&mut ctl, &mut clock, 1);
        assert_eq!(ctl.remaining(), 1499);
        assert_eq!(effects, vec![Effect::SetLabel("24:59".into())]);

        let effects = run_ticks(&mut ctl, &mut clock, 891);
        assert_eq!(ctl.remaining(), 608);
        assert_eq!(label_of(&effects), Some("10:08"));
    }

    #[test]
    fn test_work_completes_into_running_rest() {
        let mut ctl = TimerController::new();
        let mut clock = Instant::now();
        ctl.toggle_run_pause(clock);

        let effects = run_ticks(&mut ctl, &mut clock, 1500);

        assert_eq!(ctl.phase(), Phase::Rest);
        assert_eq!(ctl.run_state(), RunState::Running);
        assert_eq!(ctl.remaining(), 300);
        assert!(ctl.is_ticking());
        assert_eq!(
            effects,
            vec![
                Effect::SetLabel("0:00".into()),
                Effect::AnimateProgress {
                    from: None,
                    target: 0.0,
                    duration: Duration::from_secs(1),
                },
                Effect::SetTrackColor(Phase::Rest),
                Effect::PhaseCompleted { next: Phase::Rest },
                Effect::AnimateProgress {
                    from: Some(0.0),
                    target: 1.0,
                    duration: Duration::from_secs(301),
                },
                Effect::SetLabel("5:00".into()),
            ]
        );
    }

    #[test]
    fn test_rest_completes_into_stopped_work() {
        let mut ctl = TimerController::new();
        let mut clock = Instant::now();
        ctl.toggle_run_pause(clock);
        run_ticks(&mut ctl, &mut clock, 1500);

        let effects = run_ticks(&mut ctl, &mut clock, 300);

        assert_eq!(ctl.phase(), Phase::Work);
        assert_eq!(ctl.run_state(), RunState::Stopped);
        assert_eq!(ctl.remaining(), 1500);
        assert!(!ctl.is_ticking());
        assert!(effects.contains(&Effect::SetTrackColor(Phase::Work)));
        assert!(effects.contains(&Effect::SetButtonIcon(ButtonIcon::Start)));
        assert!(effects.contains(&Effect::PhaseCompleted { next: Phase::Work }));
        assert_eq!(label_of(&effects), Some("25:00"));
        assert_eq!(ctl.poll_tick(clock + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_stop_during_work_resets_countdown() {
        let mut ctl = TimerController::new();
        let mut clock = Instant::now();
        ctl.toggle_run_pause(clock);
        run_ticks(&mut ctl, &mut clock, 700);
        assert_eq!(ctl.remaining(), 800);

        let effects = ctl.toggle_run_pause(clock);

        assert_eq!(ctl.run_state(), RunState::Stopped);
        assert_eq!(ctl.phase(), Phase::Work);
        assert_eq!(ctl.remaining(), 1500);
        assert!(!ctl.is_ticking());
        assert_eq!(
            effects,
            vec![
                Effect::AnimateProgress {
                    from: None,
                    target: 0.0,
                    duration: Duration::from_secs(1),
                },
                Effect::SetButtonIcon(ButtonIcon::Start),
                Effect::SetLabel("25:00".into()),
            ]
        );
    }

    #[test]
    fn test_stop_during_rest_returns_to_full_work() {
        // Known quirk: the break is discarded rather than paused.
        let mut ctl = TimerController::new();
        let mut clock = Instant::now();
        ctl.toggle_run_pause(clock);
        run_ticks(&mut ctl, &mut clock, 1500 + 120);
        assert_eq!(ctl.phase(), Phase::Rest);
        assert_eq!(ctl.remaining(), 180);

        let effects = ctl.toggle_run_pause(clock);

        assert_eq!(ctl.phase(), Phase::Work);
        assert_eq!(ctl.run_state(), RunState::Stopped);
        assert_eq!(ctl.remaining(), 1500);
        assert!(!ctl.is_ticking());
        assert!(effects.contains(&Effect::SetTrackColor(Phase::Work)));
        assert!(effects.contains(&Effect::SetButtonIcon(ButtonIcon::Start)));
        assert_eq!(label_of(&effects), Some("25:00"));
    }

    #[test]
    fn test_restart_after_stop_counts_from_full() {
        let mut ctl = TimerController::new();
        let mut clock = Instant::now();
        ctl.toggle_run_pause(clock);
        run_ticks(&mut ctl, &mut clock, 10);
        ctl.toggle_run_pause(clock);
        ctl.toggle_run_pause(clock);

        run_ticks(&mut ctl, &mut clock, 1);
        assert_eq!(ctl.remaining(), 1499);
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let mut ctl = TimerController::new();
        let mut clock = Instant::now();
        ctl.toggle_run_pause(clock);
        clock += TICK_PERIOD;
        let stale = ctl.poll_tick(clock).unwrap();

        ctl.toggle_run_pause(clock);
        assert!(ctl.on_tick(stale, clock).is_empty());
        assert_eq!(ctl.remaining(), 1500);

        // Still ignored once a newer segment is running.
        ctl.toggle_run_pause(clock);
        assert!(ctl.on_tick(stale, clock).is_empty());
        assert_eq!(ctl.remaining(), 1500);
    }

    #[test]
    fn test_stale_tick_after_phase_change_is_ignored() {
        let mut ctl = TimerController::new();
        let mut clock = Instant::now();
        ctl.toggle_run_pause(clock);
        run_ticks(&mut ctl, &mut clock, 1499);

        clock += TICK_PERIOD;
        let last = ctl.poll_tick(clock).unwrap();
        ctl.on_tick(last, clock);
        assert_eq!(ctl.phase(), Phase::Rest);

        assert!(ctl.on_tick(last, clock).is_empty());
        assert_eq!(ctl.remaining(), 300);
    }

    #[test]
    fn test_remaining_stays_in_bounds_over_full_cycle() {
        let mut ctl = TimerController::new();
        let mut clock = Instant::now();
        ctl.toggle_run_pause(clock);
        for _ in 0..(WORK_SECS + REST_SECS) {
            run_ticks(&mut ctl, &mut clock, 1);
            assert!(ctl.remaining() <= ctl.phase().duration_secs());
        }
        assert_eq!(ctl.phase(), Phase::Work);
        assert_eq!(ctl.run_state(), RunState::Stopped);
    }
}
