use crate::config::Config;
use crate::notify::Notifier;
use crate::screen::Screen;
use crate::theme::{get_theme, Theme};
use crate::timer::{Effect, Phase, RunState, TimerController};
use crate::ui;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

pub struct AppState {
    controller: TimerController,
    pub screen: Screen,
    pub theme: Theme,
    notifier: Notifier,
}

impl AppState {
    pub fn new(config: &Config, now: Instant) -> Self {
        let mut app = Self {
            controller: TimerController::new(),
            screen: Screen::new(now),
            theme: get_theme(&config.theme),
            notifier: Notifier::new(config),
        };
        let effects = app.controller.initialize_display();
        app.apply(&effects, now);
        app
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn run_state(&self) -> RunState {
        self.controller.run_state()
    }

    pub fn toggle(&mut self, now: Instant) {
        let effects = self.controller.toggle_run_pause(now);
        self.apply(&effects, now);
    }

    /// Delivers every tick that has come due by `now`.
    pub fn update(&mut self, now: Instant) {
        while let Some(tick) = self.controller.poll_tick(now) {
            let effects = self.controller.on_tick(tick, now);
            self.apply(&effects, now);
        }
    }

    pub fn notifications_sent(&self) -> u32 {
        self.notifier.sent()
    }

    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.controller.time_until_tick(now)
    }

    fn apply(&mut self, effects: &[Effect], now: Instant) {
        for effect in effects {
            if let Effect::PhaseCompleted { next } = effect {
                self.notifier.phase_completed(*next);
            }
            self.screen.apply(effect, now);
        }
    }
}

/// Returns true when the user asked to quit.
pub fn handle_input(event: Event, app: &mut AppState, area: Rect, now: Instant) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(key, app, now),
        Event::Mouse(mouse) => {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                && contains(ui::button_area(area), mouse.column, mouse.row)
            {
                app.toggle(now);
            }
            false
        }
        _ => false,
    }
}

fn handle_key(key: KeyEvent, app: &mut AppState, now: Instant) -> bool {
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return true;
    }

    if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
        app.toggle(now);
    }
    false
}

fn contains(r: Rect, x: u16, y: u16) -> bool {
    x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height
}
