use crate::progress::ProgressAnimation;
use crate::timer::{ButtonIcon, Effect, Phase};
use std::time::Instant;

/// What is currently on screen. Filled in by controller effects, read by the renderer.
#[derive(Debug)]
pub struct Screen {
    pub label: String,
    pub track: Phase,
    pub icon: ButtonIcon,
    pub progress: ProgressAnimation,
}

impl Screen {
    pub fn new(now: Instant) -> Self {
        Self {
            label: String::new(),
            track: Phase::Work,
            icon: ButtonIcon::Start,
            progress: ProgressAnimation::idle(0.0, now),
        }
    }

    pub fn apply(&mut self, effect: &Effect, now: Instant) {
        match effect {
            Effect::SetLabel(text) => self.label.clone_from(text),
            Effect::SetTrackColor(phase) => self.track = *phase,
            Effect::AnimateProgress { from, target, duration } => {
                self.progress.animate_to(*from, *target, *duration, now)
            }
            Effect::SetButtonIcon(icon) => self.icon = *icon,
            Effect::PhaseCompleted { .. } => {}
        }
    }
}
