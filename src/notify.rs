use crate::config::Config;
use crate::timer::Phase;
use notify_rust::{Notification, Urgency};
use std::{path::Path, process::{Command, Stdio}};

// Freedesktop theme sounds first (PipeWire, then PulseAudio), bare ALSA last.
const FREEDESKTOP_CHIME: &str = "/usr/share/sounds/freedesktop/stereo/complete.oga";
const PLAYERS: &[(&str, &str)] = &[
    ("pw-play", FREEDESKTOP_CHIME),
    ("paplay", FREEDESKTOP_CHIME),
    ("paplay", "/usr/share/sounds/freedesktop/stereo/bell.oga"),
    ("aplay", "/usr/share/sounds/alsa/Front_Center.wav"),
];

/// Desktop notification and chime for phase changes.
pub struct Notifier {
    enabled: bool,
    sound: bool,
    sent: u32,
}

impl Notifier {
    pub fn new(config: &Config) -> Self {
        Self {
            enabled: config.notifications,
            sound: config.sound,
            sent: 0,
        }
    }

    /// Number of phase changes announced so far.
    pub fn sent(&self) -> u32 {
        self.sent
    }

    pub fn phase_completed(&mut self, next: Phase) {
        let (title, body) = message_for(next);
        self.sent += 1;
        tracing::info!(?next, count = self.sent, "announcing phase change");

        if self.enabled {
            let shown = Notification::new()
                .summary(title)
                .body(body)
                .appname("pomoring")
                .icon("alarm-clock")
                .urgency(Urgency::Critical)
                .show();
            if let Err(e) = shown {
                tracing::warn!(error = %e, "desktop notification failed");
            }
        }

        if self.sound {
            std::thread::spawn(play_chime);
        }
    }
}

fn message_for(next: Phase) -> (&'static str, &'static str) {
    match next {
        Phase::Rest => ("Break Time! ☕", "Work phase done. Rest is running."),
        Phase::Work => ("Back to Work! 🎯", "Rest is over. Press start when ready."),
    }
}

fn play_chime() {
    // A player that is missing falls through to the next candidate.
    for (cmd, file) in PLAYERS.iter().filter(|(_, file)| Path::new(file).exists()) {
        let spawned = Command::new(cmd)
            .arg(file)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(_) => return,
            Err(e) => tracing::debug!(player = *cmd, error = %e, "sound player unavailable"),
        }
    }
    tracing::warn!("no usable sound player found");
}
