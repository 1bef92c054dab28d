use crate::timer::Phase;
use ratatui::style::Color;

pub const THEMES: &[&str] = &["default", "nord", "dracula", "gruvbox", "solarized"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub work_color: Color,
    pub rest_color: Color,
    pub progress_color: Color,
    pub border_color: Color,
    pub accent_color: Color,
}

impl Theme {
    pub fn track_color(&self, phase: Phase) -> Color {
        match phase {
            Phase::Work => self.work_color,
            Phase::Rest => self.rest_color,
        }
    }
}

pub fn get_theme(name: &str) -> Theme {
    match name {
        "nord" => Theme {
            work_color: Color::Rgb(191, 97, 106),
            rest_color: Color::Rgb(163, 190, 140),
            progress_color: Color::Rgb(236, 239, 244),
            border_color: Color::Rgb(100, 200, 255),
            accent_color: Color::Rgb(255, 100, 255),
        },
        "dracula" => Theme {
            work_color: Color::Rgb(255, 85, 85),
            rest_color: Color::Rgb(80, 250, 123),
            progress_color: Color::Rgb(248, 248, 242),
            border_color: Color::Rgb(200, 100, 255),
            accent_color: Color::Rgb(255, 0, 255),
        },
        "gruvbox" => Theme {
            work_color: Color::Rgb(251, 73, 52),
            rest_color: Color::Rgb(184, 187, 38),
            progress_color: Color::Rgb(235, 219, 178),
            border_color: Color::Rgb(255, 200, 100),
            accent_color: Color::Rgb(255, 150, 0),
        },
        "solarized" => Theme {
            work_color: Color::Rgb(220, 50, 47),
            rest_color: Color::Rgb(133, 153, 0),
            progress_color: Color::Rgb(253, 246, 227),
            border_color: Color::Rgb(100, 200, 255),
            accent_color: Color::Rgb(255, 200, 0),
        },
        _ => Theme {
            work_color: Color::Rgb(255, 69, 58),
            rest_color: Color::Rgb(48, 209, 88),
            progress_color: Color::White,
            border_color: Color::Rgb(0, 200, 255),
            accent_color: Color::Rgb(255, 100, 0),
        },
    }
}
