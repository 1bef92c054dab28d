use crate::app::AppState;
use crate::timer::{ButtonIcon, RunState};
use ratatui::{prelude::*, widgets::*};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Points};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::time::Instant;

const RING_RADII: [f64; 3] = [0.80, 0.86, 0.92];
const RING_STEPS: usize = 240;
const BUTTON_WIDTH: u16 = 11;
const BUTTON_HEIGHT: u16 = 3;

struct Regions {
    header: Rect,
    ring: Rect,
    label: Rect,
    button: Rect,
    footer: Rect,
}

fn regions(area: Rect) -> Regions {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(2)])
        .split(area);
    let body = chunks[1];

    // Terminal cells are roughly twice as tall as wide.
    let ring_width = body.width.min(body.height.saturating_mul(2));
    let ring = Rect {
        x: body.x + (body.width - ring_width) / 2,
        y: body.y,
        width: ring_width,
        height: body.height,
    };

    let center_row = ring.y + ring.height / 2;
    let label = Rect {
        x: ring.x,
        y: center_row.saturating_sub(1).max(body.y),
        width: ring.width,
        height: 1,
    }
    .intersection(body);

    let button_width = BUTTON_WIDTH.min(body.width);
    let bottom = body.y + body.height;
    let button = Rect {
        x: body.x + (body.width - button_width) / 2,
        y: (center_row + 1).min(bottom.saturating_sub(BUTTON_HEIGHT)).max(body.y),
        width: button_width,
        height: BUTTON_HEIGHT.min(body.height),
    }
    .intersection(body);

    Regions {
        header: chunks[0],
        ring,
        label,
        button,
        footer: chunks[2],
    }
}

/// Screen rectangle of the start/stop button for a terminal of size `area`.
pub fn button_area(area: Rect) -> Rect {
    regions(area).button
}

pub fn render_ui(f: &mut Frame, app: &AppState, now: Instant) {
    let r = regions(f.size());
    render_header(f, app, r.header);
    render_ring(f, app, now, r.ring);
    render_label(f, app, r.label);
    render_button(f, app, r.button);
    render_footer(f, app, r.footer);
}

fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let track = app.theme.track_color(app.phase());
    let status = match app.run_state() {
        RunState::Running => Span::styled("● RUNNING", Style::default().fg(Color::Green)),
        RunState::Stopped => Span::styled("⏸ STOPPED", Style::default().fg(Color::Yellow)),
    };

    let line = Line::from(vec![
        Span::styled(app.phase().name(), Style::default().fg(track).add_modifier(Modifier::BOLD)),
        Span::raw("  •  "),
        status,
    ]);

    f.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.border_color))
                .title(Span::styled(" 🍅 POMORING ", Style::default()
                    .fg(app.theme.accent_color).add_modifier(Modifier::BOLD)))),
        area,
    );
}

/// Points of an arc starting at twelve o'clock and running clockwise over `fraction` of a turn.
fn arc_points(fraction: f64) -> Vec<(f64, f64)> {
    let steps = (fraction.clamp(0.0, 1.0) * RING_STEPS as f64).round() as usize;
    let mut points = Vec::with_capacity(steps * RING_RADII.len());
    for radius in RING_RADII {
        for i in 0..steps {
            let angle = FRAC_PI_2 - TAU * (i as f64 / RING_STEPS as f64);
            points.push((radius * angle.cos(), radius * angle.sin()));
        }
    }
    points
}

fn render_ring(f: &mut Frame, app: &AppState, now: Instant, area: Rect) {
    if area.is_empty() {
        return;
    }
    let track = arc_points(1.0);
    let filled = arc_points(app.screen.progress.value_at(now));
    let track_color = app.theme.track_color(app.screen.track);
    let progress_color = app.theme.progress_color;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            ctx.draw(&Points { coords: &track, color: track_color });
            ctx.draw(&Points { coords: &filled, color: progress_color });
        });
    f.render_widget(canvas, area);
}

fn render_label(f: &mut Frame, app: &AppState, area: Rect) {
    let width = (app.screen.label.chars().count() as u16 + 2).min(area.width);
    let text_area = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };
    f.render_widget(Clear, text_area);
    f.render_widget(
        Paragraph::new(app.screen.label.as_str())
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        text_area,
    );
}

fn render_button(f: &mut Frame, app: &AppState, area: Rect) {
    let text = match app.screen.icon {
        ButtonIcon::Start => "▶ START",
        ButtonIcon::Stop => "■ STOP",
    };
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .block(Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.accent_color))),
        area,
    );
}

fn render_footer(f: &mut Frame, app: &AppState, area: Rect) {
    let now = chrono::Local::now();
    let key = |k: &'static str| Span::styled(k, Style::default().fg(app.theme.accent_color).add_modifier(Modifier::BOLD));
    let lines = vec![
        Line::from(Span::styled(now.format("%A, %B %d  %I:%M %p").to_string(), Style::default().fg(Color::Gray))),
        Line::from(vec![
            key("Space"), Span::raw(" / "), key("Enter"), Span::raw(" / click: Start/Stop  •  "),
            key("Q"), Span::raw(" Quit"),
        ]),
    ];
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
