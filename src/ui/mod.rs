//! UI module for keepsake-tui
//!
//! This module contains UI rendering functions for the TUI interface,
//! including the phone-style chrome, half-block photo rendering, and the
//! per-step screens.

mod helpers;
mod picture;
mod screens;

pub use helpers::{centered_rect, ellipsize, wrap_text};
pub use picture::{photo_lines, placeholder_lines, Photo};

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::models::Step;
use crate::theme::{BG_PRIMARY, BORDER_SUBTLE, ROSE_DIM, ROSE_PRIMARY, TEXT_MUTED, TEXT_SECONDARY};
use crate::utils::format_volume;

/// Frozen status-bar clock, matching the lock screen.
const STATUS_CLOCK: &str = "15:00";

/// Render the whole surface: status bar, current step, chrome rows.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(BG_PRIMARY)),
        area,
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(8),    // Step content
            Constraint::Length(1), // Home indicator
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    render_status_bar(frame, app, layout[0]);

    match app.flow.step {
        Step::Locked => screens::render_lock(frame, app, layout[1]),
        Step::Letter => screens::render_letter(frame, app, layout[1]),
        Step::Gallery => screens::render_gallery(frame, app, layout[1]),
        Step::Video => screens::render_video(frame, app, layout[1]),
        Step::Proposal => screens::render_proposal(frame, app, layout[1]),
    }

    render_home_indicator(frame, app, layout[2]);
    render_hints(frame, app, layout[3]);
}

/// Phone-style status bar: back affordance, clock, music and radio glyphs.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    // Back affordance appears once past the lock
    let left = if app.flow.step > Step::Locked {
        Line::from(vec![
            Span::styled(" ‹ ", Style::default().fg(TEXT_SECONDARY)),
            Span::styled("Esc", Style::default().fg(TEXT_MUTED)),
        ])
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(left), chunks[0]);

    let clock = Paragraph::new(Line::from(Span::styled(
        STATUS_CLOCK,
        Style::default()
            .fg(TEXT_SECONDARY)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(clock, chunks[1]);

    // Volume readout briefly replaces the music glyph after adjustment
    let music_span = if app.volume_flash.is_some() {
        Span::styled(
            format!("VOL {}", format_volume(app.volume)),
            Style::default().fg(TEXT_SECONDARY),
        )
    } else if app.music_failed {
        Span::styled("♪ ✕", Style::default().fg(TEXT_MUTED))
    } else if app.flow.playing {
        let note = if (app.animation_tick / 4) % 2 == 0 {
            "♪"
        } else {
            "♫"
        };
        Span::styled(note.to_string(), Style::default().fg(ROSE_PRIMARY))
    } else {
        Span::styled("♪ off", Style::default().fg(TEXT_MUTED))
    };

    let right = Line::from(vec![
        music_span,
        Span::raw("  "),
        Span::styled("5G", Style::default().fg(TEXT_SECONDARY)),
        Span::raw(" "),
        Span::styled("▰▰▰▱ ", Style::default().fg(TEXT_SECONDARY)),
    ]);
    frame.render_widget(
        Paragraph::new(right).alignment(Alignment::Right),
        chunks[2],
    );
}

/// Home-indicator row doubling as a five-dot progression marker.
fn render_home_indicator(frame: &mut Frame, app: &App, area: Rect) {
    let rank = app.flow.step.rank();
    let mut spans = Vec::with_capacity(Step::ALL.len() * 2);
    for step in Step::ALL {
        let (dot, color) = if step.rank() <= rank {
            ("●", ROSE_DIM)
        } else {
            ("○", BORDER_SUBTLE)
        };
        spans.push(Span::styled(dot, Style::default().fg(color)));
        spans.push(Span::raw(" "));
    }
    spans.pop();
    let indicator = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(indicator, area);
}

/// Per-step key hints along the bottom edge.
fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.flow.step {
        Step::Locked => "Enter unlock · q quit",
        Step::Letter => "Enter continue · Esc back · m music · q quit",
        Step::Gallery => "←/→ browse · Enter continue · Esc back · m music · q quit",
        Step::Video => "Space play/pause · Enter continue · Esc back · m music · q quit",
        Step::Proposal => "Enter yes · n maybe later · Esc back · m music · q quit",
    };
    let line = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(TEXT_MUTED),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(line, area);
}
