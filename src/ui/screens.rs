//! Screen rendering functions for the five keepsake steps

use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::app::App;
use crate::models::VideoPhase;
use crate::theme::{
    get_pulse_color, AMBER_WARNING, BG_PRIMARY, BG_SECONDARY, BG_TERTIARY, BORDER_SUBTLE,
    GOLD_ACCENT, GREEN_SUCCESS, LAVENDER, ROSE_DIM, ROSE_PRIMARY, ROUNDED_BORDERS, TEXT_MUTED,
    TEXT_PRIMARY, TEXT_SECONDARY,
};
use crate::ui::{centered_rect, ellipsize, photo_lines, placeholder_lines, wrap_text};
use crate::utils::{format_duration, format_optional_duration};

/// Frozen lock-screen clock, same on every run.
const LOCK_CLOCK: &str = "15:00";
const LOCK_DATE: &str = "Saturday, February 14";

/// Letter lines revealed one bubble at a time.
const LETTER_LINES: &[&str] = &[
    "Hey you. Headphones on before anything else.",
    "A year of small moments kept piling up, and I finally gathered my favorites in one place.",
    "Take your time with them. They are all yours.",
    "And when you reach the end, there is something I want to ask.",
];

/// Render the lock screen: clock, date, and a teaser notification card.
pub fn render_lock(frame: &mut Frame, app: &App, area: Rect) {
    let panel = centered_rect(70, 80, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Top padding
            Constraint::Length(1), // Clock
            Constraint::Length(1), // Date
            Constraint::Length(1), // Gap
            Constraint::Length(5), // Notification card
            Constraint::Min(1),    // Bottom padding
            Constraint::Length(1), // Unlock hint
        ])
        .split(panel);

    let clock = Paragraph::new(Line::from(Span::styled(
        LOCK_CLOCK,
        Style::default()
            .fg(TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(clock, layout[1]);

    let date = Paragraph::new(Line::from(Span::styled(
        LOCK_DATE,
        Style::default().fg(TEXT_SECONDARY),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(date, layout[2]);

    // Notification card teasing what waits behind the lock
    let card_area = centered_rect(80, 100, layout[4]);
    let card_block = Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .style(Style::default().bg(BG_SECONDARY));

    let card_content = vec![
        Line::from(vec![
            Span::styled("♥ ", Style::default().fg(ROSE_PRIMARY)),
            Span::styled(
                "MESSAGES",
                Style::default().fg(TEXT_MUTED).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  now", Style::default().fg(TEXT_MUTED)),
        ]),
        Line::from(Span::styled(
            "Someone left something here for you.",
            Style::default().fg(TEXT_PRIMARY),
        )),
        Line::from(Span::styled(
            "Come see. Take your time.",
            Style::default().fg(TEXT_SECONDARY),
        )),
    ];

    let card = Paragraph::new(card_content).block(card_block);
    frame.render_widget(card, card_area);

    let hint_color = get_pulse_color(app.animation_tick, ROSE_PRIMARY, ROSE_DIM);
    let hint = Paragraph::new(Line::from(Span::styled(
        "Press Enter to unlock",
        Style::default().fg(hint_color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, layout[6]);
}

/// Render the letter screen as chat bubbles revealed over time.
pub fn render_letter(frame: &mut Frame, app: &App, area: Rect) {
    let panel = centered_rect(70, 90, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .title(Span::styled(
            " A letter for you ",
            Style::default().fg(ROSE_PRIMARY).add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(BG_PRIMARY));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let visible = app.letter.revealed(app.animation_tick, LETTER_LINES.len());
    let bubble_width = (inner.width.saturating_sub(8) as usize).clamp(8, 46);

    let mut lines: Vec<Line> = vec![Line::default()];
    for text in LETTER_LINES.iter().take(visible) {
        for wrapped in wrap_text(text, bubble_width) {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!(" {wrapped} "),
                    Style::default().fg(TEXT_PRIMARY).bg(BG_TERTIARY),
                ),
            ]));
        }
        lines.push(Line::default());
    }

    if app.letter.fully_revealed(app.animation_tick, LETTER_LINES.len()) {
        let hint_color = get_pulse_color(app.animation_tick, ROSE_PRIMARY, ROSE_DIM);
        lines.push(Line::from(Span::styled(
            "  Press Enter to open the album",
            Style::default().fg(hint_color),
        )));
    } else {
        // Typing indicator while bubbles are still arriving
        let dots = match (app.animation_tick / 2) % 3 {
            0 => "·  ",
            1 => "·· ",
            _ => "···",
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!(" {dots} "),
                Style::default().fg(TEXT_MUTED).bg(BG_TERTIARY),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the gallery screen: album header, focused photo, thumbnail strip.
pub fn render_gallery(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Album header
            Constraint::Min(6),    // Focused photo
            Constraint::Length(7), // Thumbnail strip
        ])
        .split(area);

    let count = app.manifest.photo_count();
    let header = Line::from(vec![
        Span::styled(
            "Memories",
            Style::default()
                .fg(TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {count} Photos"), Style::default().fg(TEXT_MUTED)),
    ]);
    frame.render_widget(
        Paragraph::new(header).alignment(Alignment::Center),
        layout[0],
    );

    let selected = app.gallery.selected.min(count.saturating_sub(1));
    let caption = photo_caption(app, selected);

    // Focused photo with filename caption in the border
    let focus_area = centered_rect(80, 100, layout[1]);
    let focus_block = Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .title_bottom(Span::styled(
            format!(" {} ", ellipsize(&caption, 28)),
            Style::default().fg(TEXT_MUTED),
        ))
        .style(Style::default().bg(BG_PRIMARY));
    let inner = focus_block.inner(focus_area);
    frame.render_widget(focus_block, focus_area);

    let lines = match app.photos.get(selected).and_then(|p| p.as_ref()) {
        Some(photo) => photo_lines(photo, inner.width, inner.height),
        None => placeholder_lines(inner.width, inner.height, &caption),
    };
    frame.render_widget(Paragraph::new(lines), inner);

    render_thumbnails(frame, app, layout[2], selected);
}

/// Thumbnail strip under the focused photo, selected cell highlighted.
fn render_thumbnails(frame: &mut Frame, app: &App, area: Rect, selected: usize) {
    let count = app.manifest.photo_count();
    if count == 0 || area.width < 4 {
        return;
    }

    let thumb_width = (area.width / count as u16).clamp(6, 14);
    let strip_width = thumb_width * count as u16;
    let strip = Rect {
        x: area.x + (area.width.saturating_sub(strip_width)) / 2,
        y: area.y,
        width: strip_width.min(area.width),
        height: area.height,
    };

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(thumb_width); count])
        .split(strip);

    for (idx, cell) in cells.iter().enumerate() {
        let border_color = if idx == selected {
            ROSE_PRIMARY
        } else {
            BORDER_SUBTLE
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(ROUNDED_BORDERS)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(BG_SECONDARY));
        let inner = block.inner(*cell);
        frame.render_widget(block, *cell);

        match app.photos.get(idx).and_then(|p| p.as_ref()) {
            Some(photo) => {
                frame.render_widget(
                    Paragraph::new(photo_lines(photo, inner.width, inner.height)),
                    inner,
                );
            }
            None => {
                let marker = Paragraph::new(Line::from(Span::styled(
                    "✕",
                    Style::default().fg(TEXT_MUTED),
                )))
                .alignment(Alignment::Center);
                frame.render_widget(marker, inner);
            }
        }
    }
}

/// Render the video screen: title, phase glyph, progress gauge, hints.
pub fn render_video(frame: &mut Frame, app: &App, area: Rect) {
    let panel = centered_rect(70, 80, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(4),    // Screen
            Constraint::Length(1), // Phase badge
            Constraint::Length(1), // Progress gauge
            Constraint::Length(1), // Hint
        ])
        .split(panel);

    let title = Paragraph::new(Line::from(Span::styled(
        "One last film",
        Style::default()
            .fg(TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    // Playback surface: phase glyph, or a broken-media card when absent
    let screen_block = Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .style(Style::default().bg(BG_SECONDARY));
    let screen_inner = screen_block.inner(layout[1]);
    frame.render_widget(screen_block, layout[1]);

    if app.video.missing {
        frame.render_widget(
            Paragraph::new(placeholder_lines(
                screen_inner.width,
                screen_inner.height,
                "video unavailable",
            )),
            screen_inner,
        );
    } else {
        let glyph = match app.video.phase {
            VideoPhase::Idle => "▶",
            VideoPhase::Playing => {
                if (app.animation_tick / 4) % 2 == 0 {
                    "♪"
                } else {
                    "♫"
                }
            }
            VideoPhase::Paused => "▌▌",
            VideoPhase::Finished => "↻",
        };
        let glyph_row = screen_inner.height / 2;
        let mut glyph_lines: Vec<Line> = Vec::with_capacity(screen_inner.height as usize);
        for row in 0..screen_inner.height {
            if row == glyph_row {
                glyph_lines.push(Line::from(Span::styled(
                    glyph,
                    Style::default()
                        .fg(ROSE_PRIMARY)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                glyph_lines.push(Line::default());
            }
        }
        frame.render_widget(
            Paragraph::new(glyph_lines).alignment(Alignment::Center),
            screen_inner,
        );
    }

    let (badge, badge_color) = if app.video.missing {
        ("UNAVAILABLE", TEXT_MUTED)
    } else {
        match app.video.phase {
            VideoPhase::Idle => ("READY", TEXT_MUTED),
            VideoPhase::Playing => (
                "PLAYING",
                get_pulse_color(app.animation_tick, GREEN_SUCCESS, TEXT_MUTED),
            ),
            VideoPhase::Paused => ("PAUSED", AMBER_WARNING),
            VideoPhase::Finished => ("FINISHED", LAVENDER),
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            badge,
            Style::default().fg(badge_color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center),
        layout[2],
    );

    let now = Instant::now();
    let label = format!(
        "{} / {}",
        format_duration(app.video.position(now)),
        format_optional_duration(app.video.duration),
    );
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(ROSE_PRIMARY).bg(BG_TERTIARY))
        .ratio(app.video.progress(now).clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, layout[3]);

    let hint = if app.video.missing {
        "Enter continue"
    } else {
        match app.video.phase {
            VideoPhase::Idle => "Space play",
            VideoPhase::Playing => "Space pause · Enter continue",
            VideoPhase::Paused => "Space resume · Enter continue",
            VideoPhase::Finished => "Space replay · Enter continue",
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(TEXT_MUTED),
        )))
        .alignment(Alignment::Center),
        layout[4],
    );
}

/// Render the proposal screen: avatar, the question, and the action sheet.
pub fn render_proposal(frame: &mut Frame, app: &App, area: Rect) {
    let panel = centered_rect(60, 90, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Top padding
            Constraint::Length(8), // Avatar
            Constraint::Length(1), // Gap
            Constraint::Length(1), // Question
            Constraint::Length(1), // Gap
            Constraint::Length(3), // Action sheet
            Constraint::Length(1), // Gap
            Constraint::Length(3), // Acceptance banner
            Constraint::Min(1),    // Bottom padding
        ])
        .split(panel);

    // Avatar: the first album photo, or a heart when none decoded
    let avatar_area = centered_rect(30, 100, layout[1]);
    match app.photos.first().and_then(|p| p.as_ref()) {
        Some(photo) => {
            frame.render_widget(
                Paragraph::new(photo_lines(photo, avatar_area.width, avatar_area.height))
                    .alignment(Alignment::Center),
                avatar_area,
            );
        }
        None => {
            let mut heart_lines: Vec<Line> = Vec::with_capacity(avatar_area.height as usize);
            for row in 0..avatar_area.height {
                if row == avatar_area.height / 2 {
                    heart_lines.push(Line::from(Span::styled(
                        "♥",
                        Style::default()
                            .fg(ROSE_PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    )));
                } else {
                    heart_lines.push(Line::default());
                }
            }
            frame.render_widget(
                Paragraph::new(heart_lines).alignment(Alignment::Center),
                avatar_area,
            );
        }
    }

    let question = Paragraph::new(Line::from(Span::styled(
        "Will you marry me?",
        Style::default()
            .fg(TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(question, layout[3]);

    // Action sheet: accept on the left, the graceful out on the right
    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[5]);

    let yes_block = Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(ROSE_PRIMARY))
        .style(Style::default().bg(BG_TERTIARY));
    let yes = Paragraph::new(Line::from(vec![
        Span::styled("♥ Yes", Style::default().fg(ROSE_PRIMARY).add_modifier(Modifier::BOLD)),
        Span::styled("  Enter", Style::default().fg(TEXT_MUTED)),
    ]))
    .block(yes_block)
    .alignment(Alignment::Center);
    frame.render_widget(yes, buttons[0]);

    let later_block = Block::default()
        .borders(Borders::ALL)
        .border_set(ROUNDED_BORDERS)
        .border_style(Style::default().fg(BORDER_SUBTLE))
        .style(Style::default().bg(BG_SECONDARY));
    let later = Paragraph::new(Line::from(vec![
        Span::styled("Maybe later", Style::default().fg(TEXT_SECONDARY)),
        Span::styled("  n", Style::default().fg(TEXT_MUTED)),
    ]))
    .block(later_block)
    .alignment(Alignment::Center);
    frame.render_widget(later, buttons[1]);

    if app.proposal.accepted {
        let glow = get_pulse_color(app.animation_tick, GOLD_ACCENT, ROSE_PRIMARY);
        let banner_block = Block::default()
            .borders(Borders::ALL)
            .border_set(ROUNDED_BORDERS)
            .border_style(Style::default().fg(glow))
            .style(Style::default().bg(BG_TERTIARY));
        let banner = Paragraph::new(Line::from(Span::styled(
            "♥  It's a yes  ♥",
            Style::default().fg(glow).add_modifier(Modifier::BOLD),
        )))
        .block(banner_block)
        .alignment(Alignment::Center);
        frame.render_widget(banner, layout[7]);
    }
}

fn photo_caption(app: &App, index: usize) -> String {
    app.resolved
        .photos
        .get(index)
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("photo {}", index + 1))
}
