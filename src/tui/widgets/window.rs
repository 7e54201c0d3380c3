use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::db::repository::HabitStatus;
use crate::models::Habit;
use crate::tui::theme;
use crate::utils::format::{anchor_label, progress_bar};

/// Window panel for the selected habit: one line per anchor plus the
/// grading verdict.
pub fn render(frame: &mut Frame, area: Rect, habit: Option<(&Habit, &HabitStatus)>) {
    let block = Block::default()
        .title(Span::styled(" Window ", theme::teal()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let Some((habit, status)) = habit else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "  Select a habit",
            theme::dim(),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("  {} ", habit.name), theme::bold()),
            Span::styled(
                format!("({}, {})", habit.cadence.as_str(), habit.strategy.as_str()),
                theme::dim(),
            ),
        ]),
        Line::from(""),
    ];

    for mark in &status.marks {
        let (icon, style) = if mark.done {
            ("●", theme::green())
        } else {
            ("○", theme::dim())
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {}  ", icon), style),
            Span::styled(anchor_label(habit.cadence, mark.anchor), theme::dim()),
        ]));
    }

    let p = &status.progress;
    let bar = progress_bar(p.done_count, p.total, 12);
    let verdict_style = if p.passed { theme::green() } else { theme::red() };

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("  {}", bar), verdict_style),
        Span::styled(
            format!("  {}/{} ({}%)", p.done_count, p.total, p.percent),
            verdict_style.add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        format!(
            "  {}  ·  streak {}",
            if p.passed { "passing" } else { "not passing" },
            status.streak
        ),
        theme::dim(),
    )));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
