use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

use crate::db::repository::HabitStatus;
use crate::models::Habit;
use crate::tui::theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    habits: &[Habit],
    statuses: &[HabitStatus],
    selected: usize,
) {
    let block = Block::default()
        .title(Span::styled(" Habits ", theme::teal()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(theme::surface());

    if habits.is_empty() {
        let hint = List::new(vec![ListItem::new(Line::from(Span::styled(
            "  No habits yet — add one with `stride add`",
            theme::dim(),
        )))])
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = habits
        .iter()
        .zip(statuses)
        .enumerate()
        .map(|(i, (habit, status))| {
            let is_selected = i == selected;

            let (icon, icon_style) = if status.today_done {
                ("●", theme::green())
            } else {
                ("○", theme::dim())
            };

            let name_style = if is_selected {
                theme::teal().add_modifier(Modifier::BOLD)
            } else {
                theme::bold()
            };

            let verdict = if status.progress.passed {
                Span::styled("pass", theme::green())
            } else {
                Span::styled("fail", theme::red())
            };

            let line = Line::from(vec![
                Span::styled(format!("  {} ", icon), icon_style),
                Span::styled(format!("{:<18}", habit.name), name_style),
                Span::styled(format!("{:<8}", habit.cadence.as_str()), theme::dim()),
                Span::styled(format!("{:>3}%  ", status.progress.percent), theme::dim()),
                verdict,
                Span::styled(format!("  streak {}", status.streak), theme::amber()),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
