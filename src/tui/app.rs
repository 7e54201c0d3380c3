use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;

use crate::config::AppConfig;
use crate::db::repository::{CompletionRepo, HabitRepo, HabitStatus, StatsRepo};
use crate::models::Habit;
use crate::period;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{habits, header, statusbar, window};
use crate::utils::format::window_dots;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Dashboard,
    Stats,
    Help,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub selected: usize,
    pub should_quit: bool,

    // Cached state (refreshed on action or date rollover)
    pub today: NaiveDate,
    pub habits: Vec<Habit>,
    pub statuses: Vec<HabitStatus>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        App {
            view: View::Dashboard,
            config,
            selected: 0,
            should_quit: false,
            today: Local::now().date_naive(),
            habits: Vec::new(),
            statuses: Vec::new(),
        }
    }

    pub fn load(&mut self, conn: &Connection) -> Result<()> {
        self.habits = HabitRepo::list(conn)?;
        self.statuses = self
            .habits
            .iter()
            .map(|habit| {
                StatsRepo::habit_status(
                    conn,
                    habit,
                    self.today,
                    self.config.grading.window_len(habit.cadence),
                    self.config.grading.flexible_threshold,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        if self.selected >= self.habits.len() {
            self.selected = self.habits.len().saturating_sub(1);
        }
        Ok(())
    }

    pub fn tick(&mut self, conn: &Connection) {
        // Anchors shift at midnight; reload only when the date rolls over
        let now = Local::now().date_naive();
        if now != self.today {
            self.today = now;
            let _ = self.load(conn);
        }
    }

    pub fn handle_key(&mut self, key: crossterm::event::KeyEvent, conn: &Connection) {
        // Only handle actual key presses — ignore release/repeat events from some terminals
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.view {
            View::Dashboard => self.handle_dashboard_key(key, conn),
            View::Stats => self.handle_stats_key(key),
            View::Help => self.handle_help_key(key),
        }
    }

    fn handle_dashboard_key(&mut self, key: crossterm::event::KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('s') => {
                self.view = View::Stats;
            }
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected + 1 < self.habits.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('m') => {
                self.toggle_selected(conn);
            }
            _ => {}
        }
    }

    fn handle_stats_key(&mut self, key: crossterm::event::KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('s') => {
                self.view = View::Dashboard;
            }
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: crossterm::event::KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => {
                self.view = View::Dashboard;
            }
            _ => {}
        }
    }

    fn toggle_selected(&mut self, conn: &Connection) {
        if let Some(habit) = self.habits.get(self.selected) {
            let anchor = period::anchor_for(habit.cadence, self.today);
            let _ = CompletionRepo::toggle(conn, habit.id, anchor);
            let _ = self.load(conn);
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::Stats => self.draw_stats(frame),
            View::Help => {
                self.draw_dashboard(frame);
                self.draw_help_overlay(frame);
            }
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();

        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(frame, outer_chunks[0]);
        statusbar::render(frame, outer_chunks[2]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(outer_chunks[1]);

        habits::render(frame, columns[0], &self.habits, &self.statuses, self.selected);

        let selected = self
            .habits
            .get(self.selected)
            .zip(self.statuses.get(self.selected));
        window::render(frame, columns[1], selected);
    }

    fn draw_stats(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("  Stats  ", theme::teal().add_modifier(Modifier::BOLD)),
            Span::styled("  [Esc] back", theme::dim()),
        ]));
        frame.render_widget(title, chunks[0]);

        let passing = self.statuses.iter().filter(|s| s.progress.passed).count();
        let best = self
            .habits
            .iter()
            .zip(&self.statuses)
            .max_by_key(|(_, s)| s.streak);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Habits:    ", theme::dim()),
                Span::styled(
                    format!("{} total, {} passing", self.habits.len(), passing),
                    theme::green().add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        match best {
            Some((habit, status)) if status.streak > 0 => {
                lines.push(Line::from(vec![
                    Span::styled("  Best run:  ", theme::dim()),
                    Span::styled(
                        format!("{} — {} periods", habit.name, status.streak),
                        theme::amber(),
                    ),
                ]));
            }
            _ => {
                lines.push(Line::from(vec![
                    Span::styled("  Best run:  ", theme::dim()),
                    Span::styled("none yet", theme::dim()),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Windows", theme::teal())));
        lines.push(Line::from(""));

        for (habit, status) in self.habits.iter().zip(&self.statuses) {
            let style = if status.progress.passed {
                theme::green()
            } else {
                theme::dim()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<20}", habit.name), theme::bold()),
                Span::styled(window_dots(&status.marks), style),
                Span::styled(
                    format!("  {}%", status.progress.percent),
                    theme::dim(),
                ),
            ]));
        }

        let paragraph = Paragraph::new(lines);
        frame.render_widget(paragraph, chunks[1]);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();

        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: area.height / 2,
        };

        frame.render_widget(Clear, popup_area);

        let help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::teal().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  [Enter] / Space  ", theme::teal()),
                Span::styled("Toggle today's completion", theme::dim()),
            ]),
            Line::from(vec![
                Span::styled("  [↑ ↓]            ", theme::teal()),
                Span::styled("Navigate habits", theme::dim()),
            ]),
            Line::from(vec![
                Span::styled("  [s]              ", theme::teal()),
                Span::styled("Stats view", theme::dim()),
            ]),
            Line::from(vec![
                Span::styled("  [?]              ", theme::teal()),
                Span::styled("Toggle help", theme::dim()),
            ]),
            Line::from(vec![
                Span::styled("  [Esc]            ", theme::teal()),
                Span::styled("Quit", theme::dim()),
            ]),
        ];

        let block = Block::default()
            .title(Span::styled(" Help ", theme::teal()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::teal())
            .style(theme::surface());

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig) -> Result<()> {
    let mut app = App::new(config);
    app.load(&conn)?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(500);

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        match events.next()? {
            Event::Key(key) => {
                app.handle_key(key, &conn);
                if app.should_quit {
                    break;
                }
            }
            Event::Resize => {}
            Event::Tick => {
                app.tick(&conn);
            }
        }
    }

    ratatui::restore();
    Ok(())
}
