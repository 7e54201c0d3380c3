use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(14, 17, 18);
pub const SURFACE: Color = Color::Rgb(22, 27, 28);
pub const BORDER: Color = Color::Rgb(42, 54, 55);
pub const TEXT: Color = Color::Rgb(208, 222, 218);
pub const TEXT_DIM: Color = Color::Rgb(104, 124, 120);
pub const TEAL: Color = Color::Rgb(78, 154, 150);
pub const GREEN: Color = Color::Rgb(96, 158, 102);
pub const AMBER: Color = Color::Rgb(206, 148, 72);
pub const RED: Color = Color::Rgb(182, 88, 74);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn teal() -> Style {
    Style::default().fg(TEAL)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border(focused: bool) -> Style {
    if focused {
        teal()
    } else {
        Style::default().fg(BORDER)
    }
}
