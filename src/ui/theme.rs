use ratatui::style::Color;

pub const ACCENT: Color = Color::Rgb(140, 115, 200);
pub const HEADER_BG: Color = Color::Rgb(25, 25, 38);
pub const STATUS_BG: Color = Color::Rgb(30, 30, 40);
pub const SELECTED_BG: Color = Color::Rgb(50, 50, 80);
pub const SEPARATOR: Color = Color::Rgb(55, 55, 75);
pub const BORDER_COLOR: Color = Color::Rgb(70, 70, 95);
pub const ACTIVE_BORDER: Color = Color::Rgb(120, 120, 180);
pub const FILTER_COLOR: Color = Color::Cyan;
pub const DIM_TEXT: Color = Color::Rgb(100, 100, 120);
pub const LINK_COLOR: Color = Color::Rgb(110, 160, 230);

pub const FOLLOW_COLOR: Color = Color::Green;
pub const FOLLOWING_COLOR: Color = Color::Rgb(140, 140, 160);

pub const ERROR_FG: Color = Color::LightRed;
pub const WARN_FG: Color = Color::Yellow;
pub const INFO_FG: Color = Color::Rgb(140, 115, 200);

pub fn border_color(focused: bool) -> Color {
    if focused {
        ACTIVE_BORDER
    } else {
        BORDER_COLOR
    }
}
