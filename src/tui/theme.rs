// Theme for the gallery
//
// Two palettes matching the design system's dark and light tokens. The
// toast and log colours mirror the variant classes the components emit.

use canoe_ui::components::{LogLevel, ToastVariant};
use canoe_ui::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Complete theme definition with all gallery colours
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub border_type: BorderType,
    pub accent: Color,

    pub selected_bg: Color,
    pub selected_fg: Color,
    pub danger: Color,
    pub disabled: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    pub backdrop: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            muted: Color::Gray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            border_type: BorderType::Rounded,
            accent: Color::Cyan,

            selected_bg: Color::DarkGray,
            selected_fg: Color::Yellow,
            danger: Color::LightRed,
            disabled: Color::DarkGray,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Blue,

            backdrop: Color::Black,
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            muted: Color::DarkGray,
            border: Color::Gray,
            border_focused: Color::Blue,
            border_type: BorderType::Rounded,
            accent: Color::Blue,

            selected_bg: Color::LightBlue,
            selected_fg: Color::Black,
            danger: Color::Red,
            disabled: Color::Gray,

            success: Color::Green,
            warning: Color::Rgb(184, 134, 11), // Dark goldenrod
            error: Color::Red,
            info: Color::Blue,

            backdrop: Color::Gray,
        }
    }

    pub fn toast_color(&self, variant: ToastVariant) -> Color {
        match variant {
            ToastVariant::Success => self.success,
            ToastVariant::Warning => self.warning,
            ToastVariant::Error => self.error,
            ToastVariant::Info => self.info,
        }
    }

    pub fn log_style(&self, level: LogLevel) -> Style {
        match level {
            LogLevel::Error => Style::default().fg(self.error).add_modifier(Modifier::BOLD),
            LogLevel::Warn => Style::default().fg(self.warning),
            LogLevel::Info => Style::default().fg(self.fg),
            LogLevel::Debug => Style::default().fg(self.muted),
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }
}
