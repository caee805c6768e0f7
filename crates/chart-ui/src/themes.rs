use chart_core::palette::PALETTE_SIZE;
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// The 12-color categorical slice palette used by the dark and light themes.
///
/// RGB values of the Set3 scheme, one color per ordinal domain index.
const SET3: [Color; PALETTE_SIZE] = [
    Color::Rgb(141, 211, 199),
    Color::Rgb(255, 255, 179),
    Color::Rgb(190, 186, 218),
    Color::Rgb(251, 128, 114),
    Color::Rgb(128, 177, 211),
    Color::Rgb(253, 180, 98),
    Color::Rgb(179, 222, 105),
    Color::Rgb(252, 205, 229),
    Color::Rgb(217, 217, 217),
    Color::Rgb(188, 128, 189),
    Color::Rgb(204, 235, 197),
    Color::Rgb(255, 237, 111),
];

/// ANSI-only palette for the classic theme, for terminals without RGB.
const ANSI_CYCLE: [Color; PALETTE_SIZE] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Red,
    Color::Blue,
    Color::Green,
    Color::LightCyan,
    Color::LightYellow,
    Color::LightMagenta,
    Color::LightRed,
    Color::LightBlue,
    Color::LightGreen,
];

/// Complete theme definition carrying all UI styles used by chart-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub warning: Style,
    pub error: Style,

    // ── Chart ────────────────────────────────────────────────────────────────
    /// Ordinal slice colors, indexed by the color-domain position.
    pub slice_palette: [Color; PALETTE_SIZE],
    /// Fill color of the selected (hovered) slice.
    pub highlight: Color,
    /// Border of the chart and tooltip blocks.
    pub chart_border: Style,

    // ── Legend / tooltip ─────────────────────────────────────────────────────
    pub legend_label: Style,
    pub tooltip_name: Style,
    pub tooltip_cost: Style,
    pub tooltip_hint: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            slice_palette: SET3,
            highlight: Color::White,
            chart_border: Style::default().fg(Color::DarkGray),

            legend_label: Style::default().fg(Color::White),
            tooltip_name: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            tooltip_cost: Style::default().fg(Color::Yellow),
            tooltip_hint: Style::default().fg(Color::DarkGray),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark text colors and a black highlight so the selected slice
    /// stays visible against a white terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            slice_palette: SET3,
            highlight: Color::Black,
            chart_border: Style::default().fg(Color::Gray),

            legend_label: Style::default().fg(Color::Black),
            tooltip_name: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            tooltip_cost: Style::default().fg(Color::Blue),
            tooltip_hint: Style::default().fg(Color::Gray),
        }
    }

    /// Classic terminal theme using only the basic ANSI palette.
    ///
    /// Avoids bold modifiers and RGB colors to maximise compatibility with
    /// minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            slice_palette: ANSI_CYCLE,
            highlight: Color::White,
            chart_border: Style::default().fg(Color::DarkGray),

            legend_label: Style::default().fg(Color::White),
            tooltip_name: Style::default().fg(Color::White),
            tooltip_cost: Style::default().fg(Color::Yellow),
            tooltip_hint: Style::default().fg(Color::DarkGray),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Slice color for an ordinal domain index (wraps past the palette end).
    pub fn slice_color(&self, index: usize) -> Color {
        self.slice_palette[index % PALETTE_SIZE]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
