//! Donut chart, legend and tooltip rendering.
//!
//! The chart is painted on a [`Canvas`] as dense radial rays between the
//! inner and outer radius; angle 0 is at 12 o'clock and angles grow
//! clockwise, matching the geometry layer.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as Ray};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use chart_core::formatting::format_currency;
use chart_core::geometry::SliceAngles;
use chart_core::palette::ColorDomain;

use crate::themes::Theme;
use crate::transitions::RenderedSlice;

/// Donut outer radius in canvas units.
pub const OUTER_RADIUS: f64 = 1.0;
/// Donut inner radius, half the outer.
pub const INNER_RADIUS: f64 = 0.5;
/// Angular distance between adjacent fill rays, in radians.
const RAY_STEP: f64 = 0.02;
/// Width in columns of the legend/tooltip side panel.
const SIDE_PANEL_WIDTH: u16 = 28;

/// Everything the dashboard needs for one frame.
pub struct ChartViewData<'a> {
    /// Slices to paint, already interpolated for this frame.
    pub slices: &'a [RenderedSlice],
    /// Ordinal color domain over the current category names.
    pub domain: &'a ColorDomain,
    /// Id of the selected (hovered) record, if any.
    pub selected_id: Option<&'a str>,
    /// Sum of all record costs.
    pub total_cost: f64,
    /// Number of records in the list.
    pub record_count: usize,
}

// ── Public render functions ───────────────────────────────────────────────────

/// Render the full dashboard: donut chart on the left, legend and tooltip on
/// the right.
pub fn render_dashboard(frame: &mut Frame, area: Rect, data: &ChartViewData, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(SIDE_PANEL_WIDTH)])
        .split(area);

    render_chart(frame, columns[0], data, theme);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(4)])
        .split(columns[1]);

    render_legend(frame, side[0], data, theme);
    render_tooltip(frame, side[1], data, theme);
}

/// Render the placeholder shown while the collection is empty.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.chart_border)
        .title(Span::styled(" Expense Chart ", theme.header));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("no expenses yet", theme.dim)),
        Line::from(""),
        Line::from(Span::styled(
            "expense-chart add --name Food --cost 12.50",
            theme.label,
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ── Chart ─────────────────────────────────────────────────────────────────────

fn render_chart(frame: &mut Frame, area: Rect, data: &ChartViewData, theme: &Theme) {
    let summary = format!(
        " {} record{} · {} ",
        data.record_count,
        if data.record_count == 1 { "" } else { "s" },
        format_currency(data.total_cost),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.chart_border)
        .title(Span::styled(" Expense Chart ", theme.header))
        .title_bottom(Line::from(Span::styled(summary, theme.label)));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([-1.3, 1.3])
        .y_bounds([-1.3, 1.3])
        .paint(|ctx| {
            for slice in data.slices {
                let selected = data.selected_id == Some(slice.record.id.as_str());
                let color = if selected {
                    theme.highlight
                } else {
                    theme.slice_color(slice.color_index)
                };

                for ((x1, y1), (x2, y2)) in
                    wedge_rays(slice.angles, INNER_RADIUS, OUTER_RADIUS)
                {
                    ctx.draw(&Ray {
                        x1,
                        y1,
                        x2,
                        y2,
                        color,
                    });
                }
            }
        });

    frame.render_widget(canvas, area);
}

// ── Legend ────────────────────────────────────────────────────────────────────

fn render_legend(frame: &mut Frame, area: Rect, data: &ChartViewData, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.chart_border)
        .title(Span::styled(" Legend ", theme.header));

    let selected_name = data
        .selected_id
        .and_then(|id| data.slices.iter().find(|s| s.record.id == id))
        .map(|s| s.record.name.as_str());

    let max_label = area.width.saturating_sub(5) as usize;
    let lines: Vec<Line> = data
        .domain
        .names()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let label_style = if Some(name.as_str()) == selected_name {
                theme.bold
            } else {
                theme.legend_label
            };
            Line::from(vec![
                Span::styled("● ", Style::default().fg(theme.slice_color(i))),
                Span::styled(truncate_to_width(name, max_label), label_style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Tooltip ───────────────────────────────────────────────────────────────────

fn render_tooltip(frame: &mut Frame, area: Rect, data: &ChartViewData, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.chart_border)
        .title(Span::styled(" Details ", theme.header));

    let selected = data
        .selected_id
        .and_then(|id| data.slices.iter().find(|s| s.record.id == id));

    let lines = match selected {
        Some(slice) => vec![
            Line::from(vec![
                Span::styled(slice.record.name.clone(), theme.tooltip_name),
                Span::styled(" : ", theme.dim),
                Span::styled(format_currency(slice.record.cost), theme.tooltip_cost),
            ]),
            Line::from(Span::styled("[d] delete   [esc] close", theme.tooltip_hint)),
        ],
        None => vec![
            Line::from(Span::styled("←/→ select a slice", theme.tooltip_hint)),
            Line::from(Span::styled("[q] quit", theme.tooltip_hint)),
        ],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ── Geometry helpers ──────────────────────────────────────────────────────────

/// Convert a chart angle and radius to canvas coordinates.
///
/// Angle 0 points straight up and angles grow clockwise, so `x = r sin θ`
/// and `y = r cos θ`.
pub fn polar_point(angle: f64, radius: f64) -> (f64, f64) {
    (radius * angle.sin(), radius * angle.cos())
}

/// The fill rays for one wedge: radial segments from the inner to the outer
/// radius, sampled densely across the angular span. A zero-width slice has
/// no rays.
pub fn wedge_rays(
    angles: SliceAngles,
    inner: f64,
    outer: f64,
) -> Vec<((f64, f64), (f64, f64))> {
    let span = angles.span();
    if span <= 0.0 {
        return Vec::new();
    }

    let steps = ((span / RAY_STEP).ceil() as usize).max(2);
    let mut rays = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let angle = angles.start + span * (i as f64 / steps as f64);
        rays.push((polar_point(angle, inner), polar_point(angle, outer)));
    }
    rays
}

/// Truncate a string to at most `max` display columns, appending `…` when
/// anything was cut. A string that fits exactly is returned untouched.
fn truncate_to_width(s: &str, max: usize) -> String {
    let total: usize = s.chars().map(|ch| ch.width().unwrap_or(0)).sum();
    if total <= max {
        return s.to_string();
    }

    let mut width = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
