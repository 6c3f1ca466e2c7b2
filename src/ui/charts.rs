// 📊 Chart renderers - thin wrappers over ratatui charts with preset styling
//
// Series come ready-made from `finsight::analytics`; nothing here computes.

use super::widgets::{card, Palette};
use finsight::analytics::SeriesPoint;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, BarChart, Chart, Dataset as ChartSeries, Gauge, GraphType},
    Frame,
};

/// One named line of a line chart
pub struct LineSeries {
    pub name: String,
    pub color: Color,
    pub points: Vec<(f64, f64)>,
}

impl LineSeries {
    pub fn new(name: impl Into<String>, color: Color, points: Vec<(f64, f64)>) -> Self {
        LineSeries {
            name: name.into(),
            color,
            points,
        }
    }

    /// Points at x = 0, 1, 2, ... from labelled values
    pub fn from_points(name: impl Into<String>, color: Color, points: &[SeriesPoint]) -> Self {
        let points = points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.value))
            .collect();
        Self::new(name, color, points)
    }
}

/// Padded [min, max] over every y value
fn y_bounds(lines: &[LineSeries]) -> [f64; 2] {
    let values = lines.iter().flat_map(|l| l.points.iter().map(|(_, y)| *y));
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });

    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    let pad = ((max - min) * 0.1).max(1.0);
    [min - pad, max + pad]
}

pub fn render_line_chart(
    f: &mut Frame,
    area: Rect,
    title: &str,
    lines: &[LineSeries],
    x_labels: &[String],
    palette: &Palette,
) {
    let datasets = lines
        .iter()
        .map(|line| {
            ChartSeries::default()
                .name(line.name.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(line.color))
                .data(&line.points)
        })
        .collect();

    let [low, high] = y_bounds(lines);
    let x_max = x_labels.len().saturating_sub(1).max(1) as f64;

    let chart = Chart::new(datasets)
        .block(card(title, palette))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(palette.muted))
                .bounds([0.0, x_max])
                .labels(x_labels.iter().map(|l| Span::raw(l.clone())).collect()),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(palette.muted))
                .bounds([low, high])
                .labels(vec![
                    Span::raw(format!("{:.0}", low)),
                    Span::raw(format!("{:.0}", (low + high) / 2.0)),
                    Span::raw(format!("{:.0}", high)),
                ]),
        );

    f.render_widget(chart, area);
}

pub fn render_bar_chart(
    f: &mut Frame,
    area: Rect,
    title: &str,
    points: &[SeriesPoint],
    palette: &Palette,
) {
    let data: Vec<(&str, u64)> = points
        .iter()
        .map(|p| (p.label.as_str(), p.value.max(0.0).round() as u64))
        .collect();

    let chart = BarChart::default()
        .block(card(title, palette))
        .data(data.as_slice())
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(palette.accent))
        .value_style(Style::default().fg(palette.background).bg(palette.accent))
        .label_style(Style::default().fg(palette.text));

    f.render_widget(chart, area);
}

/// Horizontal fill bar, `ratio` in [0, 1]
pub fn render_gauge(
    f: &mut Frame,
    area: Rect,
    title: &str,
    ratio: f64,
    label: String,
    color: Style,
    palette: &Palette,
) {
    let gauge = Gauge::default()
        .block(card(title, palette))
        .gauge_style(color)
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);

    f.render_widget(gauge, area);
}
