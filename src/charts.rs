// src/charts.rs

use ratatui::{
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition},
};
use strum::IntoEnumIterator;

use crate::sample_data::{Column, SampleTable};

pub type Points = Vec<(f64, f64)>;

const Y_PADDING: f64 = 0.1;
const DEFAULT_Y_BOUNDS: [f64; 2] = [-1.0, 1.0];
const MIN_FILL_DENSITY: usize = 120;

pub fn column_color(column: Column) -> Color {
    match column {
        Column::A => Color::Cyan,
        Column::B => Color::Magenta,
        Column::C => Color::Yellow,
    }
}

/// One `(row index, value)` series per column.
pub fn line_series(table: &SampleTable) -> Vec<(Column, Points)> {
    Column::iter()
        .map(|column| {
            let points = table
                .column(column)
                .iter()
                .enumerate()
                .map(|(i, &v)| (i as f64, v))
                .collect();
            (column, points)
        })
        .collect()
}

/// Vertical span one column covers in the stacked area chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub column: Column,
    pub lower: Points,
    pub upper: Points,
}

impl Band {
    pub fn densify(&self, density: usize) -> Band {
        Band {
            column: self.column,
            lower: interpolate_fill(&self.lower, density),
            upper: interpolate_fill(&self.upper, density),
        }
    }

    /// Serpentine path through the band: up at one x, down at the next. Drawn
    /// as a line at fill density it paints the band and nothing outside it.
    pub fn outline(&self) -> Points {
        let mut path = Vec::with_capacity(self.lower.len() * 2);
        for (i, (&(x, lo), &(_, hi))) in self.lower.iter().zip(self.upper.iter()).enumerate() {
            if i % 2 == 0 {
                path.push((x, lo));
                path.push((x, hi));
            } else {
                path.push((x, hi));
                path.push((x, lo));
            }
        }
        path
    }
}

/// Positive values stack upward from 0 and negative values downward, so the
/// bands of different columns never overlap within a row.
pub fn stacked_bands(table: &SampleTable) -> Vec<Band> {
    let rows = table.num_rows();
    let mut positive = vec![0.0; rows];
    let mut negative = vec![0.0; rows];
    Column::iter()
        .map(|column| {
            let mut lower = Vec::with_capacity(rows);
            let mut upper = Vec::with_capacity(rows);
            for (i, &v) in table.column(column).iter().enumerate() {
                let x = i as f64;
                if v >= 0.0 {
                    lower.push((x, positive[i]));
                    positive[i] += v;
                    upper.push((x, positive[i]));
                } else {
                    upper.push((x, negative[i]));
                    negative[i] += v;
                    lower.push((x, negative[i]));
                }
            }
            Band { column, lower, upper }
        })
        .collect()
}

/// Resamples a series at `density` evenly spaced x positions by linear
/// interpolation, so band fills leave no gaps between sparse points.
pub fn interpolate_fill(points: &[(f64, f64)], density: usize) -> Points {
    if points.len() < 2 || density < 2 {
        return points.to_vec();
    }
    let x_min = points[0].0;
    let x_max = points[points.len() - 1].0;
    let step = (x_max - x_min) / (density - 1) as f64;

    let mut out = Vec::with_capacity(density);
    let mut seg = 0;
    for i in 0..density {
        let x = x_min + step * i as f64;
        while seg + 2 < points.len() && points[seg + 1].0 < x {
            seg += 1;
        }
        let (x0, y0) = points[seg];
        let (x1, y1) = points[seg + 1];
        let t = if x1 > x0 { ((x - x0) / (x1 - x0)).clamp(0.0, 1.0) } else { 0.0 };
        out.push((x, y0 + (y1 - y0) * t));
    }
    out
}

pub fn x_bounds(rows: usize) -> [f64; 2] {
    [0.0, rows.saturating_sub(1).max(1) as f64]
}

pub fn y_bounds(series: &[(Column, Points)], include_zero: bool) -> [f64; 2] {
    let values = series.iter().flat_map(|(_, pts)| pts.iter().map(|&(_, y)| y));
    value_bounds(values, include_zero)
}

pub fn band_y_bounds(bands: &[Band]) -> [f64; 2] {
    let values = bands
        .iter()
        .flat_map(|b| b.lower.iter().chain(b.upper.iter()).map(|&(_, y)| y));
    value_bounds(values, true)
}

fn value_bounds(values: impl Iterator<Item = f64>, include_zero: bool) -> [f64; 2] {
    let (mut lo, mut hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return DEFAULT_Y_BOUNDS;
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if hi - lo < f64::EPSILON {
        return [lo + DEFAULT_Y_BOUNDS[0], hi + DEFAULT_Y_BOUNDS[1]];
    }
    let pad = (hi - lo) * Y_PADDING;
    [lo - pad, hi + pad]
}

fn axis_labels(bounds: [f64; 2], precision: usize) -> Vec<Span<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| Span::styled(format!("{:.*}", precision, v), Style::default().fg(Color::DarkGray)))
        .collect()
}

fn chart_block(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title)
}

pub fn line_chart<'a>(title: &'a str, rows: usize, series: &'a [(Column, Points)]) -> Chart<'a> {
    let datasets = series
        .iter()
        .map(|(column, points)| {
            Dataset::default()
                .name(column.to_string())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(column_color(*column)))
                .data(points)
        })
        .collect();

    let x = x_bounds(rows);
    let y = y_bounds(series, false);
    Chart::new(datasets)
        .block(chart_block(title))
        .legend_position(Some(LegendPosition::TopRight))
        .x_axis(Axis::default().bounds(x).labels(axis_labels(x, 0)))
        .y_axis(Axis::default().bounds(y).labels(axis_labels(y, 1)))
}

/// `bands` give the bounds, `outlines` the densified band paths to paint.
pub fn area_chart<'a>(
    title: &'a str,
    rows: usize,
    bands: &[Band],
    outlines: &'a [(Column, Points)],
) -> Chart<'a> {
    let datasets = outlines
        .iter()
        .map(|(column, points)| {
            Dataset::default()
                .name(column.to_string())
                .marker(Marker::HalfBlock)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(column_color(*column)))
                .data(points)
        })
        .collect();

    let x = x_bounds(rows);
    let y = band_y_bounds(bands);
    Chart::new(datasets)
        .block(chart_block(title))
        .legend_position(Some(LegendPosition::TopRight))
        .x_axis(Axis::default().bounds(x).labels(axis_labels(x, 0)))
        .y_axis(Axis::default().bounds(y).labels(axis_labels(y, 1)))
}

pub fn area_outlines(bands: &[Band], density: usize) -> Vec<(Column, Points)> {
    bands
        .iter()
        .map(|band| (band.column, band.densify(density).outline()))
        .collect()
}

pub fn fill_density(chart_width: u16) -> usize {
    (usize::from(chart_width.saturating_sub(8)) * 3).max(MIN_FILL_DENSITY)
}
