// src/dashboard.rs

use crate::sample_data::{DataSource, SampleTable};

pub const SLIDER_MIN: usize = 0;
pub const SLIDER_MAX: usize = 100;
pub const SLIDER_DEFAULT: usize = 50;

pub const TITLE: &str = "Simple Dashboard App";
pub const SIDEBAR_HEADER: &str = "Parameter Settings";
pub const SLIDER_LABEL: &str = "Select a value";
pub const MAIN_HEADER: &str = "Sample Data";
pub const TABLE_SUBHEADER: &str = "Data Table";
pub const LINE_SUBHEADER: &str = "Line Chart";
pub const AREA_SUBHEADER: &str = "Area Chart";
pub const BUTTON_LABEL: &str = "Generate new data";

/// Bounded integer input. Every write is clamped to `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    pub min: usize,
    pub max: usize,
    value: usize,
}

impl Slider {
    pub fn new(min: usize, max: usize, value: usize) -> Self {
        Slider {
            min,
            max,
            value: value.clamp(min, max),
        }
    }

    pub fn value(&self) -> usize {
        self.value
    }

    /// Returns true if the value changed.
    pub fn set(&mut self, value: usize) -> bool {
        let clamped = value.clamp(self.min, self.max);
        let changed = clamped != self.value;
        self.value = clamped;
        changed
    }

    pub fn step(&mut self, delta: isize) -> bool {
        let target = if delta.is_negative() {
            self.value.saturating_sub(delta.unsigned_abs())
        } else {
            self.value.saturating_add(delta as usize)
        };
        self.set(target)
    }

    pub fn ratio(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0 {
            return 0.0;
        }
        (self.value - self.min) as f64 / span as f64
    }
}

impl Default for Slider {
    fn default() -> Self {
        Slider::new(SLIDER_MIN, SLIDER_MAX, SLIDER_DEFAULT)
    }
}

/// Everything one render pass displays.
#[derive(Debug, Clone)]
pub struct Page {
    pub title: &'static str,
    pub sidebar_header: &'static str,
    pub slider_label: &'static str,
    pub slider: Slider,
    pub header: &'static str,
    pub echo: String,
    pub table_subheader: &'static str,
    pub line_subheader: &'static str,
    pub area_subheader: &'static str,
    pub table: SampleTable,
    pub button_label: &'static str,
}

pub fn echo_text(value: usize) -> String {
    format!("Selected value: {}", value)
}

/// One full pass: read the slider, draw a fresh table, lay out the page.
pub fn render(slider: Slider, source: &mut dyn DataSource) -> Page {
    let rows = slider.value();
    let table = source.generate(rows);

    Page {
        title: TITLE,
        sidebar_header: SIDEBAR_HEADER,
        slider_label: SLIDER_LABEL,
        slider,
        header: MAIN_HEADER,
        echo: echo_text(rows),
        table_subheader: TABLE_SUBHEADER,
        line_subheader: LINE_SUBHEADER,
        area_subheader: AREA_SUBHEADER,
        table,
        button_label: BUTTON_LABEL,
    }
}
