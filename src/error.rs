// src/error.rs

use thiserror::Error;

use crate::dashboard::{SLIDER_MAX, SLIDER_MIN};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Row count {value} is outside the slider range {min}..={max}", min = SLIDER_MIN, max = SLIDER_MAX)]
    InvalidRowCount { value: usize },

    #[error("Tick rate must be greater than zero")]
    InvalidTickRate,
}
