// src/sample_data.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Display, PartialOrd, Ord)]
pub enum Column {
    A,
    B,
    C,
}

pub const COLUMN_COUNT: usize = 3;

impl Column {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Column-major table of standard normal draws, one vector per `Column`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    pub headers: Vec<String>,
    pub columns: [Vec<f64>; COLUMN_COUNT],
}

impl SampleTable {
    pub fn new(columns: [Vec<f64>; COLUMN_COUNT]) -> Self {
        debug_assert!(
            columns.iter().all(|c| c.len() == columns[0].len()),
            "columns must have equal length"
        );
        let headers = Column::iter().map(|c| c.to_string()).collect();
        SampleTable { headers, columns }
    }

    #[cfg(test)]
    pub fn empty() -> Self {
        SampleTable::new(Default::default())
    }

    pub fn num_rows(&self) -> usize {
        self.columns[0].len()
    }

    pub fn num_columns(&self) -> usize {
        COLUMN_COUNT
    }

    pub fn column(&self, column: Column) -> &[f64] {
        &self.columns[column.index()]
    }
}

pub trait DataSource {
    fn generate(&mut self, rows: usize) -> SampleTable;
}

pub struct NormalSource<R: Rng> {
    rng: R,
}

impl<R: Rng> NormalSource<R> {
    pub fn new(rng: R) -> Self {
        NormalSource { rng }
    }
}

impl<R: Rng> DataSource for NormalSource<R> {
    fn generate(&mut self, rows: usize) -> SampleTable {
        let columns = std::array::from_fn(|_| {
            (0..rows)
                .map(|_| self.rng.sample::<f64, _>(StandardNormal))
                .collect()
        });
        SampleTable::new(columns)
    }
}

pub fn get_source(seed: Option<u64>) -> Box<dyn DataSource> {
    match seed {
        Some(seed) => Box::new(NormalSource::new(StdRng::seed_from_u64(seed))),
        None => Box::new(NormalSource::new(StdRng::from_entropy())),
    }
}
