// src/virtual_table.rs

use crate::sample_data::SampleTable;

pub const INDEX_HEADER: &str = "";
const CELL_PRECISION: usize = 6;
const CELL_PADDING: u16 = 2;

/// Display-ready copy of a `SampleTable`: a leading row-index column followed
/// by one formatted column per data column.
pub struct VirtualTable {
    pub headers: Vec<String>,
    pub columns: Vec<Vec<String>>,
}

impl VirtualTable {
    pub fn new(data: &SampleTable) -> Self {
        let mut headers = Vec::with_capacity(data.num_columns() + 1);
        headers.push(INDEX_HEADER.to_string());
        headers.extend(data.headers.iter().cloned());

        let mut columns = Vec::with_capacity(data.num_columns() + 1);
        columns.push((0..data.num_rows()).map(|i| i.to_string()).collect());
        columns.extend(data.columns.iter().map(|col| {
            col.iter()
                .map(|v| format!("{:.*}", CELL_PRECISION, v))
                .collect::<Vec<String>>()
        }));

        VirtualTable { headers, columns }
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn row(&self, index: usize) -> Vec<&str> {
        self.columns.iter().map(|col| col[index].as_str()).collect()
    }

    pub fn column_width(&self, index: usize) -> u16 {
        let header = self.headers[index].chars().count();
        let content = self.columns[index]
            .iter()
            .map(|cell| cell.chars().count())
            .max()
            .unwrap_or(0);
        header.max(content).max(1) as u16 + CELL_PADDING
    }

    pub fn column_widths(&self) -> Vec<u16> {
        (0..self.headers.len()).map(|i| self.column_width(i)).collect()
    }
}
