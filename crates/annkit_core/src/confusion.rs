/// Confusion-matrix tally with a human-readable printer.
///
/// Rows are predictions, columns are actuals; `update` bumps one cell per
/// observation. The `Display` impl renders an accuracy summary line, a padded
/// header and one padded row per prediction label.
use core::fmt;

use crate::{AnnkitError, Result};

const DEFAULT_PADDING: usize = 12;

#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    padding: usize,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    table: Vec<Vec<u64>>,
}

impl ConfusionMatrix {
    pub fn new<S: Into<String>>(row_labels: Vec<S>, col_labels: Vec<S>) -> Self {
        Self::with_padding(row_labels, col_labels, DEFAULT_PADDING)
    }

    /// `padding` is the printed column width.
    pub fn with_padding<S: Into<String>>(
        row_labels: Vec<S>,
        col_labels: Vec<S>,
        padding: usize,
    ) -> Self {
        let row_labels: Vec<String> = row_labels.into_iter().map(Into::into).collect();
        let col_labels: Vec<String> = col_labels.into_iter().map(Into::into).collect();
        let table = vec![vec![0u64; col_labels.len()]; row_labels.len()];
        ConfusionMatrix {
            padding,
            row_labels,
            col_labels,
            table,
        }
    }

    /// Count one observation: predicted class `prediction`, true class
    /// `actual` (both label indices).
    pub fn update(&mut self, prediction: usize, actual: usize) -> Result<()> {
        if prediction >= self.row_labels.len() {
            return Err(AnnkitError::LabelOutOfRange {
                index: prediction,
                len: self.row_labels.len(),
            });
        }
        if actual >= self.col_labels.len() {
            return Err(AnnkitError::LabelOutOfRange {
                index: actual,
                len: self.col_labels.len(),
            });
        }
        self.table[prediction][actual] += 1;
        Ok(())
    }

    /// Total number of observations counted.
    pub fn total(&self) -> u64 {
        self.table.iter().map(|row| row.iter().sum::<u64>()).sum()
    }

    /// Observations on the main diagonal, i.e. correct predictions.
    pub fn diagonal(&self) -> u64 {
        self.table
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.get(i))
            .sum()
    }

    /// Fraction of correct predictions; `0.0` for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.diagonal() as f64 / total as f64
        }
    }

    pub fn count(&self, prediction: usize, actual: usize) -> Option<u64> {
        self.table.get(prediction)?.get(actual).copied()
    }

    fn header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w = self.padding;
        write!(f, "{:^w$}|", "")?;
        for label in &self.col_labels {
            write!(f, "{label:^w$}|")?;
        }
        writeln!(f)
    }

    fn data_row(&self, f: &mut fmt::Formatter<'_>, i: usize) -> fmt::Result {
        let w = self.padding;
        write!(f, "{:^w$}|", self.row_labels[i])?;
        for value in &self.table[i] {
            write!(f, "{value:^w$}|")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "accuracy: {:.2}, right: {}, total: {}",
            self.accuracy(),
            self.diagonal(),
            self.total()
        )?;
        self.header(f)?;
        for i in 0..self.row_labels.len() {
            self.data_row(f, i)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_class() -> ConfusionMatrix {
        ConfusionMatrix::new(vec!["spike", "silent"], vec!["spike", "silent"])
    }

    #[test]
    fn test_counts_and_totals() {
        let mut cm = two_class();
        cm.update(0, 0).unwrap();
        cm.update(0, 0).unwrap();
        cm.update(0, 1).unwrap();
        cm.update(1, 1).unwrap();

        assert_eq!(cm.total(), 4);
        assert_eq!(cm.diagonal(), 3);
        assert_eq!(cm.count(0, 1), Some(1));
        assert!((cm.accuracy() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_empty_matrix_accuracy_is_zero() {
        let cm = two_class();
        assert_eq!(cm.accuracy(), 0.0);
    }

    #[test]
    fn test_out_of_range_indices_rejected() {
        let mut cm = two_class();
        assert_eq!(
            cm.update(2, 0),
            Err(AnnkitError::LabelOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            cm.update(0, 5),
            Err(AnnkitError::LabelOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(cm.total(), 0);
    }

    #[test]
    fn test_display_layout() {
        let mut cm = ConfusionMatrix::with_padding(vec!["a", "b"], vec!["a", "b"], 5);
        cm.update(0, 0).unwrap();
        cm.update(1, 0).unwrap();

        let rendered = cm.to_string();
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("accuracy: 0.50, right: 1, total: 2"));
        assert_eq!(lines.next(), Some("     |  a  |  b  |"));
        assert_eq!(lines.next(), Some("  a  |  1  |  0  |"));
        assert_eq!(lines.next(), Some("  b  |  1  |  0  |"));
    }

    #[test]
    fn test_rectangular_matrix() {
        let mut cm = ConfusionMatrix::new(vec!["p0", "p1", "p2"], vec!["a0", "a1"]);
        cm.update(2, 1).unwrap();
        assert_eq!(cm.total(), 1);
        // Diagonal only covers the square prefix.
        assert_eq!(cm.diagonal(), 0);
    }
}
