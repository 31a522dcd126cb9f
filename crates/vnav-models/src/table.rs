//! Bilinear lookup over a rectangular grid, forward and inverse.
//!
//! Rows are the first key (corrected N1 for the engine tables), columns the
//! second (Mach). Both axes must be strictly increasing. Inputs outside the
//! grid are rejected rather than extrapolated.

use vnav_core::{PredictionError, Result};

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
pub struct Table2D {
    pub name: &'static str,
    pub row_input: &'static str,
    pub col_input: &'static str,
    pub rows: &'static [f64],
    pub cols: &'static [f64],
    /// `values[row][col]`
    pub values: &'static [&'static [f64]],
}

impl Table2D {
    /// Both axes need two breakpoints and the grid must be `rows × cols`;
    /// anything else cannot be indexed.
    fn check_grid(&self) -> Result<()> {
        if self.rows.len() < 2 || self.cols.len() < 2 {
            return Err(PredictionError::invalid(format!(
                "{} table needs at least two breakpoints per axis ({} x {})",
                self.name,
                self.rows.len(),
                self.cols.len()
            )));
        }
        if self.values.len() != self.rows.len() || self.values.iter().any(|r| r.len() != self.cols.len()) {
            return Err(PredictionError::invalid(format!(
                "{} table values are not a {} x {} grid",
                self.name,
                self.rows.len(),
                self.cols.len()
            )));
        }
        Ok(())
    }

    fn out_of_range(&self, input: &'static str, value: f64, axis: &[f64]) -> PredictionError {
        PredictionError::TableLookupOutOfRange {
            table: self.name,
            input,
            value,
            min: axis[0],
            max: axis[axis.len() - 1],
        }
    }

    /// Index of the lower breakpoint and the fraction towards the next one.
    fn bracket(&self, axis: &'static [f64], input: &'static str, x: f64) -> Result<(usize, f64)> {
        let (min, max) = (axis[0], axis[axis.len() - 1]);
        if x.is_nan() || x < min || x > max {
            return Err(self.out_of_range(input, x, axis));
        }
        let i = axis.windows(2).position(|w| x <= w[1]).unwrap_or(axis.len() - 2);
        let t = (x - axis[i]) / (axis[i + 1] - axis[i]);
        Ok((i, t))
    }

    /// Value of row `i` at column position (`j`, `v`).
    fn along_row(&self, i: usize, j: usize, v: f64) -> f64 {
        let row = self.values[i];
        row[j] + v * (row[j + 1] - row[j])
    }

    pub fn interpolate(&self, row_key: f64, col_key: f64) -> Result<f64> {
        self.check_grid()?;
        let (i, u) = self.bracket(self.rows, self.row_input, row_key)?;
        let (j, v) = self.bracket(self.cols, self.col_input, col_key)?;
        let lo = self.along_row(i, j, v);
        let hi = self.along_row(i + 1, j, v);
        Ok(lo + u * (hi - lo))
    }

    /// Row key that produces `value` at column key `col_key`. The table must be
    /// increasing along the row axis for every column.
    pub fn reverse_interpolate(&self, col_key: f64, value: f64) -> Result<f64> {
        self.check_grid()?;
        let (j, v) = self.bracket(self.cols, self.col_input, col_key)?;
        let last = self.rows.len() - 1;
        let (min, max) = (self.along_row(0, j, v), self.along_row(last, j, v));
        if value.is_nan() || value < min || value > max {
            return Err(PredictionError::TableLookupOutOfRange {
                table: self.name,
                input: "value",
                value,
                min,
                max,
            });
        }

        let mut lo = min;
        for i in 0..last {
            let hi = self.along_row(i + 1, j, v);
            if value <= hi {
                let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.0 };
                return Ok(self.rows[i] + t * (self.rows[i + 1] - self.rows[i]));
            }
            lo = hi;
        }
        Ok(self.rows[last])
    }

    /// True when both axes are strictly increasing, the grid is rectangular and
    /// every column increases along the rows.
    pub fn is_well_formed(&self) -> bool {
        let increasing = |axis: &[f64]| axis.len() >= 2 && axis.windows(2).all(|w| w[0] < w[1]);
        increasing(self.rows)
            && increasing(self.cols)
            && self.values.len() == self.rows.len()
            && self.values.iter().all(|r| r.len() == self.cols.len())
            && (0..self.cols.len())
                .all(|j| self.values.windows(2).all(|w| w[0][j] < w[1][j]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GRID: Table2D = Table2D {
        name: "test",
        row_input: "x",
        col_input: "y",
        rows: &[0.0, 10.0, 20.0],
        cols: &[0.0, 1.0],
        values: &[&[0.0, 1.0], &[10.0, 12.0], &[20.0, 30.0]],
    };

    #[test]
    fn hits_breakpoints_exactly() {
        assert_relative_eq!(GRID.interpolate(10.0, 1.0).unwrap(), 12.0);
        assert_relative_eq!(GRID.interpolate(20.0, 0.0).unwrap(), 20.0);
        assert_relative_eq!(GRID.interpolate(0.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn bilinear_between_breakpoints() {
        // row 5 at col 0.5: halfway between 0.5 and 11.0
        assert_relative_eq!(GRID.interpolate(5.0, 0.5).unwrap(), 5.75);
    }

    #[test]
    fn reverse_recovers_row_key() {
        let y = 0.25;
        let value = GRID.interpolate(13.0, y).unwrap();
        assert_relative_eq!(GRID.reverse_interpolate(y, value).unwrap(), 13.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_outside_grid() {
        let err = GRID.interpolate(25.0, 0.5).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::TableLookupOutOfRange { input: "x", min, max, .. } if min == 0.0 && max == 20.0
        ));
        assert!(GRID.interpolate(5.0, f64::NAN).is_err());
        assert!(GRID.reverse_interpolate(0.0, 25.0).is_err());
        assert!(GRID.reverse_interpolate(1.5, 5.0).is_err());
    }

    #[test]
    fn degenerate_grids_are_errors_not_panics() {
        let single_row = Table2D { rows: &[50.0], values: &[&[0.0, 1.0]], ..GRID };
        assert!(matches!(
            single_row.interpolate(50.0, 0.5),
            Err(PredictionError::InvalidParameters { .. })
        ));
        assert!(single_row.reverse_interpolate(0.5, 0.5).is_err());

        let empty = Table2D { rows: &[], values: &[], ..GRID };
        assert!(empty.interpolate(0.0, 0.0).is_err());
        assert!(empty.reverse_interpolate(0.0, 0.0).is_err());

        let ragged = Table2D { values: &[&[0.0, 1.0], &[10.0], &[20.0, 30.0]], ..GRID };
        assert!(matches!(
            ragged.interpolate(15.0, 0.5),
            Err(PredictionError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn detects_malformed_tables() {
        assert!(GRID.is_well_formed());
        let bad = Table2D { values: &[&[0.0, 1.0], &[10.0, 0.5], &[20.0, 30.0]], ..GRID };
        assert!(!bad.is_well_formed());
    }
}
