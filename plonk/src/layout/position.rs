use crate::errors::{BlueprintError, Result};
use ark_std::ops::{Add, AddAssign};

/// A cursor over the cells of a table of fixed width, in row-major order.
///
/// Stepping past the last column wraps to column 0 of the next row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellPosition {
    /// the row.
    pub row: usize,
    /// the column.
    pub column: usize,
    width: usize,
}

impl CellPosition {
    /// Create a position, checking the column against the width.
    pub fn new(row: usize, column: usize, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(BlueprintError::InvalidConfiguration {
                parameter: "width",
                reason: "must be positive".to_string(),
            });
        }
        if column >= width {
            return Err(BlueprintError::InvalidConfiguration {
                parameter: "column",
                reason: format!("{} is not below the width {}", column, width),
            });
        }
        Ok(Self { row, column, width })
    }

    /// The position of the `index`-th cell counted from `(start_row, start_column)`.
    pub fn at(start_row: usize, start_column: usize, width: usize, index: usize) -> Result<Self> {
        Ok(Self::new(start_row, start_column, width)? + index)
    }

    /// The row width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The row-major index of the cell.
    pub fn linear_index(&self) -> usize {
        self.row * self.width + self.column
    }

    /// Step to the next cell.
    pub fn advance(&mut self) {
        *self += 1;
    }

    /// Step to the previous cell.
    pub fn retreat(&mut self) -> Result<()> {
        if self.column > 0 {
            self.column -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.column = self.width - 1;
        } else {
            return Err(BlueprintError::RowOutOfRange(-1));
        }
        Ok(())
    }

    /// The cells left in the current row, including this one.
    pub fn remaining_in_row(&self) -> usize {
        self.width - self.column
    }

    /// Move to column 0 of the next row, unless already at a row origin.
    pub fn skip_to_next_row(&mut self) {
        if self.column != 0 {
            self.row += 1;
            self.column = 0;
        }
    }
}

impl AddAssign<usize> for CellPosition {
    fn add_assign(&mut self, k: usize) {
        let column = self.column + k;
        self.row += column / self.width;
        self.column = column % self.width;
    }
}

impl Add<usize> for CellPosition {
    type Output = CellPosition;

    fn add(mut self, k: usize) -> Self::Output {
        self += k;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_bad_shapes() {
        assert!(CellPosition::new(0, 0, 0).is_err());
        assert!(CellPosition::new(0, 3, 3).is_err());
        assert!(CellPosition::new(4, 2, 3).is_ok());
    }

    #[test]
    fn stepping_matches_jumping() {
        for width in 1..6 {
            let origin = CellPosition::new(2, 0, width).unwrap();
            let mut cursor = origin;
            for k in 0..4 * width + 3 {
                assert_eq!(cursor, origin + k);
                assert_eq!(cursor.linear_index(), origin.linear_index() + k);
                assert!(cursor.column < width);
                cursor.advance();
            }
        }
    }

    #[test]
    fn wraps_to_next_row() {
        let mut p = CellPosition::new(0, 3, 5).unwrap();
        p += 2;
        assert_eq!((p.row, p.column), (1, 0));
        p += 11;
        assert_eq!((p.row, p.column), (3, 1));
        assert_eq!(p.remaining_in_row(), 4);

        let q = CellPosition::at(1, 2, 4, 6).unwrap();
        assert_eq!((q.row, q.column), (3, 0));
    }

    #[test]
    fn retreat_inverts_advance() {
        let mut p = CellPosition::new(0, 0, 3).unwrap();
        assert_eq!(p.retreat(), Err(BlueprintError::RowOutOfRange(-1)));
        for _ in 0..7 {
            p.advance();
        }
        for _ in 0..7 {
            p.retreat().unwrap();
        }
        assert_eq!(p, CellPosition::new(0, 0, 3).unwrap());
    }

    #[test]
    fn skip_keeps_row_origins() {
        let mut p = CellPosition::new(2, 0, 4).unwrap();
        p.skip_to_next_row();
        assert_eq!((p.row, p.column), (2, 0));
        p.advance();
        p.skip_to_next_row();
        assert_eq!((p.row, p.column), (3, 0));
    }
}
