use crate::constraint_system::{AssignmentTable, ColumnType, Expression, Var};
use crate::errors::{BlueprintError, Result};
use crate::layout::CellPosition;
use blueprint_algebra::prelude::*;

/// A fixed map of named cells laid out row-major from the component origin.
///
/// A single gate anchored at the first row reads cells of later rows through
/// positive rotations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLayout {
    origin: CellPosition,
    cells: usize,
}

pub(crate) fn physical_column(witness: &[usize], column: usize) -> Result<usize> {
    witness
        .get(column)
        .copied()
        .ok_or(BlueprintError::ColumnOutOfRange {
            column_type: ColumnType::Witness,
            column,
        })
}

impl BlockLayout {
    /// A block of `cells` cells over `width` columns.
    pub fn new(width: usize, cells: usize) -> Result<Self> {
        Ok(Self {
            origin: CellPosition::new(0, 0, width)?,
            cells,
        })
    }

    /// The number of rows the block spans.
    pub fn rows(&self) -> usize {
        ceil_div(self.cells, self.origin.width()).max(1)
    }

    /// The position of cell `index` relative to the origin.
    pub fn position(&self, index: usize) -> CellPosition {
        self.origin + index
    }

    /// The cell as seen by the gate anchored at the first row.
    pub fn rel(&self, witness: &[usize], index: usize) -> Result<Var> {
        let p = self.position(index);
        let rotation = i32::try_from(p.row).map_err(|_| BlueprintError::RowOutOfRange(p.row as i64))?;
        Ok(Var::witness_rel(physical_column(witness, p.column)?, rotation))
    }

    /// The cell as a gate expression.
    pub fn expr<F: Scalar>(&self, witness: &[usize], index: usize) -> Result<Expression<F>> {
        Ok(Expression::var(self.rel(witness, index)?))
    }

    /// The absolute cell for a block placed at `start_row`.
    pub fn var(&self, witness: &[usize], start_row: usize, index: usize) -> Result<Var> {
        let p = self.position(index);
        Var::witness(physical_column(witness, p.column)?, start_row + p.row)
    }

    /// Write the cells `0..values.len()` of a block placed at `start_row`.
    pub fn assign<F: Scalar>(
        &self,
        table: &mut AssignmentTable<F>,
        witness: &[usize],
        start_row: usize,
        values: &[F],
    ) -> Result<Vec<Var>> {
        if values.len() > self.cells {
            return Err(BlueprintError::InvalidInput {
                expected: self.cells,
                got: values.len(),
            });
        }
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let var = self.var(witness, start_row, i)?;
                table.assign_witness(var.index, var.row()?, *v)
            })
            .collect()
    }
}
