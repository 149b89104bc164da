use crate::constraint_system::{ColumnType, Var};
use crate::errors::{BlueprintError, Result};
use blueprint_algebra::prelude::*;

/// The table of values a circuit is checked against.
///
/// Columns are stored column-major and grow on demand; unassigned cells read
/// as zero. Witness and constant cells are write-once.
#[derive(Clone, Debug, Default)]
pub struct AssignmentTable<F> {
    witness: Vec<Vec<Option<F>>>,
    public_input: Vec<Vec<Option<F>>>,
    constant: Vec<Vec<Option<F>>>,
    selector: Vec<Vec<bool>>,
}

fn read<F: Scalar>(columns: &[Vec<Option<F>>], column_type: ColumnType, var: &Var, row: usize) -> Result<F> {
    let column = columns
        .get(var.index)
        .ok_or(BlueprintError::ColumnOutOfRange {
            column_type,
            column: var.index,
        })?;
    Ok(column.get(row).copied().flatten().unwrap_or_else(F::zero))
}

fn write_once<F: Scalar>(
    columns: &mut [Vec<Option<F>>],
    column_type: ColumnType,
    column: usize,
    row: usize,
    value: F,
) -> Result<()> {
    let cells = columns
        .get_mut(column)
        .ok_or(BlueprintError::ColumnOutOfRange {
            column_type,
            column,
        })?;
    if cells.len() <= row {
        cells.resize(row + 1, None);
    }
    if cells[row].is_some() {
        return Err(BlueprintError::OverlappingAllocation {
            column_type,
            column,
            row,
        });
    }
    cells[row] = Some(value);
    Ok(())
}

impl<F: Scalar> AssignmentTable<F> {
    /// Create a table with the given number of columns of each kind.
    pub fn new(witness_amount: usize, public_input_amount: usize, constant_amount: usize) -> Self {
        Self {
            witness: vec![vec![]; witness_amount],
            public_input: vec![vec![]; public_input_amount],
            constant: vec![vec![]; constant_amount],
            selector: vec![],
        }
    }

    /// The number of witness columns.
    pub fn witness_amount(&self) -> usize {
        self.witness.len()
    }

    /// The number of public input columns.
    pub fn public_input_amount(&self) -> usize {
        self.public_input.len()
    }

    /// The number of constant columns.
    pub fn constant_amount(&self) -> usize {
        self.constant.len()
    }

    /// The number of rows touched by any column.
    pub fn rows_amount(&self) -> usize {
        let cells = self
            .witness
            .iter()
            .chain(self.public_input.iter())
            .chain(self.constant.iter())
            .map(|c| c.len());
        let selectors = self.selector.iter().map(|c| c.len());
        cells.chain(selectors).max().unwrap_or(0)
    }

    /// Write a witness cell.
    pub fn assign_witness(&mut self, column: usize, row: usize, value: F) -> Result<Var> {
        let var = Var::witness(column, row)?;
        write_once(&mut self.witness, ColumnType::Witness, column, row, value)?;
        Ok(var)
    }

    /// Overwrite a witness cell that was assigned before.
    ///
    /// Used to build deliberately invalid tables.
    pub fn replace_witness(&mut self, column: usize, row: usize, value: F) -> Result<()> {
        let cell = self
            .witness
            .get_mut(column)
            .and_then(|c| c.get_mut(row))
            .ok_or(BlueprintError::ColumnOutOfRange {
                column_type: ColumnType::Witness,
                column,
            })?;
        *cell = Some(value);
        Ok(())
    }

    /// Write a public input cell.
    pub fn assign_public_input(&mut self, column: usize, row: usize, value: F) -> Result<Var> {
        let var = Var::public_input(column, row)?;
        write_once(
            &mut self.public_input,
            ColumnType::PublicInput,
            column,
            row,
            value,
        )?;
        Ok(var)
    }

    /// Write a constant cell. Rewriting the value already present is allowed.
    pub fn assign_constant(&mut self, column: usize, row: usize, value: F) -> Result<Var> {
        let var = Var::constant(column, row)?;
        if let Some(Some(existing)) = self.constant.get(column).and_then(|c| c.get(row)) {
            if *existing == value {
                return Ok(var);
            }
        }
        write_once(&mut self.constant, ColumnType::Constant, column, row, value)?;
        Ok(var)
    }

    /// Enable a selector at a row.
    pub fn enable_selector(&mut self, selector: usize, row: usize) {
        if self.selector.len() <= selector {
            self.selector.resize(selector + 1, vec![]);
        }
        let column = &mut self.selector[selector];
        if column.len() <= row {
            column.resize(row + 1, false);
        }
        column[row] = true;
    }

    /// Enable a selector at every `stride`-th row of `[begin, end)`.
    pub fn enable_selector_range(&mut self, selector: usize, begin: usize, end: usize, stride: usize) {
        for row in (begin..end).step_by(stride.max(1)) {
            self.enable_selector(selector, row);
        }
    }

    /// Whether a selector is enabled at a row.
    pub fn selector(&self, selector: usize, row: usize) -> bool {
        self.selector
            .get(selector)
            .and_then(|c| c.get(row))
            .copied()
            .unwrap_or(false)
    }

    /// The rows where a selector is enabled.
    pub fn enabled_rows(&self, selector: usize) -> Vec<usize> {
        self.selector
            .get(selector)
            .map(|c| {
                c.iter()
                    .enumerate()
                    .filter_map(|(row, on)| if *on { Some(row) } else { None })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The value of a variable evaluated at `row`.
    pub fn value_at(&self, var: &Var, row: usize) -> Result<F> {
        let target = var.resolve_row(row)?;
        match var.column_type {
            ColumnType::Witness => read(&self.witness, ColumnType::Witness, var, target),
            ColumnType::PublicInput => {
                read(&self.public_input, ColumnType::PublicInput, var, target)
            }
            ColumnType::Constant => read(&self.constant, ColumnType::Constant, var, target),
            ColumnType::Selector => Ok(if self.selector(var.index, target) {
                F::one()
            } else {
                F::zero()
            }),
        }
    }

    /// The value of an absolute variable.
    pub fn value(&self, var: &Var) -> Result<F> {
        if var.relative {
            return Err(BlueprintError::UnexpectedVariable);
        }
        self.value_at(var, 0)
    }

    /// The values of absolute variables.
    pub fn values(&self, vars: &[Var]) -> Result<Vec<F>> {
        vars.iter().map(|v| self.value(v)).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use blueprint_algebra::bn254::BN254Scalar;

    type F = BN254Scalar;

    #[test]
    fn cells_are_write_once() {
        let mut table = AssignmentTable::<F>::new(2, 1, 1);
        let var = table.assign_witness(1, 3, F::from(9u32)).unwrap();
        assert_eq!(var, Var::witness(1, 3).unwrap());
        assert_eq!(table.value(&var).unwrap(), F::from(9u32));
        assert_eq!(
            table.assign_witness(1, 3, F::from(9u32)),
            Err(BlueprintError::OverlappingAllocation {
                column_type: ColumnType::Witness,
                column: 1,
                row: 3
            })
        );
        table.replace_witness(1, 3, F::from(10u32)).unwrap();
        assert_eq!(table.value(&var).unwrap(), F::from(10u32));

        // unassigned cells read as zero
        assert_eq!(table.value(&Var::witness(0, 100).unwrap()).unwrap(), F::zero());
        assert_eq!(
            table.assign_witness(2, 0, F::one()),
            Err(BlueprintError::ColumnOutOfRange {
                column_type: ColumnType::Witness,
                column: 2
            })
        );
    }

    #[test]
    fn constants_accept_equal_rewrites() {
        let mut table = AssignmentTable::<F>::new(1, 0, 1);
        table.assign_constant(0, 0, F::one()).unwrap();
        table.assign_constant(0, 0, F::one()).unwrap();
        assert!(table.assign_constant(0, 0, F::zero()).is_err());
    }

    #[test]
    fn selectors_with_stride() {
        let mut table = AssignmentTable::<F>::new(1, 0, 0);
        table.enable_selector_range(2, 1, 8, 3);
        assert_eq!(table.enabled_rows(2), vec![1, 4, 7]);
        assert!(!table.selector(0, 1));
        assert_eq!(table.rows_amount(), 8);
        assert_eq!(
            table.value_at(&Var::new(2, 0, true, ColumnType::Selector), 4).unwrap(),
            F::one()
        );
    }

    #[test]
    fn relative_reads() {
        let mut table = AssignmentTable::<F>::new(1, 0, 0);
        table.assign_witness(0, 4, F::from(5u32)).unwrap();
        let prev = Var::witness_rel(0, -1);
        assert_eq!(table.value_at(&prev, 5).unwrap(), F::from(5u32));
        assert!(table.value(&prev).is_err());
    }
}
