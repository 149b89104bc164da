use crate::component::check_arity;
use crate::constraint_system::{AssignmentTable, Circuit, Expression, LookupConstraint, Var};
use crate::errors::{BlueprintError, Result};
use crate::layout::block::physical_column;
use crate::layout::CellPosition;
use blueprint_algebra::prelude::*;

/// The accumulation a [`RunningLayout`] threads through its items.
///
/// Every method is generic over [`Arithmetic`], so the witness fold and the
/// gate polynomials are produced by the same code.
pub trait RunningAccumulator<F: Scalar> {
    /// The accumulator before the first item.
    fn initial<T: Arithmetic<F>>(&self, lead: &[T]) -> Vec<T>;

    /// The accumulator after an item, from the previous accumulator and the
    /// non-accumulator cells of the item.
    fn step<T: Arithmetic<F>>(&self, acc: &[T], inputs: &[T], lead: &[T]) -> Vec<T>;

    /// Extra polynomials that must vanish on every item.
    fn item_constraints<T: Arithmetic<F>>(&self, _inputs: &[T], _lead: &[T]) -> Vec<T> {
        vec![]
    }

    /// Lookups applied to every item.
    fn item_lookups(
        &self,
        _circuit: &mut Circuit<F>,
        _inputs: &[Expression<F>],
    ) -> Result<Vec<LookupConstraint<F>>> {
        Ok(vec![])
    }

    /// The number of final cells that are inputs rather than outputs.
    fn final_inputs(&self) -> usize {
        0
    }

    /// The output cells, from the last accumulator and the final inputs.
    fn finalize<T: Arithmetic<F>>(&self, acc: &[T], final_inputs: &[T], lead: &[T]) -> Vec<T>;
}

/// The shape of one row of a running layout; each distinct shape is one gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// A row of items.
    Items {
        /// whether the row starts from the initial accumulator.
        first: bool,
        /// the number of items in the row.
        count: usize,
        /// whether the final cells follow the items.
        finalize: bool,
    },
    /// A row holding only the final cells.
    Finalize {
        /// the number of items in the row above.
        prev_count: usize,
    },
}

/// Items of `item_cells` cells packed row by row after `lead` shared cells,
/// followed by `final_cells` cells.
///
/// The last `acc_width` cells of each item hold the accumulator after it. An
/// item never straddles two rows. The first item of a row carries from the
/// last item of the row above at rotation `-1`. The final cells follow the
/// last item when they fit in its row; otherwise they open an extra row.
/// Every row repeats the lead cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunningLayout {
    origin: CellPosition,
    lead: usize,
    item_cells: usize,
    acc_width: usize,
    items: usize,
    final_cells: usize,
    items_per_row: usize,
}

impl RunningLayout {
    /// Create a layout over `width` columns.
    pub fn new(
        width: usize,
        lead: usize,
        item_cells: usize,
        acc_width: usize,
        items: usize,
        final_cells: usize,
    ) -> Result<Self> {
        let origin = CellPosition::new(0, 0, width)?;
        if item_cells == 0 || acc_width > item_cells {
            return Err(BlueprintError::InvalidConfiguration {
                parameter: "item_cells",
                reason: format!("{} cells cannot hold {} accumulators", item_cells, acc_width),
            });
        }
        let items_per_row = width.saturating_sub(lead) / item_cells;
        if items_per_row == 0 {
            return Err(BlueprintError::InvalidConfiguration {
                parameter: "witness_amount",
                reason: format!(
                    "{} columns hold no item of {} cells after {} lead cells",
                    width, item_cells, lead
                ),
            });
        }
        if lead + final_cells > width {
            return Err(BlueprintError::InvalidConfiguration {
                parameter: "final_cells",
                reason: format!("{} final cells do not fit a row of {}", final_cells, width),
            });
        }
        if items == 0 && final_cells == 0 {
            return Err(BlueprintError::InvalidConfiguration {
                parameter: "items",
                reason: "an empty layout has no cells".to_string(),
            });
        }
        Ok(Self {
            origin,
            lead,
            item_cells,
            acc_width,
            items,
            final_cells,
            items_per_row,
        })
    }

    /// The number of items that fit in a row.
    pub fn items_per_row(&self) -> usize {
        self.items_per_row
    }

    /// The number of rows holding items.
    pub fn item_rows(&self) -> usize {
        ceil_div(self.items, self.items_per_row)
    }

    /// The position of the first cell of item `i`, relative to the origin.
    pub fn item_position(&self, i: usize) -> CellPosition {
        let row = i / self.items_per_row;
        let offset = self.lead + (i % self.items_per_row) * self.item_cells;
        self.origin + (row * self.origin.width() + offset)
    }

    /// The position of the first final cell, relative to the origin.
    pub fn final_position(&self) -> Option<CellPosition> {
        if self.final_cells == 0 {
            return None;
        }
        if self.items == 0 {
            return Some(self.origin + self.lead);
        }
        let last = self.item_position(self.items - 1);
        let mut pos = last + self.item_cells;
        if pos.row != last.row || pos.remaining_in_row() < self.final_cells {
            pos.skip_to_next_row();
            pos += self.lead;
        }
        Some(pos)
    }

    /// Whether the final cells need a row of their own.
    pub fn extra_row(&self) -> bool {
        self.final_position()
            .map_or(false, |p| self.items > 0 && p.row >= self.item_rows())
    }

    /// The number of rows the layout spans.
    pub fn rows(&self) -> usize {
        let final_rows = self.final_position().map_or(0, |p| p.row + 1);
        self.item_rows().max(final_rows).max(1)
    }

    /// The shape of row `row`.
    pub fn row_kind(&self, row: usize) -> RowKind {
        let final_row = self.final_position().map(|p| p.row);
        let item_rows = self.item_rows();
        if row < item_rows {
            let count = if row + 1 == item_rows {
                self.items - row * self.items_per_row
            } else {
                self.items_per_row
            };
            RowKind::Items {
                first: row == 0,
                count,
                finalize: final_row == Some(row),
            }
        } else if self.items == 0 {
            RowKind::Items {
                first: true,
                count: 0,
                finalize: true,
            }
        } else {
            RowKind::Finalize {
                prev_count: self.items - (item_rows - 1) * self.items_per_row,
            }
        }
    }

    /// The shape of every row.
    pub fn row_kinds(&self) -> Vec<RowKind> {
        (0..self.rows()).map(|r| self.row_kind(r)).collect()
    }

    /// The distinct row shapes, in order of first appearance.
    pub fn distinct_kinds(&self) -> Vec<RowKind> {
        self.row_kinds().into_iter().unique().collect()
    }

    /// The number of gates the layout registers.
    pub fn gates_amount(&self) -> usize {
        self.distinct_kinds().len()
    }

    fn carry_column(&self, prev_count: usize) -> usize {
        self.lead + prev_count * self.item_cells - self.acc_width
    }

    /// The lead cell `j` of row `row`.
    pub fn lead_var(&self, witness: &[usize], start_row: usize, row: usize, j: usize) -> Result<Var> {
        Var::witness(physical_column(witness, j)?, start_row + row)
    }

    /// Cell `c` of item `i`.
    pub fn item_var(&self, witness: &[usize], start_row: usize, i: usize, c: usize) -> Result<Var> {
        let p = self.item_position(i) + c;
        Var::witness(physical_column(witness, p.column)?, start_row + p.row)
    }

    /// Accumulator cell `j` of item `i`.
    pub fn acc_var(&self, witness: &[usize], start_row: usize, i: usize, j: usize) -> Result<Var> {
        self.item_var(witness, start_row, i, self.item_cells - self.acc_width + j)
    }

    /// Final cell `f`.
    pub fn final_var(&self, witness: &[usize], start_row: usize, f: usize) -> Result<Var> {
        let p = self
            .final_position()
            .ok_or_else(|| BlueprintError::InvalidConfiguration {
                parameter: "final_cells",
                reason: "the layout has no final cells".to_string(),
            })?
            + f;
        Var::witness(physical_column(witness, p.column)?, start_row + p.row)
    }

    /// The lead cells of every row.
    pub fn lead_vars(&self, witness: &[usize], start_row: usize) -> Result<Vec<Vec<Var>>> {
        (0..self.rows())
            .map(|r| {
                (0..self.lead)
                    .map(|j| self.lead_var(witness, start_row, r, j))
                    .collect()
            })
            .collect()
    }

    /// Fill the layout natively and return the outputs, or the last
    /// accumulator when there are no final cells.
    pub fn assign<F: Scalar, A: RunningAccumulator<F>>(
        &self,
        accumulator: &A,
        table: &mut AssignmentTable<F>,
        witness: &[usize],
        start_row: usize,
        lead: &[F],
        items: &[Vec<F>],
        final_inputs: &[F],
    ) -> Result<Vec<F>> {
        check_arity(self.lead, lead.len())?;
        check_arity(self.items, items.len())?;
        check_arity(accumulator.final_inputs(), final_inputs.len())?;

        for row in 0..self.rows() {
            for (j, v) in lead.iter().enumerate() {
                let var = self.lead_var(witness, start_row, row, j)?;
                table.assign_witness(var.index, var.row()?, *v)?;
            }
        }

        let mut acc = accumulator.initial(lead);
        for (i, inputs) in items.iter().enumerate() {
            check_arity(self.item_cells - self.acc_width, inputs.len())?;
            let next = accumulator.step(&acc, inputs, lead);
            for (c, v) in inputs.iter().chain(next.iter()).enumerate() {
                let var = self.item_var(witness, start_row, i, c)?;
                table.assign_witness(var.index, var.row()?, *v)?;
            }
            acc = next;
        }

        if self.final_cells == 0 {
            return Ok(acc);
        }
        let outputs = accumulator.finalize(&acc, final_inputs, lead);
        check_arity(self.final_cells, final_inputs.len() + outputs.len())?;
        for (f, v) in final_inputs.iter().chain(outputs.iter()).enumerate() {
            let var = self.final_var(witness, start_row, f)?;
            table.assign_witness(var.index, var.row()?, *v)?;
        }
        Ok(outputs)
    }

    /// Register one gate per distinct row shape; returns their selectors.
    pub fn configure_gates<F: Scalar, A: RunningAccumulator<F>>(
        &self,
        accumulator: &A,
        circuit: &mut Circuit<F>,
        witness: &[usize],
    ) -> Result<Vec<usize>> {
        let mut selectors = vec![];
        for kind in self.distinct_kinds() {
            let (constraints, lookups) = self.row_constraints(accumulator, circuit, witness, kind)?;
            let selector = circuit.allocate_selector();
            circuit.add_gate(selector, constraints);
            if !lookups.is_empty() {
                circuit.add_lookup_gate(selector, lookups);
            }
            selectors.push(selector);
        }
        Ok(selectors)
    }

    fn row_constraints<F: Scalar, A: RunningAccumulator<F>>(
        &self,
        accumulator: &A,
        circuit: &mut Circuit<F>,
        witness: &[usize],
        kind: RowKind,
    ) -> Result<(Vec<Expression<F>>, Vec<LookupConstraint<F>>)> {
        let cell = |column: usize, rotation: i32| -> Result<Expression<F>> {
            Ok(Expression::var(Var::witness_rel(
                physical_column(witness, column)?,
                rotation,
            )))
        };
        let cells = |column: usize, n: usize| -> Result<Vec<Expression<F>>> {
            (column..column + n).map(|c| cell(c, 0)).collect()
        };
        let lead = cells(0, self.lead)?;
        let carry = |prev_count: usize| -> Result<Vec<Expression<F>>> {
            let column = self.carry_column(prev_count);
            (column..column + self.acc_width).map(|c| cell(c, -1)).collect()
        };

        let mut constraints = vec![];
        let mut lookups = vec![];
        let (mut acc, count, finalize) = match kind {
            RowKind::Items {
                first,
                count,
                finalize,
            } => {
                let acc = if first {
                    accumulator.initial(&lead)
                } else {
                    carry(self.items_per_row)?
                };
                (acc, count, finalize)
            }
            RowKind::Finalize { prev_count } => (carry(prev_count)?, 0, true),
        };

        let inputs_len = self.item_cells - self.acc_width;
        for k in 0..count {
            let column = self.lead + k * self.item_cells;
            let inputs = cells(column, inputs_len)?;
            let stored = cells(column + inputs_len, self.acc_width)?;
            let next = accumulator.step(&acc, &inputs, &lead);
            constraints.extend(stored.iter().cloned().zip(next).map(|(s, n)| s - n));
            constraints.extend(accumulator.item_constraints(&inputs, &lead));
            lookups.extend(accumulator.item_lookups(circuit, &inputs)?);
            acc = stored;
        }

        if finalize {
            let column = self.lead + count * self.item_cells;
            let final_inputs = cells(column, accumulator.final_inputs())?;
            let outputs = accumulator.finalize(&acc, &final_inputs, &lead);
            let stored = cells(column + final_inputs.len(), outputs.len())?;
            constraints.extend(stored.into_iter().zip(outputs).map(|(s, o)| s - o));
        }
        Ok((constraints, lookups))
    }

    /// Enable the selectors returned by [`Self::configure_gates`] on their rows.
    pub fn enable_selectors<F: Scalar>(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<()> {
        let distinct = self.distinct_kinds();
        check_arity(distinct.len(), selectors.len())?;
        let kinds = self.row_kinds();
        let mut begin = 0;
        while begin < kinds.len() {
            let end = kinds[begin..]
                .iter()
                .position(|k| *k != kinds[begin])
                .map_or(kinds.len(), |n| begin + n);
            let index = distinct
                .iter()
                .position(|k| *k == kinds[begin])
                .unwrap_or_default();
            table.enable_selector_range(selectors[index], start_row + begin, start_row + end, 1);
            begin = end;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constraint_system::checker::{is_satisfied, verify_assignment};
    use blueprint_algebra::bn254::BN254Scalar;

    type F = BN254Scalar;

    /// `out = lead + Σ x_i`, with items `[x, acc]`.
    struct RunningSum;

    impl RunningAccumulator<F> for RunningSum {
        fn initial<T: Arithmetic<F>>(&self, lead: &[T]) -> Vec<T> {
            vec![lead[0].clone()]
        }

        fn step<T: Arithmetic<F>>(&self, acc: &[T], inputs: &[T], _lead: &[T]) -> Vec<T> {
            vec![acc[0].clone() + inputs[0].clone()]
        }

        fn finalize<T: Arithmetic<F>>(&self, acc: &[T], _final: &[T], _lead: &[T]) -> Vec<T> {
            vec![acc[0].clone()]
        }
    }

    fn build(width: usize, items: usize) -> (RunningLayout, Circuit<F>, AssignmentTable<F>, F) {
        let layout = RunningLayout::new(width, 1, 2, 1, items, 1).unwrap();
        let witness: Vec<usize> = (0..width).collect();
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::new(width, 0, 0);
        let xs: Vec<Vec<F>> = (1..=items as u32).map(|x| vec![F::from(x)]).collect();
        let out = layout
            .assign(&RunningSum, &mut table, &witness, 2, &[F::from(100u32)], &xs, &[])
            .unwrap();
        let selectors = layout.configure_gates(&RunningSum, &mut circuit, &witness).unwrap();
        layout.enable_selectors(&mut table, &selectors, 2).unwrap();
        (layout, circuit, table, out[0])
    }

    #[test]
    fn geometry() {
        // W = 4, lead 1: one item of 2 cells per row, final fits after it
        let layout = RunningLayout::new(4, 1, 2, 1, 3, 1).unwrap();
        assert_eq!(layout.items_per_row(), 1);
        assert_eq!(layout.rows(), 3);
        assert!(!layout.extra_row());
        assert_eq!(layout.gates_amount(), 3);

        // W = 5: two items fill the row, the final cell needs another
        let layout = RunningLayout::new(5, 1, 2, 1, 4, 1).unwrap();
        assert_eq!(layout.rows(), 3);
        assert!(layout.extra_row());
        let p = layout.final_position().unwrap();
        assert_eq!((p.row, p.column), (2, 1));
        assert_eq!(
            layout.row_kinds(),
            vec![
                RowKind::Items { first: true, count: 2, finalize: false },
                RowKind::Items { first: false, count: 2, finalize: false },
                RowKind::Finalize { prev_count: 2 },
            ]
        );

        let empty = RunningLayout::new(3, 1, 2, 1, 0, 1).unwrap();
        assert_eq!(empty.rows(), 1);
        let p = empty.final_position().unwrap();
        assert_eq!((p.row, p.column), (0, 1));

        assert!(RunningLayout::new(2, 1, 2, 1, 3, 1).is_err());
        assert!(RunningLayout::new(4, 1, 2, 1, 0, 0).is_err());
        assert!(RunningLayout::new(4, 1, 2, 3, 1, 1).is_err());
    }

    #[test]
    fn boundary_law_over_widths() {
        for width in 3..9 {
            for items in 0..9 {
                let (layout, circuit, table, out) = build(width, items);
                let expected = 100 + (items * (items + 1) / 2) as u32;
                assert_eq!(out, F::from(expected));
                assert!(
                    is_satisfied(&circuit, &table),
                    "width {} items {}",
                    width,
                    items
                );
                assert!(table.rows_amount() <= 2 + layout.rows());
            }
        }
    }

    #[test]
    fn broken_carry_is_caught() {
        // two items per row: item 2 opens row 1 and carries from item 1
        let (layout, circuit, mut table, _) = build(5, 5);
        let witness: Vec<usize> = (0..5).collect();
        let acc = layout.acc_var(&witness, 2, 1, 0).unwrap();
        table
            .replace_witness(acc.index, acc.row().unwrap(), F::from(7u32))
            .unwrap();
        assert!(verify_assignment(&circuit, &table).is_err());
    }

    #[test]
    fn input_lengths_are_checked() {
        let layout = RunningLayout::new(4, 1, 2, 1, 2, 1).unwrap();
        let mut table = AssignmentTable::<F>::new(4, 0, 0);
        let res = layout.assign(&RunningSum, &mut table, &[0, 1, 2, 3], 0, &[F::one()], &[], &[]);
        assert_eq!(res, Err(BlueprintError::InvalidInput { expected: 2, got: 0 }));
    }
}
