mod smoke_verifiers;

use blueprint_algebra::prelude::*;
use blueprint_plonk::component::Component;
use blueprint_plonk::constraint_system::{AssignmentTable, Circuit, Var};

/// Write `values` into public input column 0 from row `offset`.
pub(crate) fn public_inputs<F: Scalar>(
    table: &mut AssignmentTable<F>,
    offset: usize,
    values: &[F],
) -> Vec<Var> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| table.assign_public_input(0, offset + i, *v).unwrap())
        .collect()
}

/// Assign a component at `start_row` and add its circuit, returning the row
/// after it.
pub(crate) fn place<F: Scalar, C: Component<F>>(
    component: &C,
    circuit: &mut Circuit<F>,
    table: &mut AssignmentTable<F>,
    input: &C::Input,
    start_row: usize,
) -> (C::Result, usize) {
    component
        .generate_assignments(table, input, start_row)
        .unwrap();
    let result = component
        .generate_circuit(circuit, table, input, start_row)
        .unwrap();
    (result, start_row + component.rows_amount())
}
