/// Curve gates.
pub mod curves;
/// Field gates.
pub mod fields;
/// Hash layout gates.
pub mod hashes;
/// Running-accumulator gates.
pub mod iterative;

use crate::constraint_system::{Circuit, Var};
use crate::errors::Result;
use blueprint_algebra::prelude::*;

/// Bit `j` of the canonical representative of `value`.
pub(crate) fn bit_at<F: Scalar>(value: &F, j: usize) -> bool {
    value
        .get_little_endian_u64()
        .get(j / 64)
        .map_or(false, |limb| (limb >> (j % 64)) & 1 == 1)
}

/// The little-endian u64 limbs of a field element, as shape-key parameters.
pub(crate) fn scalar_key<F: Scalar>(value: &F) -> Vec<u64> {
    value.get_little_endian_u64()
}

/// Copy-constrain each var of `cells` to the var of `inputs` at the same place.
pub(crate) fn copy_all<F: Scalar>(circuit: &mut Circuit<F>, cells: &[Var], inputs: &[Var]) -> Result<()> {
    crate::component::check_arity(cells.len(), inputs.len())?;
    for (cell, input) in cells.iter().zip(inputs.iter()) {
        circuit.add_copy_constraint(*cell, *input)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::component::Component;
    use crate::constraint_system::{AssignmentTable, Circuit, Var};
    use blueprint_algebra::prelude::*;

    /// Place values into public input column 0 from row `offset`.
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

    /// Run the assignment and the circuit pass of a component.
    pub(crate) fn place<F: Scalar, C: Component<F>>(
        component: &C,
        circuit: &mut Circuit<F>,
        table: &mut AssignmentTable<F>,
        input: &C::Input,
        start_row: usize,
    ) -> C::Result {
        component
            .generate_assignments(table, input, start_row)
            .unwrap();
        component
            .generate_circuit(circuit, table, input, start_row)
            .unwrap()
    }
}
