//! Circuits composed of several gate components.
//!
//! A composite places its sub-components one after another from its
//! `start_row`, each at the offset given by the rows of those before it, and
//! feeds the result vars of one into the inputs of the next.

mod gate_argument;
mod kimchi;
mod permutation;

pub use gate_argument::{GateArgumentInput, GateArgumentResult, GateArgumentVerifier};
pub use kimchi::{BPoly, BPolyInput, BPolyResult};
pub use permutation::{
    PermutationInput, PermutationProduct, PermutationProductInput, PermutationProductResult,
    PermutationResult, PermutationVerifier,
};

use crate::component::{check_arity, Component, ComponentParams};
use crate::components::fields::{BinaryOp, BinaryOperation, BinaryOperationInput};
use crate::constraint_system::{AssignmentTable, Circuit, ShapeKey, Var};
use crate::errors::{BlueprintError, Result};
use blueprint_algebra::prelude::*;

/// Split the selectors of a composite into the runs of its sub-components.
pub(crate) fn split_selectors<'a>(selectors: &'a [usize], counts: &[usize]) -> Result<Vec<&'a [usize]>> {
    check_arity(counts.iter().sum(), selectors.len())?;
    let mut rest = selectors;
    Ok(counts
        .iter()
        .map(|n| {
            let (head, tail) = rest.split_at(*n);
            rest = tail;
            head
        })
        .collect())
}

/// An operand of a step in an [`OperationChain`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operand {
    /// input `i` of the chain.
    Input(usize),
    /// the output of step `j`.
    Step(usize),
}

impl Operand {
    fn key(&self) -> u64 {
        match self {
            Operand::Input(i) => 2 * *i as u64,
            Operand::Step(j) => 2 * *j as u64 + 1,
        }
    }

    fn resolve<T: Copy>(&self, inputs: &[T], outputs: &[T]) -> T {
        match self {
            Operand::Input(i) => inputs[*i],
            Operand::Step(j) => outputs[*j],
        }
    }
}

/// A sequence of binary field operations, each reading chain inputs or the
/// outputs of earlier steps. The result holds the output of every step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OperationChain {
    params: ComponentParams,
    inputs: usize,
    steps: Vec<(BinaryOp, Operand, Operand)>,
    operations: Vec<BinaryOperation>,
}

impl OperationChain {
    pub(crate) fn new(
        params: ComponentParams,
        inputs: usize,
        steps: Vec<(BinaryOp, Operand, Operand)>,
    ) -> Result<Self> {
        for (j, (_, x, y)) in steps.iter().enumerate() {
            for operand in [x, y] {
                let valid = match operand {
                    Operand::Input(i) => *i < inputs,
                    Operand::Step(k) => *k < j,
                };
                if !valid {
                    return Err(BlueprintError::InvalidConfiguration {
                        parameter: "steps",
                        reason: format!("step {} reads {:?}", j, operand),
                    });
                }
            }
        }
        let operations = steps
            .iter()
            .map(|(op, _, _)| BinaryOperation::new(params.clone(), *op))
            .collect::<Result<Vec<BinaryOperation>>>()?;
        Ok(Self {
            params,
            inputs,
            steps,
            operations,
        })
    }

    fn offsets<F: Scalar>(&self) -> Vec<usize> {
        self.operations
            .iter()
            .scan(0, |offset, op| {
                let current = *offset;
                *offset += <BinaryOperation as Component<F>>::rows_amount(op);
                Some(current)
            })
            .collect()
    }

    fn operand_inputs(&self, inputs: &[Var], outputs: &[Var], j: usize) -> BinaryOperationInput {
        let (_, x, y) = self.steps[j];
        BinaryOperationInput {
            x: x.resolve(inputs, outputs),
            y: y.resolve(inputs, outputs),
        }
    }
}

impl<F: Scalar> Component<F> for OperationChain {
    type Input = Vec<Var>;
    type Result = Vec<Var>;

    fn params(&self) -> &ComponentParams {
        &self.params
    }

    fn rows_amount(&self) -> usize {
        self.operations
            .iter()
            .map(<BinaryOperation as Component<F>>::rows_amount)
            .sum()
    }

    fn gates_amount(&self) -> usize {
        self.operations.len()
    }

    fn shape_key(&self) -> ShapeKey {
        let mut key = vec![self.inputs as u64];
        for (op, x, y) in &self.steps {
            key.extend([*op as u64, x.key(), y.key()]);
        }
        ShapeKey::new("operation_chain", &self.params.witness, &[], key)
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        self.operations
            .iter()
            .zip(self.offsets::<F>())
            .map(|(op, offset)| {
                Ok(<BinaryOperation as Component<F>>::result(op, start_row + offset)?.output)
            })
            .collect()
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        check_arity(self.inputs, input.len())?;
        let mut outputs = Vec::with_capacity(self.steps.len());
        for (j, (op, offset)) in self.operations.iter().zip(self.offsets::<F>()).enumerate() {
            let operands = self.operand_inputs(input, &outputs, j);
            outputs.push(op.generate_assignments(table, &operands, start_row + offset)?.output);
        }
        Ok(outputs)
    }

    fn configure_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>> {
        let mut selectors = vec![];
        for op in &self.operations {
            selectors.extend(op.generate_gates(circuit)?);
        }
        Ok(selectors)
    }

    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<()> {
        let runs = split_selectors(selectors, &vec![1; self.operations.len()])?;
        for ((op, offset), run) in self.operations.iter().zip(self.offsets::<F>()).zip(runs) {
            op.enable_selectors(table, run, start_row + offset)?;
        }
        Ok(())
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        check_arity(self.inputs, input.len())?;
        let outputs = <Self as Component<F>>::result(self, start_row)?;
        for (j, (op, offset)) in self.operations.iter().zip(self.offsets::<F>()).enumerate() {
            let operands = self.operand_inputs(input, &outputs, j);
            <BinaryOperation as Component<F>>::generate_copy_constraints(
                op,
                circuit,
                &operands,
                start_row + offset,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::components::test_utils::{place, public_inputs};
    use crate::constraint_system::checker::verify_assignment;
    use blueprint_algebra::bn254::BN254Scalar;

    type F = BN254Scalar;

    #[test]
    fn chained_steps() {
        // (a + b) * a - b
        let steps = vec![
            (BinaryOp::Add, Operand::Input(0), Operand::Input(1)),
            (BinaryOp::Mul, Operand::Step(0), Operand::Input(0)),
            (BinaryOp::Sub, Operand::Step(1), Operand::Input(1)),
        ];
        let chain = OperationChain::new(ComponentParams::with_witness_amount(3), 2, steps).unwrap();
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::<F>::new(3, 1, 0);
        let vars = public_inputs(&mut table, 0, &[F::from(4u32), F::from(5u32)]);
        let outputs = place(&chain, &mut circuit, &mut table, &vars, 0);
        verify_assignment(&circuit, &table).unwrap();
        assert_eq!(<OperationChain as Component<F>>::rows_amount(&chain), 3);
        assert_eq!(table.value(&outputs[2]).unwrap(), F::from(31u32));
        assert_eq!(circuit.selectors_amount(), 3);
    }

    #[test]
    fn forward_references_are_rejected() {
        let steps = vec![(BinaryOp::Add, Operand::Step(0), Operand::Input(0))];
        assert!(OperationChain::new(ComponentParams::with_witness_amount(3), 1, steps).is_err());
        let steps = vec![(BinaryOp::Add, Operand::Input(0), Operand::Input(2))];
        assert!(OperationChain::new(ComponentParams::with_witness_amount(3), 2, steps).is_err());
    }
}
