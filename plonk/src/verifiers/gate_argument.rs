use super::{split_selectors, OperationChain, Operand};
use crate::component::{check_arity, Component, ComponentParams, Manifest};
use crate::components::fields::{BinaryOp, BinaryOperation};
use crate::components::iterative::{GateComponent, GateComponentInput};
use crate::constraint_system::{AssignmentTable, Circuit, ShapeKey, Var};
use crate::errors::{BlueprintError, Result};
use blueprint_algebra::prelude::*;

/// The inputs of a [`GateArgumentVerifier`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateArgumentInput {
    /// the challenge combining the constraints of a gate.
    pub theta: Var,
    /// the selector value of every gate.
    pub selectors: Vec<Var>,
    /// the constraint values of every gate, `degree + 1` each.
    pub constraints: Vec<Vec<Var>>,
}

/// The output of a [`GateArgumentVerifier`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateArgumentResult {
    /// `sum_i q_i * sum_j theta^j C_ij`.
    pub output: Var,
}

/// The gate argument of a PLONK verifier: one [`GateComponent`] per gate,
/// then the sum of their outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateArgumentVerifier {
    params: ComponentParams,
    gates: Vec<GateComponent>,
    sum: Option<OperationChain>,
}

impl GateArgumentVerifier {
    /// The requirements of the component.
    pub fn manifest() -> Manifest {
        GateComponent::manifest().merge(&BinaryOperation::manifest(BinaryOp::Add))
    }

    /// Create the verifier for gates of the given degrees.
    pub fn new(params: ComponentParams, degrees: &[usize]) -> Result<Self> {
        Self::manifest().check(&params)?;
        if degrees.is_empty() {
            return Err(BlueprintError::InvalidConfiguration {
                parameter: "degrees",
                reason: "at least one gate is needed".to_string(),
            });
        }
        let gates = degrees
            .iter()
            .map(|d| GateComponent::new(params.clone(), *d))
            .collect::<Result<Vec<GateComponent>>>()?;
        let sum = if gates.len() > 1 {
            let mut steps = vec![(BinaryOp::Add, Operand::Input(0), Operand::Input(1))];
            steps.extend((2..gates.len()).map(|i| (BinaryOp::Add, Operand::Step(i - 2), Operand::Input(i))));
            Some(OperationChain::new(params.clone(), gates.len(), steps)?)
        } else {
            None
        };
        Ok(Self { params, gates, sum })
    }

    fn gate_offsets<F: Scalar>(&self) -> Vec<usize> {
        let mut offset = 0;
        self.gates
            .iter()
            .map(|gate| {
                let current = offset;
                offset += <GateComponent as Component<F>>::rows_amount(gate);
                current
            })
            .collect()
    }

    fn sum_offset<F: Scalar>(&self) -> usize {
        self.gates
            .iter()
            .map(<GateComponent as Component<F>>::rows_amount)
            .sum()
    }

    fn gate_inputs(&self, input: &GateArgumentInput) -> Result<Vec<GateComponentInput>> {
        check_arity(self.gates.len(), input.selectors.len())?;
        check_arity(self.gates.len(), input.constraints.len())?;
        Ok(input
            .selectors
            .iter()
            .zip(input.constraints.iter())
            .map(|(q, c)| GateComponentInput {
                theta: input.theta,
                selector: *q,
                constraints: c.clone(),
            })
            .collect())
    }

    fn gate_outputs<F: Scalar>(&self, start_row: usize) -> Result<Vec<Var>> {
        self.gates
            .iter()
            .zip(self.gate_offsets::<F>())
            .map(|(gate, offset)| {
                Ok(<GateComponent as Component<F>>::result(gate, start_row + offset)?.output)
            })
            .collect()
    }
}

impl<F: Scalar> Component<F> for GateArgumentVerifier {
    type Input = GateArgumentInput;
    type Result = GateArgumentResult;

    fn params(&self) -> &ComponentParams {
        &self.params
    }

    fn rows_amount(&self) -> usize {
        self.sum_offset::<F>()
            + self
                .sum
                .as_ref()
                .map_or(0, <OperationChain as Component<F>>::rows_amount)
    }

    fn gates_amount(&self) -> usize {
        self.gates
            .iter()
            .map(<GateComponent as Component<F>>::gates_amount)
            .sum::<usize>()
            + self
                .sum
                .as_ref()
                .map_or(0, <OperationChain as Component<F>>::gates_amount)
    }

    fn shape_key(&self) -> ShapeKey {
        let degrees = self.gates.iter().map(|g| g.degree() as u64).collect();
        ShapeKey::new("gate_argument", &self.params.witness, &[], degrees)
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        let output = match &self.sum {
            Some(sum) => {
                let outputs =
                    <OperationChain as Component<F>>::result(sum, start_row + self.sum_offset::<F>())?;
                outputs[outputs.len() - 1]
            }
            None => self.gate_outputs::<F>(start_row)?[0],
        };
        Ok(GateArgumentResult { output })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        let inputs = self.gate_inputs(input)?;
        let mut outputs = vec![];
        for ((gate, offset), gate_input) in self.gates.iter().zip(self.gate_offsets::<F>()).zip(&inputs) {
            outputs.push(gate.generate_assignments(table, gate_input, start_row + offset)?.output);
        }
        if let Some(sum) = &self.sum {
            sum.generate_assignments(table, &outputs, start_row + self.sum_offset::<F>())?;
        }
        <Self as Component<F>>::result(self, start_row)
    }

    fn configure_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>> {
        let mut selectors = vec![];
        for gate in &self.gates {
            selectors.extend(gate.generate_gates(circuit)?);
        }
        if let Some(sum) = &self.sum {
            selectors.extend(sum.generate_gates(circuit)?);
        }
        Ok(selectors)
    }

    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<()> {
        let mut counts: Vec<usize> = self
            .gates
            .iter()
            .map(<GateComponent as Component<F>>::gates_amount)
            .collect();
        if let Some(sum) = &self.sum {
            counts.push(<OperationChain as Component<F>>::gates_amount(sum));
        }
        let runs = split_selectors(selectors, &counts)?;
        for ((gate, offset), run) in self.gates.iter().zip(self.gate_offsets::<F>()).zip(&runs) {
            gate.enable_selectors(table, run, start_row + offset)?;
        }
        if let Some(sum) = &self.sum {
            sum.enable_selectors(table, runs[self.gates.len()], start_row + self.sum_offset::<F>())?;
        }
        Ok(())
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        let inputs = self.gate_inputs(input)?;
        for ((gate, offset), gate_input) in self.gates.iter().zip(self.gate_offsets::<F>()).zip(&inputs) {
            gate.generate_copy_constraints(circuit, gate_input, start_row + offset)?;
        }
        if let Some(sum) = &self.sum {
            let outputs = self.gate_outputs::<F>(start_row)?;
            sum.generate_copy_constraints(circuit, &outputs, start_row + self.sum_offset::<F>())?;
        }
        Ok(())
    }
}
