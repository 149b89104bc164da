use crate::component::{check_arity, Component, ComponentParams, Manifest};
use crate::components::copy_all;
use crate::constraint_system::{AssignmentTable, Circuit, ShapeKey, Var};
use crate::errors::Result;
use crate::layout::{RunningAccumulator, RunningLayout};
use blueprint_algebra::prelude::*;

/// The inputs of a [`GateComponent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateComponentInput {
    /// the evaluation point.
    pub theta: Var,
    /// the gate selector value.
    pub selector: Var,
    /// `C_0, ..., C_d`.
    pub constraints: Vec<Var>,
}

/// The output of a [`GateComponent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GateComponentResult {
    /// `q * (C_0 + theta * C_1 + ... + theta^d * C_d)`.
    pub output: Var,
}

/// Horner fold `G <- (G + C_j) * theta` for `j = d..1`, then `q * (G + C_0)`.
struct Horner;

impl<F: Scalar> RunningAccumulator<F> for Horner {
    fn initial<T: Arithmetic<F>>(&self, _lead: &[T]) -> Vec<T> {
        vec![T::constant(F::zero())]
    }

    fn step<T: Arithmetic<F>>(&self, acc: &[T], inputs: &[T], lead: &[T]) -> Vec<T> {
        vec![(acc[0].clone() + inputs[0].clone()) * lead[0].clone()]
    }

    fn final_inputs(&self) -> usize {
        2
    }

    fn finalize<T: Arithmetic<F>>(&self, acc: &[T], final_inputs: &[T], _lead: &[T]) -> Vec<T> {
        vec![final_inputs[0].clone() * (acc[0].clone() + final_inputs[1].clone())]
    }
}

/// Evaluation of one gate of degree `d` at `theta`, scaled by its selector.
///
/// Lead `[theta]`, items `[C_j, G]` for `j = d..1`, final `[q, C_0, result]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateComponent {
    params: ComponentParams,
    degree: usize,
    layout: RunningLayout,
}

impl GateComponent {
    /// The requirements of the component.
    pub fn manifest() -> Manifest {
        Manifest::new(4, None, 0)
    }

    /// Create the component for a gate of degree `degree`.
    pub fn new(params: ComponentParams, degree: usize) -> Result<Self> {
        Self::manifest().check(&params)?;
        let layout = Self::layout(params.witness_amount(), degree)?;
        Ok(Self {
            params,
            degree,
            layout,
        })
    }

    fn layout(witness_amount: usize, degree: usize) -> Result<RunningLayout> {
        RunningLayout::new(witness_amount, 1, 2, 1, degree, 3)
    }

    /// The rows a component of this shape occupies.
    pub fn get_rows_amount(witness_amount: usize, degree: usize) -> Result<usize> {
        Ok(Self::layout(witness_amount, degree)?.rows())
    }

    /// The degree of the gate.
    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl<F: Scalar> Component<F> for GateComponent {
    type Input = GateComponentInput;
    type Result = GateComponentResult;

    fn params(&self) -> &ComponentParams {
        &self.params
    }

    fn rows_amount(&self) -> usize {
        self.layout.rows()
    }

    fn gates_amount(&self) -> usize {
        self.layout.gates_amount()
    }

    fn shape_key(&self) -> ShapeKey {
        ShapeKey::new("gate_component", &self.params.witness, &[], vec![self.degree as u64])
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        Ok(GateComponentResult {
            output: self.layout.final_var(&self.params.witness, start_row, 2)?,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        check_arity(self.degree + 1, input.constraints.len())?;
        let theta = table.value(&input.theta)?;
        let q = table.value(&input.selector)?;
        let c = table.values(&input.constraints)?;
        let items: Vec<Vec<F>> = c[1..].iter().rev().map(|v| vec![*v]).collect();
        self.layout.assign(
            &Horner,
            table,
            &self.params.witness,
            start_row,
            &[theta],
            &items,
            &[q, c[0]],
        )?;
        <Self as Component<F>>::result(self, start_row)
    }

    fn configure_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>> {
        self.layout
            .configure_gates(&Horner, circuit, &self.params.witness)
    }

    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<()> {
        self.layout.enable_selectors(table, selectors, start_row)
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        check_arity(self.degree + 1, input.constraints.len())?;
        let witness = &self.params.witness;
        for row in self.layout.lead_vars(witness, start_row)? {
            circuit.add_copy_constraint(row[0], input.theta)?;
        }
        let cells = (0..self.degree)
            .map(|i| self.layout.item_var(witness, start_row, i, 0))
            .collect::<Result<Vec<Var>>>()?;
        let coefficients: Vec<Var> = input.constraints[1..].iter().rev().copied().collect();
        copy_all(circuit, &cells, &coefficients)?;
        circuit.add_copy_constraint(self.layout.final_var(witness, start_row, 0)?, input.selector)?;
        circuit.add_copy_constraint(
            self.layout.final_var(witness, start_row, 1)?,
            input.constraints[0],
        )
    }
}
