use crate::component::{check_arity, Component, ComponentParams, Manifest};
use crate::constraint_system::{AssignmentTable, Circuit, ShapeKey, Var};
use crate::errors::Result;
use crate::layout::{RunningAccumulator, RunningLayout};
use blueprint_algebra::prelude::*;

/// The inputs of an [`F3Loop`]: `m` triples `(s_i, t_i, alpha_i)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct F3LoopInput {
    /// `s_0, ..., s_{m-1}`.
    pub s: Vec<Var>,
    /// `t_0, ..., t_{m-1}`.
    pub t: Vec<Var>,
    /// `alpha_0, ..., alpha_{m-1}`.
    pub alphas: Vec<Var>,
}

/// The output of an [`F3Loop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct F3LoopResult {
    /// `sum_i (s_i - t_i) * alpha_i`.
    pub output: Var,
}

struct Difference;

impl<F: Scalar> RunningAccumulator<F> for Difference {
    fn initial<T: Arithmetic<F>>(&self, _lead: &[T]) -> Vec<T> {
        vec![T::constant(F::zero())]
    }

    fn step<T: Arithmetic<F>>(&self, acc: &[T], inputs: &[T], _lead: &[T]) -> Vec<T> {
        vec![acc[0].clone() + (inputs[0].clone() - inputs[1].clone()) * inputs[2].clone()]
    }

    fn finalize<T: Arithmetic<F>>(&self, acc: &[T], _final_inputs: &[T], _lead: &[T]) -> Vec<T> {
        vec![acc[0].clone()]
    }
}

/// The FRI consistency sum `sum_i (s_i - t_i) * alpha_i`, with items
/// `[s, t, alpha, acc]` and final `[out]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct F3Loop {
    params: ComponentParams,
    m: usize,
    layout: RunningLayout,
}

impl F3Loop {
    /// The requirements of the component.
    pub fn manifest() -> Manifest {
        Manifest::new(4, None, 0)
    }

    /// Create the component for `m` triples.
    pub fn new(params: ComponentParams, m: usize) -> Result<Self> {
        Self::manifest().check(&params)?;
        let layout = Self::layout(params.witness_amount(), m)?;
        Ok(Self { params, m, layout })
    }

    fn layout(witness_amount: usize, m: usize) -> Result<RunningLayout> {
        RunningLayout::new(witness_amount, 0, 4, 1, m, 1)
    }

    /// The rows a component of this shape occupies.
    pub fn get_rows_amount(witness_amount: usize, m: usize) -> Result<usize> {
        Ok(Self::layout(witness_amount, m)?.rows())
    }

    fn check_input(&self, input: &F3LoopInput) -> Result<()> {
        check_arity(self.m, input.s.len())?;
        check_arity(self.m, input.t.len())?;
        check_arity(self.m, input.alphas.len())
    }
}

impl<F: Scalar> Component<F> for F3Loop {
    type Input = F3LoopInput;
    type Result = F3LoopResult;

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
        ShapeKey::new("f3_loop", &self.params.witness, &[], vec![self.m as u64])
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        Ok(F3LoopResult {
            output: self.layout.final_var(&self.params.witness, start_row, 0)?,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        self.check_input(input)?;
        let items = (0..self.m)
            .map(|i| table.values(&[input.s[i], input.t[i], input.alphas[i]]))
            .collect::<Result<Vec<Vec<F>>>>()?;
        self.layout.assign(
            &Difference,
            table,
            &self.params.witness,
            start_row,
            &[],
            &items,
            &[],
        )?;
        <Self as Component<F>>::result(self, start_row)
    }

    fn configure_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>> {
        self.layout
            .configure_gates(&Difference, circuit, &self.params.witness)
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
        self.check_input(input)?;
        let witness = &self.params.witness;
        for i in 0..self.m {
            let sources = [input.s[i], input.t[i], input.alphas[i]];
            for (c, source) in sources.iter().enumerate() {
                circuit.add_copy_constraint(self.layout.item_var(witness, start_row, i, c)?, *source)?;
            }
        }
        Ok(())
    }
}
