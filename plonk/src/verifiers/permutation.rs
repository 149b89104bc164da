use super::{split_selectors, OperationChain, Operand};
use crate::component::{check_arity, Component, ComponentParams, Manifest};
use crate::components::copy_all;
use crate::components::fields::BinaryOp;
use crate::constraint_system::{AssignmentTable, Circuit, ShapeKey, Var};
use crate::errors::Result;
use crate::layout::{RunningAccumulator, RunningLayout};
use blueprint_algebra::prelude::*;

/// The inputs of a [`PermutationProduct`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationProductInput {
    /// the first permutation challenge.
    pub beta: Var,
    /// the second permutation challenge.
    pub gamma: Var,
    /// the column evaluations `f_i`.
    pub f: Vec<Var>,
    /// the identity permutation evaluations `id_i`.
    pub id: Vec<Var>,
    /// the permutation evaluations `sigma_i`.
    pub sigma: Vec<Var>,
}

/// The two running products.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermutationProductResult {
    /// `prod_i (f_i + beta * id_i + gamma)`.
    pub h: Var,
    /// `prod_i (f_i + beta * sigma_i + gamma)`.
    pub g: Var,
}

struct GrandProduct;

impl<F: Scalar> RunningAccumulator<F> for GrandProduct {
    fn initial<T: Arithmetic<F>>(&self, _lead: &[T]) -> Vec<T> {
        vec![T::constant(F::one()), T::constant(F::one())]
    }

    fn step<T: Arithmetic<F>>(&self, acc: &[T], inputs: &[T], lead: &[T]) -> Vec<T> {
        let (beta, gamma) = (lead[0].clone(), lead[1].clone());
        let (f, id, sigma) = (inputs[0].clone(), inputs[1].clone(), inputs[2].clone());
        vec![
            acc[0].clone() * (f.clone() + beta.clone() * id + gamma.clone()),
            acc[1].clone() * (f + beta * sigma + gamma),
        ]
    }

    fn finalize<T: Arithmetic<F>>(&self, acc: &[T], _final_inputs: &[T], _lead: &[T]) -> Vec<T> {
        acc.to_vec()
    }
}

/// The grand products of the permutation argument over `m` columns.
///
/// Lead `[beta, gamma]`, items `[f, id, sigma, h, g]`, final `[h, g]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationProduct {
    params: ComponentParams,
    m: usize,
    layout: RunningLayout,
}

impl PermutationProduct {
    /// The requirements of the component.
    pub fn manifest() -> Manifest {
        Manifest::new(7, None, 0)
    }

    /// Create the component for `m` columns.
    pub fn new(params: ComponentParams, m: usize) -> Result<Self> {
        Self::manifest().check(&params)?;
        let layout = RunningLayout::new(params.witness_amount(), 2, 5, 2, m, 2)?;
        Ok(Self { params, m, layout })
    }

    /// The rows for `m` columns.
    pub fn get_rows_amount(witness_amount: usize, m: usize) -> Result<usize> {
        Ok(RunningLayout::new(witness_amount, 2, 5, 2, m, 2)?.rows())
    }

    fn check_input(&self, input: &PermutationProductInput) -> Result<()> {
        check_arity(self.m, input.f.len())?;
        check_arity(self.m, input.id.len())?;
        check_arity(self.m, input.sigma.len())
    }
}

impl<F: Scalar> Component<F> for PermutationProduct {
    type Input = PermutationProductInput;
    type Result = PermutationProductResult;

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
        ShapeKey::new("permutation_product", &self.params.witness, &[], vec![self.m as u64])
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        let witness = &self.params.witness;
        Ok(PermutationProductResult {
            h: self.layout.final_var(witness, start_row, 0)?,
            g: self.layout.final_var(witness, start_row, 1)?,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        self.check_input(input)?;
        let lead = table.values(&[input.beta, input.gamma])?;
        let f = table.values(&input.f)?;
        let id = table.values(&input.id)?;
        let sigma = table.values(&input.sigma)?;
        let items: Vec<Vec<F>> = (0..self.m).map(|i| vec![f[i], id[i], sigma[i]]).collect();
        self.layout.assign(
            &GrandProduct,
            table,
            &self.params.witness,
            start_row,
            &lead,
            &items,
            &[],
        )?;
        <Self as Component<F>>::result(self, start_row)
    }

    fn configure_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>> {
        self.layout
            .configure_gates(&GrandProduct, circuit, &self.params.witness)
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
        for row in self.layout.lead_vars(witness, start_row)? {
            circuit.add_copy_constraint(row[0], input.beta)?;
            circuit.add_copy_constraint(row[1], input.gamma)?;
        }
        for (c, column) in [&input.f, &input.id, &input.sigma].iter().enumerate() {
            let cells = (0..self.m)
                .map(|i| self.layout.item_var(witness, start_row, i, c))
                .collect::<Result<Vec<Var>>>()?;
            copy_all(circuit, &cells, column)?;
        }
        Ok(())
    }
}

/// The inputs of a [`PermutationVerifier`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationInput {
    /// the grand product inputs.
    pub product: PermutationProductInput,
    /// the first Lagrange polynomial at the evaluation point.
    pub l0: Var,
    /// the permutation polynomial `V` at the evaluation point.
    pub v: Var,
    /// `V` at the shifted evaluation point.
    pub v_shifted: Var,
    /// the last-row selector.
    pub q_last: Var,
    /// the blinding-rows selector.
    pub q_blind: Var,
}

/// The three permutation argument expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermutationResult {
    /// `L0 * (1 - V)`.
    pub f0: Var,
    /// `(1 - (q_last + q_blind)) * (V_shifted * g - V * h)`.
    pub f1: Var,
    /// `q_last * (V^2 - V)`.
    pub f2: Var,
}

const L0: usize = 0;
const V: usize = 1;
const V_SHIFTED: usize = 2;
const Q_LAST: usize = 3;
const Q_BLIND: usize = 4;
const H: usize = 5;
const G: usize = 6;

/// Steps of the chain producing `f0`, `f1` and `f2`.
const OUTPUTS: [usize; 3] = [1, 7, 10];

fn argument_steps() -> Vec<(BinaryOp, Operand, Operand)> {
    use BinaryOp::*;
    use Operand::*;
    vec![
        (Mul, Input(L0), Input(V)),
        (Sub, Input(L0), Step(0)),
        (Mul, Input(V_SHIFTED), Input(G)),
        (Mul, Input(V), Input(H)),
        (Sub, Step(2), Step(3)),
        (Add, Input(Q_LAST), Input(Q_BLIND)),
        (Mul, Step(5), Step(4)),
        (Sub, Step(4), Step(6)),
        (Mul, Input(V), Input(V)),
        (Sub, Step(8), Input(V)),
        (Mul, Input(Q_LAST), Step(9)),
    ]
}

/// The permutation argument of a PLONK verifier over `m` columns: a
/// [`PermutationProduct`] followed by the field operations combining its
/// products with the permutation polynomial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationVerifier {
    params: ComponentParams,
    product: PermutationProduct,
    argument: OperationChain,
}

impl PermutationVerifier {
    /// The requirements of the component.
    pub fn manifest() -> Manifest {
        PermutationProduct::manifest()
    }

    /// Create the verifier for `m` columns.
    pub fn new(params: ComponentParams, m: usize) -> Result<Self> {
        Self::manifest().check(&params)?;
        let product = PermutationProduct::new(params.clone(), m)?;
        let argument = OperationChain::new(params.clone(), 7, argument_steps())?;
        Ok(Self {
            params,
            product,
            argument,
        })
    }

    fn argument_offset<F: Scalar>(&self) -> usize {
        <PermutationProduct as Component<F>>::rows_amount(&self.product)
    }

    fn argument_inputs<F: Scalar>(&self, input: &PermutationInput, start_row: usize) -> Result<Vec<Var>> {
        let products = <PermutationProduct as Component<F>>::result(&self.product, start_row)?;
        Ok(vec![
            input.l0,
            input.v,
            input.v_shifted,
            input.q_last,
            input.q_blind,
            products.h,
            products.g,
        ])
    }
}

impl<F: Scalar> Component<F> for PermutationVerifier {
    type Input = PermutationInput;
    type Result = PermutationResult;

    fn params(&self) -> &ComponentParams {
        &self.params
    }

    fn rows_amount(&self) -> usize {
        self.argument_offset::<F>() + <OperationChain as Component<F>>::rows_amount(&self.argument)
    }

    fn gates_amount(&self) -> usize {
        <PermutationProduct as Component<F>>::gates_amount(&self.product)
            + <OperationChain as Component<F>>::gates_amount(&self.argument)
    }

    fn shape_key(&self) -> ShapeKey {
        ShapeKey::new(
            "permutation_verifier",
            &self.params.witness,
            &[],
            vec![self.product.m as u64],
        )
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        let outputs = <OperationChain as Component<F>>::result(
            &self.argument,
            start_row + self.argument_offset::<F>(),
        )?;
        Ok(PermutationResult {
            f0: outputs[OUTPUTS[0]],
            f1: outputs[OUTPUTS[1]],
            f2: outputs[OUTPUTS[2]],
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        self.product
            .generate_assignments(table, &input.product, start_row)?;
        let inputs = self.argument_inputs::<F>(input, start_row)?;
        self.argument
            .generate_assignments(table, &inputs, start_row + self.argument_offset::<F>())?;
        <Self as Component<F>>::result(self, start_row)
    }

    fn configure_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>> {
        let mut selectors = self.product.generate_gates(circuit)?;
        selectors.extend(self.argument.generate_gates(circuit)?);
        Ok(selectors)
    }

    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<()> {
        let counts = [
            <PermutationProduct as Component<F>>::gates_amount(&self.product),
            <OperationChain as Component<F>>::gates_amount(&self.argument),
        ];
        let runs = split_selectors(selectors, &counts)?;
        self.product.enable_selectors(table, runs[0], start_row)?;
        self.argument
            .enable_selectors(table, runs[1], start_row + self.argument_offset::<F>())
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        self.product
            .generate_copy_constraints(circuit, &input.product, start_row)?;
        let inputs = self.argument_inputs::<F>(input, start_row)?;
        self.argument
            .generate_copy_constraints(circuit, &inputs, start_row + self.argument_offset::<F>())
    }
}
