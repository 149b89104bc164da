use crate::component::{check_arity, Component, ComponentParams, Manifest};
use crate::components::copy_all;
use crate::constraint_system::{AssignmentTable, Circuit, ShapeKey, Var};
use crate::errors::Result;
use crate::layout::{RunningAccumulator, RunningLayout};
use blueprint_algebra::prelude::*;

/// The inputs of a [`BPoly`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BPolyInput {
    /// the IPA challenges `chal_0, ..., chal_{k-1}`.
    pub chals: Vec<Var>,
    /// the evaluation point.
    pub x: Var,
}

/// The output of a [`BPoly`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BPolyResult {
    /// `b(x)`.
    pub output: Var,
}

/// Accumulator `[x^(2^i), prod]`.
struct ChallengeProduct;

impl<F: Scalar> RunningAccumulator<F> for ChallengeProduct {
    fn initial<T: Arithmetic<F>>(&self, lead: &[T]) -> Vec<T> {
        vec![lead[0].clone(), T::constant(F::one())]
    }

    fn step<T: Arithmetic<F>>(&self, acc: &[T], inputs: &[T], _lead: &[T]) -> Vec<T> {
        let (pow, prod) = (acc[0].clone(), acc[1].clone());
        vec![
            pow.clone() * pow.clone(),
            prod * (T::constant(F::one()) + inputs[0].clone() * pow),
        ]
    }

    fn finalize<T: Arithmetic<F>>(&self, acc: &[T], _final_inputs: &[T], _lead: &[T]) -> Vec<T> {
        vec![acc[1].clone()]
    }
}

/// The challenge polynomial of the Kimchi inner product argument,
/// `b(x) = prod_i (1 + chal_{k-1-i} * x^(2^i))`.
///
/// Lead `[x]`, items `[chal_{k-1-i}, x^(2^(i+1)), prod]`, final `[b(x)]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BPoly {
    params: ComponentParams,
    k: usize,
    layout: RunningLayout,
}

impl BPoly {
    /// The requirements of the component.
    pub fn manifest() -> Manifest {
        Manifest::new(4, None, 0)
    }

    /// Create the component for `k` challenges.
    pub fn new(params: ComponentParams, k: usize) -> Result<Self> {
        Self::manifest().check(&params)?;
        let layout = RunningLayout::new(params.witness_amount(), 1, 3, 2, k, 1)?;
        Ok(Self { params, k, layout })
    }

    /// The rows for `k` challenges.
    pub fn get_rows_amount(witness_amount: usize, k: usize) -> Result<usize> {
        Ok(RunningLayout::new(witness_amount, 1, 3, 2, k, 1)?.rows())
    }

    /// The challenges in item order.
    fn ordered<T: Copy>(chals: &[T]) -> Vec<T> {
        chals.iter().rev().copied().collect()
    }
}

impl<F: Scalar> Component<F> for BPoly {
    type Input = BPolyInput;
    type Result = BPolyResult;

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
        ShapeKey::new("kimchi_b_poly", &self.params.witness, &[], vec![self.k as u64])
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        Ok(BPolyResult {
            output: self.layout.final_var(&self.params.witness, start_row, 0)?,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        check_arity(self.k, input.chals.len())?;
        let x = table.value(&input.x)?;
        let items: Vec<Vec<F>> = Self::ordered(&table.values(&input.chals)?)
            .into_iter()
            .map(|c| vec![c])
            .collect();
        self.layout.assign(
            &ChallengeProduct,
            table,
            &self.params.witness,
            start_row,
            &[x],
            &items,
            &[],
        )?;
        <Self as Component<F>>::result(self, start_row)
    }

    fn configure_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>> {
        self.layout
            .configure_gates(&ChallengeProduct, circuit, &self.params.witness)
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
        check_arity(self.k, input.chals.len())?;
        let witness = &self.params.witness;
        for row in self.layout.lead_vars(witness, start_row)? {
            circuit.add_copy_constraint(row[0], input.x)?;
        }
        let cells = (0..self.k)
            .map(|i| self.layout.item_var(witness, start_row, i, 0))
            .collect::<Result<Vec<Var>>>()?;
        copy_all(circuit, &cells, &Self::ordered(&input.chals))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::components::test_utils::{place, public_inputs};
    use crate::constraint_system::checker::{is_satisfied, verify_assignment};
    use blueprint_algebra::bn254::BN254Scalar;

    type F = BN254Scalar;

    fn b_poly(chals: &[F], x: F) -> F {
        let k = chals.len();
        let mut pow = x;
        let mut prod = F::one();
        for i in 0..k {
            prod *= &(F::one() + chals[k - 1 - i] * pow);
            pow = pow.square();
        }
        prod
    }

    fn run(chals: &[F], x: F, witness_amount: usize) -> (bool, F) {
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::<F>::new(witness_amount, 1, 0);
        let mut values = vec![x];
        values.extend(chals.iter().copied());
        let vars = public_inputs(&mut table, 0, &values);
        let component =
            BPoly::new(ComponentParams::with_witness_amount(witness_amount), chals.len()).unwrap();
        let input = BPolyInput {
            chals: vars[1..].to_vec(),
            x: vars[0],
        };
        let result = place(&component, &mut circuit, &mut table, &input, 0);
        (
            is_satisfied(&circuit, &table),
            table.value(&result.output).unwrap(),
        )
    }

    #[test]
    fn matches_the_product() {
        let mut prng = test_rng();
        let x = F::random(&mut prng);
        for k in [0, 1, 5, 16] {
            let chals: Vec<F> = (0..k).map(|_| F::random(&mut prng)).collect();
            for witness_amount in [4, 7, 10, 15] {
                assert_eq!(run(&chals, x, witness_amount), (true, b_poly(&chals, x)));
            }
        }
    }

    #[test]
    fn small_values() {
        // (1 + 3 * 2) * (1 + 1 * 4) with chals [1, 3]
        let chals = [F::one(), F::from(3u32)];
        assert_eq!(run(&chals, F::from(2u32), 4), (true, F::from(35u32)));
        let component = BPoly::new(ComponentParams::with_witness_amount(4), 2).unwrap();
        assert_eq!(
            BPoly::get_rows_amount(4, 2).unwrap(),
            <BPoly as Component<F>>::rows_amount(&component)
        );
    }

    #[test]
    fn challenge_order_matters() {
        let chals = [F::one(), F::from(3u32)];
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::<F>::new(4, 1, 0);
        let vars = public_inputs(&mut table, 0, &[F::from(2u32), chals[0], chals[1]]);
        let component = BPoly::new(ComponentParams::with_witness_amount(4), 2).unwrap();
        let input = BPolyInput {
            chals: vars[1..].to_vec(),
            x: vars[0],
        };
        place(&component, &mut circuit, &mut table, &input, 0);
        verify_assignment(&circuit, &table).unwrap();

        // a witness computed with the challenges reversed
        let swapped = BPolyInput {
            chals: vec![vars[2], vars[1]],
            x: vars[0],
        };
        let mut other = AssignmentTable::<F>::new(4, 1, 0);
        public_inputs(&mut other, 0, &[F::from(2u32), chals[0], chals[1]]);
        component.generate_assignments(&mut other, &swapped, 0).unwrap();
        component
            .generate_circuit(&mut Circuit::new(), &mut other, &swapped, 0)
            .unwrap();
        assert!(!is_satisfied(&circuit, &other));
    }
}
