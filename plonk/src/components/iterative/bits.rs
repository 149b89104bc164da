use crate::component::{check_arity, Component, ComponentParams, Manifest};
use crate::components::{bit_at, copy_all};
use crate::constraint_system::{AssignmentTable, Circuit, ShapeKey, Var};
use crate::errors::{BlueprintError, Result};
use crate::layout::{RunningAccumulator, RunningLayout};
use blueprint_algebra::prelude::*;

/// The order of a list of bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitOrder {
    /// most significant bit first.
    Msb,
    /// least significant bit first.
    Lsb,
}

/// `acc <- 2 * acc + bit`, optionally constraining each bit to be boolean.
struct BinaryFold {
    check_bits: bool,
}

impl<F: Scalar> RunningAccumulator<F> for BinaryFold {
    fn initial<T: Arithmetic<F>>(&self, _lead: &[T]) -> Vec<T> {
        vec![T::constant(F::zero())]
    }

    fn step<T: Arithmetic<F>>(&self, acc: &[T], inputs: &[T], _lead: &[T]) -> Vec<T> {
        vec![acc[0].clone() * T::constant(F::from(2u32)) + inputs[0].clone()]
    }

    fn item_constraints<T: Arithmetic<F>>(&self, inputs: &[T], _lead: &[T]) -> Vec<T> {
        if !self.check_bits {
            return vec![];
        }
        let bit = inputs[0].clone();
        vec![bit.clone() * bit.clone() - bit]
    }

    fn finalize<T: Arithmetic<F>>(&self, acc: &[T], _final_inputs: &[T], _lead: &[T]) -> Vec<T> {
        vec![acc[0].clone()]
    }
}

/// Shared shape of the decomposition and composition components: items
/// `[bit, acc]` most significant bit first, final `[x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct BitsShape {
    params: ComponentParams,
    bits: usize,
    order: BitOrder,
    layout: RunningLayout,
}

impl BitsShape {
    fn new<F: Scalar>(params: ComponentParams, bits: usize, order: BitOrder) -> Result<Self> {
        Manifest::new(2, None, 0).check(&params)?;
        if bits == 0 || bits > F::capacity() {
            return Err(BlueprintError::InvalidConfiguration {
                parameter: "bits",
                reason: format!("must be in [1, {}]", F::capacity()),
            });
        }
        let layout = RunningLayout::new(params.witness_amount(), 0, 2, 1, bits, 1)?;
        Ok(Self {
            params,
            bits,
            order,
            layout,
        })
    }

    /// Item index of the `k`-th bit in the caller's order.
    fn item(&self, k: usize) -> usize {
        match self.order {
            BitOrder::Msb => k,
            BitOrder::Lsb => self.bits - 1 - k,
        }
    }

    fn bit_vars(&self, start_row: usize) -> Result<Vec<Var>> {
        (0..self.bits)
            .map(|k| self.layout.item_var(&self.params.witness, start_row, self.item(k), 0))
            .collect()
    }

    fn x_var(&self, start_row: usize) -> Result<Var> {
        self.layout.final_var(&self.params.witness, start_row, 0)
    }

    fn assign<F: Scalar>(
        &self,
        fold: &BinaryFold,
        table: &mut AssignmentTable<F>,
        msb_first: &[F],
        start_row: usize,
    ) -> Result<()> {
        let items: Vec<Vec<F>> = msb_first.iter().map(|b| vec![*b]).collect();
        self.layout
            .assign(fold, table, &self.params.witness, start_row, &[], &items, &[])?;
        Ok(())
    }

    fn key(&self, name: &str, check_bits: bool) -> ShapeKey {
        ShapeKey::new(
            name,
            &self.params.witness,
            &[],
            vec![self.bits as u64, check_bits as u64],
        )
    }
}

/// The input of a [`BitDecomposition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitDecompositionInput {
    /// the decomposed value.
    pub x: Var,
}

/// The bits produced by a [`BitDecomposition`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitsResult {
    /// the bits in the requested order.
    pub bits: Vec<Var>,
}

/// Decomposition of a value into `bits` boolean cells.
///
/// The circuit is satisfiable only when the value is below `2^bits`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitDecomposition {
    shape: BitsShape,
}

impl BitDecomposition {
    /// Create the component.
    pub fn new<F: Scalar>(params: ComponentParams, bits: usize, order: BitOrder) -> Result<Self> {
        Ok(Self {
            shape: BitsShape::new::<F>(params, bits, order)?,
        })
    }

    /// The rows a component of this shape occupies.
    pub fn get_rows_amount(witness_amount: usize, bits: usize) -> Result<usize> {
        Ok(RunningLayout::new(witness_amount, 0, 2, 1, bits, 1)?.rows())
    }
}

impl<F: Scalar> Component<F> for BitDecomposition {
    type Input = BitDecompositionInput;
    type Result = BitsResult;

    fn params(&self) -> &ComponentParams {
        &self.shape.params
    }

    fn rows_amount(&self) -> usize {
        self.shape.layout.rows()
    }

    fn gates_amount(&self) -> usize {
        self.shape.layout.gates_amount()
    }

    fn shape_key(&self) -> ShapeKey {
        self.shape.key("bit_decomposition", true)
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        Ok(BitsResult {
            bits: self.shape.bit_vars(start_row)?,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        let x = table.value(&input.x)?;
        let msb_first: Vec<F> = (0..self.shape.bits)
            .rev()
            .map(|j| if bit_at(&x, j) { F::one() } else { F::zero() })
            .collect();
        self.shape.assign(
            &BinaryFold { check_bits: true },
            table,
            &msb_first,
            start_row,
        )?;
        <Self as Component<F>>::result(self, start_row)
    }

    fn configure_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>> {
        self.shape.layout.configure_gates(
            &BinaryFold { check_bits: true },
            circuit,
            &self.shape.params.witness,
        )
    }

    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<()> {
        self.shape.layout.enable_selectors(table, selectors, start_row)
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        circuit.add_copy_constraint(self.shape.x_var(start_row)?, input.x)
    }
}

/// The input of a [`BitComposition`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitCompositionInput {
    /// the bits, in the order of the component.
    pub bits: Vec<Var>,
}

/// The value produced by a [`BitComposition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComposedResult {
    /// `sum_j bit_j * 2^j`.
    pub x: Var,
}

/// Composition of `bits` bits into a value; with `check_input` each bit is
/// also constrained to be boolean.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitComposition {
    shape: BitsShape,
    check_input: bool,
}

impl BitComposition {
    /// Create the component.
    pub fn new<F: Scalar>(
        params: ComponentParams,
        bits: usize,
        order: BitOrder,
        check_input: bool,
    ) -> Result<Self> {
        Ok(Self {
            shape: BitsShape::new::<F>(params, bits, order)?,
            check_input,
        })
    }

    fn fold(&self) -> BinaryFold {
        BinaryFold {
            check_bits: self.check_input,
        }
    }
}

impl<F: Scalar> Component<F> for BitComposition {
    type Input = BitCompositionInput;
    type Result = ComposedResult;

    fn params(&self) -> &ComponentParams {
        &self.shape.params
    }

    fn rows_amount(&self) -> usize {
        self.shape.layout.rows()
    }

    fn gates_amount(&self) -> usize {
        self.shape.layout.gates_amount()
    }

    fn shape_key(&self) -> ShapeKey {
        self.shape.key("bit_composition", self.check_input)
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        Ok(ComposedResult {
            x: self.shape.x_var(start_row)?,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        check_arity(self.shape.bits, input.bits.len())?;
        let values = table.values(&input.bits)?;
        let msb_first: Vec<F> = (0..self.shape.bits)
            .map(|i| match self.shape.order {
                BitOrder::Msb => values[i],
                BitOrder::Lsb => values[self.shape.bits - 1 - i],
            })
            .collect();
        self.shape
            .assign(&self.fold(), table, &msb_first, start_row)?;
        <Self as Component<F>>::result(self, start_row)
    }

    fn configure_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>> {
        self.shape
            .layout
            .configure_gates(&self.fold(), circuit, &self.shape.params.witness)
    }

    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<()> {
        self.shape.layout.enable_selectors(table, selectors, start_row)
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        copy_all(circuit, &self.shape.bit_vars(start_row)?, &input.bits)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::components::test_utils::{place, public_inputs};
    use crate::constraint_system::checker::{is_satisfied, verify_assignment};
    use blueprint_algebra::bn254::BN254Scalar;

    type F = BN254Scalar;

    fn decompose(x: F, bits: usize, order: BitOrder, witness_amount: usize) -> (bool, Vec<F>) {
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::<F>::new(witness_amount, 1, 0);
        let vars = public_inputs(&mut table, 0, &[x]);
        let component = BitDecomposition::new::<F>(
            ComponentParams::with_witness_amount(witness_amount),
            bits,
            order,
        )
        .unwrap();
        let result = place(
            &component,
            &mut circuit,
            &mut table,
            &BitDecompositionInput { x: vars[0] },
            2,
        );
        (
            is_satisfied(&circuit, &table),
            table.values(&result.bits).unwrap(),
        )
    }

    #[test]
    fn decompose_in_both_orders() {
        let x = F::from(0b1011_0010u32);
        let (ok, lsb) = decompose(x, 8, BitOrder::Lsb, 3);
        assert!(ok);
        let expected: Vec<F> = [0u32, 1, 0, 0, 1, 1, 0, 1].iter().map(|b| F::from(*b)).collect();
        assert_eq!(lsb, expected);

        let (ok, msb) = decompose(x, 8, BitOrder::Msb, 7);
        assert!(ok);
        assert_eq!(msb, expected.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn wide_values() {
        let x = F::from(u64::MAX) * F::from(3u32);
        for witness_amount in [2, 5, 16] {
            let (ok, bits) = decompose(x, 70, BitOrder::Lsb, witness_amount);
            assert!(ok);
            let back = bits
                .iter()
                .rev()
                .fold(F::zero(), |acc, b| acc * F::from(2u32) + *b);
            assert_eq!(back, x);
        }
    }

    #[test]
    fn values_above_the_range_are_rejected() {
        let (ok, _) = decompose(F::from(256u32), 8, BitOrder::Msb, 4);
        assert!(!ok);
        assert!(BitDecomposition::new::<F>(
            ComponentParams::with_witness_amount(4),
            F::capacity() + 1,
            BitOrder::Msb
        )
        .is_err());
    }

    #[test]
    fn compose_and_check_bits() {
        let bits: Vec<F> = [1u32, 1, 0, 1].iter().map(|b| F::from(*b)).collect();
        for order in [BitOrder::Msb, BitOrder::Lsb] {
            let mut circuit = Circuit::new();
            let mut table = AssignmentTable::<F>::new(4, 1, 0);
            let vars = public_inputs(&mut table, 0, &bits);
            let component =
                BitComposition::new::<F>(ComponentParams::with_witness_amount(4), 4, order, true)
                    .unwrap();
            let result = place(
                &component,
                &mut circuit,
                &mut table,
                &BitCompositionInput { bits: vars },
                0,
            );
            verify_assignment(&circuit, &table).unwrap();
            let expected = if order == BitOrder::Msb { 13u32 } else { 11 };
            assert_eq!(table.value(&result.x).unwrap(), F::from(expected));
        }
    }

    #[test]
    fn unchecked_composition_accepts_any_digit() {
        let digits: Vec<F> = [2u32, 3].iter().map(|b| F::from(*b)).collect();
        let run = |check_input: bool| {
            let mut circuit = Circuit::new();
            let mut table = AssignmentTable::<F>::new(2, 1, 0);
            let vars = public_inputs(&mut table, 0, &digits);
            let component = BitComposition::new::<F>(
                ComponentParams::with_witness_amount(2),
                2,
                BitOrder::Msb,
                check_input,
            )
            .unwrap();
            let result = place(
                &component,
                &mut circuit,
                &mut table,
                &BitCompositionInput { bits: vars },
                0,
            );
            assert_eq!(table.value(&result.x).unwrap(), F::from(7u32));
            is_satisfied(&circuit, &table)
        };
        assert!(run(false));
        assert!(!run(true));
    }
}
