use crate::component::{Component, ComponentParams, Manifest};
use crate::constraint_system::{AssignmentTable, Circuit, ShapeKey, Var};
use crate::errors::Result;
use crate::layout::{RunningAccumulator, RunningLayout};
use blueprint_algebra::prelude::*;

/// The input of a [`FixedPowerExponentiation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPowerInput {
    /// the base.
    pub x: Var,
}

/// The output of a [`FixedPowerExponentiation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPowerResult {
    /// `x^exponent`.
    pub output: Var,
}

/// Left-to-right square and multiply: `acc <- acc^2 * (1 + bit * (x - 1))`.
struct SquareAndMultiply;

impl<F: Scalar> RunningAccumulator<F> for SquareAndMultiply {
    fn initial<T: Arithmetic<F>>(&self, _lead: &[T]) -> Vec<T> {
        vec![T::constant(F::one())]
    }

    fn step<T: Arithmetic<F>>(&self, acc: &[T], inputs: &[T], lead: &[T]) -> Vec<T> {
        let one = T::constant(F::one());
        let factor = one.clone() + inputs[0].clone() * (lead[0].clone() - one);
        vec![acc[0].clone() * acc[0].clone() * factor]
    }

    fn finalize<T: Arithmetic<F>>(&self, acc: &[T], _final_inputs: &[T], _lead: &[T]) -> Vec<T> {
        vec![acc[0].clone()]
    }
}

/// `x^e` for an exponent fixed by the shape.
///
/// Lead `[x]`, items `[bit, acc]` most significant bit first, final `[out]`.
/// The bit cells are copy-constrained to constant cells holding 1 and 0 at
/// the first two rows of the first constant column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedPowerExponentiation {
    params: ComponentParams,
    exponent: BigUint,
    bits: Vec<bool>,
    layout: RunningLayout,
}

impl FixedPowerExponentiation {
    /// The requirements of the component.
    pub fn manifest() -> Manifest {
        Manifest::new(3, None, 1)
    }

    /// Create the component for `x^exponent`.
    pub fn new(params: ComponentParams, exponent: BigUint) -> Result<Self> {
        Self::manifest().check(&params)?;
        let bits = biguint_to_bits_be(&exponent);
        let layout = RunningLayout::new(params.witness_amount(), 1, 2, 1, bits.len(), 1)?;
        Ok(Self {
            params,
            exponent,
            bits,
            layout,
        })
    }

    /// The rows a component of this shape occupies.
    pub fn get_rows_amount(witness_amount: usize, exponent: &BigUint) -> Result<usize> {
        let bits = biguint_to_bits_be(exponent);
        let layout = RunningLayout::new(witness_amount, 1, 2, 1, bits.len(), 1)?;
        Ok(layout.rows().max(Self::constant_rows(&bits)))
    }

    fn constant_rows(bits: &[bool]) -> usize {
        if bits.iter().all(|b| *b) {
            1
        } else {
            2
        }
    }

    fn constant_var(&self, bit: bool, start_row: usize) -> Result<Var> {
        Var::constant(self.params.constant[0], start_row + if bit { 0 } else { 1 })
    }
}

impl<F: Scalar> Component<F> for FixedPowerExponentiation {
    type Input = FixedPowerInput;
    type Result = FixedPowerResult;

    fn params(&self) -> &ComponentParams {
        &self.params
    }

    fn rows_amount(&self) -> usize {
        self.layout.rows().max(Self::constant_rows(&self.bits))
    }

    fn gates_amount(&self) -> usize {
        self.layout.gates_amount()
    }

    fn shape_key(&self) -> ShapeKey {
        ShapeKey::new(
            "fixed_power_exponentiation",
            &self.params.witness,
            &self.params.constant[..1],
            self.exponent.to_u64_digits(),
        )
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        Ok(FixedPowerResult {
            output: self.layout.final_var(&self.params.witness, start_row, 0)?,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        let x = table.value(&input.x)?;
        let items: Vec<Vec<F>> = self
            .bits
            .iter()
            .map(|b| vec![if *b { F::one() } else { F::zero() }])
            .collect();
        self.layout.assign(
            &SquareAndMultiply,
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
            .configure_gates(&SquareAndMultiply, circuit, &self.params.witness)
    }

    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<()> {
        self.layout.enable_selectors(table, selectors, start_row)
    }

    fn assign_constants(&self, table: &mut AssignmentTable<F>, start_row: usize) -> Result<()> {
        let column = self.params.constant[0];
        table.assign_constant(column, start_row, F::one())?;
        if Self::constant_rows(&self.bits) > 1 {
            table.assign_constant(column, start_row + 1, F::zero())?;
        }
        Ok(())
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        let witness = &self.params.witness;
        for row in self.layout.lead_vars(witness, start_row)? {
            circuit.add_copy_constraint(row[0], input.x)?;
        }
        for (i, bit) in self.bits.iter().enumerate() {
            circuit.add_copy_constraint(
                self.layout.item_var(witness, start_row, i, 0)?,
                self.constant_var(*bit, start_row)?,
            )?;
        }
        Ok(())
    }
}
