use crate::component::{check_arity, Component, ComponentParams, Manifest};
use crate::components::copy_all;
use crate::constraint_system::{
    AssignmentTable, Circuit, Expression, LookupConstraint, ShapeKey, Var, RANGE_16BIT,
};
use crate::errors::{BlueprintError, Result};
use crate::layout::{RunningAccumulator, RunningLayout};
use blueprint_algebra::prelude::*;

const LIMB_BITS: usize = 16;

/// The chunks to range check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeCheckInput {
    /// the chunks, each asserted below `2^bit_size_chunk`.
    pub chunks: Vec<Var>,
}

/// The limbs of every chunk, least significant first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeCheckResult {
    /// `limbs[i][j]` is limb `j` of chunk `i`.
    pub limbs: Vec<Vec<Var>>,
}

/// `x = sum_j limb_j * 2^(16 j)`; every limb is looked up in `range_16bit`,
/// and the top limb once more shifted so that it spans only `r` bits.
struct LimbSum {
    limbs: usize,
    top_bits: usize,
}

impl<F: Scalar> RunningAccumulator<F> for LimbSum {
    fn initial<T: Arithmetic<F>>(&self, _lead: &[T]) -> Vec<T> {
        vec![T::constant(F::zero())]
    }

    fn step<T: Arithmetic<F>>(&self, _acc: &[T], inputs: &[T], _lead: &[T]) -> Vec<T> {
        let shift = T::constant(F::from(1u64 << LIMB_BITS));
        let x = inputs
            .iter()
            .rev()
            .cloned()
            .reduce(|acc, limb| acc * shift.clone() + limb);
        vec![x.unwrap_or_else(|| T::constant(F::zero()))]
    }

    fn item_lookups(
        &self,
        circuit: &mut Circuit<F>,
        inputs: &[Expression<F>],
    ) -> Result<Vec<LookupConstraint<F>>> {
        let table_id = circuit.lookup_table_id(RANGE_16BIT)?;
        let mut lookups: Vec<LookupConstraint<F>> = inputs
            .iter()
            .map(|limb| LookupConstraint {
                table_id,
                lookup_input: vec![limb.clone()],
            })
            .collect();
        if self.top_bits < LIMB_BITS {
            let shift = F::from(1u64 << (LIMB_BITS - self.top_bits));
            lookups.push(LookupConstraint {
                table_id,
                lookup_input: vec![inputs[self.limbs - 1].clone() * Expression::constant(shift)],
            });
        }
        Ok(lookups)
    }

    fn finalize<T: Arithmetic<F>>(&self, acc: &[T], _final_inputs: &[T], _lead: &[T]) -> Vec<T> {
        acc.to_vec()
    }
}

/// Range check of several chunks of `bit_size_chunk` bits through 16-bit
/// limbs.
///
/// Each chunk is an item `[limb_0, ..., limb_{L-1}, x]` with
/// `L = ceil(bit_size_chunk / 16)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangeCheckMulti {
    params: ComponentParams,
    num_chunks: usize,
    bit_size_chunk: usize,
    layout: RunningLayout,
}

impl RangeCheckMulti {
    /// The requirements for chunks of `bit_size_chunk` bits.
    pub fn manifest(bit_size_chunk: usize) -> Manifest {
        Manifest::new(ceil_div(bit_size_chunk.max(1), LIMB_BITS) + 1, None, 0)
    }

    /// Create the component.
    pub fn new<F: Scalar>(
        params: ComponentParams,
        num_chunks: usize,
        bit_size_chunk: usize,
    ) -> Result<Self> {
        if bit_size_chunk == 0 || bit_size_chunk >= F::capacity() {
            return Err(BlueprintError::InvalidConfiguration {
                parameter: "bit_size_chunk",
                reason: format!("must be in [1, {})", F::capacity()),
            });
        }
        if num_chunks == 0 {
            return Err(BlueprintError::InvalidConfiguration {
                parameter: "num_chunks",
                reason: "must be positive".to_string(),
            });
        }
        Self::manifest(bit_size_chunk).check(&params)?;
        let limbs = ceil_div(bit_size_chunk, LIMB_BITS);
        let layout = RunningLayout::new(params.witness_amount(), 0, limbs + 1, 1, num_chunks, 0)?;
        Ok(Self {
            params,
            num_chunks,
            bit_size_chunk,
            layout,
        })
    }

    /// The rows for `num_chunks` chunks of `bit_size_chunk` bits.
    pub fn get_rows_amount(witness_amount: usize, num_chunks: usize, bit_size_chunk: usize) -> Result<usize> {
        let limbs = ceil_div(bit_size_chunk.max(1), LIMB_BITS);
        Ok(RunningLayout::new(witness_amount, 0, limbs + 1, 1, num_chunks, 0)?.rows())
    }

    fn limbs(&self) -> usize {
        ceil_div(self.bit_size_chunk, LIMB_BITS)
    }

    fn sum(&self) -> LimbSum {
        let limbs = self.limbs();
        LimbSum {
            limbs,
            top_bits: self.bit_size_chunk - (limbs - 1) * LIMB_BITS,
        }
    }

    /// The limbs of `x`; the top limb keeps every bit above the lower limbs.
    fn split<F: Scalar>(&self, x: &F) -> Vec<F> {
        let value: BigUint = x.into_biguint();
        let mask = BigUint::from((1u64 << LIMB_BITS) - 1);
        let limbs = self.limbs();
        (0..limbs)
            .map(|j| {
                let shifted = &value >> (LIMB_BITS * j);
                let limb = if j + 1 == limbs { shifted } else { shifted & &mask };
                F::from(&limb)
            })
            .collect()
    }
}

impl<F: Scalar> Component<F> for RangeCheckMulti {
    type Input = RangeCheckInput;
    type Result = RangeCheckResult;

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
        ShapeKey::new(
            "range_check_multi",
            &self.params.witness,
            &[],
            vec![self.num_chunks as u64, self.bit_size_chunk as u64],
        )
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        let witness = &self.params.witness;
        Ok(RangeCheckResult {
            limbs: (0..self.num_chunks)
                .map(|i| {
                    (0..self.limbs())
                        .map(|j| self.layout.item_var(witness, start_row, i, j))
                        .collect()
                })
                .collect::<Result<Vec<Vec<Var>>>>()?,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        check_arity(self.num_chunks, input.chunks.len())?;
        let items: Vec<Vec<F>> = table
            .values(&input.chunks)?
            .iter()
            .map(|x| self.split(x))
            .collect();
        self.layout.assign(
            &self.sum(),
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
            .configure_gates(&self.sum(), circuit, &self.params.witness)
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
        let cells = (0..self.num_chunks)
            .map(|i| self.layout.acc_var(&self.params.witness, start_row, i, 0))
            .collect::<Result<Vec<Var>>>()?;
        copy_all(circuit, &cells, &input.chunks)
    }
}
