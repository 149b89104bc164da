use crate::component::{Component, ComponentParams, Manifest};
use crate::constraint_system::{
    sparse_chunk, AssignmentTable, Circuit, Expression, LookupConstraint, ShapeKey, Var,
    KECCAK_PACK, KECCAK_PACK_CANONICAL,
};
use crate::errors::{BlueprintError, Result};
use crate::layout::{RunningAccumulator, RunningLayout};
use blueprint_algebra::prelude::*;

const CHUNKS: usize = 8;
const CHUNK_BITS: usize = 8;

/// The direction of a [`KeccakPack`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackMode {
    /// 64-bit lane to sparse word.
    Pack,
    /// sparse word to 64-bit lane.
    Unpack,
}

/// The input of a [`KeccakPack`]: a lane, or a sparse word when unpacking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeccakPackInput {
    /// the converted value.
    pub value: Var,
}

/// The output of a [`KeccakPack`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeccakPackResult {
    /// the value in the other representation.
    pub output: Var,
}

/// Two running sums over the byte chunks, most significant first:
/// `acc_n <- 256 * acc_n + c` and `acc_s <- 8^8 * acc_s + s`, every
/// `(c, s)` looked up in `table`.
struct ChunkFold {
    table: &'static str,
}

impl<F: Scalar> RunningAccumulator<F> for ChunkFold {
    fn initial<T: Arithmetic<F>>(&self, _lead: &[T]) -> Vec<T> {
        vec![T::constant(F::zero()), T::constant(F::zero())]
    }

    fn step<T: Arithmetic<F>>(&self, acc: &[T], inputs: &[T], _lead: &[T]) -> Vec<T> {
        let normal_shift = T::constant(F::from(1u64 << CHUNK_BITS));
        let sparse_shift = T::constant(F::from(1u64 << (3 * CHUNK_BITS)));
        vec![
            acc[0].clone() * normal_shift + inputs[0].clone(),
            acc[1].clone() * sparse_shift + inputs[1].clone(),
        ]
    }

    fn item_lookups(
        &self,
        circuit: &mut Circuit<F>,
        inputs: &[Expression<F>],
    ) -> Result<Vec<LookupConstraint<F>>> {
        Ok(vec![LookupConstraint {
            table_id: circuit.lookup_table_id(self.table)?,
            lookup_input: inputs.to_vec(),
        }])
    }

    fn finalize<T: Arithmetic<F>>(&self, acc: &[T], _final_inputs: &[T], _lead: &[T]) -> Vec<T> {
        acc.to_vec()
    }
}

/// Conversion between a 64-bit lane and its sparse form, where bit `j` of the
/// lane becomes base-8 digit `j`.
///
/// Items `[chunk, sparse_chunk, acc, acc_sparse]` for the eight bytes; final
/// `[normal, sparse]`. Packing looks every pair up in `keccak_pack_canonical`
/// so the output is the canonical sparse word; unpacking accepts any digits
/// through their parity in `keccak_pack`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeccakPack {
    params: ComponentParams,
    mode: PackMode,
    layout: RunningLayout,
}

impl KeccakPack {
    /// The requirements of the component.
    pub fn manifest() -> Manifest {
        Manifest::new(4, None, 0)
    }

    /// Create the component.
    pub fn new<F: Scalar>(params: ComponentParams, mode: PackMode) -> Result<Self> {
        Self::manifest().check(&params)?;
        if F::capacity() < 3 * 64 {
            return Err(BlueprintError::InvalidConfiguration {
                parameter: "field",
                reason: format!("capacity {} cannot hold a sparse lane", F::capacity()),
            });
        }
        let layout = RunningLayout::new(params.witness_amount(), 0, 4, 2, CHUNKS, 2)?;
        Ok(Self {
            params,
            mode,
            layout,
        })
    }

    pub fn get_rows_amount(witness_amount: usize) -> Result<usize> {
        Ok(RunningLayout::new(witness_amount, 0, 4, 2, CHUNKS, 2)?.rows())
    }

    fn fold(&self) -> ChunkFold {
        let table = match self.mode {
            PackMode::Pack => KECCAK_PACK_CANONICAL,
            PackMode::Unpack => KECCAK_PACK,
        };
        ChunkFold { table }
    }

    /// `(chunk, sparse_chunk)` pairs, most significant first.
    fn chunks<F: Scalar>(&self, value: &F) -> Vec<(u64, u64)> {
        match self.mode {
            PackMode::Pack => {
                let lane = value.get_little_endian_u64().first().copied().unwrap_or(0);
                (0..CHUNKS)
                    .rev()
                    .map(|i| {
                        let c = (lane >> (CHUNK_BITS * i)) & 0xFF;
                        (c, sparse_chunk(c, CHUNK_BITS))
                    })
                    .collect()
            }
            PackMode::Unpack => {
                let word: BigUint = value.into_biguint();
                let mask = BigUint::from((1u64 << (3 * CHUNK_BITS)) - 1);
                (0..CHUNKS)
                    .rev()
                    .map(|i| {
                        let s = ((&word >> (3 * CHUNK_BITS * i)) & &mask)
                            .to_u64_digits()
                            .first()
                            .copied()
                            .unwrap_or(0);
                        let c = (0..CHUNK_BITS).fold(0u64, |acc, j| acc | (((s >> (3 * j)) & 1) << j));
                        (c, s)
                    })
                    .collect()
            }
        }
    }

    fn cells(&self, start_row: usize) -> Result<(Var, Var)> {
        let normal = self.layout.final_var(&self.params.witness, start_row, 0)?;
        let sparse = self.layout.final_var(&self.params.witness, start_row, 1)?;
        Ok(match self.mode {
            PackMode::Pack => (normal, sparse),
            PackMode::Unpack => (sparse, normal),
        })
    }
}

impl<F: Scalar> Component<F> for KeccakPack {
    type Input = KeccakPackInput;
    type Result = KeccakPackResult;

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
        ShapeKey::new("keccak_pack", &self.params.witness, &[], vec![self.mode as u64])
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        Ok(KeccakPackResult {
            output: self.cells(start_row)?.1,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        let value = table.value(&input.value)?;
        let items: Vec<Vec<F>> = self
            .chunks(&value)
            .into_iter()
            .map(|(c, s)| vec![F::from(c), F::from(s)])
            .collect();
        self.layout.assign(
            &self.fold(),
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
            .configure_gates(&self.fold(), circuit, &self.params.witness)
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
        circuit.add_copy_constraint(self.cells(start_row)?.0, input.value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::components::test_utils::{place, public_inputs};
    use crate::constraint_system::checker::{is_satisfied, verify_assignment};
    use blueprint_algebra::bn254::BN254Scalar;

    type F = BN254Scalar;

    fn sparse_lane(lane: u64) -> F {
        (0..64).rev().fold(F::zero(), |acc, j| {
            acc * F::from(8u32) + F::from((lane >> j) & 1)
        })
    }

    fn convert(value: F, mode: PackMode, witness_amount: usize) -> (bool, F) {
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::<F>::new(witness_amount, 1, 0);
        let vars = public_inputs(&mut table, 0, &[value]);
        let component =
            KeccakPack::new::<F>(ComponentParams::with_witness_amount(witness_amount), mode).unwrap();
        let result = place(
            &component,
            &mut circuit,
            &mut table,
            &KeccakPackInput { value: vars[0] },
            0,
        );
        (
            is_satisfied(&circuit, &table),
            table.value(&result.output).unwrap(),
        )
    }

    #[test]
    fn pack_lanes() {
        for lane in [0u64, 1, 0x0123_4567_89AB_CDEF, u64::MAX] {
            for witness_amount in [4, 9, 16] {
                let (ok, sparse) = convert(F::from(lane), PackMode::Pack, witness_amount);
                assert!(ok);
                assert_eq!(sparse, sparse_lane(lane));
            }
        }
    }

    #[test]
    fn unpack_takes_digit_parity() {
        let lane = 0xF0E1_D2C3_B4A5_9687u64;
        let (ok, normal) = convert(sparse_lane(lane), PackMode::Unpack, 8);
        assert!(ok);
        assert_eq!(normal, F::from(lane));

        // raise digits 0 and 1 from 1 to 3
        let word = sparse_lane(lane) + F::from(2u32) + F::from(16u32);
        let (ok, normal) = convert(word, PackMode::Unpack, 8);
        assert!(ok);
        assert_eq!(normal, F::from(lane));
    }

    #[test]
    fn oversized_lane_is_rejected() {
        let (ok, _) = convert(F::from(u64::MAX) + F::one(), PackMode::Pack, 4);
        assert!(!ok);
    }

    #[test]
    fn forged_sparse_digit_fails() {
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::<F>::new(4, 1, 0);
        let vars = public_inputs(&mut table, 0, &[F::one()]);
        let component =
            KeccakPack::new::<F>(ComponentParams::with_witness_amount(4), PackMode::Pack).unwrap();
        let result = place(
            &component,
            &mut circuit,
            &mut table,
            &KeccakPackInput { value: vars[0] },
            0,
        );
        verify_assignment(&circuit, &table).unwrap();
        assert_eq!(table.value(&result.output).unwrap(), F::one());

        // digit 0 raised from 1 to 7 keeps its parity
        let witness = &component.params.witness;
        let last = CHUNKS - 1;
        for cell in [
            component.layout.item_var(witness, 0, last, 1).unwrap(),
            component.layout.item_var(witness, 0, last, 3).unwrap(),
            result.output,
        ] {
            table
                .replace_witness(cell.index, cell.row().unwrap(), F::from(7u32))
                .unwrap();
        }
        assert!(!is_satisfied(&circuit, &table));
    }

    #[test]
    fn both_directions_round_trip() {
        let params = ComponentParams::with_witness_amount(6);
        let pack = KeccakPack::new::<F>(params.clone(), PackMode::Pack).unwrap();
        let unpack = KeccakPack::new::<F>(params, PackMode::Unpack).unwrap();
        let mut circuit = Circuit::<F>::new();
        let mut table = AssignmentTable::<F>::new(6, 1, 0);
        let vars = public_inputs(&mut table, 0, &[F::from(0xABCDu64)]);
        let packed = place(
            &pack,
            &mut circuit,
            &mut table,
            &KeccakPackInput { value: vars[0] },
            0,
        );
        let gates = circuit.gates().len();
        assert!(gates > 0);
        let start = <KeccakPack as Component<F>>::rows_amount(&pack);
        let unpacked = place(
            &unpack,
            &mut circuit,
            &mut table,
            &KeccakPackInput {
                value: packed.output,
            },
            start,
        );
        assert_eq!(circuit.gates().len(), 2 * gates);
        verify_assignment(&circuit, &table).unwrap();
        assert_eq!(table.value(&unpacked.output).unwrap(), F::from(0xABCDu64));
        assert_eq!(circuit.lookup_library().len(), 2);
    }
}
