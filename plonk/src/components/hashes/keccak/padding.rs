use crate::component::{check_arity, Component, ComponentParams, Manifest};
use crate::components::hashes::keccak::RATE_BYTES;
use crate::constraint_system::{
    AssignmentTable, Circuit, Expression, LookupConstraint, ShapeKey, Var, BYTE_RANGE,
};
use crate::errors::Result;
use crate::layout::{RunningAccumulator, RunningLayout};
use blueprint_algebra::prelude::*;

/// The values a padding byte can take, in the order they sit in the
/// constant column.
const PAD_VALUES: [u64; 4] = [0x00, 0x01, 0x80, 0x81];

/// The inputs of a [`KeccakPadding`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeccakPaddingInput {
    /// the message bytes.
    pub message: Vec<Var>,
}

/// The padded message as little-endian lanes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeccakPaddingResult {
    /// the lanes, a multiple of the rate.
    pub lanes: Vec<Var>,
}

/// `lane = sum_j b_j * 256^j`; the lanes do not depend on each other.
struct LaneSum;

impl<F: Scalar> RunningAccumulator<F> for LaneSum {
    fn initial<T: Arithmetic<F>>(&self, _lead: &[T]) -> Vec<T> {
        vec![T::constant(F::zero())]
    }

    fn step<T: Arithmetic<F>>(&self, _acc: &[T], inputs: &[T], _lead: &[T]) -> Vec<T> {
        let shift = T::constant(F::from(256u32));
        let lane = inputs
            .iter()
            .rev()
            .cloned()
            .reduce(|acc, b| acc * shift.clone() + b);
        vec![lane.unwrap_or_else(|| T::constant(F::zero()))]
    }

    fn item_lookups(
        &self,
        circuit: &mut Circuit<F>,
        inputs: &[Expression<F>],
    ) -> Result<Vec<LookupConstraint<F>>> {
        let table_id = circuit.lookup_table_id(BYTE_RANGE)?;
        Ok(inputs
            .iter()
            .map(|b| LookupConstraint {
                table_id,
                lookup_input: vec![b.clone()],
            })
            .collect())
    }

    fn finalize<T: Arithmetic<F>>(&self, acc: &[T], _final_inputs: &[T], _lead: &[T]) -> Vec<T> {
        acc.to_vec()
    }
}

/// Keccak multi-rate padding of a message of fixed length.
///
/// The message is followed by `0x01`, zero bytes and a final `0x80` up to the
/// next multiple of the rate; a single padding byte is `0x81`. Each lane is an
/// item `[b_0, ..., b_7, lane]` with its bytes looked up in `byte_range`.
/// Padding bytes are copy-constrained to constant cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeccakPadding {
    params: ComponentParams,
    message_bytes: usize,
    layout: RunningLayout,
}

impl KeccakPadding {
    /// The requirements of the component.
    pub fn manifest() -> Manifest {
        Manifest::new(9, None, 1)
    }

    /// Create the component for messages of `message_bytes` bytes.
    pub fn new(params: ComponentParams, message_bytes: usize) -> Result<Self> {
        Self::manifest().check(&params)?;
        let lanes = Self::padded_len(message_bytes) / 8;
        let layout = RunningLayout::new(params.witness_amount(), 0, 9, 1, lanes, 0)?;
        Ok(Self {
            params,
            message_bytes,
            layout,
        })
    }

    /// The length of the padded message in bytes.
    pub fn padded_len(message_bytes: usize) -> usize {
        (message_bytes / RATE_BYTES + 1) * RATE_BYTES
    }

    /// The rows a component of this shape occupies.
    pub fn get_rows_amount(witness_amount: usize, message_bytes: usize) -> Result<usize> {
        let lanes = Self::padded_len(message_bytes) / 8;
        let layout = RunningLayout::new(witness_amount, 0, 9, 1, lanes, 0)?;
        Ok(layout.rows().max(PAD_VALUES.len()))
    }

    /// The index into [`PAD_VALUES`] of padding byte `p`.
    fn pad_index(&self, p: usize) -> usize {
        let pad_len = Self::padded_len(self.message_bytes) - self.message_bytes;
        match (pad_len, p) {
            (1, _) => 3,
            (_, 0) => 1,
            (_, p) if p + 1 == pad_len => 2,
            _ => 0,
        }
    }

    fn byte_var(&self, start_row: usize, k: usize) -> Result<Var> {
        self.layout
            .item_var(&self.params.witness, start_row, k / 8, k % 8)
    }
}

impl<F: Scalar> Component<F> for KeccakPadding {
    type Input = KeccakPaddingInput;
    type Result = KeccakPaddingResult;

    fn params(&self) -> &ComponentParams {
        &self.params
    }

    fn rows_amount(&self) -> usize {
        self.layout.rows().max(PAD_VALUES.len())
    }

    fn gates_amount(&self) -> usize {
        self.layout.gates_amount()
    }

    fn shape_key(&self) -> ShapeKey {
        ShapeKey::new(
            "keccak_padding",
            &self.params.witness,
            &self.params.constant[..1],
            vec![self.message_bytes as u64],
        )
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        let lanes = Self::padded_len(self.message_bytes) / 8;
        Ok(KeccakPaddingResult {
            lanes: (0..lanes)
                .map(|i| self.layout.acc_var(&self.params.witness, start_row, i, 0))
                .collect::<Result<Vec<Var>>>()?,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        check_arity(self.message_bytes, input.message.len())?;
        let mut bytes = table.values(&input.message)?;
        let padded = Self::padded_len(self.message_bytes);
        bytes.extend((0..padded - self.message_bytes).map(|p| F::from(PAD_VALUES[self.pad_index(p)])));
        let items: Vec<Vec<F>> = bytes.chunks(8).map(|lane| lane.to_vec()).collect();
        self.layout.assign(
            &LaneSum,
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
            .configure_gates(&LaneSum, circuit, &self.params.witness)
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
        for (i, v) in PAD_VALUES.iter().enumerate() {
            table.assign_constant(self.params.constant[0], start_row + i, F::from(*v))?;
        }
        Ok(())
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        check_arity(self.message_bytes, input.message.len())?;
        for (k, byte) in input.message.iter().enumerate() {
            circuit.add_copy_constraint(self.byte_var(start_row, k)?, *byte)?;
        }
        let padded = Self::padded_len(self.message_bytes);
        for p in 0..padded - self.message_bytes {
            let constant = Var::constant(self.params.constant[0], start_row + self.pad_index(p))?;
            circuit.add_copy_constraint(self.byte_var(start_row, self.message_bytes + p)?, constant)?;
        }
        Ok(())
    }
}
