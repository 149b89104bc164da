use crate::constraint_system::{AssignmentTable, Circuit, ShapeKey};
use crate::errors::{BlueprintError, Result};
use ark_std::{end_timer, start_timer};
use blueprint_algebra::prelude::*;

/// The columns a component is placed on.
///
/// Logical column `i` of the component is physical column `witness[i]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentParams {
    /// the witness columns.
    pub witness: Vec<usize>,
    /// the constant columns.
    pub constant: Vec<usize>,
    /// the public input columns.
    pub public_input: Vec<usize>,
}

impl ComponentParams {
    /// Create params from explicit column lists.
    pub fn new(witness: Vec<usize>, constant: Vec<usize>, public_input: Vec<usize>) -> Self {
        Self {
            witness,
            constant,
            public_input,
        }
    }

    /// Witness columns `0..witness_amount`, no constant or public input column.
    pub fn with_witness_amount(witness_amount: usize) -> Self {
        Self::new((0..witness_amount).collect(), vec![], vec![])
    }

    /// Add constant columns `0..constant_amount`.
    pub fn with_constant_amount(mut self, constant_amount: usize) -> Self {
        self.constant = (0..constant_amount).collect();
        self
    }

    /// The number of witness columns.
    pub fn witness_amount(&self) -> usize {
        self.witness.len()
    }
}

/// The witness widths a component accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessRange {
    /// the smallest width.
    pub min: usize,
    /// the largest width, if bounded.
    pub max: Option<usize>,
}

/// What a component shape requires of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// the accepted witness widths.
    pub witness: WitnessRange,
    /// the number of constant columns needed.
    pub constant_columns: usize,
}

impl Manifest {
    /// Create a manifest.
    pub fn new(min: usize, max: Option<usize>, constant_columns: usize) -> Self {
        Self {
            witness: WitnessRange { min, max },
            constant_columns,
        }
    }

    /// Check the params of a component against the manifest.
    pub fn check(&self, params: &ComponentParams) -> Result<()> {
        let witness_amount = params.witness_amount();
        if witness_amount < self.witness.min
            || self.witness.max.map_or(false, |max| witness_amount > max)
        {
            return Err(BlueprintError::InvalidWidth {
                witness_amount,
                min: self.witness.min,
                max: self.witness.max,
            });
        }
        if params.constant.len() < self.constant_columns {
            return Err(BlueprintError::MissingConstantColumn {
                required: self.constant_columns,
                provided: params.constant.len(),
            });
        }
        Ok(())
    }

    /// The requirements of two components sharing the same columns.
    pub fn merge(&self, other: &Manifest) -> Manifest {
        let max = match (self.witness.max, other.witness.max) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        Manifest::new(
            self.witness.min.max(other.witness.min),
            max,
            self.constant_columns.max(other.constant_columns),
        )
    }
}

/// Fail unless `got == expected`.
pub fn check_arity(expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(BlueprintError::InvalidInput { expected, got });
    }
    Ok(())
}

/// A gate component: polynomial constraints over a block of the table, the
/// native algorithm filling it, and the copy constraints wiring its inputs.
///
/// `generate_assignments` and `generate_circuit` are independent passes over
/// the same `start_row`; each only derives addresses from the shape.
pub trait Component<F: Scalar> {
    /// The input variables.
    type Input;
    /// The output variables.
    type Result;

    /// The columns the component is placed on.
    fn params(&self) -> &ComponentParams;

    /// The number of rows the component occupies.
    fn rows_amount(&self) -> usize;

    /// The number of gates the component registers.
    fn gates_amount(&self) -> usize;

    /// The key under which the selectors of this shape are memoized.
    fn shape_key(&self) -> ShapeKey;

    /// The output variables of the component placed at `start_row`.
    fn result(&self, start_row: usize) -> Result<Self::Result>;

    /// Fill the witness cells natively.
    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result>;

    /// Register the gates, returning their selectors.
    fn configure_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>>;

    /// Register the gates unless a component of the same shape already did.
    fn generate_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>> {
        let key = self.shape_key();
        if let Some(selectors) = circuit.cached_selectors(&key) {
            return Ok(selectors.clone());
        }
        let selectors = self.configure_gates(circuit)?;
        circuit.cache_selectors(key, selectors.clone());
        Ok(selectors)
    }

    /// Enable the selectors on the rows of the component.
    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<()>;

    /// Write the constant cells the component reads.
    fn assign_constants(&self, _table: &mut AssignmentTable<F>, _start_row: usize) -> Result<()> {
        Ok(())
    }

    /// Wire the inputs into the cells of the component.
    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()>;

    /// Register gates, enable selectors, write constants and emit copy
    /// constraints.
    fn generate_circuit(
        &self,
        circuit: &mut Circuit<F>,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        let timer = start_timer!(|| format!("Generate circuit of {}", self.shape_key().name));
        let selectors = self.generate_gates(circuit)?;
        self.enable_selectors(table, &selectors, start_row)?;
        self.assign_constants(table, start_row)?;
        self.generate_copy_constraints(circuit, input, start_row)?;
        #[cfg(feature = "debug")]
        {
            let end = start_row + self.rows_amount();
            if let Err(e) = crate::constraint_system::checker::verify_rows(
                circuit, table, &selectors, start_row, end,
            ) {
                tracing::warn!(shape = %self.shape_key().name, start_row, error = %e, "rows not satisfied");
            }
        }
        end_timer!(timer);
        self.result(start_row)
    }
}
