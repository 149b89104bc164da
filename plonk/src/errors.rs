use crate::constraint_system::ColumnType;
use ark_std::{error, fmt, string::String};
use blueprint_algebra::prelude::AlgebraError;

/// The result type of the crate.
pub type Result<T> = core::result::Result<T, BlueprintError>;

/// The errors raised while configuring components, building tables and
/// checking them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BlueprintError {
    /// Algebra error
    Algebra(AlgebraError),
    /// The witness width is outside the range the component supports.
    InvalidWidth {
        /// the number of witness columns supplied.
        witness_amount: usize,
        /// the smallest supported width.
        min: usize,
        /// the largest supported width, if bounded.
        max: Option<usize>,
    },
    /// The component needs more constant columns than supplied.
    MissingConstantColumn {
        /// the number of constant columns needed.
        required: usize,
        /// the number of constant columns supplied.
        provided: usize,
    },
    /// A shape parameter produces a contradictory layout.
    InvalidConfiguration {
        /// the offending parameter.
        parameter: &'static str,
        /// which bound it violates.
        reason: String,
    },
    /// The input has the wrong number of variables.
    InvalidInput {
        /// the number of variables the component takes.
        expected: usize,
        /// the number of variables supplied.
        got: usize,
    },
    /// A cell was written twice.
    OverlappingAllocation {
        /// the kind of column.
        column_type: ColumnType,
        /// the column index.
        column: usize,
        /// the absolute row.
        row: usize,
    },
    /// A column index outside the table.
    ColumnOutOfRange {
        /// the kind of column.
        column_type: ColumnType,
        /// the column index.
        column: usize,
    },
    /// A rotation reaching above the first row.
    RowOutOfRange(i64),
    /// A variable that must be absolute is relative, or the other way around.
    UnexpectedVariable,
    /// No lookup table with this name is known.
    UnknownLookupTable(String),
    /// A gate polynomial does not vanish.
    UnsatisfiedGate {
        /// the selector of the gate.
        selector: usize,
        /// the absolute row.
        row: usize,
        /// the position of the polynomial inside the gate.
        constraint: usize,
    },
    /// A looked-up tuple is not in its table.
    UnsatisfiedLookup {
        /// the selector of the lookup gate.
        selector: usize,
        /// the absolute row.
        row: usize,
        /// the table id.
        table: usize,
    },
    /// Two copy-constrained cells hold different values.
    UnsatisfiedCopyConstraint(usize),
    /// Error with message
    Message(String),
}

impl fmt::Display for BlueprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BlueprintError::*;
        match self {
            Algebra(e) => write!(f, "Algebra: {}", e),
            InvalidWidth {
                witness_amount,
                min,
                max,
            } => match max {
                Some(max) => write!(
                    f,
                    "Witness amount {} is outside [{}, {}].",
                    witness_amount, min, max
                ),
                None => write!(f, "Witness amount {} is below {}.", witness_amount, min),
            },
            MissingConstantColumn { required, provided } => write!(
                f,
                "{} constant columns required, {} provided.",
                required, provided
            ),
            InvalidConfiguration { parameter, reason } => {
                write!(f, "Invalid configuration of `{}`: {}.", parameter, reason)
            }
            InvalidInput { expected, got } => {
                write!(f, "Expected {} input variables, got {}.", expected, got)
            }
            OverlappingAllocation {
                column_type,
                column,
                row,
            } => write!(
                f,
                "Cell ({:?} {}, row {}) is already assigned.",
                column_type, column, row
            ),
            ColumnOutOfRange {
                column_type,
                column,
            } => write!(f, "{:?} column {} does not exist.", column_type, column),
            RowOutOfRange(row) => write!(f, "Row {} is outside the table.", row),
            UnexpectedVariable => f.write_str("Unexpected relative or absolute variable."),
            UnknownLookupTable(name) => write!(f, "Unknown lookup table `{}`.", name),
            UnsatisfiedGate {
                selector,
                row,
                constraint,
            } => write!(
                f,
                "Constraint {} of gate {} does not hold at row {}.",
                constraint, selector, row
            ),
            UnsatisfiedLookup {
                selector,
                row,
                table,
            } => write!(
                f,
                "Lookup gate {} at row {} is not in table {}.",
                selector, row, table
            ),
            UnsatisfiedCopyConstraint(index) => {
                write!(f, "Copy constraint {} does not hold.", index)
            }
            Message(e) => f.write_str(e),
        }
    }
}

impl error::Error for BlueprintError {}

impl From<AlgebraError> for BlueprintError {
    fn from(e: AlgebraError) -> BlueprintError {
        BlueprintError::Algebra(e)
    }
}
