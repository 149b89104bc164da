//! The table and circuit abstraction the components write into.
//!
//! An [`AssignmentTable`] holds the values, a [`Circuit`] holds the gates,
//! lookup gates and copy constraints, and [`checker::verify_assignment`]
//! decides whether the former satisfies the latter.

mod assignment;
pub mod checker;
mod circuit;
mod expression;
mod gate;
mod lookup;
mod var;

pub use assignment::AssignmentTable;
pub use circuit::{Circuit, ShapeKey};
pub use expression::Expression;
pub use gate::{CopyConstraint, Gate, LookupConstraint, LookupGate};
pub use lookup::{
    sparse_chunk, LookupLibrary, LookupTable, BYTE_RANGE, KECCAK_PACK, KECCAK_PACK_CANONICAL,
    RANGE_16BIT,
};
pub use var::{ColumnType, Var};
