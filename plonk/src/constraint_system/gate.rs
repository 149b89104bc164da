use crate::constraint_system::{Expression, Var};

/// Polynomials that must vanish on every row where the selector is enabled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate<F> {
    /// the selector enabling the gate.
    pub selector_index: usize,
    /// the polynomials over relative variables.
    pub constraints: Vec<Expression<F>>,
}

/// A tuple of expressions that must evaluate to a row of a lookup table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupConstraint<F> {
    /// the table id in the circuit's lookup library.
    pub table_id: usize,
    /// the looked-up tuple.
    pub lookup_input: Vec<Expression<F>>,
}

/// Lookup constraints enabled by a selector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupGate<F> {
    /// the selector enabling the gate.
    pub selector_index: usize,
    /// the lookup constraints.
    pub constraints: Vec<LookupConstraint<F>>,
}

/// Two absolute cells asserted equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CopyConstraint {
    /// one cell.
    pub left: Var,
    /// the other cell.
    pub right: Var,
}
