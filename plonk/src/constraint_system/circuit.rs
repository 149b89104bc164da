use crate::constraint_system::{
    CopyConstraint, Expression, Gate, LookupConstraint, LookupGate, LookupLibrary, Var,
};
use crate::errors::{BlueprintError, Result};
use std::collections::HashMap;
use blueprint_algebra::prelude::*;

/// The canonical description of a component shape.
///
/// Two components with equal keys register identical gates, so the selectors
/// allocated for the first are reused by the second.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeKey {
    /// the component kind.
    pub name: String,
    /// the witness columns the gates read.
    pub witness: Vec<usize>,
    /// the constant columns the gates read.
    pub constant: Vec<usize>,
    /// the shape parameters.
    pub params: Vec<u64>,
}

impl ShapeKey {
    /// Create a key.
    pub fn new(name: &str, witness: &[usize], constant: &[usize], params: Vec<u64>) -> Self {
        Self {
            name: name.to_string(),
            witness: witness.to_vec(),
            constant: constant.to_vec(),
            params,
        }
    }
}

/// The constraint system a circuit-building pass appends to.
#[derive(Clone, Debug, Default)]
pub struct Circuit<F> {
    gates: Vec<Gate<F>>,
    lookup_gates: Vec<LookupGate<F>>,
    copy_constraints: Vec<CopyConstraint>,
    selectors_amount: usize,
    selector_cache: HashMap<ShapeKey, Vec<usize>>,
    lookup_library: LookupLibrary,
}

impl<F: Scalar> Circuit<F> {
    /// An empty circuit.
    pub fn new() -> Self {
        Self {
            gates: vec![],
            lookup_gates: vec![],
            copy_constraints: vec![],
            selectors_amount: 0,
            selector_cache: HashMap::new(),
            lookup_library: LookupLibrary::new(),
        }
    }

    /// Allocate a fresh selector.
    pub fn allocate_selector(&mut self) -> usize {
        self.selectors_amount += 1;
        self.selectors_amount - 1
    }

    /// The number of allocated selectors.
    pub fn selectors_amount(&self) -> usize {
        self.selectors_amount
    }

    /// Register a gate under an allocated selector.
    pub fn add_gate(&mut self, selector_index: usize, constraints: Vec<Expression<F>>) {
        self.gates.push(Gate {
            selector_index,
            constraints,
        });
    }

    /// Register lookup constraints under an allocated selector.
    pub fn add_lookup_gate(&mut self, selector_index: usize, constraints: Vec<LookupConstraint<F>>) {
        self.lookup_gates.push(LookupGate {
            selector_index,
            constraints,
        });
    }

    /// Assert two absolute variables equal.
    pub fn add_copy_constraint(&mut self, left: Var, right: Var) -> Result<()> {
        if left.relative || right.relative {
            return Err(BlueprintError::UnexpectedVariable);
        }
        if left != right {
            self.copy_constraints.push(CopyConstraint { left, right });
        }
        Ok(())
    }

    /// The selectors previously registered for a shape.
    pub fn cached_selectors(&self, key: &ShapeKey) -> Option<&Vec<usize>> {
        let cached = self.selector_cache.get(key);
        if cached.is_some() {
            tracing::debug!(shape = %key.name, "selector cache hit");
        }
        cached
    }

    /// Record the selectors registered for a shape.
    pub fn cache_selectors(&mut self, key: ShapeKey, selectors: Vec<usize>) {
        tracing::debug!(shape = %key.name, ?selectors, "selectors registered");
        self.selector_cache.insert(key, selectors);
    }

    /// The id of a named lookup table, reserving it on first use.
    pub fn lookup_table_id(&mut self, name: &str) -> Result<usize> {
        self.lookup_library.reserve_table(name)
    }

    /// The reserved lookup tables.
    pub fn lookup_library(&self) -> &LookupLibrary {
        &self.lookup_library
    }

    /// The registered gates.
    pub fn gates(&self) -> &[Gate<F>] {
        &self.gates
    }

    /// The registered lookup gates.
    pub fn lookup_gates(&self) -> &[LookupGate<F>] {
        &self.lookup_gates
    }

    /// The registered copy constraints.
    pub fn copy_constraints(&self) -> &[CopyConstraint] {
        &self.copy_constraints
    }

    /// The largest degree among the gate polynomials.
    pub fn max_degree(&self) -> usize {
        self.gates
            .iter()
            .flat_map(|g| g.constraints.iter())
            .map(|c| c.degree())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use blueprint_algebra::bn254::BN254Scalar;

    type F = BN254Scalar;

    #[test]
    fn selector_cache_round_trip() {
        let mut circuit = Circuit::<F>::new();
        let key = ShapeKey::new("addition", &[0, 1, 2], &[], vec![]);
        assert!(circuit.cached_selectors(&key).is_none());

        let s = circuit.allocate_selector();
        circuit.add_gate(s, vec![Expression::var(Var::witness_rel(0, 0))]);
        circuit.cache_selectors(key.clone(), vec![s]);
        assert_eq!(circuit.cached_selectors(&key), Some(&vec![s]));

        let other = ShapeKey::new("addition", &[1, 2, 3], &[], vec![]);
        assert!(circuit.cached_selectors(&other).is_none());
        assert_eq!(circuit.selectors_amount(), 1);
        assert_eq!(circuit.max_degree(), 1);
    }

    #[test]
    fn copy_constraints_need_absolute_vars() {
        let mut circuit = Circuit::<F>::new();
        assert_eq!(
            circuit.add_copy_constraint(Var::witness_rel(0, 0), Var::witness(0, 0).unwrap()),
            Err(BlueprintError::UnexpectedVariable)
        );
        circuit
            .add_copy_constraint(Var::witness(0, 1).unwrap(), Var::public_input(0, 0).unwrap())
            .unwrap();
        // self-equalities are dropped
        circuit
            .add_copy_constraint(Var::witness(0, 1).unwrap(), Var::witness(0, 1).unwrap())
            .unwrap();
        assert_eq!(circuit.copy_constraints().len(), 1);
    }
}
