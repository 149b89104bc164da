//! Satisfiability check of an assignment table against a circuit.

use crate::constraint_system::{AssignmentTable, Circuit, Gate, LookupGate, Var};
use crate::errors::{BlueprintError, Result};
use ark_std::{end_timer, start_timer};
use blueprint_algebra::prelude::*;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn check_gate_row<F: Scalar>(table: &AssignmentTable<F>, gate: &Gate<F>, row: usize) -> Result<()> {
    let resolve = |v: &Var| table.value_at(v, row);
    for (i, constraint) in gate.constraints.iter().enumerate() {
        if !constraint.evaluate(&resolve)?.is_zero() {
            return Err(BlueprintError::UnsatisfiedGate {
                selector: gate.selector_index,
                row,
                constraint: i,
            });
        }
    }
    Ok(())
}

fn check_lookup_row<F: Scalar>(
    circuit: &Circuit<F>,
    table: &AssignmentTable<F>,
    gate: &LookupGate<F>,
    row: usize,
) -> Result<()> {
    let resolve = |v: &Var| table.value_at(v, row);
    for constraint in gate.constraints.iter() {
        let lookup_table = circuit
            .lookup_library()
            .table(constraint.table_id)
            .ok_or_else(|| BlueprintError::UnknownLookupTable(format!("#{}", constraint.table_id)))?;
        let tuple = constraint
            .lookup_input
            .iter()
            .map(|e| e.evaluate(&resolve))
            .collect::<Result<Vec<F>>>()?;
        if !lookup_table.contains(&tuple) {
            return Err(BlueprintError::UnsatisfiedLookup {
                selector: gate.selector_index,
                row,
                table: constraint.table_id,
            });
        }
    }
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn check_rows<C>(rows: Vec<usize>, check: C) -> Result<()>
where
    C: Fn(usize) -> Result<()> + Sync,
{
    rows.into_iter().try_for_each(check)
}

#[cfg(feature = "parallel")]
fn check_rows<C>(rows: Vec<usize>, check: C) -> Result<()>
where
    C: Fn(usize) -> Result<()> + Sync,
{
    rows.into_par_iter().try_for_each(check)
}

/// Check the gates and lookup gates of the given selectors on rows `[begin, end)`.
pub fn verify_rows<F: Scalar>(
    circuit: &Circuit<F>,
    table: &AssignmentTable<F>,
    selectors: &[usize],
    begin: usize,
    end: usize,
) -> Result<()> {
    let in_range = |selector: usize| -> Vec<usize> {
        table
            .enabled_rows(selector)
            .into_iter()
            .filter(|r| *r >= begin && *r < end)
            .collect()
    };
    for gate in circuit
        .gates()
        .iter()
        .filter(|g| selectors.contains(&g.selector_index))
    {
        check_rows(in_range(gate.selector_index), |row| {
            check_gate_row(table, gate, row)
        })?;
    }
    for gate in circuit
        .lookup_gates()
        .iter()
        .filter(|g| selectors.contains(&g.selector_index))
    {
        check_rows(in_range(gate.selector_index), |row| {
            check_lookup_row(circuit, table, gate, row)
        })?;
    }
    Ok(())
}

/// Check that the table satisfies every gate, lookup gate and copy constraint.
pub fn verify_assignment<F: Scalar>(circuit: &Circuit<F>, table: &AssignmentTable<F>) -> Result<()> {
    let timer = start_timer!(|| "Verify assignment");
    for gate in circuit.gates() {
        check_rows(table.enabled_rows(gate.selector_index), |row| {
            check_gate_row(table, gate, row)
        })?;
    }
    for gate in circuit.lookup_gates() {
        check_rows(table.enabled_rows(gate.selector_index), |row| {
            check_lookup_row(circuit, table, gate, row)
        })?;
    }
    for (i, copy) in circuit.copy_constraints().iter().enumerate() {
        if table.value(&copy.left)? != table.value(&copy.right)? {
            return Err(BlueprintError::UnsatisfiedCopyConstraint(i));
        }
    }
    end_timer!(timer);
    Ok(())
}

/// Whether the table satisfies the circuit.
pub fn is_satisfied<F: Scalar>(circuit: &Circuit<F>, table: &AssignmentTable<F>) -> bool {
    verify_assignment(circuit, table).is_ok()
}
