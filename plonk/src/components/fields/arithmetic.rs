use crate::component::{Component, ComponentParams, Manifest};
use crate::components::scalar_key;
use crate::constraint_system::{AssignmentTable, Circuit, Expression, ShapeKey, Var};
use crate::errors::Result;
use crate::layout::BlockLayout;
use blueprint_algebra::prelude::*;

/// A binary field operation on one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `z = x + y`, cells `[x, y, z]`.
    Add,
    /// `z = x - y`, cells `[x, y, z]`.
    Sub,
    /// `z = x * y`, cells `[x, y, z]`.
    Mul,
    /// `z * y = x`, cells `[x, y, z]`.
    Div,
    /// `z = x / y`, zero when `y = 0`; cells `[x, y, y_inv, z]`.
    DivOrZero,
    /// `z = 1` when `x = y`, else `0`; cells `[x, y, diff_inv, z]`.
    EqualityFlag,
}

impl BinaryOp {
    fn cells(&self) -> usize {
        match self {
            BinaryOp::DivOrZero | BinaryOp::EqualityFlag => 4,
            _ => 3,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "addition",
            BinaryOp::Sub => "subtraction",
            BinaryOp::Mul => "multiplication",
            BinaryOp::Div => "division",
            BinaryOp::DivOrZero => "division_or_zero",
            BinaryOp::EqualityFlag => "equality_flag",
        }
    }

    /// The witness cells after `x` and `y`.
    fn witness<F: Scalar>(&self, x: F, y: F) -> Vec<F> {
        match self {
            BinaryOp::Add => vec![x + y],
            BinaryOp::Sub => vec![x - y],
            BinaryOp::Mul => vec![x * y],
            BinaryOp::Div => vec![x.div_or_zero(&y)],
            BinaryOp::DivOrZero => {
                let y_inv = y.inv_or_zero();
                vec![y_inv, x * y_inv]
            }
            BinaryOp::EqualityFlag => {
                let diff_inv = (x - y).inv_or_zero();
                let flag = if x == y { F::one() } else { F::zero() };
                vec![diff_inv, flag]
            }
        }
    }

    fn constraints<F: Scalar>(&self, c: &[Expression<F>]) -> Vec<Expression<F>> {
        let one = Expression::one();
        match self {
            BinaryOp::Add => vec![c[2].clone() - (c[0].clone() + c[1].clone())],
            BinaryOp::Sub => vec![c[2].clone() - (c[0].clone() - c[1].clone())],
            BinaryOp::Mul => vec![c[2].clone() - c[0].clone() * c[1].clone()],
            BinaryOp::Div => vec![c[2].clone() * c[1].clone() - c[0].clone()],
            BinaryOp::DivOrZero => {
                let (x, y, y_inv, z) = (c[0].clone(), c[1].clone(), c[2].clone(), c[3].clone());
                let not_inverted = one - y.clone() * y_inv.clone();
                vec![
                    y * not_inverted.clone(),
                    y_inv.clone() * not_inverted,
                    z - x * y_inv,
                ]
            }
            BinaryOp::EqualityFlag => {
                let (x, y, diff_inv, z) = (c[0].clone(), c[1].clone(), c[2].clone(), c[3].clone());
                let diff = x - y;
                let equal = one - diff.clone() * diff_inv;
                vec![diff * equal.clone(), z - equal]
            }
        }
    }
}

/// The inputs of a [`BinaryOperation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinaryOperationInput {
    /// the left operand.
    pub x: Var,
    /// the right operand.
    pub y: Var,
}

/// The output of a field operation component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldOperationResult {
    /// the result cell.
    pub output: Var,
}

/// A binary field operation placed as one block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryOperation {
    params: ComponentParams,
    op: BinaryOp,
    block: BlockLayout,
}

impl BinaryOperation {
    /// The requirements of the operation.
    pub fn manifest(op: BinaryOp) -> Manifest {
        Manifest::new(op.cells(), None, 0)
    }

    /// Create the component.
    pub fn new(params: ComponentParams, op: BinaryOp) -> Result<Self> {
        Self::manifest(op).check(&params)?;
        let block = BlockLayout::new(params.witness_amount(), op.cells())?;
        Ok(Self { params, op, block })
    }

    /// The rows of `op` over `witness_amount` columns.
    pub fn get_rows_amount(witness_amount: usize, op: BinaryOp) -> Result<usize> {
        Ok(BlockLayout::new(witness_amount, op.cells())?.rows())
    }

    /// The operation.
    pub fn op(&self) -> BinaryOp {
        self.op
    }
}

impl<F: Scalar> Component<F> for BinaryOperation {
    type Input = BinaryOperationInput;
    type Result = FieldOperationResult;

    fn params(&self) -> &ComponentParams {
        &self.params
    }

    fn rows_amount(&self) -> usize {
        self.block.rows()
    }

    fn gates_amount(&self) -> usize {
        1
    }

    fn shape_key(&self) -> ShapeKey {
        ShapeKey::new(self.op.name(), &self.params.witness, &[], vec![])
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        Ok(FieldOperationResult {
            output: self
                .block
                .var(&self.params.witness, start_row, self.op.cells() - 1)?,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        let x = table.value(&input.x)?;
        let y = table.value(&input.y)?;
        let mut cells = vec![x, y];
        cells.extend(self.op.witness(x, y));
        self.block
            .assign(table, &self.params.witness, start_row, &cells)?;
        <Self as Component<F>>::result(self, start_row)
    }

    fn configure_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>> {
        let cells = (0..self.op.cells())
            .map(|i| self.block.expr(&self.params.witness, i))
            .collect::<Result<Vec<Expression<F>>>>()?;
        let selector = circuit.allocate_selector();
        circuit.add_gate(selector, self.op.constraints(&cells));
        Ok(vec![selector])
    }

    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<()> {
        crate::component::check_arity(1, selectors.len())?;
        table.enable_selector(selectors[0], start_row);
        Ok(())
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        let witness = &self.params.witness;
        circuit.add_copy_constraint(self.block.var(witness, start_row, 0)?, input.x)?;
        circuit.add_copy_constraint(self.block.var(witness, start_row, 1)?, input.y)
    }
}

/// The input of a [`MulByConstant`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MulByConstantInput {
    /// the operand.
    pub x: Var,
}

/// `z = c * x` for a constant `c` of the shape; cells `[x, z]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MulByConstant<F> {
    params: ComponentParams,
    constant: F,
    block: BlockLayout,
}

impl<F: Scalar> MulByConstant<F> {
    /// Create the component.
    pub fn new(params: ComponentParams, constant: F) -> Result<Self> {
        Manifest::new(2, None, 0).check(&params)?;
        let block = BlockLayout::new(params.witness_amount(), 2)?;
        Ok(Self {
            params,
            constant,
            block,
        })
    }
}

impl<F: Scalar> Component<F> for MulByConstant<F> {
    type Input = MulByConstantInput;
    type Result = FieldOperationResult;

    fn params(&self) -> &ComponentParams {
        &self.params
    }

    fn rows_amount(&self) -> usize {
        self.block.rows()
    }

    fn gates_amount(&self) -> usize {
        1
    }

    fn shape_key(&self) -> ShapeKey {
        ShapeKey::new(
            "mul_by_constant",
            &self.params.witness,
            &[],
            scalar_key(&self.constant),
        )
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        Ok(FieldOperationResult {
            output: self.block.var(&self.params.witness, start_row, 1)?,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        let x = table.value(&input.x)?;
        self.block
            .assign(table, &self.params.witness, start_row, &[x, self.constant * x])?;
        self.result(start_row)
    }

    fn configure_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>> {
        let x = self.block.expr(&self.params.witness, 0)?;
        let z = self.block.expr(&self.params.witness, 1)?;
        let selector = circuit.allocate_selector();
        circuit.add_gate(selector, vec![z - Expression::constant(self.constant) * x]);
        Ok(vec![selector])
    }

    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<()> {
        crate::component::check_arity(1, selectors.len())?;
        table.enable_selector(selectors[0], start_row);
        Ok(())
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        circuit.add_copy_constraint(self.block.var(&self.params.witness, start_row, 0)?, input.x)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::components::test_utils::{place, public_inputs};
    use crate::constraint_system::checker::{is_satisfied, verify_assignment};
    use blueprint_algebra::bn254::BN254Scalar;

    type F = BN254Scalar;

    fn apply(op: BinaryOp, x: F, y: F) -> (bool, F) {
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::<F>::new(4, 1, 0);
        let vars = public_inputs(&mut table, 0, &[x, y]);
        let component = BinaryOperation::new(ComponentParams::with_witness_amount(4), op).unwrap();
        let result = place(
            &component,
            &mut circuit,
            &mut table,
            &BinaryOperationInput {
                x: vars[0],
                y: vars[1],
            },
            1,
        );
        (
            is_satisfied(&circuit, &table),
            table.value(&result.output).unwrap(),
        )
    }

    #[test]
    fn ring_operations() {
        let mut prng = test_rng();
        let x = F::random(&mut prng);
        let y = F::random(&mut prng);
        assert_eq!(apply(BinaryOp::Add, x, y), (true, x + y));
        assert_eq!(apply(BinaryOp::Sub, x, y), (true, x - y));
        assert_eq!(apply(BinaryOp::Mul, x, y), (true, x * y));
        assert_eq!(apply(BinaryOp::Div, x, y), (true, x * y.inv().unwrap()));
    }

    #[test]
    fn division_by_zero() {
        let x = F::from(5u32);
        // z * 0 = 5 has no solution
        assert!(!apply(BinaryOp::Div, x, F::zero()).0);
        assert_eq!(apply(BinaryOp::DivOrZero, x, F::zero()), (true, F::zero()));
        assert_eq!(
            apply(BinaryOp::DivOrZero, F::from(10u32), x),
            (true, F::from(2u32))
        );
        assert_eq!(apply(BinaryOp::Div, F::zero(), F::zero()), (true, F::zero()));
    }

    #[test]
    fn equality_flag() {
        let x = F::from(9u32);
        assert_eq!(apply(BinaryOp::EqualityFlag, x, x), (true, F::one()));
        assert_eq!(apply(BinaryOp::EqualityFlag, x, -x), (true, F::zero()));
    }

    #[test]
    fn forged_flags_fail() {
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::<F>::new(4, 1, 0);
        let vars = public_inputs(&mut table, 0, &[F::from(3u32), F::from(4u32)]);
        let component =
            BinaryOperation::new(ComponentParams::with_witness_amount(4), BinaryOp::EqualityFlag)
                .unwrap();
        let input = BinaryOperationInput {
            x: vars[0],
            y: vars[1],
        };
        let result = place(&component, &mut circuit, &mut table, &input, 0);
        verify_assignment(&circuit, &table).unwrap();

        // claim equality with a zero inverse
        let out = result.output;
        table.replace_witness(2, 0, F::zero()).unwrap();
        table
            .replace_witness(out.index, out.row().unwrap(), F::one())
            .unwrap();
        assert!(!is_satisfied(&circuit, &table));
    }

    #[test]
    fn permuted_columns() {
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::<F>::new(4, 1, 0);
        let vars = public_inputs(&mut table, 0, &[F::from(6u32), F::from(3u32)]);
        let params = ComponentParams::new(vec![3, 1, 2, 0], vec![], vec![]);
        let component = BinaryOperation::new(params, BinaryOp::DivOrZero).unwrap();
        let result = place(
            &component,
            &mut circuit,
            &mut table,
            &BinaryOperationInput {
                x: vars[0],
                y: vars[1],
            },
            2,
        );
        verify_assignment(&circuit, &table).unwrap();
        assert_eq!(result.output, Var::witness(0, 2).unwrap());
        assert_eq!(table.value(&result.output).unwrap(), F::from(2u32));
    }

    #[test]
    fn scaling() {
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::<F>::new(2, 1, 0);
        let vars = public_inputs(&mut table, 0, &[F::from(7u32)]);
        let component =
            MulByConstant::new(ComponentParams::with_witness_amount(2), F::from(6u32)).unwrap();
        let result = place(
            &component,
            &mut circuit,
            &mut table,
            &MulByConstantInput { x: vars[0] },
            0,
        );
        verify_assignment(&circuit, &table).unwrap();
        assert_eq!(table.value(&result.output).unwrap(), F::from(42u32));

        let other =
            MulByConstant::new(ComponentParams::with_witness_amount(2), F::from(5u32)).unwrap();
        assert_ne!(
            other.generate_gates(&mut circuit).unwrap(),
            component.generate_gates(&mut circuit).unwrap()
        );
    }
}
