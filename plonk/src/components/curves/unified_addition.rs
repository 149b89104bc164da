use crate::component::{Component, ComponentParams, Manifest};
use crate::components::{copy_all, scalar_key};
use crate::constraint_system::{AssignmentTable, Circuit, Expression, ShapeKey, Var};
use crate::errors::Result;
use crate::layout::BlockLayout;
use blueprint_algebra::prelude::*;

const X1: usize = 0;
const Y1: usize = 1;
const X2: usize = 2;
const Y2: usize = 3;
const X3: usize = 4;
const Y3: usize = 5;
const INV_Y1: usize = 6;
const INV_Y2: usize = 7;
const INV_DX: usize = 8;
const INV_SY: usize = 9;
const LAMBDA: usize = 10;
const CELLS: usize = 11;

/// Two affine points, the identity as `(0, 0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnifiedAdditionInput {
    /// `(x1, y1)`.
    pub p: [Var; 2],
    /// `(x2, y2)`.
    pub q: [Var; 2],
}

/// The sum `(x3, y3)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnifiedAdditionResult {
    /// x-coordinate.
    pub x: Var,
    /// y-coordinate.
    pub y: Var,
}

/// Complete addition on a short-Weierstrass curve over its base field.
///
/// Cells `[x1, y1, x2, y2, x3, y3, 1/y1, 1/y2, 1/(x2-x1), 1/(y1+y2), lambda]`,
/// the inverses taken as zero for zero. They turn into the flags
/// `P != O`, `Q != O`, `x1 != x2` and `y1 != -y2` that select one branch:
///
/// * `P = O`: the result is `Q`;
/// * `Q = O`: the result is `P`;
/// * `x1 != x2`: the chord through `P` and `Q`;
/// * `P = Q`: the tangent at `P`;
/// * `P = -Q`: the identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnifiedAddition<C> {
    params: ComponentParams,
    block: BlockLayout,
    curve: PhantomData<C>,
}

impl<C: CurveGroup> UnifiedAddition<C> {
    /// The requirements of the component.
    pub fn manifest() -> Manifest {
        Manifest::new(1, None, 0)
    }

    /// Create the component.
    pub fn new(params: ComponentParams) -> Result<Self> {
        Self::manifest().check(&params)?;
        let block = BlockLayout::new(params.witness_amount(), CELLS)?;
        Ok(Self {
            params,
            block,
            curve: PhantomData,
        })
    }

    /// The rows used for `witness_amount` columns.
    pub fn get_rows_amount(witness_amount: usize) -> Result<usize> {
        Ok(BlockLayout::new(witness_amount, CELLS)?.rows())
    }

    /// The cells of `(x1, y1) + (x2, y2)`.
    fn cells(x1: C::BaseType, y1: C::BaseType, x2: C::BaseType, y2: C::BaseType) -> Vec<C::BaseType> {
        let zero = C::BaseType::zero();
        let (inv_y1, inv_y2) = (y1.inv_or_zero(), y2.inv_or_zero());
        let inv_dx = (x2 - x1).inv_or_zero();
        let inv_sy = (y1 + y2).inv_or_zero();
        let (x3, y3, lambda) = if y1.is_zero() {
            (x2, y2, zero)
        } else if y2.is_zero() {
            (x1, y1, zero)
        } else if x1 != x2 || y1 + y2 != zero {
            let lambda = if x1 != x2 {
                (y2 - y1) * inv_dx
            } else {
                let three = C::BaseType::from(3u32);
                (three * x1.square() + C::curve_a()) * (y1 + y1).inv_or_zero()
            };
            let x3 = lambda.square() - x1 - x2;
            (x3, lambda * (x1 - x3) - y1, lambda)
        } else {
            (zero, zero, zero)
        };
        vec![x1, y1, x2, y2, x3, y3, inv_y1, inv_y2, inv_dx, inv_sy, lambda]
    }

    fn constraints(&self) -> Result<Vec<Expression<C::BaseType>>> {
        let witness = &self.params.witness;
        let c = (0..CELLS)
            .map(|i| self.block.expr(witness, i))
            .collect::<Result<Vec<Expression<C::BaseType>>>>()?;
        let one = Expression::one();
        let constant = |v: u32| Expression::constant(C::BaseType::from(v));
        let (x1, y1, x2, y2) = (c[X1].clone(), c[Y1].clone(), c[X2].clone(), c[Y2].clone());
        let (x3, y3, lambda) = (c[X3].clone(), c[Y3].clone(), c[LAMBDA].clone());

        let dx = x2.clone() - x1.clone();
        let sy = y1.clone() + y2.clone();
        let p = y1.clone() * c[INV_Y1].clone();
        let q = y2.clone() * c[INV_Y2].clone();
        let distinct = dx.clone() * c[INV_DX].clone();
        let opposite = one.clone() - sy.clone() * c[INV_SY].clone();

        let mut constraints = vec![
            y1.clone() * (one.clone() - p.clone()),
            y2.clone() * (one.clone() - q.clone()),
            dx.clone() * (one.clone() - distinct.clone()),
            sy.clone() * opposite.clone(),
        ];

        let both = p.clone() * q.clone();
        let same_x = both.clone() * (one.clone() - distinct.clone());
        let w_p_zero = one.clone() - p.clone();
        let w_q_zero = p * (one.clone() - q);
        let w_chord = both * distinct;
        let w_tangent = same_x.clone() * (one - opposite.clone());
        let w_zero = same_x * opposite;
        let w_line = w_chord.clone() + w_tangent.clone();

        constraints.extend(vec![
            w_p_zero.clone() * (x3.clone() - x2.clone()),
            w_p_zero * (y3.clone() - y2.clone()),
            w_q_zero.clone() * (x3.clone() - x1.clone()),
            w_q_zero * (y3.clone() - y1.clone()),
            w_chord * (lambda.clone() * dx - (y2 - y1.clone())),
            w_tangent
                * (constant(2) * y1.clone() * lambda.clone()
                    - constant(3) * x1.clone() * x1.clone()
                    - Expression::constant(C::curve_a())),
            w_line.clone() * (x3.clone() - lambda.clone() * lambda.clone() + x1.clone() + x2),
            w_line * (y3.clone() - lambda * (x1 - x3.clone()) + y1),
            w_zero.clone() * x3,
            w_zero * y3,
        ]);
        Ok(constraints)
    }
}

impl<C: CurveGroup> Component<C::BaseType> for UnifiedAddition<C> {
    type Input = UnifiedAdditionInput;
    type Result = UnifiedAdditionResult;

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
            "unified_addition",
            &self.params.witness,
            &[],
            scalar_key(&C::curve_a()),
        )
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        let witness = &self.params.witness;
        Ok(UnifiedAdditionResult {
            x: self.block.var(witness, start_row, X3)?,
            y: self.block.var(witness, start_row, Y3)?,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<C::BaseType>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        let p = table.values(&input.p)?;
        let q = table.values(&input.q)?;
        let cells = Self::cells(p[0], p[1], q[0], q[1]);
        self.block
            .assign(table, &self.params.witness, start_row, &cells)?;
        self.result(start_row)
    }

    fn configure_gates(&self, circuit: &mut Circuit<C::BaseType>) -> Result<Vec<usize>> {
        let constraints = self.constraints()?;
        let selector = circuit.allocate_selector();
        circuit.add_gate(selector, constraints);
        Ok(vec![selector])
    }

    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<C::BaseType>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<()> {
        crate::component::check_arity(1, selectors.len())?;
        table.enable_selector(selectors[0], start_row);
        Ok(())
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<C::BaseType>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        let cells = [X1, Y1, X2, Y2]
            .iter()
            .map(|i| self.block.var(&self.params.witness, start_row, *i))
            .collect::<Result<Vec<Var>>>()?;
        copy_all(circuit, &cells, &[input.p[0], input.p[1], input.q[0], input.q[1]])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::components::test_utils::{place, public_inputs};
    use crate::constraint_system::checker::{is_satisfied, verify_assignment};
    use blueprint_algebra::bn254::BN254G1;
    use blueprint_algebra::secp256k1::SECP256K1G1;

    struct Placed<C: CurveGroup> {
        circuit: Circuit<C::BaseType>,
        table: AssignmentTable<C::BaseType>,
        sum: C,
    }

    fn add<C: CurveGroup>(p: C, q: C, witness_amount: usize) -> Placed<C> {
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::new(witness_amount, 1, 0);
        let vars = public_inputs(&mut table, 0, &[p.get_x(), p.get_y(), q.get_x(), q.get_y()]);
        let component =
            UnifiedAddition::<C>::new(ComponentParams::with_witness_amount(witness_amount))
                .unwrap();
        let input = UnifiedAdditionInput {
            p: [vars[0], vars[1]],
            q: [vars[2], vars[3]],
        };
        let result = place(&component, &mut circuit, &mut table, &input, 0);
        let sum = C::new(
            &table.value(&result.x).unwrap(),
            &table.value(&result.y).unwrap(),
        );
        Placed {
            circuit,
            table,
            sum,
        }
    }

    fn degenerate_cases<C: CurveGroup>() {
        let mut prng = test_rng();
        let p = C::random(&mut prng);
        let q = C::random(&mut prng);
        let o = C::get_identity();
        let cases = [(p, q), (p, p), (p, -p), (o, q), (p, o), (o, o)];
        for (a, b) in cases {
            for witness_amount in [11, 4, 3] {
                let placed = add(a, b, witness_amount);
                verify_assignment(&placed.circuit, &placed.table).unwrap();
                assert_eq!(placed.sum, a + &b);
            }
        }
    }

    #[test]
    fn bn254_degenerate_cases() {
        degenerate_cases::<BN254G1>();
    }

    #[test]
    fn secp256k1_degenerate_cases() {
        degenerate_cases::<SECP256K1G1>();
    }

    #[test]
    fn wrong_sums_fail() {
        let mut prng = test_rng();
        let p = BN254G1::random(&mut prng);
        let q = BN254G1::random(&mut prng);

        // the doubling of p claimed as p + q
        let mut placed = add(p, q, 11);
        let double = p.double();
        placed.table.replace_witness(X3, 0, double.get_x()).unwrap();
        placed.table.replace_witness(Y3, 0, double.get_y()).unwrap();
        assert!(!is_satisfied(&placed.circuit, &placed.table));

        // the identity claimed for p + p by hiding the inverse of 2 y1
        let mut placed = add(p, p, 11);
        placed.table.replace_witness(INV_SY, 0, Default::default()).unwrap();
        placed.table.replace_witness(X3, 0, Default::default()).unwrap();
        placed.table.replace_witness(Y3, 0, Default::default()).unwrap();
        assert!(!is_satisfied(&placed.circuit, &placed.table));
    }
}
