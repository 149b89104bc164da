use crate::component::{check_arity, Component, ComponentParams, Manifest};
use crate::components::{copy_all, scalar_key};
use crate::constraint_system::{AssignmentTable, Circuit, Expression, ShapeKey, Var};
use crate::errors::{BlueprintError, Result};
use crate::layout::BlockLayout;
use blueprint_algebra::prelude::*;
use num_integer::Integer;

/// The coefficients of an element of `F_p[u]/(u^k - beta)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrobeniusInput {
    /// `a_0, ..., a_{k-1}`.
    pub coefficients: Vec<Var>,
}

/// The coefficients of the image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrobeniusResult {
    /// `gamma_i * a_i`.
    pub coefficients: Vec<Var>,
}

/// The Frobenius map `a_i u^i -> gamma_i a_i u^i` on `F_p[u]/(u^k - beta)`,
/// with `gamma_i = beta^(i (p - 1) / k)` baked into the gate.
///
/// Cells `[a_0, ..., a_{k-1}, out_0, ..., out_{k-1}]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frobenius<F> {
    params: ComponentParams,
    non_residue: F,
    gammas: Vec<F>,
    block: BlockLayout,
}

impl<F: Scalar> Frobenius<F> {
    /// The requirements of the component.
    pub fn manifest() -> Manifest {
        Manifest::new(1, None, 0)
    }

    /// Create the map for the extension of degree `degree` by `non_residue`.
    pub fn new(params: ComponentParams, degree: usize, non_residue: F) -> Result<Self> {
        Self::manifest().check(&params)?;
        let p_minus_one = F::get_field_size_biguint() - BigUint::one();
        let k = BigUint::from(degree);
        if degree == 0 || !p_minus_one.is_multiple_of(&k) {
            return Err(BlueprintError::InvalidConfiguration {
                parameter: "degree",
                reason: format!("{} does not divide p - 1", degree),
            });
        }
        let reducible = (degree > 1 && non_residue.is_zero())
            || prime_divisors(degree).into_iter().any(|q| {
                non_residue.pow_biguint(&(&p_minus_one / BigUint::from(q))) == F::one()
            });
        if reducible {
            return Err(BlueprintError::InvalidConfiguration {
                parameter: "non_residue",
                reason: format!("u^{} - beta is reducible", degree),
            });
        }
        let step = p_minus_one / k;
        let gammas = (0..degree)
            .map(|i| non_residue.pow_biguint(&(&step * BigUint::from(i))))
            .collect();
        let block = BlockLayout::new(params.witness_amount(), 2 * degree)?;
        Ok(Self {
            params,
            non_residue,
            gammas,
            block,
        })
    }

    /// The rows of a degree `degree` map over `witness_amount` columns.
    pub fn get_rows_amount(witness_amount: usize, degree: usize) -> Result<usize> {
        Ok(BlockLayout::new(witness_amount, 2 * degree)?.rows())
    }

    /// `gamma_0, ..., gamma_{k-1}`.
    pub fn gammas(&self) -> &[F] {
        &self.gammas
    }

    fn degree(&self) -> usize {
        self.gammas.len()
    }
}

impl<F: Scalar> Component<F> for Frobenius<F> {
    type Input = FrobeniusInput;
    type Result = FrobeniusResult;

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
        let mut key = vec![self.degree() as u64];
        key.extend(scalar_key(&self.non_residue));
        ShapeKey::new("frobenius", &self.params.witness, &[], key)
    }

    fn result(&self, start_row: usize) -> Result<Self::Result> {
        let k = self.degree();
        Ok(FrobeniusResult {
            coefficients: (k..2 * k)
                .map(|i| self.block.var(&self.params.witness, start_row, i))
                .collect::<Result<Vec<Var>>>()?,
        })
    }

    fn generate_assignments(
        &self,
        table: &mut AssignmentTable<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<Self::Result> {
        check_arity(self.degree(), input.coefficients.len())?;
        let a = table.values(&input.coefficients)?;
        let mut cells = a.clone();
        cells.extend(a.iter().zip(self.gammas.iter()).map(|(a, g)| *a * g));
        self.block
            .assign(table, &self.params.witness, start_row, &cells)?;
        self.result(start_row)
    }

    fn configure_gates(&self, circuit: &mut Circuit<F>) -> Result<Vec<usize>> {
        let k = self.degree();
        let witness = &self.params.witness;
        let constraints = self
            .gammas
            .iter()
            .enumerate()
            .map(|(i, g)| {
                Ok(self.block.expr(witness, k + i)?
                    - Expression::constant(*g) * self.block.expr(witness, i)?)
            })
            .collect::<Result<Vec<Expression<F>>>>()?;
        let selector = circuit.allocate_selector();
        circuit.add_gate(selector, constraints);
        Ok(vec![selector])
    }

    fn enable_selectors(
        &self,
        table: &mut AssignmentTable<F>,
        selectors: &[usize],
        start_row: usize,
    ) -> Result<()> {
        check_arity(1, selectors.len())?;
        table.enable_selector(selectors[0], start_row);
        Ok(())
    }

    fn generate_copy_constraints(
        &self,
        circuit: &mut Circuit<F>,
        input: &Self::Input,
        start_row: usize,
    ) -> Result<()> {
        let cells = (0..self.degree())
            .map(|i| self.block.var(&self.params.witness, start_row, i))
            .collect::<Result<Vec<Var>>>()?;
        copy_all(circuit, &cells, &input.coefficients)
    }
}

/// The distinct prime divisors of `n`.
fn prime_divisors(mut n: usize) -> Vec<usize> {
    let mut primes = vec![];
    let mut q = 2;
    while q * q <= n {
        if n % q == 0 {
            primes.push(q);
            while n % q == 0 {
                n /= q;
            }
        }
        q += 1;
    }
    if n > 1 {
        primes.push(n);
    }
    primes
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::components::test_utils::{place, public_inputs};
    use crate::constraint_system::checker::verify_assignment;
    use blueprint_algebra::bls12_381::BLSScalar;
    use blueprint_algebra::bn254::BN254Fq;
    use blueprint_algebra::secp256k1::SECP256K1Fq;

    fn run<F: Scalar>(degree: usize, beta: F, witness_amount: usize) -> (Vec<F>, Vec<F>) {
        let mut prng = test_rng();
        let a: Vec<F> = (0..degree).map(|_| F::random(&mut prng)).collect();
        let mut circuit = Circuit::new();
        let mut table = AssignmentTable::<F>::new(witness_amount, 1, 0);
        let vars = public_inputs(&mut table, 0, &a);
        let component =
            Frobenius::new(ComponentParams::with_witness_amount(witness_amount), degree, beta)
                .unwrap();
        let result = place(
            &component,
            &mut circuit,
            &mut table,
            &FrobeniusInput { coefficients: vars },
            0,
        );
        verify_assignment(&circuit, &table).unwrap();
        (a, table.values(&result.coefficients).unwrap())
    }

    #[test]
    fn quadratic_conjugation() {
        let beta = BN254Fq::from(5u32);
        let component =
            Frobenius::new(ComponentParams::with_witness_amount(4), 2, beta).unwrap();
        assert_eq!(component.gammas(), &[BN254Fq::one(), -BN254Fq::one()]);

        let (a, out) = run(2, beta, 4);
        assert_eq!(out, vec![a[0], -a[1]]);
    }

    #[test]
    fn cubic_roots_of_unity() {
        let beta = SECP256K1Fq::from(3u32);
        for witness_amount in [1, 2, 5] {
            let (a, out) = run(3, beta, witness_amount);
            assert_eq!(out[0], a[0]);
            let component =
                Frobenius::new(ComponentParams::with_witness_amount(witness_amount), 3, beta)
                    .unwrap();
            let gamma = component.gammas()[1];
            assert_eq!(gamma * gamma * gamma, SECP256K1Fq::one());
            assert_eq!(out[2], a[2] * gamma * gamma);
        }
    }

    #[test]
    fn quartic_over_a_two_adic_field() {
        let beta = BLSScalar::multiplicative_generator();
        let (a, out) = run(4, beta, 3);
        let component =
            Frobenius::new(ComponentParams::with_witness_amount(3), 4, beta).unwrap();
        let i = component.gammas()[1];
        assert_eq!(i * i, -BLSScalar::one());
        assert_eq!(out[3], a[3] * i * i * i);
    }

    #[test]
    fn degree_must_divide_p_minus_one() {
        // p = 3 mod 4 for the BN254 base field
        assert!(matches!(
            Frobenius::new(ComponentParams::with_witness_amount(4), 4, BN254Fq::from(5u32)),
            Err(BlueprintError::InvalidConfiguration { .. })
        ));
        assert!(Frobenius::new(ComponentParams::with_witness_amount(4), 0, BN254Fq::one()).is_err());
    }

    #[test]
    fn residues_are_rejected() {
        let params = ComponentParams::with_witness_amount(4);
        // 4 = 2^2 makes u^2 - 4 split
        assert!(matches!(
            Frobenius::new(params.clone(), 2, BN254Fq::from(4u32)),
            Err(BlueprintError::InvalidConfiguration { .. })
        ));
        assert!(Frobenius::new(params.clone(), 3, SECP256K1Fq::from(8u32)).is_err());
        assert!(Frobenius::new(params.clone(), 2, BN254Fq::zero()).is_err());
        // a square is no quartic non-residue either
        let square = BLSScalar::multiplicative_generator().square();
        assert!(Frobenius::new(params.clone(), 4, square).is_err());
        assert!(Frobenius::new(params, 1, BN254Fq::from(4u32)).is_ok());
        assert_eq!(prime_divisors(12), vec![2, 3]);
    }
}
