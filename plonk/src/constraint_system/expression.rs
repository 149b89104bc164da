use crate::constraint_system::Var;
use crate::errors::Result;
use ark_std::{boxed::Box, cmp::max};
use blueprint_algebra::prelude::*;

/// A polynomial over table variables, kept as an expression tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression<F> {
    /// A field constant.
    Constant(F),
    /// A table cell.
    Var(Var),
    /// The sum of two expressions.
    Sum(Box<Expression<F>>, Box<Expression<F>>),
    /// The product of two expressions.
    Product(Box<Expression<F>>, Box<Expression<F>>),
    /// The negation of an expression.
    Negated(Box<Expression<F>>),
}

impl<F: Scalar> Expression<F> {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Expression::Constant(F::zero())
    }

    /// The constant one.
    pub fn one() -> Self {
        Expression::Constant(F::one())
    }

    /// A single variable.
    pub fn var(var: Var) -> Self {
        Expression::Var(var)
    }

    /// Total degree in the table variables.
    pub fn degree(&self) -> usize {
        match self {
            Expression::Constant(_) => 0,
            Expression::Var(_) => 1,
            Expression::Sum(a, b) => max(a.degree(), b.degree()),
            Expression::Product(a, b) => a.degree() + b.degree(),
            Expression::Negated(a) => a.degree(),
        }
    }

    /// Evaluate with `resolve` supplying the value of each variable.
    pub fn evaluate<R>(&self, resolve: &R) -> Result<F>
    where
        R: Fn(&Var) -> Result<F>,
    {
        Ok(match self {
            Expression::Constant(c) => *c,
            Expression::Var(v) => resolve(v)?,
            Expression::Sum(a, b) => a.evaluate(resolve)? + b.evaluate(resolve)?,
            Expression::Product(a, b) => a.evaluate(resolve)? * b.evaluate(resolve)?,
            Expression::Negated(a) => -a.evaluate(resolve)?,
        })
    }

    /// Collect the variables the expression reads.
    pub fn vars(&self) -> Vec<Var> {
        let mut out = vec![];
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars(&self, out: &mut Vec<Var>) {
        match self {
            Expression::Constant(_) => {}
            Expression::Var(v) => out.push(*v),
            Expression::Sum(a, b) | Expression::Product(a, b) => {
                a.collect_vars(out);
                b.collect_vars(out);
            }
            Expression::Negated(a) => a.collect_vars(out),
        }
    }
}

impl<F: Scalar> From<Var> for Expression<F> {
    fn from(var: Var) -> Self {
        Expression::Var(var)
    }
}

impl<F: Scalar> Add for Expression<F> {
    type Output = Expression<F>;

    fn add(self, rhs: Self) -> Self::Output {
        Expression::Sum(Box::new(self), Box::new(rhs))
    }
}

impl<F: Scalar> Sub for Expression<F> {
    type Output = Expression<F>;

    fn sub(self, rhs: Self) -> Self::Output {
        Expression::Sum(Box::new(self), Box::new(Expression::Negated(Box::new(rhs))))
    }
}

impl<F: Scalar> Mul for Expression<F> {
    type Output = Expression<F>;

    fn mul(self, rhs: Self) -> Self::Output {
        Expression::Product(Box::new(self), Box::new(rhs))
    }
}

impl<F: Scalar> Neg for Expression<F> {
    type Output = Expression<F>;

    fn neg(self) -> Self::Output {
        Expression::Negated(Box::new(self))
    }
}

impl<F: Scalar> Sum for Expression<F> {
    fn sum<I: Iterator<Item = Expression<F>>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<F: Scalar> Arithmetic<F> for Expression<F> {
    fn constant(value: F) -> Self {
        Expression::Constant(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::BlueprintError;
    use blueprint_algebra::bn254::BN254Scalar;

    type F = BN254Scalar;

    fn square_plus_x<T: Arithmetic<F>>(x: T) -> T {
        x.clone() * x.clone() + x + T::constant(F::from(3u32))
    }

    #[test]
    fn native_and_symbolic_agree() {
        let var = Var::witness_rel(0, 0);
        let expr = square_plus_x::<Expression<F>>(Expression::var(var));
        assert_eq!(expr.degree(), 2);
        assert_eq!(expr.vars(), vec![var, var, var]);

        let value = F::from(5u32);
        let evaluated = expr.evaluate(&|_: &Var| Ok(value)).unwrap();
        assert_eq!(evaluated, square_plus_x::<F>(value));
        assert_eq!(evaluated, F::from(33u32));
    }

    #[test]
    fn subtraction_and_negation() {
        let a = Expression::<F>::var(Var::witness_rel(0, 0));
        let b = Expression::<F>::var(Var::witness_rel(1, -1));
        let expr = -(a - b) * Expression::constant(F::from(2u32));
        let value = expr
            .evaluate(&|v: &Var| Ok(F::from(10u32 + v.index as u32)))
            .unwrap();
        // -(10 - 11) * 2
        assert_eq!(value, F::from(2u32));
    }

    #[test]
    fn resolver_errors_propagate() {
        let expr = Expression::<F>::var(Var::witness_rel(0, -1)) + Expression::one();
        let res = expr.evaluate(&|v: &Var| v.resolve_row(0).map(|_| F::zero()));
        assert_eq!(res, Err(BlueprintError::RowOutOfRange(-1)));
    }

    #[test]
    fn sum_of_expressions() {
        let terms: Vec<Expression<F>> = (1..=4u32)
            .map(|i| Expression::constant(F::from(i)))
            .collect();
        let total: Expression<F> = terms.into_iter().sum();
        assert_eq!(total.degree(), 0);
        assert_eq!(total.evaluate(&|_: &Var| Ok(F::zero())).unwrap(), F::from(10u32));
    }
}
