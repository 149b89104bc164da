mod arithmetic;
mod frobenius;
mod range_check;

pub use arithmetic::{
    BinaryOp, BinaryOperation, BinaryOperationInput, FieldOperationResult, MulByConstant,
    MulByConstantInput,
};
pub use frobenius::{Frobenius, FrobeniusInput, FrobeniusResult};
pub use range_check::{RangeCheckInput, RangeCheckMulti, RangeCheckResult};
