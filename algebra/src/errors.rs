use ark_std::{error, fmt};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum AlgebraError {
    DeserializationError,
    GroupInversionError,
    NotOnCurveError,
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AlgebraError::*;
        f.write_str(match self {
            DeserializationError => "Could not deserialize object",
            GroupInversionError => "Group Element not invertible",
            NotOnCurveError => "Coordinates do not describe a point on the curve",
        })
    }
}

impl error::Error for AlgebraError {}
