use crate::errors::{BlueprintError, Result};

/// The kind of table column a variable points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// Private witness column.
    Witness,
    /// Public input column.
    PublicInput,
    /// Fixed constant column.
    Constant,
    /// Selector column.
    Selector,
}

/// A reference to a table cell.
///
/// A relative variable names a rotation from the row a gate is evaluated at;
/// an absolute variable stores its row in `rotation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Var {
    /// the column index within its column type.
    pub index: usize,
    /// the row offset, or the absolute row.
    pub rotation: i32,
    /// whether `rotation` is relative.
    pub relative: bool,
    /// the kind of column.
    pub column_type: ColumnType,
}

impl Var {
    /// Create a variable.
    pub fn new(index: usize, rotation: i32, relative: bool, column_type: ColumnType) -> Self {
        Self {
            index,
            rotation,
            relative,
            column_type,
        }
    }

    /// An absolute cell; rows past `i32::MAX` are not addressable.
    pub fn absolute(index: usize, row: usize, column_type: ColumnType) -> Result<Self> {
        let rotation = i32::try_from(row)
            .map_err(|_| BlueprintError::RowOutOfRange(i64::try_from(row).unwrap_or(i64::MAX)))?;
        Ok(Self::new(index, rotation, false, column_type))
    }

    /// An absolute witness cell.
    pub fn witness(index: usize, row: usize) -> Result<Self> {
        Self::absolute(index, row, ColumnType::Witness)
    }

    /// An absolute public input cell.
    pub fn public_input(index: usize, row: usize) -> Result<Self> {
        Self::absolute(index, row, ColumnType::PublicInput)
    }

    /// An absolute constant cell.
    pub fn constant(index: usize, row: usize) -> Result<Self> {
        Self::absolute(index, row, ColumnType::Constant)
    }

    /// A witness cell relative to the evaluation row.
    pub fn witness_rel(index: usize, rotation: i32) -> Self {
        Self::new(index, rotation, true, ColumnType::Witness)
    }

    /// A constant cell relative to the evaluation row.
    pub fn constant_rel(index: usize, rotation: i32) -> Self {
        Self::new(index, rotation, true, ColumnType::Constant)
    }

    /// The absolute row this variable points to when evaluated at `row`.
    pub fn resolve_row(&self, row: usize) -> Result<usize> {
        let target = if self.relative {
            row as i64 + self.rotation as i64
        } else {
            self.rotation as i64
        };
        if target < 0 {
            return Err(BlueprintError::RowOutOfRange(target));
        }
        Ok(target as usize)
    }

    /// The absolute row of an absolute variable.
    pub fn row(&self) -> Result<usize> {
        if self.relative {
            return Err(BlueprintError::UnexpectedVariable);
        }
        self.resolve_row(0)
    }
}
