use crate::errors::{BlueprintError, Result};
use ark_std::collections::BTreeMap;
use blueprint_algebra::prelude::*;

/// Name of the table of 16-bit values.
pub const RANGE_16BIT: &str = "range_16bit";
/// Name of the table of byte values.
pub const BYTE_RANGE: &str = "byte_range";
/// Name of the table pairing an 8-bit chunk with any base-8 word of the same
/// digit parities.
pub const KECCAK_PACK: &str = "keccak_pack";
/// Name of the table pairing an 8-bit chunk with its canonical base-8 form.
pub const KECCAK_PACK_CANONICAL: &str = "keccak_pack_canonical";

/// A lookup table, described by its membership rule rather than by its rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupTable {
    /// Single values in `[0, 2^bits)`.
    Range {
        /// the bit bound.
        bits: usize,
    },
    /// Pairs `(c, s)` where `s` has `chunk_bits` base-8 digits and bit `j` of
    /// `c` is the parity of digit `j` of `s`.
    SparseChunk {
        /// the number of bits in a chunk.
        chunk_bits: usize,
    },
    /// Pairs `(c, sparse_chunk(c))` for `c` in `[0, 2^chunk_bits)`.
    CanonicalSparseChunk {
        /// the number of bits in a chunk.
        chunk_bits: usize,
    },
}

/// The value of a small field element, if it fits into a u64.
pub(crate) fn small_value<F: Scalar>(value: &F) -> Option<u64> {
    let limbs = value.get_little_endian_u64();
    if limbs.iter().skip(1).any(|l| *l != 0) {
        return None;
    }
    Some(limbs.first().copied().unwrap_or(0))
}

/// The base-8 sparse form of the `bits` lowest bits of `value`.
pub fn sparse_chunk(value: u64, bits: usize) -> u64 {
    (0..bits)
        .rev()
        .fold(0u64, |acc, j| (acc << 3) | ((value >> j) & 1))
}

impl LookupTable {
    /// The number of entries in a row of the table.
    pub fn arity(&self) -> usize {
        match self {
            LookupTable::Range { .. } => 1,
            LookupTable::SparseChunk { .. } | LookupTable::CanonicalSparseChunk { .. } => 2,
        }
    }

    /// Whether `tuple` is a row of the table.
    pub fn contains<F: Scalar>(&self, tuple: &[F]) -> bool {
        if tuple.len() != self.arity() {
            return false;
        }
        match self {
            LookupTable::Range { bits } => {
                matches!(small_value(&tuple[0]), Some(v) if v >> *bits == 0)
            }
            LookupTable::SparseChunk { chunk_bits } => {
                let chunk_bits = *chunk_bits;
                let (chunk, sparse) = match (small_value(&tuple[0]), small_value(&tuple[1])) {
                    (Some(c), Some(s)) => (c, s),
                    _ => return false,
                };
                if sparse >> (3 * chunk_bits) != 0 {
                    return false;
                }
                let parity = (0..chunk_bits)
                    .fold(0u64, |acc, j| acc | (((sparse >> (3 * j)) & 1) << j));
                parity == chunk
            }
            LookupTable::CanonicalSparseChunk { chunk_bits } => {
                match (small_value(&tuple[0]), small_value(&tuple[1])) {
                    (Some(c), Some(s)) => c >> *chunk_bits == 0 && s == sparse_chunk(c, *chunk_bits),
                    _ => false,
                }
            }
        }
    }
}

/// The registry mapping lookup table names to small integer ids.
#[derive(Clone, Debug, Default)]
pub struct LookupLibrary {
    tables: Vec<LookupTable>,
    ids: BTreeMap<String, usize>,
}

impl LookupLibrary {
    /// An empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// The id of the named table, reserving it on first use.
    pub fn reserve_table(&mut self, name: &str) -> Result<usize> {
        if let Some(id) = self.ids.get(name) {
            return Ok(*id);
        }
        let table = match name {
            RANGE_16BIT => LookupTable::Range { bits: 16 },
            BYTE_RANGE => LookupTable::Range { bits: 8 },
            KECCAK_PACK => LookupTable::SparseChunk { chunk_bits: 8 },
            KECCAK_PACK_CANONICAL => LookupTable::CanonicalSparseChunk { chunk_bits: 8 },
            _ => return Err(BlueprintError::UnknownLookupTable(name.to_string())),
        };
        let id = self.tables.len();
        self.tables.push(table);
        self.ids.insert(name.to_string(), id);
        tracing::debug!(table = name, id, "reserved lookup table");
        Ok(id)
    }

    /// The id of a table reserved earlier.
    pub fn get_table_id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    /// The table with this id.
    pub fn table(&self, id: usize) -> Option<&LookupTable> {
        self.tables.get(id)
    }

    /// The number of reserved tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table is reserved.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
