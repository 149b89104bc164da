mod block;
mod position;
mod running;

pub use block::BlockLayout;
pub use position::CellPosition;
pub use running::{RowKind, RunningAccumulator, RunningLayout};
