mod unified_addition;

pub use unified_addition::{UnifiedAddition, UnifiedAdditionInput, UnifiedAdditionResult};
