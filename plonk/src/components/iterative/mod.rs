mod bits;
mod exponentiation;
mod f3_loop;
mod gate_component;

pub use bits::{BitComposition, BitCompositionInput, BitDecomposition, BitDecompositionInput, BitOrder, BitsResult, ComposedResult};
pub use exponentiation::{FixedPowerExponentiation, FixedPowerInput, FixedPowerResult};
pub use f3_loop::{F3Loop, F3LoopInput, F3LoopResult};
pub use gate_component::{GateComponent, GateComponentInput, GateComponentResult};
