mod delta;
mod execute;
mod state;

pub use delta::{ExecResult, FlagsDelta, RegisterDelta};
pub use execute::execute;
pub use state::{Flags, MachineState, MEMORY_SIZE};
