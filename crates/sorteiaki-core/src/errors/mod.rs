mod model;

pub use model::{ConfigPathScope, Error, ErrorCode, ExitCode, MachineError, Result};
