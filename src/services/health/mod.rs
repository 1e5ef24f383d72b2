pub mod check;
pub mod probe;

pub use check::{check_liveness, check_readiness};
pub use probe::{DbProbe, NoDatabase, ProbeError, ProbeResult};
