//! sweep-core: the pure domain of stack reclamation.
//!
//! Parses stack names into structured identities and decides, from a
//! point-in-time snapshot of the active versions, whether a stack is safe
//! to reclaim. No I/O lives here; every function is deterministic over its
//! inputs so the engine can be tested with fake collaborators.
//!
//! The one rule that shapes everything: deletion requires a positive,
//! verifiable signal. Missing information (an unknown active version, an
//! unparseable name) always resolves to keeping the stack.

pub mod name;
pub mod policy;
pub mod types;

pub use policy::EMBARGO_SECS;
pub use types::*;
