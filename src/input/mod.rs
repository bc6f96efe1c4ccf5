//! Data inputs: a heterogeneous collection whose member kinds are
//! discovered from the server rather than fixed at compile time.

mod collection;
mod kind;
mod registry;

pub use collection::{Input, InputCollection};
pub use kind::InputKind;
pub use registry::{KindEntry, KindRegistry, MAX_KIND_DEPTH};
