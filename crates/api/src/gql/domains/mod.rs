// Each domain contains: mod.rs, types.rs, resolvers.rs (+ service.rs where
// the logic outgrows the resolver)

pub mod questions;
pub mod votes;
