// handlers/mod.rs - Handler tiers
//
// Public (no session) → Protected (session passed to the service)

pub mod protected;
pub mod public;
