pub mod bot;
pub mod policy;

pub use bot::{DeclarationPlanner, PlayPlanner, PlayReason};
pub use policy::HeuristicPolicy;
