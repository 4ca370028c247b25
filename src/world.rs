/// Object kinds, agents, recipes and the [`model::WorldView`] trait.
pub mod model;
/// Owned, JSON-loadable world state.
pub mod snapshot;
