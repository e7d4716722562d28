//! Retrieval store of real reviews used as style exemplars

mod entity;
mod store;

pub use entity::{ExemplarSet, StoredReview};
pub use store::ExemplarStore;

#[cfg(test)]
pub use store::MockExemplarStore;
