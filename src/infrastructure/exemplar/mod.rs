//! Exemplar store implementations

mod in_memory;
mod postgres;

pub use in_memory::InMemoryExemplarStore;
pub use postgres::PostgresExemplarStore;
