// Persisted record types and their Postgres row mappings.

pub mod analysis;
pub mod feedback;
