//! Entity structs for the Harbor domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and
//! schema generation.

mod commit;
mod repository;

pub use commit::Commit;
pub use repository::{Repository, RepositoryDetails};
