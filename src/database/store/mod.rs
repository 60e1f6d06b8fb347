//! Entity stores: one struct per table, one query per operation.
//!
//! Every query is scoped to the owning user's id; there is no unscoped
//! mutation path. Stores surface unique-constraint violations as
//! [`DatabaseError::UniqueViolation`](crate::database::DatabaseError) with a
//! message naming the conflicting value.

pub mod folders;
pub mod notes;
pub mod tags;
pub mod users;

pub use folders::FolderStore;
pub use notes::{NoteFilters, NoteStore};
pub use tags::TagStore;
pub use users::UserStore;
