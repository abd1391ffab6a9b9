//! Save/load adapters for session documents.
//!
//! A session is persisted as one self-describing JSON [`SaveDocument`]. The
//! [`SessionRepository`] trait abstracts where documents live; the file
//! implementation is used by tools, the in-memory one by tests.

mod document;
mod error;
mod file;
mod memory;
mod traits;

pub use document::{SAVE_FORMAT, SAVE_VERSION, SaveDocument};
pub use error::{RepositoryError, Result};
pub use file::FileSessionRepository;
pub use memory::InMemorySessionRepository;
pub use traits::SessionRepository;
