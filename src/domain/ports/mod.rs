//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod change_source;
pub mod file_system;

pub use change_source::{
    ChangeBatch, ChangeCallback, ChangeEvent, ChangeKind, ChangeSource, Subscription,
};
#[cfg(test)]
pub use file_system::MockFileSystem;
pub use file_system::{DirEntry, EntryKind, FileSystem, FsError, FsResult};
