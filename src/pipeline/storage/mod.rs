// In-memory directory storage and its publication point

pub mod in_memory;

pub use in_memory::{Directory, DirectoryBuilder, DirectorySummary, SharedDirectory};
