pub mod file_set;
pub mod file_system;
pub mod path;

pub use file_set::FileSet;
pub use file_system::{FileSystem, LocalFileSystem};
