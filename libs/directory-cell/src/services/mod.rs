pub mod directory;
pub mod fixtures;

pub use directory::DirectoryService;
