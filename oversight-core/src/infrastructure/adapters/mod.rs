// oversight-core/src/infrastructure/adapters/mod.rs

pub mod identity;
pub mod memory;
pub mod yaml_file;

pub use identity::StaticIdentity;
pub use memory::InMemoryRepository;
pub use yaml_file::YamlFileRepository;
