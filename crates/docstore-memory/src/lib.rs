// In-memory storage, for tests and for running without touching disk

pub mod filesystem;

pub use filesystem::MemoryStorage;
