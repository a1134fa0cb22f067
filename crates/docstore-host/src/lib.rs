// Host file system storage

pub mod filesystem;

pub use filesystem::HostStorage;
