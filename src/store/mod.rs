pub mod encryptor;
pub mod file;
pub mod memory;
