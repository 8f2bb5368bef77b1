//! Hash algorithm implementations

mod md5;
mod sha256;

pub use md5::{MD5_OUTPUT_SIZE, Md5, Md5Algorithm};
pub use sha256::{SHA256_OUTPUT_SIZE, Sha256, Sha256Algorithm};
