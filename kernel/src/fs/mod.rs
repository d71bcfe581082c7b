pub mod fs_impl;
pub mod file;

#[cfg(feature = "kernel_tests")]
pub mod tests;

pub use fs_impl::*;
pub use file::*;
