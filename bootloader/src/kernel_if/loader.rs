//! Kernel loader
pub use crate::kernel_loader_impl::*;
pub use crate::kernel_loader::*;
pub use crate::elf_loader::*;
pub use crate::kernel_if::elf_loader_v2::*;
pub use crate::elf_loader_hardened::*;
pub use crate::elf64::*;
