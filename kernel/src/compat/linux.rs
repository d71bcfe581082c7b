//! Linux Binary Compatibility Layer
//!
//! Provides compatibility for Linux applications on NOS:
//! - Linux syscalls mapping
//! - GLIBC compatibility
//! - Linux VFS compatibility
//! - Linux signal handling
//! - Linux threading (pthread)

extern crate alloc;

use alloc::string::String;
use alloc::string::ToString;
use alloc::collections::BTreeMap;
use crate::compat::*;

/// Linux compatibility module
pub struct LinuxModule {
    syscall_table: LinuxSyscallTable,
    glibc_compatibility: GlibcCompatibility,
    vfs_compatibility: LinuxVfsCompatibility,
}

impl LinuxModule {
    pub fn new() -> Self {
        Self {
            syscall_table: LinuxSyscallTable::new(),
            glibc_compatibility: GlibcCompatibility::new(),
            vfs_compatibility: LinuxVfsCompatibility::new(),
        }
    }
}

impl PlatformModule for LinuxModule {
    fn name(&self) -> &str {
        "Linux Compatibility Layer"
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn initialize(&mut self) -> Result<(), &'static str> {
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), &'static str> {
        Ok(())
    }

}

/// Linux system call table
#[derive(Debug)]
pub struct LinuxSyscallTable {
    syscalls: BTreeMap<u32, String>,
}

impl LinuxSyscallTable {
    pub fn new() -> Self {
        let mut table = Self {
            syscalls: BTreeMap::new(),
        };

        table.register_core_syscalls();
        table
    }

    fn register_core_syscalls(&mut self) {
        // Common Linux syscalls
        self.syscalls.insert(0, "sys_read".to_string());
        self.syscalls.insert(1, "sys_write".to_string());
        self.syscalls.insert(2, "sys_open".to_string());
        self.syscalls.insert(3, "sys_close".to_string());
        self.syscalls.insert(39, "sys_getpid".to_string());
        self.syscalls.insert(57, "sys_fork".to_string());
        self.syscalls.insert(60, "sys_exit".to_string());
    }
}

/// GLIBC compatibility layer
#[derive(Debug)]
pub struct GlibcCompatibility {
    // GLIBC implementation
}

impl GlibcCompatibility {
    pub fn new() -> Self {
        Self {}
    }
}

/// Linux VFS compatibility
#[derive(Debug)]
pub struct LinuxVfsCompatibility {
    // VFS compatibility implementation
}

impl LinuxVfsCompatibility {
    pub fn new() -> Self {
        Self {}
    }
}