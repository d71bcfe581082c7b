//! Memory Management - Layout, paging, hotplug, ECC, mirroring (P1, P9)

pub mod memory_init;
pub mod memory_mapping;
pub mod paging;
pub mod paging_setup;
pub mod memory_hotplug;
pub mod memory_ecc;
pub mod memory_mirroring;
pub mod advanced_memory_mgmt;
