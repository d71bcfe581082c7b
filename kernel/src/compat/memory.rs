//! Memory Layout Manager for Cross-Platform Processes

extern crate alloc;
//
// Manages memory layout and allocation for cross-platform processes, handling:
// - Different address space layouts per platform
// - Memory protection and permissions
// - Stack and heap management
// - Shared memory regions
// - Memory mapping for foreign binaries

use core::ffi::c_void;
use core::ptr;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use alloc::sync::Arc;
use spin::Mutex;

use crate::compat::*;
use crate::subsystems::mm::vm;
use crate::mm;

/// Memory layout manager for cross-platform processes
pub struct MemoryLayoutManager {
    /// Platform-specific memory layouts
    memory_layouts: BTreeMap<TargetPlatform, PlatformMemoryLayout>,
    /// Allocated memory regions
    allocated_regions: Mutex<BTreeMap<usize, MemoryRegion>>,
    /// Next available virtual address
    next_virtual_addr: Mutex<usize>,
    /// Memory allocation statistics
    stats: Mutex<MemoryLayoutStats>,
}

/// Platform-specific memory layout configuration
#[derive(Debug, Clone)]
pub struct PlatformMemoryLayout {
    /// Target platform
    pub platform: TargetPlatform,
    /// Address space layout
    pub address_space: AddressSpaceLayout,
    /// Default stack configuration
    pub stack_config: StackConfig,
    /// Default heap configuration
    pub heap_config: HeapConfig,
    /// Memory protection settings
    pub protection_config: ProtectionConfig,
    /// Shared memory configuration
    pub shared_memory_config: SharedMemoryConfig,
}

/// Address space layout for a platform
#[derive(Debug, Clone)]
pub struct AddressSpaceLayout {
    /// Base address for executable code
    pub code_base: usize,
    /// Maximum size for code segment
    pub code_size: usize,
    /// Base address for data
    pub data_base: usize,
    /// Maximum size for data segment
    pub data_size: usize,
    /// Base address for heap
    pub heap_base: usize,
    /// Maximum heap size
    pub heap_size: usize,
    /// Base address for stack (grows down)
    pub stack_base: usize,
    /// Stack size
    pub stack_size: usize,
    /// Base address for shared libraries
    pub library_base: usize,
    /// Maximum library space size
    pub library_size: usize,
    /// Memory mapping region
    pub mmap_base: usize,
    /// Maximum mmap size
    pub mmap_size: usize,
    /// Page size for this platform
    pub page_size: usize,
}

/// Stack configuration
#[derive(Debug, Clone)]
pub struct StackConfig {
    /// Default stack size
    pub default_size: usize,
    /// Maximum stack size
    pub max_size: usize,
    /// Stack alignment requirement
    pub alignment: usize,
    /// Red zone size (unprotected area below stack)
    pub red_zone_size: usize,
    /// Guard page size
    pub guard_size: usize,
    /// Whether stack grows upward
    pub grows_up: bool,
}

/// Heap configuration
#[derive(Debug, Clone)]
pub struct HeapConfig {
    /// Initial heap size
    pub initial_size: usize,
    /// Maximum heap size
    pub max_size: usize,
    /// Heap growth increment
    pub growth_increment: usize,
    /// Heap alignment
    pub alignment: usize,
    /// Memory allocation strategy
    pub allocation_strategy: HeapAllocationStrategy,
}

/// Heap allocation strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapAllocationStrategy {
    /// First-fit allocation
    FirstFit,
    /// Best-fit allocation
    BestFit,
    /// Buddy system allocation
    BuddySystem,
    /// Slab allocation
    Slab,
}

/// Memory protection configuration
#[derive(Debug, Clone)]
pub struct ProtectionConfig {
    /// Default page permissions
    pub default_permissions: MemoryPermissions,
    /// Stack permissions
    pub stack_permissions: MemoryPermissions,
    /// Heap permissions
    pub heap_permissions: MemoryPermissions,
    /// Code permissions
    pub code_permissions: MemoryPermissions,
    /// Data permissions
    pub data_permissions: MemoryPermissions,
}

/// Shared memory configuration
#[derive(Debug, Clone)]
pub struct SharedMemoryConfig {
    /// Base address for shared memory
    pub base_address: usize,
    /// Maximum shared memory size
    pub max_size: usize,
    /// Alignment for shared memory regions
    pub alignment: usize,
    /// Default permissions for shared memory
    pub default_permissions: MemoryPermissions,
}

/// Memory layout statistics
#[derive(Debug, Default, Clone)]
pub struct MemoryLayoutStats {
    /// Total memory allocated
    pub total_allocated: usize,
    /// Peak memory usage
    pub peak_usage: usize,
    /// Number of allocations
    pub allocation_count: usize,
    /// Number of deallocations
    pub deallocation_count: usize,
    /// Memory fragmentation ratio
    pub fragmentation_ratio: f32,
    /// Number of page faults
    pub page_faults: u64,
    /// Number of TLB misses
    pub tlb_misses: u64,
}

/// Process memory context
#[derive(Debug)]
pub struct ProcessMemoryContext {
    /// Platform
    pub platform: TargetPlatform,
    /// Memory regions allocated for this process
    pub regions: BTreeMap<usize, MemoryRegion>,
    /// Stack information
    pub stack_info: StackInfo,
    /// Heap information
    pub heap_info: HeapInfo,
    /// Memory layout being used
    pub layout: PlatformMemoryLayout,
}

/// Stack information
#[derive(Debug, Clone)]
pub struct StackInfo {
    /// Stack base address
    pub base: usize,
    /// Current stack pointer
    pub sp: usize,
    /// Stack size
    pub size: usize,
    /// Available stack space
    pub available: usize,
    /// Number of guard pages
    pub guard_pages: usize,
}

/// Heap information
#[derive(Debug, Clone)]
pub struct HeapInfo {
    /// Heap base address
    pub base: usize,
    /// Current heap end
    pub brk: usize,
    /// Heap size
    pub size: usize,
    /// Available heap space
    pub available: usize,
    /// Number of allocations
    pub allocation_count: usize,
}

impl MemoryLayoutManager {
    /// Create a new memory layout manager
    pub fn new() -> Self {
        let mut manager = Self {
            memory_layouts: BTreeMap::new(),
            allocated_regions: Mutex::new(BTreeMap::new()),
            next_virtual_addr: Mutex::new(0x40000000usize), // Start at 1GB
            stats: Mutex::new(MemoryLayoutStats::default()),
        };

        // Initialize platform-specific layouts
        manager.init_platform_layouts();

        manager
    }

    /// Initialize memory layouts for all platforms
    fn init_platform_layouts(&mut self) {
        // Windows x64 layout
        self.memory_layouts.insert(TargetPlatform::Windows, PlatformMemoryLayout {
            platform: TargetPlatform::Windows,
            address_space: AddressSpaceLayout {
                code_base: 0x140000000,
                code_size: 0x10000000,   // 256MB
                data_base: 0x140100000,
                data_size: 0x10000000,   // 256MB
                heap_base: 0x200000000,
                heap_size: 0x80000000,   // 2GB
                stack_base: 0x7FFDE000,
                stack_size: 0x200000,    // 2MB
                library_base: 0x7FF00000,
                library_size: 0x1000000, // 16MB
                mmap_base: 0x300000000,
                mmap_size: 0x40000000,  // 1GB
                page_size: 4096,
            },
            stack_config: StackConfig {
                default_size: 0x200000,   // 2MB
                max_size: 0x10000000,     // 256MB
                alignment: 16,
                red_zone_size: 0,
                guard_size: 0x1000,       // 4KB
                grows_up: false,
            },
            heap_config: HeapConfig {
                initial_size: 0x100000,   // 1MB
                max_size: 0x80000000,     // 2GB
                growth_increment: 0x100000, // 1MB
                alignment: 16,
                allocation_strategy: HeapAllocationStrategy::BuddySystem,
            },
            protection_config: ProtectionConfig {
                default_permissions: MemoryPermissions::readwrite(),
                stack_permissions: MemoryPermissions::readwrite(),
                heap_permissions: MemoryPermissions::readwrite(),
                code_permissions: MemoryPermissions::read_exec(),
                data_permissions: MemoryPermissions::readwrite(),
            },
            shared_memory_config: SharedMemoryConfig {
                base_address: 0x7F000000,
                max_size: 0x1000000,     // 16MB
                alignment: 0x1000,        // 4KB
                default_permissions: MemoryPermissions::readwrite(),
            },
        });

        // Linux x64 layout
        self.memory_layouts.insert(TargetPlatform::Linux, PlatformMemoryLayout {
            platform: TargetPlatform::Linux,
            address_space: AddressSpaceLayout {
                code_base: 0x400000,
                code_size: 0x10000000,   // 256MB
                data_base: 0x60000000,
                data_size: 0x10000000,   // 256MB
                heap_base: 0x200000000,
                heap_size: 0x40000000,   // 1GB
                stack_base: 0x7FFFF000,
                stack_size: 0x8000000,   // 128MB
                library_base: 0x70000000,
                library_size: 0x10000000, // 256MB
                mmap_base: 0x300000000,
                mmap_size: 0x40000000,   // 1GB
                page_size: 4096,
            },
            stack_config: StackConfig {
                default_size: 0x800000,   // 8MB
                max_size: 0x10000000,     // 256MB
                alignment: 16,
                red_zone_size: 128,
                guard_size: 0x1000,       // 4KB
                grows_up: false,
            },
            heap_config: HeapConfig {
                initial_size: 0x100000,   // 1MB
                max_size: 0x40000000,     // 1GB
                growth_increment: 0x100000, // 1MB
                alignment: 16,
                allocation_strategy: HeapAllocationStrategy::BuddySystem,
            },
            protection_config: ProtectionConfig {
                default_permissions: MemoryPermissions::readwrite(),
                stack_permissions: MemoryPermissions::readwrite(),
                heap_permissions: MemoryPermissions::readwrite(),
                code_permissions: MemoryPermissions::read_exec(),
                data_permissions: MemoryPermissions::readwrite(),
            },
            shared_memory_config: SharedMemoryConfig {
                base_address: 0x60000000,
                max_size: 0x10000000,    // 256MB
                alignment: 0x1000,        // 4KB
                default_permissions: MemoryPermissions::readwrite(),
            },
        });

        // macOS x64 layout
        self.memory_layouts.insert(TargetPlatform::MacOS, PlatformMemoryLayout {
            platform: TargetPlatform::MacOS,
            address_space: AddressSpaceLayout {
                code_base: 0x100000000,
                code_size: 0x10000000,   // 256MB
                data_base: 0x110000000,
                data_size: 0x10000000,   // 256MB
                heap_base: 0x120000000,
                heap_size: 0x20000000,   // 512MB
                stack_base: 0x7FFF5FC0,
                stack_size: 0x10000000,   // 256MB
                library_base: 0x700000000000,
                library_size: 0x100000000, // 4GB
                mmap_base: 0x130000000,
                mmap_size: 0x20000000,   // 512MB
                page_size: 4096,
            },
            stack_config: StackConfig {
                default_size: 0x800000,   // 8MB
                max_size: 0x10000000,     // 256MB
                alignment: 16,
                red_zone_size: 128,
                guard_size: 0x1000,       // 4KB
                grows_up: false,
            },
            heap_config: HeapConfig {
                initial_size: 0x100000,   // 1MB
                max_size: 0x20000000,     // 512MB
                growth_increment: 0x100000, // 1MB
                alignment: 16,
                allocation_strategy: HeapAllocationStrategy::Slab,
            },
            protection_config: ProtectionConfig {
                default_permissions: MemoryPermissions::readwrite(),
                stack_permissions: MemoryPermissions::readwrite(),
                heap_permissions: MemoryPermissions::readwrite(),
                code_permissions: MemoryPermissions::read_exec(),
                data_permissions: MemoryPermissions::readwrite(),
            },
            shared_memory_config: SharedMemoryConfig {
                base_address: 0x140000000,
                max_size: 0x10000000,    // 256MB
                alignment: 0x1000,        // 4KB
                default_permissions: MemoryPermissions::readwrite(),
            },
        });

        // Android ARM64 layout (similar to Linux)
        self.memory_layouts.insert(TargetPlatform::Android, {
            let mut layout = self.memory_layouts.get(&TargetPlatform::Linux).unwrap().clone();
            layout.platform = TargetPlatform::Android;
            layout.address_space.page_size = 16384; // Android often uses 16KB pages
            layout
        });

        // iOS ARM64 layout (similar to macOS)
        self.memory_layouts.insert(TargetPlatform::IOS, {
            let mut layout = self.memory_layouts.get(&TargetPlatform::MacOS).unwrap().clone();
            layout.platform = TargetPlatform::IOS;
            layout.address_space.page_size = 16384; // iOS uses 16KB pages
            layout
        });
    }

    /// Create a memory context for a process
    pub fn create_process_context(&mut self, platform: TargetPlatform) -> Result<ProcessMemoryContext> {
        let layout = self.memory_layouts.get(&platform)
            .ok_or(CompatibilityError::UnsupportedArchitecture)?
            .clone();

        let mut context = ProcessMemoryContext {
            platform,
            regions: BTreeMap::new(),
            stack_info: StackInfo {
                base: layout.address_space.stack_base,
                sp: layout.address_space.stack_base,
                size: layout.stack_config.default_size,
                available: layout.stack_config.default_size,
                guard_pages: 1,
            },
            heap_info: HeapInfo {
                base: layout.address_space.heap_base,
                brk: layout.address_space.heap_base,
                size: layout.heap_config.initial_size,
                available: layout.heap_config.max_size - layout.heap_config.initial_size,
                allocation_count: 0,
            },
            layout,
        };

        // Allocate initial stack
        self.allocate_stack(&mut context)?;

        // Allocate initial heap
        self.allocate_heap(&mut context)?;

        Ok(context)
    }

    /// Allocate stack for a process
    fn allocate_stack(&mut self, context: &mut ProcessMemoryContext) -> Result<()> {
        let stack_base = context.layout.address_space.stack_base;
        let stack_size = context.layout.stack_config.default_size;
        let guard_size = context.layout.stack_config.guard_size;

        // Allocate guard page
        if guard_size > 0 {
            let guard_region = MemoryRegion {
                virtual_addr: stack_base,
                physical_addr: None,
                size: guard_size,
                permissions: crate::compat::MemoryPermissions::new(false, false, false), // No access
                region_type: MemoryRegionType::Guard,
            };
            self.allocate_memory_region(guard_region.clone())?;
            context.regions.insert(guard_region.virtual_addr, guard_region);
        }

        // Allocate actual stack
        let stack_region = MemoryRegion {
            virtual_addr: stack_base - guard_size - stack_size,
            physical_addr: None,
            size: stack_size,
            permissions: context.layout.protection_config.stack_permissions,
            region_type: MemoryRegionType::Stack,
        };
        // Extract needed info before moving
        let stack_base_addr = stack_region.virtual_addr;

        self.allocate_memory_region(stack_region.clone())?;
        context.regions.insert(stack_region.virtual_addr, stack_region);

        // Update stack info
        context.stack_info.base = stack_base_addr;
        context.stack_info.sp = stack_base - guard_size; // Top of stack
        context.stack_info.size = stack_size;

        Ok(())
    }

    /// Allocate heap for a process
    fn allocate_heap(&mut self, context: &mut ProcessMemoryContext) -> Result<()> {
        let heap_base = context.layout.address_space.heap_base;
        let heap_size = context.layout.heap_config.initial_size;

        let heap_region = MemoryRegion {
            virtual_addr: heap_base,
            physical_addr: None,
            size: heap_size,
            permissions: context.layout.protection_config.heap_permissions,
            region_type: MemoryRegionType::Heap,
        };
        self.allocate_memory_region(heap_region.clone())?;
        context.regions.insert(heap_base, heap_region);

        Ok(())
    }

    /// Allocate a memory region
    fn allocate_memory_region(&mut self, region: MemoryRegion) -> Result<()> {
        // Extract size before moving region
        let region_size = region.size;

        // In a real implementation, this would interact with the VM system
        // For now, just track the allocation
        {
            let mut regions = self.allocated_regions.lock();
            regions.insert(region.virtual_addr, region);
        }

        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_allocated += region_size;
            stats.allocation_count += 1;
            stats.peak_usage = stats.peak_usage.max(stats.total_allocated);
        }

        Ok(())
    }

    /// Map binary segments into process memory
    pub fn map_binary_segments(&mut self, context: &mut ProcessMemoryContext,
                               segments: &[BinarySegment]) -> Result<()> {
        for segment in segments {
            let permissions = {
                if segment.permissions.readable && segment.permissions.writable && segment.permissions.executable {
                    crate::compat::MemoryPermissions::new(true, true, true)
                } else if segment.permissions.readable && segment.permissions.writable {
                    crate::compat::MemoryPermissions::new(true, true, false)
                } else if segment.permissions.readable && segment.permissions.executable {
                    crate::compat::MemoryPermissions::new(true, false, true)
                } else if segment.permissions.readable {
                    crate::compat::MemoryPermissions::new(true, false, false)
                } else {
                    crate::compat::MemoryPermissions::new(false, false, false)
                }
            };

            let region_type = if segment.permissions.contains_executable() {
                MemoryRegionType::Code
            } else {
                MemoryRegionType::Data
            };

            let region = MemoryRegion {
                virtual_addr: segment.virtual_address,
                physical_addr: None,
                size: segment.size,
                permissions,
                region_type,
            };

            self.allocate_memory_region(region.clone())?;
            context.regions.insert(segment.virtual_address, region);
        }

        Ok(())
    }

    /// Allocate memory for shared libraries
    pub fn allocate_library_space(&mut self, context: &mut ProcessMemoryContext,
                                  library_size: usize) -> Result<usize> {
        let layout = &context.layout;
        let library_base = layout.address_space.library_base;

        // Find free space in library region
        let mut current_addr = library_base;
        let end_addr = library_base + layout.address_space.library_size;

        while current_addr + library_size <= end_addr {
            if !self.is_address_in_use(context, current_addr, current_addr + library_size) {
                // Allocate the library space
                let region = MemoryRegion {
                    virtual_addr: current_addr,
                    physical_addr: None,
                    size: library_size,
                    permissions: layout.protection_config.code_permissions,
                    region_type: MemoryRegionType::Code,
                };

                self.allocate_memory_region(region.clone())?;
                context.regions.insert(current_addr, region);
                return Ok(current_addr);
            }

            current_addr += layout.address_space.page_size;
        }

        Err(CompatibilityError::MemoryError)
    }

    /// Check if address range is in use
    fn is_address_in_use(&self, context: &ProcessMemoryContext, start: usize, end: usize) -> bool {
        for region in context.regions.values() {
            let region_end = region.virtual_addr + region.size;
            if !(region_end <= start || region.virtual_addr >= end) {
                return true; // Overlaps with existing region
            }
        }
        false
    }

    /// Extend heap for a process
    pub fn extend_heap(&mut self, context: &mut ProcessMemoryContext, additional_size: usize) -> Result<()> {
        let layout = &context.layout;
        let max_heap_end = context.heap_info.base + layout.heap_config.max_size;
        let new_heap_end = context.heap_info.brk + additional_size;

        if new_heap_end > max_heap_end {
            return Err(CompatibilityError::MemoryError);
        }

        // Allocate additional heap space
        let region = MemoryRegion {
            virtual_addr: context.heap_info.brk,
            physical_addr: None,
            size: additional_size,
            permissions: layout.protection_config.heap_permissions,
            region_type: MemoryRegionType::Heap,
        };

        self.allocate_memory_region(region.clone())?;
        context.regions.insert(context.heap_info.brk, region);

        // Update heap info
        context.heap_info.brk = new_heap_end;
        context.heap_info.size += additional_size;
        context.heap_info.available -= additional_size;

        Ok(())
    }

    /// Get memory statistics
    pub fn get_stats(&self) -> MemoryLayoutStats {
        self.stats.lock().clone()
    }

    /// Clear all allocated memory
    pub fn clear_all(&mut self) {
        self.allocated_regions.lock().clear();
        *self.stats.lock() = MemoryLayoutStats::default();
    }
}

/// Binary segment information
#[derive(Debug, Clone)]
pub struct BinarySegment {
    /// Virtual address where segment should be loaded
    pub virtual_address: usize,
    /// Size of segment in memory
    pub size: usize,
    /// Offset in file where segment data starts
    pub file_offset: usize,
    /// Size of segment in file
    pub file_size: usize,
    /// Segment permissions
    pub permissions: SegmentPermissions,
}

/// Segment permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentPermissions {
    pub readable: bool,
    pub writable: bool,
    pub executable: bool,
}

impl SegmentPermissions {
    /// Create new permissions
    pub fn new(read: bool, write: bool, exec: bool) -> Self {
        Self {
            readable: read,
            writable: write,
            executable: exec,
        }
    }

    /// Read-only
    pub fn read() -> Self {
        Self::new(true, false, false)
    }

    /// Read-write
    pub fn read_write() -> Self {
        Self::new(true, true, false)
    }

    /// Read-execute
    pub fn read_exec() -> Self {
        Self::new(true, false, true)
    }

    /// Read-write-execute
    pub fn read_write_exec() -> Self {
        Self::new(true, true, true)
    }

    /// Check if segment is executable
    pub fn contains_executable(&self) -> bool {
        self.executable
    }
}

/// Create a new memory layout manager
pub fn create_memory_layout_manager() -> MemoryLayoutManager {
    MemoryLayoutManager::new()
}
