//! 内存管理系统调用服务实现
//! 
//! 本模块实现内存管理相关的系统调用服务，包括：
//! - 服务生命周期管理
//! - 系统调用分发和处理
//! - 与服务注册器的集成
//! - 虚拟内存管理

use crate::error_handling::unified::KernelError;
use crate::syscalls::mm::handlers;
use crate::syscalls::services::{Service, ServiceStatus, SyscallService};
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// 内存管理系统调用服务
/// 
/// 实现SyscallService特征，提供内存管理相关的系统调用处理。
#[derive(Debug)]
pub struct MemoryService {
    /// 服务名称
    name: String,
    /// 服务版本
    version: String,
    /// 服务描述
    description: String,
    /// 服务状态
    status: ServiceStatus,
    /// 支持的系统调用号
    supported_syscalls: Vec<u32>,
    /// 内存区域列表
    memory_regions: Vec<crate::syscalls::mm::types::MemoryRegion>,
    /// 当前堆结束地址
    heap_end: u64,
    /// 下一个可用虚拟地址
    next_virtual_addr: u64,
}

impl MemoryService {
    /// 创建新的内存管理服务实例
    /// 
    /// # 返回值
    /// 
    /// * `Self` - 新的服务实例
    pub fn new() -> Self {
        Self {
            name: String::from("memory"),
            version: String::from("1.0.0"),
            description: String::from("Memory management syscall service"),
            status: ServiceStatus::Uninitialized,
            supported_syscalls: handlers::get_supported_syscalls(),
            memory_regions: Vec::new(),
            heap_end: 0x50000000, // 默认堆起始地址
            next_virtual_addr: 0x40000000, // 默认虚拟地址起始
        }
    }

    /// 获取内存统计信息
    /// 
    /// # 返回值
    /// 
    /// * `MemoryStats` - 内存统计信息
    pub fn get_memory_stats(&self) -> crate::syscalls::mm::types::MemoryStats {
        let used_memory: u64 = self.memory_regions.iter().map(|r| r.size).sum();
        
        crate::syscalls::mm::types::MemoryStats {
            total_memory: 0x100000000, // 4GB
            free_memory: 0x100000000 - used_memory,
            used_memory,
            cached_memory: 0,
            swap_total: 0,
            swap_used: 0,
            regions_count: self.memory_regions.len() as u32,
            largest_free_block: 0x100000000 - used_memory,
        }
    }

    /// 获取内存区域信息
    /// 
    /// # 参数
    /// 
    /// * `address` - 内存地址
    /// 
    /// # 返回值
    /// 
    /// * `Option<MemoryRegion>` - 内存区域信息
    pub fn get_memory_region(&self, address: u64) -> Option<crate::syscalls::mm::types::MemoryRegion> {
        self.memory_regions.iter().find(|region| {
            address >= region.start_address && address < region.end_address
        }).cloned()
    }

    /// 列出所有内存区域
    /// 
    /// # 返回值
    /// 
    /// * `Vec<MemoryRegion>` - 内存区域列表
    pub fn list_memory_regions(&self) -> Vec<crate::syscalls::mm::types::MemoryRegion> {
        self.memory_regions.clone()
    }

    /// 分配内存区域
    /// 
    /// # 参数
    /// 
    /// * `params` - 内存映射参数
    /// 
    /// # 返回值
    /// 
    /// * `Result<u64, MemoryError>` - 分配的地址或错误
    pub fn allocate_memory_region(&mut self, params: crate::syscalls::mm::types::MemoryMapParams) -> Result<u64, crate::syscalls::mm::types::MemoryError> {
        // TODO: 实现实际的内存区域分配
        let address = if params.address != 0 {
            params.address
        } else {
            self.next_virtual_addr
        };

        let region = crate::syscalls::mm::types::MemoryRegion {
            start_address: address,
            end_address: address + params.size,
            size: params.size,
            region_type: crate::syscalls::mm::types::MemoryRegionType::Heap,
            protection: params.protection,
            flags: params.flags.clone(),
            file_offset: params.offset,
            fd: params.fd,
            name: String::from("allocated_region"),
        };

        self.memory_regions.push(region);
        self.next_virtual_addr = address + params.size;

        crate::log_debug!("Allocated memory region: {:#x} - {:#x} (size: {})", 
                    address, address + params.size, params.size);
        Ok(address)
    }

    /// 释放内存区域
    /// 
    /// # 参数
    /// 
    /// * `address` - 内存地址
    /// * `size` - 内存大小
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), MemoryError>` - 操作结果
    pub fn free_memory_region(&mut self, address: u64, size: u64) -> Result<(), crate::syscalls::mm::types::MemoryError> {
        if let Some(pos) = self.memory_regions.iter().position(|region| {
            region.start_address == address && region.size == size
        }) {
            self.memory_regions.remove(pos);
            crate::log_debug!("Freed memory region: {:#x} (size: {})", address, size);
            Ok(())
        } else {
            Err(crate::syscalls::mm::types::MemoryError::InvalidAddress)
        }
    }

    /// 修改内存保护
    /// 
    /// # 参数
    /// 
    /// * `address` - 内存地址
    /// * `size` - 内存大小
    /// * `protection` - 新的保护属性
    /// 
    /// # 返回值
    /// 
    /// * `Result<(), MemoryError>` - 操作结果
    pub fn change_memory_protection(&mut self, address: u64, size: u64, protection: crate::syscalls::mm::types::MemoryProtection) -> Result<(), crate::syscalls::mm::types::MemoryError> {
        if let Some(region) = self.memory_regions.iter_mut().find(|region| {
            address >= region.start_address && address < region.end_address
        }) {
            region.protection = protection;
            crate::log_debug!("Changed memory protection: {:#x} (size: {})", address, size);
            Ok(())
        } else {
            Err(crate::syscalls::mm::types::MemoryError::InvalidAddress)
        }
    }

    /// 扩展堆
    /// 
    /// # 参数
    /// 
    /// * `increment` - 扩展大小
    /// 
    /// # 返回值
    /// 
    /// * `Result<u64, MemoryError>` - 新的堆结束地址
    pub fn extend_heap(&mut self, increment: i64) -> Result<u64, crate::syscalls::mm::types::MemoryError> {
        if increment > 0 {
            let new_end = self.heap_end + increment as u64;
            
            // 检查是否超过限制
            if new_end > 0x60000000 { // 堆上限
                return Err(crate::syscalls::mm::types::MemoryError::OutOfMemory);
            }
            
            self.heap_end = new_end;
        } else if increment < 0 {
            let new_end = self.heap_end.saturating_sub((-increment) as u64);
            
            if new_end < 0x50000000 { // 堆下限
                return Err(crate::syscalls::mm::types::MemoryError::InvalidArgument);
            }
            
            self.heap_end = new_end;
        }

        crate::log_debug!("Heap extended to: {:#x}", self.heap_end);
        Ok(self.heap_end)
    }

    /// 获取页面大小
    /// 
    /// # 返回值
    /// 
    /// * `u64` - 页面大小
    pub fn get_page_size(&self) -> u64 {
        crate::syscalls::mm::types::PageSize::Size4K as u64
    }

    /// 检查地址对齐
    /// 
    /// # 参数
    /// 
    /// * `address` - 要检查的地址
    /// * `alignment` - 对齐要求
    /// 
    /// # 返回值
    /// 
    /// * `bool` - 是否对齐
    pub fn is_address_aligned(&self, address: u64, alignment: crate::syscalls::mm::types::MemoryAlignment) -> bool {
        alignment.is_aligned(address)
    }
}

impl Default for MemoryService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for MemoryService {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn initialize(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Initializing MemoryService");
        self.status = ServiceStatus::Initializing;
        
        // TODO: 初始化虚拟内存管理器
        
        self.status = ServiceStatus::Initialized;
        crate::log_info!("MemoryService initialized successfully");
        Ok(())
    }

    fn start(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Starting MemoryService");
        self.status = ServiceStatus::Starting;
        
        // TODO: 启动虚拟内存管理器
        
        self.status = ServiceStatus::Running;
        crate::log_info!("MemoryService started successfully");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Stopping MemoryService");
        self.status = ServiceStatus::Stopping;
        
        // TODO: 停止虚拟内存管理器
        
        self.status = ServiceStatus::Stopped;
        crate::log_info!("MemoryService stopped successfully");
        Ok(())
    }

    fn destroy(&mut self) -> Result<(), KernelError> {
        crate::log_info!("Destroying MemoryService");
        
        // TODO: 销毁虚拟内存管理器
        
        self.status = ServiceStatus::Uninitialized;
        crate::log_info!("MemoryService destroyed successfully");
        Ok(())
    }

    fn status(&self) -> ServiceStatus {
        self.status
    }

    fn dependencies(&self) -> Vec<&str> {
        // 内存管理服务可能依赖的模块
        vec!["page_allocator", "tlb_manager"]
    }
}

impl SyscallService for MemoryService {
    fn supported_syscalls(&self) -> Vec<u32> {
        self.supported_syscalls.clone()
    }

    fn handle_syscall(&mut self, syscall_number: u32, args: &[u64]) -> Result<u64, KernelError> {
        crate::log_debug!("MemoryService handling syscall: {}", syscall_number);
        
        // 分发到具体的处理函数
        handlers::dispatch_syscall(syscall_number, args)
    }

    fn priority(&self) -> u32 {
        40 // 内存管理服务优先级
    }
}

/// 内存管理服务工厂
/// 
/// 用于创建内存管理服务实例的工厂结构体。
pub struct MemoryServiceFactory;

impl MemoryServiceFactory {
    /// 创建内存管理服务实例
    /// 
    /// # 返回值
    /// 
    /// * `Box<dyn SyscallService>` - 内存管理服务实例
    pub fn create() -> Box<dyn SyscallService> {
        Box::new(MemoryService::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_service_creation() {
        let service = MemoryService::new();
        assert_eq!(service.name(), "memory");
        assert_eq!(service.version(), "1.0.0");
        assert_eq!(service.status(), ServiceStatus::Uninitialized);
        assert_eq!(service.heap_end, 0x50000000);
    }

    #[test]
    fn test_memory_service_lifecycle() {
        let mut service = MemoryService::new();
        
        // 测试初始化
        assert!(service.initialize().is_ok());
        assert_eq!(service.status(), ServiceStatus::Initialized);
        
        // 测试启动
        assert!(service.start().is_ok());
        assert_eq!(service.status(), ServiceStatus::Running);
        
        // 测试停止
        assert!(service.stop().is_ok());
        assert_eq!(service.status(), ServiceStatus::Stopped);
    }

    #[test]
    fn test_memory_region_allocation() {
        let mut service = MemoryService::new();
        
        let params = crate::syscalls::mm::types::MemoryMapParams {
            address: 0,
            size: 4096,
            protection: crate::syscalls::mm::types::MemoryProtection::read_write(),
            flags: Vec::new(),
            fd: None,
            offset: 0,
        };
        
        let address = service.allocate_memory_region(params).unwrap();
        assert_eq!(address, 0x40000000);
        assert_eq!(service.memory_regions.len(), 1);
        
        let region = &service.memory_regions[0];
        assert_eq!(region.start_address, 0x40000000);
        assert_eq!(region.size, 4096);
    }

    #[test]
    fn test_heap_extension() {
        let mut service = MemoryService::new();
        
        // 扩展堆
        let new_end = service.extend_heap(4096).unwrap();
        assert_eq!(new_end, 0x50001000);
        assert_eq!(service.heap_end, 0x50001000);
        
        // 收缩堆
        let new_end = service.extend_heap(-2048).unwrap();
        assert_eq!(new_end, 0x50000800);
        assert_eq!(service.heap_end, 0x50000800);
    }

    #[test]
    fn test_supported_syscalls() {
        let service = MemoryService::new();
        let syscalls = service.supported_syscalls();
        assert!(!syscalls.is_empty());
        assert!(syscalls.contains(&9)); // mmap
        assert!(syscalls.contains(&11)); // munmap
    }
}