//! GPU Hardware Acceleration Module
//! 
//! This module provides GPU-specific hardware acceleration features including
//! GPU compute, graphics acceleration, and GPU memory management.

use crate::error::unified::UnifiedError;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use spin::Mutex;

/// GPU accelerator statistics
#[derive(Debug, Clone)]
pub struct GPUAccelStats {
    /// Total operations
    pub total_operations: AtomicU64,
    /// Compute operations
    pub compute_operations: AtomicU64,
    /// Graphics operations
    pub graphics_operations: AtomicU64,
    /// Memory transfer operations
    pub memory_operations: AtomicU64,
    /// Time saved (microseconds)
    pub time_saved_us: AtomicU64,
    /// Average acceleration ratio
    pub avg_acceleration_ratio: AtomicU64, // Fixed point with 2 decimal places
    /// GPU memory usage (bytes)
    pub memory_usage_bytes: AtomicU64,
    /// GPU utilization percentage
    pub utilization_percent: AtomicU64,
}

impl Default for GPUAccelStats {
    fn default() -> Self {
        Self {
            total_operations: AtomicU64::new(0),
            compute_operations: AtomicU64::new(0),
            graphics_operations: AtomicU64::new(0),
            memory_operations: AtomicU64::new(0),
            time_saved_us: AtomicU64::new(0),
            avg_acceleration_ratio: AtomicU64::new(100), // 1.00 in fixed point
            memory_usage_bytes: AtomicU64::new(0),
            utilization_percent: AtomicU64::new(0),
        }
    }
}

/// GPU information
#[derive(Debug, Clone)]
pub struct GPUInfo {
    /// GPU vendor
    pub vendor: String,
    /// GPU model
    pub model: String,
    /// GPU architecture
    pub architecture: String,
    /// Total GPU memory (bytes)
    pub total_memory: u64,
    /// Number of compute units
    pub compute_units: u32,
    /// Maximum clock frequency (MHz)
    pub max_clock_freq: u32,
    /// Supported compute capabilities
    pub compute_capabilities: Vec<String>,
    /// Supported graphics APIs
    pub graphics_apis: Vec<String>,
}

impl Default for GPUInfo {
    fn default() -> Self {
        Self {
            vendor: "Unknown".to_string(),
            model: "Unknown".to_string(),
            architecture: "Unknown".to_string(),
            total_memory: 0,
            compute_units: 0,
            max_clock_freq: 0,
            compute_capabilities: Vec::new(),
            graphics_apis: Vec::new(),
        }
    }
}

/// GPU memory allocation
#[derive(Debug)]
pub struct GPUMemoryAllocation {
    /// Allocation ID
    pub id: u64,
    /// Memory address
    pub address: usize,
    /// Size in bytes
    pub size: u64,
    /// Memory type
    pub memory_type: GPUMemoryType,
    /// Usage flags
    pub usage_flags: GPUMemoryUsage,
    /// Allocated timestamp
    pub allocated_at: u64,
}

/// GPU memory types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GPUMemoryType {
    /// Device local memory
    DeviceLocal,
    /// Host visible memory
    HostVisible,
    /// Host coherent memory
    HostCoherent,
    /// Host cached memory
    HostCached,
    /// Unified memory
    Unified,
}

/// GPU memory usage flags
#[derive(Debug, Clone, Copy)]
pub struct GPUMemoryUsage {
    /// Can be used for transfer source
    pub transfer_src: bool,
    /// Can be used for transfer destination
    pub transfer_dst: bool,
    /// Can be used as uniform buffer
    pub uniform_buffer: bool,
    /// Can be used as storage buffer
    pub storage_buffer: bool,
    /// Can be used as vertex buffer
    pub vertex_buffer: bool,
    /// Can be used as index buffer
    pub index_buffer: bool,
    /// Can be used as image
    pub image: bool,
}

impl Default for GPUMemoryUsage {
    fn default() -> Self {
        Self {
            transfer_src: false,
            transfer_dst: false,
            uniform_buffer: false,
            storage_buffer: false,
            vertex_buffer: false,
            index_buffer: false,
            image: false,
        }
    }
}

/// GPU compute task
#[derive(Debug)]
pub struct GPUComputeTask {
    /// Task ID
    pub id: u64,
    /// Task name
    pub name: String,
    /// Compute shader code
    pub shader_code: Vec<u8>,
    /// Input buffers
    pub input_buffers: Vec<u64>, // Buffer IDs
    /// Output buffers
    pub output_buffers: Vec<u64>, // Buffer IDs
    /// Work group dimensions
    pub work_group_size: (u32, u32, u32),
    /// Number of work groups
    pub num_work_groups: (u32, u32, u32),
    /// Task state
    pub state: GPUComputeTaskState,
    /// Created timestamp
    pub created_at: u64,
    /// Started timestamp
    pub started_at: Option<u64>,
    /// Completed timestamp
    pub completed_at: Option<u64>,
}

/// GPU compute task states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GPUComputeTaskState {
    /// Task is pending
    Pending,
    /// Task is running
    Running,
    /// Task completed successfully
    Completed,
    /// Task failed
    Failed,
}

/// GPU hardware accelerator
pub struct GPUAccelerator {
    /// GPU information
    gpu_info: GPUInfo,
    /// Accelerator statistics
    stats: GPUAccelStats,
    /// Active status
    active: bool,
    /// Memory allocations
    memory_allocations: Mutex<BTreeMap<u64, GPUMemoryAllocation>>,
    /// Compute tasks
    compute_tasks: Mutex<BTreeMap<u64, GPUComputeTask>>,
    /// Next allocation ID
    next_allocation_id: AtomicU64,
    /// Next task ID
    next_task_id: AtomicU64,
    /// GPU memory usage
    memory_usage: AtomicU64,
    /// GPU utilization
    utilization: AtomicU64,
}

impl GPUAccelerator {
    /// Create a new GPU accelerator
    pub fn new() -> Result<Self, UnifiedError> {
        let gpu_info = Self::detect_gpu_info();
        
        Ok(Self {
            gpu_info,
            stats: GPUAccelStats::default(),
            active: true,
            memory_allocations: Mutex::new(BTreeMap::new()),
            compute_tasks: Mutex::new(BTreeMap::new()),
            next_allocation_id: AtomicU64::new(1),
            next_task_id: AtomicU64::new(1),
            memory_usage: AtomicU64::new(0),
            utilization: AtomicU64::new(0),
        })
    }

    /// Initialize the GPU accelerator
    pub fn initialize(&self) -> Result<(), UnifiedError> {
        log::info!("Initializing GPU accelerator: {} {}", self.gpu_info.vendor, self.gpu_info.model);
        
        // Initialize GPU driver and runtime
        // This would include initializing CUDA, OpenCL, Vulkan, etc.
        
        log::info!("GPU accelerator initialized with {}MB memory", self.gpu_info.total_memory / (1024 * 1024));
        Ok(())
    }

    /// Detect GPU information
    fn detect_gpu_info() -> GPUInfo {
        // In a real implementation, this would query the GPU driver
        // For now, we'll return default information
        GPUInfo {
            vendor: "Generic".to_string(),
            model: "GPU Accelerator".to_string(),
            architecture: "Compute".to_string(),
            total_memory: 4 * 1024 * 1024 * 1024, // 4GB
            compute_units: 32,
            max_clock_freq: 1500,
            compute_capabilities: vec!["compute_30".to_string(), "compute_35".to_string()],
            graphics_apis: vec!["OpenGL".to_string(), "Vulkan".to_string()],
        }
    }

    /// Get GPU information
    pub fn get_gpu_info(&self) -> GPUInfo {
        self.gpu_info.clone()
    }

    /// Check if the accelerator is available
    pub fn is_available(&self) -> bool {
        self.active && self.gpu_info.total_memory > 0
    }

    /// Check if the accelerator is optimized
    pub fn is_optimized(&self) -> bool {
        self.active && self.gpu_info.compute_units > 0
    }

    /// Get operation count
    pub fn get_operation_count(&self) -> u64 {
        self.stats.total_operations.load(Ordering::Relaxed)
    }

    /// Get acceleration ratio
    pub fn get_acceleration_ratio(&self) -> f64 {
        self.stats.avg_acceleration_ratio.load(Ordering::Relaxed) as f64 / 100.0
    }

    /// Get time saved
    pub fn get_time_saved_us(&self) -> u64 {
        self.stats.time_saved_us.load(Ordering::Relaxed)
    }

    /// Reset statistics
    pub fn reset_stats(&self) {
        self.stats.total_operations.store(0, Ordering::Relaxed);
        self.stats.compute_operations.store(0, Ordering::Relaxed);
        self.stats.graphics_operations.store(0, Ordering::Relaxed);
        self.stats.memory_operations.store(0, Ordering::Relaxed);
        self.stats.time_saved_us.store(0, Ordering::Relaxed);
        self.stats.avg_acceleration_ratio.store(100, Ordering::Relaxed);
        self.stats.memory_usage_bytes.store(0, Ordering::Relaxed);
        self.stats.utilization_percent.store(0, Ordering::Relaxed);
    }

    /// Optimize the GPU accelerator
    pub fn optimize(&self) -> Result<(), UnifiedError> {
        if !self.active {
            return Err(UnifiedError::HwAccel("GPU accelerator is not active".to_string()));
        }
        
        // Enable GPU-specific optimizations
        // This would include power management, clock frequency adjustment, etc.
        
        log::info!("GPU accelerator optimized");
        Ok(())
    }

    /// Allocate GPU memory
    pub fn allocate_memory(
        &self,
        size: u64,
        memory_type: GPUMemoryType,
        usage_flags: GPUMemoryUsage,
    ) -> Result<u64, UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("GPU accelerator not available".to_string()));
        }
        
        let allocation_id = self.next_allocation_id.fetch_add(1, Ordering::Relaxed);
        let current_usage = self.memory_usage.load(Ordering::Relaxed);
        
        if current_usage + size > self.gpu_info.total_memory {
            return Err(UnifiedError::HwAccel("Insufficient GPU memory".to_string()));
        }
        
        // In a real implementation, this would allocate actual GPU memory
        let address = 0x10000000 + allocation_id as usize * 0x1000; // Fake address
        
        let allocation = GPUMemoryAllocation {
            id: allocation_id,
            address,
            size,
            memory_type,
            usage_flags,
            allocated_at: self.get_timestamp(),
        };
        
        {
            let mut allocations = self.memory_allocations.lock();
            allocations.insert(allocation_id, allocation);
        }
        
        self.memory_usage.fetch_add(size, Ordering::Relaxed);
        self.stats.memory_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.total_operations.fetch_add(1, Ordering::Relaxed);
        
        log::debug!("Allocated {} bytes of GPU memory (ID: {})", size, allocation_id);
        Ok(allocation_id)
    }

    /// Free GPU memory
    pub fn free_memory(&self, allocation_id: u64) -> Result<(), UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("GPU accelerator not available".to_string()));
        }
        
        let allocation = {
            let mut allocations = self.memory_allocations.lock();
            allocations.remove(&allocation_id)
        };
        
        if let Some(alloc) = allocation {
            self.memory_usage.fetch_sub(alloc.size, Ordering::Relaxed);
            self.stats.memory_operations.fetch_add(1, Ordering::Relaxed);
            self.stats.total_operations.fetch_add(1, Ordering::Relaxed);
            
            log::debug!("Freed {} bytes of GPU memory (ID: {})", alloc.size, allocation_id);
            Ok(())
        } else {
            Err(UnifiedError::HwAccel("Invalid allocation ID".to_string()))
        }
    }

    /// Create a compute task
    pub fn create_compute_task(
        &self,
        name: String,
        shader_code: Vec<u8>,
        work_group_size: (u32, u32, u32),
        num_work_groups: (u32, u32, u32),
    ) -> Result<u64, UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("GPU accelerator not available".to_string()));
        }
        
        let task_id = self.next_task_id.fetch_add(1, Ordering::Relaxed);
        
        let task = GPUComputeTask {
            id: task_id,
            name,
            shader_code,
            input_buffers: Vec::new(),
            output_buffers: Vec::new(),
            work_group_size,
            num_work_groups,
            state: GPUComputeTaskState::Pending,
            created_at: self.get_timestamp(),
            started_at: None,
            completed_at: None,
        };
        
        {
            let mut tasks = self.compute_tasks.lock();
            tasks.insert(task_id, task);
        }
        
        log::debug!("Created compute task (ID: {})", task_id);
        Ok(task_id)
    }

    /// Add input buffer to compute task
    pub fn add_input_buffer(&self, task_id: u64, buffer_id: u64) -> Result<(), UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("GPU accelerator not available".to_string()));
        }
        
        let mut tasks = self.compute_tasks.lock();
        if let Some(task) = tasks.get_mut(&task_id) {
            if task.state != GPUComputeTaskState::Pending {
                return Err(UnifiedError::HwAccel("Task is not in pending state".to_string()));
            }
            task.input_buffers.push(buffer_id);
            Ok(())
        } else {
            Err(UnifiedError::HwAccel("Invalid task ID".to_string()))
        }
    }

    /// Add output buffer to compute task
    pub fn add_output_buffer(&self, task_id: u64, buffer_id: u64) -> Result<(), UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("GPU accelerator not available".to_string()));
        }
        
        let mut tasks = self.compute_tasks.lock();
        if let Some(task) = tasks.get_mut(&task_id) {
            if task.state != GPUComputeTaskState::Pending {
                return Err(UnifiedError::HwAccel("Task is not in pending state".to_string()));
            }
            task.output_buffers.push(buffer_id);
            Ok(())
        } else {
            Err(UnifiedError::HwAccel("Invalid task ID".to_string()))
        }
    }

    /// Execute a compute task
    pub fn execute_compute_task(&self, task_id: u64) -> Result<(), UnifiedError> {
        if !self.is_available() {
            return Err(UnifiedError::HwAccel("GPU accelerator not available".to_string()));
        }
        
        let start_time = self.get_timestamp();
        
        {
            let mut tasks = self.compute_tasks.lock();
            if let Some(task) = tasks.get_mut(&task_id) {
                if task.state != GPUComputeTaskState::Pending {
                    return Err(UnifiedError::HwAccel("Task is not in pending state".to_string()));
                }
                
                task.state = GPUComputeTaskState::Running;
                task.started_at = Some(start_time);
            } else {
                return Err(UnifiedError::HwAccel("Invalid task ID".to_string()));
            }
        }
        
        // In a real implementation, this would submit the task to the GPU
        // For now, we'll simulate execution
        self.simulate_task_execution(task_id);
        
        let end_time = self.get_timestamp();
        let elapsed = end_time - start_time;
        
        // Update statistics
        self.stats.compute_operations.fetch_add(1, Ordering::Relaxed);
        self.stats.total_operations.fetch_add(1, Ordering::Relaxed);
        self.update_time_stats(elapsed);
        
        log::debug!("Executed compute task (ID: {}) in {}μs", task_id, elapsed);
        Ok(())
    }

    /// Simulate task execution
    fn simulate_task_execution(&self, task_id: u64) {
        let completion_time = self.get_timestamp() + 1000; // Simulate 1ms execution
        
        {
            let mut tasks = self.compute_tasks.lock();
            if let Some(task) = tasks.get_mut(&task_id) {
                task.state = GPUComputeTaskState::Completed;
                task.completed_at = Some(completion_time);
            }
        }
    }

    /// Get task status
    pub fn get_task_status(&self, task_id: u64) -> Result<GPUComputeTaskState, UnifiedError> {
        let tasks = self.compute_tasks.lock();
        if let Some(task) = tasks.get(&task_id) {
            Ok(task.state)
        } else {
            Err(UnifiedError::HwAccel("Invalid task ID".to_string()))
        }
    }

    /// Get memory usage
    pub fn get_memory_usage(&self) -> u64 {
        self.memory_usage.load(Ordering::Relaxed)
    }

    /// Get utilization percentage
    pub fn get_utilization(&self) -> u64 {
        self.utilization.load(Ordering::Relaxed)
    }

    /// Get current timestamp (in microseconds)
    fn get_timestamp(&self) -> u64 {
        // In a real implementation, this would use a high-precision timer
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::Relaxed)
    }

    /// Update time statistics
    fn update_time_stats(&self, elapsed: u64) {
        // Estimate time saved compared to CPU implementation
        let baseline_time = elapsed * 4; // Assume GPU is 4x faster
        let time_saved = baseline_time - elapsed;
        
        self.stats.time_saved_us.fetch_add(time_saved, Ordering::Relaxed);
        
        // Update average acceleration ratio
        let current_ratio = if elapsed > 0 { (baseline_time * 100) / elapsed } else { 100 };
        let current_avg = self.stats.avg_acceleration_ratio.load(Ordering::Relaxed);
        let new_avg = (current_avg + current_ratio) / 2;
        self.stats.avg_acceleration_ratio.store(new_avg, Ordering::Relaxed);
        
        // Update utilization (simplified)
        let current_util = self.utilization.load(Ordering::Relaxed);
        let new_util = if current_util < 100 { current_util + 1 } else { 100 };
        self.utilization.store(new_util, Ordering::Relaxed);
    }
}