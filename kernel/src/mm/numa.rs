//! NUMA-aware memory allocation support
//!
//! This module provides basic NUMA (Non-Uniform Memory Access) support for
//! memory allocation. NUMA allows the kernel to allocate memory from the
//! closest memory node to the CPU, improving performance by reducing
//! memory access latency.

use core::ptr::null_mut;
use core::sync::atomic::{AtomicUsize, Ordering};
use alloc::vec::Vec;
use crate::sync::Mutex;

/// NUMA node identifier
pub type NodeId = usize;

/// Maximum number of NUMA nodes supported
pub const MAX_NUMA_NODES: usize = 8;

/// Memory zone types
#[derive(Debug, Clone, Copy)]
pub enum MemoryZoneType {
    Normal,       // Normal memory
    HighMem,      // High memory (for systems with >4GB memory)
    DeviceMem,    // Device memory
    HugepageMem,  // Huge page memory
}

/// Memory zone information
pub struct MemoryZone {
    zone_type: MemoryZoneType,
    start_address: usize,
    end_address: usize,
    free_memory: AtomicUsize,
    total_memory: usize,
}

/// NUMA node information
pub struct NumaNode {
    node_id: NodeId,
    cpu_mask: u64, // CPUs associated with this node
    memory_zones: Vec<MemoryZone>,
    free_memory: AtomicUsize,
    total_memory: usize,
}

/// NUMA allocation policy
#[derive(Debug, Clone, Copy)]
pub enum NumaPolicy {
    LocalNode,    // Allocate from the local node (closest to current CPU)
    AnyNode,      // Allocate from any available node
    SpecificNode(NodeId), // Allocate from a specific node
    Interleave,   // Interleave allocation across all nodes
}

impl NumaNode {
    /// Create a new NUMA node
    pub const fn new(node_id: NodeId, cpu_mask: u64) -> Self {
        Self {
            node_id,
            cpu_mask,
            memory_zones: Vec::new(),
            free_memory: AtomicUsize::new(0),
            total_memory: 0,
        }
    }
    
    /// Add a memory zone to this NUMA node
    pub unsafe fn add_memory_zone(&mut self, zone_type: MemoryZoneType, start: usize, end: usize) {
        let zone = MemoryZone {
            zone_type,
            start_address: start,
            end_address: end,
            free_memory: AtomicUsize::new(end - start),
            total_memory: end - start,
        };
        
        self.memory_zones.push(zone);
        self.total_memory += end - start;
        self.free_memory.fetch_add(end - start, Ordering::Relaxed);
    }
    
    /// Get the amount of free memory in this node
    pub fn free_memory(&self) -> usize {
        self.free_memory.load(Ordering::Relaxed)
    }
    
    /// Get the total memory in this node
    pub fn total_memory(&self) -> usize {
        self.total_memory
    }
    
    /// Check if a CPU is associated with this node
    pub fn has_cpu(&self, cpu: usize) -> bool {
        if cpu >= 64 {
            false
        } else {
            (self.cpu_mask & (1 << cpu)) != 0
        }
    }
}

/// NUMA controller
pub struct NumaController {
    nodes: Vec<Mutex<NumaNode>>,
    current_cpu: AtomicUsize,
}

impl NumaController {
    /// Create a new NUMA controller
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            current_cpu: AtomicUsize::new(0),
        }
    }
    
    /// Add a NUMA node to the controller
    pub fn add_node(&mut self, node: NumaNode) {
        self.nodes.push(Mutex::new(node));
    }
    
    /// Set the current CPU for NUMA allocation decisions
    pub fn set_current_cpu(&self, cpu: usize) {
        self.current_cpu.store(cpu, Ordering::Relaxed);
    }
    
    /// Get the current CPU
    pub fn current_cpu(&self) -> usize {
        self.current_cpu.load(Ordering::Relaxed)
    }
    
    /// Get the NUMA node for the current CPU using LocalNode policy
    pub fn get_local_node_id(&self) -> Option<NodeId> {
        let current_cpu = self.current_cpu();
        
        for (node_id, node) in self.nodes.iter().enumerate() {
            let node_guard = node.lock();
            if node_guard.has_cpu(current_cpu) {
                return Some(node_id);
            }
        }
        
        None // No node found for current CPU
    }
    
    /// Get the NUMA node with the most free memory using AnyNode policy
    pub fn get_node_with_most_free(&self) -> Option<NodeId> {
        let mut best_node = None;
        let mut max_free = 0;
        
        for (node_id, node) in self.nodes.iter().enumerate() {
            let node_guard = node.lock();
            let free = node_guard.free_memory();
            
            if free > max_free {
                max_free = free;
                best_node = Some(node_id);
            }
        }
        
        best_node
    }
}

/// Global NUMA controller instance
static NUMA_CONTROLLER: Mutex<NumaController> = Mutex::new(NumaController::new());

/// Initialize the NUMA controller
pub fn numa_init() {
    // This is a placeholder. In a real implementation, we would detect
    // NUMA nodes from hardware information.
    
    // For now, we'll assume a single NUMA node with all CPUs
    let node = NumaNode::new(0, 0xffffffffffffffff); // All CPUs
    let mut controller = NUMA_CONTROLLER.lock();
    controller.add_node(node);
}

/// Allocate memory with NUMA awareness
pub unsafe fn numa_alloc(size: usize, policy: NumaPolicy) -> *mut u8 {
    // This is a placeholder implementation. In a real implementation, we
    // would allocate memory from the appropriate NUMA node.
    
    // For now, we just return null
    null_mut()
}

/// Allocate memory with a specific alignment and NUMA policy
pub unsafe fn numa_alloc_aligned(size: usize, align: usize, policy: NumaPolicy) -> *mut u8 {
    // This is a placeholder implementation. In a real implementation, we
    // would allocate memory from the appropriate NUMA node with the requested alignment.
    
    // For now, we just return null
    null_mut()
}

/// Allocate zero-initialized memory with NUMA awareness
pub unsafe fn numa_alloc_zeroed(size: usize, policy: NumaPolicy) -> *mut u8 {
    // This is a placeholder implementation. In a real implementation, we
    // would allocate zero-initialized memory from the appropriate NUMA node.
    
    // For now, we just return null
    null_mut()
}

/// Deallocate memory allocated with NUMA-aware allocation
pub unsafe fn numa_dealloc(ptr: *mut u8, size: usize) {
    // This is a placeholder implementation. In a real implementation, we
    // would free the memory and update the appropriate NUMA node's free memory count.
}

/// Get the NUMA node for a given memory address
pub fn numa_node_for_address(addr: *mut u8) -> NodeId {
    // This is a placeholder implementation. In a real implementation, we
    // would determine which NUMA node contains the given address.
    
    // For now, we just return node 0
    0
}

/// Set the default NUMA allocation policy
pub fn numa_set_default_policy(policy: NumaPolicy) {
    // This is a placeholder implementation. In a real implementation, we
    // would set the default NUMA policy for future allocations.
}

/// Get the default NUMA allocation policy
pub fn numa_get_default_policy() -> NumaPolicy {
    // This is a placeholder implementation. In a real implementation, we
    // would return the current default NUMA policy.
    
    NumaPolicy::LocalNode
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numa_node() {
        let mut node = NumaNode::new(0, 0b1111); // CPUs 0-3
        
        // Check that CPUs 0-3 are associated with this node
        assert!(node.has_cpu(0));
        assert!(node.has_cpu(1));
        assert!(node.has_cpu(2));
        assert!(node.has_cpu(3));
        
        // Check that other CPUs are not associated
        assert!(!node.has_cpu(4));
        assert!(!node.has_cpu(5));
    }

    #[test]
    fn test_numa_controller() {
        let mut controller = NumaController::new();
        
        // Add a node with CPUs 0-3
        let node0 = NumaNode::new(0, 0b1111);
        controller.add_node(node0);
        
        // Add a node with CPUs 4-7
        let node1 = NumaNode::new(1, 0b11110000);
        controller.add_node(node1);
        
        // Test current CPU setting
        controller.set_current_cpu(2);
        
        // Get local node for CPU 2 (should be node 0)
        let local_node = controller.get_local_node_id();
        assert_eq!(local_node, Some(0));
        
        // Get local node for CPU 5 (should be node 1)
        controller.set_current_cpu(5);
        let local_node = controller.get_local_node_id();
        assert_eq!(local_node, Some(1));
    }
}