//! Advanced POSIX Thread Features
//!
//! This module implements advanced POSIX thread features including:
//! - Thread attribute management (scheduling policy, parameters, inheritance)
//! - Thread scheduling parameter management
//! - Thread CPU clock access
//! - Barrier synchronization primitives
//! - Spinlock synchronization primitives

use crate::posix::{Pid, ClockId, Timespec};
use crate::sync::Mutex;
use alloc::collections::BTreeMap;
use core::sync::atomic::{AtomicUsize, AtomicU64, Ordering};
use core::ptr;

/// Thread attribute structure
#[derive(Clone)]
pub struct ThreadAttr {
    /// Scheduling policy
    pub sched_policy: i32,
    /// Scheduling parameters
    pub sched_param: crate::posix::realtime::SchedParam,
    /// Scheduling inheritance
    pub sched_inherit: i32,
    /// Detach state
    pub detach_state: i32,
    /// Stack size
    pub stack_size: usize,
    /// Stack address
    pub stack_addr: *mut u8,
    /// Guard size
    pub guard_size: usize,
    /// CPU affinity
    pub cpu_affinity: crate::posix::realtime::CpuSet,
}

impl ThreadAttr {
    /// Create new thread attributes with default values
    pub fn new() -> Self {
        Self {
            sched_policy: crate::posix::realtime::SCHED_NORMAL,
            sched_param: crate::posix::realtime::SchedParam::default(),
            sched_inherit: crate::posix::PTHREAD_INHERIT_SCHED,
            detach_state: crate::posix::PTHREAD_CREATE_JOINABLE,
            stack_size: 0, // Use default
            stack_addr: ptr::null_mut(),
            guard_size: 0, // Use default
            cpu_affinity: crate::posix::realtime::CpuSet::all(),
        }
    }

    /// Set scheduling policy
    pub fn set_sched_policy(&mut self, policy: i32) -> Result<(), ThreadError> {
        match policy {
            crate::posix::realtime::SCHED_NORMAL |
            crate::posix::realtime::SCHED_FIFO |
            crate::posix::realtime::SCHED_RR |
            crate::posix::realtime::SCHED_BATCH |
            crate::posix::realtime::SCHED_IDLE => {
                self.sched_policy = policy;
                Ok(())
            }
            _ => Err(ThreadError::InvalidPolicy),
        }
    }

    /// Get scheduling policy
    pub fn get_sched_policy(&self) -> i32 {
        self.sched_policy
    }

    /// Set scheduling parameters
    pub fn set_sched_param(&mut self, param: crate::posix::realtime::SchedParam) -> Result<(), ThreadError> {
        if !param.is_valid_for_policy(self.sched_policy) {
            return Err(ThreadError::InvalidPriority);
        }
        self.sched_param = param;
        Ok(())
    }

    /// Get scheduling parameters
    pub fn get_sched_param(&self) -> crate::posix::realtime::SchedParam {
        self.sched_param
    }

    /// Set scheduling inheritance
    pub fn set_sched_inherit(&mut self, inherit: i32) -> Result<(), ThreadError> {
        match inherit {
            crate::posix::PTHREAD_INHERIT_SCHED |
            crate::posix::PTHREAD_EXPLICIT_SCHED => {
                self.sched_inherit = inherit;
                Ok(())
            }
            _ => Err(ThreadError::InvalidInherit),
        }
    }

    /// Get scheduling inheritance
    pub fn get_sched_inherit(&self) -> i32 {
        self.sched_inherit
    }

    /// Set detach state
    pub fn set_detach_state(&mut self, detach: i32) -> Result<(), ThreadError> {
        match detach {
            crate::posix::PTHREAD_CREATE_JOINABLE |
            crate::posix::PTHREAD_CREATE_DETACHED => {
                self.detach_state = detach;
                Ok(())
            }
            _ => Err(ThreadError::InvalidDetachState),
        }
    }

    /// Get detach state
    pub fn get_detach_state(&self) -> i32 {
        self.detach_state
    }

    /// Set stack size
    pub fn set_stack_size(&mut self, size: usize) -> Result<(), ThreadError> {
        if size != 0 && size < 16384 { // Minimum 16KB stack
            return Err(ThreadError::InvalidStackSize);
        }
        self.stack_size = size;
        Ok(())
    }

    /// Get stack size
    pub fn get_stack_size(&self) -> usize {
        self.stack_size
    }

    /// Set stack address
    pub fn set_stack_addr(&mut self, addr: *mut u8) {
        self.stack_addr = addr;
    }

    /// Get stack address
    pub fn get_stack_addr(&self) -> *mut u8 {
        self.stack_addr
    }

    /// Set guard size
    pub fn set_guard_size(&mut self, size: usize) -> Result<(), ThreadError> {
        self.guard_size = size;
        Ok(())
    }

    /// Get guard size
    pub fn get_guard_size(&self) -> usize {
        self.guard_size
    }

    /// Set CPU affinity
    pub fn set_cpu_affinity(&mut self, affinity: crate::posix::realtime::CpuSet) -> Result<(), ThreadError> {
        if affinity.count() == 0 {
            return Err(ThreadError::InvalidAffinity);
        }
        self.cpu_affinity = affinity;
        Ok(())
    }

    /// Get CPU affinity
    pub fn get_cpu_affinity(&self) -> &crate::posix::realtime::CpuSet {
        &self.cpu_affinity
    }
}

impl Default for ThreadAttr {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl Send for ThreadAttr {}
unsafe impl Sync for ThreadAttr {}

/// Barrier synchronization primitive
pub struct Barrier {
    /// Number of threads required to reach the barrier
    pub required: AtomicUsize,
    /// Number of threads currently waiting at the barrier
    pub waiting: AtomicUsize,
    /// Barrier state (0 = not in use, 1 = in use)
    pub state: AtomicUsize,
    /// Mutex for barrier operations
    pub mutex: Mutex<()>,
}

impl Barrier {
    /// Create a new barrier
    pub fn new(count: usize) -> Result<Self, ThreadError> {
        if count == 0 {
            return Err(ThreadError::InvalidBarrierCount);
        }

        Ok(Self {
            required: AtomicUsize::new(count),
            waiting: AtomicUsize::new(0),
            state: AtomicUsize::new(0),
            mutex: Mutex::new(()),
        })
    }

    /// Wait at the barrier
    pub fn wait(&self) -> Result<(), ThreadError> {
        let _guard = self.mutex.lock();
        
        // Mark barrier as in use
        self.state.store(1, Ordering::SeqCst);
        
        // Increment waiting count
        let waiting_count = self.waiting.fetch_add(1, Ordering::SeqCst) + 1;
        
        if waiting_count == self.required.load(Ordering::SeqCst) {
            // Last thread to arrive - release all
            self.waiting.store(0, Ordering::SeqCst);
            self.state.store(0, Ordering::SeqCst);
            
            // In a real implementation, we would wake up all waiting threads
            // For now, we just return success
            Ok(())
        } else {
            // Not the last thread - wait for release
            // In a real implementation, this would block until state becomes 0
            // For now, we just return success
            Ok(())
        }
    }

    /// Destroy the barrier
    pub fn destroy(&self) -> Result<(), ThreadError> {
        let _guard = self.mutex.lock();
        
        if self.waiting.load(Ordering::SeqCst) > 0 {
            return Err(ThreadError::BarrierInUse);
        }
        
        self.state.store(0, Ordering::SeqCst);
        Ok(())
    }

    /// Get barrier statistics
    pub fn get_stats(&self) -> BarrierStats {
        BarrierStats {
            required: self.required.load(Ordering::SeqCst),
            waiting: self.waiting.load(Ordering::SeqCst),
            in_use: self.state.load(Ordering::SeqCst) != 0,
        }
    }
}

/// Barrier statistics
#[derive(Debug, Clone, Copy)]
pub struct BarrierStats {
    /// Number of threads required
    pub required: usize,
    /// Number of threads currently waiting
    pub waiting: usize,
    /// Whether barrier is currently in use
    pub in_use: bool,
}

/// Spinlock synchronization primitive
#[derive(Debug)]
pub struct Spinlock {
    /// Lock state (0 = unlocked, 1 = locked)
    pub locked: AtomicUsize,
    /// Thread ID of current owner
    pub owner: AtomicU64,
    /// Lock count for recursive locking
    pub count: AtomicUsize,
}

impl Spinlock {
    /// Create a new spinlock
    pub fn new() -> Self {
        Self {
            locked: AtomicUsize::new(0),
            owner: AtomicU64::new(0),
            count: AtomicUsize::new(0),
        }
    }

    /// Try to acquire the spinlock (non-blocking)
    pub fn try_lock(&self) -> bool {
        let current_thread = crate::process::thread::current_thread().unwrap_or(0) as u64;
        
        // Check if already owned by this thread
        if self.owner.load(Ordering::SeqCst) == current_thread {
            self.count.fetch_add(1, Ordering::SeqCst);
            return true;
        }

        // Try to acquire lock
        match self.locked.compare_exchange_weak(
            0, 1, Ordering::Acquire, Ordering::SeqCst
        ) {
            Ok(_) => {
                self.owner.store(current_thread, Ordering::SeqCst);
                self.count.store(1, Ordering::SeqCst);
                true
            }
            Err(_) => false,
        }
    }

    /// Acquire the spinlock (blocking)
    pub fn lock(&self) {
        let current_thread = crate::process::thread::current_thread().unwrap_or(0) as u64;
        
        loop {
            // Check if already owned by this thread
            if self.owner.load(Ordering::SeqCst) == current_thread {
                self.count.fetch_add(1, Ordering::SeqCst);
                return;
            }

            // Try to acquire lock
            match self.locked.compare_exchange_weak(
                0, 1, Ordering::Acquire, Ordering::SeqCst
            ) {
                Ok(_) => {
                    self.owner.store(current_thread, Ordering::SeqCst);
                    self.count.store(1, Ordering::SeqCst);
                    return;
                }
                Err(_) => {
                    // Lock is held by another thread, spin wait
                    // In a real implementation, we would use CPU pause instruction
                    for _ in 0..1000 {
                        crate::arch::wfi();
                    }
                }
            }
        }
    }

    /// Release the spinlock
    pub fn unlock(&self) {
        let current_thread = crate::process::thread::current_thread().unwrap_or(0) as u64;
        
        // Verify ownership
        if self.owner.load(Ordering::SeqCst) != current_thread {
            // Unlocking from non-owner thread - undefined behavior
            return;
        }

        let count = self.count.fetch_sub(1, Ordering::SeqCst);
        if count == 1 {
            // Last unlock - release the lock
            self.locked.store(0, Ordering::Release);
            self.owner.store(0, Ordering::SeqCst);
        }
    }

    /// Check if the spinlock is locked
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst) != 0
    }

    /// Get lock statistics
    pub fn get_stats(&self) -> SpinlockStats {
        SpinlockStats {
            locked: self.locked.load(Ordering::SeqCst) != 0,
            owner: self.owner.load(Ordering::SeqCst),
            count: self.count.load(Ordering::SeqCst),
        }
    }
}

/// Spinlock statistics
#[derive(Debug, Clone, Copy)]
pub struct SpinlockStats {
    /// Whether the lock is currently held
    pub locked: bool,
    /// Thread ID of the lock owner
    pub owner: u64,
    /// Current lock count (for recursive locks)
    pub count: usize,
}

/// Thread CPU clock information
#[derive(Debug)]
pub struct ThreadClock {
    /// Thread ID
    pub thread_id: Pid,
    /// Clock ID
    pub clock_id: ClockId,
    /// Clock start time (nanoseconds since boot)
    pub start_time: u64,
    /// Total CPU time used (nanoseconds)
    pub cpu_time: AtomicU64,
    /// Last update timestamp
    pub last_update: AtomicU64,
}

impl ThreadClock {
    /// Create a new thread clock
    pub fn new(thread_id: Pid, clock_id: ClockId) -> Self {
        let current_time = crate::time::get_timestamp();
        Self {
            thread_id,
            clock_id,
            start_time: current_time,
            cpu_time: AtomicU64::new(0),
            last_update: AtomicU64::new(current_time),
        }
    }

    /// Get the current clock time
    pub fn get_time(&self) -> u64 {
        self.cpu_time.load(Ordering::SeqCst)
    }

    /// Update the CPU time
    pub fn update_time(&self, delta_ns: u64) {
        let old_time = self.cpu_time.fetch_add(delta_ns, Ordering::SeqCst);
        let current_time = crate::time::get_timestamp();
        self.last_update.store(current_time, Ordering::SeqCst);
        
        // Log significant time updates
        if delta_ns > 1_000_000 { // More than 1ms
            crate::println!("[thread] Thread {} CPU time updated: {}ns (total: {}ns)", 
                self.thread_id, delta_ns, old_time + delta_ns);
        }
    }

    /// Get clock statistics
    pub fn get_stats(&self) -> ThreadClockStats {
        ThreadClockStats {
            thread_id: self.thread_id,
            clock_id: self.clock_id,
            start_time: self.start_time,
            cpu_time_ms: self.cpu_time.load(Ordering::SeqCst) / 1_000_000,
            last_update: self.last_update.load(Ordering::SeqCst),
        }
    }
}

/// Thread clock statistics
#[derive(Debug, Clone, Copy)]
pub struct ThreadClockStats {
    /// Thread ID
    pub thread_id: Pid,
    /// Clock ID
    pub clock_id: ClockId,
    /// Clock start time
    pub start_time: u64,
    /// Total CPU time used (milliseconds)
    pub cpu_time_ms: u64,
    /// Last update timestamp
    pub last_update: u64,
}

/// Thread management errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadError {
    /// Invalid scheduling policy
    InvalidPolicy,
    /// Invalid priority for policy
    InvalidPriority,
    /// Invalid scheduling inheritance
    InvalidInherit,
    /// Invalid detach state
    InvalidDetachState,
    /// Invalid stack size
    InvalidStackSize,
    /// Invalid CPU affinity
    InvalidAffinity,
    /// Invalid barrier count
    InvalidBarrierCount,
    /// Barrier is currently in use
    BarrierInUse,
    /// Thread not found
    ThreadNotFound,
    /// Operation not supported
    NotSupported,
}

/// Global thread management registry
pub static THREAD_REGISTRY: Mutex<ThreadRegistry> = Mutex::new(ThreadRegistry::new());

/// Thread registry for managing advanced thread features
pub struct ThreadRegistry {
    /// Map from thread ID to thread attributes
    pub thread_attrs: BTreeMap<Pid, ThreadAttr>,
    /// Map from thread ID to barriers
    pub barriers: BTreeMap<Pid, Barrier>,
    /// Map from thread ID to spinlocks
    pub spinlocks: BTreeMap<Pid, Spinlock>,
    /// Map from thread ID to CPU clocks
    pub clocks: BTreeMap<Pid, ThreadClock>,
    /// Next thread ID to allocate
    pub next_thread_id: Pid,
}

impl ThreadRegistry {
    /// Create a new thread registry
    pub const fn new() -> Self {
        Self {
            thread_attrs: BTreeMap::new(),
            barriers: BTreeMap::new(),
            spinlocks: BTreeMap::new(),
            clocks: BTreeMap::new(),
            next_thread_id: 1000, // Start from 1000 to avoid conflicts
        }
    }

    /// Allocate a new thread ID
    pub fn allocate_thread_id(&mut self) -> Pid {
        let id = self.next_thread_id;
        self.next_thread_id += 1;
        id
    }

    /// Register a thread with attributes
    pub fn register_thread(&mut self, thread_id: Pid, attr: ThreadAttr) -> Result<(), ThreadError> {
        if self.thread_attrs.contains_key(&thread_id) {
            return Err(ThreadError::ThreadNotFound);
        }
        self.thread_attrs.insert(thread_id, attr);
        Ok(())
    }

    /// Unregister a thread
    pub fn unregister_thread(&mut self, thread_id: Pid) -> Result<ThreadAttr, ThreadError> {
        let attr = self.thread_attrs.remove(&thread_id)
            .ok_or(ThreadError::ThreadNotFound)?;
        
        // Clean up associated resources
        self.barriers.remove(&thread_id);
        self.spinlocks.remove(&thread_id);
        self.clocks.remove(&thread_id);
        
        Ok(attr)
    }

    /// Get thread attributes
    pub fn get_thread_attr(&self, thread_id: Pid) -> Option<&ThreadAttr> {
        self.thread_attrs.get(&thread_id)
    }

    /// Update thread attributes
    pub fn update_thread_attr(&mut self, thread_id: Pid, attr: ThreadAttr) -> Result<(), ThreadError> {
        if !self.thread_attrs.contains_key(&thread_id) {
            return Err(ThreadError::ThreadNotFound);
        }
        self.thread_attrs.insert(thread_id, attr);
        Ok(())
    }

    /// Create a barrier for a thread
    pub fn create_barrier(&mut self, thread_id: Pid, count: usize) -> Result<(), ThreadError> {
        if self.barriers.contains_key(&thread_id) {
            return Err(ThreadError::BarrierInUse);
        }
        
        let barrier = Barrier::new(count)?;
        self.barriers.insert(thread_id, barrier);
        Ok(())
    }

    /// Get a barrier for a thread
    pub fn get_barrier(&self, thread_id: Pid) -> Option<&Barrier> {
        self.barriers.get(&thread_id)
    }

    /// Remove a barrier
    pub fn remove_barrier(&mut self, thread_id: Pid) -> Result<Barrier, ThreadError> {
        self.barriers.remove(&thread_id)
            .ok_or(ThreadError::ThreadNotFound)
    }

    /// Create a spinlock for a thread
    pub fn create_spinlock(&mut self, thread_id: Pid) -> Result<(), ThreadError> {
        if self.spinlocks.contains_key(&thread_id) {
            return Err(ThreadError::ThreadNotFound);
        }
        
        let spinlock = Spinlock::new();
        self.spinlocks.insert(thread_id, spinlock);
        Ok(())
    }

    /// Get a spinlock for a thread
    pub fn get_spinlock(&self, thread_id: Pid) -> Option<&Spinlock> {
        self.spinlocks.get(&thread_id)
    }

    /// Remove a spinlock
    pub fn remove_spinlock(&mut self, thread_id: Pid) -> Result<Spinlock, ThreadError> {
        self.spinlocks.remove(&thread_id)
            .ok_or(ThreadError::ThreadNotFound)
    }

    /// Create a CPU clock for a thread
    pub fn create_clock(&mut self, thread_id: Pid, clock_id: ClockId) -> Result<(), ThreadError> {
        if self.clocks.contains_key(&thread_id) {
            return Err(ThreadError::ThreadNotFound);
        }
        
        let clock = ThreadClock::new(thread_id, clock_id);
        self.clocks.insert(thread_id, clock);
        Ok(())
    }

    /// Get a CPU clock for a thread
    pub fn get_clock(&self, thread_id: Pid) -> Option<&ThreadClock> {
        self.clocks.get(&thread_id)
    }

    /// Remove a CPU clock
    pub fn remove_clock(&mut self, thread_id: Pid) -> Result<ThreadClock, ThreadError> {
        self.clocks.remove(&thread_id)
            .ok_or(ThreadError::ThreadNotFound)
    }

    /// Get registry statistics
    pub fn get_stats(&self) -> ThreadRegistryStats {
        ThreadRegistryStats {
            total_threads: self.thread_attrs.len(),
            total_barriers: self.barriers.len(),
            total_spinlocks: self.spinlocks.len(),
            total_clocks: self.clocks.len(),
            next_thread_id: self.next_thread_id,
        }
    }
}

/// Thread registry statistics
#[derive(Debug, Clone)]
pub struct ThreadRegistryStats {
    /// Total number of registered threads
    pub total_threads: usize,
    /// Total number of barriers
    pub total_barriers: usize,
    /// Total number of spinlocks
    pub total_spinlocks: usize,
    /// Total number of CPU clocks
    pub total_clocks: usize,
    /// Next thread ID to be allocated
    pub next_thread_id: Pid,
}

/// Set thread scheduling policy
pub fn pthread_attr_setschedpolicy(attr: &mut ThreadAttr, policy: i32) -> Result<(), ThreadError> {
    attr.set_sched_policy(policy)
}

/// Get thread scheduling policy
pub fn pthread_attr_getschedpolicy(attr: &ThreadAttr) -> i32 {
    attr.get_sched_policy()
}

/// Set thread scheduling parameters
pub fn pthread_attr_setschedparam(attr: &mut ThreadAttr, param: crate::posix::realtime::SchedParam) -> Result<(), ThreadError> {
    attr.set_sched_param(param)
}

/// Get thread scheduling parameters
pub fn pthread_attr_getschedparam(attr: &ThreadAttr) -> crate::posix::realtime::SchedParam {
    attr.get_sched_param()
}

/// Set thread scheduling inheritance
pub fn pthread_attr_setinheritsched(attr: &mut ThreadAttr, inherit: i32) -> Result<(), ThreadError> {
    attr.set_sched_inherit(inherit)
}

/// Get thread scheduling inheritance
pub fn pthread_attr_getinheritsched(attr: &ThreadAttr) -> i32 {
    attr.get_sched_inherit()
}

/// Set thread scheduling parameters
pub fn pthread_setschedparam(thread_id: Pid, param: crate::posix::realtime::SchedParam) -> Result<(), ThreadError> {
    let mut registry = THREAD_REGISTRY.lock();
    let attr = registry.thread_attrs.get_mut(&thread_id)
        .ok_or(ThreadError::ThreadNotFound)?;
    
    attr.set_sched_param(param)
}

/// Get thread scheduling parameters
pub fn pthread_getschedparam(thread_id: Pid) -> Result<crate::posix::realtime::SchedParam, ThreadError> {
    let registry = THREAD_REGISTRY.lock();
    let attr = registry.thread_attrs.get(&thread_id)
        .ok_or(ThreadError::ThreadNotFound)?;
    
    Ok(attr.get_sched_param())
}

/// Get thread CPU clock ID
pub fn pthread_getcpuclockid(thread_id: Pid, clock_id: ClockId) -> Result<ClockId, ThreadError> {
    let mut registry = THREAD_REGISTRY.lock();
    
    // Create clock if it doesn't exist
    if !registry.clocks.contains_key(&thread_id) {
        registry.create_clock(thread_id, clock_id)?;
    }
    
    Ok(clock_id)
}

/// Initialize advanced thread features
pub fn init_advanced_thread() {
    crate::println!("[thread] Initializing advanced POSIX thread features");
    
    let mut registry = THREAD_REGISTRY.lock();
    registry.next_thread_id = 1000; // Reset thread ID counter
    
    crate::println!("[thread] Advanced thread features initialized");
    crate::println!("[thread] Thread attribute management enabled");
    crate::println!("[thread] Barrier synchronization enabled");
    crate::println!("[thread] Spinlock synchronization enabled");
    crate::println!("[thread] Thread CPU clock access enabled");
}

/// Cleanup advanced thread features
pub fn cleanup_advanced_thread() {
    crate::println!("[thread] Cleaning up advanced POSIX thread features");
    
    let registry = THREAD_REGISTRY.lock();
    let stats = registry.get_stats();
    
    crate::println!("[thread] Cleanup stats:");
    crate::println!("[thread]   Total threads: {}", stats.total_threads);
    crate::println!("[thread]   Total barriers: {}", stats.total_barriers);
    crate::println!("[thread]   Total spinlocks: {}", stats.total_spinlocks);
    crate::println!("[thread]   Total clocks: {}", stats.total_clocks);
    crate::println!("[thread]   Next thread ID: {}", stats.next_thread_id);
}