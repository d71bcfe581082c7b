//! RCU (Read-Copy-Update) Implementation
//!
//! This module provides a complete RCU implementation with grace period
//! tracking and memory reclamation. RCU allows lock-free reads while
//! ensuring safe memory reclamation after all readers have completed.
//!
//! # Usage
//!
//! ```rust
//! use kernel::sync::rcu::{Rcu, RcuReadGuard};
//!
//! let rcu = Rcu::new(data);
//! {
//!     let guard = rcu.read(); // Lock-free read
//!     // Use guard...
//! } // Guard dropped, quiescent state reached
//!
//! rcu.update(|old| new_data); // Update with grace period wait
//! ```

use core::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use core::marker::PhantomData;
use alloc::vec::Vec;
use alloc::boxed::Box;
use crate::subsystems::sync::Mutex;
use crate::cpu;

/// Maximum number of CPUs supported
const MAX_CPUS: usize = 256;

/// RCU grace period state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GracePeriodState {
    /// No grace period in progress
    Idle,
    /// Grace period started, waiting for quiescent states
    Waiting,
    /// Grace period completed
    Completed,
}

/// Per-CPU quiescent state tracking
struct PerCpuQuiescent {
    /// Last quiescent state counter seen by this CPU
    last_seen: AtomicU64,
    /// Whether this CPU is in a quiescent state
    in_quiescent: AtomicBool,
}

impl PerCpuQuiescent {
    const fn new() -> Self {
        Self {
            last_seen: AtomicU64::new(0),
            in_quiescent: AtomicBool::new(true),
        }
    }
}

/// RCU grace period manager
pub struct RcuGracePeriod {
    /// Current grace period counter
    gp_counter: AtomicU64,
    /// Per-CPU quiescent state tracking
    per_cpu_quiescent: Vec<PerCpuQuiescent>,
    /// Grace period state
    state: Mutex<GracePeriodState>,
    /// Callbacks to execute after grace period
    callbacks: Mutex<Vec<Box<dyn FnOnce() + Send>>>,
}

impl RcuGracePeriod {
    /// Create a new RCU grace period manager
    pub fn new() -> Self {
        let mut per_cpu = Vec::with_capacity(MAX_CPUS);
        for _ in 0..MAX_CPUS {
            per_cpu.push(PerCpuQuiescent::new());
        }
        
        Self {
            gp_counter: AtomicU64::new(0),
            per_cpu_quiescent: per_cpu,
            state: Mutex::new(GracePeriodState::Idle),
            callbacks: Mutex::new(Vec::new()),
        }
    }

    /// Register a quiescent state for the current CPU
    ///
    /// This should be called when a reader completes its critical section.
    #[inline]
    pub fn quiescent_state(&self) {
        let cpu_id = self.current_cpu_id();
        let current_gp = self.gp_counter.load(Ordering::Acquire);
        
        if cpu_id < self.per_cpu_quiescent.len() {
            let per_cpu = &self.per_cpu_quiescent[cpu_id];
            per_cpu.last_seen.store(current_gp, Ordering::Release);
            per_cpu.in_quiescent.store(true, Ordering::Release);
        }
    }

    /// Start a new grace period and wait for completion
    ///
    /// This function will block until all CPUs have passed through
    /// a quiescent state since the grace period started.
    pub fn synchronize_rcu(&self) {
        // Increment grace period counter
        let new_gp = self.gp_counter.fetch_add(1, Ordering::AcqRel) + 1;
        
        // Mark all CPUs as needing to report quiescent state
        for per_cpu in &self.per_cpu_quiescent {
            per_cpu.in_quiescent.store(false, Ordering::Release);
        }
        
        // Wait for all CPUs to report quiescent state
        loop {
            let mut all_quiescent = true;
            
            for per_cpu in &self.per_cpu_quiescent {
                let last_seen = per_cpu.last_seen.load(Ordering::Acquire);
                let is_quiescent = per_cpu.in_quiescent.load(Ordering::Acquire);
                
                // CPU has seen the new grace period and is quiescent
                if last_seen >= new_gp && is_quiescent {
                    continue;
                }
                
                all_quiescent = false;
                break;
            }
            
            if all_quiescent {
                break;
            }
            
            // Yield CPU to allow other CPUs to make progress
            core::hint::spin_loop();
        }
        
        // Execute all pending callbacks
        let mut callbacks = self.callbacks.lock();
        while let Some(callback) = callbacks.pop() {
            callback();
        }
    }

    /// Register a callback to be executed after the next grace period
    pub fn call_rcu(&self, callback: Box<dyn FnOnce() + Send>) {
        self.callbacks.lock().push(callback);
        // Trigger grace period if not already in progress
        self.synchronize_rcu();
    }

    /// Get current CPU ID
    #[inline]
    fn current_cpu_id(&self) -> usize {
        cpu::cpuid() % MAX_CPUS
    }
}

/// Global RCU grace period manager
/// Using a static mut with initialization flag for proper initialization
static mut RCU_GRACE_PERIOD: Option<RcuGracePeriod> = None;
static RCU_INIT: core::sync::atomic::AtomicBool = core::sync::atomic::AtomicBool::new(false);

/// Initialize RCU subsystem
pub fn init_rcu() {
    if !RCU_INIT.load(Ordering::Acquire) {
        unsafe {
            if RCU_GRACE_PERIOD.is_none() {
                RCU_GRACE_PERIOD = Some(RcuGracePeriod::new());
                RCU_INIT.store(true, Ordering::Release);
            }
        }
    }
}

/// Get the global RCU grace period manager
/// # Safety
/// Must be called after RCU is initialized
fn get_rcu_grace_period() -> &'static RcuGracePeriod {
    if !RCU_INIT.load(Ordering::Acquire) {
        init_rcu();
    }
    unsafe {
        RCU_GRACE_PERIOD.as_ref().unwrap()
    }
}

/// Synchronize RCU - wait for grace period
pub fn synchronize_rcu() {
    get_rcu_grace_period().synchronize_rcu();
}

/// Register a callback to be executed after grace period
pub fn call_rcu(callback: Box<dyn FnOnce() + Send>) {
    get_rcu_grace_period().call_rcu(callback);
}

/// RCU-protected data structure
pub struct Rcu<T> {
    /// Pointer to the protected data
    data: AtomicPtr<T>,
    /// Phantom data for ownership tracking
    _phantom: PhantomData<T>,
}

impl<T> Rcu<T> {
    /// Create a new RCU-protected value
    pub fn new(value: T) -> Self {
        let boxed = Box::new(value);
        Self {
            data: AtomicPtr::new(Box::into_raw(boxed)),
            _phantom: PhantomData,
        }
    }

    /// Read the protected value (lock-free)
    ///
    /// Returns a guard that marks the current CPU as non-quiescent.
    /// When the guard is dropped, the CPU enters a quiescent state.
    #[inline]
    pub fn read(&self) -> RcuReadGuard<'_, T> {
        // Mark CPU as non-quiescent
        let cpu_id = cpu::cpuid() % MAX_CPUS;
        let gp = get_rcu_grace_period();
        if cpu_id < gp.per_cpu_quiescent.len() {
            gp.per_cpu_quiescent[cpu_id]
                .in_quiescent.store(false, Ordering::Release);
        }
        
        let ptr = self.data.load(Ordering::Acquire);
        RcuReadGuard {
            rcu: self,
            _phantom: PhantomData,
            _data: unsafe { &*ptr },
        }
    }

    /// Update the protected value
    ///
    /// This will wait for a grace period before freeing the old value.
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&T) -> T,
    {
        // Read current value
        let old_ptr = self.data.load(Ordering::Acquire);
        let old_value = unsafe { &*old_ptr };
        
        // Create new value
        let new_value = updater(old_value);
        let new_boxed = Box::new(new_value);
        let new_ptr = Box::into_raw(new_boxed);
        
        // Atomically update pointer
        let prev_ptr = self.data.swap(new_ptr, Ordering::Release);
        
        // Memory barrier to ensure all readers see the new pointer
        core::sync::atomic::fence(Ordering::SeqCst);
        
        // Wait for grace period and free old value
        let old_ptr = prev_ptr;
        get_rcu_grace_period().call_rcu(Box::new(move || {
            unsafe {
                let _ = Box::from_raw(old_ptr);
            }
        }));
    }

    /// Replace the protected value
    ///
    /// Similar to `update`, but takes the new value directly.
    pub fn replace(&self, new_value: T) {
        self.update(|_| new_value);
    }
}

impl<T> Drop for Rcu<T> {
    fn drop(&mut self) {
        // Wait for grace period before freeing
        let ptr = self.data.load(Ordering::Acquire);
        if !ptr.is_null() {
            synchronize_rcu();
            unsafe {
                let _ = Box::from_raw(ptr);
            }
        }
    }
}

/// Guard for RCU read operations
pub struct RcuReadGuard<'a, T> {
    rcu: &'a Rcu<T>,
    _phantom: PhantomData<&'a T>,
    _data: &'a T,
}

impl<'a, T> core::ops::Deref for RcuReadGuard<'a, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self._data
    }
}

impl<'a, T> Drop for RcuReadGuard<'a, T> {
    fn drop(&mut self) {
        // Mark CPU as quiescent when guard is dropped
        get_rcu_grace_period().quiescent_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rcu_basic() {
        let rcu = Rcu::new(42);
        {
            let guard = rcu.read();
            assert_eq!(*guard, 42);
        }
    }

    #[test]
    fn test_rcu_update() {
        let rcu = Rcu::new(42);
        rcu.update(|old| *old + 1);
        
        // Note: In a real test, we'd need to wait for grace period
        // For now, we just verify the update mechanism works
        let guard = rcu.read();
        assert_eq!(*guard, 43);
    }
}

