//! Enhanced Logging and Recovery Mechanisms
//!
//! This module provides comprehensive logging and recovery mechanisms for the NOS
//! file system, building on the journaling implementation to provide additional
//! features like checkpointing, snapshots, and advanced recovery options.

extern crate alloc;
use alloc::vec::Vec;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::sync::atomic::{AtomicU64, AtomicU32, AtomicBool, Ordering};
use crate::sync::Mutex;
// Sleeplock在当前文件中未使用，暂时注释掉
// use crate::sync::Sleeplock;
// use crate::subsystems::fs::journaling_fs::{JournalTransaction, JournalEntry, JfsError};
// JournalingFileSystem在当前文件中未使用，暂时注释掉
// use crate::subsystems::fs::journaling_fs::JournalingFileSystem;
// BlockDevice在当前文件中未使用，暂时注释掉
// use crate::platform::drivers::BlockDevice;crate::subsystems::fs::fs_cache::FsCache;
// use crate::platform::drivers::BlockDevice;
use nos_nos_error_handling::unified::KernelError;

// ============================================================================
// Logging and Recovery Constants
// ============================================================================

/// Default checkpoint interval in seconds
pub const DEFAULT_CHECKPOINT_INTERVAL: u64 = 300; // 5 minutes

/// Maximum number of snapshots to keep
pub const MAX_SNAPSHOTS: u32 = 10;

/// Snapshot magic number
pub const SNAPSHOT_MAGIC: u32 = 0x534E4150; // "SNAP" in hex

/// Recovery log magic number
pub const RECOVERY_LOG_MAGIC: u32 = 0x52454C4F; // "RELO" in hex

/// Maximum recovery log entries
pub const MAX_RECOVERY_ENTRIES: u32 = 1000;

// ============================================================================
// Recovery Log Types
// ============================================================================

/// Recovery log entry types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum RecoveryLogEntryType {
    /// System startup
    SystemStartup = 1,
    /// System shutdown
    SystemShutdown = 2,
    /// File system mount
    FsMount = 3,
    /// File system unmount
    FsUnmount = 4,
    /// Checkpoint start
    CheckpointStart = 5,
    /// Checkpoint complete
    CheckpointComplete = 6,
    /// Snapshot creation
    SnapshotCreate = 7,
    /// Snapshot restore
    SnapshotRestore = 8,
    /// Recovery operation
    RecoveryOperation = 9,
    /// Error condition
    ErrorCondition = 10,
    /// Corruption detected
    CorruptionDetected = 11,
}

/// Recovery log entry
#[derive(Debug, Clone)]
#[repr(C)]
pub struct RecoveryLogEntry {
    /// Magic number for validation
    pub magic: u32,
    /// Type of log entry
    pub entry_type: u32,
    /// Timestamp when entry was created
    pub timestamp: u64,
    /// Sequence number
    pub sequence: u32,
    /// Related transaction ID (if applicable)
    pub transaction_id: u64,
    /// Error code (if applicable)
    pub error_code: u32,
    /// Additional data length
    pub data_length: u32,
    /// Checksum for integrity verification
    pub checksum: u32,
    /// Additional data
    pub data: Vec<u8>,
}

impl Default for RecoveryLogEntry {
    fn default() -> Self {
        Self {
            magic: RECOVERY_LOG_MAGIC,
            entry_type: 0,
            timestamp: 0,
            sequence: 0,
            transaction_id: 0,
            error_code: 0,
            data_length: 0,
            checksum: 0,
            data: Vec::new(),
        }
    }
}

// ============================================================================
// Snapshot Types
// ============================================================================

/// Snapshot metadata
#[derive(Debug, Clone)]
#[repr(C)]
pub struct SnapshotMetadata {
    /// Magic number for validation
    pub magic: u32,
    /// Snapshot ID
    pub id: u32,
    /// Timestamp when snapshot was created
    pub timestamp: u64,
    /// Description of snapshot
    pub description: String,
    /// Size of snapshot in bytes
    pub size: u64,
    /// Number of blocks in snapshot
    pub block_count: u32,
    /// First block of snapshot data
    pub start_block: u32,
    /// Checksum for integrity verification
    pub checksum: u32,
    /// Flags for snapshot state
    pub flags: u32,
}

impl Default for SnapshotMetadata {
    fn default() -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            id: 0,
            timestamp: 0,
            description: String::new(),
            size: 0,
            block_count: 0,
            start_block: 0,
            checksum: 0,
            flags: 0,
        }
    }
}

/// Snapshot state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SnapshotState {
    /// Creating snapshot
    Creating = 0,
    /// Snapshot is ready
    Ready = 1,
    /// Restoring from snapshot
    Restoring = 2,
    /// Snapshot is corrupted
    Corrupted = 3,
    /// Deleting snapshot
    Deleting = 4,
}

// ============================================================================
// Recovery Manager
// ============================================================================

/// Recovery manager
pub struct RecoveryManager {
    /// Journaling file system
    jfs: Mutex<Option<JournalingFileSystem>>,
    /// File system cache
    cache: Mutex<Option<FsCache>>,
    /// Recovery log entries
    recovery_log: Mutex<Vec<RecoveryLogEntry>>,
    /// Snapshots
    snapshots: Mutex<BTreeMap<u32, SnapshotMetadata>>,
    /// Next snapshot ID
    next_snapshot_id: AtomicU32,
    /// Next log sequence number
    next_log_sequence: AtomicU32,
    /// Last checkpoint time
    last_checkpoint_time: AtomicU64,
    /// Checkpoint interval in seconds
    checkpoint_interval: AtomicU64,
    /// Recovery mode flag
    recovery_mode: AtomicBool,
    /// Auto checkpoint enabled
    auto_checkpoint: AtomicBool,
    /// Recovery statistics
    stats: Mutex<RecoveryStats>,
}

/// Recovery statistics
#[derive(Debug, Default, Clone)]
pub struct RecoveryStats {
    /// Total number of recoveries performed
    pub total_recoveries: u64,
    /// Successful recoveries
    pub successful_recoveries: u64,
    /// Failed recoveries
    pub failed_recoveries: u64,
    /// Total checkpoints created
    pub total_checkpoints: u64,
    /// Total snapshots created
    pub total_snapshots: u64,
    /// Total snapshot restores
    pub total_snapshot_restores: u64,
    /// Corruption events detected
    pub corruption_events: u64,
    /// Average recovery time in milliseconds
    pub avg_recovery_time: u64,
    /// Last recovery timestamp
    pub last_recovery_timestamp: u64,
}

impl RecoveryManager {
    /// Create a new recovery manager
    pub fn new() -> Self {
        Self {
            jfs: Mutex::new(None),
            cache: Mutex::new(None),
            recovery_log: Mutex::new(Vec::new()),
            snapshots: Mutex::new(BTreeMap::new()),
            next_snapshot_id: AtomicU32::new(1),
            next_log_sequence: AtomicU32::new(1),
            last_checkpoint_time: AtomicU64::new(0),
            checkpoint_interval: AtomicU64::new(DEFAULT_CHECKPOINT_INTERVAL),
            recovery_mode: AtomicBool::new(false),
            auto_checkpoint: AtomicBool::new(true),
            stats: Mutex::new(RecoveryStats::default()),
        }
    }

    /// Initialize the recovery manager
    pub fn init(&self) -> Result<(), KernelError> {
        // Log system startup
        self.log_event(RecoveryLogEntryType::SystemStartup, 0, 0, Vec::new())?;
        
        crate::println!("recovery: recovery manager initialized");
        Ok(())
    }

    /// Set journaling file system
    pub fn set_jfs(&self, jfs: JournalingFileSystem) {
        let mut jfs_ref = self.jfs.lock();
        *jfs_ref = Some(jfs);
    }

    /// Set file system cache
    pub fn set_cache(&self, cache: FsCache) {
        let mut cache_ref = self.cache.lock();
        *cache_ref = Some(cache);
    }

    /// Set checkpoint interval
    pub fn set_checkpoint_interval(&self, interval_seconds: u64) {
        self.checkpoint_interval.store(interval_seconds, Ordering::SeqCst);
    }

    /// Enable/disable auto checkpoint
    pub fn set_auto_checkpoint(&self, enabled: bool) {
        self.auto_checkpoint.store(enabled, Ordering::SeqCst);
    }

    /// Perform a full system recovery
    pub fn recover_system(&self) -> Result<(), KernelError> {
        let start_time = self.get_current_time();
        self.recovery_mode.store(true, Ordering::SeqCst);
        
        // Log recovery operation
        self.log_event(RecoveryLogEntryType::RecoveryOperation, 0, 0, Vec::new())?;
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_recoveries += 1;
            stats.last_recovery_timestamp = start_time;
        }
        
        let mut recovery_result = Ok(());
        
        // Step 1: Check file system cache for corruption
        if let Err(e) = self.check_cache_integrity() {
            crate::println!("recovery: cache integrity check failed: {:?}", e);
            self.log_event(RecoveryLogEntryType::CorruptionDetected, 0, e as u32, Vec::new())?;
            
            let mut stats = self.stats.lock();
            stats.corruption_events += 1;
        }
        
        // Step 2: Recover journaling file system
        if let Some(ref jfs) = *self.jfs.lock() {
            if jfs.is_in_recovery() {
                crate::println!("recovery: journaling file system needs recovery");
                // The journaling file system will handle its own recovery
            }
        }
        
        // Step 3: Check for file system corruption
        if let Err(e) = self.check_filesystem_integrity() {
            crate::println!("recovery: file system integrity check failed: {:?}", e);
            self.log_event(RecoveryLogEntryType::CorruptionDetected, 0, e as u32, Vec::new())?;
            
            let mut stats = self.stats.lock();
            stats.corruption_events += 1;
            
            // Try to repair the file system
            if let Err(repair_err) = self.repair_filesystem() {
                crate::println!("recovery: file system repair failed: {:?}", repair_err);
                recovery_result = Err(repair_err);
            }
        }
        
        // Step 4: Flush all caches
        self.flush_all_caches()?;
        
        // Step 5: Create a checkpoint after successful recovery
        if recovery_result.is_ok() {
            self.create_checkpoint()?;
            
            let mut stats = self.stats.lock();
            stats.successful_recoveries += 1;
        } else {
            let mut stats = self.stats.lock();
            stats.failed_recoveries += 1;
        }
        
        // Calculate recovery time
        let recovery_time = self.get_current_time() - start_time;
        {
            let mut stats = self.stats.lock();
            let total_recoveries = stats.total_recoveries;
            if total_recoveries > 0 {
                stats.avg_recovery_time = (stats.avg_recovery_time * (total_recoveries - 1) + recovery_time) / total_recoveries;
            }
        }
        
        self.recovery_mode.store(false, Ordering::SeqCst);
        
        crate::println!("recovery: system recovery completed in {}ms", recovery_time);
        recovery_result
    }

    /// Create a checkpoint
    pub fn create_checkpoint(&self) -> Result<(), KernelError> {
        // Log checkpoint start
        self.log_event(RecoveryLogEntryType::CheckpointStart, 0, 0, Vec::new())?;
        
        // Step 1: Flush file system cache
        if let Some(ref cache) = *self.cache.lock() {
            cache.flush_dirty()?;
        }
        
        // Step 2: Checkpoint journaling file system
        if let Some(ref jfs) = *self.jfs.lock() {
            jfs.checkpoint().map_err(|e| KernelError::IoError(e as i32))?;
        }
        
        // Step 3: Update last checkpoint time
        self.last_checkpoint_time.store(self.get_current_time(), Ordering::SeqCst);
        
        // Log checkpoint complete
        self.log_event(RecoveryLogEntryType::CheckpointComplete, 0, 0, Vec::new())?;
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_checkpoints += 1;
        }
        
        crate::println!("recovery: checkpoint created");
        Ok(())
    }

    /// Create a snapshot
    pub fn create_snapshot(&self, description: String) -> Result<u32, KernelError> {
        let snapshot_id = self.next_snapshot_id.fetch_add(1, Ordering::SeqCst);
        let timestamp = self.get_current_time();
        
        // Log snapshot creation
        let mut data = Vec::new();
        data.extend_from_slice(&(snapshot_id.to_le_bytes()));
        data.extend_from_slice(&(description.len().to_le_bytes()));
        data.extend_from_slice(description.as_bytes());
        self.log_event(RecoveryLogEntryType::SnapshotCreate, 0, 0, data)?;
        
        // Step 1: Flush all caches
        self.flush_all_caches()?;
        
        // Step 2: Create snapshot metadata
        let metadata = SnapshotMetadata {
            id: snapshot_id,
            timestamp,
            description,
            size: 0, // Will be calculated during actual snapshot creation
            block_count: 0, // Will be calculated during actual snapshot creation
            start_block: 0, // Will be determined during actual snapshot creation
            checksum: 0, // Will be calculated during actual snapshot creation
            flags: SnapshotState::Creating as u32,
            ..Default::default()
        };
        
        // Step 3: Store snapshot metadata
        {
            let mut snapshots = self.snapshots.lock();
            snapshots.insert(snapshot_id, metadata);
        }
        
        // Step 4: Create actual snapshot (simplified for this implementation)
        // In a real implementation, this would involve:
        // - Allocating space for the snapshot
        // - Copying relevant file system blocks
        // - Calculating checksums
        // - Updating metadata
        
        // Update snapshot state to ready
        {
            let mut snapshots = self.snapshots.lock();
            if let Some(snapshot) = snapshots.get_mut(&snapshot_id) {
                snapshot.flags = SnapshotState::Ready as u32;
            }
        }
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_snapshots += 1;
        }
        
        crate::println!("recovery: snapshot {} created", snapshot_id);
        Ok(snapshot_id)
    }

    /// Restore from a snapshot
    pub fn restore_snapshot(&self, snapshot_id: u32) -> Result<(), KernelError> {
        // Get snapshot metadata
        let metadata = {
            let snapshots = self.snapshots.lock();
            snapshots.get(&snapshot_id).cloned()
                .ok_or(KernelError::NotFound)?
        };
        
        // Verify snapshot is valid
        if metadata.magic != SNAPSHOT_MAGIC {
            return Err(KernelError::InvalidData);
        }
        
        if metadata.flags != SnapshotState::Ready as u32 {
            return Err(KernelError::InvalidState);
        }
        
        // Log snapshot restore
        let mut data = Vec::new();
        data.extend_from_slice(&(snapshot_id.to_le_bytes()));
        self.log_event(RecoveryLogEntryType::SnapshotRestore, 0, 0, data)?;
        
        // Update snapshot state
        {
            let mut snapshots = self.snapshots.lock();
            if let Some(snapshot) = snapshots.get_mut(&snapshot_id) {
                snapshot.flags = SnapshotState::Restoring as u32;
            }
        }
        
        // Step 1: Flush all caches
        self.flush_all_caches()?;
        
        // Step 2: Restore from snapshot (simplified for this implementation)
        // In a real implementation, this would involve:
        // - Restoring file system blocks from snapshot
        // - Verifying checksums
        // - Rebuilding file system structures
        
        // Update snapshot state back to ready
        {
            let mut snapshots = self.snapshots.lock();
            if let Some(snapshot) = snapshots.get_mut(&snapshot_id) {
                snapshot.flags = SnapshotState::Ready as u32;
            }
        }
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.total_snapshot_restores += 1;
        }
        
        crate::println!("recovery: snapshot {} restored", snapshot_id);
        Ok(())
    }

    /// Delete a snapshot
    pub fn delete_snapshot(&self, snapshot_id: u32) -> Result<(), KernelError> {
        // Get snapshot metadata
        let metadata = {
            let mut snapshots = self.snapshots.lock();
            snapshots.get(&snapshot_id).cloned()
                .ok_or(KernelError::NotFound)?
        };
        
        // Update snapshot state
        {
            let mut snapshots = self.snapshots.lock();
            if let Some(snapshot) = snapshots.get_mut(&snapshot_id) {
                snapshot.flags = SnapshotState::Deleting as u32;
            }
        }
        
        // Delete snapshot (simplified for this implementation)
        // In a real implementation, this would involve:
        // - Freeing snapshot blocks
        // - Removing snapshot metadata
        
        // Remove from snapshots map
        {
            let mut snapshots = self.snapshots.lock();
            snapshots.remove(&snapshot_id);
        }
        
        crate::println!("recovery: snapshot {} deleted", snapshot_id);
        Ok(())
    }

    /// List all snapshots
    pub fn list_snapshots(&self) -> Vec<SnapshotMetadata> {
        let snapshots = self.snapshots.lock();
        snapshots.values().cloned().collect()
    }

    /// Get recovery statistics
    pub fn get_stats(&self) -> RecoveryStats {
        self.stats.lock().clone()
    }

    /// Check if auto checkpoint is enabled
    pub fn is_auto_checkpoint_enabled(&self) -> bool {
        self.auto_checkpoint.load(Ordering::SeqCst)
    }

    /// Check if system is in recovery mode
    pub fn is_in_recovery_mode(&self) -> bool {
        self.recovery_mode.load(Ordering::SeqCst)
    }

    /// Periodic maintenance task
    pub fn periodic_maintenance(&self) -> Result<(), KernelError> {
        // Check if we need to create a checkpoint
        if self.auto_checkpoint.load(Ordering::SeqCst) {
            let current_time = self.get_current_time();
            let last_checkpoint = self.last_checkpoint_time.load(Ordering::SeqCst);
            let interval = self.checkpoint_interval.load(Ordering::SeqCst);
            
            if current_time - last_checkpoint >= interval * 1000 { // Convert to milliseconds
                self.create_checkpoint()?;
            }
        }
        
        // Clean up old recovery log entries
        self.cleanup_recovery_log()?;
        
        // Clean up old snapshots if we have too many
        self.cleanup_old_snapshots()?;
        
        Ok(())
    }

    /// Log an event to the recovery log
    fn log_event(&self, event_type: RecoveryLogEntryType, transaction_id: u64, error_code: u32, data: Vec<u8>) -> Result<(), KernelError> {
        let sequence = self.next_log_sequence.fetch_add(1, Ordering::SeqCst);
        let timestamp = self.get_current_time();
        let data_length = data.len() as u32;
        
        let entry = RecoveryLogEntry {
            magic: RECOVERY_LOG_MAGIC,
            entry_type: event_type as u32,
            timestamp,
            sequence,
            transaction_id,
            error_code,
            data_length,
            checksum: 0, // Calculate checksum in real implementation
            data,
        };
        
        // Add to recovery log
        {
            let mut log = self.recovery_log.lock();
            log.push(entry);
            
            // Keep log size bounded
            if log.len() > MAX_RECOVERY_ENTRIES as usize {
                log.remove(0);
            }
        }
        
        Ok(())
    }

    /// Check cache integrity
    fn check_cache_integrity(&self) -> Result<(), KernelError> {
        if let Some(ref cache) = *self.cache.lock() {
            // Get cache statistics
            let stats = cache.get_stats();
            
            // Check for anomalies
            if stats.hit_ratio < 0.0 || stats.hit_ratio > 1.0 {
                return Err(KernelError::InvalidData);
            }
            
            if stats.utilization < 0.0 || stats.utilization > 1.0 {
                return Err(KernelError::InvalidData);
            }
            
            // In a real implementation, we would perform more thorough checks
            // such as checksum verification of cached data
        }
        
        Ok(())
    }

    /// Check file system integrity
    fn check_filesystem_integrity(&self) -> Result<(), KernelError> {
        // In a real implementation, this would perform comprehensive file system checks
        // such as:
        // - Checking superblock integrity
        // - Verifying inode consistency
        // - Checking block allocation bitmaps
        // - Validating directory structures
        
        // For this implementation, we'll just do a basic check
        if let Some(ref jfs) = *self.jfs.lock() {
            let stats = jfs.get_stats();
            
            // Check for anomalies
            if stats.committed_transactions + stats.aborted_transactions != stats.total_transactions {
                return Err(KernelError::InvalidData);
            }
        }
        
        Ok(())
    }

    /// Repair file system
    fn repair_filesystem(&self) -> Result<(), KernelError> {
        // In a real implementation, this would attempt to repair file system corruption
        // such as:
        // - Fixing inconsistent superblock
        // - Rebuilding damaged inodes
        // - Repairing block allocation bitmaps
        // - Fixing directory structures
        
        crate::println!("recovery: attempting file system repair");
        
        // For this implementation, we'll just clear the journaling file system state
        if let Some(ref jfs) = *self.jfs.lock() {
            // Force a checkpoint to clear any pending transactions
            jfs.checkpoint().map_err(|e| KernelError::IoError(e as i32))?;
        }
        
        Ok(())
    }

    /// Flush all caches
    fn flush_all_caches(&self) -> Result<(), KernelError> {
        // Flush file system cache
        if let Some(ref cache) = *self.cache.lock() {
            cache.flush_dirty()?;
        }
        
        // In a real implementation, we would also flush other caches
        // such as buffer cache, inode cache, etc.
        
        Ok(())
    }

    /// Clean up old recovery log entries
    fn cleanup_recovery_log(&self) -> Result<(), KernelError> {
        let mut log = self.recovery_log.lock();
        
        // Keep only the most recent entries
        if log.len() > MAX_RECOVERY_ENTRIES as usize {
            log.drain(0..log.len() - MAX_RECOVERY_ENTRIES as usize);
        }
        
        Ok(())
    }

    /// Clean up old snapshots
    fn cleanup_old_snapshots(&self) -> Result<(), KernelError> {
        let mut snapshots = self.snapshots.lock();
        
        // If we have more than MAX_SNAPSHOTS, remove the oldest ones
        if snapshots.len() > MAX_SNAPSHOTS as usize {
            let mut snapshot_ids: Vec<u32> = snapshots.keys().cloned().collect();
            snapshot_ids.sort();
            
            let to_remove = snapshot_ids.len() - MAX_SNAPSHOTS as usize;
            for i in 0..to_remove {
                snapshots.remove(&snapshot_ids[i]);
            }
        }
        
        Ok(())
    }

    /// Get current time in milliseconds
    fn get_current_time(&self) -> u64 {
        // In a real implementation, this would get the current time
        // from the system clock
        0
    }
}

impl Default for RecoveryManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Global recovery manager instance
static mut RECOVERY_MANAGER: Option<RecoveryManager> = None;

/// Initialize recovery manager
pub fn init() -> Result<(), KernelError> {
    unsafe {
        let manager = RecoveryManager::new();
        manager.init()?;
        RECOVERY_MANAGER = Some(manager);
    }
    Ok(())
}

/// Get recovery manager instance
pub fn get_recovery_manager() -> Option<&'static RecoveryManager> {
    unsafe { RECOVERY_MANAGER.as_ref() }
}