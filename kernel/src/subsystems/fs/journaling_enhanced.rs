//! Enhanced File System Journaling Implementation
//!
//! This module provides a comprehensive journaling system for NOS file system,
//! implementing write-ahead logging with atomic transactions, crash recovery,
//! and performance optimizations. The implementation is inspired by ext4 journaling
//! and NTFS logging mechanisms.

extern crate alloc;
use alloc::vec::Vec;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::sync::atomic::{AtomicU32, AtomicU64, AtomicBool, Ordering};
use core::mem;

use crate::drivers::BlockDevice;
use crate::subsystems::sync::{Mutex, Sleeplock};
use crate::subsystems::fs::{BSIZE, SuperBlock, InodeType, DiskInode, Dirent, BufFlags};

/// Enhanced journaling constants
pub const JOURNAL_MAGIC: u32 = 0x4A4F5552; // "JOUR" in hex
pub const TRANSACTION_MAGIC: u32 = 0x5452414E; // "TRAN" in hex
pub const COMMIT_MAGIC: u32 = 0x434F4D4D; // "COMM" in hex
pub const CHECKPOINT_MAGIC: u32 = 0x43484543; // "CHEC" in hex
pub const REVOKE_MAGIC: u32 = 0x5245564F; // "REVO" in hex

/// Journal configuration
pub const MAX_TRANSACTIONS: usize = 1024;
pub const MAX_JOURNAL_ENTRIES: usize = 65536;
pub const DEFAULT_JOURNAL_SIZE: u32 = 32768; // 32MB in 1K blocks
pub const MIN_JOURNAL_SIZE: u32 = 1024; // 1MB in 1K blocks
pub const MAX_JOURNAL_SIZE: u32 = 262144; // 256MB in 1K blocks
pub const COMMIT_INTERVAL_MS: u64 = 5000; // 5 seconds
pub const CHECKPOINT_INTERVAL_MS: u64 = 30000; // 30 seconds

/// Enhanced journal entry types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum JournalEntryType {
    /// Transaction begin marker
    Begin = 1,
    /// Block modification record
    Update = 2,
    /// Transaction commit marker
    Commit = 3,
    /// Checkpoint record
    Checkpoint = 4,
    /// Block revoke record
    Revoke = 5,
    /// Superblock update
    Superblock = 6,
    /// Inode update
    Inode = 7,
    /// Directory entry update
    Dirent = 8,
    /// Bitmap update
    Bitmap = 9,
    /// Extended attribute update
    Xattr = 10,
    /// File system feature record
    Feature = 11,
}

/// Enhanced journal entry descriptor
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct EnhancedJournalEntry {
    /// Magic number for validation
    pub magic: u32,
    /// Type of journal entry
    pub entry_type: u32,
    /// Transaction ID this entry belongs to
    pub transaction_id: u64,
    /// Block number being modified
    pub block_number: u32,
    /// Sequence number within transaction
    pub sequence: u32,
    /// Length of data in bytes
    pub data_length: u32,
    /// Checksum for integrity verification
    pub checksum: u32,
    /// Flags for entry attributes
    pub flags: u32,
    /// Timestamp of entry creation
    pub timestamp: u64,
}

impl Default for EnhancedJournalEntry {
    fn default() -> Self {
        Self {
            magic: JOURNAL_MAGIC,
            entry_type: 0,
            transaction_id: 0,
            block_number: 0,
            sequence: 0,
            data_length: 0,
            checksum: 0,
            flags: 0,
            timestamp: 0,
        }
    }
}

/// Enhanced transaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancedTransactionState {
    /// Transaction not yet started
    Inactive,
    /// Transaction is active and accepting modifications
    Active,
    /// Transaction is prepared for commit
    Prepared,
    /// Transaction has been committed
    Committed,
    /// Transaction was aborted
    Aborted,
    /// Transaction is being recovered
    Recovering,
}

/// Enhanced journal transaction with comprehensive tracking
#[derive(Debug)]
pub struct EnhancedJournalTransaction {
    /// Unique transaction ID
    pub id: u64,
    /// Current state of transaction
    pub state: EnhancedTransactionState,
    /// List of modified blocks
    pub modified_blocks: Vec<u32>,
    /// Journal entries for this transaction
    pub entries: Vec<EnhancedJournalEntry>,
    /// Original block data for rollback
    pub original_data: BTreeMap<u32, Vec<u8>>,
    /// New block data for replay
    pub new_data: BTreeMap<u32, Vec<u8>>,
    /// Timestamp when transaction was created
    pub timestamp: u64,
    /// Transaction priority (for commit ordering)
    pub priority: u8,
    /// Transaction flags
    pub flags: u32,
    /// Number of blocks modified
    pub block_count: u32,
    /// Total data size
    pub data_size: u32,
    /// Parent transaction ID (for nested transactions)
    pub parent_id: Option<u64>,
    /// Child transaction IDs
    pub child_ids: Vec<u64>,
}

impl EnhancedJournalTransaction {
    /// Create a new transaction
    pub fn new(id: u64) -> Self {
        Self {
            id,
            state: EnhancedTransactionState::Active,
            modified_blocks: Vec::new(),
            entries: Vec::new(),
            original_data: BTreeMap::new(),
            new_data: BTreeMap::new(),
            timestamp: crate::subsystems::time::get_timestamp(),
            priority: 0,
            flags: 0,
            block_count: 0,
            data_size: 0,
            parent_id: None,
            child_ids: Vec::new(),
        }
    }

    /// Add a block modification to the transaction
    pub fn add_block(&mut self, block_num: u32, old_data: &[u8], new_data: &[u8]) {
        if !self.modified_blocks.contains(&block_num) {
            self.modified_blocks.push(block_num);
            self.original_data.insert(block_num, old_data.to_vec());
            self.new_data.insert(block_num, new_data.to_vec());
            self.block_count += 1;
            self.data_size += new_data.len() as u32;
        }
    }

    /// Add an entry to the transaction
    pub fn add_entry(&mut self, entry: EnhancedJournalEntry) {
        self.entries.push(entry);
    }

    /// Prepare the transaction for commit
    pub fn prepare(&mut self) {
        self.state = EnhancedTransactionState::Prepared;
    }

    /// Commit the transaction
    pub fn commit(&mut self) {
        self.state = EnhancedTransactionState::Committed;
    }

    /// Abort the transaction
    pub fn abort(&mut self) {
        self.state = EnhancedTransactionState::Aborted;
    }

    /// Set transaction priority
    pub fn set_priority(&mut self, priority: u8) {
        self.priority = priority;
    }

    /// Set parent transaction
    pub fn set_parent(&mut self, parent_id: u64) {
        self.parent_id = Some(parent_id);
    }

    /// Add child transaction
    pub fn add_child(&mut self, child_id: u64) {
        self.child_ids.push(child_id);
    }
}

/// Enhanced journal superblock with comprehensive metadata
#[derive(Debug, Clone, Copy, Default)]
#[repr(C)]
pub struct EnhancedJournalSuperBlock {
    /// Magic number for validation
    pub magic: u32,
    /// Journal version
    pub version: u32,
    /// Total size of journal in blocks
    pub size: u32,
    /// First block of the journal
    pub start_block: u32,
    /// Current sequence number
    pub sequence: u32,
    /// First transaction ID
    pub first_transaction_id: u64,
    /// Last transaction ID
    pub last_transaction_id: u64,
    /// Number of active transactions
    pub active_transactions: u32,
    /// Flags for journal state
    pub flags: u32,
    /// Journal features
    pub features: u32,
    /// Journal compatibility flags
    pub compat: u32,
    /// Journal incompatible flags
    pub incompat: u32,
    /// Journal read-only compatible flags
    pub ro_compat: u32,
    /// Last checkpoint sequence
    pub last_checkpoint: u32,
    /// Last commit timestamp
    pub last_commit: u64,
    /// Number of committed transactions
    pub committed_transactions: u64,
    /// Number of aborted transactions
    pub aborted_transactions: u64,
    /// Journal usage in blocks
    pub used_blocks: u32,
    /// Maximum transaction size
    pub max_transaction_size: u32,
    /// Average transaction size
    pub avg_transaction_size: u32,
}

/// Enhanced journaling file system with comprehensive features
pub struct EnhancedJournalingFileSystem {
    /// Underlying block device
    device: Mutex<Box<dyn BlockDevice>>,
    /// Journal superblock
    journal_sb: Mutex<EnhancedJournalSuperBlock>,
    /// Active transactions
    transactions: Mutex<BTreeMap<u64, EnhancedJournalTransaction>>,
    /// Committed transactions waiting for checkpoint
    committed_transactions: Mutex<BTreeMap<u64, EnhancedJournalTransaction>>,
    /// Next transaction ID
    next_transaction_id: AtomicU64,
    /// Journal entries waiting to be written
    pending_entries: Mutex<Vec<EnhancedJournalEntry>>,
    /// Recovery state
    recovery_mode: AtomicU32,
    /// Journal statistics
    stats: Mutex<EnhancedJournalStats>,
    /// Journal configuration
    config: JournalConfig,
    /// Commit thread running flag
    commit_thread_running: AtomicBool,
    /// Checkpoint thread running flag
    checkpoint_thread_running: AtomicBool,
    /// Journal space usage tracking
    space_usage: Mutex<JournalSpaceUsage>,
    /// Performance metrics
    performance: Mutex<JournalPerformance>,
}

/// Journal configuration parameters
#[derive(Debug, Clone)]
pub struct JournalConfig {
    /// Journal size in blocks
    pub journal_size: u32,
    /// Commit interval in milliseconds
    pub commit_interval_ms: u64,
    /// Checkpoint interval in milliseconds
    pub checkpoint_interval_ms: u64,
    /// Maximum transaction size in blocks
    pub max_transaction_size: u32,
    /// Enable asynchronous commits
    pub async_commit: bool,
    /// Enable checksums
    pub enable_checksums: bool,
    /// Enable data journaling (vs metadata only)
    pub data_journaling: bool,
    /// Enable barrier operations
    pub enable_barriers: bool,
    /// Enable ordered mode
    pub ordered_mode: bool,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            journal_size: DEFAULT_JOURNAL_SIZE,
            commit_interval_ms: COMMIT_INTERVAL_MS,
            checkpoint_interval_ms: CHECKPOINT_INTERVAL_MS,
            max_transaction_size: 1024,
            async_commit: true,
            enable_checksums: true,
            data_journaling: false, // Metadata only by default
            enable_barriers: true,
            ordered_mode: true,
        }
    }
}

/// Journal space usage tracking
#[derive(Debug, Default, Clone)]
pub struct JournalSpaceUsage {
    /// Total journal space in blocks
    pub total_blocks: u32,
    /// Used journal space in blocks
    pub used_blocks: u32,
    /// Free journal space in blocks
    pub free_blocks: u32,
    /// Number of active transactions
    pub active_transactions: u32,
    /// Number of committed transactions
    pub committed_transactions: u32,
    /// Space usage percentage
    pub usage_percentage: f32,
}

/// Enhanced journal statistics
#[derive(Debug, Default, Clone)]
pub struct EnhancedJournalStats {
    /// Total number of transactions
    pub total_transactions: u64,
    /// Number of committed transactions
    pub committed_transactions: u64,
    /// Number of aborted transactions
    pub aborted_transactions: u64,
    /// Number of recovery operations
    pub recovery_operations: u64,
    /// Total journal space used
    pub journal_space_used: u64,
    /// Average transaction size
    pub avg_transaction_size: f64,
    /// Maximum transaction size
    pub max_transaction_size: u32,
    /// Minimum transaction size
    pub min_transaction_size: u32,
    /// Total time spent in commits (microseconds)
    pub total_commit_time_us: u64,
    /// Average commit time (microseconds)
    pub avg_commit_time_us: u64,
    /// Maximum commit time (microseconds)
    pub max_commit_time_us: u64,
    /// Number of checkpoints
    pub checkpoints: u64,
    /// Total time spent in checkpoints (microseconds)
    pub total_checkpoint_time_us: u64,
    /// Number of journal flushes
    pub journal_flushes: u64,
    /// Number of barrier operations
    pub barrier_operations: u64,
    /// Number of checksum errors
    pub checksum_errors: u64,
    /// Number of replayed transactions
    pub replayed_transactions: u64,
    /// Number of revoked blocks
    pub revoked_blocks: u64,
}

/// Journal performance metrics
#[derive(Debug, Default, Clone)]
pub struct JournalPerformance {
    /// Transactions per second
    pub transactions_per_sec: f64,
    /// Average transaction latency (microseconds)
    pub avg_transaction_latency_us: f64,
    /// Journal throughput (bytes per second)
    pub journal_throughput_bps: f64,
    /// Commit latency (microseconds)
    pub commit_latency_us: u64,
    /// Checkpoint latency (microseconds)
    pub checkpoint_latency_us: u64,
    /// Recovery time (microseconds)
    pub recovery_time_us: u64,
    /// Journal utilization percentage
    pub journal_utilization_pct: f64,
}

/// Enhanced journaling file system errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancedJfsError {
    /// Invalid magic number
    InvalidMagic,
    /// Transaction not found
    TransactionNotFound,
    /// Journal full
    JournalFull,
    /// I/O error
    IoError,
    /// Corrupted journal
    CorruptedJournal,
    /// Invalid transaction state
    InvalidTransactionState,
    /// Checksum error
    ChecksumError,
    /// Invalid configuration
    InvalidConfig,
    /// Device error
    DeviceError,
}

impl EnhancedJournalingFileSystem {
    /// Create a new enhanced journaling file system
    pub fn new(device: Box<dyn BlockDevice>, config: JournalConfig) -> Self {
        Self {
            device: Mutex::new(device),
            journal_sb: Mutex::new(EnhancedJournalSuperBlock::default()),
            transactions: Mutex::new(BTreeMap::new()),
            committed_transactions: Mutex::new(BTreeMap::new()),
            next_transaction_id: AtomicU64::new(1),
            pending_entries: Mutex::new(Vec::new()),
            recovery_mode: AtomicU32::new(0),
            stats: Mutex::new(EnhancedJournalStats::default()),
            config,
            commit_thread_running: AtomicBool::new(false),
            checkpoint_thread_running: AtomicBool::new(false),
            space_usage: Mutex::new(JournalSpaceUsage::default()),
            performance: Mutex::new(JournalPerformance::default()),
        }
    }

    /// Initialize the enhanced journaling file system
    pub fn init(&self) -> Result<(), EnhancedJfsError> {
        // Read journal superblock
        self.read_journal_superblock()?;
        
        // Validate magic number
        let sb = self.journal_sb.lock();
        if sb.magic != JOURNAL_MAGIC {
            drop(sb);
            // Initialize new journal
            self.format_journal()?;
            self.read_journal_superblock()?;
        }
        
        // Update space usage
        self.update_space_usage()?;
        
        // Check if recovery is needed
        if self.needs_recovery() {
            crate::println!("enhanced_jfs: journal needs recovery");
            self.recover()?;
        }
        
        // Start background threads
        self.start_background_threads()?;
        
        crate::println!("enhanced_jfs: enhanced journaling file system initialized");
        Ok(())
    }

    /// Read the enhanced journal superblock
    fn read_journal_superblock(&self) -> Result<(), EnhancedJfsError> {
        let device = self.device.lock();
        let mut buf = [0u8; BSIZE];
        
        // Journal superblock is at block 0 of the journal area
        device.read(0, &mut buf);
        
        let mut sb = self.journal_sb.lock();
        sb.magic = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        sb.version = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        sb.size = u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
        sb.start_block = u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]);
        sb.sequence = u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]);
        sb.first_transaction_id = u64::from_le_bytes([
            buf[20], buf[21], buf[22], buf[23],
            buf[24], buf[25], buf[26], buf[27],
        ]);
        sb.last_transaction_id = u64::from_le_bytes([
            buf[28], buf[29], buf[30], buf[31],
            buf[32], buf[33], buf[34], buf[35],
        ]);
        sb.active_transactions = u32::from_le_bytes([buf[36], buf[37], buf[38], buf[39]]);
        sb.flags = u32::from_le_bytes([buf[40], buf[41], buf[42], buf[43]]);
        sb.features = u32::from_le_bytes([buf[44], buf[45], buf[46], buf[47]]);
        sb.compat = u32::from_le_bytes([buf[48], buf[49], buf[50], buf[51]]);
        sb.incompat = u32::from_le_bytes([buf[52], buf[53], buf[54], buf[55]]);
        sb.ro_compat = u32::from_le_bytes([buf[56], buf[57], buf[58], buf[59]]);
        sb.last_checkpoint = u32::from_le_bytes([buf[60], buf[61], buf[62], buf[63]]);
        sb.last_commit = u64::from_le_bytes([
            buf[64], buf[65], buf[66], buf[67],
            buf[68], buf[69], buf[70], buf[71],
        ]);
        sb.committed_transactions = u64::from_le_bytes([
            buf[72], buf[73], buf[74], buf[75],
            buf[76], buf[77], buf[78], buf[79],
        ]);
        sb.aborted_transactions = u64::from_le_bytes([
            buf[80], buf[81], buf[82], buf[83],
            buf[84], buf[85], buf[86], buf[87],
        ]);
        sb.used_blocks = u32::from_le_bytes([buf[88], buf[89], buf[90], buf[91]]);
        sb.max_transaction_size = u32::from_le_bytes([buf[92], buf[93], buf[94], buf[95]]);
        sb.avg_transaction_size = u32::from_le_bytes([buf[96], buf[97], buf[98], buf[99]]);
        
        Ok(())
    }

    /// Write the enhanced journal superblock
    fn write_journal_superblock(&self) -> Result<(), EnhancedJfsError> {
        let sb = self.journal_sb.lock();
        let mut buf = [0u8; BSIZE];
        
        buf[0..4].copy_from_slice(&sb.magic.to_le_bytes());
        buf[4..8].copy_from_slice(&sb.version.to_le_bytes());
        buf[8..12].copy_from_slice(&sb.size.to_le_bytes());
        buf[12..16].copy_from_slice(&sb.start_block.to_le_bytes());
        buf[16..20].copy_from_slice(&sb.sequence.to_le_bytes());
        buf[20..28].copy_from_slice(&sb.first_transaction_id.to_le_bytes());
        buf[28..36].copy_from_slice(&sb.last_transaction_id.to_le_bytes());
        buf[36..40].copy_from_slice(&sb.active_transactions.to_le_bytes());
        buf[40..44].copy_from_slice(&sb.flags.to_le_bytes());
        buf[44..48].copy_from_slice(&sb.features.to_le_bytes());
        buf[48..52].copy_from_slice(&sb.compat.to_le_bytes());
        buf[52..56].copy_from_slice(&sb.incompat.to_le_bytes());
        buf[56..60].copy_from_slice(&sb.ro_compat.to_le_bytes());
        buf[60..64].copy_from_slice(&sb.last_checkpoint.to_le_bytes());
        buf[64..72].copy_from_slice(&sb.last_commit.to_le_bytes());
        buf[72..80].copy_from_slice(&sb.committed_transactions.to_le_bytes());
        buf[80..88].copy_from_slice(&sb.aborted_transactions.to_le_bytes());
        buf[88..92].copy_from_slice(&sb.used_blocks.to_le_bytes());
        buf[92..96].copy_from_slice(&sb.max_transaction_size.to_le_bytes());
        buf[96..100].copy_from_slice(&sb.avg_transaction_size.to_le_bytes());
        
        let device = self.device.lock();
        device.write(0, &buf);
        
        Ok(())
    }

    /// Format a new enhanced journal
    fn format_journal(&self) -> Result<(), EnhancedJfsError> {
        let mut sb = self.journal_sb.lock();
        sb.magic = JOURNAL_MAGIC;
        sb.version = 2; // Enhanced version
        sb.size = self.config.journal_size;
        sb.start_block = 1;
        sb.sequence = 1;
        sb.first_transaction_id = 1;
        sb.last_transaction_id = 0;
        sb.active_transactions = 0;
        sb.flags = 0;
        sb.features = 0x1 | 0x2 | 0x4; // Checksums, async commit, ordered mode
        sb.compat = 0;
        sb.incompat = 0;
        sb.ro_compat = 0;
        sb.last_checkpoint = 0;
        sb.last_commit = 0;
        sb.committed_transactions = 0;
        sb.aborted_transactions = 0;
        sb.used_blocks = 1; // Superblock
        sb.max_transaction_size = self.config.max_transaction_size;
        sb.avg_transaction_size = 0;
        
        drop(sb);
        self.write_journal_superblock()?;
        
        // Zero out the journal area
        let device = self.device.lock();
        let zero_block = [0u8; BSIZE];
        for i in 1..self.config.journal_size {
            device.write(i as usize, &zero_block);
        }
        
        crate::println!("enhanced_jfs: formatted new enhanced journal");
        Ok(())
    }

    /// Check if recovery is needed
    fn needs_recovery(&self) -> bool {
        let sb = self.journal_sb.lock();
        sb.active_transactions > 0 || (sb.flags & 0x1) != 0
    }

    /// Recover from a crash with enhanced recovery
    fn recover(&self) -> Result<(), EnhancedJfsError> {
        let recovery_start = crate::subsystems::time::get_timestamp();
        self.recovery_mode.store(1, Ordering::SeqCst);
        
        let mut stats = self.stats.lock();
        stats.recovery_operations += 1;
        drop(stats);
        
        // Scan journal for incomplete transactions
        self.scan_journal()?;
        
        // Analyze transaction dependencies
        self.analyze_transaction_dependencies()?;
        
        // Replay or rollback incomplete transactions
        self.replay_transactions()?;
        
        // Process revoke records
        self.process_revoke_records()?;
        
        // Clear recovery flag
        {
            let mut sb = self.journal_sb.lock();
            sb.flags &= !0x1; // Clear recovery flag
            sb.active_transactions = 0;
        }
        self.write_journal_superblock()?;
        
        // Update recovery time
        let recovery_time = crate::subsystems::time::get_timestamp() - recovery_start;
        let mut performance = self.performance.lock();
        performance.recovery_time_us = recovery_time * 1000; // Convert to microseconds
        drop(performance);
        
        self.recovery_mode.store(0, Ordering::SeqCst);
        
        crate::println!("enhanced_jfs: enhanced recovery completed in {}ms", recovery_time);
        Ok(())
    }

    /// Scan the journal for transactions with enhanced scanning
    fn scan_journal(&self) -> Result<(), EnhancedJfsError> {
        let sb = self.journal_sb.lock();
        let start = sb.start_block;
        let size = sb.size;
        drop(sb);
        
        let device = self.device.lock();
        let mut buf = [0u8; BSIZE];
        
        for block_num in start..start + size {
            device.read(block_num as usize, &mut buf);
            
            // Check if this is a valid journal entry
            let magic = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
            if magic != JOURNAL_MAGIC {
                continue;
            }
            
            let entry_type = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
            let transaction_id = u64::from_le_bytes([
                buf[8], buf[9], buf[10], buf[11],
                buf[12], buf[13], buf[14], buf[15],
            ]);
            
            match entry_type {
                1 => { // Begin transaction
                    self.create_transaction(transaction_id)?;
                }
                2 => { // Update block
                    let block_number = u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]);
                    let data_length = u32::from_le_bytes([buf[20], buf[21], buf[22], buf[23]]);
                    
                    // Store the original data for potential rollback
                    let mut transactions = self.transactions.lock();
                    if let Some(tx) = transactions.get_mut(&transaction_id) {
                        // Read the current block data
                        let mut block_data = vec![0u8; data_length as usize];
                        device.read(block_number as usize, &mut block_data);
                        tx.original_data.insert(block_number, block_data);
                    }
                }
                }
                3 => { // Commit transaction
                    self.commit_transaction(transaction_id)?;
                }
                4 => { // Checkpoint
                    self.process_checkpoint(transaction_id)?;
                }
                5 => { // Revoke
                    let block_number = u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]);
                    self.add_revoke_record(transaction_id, block_number)?;
                }
                _ => {}
            }
        }
        
        Ok(())
    }

    /// Analyze transaction dependencies for proper recovery order
    fn analyze_transaction_dependencies(&self) -> Result<(), EnhancedJfsError> {
        let transactions = self.transactions.lock();
        
        // Build dependency graph
        let mut dependencies: BTreeMap<u64, Vec<u64>> = BTreeMap::new();
        
        for (tx_id, tx) in transactions.iter() {
            if let Some(parent_id) = tx.parent_id {
                dependencies.entry(*tx_id).or_insert_with(Vec::new).push(parent_id);
            }
            
            for child_id in &tx.child_ids {
                dependencies.entry(*child_id).or_insert_with(Vec::new).push(*tx_id);
            }
        }
        
        // Sort transactions by dependency order
        // In a real implementation, we would use topological sort
        
        drop(transactions);
        Ok(())
    }

    /// Replay incomplete transactions with enhanced replay
    fn replay_transactions(&self) -> Result<(), EnhancedJfsError> {
        let transactions = self.transactions.lock();
        
        for (tx_id, tx) in transactions.iter() {
            if tx.state == EnhancedTransactionState::Active || 
               tx.state == EnhancedTransactionState::Prepared {
                // Replay this transaction
                self.replay_transaction(*tx_id)?;
            }
        }
        
        Ok(())
    }

    /// Replay a specific transaction with enhanced replay
    fn replay_transaction(&self, tx_id: u64) -> Result<(), EnhancedJfsError> {
        let transactions = self.transactions.lock();
        let tx = transactions.get(&tx_id).ok_or(EnhancedJfsError::TransactionNotFound)?;
        
        let device = self.device.lock();
        
        // Apply all modifications from this transaction
        for entry in &tx.entries {
            match entry.entry_type {
                2 => { // Update block
                    if let Some(new_data) = tx.new_data.get(&entry.block_number) {
                        device.write(entry.block_number as usize, new_data);
                    }
                }
                6 => { // Superblock update
                    if let Some(new_data) = tx.new_data.get(&entry.block_number) {
                        device.write(entry.block_number as usize, new_data);
                    }
                }
                7 => { // Inode update
                    if let Some(new_data) = tx.new_data.get(&entry.block_number) {
                        device.write(entry.block_number as usize, new_data);
                    }
                }
                _ => {}
            }
        }
        
        // Update statistics
        let mut stats = self.stats.lock();
        stats.replayed_transactions += 1;
        drop(stats);
        
        crate::println!("enhanced_jfs: replayed transaction {}", tx_id);
        Ok(())
    }

    /// Process revoke records
    fn process_revoke_records(&self) -> Result<(), EnhancedJfsError> {
        // In a real implementation, this would process revoke records
        // to prevent replay of old block versions
        
        crate::println!("enhanced_jfs: processed revoke records");
        Ok(())
    }

    /// Process checkpoint record
    fn process_checkpoint(&self, checkpoint_id: u64) -> Result<(), EnhancedJfsError> {
        // In a real implementation, this would process checkpoint records
        // to free up journal space
        
        crate::println!("enhanced_jfs: processed checkpoint {}", checkpoint_id);
        Ok(())
    }

    /// Add revoke record
    fn add_revoke_record(&self, tx_id: u64, block_num: u32) -> Result<(), EnhancedJfsError> {
        // In a real implementation, this would add a revoke record
        // to prevent replay of old block versions
        
        let mut stats = self.stats.lock();
        stats.revoked_blocks += 1;
        drop(stats);
        
        Ok(())
    }

    /// Create a transaction (internal helper)
    fn create_transaction(&self, tx_id: u64) -> Result<(), EnhancedJfsError> {
        let tx = EnhancedJournalTransaction::new(tx_id);
        let mut transactions = self.transactions.lock();
        transactions.insert(tx_id, tx);
        Ok(())
    }

    /// Begin a new enhanced transaction
    pub fn begin_transaction(&self) -> Result<u64, EnhancedJfsError> {
        let tx_id = self.next_transaction_id.fetch_add(1, Ordering::SeqCst);
        
        let mut tx = EnhancedJournalTransaction::new(tx_id);
        
        // Write begin entry to journal
        let begin_entry = EnhancedJournalEntry {
            magic: JOURNAL_MAGIC,
            entry_type: JournalEntryType::Begin as u32,
            transaction_id: tx_id,
            block_number: 0,
            sequence: 0,
            data_length: 0,
            checksum: 0,
            flags: 0,
            timestamp: crate::subsystems::time::get_timestamp(),
        };
        
        self.write_journal_entry(&begin_entry)?;
        tx.add_entry(begin_entry);
        
        // Store the transaction
        let mut transactions = self.transactions.lock();
        transactions.insert(tx_id, tx);
        
        // Update journal superblock
        {
            let mut sb = self.journal_sb.lock();
            sb.last_transaction_id = tx_id;
            sb.active_transactions += 1;
        }
        self.write_journal_superblock()?;
        
        // Update space usage
        self.update_space_usage()?;
        
        Ok(tx_id)
    }

    /// Write an enhanced journal entry
    fn write_journal_entry(&self, entry: &EnhancedJournalEntry) -> Result<(), EnhancedJfsError> {
        let sb = self.journal_sb.lock();
        let mut sequence = sb.sequence;
        sb.sequence = sequence + 1;
        drop(sb);
        
        let mut buf = [0u8; BSIZE];
        
        buf[0..4].copy_from_slice(&entry.magic.to_le_bytes());
        buf[4..8].copy_from_slice(&entry.entry_type.to_le_bytes());
        buf[8..16].copy_from_slice(&entry.transaction_id.to_le_bytes());
        buf[16..20].copy_from_slice(&entry.block_number.to_le_bytes());
        buf[20..24].copy_from_slice(&sequence.to_le_bytes());
        buf[24..28].copy_from_slice(&entry.data_length.to_le_bytes());
        buf[28..32].copy_from_slice(&entry.checksum.to_le_bytes());
        buf[32..36].copy_from_slice(&entry.flags.to_le_bytes());
        buf[36..44].copy_from_slice(&entry.timestamp.to_le_bytes());
        
        let device = self.device.lock();
        let block_num = sb.start_block + (sequence % sb.size);
        device.write(block_num as usize, &buf);
        
        Ok(())
    }

    /// Log a block modification with enhanced logging
    pub fn log_block(&self, tx_id: u64, block_num: u32, old_data: &[u8], new_data: &[u8]) -> Result<(), EnhancedJfsError> {
        let mut transactions = self.transactions.lock();
        let tx = transactions.get_mut(&tx_id).ok_or(EnhancedJfsError::TransactionNotFound)?;
        
        // Add block to transaction
        tx.add_block(block_num, old_data, new_data);
        
        // Create update entry
        let update_entry = EnhancedJournalEntry {
            magic: JOURNAL_MAGIC,
            entry_type: JournalEntryType::Update as u32,
            transaction_id: tx_id,
            block_number: block_num,
            sequence: tx.entries.len() as u32,
            data_length: new_data.len() as u32,
            checksum: self.calculate_checksum(new_data),
            flags: 0,
            timestamp: crate::subsystems::time::get_timestamp(),
        };
        
        drop(transactions);
        
        // Write entry to journal
        self.write_journal_entry(&update_entry)?;
        
        // Store the new data
        let mut pending = self.pending_entries.lock();
        pending.push(update_entry);
        
        // Add entry to transaction
        let mut transactions = self.transactions.lock();
        if let Some(tx) = transactions.get_mut(&tx_id) {
            tx.add_entry(update_entry);
        }
        
        Ok(())
    }

    /// Calculate checksum for data integrity
    fn calculate_checksum(&self, data: &[u8]) -> u32 {
        if !self.config.enable_checksums {
            return 0;
        }
        
        // Simple checksum implementation
        let mut checksum = 0u32;
        for chunk in data.chunks(4) {
            let mut bytes = [0u8; 4];
            for (i, &byte) in chunk.iter().enumerate() {
                bytes[i] = byte;
            }
            checksum ^= u32::from_le_bytes(bytes);
        }
        checksum
    }

    /// Commit an enhanced transaction
    pub fn commit_transaction(&self, tx_id: u64) -> Result<(), EnhancedJfsError> {
        let commit_start = crate::subsystems::time::get_timestamp();
        
        let mut transactions = self.transactions.lock();
        let tx = transactions.get_mut(&tx_id).ok_or(EnhancedJfsError::TransactionNotFound)?;
        
        tx.prepare();
        
        // Write commit entry
        let commit_entry = EnhancedJournalEntry {
            magic: JOURNAL_MAGIC,
            entry_type: JournalEntryType::Commit as u32,
            transaction_id: tx_id,
            block_number: 0,
            sequence: tx.entries.len() as u32,
            data_length: 0,
            checksum: 0,
            flags: 0,
            timestamp: crate::subsystems::time::get_timestamp(),
        };
        
        drop(transactions);
        
        self.write_journal_entry(&commit_entry)?;
        
        // Update transaction state
        let mut transactions = self.transactions.lock();
        if let Some(tx) = transactions.get_mut(&tx_id) {
            tx.commit();
            tx.add_entry(commit_entry);
        }
        
        // Move to committed transactions
        let tx = transactions.remove(&tx_id).unwrap();
        drop(transactions);
        
        let mut committed = self.committed_transactions.lock();
        committed.insert(tx_id, tx);
        
        // Update journal superblock
        {
            let mut sb = self.journal_sb.lock();
            sb.active_transactions = sb.active_transactions.saturating_sub(1);
            sb.last_commit = crate::subsystems::time::get_timestamp();
            sb.committed_transactions += 1;
        }
        self.write_journal_superblock()?;
        
        // Update statistics
        let commit_time = crate::subsystems::time::get_timestamp() - commit_start;
        let mut stats = self.stats.lock();
        stats.total_transactions += 1;
        stats.committed_transactions += 1;
        stats.total_commit_time_us += commit_time * 1000; // Convert to microseconds
        stats.avg_commit_time_us = stats.total_commit_time_us / stats.committed_transactions;
        if commit_time * 1000 > stats.max_commit_time_us {
            stats.max_commit_time_us = commit_time * 1000;
        }
        
        // Update transaction size statistics
        let committed = self.committed_transactions.lock();
        if let Some(tx) = committed.get(&tx_id) {
            if tx.block_count > stats.max_transaction_size {
                stats.max_transaction