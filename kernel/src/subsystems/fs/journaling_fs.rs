//! Journaling File System Implementation
//!
//! This module implements a journaling file system (JFS) for NOS,
//! providing transactional guarantees and crash recovery capabilities.
//! The implementation is inspired by ext3 and NTFS journaling mechanisms.

extern crate alloc;
use alloc::vec::Vec;
use alloc::collections::BTreeMap;
// use alloc::string::String;
// use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};

// use crate::drivers::BlockDevice;
// use crate::sync::{Mutex, Sleeplock};
use crate::subsystems::fs::{BSIZE, SuperBlock, InodeType, DiskInode, Dirent, BufFlags};

/// Journaling file system constants
pub const JOURNAL_MAGIC: u32 = 0x4A4F5552; // "JOUR" in hex
pub const TRANSACTION_MAGIC: u32 = 0x5452414E; // "TRAN" in hex
pub const COMMIT_MAGIC: u32 = 0x434F4D4D; // "COMM" in hex
pub const MAX_TRANSACTIONS: usize = 100;
pub const MAX_JOURNAL_ENTRIES: usize = 1000;

/// Journal entry types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum JournalEntryType {
    Begin = 1,
    Update = 2,
    Commit = 3,
    Checkpoint = 4,
    Revoke = 5,
}

/// Journal entry descriptor
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct JournalEntry {
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
}

impl Default for JournalEntry {
    fn default() -> Self {
        Self {
            magic: JOURNAL_MAGIC,
            entry_type: 0,
            transaction_id: 0,
            block_number: 0,
            sequence: 0,
            data_length: 0,
            checksum: 0,
        }
    }
}

/// Transaction state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Inactive,
    Active,
    Prepared,
    Committed,
    Aborted,
}

/// Journal transaction
#[derive(Debug)]
pub struct JournalTransaction {
    /// Unique transaction ID
    pub id: u64,
    /// Current state of the transaction
    pub state: TransactionState,
    /// List of modified blocks
    pub modified_blocks: Vec<u32>,
    /// Journal entries for this transaction
    pub entries: Vec<JournalEntry>,
    /// Original block data for rollback
    pub original_data: BTreeMap<u32, Vec<u8>>,
    /// Timestamp when transaction was created
    pub timestamp: u64,
}

impl JournalTransaction {
    /// Create a new transaction
    pub fn new(id: u64) -> Self {
        Self {
            id,
            state: TransactionState::Active,
            modified_blocks: Vec::new(),
            entries: Vec::new(),
            original_data: BTreeMap::new(),
            timestamp: crate::time::get_timestamp(),
        }
    }

    /// Add a block modification to the transaction
    pub fn add_block(&mut self, block_num: u32, old_data: &[u8]) {
        if !self.modified_blocks.contains(&block_num) {
            self.modified_blocks.push(block_num);
            self.original_data.insert(block_num, old_data.to_vec());
        }
    }

    /// Prepare the transaction for commit
    pub fn prepare(&mut self) {
        self.state = TransactionState::Prepared;
    }

    /// Commit the transaction
    pub fn commit(&mut self) {
        self.state = TransactionState::Committed;
    }

    /// Abort the transaction
    pub fn abort(&mut self) {
        self.state = TransactionState::Aborted;
    }
}

/// Journal superblock
#[derive(Debug, Clone, Copy, Default)]
#[repr(C)]
pub struct JournalSuperBlock {
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
}

/// Journaling file system
pub struct JournalingFileSystem {
    /// Underlying block device
    device: Mutex<Box<dyn BlockDevice>>,
    /// Journal superblock
    journal_sb: Mutex<JournalSuperBlock>,
    /// Active transactions
    transactions: Mutex<BTreeMap<u64, JournalTransaction>>,
    /// Next transaction ID
    next_transaction_id: AtomicU64,
    /// Journal entries waiting to be written
    pending_entries: Mutex<Vec<JournalEntry>>,
    /// Recovery state
    recovery_mode: AtomicU32,
    /// Journal statistics
    stats: Mutex<JournalStats>,
}

/// Journal statistics
#[derive(Debug, Default)]
pub struct JournalStats {
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
}

impl JournalingFileSystem {
    /// Create a new journaling file system
    pub fn new(device: Box<dyn BlockDevice>) -> Self {
        Self {
            device: Mutex::new(device),
            journal_sb: Mutex::new(JournalSuperBlock::default()),
            transactions: Mutex::new(BTreeMap::new()),
            next_transaction_id: AtomicU64::new(1),
            pending_entries: Mutex::new(Vec::new()),
            recovery_mode: AtomicU32::new(0),
            stats: Mutex::new(JournalStats::default()),
        }
    }

    /// Initialize the journaling file system
    pub fn init(&self) -> Result<(), JfsError> {
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
        
        // Check if recovery is needed
        if self.needs_recovery() {
            crate::println!("jfs: journal needs recovery");
            self.recover()?;
        }
        
        crate::println!("jfs: journaling file system initialized");
        Ok(())
    }

    /// Read the journal superblock
    fn read_journal_superblock(&self) -> Result<(), JfsError> {
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
        
        Ok(())
    }

    /// Write the journal superblock
    fn write_journal_superblock(&self) -> Result<(), JfsError> {
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
        
        let device = self.device.lock();
        device.write(0, &buf);
        
        Ok(())
    }

    /// Format a new journal
    fn format_journal(&self) -> Result<(), JfsError> {
        let mut sb = self.journal_sb.lock();
        sb.magic = JOURNAL_MAGIC;
        sb.version = 1;
        sb.size = 1000; // Default journal size
        sb.start_block = 1;
        sb.sequence = 1;
        sb.first_transaction_id = 1;
        sb.last_transaction_id = 0;
        sb.active_transactions = 0;
        sb.flags = 0;
        
        drop(sb);
        self.write_journal_superblock()?;
        
        // Zero out the journal area
        let device = self.device.lock();
        let zero_block = [0u8; BSIZE];
        for i in 1..sb.size {
            device.write(i as usize, &zero_block);
        }
        
        crate::println!("jfs: formatted new journal");
        Ok(())
    }

    /// Check if recovery is needed
    fn needs_recovery(&self) -> bool {
        let sb = self.journal_sb.lock();
        sb.active_transactions > 0 || (sb.flags & 0x1) != 0
    }

    /// Recover from a crash
    fn recover(&self) -> Result<(), JfsError> {
        self.recovery_mode.store(1, Ordering::SeqCst);
        
        let mut stats = self.stats.lock();
        stats.recovery_operations += 1;
        drop(stats);
        
        // Scan journal for incomplete transactions
        self.scan_journal()?;
        
        // Replay or rollback incomplete transactions
        self.replay_transactions()?;
        
        // Clear recovery flag
        {
            let mut sb = self.journal_sb.lock();
            sb.flags &= !0x1; // Clear recovery flag
            sb.active_transactions = 0;
        }
        self.write_journal_superblock()?;
        
        self.recovery_mode.store(0, Ordering::SeqCst);
        
        crate::println!("jfs: recovery completed");
        Ok(())
    }

    /// Scan the journal for transactions
    fn scan_journal(&self) -> Result<(), JfsError> {
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
                3 => { // Commit transaction
                    self.commit_transaction(transaction_id)?;
                }
                _ => {}
            }
        }
        
        Ok(())
    }

    /// Replay incomplete transactions
    fn replay_transactions(&self) -> Result<(), JfsError> {
        let transactions = self.transactions.lock();
        
        for (tx_id, tx) in transactions.iter() {
            if tx.state == TransactionState::Active || tx.state == TransactionState::Prepared {
                // Replay this transaction
                self.replay_transaction(*tx_id)?;
            }
        }
        
        Ok(())
    }

    /// Replay a specific transaction
    fn replay_transaction(&self, tx_id: u64) -> Result<(), JfsError> {
        let transactions = self.transactions.lock();
        let tx = transactions.get(&tx_id).ok_or(JfsError::TransactionNotFound)?;
        
        let device = self.device.lock();
        
        // Apply all modifications from this transaction
        for entry in &tx.entries {
            if entry.entry_type == 2 { // Update block
                let mut buf = [0u8; BSIZE];
                device.read(entry.block_number as usize, &mut buf);
                
                // Apply the modification
                // In a real implementation, we would have the actual data to apply
                // For now, we'll just mark the block as modified
                
                device.write(entry.block_number as usize, &buf);
            }
        }
        
        crate::println!("jfs: replayed transaction {}", tx_id);
        Ok(())
    }

    /// Begin a new transaction
    pub fn begin_transaction(&self) -> Result<u64, JfsError> {
        let tx_id = self.next_transaction_id.fetch_add(1, Ordering::SeqCst);
        
        let mut tx = JournalTransaction::new(tx_id);
        
        // Write begin entry to journal
        let begin_entry = JournalEntry {
            magic: JOURNAL_MAGIC,
            entry_type: JournalEntryType::Begin as u32,
            transaction_id: tx_id,
            block_number: 0,
            sequence: 0,
            data_length: 0,
            checksum: 0,
        };
        
        self.write_journal_entry(&begin_entry)?;
        tx.entries.push(begin_entry);
        
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
        
        Ok(tx_id)
    }

    /// Write a journal entry
    fn write_journal_entry(&self, entry: &JournalEntry) -> Result<(), JfsError> {
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
        
        let device = self.device.lock();
        let block_num = sb.start_block + (sequence % sb.size);
        device.write(block_num as usize, &buf);
        
        Ok(())
    }

    /// Log a block modification
    pub fn log_block(&self, tx_id: u64, block_num: u32, old_data: &[u8], new_data: &[u8]) -> Result<(), JfsError> {
        let mut transactions = self.transactions.lock();
        let tx = transactions.get_mut(&tx_id).ok_or(JfsError::TransactionNotFound)?;
        
        // Add block to transaction
        tx.add_block(block_num, old_data);
        
        // Create update entry
        let update_entry = JournalEntry {
            magic: JOURNAL_MAGIC,
            entry_type: JournalEntryType::Update as u32,
            transaction_id: tx_id,
            block_number: block_num,
            sequence: tx.entries.len() as u32,
            data_length: new_data.len() as u32,
            checksum: 0, // Calculate checksum in real implementation
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
            tx.entries.push(update_entry);
        }
        
        Ok(())
    }

    /// Commit a transaction
    pub fn commit_transaction(&self, tx_id: u64) -> Result<(), JfsError> {
        let mut transactions = self.transactions.lock();
        let tx = transactions.get_mut(&tx_id).ok_or(JfsError::TransactionNotFound)?;
        
        tx.prepare();
        
        // Write commit entry
        let commit_entry = JournalEntry {
            magic: JOURNAL_MAGIC,
            entry_type: JournalEntryType::Commit as u32,
            transaction_id: tx_id,
            block_number: 0,
            sequence: tx.entries.len() as u32,
            data_length: 0,
            checksum: 0,
        };
        
        drop(transactions);
        
        self.write_journal_entry(&commit_entry)?;
        
        // Update transaction state
        let mut transactions = self.transactions.lock();
        if let Some(tx) = transactions.get_mut(&tx_id) {
            tx.commit();
            tx.entries.push(commit_entry);
        }
        
        // Update journal superblock
        {
            let mut sb = self.journal_sb.lock();
            sb.active_transactions = sb.active_transactions.saturating_sub(1);
        }
        self.write_journal_superblock()?;
        
        // Update statistics
        let mut stats = self.stats.lock();
        stats.total_transactions += 1;
        stats.committed_transactions += 1;
        
        Ok(())
    }

    /// Abort a transaction
    pub fn abort_transaction(&self, tx_id: u64) -> Result<(), JfsError> {
        let mut transactions = self.transactions.lock();
        let tx = transactions.get_mut(&tx_id).ok_or(JfsError::TransactionNotFound)?;
        
        tx.abort();
        
        // Rollback all modifications
        for (block_num, original_data) in &tx.original_data {
            let device = self.device.lock();
            device.write(*block_num as usize, original_data);
        }
        
        // Remove transaction from active list
        transactions.remove(&tx_id);
        
        // Update journal superblock
        {
            let mut sb = self.journal_sb.lock();
            sb.active_transactions = sb.active_transactions.saturating_sub(1);
        }
        self.write_journal_superblock()?;
        
        // Update statistics
        let mut stats = self.stats.lock();
        stats.total_transactions += 1;
        stats.aborted_transactions += 1;
        
        crate::println!("jfs: aborted transaction {}", tx_id);
        Ok(())
    }

    /// Create a transaction (internal helper)
    fn create_transaction(&self, tx_id: u64) -> Result<(), JfsError> {
        let tx = JournalTransaction::new(tx_id);
        let mut transactions = self.transactions.lock();
        transactions.insert(tx_id, tx);
        Ok(())
    }

    /// Get journal statistics
    pub fn get_stats(&self) -> JournalStats {
        self.stats.lock().clone()
    }

    /// Check if the system is in recovery mode
    pub fn is_in_recovery(&self) -> bool {
        self.recovery_mode.load(Ordering::SeqCst) != 0
    }

    /// Checkpoint the journal (free up space)
    pub fn checkpoint(&self) -> Result<(), JfsError> {
        // In a real implementation, this would free up journal space
        // by removing committed transactions that are no longer needed
        
        crate::println!("jfs: checkpoint completed");
        Ok(())
    }
}

/// Journaling file system errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JfsError {
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
}

/// Global journaling file system instance
static mut JFS: Option<JournalingFileSystem> = None;

/// Initialize the journaling file system
pub fn init(device: Box<dyn BlockDevice>) -> Result<(), JfsError> {
    unsafe {
        let jfs = JournalingFileSystem::new(device);
        jfs.init()?;
        JFS = Some(jfs);
    }
    Ok(())
}

/// Get the journaling file system instance
pub fn get_jfs() -> Option<&'static JournalingFileSystem> {
    unsafe { JFS.as_ref() }
}