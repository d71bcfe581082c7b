//! Inter-Process Communication (IPC) mechanism for hybrid architecture
//! Implements shared memory, message queues, and signal mechanisms

extern crate alloc;

use alloc::vec::Vec;
use alloc::string::String;
use crate::sync::Mutex;

// ============================================================================
// Constants
// ============================================================================

pub const IPC_MAX_MSG_SIZE: usize = 4096;
pub const IPC_MAX_QUEUE: usize = 128;

// ============================================================================
// Types
// ============================================================================

/// IPC Message Type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpcType {
    SharedMemory,
    MessageQueue,
    Semaphore,
    SystemCall,
}

/// IPC Message Header
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct IpcMsgHeader {
    pub msg_type: u32,       // Message type (application-defined)
    pub msg_size: u32,       // Message size in bytes (excluding header)
    pub src_pid: u32,        // Source process ID
    pub dst_pid: u32,        // Destination process ID
    pub flags: u32,          // Message flags (non-blocking, etc.)
}

/// IPC Message (fixed size for simplicity)
#[derive(Debug)]
pub struct IpcMessage {
    pub header: IpcMsgHeader,
    pub data: Vec<u8>,       // Message data
}

/// Shared Memory Region
pub struct SharedMemory {
    pub base_addr: usize,
    pub size: usize,
    pub permissions: u32,    // Read/write/execute permissions
    pub ref_count: u32,      // Number of processes using this region
}

/// Message Queue
pub struct MessageQueue {
    pub queue_id: u32,
    pub messages: Mutex<Vec<IpcMessage>>,
    pub max_size: usize,     // Maximum number of messages in queue
}

// ============================================================================
// Global State
// ============================================================================

static SHARED_MEMORIES: Mutex<Vec<SharedMemory>> = Mutex::new(Vec::new());
static MESSAGE_QUEUES: Mutex<Vec<MessageQueue>> = Mutex::new(Vec::new());
static NEXT_SHM_ID: Mutex<u32> = Mutex::new(1);
static NEXT_MSGQ_ID: Mutex<u32> = Mutex::new(1);

// ============================================================================
// Public API
// ============================================================================

impl IpcMessage {
    /// Create a new IPC message
    pub fn new(src_pid: u32, dst_pid: u32, msg_type: u32, data: &[u8]) -> Self {
        Self {
            header: IpcMsgHeader {
                msg_type,
                msg_size: data.len() as u32,
                src_pid,
                dst_pid,
                flags: 0,
            },
            data: data.to_vec(),
        }
    }
}

impl SharedMemory {
    /// Create a new shared memory region
    pub fn new(base_addr: usize, size: usize, permissions: u32) -> Self {
        Self {
            base_addr,
            size,
            permissions,
            ref_count: 1,
        }
    }
}

impl MessageQueue {
    /// Create a new message queue
    pub fn new(queue_id: u32, max_size: usize) -> Self {
        Self {
            queue_id,
            messages: Mutex::new(Vec::new()),
            max_size,
        }
    }
}

/// Initialize IPC subsystem
pub fn init() {
    // Nothing to initialize yet
    crate::println!("ipc: initialized");
}

/// Create shared memory region
pub fn shm_create(size: usize, permissions: u32) -> Option<u32> {
    // TODO: Implement shared memory creation
    Some(0)
}

/// Attach to shared memory region
pub fn shm_attach(shm_id: u32) -> Option<usize> {
    // TODO: Implement shared memory attach
    Some(0)
}

/// Detach from shared memory region
pub fn shm_detach(addr: usize) -> bool {
    // TODO: Implement shared memory detach
    true
}

/// Delete shared memory region
pub fn shm_delete(shm_id: u32) -> bool {
    // TODO: Implement shared memory delete
    true
}

/// Create message queue
pub fn msg_create(queue_id: u32) -> bool {
    // TODO: Implement message queue creation
    true
}

/// Send message to queue
pub fn msg_send(queue_id: u32, msg: &IpcMessage) -> bool {
    // TODO: Implement message send
    true
}

/// Receive message from queue
pub fn msg_recv(queue_id: u32, msg_type: u32) -> Option<IpcMessage> {
    // TODO: Implement message receive
    None
}

/// Delete message queue
pub fn msg_delete(queue_id: u32) -> bool {
    // TODO: Implement message queue delete
    true
}