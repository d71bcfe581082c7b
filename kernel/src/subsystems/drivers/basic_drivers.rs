//! Basic Device Drivers
//!
//! This module provides basic device drivers for NOS, including
//! console, block, network, and input device drivers.

extern crate alloc;
use alloc::vec::Vec;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::sync::atomic::{AtomicU64, AtomicU32, AtomicBool, Ordering};
use crate::subsystems::sync::{Mutex, Sleeplock};
use crate::subsystems::drivers::driver_manager::{
    Driver, DeviceId, DriverId, DeviceType, DeviceStatus, DriverStatus,
    DeviceInfo, DriverInfo, DeviceResources, IoOperation, IoResult, InterruptInfo
};
use nos_nos_error_handling::unified::KernelError;

// ============================================================================
// Console Driver
// ============================================================================

/// Console driver
pub struct ConsoleDriver {
    /// Driver information
    driver_info: DriverInfo,
    /// Device ID
    device_id: Option<DeviceId>,
    /// Console buffer
    buffer: Mutex<Vec<u8>>,
    /// Buffer size
    buffer_size: usize,
    /// Buffer read position
    read_pos: Mutex<usize>,
    /// Buffer write position
    write_pos: Mutex<usize>,
    /// Console statistics
    stats: Mutex<ConsoleStats>,
}

/// Console statistics
#[derive(Debug, Default, Clone)]
pub struct ConsoleStats {
    /// Characters written
    pub chars_written: u64,
    /// Characters read
    pub chars_read: u64,
    /// Lines written
    pub lines_written: u64,
    /// Lines read
    pub lines_read: u64,
    /// Buffer overflows
    pub buffer_overflows: u64,
    /// Last activity timestamp
    pub last_activity_timestamp: u64,
}

impl ConsoleDriver {
    /// Create a new console driver
    pub fn new(buffer_size: usize) -> Self {
        Self {
            driver_info: DriverInfo {
                id: 0,
                name: "console".to_string(),
                version: "1.0.0".to_string(),
                status: DriverStatus::Unloaded,
                supported_device_types: vec![DeviceType::Custom("console".to_string())],
                supported_device_ids: vec!["console".to_string()],
                path: "/dev/console".to_string(),
                dependencies: Vec::new(),
                capabilities: vec!["read".to_string(), "write".to_string()],
                attributes: BTreeMap::new(),
            },
            device_id: None,
            buffer: Mutex::new(Vec::with_capacity(buffer_size)),
            buffer_size,
            read_pos: Mutex::new(0),
            write_pos: Mutex::new(0),
            stats: Mutex::new(ConsoleStats::default()),
        }
    }

    /// Write a string to the console
    pub fn write_string(&self, s: &str) -> Result<(), KernelError> {
        let bytes = s.as_bytes();
        let mut buffer = self.buffer.lock();
        let mut write_pos = self.write_pos.lock();
        
        for &byte in bytes {
            if buffer.len() < self.buffer_size {
                buffer.push(byte);
                *write_pos = (*write_pos + 1) % self.buffer_size;
            } else {
                // Buffer full, overwrite oldest data
                let read_pos = self.read_pos.lock();
                let index = *read_pos % self.buffer_size;
                buffer[index] = byte;
                *write_pos = (*write_pos + 1) % self.buffer_size;
                
                // Update statistics
                let mut stats = self.stats.lock();
                stats.buffer_overflows += 1;
            }
        }
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.chars_written += bytes.len() as u64;
            stats.lines_written += s.matches('\n').count() as u64;
            stats.last_activity_timestamp = self.get_current_time();
        }
        
        // In a real implementation, this would write to actual console hardware
        crate::print!("{}", s);
        
        Ok(())
    }

    /// Read a string from the console
    pub fn read_string(&self, max_len: usize) -> Result<String, KernelError> {
        let mut buffer = self.buffer.lock();
        let mut read_pos = self.read_pos.lock();
        let write_pos = self.write_pos.lock();
        
        if *read_pos == *write_pos {
            return Ok(String::new()); // No data available
        }
        
        let mut result = Vec::new();
        let mut bytes_read = 0;
        
        while *read_pos != *write_pos && bytes_read < max_len {
            let index = *read_pos % self.buffer_size;
            result.push(buffer[index]);
            *read_pos = (*read_pos + 1) % self.buffer_size;
            bytes_read += 1;
        }
        
        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.chars_read += bytes_read as u64;
            stats.lines_read += result.iter().filter(|&&b| b == b'\n').count() as u64;
            stats.last_activity_timestamp = self.get_current_time();
        }
        
        // Convert to string, ignoring invalid UTF-8 sequences
        match String::from_utf8(result) {
            Ok(s) => Ok(s),
            Err(_) => Ok(String::new()), // Return empty string on invalid UTF-8
        }
    }

    /// Get console statistics
    pub fn get_stats(&self) -> ConsoleStats {
        self.stats.lock().clone()
    }

    /// Clear console buffer
    pub fn clear_buffer(&self) {
        let mut buffer = self.buffer.lock();
        buffer.clear();
        
        let mut read_pos = self.read_pos.lock();
        let mut write_pos = self.write_pos.lock();
        *read_pos = 0;
        *write_pos = 0;
    }

    /// Get current time in milliseconds
    fn get_current_time(&self) -> u64 {
        // In a real implementation, this would get the current time
        // from the system clock
        0
    }
}

impl Driver for ConsoleDriver {
    fn get_info(&self) -> DriverInfo {
        let mut info = self.driver_info.clone();
        info.id = self.device_id.unwrap_or(0);
        info
    }

    fn initialize(&mut self) -> Result<(), KernelError> {
        self.driver_info.status = DriverStatus::Initializing;
        
        // Initialize console hardware
        // In a real implementation, this would initialize actual console hardware
        
        self.driver_info.status = DriverStatus::Initialized;
        crate::println!("console: console driver initialized");
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), KernelError> {
        self.driver_info.status = DriverStatus::Stopping;
        
        // Cleanup console hardware
        // In a real implementation, this would cleanup actual console hardware
        
        self.driver_info.status = DriverStatus::Stopped;
        crate::println!("console: console driver cleaned up");
        Ok(())
    }

    fn probe_device(&self, device_info: &DeviceInfo) -> Result<bool, KernelError> {
        Ok(device_info.device_type == DeviceType::Custom("console".to_string()))
    }

    fn add_device(&mut self, device_info: &DeviceInfo) -> Result<(), KernelError> {
        self.device_id = Some(device_info.id);
        self.driver_info.status = DriverStatus::Running;
        crate::println!("console: added device {}", device_info.id);
        Ok(())
    }

    fn remove_device(&mut self, device_id: DeviceId) -> Result<(), KernelError> {
        if self.device_id == Some(device_id) {
            self.device_id = None;
            self.driver_info.status = DriverStatus::Initialized;
            crate::println!("console: removed device {}", device_id);
        }
        Ok(())
    }

    fn handle_io(&mut self, device_id: DeviceId, operation: IoOperation) -> Result<IoResult, KernelError> {
        if self.device_id != Some(device_id) {
            return Err(KernelError::InvalidArgument);
        }

        match operation {
            IoOperation::Read { offset: _, size } => {
                let s = self.read_string(size as usize)?;
                Ok(IoResult::ReadResult { 
                    data: s.into_bytes(), 
                    bytes_read: s.len() as u64 
                })
            }
            IoOperation::Write { offset: _, data } => {
                let s = String::from_utf8_lossy(&data);
                self.write_string(&s)?;
                Ok(IoResult::WriteResult { 
                    bytes_written: data.len() as u64 
                })
            }
            _ => Err(KernelError::NotSupported),
        }
    }

    fn get_device_status(&self, device_id: DeviceId) -> Result<DeviceStatus, KernelError> {
        if self.device_id == Some(device_id) {
            Ok(DeviceStatus::Ready)
        } else {
            Err(KernelError::NotFound)
        }
    }

    fn set_device_attribute(&mut self, device_id: DeviceId, name: &str, value: &str) -> Result<(), KernelError> {
        if self.device_id != Some(device_id) {
            return Err(KernelError::NotFound);
        }

        match name {
            "buffer_size" => {
                if let Ok(size) = value.parse::<usize>() {
                    // In a real implementation, we would resize the buffer
                    crate::println!("console: setting buffer size to {}", size);
                } else {
                    return Err(KernelError::InvalidArgument);
                }
            }
            _ => return Err(KernelError::NotSupported),
        }

        Ok(())
    }

    fn get_device_attribute(&self, device_id: DeviceId, name: &str) -> Result<String, KernelError> {
        if self.device_id != Some(device_id) {
            return Err(KernelError::NotFound);
        }

        match name {
            "buffer_size" => Ok(self.buffer_size.to_string()),
            "buffer_used" => {
                let buffer = self.buffer.lock();
                Ok(buffer.len().to_string())
            }
            "stats" => {
                let stats = self.get_stats();
                Ok(format!("chars_written={}, chars_read={}, lines_written={}, lines_read={}, buffer_overflows={}",
                         stats.chars_written, stats.chars_read, stats.lines_written, 
                         stats.lines_read, stats.buffer_overflows))
            }
            _ => Err(KernelError::NotSupported),
        }
    }

    fn suspend_device(&mut self, device_id: DeviceId) -> Result<(), KernelError> {
        if self.device_id == Some(device_id) {
            // In a real implementation, we would suspend the console hardware
            crate::println!("console: suspending device {}", device_id);
            Ok(())
        } else {
            Err(KernelError::NotFound)
        }
    }

    fn resume_device(&mut self, device_id: DeviceId) -> Result<(), KernelError> {
        if self.device_id == Some(device_id) {
            // In a real implementation, we would resume the console hardware
            crate::println!("console: resuming device {}", device_id);
            Ok(())
        } else {
            Err(KernelError::NotFound)
        }
    }

    fn handle_interrupt(&mut self, device_id: DeviceId, interrupt_info: &InterruptInfo) -> Result<(), KernelError> {
        if self.device_id != Some(device_id) {
            return Err(KernelError::NotFound);
        }

        // In a real implementation, we would handle console interrupts
        crate::println!("console: handling interrupt {} for device {}", interrupt_info.irq, device_id);
        Ok(())
    }
}

// ============================================================================
// Block Device Driver
// ============================================================================

/// Block device driver
pub struct BlockDeviceDriver {
    /// Driver information
    driver_info: DriverInfo,
    /// Device ID
    device_id: Option<DeviceId>,
    /// Block size in bytes
    block_size: u32,
    /// Number of blocks
    num_blocks: u64,
    /// Device statistics
    stats: Mutex<BlockDeviceStats>,
    /// Device data (simulated)
    data: Mutex<Vec<u8>>,
}

/// Block device statistics
#[derive(Debug, Default, Clone)]
pub struct BlockDeviceStats {
    /// Blocks read
    pub blocks_read: u64,
    /// Blocks written
    pub blocks_written: u64,
    /// Bytes read
    pub bytes_read: u64,
    /// Bytes written
    pub bytes_written: u64,
    /// Read errors
    pub read_errors: u64,
    /// Write errors
    pub write_errors: u64,
    /// Average read latency in microseconds
    pub avg_read_latency_us: u64,
    /// Average write latency in microseconds
    pub avg_write_latency_us: u64,
    /// Last activity timestamp
    pub last_activity_timestamp: u64,
}

impl BlockDeviceDriver {
    /// Create a new block device driver
    pub fn new(block_size: u32, num_blocks: u64) -> Self {
        let total_size = (block_size as u64) * num_blocks;
        
        Self {
            driver_info: DriverInfo {
                id: 0,
                name: "block".to_string(),
                version: "1.0.0".to_string(),
                status: DriverStatus::Unloaded,
                supported_device_types: vec![DeviceType::Block],
                supported_device_ids: vec!["block".to_string()],
                path: "/dev/block".to_string(),
                dependencies: Vec::new(),
                capabilities: vec!["read".to_string(), "write".to_string()],
                attributes: BTreeMap::new(),
            },
            device_id: None,
            block_size,
            num_blocks,
            stats: Mutex::new(BlockDeviceStats::default()),
            data: Mutex::new(vec![0u8; total_size as usize]),
        }
    }

    /// Read blocks from the device
    pub fn read_blocks(&self, block_offset: u64, block_count: u32, buffer: &mut [u8]) -> Result<u32, KernelError> {
        let start_time = self.get_current_time();
        
        // Validate parameters
        if block_offset + block_count as u64 > self.num_blocks {
            return Err(KernelError::InvalidArgument);
        }
        
        let byte_offset = (block_offset * self.block_size as u64) as usize;
        let byte_count = (block_count * self.block_size) as usize;
        
        if byte_offset + byte_count > buffer.len() {
            return Err(KernelError::InvalidArgument);
        }
        
        // Read data from device
        {
            let data = self.data.lock();
            buffer[..byte_count].copy_from_slice(&data[byte_offset..byte_offset + byte_count]);
        }
        
        // Update statistics
        let read_time = self.get_current_time() - start_time;
        {
            let mut stats = self.stats.lock();
            stats.blocks_read += block_count as u64;
            stats.bytes_read += byte_count as u64;
            
            // Update average read latency
            if stats.blocks_read > 0 {
                stats.avg_read_latency_us = (stats.avg_read_latency_us * (stats.blocks_read - block_count as u64) + read_time) / stats.blocks_read;
            }
            
            stats.last_activity_timestamp = self.get_current_time();
        }
        
        Ok(block_count)
    }

    /// Write blocks to the device
    pub fn write_blocks(&self, block_offset: u64, block_count: u32, buffer: &[u8]) -> Result<u32, KernelError> {
        let start_time = self.get_current_time();
        
        // Validate parameters
        if block_offset + block_count as u64 > self.num_blocks {
            return Err(KernelError::InvalidArgument);
        }
        
        let byte_offset = (block_offset * self.block_size as u64) as usize;
        let byte_count = (block_count * self.block_size) as usize;
        
        if byte_offset + byte_count > buffer.len() {
            return Err(KernelError::InvalidArgument);
        }
        
        // Write data to device
        {
            let mut data = self.data.lock();
            data[byte_offset..byte_offset + byte_count].copy_from_slice(&buffer[..byte_count]);
        }
        
        // Update statistics
        let write_time = self.get_current_time() - start_time;
        {
            let mut stats = self.stats.lock();
            stats.blocks_written += block_count as u64;
            stats.bytes_written += byte_count as u64;
            
            // Update average write latency
            if stats.blocks_written > 0 {
                stats.avg_write_latency_us = (stats.avg_write_latency_us * (stats.blocks_written - block_count as u64) + write_time) / stats.blocks_written;
            }
            
            stats.last_activity_timestamp = self.get_current_time();
        }
        
        Ok(block_count)
    }

    /// Get block device statistics
    pub fn get_stats(&self) -> BlockDeviceStats {
        self.stats.lock().clone()
    }

    /// Get current time in microseconds
    fn get_current_time(&self) -> u64 {
        // In a real implementation, this would get the current time
        // from the system clock
        0
    }
}

impl Driver for BlockDeviceDriver {
    fn get_info(&self) -> DriverInfo {
        let mut info = self.driver_info.clone();
        info.id = self.device_id.unwrap_or(0);
        info
    }

    fn initialize(&mut self) -> Result<(), KernelError> {
        self.driver_info.status = DriverStatus::Initializing;
        
        // Initialize block device hardware
        // In a real implementation, this would initialize actual block device hardware
        
        self.driver_info.status = DriverStatus::Initialized;
        crate::println!("block: block device driver initialized ({} blocks of {} bytes)", 
                      self.num_blocks, self.block_size);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), KernelError> {
        self.driver_info.status = DriverStatus::Stopping;
        
        // Cleanup block device hardware
        // In a real implementation, this would cleanup actual block device hardware
        
        self.driver_info.status = DriverStatus::Stopped;
        crate::println!("block: block device driver cleaned up");
        Ok(())
    }

    fn probe_device(&self, device_info: &DeviceInfo) -> Result<bool, KernelError> {
        Ok(device_info.device_type == DeviceType::Block)
    }

    fn add_device(&mut self, device_info: &DeviceInfo) -> Result<(), KernelError> {
        self.device_id = Some(device_info.id);
        self.driver_info.status = DriverStatus::Running;
        crate::println!("block: added device {}", device_info.id);
        Ok(())
    }

    fn remove_device(&mut self, device_id: DeviceId) -> Result<(), KernelError> {
        if self.device_id == Some(device_id) {
            self.device_id = None;
            self.driver_info.status = DriverStatus::Initialized;
            crate::println!("block: removed device {}", device_id);
        }
        Ok(())
    }

    fn handle_io(&mut self, device_id: DeviceId, operation: IoOperation) -> Result<IoResult, KernelError> {
        if self.device_id != Some(device_id) {
            return Err(KernelError::InvalidArgument);
        }

        match operation {
            IoOperation::Read { offset, size } => {
                let block_offset = offset / self.block_size as u64;
                let block_count = ((size + self.block_size as u64 - 1) / self.block_size as u64) as u32;
                let mut buffer = vec![0u8; size as usize];
                
                let blocks_read = self.read_blocks(block_offset, block_count, &mut buffer)?;
                let bytes_read = (blocks_read as u64) * self.block_size as u64;
                
                Ok(IoResult::ReadResult { 
                    data: buffer, 
                    bytes_read 
                })
            }
            IoOperation::Write { offset, data } => {
                let block_offset = offset / self.block_size as u64;
                let block_count = ((data.len() as u64 + self.block_size as u64 - 1) / self.block_size as u64) as u32;
                
                let blocks_written = self.write_blocks(block_offset, block_count, &data)?;
                let bytes_written = (blocks_written as u64) * self.block_size as u64;
                
                Ok(IoResult::WriteResult { 
                    bytes_written 
                })
            }
            _ => Err(KernelError::NotSupported),
        }
    }

    fn get_device_status(&self, device_id: DeviceId) -> Result<DeviceStatus, KernelError> {
        if self.device_id == Some(device_id) {
            Ok(DeviceStatus::Ready)
        } else {
            Err(KernelError::NotFound)
        }
    }

    fn set_device_attribute(&mut self, device_id: DeviceId, name: &str, value: &str) -> Result<(), KernelError> {
        if self.device_id != Some(device_id) {
            return Err(KernelError::NotFound);
        }

        match name {
            "block_size" => {
                if let Ok(size) = value.parse::<u32>() {
                    self.block_size = size;
                    crate::println!("block: setting block size to {}", size);
                } else {
                    return Err(KernelError::InvalidArgument);
                }
            }
            _ => return Err(KernelError::NotSupported),
        }

        Ok(())
    }

    fn get_device_attribute(&self, device_id: DeviceId, name: &str) -> Result<String, KernelError> {
        if self.device_id != Some(device_id) {
            return Err(KernelError::NotFound);
        }

        match name {
            "block_size" => Ok(self.block_size.to_string()),
            "num_blocks" => Ok(self.num_blocks.to_string()),
            "total_size" => Ok((self.num_blocks * self.block_size as u64).to_string()),
            "stats" => {
                let stats = self.get_stats();
                Ok(format!("blocks_read={}, blocks_written={}, bytes_read={}, bytes_written={}, read_errors={}, write_errors={}",
                         stats.blocks_read, stats.blocks_written, stats.bytes_read, stats.bytes_written,
                         stats.read_errors, stats.write_errors))
            }
            _ => Err(KernelError::NotSupported),
        }
    }

    fn suspend_device(&mut self, device_id: DeviceId) -> Result<(), KernelError> {
        if self.device_id == Some(device_id) {
            // In a real implementation, we would suspend the block device hardware
            crate::println!("block: suspending device {}", device_id);
            Ok(())
        } else {
            Err(KernelError::NotFound)
        }
    }

    fn resume_device(&mut self, device_id: DeviceId) -> Result<(), KernelError> {
        if self.device_id == Some(device_id) {
            // In a real implementation, we would resume the block device hardware
            crate::println!("block: resuming device {}", device_id);
            Ok(())
        } else {
            Err(KernelError::NotFound)
        }
    }

    fn handle_interrupt(&mut self, device_id: DeviceId, interrupt_info: &InterruptInfo) -> Result<(), KernelError> {
        if self.device_id != Some(device_id) {
            return Err(KernelError::NotFound);
        }

        // In a real implementation, we would handle block device interrupts
        crate::println!("block: handling interrupt {} for device {}", interrupt_info.irq, device_id);
        Ok(())
    }
}

// ============================================================================
// Network Device Driver
// ============================================================================

/// Network device driver
pub struct NetworkDeviceDriver {
    /// Driver information
    driver_info: DriverInfo,
    /// Device ID
    device_id: Option<DeviceId>,
    /// MAC address
    mac_address: [u8; 6],
    /// MTU (Maximum Transmission Unit)
    mtu: u32,
    /// Device statistics
    stats: Mutex<NetworkDeviceStats>,
    /// Receive buffer
    rx_buffer: Mutex<Vec<Vec<u8>>>,
    /// Maximum receive buffer size
    max_rx_buffer_size: usize,
}

/// Network device statistics
#[derive(Debug, Default, Clone)]
pub struct NetworkDeviceStats {
    /// Packets received
    pub packets_rx: u64,
    /// Packets transmitted
    pub packets_tx: u64,
    /// Bytes received
    pub bytes_rx: u64,
    /// Bytes transmitted
    pub bytes_tx: u64,
    /// Receive errors
    pub rx_errors: u64,
    /// Transmit errors
    pub tx_errors: u64,
    /// Dropped packets
    pub dropped_packets: u64,
    /// Last activity timestamp
    pub last_activity_timestamp: u64,
}

impl NetworkDeviceDriver {
    /// Create a new network device driver
    pub fn new(mac_address: [u8; 6], mtu: u32, max_rx_buffer_size: usize) -> Self {
        Self {
            driver_info: DriverInfo {
                id: 0,
                name: "network".to_string(),
                version: "1.0.0".to_string(),
                status: DriverStatus::Unloaded,
                supported_device_types: vec![DeviceType::Network],
                supported_device_ids: vec!["network".to_string()],
                path: "/dev/network".to_string(),
                dependencies: Vec::new(),
                capabilities: vec!["read".to_string(), "write".to_string()],
                attributes: BTreeMap::new(),
            },
            device_id: None,
            mac_address,
            mtu,
            stats: Mutex::new(NetworkDeviceStats::default()),
            rx_buffer: Mutex::new(Vec::with_capacity(max_rx_buffer_size)),
            max_rx_buffer_size,
        }
    }

    /// Send a packet
    pub fn send_packet(&self, packet: &[u8]) -> Result<(), KernelError> {
        if packet.len() > self.mtu as usize {
            return Err(KernelError::InvalidArgument);
        }

        // In a real implementation, this would send the packet to the network hardware
        crate::println!("network: sending packet of {} bytes", packet.len());

        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.packets_tx += 1;
            stats.bytes_tx += packet.len() as u64;
            stats.last_activity_timestamp = self.get_current_time();
        }

        Ok(())
    }

    /// Receive a packet
    pub fn receive_packet(&self) -> Result<Vec<u8>, KernelError> {
        let mut rx_buffer = self.rx_buffer.lock();
        
        if rx_buffer.is_empty() {
            return Err(KernelError::NoData);
        }

        let packet = rx_buffer.remove(0);

        // Update statistics
        {
            let mut stats = self.stats.lock();
            stats.packets_rx += 1;
            stats.bytes_rx += packet.len() as u64;
            stats.last_activity_timestamp = self.get_current_time();
        }

        Ok(packet)
    }

    /// Queue a packet for reception (simulating incoming network traffic)
    pub fn queue_packet(&self, packet: Vec<u8>) -> Result<(), KernelError> {
        let mut rx_buffer = self.rx_buffer.lock();
        
        if rx_buffer.len() >= self.max_rx_buffer_size {
            // Buffer full, drop oldest packet
            rx_buffer.remove(0);
            
            // Update statistics
            let mut stats = self.stats.lock();
            stats.dropped_packets += 1;
        }
        
        rx_buffer.push(packet);
        Ok(())
    }

    /// Get network device statistics
    pub fn get_stats(&self) -> NetworkDeviceStats {
        self.stats.lock().clone()
    }

    /// Get MAC address as string
    pub fn get_mac_address_string(&self) -> String {
        format!("{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
                self.mac_address[0], self.mac_address[1], self.mac_address[2],
                self.mac_address[3], self.mac_address[4], self.mac_address[5])
    }

    /// Get current time in milliseconds
    fn get_current_time(&self) -> u64 {
        // In a real implementation, this would get the current time
        // from the system clock
        0
    }
}

impl Driver for NetworkDeviceDriver {
    fn get_info(&self) -> DriverInfo {
        let mut info = self.driver_info.clone();
        info.id = self.device_id.unwrap_or(0);
        info
    }

    fn initialize(&mut self) -> Result<(), KernelError> {
        self.driver_info.status = DriverStatus::Initializing;
        
        // Initialize network device hardware
        // In a real implementation, this would initialize actual network device hardware
        
        self.driver_info.status = DriverStatus::Initialized;
        crate::println!("network: network device driver initialized (MAC: {}, MTU: {})", 
                      self.get_mac_address_string(), self.mtu);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), KernelError> {
        self.driver_info.status = DriverStatus::Stopping;
        
        // Cleanup network device hardware
        // In a real implementation, this would cleanup actual network device hardware
        
        self.driver_info.status = DriverStatus::Stopped;
        crate::println!("network: network device driver cleaned up");
        Ok(())
    }

    fn probe_device(&self, device_info: &DeviceInfo) -> Result<bool, KernelError> {
        Ok(device_info.device_type == DeviceType::Network)
    }

    fn add_device(&mut self, device_info: &DeviceInfo) -> Result<(), KernelError> {
        self.device_id = Some(device_info.id);
        self.driver_info.status = DriverStatus::Running;
        crate::println!("network: added device {}", device_info.id);
        Ok(())
    }

    fn remove_device(&mut self, device_id: DeviceId) -> Result<(), KernelError> {
        if self.device_id == Some(device_id) {
            self.device_id = None;
            self.driver_info.status = DriverStatus::Initialized;
            crate::println!("network: removed device {}", device_id);
        }
        Ok(())
    }

    fn handle_io(&mut self, device_id: DeviceId, operation: IoOperation) -> Result<IoResult, KernelError> {
        if self.device_id != Some(device_id) {
            return Err(KernelError::InvalidArgument);
        }

        match operation {
            IoOperation::Read { offset: _, size } => {
                match self.receive_packet() {
                    Ok(packet) => Ok(IoResult::ReadResult { 
                        data: packet, 
                        bytes_read: packet.len() as u64 
                    }),
                    Err(KernelError::NoData) => Ok(IoResult::ReadResult { 
                        data: Vec::new(), 
                        bytes_read: 0 
                    }),
                    Err(e) => Err(e),
                }
            }
            IoOperation::Write { offset: _, data } => {
                self.send_packet(&data)?;
                Ok(IoResult::WriteResult { 
                    bytes_written: data.len() as u64 
                })
            }
            _ => Err(KernelError::NotSupported),
        }
    }

    fn get_device_status(&self, device_id: DeviceId) -> Result<DeviceStatus, KernelError> {
        if self.device_id == Some(device_id) {
            Ok(DeviceStatus::Ready)
        } else {
            Err(KernelError::NotFound)
        }
    }

    fn set_device_attribute(&mut self, device_id: DeviceId, name: &str, value: &str) -> Result<(), KernelError> {
        if self.device_id != Some(device_id) {
            return Err(KernelError::NotFound);
        }

        match name {
            "mtu" => {
                if let Ok(mtu) = value.parse::<u32>() {
                    self.mtu = mtu;
                    crate::println!("network: setting MTU to {}", mtu);
                } else {
                    return Err(KernelError::InvalidArgument);
                }
            }
            "mac_address" => {
                // Parse MAC address string (format: "aa:bb:cc:dd:ee:ff")
                let parts: Vec<&str> = value.split(':').collect();
                if parts.len() == 6 {
                    for i in 0..6 {
                        if let Ok(byte) = u8::from_str_radix(parts[i], 16) {
                            self.mac_address[i] = byte;
                        } else {
                            return Err(KernelError::InvalidArgument);
                        }
                    }
                    crate::println!("network: setting MAC address to {}", value);
                } else {
                    return Err(KernelError::InvalidArgument);
                }
            }
            _ => return Err(KernelError::NotSupported),
        }

        Ok(())
    }

    fn get_device_attribute(&self, device_id: DeviceId, name: &str) -> Result<String, KernelError> {
        if self.device_id != Some(device_id) {
            return Err(KernelError::NotFound);
        }

        match name {
            "mtu" => Ok(self.mtu.to_string()),
            "mac_address" => Ok(self.get_mac_address_string()),
            "rx_buffer_size" => {
                let rx_buffer = self.rx_buffer.lock();
                Ok(rx_buffer.len().to_string())
            }
            "stats" => {
                let stats = self.get_stats();
                Ok(format!("packets_rx={}, packets_tx={}, bytes_rx={}, bytes_tx={}, rx_errors={}, tx_errors={}, dropped_packets={}",
                         stats.packets_rx, stats.packets_tx, stats.bytes_rx, stats.bytes_tx,
                         stats.rx_errors, stats.tx_errors, stats.dropped_packets))
            }
            _ => Err(KernelError::NotSupported),
        }
    }

    fn suspend_device(&mut self, device_id: DeviceId) -> Result<(), KernelError> {
        if self.device_id == Some(device_id) {
            // In a real implementation, we would suspend the network device hardware
            crate::println!("network: suspending device {}", device_id);
            Ok(())
        } else {
            Err(KernelError::NotFound)
        }
    }

    fn resume_device(&mut self, device_id: DeviceId) -> Result<(), KernelError> {
        if self.device_id == Some(device_id) {
            // In a real implementation, we would resume the network device hardware
            crate::println!("network: resuming device {}", device_id);
            Ok(())
        } else {
            Err(KernelError::NotFound)
        }
    }

    fn handle_interrupt(&mut self, device_id: DeviceId, interrupt_info: &InterruptInfo) -> Result<(), KernelError> {
        if self.device_id != Some(device_id) {
            return Err(KernelError::NotFound);
        }

        // In a real implementation, we would handle network device interrupts
        crate::println!("network: handling interrupt {} for device {}", interrupt_info.irq, device_id);
        Ok(())
    }
}