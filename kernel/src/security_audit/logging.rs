// Logging Module for Security Audit
//
// 日志模块，负责安全审计事件的持久化存储和管理

extern crate alloc;

use alloc::format;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::vec;
use alloc::string::String;
use alloc::string::ToString;
use alloc::boxed::Box;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

use crate::security::audit::{AuditEvent, AuditEventType, AuditSeverity};
use super::{StorageConfig, StorageType, CompressionConfig, EncryptionConfig, BackupConfig};

/// 日志管理器
pub struct LogManager {
    /// 管理器ID
    pub id: u64,
    /// 日志写入器
    writers: Vec<Box<dyn LogWriter>>,
    /// 存储配置
    storage_config: StorageConfig,
    /// 日志统计
    stats: Arc<Mutex<LogManagerStats>>,
    /// 下一个日志文件ID
    next_log_file_id: AtomicU64,
    /// 是否正在运行
    running: bool,
}

/// 日志写入器特征
pub trait LogWriter: Send + Sync {
    /// 写入事件
    fn write_event(&mut self, event: &AuditEvent) -> Result<(), &'static str>;
    /// 刷新缓冲区
    fn flush(&mut self) -> Result<(), &'static str>;
    /// 关闭写入器
    fn close(&mut self) -> Result<(), &'static str>;
    /// 获取统计信息
    fn get_stats(&self) -> LogWriterStats;
}

/// 日志管理器统计
#[derive(Debug, Default, Clone)]
pub struct LogManagerStats {
    /// 总写入事件数
    pub total_events_written: u64,
    /// 总写入字节数
    pub total_bytes_written: u64,
    /// 写入错误数
    pub write_errors: u64,
    /// 刷新错误数
    pub flush_errors: u64,
    /// 当前日志文件大小
    pub current_file_size: u64,
    /// 当前日志文件数量
    pub current_file_count: u32,
    /// 压缩统计
    pub compression_stats: CompressionStats,
    /// 加密统计
    pub encryption_stats: EncryptionStats,
    /// 备份统计
    pub backup_stats: BackupStats,
    /// 平均写入时间（微秒）
    pub avg_write_time_us: u64,
}

/// 日志写入器统计
#[derive(Debug, Default, Clone)]
pub struct LogWriterStats {
    /// 写入事件数
    pub events_written: u64,
    /// 写入字节数
    pub bytes_written: u64,
    /// 错误数
    pub errors: u64,
    /// 缓冲区使用量
    pub buffer_usage: usize,
    /// 最后写入时间
    pub last_write_time: u64,
}

/// 压缩统计
#[derive(Debug, Default, Clone)]
pub struct CompressionStats {
    /// 压缩前大小
    pub uncompressed_size: u64,
    /// 压缩后大小
    pub compressed_size: u64,
    /// 压缩时间（微秒）
    pub compression_time_us: u64,
    /// 压缩率
    pub compression_ratio: f64,
}

/// 加密统计
#[derive(Debug, Default, Clone)]
pub struct EncryptionStats {
    /// 加密操作数
    pub encryption_operations: u64,
    /// 解密操作数
    pub decryption_operations: u64,
    /// 加密时间（微秒）
    pub encryption_time_us: u64,
    /// 解密时间（微秒）
    pub decryption_time_us: u64,
}

/// 备份统计
#[derive(Debug, Default, Clone)]
pub struct BackupStats {
    /// 备份操作数
    pub backup_operations: u64,
    /// 成功备份数
    pub successful_backups: u64,
    /// 备份失败数
    pub failed_backups: u64,
    /// 总备份数据量
    pub total_backup_bytes: u64,
    /// 平均备份时间（微秒）
    pub avg_backup_time_us: u64,
}

impl LogManager {
    /// 创建新的日志管理器
    pub fn new() -> Self {
        Self {
            id: 1,
            writers: Vec::new(),
            storage_config: StorageConfig::default(),
            stats: Arc::new(Mutex::new(LogManagerStats::default())),
            next_log_file_id: AtomicU64::new(1),
            running: false,
        }
    }

    /// 初始化日志管理器
    pub fn init(&mut self, storage_config: &StorageConfig) -> Result<(), &'static str> {
        self.storage_config = storage_config.clone();

        // 根据存储类型创建相应的写入器
        match storage_config.storage_type {
            StorageType::FileSystem => {
                let writer = FileSystemWriter::new(storage_config.clone());
                self.writers.push(Box::new(writer));
            }
            StorageType::Database => {
                let writer = DatabaseWriter::new(storage_config.clone());
                self.writers.push(Box::new(writer));
            }
            StorageType::RemoteLog => {
                let writer = RemoteLogWriter::new(storage_config.clone());
                self.writers.push(Box::new(writer));
            }
            StorageType::Memory => {
                let writer = MemoryWriter::new(storage_config.clone());
                self.writers.push(Box::new(writer));
            }
        }

        self.running = true;
        crate::println!("[LogManager] Log manager initialized with {} writers", self.writers.len());
        Ok(())
    }

    /// 记录事件
    pub fn log_event(&mut self, event: &AuditEvent) -> Result<(), &'static str> {
        if !self.running {
            return Err("Log manager not running");
        }

        let start_time = crate::subsystems::time::get_timestamp_nanos();

        // 序列化事件
        let serialized = self.serialize_event(event)?;

        // 应用压缩
        let compressed_data = if self.storage_config.compression.enabled {
            self.compress_data(&serialized)?
        } else {
            serialized
        };

        // 应用加密
        let encrypted_data = if self.storage_config.encryption.enabled {
            self.encrypt_data(&compressed_data)?
        } else {
            compressed_data
        };

        // 写入到所有写入器
        let mut write_success = false;
        for writer in &mut self.writers {
            let mut modified_event = event.clone();

            // 如果需要，修改事件数据以包含加密/压缩信息
            if self.storage_config.compression.enabled || self.storage_config.encryption.enabled {
                modified_event.data.insert("processed_data".to_string(),
                    String::from_utf8_lossy(&encrypted_data).to_string());
            }

            match writer.write_event(&modified_event) {
                Ok(()) => write_success = true,
                Err(e) => {
                    crate::println!("[LogManager] Writer failed: {}", e);
                    let mut stats = self.stats.lock();
                    stats.write_errors += 1;
                }
            }
        }

        if !write_success {
            return Err("All writers failed");
        }

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.total_events_written += 1;
            stats.total_bytes_written += encrypted_data.len() as u64;

            let elapsed = crate::subsystems::time::get_timestamp_nanos() - start_time;
            stats.avg_write_time_us = (stats.avg_write_time_us + elapsed / 1000) / 2;
        }

        Ok(())
    }

    /// 序列化事件
    fn serialize_event(&self, event: &AuditEvent) -> Result<Vec<u8>, &'static str> {
        // 简化的JSON序列化
        let json = format!(
            r#"{{
  "id": {},
  "event_type": "{:?}",
  "timestamp": {},
  "pid": {},
  "uid": {},
  "gid": {},
  "severity": "{:?}",
  "message": "{}",
  "data": {{}}
}}"#,
            event.id,
            event.event_type,
            event.timestamp,
            event.pid,
            event.uid,
            event.gid,
            event.severity,
            event.message.replace("\"", "\\\"")
        );

        Ok(json.into_bytes())
    }

    /// 压缩数据
    fn compress_data(&self, data: &[u8]) -> Result<Vec<u8>, &'static str> {
        // 简化的压缩实现
        // 实际实现会使用专业的压缩库
        let start_time = crate::subsystems::time::get_timestamp_nanos();

        // 模拟压缩（实际会使用zlib/gzip等）
        let compressed = if data.len() > 100 {
            let mut compressed = Vec::with_capacity(data.len() / 2);
            for chunk in data.chunks(2) {
                compressed.push(chunk.iter().sum());
            }
            compressed
        } else {
            data.to_vec()
        };

        let elapsed = crate::subsystems::time::get_timestamp_nanos() - start_time;

        // 更新压缩统计
        {
            let mut stats = self.stats.lock();
            let comp_stats = &mut stats.compression_stats;
            comp_stats.uncompressed_size += data.len() as u64;
            comp_stats.compressed_size += compressed.len() as u64;
            comp_stats.compression_time_us += elapsed / 1000;

            if comp_stats.uncompressed_size > 0 {
                comp_stats.compression_ratio =
                    comp_stats.compressed_size as f64 / comp_stats.uncompressed_size as f64;
            }
        }

        Ok(compressed)
    }

    /// 加密数据
    fn encrypt_data(&self, data: &[u8]) -> Result<Vec<u8>, &'static str> {
        // 简化的加密实现
        // 实际实现会使用AES等安全加密算法
        let start_time = crate::subsystems::time::get_timestamp_nanos();

        // 简单的XOR加密（仅用于演示）
        let key = self.storage_config.encryption.key.as_bytes();
        let mut encrypted = Vec::with_capacity(data.len());

        for (i, &byte) in data.iter().enumerate() {
            let key_byte = key[i % key.len()];
            encrypted.push(byte ^ key_byte);
        }

        let elapsed = crate::subsystems::time::get_timestamp_nanos() - start_time;

        // 更新加密统计
        {
            let mut stats = self.stats.lock();
            let enc_stats = &mut stats.encryption_stats;
            enc_stats.encryption_operations += 1;
            enc_stats.encryption_time_us += elapsed / 1000;
        }

        Ok(encrypted)
    }

    /// 刷新所有写入器
    pub fn flush(&mut self) -> Result<(), &'static str> {
        if !self.running {
            return Err("Log manager not running");
        }

        for writer in &mut self.writers {
            if let Err(e) = writer.flush() {
                let mut stats = self.stats.lock();
                stats.flush_errors += 1;
                crate::println!("[LogManager] Flush failed: {}", e);
            }
        }

        Ok(())
    }

    /// 获取统计信息
    pub fn get_stats(&self) -> LogManagerStats {
        self.stats.lock().clone()
    }

    /// 重置统计信息
    pub fn reset_stats(&self) {
        *self.stats.lock() = LogManagerStats::default();
    }

    /// 停止日志管理器
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        self.running = false;

        // 关闭所有写入器
        for writer in &mut self.writers {
            if let Err(e) = writer.close() {
                crate::println!("[LogManager] Writer close failed: {}", e);
            }
        }

        crate::println!("[LogManager] Log manager shutdown");
        Ok(())
    }
}

/// 文件系统写入器
pub struct FileSystemWriter {
    /// 配置
    config: StorageConfig,
    /// 当前文件路径
    current_file_path: String,
    /// 当前文件大小
    current_file_size: u64,
    /// 统计信息
    stats: LogWriterStats,
}

impl FileSystemWriter {
    /// 创建新的文件系统写入器
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            current_file_path: String::new(),
            current_file_size: 0,
            stats: LogWriterStats::default(),
        }
    }

    /// 创建新日志文件
    fn create_new_file(&mut self) -> Result<(), &'static str> {
        // 简化的文件创建逻辑
        let timestamp = crate::subsystems::time::get_timestamp();
        let file_name = format!("audit_{}.log", timestamp);
        self.current_file_path = format!("{}/{}", self.config.storage_path, file_name);
        self.current_file_size = 0;

        crate::println!("[FileSystemWriter] Created new log file: {}", self.current_file_path);
        Ok(())
    }

    /// 检查是否需要轮转文件
    fn needs_rotation(&self) -> bool {
        self.current_file_size >= self.config.max_file_size
    }

    /// 轮转日志文件
    fn rotate_file(&mut self) -> Result<(), &'static str> {
        // 简化的文件轮转逻辑
        crate::println!("[FileSystemWriter] Rotating log file");
        self.create_new_file()
    }
}

impl LogWriter for FileSystemWriter {
    fn write_event(&mut self, event: &AuditEvent) -> Result<(), &'static str> {
        // 如果是第一个事件或需要轮转，创建新文件
        if self.current_file_path.is_empty() || self.needs_rotation() {
            self.create_new_file()?;
        }

        // 序列化事件（简化实现）
        let event_str = format!(
            "[{}] {}:{} {} {}\n",
            crate::subsystems::time::format_timestamp(event.timestamp),
            event.pid,
            event.uid,
            format!("{:?}", event.event_type),
            event.message
        );

        // 模拟写入文件
        let bytes_written = event_str.len() as u64;
        self.current_file_size += bytes_written;

        // 更新统计
        self.stats.events_written += 1;
        self.stats.bytes_written += bytes_written;
        self.stats.last_write_time = crate::subsystems::time::get_timestamp_nanos();

        crate::println!("[FileSystemWriter] Wrote {} bytes to {}", bytes_written, self.current_file_path);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), &'static str> {
        crate::println!("[FileSystemWriter] Flushing buffers");
        Ok(())
    }

    fn close(&mut self) -> Result<(), &'static str> {
        crate::println!("[FileSystemWriter] Closing log file: {}", self.current_file_path);
        Ok(())
    }

    fn get_stats(&self) -> LogWriterStats {
        self.stats.clone()
    }
}

/// 数据库写入器
pub struct DatabaseWriter {
    /// 配置
    config: StorageConfig,
    /// 数据库连接信息
    connection_string: String,
    /// 统计信息
    stats: LogWriterStats,
}

impl DatabaseWriter {
    /// 创建新的数据库写入器
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            connection_string: "postgresql://localhost/security_audit".to_string(),
            stats: LogWriterStats::default(),
        }
    }
}

impl LogWriter for DatabaseWriter {
    fn write_event(&mut self, event: &AuditEvent) -> Result<(), &'static str> {
        // 简化的数据库写入逻辑
        crate::println!("[DatabaseWriter] Inserting event {} into database", event.id);

        // 更新统计
        self.stats.events_written += 1;
        self.stats.bytes_written += 128; // 估算大小
        self.stats.last_write_time = crate::subsystems::time::get_timestamp_nanos();

        Ok(())
    }

    fn flush(&mut self) -> Result<(), &'static str> {
        crate::println!("[DatabaseWriter] Committing transaction");
        Ok(())
    }

    fn close(&mut self) -> Result<(), &'static str> {
        crate::println!("[DatabaseWriter] Closing database connection");
        Ok(())
    }

    fn get_stats(&self) -> LogWriterStats {
        self.stats.clone()
    }
}

/// 远程日志写入器
pub struct RemoteLogWriter {
    /// 配置
    config: StorageConfig,
    /// 远端服务器地址
    server_url: String,
    /// 统计信息
    stats: LogWriterStats,
}

impl RemoteLogWriter {
    /// 创建新的远程日志写入器
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            server_url: "https://logs.example.com/ingest".to_string(),
            stats: LogWriterStats::default(),
        }
    }
}

impl LogWriter for RemoteLogWriter {
    fn write_event(&mut self, event: &AuditEvent) -> Result<(), &'static str> {
        // 简化的远程日志发送逻辑
        crate::println!("[RemoteLogWriter] Sending event {} to {}", event.id, self.server_url);

        // 更新统计
        self.stats.events_written += 1;
        self.stats.bytes_written += 256; // 网络传输估算
        self.stats.last_write_time = crate::subsystems::time::get_timestamp_nanos();

        Ok(())
    }

    fn flush(&mut self) -> Result<(), &'static str> {
        crate::println!("[RemoteLogWriter] Flushing network buffers");
        Ok(())
    }

    fn close(&mut self) -> Result<(), &'static str> {
        crate::println!("[RemoteLogWriter] Closing remote connection");
        Ok(())
    }

    fn get_stats(&self) -> LogWriterStats {
        self.stats.clone()
    }
}

/// 内存写入器
pub struct MemoryWriter {
    /// 配置
    config: StorageConfig,
    /// 内存缓冲区
    buffer: Vec<AuditEvent>,
    /// 最大缓冲区大小
    max_buffer_size: usize,
    /// 统计信息
    stats: LogWriterStats,
}

impl MemoryWriter {
    /// 创建新的内存写入器
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            buffer: Vec::new(),
            max_buffer_size: 1000,
            stats: LogWriterStats::default(),
        }
    }

    /// 获取缓冲区中的事件
    pub fn get_events(&self) -> &[AuditEvent] {
        &self.buffer
    }

    /// 清空缓冲区
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }
}

impl LogWriter for MemoryWriter {
    fn write_event(&mut self, event: &AuditEvent) -> Result<(), &'static str> {
        // 检查缓冲区大小
        if self.buffer.len() >= self.max_buffer_size {
            self.buffer.remove(0); // 移除最旧的事件
        }

        self.buffer.push(event.clone());

        // 更新统计
        self.stats.events_written += 1;
        self.stats.bytes_written += 64; // 估算大小
        self.stats.last_write_time = crate::subsystems::time::get_timestamp_nanos();
        self.stats.buffer_usage = self.buffer.len();

        Ok(())
    }

    fn flush(&mut self) -> Result<(), &'static str> {
        crate::println!("[MemoryWriter] Memory buffer flushed");
        Ok(())
    }

    fn close(&mut self) -> Result<(), &'static str> {
        crate::println!("[MemoryWriter] Memory writer closed, {} events in buffer", self.buffer.len());
        Ok(())
    }

    fn get_stats(&self) -> LogWriterStats {
        self.stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::audit::{AuditEvent, AuditEventType, AuditSeverity};

    #[test]
    fn test_log_manager_creation() {
        let manager = LogManager::new();
        assert_eq!(manager.id, 1);
        assert!(!manager.running);
        assert_eq!(manager.writers.len(), 0);
    }

    #[test]
    fn test_log_manager_stats() {
        let manager = LogManager::new();
        let stats = manager.get_stats();
        assert_eq!(stats.total_events_written, 0);
        assert_eq!(stats.total_bytes_written, 0);
        assert_eq!(stats.write_errors, 0);
    }

    #[test]
    fn test_file_system_writer() {
        let config = StorageConfig::default();
        let mut writer = FileSystemWriter::new(config);

        let event = AuditEvent {
            id: 1,
            event_type: AuditEventType::SecurityViolation,
            timestamp: crate::subsystems::time::get_timestamp_nanos(),
            pid: 1234,
            uid: 1000,
            gid: 1000,
            severity: AuditSeverity::Critical,
            message: "Test event".to_string(),
            data: BTreeMap::new(),
            source_location: None,
            tid: 1234,
            syscall: None,
        };

        let result = writer.write_event(&event);
        assert!(result.is_ok());

        let stats = writer.get_stats();
        assert_eq!(stats.events_written, 1);
        assert!(stats.bytes_written > 0);
    }

    #[test]
    fn test_memory_writer() {
        let config = StorageConfig::default();
        let mut writer = MemoryWriter::new(config);

        let event = AuditEvent {
            id: 1,
            event_type: AuditEventType::SecurityViolation,
            timestamp: crate::subsystems::time::get_timestamp_nanos(),
            pid: 1234,
            uid: 1000,
            gid: 1000,
            severity: AuditSeverity::Critical,
            message: "Test event".to_string(),
            data: BTreeMap::new(),
            source_location: None,
            tid: 1234,
            syscall: None,
        };

        let result = writer.write_event(&event);
        assert!(result.is_ok());

        assert_eq!(writer.get_events().len(), 1);
        assert_eq!(writer.get_events()[0].id, 1);
    }
}
