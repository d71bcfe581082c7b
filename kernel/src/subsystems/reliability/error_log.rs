//! 错误日志和诊断工具模块
//! 
//! 本模块提供错误日志和诊断功能，包括：
//! - 错误日志记录
//! - 日志过滤和搜索
//! - 错误分析
//! - 诊断工具
//! - 性能分析

use nos_nos_error_handling::unified::KernelError;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use alloc::sync::Arc;
use spin::Mutex;

/// 日志级别
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// 跟踪级别
    Trace = 0,
    /// 调试级别
    Debug = 1,
    /// 信息级别
    Info = 2,
    /// 警告级别
    Warning = 3,
    /// 错误级别
    Error = 4,
    /// 致命错误级别
    Fatal = 5,
}

/// 日志条目
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// 日志ID
    pub id: u64,
    /// 时间戳
    pub timestamp: u64,
    /// 日志级别
    pub level: LogLevel,
    /// 模块名称
    pub module: String,
    /// 日志消息
    pub message: String,
    /// 错误代码（如果有）
    pub error_code: Option<String>,
    /// 进程ID
    pub pid: Option<u32>,
    /// 线程ID
    pub tid: Option<u32>,
    /// 源文件名
    pub file: Option<String>,
    /// 行号
    pub line: Option<u32>,
    /// 函数名
    pub function: Option<String>,
    /// 自定义字段
    pub fields: BTreeMap<String, String>,
}

/// 日志过滤器
#[derive(Debug, Clone)]
pub struct LogFilter {
    /// 最小日志级别
    pub min_level: Option<LogLevel>,
    /// 最大日志级别
    pub max_level: Option<LogLevel>,
    /// 模块过滤器
    pub modules: Vec<String>,
    /// 进程ID过滤器
    pub pids: Vec<u32>,
    /// 时间范围过滤器
    pub time_range: Option<(u64, u64)>,
    /// 消息内容过滤器
    pub message_pattern: Option<String>,
    /// 错误代码过滤器
    pub error_codes: Vec<String>,
    /// 自定义字段过滤器
    pub field_filters: BTreeMap<String, String>,
}

/// 日志统计
#[derive(Debug, Default, Clone)]
pub struct LogStatistics {
    /// 总日志条目数
    pub total_entries: u64,
    /// 按级别统计的日志数
    pub entries_by_level: BTreeMap<LogLevel, u64>,
    /// 按模块统计的日志数
    pub entries_by_module: BTreeMap<String, u64>,
    /// 按进程统计的日志数
    pub entries_by_pid: BTreeMap<u32, u64>,
    /// 错误日志数
    pub error_entries: u64,
    /// 警告日志数
    pub warning_entries: u64,
    /// 最早日志时间
    pub earliest_timestamp: Option<u64>,
    /// 最晚日志时间
    pub latest_timestamp: Option<u64>,
}

/// 诊断结果
#[derive(Debug, Clone)]
pub struct DiagnosticResult {
    /// 诊断ID
    pub id: String,
    /// 诊断名称
    pub name: String,
    /// 诊断描述
    pub description: String,
    /// 诊断时间
    pub timestamp: u64,
    /// 诊断状态
    pub status: DiagnosticStatus,
    /// 诊断详情
    pub details: BTreeMap<String, String>,
    /// 相关日志条目
    pub related_log_entries: Vec<u64>,
    /// 建议操作
    pub recommended_actions: Vec<String>,
}

/// 诊断状态
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticStatus {
    /// 正常
    Normal,
    /// 警告
    Warning,
    /// 错误
    Error,
    /// 严重错误
    Critical,
    /// 未知
    Unknown,
}

/// 性能指标
#[derive(Debug, Clone)]
pub struct PerformanceMetric {
    /// 指标名称
    pub name: String,
    /// 指标值
    pub value: f64,
    /// 单位
    pub unit: String,
    /// 时间戳
    pub timestamp: u64,
    /// 标签
    pub tags: BTreeMap<String, String>,
}

/// 错误日志管理器
pub struct ErrorLogManager {
    /// 日志条目
    log_entries: Arc<Mutex<Vec<LogEntry>>>,
    /// 下一个日志ID
    next_log_id: Arc<Mutex<u64>>,
    /// 日志统计
    statistics: Arc<Mutex<LogStatistics>>,
    /// 管理器配置
    config: ErrorLogManagerConfig,
    /// 诊断器列表
    diagnostics: Arc<Mutex<Vec<Box<dyn Diagnostic>>>>,
    /// 性能指标
    performance_metrics: Arc<Mutex<Vec<PerformanceMetric>>>,
}

/// 诊断器接口
pub trait Diagnostic {
    /// 执行诊断
    fn diagnose(&self, log_entries: &[LogEntry]) -> Vec<DiagnosticResult>;
    
    /// 获取诊断器名称
    fn get_name(&self) -> &str;
    
    /// 获取诊断器描述
    fn get_description(&self) -> &str;
}

/// 错误日志管理器配置
#[derive(Debug, Clone)]
pub struct ErrorLogManagerConfig {
    /// 最大日志条目数
    pub max_log_entries: usize,
    /// 默认日志级别
    pub default_log_level: LogLevel,
    /// 是否启用自动诊断
    pub enable_auto_diagnostics: bool,
    /// 诊断间隔（秒）
    pub diagnostic_interval_seconds: u64,
    /// 是否启用性能监控
    pub enable_performance_monitoring: bool,
    /// 性能指标保留时间（秒）
    pub performance_metrics_retention_seconds: u64,
    /// 日志保留时间（秒）
    pub log_retention_seconds: u64,
}

impl Default for ErrorLogManagerConfig {
    fn default() -> Self {
        Self {
            max_log_entries: 10000,
            default_log_level: LogLevel::Info,
            enable_auto_diagnostics: true,
            diagnostic_interval_seconds: 60, // 1分钟
            enable_performance_monitoring: true,
            performance_metrics_retention_seconds: 3600, // 1小时
            log_retention_seconds: 86400 * 7, // 7天
        }
    }
}

impl ErrorLogManager {
    /// 创建新的错误日志管理器
    pub fn new(config: ErrorLogManagerConfig) -> Self {
        let mut manager = Self {
            log_entries: Arc::new(Mutex::new(Vec::new())),
            next_log_id: Arc::new(Mutex::new(1)),
            statistics: Arc::new(Mutex::new(LogStatistics::default())),
            config,
            diagnostics: Arc::new(Mutex::new(Vec::new())),
            performance_metrics: Arc::new(Mutex::new(Vec::new())),
        };
        
        // 初始化默认诊断器
        manager.init_default_diagnostics();
        
        manager
    }
    
    /// 使用默认配置创建错误日志管理器
    pub fn with_default_config() -> Self {
        Self::new(ErrorLogManagerConfig::default())
    }
    
    /// 初始化默认诊断器
    fn init_default_diagnostics(&mut self) {
        // 内存泄漏诊断器
        self.register_diagnostic(Box::new(MemoryLeakDiagnostic::new()));
        
        // 死锁诊断器
        self.register_diagnostic(Box::new(DeadlockDiagnostic::new()));
        
        // 性能问题诊断器
        self.register_diagnostic(Box::new(PerformanceDiagnostic::new()));
        
        // 系统资源诊断器
        self.register_diagnostic(Box::new(ResourceDiagnostic::new()));
    }
    
    /// 记录日志
    pub fn log(
        &self,
        level: LogLevel,
        module: &str,
        message: &str,
        error_code: Option<&str>,
        pid: Option<u32>,
        tid: Option<u32>,
        file: Option<&str>,
        line: Option<u32>,
        function: Option<&str>,
        fields: BTreeMap<String, String>,
    ) {
        // 检查日志级别
        if level < self.config.default_log_level {
            return;
        }
        
        // 生成日志ID
        let log_id = {
            let mut next_id = self.next_log_id.lock();
            let id = *next_id;
            *next_id += 1;
            id
        };
        
        // 创建日志条目
        let entry = LogEntry {
            id: log_id,
            timestamp: self.get_current_time(),
            level,
            module: module.to_string(),
            message: message.to_string(),
            error_code: error_code.map(|s| s.to_string()),
            pid,
            tid,
            file: file.map(|s| s.to_string()),
            line,
            function: function.map(|s| s.to_string()),
            fields,
        };
        
        // 添加到日志列表
        {
            let mut entries = self.log_entries.lock();
            entries.push(entry.clone());
            
            // 如果超过最大条目数，移除最旧的条目
            if entries.len() > self.config.max_log_entries {
                entries.remove(0);
            }
        }
        
        // 更新统计
        self.update_statistics(&entry);
        
        // 如果是错误或致命错误，触发诊断
        if self.config.enable_auto_diagnostics && 
           (level == LogLevel::Error || level == LogLevel::Fatal) {
            self.trigger_diagnostics();
        }
    }
    
    /// 查询日志
    pub fn query_logs(&self, filter: &LogFilter) -> Vec<LogEntry> {
        let entries = self.log_entries.lock();
        
        entries.iter()
            .filter(|entry| self.matches_filter(entry, filter))
            .cloned()
            .collect()
    }
    
    /// 获取日志统计
    pub fn get_statistics(&self) -> LogStatistics {
        self.statistics.lock().clone()
    }
    
    /// 注册诊断器
    pub fn register_diagnostic(&self, diagnostic: Box<dyn Diagnostic>) {
        self.diagnostics.lock().push(diagnostic);
    }
    
    /// 执行诊断
    pub fn run_diagnostics(&self) -> Vec<DiagnosticResult> {
        let entries = self.log_entries.lock();
        let diagnostics = self.diagnostics.lock();
        
        let mut results = Vec::new();
        for diagnostic in diagnostics.iter() {
            let mut diagnostic_results = diagnostic.diagnose(&entries);
            results.append(&mut diagnostic_results);
        }
        
        results
    }
    
    /// 记录性能指标
    pub fn record_metric(&self, name: &str, value: f64, unit: &str, tags: BTreeMap<String, String>) {
        if !self.config.enable_performance_monitoring {
            return;
        }
        
        let metric = PerformanceMetric {
            name: name.to_string(),
            value,
            unit: unit.to_string(),
            timestamp: self.get_current_time(),
            tags,
        };
        
        let mut metrics = self.performance_metrics.lock();
        metrics.push(metric);
        
        // 清理旧的性能指标
        self.cleanup_old_metrics(&mut metrics);
    }
    
    /// 获取性能指标
    pub fn get_metrics(&self, name: Option<&str>, time_range: Option<(u64, u64)>) -> Vec<PerformanceMetric> {
        let metrics = self.performance_metrics.lock();
        
        metrics.iter()
            .filter(|metric| {
                // 按名称过滤
                if let Some(filter_name) = name {
                    if metric.name != filter_name {
                        return false;
                    }
                }
                
                // 按时间范围过滤
                if let Some((start, end)) = time_range {
                    if metric.timestamp < start || metric.timestamp > end {
                        return false;
                    }
                }
                
                true
            })
            .cloned()
            .collect()
    }
    
    /// 清理旧日志
    pub fn cleanup_old_logs(&self) {
        let current_time = self.get_current_time();
        let cutoff_time = current_time.saturating_sub(self.config.log_retention_seconds);
        
        let mut entries = self.log_entries.lock();
        entries.retain(|entry| entry.timestamp >= cutoff_time);
    }
    
    /// 检查日志条目是否匹配过滤器
    fn matches_filter(&self, entry: &LogEntry, filter: &LogFilter) -> bool {
        // 检查日志级别
        if let Some(min_level) = filter.min_level {
            if entry.level < min_level {
                return false;
            }
        }
        
        if let Some(max_level) = filter.max_level {
            if entry.level > max_level {
                return false;
            }
        }
        
        // 检查模块
        if !filter.modules.is_empty() && !filter.modules.contains(&entry.module) {
            return false;
        }
        
        // 检查进程ID
        if let Some(pid) = entry.pid {
            if !filter.pids.is_empty() && !filter.pids.contains(&pid) {
                return false;
            }
        }
        
        // 检查时间范围
        if let Some((start, end)) = filter.time_range {
            if entry.timestamp < start || entry.timestamp > end {
                return false;
            }
        }
        
        // 检查消息模式
        if let Some(pattern) = &filter.message_pattern {
            if !entry.message.contains(pattern) {
                return false;
            }
        }
        
        // 检查错误代码
        if let Some(error_code) = &entry.error_code {
            if !filter.error_codes.is_empty() && !filter.error_codes.contains(error_code) {
                return false;
            }
        }
        
        // 检查自定义字段
        for (field_name, field_value) in &filter.field_filters {
            if let Some(value) = entry.fields.get(field_name) {
                if value != field_value {
                    return false;
                }
            } else {
                return false;
            }
        }
        
        true
    }
    
    /// 更新统计
    fn update_statistics(&self, entry: &LogEntry) {
        let mut stats = self.statistics.lock();
        
        stats.total_entries += 1;
        
        // 按级别统计
        *stats.entries_by_level.entry(entry.level.clone()).or_insert(0) += 1;
        
        // 按模块统计
        *stats.entries_by_module.entry(entry.module.clone()).or_insert(0) += 1;
        
        // 按进程统计
        if let Some(pid) = entry.pid {
            *stats.entries_by_pid.entry(pid).or_insert(0) += 1;
        }
        
        // 错误和警告统计
        match entry.level {
            LogLevel::Error => stats.error_entries += 1,
            LogLevel::Warning => stats.warning_entries += 1,
            _ => {}
        }
        
        // 时间范围统计
        match (stats.earliest_timestamp, stats.latest_timestamp) {
            (None, None) => {
                stats.earliest_timestamp = Some(entry.timestamp);
                stats.latest_timestamp = Some(entry.timestamp);
            },
            (Some(earliest), Some(latest)) => {
                if entry.timestamp < earliest {
                    stats.earliest_timestamp = Some(entry.timestamp);
                }
                if entry.timestamp > latest {
                    stats.latest_timestamp = Some(entry.timestamp);
                }
            },
            _ => {}
        }
    }
    
    /// 触发诊断
    fn trigger_diagnostics(&self) {
        let results = self.run_diagnostics();
        
        // 记录诊断结果
        for result in results {
            self.log(
                LogLevel::Info,
                "diagnostic",
                &format!("Diagnostic '{}' completed with status: {:?}", result.name, result.status),
                None,
                None,
                None,
                None,
                None,
                None,
                {
                    let mut fields = BTreeMap::new();
                    fields.insert("diagnostic_id".to_string(), result.id.clone());
                    fields.insert("diagnostic_name".to_string(), result.name.clone());
                    fields.insert("diagnostic_status".to_string(), format!("{:?}", result.status));
                    fields
                },
            );
        }
    }
    
    /// 清理旧的性能指标
    fn cleanup_old_metrics(&self, metrics: &mut Vec<PerformanceMetric>) {
        let current_time = self.get_current_time();
        let cutoff_time = current_time.saturating_sub(self.config.performance_metrics_retention_seconds);
        
        metrics.retain(|metric| metric.timestamp >= cutoff_time);
    }
    
    /// 获取当前时间
    fn get_current_time(&self) -> u64 {
        // 这里应该实现真实的时间获取
        // 暂时返回固定值
        0
    }
}

/// 内存泄漏诊断器
pub struct MemoryLeakDiagnostic {
    name: String,
    description: String,
}

impl MemoryLeakDiagnostic {
    pub fn new() -> Self {
        Self {
            name: "Memory Leak Diagnostic".to_string(),
            description: "Detects potential memory leaks in the system".to_string(),
        }
    }
}

impl Diagnostic for MemoryLeakDiagnostic {
    fn diagnose(&self, log_entries: &[LogEntry]) -> Vec<DiagnosticResult> {
        // 这里应该实现真实的内存泄漏诊断逻辑
        // 暂时返回空结果
        Vec::new()
    }
    
    fn get_name(&self) -> &str {
        &self.name
    }
    
    fn get_description(&self) -> &str {
        &self.description
    }
}

/// 死锁诊断器
pub struct DeadlockDiagnostic {
    name: String,
    description: String,
}

impl DeadlockDiagnostic {
    pub fn new() -> Self {
        Self {
            name: "Deadlock Diagnostic".to_string(),
            description: "Detects potential deadlocks in the system".to_string(),
        }
    }
}

impl Diagnostic for DeadlockDiagnostic {
    fn diagnose(&self, log_entries: &[LogEntry]) -> Vec<DiagnosticResult> {
        // 这里应该实现真实的死锁诊断逻辑
        // 暂时返回空结果
        Vec::new()
    }
    
    fn get_name(&self) -> &str {
        &self.name
    }
    
    fn get_description(&self) -> &str {
        &self.description
    }
}

/// 性能问题诊断器
pub struct PerformanceDiagnostic {
    name: String,
    description: String,
}

impl PerformanceDiagnostic {
    pub fn new() -> Self {
        Self {
            name: "Performance Diagnostic".to_string(),
            description: "Detects performance issues in the system".to_string(),
        }
    }
}

impl Diagnostic for PerformanceDiagnostic {
    fn diagnose(&self, log_entries: &[LogEntry]) -> Vec<DiagnosticResult> {
        // 这里应该实现真实的性能问题诊断逻辑
        // 暂时返回空结果
        Vec::new()
    }
    
    fn get_name(&self) -> &str {
        &self.name
    }
    
    fn get_description(&self) -> &str {
        &self.description
    }
}

/// 系统资源诊断器
pub struct ResourceDiagnostic {
    name: String,
    description: String,
}

impl ResourceDiagnostic {
    pub fn new() -> Self {
        Self {
            name: "Resource Diagnostic".to_string(),
            description: "Detects resource exhaustion issues in the system".to_string(),
        }
    }
}

impl Diagnostic for ResourceDiagnostic {
    fn diagnose(&self, log_entries: &[LogEntry]) -> Vec<DiagnosticResult> {
        // 这里应该实现真实的系统资源诊断逻辑
        // 暂时返回空结果
        Vec::new()
    }
    
    fn get_name(&self) -> &str {
        &self.name
    }
    
    fn get_description(&self) -> &str {
        &self.description
    }
}