//! 故障检测和恢复模块
//! 
//! 本模块提供系统的故障检测和恢复功能，包括：
//! - 系统健康监控
//! - 故障检测
//! - 自动恢复
//! - 故障报告
//! - 故障历史记录

use nos_nos_error_handling::unified::KernelError;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use alloc::sync::Arc;
use spin::Mutex;

/// 故障严重程度
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FaultSeverity {
    /// 信息级别
    Info = 0,
    /// 警告级别
    Warning = 1,
    /// 错误级别
    Error = 2,
    /// 严重错误级别
    Critical = 3,
    /// 致命错误级别
    Fatal = 4,
}

/// 故障类型
#[derive(Debug, Clone, PartialEq)]
pub enum FaultType {
    /// 硬件故障
    Hardware,
    /// 软件故障
    Software,
    /// 网络故障
    Network,
    /// 存储故障
    Storage,
    /// 内存故障
    Memory,
    /// 进程故障
    Process,
    /// 系统调用故障
    Syscall,
    /// 驱动程序故障
    Driver,
    /// 文件系统故障
    FileSystem,
    /// 自定义故障
    Custom(String),
}

/// 故障状态
#[derive(Debug, Clone, PartialEq)]
pub enum FaultStatus {
    /// 新检测到的故障
    New,
    /// 正在处理中
    Processing,
    /// 已恢复
    Recovered,
    /// 已确认但无法恢复
    Confirmed,
    /// 已忽略
    Ignored,
}

/// 故障条目
#[derive(Debug, Clone)]
pub struct FaultEntry {
    /// 故障ID
    pub id: u64,
    /// 故障类型
    pub fault_type: FaultType,
    /// 故障严重程度
    pub severity: FaultSeverity,
    /// 故障状态
    pub status: FaultStatus,
    /// 故障描述
    pub description: String,
    /// 故障源
    pub source: String,
    /// 检测时间
    pub detection_time: u64,
    /// 最后更新时间
    pub last_update_time: u64,
    /// 恢复时间
    pub recovery_time: Option<u64>,
    /// 故障计数
    pub count: u32,
    /// 相关数据
    pub metadata: BTreeMap<String, String>,
}

/// 恢复策略
#[derive(Debug, Clone)]
pub struct RecoveryStrategy {
    /// 策略名称
    pub name: String,
    /// 策略描述
    pub description: String,
    /// 适用故障类型
    pub applicable_fault_types: Vec<FaultType>,
    /// 适用严重程度
    pub min_severity: FaultSeverity,
    /// 最大重试次数
    pub max_retries: u32,
    /// 重试间隔（毫秒）
    pub retry_interval: u64,
    /// 恢复操作
    pub recovery_actions: Vec<RecoveryAction>,
}

/// 恢复操作
#[derive(Debug, Clone)]
pub enum RecoveryAction {
    /// 重启服务
    RestartService(String),
    /// 重启进程
    RestartProcess(u32),
    /// 重新加载配置
    ReloadConfig(String),
    /// 释放资源
    FreeResource(String),
    /// 重新初始化组件
    ReinitializeComponent(String),
    /// 回滚到上一个检查点
    RollbackToCheckpoint(u64),
    /// 切换到备用系统
    SwitchToBackup(String),
    /// 发送通知
    SendNotification(String),
    /// 记录日志
    LogMessage(String),
    /// 自定义操作
    Custom(String, BTreeMap<String, String>),
}

/// 健康检查结果
#[derive(Debug, Clone)]
pub struct HealthCheckResult {
    /// 组件名称
    pub component_name: String,
    /// 是否健康
    pub is_healthy: bool,
    /// 健康分数（0-100）
    pub health_score: u8,
    /// 检查时间
    pub check_time: u64,
    /// 检查消息
    pub message: String,
    /// 相关指标
    pub metrics: BTreeMap<String, f64>,
}

/// 健康检查器
pub trait HealthChecker {
    /// 检查组件健康状态
    fn check_health(&self) -> HealthCheckResult;
    
    /// 获取组件名称
    fn get_component_name(&self) -> &str;
}

/// 故障检测器
pub trait FaultDetector {
    /// 检测故障
    fn detect_faults(&self) -> Vec<FaultEntry>;
    
    /// 获取检测器名称
    fn get_detector_name(&self) -> &str;
}

/// 故障恢复器
pub trait FaultRecoverer {
    /// 恢复故障
    fn recover_fault(&self, fault: &FaultEntry, strategy: &RecoveryStrategy) -> Result<(), KernelError>;
    
    /// 获取恢复器名称
    fn get_recoverer_name(&self) -> &str;
}

/// 故障管理器
pub struct FaultManager {
    /// 故障条目
    faults: Arc<Mutex<Vec<FaultEntry>>>,
    /// 恢复策略
    recovery_strategies: Arc<Mutex<Vec<RecoveryStrategy>>>,
    /// 健康检查器
    health_checkers: Arc<Mutex<Vec<Box<dyn HealthChecker>>>>,
    /// 故障检测器
    fault_detectors: Arc<Mutex<Vec<Box<dyn FaultDetector>>>>,
    /// 故障恢复器
    fault_recoverers: Arc<Mutex<Vec<Box<dyn FaultRecoverer>>>>,
    /// 故障统计
    fault_stats: Arc<Mutex<FaultStatistics>>,
    /// 管理器配置
    config: FaultManagerConfig,
    /// 下一个故障ID
    next_fault_id: Arc<Mutex<u64>>,
}

/// 故障统计
#[derive(Debug, Default, Clone)]
pub struct FaultStatistics {
    /// 总故障数
    pub total_faults: u64,
    /// 按类型统计的故障数
    pub faults_by_type: BTreeMap<FaultType, u64>,
    /// 按严重程度统计的故障数
    pub faults_by_severity: BTreeMap<FaultSeverity, u64>,
    /// 已恢复的故障数
    pub recovered_faults: u64,
    /// 未恢复的故障数
    pub unrecovered_faults: u64,
    /// 平均恢复时间（毫秒）
    pub avg_recovery_time_ms: u64,
    /// 最后故障时间
    pub last_fault_time: Option<u64>,
}

/// 故障管理器配置
#[derive(Debug, Clone)]
pub struct FaultManagerConfig {
    /// 是否启用自动恢复
    pub enable_auto_recovery: bool,
    /// 最大故障条目数
    pub max_fault_entries: usize,
    /// 健康检查间隔（毫秒）
    pub health_check_interval_ms: u64,
    /// 故障检测间隔（毫秒）
    pub fault_detection_interval_ms: u64,
    /// 故障恢复超时（毫秒）
    pub recovery_timeout_ms: u64,
    /// 是否启用故障统计
    pub enable_fault_statistics: bool,
}

impl Default for FaultManagerConfig {
    fn default() -> Self {
        Self {
            enable_auto_recovery: true,
            max_fault_entries: 10000,
            health_check_interval_ms: 5000, // 5秒
            fault_detection_interval_ms: 1000, // 1秒
            recovery_timeout_ms: 30000, // 30秒
            enable_fault_statistics: true,
        }
    }
}

impl FaultManager {
    /// 创建新的故障管理器
    pub fn new(config: FaultManagerConfig) -> Self {
        let mut manager = Self {
            faults: Arc::new(Mutex::new(Vec::new())),
            recovery_strategies: Arc::new(Mutex::new(Vec::new())),
            health_checkers: Arc::new(Mutex::new(Vec::new())),
            fault_detectors: Arc::new(Mutex::new(Vec::new())),
            fault_recoverers: Arc::new(Mutex::new(Vec::new())),
            fault_stats: Arc::new(Mutex::new(FaultStatistics::default())),
            config,
            next_fault_id: Arc::new(Mutex::new(1)),
        };
        
        // 初始化默认恢复策略
        manager.init_default_recovery_strategies();
        
        manager
    }
    
    /// 使用默认配置创建故障管理器
    pub fn with_default_config() -> Self {
        Self::new(FaultManagerConfig::default())
    }
    
    /// 初始化默认恢复策略
    fn init_default_recovery_strategies(&mut self) {
        // 进程故障恢复策略
        let process_recovery = RecoveryStrategy {
            name: "Process Recovery".to_string(),
            description: "Recover from process faults by restarting the process".to_string(),
            applicable_fault_types: vec![FaultType::Process],
            min_severity: FaultSeverity::Error,
            max_retries: 3,
            retry_interval: 1000,
            recovery_actions: vec![
                RecoveryAction::LogMessage("Attempting to restart process".to_string()),
                RecoveryAction::RestartProcess(0), // Will be replaced with actual PID
                RecoveryAction::SendNotification("Process restarted".to_string()),
            ],
        };
        
        // 内存故障恢复策略
        let memory_recovery = RecoveryStrategy {
            name: "Memory Recovery".to_string(),
            description: "Recover from memory faults by freeing resources".to_string(),
            applicable_fault_types: vec![FaultType::Memory],
            min_severity: FaultSeverity::Warning,
            max_retries: 2,
            retry_interval: 500,
            recovery_actions: vec![
                RecoveryAction::LogMessage("Attempting to free memory resources".to_string()),
                RecoveryAction::FreeResource("memory".to_string()),
                RecoveryAction::ReinitializeComponent("memory_manager".to_string()),
            ],
        };
        
        // 系统调用故障恢复策略
        let syscall_recovery = RecoveryStrategy {
            name: "Syscall Recovery".to_string(),
            description: "Recover from syscall faults by reinitializing syscall dispatcher".to_string(),
            applicable_fault_types: vec![FaultType::Syscall],
            min_severity: FaultSeverity::Error,
            max_retries: 1,
            retry_interval: 2000,
            recovery_actions: vec![
                RecoveryAction::LogMessage("Attempting to reinitialize syscall dispatcher".to_string()),
                RecoveryAction::ReinitializeComponent("syscall_dispatcher".to_string()),
            ],
        };
        
        // 添加到策略列表
        let mut strategies = self.recovery_strategies.lock();
        strategies.push(process_recovery);
        strategies.push(memory_recovery);
        strategies.push(syscall_recovery);
    }
    
    /// 注册健康检查器
    pub fn register_health_checker(&self, checker: Box<dyn HealthChecker>) {
        self.health_checkers.lock().push(checker);
    }
    
    /// 注册故障检测器
    pub fn register_fault_detector(&self, detector: Box<dyn FaultDetector>) {
        self.fault_detectors.lock().push(detector);
    }
    
    /// 注册故障恢复器
    pub fn register_fault_recoverer(&self, recoverer: Box<dyn FaultRecoverer>) {
        self.fault_recoverers.lock().push(recoverer);
    }
    
    /// 添加恢复策略
    pub fn add_recovery_strategy(&self, strategy: RecoveryStrategy) {
        self.recovery_strategies.lock().push(strategy);
    }
    
    /// 报告故障
    pub fn report_fault(&self, fault_type: FaultType, severity: FaultSeverity, 
                      description: String, source: String, 
                      metadata: BTreeMap<String, String>) -> u64 {
        let fault_id = {
            let mut next_id = self.next_fault_id.lock();
            let id = *next_id;
            *next_id += 1;
            id
        };
        
        let current_time = self.get_current_time();
        
        let fault = FaultEntry {
            id: fault_id,
            fault_type,
            severity,
            status: FaultStatus::New,
            description,
            source,
            detection_time: current_time,
            last_update_time: current_time,
            recovery_time: None,
            count: 1,
            metadata,
        };
        
        // 添加到故障列表
        {
            let mut faults = self.faults.lock();
            faults.push(fault.clone());
            
            // 如果超过最大条目数，移除最旧的条目
            if faults.len() > self.config.max_fault_entries {
                faults.remove(0);
            }
        }
        
        // 更新统计
        if self.config.enable_fault_statistics {
            self.update_fault_statistics(&fault);
        }
        
        // 如果启用自动恢复，尝试恢复
        if self.config.enable_auto_recovery {
            self.attempt_fault_recovery(&fault);
        }
        
        fault_id
    }
    
    /// 更新故障状态
    pub fn update_fault_status(&self, fault_id: u64, status: FaultStatus) -> Result<(), KernelError> {
        let mut faults = self.faults.lock();
        
        for fault in faults.iter_mut() {
            if fault.id == fault_id {
                fault.status = status.clone();
                fault.last_update_time = self.get_current_time();
                
                if status == FaultStatus::Recovered {
                    fault.recovery_time = Some(self.get_current_time());
                    
                    // 更新统计
                    if self.config.enable_fault_statistics {
                        let mut stats = self.fault_stats.lock();
                        stats.recovered_faults += 1;
                        stats.unrecovered_faults = stats.unrecovered_faults.saturating_sub(1);
                        
                        // 计算恢复时间
                        if let Some(recovery_time) = fault.recovery_time {
                            let recovery_duration = recovery_time.saturating_sub(fault.detection_time);
                            let total_recovered = stats.recovered_faults;
                            stats.avg_recovery_time_ms = 
                                (stats.avg_recovery_time_ms * (total_recovered - 1) + recovery_duration) / total_recovered;
                        }
                    }
                }
                
                return Ok(());
            }
        }
        
        Err(KernelError::NotFound)
    }
    
    /// 获取所有故障
    pub fn get_all_faults(&self) -> Vec<FaultEntry> {
        self.faults.lock().clone()
    }
    
    /// 获取指定状态的故障
    pub fn get_faults_by_status(&self, status: FaultStatus) -> Vec<FaultEntry> {
        let faults = self.faults.lock();
        faults.iter()
            .filter(|fault| fault.status == status)
            .cloned()
            .collect()
    }
    
    /// 获取指定类型的故障
    pub fn get_faults_by_type(&self, fault_type: FaultType) -> Vec<FaultEntry> {
        let faults = self.faults.lock();
        faults.iter()
            .filter(|fault| fault.fault_type == fault_type)
            .cloned()
            .collect()
    }
    
    /// 获取故障统计
    pub fn get_fault_statistics(&self) -> FaultStatistics {
        self.fault_stats.lock().clone()
    }
    
    /// 执行健康检查
    pub fn perform_health_checks(&self) -> Vec<HealthCheckResult> {
        let checkers = self.health_checkers.lock();
        let mut results = Vec::new();
        
        for checker in checkers.iter() {
            results.push(checker.check_health());
        }
        
        results
    }
    
    /// 执行故障检测
    pub fn perform_fault_detection(&self) -> Vec<FaultEntry> {
        let detectors = self.fault_detectors.lock();
        let mut detected_faults = Vec::new();
        
        for detector in detectors.iter() {
            let mut faults = detector.detect_faults();
            detected_faults.append(&mut faults);
        }
        
        // 报告检测到的故障
        for fault in detected_faults {
            self.report_fault(
                fault.fault_type,
                fault.severity,
                fault.description,
                fault.source,
                fault.metadata,
            );
        }
        
        detected_faults
    }
    
    /// 尝试故障恢复
    fn attempt_fault_recovery(&self, fault: &FaultEntry) {
        // 查找适用的恢复策略
        let strategies = self.recovery_strategies.lock();
        for strategy in strategies.iter() {
            if strategy.applicable_fault_types.contains(&fault.fault_type) &&
               fault.severity >= strategy.min_severity {
                
                // 更新故障状态为处理中
                let _ = self.update_fault_status(fault.id, FaultStatus::Processing);
                
                // 尝试恢复
                let recoverers = self.fault_recoverers.lock();
                for recoverer in recoverers.iter() {
                    if let Err(e) = recoverer.recover_fault(fault, strategy) {
                        // 恢复失败，记录错误
                        let _ = self.report_fault(
                            FaultType::Software,
                            FaultSeverity::Error,
                            format!("Failed to recover fault {}: {}", fault.id, e),
                            "fault_manager".to_string(),
                            BTreeMap::new(),
                        );
                    } else {
                        // 恢复成功，更新状态
                        let _ = self.update_fault_status(fault.id, FaultStatus::Recovered);
                        break;
                    }
                }
                
                break;
            }
        }
    }
    
    /// 更新故障统计
    fn update_fault_statistics(&self, fault: &FaultEntry) {
        let mut stats = self.fault_stats.lock();
        
        stats.total_faults += 1;
        stats.last_fault_time = Some(fault.detection_time);
        
        // 按类型统计
        *stats.faults_by_type.entry(fault.fault_type.clone()).or_insert(0) += 1;
        
        // 按严重程度统计
        *stats.faults_by_severity.entry(fault.severity).or_insert(0) += 1;
        
        // 未恢复故障数
        stats.unrecovered_faults += 1;
    }
    
    /// 获取当前时间
    fn get_current_time(&self) -> u64 {
        // 这里应该实现真实的时间获取
        // 暂时返回固定值
        0
    }
}

/// 默认进程健康检查器
pub struct ProcessHealthChecker {
    component_name: String,
}

impl ProcessHealthChecker {
    pub fn new(name: &str) -> Self {
        Self {
            component_name: name.to_string(),
        }
    }
}

impl HealthChecker for ProcessHealthChecker {
    fn check_health(&self) -> HealthCheckResult {
        // 这里应该实现真实的健康检查逻辑
        // 暂时返回模拟结果
        HealthCheckResult {
            component_name: self.component_name.clone(),
            is_healthy: true,
            health_score: 95,
            check_time: 0, // 应该使用真实时间
            message: "Process is running normally".to_string(),
            metrics: {
                let mut metrics = BTreeMap::new();
                metrics.insert("cpu_usage".to_string(), 25.5);
                metrics.insert("memory_usage".to_string(), 40.2);
                metrics
            },
        }
    }
    
    fn get_component_name(&self) -> &str {
        &self.component_name
    }
}

/// 默认内存故障检测器
pub struct MemoryFaultDetector {
    detector_name: String,
}

impl MemoryFaultDetector {
    pub fn new(name: &str) -> Self {
        Self {
            detector_name: name.to_string(),
        }
    }
}

impl FaultDetector for MemoryFaultDetector {
    fn detect_faults(&self) -> Vec<FaultEntry> {
        // 这里应该实现真实的故障检测逻辑
        // 暂时返回空列表
        Vec::new()
    }
    
    fn get_detector_name(&self) -> &str {
        &self.detector_name
    }
}

/// 默认故障恢复器
pub struct DefaultFaultRecoverer {
    recoverer_name: String,
}

impl DefaultFaultRecoverer {
    pub fn new(name: &str) -> Self {
        Self {
            recoverer_name: name.to_string(),
        }
    }
}

impl FaultRecoverer for DefaultFaultRecoverer {
    fn recover_fault(&self, fault: &FaultEntry, strategy: &RecoveryStrategy) -> Result<(), KernelError> {
        // 这里应该实现真实的故障恢复逻辑
        // 暂时总是返回成功
        for action in &strategy.recovery_actions {
            match action {
                RecoveryAction::LogMessage(msg) => {
                    // 记录日志
                    println!("Recovery log: {}", msg);
                },
                RecoveryAction::SendNotification(msg) => {
                    // 发送通知
                    println!("Recovery notification: {}", msg);
                },
                _ => {
                    // 其他恢复操作
                    println!("Executing recovery action for fault {}: {:?}", fault.id, action);
                }
            }
        }
        
        Ok(())
    }
    
    fn get_recoverer_name(&self) -> &str {
        &self.recoverer_name
    }
}