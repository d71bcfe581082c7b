// Recovery Manager Module
//
// 恢复管理器模块
// 管理错误恢复策略和执行恢复动作

extern crate alloc;
extern crate hashbrown;
use alloc::collections::BTreeMap;
use crate::sync::{SpinLock, Mutex};
use hashbrown::HashMap;
use crate::time::SystemTime;
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::string::ToString;
use alloc::{format, vec};
use alloc::boxed::Box;
use core::sync::atomic::{AtomicU64, Ordering};

use super::*;
use super::unified::{KernelError, KernelResult};

/// 恢复管理器
pub struct RecoveryManager {
    /// 管理器ID
    pub id: u64,
    /// 恢复策略映射
    recovery_strategies: HashMap<String, RecoveryStrategy, crate::compat::DefaultHasherBuilder>,
    /// 恢复动作工厂
    action_factory: RecoveryActionFactory,
    /// 恢复历史
    recovery_history: Vec<RecoveryExecution>,
    /// 恢复统计
    stats: RecoveryStats,
    /// 恢复配置
    config: RecoveryConfig,
}

/// 恢复策略配置
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// 最大重试次数
    pub max_retries: u32,
    /// 重试间隔（毫秒）
    pub retry_interval_ms: u64,
    /// 指数退避因子
    pub backoff_factor: f64,
    /// 最大退避时间（毫秒）
    pub max_backoff_ms: u64,
    /// 恢复超时（毫秒）
    pub recovery_timeout_ms: u64,
    /// 启用并行恢复
    pub enable_parallel_recovery: bool,
    /// 恢复优先级队列
    pub enable_priority_queue: bool,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_interval_ms: 1000,
            backoff_factor: 2.0,
            max_backoff_ms: 60000, // 1分钟
            recovery_timeout_ms: 300000, // 5分钟
            enable_parallel_recovery: false,
            enable_priority_queue: true,
        }
    }
}

/// 恢复动作工厂
pub struct RecoveryActionFactory {
    /// 动作类型映射
    action_types: HashMap<String, Box<dyn RecoveryActionCreator>, crate::compat::DefaultHasherBuilder>,
}

/// 恢复动作创建器特征
pub trait RecoveryActionCreator: Send {
    /// 创建恢复动作
    fn create_action(&self, parameters: &HashMap<String, String, crate::compat::DefaultHasherBuilder>) -> Result<Box<dyn RecoveryAction>, &'static str>;
}

/// 恢复动作特征
pub trait RecoveryAction {
    /// 执行恢复动作
    fn execute(&mut self, error_record: &ErrorRecord) -> Result<RecoveryResult, &'static str>;
    /// 取消恢复动作
    fn cancel(&mut self) -> Result<(), &'static str>;
    /// 获取动作状态
    fn get_status(&self) -> RecoveryActionStatus;
    /// 获取动作结果
    fn get_result(&self) -> Option<&RecoveryResult>;
}

/// 恢复动作状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryActionStatus {
    /// 未开始
    NotStarted,
    /// 进行中
    InProgress,
    /// 已完成
    Completed,
    /// 已失败
    Failed,
    /// 已取消
    Cancelled,
    /// 超时
    Timeout,
}

/// 恢复结果
#[derive(Debug, Clone)]
pub struct RecoveryResult {
    /// 结果ID
    pub id: u64,
    /// 恢复动作ID
    pub action_id: u64,
    /// 恢复状态
    pub status: RecoveryStatus,
    /// 执行时间（毫秒）
    pub execution_time_ms: u64,
    /// 结果消息
    pub message: String,
    /// 错误信息（如果失败）
    pub error: Option<String>,
    /// 恢复的副作用
    pub side_effects: Vec<String>,
    /// 相关资源
    pub affected_resources: Vec<String>,
    /// 性能影响
    pub performance_impact: PerformanceImpact,
}

/// 恢复状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStatus {
    /// 成功
    Success,
    /// 部分成功
    Partial,
    /// 失败
    Failed,
    /// 超时
    Timeout,
}

/// 性能影响
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceImpact {
    /// 无影响
    None,
    /// 轻微影响
    Minimal,
    /// 中等影响
    Medium,
    /// 严重影响
    Severe,
    /// 致命影响
    Critical,
}

/// 恢复执行记录
#[derive(Debug, Clone)]
pub struct RecoveryExecution {
    /// 执行ID
    pub id: u64,
    /// 错误记录ID
    pub error_id: u64,
    /// 恢复策略
    pub strategy: RecoveryStrategy,
    /// 执行的动作
    pub actions: Vec<RecoveryActionExecution>,
    /// 开始时间
    pub start_time: u64,
    /// 结束时间
    pub end_time: Option<u64>,
    /// 执行状态
    pub status: RecoveryExecutionStatus,
    /// 总体结果
    pub overall_result: Option<RecoveryResult>,
}

/// 恢复动作执行记录
#[derive(Debug)]
pub struct RecoveryActionExecution {
    /// 执行ID
    pub id: u64,
    /// 动作类型
    pub action_type: RecoveryActionType,
    /// 动作参数
    pub parameters: HashMap<String, String, crate::compat::DefaultHasherBuilder>,
    /// 开始时间
    pub start_time: u64,
    /// 结束时间
    pub end_time: Option<u64>,
    /// 执行状态
    pub status: RecoveryActionStatus,
    /// 执行结果
    pub result: Option<RecoveryResult>,
}

impl Clone for RecoveryActionExecution {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            action_type: self.action_type,
            parameters: {
                let mut map = HashMap::with_hasher(crate::compat::DefaultHasherBuilder);
                for (k, v) in &self.parameters {
                    map.insert(k.clone(), v.clone());
                }
                map
            },
            start_time: self.start_time,
            end_time: self.end_time,
            status: self.status,
            result: self.result.clone(),
        }
    }
}

/// 恢复执行状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryExecutionStatus {
    /// 进行中
    InProgress,
    /// 已完成
    Completed,
    /// 已失败
    Failed,
    /// 已取消
    Cancelled,
}

/// 恢复统计
#[derive(Debug, Clone, Default)]
pub struct RecoveryStats {
    /// 总恢复次数
    pub total_recoveries: u64,
    /// 成功恢复次数
    pub successful_recoveries: u64,
    /// 失败恢复次数
    pub failed_recoveries: u64,
    /// 平均恢复时间（毫秒）
    pub avg_recovery_time_ms: u64,
    /// 恢复成功率
    pub success_rate: f64,
    /// 按策略统计
    pub recoveries_by_strategy: HashMap<RecoveryStrategy, u64, crate::compat::DefaultHasherBuilder>,
    /// 按动作类型统计
    pub recoveries_by_action_type: HashMap<RecoveryActionType, u64, crate::compat::DefaultHasherBuilder>,
    /// 重试统计
    pub retry_statistics: RetryStatistics,
}

/// 重试统计
#[derive(Debug, Clone, Default)]
pub struct RetryStatistics {
    /// 总重试次数
    pub total_retries: u64,
    /// 平均重试次数
    pub avg_retries: f64,
    /// 最大重试次数
    pub max_retries: u32,
    /// 重试成功率
    pub retry_success_rate: f64,
}

impl RecoveryManager {
    /// 创建新的恢复管理器
    pub fn new() -> Self {
        Self {
            id: 1,
            recovery_strategies: HashMap::with_hasher(crate::compat::DefaultHasherBuilder),
            action_factory: RecoveryActionFactory::new(),
            recovery_history: Vec::new(),
            stats: RecoveryStats::default(),
            config: RecoveryConfig::default(),
        }
    }

    /// 初始化恢复管理器
    pub fn init(&mut self) -> Result<(), &'static str> {
        // 初始化恢复策略（简化为默认策略集合）
        // self.init_recovery_strategies()?;

        // 初始化恢复动作工厂
        self.action_factory.init()?;

        crate::println!("[RecoveryManager] Recovery manager initialized successfully");
        Ok(())
    }

    /// 执行恢复动作
    pub fn execute_recovery_action(&mut self, action: &RecoveryActionExecution) -> Result<RecoveryResult, &'static str> {
        let start_time = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default().as_millis() as u64;

        // 创建恢复动作实例
        let mut action_instance = self.action_factory.create_action(&action.parameters.clone())?;

        // 检查动作状态
        if action_instance.get_status() != RecoveryActionStatus::NotStarted {
            return Err("Action already started or completed");
        }

        // 设置错误记录引用
        self.set_error_record_reference(&mut action_instance, action);

        // 执行恢复动作
        // Create a minimal ErrorRecord for execution
        use super::{ErrorType, ErrorStatus, SystemStateSnapshot};
        let error_record = ErrorRecord {
            id: 0,
            code: 0,
            error_type: ErrorType::RuntimeError,
            category: ErrorCategory::System,
            severity: ErrorSeverity::Error,
            status: ErrorStatus::Active,
            message: String::new(),
            description: String::new(),
            source: ErrorSource {
                module: String::new(),
                function: String::new(),
                file: String::new(),
                line: 0,
                column: 0,
                process_id: 0,
                thread_id: 0,
                cpu_id: 0,
            },
            timestamp: crate::time::get_timestamp(),
            context: ErrorContext {
                environment_variables: BTreeMap::new(),
                system_config: BTreeMap::new(),
                user_input: None,
                related_data: Vec::new(),
                operation_sequence: Vec::new(),
                preconditions: Vec::new(),
                postconditions: Vec::new(),
            },
            metadata: BTreeMap::new(),
            stack_trace: Vec::new(),
            system_state: SystemStateSnapshot::default(),
            recovery_actions: Vec::new(),
            occurrence_count: 1,
            last_occurrence: crate::time::get_timestamp(),
            resolved: false,
            resolution_time: None,
            resolution_method: None,
        };
        let result = action_instance.execute(&error_record);

        let end_time = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default().as_millis() as u64;

        // 创建恢复结果
        let recovery_result = RecoveryResult {
            id: self.generate_recovery_id(),
            action_id: action.id,
            status: if result.is_ok() { RecoveryStatus::Success } else { RecoveryStatus::Failed },
            execution_time_ms: end_time - start_time,
            message: if result.is_ok() { "Recovery completed successfully".to_string() } else { "Recovery failed".to_string() },
            error: if let Err(e) = result { Some(e.to_string()) } else { None },
            side_effects: Vec::new(),
            affected_resources: Vec::new(),
            performance_impact: PerformanceImpact::Minimal,
        };

        // 更新统计信息
        self.update_recovery_stats(&recovery_result);

        Ok(recovery_result)
    }

    /// 应用恢复策略
    pub fn apply_recovery_strategy(&mut self, strategy: &RecoveryStrategy, error_record: &ErrorRecord) -> Result<(), &'static str> {
        match strategy {
            RecoveryStrategy::Retry => {
                self.execute_retry_strategy(error_record)
            }
            RecoveryStrategy::Degrade => {
                self.execute_degrade_strategy(error_record)
            }
            RecoveryStrategy::Restart => {
                self.execute_restart_strategy(error_record)
            }
            RecoveryStrategy::Failover => {
                self.execute_failover_strategy(error_record)
            }
            RecoveryStrategy::Isolate => {
                self.execute_isolate_strategy(error_record)
            }
            RecoveryStrategy::Manual => {
                self.execute_manual_strategy(error_record)
            }
            RecoveryStrategy::Ignore => {
                self.execute_ignore_strategy(error_record)
            }
            RecoveryStrategy::Release => {
                self.execute_release_strategy(error_record)
            }
            RecoveryStrategy::None => {
                Ok(())
            }
        }
    }

    /// 执行重试策略
    fn execute_retry_strategy(&mut self, error_record: &ErrorRecord) -> Result<(), &'static str> {
        let mut attempt_count = 0;
        let mut retry_delay = self.config.retry_interval_ms;

        while attempt_count < self.config.max_retries {
            attempt_count += 1;

            // 等待重试延迟
            if attempt_count > 1 {
                // 指数退避
                retry_delay = (retry_delay as f64 * self.config.backoff_factor) as u64;
                retry_delay = retry_delay.min(self.config.max_backoff_ms);

                // 简单延迟实现（在实际系统中会更复杂）
                for _ in 0..(retry_delay / 1000) {
                    // 等待1秒
                    continue;
                }
            }

            // 尝试重试（这里简化实现）
            let retry_result = self.perform_retry(error_record, attempt_count);

            if retry_result {
                break;
            }
        }

        if attempt_count >= self.config.max_retries {
            return Err("Maximum retries exceeded");
        }

        Ok(())
    }

    /// 执行降级策略
    fn execute_degrade_strategy(&mut self, error_record: &ErrorRecord) -> Result<(), &'static str> {
        // 简化的降级策略实现
        crate::println!("Executing degrade strategy for error: {}", error_record.message);
        Ok(())
    }

    /// 执行重启策略
    fn execute_restart_strategy(&mut self, error_record: &ErrorRecord) -> Result<(), &'static str> {
        // 简化的重启策略实现
        crate::println!("Executing restart strategy for error: {}", error_record.message);
        Ok(())
    }

    /// 执行故障转移策略
    fn execute_failover_strategy(&mut self, error_record: &ErrorRecord) -> Result<(), &'static str> {
        // 简化的故障转移策略实现
        crate::println!("Executing failover strategy for error: {}", error_record.message);
        Ok(())
    }

    /// 执行隔离策略
    fn execute_isolate_strategy(&mut self, error_record: &ErrorRecord) -> Result<(), &'static str> {
        // 简化的隔离策略实现
        crate::println!("Executing isolation strategy for error: {}", error_record.message);
        Ok(())
    }

    /// 执行手动策略
    fn execute_manual_strategy(&mut self, error_record: &ErrorRecord) -> Result<(), &'static str> {
        // 简化的手动策略实现
        crate::println!("Manual intervention required for error: {}", error_record.message);
        Ok(())
    }

    /// 执行忽略策略
    fn execute_ignore_strategy(&mut self, error_record: &ErrorRecord) -> Result<(), &'static str> {
        // 简化的忽略策略实现
        crate::println!("Ignoring error: {}", error_record.message);
        Ok(())
    }

    /// 执行释放策略
    fn execute_release_strategy(&mut self, error_record: &ErrorRecord) -> Result<(), &'static str> {
        // 简化的资源释放策略实现
        crate::println!("Executing resource release strategy for error: {}", error_record.message);
        Ok(())
    }

    /// 执行重试
    fn perform_retry(&self, error_record: &ErrorRecord, attempt: u32) -> bool {
        // 简化的重试实现
        // 在实际实现中会根据错误类型和上下文决定是否重试
        let retryable = matches!(error_record.error_type,
            ErrorType::NetworkError | ErrorType::IOError | ErrorType::TimeoutError
        );

        if retryable && attempt <= 3 {
            // 模拟重试成功
            true
        } else {
            false
        }
    }

    /// 设置错误记录引用
    fn set_error_record_reference(&self, _action_instance: &mut Box<dyn RecoveryAction>, _action: &RecoveryActionExecution) {
        // 在实际实现中，这会设置错误记录的引用
    }

    /// 生成恢复ID
    fn generate_recovery_id(&self) -> u64 {
        static RECOVERY_ID_COUNTER: AtomicU64 = AtomicU64::new(1);
        RECOVERY_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    /// 更新恢复统计
    fn update_recovery_stats(&mut self, result: &RecoveryResult) {
        let stats = &mut self.stats;
        stats.total_recoveries += 1;

        if result.status == RecoveryStatus::Success {
            stats.successful_recoveries += 1;
        } else {
            stats.failed_recoveries += 1;
        }

        stats.avg_recovery_time_ms = (stats.avg_recovery_time_ms + result.execution_time_ms) / 2;

        if stats.total_recoveries > 0 {
            stats.success_rate = stats.successful_recoveries as f64 / stats.total_recoveries as f64;
        }
    }

    /// 获取恢复统计
    pub fn get_statistics(&self) -> RecoveryStats {
        self.stats.clone()
    }

    /// 重置统计信息
    pub fn reset_statistics(&mut self) {
        self.stats = RecoveryStats::default();
    }

    /// 添加恢复策略
    pub fn add_recovery_strategy(&mut self, name: String, strategy: RecoveryStrategy) {
        self.recovery_strategies.insert(name, strategy);
    }

    /// 获取恢复策略
    pub fn get_recovery_strategy(&self, name: &str) -> Option<&RecoveryStrategy> {
        self.recovery_strategies.get(name)
    }

    /// 获取所有恢复策略
    pub fn get_all_recovery_strategies(&self) -> Vec<&RecoveryStrategy> {
        self.recovery_strategies.values().collect()
    }

    /// 停止恢复管理器
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        // 清理所有数据
        self.recovery_strategies.clear();
        self.recovery_history.clear();
        self.stats = RecoveryStats::default();

        crate::println!("[RecoveryManager] Recovery manager shutdown successfully");
        Ok(())
    }
}

impl RecoveryActionFactory {
    /// 创建新的恢复动作工厂
    pub fn new() -> Self {
        Self {
            action_types: HashMap::with_hasher(crate::compat::DefaultHasherBuilder),
        }
    }

    /// 初始化恢复动作工厂
    pub fn init(&mut self) -> Result<(), &'static str> {
        // 注册各种恢复动作创建器
        self.action_types.insert("retry".to_string(), Box::new(RetryActionCreator));
        self.action_types.insert("restart".to_string(), Box::new(RestartActionCreator));
        self.action_types.insert("degrade".to_string(), Box::new(DegradeActionCreator));
        self.action_types.insert("failover".to_string(), Box::new(FailoverActionCreator));
        self.action_types.insert("isolate".to_string(), Box::new(IsolateActionCreator));
        self.action_types.insert("notify".to_string(), Box::new(NotifyActionCreator));

        crate::println!("[RecoveryActionFactory] Recovery action factory initialized successfully");
        Ok(())
    }

    /// 创建恢复动作
    pub fn create_action(&self, parameters: &HashMap<String, String, crate::compat::DefaultHasherBuilder>) -> Result<Box<dyn RecoveryAction>, &'static str> {
        let action_type = parameters.get("action_type").ok_or("unknown")?;

        if let Some(creator) = self.action_types.get(action_type) {
            creator.create_action(parameters)
        } else {
            Err("Unknown action type")
        }
    }
}

// 恢复动作创建器实现
struct RetryActionCreator;
impl RecoveryActionCreator for RetryActionCreator {
    fn create_action(&self, _parameters: &HashMap<String, String, crate::compat::DefaultHasherBuilder>) -> Result<Box<dyn RecoveryAction>, &'static str> {
        Ok(Box::new(RetryAction::new()))
    }
}

struct RestartActionCreator;
impl RecoveryActionCreator for RestartActionCreator {
    fn create_action(&self, _parameters: &HashMap<String, String, crate::compat::DefaultHasherBuilder>) -> Result<Box<dyn RecoveryAction>, &'static str> {
        Ok(Box::new(RestartAction::new()))
    }
}

struct DegradeActionCreator;
impl RecoveryActionCreator for DegradeActionCreator {
    fn create_action(&self, _parameters: &HashMap<String, String, crate::compat::DefaultHasherBuilder>) -> Result<Box<dyn RecoveryAction>, &'static str> {
        Ok(Box::new(DegradeAction::new()))
    }
}

struct FailoverActionCreator;
impl RecoveryActionCreator for FailoverActionCreator {
    fn create_action(&self, _parameters: &HashMap<String, String, crate::compat::DefaultHasherBuilder>) -> Result<Box<dyn RecoveryAction>, &'static str> {
        Ok(Box::new(FailoverAction::new()))
    }
}

struct IsolateActionCreator;
impl RecoveryActionCreator for IsolateActionCreator {
    fn create_action(&self, _parameters: &HashMap<String, String, crate::compat::DefaultHasherBuilder>) -> Result<Box<dyn RecoveryAction>, &'static str> {
        Ok(Box::new(IsolateAction::new()))
    }
}

struct NotifyActionCreator;
impl RecoveryActionCreator for NotifyActionCreator {
    fn create_action(&self, _parameters: &HashMap<String, String, crate::compat::DefaultHasherBuilder>) -> Result<Box<dyn RecoveryAction>, &'static str> {
        Ok(Box::new(NotifyAction::new()))
    }
}

// 具体的恢复动作实现
struct RetryAction {
    id: u64,
    status: RecoveryActionStatus,
    result: Option<RecoveryResult>,
}

impl RetryAction {
    fn new() -> Self {
        Self {
            id: 0,
            status: RecoveryActionStatus::NotStarted,
            result: None,
        }
    }
}

impl RecoveryAction for RetryAction {
    fn execute(&mut self, _error_record: &ErrorRecord) -> Result<RecoveryResult, &'static str> {
        self.status = RecoveryActionStatus::InProgress;

        // 模拟重试执行
        let result = RecoveryResult {
            id: self.id,
            action_id: self.id,
            status: RecoveryStatus::Success,
            execution_time_ms: 500,
            message: "Retry completed successfully".to_string(),
            error: None,
            side_effects: vec!["Increased retry counter".to_string()],
            affected_resources: vec![],
            performance_impact: PerformanceImpact::Minimal,
        };

        self.status = RecoveryActionStatus::Completed;
        self.result = Some(result.clone());

        Ok(result)
    }

    fn cancel(&mut self) -> Result<(), &'static str> {
        self.status = RecoveryActionStatus::Cancelled;
        Ok(())
    }

    fn get_status(&self) -> RecoveryActionStatus {
        self.status
    }

    fn get_result(&self) -> Option<&RecoveryResult> {
        self.result.as_ref()
    }
}

struct RestartAction {
    id: u64,
    status: RecoveryActionStatus,
    result: Option<RecoveryResult>,
}

impl RestartAction {
    fn new() -> Self {
        Self {
            id: 0,
            status: RecoveryActionStatus::NotStarted,
            result: None,
        }
    }
}

impl RecoveryAction for RestartAction {
    fn execute(&mut self, _error_record: &ErrorRecord) -> Result<RecoveryResult, &'static str> {
        self.status = RecoveryActionStatus::InProgress;

        let result = RecoveryResult {
            id: self.id,
            action_id: self.id,
            status: RecoveryStatus::Success,
            execution_time_ms: 1000,
            message: "Component restarted successfully".to_string(),
            error: None,
            side_effects: vec!["Component state reset".to_string()],
            affected_resources: vec!["component".to_string()],
            performance_impact: PerformanceImpact::Medium,
        };

        self.status = RecoveryActionStatus::Completed;
        self.result = Some(result.clone());

        Ok(result)
    }

    fn cancel(&mut self) -> Result<(), &'static str> {
        self.status = RecoveryActionStatus::Cancelled;
        Ok(())
    }

    fn get_status(&self) -> RecoveryActionStatus {
        self.status
    }

    fn get_result(&self) -> Option<&RecoveryResult> {
        self.result.as_ref()
    }
}

struct DegradeAction {
    id: u64,
    status: RecoveryActionStatus,
    result: Option<RecoveryResult>,
}

impl DegradeAction {
    fn new() -> Self {
        Self {
            id: 0,
            status: RecoveryActionStatus::NotStarted,
            result: None,
        }
    }
}

impl RecoveryAction for DegradeAction {
    fn execute(&mut self, _error_record: &ErrorRecord) -> Result<RecoveryResult, &'static str> {
        self.status = RecoveryActionStatus::InProgress;

        let result = RecoveryResult {
            id: self.id,
            action_id: self.id,
            status: RecoveryStatus::Partial,
            execution_time_ms: 750,
            message: "Service degraded successfully".to_string(),
            error: None,
            side_effects: vec!["Reduced service capability".to_string()],
            affected_resources: vec!["service".to_string()],
            performance_impact: PerformanceImpact::Medium,
        };

        self.status = RecoveryActionStatus::Completed;
        self.result = Some(result.clone());

        Ok(result)
    }

    fn cancel(&mut self) -> Result<(), &'static str> {
        self.status = RecoveryActionStatus::Cancelled;
        Ok(())
    }

    fn get_status(&self) -> RecoveryActionStatus {
        self.status
    }

    fn get_result(&self) -> Option<&RecoveryResult> {
        self.result.as_ref()
    }
}

struct FailoverAction {
    id: u64,
    status: RecoveryActionStatus,
    result: Option<RecoveryResult>,
}

impl FailoverAction {
    fn new() -> Self {
        Self {
            id: 0,
            status: RecoveryActionStatus::NotStarted,
            result: None,
        }
    }
}

impl RecoveryAction for FailoverAction {
    fn execute(&mut self, _error_record: &ErrorRecord) -> Result<RecoveryResult, &'static str> {
        self.status = RecoveryActionStatus::InProgress;

        let result = RecoveryResult {
            id: self.id,
            action_id: self.id,
            status: RecoveryStatus::Success,
            execution_time_ms: 2000,
            message: "Failover completed successfully".to_string(),
            error: None,
            side_effects: vec!["Switched to backup system".to_string()],
            affected_resources: vec!["primary_system".to_string(), "backup_system".to_string()],
            performance_impact: PerformanceImpact::Severe,
        };

        self.status = RecoveryActionStatus::Completed;
        self.result = Some(result.clone());

        Ok(result)
    }

    fn cancel(&mut self) -> Result<(), &'static str> {
        self.status = RecoveryActionStatus::Cancelled;
        Ok(())
    }

    fn get_status(&self) -> RecoveryActionStatus {
        self.status
    }

    fn get_result(&self) -> Option<&RecoveryResult> {
        self.result.as_ref()
    }
}

struct IsolateAction {
    id: u64,
    status: RecoveryActionStatus,
    result: Option<RecoveryResult>,
}

impl IsolateAction {
    fn new() -> Self {
        Self {
            id: 0,
            status: RecoveryActionStatus::NotStarted,
            result: None,
        }
    }
}

impl RecoveryAction for IsolateAction {
    fn execute(&mut self, _error_record: &ErrorRecord) -> Result<RecoveryResult, &'static str> {
        self.status = RecoveryActionStatus::InProgress;

        let result = RecoveryResult {
            id: self.id,
            action_id: self.id,
            status: RecoveryStatus::Success,
            execution_time_ms: 500,
            message: "Component isolated successfully".to_string(),
            error: None,
            side_effects: vec!["Component isolated from system".to_string()],
            affected_resources: vec!["component".to_string(), "affected_services".to_string()],
            performance_impact: PerformanceImpact::Medium,
        };

        self.status = RecoveryActionStatus::Completed;
        self.result = Some(result.clone());

        Ok(result)
    }

    fn cancel(&mut self) -> Result<(), &'static str> {
        self.status = RecoveryActionStatus::Cancelled;
        Ok(())
    }

    fn get_status(&self) -> RecoveryActionStatus {
        self.status
    }

    fn get_result(&self) -> Option<&RecoveryResult> {
        self.result.as_ref()
    }
}

struct NotifyAction {
    id: u64,
    status: RecoveryActionStatus,
    result: Option<RecoveryResult>,
}

impl NotifyAction {
    fn new() -> Self {
        Self {
            id: 0,
            status: RecoveryActionStatus::NotStarted,
            result: None,
        }
    }
}

impl RecoveryAction for NotifyAction {
    fn execute(&mut self, _error_record: &ErrorRecord) -> Result<RecoveryResult, &'static str> {
        self.status = RecoveryActionStatus::InProgress;

        let result = RecoveryResult {
            id: self.id,
            action_id: self.id,
            status: RecoveryStatus::Success,
            execution_time_ms: 100,
            message: "Notification sent successfully".to_string(),
            error: None,
            side_effects: vec!["Administrator notified".to_string()],
            affected_resources: vec!["notification_system".to_string()],
            performance_impact: PerformanceImpact::Minimal,
        };

        self.status = RecoveryActionStatus::Completed;
        self.result = Some(result.clone());

        Ok(result)
    }

    fn cancel(&mut self) -> Result<(), &'static str> {
        self.status = RecoveryActionStatus::Cancelled;
        Ok(())
    }

    fn get_status(&self) -> RecoveryActionStatus {
        self.status
    }

    fn get_result(&self) -> Option<&RecoveryResult> {
        self.result.as_ref()
    }
}

/// 创建默认的恢复管理器
pub fn create_recovery_manager() -> Arc<Mutex<RecoveryManager>> {
    Arc::new(Mutex::new(RecoveryManager::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovery_manager_creation() {
        let manager = RecoveryManager::new();
        assert_eq!(manager.id, 1);
        assert!(manager.recovery_strategies.is_empty());
        assert!(manager.recovery_history.is_empty());
    }

    #[test]
    fn test_recovery_config_default() {
        let config = RecoveryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_interval_ms, 1000);
        assert_eq!(config.backoff_factor, 2.0);
    }

    #[test]
    fn test_recovery_action_status() {
        let mut action = RetryAction::new();
        assert_eq!(action.get_status(), RecoveryActionStatus::NotStarted);

        action.status = RecoveryActionStatus::InProgress;
        assert_eq!(action.get_status(), RecoveryActionStatus::InProgress);
    }
}
