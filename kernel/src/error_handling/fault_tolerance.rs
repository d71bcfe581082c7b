//! Fault Tolerance Module

extern crate alloc;
//
// 容错管理模块
// 提供容错机制、故障隔离和系统冗余功能

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::string::ToString;
use alloc::{format, vec};
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

use super::*;

/// 容错管理器
pub struct FaultToleranceManager {
    /// 管理器ID
    pub id: u64,
    /// 容错策略
    tolerance_strategies: BTreeMap<String, ToleranceStrategy>,
    /// 故障隔离器
    isolation_domains: BTreeMap<String, IsolationDomain>,
    /// 冗余组件
    redundancy_components: BTreeMap<String, RedundancyComponent>,
    /// 故障检测器
    fault_detectors: BTreeMap<String, FaultDetector>,
    /// 容错统计
    stats: FaultToleranceStats,
    /// 配置
    config: FaultToleranceConfig,
    /// 策略计数器
    strategy_counter: AtomicU64,
    /// 隔离域计数器
    domain_counter: AtomicU64,
}

/// 容错策略
#[derive(Debug, Clone)]
pub struct ToleranceStrategy {
    /// 策略ID
    pub id: String,
    /// 策略名称
    pub name: String,
    /// 策略类型
    pub strategy_type: StrategyType,
    /// 适用组件
    pub applicable_components: Vec<String>,
    /// 触发条件
    pub trigger_conditions: Vec<TriggerCondition>,
    /// 容错动作
    pub tolerance_actions: Vec<ToleranceAction>,
    /// 恢复动作
    pub recovery_actions: Vec<RecoveryAction>,
    /// 策略参数
    pub parameters: BTreeMap<String, String>,
    /// 启用状态
    pub enabled: bool,
    /// 优先级
    pub priority: u32,
    /// 成功率
    pub success_rate: f64,
    /// 执行统计
    pub execution_stats: StrategyExecutionStats,
}

/// 策略类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyType {
    /// 主动容错
    Proactive,
    /// 被动容错
    Reactive,
    /// 混合容错
    Hybrid,
    /// 预测性容错
    Predictive,
    /// 自适应容错
    Adaptive,
}

/// 触发条件
#[derive(Debug, Clone)]
pub struct TriggerCondition {
    /// 条件ID
    pub id: String,
    /// 条件类型
    pub condition_type: ConditionType,
    /// 条件参数
    pub parameters: BTreeMap<String, String>,
    /// 严重性阈值
    pub severity_threshold: ErrorSeverity,
    /// 时间窗口（毫秒）
    pub time_window_ms: u64,
    /// 重复阈值
    pub repeat_threshold: u32,
}

/// 条件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionType {
    /// 错误率阈值
    ErrorRateThreshold,
    /// 响应时间阈值
    ResponseTimeThreshold,
    /// 资源使用阈值
    ResourceUsageThreshold,
    /// 健康检查失败
    HealthCheckFailure,
    /// 心跳丢失
    HeartbeatLoss,
    /// 错误模式匹配
    ErrorPatternMatch,
    /// 自定义条件
    CustomCondition,
}

/// 容错动作
#[derive(Debug, Clone)]
pub enum ToleranceAction {
    /// 故障隔离
    Isolate(String),
    /// 服务降级
    Degrade(DegradeConfig),
    /// 流量重定向
    Redirect(String),
    /// 启用备份
    ActivateBackup(String),
    /// 重启服务
    Restart(RestartConfig),
    /// 回滚操作
    Rollback(String),
    /// 切换模式
    SwitchMode(String),
    /// 负载均衡
    LoadBalance,
    /// 限流
    RateLimit(RateLimitConfig),
    /// 缓存服务
    CacheService,
    /// 重试操作
    Retry(RetryConfig),
}

/// 降级配置
#[derive(Debug, Clone)]
pub struct DegradeConfig {
    /// 降级级别
    pub degrade_level: u32,
    /// 保留功能
    pub preserved_functions: Vec<String>,
    /// 禁用功能
    pub disabled_functions: Vec<String>,
    /// 性能限制
    pub performance_limits: BTreeMap<String, f64>,
}

/// 重启配置
#[derive(Debug, Clone)]
pub struct RestartConfig {
    /// 重启类型
    pub restart_type: RestartType,
    /// 重启延迟（毫秒）
    pub restart_delay_ms: u64,
    /// 最大重启次数
    pub max_restart_count: u32,
    /// 重启间隔（毫秒）
    pub restart_interval_ms: u64,
    /// 优雅关闭时间（毫秒）
    pub graceful_shutdown_ms: u64,
}

/// 重启类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartType {
    /// 立即重启
    Immediate,
    /// 优雅重启
    Graceful,
    /// 滚动重启
    Rolling,
    /// 分阶段重启
    Phased,
}

/// 限流配置
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// 请求限制
    pub request_limit: u32,
    /// 时间窗口（秒）
    pub time_window_seconds: u64,
    /// 限流算法
    pub algorithm: RateLimitAlgorithm,
    /// 超限动作
    pub exceeded_action: ExceededAction,
}

/// 限流算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitAlgorithm {
    /// 固定窗口
    FixedWindow,
    /// 滑动窗口
    SlidingWindow,
    /// 令牌桶
    TokenBucket,
    /// 漏桶
    LeakyBucket,
}

/// 超限动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceededAction {
    /// 拒绝请求
    Reject,
    /// 排队等待
    Queue,
    /// 返回降级服务
    Degrade,
    /// 缓存响应
    Cache,
}

/// 重试配置
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// 最大重试次数
    pub max_retries: u32,
    /// 重试间隔（毫秒）
    pub retry_interval_ms: u64,
    /// 指数退避
    pub exponential_backoff: bool,
    /// 退退倍数
    pub backoff_multiplier: f64,
    /// 最大退避时间（毫秒）
    pub max_backoff_ms: u64,
    /// 抖动
    pub jitter: bool,
}

/// 策略执行统计
#[derive(Debug, Clone, Default)]
pub struct StrategyExecutionStats {
    /// 执行次数
    pub execution_count: u64,
    /// 成功次数
    pub success_count: u64,
    /// 失败次数
    pub failure_count: u64,
    /// 平均执行时间（毫秒）
    pub avg_execution_time_ms: u64,
    /// 最大执行时间（毫秒）
    pub max_execution_time_ms: u64,
    /// 最小执行时间（毫秒）
    pub min_execution_time_ms: u64,
    /// 最后执行时间
    pub last_execution: u64,
}

/// 隔离域
#[derive(Debug, Clone)]
pub struct IsolationDomain {
    /// 域ID
    pub id: String,
    /// 域名称
    pub name: String,
    /// 域类型
    pub domain_type: DomainType,
    /// 隔离级别
    pub isolation_level: IsolationLevel,
    /// 包含的组件
    pub components: Vec<String>,
    /// 隔离策略
    pub isolation_policy: IsolationPolicy,
    /// 资源限制
    pub resource_limits: ResourceLimits,
    /// 通信规则
    pub communication_rules: Vec<CommunicationRule>,
    /// 域状态
    pub status: DomainStatus,
    /// 创建时间
    pub created_at: u64,
    /// 最后更新时间
    pub updated_at: u64,
}

/// 域类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainType {
    /// 进程隔离域
    Process,
    /// 线程隔离域
    Thread,
    /// 内存隔离域
    Memory,
    /// 网络隔离域
    Network,
    /// 文件系统隔离域
    FileSystem,
    /// 设备隔离域
    Device,
    /// 混合隔离域
    Hybrid,
}

/// 隔离级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsolationLevel {
    /// 无隔离
    None,
    /// 轻度隔离
    Light,
    /// 中度隔离
    Medium,
    /// 严格隔离
    Strict,
    /// 完全隔离
    Complete,
}

/// 隔离策略
#[derive(Debug, Clone)]
pub struct IsolationPolicy {
    /// 策略名称
    pub name: String,
    /// 隔离方法
    pub isolation_methods: Vec<IsolationMethod>,
    /// 监控指标
    pub monitoring_metrics: Vec<String>,
    /// 自动恢复
    pub auto_recovery: bool,
    /// 恢复策略
    pub recovery_strategy: String,
}

/// 隔离方法
#[derive(Debug, Clone)]
pub enum IsolationMethod {
    /// 进程沙箱
    ProcessSandbox,
    /// 容器化
    Containerization,
    /// 虚拟化
    Virtualization,
    /// 命名空间
    Namespaces,
    /// 控制组
    CGroups,
    /// 安全模块
    SecurityModule,
    /// 网络分段
    NetworkSegmentation,
}

/// 资源限制
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    /// CPU限制（百分比）
    pub cpu_limit_percent: f64,
    /// 内存限制（字节）
    pub memory_limit_bytes: u64,
    /// 磁盘限制（字节）
    pub disk_limit_bytes: u64,
    /// 网络带宽限制（字节/秒）
    pub network_bandwidth_limit: u64,
    /// 文件描述符限制
    pub file_descriptor_limit: u32,
    /// 进程数限制
    pub process_limit: u32,
}

/// 通信规则
#[derive(Debug, Clone)]
pub struct CommunicationRule {
    /// 规则ID
    pub id: String,
    /// 源域
    pub source_domain: String,
    /// 目标域
    pub target_domain: String,
    /// 通信类型
    pub communication_type: CommunicationType,
    /// 动作
    pub action: CommunicationAction,
    /// 协议过滤
    pub protocol_filter: Option<String>,
    /// 端口过滤
    pub port_filter: Option<u16>,
}

/// 通信类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunicationType {
    /// 网络通信
    Network,
    /// IPC通信
    IPC,
    /// 文件系统访问
    FileSystem,
    /// 设备访问
    Device,
    /// 系统调用
    SystemCall,
}

/// 通信动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunicationAction {
    /// 允许
    Allow,
    /// 拒绝
    Deny,
    /// 记录日志
    Log,
    /// 限流
    RateLimit,
    /// 重定向
    Redirect,
}

/// 域状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainStatus {
    /// 活动
    Active,
    /// 隔离中
    Isolating,
    /// 已隔离
    Isolated,
    /// 恢复中
    Recovering,
    /// 已停用
    Disabled,
}

/// 冗余组件
#[derive(Debug, Clone)]
pub struct RedundancyComponent {
    /// 组件ID
    pub id: String,
    /// 组件名称
    pub name: String,
    /// 冗余类型
    pub redundancy_type: RedundancyType,
    /// 主组件
    pub primary_component: String,
    /// 备份组件
    pub backup_components: Vec<String>,
    /// 故障转移策略
    pub failover_strategy: FailoverStrategy,
    /// 健康检查配置
    pub health_check_config: HealthCheckConfig,
    /// 同步配置
    pub sync_config: SyncConfig,
    /// 组件状态
    pub status: RedundancyStatus,
    /// 当前活跃组件
    pub active_component: String,
}

/// 冗余类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedundancyType {
    /// 热备份
    HotStandby,
    /// 冷备份
    ColdStandby,
    /// 温备份
    WarmStandby,
    /// 双工模式
    ActiveActive,
    /// 负载分担
    LoadSharing,
    /// 集群模式
    Cluster,
}

/// 故障转移策略
#[derive(Debug, Clone)]
pub struct FailoverStrategy {
    /// 策略名称
    pub name: String,
    /// 故障检测方法
    pub detection_method: DetectionMethod,
    /// 转移触发条件
    pub trigger_conditions: Vec<String>,
    /// 转移动作
    pub failover_actions: Vec<FailoverAction>,
    /// 转移超时（毫秒）
    pub timeout_ms: u64,
    /// 自动转移
    pub automatic_failover: bool,
}

/// 检测方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMethod {
    /// 心跳检测
    Heartbeat,
    /// 健康检查
    HealthCheck,
    /// 状态监控
    StatusMonitoring,
    /// 性能监控
    PerformanceMonitoring,
    /// 错误监控
    ErrorMonitoring,
}

/// 故障转移动作
#[derive(Debug, Clone)]
pub enum FailoverAction {
    /// 切换到备份
    SwitchToBackup(String),
    /// 启动备份组件
    StartBackup(String),
    /// 停止主组件
    StopPrimary,
    /// 数据同步
    SyncData,
    /// 更新路由
    UpdateRouting,
    /// 发送通知
    SendNotification,
}

/// 健康检查配置
#[derive(Debug, Clone)]
pub struct HealthCheckConfig {
    /// 检查间隔（毫秒）
    pub check_interval_ms: u64,
    /// 检查超时（毫秒）
    pub check_timeout_ms: u64,
    /// 健康阈值
    pub healthy_threshold: u32,
    /// 不健康阈值
    pub unhealthy_threshold: u32,
    /// 检查端点
    pub check_endpoint: String,
    /// 检查方法
    pub check_method: HealthCheckMethod,
}

/// 健康检查方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthCheckMethod {
    /// HTTP检查
    HTTP,
    /// TCP检查
    TCP,
    /// 程序检查
    Program,
    /// 系统调用检查
    SystemCall,
    /// 自定义检查
    Custom,
}

/// 同步配置
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// 同步类型
    pub sync_type: SyncType,
    /// 同步间隔（毫秒）
    pub sync_interval_ms: u64,
    /// 同步模式
    pub sync_mode: SyncMode,
    /// 数据一致性级别
    pub consistency_level: ConsistencyLevel,
    /// 冲突解决策略
    pub conflict_resolution: ConflictResolution,
}

/// 同步类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncType {
    /// 实时同步
    Realtime,
    /// 定期同步
    Periodic,
    /// 按需同步
    OnDemand,
    /// 事件驱动同步
    EventDriven,
}

/// 同步模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// 同步同步
    Synchronous,
    /// 异步同步
    Asynchronous,
    /// 半同步同步
    SemiSynchronous,
}

/// 数据一致性级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyLevel {
    /// 强一致性
    Strong,
    /// 最终一致性
    Eventual,
    /// 弱一致性
    Weak,
    /// 因果一致性
    Causal,
}

/// 冲突解决策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictResolution {
    /// 主节点优先
    PrimaryWins,
    /// 时间戳优先
    TimestampWins,
    /// 手动解决
    Manual,
    /// 自动合并
    AutoMerge,
}

/// 冗余状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedundancyStatus {
    /// 正常
    Normal,
    /// 故障转移中
    FailingOver,
    /// 同步中
    Syncing,
    /// 降级中
    Degraded,
    /// 故障
    Failed,
}

/// 故障检测器
#[derive(Debug, Clone)]
pub struct FaultDetector {
    /// 检测器ID
    pub id: String,
    /// 检测器名称
    pub name: String,
    /// 检测类型
    pub detector_type: DetectorType,
    /// 监控目标
    pub targets: Vec<String>,
    /// 检测规则
    pub detection_rules: Vec<DetectionRule>,
    /// 检测间隔（毫秒）
    pub detection_interval_ms: u64,
    /// 检测阈值
    pub thresholds: BTreeMap<String, f64>,
    /// 检测状态
    pub status: DetectorStatus,
    /// 最后检测时间
    pub last_detection: u64,
}

/// 检测器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorType {
    /// 错误率检测器
    ErrorRateDetector,
    /// 性能检测器
    PerformanceDetector,
    /// 资源检测器
    ResourceDetector,
    /// 可用性检测器
    AvailabilityDetector,
    /// 健康状态检测器
    HealthDetector,
    /// 异常检测器
    AnomalyDetector,
}

/// 检测规则
#[derive(Debug, Clone)]
pub struct DetectionRule {
    /// 规则ID
    pub id: String,
    /// 规则名称
    pub name: String,
    /// 指标名称
    pub metric_name: String,
    /// 比较操作符
    pub operator: ComparisonOperator,
    /// 阈值
    pub threshold: f64,
    /// 持续时间（毫秒）
    pub duration_ms: u64,
    /// 严重级别
    pub severity: ErrorSeverity,
    /// 动作
    pub action: DetectionAction,
}

/// 比较操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// 大于
    GreaterThan,
    /// 大于等于
    GreaterThanOrEqual,
    /// 小于
    LessThan,
    /// 小于等于
    LessThanOrEqual,
    /// 等于
    Equal,
    /// 不等于
    NotEqual,
}

/// 检测动作
#[derive(Debug, Clone)]
pub enum DetectionAction {
    /// 触发告警
    TriggerAlert,
    /// 执行容错策略
    ExecuteToleranceStrategy,
    /// 记录日志
    LogEvent,
    /// 发送通知
    SendNotification,
    /// 自动修复
    AutoRepair,
}

/// 检测器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorStatus {
    /// 活动
    Active,
    /// 暂停
    Paused,
    /// 停止
    Stopped,
    /// 错误
    Error,
}

/// 容错统计
#[derive(Debug, Clone, Default)]
pub struct FaultToleranceStats {
    /// 总策略数
    pub total_strategies: u64,
    /// 活动策略数
    pub active_strategies: u64,
    /// 总隔离域数
    pub total_domains: u64,
    /// 活动隔离域数
    pub active_domains: u64,
    /// 总冗余组件数
    pub total_components: u64,
    /// 活动冗余组件数
    pub active_components: u64,
    /// 总检测器数
    pub total_detectors: u64,
    /// 活动检测器数
    pub active_detectors: u64,
    /// 故障恢复次数
    pub recovery_count: u64,
    /// 故障转移次数
    pub failover_count: u64,
    /// 平均恢复时间（毫秒）
    pub avg_recovery_time_ms: u64,
    /// 容错成功率
    pub tolerance_success_rate: f64,
}

/// 容错配置
#[derive(Debug, Clone)]
pub struct FaultToleranceConfig {
    /// 启用自动容错
    pub enable_auto_tolerance: bool,
    /// 默认策略
    pub default_strategies: Vec<String>,
    /// 最大并发策略
    pub max_concurrent_strategies: u32,
    /// 策略执行超时（毫秒）
    pub strategy_timeout_ms: u64,
    /// 启用故障预测
    pub enable_fault_prediction: bool,
    /// 启用自适应容错
    pub enable_adaptive_tolerance: bool,
    /// 统计更新间隔（秒）
    pub stats_update_interval_seconds: u64,
}

impl Default for FaultToleranceConfig {
    fn default() -> Self {
        Self {
            enable_auto_tolerance: true,
            default_strategies: vec![
                "basic_restart".to_string(),
                "service_degradation".to_string(),
            ],
            max_concurrent_strategies: 10,
            strategy_timeout_ms: 30000,
            enable_fault_prediction: false,
            enable_adaptive_tolerance: true,
            stats_update_interval_seconds: 60,
        }
    }
}

impl FaultToleranceManager {
    /// 创建新的容错管理器
    pub fn new() -> Self {
        Self {
            id: 1,
            tolerance_strategies: BTreeMap::new(),
            isolation_domains: BTreeMap::new(),
            redundancy_components: BTreeMap::new(),
            fault_detectors: BTreeMap::new(),
            stats: FaultToleranceStats::default(),
            config: FaultToleranceConfig::default(),
            strategy_counter: AtomicU64::new(1),
            domain_counter: AtomicU64::new(1),
        }
    }

    /// 初始化容错管理器
    pub fn init(&mut self) -> Result<(), &'static str> {
        // 加载默认容错策略
        self.load_default_strategies()?;

        // 创建默认隔离域
        self.create_default_isolation_domains()?;

        // 初始化故障检测器
        self.initialize_fault_detectors()?;

        crate::println!("[FaultTolerance] Fault tolerance manager initialized successfully");
        Ok(())
    }

    /// 处理错误
    pub fn handle_error(&mut self, error_record: &ErrorRecord) -> Result<Vec<ToleranceAction>, &'static str> {
        let mut applied_actions = Vec::new();

        // 查找适用的容错策略
        let applicable_strategies = self.find_applicable_strategies(error_record)?;

        for strategy_id in applicable_strategies {
            {
                // Extract strategy data to avoid borrowing conflicts
                let strategy_data = self.tolerance_strategies.get(&strategy_id).cloned();
                if let Some(strategy_data) = strategy_data {
                    if strategy_data.enabled {
                        // Execute strategy actions directly
                        for action in &strategy_data.tolerance_actions {
                            match self.execute_tolerance_action(action, error_record) {
                                Ok(_) => {
                                    applied_actions.push(action.clone());
                                }
                                Err(e) => {
                                    crate::println!("[FaultTolerance] Failed to execute tolerance action: {}", e);
                                }
                            }
                        }
                    }
                }
            }
        }

        // 更新统计信息
        self.update_fault_tolerance_stats(&applied_actions);

        Ok(applied_actions)
    }

    /// 查找适用的容错策略
    fn find_applicable_strategies(&self, error_record: &ErrorRecord) -> Result<Vec<String>, &'static str> {
        let mut applicable = Vec::new();

        for (strategy_id, strategy) in &self.tolerance_strategies {
            if self.is_strategy_applicable(strategy, error_record) {
                applicable.push(strategy_id.clone());
            }
        }

        // 按优先级排序
        applicable.sort_by(|a, b| {
            let priority_a = self.tolerance_strategies.get(a).map(|s| s.priority).unwrap_or(0);
            let priority_b = self.tolerance_strategies.get(b).map(|s| s.priority).unwrap_or(0);
            priority_b.cmp(&priority_a)
        });

        Ok(applicable)
    }

    /// 检查策略是否适用
    fn is_strategy_applicable(&self, strategy: &ToleranceStrategy, error_record: &ErrorRecord) -> bool {
        // 检查组件匹配
        if !strategy.applicable_components.is_empty() {
            let component_matches = strategy.applicable_components.iter()
                .any(|component| error_record.source.module.contains(component));
            if !component_matches {
                return false;
            }
        }

        // 检查触发条件
        for condition in &strategy.trigger_conditions {
            if self.evaluate_trigger_condition(condition, error_record) {
                return true;
            }
        }

        false
    }

    /// 评估触发条件
    fn evaluate_trigger_condition(&self, condition: &TriggerCondition, error_record: &ErrorRecord) -> bool {
        // 检查严重性阈值
        if error_record.severity < condition.severity_threshold {
            return false;
        }

        // 检查重复阈值
        if error_record.occurrence_count < condition.repeat_threshold {
            return false;
        }

        match condition.condition_type {
            ConditionType::ErrorRateThreshold => {
                // 实现错误率阈值检查
                true
            }
            ConditionType::ResponseTimeThreshold => {
                // 实现响应时间阈值检查
                true
            }
            ConditionType::ResourceUsageThreshold => {
                // 实现资源使用阈值检查
                true
            }
            ConditionType::HealthCheckFailure => {
                // 实现健康检查失败检查
                true
            }
            ConditionType::HeartbeatLoss => {
                // 实现心跳丢失检查
                true
            }
            ConditionType::ErrorPatternMatch => {
                // 实现错误模式匹配
                true
            }
            ConditionType::CustomCondition => {
                // 实现自定义条件
                true
            }
        }
    }

    /// 执行容错策略
    fn execute_strategy(&mut self, strategy: &mut ToleranceStrategy, error_record: &ErrorRecord) -> Result<Vec<ToleranceAction>, &'static str> {
        let start_time = crate::time::get_timestamp();
        strategy.execution_stats.execution_count += 1;
        strategy.execution_stats.last_execution = start_time;

        let mut applied_actions = Vec::new();
        let mut success = true;

        // 执行容错动作
        for action in &strategy.tolerance_actions {
            match self.execute_tolerance_action(action, error_record) {
                Ok(_) => {
                    applied_actions.push(action.clone());
                }
                Err(e) => {
                    success = false;
                    crate::println!("[FaultTolerance] Failed to execute tolerance action: {}", e);
                }
            }
        }

        // 更新执行统计
        let execution_time = crate::time::get_timestamp() - start_time;
        self.update_strategy_execution_stats(&mut strategy.execution_stats, execution_time, success);

        if success {
            strategy.execution_stats.success_count += 1;
        } else {
            strategy.execution_stats.failure_count += 1;
        }

        Ok(applied_actions)
    }

    /// 执行容错动作
    fn execute_tolerance_action(&mut self, action: &ToleranceAction, error_record: &ErrorRecord) -> Result<(), &'static str> {
        match action {
            ToleranceAction::Isolate(component) => {
                self.isolate_component(component)?;
            }
            ToleranceAction::Degrade(config) => {
                self.degrade_service(config, error_record)?;
            }
            ToleranceAction::Redirect(target) => {
                self.redirect_traffic(target)?;
            }
            ToleranceAction::ActivateBackup(backup_id) => {
                self.activate_backup(backup_id)?;
            }
            ToleranceAction::Restart(config) => {
                self.restart_service(config, error_record)?;
            }
            ToleranceAction::Rollback(version) => {
                self.rollback_service(version)?;
            }
            ToleranceAction::SwitchMode(mode) => {
                self.switch_mode(mode)?;
            }
            ToleranceAction::LoadBalance => {
                self.enable_load_balancing()?;
            }
            ToleranceAction::RateLimit(config) => {
                self.enable_rate_limiting(config)?;
            }
            ToleranceAction::CacheService => {
                self.enable_service_caching()?;
            }
            ToleranceAction::Retry(config) => {
                self.retry_operation(config, error_record)?;
            }
        }

        Ok(())
    }

    /// 隔离组件
    fn isolate_component(&mut self, component: &str) -> Result<(), &'static str> {
        crate::println!("[FaultTolerance] Isolating component: {}", component);

        // 查找或创建隔离域
        let domain_id = format!("isolation_{}", component);
        let domain = self.isolation_domains.entry(domain_id.clone()).or_insert_with(|| {
            IsolationDomain {
                id: domain_id.clone(),
                name: format!("Isolation Domain for {}", component),
                domain_type: DomainType::Process,
                isolation_level: IsolationLevel::Strict,
                components: vec![component.to_string()],
                isolation_policy: IsolationPolicy {
                    name: "Default Isolation Policy".to_string(),
                    isolation_methods: vec![IsolationMethod::ProcessSandbox],
                    monitoring_metrics: vec!["cpu_usage".to_string(), "memory_usage".to_string()],
                    auto_recovery: true,
                    recovery_strategy: "restart".to_string(),
                },
                resource_limits: ResourceLimits {
                    cpu_limit_percent: 10.0,
                    memory_limit_bytes: 100 * 1024 * 1024, // 100MB
                    disk_limit_bytes: 1024 * 1024 * 1024, // 1GB
                    network_bandwidth_limit: 1024 * 1024, // 1MB/s
                    file_descriptor_limit: 100,
                    process_limit: 5,
                },
                communication_rules: vec![
                    CommunicationRule {
                        id: "block_all".to_string(),
                        source_domain: domain_id.clone(),
                        target_domain: "*".to_string(),
                        communication_type: CommunicationType::Network,
                        action: CommunicationAction::Deny,
                        protocol_filter: None,
                        port_filter: None,
                    },
                ],
                status: DomainStatus::Isolating,
                created_at: crate::time::get_timestamp(),
                updated_at: crate::time::get_timestamp(),
            }
        });

        domain.status = DomainStatus::Isolated;
        domain.updated_at = crate::time::get_timestamp();

        Ok(())
    }

    /// 服务降级
    fn degrade_service(&mut self, config: &DegradeConfig, _error_record: &ErrorRecord) -> Result<(), &'static str> {
        crate::println!("[FaultTolerance] Degrading service to level: {}", config.degrade_level);

        // 实现服务降级逻辑
        for function in &config.disabled_functions {
            crate::println!("[FaultTolerance] Disabling function: {}", function);
        }

        Ok(())
    }

    /// 流量重定向
    fn redirect_traffic(&mut self, target: &str) -> Result<(), &'static str> {
        crate::println!("[FaultTolerance] Redirecting traffic to: {}", target);
        // 实现流量重定向逻辑
        Ok(())
    }

    /// 激活备份
    fn activate_backup(&mut self, backup_id: &str) -> Result<(), &'static str> {
        crate::println!("[FaultTolerance] Activating backup: {}", backup_id);
        // 实现备份激活逻辑
        Ok(())
    }

    /// 重启服务
    fn restart_service(&mut self, config: &RestartConfig, _error_record: &ErrorRecord) -> Result<(), &'static str> {
        crate::println!("[FaultTolerance] Restarting service with config: {:?}", config.restart_type);
        // 实现服务重启逻辑
        Ok(())
    }

    /// 回滚服务
    fn rollback_service(&mut self, version: &str) -> Result<(), &'static str> {
        crate::println!("[FaultTolerance] Rolling back service to version: {}", version);
        // 实现服务回滚逻辑
        Ok(())
    }

    /// 切换模式
    fn switch_mode(&mut self, mode: &str) -> Result<(), &'static str> {
        crate::println!("[FaultTolerance] Switching to mode: {}", mode);
        // 实现模式切换逻辑
        Ok(())
    }

    /// 启用负载均衡
    fn enable_load_balancing(&mut self) -> Result<(), &'static str> {
        crate::println!("[FaultTolerance] Enabling load balancing");
        // 实现负载均衡逻辑
        Ok(())
    }

    /// 启用限流
    fn enable_rate_limiting(&mut self, config: &RateLimitConfig) -> Result<(), &'static str> {
        crate::println!("[FaultTolerance] Enabling rate limiting: {} requests per {} seconds",
                 config.request_limit, config.time_window_seconds);
        // 实现限流逻辑
        Ok(())
    }

    /// 启用服务缓存
    fn enable_service_caching(&mut self) -> Result<(), &'static str> {
        crate::println!("[FaultTolerance] Enabling service caching");
        // 实现服务缓存逻辑
        Ok(())
    }

    /// 重试操作
    fn retry_operation(&mut self, config: &RetryConfig, _error_record: &ErrorRecord) -> Result<(), &'static str> {
        crate::println!("[FaultTolerance] Retrying operation with max {} retries", config.max_retries);
        // 实现重试逻辑
        Ok(())
    }

    /// 创建隔离域
    pub fn create_isolation_domain(&mut self, name: &str, domain_type: DomainType, components: Vec<String>) -> Result<String, &'static str> {
        let domain_id = format!("domain_{}", self.domain_counter.fetch_add(1, Ordering::SeqCst));

        let domain = IsolationDomain {
            id: domain_id.clone(),
            name: name.to_string(),
            domain_type,
            isolation_level: IsolationLevel::Medium,
            components,
            isolation_policy: IsolationPolicy {
                name: "Default Isolation Policy".to_string(),
                isolation_methods: vec![IsolationMethod::ProcessSandbox],
                monitoring_metrics: vec!["cpu_usage".to_string(), "memory_usage".to_string()],
                auto_recovery: true,
                recovery_strategy: "restart".to_string(),
            },
            resource_limits: ResourceLimits {
                cpu_limit_percent: 50.0,
                memory_limit_bytes: 512 * 1024 * 1024, // 512MB
                disk_limit_bytes: 2 * 1024 * 1024 * 1024, // 2GB
                network_bandwidth_limit: 10 * 1024 * 1024, // 10MB/s
                file_descriptor_limit: 1000,
                process_limit: 50,
            },
            communication_rules: Vec::new(),
            status: DomainStatus::Active,
            created_at: crate::time::get_timestamp(),
            updated_at: crate::time::get_timestamp(),
        };

        self.isolation_domains.insert(domain_id.clone(), domain);
        self.stats.total_domains += 1;
        self.stats.active_domains += 1;

        Ok(domain_id)
    }

    /// 添加冗余组件
    pub fn add_redundancy_component(&mut self, component: RedundancyComponent) -> Result<(), &'static str> {
        self.redundancy_components.insert(component.id.clone(), component);
        self.stats.total_components += 1;
        self.stats.active_components += 1;
        Ok(())
    }

    /// 更新策略执行统计
    fn update_strategy_execution_stats(&self, stats: &mut StrategyExecutionStats, execution_time: u64, success: bool) {
        // 更新执行时间统计
        let total_time = stats.avg_execution_time_ms * (stats.execution_count - 1) + execution_time;
        stats.avg_execution_time_ms = total_time / stats.execution_count;

        if execution_time > stats.max_execution_time_ms {
            stats.max_execution_time_ms = execution_time;
        }

        if stats.min_execution_time_ms == 0 || execution_time < stats.min_execution_time_ms {
            stats.min_execution_time_ms = execution_time;
        }
    }

    /// 更新容错统计
    fn update_fault_tolerance_stats(&mut self, applied_actions: &[ToleranceAction]) {
        if !applied_actions.is_empty() {
            self.stats.recovery_count += 1;
        }

        for action in applied_actions {
            if matches!(action, ToleranceAction::ActivateBackup(_)) {
                self.stats.failover_count += 1;
            }
        }

        // 计算容错成功率
        if self.stats.recovery_count > 0 {
            self.stats.tolerance_success_rate = self.stats.recovery_count as f64 /
                (self.stats.recovery_count + self.stats.failover_count) as f64;
        }
    }

    /// 加载默认策略
    fn load_default_strategies(&mut self) -> Result<(), &'static str> {
        let strategies = vec![
            ToleranceStrategy {
                id: "basic_restart".to_string(),
                name: "Basic Restart Strategy".to_string(),
                strategy_type: StrategyType::Reactive,
                applicable_components: vec!["*".to_string()],
                trigger_conditions: vec![
                    TriggerCondition {
                        id: "critical_error".to_string(),
                        condition_type: ConditionType::ErrorRateThreshold,
                        parameters: BTreeMap::new(),
                        severity_threshold: ErrorSeverity::Critical,
                        time_window_ms: 60000,
                        repeat_threshold: 1,
                    },
                ],
                tolerance_actions: vec![
                    ToleranceAction::Restart(RestartConfig {
                        restart_type: RestartType::Graceful,
                        restart_delay_ms: 1000,
                        max_restart_count: 3,
                        restart_interval_ms: 5000,
                        graceful_shutdown_ms: 3000,
                    }),
                ],
                recovery_actions: Vec::new(),
                parameters: BTreeMap::new(),
                enabled: true,
                priority: 1,
                success_rate: 0.8,
                execution_stats: StrategyExecutionStats::default(),
            },
            ToleranceStrategy {
                id: "service_degradation".to_string(),
                name: "Service Degradation Strategy".to_string(),
                strategy_type: StrategyType::Reactive,
                applicable_components: vec!["web_service".to_string(), "api_service".to_string()],
                trigger_conditions: vec![
                    TriggerCondition {
                        id: "high_error_rate".to_string(),
                        condition_type: ConditionType::ErrorRateThreshold,
                        parameters: BTreeMap::new(),
                        severity_threshold: ErrorSeverity::Error,
                        time_window_ms: 300000,
                        repeat_threshold: 5,
                    },
                ],
                tolerance_actions: vec![
                    ToleranceAction::Degrade(DegradeConfig {
                        degrade_level: 1,
                        preserved_functions: vec!["health_check".to_string(), "basic_auth".to_string()],
                        disabled_functions: vec!["advanced_features".to_string(), "analytics".to_string()],
                        performance_limits: {
                            let mut limits = BTreeMap::new();
                            limits.insert("cpu_limit".to_string(), 50.0);
                            limits.insert("memory_limit".to_string(), 512.0 * 1024.0 * 1024.0);
                            limits
                        },
                    }),
                ],
                recovery_actions: Vec::new(),
                parameters: BTreeMap::new(),
                enabled: true,
                priority: 2,
                success_rate: 0.9,
                execution_stats: StrategyExecutionStats::default(),
            },
        ];

        for strategy in strategies {
            self.tolerance_strategies.insert(strategy.id.clone(), strategy);
            self.stats.total_strategies += 1;
            self.stats.active_strategies += 1;
        }

        Ok(())
    }

    /// 创建默认隔离域
    fn create_default_isolation_domains(&mut self) -> Result<(), &'static str> {
        // 创建系统组件隔离域
        let _ = self.create_isolation_domain(
            "system_components",
            DomainType::Process,
            vec!["kernel".to_string(), "drivers".to_string()],
        );

        // 创建用户空间隔离域
        let _ = self.create_isolation_domain(
            "user_space",
            DomainType::Process,
            vec!["user_applications".to_string()],
        );

        Ok(())
    }

    /// 初始化故障检测器
    fn initialize_fault_detectors(&mut self) -> Result<(), &'static str> {
        let detectors = vec![
            FaultDetector {
                id: "error_rate_detector".to_string(),
                name: "Error Rate Detector".to_string(),
                detector_type: DetectorType::ErrorRateDetector,
                targets: vec!["*".to_string()],
                detection_rules: vec![
                    DetectionRule {
                        id: "high_error_rate".to_string(),
                        name: "High Error Rate".to_string(),
                        metric_name: "error_rate".to_string(),
                        operator: ComparisonOperator::GreaterThan,
                        threshold: 0.1, // 10%
                        duration_ms: 60000, // 1 minute
                        severity: ErrorSeverity::Warning,
                        action: DetectionAction::ExecuteToleranceStrategy,
                    },
                ],
                detection_interval_ms: 5000,
                thresholds: {
                    let mut thresholds = BTreeMap::new();
                    thresholds.insert("error_rate".to_string(), 0.1);
                    thresholds
                },
                status: DetectorStatus::Active,
                last_detection: crate::time::get_timestamp(),
            },
        ];

        for detector in detectors {
            self.fault_detectors.insert(detector.id.clone(), detector);
            self.stats.total_detectors += 1;
            self.stats.active_detectors += 1;
        }

        Ok(())
    }

    /// 获取容错策略
    pub fn get_tolerance_strategies(&self) -> &BTreeMap<String, ToleranceStrategy> {
        &self.tolerance_strategies
    }

    /// 获取隔离域
    pub fn get_isolation_domains(&self) -> &BTreeMap<String, IsolationDomain> {
        &self.isolation_domains
    }

    /// 获取冗余组件
    pub fn get_redundancy_components(&self) -> &BTreeMap<String, RedundancyComponent> {
        &self.redundancy_components
    }

    /// 获取故障检测器
    pub fn get_fault_detectors(&self) -> &BTreeMap<String, FaultDetector> {
        &self.fault_detectors
    }

    /// 获取统计信息
    pub fn get_statistics(&self) -> FaultToleranceStats {
        self.stats.clone()
    }

    /// 更新配置
    pub fn update_config(&mut self, config: FaultToleranceConfig) -> Result<(), &'static str> {
        self.config = config;
        Ok(())
    }

    /// 停止容错管理器
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        // 停止所有故障检测器
        for detector in self.fault_detectors.values_mut() {
            detector.status = DetectorStatus::Stopped;
        }

        // 清理所有数据
        self.tolerance_strategies.clear();
        self.isolation_domains.clear();
        self.redundancy_components.clear();
        self.fault_detectors.clear();

        crate::println!("[FaultTolerance] Fault tolerance manager shutdown successfully");
        Ok(())
    }
}

/// 创建默认的容错管理器
pub fn create_fault_tolerance_manager() -> Arc<Mutex<FaultToleranceManager>> {
    Arc::new(Mutex::new(FaultToleranceManager::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_tolerance_manager_creation() {
        let manager = FaultToleranceManager::new();
        assert_eq!(manager.id, 1);
        assert!(manager.tolerance_strategies.is_empty());
        assert!(manager.isolation_domains.is_empty());
    }

    #[test]
    fn test_strategy_creation() {
        let strategy = ToleranceStrategy {
            id: "test_strategy".to_string(),
            name: "Test Strategy".to_string(),
            strategy_type: StrategyType::Reactive,
            applicable_components: vec!["test".to_string()],
            trigger_conditions: Vec::new(),
            tolerance_actions: vec![
                ToleranceAction::Restart(RestartConfig {
                    restart_type: RestartType::Graceful,
                    restart_delay_ms: 1000,
                    max_restart_count: 3,
                    restart_interval_ms: 5000,
                    graceful_shutdown_ms: 3000,
                }),
            ],
            recovery_actions: Vec::new(),
            parameters: BTreeMap::new(),
            enabled: true,
            priority: 1,
            success_rate: 0.8,
            execution_stats: StrategyExecutionStats::default(),
        };

        assert_eq!(strategy.id, "test_strategy");
        assert_eq!(strategy.strategy_type, StrategyType::Reactive);
        assert!(strategy.enabled);
    }

    #[test]
    fn test_fault_tolerance_config_default() {
        let config = FaultToleranceConfig::default();
        assert!(config.enable_auto_tolerance);
        assert_eq!(config.max_concurrent_strategies, 10);
        assert!(config.default_strategies.contains(&"basic_restart".to_string()));
    }
}