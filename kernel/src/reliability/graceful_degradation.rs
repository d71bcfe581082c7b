//! Graceful Degradation Module

extern crate alloc;
//
// 优雅降级模块
// 提供系统优雅降级、功能缩减和服务质量控制功能

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::string::ToString;
use alloc::format;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

// Import println macro
#[allow(unused_imports)]
use crate::println;
use crate::error_handling::{error_recovery::ExecutionStatus, diagnostic_tools::LogLevel, fault_tolerance::ConditionType};

/// 优雅降级管理器
pub struct GracefulDegradationManager {
    /// 管理器ID
    pub id: u64,
    /// 降级策略
    degradation_strategies: BTreeMap<String, DegradationStrategy>,
    /// 服务质量控制器
    quality_controllers: BTreeMap<String, ServiceQualityController>,
    /// 降级会话
    active_degradations: BTreeMap<String, DegradationSession>,
    /// 功能管理器
    feature_manager: FeatureManager,
    /// 负载管理器
    load_manager: LoadManager,
    /// 资源管理器
    resource_manager: ResourceManager,
    /// 统计信息
    stats: DegradationStats,
    /// 配置
    config: DegradationConfig,
    /// 会话计数器
    session_counter: AtomicU64,
}

/// 降级策略
#[derive(Debug, Clone)]
pub struct DegradationStrategy {
    /// 策略ID
    pub id: String,
    /// 策略名称
    pub name: String,
    /// 策略描述
    pub description: String,
    /// 策略类型
    pub strategy_type: DegradationType,
    /// 触发条件
    pub trigger_conditions: Vec<DegradationTrigger>,
    /// 降级行动
    pub degradation_actions: Vec<DegradationAction>,
    /// 恢复条件
    pub recovery_conditions: Vec<RecoveryCondition>,
    /// 优先级
    pub priority: u32,
    /// 启用状态
    pub enabled: bool,
    /// 策略参数
    pub parameters: BTreeMap<String, String>,
    /// 策略统计
    pub stats: StrategyStats,
}

/// 降级类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationType {
    /// 功能降级
    FeatureDegradation,
    /// 性能降级
    PerformanceDegradation,
    /// 容量降级
    CapacityDegradation,
    /// 可用性降级
    AvailabilityDegradation,
    /// 混合降级
    HybridDegradation,
    /// 自适应降级
    AdaptiveDegradation,
}

/// 降级触发器
#[derive(Debug, Clone)]
pub struct DegradationTrigger {
    /// 触发器ID
    pub id: String,
    /// 触发器类型
    pub trigger_type: TriggerType,
    /// 触发条件
    pub condition: TriggerCondition,
    /// 触发阈值
    pub threshold: f64,
    /// 持续时间（秒）
    pub duration_seconds: u64,
    /// 是否立即触发
    pub immediate: bool,
}

/// 触发器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerType {
    /// 基于阈值
    ThresholdBased,
    /// 基于趋势
    TrendBased,
    /// 基于预测
    PredictionBased,
    /// 基于事件
    EventBased,
    /// 基于时间
    TimeBased,
    /// 基于负载
    LoadBased,
    /// 基于错误率
    ErrorRateBased,
}

/// 触发条件
#[derive(Debug, Clone)]
pub enum TriggerCondition {
    /// CPU使用率
    CPUUsage {
        threshold: f64,
        duration: u64,
    },
    /// 内存使用率
    MemoryUsage {
        threshold: f64,
        duration: u64,
    },
    /// 响应时间
    ResponseTime {
        threshold: f64,
        percentile: u8,
    },
    /// 错误率
    ErrorRate {
        threshold: f64,
        window: u64,
    },
    /// 队列长度
    QueueLength {
        threshold: u32,
    },
    /// 并发用户数
    ConcurrentUsers {
        threshold: u32,
    },
    /// 自定义条件
    Custom {
        condition: String,
        parameters: BTreeMap<String, String>,
    },
}

/// 降级行动
#[derive(Debug, Clone)]
pub struct DegradationAction {
    /// 动作ID
    pub id: String,
    /// 动作类型
    pub action_type: DegradationActionType,
    /// 动作名称
    pub name: String,
    /// 动作描述
    pub description: String,
    /// 动作参数
    pub parameters: BTreeMap<String, String>,
    /// 执行顺序
    pub execution_order: u32,
    /// 是否必须执行
    pub mandatory: bool,
    /// 回滚动作
    pub rollback_actions: Vec<RollbackAction>,
}

/// 降级行动类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationActionType {
    /// 禁用功能
    DisableFeature,
    /// 降低质量
    ReduceQuality,
    /// 限制并发
    LimitConcurrency,
    /// 增加超时
    IncreaseTimeout,
    /// 启用缓存
    EnableCache,
    /// 负载均衡
    LoadBalance,
    /// 限流
    RateLimit,
    /// 数据压缩
    CompressData,
    /// 异步处理
    AsyncProcessing,
    /// 简化计算
    SimplifyComputation,
    /// 降级模式
    DegradedMode,
    /// 自定义动作
    CustomAction,
}

/// 恢复条件
#[derive(Debug, Clone)]
pub struct RecoveryCondition {
    /// 条件ID
    pub id: String,
    /// 条件类型
    pub condition_type: RecoveryConditionType,
    /// 条件描述
    pub description: String,
    /// 恢复阈值
    pub recovery_threshold: f64,
    /// 稳定时间（秒）
    pub stability_duration: u64,
    /// 自动恢复
    pub auto_recovery: bool,
}

/// 恢复条件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryConditionType {
    /// 资源充足
    ResourceSufficient,
    /// 负载降低
    LoadReduced,
    /// 错误率降低
    ErrorRateReduced,
    /// 性能恢复
    PerformanceRestored,
    /// 时间窗口
    TimeWindow,
    /// 手动恢复
    ManualRecovery,
    /// 自定义恢复
    CustomRecovery,
}

/// 回滚动作
#[derive(Debug, Clone)]
pub struct RollbackAction {
    /// 动作描述
    pub description: String,
    /// 动作类型
    pub action_type: RollbackActionType,
    /// 动作参数
    pub parameters: BTreeMap<String, String>,
}

/// 回滚动作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackActionType {
    /// 启用功能
    EnableFeature,
    /// 恢复质量
    RestoreQuality,
    /// 移除限制
    RemoveLimit,
    /// 恢复超时
    RestoreTimeout,
    /// 禁用缓存
    DisableCache,
    /// 停止负载均衡
    StopLoadBalancing,
    /// 移除限流
    RemoveRateLimit,
    /// 同步处理
    SynchronousProcessing,
    /// 完整计算
    FullComputation,
    /// 正常模式
    NormalMode,
}

/// 策略统计
#[derive(Debug, Clone, Default)]
pub struct StrategyStats {
    /// 触发次数
    pub trigger_count: u64,
    /// 成功恢复次数
    pub successful_recoveries: u64,
    /// 平均降级时间（秒）
    pub avg_degradation_duration: u64,
    /// 最大降级时间（秒）
    pub max_degradation_duration: u64,
    /// 最小降级时间（秒）
    pub min_degradation_duration: u64,
    /// 最后触发时间
    pub last_triggered: u64,
    /// 降级效果评分
    pub effectiveness_score: f64,
}

/// 服务质量控制器
#[derive(Debug, Clone)]
pub struct ServiceQualityController {
    /// 控制器ID
    pub id: String,
    /// 服务名称
    pub service_name: String,
    /// 质量指标
    pub quality_metrics: BTreeMap<String, QualityMetric>,
    /// 质量阈值
    pub quality_thresholds: BTreeMap<String, QualityThreshold>,
    /// 控制策略
    pub control_policies: Vec<QualityControlPolicy>,
    /// 当前质量等级
    pub current_quality_level: QualityLevel,
    /// 质量历史
    pub quality_history: Vec<QualitySnapshot>,
    /// 控制器状态
    pub status: ControllerStatus,
}

/// 质量指标
#[derive(Debug, Clone)]
pub struct QualityMetric {
    /// 指标名称
    pub name: String,
    /// 指标类型
    pub metric_type: MetricType,
    /// 当前值
    pub current_value: f64,
    /// 目标值
    pub target_value: f64,
    /// 单位
    pub unit: String,
    /// 权重
    pub weight: f64,
    /// 更新时间
    pub last_updated: u64,
}

/// 指标类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    /// 响应时间
    ResponseTime,
    /// 吞吐量
    Throughput,
    /// 错误率
    ErrorRate,
    /// 可用性
    Availability,
    /// 资源使用率
    ResourceUsage,
    /// 队列长度
    QueueLength,
    /// 并发数
    Concurrency,
}

/// 质量阈值
#[derive(Debug, Clone)]
pub struct QualityThreshold {
    /// 最优阈值
    pub optimal: f64,
    /// 可接受阈值
    pub acceptable: f64,
    /// 警告阈值
    pub warning: f64,
    /// 降级阈值
    pub degradation: f64,
    /// 严重降级阈值
    pub severe_degradation: f64,
}

/// 质量控制策略
#[derive(Debug, Clone)]
pub struct QualityControlPolicy {
    /// 策略ID
    pub id: String,
    /// 策略名称
    pub name: String,
    /// 控制条件
    pub control_conditions: Vec<ControlCondition>,
    /// 控制动作
    pub control_actions: Vec<ControlAction>,
    /// 策略优先级
    pub priority: u32,
    /// 启用状态
    pub enabled: bool,
}

/// 控制条件
#[derive(Debug, Clone)]
pub struct ControlCondition {
    /// 条件类型
    pub condition_type: ConditionType,
    /// 指标名称
    pub metric_name: String,
    /// 操作符
    pub operator: ComparisonOperator,
    /// 阈值
    pub threshold: f64,
    /// 持续时间（秒）
    pub duration: u64,
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

/// 控制动作
#[derive(Debug, Clone)]
pub struct ControlAction {
    /// 动作类型
    pub action_type: ControlActionType,
    /// 动作参数
    pub parameters: BTreeMap<String, String>,
    /// 延迟执行（秒）
    pub delay_seconds: u64,
}

/// 控制动作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlActionType {
    /// 调整参数
    AdjustParameter,
    /// 启用缓存
    EnableCache,
    /// 增加超时
    IncreaseTimeout,
    /// 限制并发
    LimitConcurrency,
    /// 启用限流
    EnableRateLimit,
    /// 切换算法
    SwitchAlgorithm,
    /// 启用降级模式
    EnableDegradedMode,
}

/// 质量等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum QualityLevel {
    /// 优秀
    Excellent = 5,
    /// 良好
    Good = 4,
    /// 可接受
    Acceptable = 3,
    /// 降级
    Degraded = 2,
    /// 严重降级
    SeverelyDegraded = 1,
    /// 不可用
    Unavailable = 0,
}

/// 质量快照
#[derive(Debug, Clone)]
pub struct QualitySnapshot {
    /// 时间戳
    pub timestamp: u64,
    /// 质量等级
    pub quality_level: QualityLevel,
    /// 指标值
    pub metric_values: BTreeMap<String, f64>,
    /// 服务状态
    pub service_status: ServiceStatus,
    /// 用户影响
    pub user_impact: UserImpact,
}

/// 控制器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerStatus {
    /// 活动
    Active,
    /// 降级中
    Degraded,
    /// 维护中
    Maintenance,
    /// 停用
    Disabled,
}

/// 服务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    /// 正常
    Normal,
    /// 警告
    Warning,
    /// 降级
    Degraded,
    /// 不可用
    Unavailable,
}

/// 用户影响
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserImpact {
    /// 无影响
    None,
    /// 轻微影响
    Minor,
    /// 中等影响
    Moderate,
    /// 严重影响
    Severe,
}

/// 降级会话
#[derive(Debug, Clone)]
pub struct DegradationSession {
    /// 会话ID
    pub id: String,
    /// 策略ID
    pub strategy_id: String,
    /// 服务名称
    pub service_name: String,
    /// 开始时间
    pub start_time: u64,
    /// 结束时间
    pub end_time: Option<u64>,
    /// 会话状态
    pub status: DegradationStatus,
    /// 触发原因
    pub trigger_reason: String,
    /// 执行的动作
    pub executed_actions: Vec<ExecutedDegradationAction>,
    /// 降级效果
    pub degradation_effect: DegradationEffect,
    /// 恢复状态
    pub recovery_status: RecoveryStatus,
    /// 会话日志
    pub logs: Vec<SessionLog>,
}

/// 降级状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationStatus {
    /// 初始化中
    Initializing,
    /// 执行中
    Executing,
    /// 已降级
    Degraded,
    /// 恢复中
    Recovering,
    /// 已恢复
    Recovered,
    /// 失败
    Failed,
    /// 已取消
    Cancelled,
}

/// 执行的降级行动
#[derive(Debug, Clone)]
pub struct ExecutedDegradationAction {
    /// 动作ID
    pub action_id: String,
    /// 动作类型
    pub action_type: DegradationActionType,
    /// 开始时间
    pub start_time: u64,
    /// 结束时间
    pub end_time: Option<u64>,
    /// 执行状态
    pub status: ExecutionStatus,
    /// 执行结果
    pub result: Option<String>,
    /// 错误信息
    pub error_message: Option<String>,
}

/// 降级效果
#[derive(Debug, Clone)]
pub struct DegradationEffect {
    /// 性能改善
    pub performance_improvement: f64,
    /// 资源节省
    pub resource_savings: f64,
    /// 服务质量变化
    pub quality_change: QualityChange,
    /// 用户体验影响
    pub user_experience_impact: UserExperienceImpact,
    /// 业务影响
    pub business_impact: BusinessImpact,
}

/// 质量变化
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityChange {
    /// 提升
    Improved,
    /// 保持
    Maintained,
    /// 轻微下降
    SlightlyDecreased,
    /// 明显下降
    SignificantlyDecreased,
    /// 严重下降
    SeverelyDecreased,
}

/// 用户体验影响
#[derive(Debug, Clone)]
pub struct UserExperienceImpact {
    /// 响应时间变化（百分比）
    pub response_time_change_percent: f64,
    /// 功能完整性变化（百分比）
    pub functionality_completeness_percent: f64,
    /// 用户满意度影响（评分）
    pub satisfaction_impact: f64,
    /// 支持的用户数变化
    pub supported_users_change: i32,
}

/// 业务影响
#[derive(Debug, Clone)]
pub struct BusinessImpact {
    /// 收入影响（百分比）
    pub revenue_impact_percent: f64,
    /// 成本节省（美元）
    pub cost_savings: f64,
    /// SLA合规性影响
    pub sla_compliance_impact: SLAComplianceImpact,
    /// 客户流失风险
    pub customer_churn_risk: f64,
}

/// SLA合规性影响
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SLAComplianceImpact {
    /// 无影响
    None,
    /// 轻微影响
    Minor,
    /// 中等影响
    Moderate,
    /// 重大影响
    Major,
    /// 严重违约
    Violation,
}

/// 恢复状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStatus {
    /// 未开始
    NotStarted,
    /// 进行中
    InProgress,
    /// 已完成
    Completed,
    /// 失败
    Failed,
    /// 跳过
    Skipped,
}

/// 会话日志
#[derive(Debug, Clone)]
pub struct SessionLog {
    /// 日志ID
    pub id: String,
    /// 时间戳
    pub timestamp: u64,
    /// 日志级别
    pub level: LogLevel,
    /// 消息
    pub message: String,
    /// 详细信息
    pub details: Option<String>,
}

/// 功能管理器
#[derive(Debug, Clone)]
pub struct FeatureManager {
    /// 功能列表
    pub features: BTreeMap<String, Feature>,
    /// 功能依赖
    pub dependencies: BTreeMap<String, Vec<String>>,
    /// 功能状态
    pub feature_states: BTreeMap<String, FeatureState>,
}

/// 功能
#[derive(Debug, Clone)]
pub struct Feature {
    /// 功能ID
    pub id: String,
    /// 功能名称
    pub name: String,
    /// 功能描述
    pub description: String,
    /// 功能类别
    pub category: FeatureCategory,
    /// 重要性级别
    pub importance_level: ImportanceLevel,
    /// 资源需求
    pub resource_requirements: ResourceRequirements,
    /// 质量要求
    pub quality_requirements: QualityRequirements,
    /// 启用状态
    pub enabled: bool,
}

/// 功能类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureCategory {
    /// 核心功能
    Core,
    /// 重要功能
    Important,
    /// 辅助功能
    Auxiliary,
    /// 可选功能
    Optional,
    /// 实验性功能
    Experimental,
}

/// 重要性级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportanceLevel {
    /// 关键
    Critical = 5,
    /// 重要
    Important = 4,
    /// 一般
    Normal = 3,
    /// 次要
    Minor = 2,
    /// 可选
    Optional = 1,
}

/// 资源需求
#[derive(Debug, Clone)]
pub struct ResourceRequirements {
    /// CPU需求（百分比）
    pub cpu_requirement: f64,
    /// 内存需求（MB）
    pub memory_requirement: u64,
    /// 带宽需求（Mbps）
    pub bandwidth_requirement: f64,
    /// 存储需求（MB）
    pub storage_requirement: u64,
    /// I/O需求
    pub io_requirement: IORequirement,
}

/// I/O需求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IORequirement {
    /// 低
    Low,
    /// 中等
    Medium,
    /// 高
    High,
    /// 极高
    VeryHigh,
}

/// 质量要求
#[derive(Debug, Clone, Default)]
pub struct QualityRequirements {
    /// 最大响应时间（毫秒）
    pub max_response_time_ms: u64,
    /// 最小吞吐量
    pub min_throughput: f64,
    /// 最大错误率（百分比）
    pub max_error_rate: f64,
    /// 最小可用性（百分比）
    pub min_availability: f64,
}

/// 功能状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureState {
    /// 启用
    Enabled,
    /// 禁用
    Disabled,
    /// 降级
    Degraded,
    /// 维护中
    Maintenance,
}

/// 负载管理器
#[derive(Debug, Clone)]
pub struct LoadManager {
    /// 负载策略
    pub load_strategies: BTreeMap<String, LoadStrategy>,
    /// 当前负载状态
    pub current_load: LoadStatus,
    /// 负载历史
    pub load_history: Vec<LoadSnapshot>,
}

/// 负载策略
#[derive(Debug, Clone)]
pub struct LoadStrategy {
    /// 策略ID
    pub id: String,
    /// 策略名称
    pub name: String,
    /// 策略类型
    pub strategy_type: LoadStrategyType,
    /// 负载阈值
    pub load_thresholds: LoadThresholds,
    /// 负载分配算法
    pub allocation_algorithm: AllocationAlgorithm,
    /// 策略参数
    pub parameters: BTreeMap<String, String>,
}

/// 负载策略类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStrategyType {
    /// 固定分配
    FixedAllocation,
    /// 动态分配
    DynamicAllocation,
    /// 基于优先级
    PriorityBased,
    /// 基于权重
    WeightBased,
    /// 自适应分配
    AdaptiveAllocation,
}

/// 负载阈值
#[derive(Debug, Clone)]
pub struct LoadThresholds {
    /// 正常负载阈值
    pub normal_threshold: f64,
    /// 高负载阈值
    pub high_threshold: f64,
    /// 过载阈值
    pub overload_threshold: f64,
    /// 严重过载阈值
    pub severe_overload_threshold: f64,
}

/// 分配算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationAlgorithm {
    /// 轮询
    RoundRobin,
    /// 加权轮询
    WeightedRoundRobin,
    /// 最少连接
    LeastConnections,
    /// 响应时间
    ResponseTime,
    /// 资源使用
    ResourceUsage,
    /// 自适应
    Adaptive,
}

/// 负载状态
#[derive(Debug, Clone)]
pub struct LoadStatus {
    /// 总负载
    pub total_load: f64,
    /// 可用容量
    pub available_capacity: f64,
    /// 负载百分比
    pub load_percentage: f64,
    /// 负载等级
    pub load_level: LoadLevel,
    /// 更新时间
    pub last_updated: u64,
}

/// 负载等级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadLevel {
    /// 低负载
    Low,
    /// 正常负载
    Normal,
    /// 高负载
    High,
    /// 过载
    Overload,
    /// 严重过载
    SevereOverload,
}

/// 负载快照
#[derive(Debug, Clone)]
pub struct LoadSnapshot {
    /// 时间戳
    pub timestamp: u64,
    /// 负载状态
    pub load_status: LoadStatus,
    /// 各组件负载
    pub component_loads: BTreeMap<String, f64>,
}

/// 资源管理器
#[derive(Debug, Clone)]
pub struct ResourceManager {
    /// 资源池
    pub resource_pools: BTreeMap<String, ResourcePool>,
    /// 资源分配
    pub resource_allocations: BTreeMap<String, ResourceAllocation>,
    /// 资源使用统计
    pub usage_statistics: ResourceUsageStatistics,
}

/// 资源池
#[derive(Debug, Clone)]
pub struct ResourcePool {
    /// 池ID
    pub id: String,
    /// 池名称
    pub name: String,
    /// 资源类型
    pub resource_type: ResourceType,
    /// 总容量
    pub total_capacity: u64,
    /// 已分配容量
    pub allocated_capacity: u64,
    /// 可用容量
    pub available_capacity: u64,
    /// 保留容量
    pub reserved_capacity: u64,
    /// 池状态
    pub status: PoolStatus,
}

/// 资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceType {
    /// CPU
    CPU,
    /// 内存
    Memory,
    /// 存储
    Storage,
    /// 网络
    Network,
    /// GPU
    GPU,
    /// 自定义资源
    Custom,
}

/// 池状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolStatus {
    /// 可用
    Available,
    /// 部分可用
    PartiallyAvailable,
    /// 已满
    Full,
    /// 维护中
    Maintenance,
    /// 不可用
    Unavailable,
}

/// 资源分配
#[derive(Debug, Clone)]
pub struct ResourceAllocation {
    /// 分配ID
    pub id: String,
    /// 资源池ID
    pub pool_id: String,
    /// 分配给
    pub allocated_to: String,
    /// 分配数量
    pub allocated_amount: u64,
    /// 分配时间
    pub allocation_time: u64,
    /// 到期时间
    pub expiry_time: Option<u64>,
    /// 分配状态
    pub status: AllocationStatus,
}

/// 分配状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStatus {
    /// 活动
    Active,
    /// 已完成
    Completed,
    /// 已过期
    Expired,
    /// 已释放
    Released,
}

/// 资源使用统计
#[derive(Debug, Clone, Default)]
pub struct ResourceUsageStatistics {
    /// 总分配次数
    pub total_allocations: u64,
    /// 总释放次数
    pub total_releases: u64,
    /// 平均使用时间（秒）
    pub avg_usage_duration: u64,
    /// 峰值使用量
    pub peak_usage: u64,
    /// 当前使用量
    pub current_usage: u64,
    /// 使用率（百分比）
    pub utilization_rate: f64,
}

/// 降级统计
#[derive(Debug, Clone, Default)]
pub struct DegradationStats {
    /// 总降级次数
    pub total_degradations: u64,
    /// 自动降级次数
    pub auto_degradations: u64,
    /// 手动降级次数
    pub manual_degradations: u64,
    /// 平均降级时间（秒）
    pub avg_degradation_duration: u64,
    /// 成功恢复次数
    pub successful_recoveries: u64,
    /// 失败恢复次数
    pub failed_recoveries: u64,
    /// 按策略类型统计
    pub degradations_by_type: BTreeMap<DegradationType, u64>,
    /// 按服务统计
    pub degradations_by_service: BTreeMap<String, u64>,
    /// 用户影响统计
    pub user_impact_summary: UserImpactSummary,
}

/// 用户影响摘要
#[derive(Debug, Clone, Default)]
pub struct UserImpactSummary {
    /// 影响的用户总数
    pub total_affected_users: u64,
    /// 平均影响持续时间（分钟）
    pub avg_impact_duration: u64,
    /// 影响严重度分布
    pub severity_distribution: BTreeMap<String, u64>,
    /// 用户满意度变化
    pub satisfaction_change: f64,
}

/// 降级配置
#[derive(Debug, Clone)]
pub struct DegradationConfig {
    /// 启用自动降级
    pub enable_auto_degradation: bool,
    /// 默认降级策略
    pub default_strategies: Vec<String>,
    /// 最大并发降级数
    pub max_concurrent_degradations: u32,
    /// 降级历史保留数量
    pub degradation_history_size: usize,
    /// 启用预测性降级
    pub enable_predictive_degradation: bool,
    /// 降级前检查时间（秒）
    pub pre_degradation_check_time: u64,
    /// 最小降级持续时间（秒）
    pub min_degradation_duration: u64,
    /// 启用渐进式降级
    pub enable_gradual_degradation: bool,
    /// 用户影响阈值
    pub user_impact_threshold: f64,
}

impl Default for DegradationConfig {
    fn default() -> Self {
        Self {
            enable_auto_degradation: true,
            default_strategies: vec![
                "performance_degradation".to_string(),
                "feature_degradation".to_string(),
            ],
            max_concurrent_degradations: 5,
            degradation_history_size: 1000,
            enable_predictive_degradation: false,
            pre_degradation_check_time: 30,
            min_degradation_duration: 60,
            enable_gradual_degradation: true,
            user_impact_threshold: 0.1,
        }
    }
}

impl Default for ResourceRequirements {
    fn default() -> Self {
        Self {
            cpu_requirement: 10.0,
            memory_requirement: 512,
            bandwidth_requirement: 1.0,
            storage_requirement: 1024,
            io_requirement: IORequirement::Medium,
        }
    }
}

impl Default for QualityThreshold {
    fn default() -> Self {
        Self {
            optimal: 50.0,
            acceptable: 75.0,
            warning: 85.0,
            degradation: 90.0,
            severe_degradation: 95.0,
        }
    }
}

impl GracefulDegradationManager {
    /// 创建新的优雅降级管理器
    pub fn new() -> Self {
        Self {
            id: 1,
            degradation_strategies: BTreeMap::new(),
            quality_controllers: BTreeMap::new(),
            active_degradations: BTreeMap::new(),
            feature_manager: FeatureManager {
                features: BTreeMap::new(),
                dependencies: BTreeMap::new(),
                feature_states: BTreeMap::new(),
            },
            load_manager: LoadManager {
                load_strategies: BTreeMap::new(),
                current_load: LoadStatus {
                    total_load: 0.0,
                    available_capacity: 100.0,
                    load_percentage: 0.0,
                    load_level: LoadLevel::Low,
                    last_updated: crate::time::get_timestamp(),
                },
                load_history: Vec::new(),
            },
            resource_manager: ResourceManager {
                resource_pools: BTreeMap::new(),
                resource_allocations: BTreeMap::new(),
                usage_statistics: ResourceUsageStatistics::default(),
            },
            stats: DegradationStats::default(),
            config: DegradationConfig::default(),
            session_counter: AtomicU64::new(1),
        }
    }

    /// 初始化优雅降级管理器
    pub fn init(&mut self) -> Result<(), &'static str> {
        // 加载默认降级策略
        self.load_default_degradation_strategies()?;

        // 初始化功能管理器
        self.initialize_feature_manager()?;

        // 初始化负载管理器
        self.initialize_load_manager()?;

        // 初始化资源管理器
        self.initialize_resource_manager()?;

        // 初始化服务质量控制器
        self.initialize_quality_controllers()?;

        crate::println!("[GracefulDegradation] Graceful degradation manager initialized successfully");
        Ok(())
    }

    /// 触发降级
    pub fn trigger_degradation(&mut self, strategy_id: &str, service_name: &str, trigger_reason: &str) -> Result<String, &'static str> {
        let strategy = self.degradation_strategies.get(strategy_id)
            .ok_or("Degradation strategy not found")?;

        if !strategy.enabled {
            return Err("Degradation strategy is disabled");
        }

        // 检查并发降级限制
        if self.active_degradations.len() >= self.config.max_concurrent_degradations as usize {
            return Err("Maximum concurrent degradations reached");
        }

        let session_id = format!("degradation_{}", self.session_counter.fetch_add(1, Ordering::SeqCst));
        let start_time = crate::time::get_timestamp();

        // 创建降级会话
        let session = DegradationSession {
            id: session_id.clone(),
            strategy_id: strategy_id.to_string(),
            service_name: service_name.to_string(),
            start_time,
            end_time: None,
            status: DegradationStatus::Initializing,
            trigger_reason: trigger_reason.to_string(),
            executed_actions: Vec::new(),
            degradation_effect: DegradationEffect {
                performance_improvement: 0.0,
                resource_savings: 0.0,
                quality_change: QualityChange::Maintained,
                user_experience_impact: UserExperienceImpact {
                    response_time_change_percent: 0.0,
                    functionality_completeness_percent: 100.0,
                    satisfaction_impact: 0.0,
                    supported_users_change: 0,
                },
                business_impact: BusinessImpact {
                    revenue_impact_percent: 0.0,
                    cost_savings: 0.0,
                    sla_compliance_impact: SLAComplianceImpact::None,
                    customer_churn_risk: 0.0,
                },
            },
            recovery_status: RecoveryStatus::NotStarted,
            logs: Vec::new(),
        };

        // 克隆策略数据以避免借用冲突
        let strategy_clone = strategy.clone();

        // 执行降级行动
        self.execute_degradation_actions(&session_id, &strategy_clone, service_name)?;

        // 更新会话状态
        let mut updated_session = session;
        updated_session.status = DegradationStatus::Degraded;

        // 保存会话
        self.active_degradations.insert(session_id.clone(), updated_session);

        // 更新统计信息
        self.update_degradation_stats();

        // 添加会话日志
        self.add_session_log(&session_id, LogLevel::Info, &format!("Degradation triggered for service: {}", service_name), "GracefulDegradation");

        Ok(session_id)
    }

    /// 执行降级行动
    fn execute_degradation_actions(&mut self, session_id: &str, strategy: &DegradationStrategy, service_name: &str) -> Result<(), &'static str> {
        for action in &strategy.degradation_actions {
            let execution_start = crate::time::get_timestamp();

            // 执行具体动作
            let result = self.execute_degradation_action(action, service_name);
            let execution_end = crate::time::get_timestamp();

            // 记录执行的动作
            let executed_action = ExecutedDegradationAction {
                action_id: action.id.clone(),
                action_type: action.action_type,
                start_time: execution_start,
                end_time: Some(execution_end),
                status: if result.is_ok() { ExecutionStatus::Success } else { ExecutionStatus::Failed },
                result: if result.is_ok() { Some("Action executed successfully".to_string()) } else { None },
                error_message: if result.is_err() { Some(format!("{:?}", result.as_ref().unwrap_err())) } else { None },
            };

            // 更新会话
            if let Some(session) = self.active_degradations.get_mut(session_id) {
                session.executed_actions.push(executed_action);
            }

            match result {
                Ok(_) => {
                    self.add_session_log(session_id, LogLevel::Info, &format!("Action {} executed successfully", action.name), &format!("{:?}", action.action_type));
                }
                Err(e) => {
                    self.add_session_log(session_id, LogLevel::Error, &format!("Action {} failed: {}", action.name, e), &format!("{:?}", action.action_type));
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// 执行单个降级行作
    fn execute_degradation_action(&mut self, action: &DegradationAction, service_name: &str) -> Result<(), &'static str> {
        match action.action_type {
            DegradationActionType::DisableFeature => {
                self.disable_feature(&action.parameters.get("feature_name").unwrap_or(&"".to_string()))?;
            }
            DegradationActionType::ReduceQuality => {
                self.reduce_quality(service_name, &action.parameters)?;
            }
            DegradationActionType::LimitConcurrency => {
                self.limit_concurrency(service_name, &action.parameters)?;
            }
            DegradationActionType::IncreaseTimeout => {
                self.increase_timeout(service_name, &action.parameters)?;
            }
            DegradationActionType::EnableCache => {
                self.enable_cache(service_name, &action.parameters)?;
            }
            DegradationActionType::RateLimit => {
                self.enable_rate_limiting(service_name, &action.parameters)?;
            }
            DegradationActionType::CompressData => {
                self.enable_data_compression(service_name, &action.parameters)?;
            }
            DegradationActionType::AsyncProcessing => {
                self.enable_async_processing(service_name, &action.parameters)?;
            }
            DegradationActionType::SimplifyComputation => {
                self.simplify_computation(service_name, &action.parameters)?;
            }
            DegradationActionType::DegradedMode => {
                self.enable_degraded_mode(service_name, &action.parameters)?;
            }
            DegradationActionType::CustomAction => {
                self.execute_custom_action(service_name, &action.parameters)?;
            }
            _ => {
                // 其他动作类型
                crate::println!("[GracefulDegradation] Executing action: {:?}", action.action_type);
            }
        }

        Ok(())
    }

    /// 禁用功能
    fn disable_feature(&mut self, feature_name: &str) -> Result<(), &'static str> {
        if let Some(feature_state) = self.feature_manager.feature_states.get_mut(feature_name) {
            *feature_state = FeatureState::Disabled;
            crate::println!("[GracefulDegradation] Feature {} disabled", feature_name);
        }
        Ok(())
    }

    /// 降低质量
    fn reduce_quality(&mut self, service_name: &str, parameters: &BTreeMap<String, String>) -> Result<(), &'static str> {
        if let Some(controller) = self.quality_controllers.get_mut(service_name) {
            // 调整质量参数
            let quality_reduction = parameters.get("quality_reduction")
                .and_then(|s| s.parse::<f64>().ok())
                .unwrap_or(0.2);

            // 更新质量指标
            for (metric_name, metric) in &mut controller.quality_metrics {
                match metric.metric_type {
                    MetricType::ResponseTime => {
                        metric.target_value *= 1.0 + quality_reduction;
                    }
                    MetricType::Throughput => {
                        metric.target_value *= 1.0 - quality_reduction;
                    }
                    _ => {}
                }
            }

            // 更新质量等级
            if controller.current_quality_level > QualityLevel::Degraded {
                controller.current_quality_level = QualityLevel::Degraded;
            }

            crate::println!("[GracefulDegradation] Quality reduced for service: {}", service_name);
        }
        Ok(())
    }

    /// 限制并发
    fn limit_concurrency(&mut self, service_name: &str, parameters: &BTreeMap<String, String>) -> Result<(), &'static str> {
        let max_concurrency = parameters.get("max_concurrency")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(100);

        // 实现并发限制逻辑
        crate::println!("[GracefulDegradation] Concurrency limited to {} for service: {}", max_concurrency, service_name);
        Ok(())
    }

    /// 增加超时
    fn increase_timeout(&mut self, service_name: &str, parameters: &BTreeMap<String, String>) -> Result<(), &'static str> {
        let timeout_multiplier = parameters.get("timeout_multiplier")
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(2.0);

        // 实现超时增加逻辑
        crate::println!("[GracefulDegradation] Timeout increased by {}x for service: {}", timeout_multiplier, service_name);
        Ok(())
    }

    /// 启用缓存
    fn enable_cache(&mut self, service_name: &str, _parameters: &BTreeMap<String, String>) -> Result<(), &'static str> {
        // 实现缓存启用逻辑
        crate::println!("[GracefulDegradation] Cache enabled for service: {}", service_name);
        Ok(())
    }

    /// 启用限流
    fn enable_rate_limiting(&mut self, service_name: &str, parameters: &BTreeMap<String, String>) -> Result<(), &'static str> {
        let rate_limit = parameters.get("rate_limit")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(1000);

        // 实现限流逻辑
        crate::println!("[GracefulDegradation] Rate limiting enabled ({} req/s) for service: {}", rate_limit, service_name);
        Ok(())
    }

    /// 启用数据压缩
    fn enable_data_compression(&mut self, service_name: &str, _parameters: &BTreeMap<String, String>) -> Result<(), &'static str> {
        // 实现数据压缩逻辑
        crate::println!("[GracefulDegradation] Data compression enabled for service: {}", service_name);
        Ok(())
    }

    /// 启用异步处理
    fn enable_async_processing(&mut self, service_name: &str, _parameters: &BTreeMap<String, String>) -> Result<(), &'static str> {
        // 实现异步处理逻辑
        crate::println!("[GracefulDegradation] Async processing enabled for service: {}", service_name);
        Ok(())
    }

    /// 简化计算
    fn simplify_computation(&mut self, service_name: &str, parameters: &BTreeMap<String, String>) -> Result<(), &'static str> {
        let simplification_level = parameters.get("level")
            .and_then(|s| s.parse::<u8>().ok())
            .unwrap_or(1);

        // 实现计算简化逻辑
        crate::println!("[GracefulDegradation] Computation simplified (level: {}) for service: {}", simplification_level, service_name);
        Ok(())
    }

    /// 启用降级模式
    fn enable_degraded_mode(&mut self, service_name: &str, _parameters: &BTreeMap<String, String>) -> Result<(), &'static str> {
        // 实现降级模式逻辑
        crate::println!("[GracefulDegradation] Degraded mode enabled for service: {}", service_name);
        Ok(())
    }

    /// 执行自定义动作
    fn execute_custom_action(&mut self, service_name: &str, parameters: &BTreeMap<String, String>) -> Result<(), &'static str> {
        // avoid referencing a temporary String returned by unwrap_or
        let action_name = parameters.get("action_name").map(|s| s.as_str()).unwrap_or("unknown");
        crate::println!("[GracefulDegradation] Custom action '{}' executed for service: {}", action_name, service_name);
        Ok(())
    }

    /// 尝试恢复
    pub fn attempt_recovery(&mut self, session_id: &str) -> Result<bool, &'static str> {
        // 先获取会话信息以避免借用冲突
        let (session_status, strategy_id, service_name) = {
            let session = self.active_degradations.get(session_id)
                .ok_or("Degradation session not found")?;
            (session.status, session.strategy_id.clone(), session.service_name.clone())
        };

        if session_status != DegradationStatus::Degraded {
            return Err("Session is not in degraded state");
        }

        let strategy = self.degradation_strategies.get(&strategy_id)
            .ok_or("Strategy not found")?;
        let strategy_clone = strategy.clone();

        // 检查恢复条件
        if !self.check_recovery_conditions(&strategy.recovery_conditions, &service_name)? {
            return Ok(false);
        }

        // 开始恢复 - 提取session数据，然后执行恢复
        let session_clone = {
            let session = self.active_degradations.get(session_id)
                .ok_or("Degradation session not found")?;
            session.clone()
        };

        // 执行恢复动作（使用克隆的session避免借用冲突）
        let recovery_success = self.execute_recovery_actions(&session_clone, &strategy_clone)?;

        // 更新会话状态
        if let Some(session_mut) = self.active_degradations.get_mut(session_id) {
            if recovery_success {
                session_mut.status = DegradationStatus::Recovered;
                session_mut.recovery_status = RecoveryStatus::Completed;
                session_mut.end_time = Some(crate::time::get_timestamp());
            } else {
                session_mut.status = DegradationStatus::Degraded;
                session_mut.recovery_status = RecoveryStatus::Failed;
            }
        }

        // 添加日志（在状态更新后进行，避免借用冲突）
        if recovery_success {
            self.add_session_log(session_id, LogLevel::Info, "Recovery completed successfully", "GracefulDegradation");
        } else {
            self.add_session_log(session_id, LogLevel::Error, "Recovery failed", "GracefulDegradation");
        }

        Ok(recovery_success)
    }

    /// 检查恢复条件
    fn check_recovery_conditions(&self, recovery_conditions: &[RecoveryCondition], service_name: &str) -> Result<bool, &'static str> {
        for condition in recovery_conditions {
            if !self.evaluate_recovery_condition(condition, service_name)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// 评估恢复条件
    fn evaluate_recovery_condition(&self, condition: &RecoveryCondition, service_name: &str) -> Result<bool, &'static str> {
        match condition.condition_type {
            RecoveryConditionType::ResourceSufficient => {
                // 检查资源是否充足
                self.check_resource_sufficiency(service_name)
            }
            RecoveryConditionType::LoadReduced => {
                // 检查负载是否降低
                self.check_load_reduction(service_name)
            }
            RecoveryConditionType::ErrorRateReduced => {
                // 检查错误率是否降低
                self.check_error_rate_reduction(service_name)
            }
            RecoveryConditionType::PerformanceRestored => {
                // 检查性能是否恢复
                self.check_performance_restoration(service_name)
            }
            RecoveryConditionType::TimeWindow => {
                // 检查时间窗口
                Ok(true) // 简化处理
            }
            RecoveryConditionType::ManualRecovery => {
                // 手动恢复
                Ok(false) // 需要手动干预
            }
            RecoveryConditionType::CustomRecovery => {
                // 自定义恢复条件
                Ok(true)
            }
        }
    }

    /// 检查资源充足性
    fn check_resource_sufficiency(&self, _service_name: &str) -> Result<bool, &'static str> {
        // 简化实现
        Ok(true)
    }

    /// 检查负载降低
    fn check_load_reduction(&self, _service_name: &str) -> Result<bool, &'static str> {
        // 简化实现
        Ok(true)
    }

    /// 检查错误率降低
    fn check_error_rate_reduction(&self, _service_name: &str) -> Result<bool, &'static str> {
        // 简化实现
        Ok(true)
    }

    /// 检查性能恢复
    fn check_performance_restoration(&self, _service_name: &str) -> Result<bool, &'static str> {
        // 简化实现
        Ok(true)
    }

    /// 执行恢复动作
    fn execute_recovery_actions(&mut self, session: &DegradationSession, strategy: &DegradationStrategy) -> Result<bool, &'static str> {
        let mut success_count = 0;
        let mut total_count = 0;

        // 按相反顺序执行回滚动作
        for action in strategy.degradation_actions.iter().rev() {
            total_count += 1;

            if self.execute_rollback_action(&action.rollback_actions, &session.service_name)? {
                success_count += 1;
            }
        }

        Ok(success_count == total_count)
    }

    /// 执行回滚动作
    fn execute_rollback_action(&mut self, rollback_actions: &[RollbackAction], service_name: &str) -> Result<bool, &'static str> {
        for rollback_action in rollback_actions {
            match rollback_action.action_type {
                RollbackActionType::EnableFeature => {
                    self.enable_feature(&rollback_action.parameters.get("feature_name").unwrap_or(&"".to_string()))?;
                }
                RollbackActionType::RestoreQuality => {
                    self.restore_quality(service_name, &rollback_action.parameters)?;
                }
                RollbackActionType::RemoveLimit => {
                    self.remove_limit(service_name, &rollback_action.parameters)?;
                }
                RollbackActionType::RestoreTimeout => {
                    self.restore_timeout(service_name, &rollback_action.parameters)?;
                }
                _ => {
                    crate::println!("[GracefulDegradation] Executing rollback action: {:?}", rollback_action.action_type);
                }
            }
        }

        Ok(true)
    }

    /// 启用功能
    fn enable_feature(&mut self, feature_name: &str) -> Result<(), &'static str> {
        if let Some(feature_state) = self.feature_manager.feature_states.get_mut(feature_name) {
            *feature_state = FeatureState::Enabled;
            crate::println!("[GracefulDegradation] Feature {} enabled", feature_name);
        }
        Ok(())
    }

    /// 恢复质量
    fn restore_quality(&mut self, service_name: &str, parameters: &BTreeMap<String, String>) -> Result<(), &'static str> {
        if let Some(controller) = self.quality_controllers.get_mut(service_name) {
            // 恢复质量参数
            let quality_restoration = parameters.get("quality_restoration")
                .and_then(|s| s.parse::<f64>().ok())
                .unwrap_or(1.0);

            // 恢复质量指标
            for (metric_name, metric) in &mut controller.quality_metrics {
                match metric.metric_type {
                    MetricType::ResponseTime => {
                        metric.target_value /= 1.0 + quality_restoration;
                    }
                    MetricType::Throughput => {
                        metric.target_value *= 1.0 + quality_restoration;
                    }
                    _ => {}
                }
            }

            // 恢复质量等级
            controller.current_quality_level = QualityLevel::Good;

            crate::println!("[GracefulDegradation] Quality restored for service: {}", service_name);
        }
        Ok(())
    }

    /// 移除限制
    fn remove_limit(&mut self, service_name: &str, _parameters: &BTreeMap<String, String>) -> Result<(), &'static str> {
        // 实现限制移除逻辑
        crate::println!("[GracefulDegradation] Limits removed for service: {}", service_name);
        Ok(())
    }

    /// 恢复超时
    fn restore_timeout(&mut self, service_name: &str, _parameters: &BTreeMap<String, String>) -> Result<(), &'static str> {
        // 实现超时恢复逻辑
        crate::println!("[GracefulDegradation] Timeout restored for service: {}", service_name);
        Ok(())
    }

    /// 添加会话日志
    fn add_session_log(&mut self, session_id: &str, level: LogLevel, message: &str, source: &str) {
        if let Some(session) = self.active_degradations.get_mut(session_id) {
            let log = SessionLog {
                id: format!("log_{}", crate::time::get_timestamp()),
                timestamp: crate::time::get_timestamp(),
                level,
                message: message.to_string(),
                details: None,
            };
            session.logs.push(log);
        }
    }

    /// 更新降级统计
    fn update_degradation_stats(&mut self) {
        self.stats.total_degradations += 1;
        self.stats.auto_degradations += 1;
    }

    /// 加载默认降级策略
    fn load_default_degradation_strategies(&mut self) -> Result<(), &'static str> {
        let strategies = vec![
            DegradationStrategy {
                id: "performance_degradation".to_string(),
                name: "Performance Degradation Strategy".to_string(),
                description: "Degrades performance to maintain service availability".to_string(),
                strategy_type: DegradationType::PerformanceDegradation,
                trigger_conditions: vec![
                    DegradationTrigger {
                        id: "high_cpu".to_string(),
                        trigger_type: TriggerType::ThresholdBased,
                        condition: TriggerCondition::CPUUsage {
                            threshold: 90.0,
                            duration: 300,
                        },
                        threshold: 90.0,
                        duration_seconds: 300,
                        immediate: false,
                    },
                    DegradationTrigger {
                        id: "high_memory".to_string(),
                        trigger_type: TriggerType::ThresholdBased,
                        condition: TriggerCondition::MemoryUsage {
                            threshold: 90.0,
                            duration: 300,
                        },
                        threshold: 90.0,
                        duration_seconds: 300,
                        immediate: false,
                    },
                ],
                degradation_actions: vec![
                    DegradationAction {
                        id: "reduce_quality".to_string(),
                        action_type: DegradationActionType::ReduceQuality,
                        name: "Reduce Service Quality".to_string(),
                        description: "Reduce quality settings to lower resource usage".to_string(),
                        parameters: {
                            let mut params = BTreeMap::new();
                            params.insert("quality_reduction".to_string(), "0.3".to_string());
                            params
                        },
                        execution_order: 1,
                        mandatory: true,
                        rollback_actions: vec![
                            RollbackAction {
                                description: "Restore original quality settings".to_string(),
                                action_type: RollbackActionType::RestoreQuality,
                                parameters: BTreeMap::new(),
                            },
                        ],
                    },
                    DegradationAction {
                        id: "enable_cache".to_string(),
                        action_type: DegradationActionType::EnableCache,
                        name: "Enable Caching".to_string(),
                        description: "Enable caching to reduce computational load".to_string(),
                        parameters: BTreeMap::new(),
                        execution_order: 2,
                        mandatory: false,
                        rollback_actions: vec![
                            RollbackAction {
                                description: "Disable caching".to_string(),
                                action_type: RollbackActionType::DisableCache,
                                parameters: BTreeMap::new(),
                            },
                        ],
                    },
                ],
                recovery_conditions: vec![
                    RecoveryCondition {
                        id: "resource_recovery".to_string(),
                        condition_type: RecoveryConditionType::ResourceSufficient,
                        description: "System resources are sufficient".to_string(),
                        recovery_threshold: 0.8,
                        stability_duration: 300,
                        auto_recovery: true,
                    },
                ],
                priority: 1,
                enabled: true,
                parameters: BTreeMap::new(),
                stats: StrategyStats::default(),
            },
            DegradationStrategy {
                id: "feature_degradation".to_string(),
                name: "Feature Degradation Strategy".to_string(),
                description: "Disables non-essential features to conserve resources".to_string(),
                strategy_type: DegradationType::FeatureDegradation,
                trigger_conditions: vec![
                    DegradationTrigger {
                        id: "resource_exhaustion".to_string(),
                        trigger_type: TriggerType::ThresholdBased,
                        condition: TriggerCondition::MemoryUsage {
                            threshold: 95.0,
                            duration: 180,
                        },
                        threshold: 95.0,
                        duration_seconds: 180,
                        immediate: true,
                    },
                ],
                degradation_actions: vec![
                    DegradationAction {
                        id: "disable_optional_features".to_string(),
                        action_type: DegradationActionType::DisableFeature,
                        name: "Disable Optional Features".to_string(),
                        description: "Disable optional and experimental features".to_string(),
                        parameters: {
                            let mut params = BTreeMap::new();
                            params.insert("feature_category".to_string(), "optional".to_string());
                            params
                        },
                        execution_order: 1,
                        mandatory: true,
                        rollback_actions: vec![
                            RollbackAction {
                                description: "Re-enable disabled features".to_string(),
                                action_type: RollbackActionType::EnableFeature,
                                parameters: BTreeMap::new(),
                            },
                        ],
                    },
                ],
                recovery_conditions: vec![
                    RecoveryCondition {
                        id: "memory_recovery".to_string(),
                        condition_type: RecoveryConditionType::ResourceSufficient,
                        description: "Memory usage is back to normal".to_string(),
                        recovery_threshold: 0.8,
                        stability_duration: 600,
                        auto_recovery: true,
                    },
                ],
                priority: 2,
                enabled: true,
                parameters: BTreeMap::new(),
                stats: StrategyStats::default(),
            },
        ];

        for strategy in strategies {
            self.degradation_strategies.insert(strategy.id.clone(), strategy);
        }

        Ok(())
    }

    /// 初始化功能管理器
    fn initialize_feature_manager(&mut self) -> Result<(), &'static str> {
        let features = vec![
            Feature {
                id: "advanced_analytics".to_string(),
                name: "Advanced Analytics".to_string(),
                description: "Advanced data analytics and reporting".to_string(),
                category: FeatureCategory::Optional,
                importance_level: ImportanceLevel::Normal,
                resource_requirements: ResourceRequirements::default(),
                quality_requirements: QualityRequirements::default(),
                enabled: true,
            },
            Feature {
                id: "real_time_notifications".to_string(),
                name: "Real-time Notifications".to_string(),
                description: "Real-time push notifications".to_string(),
                category: FeatureCategory::Important,
                importance_level: ImportanceLevel::Important,
                resource_requirements: ResourceRequirements {
                    cpu_requirement: 5.0,
                    memory_requirement: 256,
                    ..ResourceRequirements::default()
                },
                quality_requirements: QualityRequirements {
                    max_response_time_ms: 500,
                    ..QualityRequirements::default()
                },
                enabled: true,
            },
            Feature {
                id: "experimental_ai".to_string(),
                name: "Experimental AI Features".to_string(),
                description: "Experimental artificial intelligence features".to_string(),
                category: FeatureCategory::Experimental,
                importance_level: ImportanceLevel::Optional,
                resource_requirements: ResourceRequirements {
                    cpu_requirement: 20.0,
                    memory_requirement: 2048,
                    ..ResourceRequirements::default()
                },
                quality_requirements: QualityRequirements::default(),
                enabled: true,
            },
        ];

        for feature in features {
            let feature_id = feature.id.clone();
            self.feature_manager.features.insert(feature_id.clone(), feature);
            self.feature_manager.feature_states.insert(feature_id, FeatureState::Enabled);
        }

        Ok(())
    }

    /// 初始化负载管理器
    fn initialize_load_manager(&mut self) -> Result<(), &'static str> {
        let strategies = vec![
            LoadStrategy {
                id: "dynamic_allocation".to_string(),
                name: "Dynamic Load Allocation".to_string(),
                strategy_type: LoadStrategyType::DynamicAllocation,
                load_thresholds: LoadThresholds {
                    normal_threshold: 60.0,
                    high_threshold: 75.0,
                    overload_threshold: 90.0,
                    severe_overload_threshold: 95.0,
                },
                allocation_algorithm: AllocationAlgorithm::Adaptive,
                parameters: BTreeMap::new(),
            },
        ];

        for strategy in strategies {
            self.load_manager.load_strategies.insert(strategy.id.clone(), strategy);
        }

        Ok(())
    }

    /// 初始化资源管理器
    fn initialize_resource_manager(&mut self) -> Result<(), &'static str> {
        let pools = vec![
            ResourcePool {
                id: "cpu_pool".to_string(),
                name: "CPU Resource Pool".to_string(),
                resource_type: ResourceType::CPU,
                total_capacity: 100,
                allocated_capacity: 0,
                available_capacity: 100,
                reserved_capacity: 20,
                status: PoolStatus::Available,
            },
            ResourcePool {
                id: "memory_pool".to_string(),
                name: "Memory Resource Pool".to_string(),
                resource_type: ResourceType::Memory,
                total_capacity: 8192, // 8GB
                allocated_capacity: 0,
                available_capacity: 8192,
                reserved_capacity: 1024, // 1GB
                status: PoolStatus::Available,
            },
        ];

        for pool in pools {
            self.resource_manager.resource_pools.insert(pool.id.clone(), pool);
        }

        Ok(())
    }

    /// 初始化服务质量控制器
    fn initialize_quality_controllers(&mut self) -> Result<(), &'static str> {
        let controllers = vec![
            ServiceQualityController {
                id: "web_service".to_string(),
                service_name: "Web Service".to_string(),
                quality_metrics: {
                    let mut metrics = BTreeMap::new();
                    metrics.insert("response_time".to_string(), QualityMetric {
                        name: "Response Time".to_string(),
                        metric_type: MetricType::ResponseTime,
                        current_value: 50.0,
                        target_value: 100.0,
                        unit: "ms".to_string(),
                        weight: 0.4,
                        last_updated: crate::time::get_timestamp(),
                    });
                    metrics.insert("throughput".to_string(), QualityMetric {
                        name: "Throughput".to_string(),
                        metric_type: MetricType::Throughput,
                        current_value: 1000.0,
                        target_value: 500.0,
                        unit: "req/s".to_string(),
                        weight: 0.3,
                        last_updated: crate::time::get_timestamp(),
                    });
                    metrics.insert("error_rate".to_string(), QualityMetric {
                        name: "Error Rate".to_string(),
                        metric_type: MetricType::ErrorRate,
                        current_value: 0.5,
                        target_value: 1.0,
                        unit: "%".to_string(),
                        weight: 0.3,
                        last_updated: crate::time::get_timestamp(),
                    });
                    metrics
                },
                quality_thresholds: {
                    let mut thresholds = BTreeMap::new();
                    thresholds.insert("response_time".to_string(), QualityThreshold::default());
                    thresholds.insert("throughput".to_string(), QualityThreshold::default());
                    thresholds.insert("error_rate".to_string(), QualityThreshold::default());
                    thresholds
                },
                control_policies: Vec::new(),
                current_quality_level: QualityLevel::Good,
                quality_history: Vec::new(),
                status: ControllerStatus::Active,
            },
        ];

        for controller in controllers {
            self.quality_controllers.insert(controller.id.clone(), controller);
        }

        Ok(())
    }

    /// 获取活动降级
    pub fn get_active_degradations(&self) -> &BTreeMap<String, DegradationSession> {
        &self.active_degradations
    }

    /// 获取降级策略
    pub fn get_degradation_strategies(&self) -> &BTreeMap<String, DegradationStrategy> {
        &self.degradation_strategies
    }

    /// 获取服务质量控制器
    pub fn get_quality_controllers(&self) -> &BTreeMap<String, ServiceQualityController> {
        &self.quality_controllers
    }

    /// 获取统计信息
    pub fn get_statistics(&self) -> DegradationStats {
        self.stats.clone()
    }

    /// 更新配置
    pub fn update_config(&mut self, config: DegradationConfig) -> Result<(), &'static str> {
        self.config = config;
        Ok(())
    }

    /// 停止优雅降级管理器
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        // 恢复所有活动降级
        let session_ids: Vec<String> = self.active_degradations.keys().cloned().collect();
        for session_id in session_ids {
            let _ = self.attempt_recovery(&session_id);
        }

        // 清理所有数据
        self.degradation_strategies.clear();
        self.quality_controllers.clear();
        self.active_degradations.clear();

        crate::println!("[GracefulDegradation] Graceful degradation manager shutdown successfully");
        Ok(())
    }
}

/// 创建默认的优雅降级管理器
pub fn create_graceful_degradation_manager() -> Arc<Mutex<GracefulDegradationManager>> {
    Arc::new(Mutex::new(GracefulDegradationManager::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graceful_degradation_manager_creation() {
        let manager = GracefulDegradationManager::new();
        assert_eq!(manager.id, 1);
        assert!(manager.degradation_strategies.is_empty());
        assert!(manager.active_degradations.is_empty());
    }

    #[test]
    fn test_degradation_strategy_creation() {
        let strategy = DegradationStrategy {
            id: "test_strategy".to_string(),
            name: "Test Strategy".to_string(),
            description: "Test degradation strategy".to_string(),
            strategy_type: DegradationType::PerformanceDegradation,
            trigger_conditions: Vec::new(),
            degradation_actions: Vec::new(),
            recovery_conditions: Vec::new(),
            priority: 1,
            enabled: true,
            parameters: BTreeMap::new(),
            stats: StrategyStats::default(),
        };

        assert_eq!(strategy.id, "test_strategy");
        assert_eq!(strategy.priority, 1);
        assert!(strategy.enabled);
    }

    #[test]
    fn test_degradation_config_default() {
        let config = DegradationConfig::default();
        assert!(config.enable_auto_degradation);
        assert_eq!(config.max_concurrent_degradations, 5);
        assert!(config.enable_gradual_degradation);
    }
}