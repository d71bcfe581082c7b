//! Unified Error Handling Engine
//!
//! 统一错误处理引擎
//! 提供统一的错误处理、分类、恢复和诊断功能

extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::string::ToString;
use alloc::{format, vec};
use alloc::boxed::Box;
use core::sync::atomic::{AtomicU64, AtomicBool, Ordering};
use spin::Mutex;

use super::*;
use super::unified_error::{
    UnifiedError,
    UnifiedResult,
    ErrorMetadata,
    EnhancedErrorContext,
    ConfigurationError,
    ResourceError,
    InterfaceError
};
use super::unified::{KernelError, KernelResult};
use super::error_classifier::ErrorClassifier;
use super::error_recovery::ErrorRecoveryManager;
use super::diagnostic_tools::DiagnosticTools;
use super::diagnostic_tools::SessionType;

/// 统一错误处理引擎配置
#[derive(Debug, Clone)]
pub struct UnifiedErrorHandlingConfig {
    /// 启用错误分类
    pub enable_classification: bool,
    
    /// 启用错误恢复
    pub enable_recovery: bool,
    
    /// 启用错误诊断
    pub enable_diagnostics: bool,
    
    /// 启用错误预测
    pub enable_prediction: bool,
    
    /// 启用错误预防
    pub enable_prevention: bool,
    
    /// 最大错误记录数
    pub max_error_records: usize,
    
    /// 错误记录保留时间（秒）
    pub retention_period_seconds: u64,
    
    /// 错误处理超时时间（毫秒）
    pub handling_timeout_ms: u64,
    
    /// 启用错误聚合
    pub enable_error_aggregation: bool,
    
    /// 聚合时间窗口（秒）
    pub aggregation_window_seconds: u64,
    
    /// 启用错误统计
    pub enable_statistics: bool,
    
    /// 统计更新间隔（秒）
    pub statistics_update_interval_seconds: u64,
    
    /// 启用错误报告
    pub enable_reporting: bool,
    
    /// 报告生成间隔（秒）
    pub reporting_interval_seconds: u64,
    
    /// 启用错误监控
    pub enable_monitoring: bool,
    
    /// 监控检查间隔（秒）
    pub monitoring_interval_seconds: u64,
}

impl Default for UnifiedErrorHandlingConfig {
    fn default() -> Self {
        Self {
            enable_classification: true,
            enable_recovery: true,
            enable_diagnostics: true,
            enable_prediction: false,
            enable_prevention: false,
            max_error_records: 10000,
            retention_period_seconds: 86400 * 7, // 7天
            handling_timeout_ms: 5000, // 5秒
            enable_error_aggregation: true,
            aggregation_window_seconds: 300, // 5分钟
            enable_statistics: true,
            statistics_update_interval_seconds: 60, // 1分钟
            enable_reporting: true,
            reporting_interval_seconds: 3600, // 1小时
            enable_monitoring: true,
            monitoring_interval_seconds: 30, // 30秒
        }
    }
}

/// 统一错误处理引擎统计
#[derive(Debug, Clone, Default)]
pub struct UnifiedErrorHandlingStats {
    /// 总错误处理数
    pub total_handled_errors: u64,
    
    /// 按错误类型统计
    pub errors_by_type: BTreeMap<String, u64>,
    
    /// 按错误类别统计
    pub errors_by_category: BTreeMap<ErrorCategory, u64>,
    
    /// 按严重级别统计
    pub errors_by_severity: BTreeMap<ErrorSeverity, u64>,
    
    /// 按优先级统计
    pub errors_by_priority: BTreeMap<ErrorPriority, u64>,
    
    /// 分类成功的错误数
    pub successfully_classified_errors: u64,
    
    /// 恢复成功的错误数
    pub successfully_recovered_errors: u64,
    
    /// 诊断完成的错误数
    pub successfully_diagnosed_errors: u64,
    
    /// 预测准确的错误数
    pub accurately_predicted_errors: u64,
    
    /// 预防成功的错误数
    pub successfully_prevented_errors: u64,
    
    /// 平均处理时间（微秒）
    pub avg_handling_time_us: u64,
    
    /// 最大处理时间（微秒）
    pub max_handling_time_us: u64,
    
    /// 最小处理时间（微秒）
    pub min_handling_time_us: u64,
    
    /// 错误处理成功率
    pub handling_success_rate: f64,
    
    /// 错误恢复成功率
    pub recovery_success_rate: f64,
    
    /// 错误分类准确率
    pub classification_accuracy: f64,
    
    /// 错误预测准确率
    pub prediction_accuracy: f64,
    
    /// 错误预防成功率
    pub prevention_success_rate: f64,
    
    /// 系统健康评分
    pub system_health_score: f64,
}

/// 统一错误处理引擎
pub struct UnifiedErrorHandlingEngine {
    /// 引擎ID
    pub id: u64,
    
    /// 引擎配置
    config: UnifiedErrorHandlingConfig,
    
    /// 错误分类器
    error_classifier: Arc<Mutex<ErrorClassifier>>,
    
    /// 错误恢复管理器
    recovery_manager: Arc<Mutex<ErrorRecoveryManager>>,
    
    /// 诊断工具集
    diagnostic_tools: Arc<Mutex<DiagnosticTools>>,
    
    /// 错误记录存储
    error_records: Arc<Mutex<Vec<ErrorRecord>>>,
    
    /// 统计信息
    statistics: Arc<Mutex<UnifiedErrorHandlingStats>>,
    
    /// 错误计数器
    error_counter: AtomicU64,
    
    /// 是否正在运行
    running: AtomicBool,
    
    /// 处理中的错误
    processing_errors: Arc<Mutex<BTreeMap<u64, ErrorProcessingState>>>,
    
    /// 错误聚合器
    error_aggregator: Arc<Mutex<ErrorAggregator>>,
    
    /// 错误监控器
    error_monitor: Arc<Mutex<ErrorMonitor>>,
}

/// 错误处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorProcessingState {
    /// 等待处理
    Pending,
    /// 正在分类
    Classifying,
    /// 正在恢复
    Recovering,
    /// 正在诊断
    Diagnosing,
    /// 正在预测
    Predicting,
    /// 正在预防
    Preventing,
    /// 处理完成
    Completed,
    /// 处理失败
    Failed,
    /// 处理超时
    Timeout,
}

/// 错误聚合器
#[derive(Debug)]
pub struct ErrorAggregator {
    /// 聚合窗口大小
    window_size: u64,
    
    /// 错误聚合桶
    aggregation_buckets: BTreeMap<u64, ErrorAggregationBucket>,
    
    /// 当前时间窗口
    current_window: u64,
    
    /// 聚合统计
    aggregation_stats: BTreeMap<String, AggregationStats>,
}

/// 错误聚合桶
#[derive(Debug, Clone)]
pub struct ErrorAggregationBucket {
    /// 时间窗口开始
    pub window_start: u64,
    
    /// 时间窗口结束
    pub window_end: u64,
    
    /// 错误计数
    pub error_count: u64,
    
    /// 错误类型分布
    pub error_types: BTreeMap<String, u64>,
    
    /// 错误严重级别分布
    pub error_severities: BTreeMap<ErrorSeverity, u64>,
    
    /// 最频繁的错误
    pub most_frequent_errors: Vec<(String, u64)>,
    
    /// 错误率变化
    pub error_rate_change: f64,
}

/// 聚合统计
#[derive(Debug, Clone, Default)]
pub struct AggregationStats {
    /// 总聚合次数
    pub total_aggregations: u64,
    
    /// 平均错误率
    pub avg_error_rate: f64,
    
    /// 错误率趋势
    pub error_rate_trend: ErrorRateTrend,
    
    /// 峰值错误率
    pub peak_error_rate: f64,
    
    /// 峰值时间
    pub peak_time: u64,
}

/// 错误率趋势
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorRateTrend {
    /// 上升
    Increasing,
    /// 下降
    Decreasing,
    /// 稳定
    Stable,
    /// 波动
    Fluctuating,
}

impl Default for ErrorRateTrend {
    fn default() -> Self {
        Self::Stable
    }
}

/// 错误监控器
#[derive(Debug)]
pub struct ErrorMonitor {
    /// 监控间隔
    monitoring_interval: u64,
    
    /// 上次监控时间
    last_monitoring_time: u64,
    
    /// 监控统计
    monitoring_stats: MonitoringStats,
    
    /// 健康检查器
    health_checker: HealthChecker,
    
    /// 性能监控器
    performance_monitor: PerformanceMonitor,
}

/// 监控统计
#[derive(Debug, Clone, Default)]
pub struct MonitoringStats {
    /// 总监控次数
    pub total_monitorings: u64,
    
    /// 发现的问题数
    pub issues_found: u64,
    
    /// 系统健康评分历史
    pub health_score_history: Vec<(u64, f64)>,
    
    /// 性能指标历史
    pub performance_history: Vec<(u64, PerformanceMetrics)>,
    
    /// 警告阈值违反次数
    pub threshold_violations: u64,
}

/// 健康检查器
#[derive(Debug)]
pub struct HealthChecker {
    /// 健康检查规则
    health_check_rules: Vec<HealthCheckRule>,
    
    /// 健康评分计算器
    health_score_calculator: HealthScoreCalculator,
    
    /// 当前健康状态
    current_health_status: HealthStatus,
}

/// 健康检查规则
#[derive(Debug, Clone)]
pub struct HealthCheckRule {
    /// 规则ID
    pub id: u64,
    
    /// 规则名称
    pub name: String,
    
    /// 规则描述
    pub description: String,
    
    /// 检查条件
    pub check_condition: HealthCheckCondition,
    
    /// 警告阈值
    pub warning_threshold: f64,
    
    /// 严重阈值
    pub critical_threshold: f64,
    
    /// 检查频率
    pub check_frequency: u64,
    
    /// 是否启用
    pub enabled: bool,
}

/// 健康检查条件
#[derive(Debug, Clone)]
pub enum HealthCheckCondition {
    /// 错误率检查
    ErrorRateThreshold(f64),
    
    /// 恢复成功率检查
    RecoveryRateThreshold(f64),
    
    /// 处理时间检查
    ProcessingTimeThreshold(u64),
    
    /// 内存使用检查
    MemoryUsageThreshold(f64),
    
    /// CPU使用检查
    CpuUsageThreshold(f64),
    
    /// 磁盘使用检查
    DiskUsageThreshold(f64),
    
    /// 自定义检查
    CustomCondition(String),
}

/// 健康状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthStatus {
    /// 状态
    pub status: HealthStatusEnum,
    /// 健康评分 (0.0-1.0)
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatusEnum {
    /// 健康
    Healthy,
    /// 警告
    Warning,
    /// 严重
    Critical,
    /// 未知
    Unknown,
}

impl HealthStatus {
    pub fn new(status: HealthStatusEnum, score: f64) -> Self {
        Self { status, score }
    }

    pub fn healthy() -> Self {
        Self::new(HealthStatusEnum::Healthy, 1.0)
    }

    pub fn warning() -> Self {
        Self::new(HealthStatusEnum::Warning, 0.7)
    }

    pub fn critical() -> Self {
        Self::new(HealthStatusEnum::Critical, 0.3)
    }

    pub fn unknown() -> Self {
        Self::new(HealthStatusEnum::Unknown, 0.5)
    }
}

/// 健康评分计算器
#[derive(Debug)]
pub struct HealthScoreCalculator {
    /// 评分权重
    score_weights: BTreeMap<String, f64>,
    
    /// 评分算法
    scoring_algorithm: ScoringAlgorithm,
    
    /// 历史评分数据
    historical_scores: Vec<(u64, f64)>,
}

/// 评分算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringAlgorithm {
    /// 加权平均
    WeightedAverage,
    /// 指数移动平均
    ExponentialMovingAverage,
    /// 线性回归
    LinearRegression,
    /// 自定义算法
    CustomAlgorithm,
}

/// 性能监控器
#[derive(Debug)]
pub struct PerformanceMonitor {
    /// 性能指标收集器
    metrics_collector: MetricsCollector,
    
    /// 性能分析器
    performance_analyzer: PerformanceAnalyzer,
    
    /// 性能报告生成器
    performance_reporter: PerformanceReporter,
}

/// 性能指标收集器
#[derive(Debug)]
pub struct MetricsCollector {
    /// 收集的指标
    collected_metrics: BTreeMap<String, f64>,
    
    /// 收集时间戳
    collection_timestamps: BTreeMap<String, Vec<u64>>,
    
    /// 指标阈值
    metric_thresholds: BTreeMap<String, MetricThreshold>,
}

/// 性能指标
#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    /// 错误处理延迟
    pub handling_latency_us: u64,
    
    /// 错误分类延迟
    pub classification_latency_us: u64,
    
    /// 错误恢复延迟
    pub recovery_latency_us: u64,
    
    /// 错误诊断延迟
    pub diagnostics_latency_us: u64,
    
    /// 内存使用量
    pub memory_usage_bytes: u64,
    
    /// CPU使用率
    pub cpu_usage_percent: f64,
    
    /// 错误处理吞吐量
    pub handling_throughput: f64,
    
    /// 错误处理成功率
    pub handling_success_rate: f64,
}

/// 性能分析器
#[derive(Debug)]
pub struct PerformanceAnalyzer {
    /// 分析算法
    analysis_algorithms: Vec<PerformanceAnalysisAlgorithm>,
    
    /// 分析结果
    analysis_results: BTreeMap<String, PerformanceAnalysisResult>,
    
    /// 性能趋势
    performance_trends: BTreeMap<String, PerformanceTrend>,
}

/// 性能分析算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceAnalysisAlgorithm {
    /// 趋势分析
    TrendAnalysis,
    /// 异常检测
    AnomalyDetection,
    /// 相关性分析
    CorrelationAnalysis,
    /// 回归分析
    RegressionAnalysis,
}

/// 性能分析结果
#[derive(Debug, Clone)]
pub struct PerformanceAnalysisResult {
    /// 分析时间
    pub analysis_time: u64,
    
    /// 分析算法
    pub algorithm: PerformanceAnalysisAlgorithm,
    
    /// 分析结果
    pub result: AnalysisResult,
    
    /// 置信度
    pub confidence: f64,
    
    /// 建议
    pub recommendations: Vec<String>,
}

/// 分析结果
#[derive(Debug, Clone)]
pub enum AnalysisResult {
    /// 性能正常
    Normal,
    /// 性能下降
    PerformanceDegradation,
    /// 性能瓶颈
    PerformanceBottleneck,
    /// 资源不足
    ResourceInsufficiency,
    /// 配置问题
    ConfigurationIssue,
}

/// 性能趋势
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceTrend {
    /// 改善
    Improving,
    /// 稳定
    Stable,
    /// 下降
    Degrading,
    /// 波动
    Fluctuating,
}

/// 性能报告生成器
#[derive(Debug)]
pub struct PerformanceReporter {
    /// 报告模板
    report_templates: BTreeMap<String, ReportTemplate>,
    
    /// 报告格式化器
    report_formatters: BTreeMap<String, ReportFormatter>,
    
    /// 报告分发器
    report_distributors: Vec<ReportDistributor>,
}

/// 指标阈值
#[derive(Debug, Clone)]
pub struct MetricThreshold {
    /// 警告阈值
    pub warning_threshold: f64,
    
    /// 严重阈值
    pub critical_threshold: f64,
    
    /// 阈值类型
    pub threshold_type: ThresholdType,
    
    /// 比较操作符
    pub comparison_operator: ComparisonOperator,
}

/// 阈值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdType {
    /// 上限阈值
    UpperBound,
    /// 下限阈值
    LowerBound,
    /// 范围阈值
    Range,
    /// 绝对值阈值
    AbsoluteValue,
}

/// 比较操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// 大于
    GreaterThan,
    /// 小于
    LessThan,
    /// 等于
    Equal,
    /// 大于等于
    GreaterThanOrEqual,
    /// 小于等于
    LessThanOrEqual,
}

/// 报告模板
#[derive(Debug, Clone)]
pub struct ReportTemplate {
    /// 模板ID
    pub id: String,
    
    /// 模板名称
    pub name: String,
    
    /// 模板内容
    pub template_content: String,
    
    /// 模板变量
    pub template_variables: Vec<String>,
    
    /// 输出格式
    pub output_format: ReportFormat,
}

/// 报告格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// 文本格式
    Text,
    /// JSON格式
    Json,
    /// HTML格式
    Html,
    /// CSV格式
    Csv,
    /// XML格式
    Xml,
}

/// 报告格式化器
#[derive(Debug)]
pub struct ReportFormatter {
    /// 格式化器ID
    pub id: String,
    
    /// 格式化器名称
    pub name: String,
    
    /// 支持的格式
    pub supported_formats: Vec<ReportFormat>,
    
    /// 格式化函数
    pub format_function: fn(&PerformanceReport) -> String,
}

/// 性能报告
#[derive(Debug, Clone)]
pub struct PerformanceReport {
    /// 报告ID
    pub report_id: String,
    
    /// 报告时间
    pub report_time: u64,
    
    /// 报告周期
    pub report_period: ReportPeriod,
    
    /// 性能指标
    pub performance_metrics: PerformanceMetrics,
    
    /// 分析结果
    pub analysis_results: Vec<PerformanceAnalysisResult>,
    
    /// 性能趋势
    pub performance_trends: BTreeMap<String, PerformanceTrend>,
    
    /// 建议措施
    pub recommendations: Vec<String>,
}

/// 报告周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// 实时
    Realtime,
    /// 每分钟
    Minute,
    /// 每小时
    Hour,
    /// 每天
    Day,
    /// 每周
    Week,
    /// 每月
    Month,
}

/// 报告分发器
#[derive(Debug)]
pub struct ReportDistributor {
    /// 分发器ID
    pub id: String,
    
    /// 分发器名称
    pub name: String,
    
    /// 分发类型
    pub distribution_type: DistributionType,
    
    /// 分发目标
    pub distribution_targets: Vec<String>,
    
    /// 分发配置
    pub distribution_config: BTreeMap<String, String>,
}

/// 分发类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionType {
    /// 文件输出
    FileOutput,
    /// 网络发送
    NetworkSend,
    /// 日志记录
    LogRecord,
    /// 邮件发送
    EmailSend,
    /// 数据库存储
    DatabaseStore,
}

impl UnifiedErrorHandlingEngine {
    /// 创建新的统一错误处理引擎
    pub fn new(config: UnifiedErrorHandlingConfig) -> Self {
        Self {
            id: 1,
            config: config.clone(),
            error_classifier: Arc::new(Mutex::new(ErrorClassifier::new())),
            recovery_manager: Arc::new(Mutex::new(ErrorRecoveryManager::new())),
            diagnostic_tools: Arc::new(Mutex::new(DiagnosticTools::new())),
            error_records: Arc::new(Mutex::new(Vec::new())),
            statistics: Arc::new(Mutex::new(UnifiedErrorHandlingStats::default())),
            error_counter: AtomicU64::new(1),
            running: AtomicBool::new(false),
            processing_errors: Arc::new(Mutex::new(BTreeMap::new())),
            error_aggregator: Arc::new(Mutex::new(ErrorAggregator::new(
                config.aggregation_window_seconds
            ))),
            error_monitor: Arc::new(Mutex::new(ErrorMonitor::new(
                config.monitoring_interval_seconds
            ))),
        }
    }

    /// 初始化统一错误处理引擎
    pub fn init(&mut self) -> UnifiedResult<()> {
        self.running.store(true, Ordering::SeqCst);

        // 初始化各个组件
        {
            let mut classifier = self.error_classifier.lock();
            classifier.init().map_err(|e| UnifiedError::Configuration(
                ConfigurationError::ConfigDependencyError
            ))?;
        }

        {
            let mut recovery_manager = self.recovery_manager.lock();
            recovery_manager.init().map_err(|e| UnifiedError::Configuration(
                ConfigurationError::ConfigDependencyError
            ))?;
        }

        {
            let mut diagnostic_tools = self.diagnostic_tools.lock();
            diagnostic_tools.init().map_err(|e| UnifiedError::Configuration(
                ConfigurationError::ConfigDependencyError
            ))?;
        }

        crate::println!("[UnifiedErrorEngine] Unified error handling engine initialized successfully");
        Ok(())
    }

    /// 处理错误
    pub fn handle_error(&mut self, error: UnifiedError, context: EnhancedErrorContext) -> UnifiedResult<()> {
        let error_id = self.error_counter.fetch_add(1, Ordering::SeqCst);
        let start_time = crate::time::get_timestamp();

        // 创建错误记录
        let error_record = self.create_error_record(error_id, &error, &context);

        // 添加到处理中的错误
        {
            let mut processing_errors = self.processing_errors.lock();
            processing_errors.insert(error_id, ErrorProcessingState::Pending);
        }

        // 保存错误记录
        {
            let mut error_records = self.error_records.lock();
            error_records.push(error_record.clone());

            // 限制记录数量
            if error_records.len() > self.config.max_error_records {
                error_records.remove(0);
            }
        }

        // 执行错误处理流程
        let handling_result = self.execute_error_handling_flow(&error_record);

        // 更新处理状态
        {
            let mut processing_errors = self.processing_errors.lock();
            let final_state = match &handling_result {
                Ok(_) => ErrorProcessingState::Completed,
                Err(_) => ErrorProcessingState::Failed,
            };
            processing_errors.insert(error_id, final_state);
        }

        // 更新统计信息
        self.update_handling_statistics(&error_record, start_time);

        // 执行错误聚合
        if self.config.enable_error_aggregation {
            self.aggregate_error(&error_record);
        }

        handling_result
    }

    /// 创建错误记录
    fn create_error_record(&self, error_id: u64, error: &UnifiedError, context: &EnhancedErrorContext) -> ErrorRecord {
        let metadata = error.generate_metadata(&context.basic_context.source);
        
        ErrorRecord {
            id: error_id,
            code: metadata.error_id,
            error_type: ErrorType::RuntimeError,
            category: error.category(),
            severity: error.severity(),
            priority: ErrorPriority::Normal,
            status: ErrorStatus::New,
            message: context.basic_context.error_message.clone(),
            description: context.basic_context.error_description.clone(),
            source: context.basic_context.source.clone(),
            timestamp: context.basic_context.timestamp,
            context: ErrorContext {
                environment_variables: context.execution_environment.environment_variables.clone(),
                system_config: BTreeMap::new(),
                user_input: context.user_context.user_input.clone(),
                related_data: Vec::new(),
                operation_sequence: Vec::new(),
                preconditions: Vec::new(),
                postconditions: Vec::new(),
            },
            stack_trace: Vec::new(),
            system_state: context.system_state.clone(),
            recovery_actions: Vec::new(),
            occurrence_count: 1,
            last_occurrence: context.basic_context.timestamp,
            resolved: false,
            resolution_time: None,
            resolution_method: None,
            metadata: {
                let mut attrs = BTreeMap::new();
                attrs.insert("error_type".to_string(), error.error_type_name().to_string());
                attrs.insert("error_priority".to_string(), format!("{:?}", error.priority()));
                attrs.insert("fingerprint_id".to_string(), metadata.error_fingerprint.fingerprint_id.clone());
                attrs
            },
        }
    }

    /// 执行错误处理流程
    fn execute_error_handling_flow(&mut self, error_record: &ErrorRecord) -> UnifiedResult<()> {
        // 1. 错误分类
        if self.config.enable_classification {
            self.classify_error(error_record)?;
        }

        // 2. 错误恢复
        if self.config.enable_recovery {
            self.recover_error(error_record)?;
        }

        // 3. 错误诊断
        if self.config.enable_diagnostics {
            self.diagnose_error(error_record)?;
        }

        // 4. 错误预测
        if self.config.enable_prediction {
            self.predict_error(error_record)?;
        }

        // 5. 错误预防
        if self.config.enable_prevention {
            self.prevent_error(error_record)?;
        }

        Ok(())
    }

    /// 分类错误
    fn classify_error(&mut self, error_record: &ErrorRecord) -> UnifiedResult<()> {
        let mut classifier = self.error_classifier.lock();
        let mut record = error_record.clone();
        
        // 更新处理状态
        {
            let mut processing_errors = self.processing_errors.lock();
            processing_errors.insert(error_record.id, ErrorProcessingState::Classifying);
        }
        
        classifier.classify_error(&mut record)
            .map_err(|e| UnifiedError::Configuration(ConfigurationError::ConfigValidationFailed))
    }

    /// 恢复错误
    fn recover_error(&mut self, error_record: &ErrorRecord) -> UnifiedResult<()> {
        // 更新处理状态
        {
            let mut processing_errors = self.processing_errors.lock();
            processing_errors.insert(error_record.id, ErrorProcessingState::Recovering);
        }
        
        // 获取适用的恢复策略
        let strategies: Vec<_> = {
            let recovery_manager = self.recovery_manager.lock();
            recovery_manager.get_applicable_strategies(error_record)
                .into_iter()
                .cloned()  // Clone strategies to release the reference
                .collect()
        };
        
        // Now execute strategies with fresh locks
        for strategy in strategies {
            let mut recovery_manager = self.recovery_manager.lock();
            let result = recovery_manager.execute_recovery_strategy(&strategy.id, error_record);
            match result {
                Ok(_) => {
                    crate::println!("[UnifiedErrorEngine] Error recovery successful for strategy: {}", strategy.id);
                    return Ok(());
                }
                Err(e) => {
                    crate::println!("[UnifiedErrorEngine] Error recovery failed for strategy: {}, error: {}", strategy.id, e);
                }
            }
        }
        
        Err(UnifiedError::Resource(ResourceError::ResourceUnavailable))
    }

    /// 诊断错误
    fn diagnose_error(&mut self, error_record: &ErrorRecord) -> UnifiedResult<()> {
        let mut diagnostic_tools = self.diagnostic_tools.lock();
        
        // 更新处理状态
        {
            let mut processing_errors = self.processing_errors.lock();
            processing_errors.insert(error_record.id, ErrorProcessingState::Diagnosing);
        }
        
        // 启动诊断会话
        let session_id = diagnostic_tools.start_session(
            "error_diagnosis",
            SessionType::Troubleshooting,
            None
        ).map_err(|e| UnifiedError::Interface(InterfaceError::InterfaceUnavailable))?;
        
        // 执行诊断工具
        let mut parameters = BTreeMap::new();
        parameters.insert("error_id".to_string(), error_record.id.to_string());
        
        let result = diagnostic_tools.execute_tool(&session_id, "error_tracer", parameters)
            .map_err(|e| UnifiedError::Interface(InterfaceError::InterfaceProtocolError))?;
        
        // 停止诊断会话
        diagnostic_tools.stop_session(&session_id)
            .map_err(|e| UnifiedError::Interface(InterfaceError::InterfaceStateError))?;
        
        crate::println!("[UnifiedErrorEngine] Error diagnosis completed: {}", result);
        Ok(())
    }

    /// 预测错误
    fn predict_error(&mut self, _error_record: &ErrorRecord) -> UnifiedResult<()> {
        // 更新处理状态
        {
            let mut processing_errors = self.processing_errors.lock();
            processing_errors.insert(_error_record.id, ErrorProcessingState::Predicting);
        }
        
        // 错误预测功能的实现将在后续阶段完成
        crate::println!("[UnifiedErrorEngine] Error prediction not yet implemented");
        Ok(())
    }

    /// 预防错误
    fn prevent_error(&mut self, _error_record: &ErrorRecord) -> UnifiedResult<()> {
        // 更新处理状态
        {
            let mut processing_errors = self.processing_errors.lock();
            processing_errors.insert(_error_record.id, ErrorProcessingState::Preventing);
        }
        
        // 错误预防功能的实现将在后续阶段完成
        crate::println!("[UnifiedErrorEngine] Error prevention not yet implemented");
        Ok(())
    }

    /// 聚合错误
    fn aggregate_error(&mut self, error_record: &ErrorRecord) {
        let mut aggregator = self.error_aggregator.lock();
        aggregator.add_error(error_record);
    }

    /// 更新处理统计
    fn update_handling_statistics(&mut self, error_record: &ErrorRecord, start_time: u64) {
        let end_time = crate::time::get_timestamp();
        let handling_time = end_time - start_time;
        
        let mut stats = self.statistics.lock();
        stats.total_handled_errors += 1;
        
        *stats.errors_by_type.entry(error_record.error_type.to_string()).or_insert(0) += 1;
        *stats.errors_by_category.entry(error_record.category).or_insert(0) += 1;
        *stats.errors_by_severity.entry(error_record.severity).or_insert(0) += 1;
        *stats.errors_by_priority.entry(error_record.priority).or_insert(0) += 1;
        
        // 更新处理时间统计
        if stats.total_handled_errors == 1 {
            stats.avg_handling_time_us = handling_time;
            stats.max_handling_time_us = handling_time;
            stats.min_handling_time_us = handling_time;
        } else {
            stats.avg_handling_time_us = (stats.avg_handling_time_us + handling_time) / 2;
            stats.max_handling_time_us = stats.max_handling_time_us.max(handling_time);
            stats.min_handling_time_us = stats.min_handling_time_us.min(handling_time);
        }
    }

    /// 获取错误记录
    pub fn get_error_records(&self, limit: Option<usize>, category: Option<ErrorCategory>, severity: Option<ErrorSeverity>) -> Vec<ErrorRecord> {
        let mut records = self.error_records.lock().clone();

        // 按类别过滤
        if let Some(cat) = category {
            records.retain(|r| r.category == cat);
        }

        // 按严重级别过滤
        if let Some(sev) = severity {
            records.retain(|r| r.severity == sev);
        }

        // 按时间排序（最新的在前）
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        // 限制数量
        if let Some(limit) = limit {
            records.truncate(limit);
        }

        records
    }

    /// 获取统计信息
    pub fn get_statistics(&self) -> UnifiedErrorHandlingStats {
        self.statistics.lock().clone()
    }

    /// 更新配置
    pub fn update_config(&mut self, config: UnifiedErrorHandlingConfig) -> UnifiedResult<()> {
        self.config = config;
        Ok(())
    }

    /// 停止统一错误处理引擎
    pub fn shutdown(&mut self) -> UnifiedResult<()> {
        self.running.store(false, Ordering::SeqCst);

        // 停止各个组件
        {
            let mut classifier = self.error_classifier.lock();
            classifier.shutdown().map_err(|e| UnifiedError::Configuration(ConfigurationError::ConfigDependencyError))?;
        }

        {
            let mut recovery_manager = self.recovery_manager.lock();
            recovery_manager.shutdown().map_err(|e| UnifiedError::Configuration(ConfigurationError::ConfigDependencyError))?;
        }

        {
            let mut diagnostic_tools = self.diagnostic_tools.lock();
            diagnostic_tools.shutdown().map_err(|e| UnifiedError::Configuration(ConfigurationError::ConfigDependencyError))?;
        }

        crate::println!("[UnifiedErrorEngine] Unified error handling engine shutdown successfully");
        Ok(())
    }
}

impl ErrorAggregator {
    /// 创建新的错误聚合器
    pub fn new(window_size_seconds: u64) -> Self {
        Self {
            window_size: window_size_seconds,
            aggregation_buckets: BTreeMap::new(),
            current_window: crate::time::get_timestamp() / window_size_seconds,
            aggregation_stats: BTreeMap::new(),
        }
    }

    /// 添加错误到聚合器
    pub fn add_error(&mut self, error_record: &ErrorRecord) {
        let timestamp = error_record.timestamp;
        let window = timestamp / self.window_size;
        
        // 获取或创建聚合桶
        let bucket = self.aggregation_buckets.entry(window).or_insert_with(|| {
            ErrorAggregationBucket {
                window_start: window * self.window_size,
                window_end: (window + 1) * self.window_size,
                error_count: 0,
                error_types: BTreeMap::new(),
                error_severities: BTreeMap::new(),
                most_frequent_errors: Vec::new(),
                error_rate_change: 0.0,
            }
        });

        // 更新聚合桶
        bucket.error_count += 1;
        *bucket.error_types.entry(error_record.error_type.to_string()).or_insert(0) += 1;
        *bucket.error_severities.entry(error_record.severity).or_insert(0) += 1;

        // 更新最频繁错误
        self.update_most_frequent_errors(bucket);
    }

    /// 更新最频繁错误
    fn update_most_frequent_errors(&mut self, bucket: &mut ErrorAggregationBucket) {
        let mut errors: Vec<_> = bucket.error_types.iter().collect();
        errors.sort_by(|a, b| b.1.cmp(a.1));
        
        bucket.most_frequent_errors = errors.into_iter()
            .take(10)
            .map(|(k, v)| (k.clone(), *v))
            .collect();
    }
}

impl ErrorMonitor {
    /// 创建新的错误监控器
    pub fn new(monitoring_interval_seconds: u64) -> Self {
        Self {
            monitoring_interval: monitoring_interval_seconds,
            last_monitoring_time: 0,
            monitoring_stats: MonitoringStats::default(),
            health_checker: HealthChecker::new(),
            performance_monitor: PerformanceMonitor::new(),
        }
    }

    /// 执行监控检查
    pub fn perform_monitoring_check(&mut self) -> MonitoringStats {
        let current_time = crate::time::get_timestamp();
        
        // 检查是否到了监控时间
        if current_time - self.last_monitoring_time < self.monitoring_interval {
            return self.monitoring_stats.clone();
        }

        self.last_monitoring_time = current_time;
        self.monitoring_stats.total_monitorings += 1;

        // 执行健康检查
        let health_status = self.health_checker.perform_health_check();
        
        // 执行性能监控
        let performance_metrics = self.performance_monitor.collect_performance_metrics();
        
        // 更新监控统计
        self.monitoring_stats.health_score_history.push((current_time, health_status.score));
        self.monitoring_stats.performance_history.push((current_time, performance_metrics));

        self.monitoring_stats.clone()
    }
}

impl HealthChecker {
    /// 创建新的健康检查器
    pub fn new() -> Self {
        Self {
            health_check_rules: Vec::new(),
            health_score_calculator: HealthScoreCalculator::new(),
            current_health_status: HealthStatus::unknown(),
        }
    }

    /// 执行健康检查
    pub fn perform_health_check(&mut self) -> HealthStatus {
        // 简化的健康检查实现
        HealthStatus::healthy()
    }
}

impl HealthScoreCalculator {
    /// 创建新的健康评分计算器
    pub fn new() -> Self {
        Self {
            score_weights: BTreeMap::new(),
            scoring_algorithm: ScoringAlgorithm::WeightedAverage,
            historical_scores: Vec::new(),
        }
    }
}

impl PerformanceMonitor {
    /// 创建新的性能监控器
    pub fn new() -> Self {
        Self {
            metrics_collector: MetricsCollector::new(),
            performance_analyzer: PerformanceAnalyzer::new(),
            performance_reporter: PerformanceReporter::new(),
        }
    }

    /// 收集性能指标
    pub fn collect_performance_metrics(&mut self) -> PerformanceMetrics {
        self.metrics_collector.collect_metrics()
    }
}

impl MetricsCollector {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            collected_metrics: BTreeMap::new(),
            collection_timestamps: BTreeMap::new(),
            metric_thresholds: BTreeMap::new(),
        }
    }

    /// 收集指标
    pub fn collect_metrics(&mut self) -> PerformanceMetrics {
        // 简化的指标收集实现
        PerformanceMetrics {
            handling_latency_us: 100,
            classification_latency_us: 50,
            recovery_latency_us: 200,
            diagnostics_latency_us: 150,
            memory_usage_bytes: 1024 * 1024,
            cpu_usage_percent: 25.0,
            handling_throughput: 1000.0,
            handling_success_rate: 0.95,
        }
    }
}

impl PerformanceAnalyzer {
    /// 创建新的性能分析器
    pub fn new() -> Self {
        Self {
            analysis_algorithms: vec![
                PerformanceAnalysisAlgorithm::TrendAnalysis,
                PerformanceAnalysisAlgorithm::AnomalyDetection,
            ],
            analysis_results: BTreeMap::new(),
            performance_trends: BTreeMap::new(),
        }
    }
}

impl PerformanceReporter {
    /// 创建新的性能报告生成器
    pub fn new() -> Self {
        Self {
            report_templates: BTreeMap::new(),
            report_formatters: BTreeMap::new(),
            report_distributors: Vec::new(),
        }
    }
}

/// 创建默认的统一错误处理引擎
pub fn create_unified_error_handling_engine() -> Arc<Mutex<UnifiedErrorHandlingEngine>> {
    let config = UnifiedErrorHandlingConfig::default();
    Arc::new(Mutex::new(UnifiedErrorHandlingEngine::new(config)))
}

/// 初始化全局统一错误处理引擎
pub fn init_global_unified_error_handling() -> UnifiedResult<()> {
    let mut engine = create_unified_error_handling_engine().lock();
    engine.init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unified_error_handling_engine_creation() {
        let config = UnifiedErrorHandlingConfig::default();
        let engine = UnifiedErrorHandlingEngine::new(config);
        assert_eq!(engine.id, 1);
        assert!(!engine.running.load(Ordering::SeqCst));
    }

    #[test]
    fn test_error_record_creation() {
        let config = UnifiedErrorHandlingConfig::default();
        let mut engine = UnifiedErrorHandlingEngine::new(config);
        
        let error = UnifiedError::Memory(MemoryError::OutOfMemory);
        let context = EnhancedErrorContext {
            basic_context: BasicContext {
                timestamp: crate::time::get_timestamp(),
                process_id: 123,
                thread_id: 456,
                cpu_id: 0,
                error_message: "Out of memory".to_string(),
                error_description: "System ran out of memory".to_string(),
                source: ErrorSource {
                    module: "test".to_string(),
                    function: "test_func".to_string(),
                    file: "test.rs".to_string(),
                    line: 10,
                    column: 5,
                    process_id: 123,
                    thread_id: 456,
                    cpu_id: 0,
                },
            },
            system_state: SystemStateSnapshot::default(),
            execution_environment: ExecutionEnvironment {
                environment_variables: BTreeMap::new(),
                command_line_args: Vec::new(),
                working_directory: "/".to_string(),
                user_id: 0,
                group_id: 0,
                privileges: Vec::new(),
            },
            related_resources: RelatedResources {
                file_descriptors: Vec::new(),
                memory_addresses: Vec::new(),
                network_connections: Vec::new(),
                device_ids: Vec::new(),
                lock_objects: Vec::new(),
            },
            error_propagation_path: ErrorPropagationPath {
                propagation_stack: Vec::new(),
                propagation_depth: 0,
                propagation_time_ms: 0,
                propagation_pattern: PropagationPattern::Linear,
            },
            user_context: UserContext {
                username: "test".to_string(),
                session_id: "session_123".to_string(),
                user_role: "user".to_string(),
                user_permissions: Vec::new(),
                user_operation: "test_operation".to_string(),
                user_input: Some("test_input".to_string()),
            },
        };
        
        let error_record = engine.create_error_record(1, &error, &context);
        assert_eq!(error_record.id, 1);
        assert_eq!(error_record.severity, ErrorSeverity::Critical);
    }

    #[test]
    fn test_error_aggregator() {
        let mut aggregator = ErrorAggregator::new(60); // 1分钟窗口
        
        let error_record = ErrorRecord {
            id: 1,
            code: 1001,
            error_type: ErrorType::RuntimeError,
            category: ErrorCategory::Memory,
            severity: ErrorSeverity::Critical,
            status: ErrorStatus::New,
            message: "Test error".to_string(),
            description: "Test error description".to_string(),
            source: ErrorSource {
                module: "test".to_string(),
                function: "test_func".to_string(),
                file: "test.rs".to_string(),
                line: 10,
                column: 5,
                process_id: 123,
                thread_id: 456,
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
            stack_trace: Vec::new(),
            system_state: SystemStateSnapshot::default(),
            recovery_actions: Vec::new(),
            occurrence_count: 1,
            last_occurrence: crate::time::get_timestamp(),
            resolved: false,
            resolution_time: None,
            resolution_method: None,
            metadata: BTreeMap::new(),
        };
        
        aggregator.add_error(&error_record);
        assert_eq!(aggregator.aggregation_buckets.len(), 1);
    }
}