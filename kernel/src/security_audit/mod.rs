// Security Audit Module

extern crate alloc;
//
// 安全审计模块
// 提供全面的安全审计功能，包括事件记录、日志分析、合规检查等

pub mod events;
pub mod logging;
pub mod compliance;
pub mod forensics;
pub mod analysis;
pub mod reporting;
pub mod monitoring;

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::{format, vec};
use alloc::string::String;
use alloc::string::ToString;
use core::sync::atomic::{AtomicU64, AtomicBool, Ordering};
use spin::Mutex;

use crate::security::audit::{
    AuditEvent, AuditEventType, AuditSeverity, AuditFilter, AuditStats
};

/// 审计子系统状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityAuditStatus {
    /// 未初始化
    Uninitialized,
    /// 初始化中
    Initializing,
    /// 运行中
    Running,
    /// 停止中
    Stopping,
    /// 已停止
    Stopped,
    /// 错误状态
    Error,
}

/// 审计配置
#[derive(Debug, Clone)]
pub struct SecurityAuditConfig {
    /// 是否启用审计
    pub enabled: bool,
    /// 审计模式
    pub mode: AuditMode,
    /// 日志级别
    pub log_level: AuditLogLevel,
    /// 合规标准
    pub compliance_standards: Vec<ComplianceStandard>,
    /// 审计规则
    pub audit_rules: Vec<AuditRule>,
    /// 事件过滤器
    pub event_filters: Vec<EventFilter>,
    /// 告警配置
    pub alert_config: AlertConfig,
    /// 存储配置
    pub storage_config: StorageConfig,
    /// 分析配置
    pub analysis_config: AnalysisConfig,
    /// 报告配置
    pub reporting_config: ReportingConfig,
}

impl Default for SecurityAuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: AuditMode::Standard,
            log_level: AuditLogLevel::Info,
            compliance_standards: vec![ComplianceStandard::SOC2, ComplianceStandard::PCI_DSS],
            audit_rules: Vec::new(),
            event_filters: Vec::new(),
            alert_config: AlertConfig::default(),
            storage_config: StorageConfig::default(),
            analysis_config: AnalysisConfig::default(),
            reporting_config: ReportingConfig::default(),
        }
    }
}

/// 审计模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditMode {
    /// 标准模式
    Standard,
    /// 严格模式
    Strict,
    /// 高级模式
    Advanced,
    /// 调试模式
    Debug,
}

/// 审计日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AuditLogLevel {
    /// 调试
    Debug = 0,
    /// 信息
    Info = 1,
    /// 警告
    Warning = 2,
    /// 错误
    Error = 3,
    /// 严重
    Critical = 4,
}

/// 合规标准
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComplianceStandard {
    /// SOC 2
    SOC2,
    /// PCI DSS
    PCI_DSS,
    /// ISO 27001
    ISO_27001,
    /// GDPR
    GDPR,
    /// HIPAA
    HIPAA,
    /// NIST
    NIST,
    /// SOX
    SOX,
    /// FIPS
    FIPS,
}

/// 审计规则
#[derive(Debug, Clone)]
pub struct AuditRule {
    /// 规则ID
    pub id: u64,
    /// 规则名称
    pub name: String,
    /// 规则描述
    pub description: String,
    /// 规则类型
    pub rule_type: AuditRuleType,
    /// 规则条件
    pub conditions: Vec<AuditCondition>,
    /// 规则动作
    pub actions: Vec<AuditAction>,
    /// 规则优先级
    pub priority: u8,
    /// 是否启用
    pub enabled: bool,
}

/// 审计规则类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditRuleType {
    /// 事件匹配规则
    EventMatch,
    /// 行为分析规则
    BehaviorAnalysis,
    /// 异常检测规则
    AnomalyDetection,
    /// 合规检查规则
    ComplianceCheck,
    /// 安全策略规则
    SecurityPolicy,
}

/// 审计条件
#[derive(Debug, Clone)]
pub struct AuditCondition {
    /// 条件字段
    pub field: String,
    /// 操作符
    pub operator: AuditOperator,
    /// 值
    pub value: String,
}

/// 审计操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOperator {
    /// 等于
    Equals,
    /// 不等于
    NotEquals,
    /// 包含
    Contains,
    /// 不包含
    NotContains,
    /// 大于
    GreaterThan,
    /// 大于等于
    GreaterThanOrEqual,
    /// 小于
    LessThan,
    /// 小于等于
    LessThanOrEqual,
    /// 正则匹配
    Regex,
}

/// 审计动作
#[derive(Debug, Clone)]
pub enum AuditAction {
    /// 记录日志
    Log,
    /// 生成告警
    Alert,
    /// 阻止操作
    Block,
    /// 发送通知
    Notify,
    /// 执行脚本
    ExecuteScript(String),
    /// 调用API
    CallApi(String),
}

/// 事件过滤器
#[derive(Debug, Clone)]
pub struct EventFilter {
    /// 过滤器ID
    pub id: u64,
    /// 过滤器名称
    pub name: String,
    /// 过滤器类型
    pub filter_type: FilterType,
    /// 过滤条件
    pub conditions: Vec<AuditCondition>,
    /// 是否启用
    pub enabled: bool,
}

/// 过滤器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    /// 包含过滤器
    Include,
    /// 排除过滤器
    Exclude,
    /// 转换过滤器
    Transform,
}

/// 告警配置
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// 是否启用告警
    pub enabled: bool,
    /// 告警级别
    pub alert_levels: Vec<AuditSeverity>,
    /// 告警通道
    pub alert_channels: Vec<AlertChannel>,
    /// 告警规则
    pub alert_rules: Vec<AlertRule>,
    /// 告警频率限制
    pub rate_limit: AlertRateLimit,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            alert_levels: vec![AuditSeverity::Warning, AuditSeverity::Error, AuditSeverity::Critical],
            alert_channels: vec![AlertChannel::Log, AlertChannel::Console],
            alert_rules: Vec::new(),
            rate_limit: AlertRateLimit::default(),
        }
    }
}

/// 告警通道
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertChannel {
    /// 日志
    Log,
    /// 控制台
    Console,
    /// 邮件
    Email,
    /// 短信
    SMS,
    /// Webhook
    Webhook,
    /// SNMP Trap
    SnmpTrap,
    /// Syslog
    Syslog,
}

/// 告警规则
#[derive(Debug, Clone)]
pub struct AlertRule {
    /// 规则ID
    pub id: u64,
    /// 规则名称
    pub name: String,
    /// 规则条件
    pub conditions: Vec<AuditCondition>,
    /// 告警消息
    pub message: String,
    /// 告警级别
    pub severity: AuditSeverity,
    /// 告警通道
    pub channels: Vec<AlertChannel>,
}

/// 告警频率限制
#[derive(Debug, Clone)]
pub struct AlertRateLimit {
    /// 时间窗口（秒）
    pub time_window: u64,
    /// 最大告警次数
    pub max_alerts: u32,
}

impl Default for AlertRateLimit {
    fn default() -> Self {
        Self {
            time_window: 300, // 5分钟
            max_alerts: 10,
        }
    }
}

/// 存储配置
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// 存储类型
    pub storage_type: StorageType,
    /// 存储路径
    pub storage_path: String,
    /// 最大文件大小
    pub max_file_size: u64,
    /// 保留文件数量
    pub retain_files: u32,
    /// 压缩配置
    pub compression: CompressionConfig,
    /// 加密配置
    pub encryption: EncryptionConfig,
    /// 备份配置
    pub backup: BackupConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageType::FileSystem,
            storage_path: "/var/log/security_audit".to_string(),
            max_file_size: 100 * 1024 * 1024, // 100MB
            retain_files: 30, // 30 days
            compression: CompressionConfig::default(),
            encryption: EncryptionConfig::default(),
            backup: BackupConfig::default(),
        }
    }
}

/// 存储类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// 文件系统
    FileSystem,
    /// 数据库
    Database,
    /// 远程日志服务
    RemoteLog,
    /// 内存
    Memory,
}

/// 压缩配置
#[derive(Debug, Clone)]
pub struct CompressionConfig {
    /// 是否启用压缩
    pub enabled: bool,
    /// 压缩算法
    pub algorithm: CompressionAlgorithm,
    /// 压缩级别
    pub level: u8,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            algorithm: CompressionAlgorithm::Gzip,
            level: 6,
        }
    }
}

/// 压缩算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionAlgorithm {
    /// Gzip
    Gzip,
    /// Zlib
    Zlib,
    /// LZ4
    LZ4,
    /// Snappy
    Snappy,
}

/// 加密配置
#[derive(Debug, Clone)]
pub struct EncryptionConfig {
    /// 是否启用加密
    pub enabled: bool,
    /// 加密算法
    pub algorithm: EncryptionAlgorithm,
    /// 密钥
    pub key: String,
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            algorithm: EncryptionAlgorithm::AES256,
            key: String::new(),
        }
    }
}

/// 加密算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionAlgorithm {
    /// AES-256
    AES256,
    /// ChaCha20
    ChaCha20,
}

/// 备份配置
#[derive(Debug, Clone)]
pub struct BackupConfig {
    /// 是否启用备份
    pub enabled: bool,
    /// 备份路径
    pub backup_path: String,
    /// 备份间隔（小时）
    pub interval: u32,
    /// 保留备份数量
    pub retain_backups: u32,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            backup_path: "/var/log/security_audit/backup".to_string(),
            interval: 24, // 24 hours
            retain_backups: 7, // 7 days
        }
    }
}

/// 分析配置
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// 是否启用实时分析
    pub real_time: bool,
    /// 分析类型
    pub analysis_types: Vec<AnalysisType>,
    /// 异常检测配置
    pub anomaly_detection: AnomalyDetectionConfig,
    /// 行为分析配置
    pub behavior_analysis: BehaviorAnalysisConfig,
    /// 趋势分析配置
    pub trend_analysis: TrendAnalysisConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            real_time: true,
            analysis_types: vec![AnalysisType::AnomalyDetection, AnalysisType::BehaviorAnalysis],
            anomaly_detection: AnomalyDetectionConfig::default(),
            behavior_analysis: BehaviorAnalysisConfig::default(),
            trend_analysis: TrendAnalysisConfig::default(),
        }
    }
}

/// 分析类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisType {
    /// 异常检测
    AnomalyDetection,
    /// 行为分析
    BehaviorAnalysis,
    /// 趋势分析
    TrendAnalysis,
    /// 关联分析
    CorrelationAnalysis,
    /// 预测分析
    PredictiveAnalysis,
}

/// 异常检测配置
#[derive(Debug, Clone)]
pub struct AnomalyDetectionConfig {
    /// 算法类型
    pub algorithm: AnomalyAlgorithm,
    /// 灵敏度
    pub sensitivity: f32,
    /// 训练数据大小
    pub training_data_size: usize,
}

impl Default for AnomalyDetectionConfig {
    fn default() -> Self {
        Self {
            algorithm: AnomalyAlgorithm::IsolationForest,
            sensitivity: 0.5,
            training_data_size: 1000,
        }
    }
}

/// 异常检测算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyAlgorithm {
    /// 孤立森林
    IsolationForest,
    /// One-Class SVM
    OneClassSVM,
    /// 局部异常因子
    LocalOutlierFactor,
    /// 统计方法
    Statistical,
}

/// 行为分析配置
#[derive(Debug, Clone)]
pub struct BehaviorAnalysisConfig {
    /// 行为模型
    pub models: Vec<BehaviorModel>,
    /// 学习窗口（天）
    pub learning_window: u32,
    /// 置信度阈值
    pub confidence_threshold: f32,
}

impl Default for BehaviorAnalysisConfig {
    fn default() -> Self {
        Self {
            models: vec![BehaviorModel::UserBehavior, BehaviorModel::SystemBehavior],
            learning_window: 30,
            confidence_threshold: 0.8,
        }
    }
}

/// 行为模型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorModel {
    /// 用户行为
    UserBehavior,
    /// 系统行为
    SystemBehavior,
    /// 网络行为
    NetworkBehavior,
    /// 应用行为
    ApplicationBehavior,
}

/// 趋势分析配置
#[derive(Debug, Clone)]
pub struct TrendAnalysisConfig {
    /// 时间窗口（天）
    pub time_window: u32,
    /// 预测周期（天）
    pub prediction_horizon: u32,
    /// 趋势算法
    pub algorithm: TrendAlgorithm,
}

impl Default for TrendAnalysisConfig {
    fn default() -> Self {
        Self {
            time_window: 90,
            prediction_horizon: 7,
            algorithm: TrendAlgorithm::LinearRegression,
        }
    }
}

/// 趋势分析算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendAlgorithm {
    /// 线性回归
    LinearRegression,
    /// 移动平均
    MovingAverage,
    /// 指数平滑
    ExponentialSmoothing,
    /// ARIMA
    ARIMA,
}

/// 报告配置
#[derive(Debug, Clone)]
pub struct ReportingConfig {
    /// 是否启用自动报告
    pub auto_generate: bool,
    /// 报告类型
    pub report_types: Vec<ReportType>,
    /// 报告频率
    pub frequency: ReportFrequency,
    /// 报告格式
    pub formats: Vec<ReportFormat>,
    /// 收件人列表
    pub recipients: Vec<String>,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            auto_generate: true,
            report_types: vec![ReportType::Daily, ReportType::Weekly, ReportType::Monthly],
            frequency: ReportFrequency::Daily,
            formats: vec![ReportFormat::HTML, ReportFormat::PDF],
            recipients: Vec::new(),
        }
    }
}

/// 报告类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReportType {
    /// 实时报告
    RealTime,
    /// 每日报告
    Daily,
    /// 每周报告
    Weekly,
    /// 每月报告
    Monthly,
    /// 季度报告
    Quarterly,
    /// 年度报告
    Annual,
    /// 合规报告
    Compliance,
    /// 事件报告
    Incident,
}

/// 报告频率
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFrequency {
    /// 每小时
    Hourly,
    /// 每天
    Daily,
    /// 每周
    Weekly,
    /// 每月
    Monthly,
    /// 按需
    OnDemand,
}

/// 报告格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReportFormat {
    /// HTML
    HTML,
    /// PDF
    PDF,
    /// JSON
    JSON,
    /// CSV
    CSV,
    /// XML
    XML,
}

/// 安全审计统计数据
#[derive(Debug, Default, Clone)]
pub struct SecurityAuditStats {
    /// 总审计事件数
    pub total_events: u64,
    /// 按类型统计
    pub events_by_type: BTreeMap<AuditEventType, u64>,
    /// 按严重级别统计
    pub events_by_severity: BTreeMap<AuditSeverity, u64>,
    /// 按进程统计
    pub events_by_process: BTreeMap<u64, u64>,
    /// 按用户统计
    pub events_by_user: BTreeMap<u32, u64>,
    /// 生成的告警数
    pub alerts_generated: u64,
    /// 执行的分析数
    pub analyses_performed: u64,
    /// 生成的报告数
    pub reports_generated: u64,
    /// 检测到的异常数
    pub anomalies_detected: u64,
    /// 合规检查次数
    pub compliance_checks: u64,
    /// 合规违规次数
    pub compliance_violations: u64,
    /// 平均处理时间（微秒）
    pub avg_processing_time_us: u64,
}

/// 安全审计子系统
pub struct SecurityAuditSubsystem {
    /// 配置
    config: SecurityAuditConfig,
    /// 状态
    status: SecurityAuditStatus,
    /// 统计数据
    stats: Arc<Mutex<SecurityAuditStats>>,
    /// 事件处理器
    event_processor: Arc<Mutex<events::EventProcessor>>,
    /// 日志管理器
    log_manager: Arc<Mutex<logging::LogManager>>,
    /// 合规检查器
    compliance_checker: Arc<Mutex<compliance::ComplianceChecker>>,
    /// 取证分析器
    forensic_analyzer: Arc<Mutex<forensics::ForensicAnalyzer>>,
    /// 事件分析器
    event_analyzer: Arc<Mutex<analysis::EventAnalyzer>>,
    /// 报告生成器
    report_generator: Arc<Mutex<reporting::ReportGenerator>>,
    /// 监控器
    monitor: Arc<Mutex<monitoring::AuditMonitor>>,
    /// 是否已初始化
    initialized: AtomicBool,
}

impl SecurityAuditSubsystem {
    /// 创建新的安全审计子系统
    pub fn new(config: SecurityAuditConfig) -> Self {
        Self {
            config,
            status: SecurityAuditStatus::Uninitialized,
            stats: Arc::new(Mutex::new(SecurityAuditStats::default())),
            event_processor: Arc::new(Mutex::new(events::EventProcessor::new())),
            log_manager: Arc::new(Mutex::new(logging::LogManager::new())),
            compliance_checker: Arc::new(Mutex::new(compliance::ComplianceChecker::new())),
            forensic_analyzer: Arc::new(Mutex::new(forensics::ForensicAnalyzer::new())),
            event_analyzer: Arc::new(Mutex::new(analysis::EventAnalyzer::new())),
            report_generator: Arc::new(Mutex::new(reporting::ReportGenerator::new())),
            monitor: Arc::new(Mutex::new(monitoring::AuditMonitor::new())),
            initialized: AtomicBool::new(false),
        }
    }

    /// 初始化安全审计子系统
    pub fn init(&mut self) -> Result<(), &'static str> {
        if self.initialized.load(Ordering::SeqCst) {
            return Ok(());
        }

        self.status = SecurityAuditStatus::Initializing;

        // 初始化各个组件
        self.event_processor.lock().init(&self.config)?;
        self.log_manager.lock().init(&self.config.storage_config)?;
        self.compliance_checker.lock().init(&self.config.compliance_standards)?;
        self.forensic_analyzer.lock().init()?;
        self.event_analyzer.lock().init(&self.config.analysis_config)?;
        self.report_generator.lock().init(&self.config.reporting_config)?;
        self.monitor.lock().init()?;

        self.status = SecurityAuditStatus::Running;
        self.initialized.store(true, Ordering::SeqCst);

        crate::println!("[SecurityAudit] Security audit subsystem initialized successfully");
        Ok(())
    }

    /// 处理审计事件
    pub fn process_event(&mut self, event: AuditEvent) -> Result<(), &'static str> {
        if !self.config.enabled {
            return Ok(());
        }

        if !self.initialized.load(Ordering::SeqCst) {
            return Err("Security audit subsystem not initialized");
        }

        let start_time = crate::subsystems::time::get_timestamp_nanos();

        // 应用事件过滤器
        if !self.apply_event_filters(&event) {
            return Ok(());
        }

        // 处理事件
        self.event_processor.lock().process_event(&event)?;

        // 记录日志
        self.log_manager.lock().log_event(&event)?;

        // 实时分析
        if self.config.analysis_config.real_time {
            self.event_analyzer.lock().analyze_event(&event)?;
        }

        // 合规检查
        self.compliance_checker.lock().check_event(&event)?;

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.total_events += 1;
            *stats.events_by_type.entry(event.event_type).or_insert(0) += 1;
            *stats.events_by_severity.entry(event.severity).or_insert(0) += 1;
            *stats.events_by_process.entry(event.pid).or_insert(0) += 1;
            *stats.events_by_user.entry(event.uid).or_insert(0) += 1;

            let elapsed = crate::subsystems::time::get_timestamp_nanos() - start_time;
            stats.avg_processing_time_us = (stats.avg_processing_time_us + elapsed / 1000) / 2;
        }

        Ok(())
    }

    /// 应用事件过滤器
    fn apply_event_filters(&self, event: &AuditEvent) -> bool {
        for filter in &self.config.event_filters {
            if !filter.enabled {
                continue;
            }

            let matches = self.evaluate_filter_conditions(&filter.conditions, event);

            match filter.filter_type {
                FilterType::Exclude if matches => return false,
                FilterType::Include if !matches => return false,
                _ => continue,
            }
        }
        true
    }

    /// 评估过滤器条件
    fn evaluate_filter_conditions(&self, conditions: &[AuditCondition], event: &AuditEvent) -> bool {
        for condition in conditions {
            if !self.evaluate_condition(condition, event) {
                return false;
            }
        }
        true
    }

    /// 评估单个条件
    fn evaluate_condition(&self, condition: &AuditCondition, event: &AuditEvent) -> bool {
        let field_value = self.get_field_value(&condition.field, event);

        match condition.operator {
            AuditOperator::Equals => field_value == condition.value,
            AuditOperator::NotEquals => field_value != condition.value,
            AuditOperator::Contains => field_value.contains(&condition.value),
            AuditOperator::NotContains => !field_value.contains(&condition.value),
            AuditOperator::GreaterThan => field_value > condition.value,
            AuditOperator::GreaterThanOrEqual => field_value >= condition.value,
            AuditOperator::LessThan => field_value < condition.value,
            AuditOperator::LessThanOrEqual => field_value <= condition.value,
            AuditOperator::Regex => {
                // Simple regex matching (would use proper regex crate in real implementation)
                field_value.contains(&condition.value)
            }
        }
    }

    /// 获取字段值
    fn get_field_value(&self, field: &str, event: &AuditEvent) -> String {
        match field {
            "event_type" => format!("{:?}", event.event_type),
            "severity" => format!("{:?}", event.severity),
            "pid" => event.pid.to_string(),
            "uid" => event.uid.to_string(),
            "gid" => event.gid.to_string(),
            "tid" => event.tid.to_string(),
            "message" => event.message.clone(),
            "timestamp" => event.timestamp.to_string(),
            _ => {
                // Check data fields
                event.data.get(field).cloned().unwrap_or_default()
            }
        }
    }

    /// 生成报告
    pub fn generate_report(&mut self, report_type: ReportType) -> Result<String, &'static str> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err("Security audit subsystem not initialized");
        }

        let report = self.report_generator.lock().generate_report(report_type)?;

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.reports_generated += 1;
        }

        Ok(report)
    }

    /// 执行合规检查
    pub fn run_compliance_check(&mut self) -> Result<Vec<ComplianceResult>, &'static str> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err("Security audit subsystem not initialized");
        }

        let results = self.compliance_checker.lock().run_full_check()?;

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.compliance_checks += 1;
            for result in &results {
                if result.status == ComplianceStatus::NonCompliant {
                    stats.compliance_violations += 1;
                }
            }
        }

        Ok(results)
    }

    /// 执行取证分析
    pub fn run_forensic_analysis(&mut self, time_range: (u64, u64)) -> Result<ForensicReport, &'static str> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err("Security audit subsystem not initialized");
        }

        self.forensic_analyzer.lock().analyze_time_range(time_range)
    }

    /// 获取配置
    pub fn config(&self) -> &SecurityAuditConfig {
        &self.config
    }

    /// 更新配置
    pub fn update_config(&mut self, config: SecurityAuditConfig) -> Result<(), &'static str> {
        self.config = config;

        // 重新初始化相关组件
        if self.initialized.load(Ordering::SeqCst) {
            self.log_manager.lock().init(&self.config.storage_config)?;
            self.compliance_checker.lock().init(&self.config.compliance_standards)?;
            self.event_analyzer.lock().init(&self.config.analysis_config)?;
            self.report_generator.lock().init(&self.config.reporting_config)?;
        }

        Ok(())
    }

    /// 获取状态
    pub fn status(&self) -> SecurityAuditStatus {
        self.status
    }

    /// 获取统计数据
    pub fn get_stats(&self) -> SecurityAuditStats {
        self.stats.lock().clone()
    }

    /// 重置统计数据
    pub fn reset_stats(&self) {
        *self.stats.lock() = SecurityAuditStats::default();
    }

    /// 停止安全审计子系统
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Ok(());
        }

        self.status = SecurityAuditStatus::Stopping;

        // 停止各个组件
        self.monitor.lock().shutdown()?;
        self.log_manager.lock().shutdown()?;
        self.event_processor.lock().shutdown()?;

        self.status = SecurityAuditStatus::Stopped;
        self.initialized.store(false, Ordering::SeqCst);

        crate::println!("[SecurityAudit] Security audit subsystem shutdown successfully");
        Ok(())
    }
}

/// 合规检查结果
#[derive(Debug, Clone)]
pub struct ComplianceResult {
    /// 合规标准
    pub standard: ComplianceStandard,
    /// 检查项
    pub check_item: String,
    /// 检查状态
    pub status: ComplianceStatus,
    /// 检查详情
    pub details: String,
    /// 建议
    pub recommendations: Vec<String>,
    /// 检查时间
    pub timestamp: u64,
}

/// 合规状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceStatus {
    /// 合规
    Compliant,
    /// 不合规
    NonCompliant,
    /// 部分合规
    PartiallyCompliant,
    /// 无法确定
    Unknown,
}

/// 取证报告
#[derive(Debug, Clone)]
pub struct ForensicReport {
    /// 报告ID
    pub id: u64,
    /// 分析时间范围
    pub time_range: (u64, u64),
    /// 分析结果
    pub findings: Vec<ForensicFinding>,
    /// 关键事件
    pub key_events: Vec<AuditEvent>,
    /// 时间线
    pub timeline: Vec<ForensicEvent>,
    /// 建议行动
    pub recommended_actions: Vec<String>,
    /// 报告生成时间
    pub generated_at: u64,
}

/// 取证发现
#[derive(Debug, Clone)]
pub struct ForensicFinding {
    /// 发现ID
    pub id: u64,
    /// 发现类型
    pub finding_type: ForensicFindingType,
    /// 严重程度
    pub severity: AuditSeverity,
    /// 描述
    pub description: String,
    /// 相关事件
    pub related_events: Vec<u64>,
    /// 时间戳
    pub timestamp: u64,
}

/// 取证发现类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForensicFindingType {
    /// 异常行为
    AnomalousBehavior,
    /// 安全事件
    SecurityIncident,
    /// 策略违规
    PolicyViolation,
    /// 数据泄露
    DataLeak,
    /// 系统入侵
    SystemIntrusion,
    /// 恶意软件
    Malware,
}

/// 取证事件
#[derive(Debug, Clone)]
pub struct ForensicEvent {
    /// 事件ID
    pub id: u64,
    /// 时间戳
    pub timestamp: u64,
    /// 事件类型
    pub event_type: String,
    /// 描述
    pub description: String,
    /// 重要性
    pub importance: u8,
}

/// 全局安全审计实例
pub static SECURITY_AUDIT: spin::Mutex<Option<SecurityAuditSubsystem>> =
    spin::Mutex::new(None);

/// 初始化安全审计子系统
pub fn init_security_audit() -> Result<(), &'static str> {
    let config = SecurityAuditConfig::default();
    let mut guard = SECURITY_AUDIT.lock();
    let mut subsystem = SecurityAuditSubsystem::new(config);
    subsystem.init()?;
    *guard = Some(subsystem);
    Ok(())
}

/// 处理安全审计事件
pub fn process_security_audit_event(event: AuditEvent) -> Result<(), &'static str> {
    let mut guard = SECURITY_AUDIT.lock();
    if let Some(ref mut s) = *guard {
        s.process_event(event)
    } else {
        Ok(())
    }
}

/// 获取安全审计统计数据
pub fn get_security_audit_stats() -> SecurityAuditStats {
    let guard = SECURITY_AUDIT.lock();
    guard.as_ref().map(|s| s.get_stats()).unwrap_or_default()
}

/// 生成安全审计报告
pub fn generate_security_audit_report(report_type: ReportType) -> Result<String, &'static str> {
    let mut guard = SECURITY_AUDIT.lock();
    if let Some(ref mut s) = *guard {
        s.generate_report(report_type)
    } else {
        Err("Security audit subsystem not initialized")
    }
}

/// 执行合规检查
pub fn run_security_compliance_check() -> Result<Vec<ComplianceResult>, &'static str> {
    let mut guard = SECURITY_AUDIT.lock();
    if let Some(ref mut s) = *guard {
        s.run_compliance_check()
    } else {
        Ok(Vec::new())
    }
}

/// 执行取证分析
pub fn run_forensic_analysis(time_range: (u64, u64)) -> Result<ForensicReport, &'static str> {
    let mut guard = SECURITY_AUDIT.lock();
    if let Some(ref mut s) = *guard {
        s.run_forensic_analysis(time_range)
    } else {
        Err("Security audit subsystem not initialized")
    }
}
