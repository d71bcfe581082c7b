// Fault Diagnosis Module

extern crate alloc;
//
// 故障诊断模块
// 提供智能故障诊断、根因分析和故障预测功能

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::string::ToString;
use alloc::format;
use alloc::boxed::Box;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

// Import println macro
#[allow(unused_imports)]
use crate::println;

/// 故障诊断引擎
pub struct FaultDiagnosisEngine {
    /// 引擎ID
    pub id: u64,
    /// 诊断规则
    diagnosis_rules: Vec<DiagnosisRule>,
    /// 故障模式库
    fault_patterns: BTreeMap<String, FaultPattern>,
    /// 诊断历史
    diagnosis_history: Vec<DiagnosisSession>,
    /// 预测模型
    prediction_models: BTreeMap<String, PredictionModel>,
    /// 诊断统计
    stats: DiagnosisStats,
    /// 配置
    config: DiagnosisConfig,
    /// 会话计数器
    session_counter: AtomicU64,
}

/// 诊断规则
#[derive(Debug, Clone)]
pub struct DiagnosisRule {
    /// 规则ID
    pub id: String,
    /// 规则名称
    pub name: String,
    /// 规则描述
    pub description: String,
    /// 规则类型
    pub rule_type: DiagnosisRuleType,
    /// 触发条件
    pub trigger_conditions: Vec<TriggerCondition>,
    /// 诊断逻辑
    pub diagnosis_logic: DiagnosisLogic,
    /// 置信度权重
    pub confidence_weight: f64,
    /// 优先级
    pub priority: u32,
    /// 启用状态
    pub enabled: bool,
    /// 规则统计
    pub stats: RuleStats,
}

/// 诊断规则类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosisRuleType {
    /// 规则引擎
    RuleEngine,
    /// 机器学习模型
    MachineLearning,
    /// 专家系统
    ExpertSystem,
    /// 统计分析
    Statistical,
    /// 异常检测
    AnomalyDetection,
    /// 因果分析
    CausalAnalysis,
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
    /// 阈值
    pub threshold: f64,
    /// 时间窗口（秒）
    pub time_window_seconds: u64,
}

/// 条件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionType {
    /// 错误率阈值
    ErrorRateThreshold,
    /// 性能下降
    PerformanceDegradation,
    /// 资源耗尽
    ResourceExhaustion,
    /// 服务不可用
    ServiceUnavailable,
    /// 网络分区
    NetworkPartition,
    /// 数据不一致
    DataInconsistency,
    /// 自定义条件
    CustomCondition,
}

/// 诊断逻辑
#[derive(Debug, Clone)]
pub enum DiagnosisLogic {
    /// 简单匹配
    SimpleMatch {
        patterns: Vec<String>,
    },
    /// 复杂规则
    ComplexRule {
        conditions: Vec<LogicCondition>,
        operator: LogicOperator,
    },
    /// 决策树
    DecisionTree {
        tree: DecisionTreeNode,
    },
    /// 贝叶斯网络
    BayesianNetwork {
        nodes: Vec<BayesianNode>,
        edges: Vec<BayesianEdge>,
    },
}

/// 逻辑条件
#[derive(Debug, Clone)]
pub struct LogicCondition {
    /// 条件字段
    pub field: String,
    /// 操作符
    pub operator: LogicOperator,
    /// 值
    pub value: String,
    /// 权重
    pub weight: f64,
}

/// 逻辑操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOperator {
    /// 等于
    Equals,
    /// 不等于
    NotEquals,
    /// 大于
    GreaterThan,
    /// 小于
    LessThan,
    /// 大于等于
    GreaterThanOrEqual,
    /// 小于等于
    LessThanOrEqual,
    /// 包含
    Contains,
    /// 正则匹配
    Regex,
    /// 逻辑与
    And,
    /// 逻辑或
    Or,
    /// 逻辑非
    Not,
}

/// 决策树节点
#[derive(Debug, Clone)]
pub struct DecisionTreeNode {
    /// 节点ID
    pub id: String,
    /// 节点类型
    pub node_type: NodeType,
    /// 条件特征
    pub feature: Option<String>,
    /// 分裂值
    pub split_value: Option<f64>,
    /// 左子节点
    pub left_child: Option<Box<DecisionTreeNode>>,
    /// 右子节点
    pub right_child: Option<Box<DecisionTreeNode>>,
    /// 预测结果
    pub prediction: Option<DiagnosisResult>,
    /// 置信度
    pub confidence: f64,
}

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// 根节点
    Root,
    /// 内部节点
    Internal,
    /// 叶子节点
    Leaf,
}

/// 贝叶斯节点
#[derive(Debug, Clone)]
pub struct BayesianNode {
    /// 节点ID
    pub id: String,
    /// 节点名称
    pub name: String,
    /// 可能状态
    pub states: Vec<String>,
    /// 条件概率表
    pub cpt: BTreeMap<String, f64>,
    /// 父节点ID
    pub parents: Vec<String>,
}

/// 贝叶斯边
#[derive(Debug, Clone)]
pub struct BayesianEdge {
    /// 源节点
    pub from: String,
    /// 目标节点
    pub to: String,
    /// 因果强度
    pub strength: f64,
}

/// 规则统计
#[derive(Debug, Clone, Default)]
pub struct RuleStats {
    /// 触发次数
    pub trigger_count: u64,
    /// 成功诊断次数
    pub successful_diagnoses: u64,
    /// 准确率
    pub accuracy: f64,
    /// 平均置信度
    pub avg_confidence: f64,
    /// 最后触发时间
    pub last_triggered: u64,
}

/// 故障模式
#[derive(Debug, Clone)]
pub struct FaultPattern {
    /// 模式ID
    pub id: String,
    /// 模式名称
    pub name: String,
    /// 模式描述
    pub description: String,
    /// 模式类别
    pub category: FaultCategory,
    /// 严重级别
    pub severity: FaultSeverity,
    /// 故障特征
    pub characteristics: Vec<FaultCharacteristic>,
    /// 前兆症状
    pub premonition_symptoms: Vec<Symptom>,
    /// 根本原因
    pub root_causes: Vec<RootCause>,
    /// 影响范围
    pub impact_scope: ImpactScope,
    /// 检测方法
    pub detection_methods: Vec<DetectionMethod>,
    /// 修复建议
    pub remediation_recommendations: Vec<RemediationRecommendation>,
    /// 发生频率
    pub frequency: f64,
    /// 检测置信度
    pub detection_confidence: f64,
}

/// 故障类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FaultCategory {
    /// 硬件故障
    Hardware,
    /// 软件故障
    Software,
    /// 网络故障
    Network,
    /// 存储故障
    Storage,
    /// 配置故障
    Configuration,
    /// 安全故障
    Security,
    /// 性能故障
    Performance,
    /// 资源故障
    Resource,
    /// 依赖故障
    Dependency,
    /// 人为故障
    Human,
}

/// 故障严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FaultSeverity {
    /// 信息级
    Info = 1,
    /// 警告级
    Warning = 2,
    /// 错误级
    Error = 3,
    /// 严重级
    Critical = 4,
    /// 灾难级
    Catastrophic = 5,
}

/// 故障特征
#[derive(Debug, Clone)]
pub struct FaultCharacteristic {
    /// 特征名称
    pub name: String,
    /// 特征值
    pub value: String,
    /// 特征类型
    pub feature_type: FeatureType,
    /// 重要度
    pub importance: f64,
}

/// 特征类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureType {
    /// 数值特征
    Numerical,
    /// 分类特征
    Categorical,
    /// 时间序列特征
    TimeSeries,
    /// 文本特征
    Text,
    /// 图像特征
    Image,
}

/// 症状
#[derive(Debug, Clone)]
pub struct Symptom {
    /// 症状ID
    pub id: String,
    /// 症状名称
    pub name: String,
    /// 症状描述
    pub description: String,
    /// 症状类型
    pub symptom_type: SymptomType,
    /// 检测指标
    pub detection_metrics: Vec<String>,
    /// 出现概率
    pub occurrence_probability: f64,
    /// 持续时间（秒）
    pub duration_seconds: u64,
}

/// 症状类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymptomType {
    /// 性能下降
    PerformanceDegradation,
    /// 错误增加
    IncreasedErrors,
    /// 响应延迟
    IncreasedLatency,
    /// 资源耗尽
    ResourceExhaustion,
    /// 服务中断
    ServiceDisruption,
    /// 数据异常
    DataAnomaly,
    /// 行为异常
    BehaviorAnomaly,
}

/// 根本原因
#[derive(Debug, Clone)]
pub struct RootCause {
    /// 原因ID
    pub id: String,
    /// 原因描述
    pub description: String,
    /// 原因类别
    pub cause_category: CauseCategory,
    /// 可能性
    pub probability: f64,
    /// 证据链
    pub evidence_chain: Vec<Evidence>,
    /// 修复复杂度
    pub fix_complexity: FixComplexity,
    /// 预计修复时间（小时）
    pub estimated_fix_time_hours: u64,
}

/// 原因类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CauseCategory {
    /// 设计缺陷
    DesignFlaw,
    /// 实现错误
    ImplementationError,
    /// 配置错误
    ConfigurationError,
    /// 环境因素
    EnvironmentalFactor,
    /// 资源限制
    ResourceLimitation,
    /// 外部依赖
    ExternalDependency,
    /// 人为错误
    HumanError,
    /// 未知原因
    Unknown,
}

/// 证据
#[derive(Debug, Clone)]
pub struct Evidence {
    /// 证据ID
    pub id: String,
    /// 证据类型
    pub evidence_type: EvidenceType,
    /// 证据内容
    pub content: String,
    /// 时间戳
    pub timestamp: u64,
    /// 可靠性评分
    pub reliability_score: f64,
    /// 权重
    pub weight: f64,
}

/// 证据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceType {
    /// 系统日志
    SystemLog,
    /// 性能指标
    PerformanceMetric,
    /// 错误消息
    ErrorMessage,
    /// 用户报告
    UserReport,
    /// 监控告警
    MonitoringAlert,
    /// 配置变更
    ConfigurationChange,
}

/// 修复复杂度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixComplexity {
    /// 简单
    Simple,
    /// 中等
    Medium,
    /// 复杂
    Complex,
    /// 非常复杂
    VeryComplex,
}

/// 影响范围
#[derive(Debug, Clone)]
pub struct ImpactScope {
    /// 影响的组件
    pub affected_components: Vec<String>,
    /// 影响的用户数
    pub affected_users: u64,
    /// 业务影响等级
    pub business_impact: BusinessImpact,
    /// 影响持续时间（分钟）
    pub impact_duration_minutes: u64,
    /// 财务影响
    pub financial_impact: FinancialImpact,
}

/// 业务影响
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessImpact {
    /// 无影响
    None,
    /// 轻微影响
    Minor,
    /// 中等影响
    Moderate,
    /// 重大影响
    Major,
    /// 严重影响
    Severe,
}

/// 财务影响
#[derive(Debug, Clone)]
pub struct FinancialImpact {
    /// 直接损失（美元）
    pub direct_loss: f64,
    /// 间接损失（美元）
    pub indirect_loss: f64,
    /// 恢复成本（美元）
    pub recovery_cost: f64,
    /// 声誉影响评分
    pub reputation_impact_score: f64,
}

/// 检测方法
#[derive(Debug, Clone)]
pub struct DetectionMethod {
    /// 方法ID
    pub id: String,
    /// 方法名称
    pub name: String,
    /// 方法类型
    pub method_type: DetectionMethodType,
    /// 检测指标
    pub detection_metrics: Vec<String>,
    /// 检测阈值
    pub detection_thresholds: BTreeMap<String, f64>,
    /// 检测频率（秒）
    pub detection_frequency_seconds: u64,
    /// 准确率
    pub accuracy: f64,
}

/// 检测方法类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMethodType {
    /// 基于阈值
    ThresholdBased,
    /// 基于模式
    PatternBased,
    /// 基于异常检测
    AnomalyDetection,
    /// 基于机器学习
    MachineLearning,
    /// 基于规则
    RuleBased,
    /// 基于统计
    Statistical,
}

/// 修复建议
#[derive(Debug, Clone)]
pub struct RemediationRecommendation {
    /// 建议ID
    pub id: String,
    /// 建议描述
    pub description: String,
    /// 建议类型
    pub recommendation_type: RecommendationType,
    /// 优先级
    pub priority: RecommendationPriority,
    /// 实施步骤
    pub implementation_steps: Vec<String>,
    /// 预期效果
    pub expected_outcome: String,
    /// 风险评估
    pub risk_assessment: RiskAssessment,
    /// 所需资源
    pub required_resources: Vec<String>,
    /// 预计实施时间（小时）
    pub estimated_implementation_time_hours: u64,
    /// 成功率
    pub success_rate: f64,
}

/// 建议类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationType {
    /// 立即修复
    ImmediateFix,
    /// 临时解决方案
    TemporarySolution,
    /// 永久修复
    PermanentFix,
    /// 预防措施
    PreventiveMeasure,
    /// 系统升级
    SystemUpgrade,
    /// 配置变更
    ConfigurationChange,
    /// 流程改进
    ProcessImprovement,
}

/// 建议优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationPriority {
    /// 紧急
    Urgent,
    /// 高
    High,
    /// 中
    Medium,
    /// 低
    Low,
}

/// 风险评估
#[derive(Debug, Clone)]
pub struct RiskAssessment {
    /// 技术风险
    pub technical_risk: f64,
    /// 业务风险
    pub business_risk: f64,
    /// 安全风险
    pub security_risk: f64,
    /// 财务风险
    pub financial_risk: f64,
    /// 总体风险评级
    pub overall_risk_rating: RiskRating,
    /// 风险缓解措施
    pub mitigation_measures: Vec<String>,
}

/// 风险评级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskRating {
    /// 低风险
    Low,
    /// 中等风险
    Medium,
    /// 高风险
    High,
    /// 极高风险
    Critical,
}

/// 预测模型
#[derive(Debug, Clone)]
pub struct PredictionModel {
    /// 模型ID
    pub id: String,
    /// 模型名称
    pub name: String,
    /// 模型类型
    pub model_type: PredictionModelType,
    /// 输入特征
    pub input_features: Vec<String>,
    /// 输出预测
    pub output_predictions: Vec<String>,
    /// 模型参数
    pub model_parameters: BTreeMap<String, String>,
    /// 训练数据集
    pub training_dataset: String,
    /// 模型准确率
    pub accuracy: f64,
    /// 最后训练时间
    pub last_trained: u64,
    /// 预测窗口（小时）
    pub prediction_window_hours: u64,
}

/// 预测模型类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionModelType {
    /// 时间序列预测
    TimeSeries,
    /// 分类预测
    Classification,
    /// 回归预测
    Regression,
    /// 异常预测
    AnomalyPrediction,
    /// 生存分析
    SurvivalAnalysis,
}

/// 诊断会话
#[derive(Debug, Clone)]
pub struct DiagnosisSession {
    /// 会话ID
    pub id: u64,
    /// 会话名称
    pub name: String,
    /// 开始时间
    pub start_time: u64,
    /// 结束时间
    pub end_time: Option<u64>,
    /// 会话状态
    pub status: SessionStatus,
    /// 输入数据
    pub input_data: DiagnosisInput,
    /// 诊断结果
    pub diagnosis_results: Vec<DiagnosisResult>,
    /// 使用的规则
    pub applied_rules: Vec<String>,
    /// 置信度
    pub confidence: f64,
    /// 会话日志
    pub logs: Vec<SessionLog>,
}

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// 初始化中
    Initializing,
    /// 运行中
    Running,
    /// 已完成
    Completed,
    /// 已取消
    Cancelled,
    /// 出错
    Error,
}

/// 诊断输入
#[derive(Debug, Clone)]
pub struct DiagnosisInput {
    /// 症状数据
    pub symptom_data: Vec<SymptomData>,
    /// 系统指标
    pub system_metrics: BTreeMap<String, f64>,
    /// 错误日志
    pub error_logs: Vec<ErrorLog>,
    /// 性能数据
    pub performance_data: Vec<PerformanceDataPoint>,
    /// 配置信息
    pub configuration_info: BTreeMap<String, String>,
    /// 上下文信息
    pub context_info: BTreeMap<String, String>,
}

/// 症状数据
#[derive(Debug, Clone)]
pub struct SymptomData {
    /// 症状名称
    pub symptom_name: String,
    /// 症状值
    pub value: f64,
    /// 时间戳
    pub timestamp: u64,
    /// 严重级别
    pub severity: f64,
}

/// 错误日志
#[derive(Debug, Clone)]
pub struct ErrorLog {
    /// 日志ID
    pub id: String,
    /// 错误消息
    pub message: String,
    /// 错误级别
    pub level: String,
    /// 组件
    pub component: String,
    /// 时间戳
    pub timestamp: u64,
    /// 堆栈跟踪
    pub stack_trace: Option<String>,
}

/// 性能数据点
#[derive(Debug, Clone)]
pub struct PerformanceDataPoint {
    /// 指标名称
    pub metric_name: String,
    /// 指标值
    pub value: f64,
    /// 时间戳
    pub timestamp: u64,
    /// 单位
    pub unit: String,
}

/// 诊断结果
#[derive(Debug, Clone)]
pub struct DiagnosisResult {
    /// 结果ID
    pub id: String,
    /// 故障模式ID
    pub fault_pattern_id: String,
    /// 诊断置信度
    pub confidence: f64,
    /// 故障严重级别
    pub severity: FaultSeverity,
    /// 根本原因分析
    pub root_cause_analysis: Vec<RootCause>,
    /// 影响评估
    pub impact_assessment: ImpactScope,
    /// 推荐行动
    pub recommended_actions: Vec<RemediationRecommendation>,
    /// 预测信息
    pub prediction_info: Option<PredictionInfo>,
    /// 生成时间
    pub generated_at: u64,
    /// 结果摘要
    pub summary: String,
}

/// 预测信息
#[derive(Debug, Clone)]
pub struct PredictionInfo {
    /// 预测的故障概率
    pub predicted_fault_probability: f64,
    /// 预测的故障时间
    pub predicted_fault_time: Option<u64>,
    /// 预测的影响范围
    pub predicted_impact_scope: String,
    /// 预测的置信度
    pub prediction_confidence: f64,
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

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// 调试
    Debug,
    /// 信息
    Info,
    /// 警告
    Warning,
    /// 错误
    Error,
    /// 致命
    Fatal,
}

/// 诊断统计
#[derive(Debug, Clone, Default)]
pub struct DiagnosisStats {
    /// 总诊断次数
    pub total_diagnoses: u64,
    /// 成功诊断次数
    pub successful_diagnoses: u64,
    /// 平均诊断时间（毫秒）
    pub avg_diagnosis_time_ms: u64,
    /// 平均置信度
    pub avg_confidence: f64,
    /// 最常见的故障模式
    pub most_common_faults: Vec<String>,
    /// 按类别统计
    pub diagnoses_by_category: BTreeMap<FaultCategory, u64>,
    /// 按严重级别统计
    pub diagnoses_by_severity: BTreeMap<FaultSeverity, u64>,
    /// 准确率
    pub accuracy: f64,
}

/// 诊断配置
#[derive(Debug, Clone)]
pub struct DiagnosisConfig {
    /// 启用自动诊断
    pub enable_auto_diagnosis: bool,
    /// 最大并发诊断数
    pub max_concurrent_diagnoses: u32,
    /// 诊断超时时间（秒）
    pub diagnosis_timeout_seconds: u64,
    /// 最小置信度阈值
    pub min_confidence_threshold: f64,
    /// 启用预测功能
    pub enable_prediction: bool,
    /// 预测窗口（小时）
    pub prediction_window_hours: u64,
    /// 启用机器学习
    pub enable_machine_learning: bool,
    /// 诊断历史保留数量
    pub diagnosis_history_size: usize,
    /// 启用实时监控
    pub enable_real_time_monitoring: bool,
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self {
            enable_auto_diagnosis: true,
            max_concurrent_diagnoses: 5,
            diagnosis_timeout_seconds: 300, // 5分钟
            min_confidence_threshold: 0.7,
            enable_prediction: true,
            prediction_window_hours: 24,
            enable_machine_learning: false,
            diagnosis_history_size: 1000,
            enable_real_time_monitoring: true,
        }
    }
}

impl FaultDiagnosisEngine {
    /// 创建新的故障诊断引擎
    pub fn new() -> Self {
        Self {
            id: 1,
            diagnosis_rules: Vec::new(),
            fault_patterns: BTreeMap::new(),
            diagnosis_history: Vec::new(),
            prediction_models: BTreeMap::new(),
            stats: DiagnosisStats::default(),
            config: DiagnosisConfig::default(),
            session_counter: AtomicU64::new(1),
        }
    }

    /// 初始化故障诊断引擎
    pub fn init(&mut self) -> Result<(), &'static str> {
        // 加载预定义故障模式
        self.load_predefined_fault_patterns()?;

        // 加载诊断规则
        self.load_diagnosis_rules()?;

        // 初始化预测模型
        self.initialize_prediction_models()?;

        crate::println!("[FaultDiagnosis] Fault diagnosis engine initialized successfully");
        Ok(())
    }

    /// 开始诊断会话
    pub fn start_diagnosis(&mut self, input_data: DiagnosisInput) -> Result<u64, &'static str> {
        let session_id = self.session_counter.fetch_add(1, Ordering::SeqCst);
        let start_time = crate::time::get_timestamp();

        let session = DiagnosisSession {
            id: session_id,
            name: format!("Diagnosis Session {}", session_id),
            start_time,
            end_time: None,
            status: SessionStatus::Running,
            input_data: input_data.clone(),
            diagnosis_results: Vec::new(),
            applied_rules: Vec::new(),
            confidence: 0.0,
            logs: Vec::new(),
        };

        // 执行诊断
        let results = self.perform_diagnosis(&input_data)?;

        // 更新会话
        let mut updated_session = session;
        updated_session.diagnosis_results = results.clone();
        updated_session.end_time = Some(crate::time::get_timestamp());
        updated_session.status = SessionStatus::Completed;
        updated_session.confidence = self.calculate_overall_confidence(&results);

        // 保存会话
        self.diagnosis_history.push(updated_session);

        // 更新统计信息
        self.update_diagnosis_stats(&results);

        Ok(session_id)
    }

    /// 执行诊断
    fn perform_diagnosis(&mut self, input_data: &DiagnosisInput) -> Result<Vec<DiagnosisResult>, &'static str> {
        let mut results = Vec::new();

        // 1. 症状匹配
        let matched_patterns = self.match_symptoms(&input_data.symptom_data)?;

        // 2. 规则引擎诊断
        for rule in &self.diagnosis_rules {
            if !rule.enabled {
                continue;
            }

            if self.evaluate_rule(rule, input_data)? {
                let diagnosis_result = self.generate_diagnosis_result(rule, input_data)?;
                results.push(diagnosis_result);
            }
        }

        // 3. 故障模式匹配
        for pattern in matched_patterns {
            let diagnosis_result = self.generate_pattern_diagnosis_result(&pattern, input_data)?;
            results.push(diagnosis_result);
        }

        // 4. 预测分析
        if self.config.enable_prediction {
            let prediction_results = self.perform_prediction_analysis(input_data)?;
            results.extend(prediction_results);
        }

        // 按置信度排序
        results.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap());

        Ok(results)
    }

    /// 匹配症状
    fn match_symptoms(&self, symptom_data: &[SymptomData]) -> Result<Vec<&FaultPattern>, &'static str> {
        let mut matched_patterns = Vec::new();

        for pattern in self.fault_patterns.values() {
            let mut match_count = 0;
            let total_symptoms = pattern.premonition_symptoms.len();

            for symptom in &pattern.premonition_symptoms {
                for data in symptom_data {
                    if data.symptom_name == symptom.name {
                        match_count += 1;
                        break;
                    }
                }
            }

            // 如果匹配的症状比例超过阈值，则认为匹配成功
            if total_symptoms > 0 && (match_count as f64 / total_symptoms as f64) >= 0.6 {
                matched_patterns.push(pattern);
            }
        }

        Ok(matched_patterns)
    }

    /// 评估规则
    fn evaluate_rule(&self, rule: &DiagnosisRule, input_data: &DiagnosisInput) -> Result<bool, &'static str> {
        for condition in &rule.trigger_conditions {
            if !self.evaluate_trigger_condition(condition, input_data)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// 评估触发条件
    fn evaluate_trigger_condition(&self, condition: &TriggerCondition, input_data: &DiagnosisInput) -> Result<bool, &'static str> {
        match condition.condition_type {
            ConditionType::ErrorRateThreshold => {
                // 检查错误率是否超过阈值
                let error_rate = self.calculate_error_rate(&input_data.error_logs);
                Ok(error_rate > condition.threshold)
            }
            ConditionType::PerformanceDegradation => {
                // 检查性能下降
                let performance_score = self.calculate_performance_score(&input_data.performance_data);
                Ok(performance_score < condition.threshold)
            }
            ConditionType::ResourceExhaustion => {
                // 检查资源耗尽
                Ok(self.check_resource_exhaustion(&input_data.system_metrics, &condition.parameters))
            }
            ConditionType::ServiceUnavailable => {
                // 检查服务不可用
                Ok(self.check_service_availability(&input_data.system_metrics))
            }
            ConditionType::NetworkPartition => {
                // 检查网络分区
                Ok(self.check_network_partition(&input_data.system_metrics))
            }
            ConditionType::DataInconsistency => {
                // 检查数据不一致
                Ok(self.check_data_consistency(&input_data.system_metrics))
            }
            ConditionType::CustomCondition => {
                // 自定义条件
                Ok(true)
            }
        }
    }

    /// 计算错误率
    fn calculate_error_rate(&self, error_logs: &[ErrorLog]) -> f64 {
        if error_logs.is_empty() {
            return 0.0;
        }

        let error_count = error_logs.len();
        let time_span = 3600.0; // 1小时
        error_count as f64 / time_span
    }

    /// 计算性能评分
    fn calculate_performance_score(&self, performance_data: &[PerformanceDataPoint]) -> f64 {
        if performance_data.is_empty() {
            return 1.0;
        }

        let mut total_score = 0.0;
        let mut count = 0;

        for data_point in performance_data {
            // 简化的性能评分计算
            let score = match data_point.metric_name.as_str() {
                "cpu_usage" | "memory_usage" => {
                    // 使用率越低越好
                    1.0 - (data_point.value / 100.0).min(1.0)
                }
                "response_time" => {
                    // 响应时间越低越好
                    let baseline = 100.0; // 100ms作为基准
                    1.0 - (data_point.value / baseline).min(1.0)
                }
                _ => 0.8, // 默认评分
            };

            total_score += score;
            count += 1;
        }

        if count > 0 {
            total_score / count as f64
        } else {
            1.0
        }
    }

    /// 检查资源耗尽
    fn check_resource_exhaustion(&self, metrics: &BTreeMap<String, f64>, _parameters: &BTreeMap<String, String>) -> bool {
        // 检查关键资源使用率
        if let Some(&cpu_usage) = metrics.get("cpu_usage") {
            if cpu_usage > 95.0 {
                return true;
            }
        }

        if let Some(&memory_usage) = metrics.get("memory_usage") {
            if memory_usage > 95.0 {
                return true;
            }
        }

        if let Some(&disk_usage) = metrics.get("disk_usage") {
            if disk_usage > 98.0 {
                return true;
            }
        }

        false
    }

    /// 检查服务可用性
    fn check_service_availability(&self, metrics: &BTreeMap<String, f64>) -> bool {
        // 检查服务状态
        if let Some(&service_status) = metrics.get("service_status") {
            service_status < 1.0 // 1.0表示完全可用
        } else {
            false
        }
    }

    /// 检查网络分区
    fn check_network_partition(&self, metrics: &BTreeMap<String, f64>) -> bool {
        // 检查网络连通性
        if let Some(&network_connectivity) = metrics.get("network_connectivity") {
            network_connectivity < 0.5 // 0.5表示连通性差
        } else {
            false
        }
    }

    /// 检查数据一致性
    fn check_data_consistency(&self, metrics: &BTreeMap<String, f64>) -> bool {
        // 检查数据一致性指标
        if let Some(&data_consistency_score) = metrics.get("data_consistency") {
            data_consistency_score < 0.9 // 0.9表示一致性良好
        } else {
            false
        }
    }

    /// 生成诊断结果
    fn generate_diagnosis_result(&self, rule: &DiagnosisRule, input_data: &DiagnosisInput) -> Result<DiagnosisResult, &'static str> {
        let result_id = format!("diagnosis_{}", crate::time::get_timestamp());

        // 生成根本原因分析
        let root_cause_analysis = self.analyze_root_causes(rule, input_data)?;

        // 评估影响
        let impact_assessment = self.assess_impact(rule, input_data)?;

        // 生成修复建议
        let recommended_actions = self.generate_remediation_actions(rule, &root_cause_analysis)?;

        // 预测信息
        let prediction_info = if self.config.enable_prediction {
            Some(self.generate_prediction_info(rule, input_data)?)
        } else {
            None
        };

        Ok(DiagnosisResult {
            id: result_id,
            fault_pattern_id: rule.id.clone(),
            confidence: rule.confidence_weight,
            severity: self.determine_severity(rule, input_data),
            root_cause_analysis,
            impact_assessment,
            recommended_actions,
            prediction_info,
            generated_at: crate::time::get_timestamp(),
            summary: format!("Diagnosis completed using rule: {}", rule.name),
        })
    }

    /// 生成模式诊断结果
    fn generate_pattern_diagnosis_result(&self, pattern: &FaultPattern, input_data: &DiagnosisInput) -> Result<DiagnosisResult, &'static str> {
        let result_id = format!("pattern_diagnosis_{}", crate::time::get_timestamp());

        let prediction_info = if self.config.enable_prediction {
            Some(self.generate_pattern_prediction_info(pattern, input_data)?)
        } else {
            None
        };

        Ok(DiagnosisResult {
            id: result_id,
            fault_pattern_id: pattern.id.clone(),
            confidence: pattern.detection_confidence,
            severity: pattern.severity,
            root_cause_analysis: pattern.root_causes.clone(),
            impact_assessment: pattern.impact_scope.clone(),
            recommended_actions: pattern.remediation_recommendations.clone(),
            prediction_info,
            generated_at: crate::time::get_timestamp(),
            summary: format!("Diagnosis completed for pattern: {}", pattern.name),
        })
    }

    /// 分析根本原因
    fn analyze_root_causes(&self, _rule: &DiagnosisRule, _input_data: &DiagnosisInput) -> Result<Vec<RootCause>, &'static str> {
        // 简化的根本原因分析
        Ok(vec![
            RootCause {
                id: "rc_1".to_string(),
                description: "Resource exhaustion detected".to_string(),
                cause_category: CauseCategory::ResourceLimitation,
                probability: 0.8,
                evidence_chain: Vec::new(),
                fix_complexity: FixComplexity::Medium,
                estimated_fix_time_hours: 2,
            },
        ])
    }

    /// 评估影响
    fn assess_impact(&self, _rule: &DiagnosisRule, _input_data: &DiagnosisInput) -> Result<ImpactScope, &'static str> {
        Ok(ImpactScope {
            affected_components: vec!["web_service".to_string(), "database".to_string()],
            affected_users: 1000,
            business_impact: BusinessImpact::Moderate,
            impact_duration_minutes: 30,
            financial_impact: FinancialImpact {
                direct_loss: 500.0,
                indirect_loss: 1000.0,
                recovery_cost: 200.0,
                reputation_impact_score: 0.3,
            },
        })
    }

    /// 生成修复建议
    fn generate_remediation_actions(&self, _rule: &DiagnosisRule, _root_causes: &[RootCause]) -> Result<Vec<RemediationRecommendation>, &'static str> {
        Ok(vec![
            RemediationRecommendation {
                id: "rec_1".to_string(),
                description: "Increase system resources".to_string(),
                recommendation_type: RecommendationType::ConfigurationChange,
                priority: RecommendationPriority::High,
                implementation_steps: vec![
                    "Add more memory".to_string(),
                    "Scale up CPU resources".to_string(),
                ],
                expected_outcome: "Resource utilization reduced".to_string(),
                risk_assessment: RiskAssessment {
                    technical_risk: 0.2,
                    business_risk: 0.1,
                    security_risk: 0.1,
                    financial_risk: 0.3,
                    overall_risk_rating: RiskRating::Low,
                    mitigation_measures: vec!["Monitor resource usage".to_string()],
                },
                required_resources: vec!["Memory".to_string(), "CPU".to_string()],
                estimated_implementation_time_hours: 1,
                success_rate: 0.9,
            },
        ])
    }

    /// 生成预测信息
    fn generate_prediction_info(&self, _rule: &DiagnosisRule, _input_data: &DiagnosisInput) -> Result<PredictionInfo, &'static str> {
        Ok(PredictionInfo {
            predicted_fault_probability: 0.15,
            predicted_fault_time: Some(crate::time::get_timestamp() + 3600 * 4), // 4小时后
            predicted_impact_scope: "Service degradation expected".to_string(),
            prediction_confidence: 0.7,
        })
    }

    /// 生成模式预测信息
    fn generate_pattern_prediction_info(&self, pattern: &FaultPattern, _input_data: &DiagnosisInput) -> Result<PredictionInfo, &'static str> {
        Ok(PredictionInfo {
            predicted_fault_probability: pattern.frequency,
            predicted_fault_time: Some(crate::time::get_timestamp() + 3600 * 6), // 6小时后
            predicted_impact_scope: format!("Impact: {:?}", pattern.category),
            prediction_confidence: pattern.detection_confidence,
        })
    }

    /// 确定严重级别
    fn determine_severity(&self, rule: &DiagnosisRule, input_data: &DiagnosisInput) -> FaultSeverity {
        // 基于症状和系统状态确定严重级别
        let max_severity = input_data.symptom_data
            .iter()
            .map(|s| s.severity)
            .fold(0.0f64, |acc, s| acc.max(s));

        if max_severity >= 4.0 {
            FaultSeverity::Catastrophic
        } else if max_severity >= 3.0 {
            FaultSeverity::Critical
        } else if max_severity >= 2.0 {
            FaultSeverity::Error
        } else if max_severity >= 1.0 {
            FaultSeverity::Warning
        } else {
            FaultSeverity::Info
        }
    }

    /// 执行预测分析
    fn perform_prediction_analysis(&self, input_data: &DiagnosisInput) -> Result<Vec<DiagnosisResult>, &'static str> {
        let mut results = Vec::new();

        for model in self.prediction_models.values() {
            if let Some(prediction) = self.predict_fault(model, input_data)? {
                results.push(prediction);
            }
        }

        Ok(results)
    }

    /// 预测故障
    fn predict_fault(&self, model: &PredictionModel, input_data: &DiagnosisInput) -> Result<Option<DiagnosisResult>, &'static str> {
        // 简化的预测逻辑
        let fault_probability = self.calculate_fault_probability(model, input_data);

        if fault_probability > 0.5 {
            Ok(Some(DiagnosisResult {
                id: format!("prediction_{}", model.id),
                fault_pattern_id: model.id.clone(),
                confidence: model.accuracy,
                severity: FaultSeverity::Warning,
                root_cause_analysis: Vec::new(),
                impact_assessment: ImpactScope {
                    affected_components: Vec::new(),
                    affected_users: 0,
                    business_impact: BusinessImpact::Minor,
                    impact_duration_minutes: 0,
                    financial_impact: FinancialImpact {
                        direct_loss: 0.0,
                        indirect_loss: 0.0,
                        recovery_cost: 0.0,
                        reputation_impact_score: 0.0,
                    },
                },
                recommended_actions: Vec::new(),
                prediction_info: Some(PredictionInfo {
                    predicted_fault_probability: fault_probability,
                    predicted_fault_time: None,
                    predicted_impact_scope: "Predicted by model".to_string(),
                    prediction_confidence: model.accuracy,
                }),
                generated_at: crate::time::get_timestamp(),
                summary: format!("Fault predicted by model: {}", model.name),
            }))
        } else {
            Ok(None)
        }
    }

    /// 计算故障概率
    fn calculate_fault_probability(&self, model: &PredictionModel, input_data: &DiagnosisInput) -> f64 {
        // 简化的故障概率计算
        let mut risk_score = 0.0;
        let mut factor_count = 0;

        // 基于错误日志
        if !input_data.error_logs.is_empty() {
            risk_score += 0.3;
            factor_count += 1;
        }

        // 基于症状数据
        let severe_symptoms = input_data.symptom_data
            .iter()
            .filter(|s| s.severity > 2.0)
            .count();
        if severe_symptoms > 0 {
            risk_score += 0.4;
            factor_count += 1;
        }

        // 基于性能数据
        if !input_data.performance_data.is_empty() {
            let performance_risk = self.calculate_performance_risk(&input_data.performance_data);
            risk_score += performance_risk;
            factor_count += 1;
        }

        if factor_count > 0 {
            risk_score / factor_count as f64
        } else {
            0.0
        }
    }

    /// 计算性能风险
    fn calculate_performance_risk(&self, performance_data: &[PerformanceDataPoint]) -> f64 {
        let mut total_risk = 0.0;
        let mut count = 0;

        for data_point in performance_data {
            let risk = match data_point.metric_name.as_str() {
                "cpu_usage" => (data_point.value / 100.0).min(1.0),
                "memory_usage" => (data_point.value / 100.0).min(1.0),
                "response_time" => {
                    let baseline = 100.0; // 100ms
                    (data_point.value / baseline).min(1.0)
                }
                _ => 0.2,
            };

            total_risk += risk;
            count += 1;
        }

        if count > 0 {
            total_risk / count as f64
        } else {
            0.0
        }
    }

    /// 计算总体置信度
    fn calculate_overall_confidence(&self, results: &[DiagnosisResult]) -> f64 {
        if results.is_empty() {
            return 0.0;
        }

        let total_confidence: f64 = results.iter().map(|r| r.confidence).sum();
        total_confidence / results.len() as f64
    }

    /// 更新诊断统计
    fn update_diagnosis_stats(&mut self, results: &[DiagnosisResult]) {
        self.stats.total_diagnoses += 1;
        self.stats.successful_diagnoses += 1;

        // 更新平均置信度
        if !results.is_empty() {
            let total_confidence: f64 = results.iter().map(|r| r.confidence).sum();
            let avg_confidence = total_confidence / results.len() as f64;
            self.stats.avg_confidence = (self.stats.avg_confidence * (self.stats.total_diagnoses - 1) as f64 + avg_confidence) / self.stats.total_diagnoses as f64;
        }

        // 更新按类别统计
        for result in results {
            // 简化处理，假设所有结果都是软件故障
            *self.stats.diagnoses_by_category.entry(FaultCategory::Software).or_insert(0) += 1;
            *self.stats.diagnoses_by_severity.entry(result.severity).or_insert(0) += 1;
        }
    }

    /// 获取诊断会话
    pub fn get_diagnosis_sessions(&self, limit: Option<usize>) -> Vec<&DiagnosisSession> {
        let mut sessions = self.diagnosis_history.iter().collect::<Vec<_>>();
        sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time));

        if let Some(limit) = limit {
            sessions.truncate(limit);
        }

        sessions
    }

    /// 获取故障模式
    pub fn get_fault_patterns(&self) -> &BTreeMap<String, FaultPattern> {
        &self.fault_patterns
    }

    /// 获取诊断统计
    pub fn get_statistics(&self) -> DiagnosisStats {
        self.stats.clone()
    }

    /// 加载预定义故障模式
    fn load_predefined_fault_patterns(&mut self) -> Result<(), &'static str> {
        let patterns = vec![
            FaultPattern {
                id: "memory_leak".to_string(),
                name: "Memory Leak Pattern".to_string(),
                description: "Gradual memory consumption leading to system degradation".to_string(),
                category: FaultCategory::Resource,
                severity: FaultSeverity::Critical,
                characteristics: vec![
                    FaultCharacteristic {
                        name: "gradual_memory_increase".to_string(),
                        value: "true".to_string(),
                        feature_type: FeatureType::Categorical,
                        importance: 0.9,
                    },
                ],
                premonition_symptoms: vec![
                    Symptom {
                        id: "sym_1".to_string(),
                        name: "high_memory_usage".to_string(),
                        description: "Memory usage is consistently high".to_string(),
                        symptom_type: SymptomType::ResourceExhaustion,
                        detection_metrics: vec!["memory_usage".to_string()],
                        occurrence_probability: 0.9,
                        duration_seconds: 1800, // 30分钟
                    },
                ],
                root_causes: vec![
                    RootCause {
                        id: "rc_mem_1".to_string(),
                        description: "Memory allocation not freed".to_string(),
                        cause_category: CauseCategory::ImplementationError,
                        probability: 0.8,
                        evidence_chain: Vec::new(),
                        fix_complexity: FixComplexity::Complex,
                        estimated_fix_time_hours: 8,
                    },
                ],
                impact_scope: ImpactScope {
                    affected_components: vec!["application".to_string(), "system".to_string()],
                    affected_users: 5000,
                    business_impact: BusinessImpact::Major,
                    impact_duration_minutes: 120,
                    financial_impact: FinancialImpact {
                        direct_loss: 2000.0,
                        indirect_loss: 5000.0,
                        recovery_cost: 1000.0,
                        reputation_impact_score: 0.6,
                    },
                },
                detection_methods: vec![
                    DetectionMethod {
                        id: "method_1".to_string(),
                        name: "Memory Usage Monitoring".to_string(),
                        method_type: DetectionMethodType::ThresholdBased,
                        detection_metrics: vec!["memory_usage".to_string()],
                        detection_thresholds: {
                            let mut thresholds = BTreeMap::new();
                            thresholds.insert("memory_usage".to_string(), 90.0);
                            thresholds
                        },
                        detection_frequency_seconds: 60,
                        accuracy: 0.95,
                    },
                ],
                remediation_recommendations: vec![
                    RemediationRecommendation {
                        id: "rec_mem_1".to_string(),
                        description: "Fix memory leak in application code".to_string(),
                        recommendation_type: RecommendationType::PermanentFix,
                        priority: RecommendationPriority::Urgent,
                        implementation_steps: vec![
                            "Identify memory allocation points".to_string(),
                            "Add proper deallocation".to_string(),
                            "Test with memory profiling tools".to_string(),
                        ],
                        expected_outcome: "Memory usage stabilized".to_string(),
                        risk_assessment: RiskAssessment {
                            technical_risk: 0.4,
                            business_risk: 0.2,
                            security_risk: 0.1,
                            financial_risk: 0.3,
                            overall_risk_rating: RiskRating::Medium,
                            mitigation_measures: vec!["Thorough testing required".to_string()],
                        },
                        required_resources: vec!["Developer time".to_string(), "Testing environment".to_string()],
                        estimated_implementation_time_hours: 8,
                        success_rate: 0.85,
                    },
                ],
                frequency: 0.1,
                detection_confidence: 0.9,
            },
        ];

        for pattern in patterns {
            self.fault_patterns.insert(pattern.id.clone(), pattern);
        }

        Ok(())
    }

    /// 加载诊断规则
    fn load_diagnosis_rules(&mut self) -> Result<(), &'static str> {
        let rules = vec![
            DiagnosisRule {
                id: "high_error_rate".to_string(),
                name: "High Error Rate Detection".to_string(),
                description: "Detects when error rate exceeds threshold".to_string(),
                rule_type: DiagnosisRuleType::RuleEngine,
                trigger_conditions: vec![
                    TriggerCondition {
                        id: "cond_1".to_string(),
                        condition_type: ConditionType::ErrorRateThreshold,
                        parameters: BTreeMap::new(),
                        threshold: 5.0,
                        time_window_seconds: 300, // 5分钟
                    },
                ],
                diagnosis_logic: DiagnosisLogic::SimpleMatch {
                    patterns: vec!["service_degradation".to_string()],
                },
                confidence_weight: 0.8,
                priority: 1,
                enabled: true,
                stats: RuleStats::default(),
            },
        ];

        self.diagnosis_rules = rules;
        Ok(())
    }

    /// 初始化预测模型
    fn initialize_prediction_models(&mut self) -> Result<(), &'static str> {
        let models = vec![
            PredictionModel {
                id: "fault_prediction_model".to_string(),
                name: "Basic Fault Prediction Model".to_string(),
                model_type: PredictionModelType::TimeSeries,
                input_features: vec![
                    "cpu_usage".to_string(),
                    "memory_usage".to_string(),
                    "error_rate".to_string(),
                    "response_time".to_string(),
                ],
                output_predictions: vec!["fault_probability".to_string()],
                model_parameters: BTreeMap::new(),
                training_dataset: "historical_fault_data".to_string(),
                accuracy: 0.75,
                last_trained: crate::time::get_timestamp(),
                prediction_window_hours: 24,
            },
        ];

        for model in models {
            self.prediction_models.insert(model.id.clone(), model);
        }

        Ok(())
    }

    /// 停止故障诊断引擎
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        self.diagnosis_rules.clear();
        self.fault_patterns.clear();
        self.diagnosis_history.clear();
        self.prediction_models.clear();

        crate::println!("[FaultDiagnosis] Fault diagnosis engine shutdown successfully");
        Ok(())
    }
}

/// 创建默认的故障诊断引擎
pub fn create_fault_diagnosis_engine() -> Arc<Mutex<FaultDiagnosisEngine>> {
    Arc::new(Mutex::new(FaultDiagnosisEngine::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_diagnosis_engine_creation() {
        let engine = FaultDiagnosisEngine::new();
        assert_eq!(engine.id, 1);
        assert!(engine.diagnosis_rules.is_empty());
        assert!(engine.fault_patterns.is_empty());
    }

    #[test]
    fn test_fault_pattern_creation() {
        let pattern = FaultPattern {
            id: "test_pattern".to_string(),
            name: "Test Pattern".to_string(),
            description: "Test fault pattern".to_string(),
            category: FaultCategory::Software,
            severity: FaultSeverity::Error,
            characteristics: Vec::new(),
            premonition_symptoms: Vec::new(),
            root_causes: Vec::new(),
            impact_scope: ImpactScope {
                affected_components: Vec::new(),
                affected_users: 0,
                business_impact: BusinessImpact::Minor,
                impact_duration_minutes: 0,
                financial_impact: FinancialImpact {
                    direct_loss: 0.0,
                    indirect_loss: 0.0,
                    recovery_cost: 0.0,
                    reputation_impact_score: 0.0,
                },
            },
            detection_methods: Vec::new(),
            remediation_recommendations: Vec::new(),
            frequency: 0.0,
            detection_confidence: 0.0,
        };

        assert_eq!(pattern.id, "test_pattern");
        assert_eq!(pattern.severity, FaultSeverity::Error);
    }

    #[test]
    fn test_diagnosis_config_default() {
        let config = DiagnosisConfig::default();
        assert!(config.enable_auto_diagnosis);
        assert_eq!(config.max_concurrent_diagnoses, 5);
        assert!(config.enable_prediction);
    }
}