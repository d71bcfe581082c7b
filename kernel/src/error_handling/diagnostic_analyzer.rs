// Diagnostic Analyzer Module

extern crate alloc;
//
// 诊断分析器模块
// 提供错误模式分析、根因分析和诊断建议

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::string::ToString;
use alloc::{format, vec};
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

use super::*;

/// 诊断分析器
pub struct DiagnosticAnalyzer {
    /// 分析器ID
    pub id: u64,
    /// 分析规则
    analysis_rules: Vec<AnalysisRule>,
    /// 错误模式
    error_patterns: Vec<ErrorPattern>,
    /// 诊断知识库
    knowledge_base: KnowledgeBase,
    /// 分析历史
    analysis_history: Vec<AnalysisResult>,
    /// 统计信息
    stats: AnalysisStats,
    /// 配置
    config: DiagnosticConfig,
    /// 分析计数器
    analysis_counter: AtomicU64,
}

/// 分析规则
#[derive(Debug, Clone)]
pub struct AnalysisRule {
    /// 规则ID
    pub id: u64,
    /// 规则名称
    pub name: String,
    /// 规则描述
    pub description: String,
    /// 规则类型
    pub rule_type: AnalysisRuleType,
    /// 匹配条件
    pub conditions: Vec<MatchCondition>,
    /// 分析动作
    pub actions: Vec<AnalysisAction>,
    /// 规则优先级
    pub priority: u32,
    /// 是否启用
    pub enabled: bool,
    /// 创建时间
    pub created_at: u64,
    /// 更新时间
    pub updated_at: u64,
    /// 规则统计
    pub stats: RuleStats,
}

/// 分析规则类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisRuleType {
    /// 模式匹配
    PatternMatching,
    /// 统计分析
    StatisticalAnalysis,
    /// 机器学习
    MachineLearning,
    /// 相关性分析
    CorrelationAnalysis,
    /// 趋势分析
    TrendAnalysis,
    /// 异常检测
    AnomalyDetection,
    /// 时序分析
    TimeSeriesAnalysis,
    /// 因果分析
    CausalAnalysis,
}

/// 匹配条件
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchCondition {
    /// 错误代码匹配
    ErrorCode(u32),
    /// 错误类别匹配
    ErrorCategory(ErrorCategory),
    /// 严重级别匹配
    Severity(ErrorSeverity),
    /// 错误消息匹配
    MessagePattern(String),
    /// 时间窗口匹配
    TimeWindow(u64, u64),
    /// 频率匹配
    Frequency(u32, u64),
    /// 来源模块匹配
    SourceModule(String),
    /// 上下文匹配
    ContextMatch(String, String),
    /// 自定义条件
    CustomCondition(String),
    /// 错误类型条件（兼容）
    ErrorType(super::ErrorType),
}

/// 分析动作
#[derive(Debug, Clone)]
pub enum AnalysisAction {
    /// 记录模式
    RecordPattern(String),
    /// 生成诊断
    GenerateDiagnostic(String),
    /// 更新统计
    UpdateStats(String),
    /// 触发告警
    TriggerAlert(String),
    /// 执行恢复
    ExecuteRecovery(RecoveryStrategy),
    /// 记录日志
    LogEvent(String),
    /// 更新知识库
    UpdateKnowledge(String),
    /// 自定义动作
    CustomAction(String),
}

/// 错误模式
#[derive(Debug, Clone)]
pub struct ErrorPattern {
    /// 模式ID
    pub id: u64,
    /// 模式名称
    pub name: String,
    /// 模式描述
    pub description: String,
    /// 模式类型
    pub pattern_type: PatternType,
    /// 触发条件
    pub trigger_conditions: Vec<MatchCondition>,
    /// 模式特征
    pub characteristics: Vec<PatternCharacteristic>,
    /// 相关错误
    pub related_errors: Vec<u32>,
    /// 根因分析
    pub root_cause_analysis: RootCauseAnalysis,
    /// 诊断建议
    pub diagnostic_suggestions: Vec<DiagnosticSuggestion>,
    /// 发生频率
    pub frequency: u32,
    /// 严重性评分
    pub severity_score: f64,
    /// 置信度
    pub confidence: f64,
    /// 最后检测时间
    pub last_detected: u64,
}

/// 模式类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternType {
    /// 单一错误模式
    SingleError,
    /// 错误序列模式
    ErrorSequence,
    /// 错误聚集模式
    ErrorCluster,
    /// 周期性错误模式
    PeriodicError,
    /// 错误传播模式
    ErrorPropagation,
    /// 资源泄漏模式
    ResourceLeak,
    /// 性能下降模式
    PerformanceDegradation,
    /// 级联故障模式
    CascadingFailure,
}

/// 模式特征
#[derive(Debug, Clone)]
pub struct PatternCharacteristic {
    /// 特征名称
    pub name: String,
    /// 特征值
    pub value: String,
    /// 特征类型
    pub feature_type: FeatureType,
    /// 权重
    pub weight: f64,
}

/// 特征类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureType {
    /// 数值特征
    Numeric,
    /// 分类特征
    Categorical,
    /// 布尔特征
    Boolean,
    /// 时间特征
    Temporal,
    /// 文本特征
    Text,
}

/// 根因分析
#[derive(Debug, Clone)]
pub struct RootCauseAnalysis {
    /// 分析ID
    pub id: u64,
    /// 可能的根因
    pub possible_causes: Vec<PossibleCause>,
    /// 主要根因
    pub primary_cause: Option<PossibleCause>,
    /// 根因置信度
    pub confidence: f64,
    /// 证据链
    pub evidence_chain: Vec<Evidence>,
    /// 分析方法
    pub analysis_method: AnalysisMethod,
    /// 分析时间
    pub analysis_time: u64,
}

/// 可能的原因
#[derive(Debug, Clone)]
pub struct PossibleCause {
    /// 原因ID
    pub id: u64,
    /// 原因描述
    pub description: String,
    /// 原因类别
    pub cause_category: CauseCategory,
    /// 概率
    pub probability: f64,
    /// 证据支持
    pub evidence_support: Vec<Evidence>,
    /// 推荐解决方案
    pub recommended_solutions: Vec<String>,
}

/// 原因类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CauseCategory {
    /// 硬件故障
    HardwareFailure,
    /// 软件缺陷
    SoftwareBug,
    /// 配置错误
    ConfigurationError,
    /// 资源不足
    ResourceShortage,
    /// 网络问题
    NetworkIssue,
    /// 外部依赖
    ExternalDependency,
    /// 用户操作
    UserAction,
    /// 环境因素
    EnvironmentalFactor,
    /// 安全威胁
    SecurityThreat,
    /// 未知原因
    Unknown,
}

/// 证据
#[derive(Debug, Clone)]
pub struct Evidence {
    /// 证据ID
    pub id: u64,
    /// 证据类型
    pub evidence_type: EvidenceType,
    /// 证据内容
    pub content: String,
    /// 时间戳
    pub timestamp: u64,
    /// 可靠性评分
    pub reliability_score: f64,
    /// 关联性
    pub relevance: f64,
}

/// 证据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceType {
    /// 系统日志
    SystemLog,
    /// 错误消息
    ErrorMessage,
    /// 性能指标
    PerformanceMetric,
    /// 系统状态
    SystemState,
    /// 用户操作
    UserAction,
    /// 网络流量
    NetworkTraffic,
    /// 文件系统操作
    FileSystemOperation,
    /// 内存转储
    MemoryDump,
}

/// 分析方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnalysisMethod {
    /// 专家系统
    ExpertSystem,
    /// 决策树
    DecisionTree,
    /// 贝叶斯网络
    BayesianNetwork,
    /// 神经网络
    NeuralNetwork,
    /// 规则引擎
    RuleEngine,
    /// 统计分析
    StatisticalAnalysis,
    /// 机器学习
    MachineLearning,
    /// 混合方法
    Hybrid,
}

/// 诊断建议
#[derive(Debug, Clone)]
pub struct DiagnosticSuggestion {
    /// 建议ID
    pub id: u64,
    /// 建议类型
    pub suggestion_type: SuggestionType,
    /// 建议描述
    pub description: String,
    /// 操作步骤
    pub action_steps: Vec<String>,
    /// 优先级
    pub priority: u32,
    /// 预期效果
    pub expected_outcome: String,
    /// 风险评估
    pub risk_assessment: RiskAssessment,
    /// 所需资源
    pub required_resources: Vec<String>,
    /// 执行时间估计
    pub estimated_time: u64,
}

/// 建议类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionType {
    /// 即时修复
    ImmediateFix,
    /// 配置调整
    ConfigurationAdjustment,
    /// 资源分配
    ResourceAllocation,
    /// 系统重启
    SystemRestart,
    /// 服务重置
    ServiceReset,
    /// 数据恢复
    DataRecovery,
    /// 预防措施
    PreventiveMeasure,
    /// 监控加强
    EnhancedMonitoring,
}

/// 风险评估
#[derive(Debug, Clone)]
pub struct RiskAssessment {
    /// 风险级别
    pub risk_level: RiskLevel,
    /// 风险描述
    pub description: String,
    /// 潜在影响
    pub potential_impact: Vec<String>,
    /// 缓解措施
    pub mitigation_measures: Vec<String>,
    /// 成功率
    pub success_rate: f64,
}

/// 风险级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    /// 低风险
    Low = 1,
    /// 中等风险
    Medium = 2,
    /// 高风险
    High = 3,
    /// 极高风险
    Critical = 4,
}

/// 知识库
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    /// 知识条目
    pub entries: Vec<KnowledgeEntry>,
    /// 症状-原因映射
    pub symptom_cause_mapping: BTreeMap<String, Vec<String>>,
    /// 解决方案库
    pub solution_library: Vec<SolutionTemplate>,
    /// 最佳实践
    pub best_practices: Vec<BestPractice>,
}

/// 知识条目
#[derive(Debug, Clone)]
pub struct KnowledgeEntry {
    /// 条目ID
    pub id: u64,
    /// 条目标题
    pub title: String,
    /// 条目内容
    pub content: String,
    /// 条目类型
    pub entry_type: KnowledgeType,
    /// 关键词
    pub keywords: Vec<String>,
    /// 引用计数
    pub reference_count: u32,
    /// 最后访问时间
    pub last_accessed: u64,
    /// 可信度评分
    pub credibility_score: f64,
}

/// 知识类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnowledgeType {
    /// 错误描述
    ErrorDescription,
    /// 故障解决方案
    SolutionGuide,
    /// 最佳实践
    BestPractice,
    /// 技术文档
    TechnicalDocumentation,
    /// 案例研究
    CaseStudy,
    /// 专家经验
    ExpertExperience,
}

/// 解决方案模板
#[derive(Debug, Clone)]
pub struct SolutionTemplate {
    /// 模板ID
    pub id: u64,
    /// 模板名称
    pub name: String,
    /// 适用问题
    pub applicable_problems: Vec<String>,
    /// 解决步骤
    pub solution_steps: Vec<SolutionStep>,
    /// 前置条件
    pub prerequisites: Vec<String>,
    /// 注意事项
    pub considerations: Vec<String>,
    /// 成功率
    pub success_rate: f64,
}

/// 解决步骤
#[derive(Debug, Clone)]
pub struct SolutionStep {
    /// 步骤序号
    pub step_number: u32,
    /// 步骤描述
    pub description: String,
    /// 命令或操作
    pub command: Option<String>,
    /// 预期结果
    pub expected_result: String,
    /// 验证方法
    pub verification: String,
    /// 预计时间
    pub estimated_time: u64,
}

/// 最佳实践
#[derive(Debug, Clone)]
pub struct BestPractice {
    /// 实践ID
    pub id: u64,
    /// 实践标题
    pub title: String,
    /// 实践描述
    pub description: String,
    /// 适用场景
    pub applicable_scenarios: Vec<String>,
    /// 实施指导
    pub implementation_guide: Vec<String>,
    /// 收益说明
    pub benefits: Vec<String>,
    /// 采纳率
    pub adoption_rate: f64,
}

/// 分析结果
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// 结果ID
    pub id: u64,
    /// 输入错误记录
    pub input_error: ErrorRecord,
    /// 检测到的模式
    pub detected_patterns: Vec<ErrorPattern>,
    /// 根因分析结果
    pub root_cause: Option<RootCauseAnalysis>,
    /// 诊断建议
    pub suggestions: Vec<DiagnosticSuggestion>,
    /// 置信度
    pub confidence: f64,
    /// 分析耗时
    pub analysis_duration_ms: u64,
    /// 分析时间
    pub timestamp: u64,
    /// 分析方法
    pub method_used: AnalysisMethod,
}

/// 分析统计
#[derive(Debug, Clone, Default)]
pub struct AnalysisStats {
    /// 总分析次数
    pub total_analyses: u64,
    /// 检测到的模式数
    pub patterns_detected: u64,
    /// 根因分析次数
    pub root_cause_analyses: u64,
    /// 生成建议数
    pub suggestions_generated: u64,
    /// 分析准确率
    pub analysis_accuracy: f64,
    /// 平均分析时间（毫秒）
    pub avg_analysis_time_ms: u64,
    /// 按类型统计
    pub analyses_by_type: BTreeMap<AnalysisMethod, u64>,
    /// 按严重级别统计
    pub analyses_by_severity: BTreeMap<ErrorSeverity, u64>,
}

/// 诊断配置
#[derive(Debug, Clone)]
pub struct DiagnosticConfig {
    /// 启用模式检测
    pub enable_pattern_detection: bool,
    /// 启用根因分析
    pub enable_root_cause_analysis: bool,
    /// 启用机器学习
    pub enable_machine_learning: bool,
    /// 最小置信度阈值
    pub min_confidence_threshold: f64,
    /// 最大分析时间（毫秒）
    pub max_analysis_time_ms: u64,
    /// 分析历史保留数量
    pub analysis_history_size: usize,
    /// 启用知识库更新
    pub enable_knowledge_update: bool,
    /// 知识库更新阈值
    pub knowledge_update_threshold: u32,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            enable_pattern_detection: true,
            enable_root_cause_analysis: true,
            enable_machine_learning: false,
            min_confidence_threshold: 0.7,
            max_analysis_time_ms: 5000,
            analysis_history_size: 1000,
            enable_knowledge_update: true,
            knowledge_update_threshold: 10,
        }
    }
}

/// 规则统计
#[derive(Debug, Clone, Default)]
pub struct RuleStats {
    /// 规则触发次数
    pub trigger_count: u64,
    /// 规则成功次数
    pub success_count: u64,
    /// 规则失败次数
    pub failure_count: u64,
    /// 平均执行时间（毫秒）
    pub avg_execution_time_ms: u64,
    /// 最后触发时间
    pub last_triggered: u64,
}

impl DiagnosticAnalyzer {
    /// 创建新的诊断分析器
    pub fn new() -> Self {
        Self {
            id: 1,
            analysis_rules: Vec::new(),
            error_patterns: Vec::new(),
            knowledge_base: KnowledgeBase {
                entries: Vec::new(),
                symptom_cause_mapping: BTreeMap::new(),
                solution_library: Vec::new(),
                best_practices: Vec::new(),
            },
            analysis_history: Vec::new(),
            stats: AnalysisStats::default(),
            config: DiagnosticConfig::default(),
            analysis_counter: AtomicU64::new(1),
        }
    }

    /// 初始化诊断分析器
    pub fn init(&mut self) -> Result<(), &'static str> {
        // 加载预定义分析规则
        self.load_predefined_rules()?;

        // 初始化知识库
        self.initialize_knowledge_base()?;

        // 加载错误模式
        self.load_error_patterns()?;

        crate::println!("[DiagnosticAnalyzer] Diagnostic analyzer initialized successfully");
        Ok(())
    }

    /// 分析错误
    pub fn analyze_error(&mut self, error_record: &ErrorRecord) -> Result<AnalysisResult, &'static str> {
        let start_time = crate::time::get_timestamp();
        let analysis_id = self.analysis_counter.fetch_add(1, Ordering::SeqCst);

        let mut detected_patterns = Vec::new();
        let mut suggestions = Vec::new();
        let mut root_cause = None;

        // 模式检测
        if self.config.enable_pattern_detection {
            detected_patterns = self.detect_error_patterns(error_record)?;
        }

        // 根因分析
        if self.config.enable_root_cause_analysis && !detected_patterns.is_empty() {
            root_cause = Some(self.perform_root_cause_analysis(error_record, &detected_patterns)?);
        }

        // 生成诊断建议
        suggestions = self.generate_diagnostic_suggestions(error_record, &detected_patterns, &root_cause)?;

        let analysis_duration = crate::time::get_timestamp() - start_time;
        let confidence = self.calculate_confidence(&detected_patterns, &root_cause, &suggestions);

        let result = AnalysisResult {
            id: analysis_id,
            input_error: error_record.clone(),
            detected_patterns,
            root_cause,
            suggestions,
            confidence,
            analysis_duration_ms: analysis_duration * 1000,
            timestamp: crate::time::get_timestamp(),
            method_used: AnalysisMethod::RuleEngine,
        };

        // 保存分析历史
        self.save_analysis_history(&result)?;

        // 更新统计信息
        self.update_analysis_stats(&result);

        // 更新知识库
        if self.config.enable_knowledge_update && self.should_update_knowledge(&result) {
            self.update_knowledge_base(&result)?;
        }

        Ok(result)
    }

    /// 检测错误模式
    fn detect_error_patterns(&self, error_record: &ErrorRecord) -> Result<Vec<ErrorPattern>, &'static str> {
        let mut detected = Vec::new();

        for pattern in &self.error_patterns {
            if self.matches_pattern(error_record, pattern) {
                detected.push(pattern.clone());
            }
        }

        Ok(detected)
    }

    /// 检查是否匹配模式
    fn matches_pattern(&self, error_record: &ErrorRecord, pattern: &ErrorPattern) -> bool {
        for condition in &pattern.trigger_conditions {
            if !self.evaluate_condition(error_record, condition) {
                return false;
            }
        }
        true
    }

    /// 评估匹配条件
    fn evaluate_condition(&self, error_record: &ErrorRecord, condition: &MatchCondition) -> bool {
        match condition {
            MatchCondition::ErrorCode(code) => error_record.code == *code,
            MatchCondition::ErrorCategory(category) => error_record.category == *category,
            MatchCondition::Severity(severity) => error_record.severity == *severity,
            MatchCondition::MessagePattern(pattern) => {
                error_record.message.contains(pattern)
            }
            MatchCondition::TimeWindow(start, end) => {
                error_record.timestamp >= *start && error_record.timestamp <= *end
            }
            MatchCondition::Frequency(min_freq, window) => {
                // 实现频率检查逻辑
                error_record.occurrence_count >= *min_freq
            }
            MatchCondition::SourceModule(module) => {
                error_record.source.module.contains(module)
            }
            MatchCondition::ContextMatch(key, value) => {
                error_record.context.environment_variables.contains_key(key)
            }
            MatchCondition::CustomCondition(_condition) => {
                // 实现自定义条件评估
                true
            }
            MatchCondition::ErrorType(_error_type) => {
                // 实现错误类型匹配逻辑
                true
            }
        }
    }

    /// 执行根因分析
    fn perform_root_cause_analysis(&self, error_record: &ErrorRecord, patterns: &[ErrorPattern]) -> Result<RootCauseAnalysis, &'static str> {
        let mut possible_causes = Vec::new();

        // 基于模式分析可能的原因
        for pattern in patterns {
            if !pattern.root_cause_analysis.possible_causes.is_empty() {
                possible_causes.extend(pattern.root_cause_analysis.possible_causes.clone());
            }
        }

        // 如果没有找到已知原因，生成通用分析
        if possible_causes.is_empty() {
            possible_causes.push(PossibleCause {
                id: 0,
                description: format!("Unknown root cause for error code {}", error_record.code),
                cause_category: CauseCategory::Unknown,
                probability: 0.5,
                evidence_support: Vec::new(),
                recommended_solutions: vec!["Investigate system logs".to_string()],
            });
        }

        // 计算主要根因
        let primary_cause = possible_causes
            .iter()
            .max_by(|a, b| a.probability.partial_cmp(&b.probability).unwrap())
            .cloned();

        let confidence = primary_cause
            .as_ref()
            .map(|cause| cause.probability)
            .unwrap_or(0.5);

        Ok(RootCauseAnalysis {
            id: self.analysis_counter.load(Ordering::SeqCst),
            possible_causes,
            primary_cause,
            confidence,
            evidence_chain: Vec::new(),
            analysis_method: AnalysisMethod::ExpertSystem,
            analysis_time: crate::time::get_timestamp(),
        })
    }

    /// 生成诊断建议
    fn generate_diagnostic_suggestions(&self, error_record: &ErrorRecord, patterns: &[ErrorPattern], root_cause: &Option<RootCauseAnalysis>) -> Result<Vec<DiagnosticSuggestion>, &'static str> {
        let mut suggestions = Vec::new();

        // 基于模式生成建议
        for pattern in patterns {
            suggestions.extend(pattern.diagnostic_suggestions.clone());
        }

        // 基于根因分析生成建议
        if let Some(analysis) = root_cause {
            if let Some(primary_cause) = &analysis.primary_cause {
                for solution in &primary_cause.recommended_solutions {
                    suggestions.push(DiagnosticSuggestion {
                        id: self.analysis_counter.load(Ordering::SeqCst),
                        suggestion_type: SuggestionType::ImmediateFix,
                        description: solution.clone(),
                        action_steps: vec![solution.clone()],
                        priority: 1,
                        expected_outcome: "Error resolution".to_string(),
                        risk_assessment: RiskAssessment {
                            risk_level: RiskLevel::Low,
                            description: "Low risk fix".to_string(),
                            potential_impact: Vec::new(),
                            mitigation_measures: Vec::new(),
                            success_rate: 0.8,
                        },
                        required_resources: Vec::new(),
                        estimated_time: 60000, // 1分钟
                    });
                }
            }
        }

        // 如果没有建议，生成通用建议
        if suggestions.is_empty() {
            suggestions.push(DiagnosticSuggestion {
                id: self.analysis_counter.load(Ordering::SeqCst),
                suggestion_type: SuggestionType::EnhancedMonitoring,
                description: "Enable enhanced monitoring for this error type".to_string(),
                action_steps: vec![
                    "Add monitoring rules".to_string(),
                    "Configure alerting".to_string(),
                    "Review system logs".to_string(),
                ],
                priority: 2,
                expected_outcome: "Better error detection and prevention".to_string(),
                risk_assessment: RiskAssessment {
                    risk_level: RiskLevel::Low,
                    description: "Minimal risk".to_string(),
                    potential_impact: Vec::new(),
                    mitigation_measures: Vec::new(),
                    success_rate: 0.9,
                },
                required_resources: vec!["Monitoring system".to_string()],
                estimated_time: 300000, // 5分钟
            });
        }

        Ok(suggestions)
    }

    /// 计算置信度
    fn calculate_confidence(&self, patterns: &[ErrorPattern], root_cause: &Option<RootCauseAnalysis>, suggestions: &[DiagnosticSuggestion]) -> f64 {
        let mut confidence = 0.0;
        let mut factors = 0;

        // 基于检测到的模式
        if !patterns.is_empty() {
            let pattern_confidence: f64 = patterns.iter().map(|p| p.confidence).sum::<f64>() / patterns.len() as f64;
            confidence += pattern_confidence;
            factors += 1;
        }

        // 基于根因分析
        if let Some(analysis) = root_cause {
            confidence += analysis.confidence;
            factors += 1;
        }

        // 基于建议质量
        if !suggestions.is_empty() {
            confidence += 0.8; // 假设建议质量良好
            factors += 1;
        }

        if factors > 0 {
            confidence / factors as f64
        } else {
            0.5 // 默认置信度
        }
    }

    /// 保存分析历史
    fn save_analysis_history(&mut self, result: &AnalysisResult) -> Result<(), &'static str> {
        self.analysis_history.push(result.clone());

        // 限制历史记录数量
        if self.analysis_history.len() > self.config.analysis_history_size {
            self.analysis_history.remove(0);
        }

        Ok(())
    }

    /// 更新分析统计
    fn update_analysis_stats(&mut self, result: &AnalysisResult) {
        self.stats.total_analyses += 1;
        self.stats.patterns_detected += result.detected_patterns.len() as u64;
        self.stats.suggestions_generated += result.suggestions.len() as u64;

        if result.root_cause.is_some() {
            self.stats.root_cause_analyses += 1;
        }

        *self.stats.analyses_by_type.entry(result.method_used).or_insert(0) += 1;
        *self.stats.analyses_by_severity.entry(result.input_error.severity).or_insert(0) += 1;

        // 更新平均分析时间
        let total_time = self.stats.avg_analysis_time_ms * (self.stats.total_analyses - 1) + result.analysis_duration_ms;
        self.stats.avg_analysis_time_ms = total_time / self.stats.total_analyses;
    }

    /// 判断是否应该更新知识库
    fn should_update_knowledge(&self, result: &AnalysisResult) -> bool {
        result.confidence > 0.8 && result.detected_patterns.len() > 0
    }

    /// 更新知识库
    fn update_knowledge_base(&mut self, result: &AnalysisResult) -> Result<(), &'static str> {
        // 基于分析结果更新知识库
        for pattern in &result.detected_patterns {
            let entry = KnowledgeEntry {
                id: self.analysis_counter.load(Ordering::SeqCst),
                title: format!("Error Pattern: {}", pattern.name),
                content: pattern.description.clone(),
                entry_type: KnowledgeType::ErrorDescription,
                keywords: vec![pattern.name.clone()],
                reference_count: 1,
                last_accessed: crate::time::get_timestamp(),
                credibility_score: result.confidence,
            };

            self.knowledge_base.entries.push(entry);
        }

        Ok(())
    }

    /// 加载预定义规则
    fn load_predefined_rules(&mut self) -> Result<(), &'static str> {
        let rules = vec![
            AnalysisRule {
                id: 1,
                name: "Memory Error Pattern".to_string(),
                description: "Detect memory-related error patterns".to_string(),
                rule_type: AnalysisRuleType::PatternMatching,
                conditions: vec![
                    MatchCondition::ErrorCategory(ErrorCategory::Memory),
                    MatchCondition::Frequency(3, 60000), // 3次在1分钟内
                ],
                actions: vec![
                    AnalysisAction::RecordPattern("MemoryLeak".to_string()),
                    AnalysisAction::GenerateDiagnostic("Memory leak detected".to_string()),
                ],
                priority: 1,
                enabled: true,
                created_at: 0,
                updated_at: 0,
                stats: RuleStats::default(),
            },
            AnalysisRule {
                id: 2,
                name: "Network Timeout Pattern".to_string(),
                description: "Detect network timeout patterns".to_string(),
                rule_type: AnalysisRuleType::StatisticalAnalysis,
                conditions: vec![
                    MatchCondition::ErrorCategory(ErrorCategory::Network),
                    MatchCondition::ErrorType(ErrorType::TimeoutError),
                ],
                actions: vec![
                    AnalysisAction::RecordPattern("NetworkTimeout".to_string()),
                    AnalysisAction::TriggerAlert("Network connectivity issue".to_string()),
                ],
                priority: 2,
                enabled: true,
                created_at: 0,
                updated_at: 0,
                stats: RuleStats::default(),
            },
        ];

        self.analysis_rules = rules;
        Ok(())
    }

    /// 初始化知识库
    fn initialize_knowledge_base(&mut self) -> Result<(), &'static str> {
        let entries = vec![
            KnowledgeEntry {
                id: 1,
                title: "Memory Allocation Failure".to_string(),
                content: "System ran out of memory during allocation".to_string(),
                entry_type: KnowledgeType::ErrorDescription,
                keywords: vec!["memory".to_string(), "allocation".to_string(), "oom".to_string()],
                reference_count: 0,
                last_accessed: 0,
                credibility_score: 1.0,
            },
            KnowledgeEntry {
                id: 2,
                title: "File Not Found".to_string(),
                content: "Requested file does not exist in the filesystem".to_string(),
                entry_type: KnowledgeType::ErrorDescription,
                keywords: vec!["file".to_string(), "not found".to_string(), "path".to_string()],
                reference_count: 0,
                last_accessed: 0,
                credibility_score: 1.0,
            },
        ];

        self.knowledge_base.entries = entries;

        // 初始化症状-原因映射
        self.knowledge_base.symptom_cause_mapping.insert(
            "Out of memory".to_string(),
            vec![
                "Memory leak".to_string(),
                "Insufficient system memory".to_string(),
                "Memory fragmentation".to_string(),
            ],
        );

        Ok(())
    }

    /// 加载错误模式
    fn load_error_patterns(&mut self) -> Result<(), &'static str> {
        let patterns = vec![
            ErrorPattern {
                id: 1,
                name: "Memory Leak Pattern".to_string(),
                description: "Gradual memory consumption leading to allocation failures".to_string(),
                pattern_type: PatternType::ResourceLeak,
                trigger_conditions: vec![
                    MatchCondition::ErrorCategory(ErrorCategory::Memory),
                    MatchCondition::Frequency(5, 300000), // 5次在5分钟内
                ],
                characteristics: vec![
                    PatternCharacteristic {
                        name: "Growth Rate".to_string(),
                        value: "Linear".to_string(),
                        feature_type: FeatureType::Categorical,
                        weight: 0.8,
                    },
                ],
                related_errors: vec![1002, 1003],
                root_cause_analysis: RootCauseAnalysis {
                    id: 1,
                    possible_causes: vec![
                        PossibleCause {
                            id: 1,
                            description: "Memory leak in application".to_string(),
                            cause_category: CauseCategory::SoftwareBug,
                            probability: 0.9,
                            evidence_support: Vec::new(),
                            recommended_solutions: vec![
                                "Identify and fix memory leak".to_string(),
                                "Restart affected service".to_string(),
                            ],
                        },
                    ],
                    primary_cause: None,
                    confidence: 0.9,
                    evidence_chain: Vec::new(),
                    analysis_method: AnalysisMethod::ExpertSystem,
                    analysis_time: 0,
                },
                diagnostic_suggestions: vec![
                    DiagnosticSuggestion {
                        id: 1,
                        suggestion_type: SuggestionType::ServiceReset,
                        description: "Restart service to reclaim memory".to_string(),
                        action_steps: vec!["Identify affected service".to_string(), "Restart service".to_string()],
                        priority: 1,
                        expected_outcome: "Memory reclaimed".to_string(),
                        risk_assessment: RiskAssessment {
                            risk_level: RiskLevel::Medium,
                            description: "Service restart may cause brief interruption".to_string(),
                            potential_impact: vec!["Service interruption".to_string()],
                            mitigation_measures: vec!["Schedule during maintenance window".to_string()],
                            success_rate: 0.8,
                        },
                        required_resources: vec!["Service restart capability".to_string()],
                        estimated_time: 60000,
                    },
                ],
                frequency: 0,
                severity_score: 3.0,
                confidence: 0.9,
                last_detected: 0,
            },
        ];

        self.error_patterns = patterns;
        Ok(())
    }

    /// 获取分析历史
    pub fn get_analysis_history(&self, limit: Option<usize>) -> Vec<AnalysisResult> {
        let mut history = self.analysis_history.clone();
        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        if let Some(limit) = limit {
            history.truncate(limit);
        }

        history
    }

    /// 获取统计信息
    pub fn get_statistics(&self) -> AnalysisStats {
        self.stats.clone()
    }

    /// 更新配置
    pub fn update_config(&mut self, config: DiagnosticConfig) -> Result<(), &'static str> {
        self.config = config;
        Ok(())
    }

    /// 查询知识库
    pub fn query_knowledge_base(&self, keywords: &[String]) -> Vec<KnowledgeEntry> {
        self.knowledge_base
            .entries
            .iter()
            .filter(|entry| {
                keywords.iter().any(|keyword| {
                    entry.title.contains(keyword)
                    || entry.content.contains(keyword)
                    || entry.keywords.contains(keyword)
                })
            })
            .cloned()
            .collect()
    }

    /// 停止诊断分析器
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        self.analysis_rules.clear();
        self.error_patterns.clear();
        self.analysis_history.clear();

        crate::println!("[DiagnosticAnalyzer] Diagnostic analyzer shutdown successfully");
        Ok(())
    }
}

/// 创建默认的诊断分析器
pub fn create_diagnostic_analyzer() -> Arc<Mutex<DiagnosticAnalyzer>> {
    Arc::new(Mutex::new(DiagnosticAnalyzer::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_analyzer_creation() {
        let analyzer = DiagnosticAnalyzer::new();
        assert_eq!(analyzer.id, 1);
        assert!(analyzer.analysis_rules.is_empty());
        assert!(analyzer.error_patterns.is_empty());
    }

    #[test]
    fn test_pattern_matching() {
        let analyzer = DiagnosticAnalyzer::new();
        let error_record = ErrorRecord {
            id: 1,
            code: 1002,
            error_type: ErrorType::MemoryError,
            category: ErrorCategory::Memory,
            severity: ErrorSeverity::Error,
            status: ErrorStatus::New,
            message: "Memory allocation failed".to_string(),
            description: "Out of memory".to_string(),
            source: ErrorSource {
                module: "test".to_string(),
                function: "test_func".to_string(),
                file: "test.rs".to_string(),
                line: 10,
                column: 5,
                process_id: 1,
                thread_id: 1,
                cpu_id: 0,
            },
            timestamp: 0,
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
            system_state: SystemStateSnapshot {
                memory_usage: MemoryUsage {
                    total_memory: 0,
                    used_memory: 0,
                    available_memory: 0,
                    cached_memory: 0,
                    swap_used: 0,
                    kernel_memory: 0,
                },
                cpu_usage: CpuUsage {
                    usage_percent: 0.0,
                    user_percent: 0.0,
                    system_percent: 0.0,
                    idle_percent: 0.0,
                    wait_percent: 0.0,
                    interrupt_percent: 0.0,
                },
                process_states: Vec::new(),
                network_state: NetworkState {
                    active_connections: 0,
                    listening_ports: 0,
                    interfaces: Vec::new(),
                    packet_stats: PacketStats {
                        total_rx: 0,
                        total_tx: 0,
                        dropped: 0,
                        errors: 0,
                    },
                },
                filesystem_state: FileSystemState {
                    mount_points: Vec::new(),
                    disk_usage: Vec::new(),
                    io_stats: IoStats {
                        read_operations: 0,
                        write_operations: 0,
                        read_bytes: 0,
                        write_bytes: 0,
                        io_wait_time: 0,
                    },
                },
                device_states: Vec::new(),
                system_load: SystemLoad {
                    load_1min: 0.0,
                    load_5min: 0.0,
                    load_15min: 0.0,
                    run_queue_length: 0,
                    blocked_processes: 0,
                },
                timestamp: 0,
            },
            recovery_actions: Vec::new(),
            occurrence_count: 1,
            last_occurrence: 0,
            resolved: false,
            resolution_time: None,
            resolution_method: None,
            metadata: BTreeMap::new(),
        };

        let condition = MatchCondition::ErrorCategory(ErrorCategory::Memory);
        assert!(analyzer.evaluate_condition(&error_record, &condition));

        let condition = MatchCondition::ErrorCode(1003);
        assert!(!analyzer.evaluate_condition(&error_record, &condition));
    }

    #[test]
    fn test_diagnostic_config_default() {
        let config = DiagnosticConfig::default();
        assert!(config.enable_pattern_detection);
        assert!(config.enable_root_cause_analysis);
        assert_eq!(config.min_confidence_threshold, 0.7);
    }
}
