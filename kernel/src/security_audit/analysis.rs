// Analysis Module for Security Audit

extern crate alloc;
//
// 分析模块，负责实时和批量的安全审计数据分析

use alloc::format;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::string::ToString;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

use crate::security::audit::{AuditEvent, AuditEventType, AuditSeverity};
use super::{AnalysisConfig, AnalysisType, AnomalyDetectionConfig, BehaviorAnalysisConfig, TrendAnalysisConfig};

/// 事件分析器
pub struct EventAnalyzer {
    /// 分析器ID
    pub id: u64,
    /// 分析配置
    config: AnalysisConfig,
    /// 异常检测器
    anomaly_detector: Arc<Mutex<AnomalyDetector>>,
    /// 行为分析器
    behavior_analyzer: Arc<Mutex<BehaviorAnalyzer>>,
    /// 趋势分析器
    trend_analyzer: Arc<Mutex<TrendAnalyzer>>,
    /// 关联分析器
    correlation_analyzer: Arc<Mutex<CorrelationAnalyzer>>,
    /// 分析统计
    stats: Arc<Mutex<EventAnalyzerStats>>,
    /// 下一个分析ID
    next_analysis_id: AtomicU64,
}

/// 异常检测器
pub struct AnomalyDetector {
    /// 检测算法
    algorithms: Vec<DetectionAlgorithm>,
    /// 基线数据
    baselines: BTreeMap<String, BaselineData>,
    /// 检测历史
    detection_history: Vec<AnomalyDetection>,
}

/// 行为分析器
pub struct BehaviorAnalyzer {
    /// 行为模型
    behavior_models: BTreeMap<u32, BehaviorModel>,
    /// 行为模式
    behavior_patterns: Vec<BehaviorPattern>,
    /// 分析结果缓存
    analysis_cache: BTreeMap<u64, BehaviorAnalysis>,
}

/// 趋势分析器
pub struct TrendAnalyzer {
    /// 时间序列数据
    time_series: BTreeMap<String, TimeSeries>,
    /// 趋势模型
    trend_models: BTreeMap<String, TrendModel>,
    /// 预测结果
    predictions: Vec<TrendPrediction>,
}

/// 关联分析器
pub struct CorrelationAnalyzer {
    /// 关联规则
    correlation_rules: Vec<CorrelationRule>,
    /// 事件相关性图
    event_correlations: CorrelationMatrix,
    /// 关联分析结果
    correlation_results: Vec<CorrelationResult>,
}

/// 检测算法
#[derive(Debug, Clone)]
pub struct DetectionAlgorithm {
    /// 算法ID
    pub id: u64,
    /// 算法名称
    pub name: String,
    /// 算法类型
    pub algorithm_type: AlgorithmType,
    /// 算法参数
    pub parameters: BTreeMap<String, f64>,
    /// 算法状态
    pub status: AlgorithmStatus,
}

/// 算法类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmType {
    /// 统计方法
    Statistical,
    /// 机器学习
    MachineLearning,
    /// 基于规则
    RuleBased,
    /// 混合方法
    Hybrid,
}

/// 算法状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmStatus {
    /// 训练中
    Training,
    /// 就绪
    Ready,
    /// 运行中
    Running,
    /// 错误
    Error,
}

/// 基线数据
#[derive(Debug, Clone)]
pub struct BaselineData {
    /// 数据标识
    pub identifier: String,
    /// 统计特征
    pub statistics: StatisticalFeatures,
    /// 创建时间
    pub created_at: u64,
    /// 更新时间
    pub updated_at: u64,
    /// 样本数量
    pub sample_count: u64,
}

/// 统计特征
#[derive(Debug, Clone, Default)]
pub struct StatisticalFeatures {
    /// 平均值
    pub mean: f64,
    /// 中位数
    pub median: f64,
    /// 标准差
    pub std_deviation: f64,
    /// 方差
    pub variance: f64,
    /// 最小值
    pub min: f64,
    /// 最大值
    pub max: f64,
    /// 四分位数
    pub quartiles: [f64; 3],
    /// 偏度
    pub skewness: f64,
    /// 峰度
    pub kurtosis: f64,
}

/// 异常检测结果
#[derive(Debug, Clone)]
pub struct AnomalyDetection {
    /// 检测ID
    pub id: u64,
    /// 事件ID
    pub event_id: u64,
    /// 异常分数
    pub anomaly_score: f64,
    /// 异常类型
    pub anomaly_type: AnomalyType,
    /// 检测算法
    pub detection_algorithm: String,
    /// 置信度
    pub confidence: f64,
    /// 检测时间
    pub detected_at: u64,
}

/// 异常类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyType {
    /// 统计异常
    Statistical,
    /// 行为异常
    Behavioral,
    /// 时序异常
    Temporal,
    /// 频率异常
    Frequency,
    /// 模式异常
    Pattern,
}

/// 行为模型
#[derive(Debug, Clone)]
pub struct BehaviorModel {
    /// 模型ID
    pub id: u64,
    /// 用户ID
    pub user_id: u32,
    /// 模型类型
    pub model_type: BehaviorModelType,
    /// 模型参数
    pub parameters: BTreeMap<String, f64>,
    /// 训练数据大小
    pub training_data_size: u64,
    /// 模型准确率
    pub accuracy: f64,
    /// 最后训练时间
    pub last_trained: u64,
}

/// 行为模型类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorModelType {
    /// 用户行为模型
    User,
    /// 系统行为模型
    System,
    /// 网络行为模型
    Network,
    /// 应用行为模型
    Application,
}

/// 行为模式
#[derive(Debug, Clone)]
pub struct BehaviorPattern {
    /// 模式ID
    pub id: u64,
    /// 模式名称
    pub name: String,
    /// 模式特征
    pub features: Vec<PatternFeature>,
    /// 出现频率
    pub frequency: f64,
    /// 模式类型
    pub pattern_type: PatternType,
}

/// 模式特征
#[derive(Debug, Clone)]
pub struct PatternFeature {
    /// 特征名称
    pub name: String,
    /// 特征值
    pub value: f64,
    /// 特征权重
    pub weight: f64,
    /// 特征类型
    pub feature_type: FeatureType,
}

/// 特征类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureType {
    /// 数值型
    Numeric,
    /// 分类型
    Categorical,
    /// 时间型
    Temporal,
    /// 序列型
    Sequential,
}

/// 模式类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternType {
    /// 正常模式
    Normal,
    /// 异常模式
    Anomalous,
    /// 可疑模式
    Suspicious,
    /// 恶意模式
    Malicious,
}

/// 行为分析结果
#[derive(Debug, Clone)]
pub struct BehaviorAnalysis {
    /// 分析ID
    pub id: u64,
    /// 事件ID
    pub event_id: u64,
    /// 行为评分
    pub behavior_score: f64,
    /// 风险等级
    pub risk_level: RiskLevel,
    /// 行为分类
    pub behavior_classification: BehaviorClassification,
    /// 相关模式
    pub matched_patterns: Vec<String>,
    /// 分析时间
    pub analyzed_at: u64,
}

/// 风险等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    /// 低风险
    Low,
    /// 中风险
    Medium,
    /// 高风险
    High,
    /// 严重风险
    Critical,
}

/// 行为分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorClassification {
    /// 正常行为
    Normal,
    /// 可疑行为
    Suspicious,
    /// 恶意行为
    Malicious,
    /// 异常行为
    Anomalous,
    /// 未知行为
    Unknown,
}

/// 时间序列
#[derive(Debug, Clone)]
pub struct TimeSeries {
    /// 序列标识
    pub identifier: String,
    /// 数据点
    pub data_points: Vec<DataPoint>,
    /// 时间间隔
    pub time_interval: u64,
    /// 单位
    pub unit: String,
}

/// 数据点
#[derive(Debug, Clone)]
pub struct DataPoint {
    /// 时间戳
    pub timestamp: u64,
    /// 数值
    pub value: f64,
    /// 标签
    pub labels: BTreeMap<String, String>,
}

/// 趋势模型
#[derive(Debug, Clone)]
pub struct TrendModel {
    /// 模型ID
    pub id: u64,
    /// 模型类型
    pub model_type: TrendModelType,
    /// 模型参数
    pub parameters: BTreeMap<String, f64>,
    /// 模型准确率
    pub accuracy: f64,
    /// 预测窗口
    pub prediction_horizon: u64,
}

/// 趋势模型类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendModelType {
    /// 线性回归
    LinearRegression,
    /// 移动平均
    MovingAverage,
    /// 指数平滑
    ExponentialSmoothing,
    /// ARIMA
    ARIMA,
    /// 神经网络
    NeuralNetwork,
}

/// 趋势预测
#[derive(Debug, Clone)]
pub struct TrendPrediction {
    /// 预测ID
    pub id: u64,
    /// 预测值
    pub predicted_value: f64,
    /// 置信区间
    pub confidence_interval: (f64, f64),
    /// 预测时间
    pub predicted_time: u64,
    /// 模型ID
    pub model_id: u64,
    /// 预测准确率
    pub accuracy: f64,
}

/// 关联规则
#[derive(Debug, Clone)]
pub struct CorrelationRule {
    /// 规则ID
    pub id: u64,
    /// 前提条件
    pub antecedent: Vec<EventCondition>,
    /// 结论
    pub consequent: Vec<EventCondition>,
    /// 支持度
    pub support: f64,
    /// 置信度
    pub confidence: f64,
    /// 提升度
    pub lift: f64,
}

/// 事件条件
#[derive(Debug, Clone)]
pub struct EventCondition {
    /// 事件类型
    pub event_type: AuditEventType,
    /// 属性条件
    pub attributes: BTreeMap<String, String>,
    /// 时间约束
    pub time_constraint: Option<TimeConstraint>,
}

/// 时间约束
#[derive(Debug, Clone)]
pub struct TimeConstraint {
    /// 最小时间间隔
    pub min_interval: u64,
    /// 最大时间间隔
    pub max_interval: u64,
}

/// 相关性矩阵
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    /// 矩阵维度
    pub dimensions: usize,
    /// 相关性值
    pub correlations: Vec<Vec<f64>>,
    /// 标签
    pub labels: Vec<String>,
}

/// 关联分析结果
#[derive(Debug, Clone)]
pub struct CorrelationResult {
    /// 结果ID
    pub id: u64,
    /// 相关事件对
    pub event_pairs: Vec<(u64, u64)>,
    /// 相关性强度
    pub correlation_strength: f64,
    /// 相关性类型
    pub correlation_type: CorrelationType,
    /// 分析时间
    pub analyzed_at: u64,
}

/// 相关性类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationType {
    /// 正相关
    Positive,
    /// 负相关
    Negative,
    /// 无相关
    None,
    /// 因果关系
    Causal,
}

/// 事件分析器统计
#[derive(Debug, Default, Clone)]
pub struct EventAnalyzerStats {
    /// 总分析次数
    pub total_analyses: u64,
    /// 异常检测次数
    pub anomaly_detections: u64,
    /// 行为分析次数
    pub behavior_analyses: u64,
    /// 趋势分析次数
    pub trend_analyses: u64,
    /// 关联分析次数
    pub correlation_analyses: u64,
    /// 平均分析时间（微秒）
    pub avg_analysis_time_us: u64,
    /// 检测到的异常数
    pub anomalies_detected: u64,
    /// 识别的异常行为数
    pub anomalous_behaviors: u64,
    /// 生成的预测数
    pub predictions_generated: u64,
    /// 发现的关联数
    pub correlations_found: u64,
}

impl EventAnalyzer {
    /// 创建新的事件分析器
    pub fn new() -> Self {
        Self {
            id: 1,
            config: AnalysisConfig::default(),
            anomaly_detector: Arc::new(Mutex::new(AnomalyDetector::new())),
            behavior_analyzer: Arc::new(Mutex::new(BehaviorAnalyzer::new())),
            trend_analyzer: Arc::new(Mutex::new(TrendAnalyzer::new())),
            correlation_analyzer: Arc::new(Mutex::new(CorrelationAnalyzer::new())),
            stats: Arc::new(Mutex::new(EventAnalyzerStats::default())),
            next_analysis_id: AtomicU64::new(1),
        }
    }

    /// 初始化事件分析器
    pub fn init(&mut self, config: &AnalysisConfig) -> Result<(), &'static str> {
        self.config = config.clone();

        // 初始化各个分析器
        self.anomaly_detector.lock().init(&config.anomaly_detection)?;
        self.behavior_analyzer.lock().init(&config.behavior_analysis)?;
        self.trend_analyzer.lock().init(&config.trend_analysis)?;

        crate::println!("[EventAnalyzer] Event analyzer initialized");
        Ok(())
    }

    /// 分析事件
    pub fn analyze_event(&mut self, event: &AuditEvent) -> Result<(), &'static str> {
        let start_time = crate::time::get_timestamp_nanos();

        // 异常检测
        if self.config.analysis_types.contains(&AnalysisType::AnomalyDetection) {
            let anomaly_result = self.anomaly_detector.lock().detect_anomaly(event)?;
            if let Some(anomaly) = anomaly_result {
                self.handle_anomaly_detection(&anomaly)?;
            }
        }

        // 行为分析
        if self.config.analysis_types.contains(&AnalysisType::BehaviorAnalysis) {
            let behavior_result = self.behavior_analyzer.lock().analyze_behavior(event)?;
            self.handle_behavior_analysis(&behavior_result)?;
        }

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.total_analyses += 1;

            let elapsed = crate::time::get_timestamp_nanos() - start_time;
            stats.avg_analysis_time_us = (stats.avg_analysis_time_us + elapsed / 1000) / 2;
        }

        Ok(())
    }

    /// 处理异常检测结果
    fn handle_anomaly_detection(&mut self, anomaly: &AnomalyDetection) -> Result<(), &'static str> {
        {
            let mut stats = self.stats.lock();
            stats.anomaly_detections += 1;
            stats.anomalies_detected += 1;
        }

        crate::println!("[EventAnalyzer] Anomaly detected: score={:.2}, type={:?}",
                 anomaly.anomaly_score, anomaly.anomaly_type);

        Ok(())
    }

    /// 处理行为分析结果
    fn handle_behavior_analysis(&mut self, analysis: &BehaviorAnalysis) -> Result<(), &'static str> {
        {
            let mut stats = self.stats.lock();
            stats.behavior_analyses += 1;

            if matches!(analysis.behavior_classification, BehaviorClassification::Anomalous | BehaviorClassification::Malicious) {
                stats.anomalous_behaviors += 1;
            }
        }

        crate::println!("[EventAnalyzer] Behavior analysis: score={:.2}, risk={:?}",
                 analysis.behavior_score, analysis.risk_level);

        Ok(())
    }

    /// 执行趋势分析
    pub fn run_trend_analysis(&mut self) -> Result<Vec<TrendPrediction>, &'static str> {
        let predictions = self.trend_analyzer.lock().generate_predictions()?;

        {
            let mut stats = self.stats.lock();
            stats.trend_analyses += 1;
            stats.predictions_generated += predictions.len() as u64;
        }

        Ok(predictions)
    }

    /// 执行关联分析
    pub fn run_correlation_analysis(&mut self, events: &[AuditEvent]) -> Result<Vec<CorrelationResult>, &'static str> {
        let correlations = self.correlation_analyzer.lock().analyze_correlations(events)?;

        {
            let mut stats = self.stats.lock();
            stats.correlation_analyses += 1;
            stats.correlations_found += correlations.len() as u64;
        }

        Ok(correlations)
    }

    /// 获取统计信息
    pub fn get_stats(&self) -> EventAnalyzerStats {
        self.stats.lock().clone()
    }

    /// 重置统计信息
    pub fn reset_stats(&self) {
        *self.stats.lock() = EventAnalyzerStats::default();
    }
}

impl AnomalyDetector {
    /// 创建新的异常检测器
    pub fn new() -> Self {
        Self {
            algorithms: Vec::new(),
            baselines: BTreeMap::new(),
            detection_history: Vec::new(),
        }
    }

    /// 初始化异常检测器
    pub fn init(&mut self, config: &AnomalyDetectionConfig) -> Result<(), &'static str> {
        // 根据配置创建检测算法
        match config.algorithm {
            super::AnomalyAlgorithm::IsolationForest => {
                self.algorithms.push(DetectionAlgorithm {
                    id: 1,
                    name: "Isolation Forest".to_string(),
                    algorithm_type: AlgorithmType::MachineLearning,
                    parameters: BTreeMap::new(),
                    status: AlgorithmStatus::Ready,
                });
            }
            super::AnomalyAlgorithm::Statistical => {
                self.algorithms.push(DetectionAlgorithm {
                    id: 2,
                    name: "Statistical Anomaly Detection".to_string(),
                    algorithm_type: AlgorithmType::Statistical,
                    parameters: BTreeMap::new(),
                    status: AlgorithmStatus::Ready,
                });
            }
            _ => {}
        }

        Ok(())
    }

    /// 检测异常
    pub fn detect_anomaly(&mut self, event: &AuditEvent) -> Result<Option<AnomalyDetection>, &'static str> {
        // 简化的异常检测逻辑
        let anomaly_score = self.calculate_anomaly_score(event)?;
        let threshold = 0.8;

        if anomaly_score > threshold {
            let detection = AnomalyDetection {
                id: self.detection_history.len() as u64 + 1,
                event_id: event.id,
                anomaly_score,
                anomaly_type: AnomalyType::Statistical,
                detection_algorithm: "Statistical".to_string(),
                confidence: 0.9,
                detected_at: crate::time::get_timestamp_nanos(),
            };

            self.detection_history.push(detection.clone());
            Ok(Some(detection))
        } else {
            Ok(None)
        }
    }

    /// 计算异常分数
    fn calculate_anomaly_score(&self, event: &AuditEvent) -> Result<f64, &'static str> {
        // 简化的异常分数计算
        let mut score = 0.0;

        // 基于严重程度的分数
        match event.severity {
            AuditSeverity::Critical => score += 0.9,
            AuditSeverity::Error => score += 0.7,
            AuditSeverity::Warning => score += 0.4,
            AuditSeverity::Info => score += 0.1,
            AuditSeverity::Emergency => score += 1.0, // Highest severity
        }

        // 基于事件类型的分数
        match event.event_type {
            AuditEventType::SecurityViolation => score += 0.8,
            AuditEventType::Process => score += 0.3,
            AuditEventType::Network => score += 0.4,
            _ => score += 0.1,
        }

        Ok((score as f64).min(1.0))
    }
}

impl BehaviorAnalyzer {
    /// 创建新的行为分析器
    pub fn new() -> Self {
        Self {
            behavior_models: BTreeMap::new(),
            behavior_patterns: Vec::new(),
            analysis_cache: BTreeMap::new(),
        }
    }

    /// 初始化行为分析器
    pub fn init(&mut self, config: &BehaviorAnalysisConfig) -> Result<(), &'static str> {
        // 加载行为模型
        for model_type in &config.models {
            match model_type {
                super::BehaviorModel::UserBehavior => {
                    // 加载用户行为模型
                }
                super::BehaviorModel::SystemBehavior => {
                    // 加载系统行为模型
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// 分析行为
    pub fn analyze_behavior(&mut self, event: &AuditEvent) -> Result<BehaviorAnalysis, &'static str> {
        let behavior_score = self.calculate_behavior_score(event)?;
        let risk_level = self.determine_risk_level(behavior_score);
        let behavior_classification = self.classify_behavior(behavior_score, event);

        let analysis = BehaviorAnalysis {
            id: self.analysis_cache.len() as u64 + 1,
            event_id: event.id,
            behavior_score,
            risk_level,
            behavior_classification,
            matched_patterns: Vec::new(),
            analyzed_at: crate::time::get_timestamp_nanos(),
        };

        self.analysis_cache.insert(event.id, analysis.clone());
        Ok(analysis)
    }

    /// 计算行为分数
    fn calculate_behavior_score(&self, event: &AuditEvent) -> Result<f64, &'static str> {
        // 简化的行为分数计算
        let mut score = 0.5; // 基础分数

        // 基于时间模式
        let current_hour = (crate::time::get_timestamp() / 3600) % 24;
        if current_hour >= 9 && current_hour <= 17 {
            score += 0.1; // 工作时间内正常
        } else {
            score += 0.3; // 非工作时间可疑
        }

        // 基于事件类型
        match event.event_type {
            AuditEventType::Authentication => score += 0.2,
            AuditEventType::FileAccess => score += 0.1,
            AuditEventType::Network => score += 0.15,
            _ => {}
        }

        Ok((score as f64).min(1.0))
    }

    /// 确定风险等级
    fn determine_risk_level(&self, score: f64) -> RiskLevel {
        if score >= 0.8 {
            RiskLevel::Critical
        } else if score >= 0.6 {
            RiskLevel::High
        } else if score >= 0.4 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// 分类行为
    fn classify_behavior(&self, score: f64, event: &AuditEvent) -> BehaviorClassification {
        if score >= 0.8 {
            BehaviorClassification::Malicious
        } else if score >= 0.6 {
            BehaviorClassification::Suspicious
        } else if score <= 0.2 {
            BehaviorClassification::Normal
        } else {
            BehaviorClassification::Unknown
        }
    }
}

impl TrendAnalyzer {
    /// 创建新的趋势分析器
    pub fn new() -> Self {
        Self {
            time_series: BTreeMap::new(),
            trend_models: BTreeMap::new(),
            predictions: Vec::new(),
        }
    }

    /// 初始化趋势分析器
    pub fn init(&mut self, config: &TrendAnalysisConfig) -> Result<(), &'static str> {
        // 初始化时间序列
        self.time_series.insert("event_count".to_string(), TimeSeries {
            identifier: "event_count".to_string(),
            data_points: Vec::new(),
            time_interval: 3600, // 1 hour
            unit: "count".to_string(),
        });

        Ok(())
    }

    /// 生成预测
    pub fn generate_predictions(&mut self) -> Result<Vec<TrendPrediction>, &'static str> {
        let mut predictions = Vec::new();

        // 简化的预测逻辑
        for (identifier, time_series) in &self.time_series {
            if !time_series.data_points.is_empty() {
                let last_value = time_series.data_points.last().unwrap().value;
                let predicted_value = last_value * 1.1; // 简单的线性预测

                let prediction = TrendPrediction {
                    id: predictions.len() as u64 + 1,
                    predicted_value,
                    confidence_interval: (predicted_value * 0.9, predicted_value * 1.1),
                    predicted_time: crate::time::get_timestamp() + 86400, // 1 day ahead
                    model_id: 1,
                    accuracy: 0.85,
                };

                predictions.push(prediction);
            }
        }

        self.predictions = predictions.clone();
        Ok(predictions)
    }
}

impl CorrelationAnalyzer {
    /// 创建新的关联分析器
    pub fn new() -> Self {
        Self {
            correlation_rules: Vec::new(),
            event_correlations: CorrelationMatrix {
                dimensions: 0,
                correlations: Vec::new(),
                labels: Vec::new(),
            },
            correlation_results: Vec::new(),
        }
    }

    /// 分析关联性
    pub fn analyze_correlations(&mut self, events: &[AuditEvent]) -> Result<Vec<CorrelationResult>, &'static str> {
        let mut results = Vec::new();

        // 简化的关联分析
        for i in 0..events.len().saturating_sub(1) {
            for j in (i + 1)..events.len() {
                let correlation_strength = self.calculate_correlation(&events[i], &events[j]);

                if correlation_strength > 0.7 {
                    let result = CorrelationResult {
                        id: results.len() as u64 + 1,
                        event_pairs: vec![(events[i].id, events[j].id)],
                        correlation_strength,
                        correlation_type: CorrelationType::Positive,
                        analyzed_at: crate::time::get_timestamp_nanos(),
                    };

                    results.push(result);
                }
            }
        }

        self.correlation_results = results.clone();
        Ok(results)
    }

    /// 计算关联强度
    fn calculate_correlation(&self, event1: &AuditEvent, event2: &AuditEvent) -> f64 {
        // 简化的关联性计算
        let mut correlation = 0.0;

        // 相同事件类型
        if event1.event_type == event2.event_type {
            correlation += 0.5;
        }

        // 相同用户
        if event1.uid == event2.uid {
            correlation += 0.3;
        }

        // 相同进程
        if event1.pid == event2.pid {
            correlation += 0.2;
        }

        // 时间相近（1小时内）
        let time_diff = (event1.timestamp as i64 - event2.timestamp as i64).abs();
        if time_diff < 3600_000_000_000 { // 1 hour in nanoseconds
            correlation += 0.2;
        }

        f64::min(correlation, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_analyzer_creation() {
        let analyzer = EventAnalyzer::new();
        assert_eq!(analyzer.id, 1);
    }

    #[test]
    fn test_event_analyzer_stats() {
        let analyzer = EventAnalyzer::new();
        let stats = analyzer.get_stats();
        assert_eq!(stats.total_analyses, 0);
        assert_eq!(stats.anomaly_detections, 0);
    }

    #[test]
    fn test_anomaly_detector() {
        let mut detector = AnomalyDetector::new();
        let config = AnomalyDetectionConfig::default();
        let result = detector.init(&config);
        assert!(result.is_ok());
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn test_correlation_type() {
        assert_eq!(CorrelationType::Positive, CorrelationType::Positive);
        assert_ne!(CorrelationType::Positive, CorrelationType::Negative);
    }
}
