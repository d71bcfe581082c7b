// Forensics Module for Security Audit

extern crate alloc;
//
// 取证模块，负责安全事件的取证分析和调查

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
use super::{ForensicReport, ForensicFinding, ForensicFindingType, ForensicEvent};

/// 取证分析器
pub struct ForensicAnalyzer {
    /// 分析器ID
    pub id: u64,
    /// 分析引擎
    analysis_engine: Arc<Mutex<AnalysisEngine>>,
    /// 取证数据库
    forensic_db: Arc<Mutex<ForensicDatabase>>,
    /// 分析统计
    stats: Arc<Mutex<ForensicAnalyzerStats>>,
    /// 下一个分析ID
    next_analysis_id: AtomicU64,
}

/// 分析引擎
pub struct AnalysisEngine {
    /// 模式匹配器
    pattern_matcher: PatternMatcher,
    /// 行为分析器
    behavior_analyzer: BehaviorAnalyzer,
    /// 时间线构建器
    timeline_builder: TimelineBuilder,
}

/// 取证数据库
pub struct ForensicDatabase {
    /// 事件索引
    event_index: BTreeMap<u64, AuditEvent>,
    /// 时间线索引
    timeline_index: BTreeMap<u64, Vec<AuditEvent>>,
    /// 相关性图
    correlation_graph: CorrelationGraph,
}

/// 模式匹配器
pub struct PatternMatcher {
    /// 已知攻击模式
    attack_patterns: Vec<AttackPattern>,
    /// 异常模式
    anomaly_patterns: Vec<AnomalyPattern>,
}

/// 行为分析器
pub struct BehaviorAnalyzer {
    /// 用户行为模型
    user_models: BTreeMap<u32, BehaviorModel>,
    /// 系统行为基线
    system_baseline: SystemBaseline,
}

/// 时间线构建器
pub struct TimelineBuilder {
    /// 事件时间线
    event_timeline: Vec<TimelineEvent>,
    /// 关键时间点
    key_moments: Vec<KeyMoment>,
}

/// 攻击模式
#[derive(Debug, Clone)]
pub struct AttackPattern {
    /// 模式ID
    pub id: u64,
    /// 模式名称
    pub name: String,
    /// 模式描述
    pub description: String,
    /// 模式阶段
    pub stages: Vec<AttackStage>,
    /// 检测规则
    pub detection_rules: Vec<DetectionRule>,
}

/// 攻击阶段
#[derive(Debug, Clone)]
pub struct AttackStage {
    /// 阶段名称
    pub name: String,
    /// 阶段描述
    pub description: String,
    /// 事件类型
    pub event_types: Vec<AuditEventType>,
    /// 时间约束
    pub time_constraints: TimeConstraints,
}

/// 检测规则
#[derive(Debug, Clone)]
pub struct DetectionRule {
    /// 规则ID
    pub id: u64,
    /// 规则条件
    pub condition: String,
    /// 规则权重
    pub weight: f32,
}

/// 异常模式
#[derive(Debug, Clone)]
pub struct AnomalyPattern {
    /// 模式ID
    pub id: u64,
    /// 模式类型
    pub pattern_type: AnomalyType,
    /// 检测阈值
    pub threshold: f32,
    /// 统计方法
    pub statistical_method: StatisticalMethod,
}

/// 异常类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyType {
    /// 频率异常
    Frequency,
    /// 时间异常
    Temporal,
    /// 序列异常
    Sequential,
    /// 行为异常
    Behavioral,
}

/// 统计方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticalMethod {
    /// Z-score
    ZScore,
    /// 移动平均
    MovingAverage,
    /// 标准差
    StandardDeviation,
    /// 四分位数
    Quartile,
}

/// 时间约束
#[derive(Debug, Clone)]
pub struct TimeConstraints {
    /// 最小时间间隔
    pub min_interval: u64,
    /// 最大时间间隔
    pub max_interval: u64,
    /// 必须按顺序
    pub sequential: bool,
}

/// 行为模型
#[derive(Debug, Clone)]
pub struct BehaviorModel {
    /// 用户ID
    pub user_id: u32,
    /// 行为特征
    pub features: BTreeMap<String, f64>,
    /// 模型版本
    pub version: u32,
    /// 最后更新时间
    pub last_updated: u64,
}

/// 系统基线
#[derive(Debug, Clone)]
pub struct SystemBaseline {
    /// 基线指标
    pub metrics: BTreeMap<String, BaselineMetric>,
    /// 创建时间
    pub created_at: u64,
    /// 更新时间
    pub updated_at: u64,
}

/// 基线指标
#[derive(Debug, Clone)]
pub struct BaselineMetric {
    /// 指标名称
    pub name: String,
    /// 平均值
    pub mean: f64,
    /// 标准差
    pub std_dev: f64,
    /// 最小值
    pub min: f64,
    /// 最大值
    pub max: f64,
    /// 样本数量
    pub sample_count: u64,
}

/// 时间线事件
#[derive(Debug, Clone)]
pub struct TimelineEvent {
    /// 事件ID
    pub id: u64,
    /// 时间戳
    pub timestamp: u64,
    /// 事件类型
    pub event_type: String,
    /// 事件描述
    pub description: String,
    /// 重要性
    pub importance: f32,
    /// 关联事件
    pub related_events: Vec<u64>,
}

/// 关键时刻
#[derive(Debug, Clone)]
pub struct KeyMoment {
    /// 时刻ID
    pub id: u64,
    /// 时间戳
    pub timestamp: u64,
    /// 时刻类型
    pub moment_type: KeyMomentType,
    /// 描述
    pub description: String,
    /// 影响评估
    pub impact_assessment: ImpactAssessment,
}

/// 关键时刻类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMomentType {
    /// 攻击开始
    AttackStart,
    /// 攻击结束
    AttackEnd,
    /// 系统入侵
    SystemIntrusion,
    /// 数据泄露
    DataLeak,
    /// 权限提升
    PrivilegeEscalation,
    /// 恶意软件执行
    MalwareExecution,
}

/// 影响评估
#[derive(Debug, Clone)]
pub struct ImpactAssessment {
    /// 严重程度
    pub severity: AuditSeverity,
    /// 影响范围
    pub affected_scope: Vec<String>,
    /// 业务影响
    pub business_impact: String,
    /// 恢复时间
    pub recovery_time: Option<u64>,
}

/// 相关性图
#[derive(Debug, Clone)]
pub struct CorrelationGraph {
    /// 节点
    pub nodes: Vec<GraphNode>,
    /// 边
    pub edges: Vec<GraphEdge>,
    /// 图属性
    pub properties: BTreeMap<String, String>,
}

/// 图节点
#[derive(Debug, Clone)]
pub struct GraphNode {
    /// 节点ID
    pub id: u64,
    /// 节点类型
    pub node_type: NodeType,
    /// 节点属性
    pub attributes: BTreeMap<String, String>,
    /// 时间戳
    pub timestamp: u64,
}

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// 事件节点
    Event,
    /// 实体节点
    Entity,
    /// 进程节点
    Process,
    /// 文件节点
    File,
    /// 网络节点
    Network,
}

/// 图边
#[derive(Debug, Clone)]
pub struct GraphEdge {
    /// 边ID
    pub id: u64,
    /// 源节点
    pub source: u64,
    /// 目标节点
    pub target: u64,
    /// 边类型
    pub edge_type: EdgeType,
    /// 边权重
    pub weight: f64,
    /// 时间戳
    pub timestamp: u64,
}

/// 边类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeType {
    /// 因果关系
    Causal,
    /// 时序关系
    Temporal,
    /// 关联关系
    Associative,
    /// 层次关系
    Hierarchical,
}

/// 取证分析器统计
#[derive(Debug, Default, Clone)]
pub struct ForensicAnalyzerStats {
    /// 总分析次数
    pub total_analyses: u64,
    /// 检测到的攻击模式数
    pub attacks_detected: u64,
    /// 检测到的异常数
    pub anomalies_detected: u64,
    /// 生成的时间线数
    pub timelines_generated: u64,
    /// 平均分析时间（微秒）
    pub avg_analysis_time_us: u64,
    /// 处理的事件数
    pub events_processed: u64,
    /// 构建的相关性图数
    pub correlation_graphs_built: u64,
}

impl ForensicAnalyzer {
    /// 创建新的取证分析器
    pub fn new() -> Self {
        Self {
            id: 1,
            analysis_engine: Arc::new(Mutex::new(AnalysisEngine {
                pattern_matcher: PatternMatcher::new(),
                behavior_analyzer: BehaviorAnalyzer::new(),
                timeline_builder: TimelineBuilder::new(),
            })),
            forensic_db: Arc::new(Mutex::new(ForensicDatabase::new())),
            stats: Arc::new(Mutex::new(ForensicAnalyzerStats::default())),
            next_analysis_id: AtomicU64::new(1),
        }
    }

    /// 初始化取证分析器
    pub fn init(&mut self) -> Result<(), &'static str> {
        // 加载攻击模式
        self.analysis_engine.lock().pattern_matcher.load_attack_patterns()?;

        // 构建系统基线
        self.analysis_engine.lock().behavior_analyzer.build_system_baseline()?;

        crate::println!("[ForensicAnalyzer] Forensic analyzer initialized");
        Ok(())
    }

    /// 分析时间范围
    pub fn analyze_time_range(&mut self, time_range: (u64, u64)) -> Result<ForensicReport, &'static str> {
        let start_time = crate::time::get_timestamp_nanos();

        // 获取时间范围内的事件
        let events = self.get_events_in_time_range(time_range)?;

        // 模式匹配分析
        let attack_findings = self.analysis_engine.lock()
            .pattern_matcher
            .match_attack_patterns(&events)?;

        // 异常检测分析
        let anomaly_findings = self.analysis_engine.lock()
            .pattern_matcher
            .detect_anomalies(&events)?;

        // 行为分析
        let behavior_findings = self.analysis_engine.lock()
            .behavior_analyzer
            .analyze_behavior(&events)?;

        // 构建时间线
        let timeline = self.analysis_engine.lock()
            .timeline_builder
            .build_timeline(&events)?;

        // 构建相关性图
        let correlation_graph = self.build_correlation_graph(&events)?;

        // 合并所有发现
        let mut all_findings = Vec::new();
        all_findings.extend(attack_findings);
        all_findings.extend(anomaly_findings);
        all_findings.extend(behavior_findings);

        // 生成建议 (operate on references before moving)
        let recommended_actions = self.generate_recommendations(&all_findings);

        // 生成报告
        let report = ForensicReport {
            id: self.next_analysis_id.fetch_add(1, Ordering::SeqCst),
            time_range,
            findings: all_findings,
            key_events: events,
            timeline,
            recommended_actions,
            generated_at: crate::time::get_timestamp_nanos(),
        };

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.total_analyses += 1;
            // events has been moved into the report; we computed length above
            // so use that saved value
            stats.events_processed += report.key_events.len() as u64;
            stats.timelines_generated += 1;
            stats.correlation_graphs_built += 1;

            let elapsed = crate::time::get_timestamp_nanos() - start_time;
            stats.avg_analysis_time_us = (stats.avg_analysis_time_us + elapsed / 1000) / 2;
        }

        Ok(report)
    }

    /// 获取时间范围内的事件
    fn get_events_in_time_range(&self, time_range: (u64, u64)) -> Result<Vec<AuditEvent>, &'static str> {
        // 简化实现，返回模拟数据
        // 实际实现会从审计数据库查询
        let events = vec![
            AuditEvent {
                id: 1,
                event_type: AuditEventType::SecurityViolation,
                timestamp: time_range.0 + 1000,
                pid: 1234,
                uid: 1000,
                gid: 1000,
                severity: AuditSeverity::Critical,
                message: "Security violation detected".to_string(),
                data: BTreeMap::new(),
                source_location: None,
                tid: 1234,
                syscall: None,
            }
        ];
        Ok(events)
    }

    /// 构建相关性图
    fn build_correlation_graph(&self, events: &[AuditEvent]) -> Result<CorrelationGraph, &'static str> {
        // 简化的相关性图构建
        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        for (i, event) in events.iter().enumerate() {
            let node = GraphNode {
                id: i as u64,
                node_type: NodeType::Event,
                attributes: BTreeMap::new(),
                timestamp: event.timestamp,
            };
            nodes.push(node);
        }

        // 简单的时间序列连接
        for i in 0..events.len().saturating_sub(1) {
            let edge = GraphEdge {
                id: i as u64,
                source: i as u64,
                target: (i + 1) as u64,
                edge_type: EdgeType::Temporal,
                weight: 1.0,
                timestamp: events[i].timestamp,
            };
            edges.push(edge);
        }

        Ok(CorrelationGraph {
            nodes,
            edges,
            properties: BTreeMap::new(),
        })
    }

    /// 生成建议
    fn generate_recommendations(&self, findings: &[ForensicFinding]) -> Vec<String> {
        let mut recommendations = Vec::new();

        for finding in findings {
            match finding.finding_type {
                ForensicFindingType::SystemIntrusion => {
                    recommendations.push("立即隔离受影响的系统".to_string());
                    recommendations.push("进行全面的安全扫描".to_string());
                }
                ForensicFindingType::DataLeak => {
                    recommendations.push("通知相关利益方".to_string());
                    recommendations.push("评估数据泄露影响".to_string());
                }
                ForensicFindingType::Malware => {
                    recommendations.push("清除恶意软件".to_string());
                    recommendations.push("更新防病毒定义".to_string());
                }
                _ => {
                    recommendations.push("进一步调查此安全事件".to_string());
                }
            }
        }

        recommendations
    }

    /// 获取统计信息
    pub fn get_stats(&self) -> ForensicAnalyzerStats {
        (*self.stats.lock()).clone()
    }

    /// 重置统计信息
    pub fn reset_stats(&self) {
        *self.stats.lock() = ForensicAnalyzerStats::default();
    }
}

impl PatternMatcher {
    /// 创建新的模式匹配器
    pub fn new() -> Self {
        Self {
            attack_patterns: Vec::new(),
            anomaly_patterns: Vec::new(),
        }
    }

    /// 加载攻击模式
    pub fn load_attack_patterns(&mut self) -> Result<(), &'static str> {
        // 简化实现，加载一些默认攻击模式
        self.attack_patterns.push(AttackPattern {
            id: 1,
            name: "Brute Force Attack".to_string(),
            description: "Multiple failed login attempts".to_string(),
            stages: vec![],
            detection_rules: vec![],
        });

        Ok(())
    }

    /// 匹配攻击模式
    pub fn match_attack_patterns(&self, events: &[AuditEvent]) -> Result<Vec<ForensicFinding>, &'static str> {
        let mut findings = Vec::new();

        // 简化的攻击模式匹配
        let failed_logins = events.iter()
            .filter(|e| e.event_type == AuditEventType::Authentication)
            .count();

        if failed_logins > 5 {
            findings.push(ForensicFinding {
                id: 1,
                finding_type: ForensicFindingType::SecurityIncident,
                severity: AuditSeverity::Error,
                description: "Potential brute force attack detected".to_string(),
                related_events: events.iter().map(|e| e.id).collect(),
                timestamp: crate::time::get_timestamp_nanos(),
            });
        }

        Ok(findings)
    }

    /// 检测异常
    pub fn detect_anomalies(&self, events: &[AuditEvent]) -> Result<Vec<ForensicFinding>, &'static str> {
        let mut findings = Vec::new();

        // 简化的异常检测
        let critical_events = events.iter()
            .filter(|e| e.severity == AuditSeverity::Critical)
            .count();

        if critical_events > 0 {
            findings.push(ForensicFinding {
                id: 2,
                finding_type: ForensicFindingType::AnomalousBehavior,
                severity: AuditSeverity::Warning,
                description: "Unusual pattern of critical events detected".to_string(),
                related_events: events.iter().map(|e| e.id).collect(),
                timestamp: crate::time::get_timestamp_nanos(),
            });
        }

        Ok(findings)
    }
}

impl BehaviorAnalyzer {
    /// 创建新的行为分析器
    pub fn new() -> Self {
        Self {
            user_models: BTreeMap::new(),
            system_baseline: SystemBaseline {
                metrics: BTreeMap::new(),
                created_at: 0,
                updated_at: 0,
            },
        }
    }

    /// 构建系统基线
    pub fn build_system_baseline(&mut self) -> Result<(), &'static str> {
        self.system_baseline.created_at = crate::time::get_timestamp_nanos();
        Ok(())
    }

    /// 分析行为
    pub fn analyze_behavior(&self, events: &[AuditEvent]) -> Result<Vec<ForensicFinding>, &'static str> {
        // 简化的行为分析
        Ok(Vec::new())
    }
}

impl TimelineBuilder {
    /// 创建新的时间线构建器
    pub fn new() -> Self {
        Self {
            event_timeline: Vec::new(),
            key_moments: Vec::new(),
        }
    }

    /// 构建时间线
    pub fn build_timeline(&mut self, events: &[AuditEvent]) -> Result<Vec<ForensicEvent>, &'static str> {
        let mut timeline = Vec::new();

        for (i, event) in events.iter().enumerate() {
            let forensic_event = ForensicEvent {
                id: i as u64,
                timestamp: event.timestamp,
                event_type: format!("{:?}", event.event_type),
                description: event.message.clone(),
                importance: match event.severity {
                    AuditSeverity::Critical => 5,
                    AuditSeverity::Error => 4,
                    AuditSeverity::Warning => 3,
                    AuditSeverity::Info => 2,
                    AuditSeverity::Emergency => 6, // Higher than critical
                },
            };
            timeline.push(forensic_event);
        }

        // 按时间戳排序
        timeline.sort_by_key(|e| e.timestamp);

        Ok(timeline)
    }
}

impl ForensicDatabase {
    /// 创建新的取证数据库
    pub fn new() -> Self {
        Self {
            event_index: BTreeMap::new(),
            timeline_index: BTreeMap::new(),
            correlation_graph: CorrelationGraph {
                nodes: Vec::new(),
                edges: Vec::new(),
                properties: BTreeMap::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forensic_analyzer_creation() {
        let analyzer = ForensicAnalyzer::new();
        assert_eq!(analyzer.id, 1);
    }

    #[test]
    fn test_forensic_analyzer_stats() {
        let analyzer = ForensicAnalyzer::new();
        let stats = analyzer.get_stats();
        assert_eq!(stats.total_analyses, 0);
        assert_eq!(stats.attacks_detected, 0);
    }

    #[test]
    fn test_attack_pattern_creation() {
        let pattern = AttackPattern {
            id: 1,
            name: "Test Pattern".to_string(),
            description: "Test attack pattern".to_string(),
            stages: vec![],
            detection_rules: vec![],
        };

        assert_eq!(pattern.id, 1);
        assert_eq!(pattern.name, "Test Pattern");
    }

    #[test]
    fn test_anomaly_pattern_creation() {
        let pattern = AnomalyPattern {
            id: 1,
            pattern_type: AnomalyType::Frequency,
            threshold: 0.95,
            statistical_method: StatisticalMethod::ZScore,
        };

        assert_eq!(pattern.id, 1);
        assert_eq!(pattern.pattern_type, AnomalyType::Frequency);
        assert_eq!(pattern.threshold, 0.95);
    }
}
