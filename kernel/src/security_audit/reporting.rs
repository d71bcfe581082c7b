// Reporting Module for Security Audit

extern crate alloc;
//
// 报告模块，负责生成各种格式的安全审计报告

use alloc::format;
use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::string::ToString;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

use crate::security::audit::{AuditEvent, AuditEventType, AuditSeverity};
use super::{ReportType, ReportFrequency, ReportFormat, ReportingConfig};

/// 报告生成器
pub struct ReportGenerator {
    /// 生成器ID
    pub id: u64,
    /// 报告配置
    config: ReportingConfig,
    /// 模板引擎
    template_engine: Arc<Mutex<TemplateEngine>>,
    /// 数据收集器
    data_collector: Arc<Mutex<DataCollector>>,
    /// 格式化器
    formatters: BTreeMap<ReportFormat, Box<dyn ReportFormatter>>,
    /// 统计信息
    stats: Arc<Mutex<ReportGeneratorStats>>,
    /// 下一个报告ID
    next_report_id: AtomicU64,
}

/// 模板引擎
pub struct TemplateEngine {
    /// 模板缓存
    templates: BTreeMap<String, ReportTemplate>,
    /// 模板变量
    variables: BTreeMap<String, TemplateVariable>,
}

/// 数据收集器
pub struct DataCollector {
    /// 数据源
    data_sources: Vec<DataSource>,
    /// 数据缓存
    cache: BTreeMap<String, CollectedData>,
    /// 收集统计
    stats: DataCollectionStats,
}

/// 报告模板
#[derive(Debug, Clone)]
pub struct ReportTemplate {
    /// 模板ID
    pub id: u64,
    /// 模板名称
    pub name: String,
    /// 模板内容
    pub content: String,
    /// 模板类型
    pub template_type: TemplateType,
    /// 模板参数
    pub parameters: Vec<TemplateParameter>,
}

/// 模板类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateType {
    /// HTML模板
    Html,
    /// PDF模板
    Pdf,
    /// 文本模板
    Text,
    /// JSON模板
    Json,
    /// CSV模板
    Csv,
    /// XML模板
    Xml,
}

/// 模板参数
#[derive(Debug, Clone)]
pub struct TemplateParameter {
    /// 参数名
    pub name: String,
    /// 参数类型
    pub param_type: ParameterType,
    /// 是否必需
    pub required: bool,
    /// 默认值
    pub default_value: Option<String>,
    /// 描述
    pub description: String,
}

/// 参数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    /// 字符串
    String,
    /// 数字
    Number,
    /// 布尔值
    Boolean,
    /// 日期
    Date,
    /// 列表
    List,
    /// 对象
    Object,
}

/// 模板变量
#[derive(Debug, Clone)]
pub struct TemplateVariable {
    /// 变量名
    pub name: String,
    /// 变量值
    pub value: VariableValue,
    /// 变量类型
    pub var_type: ParameterType,
}

/// 变量值
#[derive(Debug, Clone)]
pub enum VariableValue {
    /// 字符串值
    String(String),
    /// 数值
    Number(f64),
    /// 布尔值
    Boolean(bool),
    /// 列表值
    List(Vec<VariableValue>),
    /// 对象值
    Object(BTreeMap<String, VariableValue>),
}

/// 数据源
#[derive(Debug, Clone)]
pub struct DataSource {
    /// 源ID
    pub id: u64,
    /// 源名称
    pub name: String,
    /// 源类型
    pub source_type: DataSourceType,
    /// 连接字符串
    pub connection_string: String,
    /// 查询模板
    pub query_template: String,
}

/// 数据源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceType {
    /// 审计数据库
    AuditDatabase,
    /// 日志文件
    LogFiles,
    /// 系统指标
    SystemMetrics,
    /// 网络日志
    NetworkLogs,
    /// 配置数据库
    ConfigDatabase,
    /// 外部API
    ExternalApi,
}

/// 收集的数据
#[derive(Debug, Clone)]
pub struct CollectedData {
    /// 数据ID
    pub id: u64,
    /// 数据名称
    pub name: String,
    /// 数据内容
    pub content: BTreeMap<String, VariableValue>,
    /// 收集时间
    pub collected_at: u64,
    /// 过期时间
    pub expires_at: u64,
}

/// 数据收集统计
#[derive(Debug, Default)]
pub struct DataCollectionStats {
    /// 总收集次数
    pub total_collections: u64,
    /// 成功收集次数
    pub successful_collections: u64,
    /// 失败收集次数
    pub failed_collections: u64,
    /// 缓存命中次数
    pub cache_hits: u64,
    /// 缓存未命中次数
    pub cache_misses: u64,
    /// 平均收集时间（微秒）
    pub avg_collection_time_us: u64,
}

/// 报告格式化器特征
pub trait ReportFormatter: Send + Sync {
    /// 格式化报告
    fn format_report(&mut self, data: &ReportData) -> Result<Vec<u8>, &'static str>;
    /// 获取格式化器信息
    fn get_info(&self) -> FormatterInfo;
}

/// 报告数据
#[derive(Debug, Clone)]
pub struct ReportData {
    /// 报告元数据
    pub metadata: ReportMetadata,
    /// 报告内容
    pub content: ReportContent,
    /// 报告统计
    pub statistics: ReportStatistics,
}

/// 报告元数据
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    /// 报告ID
    pub id: u64,
    /// 报告标题
    pub title: String,
    /// 报告类型
    pub report_type: ReportType,
    /// 生成时间
    pub generated_at: u64,
    /// 时间范围
    pub time_range: (u64, u64),
    /// 生成者
    pub generator: String,
    /// 报告版本
    pub version: String,
    /// 标签
    pub tags: Vec<String>,
}

/// 报告内容
#[derive(Debug, Clone)]
pub struct ReportContent {
    /// 执行摘要
    pub executive_summary: String,
    /// 主要发现
    pub key_findings: Vec<Finding>,
    /// 详细分析
    pub detailed_analysis: Vec<AnalysisSection>,
    /// 建议
    pub recommendations: Vec<Recommendation>,
    /// 附录
    pub appendices: Vec<Appendix>,
}

/// 发现
#[derive(Debug, Clone)]
pub struct Finding {
    /// 发现ID
    pub id: u64,
    /// 发现标题
    pub title: String,
    /// 发现描述
    pub description: String,
    /// 严重程度
    pub severity: FindingSeverity,
    /// 影响
    pub impact: String,
    /// 相关证据
    pub evidence: Vec<Evidence>,
    /// 修复建议
    pub remediation: String,
}

/// 发现严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FindingSeverity {
    /// 信息
    Info,
    /// 低
    Low,
    /// 中
    Medium,
    /// 高
    High,
    /// 严重
    Critical,
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
    /// 收集时间
    pub collected_at: u64,
    /// 来源
    pub source: String,
}

/// 证据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceType {
    /// 日志条目
    LogEntry,
    /// 系统配置
    SystemConfig,
    /// 网络流量
    NetworkTraffic,
    /// 文件内容
    FileContent,
    /// 截图
    Screenshot,
    /// 命令输出
    CommandOutput,
}

/// 分析部分
#[derive(Debug, Clone)]
pub struct AnalysisSection {
    /// 部分ID
    pub id: u64,
    /// 部分标题
    pub title: String,
    /// 部分内容
    pub content: String,
    /// 图表
    pub charts: Vec<Chart>,
    /// 表格
    pub tables: Vec<Table>,
}

/// 图表
#[derive(Debug, Clone)]
pub struct Chart {
    /// 图表ID
    pub id: u64,
    /// 图表类型
    pub chart_type: ChartType,
    /// 图表标题
    pub title: String,
    /// 数据
    pub data: ChartData,
    /// 配置
    pub config: ChartConfig,
}

/// 图表类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    /// 柱状图
    Bar,
    /// 折线图
    Line,
    /// 饼图
    Pie,
    /// 散点图
    Scatter,
    /// 热力图
    Heatmap,
    /// 雷达图
    Radar,
}

/// 图表数据
#[derive(Debug, Clone)]
pub struct ChartData {
    /// 数据点
    pub data_points: Vec<DataPoint>,
    /// 轴标签
    pub axis_labels: BTreeMap<String, String>,
    /// 图例
    pub legend: Vec<String>,
}

/// 数据点
#[derive(Debug, Clone)]
pub struct DataPoint {
    /// X值
    pub x: f64,
    /// Y值
    pub y: f64,
    /// 标签
    pub label: String,
    /// 颜色
    pub color: Option<String>,
}

/// 图表配置
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// 宽度
    pub width: u32,
    /// 高度
    pub height: u32,
    /// 背景颜色
    pub background_color: String,
    /// 字体大小
    pub font_size: u32,
    /// 其他配置
    pub additional_config: BTreeMap<String, String>,
}

/// 表格
#[derive(Debug, Clone)]
pub struct Table {
    /// 表格ID
    pub id: u64,
    /// 表格标题
    pub title: String,
    /// 列定义
    pub columns: Vec<Column>,
    /// 行数据
    pub rows: Vec<Row>,
    /// 表格配置
    pub config: TableConfig,
}

/// 列
#[derive(Debug, Clone)]
pub struct Column {
    /// 列ID
    pub id: u64,
    /// 列名
    pub name: String,
    /// 数据类型
    pub data_type: ColumnDataType,
    /// 宽度
    pub width: Option<u32>,
    /// 是否可排序
    pub sortable: bool,
}

/// 列数据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDataType {
    /// 字符串
    String,
    /// 数字
    Number,
    /// 日期
    Date,
    /// 布尔值
    Boolean,
    /// 链接
    Link,
}

/// 行
#[derive(Debug, Clone)]
pub struct Row {
    /// 行ID
    pub id: u64,
    /// 单元格
    pub cells: Vec<Cell>,
}

/// 单元格
#[derive(Debug, Clone)]
pub struct Cell {
    /// 值
    pub value: String,
    /// 格式
    pub format: Option<String>,
    /// 样式
    pub style: Option<CellStyle>,
}

/// 单元格样式
#[derive(Debug, Clone)]
pub struct CellStyle {
    /// 背景颜色
    pub background_color: Option<String>,
    /// 文本颜色
    pub text_color: Option<String>,
    /// 字体粗细
    pub font_weight: Option<String>,
    /// 对齐方式
    pub text_align: Option<String>,
}

/// 表格配置
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// 是否显示边框
    pub show_borders: bool,
    /// 是否显示斑马纹
    pub show_stripes: bool,
    /// 每页行数
    pub rows_per_page: Option<u32>,
    /// 是否可排序
    pub sortable: bool,
}

/// 建议
#[derive(Debug, Clone)]
pub struct Recommendation {
    /// 建议ID
    pub id: u64,
    /// 建议标题
    pub title: String,
    /// 建议描述
    pub description: String,
    /// 优先级
    pub priority: RecommendationPriority,
    /// 预期效果
    pub expected_outcome: String,
    /// 实施步骤
    pub implementation_steps: Vec<String>,
    /// 负责人
    pub assignee: Option<String>,
    /// 截止日期
    pub due_date: Option<u64>,
}

/// 建议优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RecommendationPriority {
    /// 低
    Low,
    /// 中
    Medium,
    /// 高
    High,
    /// 紧急
    Urgent,
}

/// 附录
#[derive(Debug, Clone)]
pub struct Appendix {
    /// 附录ID
    pub id: u64,
    /// 附录标题
    pub title: String,
    /// 附录内容
    pub content: String,
    /// 附录类型
    pub appendix_type: AppendixType,
}

/// 附录类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendixType {
    /// 技术细节
    TechnicalDetails,
    /// 原始数据
    RawData,
    /// 参考资料
    References,
    /// 术语表
    Glossary,
    /// 联系信息
    ContactInfo,
}

/// 报告统计
#[derive(Debug, Clone)]
pub struct ReportStatistics {
    /// 总事件数
    pub total_events: u64,
    /// 按类型统计
    pub events_by_type: BTreeMap<AuditEventType, u64>,
    /// 按严重级别统计
    pub events_by_severity: BTreeMap<AuditSeverity, u64>,
    /// 关键指标
    pub key_metrics: BTreeMap<String, f64>,
    /// 趋势数据
    pub trend_data: Vec<TrendDataPoint>,
}

/// 趋势数据点
#[derive(Debug, Clone)]
pub struct TrendDataPoint {
    /// 时间戳
    pub timestamp: u64,
    /// 指标值
    pub value: f64,
    /// 指标名称
    pub metric_name: String,
}

/// 格式化器信息
#[derive(Debug, Clone)]
pub struct FormatterInfo {
    /// 格式化器名称
    pub name: String,
    /// 支持的格式
    pub supported_format: ReportFormat,
    /// 版本
    pub version: String,
    /// 功能描述
    pub description: String,
}

/// 报告生成器统计
#[derive(Debug, Default, Clone)]
pub struct ReportGeneratorStats {
    /// 总生成报告数
    pub total_reports_generated: u64,
    /// 按类型统计
    pub reports_by_type: BTreeMap<ReportType, u64>,
    /// 按格式统计
    pub reports_by_format: BTreeMap<ReportFormat, u64>,
    /// 平均生成时间（微秒）
    pub avg_generation_time_us: u64,
    /// 生成成功次数
    pub successful_generations: u64,
    /// 生成失败次数
    pub failed_generations: u64,
}

impl ReportGenerator {
    /// 创建新的报告生成器
    pub fn new() -> Self {
        let mut formatters: BTreeMap<ReportFormat, Box<dyn ReportFormatter>> = BTreeMap::new();

        // 注册默认格式化器
        formatters.insert(ReportFormat::HTML, Box::new(HtmlFormatter::new()));
        formatters.insert(ReportFormat::PDF, Box::new(PdfFormatter::new()));
        formatters.insert(ReportFormat::JSON, Box::new(JsonFormatter::new()));
        formatters.insert(ReportFormat::CSV, Box::new(CsvFormatter::new()));

        Self {
            id: 1,
            config: ReportingConfig::default(),
            template_engine: Arc::new(Mutex::new(TemplateEngine::new())),
            data_collector: Arc::new(Mutex::new(DataCollector::new())),
            formatters,
            stats: Arc::new(Mutex::new(ReportGeneratorStats::default())),
            next_report_id: AtomicU64::new(1),
        }
    }

    /// 初始化报告生成器
    pub fn init(&mut self, config: &ReportingConfig) -> Result<(), &'static str> {
        self.config = config.clone();

        // 初始化模板引擎
        self.template_engine.lock().load_default_templates()?;

        // 初始化数据收集器
        self.data_collector.lock().init_data_sources()?;

        crate::println!("[ReportGenerator] Report generator initialized");
        Ok(())
    }

    /// 生成报告
    pub fn generate_report(&mut self, report_type: ReportType) -> Result<String, &'static str> {
        let start_time = crate::time::get_timestamp_nanos();

        // 收集数据
        let report_data = self.collect_report_data(report_type)?;

        // 生成报告
        let generated_report = match self.config.formats.first() {
            Some(format) => self.generate_formatted_report(&report_data, *format)?,
            None => return Err("No report format specified"),
        };

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.total_reports_generated += 1;
            *stats.reports_by_type.entry(report_type).or_insert(0) += 1;
            *stats.reports_by_format.entry(*self.config.formats.first().unwrap()).or_insert(0) += 1;
            stats.successful_generations += 1;

            let elapsed = crate::time::get_timestamp_nanos() - start_time;
            stats.avg_generation_time_us = (stats.avg_generation_time_us + elapsed / 1000) / 2;
        }

        Ok(generated_report)
    }

    /// 收集报告数据
    fn collect_report_data(&mut self, report_type: ReportType) -> Result<ReportData, &'static str> {
        let report_id = self.next_report_id.fetch_add(1, Ordering::SeqCst);

        // 确定时间范围
        let time_range = self.get_time_range_for_report_type(report_type);

        // 收集原始数据
        let raw_data = self.data_collector.lock().collect_data(time_range)?;

        // 生成报告数据
        let report_data = ReportData {
            metadata: ReportMetadata {
                id: report_id,
                title: format!("{:?} Report", report_type),
                report_type,
                generated_at: crate::time::get_timestamp_nanos(),
                time_range,
                generator: "NOS Security Audit".to_string(),
                version: "1.0.0".to_string(),
                tags: vec!["security".to_string(), "audit".to_string()],
            },
            content: self.generate_content_from_data(&raw_data, report_type)?,
            statistics: self.generate_statistics_from_data(&raw_data)?,
        };

        Ok(report_data)
    }

    /// 获取报告类型的时间范围
    fn get_time_range_for_report_type(&self, report_type: ReportType) -> (u64, u64) {
        let now = crate::time::get_timestamp();
        let start_time = match report_type {
            ReportType::RealTime => now - 3600,      // 1 hour
            ReportType::Daily => now - 86400,       // 1 day
            ReportType::Weekly => now - 604800,     // 1 week
            ReportType::Monthly => now - 2592000,   // 30 days
            ReportType::Quarterly => now - 7776000, // 90 days
            ReportType::Annual => now - 31536000,   // 365 days
            _ => now - 86400, // Default to 1 day
        };

        (start_time * 1000000000, now * 1000000000) // Convert to nanoseconds
    }

    /// 从数据生成内容
    fn generate_content_from_data(&self, data: &CollectedData, report_type: ReportType) -> Result<ReportContent, &'static str> {
        let content = ReportContent {
            executive_summary: format!("Executive summary for {:?} report", report_type),
            key_findings: self.generate_findings_from_data(data)?,
            detailed_analysis: self.generate_analysis_sections(data)?,
            recommendations: self.generate_recommendations_from_data(data)?,
            appendices: vec![],
        };

        Ok(content)
    }

    /// 生成发现
    fn generate_findings_from_data(&self, data: &CollectedData) -> Result<Vec<Finding>, &'static str> {
        let mut findings = Vec::new();

        // 简化的发现生成
        findings.push(Finding {
            id: 1,
            title: "High Number of Security Violations".to_string(),
            description: "Detected increased security violation activity".to_string(),
            severity: FindingSeverity::High,
            impact: "Potential security breach risk".to_string(),
            evidence: vec![],
            remediation: "Review security logs and investigate source of violations".to_string(),
        });

        Ok(findings)
    }

    /// 生成分析部分
    fn generate_analysis_sections(&self, data: &CollectedData) -> Result<Vec<AnalysisSection>, &'static str> {
        let mut sections = Vec::new();

        // 事件类型分析
        sections.push(AnalysisSection {
            id: 1,
            title: "Event Type Analysis".to_string(),
            content: "Analysis of events by type".to_string(),
            charts: vec![],
            tables: vec![],
        });

        // 严重级别分析
        sections.push(AnalysisSection {
            id: 2,
            title: "Severity Analysis".to_string(),
            content: "Analysis of events by severity level".to_string(),
            charts: vec![],
            tables: vec![],
        });

        Ok(sections)
    }

    /// 生成建议
    fn generate_recommendations_from_data(&self, data: &CollectedData) -> Result<Vec<Recommendation>, &'static str> {
        let mut recommendations = Vec::new();

        recommendations.push(Recommendation {
            id: 1,
            title: "Enhance Security Monitoring".to_string(),
            description: "Implement additional security monitoring controls".to_string(),
            priority: RecommendationPriority::High,
            expected_outcome: "Improved detection of security incidents".to_string(),
            implementation_steps: vec![
                "Review current monitoring setup".to_string(),
                "Identify gaps in coverage".to_string(),
                "Implement additional sensors".to_string(),
            ],
            assignee: Some("Security Team".to_string()),
            due_date: Some(crate::time::get_timestamp() + 604800), // 1 week
        });

        Ok(recommendations)
    }

    /// 生成统计信息
    fn generate_statistics_from_data(&self, data: &CollectedData) -> Result<ReportStatistics, &'static str> {
        let stats = ReportStatistics {
            total_events: 1000, // Simplified
            events_by_type: BTreeMap::new(),
            events_by_severity: BTreeMap::new(),
            key_metrics: BTreeMap::new(),
            trend_data: vec![],
        };

        Ok(stats)
    }

    /// 生成格式化报告
    fn generate_formatted_report(&mut self, data: &ReportData, format: ReportFormat) -> Result<String, &'static str> {
        match self.formatters.get_mut(&format) {
            Some(formatter) => {
                let formatted_bytes = formatter.format_report(data)?;
                Ok(String::from_utf8_lossy(&formatted_bytes).to_string())
            }
            None => Err("Formatter not found"),
        }
    }

    /// 获取统计信息
    pub fn get_stats(&self) -> ReportGeneratorStats {
        self.stats.lock().clone()
    }

    /// 重置统计信息
    pub fn reset_stats(&self) {
        *self.stats.lock() = ReportGeneratorStats::default();
    }
}

impl TemplateEngine {
    /// 创建新的模板引擎
    pub fn new() -> Self {
        Self {
            templates: BTreeMap::new(),
            variables: BTreeMap::new(),
        }
    }

    /// 加载默认模板
    pub fn load_default_templates(&mut self) -> Result<(), &'static str> {
        // HTML模板
        self.templates.insert("html_report".to_string(), ReportTemplate {
            id: 1,
            name: "HTML Report Template".to_string(),
            content: include_str!("templates/html_report.html").to_string(),
            template_type: TemplateType::Html,
            parameters: vec![],
        });

        // 文本模板
        self.templates.insert("text_report".to_string(), ReportTemplate {
            id: 2,
            name: "Text Report Template".to_string(),
            content: "Security Audit Report\n====================\n\n{{content}}".to_string(),
            template_type: TemplateType::Text,
            parameters: vec![],
        });

        Ok(())
    }
}

impl DataCollector {
    /// 创建新的数据收集器
    pub fn new() -> Self {
        Self {
            data_sources: Vec::new(),
            cache: BTreeMap::new(),
            stats: DataCollectionStats::default(),
        }
    }

    /// 初始化数据源
    pub fn init_data_sources(&mut self) -> Result<(), &'static str> {
        // 审计数据库数据源
        self.data_sources.push(DataSource {
            id: 1,
            name: "Audit Database".to_string(),
            source_type: DataSourceType::AuditDatabase,
            connection_string: "audit.db".to_string(),
            query_template: "SELECT * FROM audit_events WHERE timestamp BETWEEN ? AND ?".to_string(),
        });

        // 系统指标数据源
        self.data_sources.push(DataSource {
            id: 2,
            name: "System Metrics".to_string(),
            source_type: DataSourceType::SystemMetrics,
            connection_string: "/proc".to_string(),
            query_template: "collect_system_metrics".to_string(),
        });

        Ok(())
    }

    /// 收集数据
    pub fn collect_data(&mut self, time_range: (u64, u64)) -> Result<CollectedData, &'static str> {
        let start_time = crate::time::get_timestamp_nanos();
        let mut content = BTreeMap::new();

        // 从各个数据源收集数据
        let source_count = self.data_sources.len();
        for i in 0..source_count {
            // clone the data source so we don't hold an immutable borrow into self
            // while calling a method that requires &mut self
            let source = self.data_sources[i].clone();
            let source_data = self.collect_from_source(&source, time_range)?;

            // 合并到主数据中
            for (key, value) in source_data.content {
                content.insert(key, value);
            }
        }

        let collected_data = CollectedData {
            id: self.cache.len() as u64 + 1,
            name: format!("Report Data for {} to {}", time_range.0, time_range.1),
            content,
            collected_at: crate::time::get_timestamp_nanos(),
            expires_at: crate::time::get_timestamp_nanos() + 3600000000000, // 1 hour
        };

        // 更新统计
        {
            self.stats.total_collections += 1;
            self.stats.successful_collections += 1;

            let elapsed = crate::time::get_timestamp_nanos() - start_time;
            self.stats.avg_collection_time_us = (self.stats.avg_collection_time_us + elapsed / 1000) / 2;
        }

        Ok(collected_data)
    }

    /// 从单个数据源收集数据
    fn collect_from_source(&mut self, source: &DataSource, time_range: (u64, u64)) -> Result<CollectedData, &'static str> {
        // 简化的数据收集逻辑
        let mut content = BTreeMap::new();

        match source.source_type {
            DataSourceType::AuditDatabase => {
                // 模拟审计数据库数据
                content.insert("total_events".to_string(), VariableValue::Number(1000.0));
                content.insert("security_violations".to_string(), VariableValue::Number(25.0));
                content.insert("auth_failures".to_string(), VariableValue::Number(15.0));
            }
            DataSourceType::SystemMetrics => {
                // 模拟系统指标数据
                content.insert("cpu_usage".to_string(), VariableValue::Number(45.2));
                content.insert("memory_usage".to_string(), VariableValue::Number(67.8));
                content.insert("disk_usage".to_string(), VariableValue::Number(32.1));
            }
            _ => {}
        }

        Ok(CollectedData {
            id: 0,
            name: source.name.clone(),
            content,
            collected_at: crate::time::get_timestamp_nanos(),
            expires_at: crate::time::get_timestamp_nanos() + 1800000000000, // 30 minutes
        })
    }
}

// 格式化器实现

/// HTML格式化器
pub struct HtmlFormatter {
    info: FormatterInfo,
}

impl HtmlFormatter {
    pub fn new() -> Self {
        Self {
            info: FormatterInfo {
                name: "HTML Report Formatter".to_string(),
                supported_format: ReportFormat::HTML,
                version: "1.0.0".to_string(),
                description: "Generates HTML security audit reports".to_string(),
            },
        }
    }
}

impl ReportFormatter for HtmlFormatter {
    fn format_report(&mut self, data: &ReportData) -> Result<Vec<u8>, &'static str> {
        let html = format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>{}</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; }}
        .header {{ border-bottom: 2px solid #333; padding-bottom: 10px; }}
        .summary {{ background: #f5f5f5; padding: 15px; margin: 20px 0; }}
        .finding {{ margin: 15px 0; padding: 10px; border-left: 4px solid #ccc; }}
        .critical {{ border-left-color: #d32f2f; }}
        .high {{ border-left-color: #f57c00; }}
        .medium {{ border-left-color: #fbc02d; }}
        .low {{ border-left-color: #388e3c; }}
    </style>
</head>
<body>
    <div class="header">
        <h1>{}</h1>
        <p>Generated: {}</p>
        <p>Time Range: {} - {}</p>
    </div>

    <div class="summary">
        <h2>Executive Summary</h2>
        <p>{}</p>
    </div>

    <div>
        <h2>Key Findings</h2>
        {}
    </div>

    <div>
        <h2>Recommendations</h2>
        {}
    </div>
</body>
</html>"#,
            data.metadata.title,
            data.metadata.title,
            crate::time::format_timestamp(data.metadata.generated_at),
            crate::time::format_timestamp(data.metadata.time_range.0),
            crate::time::format_timestamp(data.metadata.time_range.1),
            data.content.executive_summary,
            self.format_findings(&data.content.key_findings),
            self.format_recommendations(&data.content.recommendations)
        );

        Ok(html.into_bytes())
    }

    fn get_info(&self) -> FormatterInfo {
        self.info.clone()
    }
}

impl HtmlFormatter {
    fn format_findings(&self, findings: &[Finding]) -> String {
        findings.iter()
            .map(|f| {
                let class = match f.severity {
                    FindingSeverity::Critical => "critical",
                    FindingSeverity::High => "high",
                    FindingSeverity::Medium => "medium",
                    FindingSeverity::Low => "low",
                    FindingSeverity::Info => "low",
                };

                format!(
                    r#"<div class="finding {}">
                        <h3>{}</h3>
                        <p><strong>Severity:</strong> {:?}</p>
                        <p><strong>Description:</strong> {}</p>
                        <p><strong>Impact:</strong> {}</p>
                        <p><strong>Remediation:</strong> {}</p>
                    </div>"#,
                    class, f.title, f.severity, f.description, f.impact, f.remediation
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_recommendations(&self, recommendations: &[Recommendation]) -> String {
        recommendations.iter()
            .map(|r| {
                format!(
                    r#"<div class="finding">
                        <h3>{}</h3>
                        <p><strong>Priority:</strong> {:?}</p>
                        <p><strong>Description:</strong> {}</p>
                        <p><strong>Expected Outcome:</strong> {}</p>
                    </div>"#,
                    r.title, r.priority, r.description, r.expected_outcome
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// PDF格式化器（简化实现）
pub struct PdfFormatter {
    info: FormatterInfo,
}

impl PdfFormatter {
    pub fn new() -> Self {
        Self {
            info: FormatterInfo {
                name: "PDF Report Formatter".to_string(),
                supported_format: ReportFormat::PDF,
                version: "1.0.0".to_string(),
                description: "Generates PDF security audit reports".to_string(),
            },
        }
    }
}

impl ReportFormatter for PdfFormatter {
    fn format_report(&mut self, _data: &ReportData) -> Result<Vec<u8>, &'static str> {
        // 简化的PDF生成
        let pdf_content = "%PDF-1.4\n1 0 obj\n<<\n/Type /Catalog\n/Pages 2 0 R\n>>\nendobj\n...\n%%EOF";
        Ok(pdf_content.as_bytes().to_vec())
    }

    fn get_info(&self) -> FormatterInfo {
        self.info.clone()
    }
}

/// JSON格式化器
pub struct JsonFormatter {
    info: FormatterInfo,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self {
            info: FormatterInfo {
                name: "JSON Report Formatter".to_string(),
                supported_format: ReportFormat::JSON,
                version: "1.0.0".to_string(),
                description: "Generates JSON security audit reports".to_string(),
            },
        }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_report(&mut self, data: &ReportData) -> Result<Vec<u8>, &'static str> {
        let json = format!(
            r#"{{
  "metadata": {{
    "id": {},
    "title": "{}",
    "report_type": "{:?}",
    "generated_at": {},
    "time_range": [{}, {}]
  }},
  "content": {{
    "executive_summary": "{}",
    "key_findings_count": {},
    "recommendations_count": {}
  }}
}}"#,
            data.metadata.id,
            data.metadata.title,
            data.metadata.report_type,
            data.metadata.generated_at,
            data.metadata.time_range.0,
            data.metadata.time_range.1,
            data.content.executive_summary,
            data.content.key_findings.len(),
            data.content.recommendations.len()
        );

        Ok(json.into_bytes())
    }

    fn get_info(&self) -> FormatterInfo {
        self.info.clone()
    }
}

/// CSV格式化器
pub struct CsvFormatter {
    info: FormatterInfo,
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self {
            info: FormatterInfo {
                name: "CSV Report Formatter".to_string(),
                supported_format: ReportFormat::CSV,
                version: "1.0.0".to_string(),
                description: "Generates CSV security audit reports".to_string(),
            },
        }
    }
}

impl ReportFormatter for CsvFormatter {
    fn format_report(&mut self, data: &ReportData) -> Result<Vec<u8>, &'static str> {
        let mut csv = String::new();
        csv.push_str("ID,Title,Severity,Description\n");

        for finding in &data.content.key_findings {
            csv.push_str(&format!(
                "{},{},{:?},{}\n",
                finding.id,
                finding.title,
                finding.severity,
                finding.description.replace(",", ";").replace("\n", " ")
            ));
        }

        Ok(csv.into_bytes())
    }

    fn get_info(&self) -> FormatterInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_generator_creation() {
        let generator = ReportGenerator::new();
        assert_eq!(generator.id, 1);
        assert!(generator.formatters.contains_key(&ReportFormat::HTML));
        assert!(generator.formatters.contains_key(&ReportFormat::PDF));
        assert!(generator.formatters.contains_key(&ReportFormat::JSON));
        assert!(generator.formatters.contains_key(&ReportFormat::CSV));
    }

    #[test]
    fn test_report_generator_stats() {
        let generator = ReportGenerator::new();
        let stats = generator.get_stats();
        assert_eq!(stats.total_reports_generated, 0);
        assert_eq!(stats.successful_generations, 0);
    }

    #[test]
    fn test_finding_severity_ordering() {
        assert!(FindingSeverity::Info < FindingSeverity::Low);
        assert!(FindingSeverity::Low < FindingSeverity::Medium);
        assert!(FindingSeverity::Medium < FindingSeverity::High);
        assert!(FindingSeverity::High < FindingSeverity::Critical);
    }

    #[test]
    fn test_recommendation_priority_ordering() {
        assert!(RecommendationPriority::Low < RecommendationPriority::Medium);
        assert!(RecommendationPriority::Medium < RecommendationPriority::High);
        assert!(RecommendationPriority::High < RecommendationPriority::Urgent);
    }

    #[test]
    fn test_html_formatter() {
        let mut formatter = HtmlFormatter::new();
        let data = ReportData {
            metadata: ReportMetadata {
                id: 1,
                title: "Test Report".to_string(),
                report_type: ReportType::Daily,
                generated_at: 1234567890,
                time_range: (0, 86400),
                generator: "Test".to_string(),
                version: "1.0".to_string(),
                tags: vec![],
            },
            content: ReportContent {
                executive_summary: "Test summary".to_string(),
                key_findings: vec![],
                detailed_analysis: vec![],
                recommendations: vec![],
                appendices: vec![],
            },
            statistics: ReportStatistics {
                total_events: 0,
                events_by_type: BTreeMap::new(),
                events_by_severity: BTreeMap::new(),
                key_metrics: BTreeMap::new(),
                trend_data: vec![],
            },
        };

        let result = formatter.format_report(&data);
        assert!(result.is_ok());
        let binding = result.unwrap();
        let html = String::from_utf8_lossy(&binding);
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("Test Report"));
    }
}
