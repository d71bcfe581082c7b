// Error Tracing Module

extern crate alloc;
//
// 错误追踪模块
// 提供错误传播追踪、调用链分析和依赖关系分析功能

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::string::ToString;
use alloc::{format, vec};
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;

use super::*;
use super::error_reporting::FilterAction;

/// 错误追踪器
pub struct ErrorTracer {
    /// 追踪器ID
    pub id: u64,
    /// 活动追踪会话
    active_sessions: BTreeMap<u64, TraceSession>,
    /// 追踪记录
    trace_records: Vec<TraceRecord>,
    /// 调用链缓存
    call_chains: BTreeMap<String, CallChain>,
    /// 依赖图
    dependency_graph: DependencyGraph,
    /// 统计信息
    stats: TracingStats,
    /// 配置
    config: TracingConfig,
    /// 会话计数器
    session_counter: AtomicU64,
    /// 记录计数器
    record_counter: AtomicU64,
}

/// 追踪会话
#[derive(Debug, Clone)]
pub struct TraceSession {
    /// 会话ID
    pub id: u64,
    /// 会话名称
    pub name: String,
    /// 会话类型
    pub session_type: SessionType,
    /// 开始时间
    pub start_time: u64,
    /// 结束时间
    pub end_time: Option<u64>,
    /// 会话状态
    pub status: SessionStatus,
    /// 追踪深度
    pub max_depth: u32,
    /// 当前深度
    pub current_depth: u32,
    /// 会话配置
    pub config: SessionConfig,
    /// 追踪的错误
    pub traced_errors: Vec<u64>,
    /// 性能指标
    pub performance_metrics: PerformanceMetrics,
}

/// 会话类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionType {
    /// 实时追踪
    RealTime,
    /// 回溯分析
    Retrospective,
    /// 周期性追踪
    Periodic,
    /// 按需追踪
    OnDemand,
    /// 系统启动追踪
    SystemBoot,
    /// 关键操作追踪
    CriticalOperation,
}

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// 活动中
    Active,
    /// 已暂停
    Paused,
    /// 已完成
    Completed,
    /// 已取消
    Cancelled,
    /// 出错
    Error,
}

/// 会话配置
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// 启用性能追踪
    pub enable_performance_tracing: bool,
    /// 启用内存追踪
    pub enable_memory_tracing: bool,
    /// 启用调用图生成
    pub enable_call_graph: bool,
    /// 启用依赖分析
    pub enable_dependency_analysis: bool,
    /// 最大追踪时间（毫秒）
    pub max_duration_ms: u64,
    /// 采样间隔（毫秒）
    pub sampling_interval_ms: u64,
    /// 过滤器
    pub filters: Vec<TraceFilter>,
}

/// 追踪过滤器
#[derive(Debug, Clone)]
pub struct TraceFilter {
    /// 过滤器ID
    pub id: u64,
    /// 过滤器名称
    pub name: String,
    /// 过滤条件
    pub condition: TraceFilterCondition,
    /// 过滤动作
    pub action: FilterAction,
}

/// 追踪过滤条件
#[derive(Debug, Clone)]
pub enum TraceFilterCondition {
    /// 模块过滤
    ModuleFilter(String),
    /// 函数过滤
    FunctionFilter(String),
    /// 错误类型过滤
    ErrorTypeFilter(ErrorType),
    /// 错误严重级别过滤
    SeverityFilter(ErrorSeverity),
    /// 时间窗口过滤
    TimeWindowFilter(u64, u64),
    /// 调用深度过滤
    DepthFilter(u32),
    /// 自定义过滤
    CustomFilter(String),
}

/// 性能指标
#[derive(Debug, Clone, Default)]
pub struct PerformanceMetrics {
    /// 总函数调用次数
    pub total_function_calls: u64,
    /// 总执行时间（微秒）
    pub total_execution_time_us: u64,
    /// 最大执行时间（微秒）
    pub max_execution_time_us: u64,
    /// 最小执行时间（微秒）
    pub min_execution_time_us: u64,
    /// 平均执行时间（微秒）
    pub avg_execution_time_us: f64,
    /// 内存使用峰值（字节）
    pub peak_memory_usage: u64,
    /// 内存分配次数
    pub memory_allocations: u64,
    /// 内存释放次数
    pub memory_deallocations: u64,
    /// 上下文切换次数
    pub context_switches: u64,
    /// 系统调用次数
    pub system_calls: u64,
}

/// 追踪记录
#[derive(Debug, Clone)]
pub struct TraceRecord {
    /// 记录ID
    pub id: u64,
    /// 会话ID
    pub session_id: u64,
    /// 记录类型
    pub record_type: TraceRecordType,
    /// 时间戳
    pub timestamp: u64,
    /// 深度
    pub depth: u32,
    /// 调用链信息
    pub call_chain_info: CallChainInfo,
    /// 错误信息
    pub error_info: Option<ErrorTraceInfo>,
    /// 性能数据
    pub performance_data: Option<PerformanceData>,
    /// 内存数据
    pub memory_data: Option<MemoryData>,
    /// 系统状态
    pub system_state: Option<SystemStateSnapshot>,
}

/// 记录类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceRecordType {
    /// 函数入口
    FunctionEntry,
    /// 函数出口
    FunctionExit,
    /// 错误发生
    ErrorOccurrence,
    /// 错误传播
    ErrorPropagation,
    /// 系统调用
    SystemCall,
    /// 内存分配
    MemoryAllocation,
    /// 内存释放
    MemoryDeallocation,
    /// 上下文切换
    ContextSwitch,
    /// 性能采样
    PerformanceSample,
}

/// 调用链信息
#[derive(Debug, Clone)]
pub struct CallChainInfo {
    /// 调用链ID
    pub chain_id: String,
    /// 当前函数
    pub current_function: FunctionInfo,
    /// 调用者函数
    pub caller_function: Option<FunctionInfo>,
    /// 调用参数
    pub parameters: Vec<ParameterInfo>,
    /// 返回值
    pub return_value: Option<ReturnValueInfo>,
    /// 调用类型
    pub call_type: CallType,
}

/// 函数信息
#[derive(Debug, Clone)]
pub struct FunctionInfo {
    /// 函数名
    pub name: String,
    /// 模块名
    pub module: String,
    /// 文件名
    pub file: String,
    /// 行号
    pub line: u32,
    /// 函数地址
    pub address: u64,
    /// 函数签名
    pub signature: String,
    /// 函数类型
    pub function_type: FunctionType,
}

/// 函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionType {
    /// 系统调用
    SystemCall,
    /// 内核函数
    KernelFunction,
    /// 用户函数
    UserFunction,
    /// 库函数
    LibraryFunction,
    /// 中断处理
    InterruptHandler,
    /// 异常处理
    ExceptionHandler,
}

/// 调用类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallType {
    /// 直接调用
    Direct,
    /// 间接调用
    Indirect,
    /// 递归调用
    Recursive,
    /// 回调调用
    Callback,
    /// 系统调用
    SystemCall,
    /// 中断调用
    Interrupt,
}

/// 参数信息
#[derive(Debug, Clone)]
pub struct ParameterInfo {
    /// 参数名
    pub name: String,
    /// 参数类型
    pub param_type: String,
    /// 参数值
    pub value: String,
    /// 参数大小（字节）
    pub size: u32,
    /// 是否为指针
    pub is_pointer: bool,
}

/// 返回值信息
#[derive(Debug, Clone)]
pub struct ReturnValueInfo {
    /// 返回值类型
    pub return_type: String,
    /// 返回值
    pub value: String,
    /// 返回值大小（字节）
    pub size: u32,
    /// 是否为指针
    pub is_pointer: bool,
}

/// 错误追踪信息
#[derive(Debug, Clone)]
pub struct ErrorTraceInfo {
    /// 错误ID
    pub error_id: u64,
    /// 错误代码
    pub error_code: u32,
    /// 错误类型
    pub error_type: ErrorType,
    /// 错误严重级别
    pub severity: ErrorSeverity,
    /// 错误消息
    pub message: String,
    /// 错误源
    pub source_location: FunctionInfo,
    /// 传播路径
    pub propagation_path: Vec<FunctionInfo>,
    /// 错误上下文
    pub error_context: ErrorContext,
    /// 相关错误
    pub related_errors: Vec<u64>,
}

/// 性能数据
#[derive(Debug, Clone)]
pub struct PerformanceData {
    /// CPU使用率
    pub cpu_usage: f64,
    /// 内存使用
    pub memory_usage: u64,
    /// 执行时间（微秒）
    pub execution_time_us: u64,
    /// 系统调用时间（微秒）
    pub system_call_time_us: u64,
    /// 等待时间（微秒）
    pub wait_time_us: u64,
    /// 缓存命中率
    pub cache_hit_rate: f64,
    /// 上下文切换时间（微秒）
    pub context_switch_time_us: u64,
}

/// 内存数据
#[derive(Debug, Clone)]
pub struct MemoryData {
    /// 分配大小（字节）
    pub allocation_size: u64,
    /// 分配地址
    pub allocation_address: u64,
    /// 内存类型
    pub memory_type: MemoryType,
    /// 分配器类型
    pub allocator_type: AllocatorType,
    /// 内存标签
    pub memory_tag: Option<String>,
    /// 对齐大小
    pub alignment: u32,
    /// 是否为对齐分配
    pub is_aligned: bool,
}

/// 内存类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryType {
    /// 堆内存
    Heap,
    /// 栈内存
    Stack,
    /// 静态内存
    Static,
    /// 共享内存
    Shared,
    /// 映射内存
    Mapped,
    /// 设备内存
    Device,
}

/// 分配器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocatorType {
    /// 伙伴系统分配器
    Buddy,
    /// Slab分配器
    Slab,
    /// 自定义分配器
    Custom,
    /// 直接内存分配
    Direct,
}

/// 调用链
#[derive(Debug, Clone)]
pub struct CallChain {
    /// 链ID
    pub id: String,
    /// 链名称
    pub name: String,
    /// 调用序列
    pub call_sequence: Vec<CallFrame>,
    /// 总深度
    pub total_depth: u32,
    /// 总执行时间（微秒）
    pub total_execution_time_us: u64,
    /// 内存使用峰值
    pub peak_memory_usage: u64,
    /// 调用频率
    pub call_frequency: u32,
    /// 最后调用时间
    pub last_called: u64,
}

/// 调用帧
#[derive(Debug, Clone)]
pub struct CallFrame {
    /// 帧ID
    pub id: u64,
    /// 函数信息
    pub function: FunctionInfo,
    /// 入口时间
    pub entry_time: u64,
    /// 出口时间
    pub exit_time: Option<u64>,
    /// 执行时间（微秒）
    pub execution_time_us: u64,
    /// 子调用数
    pub child_calls: u32,
    /// 内存使用
    pub memory_usage: u64,
    /// 调用参数
    pub parameters: Vec<ParameterInfo>,
    /// 返回值
    pub return_value: Option<ReturnValueInfo>,
}

/// 依赖图
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// 节点（函数/模块）
    pub nodes: BTreeMap<String, DependencyNode>,
    /// 边（依赖关系）
    pub edges: BTreeMap<String, Vec<DependencyEdge>>,
    /// 图统计
    pub stats: GraphStats,
}

/// 依赖节点
#[derive(Debug, Clone)]
pub struct DependencyNode {
    /// 节点ID
    pub id: String,
    /// 节点名称
    pub name: String,
    /// 节点类型
    pub node_type: NodeType,
    /// 依赖计数
    pub dependency_count: u32,
    /// 被依赖计数
    pub reverse_dependency_count: u32,
    /// 节点权重
    pub weight: f64,
    /// 关键性评分
    pub criticality_score: f64,
}

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// 函数节点
    Function,
    /// 模块节点
    Module,
    /// 系统调用节点
    SystemCall,
    /// 库节点
    Library,
    /// 服务节点
    Service,
    /// 资源节点
    Resource,
}

/// 依赖边
#[derive(Debug, Clone)]
pub struct DependencyEdge {
    /// 边ID
    pub id: String,
    /// 源节点
    pub from_node: String,
    /// 目标节点
    pub to_node: String,
    /// 依赖类型
    pub dependency_type: DependencyType,
    /// 依赖强度
    pub strength: f64,
    /// 调用频率
    pub call_frequency: u32,
    /// 平均响应时间（微秒）
    pub avg_response_time_us: u64,
    /// 错误传播概率
    pub error_propagation_probability: f64,
}

/// 依赖类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyType {
    /// 直接调用
    DirectCall,
    /// 间接调用
    IndirectCall,
    /// 数据依赖
    DataDependency,
    /// 控制依赖
    ControlDependency,
    /// 资源依赖
    ResourceDependency,
    /// 事件依赖
    EventDependency,
}

/// 图统计
#[derive(Debug, Clone, Default)]
pub struct GraphStats {
    /// 节点总数
    pub total_nodes: u64,
    /// 边总数
    pub total_edges: u64,
    /// 平均度数
    pub average_degree: f64,
    /// 最大度数
    pub max_degree: u32,
    /// 强连通分量数
    pub strong_components: u32,
    /// 弱连通分量数
    pub weak_components: u32,
}

/// 追踪统计
#[derive(Debug, Clone, Default)]
pub struct TracingStats {
    /// 总会话数
    pub total_sessions: u64,
    /// 活动会话数
    pub active_sessions: u64,
    /// 总记录数
    pub total_records: u64,
    /// 按类型统计
    pub records_by_type: BTreeMap<TraceRecordType, u64>,
    /// 平均会话时长（毫秒）
    pub avg_session_duration_ms: u64,
    /// 最大调用深度
    pub max_call_depth: u32,
    /// 平均调用深度
    pub avg_call_depth: f64,
    /// 错误追踪次数
    pub error_traces: u64,
}

/// 追踪配置
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// 启用自动追踪
    pub enable_auto_tracing: bool,
    /// 最大并发会话数
    pub max_concurrent_sessions: u32,
    /// 默认会话配置
    pub default_session_config: SessionConfig,
    /// 最大记录数量
    pub max_record_count: usize,
    /// 启用性能优化
    pub enable_performance_optimization: bool,
    /// 记录压缩
    pub enable_compression: bool,
    /// 实时分析
    pub enable_realtime_analysis: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enable_auto_tracing: true,
            max_concurrent_sessions: 10,
            default_session_config: SessionConfig {
                enable_performance_tracing: true,
                enable_memory_tracing: false,
                enable_call_graph: true,
                enable_dependency_analysis: true,
                max_duration_ms: 60000, // 1分钟
                sampling_interval_ms: 100,
                filters: Vec::new(),
            },
            max_record_count: 100000,
            enable_performance_optimization: true,
            enable_compression: false,
            enable_realtime_analysis: false,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        TracingConfig::default().default_session_config
    }
}

impl ErrorTracer {
    /// 创建新的错误追踪器
    pub fn new() -> Self {
        Self {
            id: 1,
            active_sessions: BTreeMap::new(),
            trace_records: Vec::new(),
            call_chains: BTreeMap::new(),
            dependency_graph: DependencyGraph {
                nodes: BTreeMap::new(),
                edges: BTreeMap::new(),
                stats: GraphStats::default(),
            },
            stats: TracingStats::default(),
            config: TracingConfig::default(),
            session_counter: AtomicU64::new(1),
            record_counter: AtomicU64::new(1),
        }
    }

    /// 初始化错误追踪器
    pub fn init(&mut self) -> Result<(), &'static str> {
        crate::println!("[ErrorTracer] Error tracer initialized successfully");
        Ok(())
    }

    /// 开始追踪会话
    pub fn start_session(&mut self, name: &str, session_type: SessionType, config: Option<SessionConfig>) -> Result<u64, &'static str> {
        // 检查并发会话限制
        if self.active_sessions.len() >= self.config.max_concurrent_sessions as usize {
            return Err("Maximum concurrent sessions reached");
        }

        let session_id = self.session_counter.fetch_add(1, Ordering::SeqCst);
        let session_config = config.unwrap_or_else(|| self.config.default_session_config.clone());

        let session = TraceSession {
            id: session_id,
            name: name.to_string(),
            session_type,
            start_time: crate::time::get_timestamp(),
            end_time: None,
            status: SessionStatus::Active,
            max_depth: 100, // 默认最大深度
            current_depth: 0,
            config: session_config,
            traced_errors: Vec::new(),
            performance_metrics: PerformanceMetrics::default(),
        };

        self.active_sessions.insert(session_id, session);
        self.stats.total_sessions += 1;
        self.stats.active_sessions += 1;

        crate::println!("[ErrorTracer] Started tracing session {} ({})", session_id, name);
        Ok(session_id)
    }

    /// 停止追踪会话
    pub fn stop_session(&mut self, session_id: u64) -> Result<(), &'static str> {
        let mut session = self.active_sessions.remove(&session_id)
            .ok_or("Session not found")?;

        session.end_time = Some(crate::time::get_timestamp());
        session.status = SessionStatus::Completed;

        // 重新插入到历史记录（实际实现中可能需要单独的历史记录存储）
        self.stats.active_sessions -= 1;

        // 更新平均会话时长
        let duration = session.end_time.unwrap() - session.start_time;
        let total_duration = self.stats.avg_session_duration_ms * (self.stats.total_sessions - 1) + duration;
        self.stats.avg_session_duration_ms = total_duration / self.stats.total_sessions;

        crate::println!("[ErrorTracer] Stopped tracing session {} (duration: {}ms)", session_id, duration);
        Ok(())
    }

    /// 追踪函数入口
    pub fn trace_function_entry(&mut self, session_id: u64, function_info: FunctionInfo, parameters: Vec<ParameterInfo>) -> Result<(), &'static str> {
        let session = self.active_sessions.get_mut(&session_id)
            .ok_or("Session not found")?;

        if session.status != SessionStatus::Active {
            return Err("Session is not active");
        }

        if session.current_depth >= session.max_depth {
            return Err("Maximum depth reached");
        }

        session.current_depth += 1;

        let record_id = self.record_counter.fetch_add(1, Ordering::SeqCst);
        let timestamp = crate::time::get_timestamp();

        let call_chain_info = CallChainInfo {
            chain_id: format!("{}-{}", session_id, session.current_depth),
            current_function: function_info.clone(),
            caller_function: None, // 需要从调用栈获取
            parameters,
            return_value: None,
            call_type: CallType::Direct,
        };

        let record = TraceRecord {
            id: record_id,
            session_id,
            record_type: TraceRecordType::FunctionEntry,
            timestamp,
            depth: session.current_depth,
            call_chain_info,
            error_info: None,
            performance_data: None,
            memory_data: None,
            system_state: None,
        };

        // 更新调用深度统计
        if session.current_depth > self.stats.max_call_depth {
            self.stats.max_call_depth = session.current_depth;
        }

        session.performance_metrics.total_function_calls += 1;
        drop(session); // Release the session borrow

        self.add_trace_record(record);

        Ok(())
    }

    /// 追踪函数出口
    pub fn trace_function_exit(&mut self, session_id: u64, function_info: FunctionInfo, return_value: Option<ReturnValueInfo>, execution_time_us: u64) -> Result<(), &'static str> {
        let session = self.active_sessions.get_mut(&session_id)
            .ok_or("Session not found")?;

        if session.status != SessionStatus::Active {
            return Err("Session is not active");
        }

        session.current_depth = session.current_depth.saturating_sub(1);

        let record_id = self.record_counter.fetch_add(1, Ordering::SeqCst);
        let timestamp = crate::time::get_timestamp();

        let call_chain_info = CallChainInfo {
            chain_id: format!("{}-{}", session_id, session.current_depth),
            current_function: function_info.clone(),
            caller_function: None,
            parameters: Vec::new(),
            return_value,
            call_type: CallType::Direct,
        };

        let performance_data = PerformanceData {
            cpu_usage: 0.0,
            memory_usage: 0,
            execution_time_us,
            system_call_time_us: 0,
            wait_time_us: 0,
            cache_hit_rate: 0.0,
            context_switch_time_us: 0,
        };

        let record = TraceRecord {
            id: record_id,
            session_id,
            record_type: TraceRecordType::FunctionExit,
            timestamp,
            depth: session.current_depth + 1,
            call_chain_info,
            error_info: None,
            performance_data: Some(performance_data),
            memory_data: None,
            system_state: None,
        };

        // 更新性能指标
        session.performance_metrics.total_execution_time_us += execution_time_us;
        if execution_time_us > session.performance_metrics.max_execution_time_us {
            session.performance_metrics.max_execution_time_us = execution_time_us;
        }
        if session.performance_metrics.min_execution_time_us == 0 || execution_time_us < session.performance_metrics.min_execution_time_us {
            session.performance_metrics.min_execution_time_us = execution_time_us;
        }
        drop(session); // Release the session borrow

        self.add_trace_record(record);

        Ok(())
    }

    /// 追踪错误发生
    pub fn trace_error(&mut self, session_id: u64, error_record: &ErrorRecord) -> Result<(), &'static str> {
        let session = self.active_sessions.get_mut(&session_id)
            .ok_or("Session not found")?;

        if session.status != SessionStatus::Active {
            return Err("Session is not active");
        }

        let record_id = self.record_counter.fetch_add(1, Ordering::SeqCst);
        let timestamp = crate::time::get_timestamp();

        let error_trace_info = ErrorTraceInfo {
            error_id: error_record.id,
            error_code: error_record.code,
            error_type: error_record.error_type,
            severity: error_record.severity,
            message: error_record.message.clone(),
            source_location: FunctionInfo {
                name: error_record.source.function.clone(),
                module: error_record.source.module.clone(),
                file: error_record.source.file.clone(),
                line: error_record.source.line,
                address: 0,
                signature: String::new(),
                function_type: FunctionType::KernelFunction,
            },
            propagation_path: Vec::new(),
            error_context: error_record.context.clone(),
            related_errors: Vec::new(),
        };

        let call_chain_info = CallChainInfo {
            chain_id: format!("error-{}", error_record.id),
            current_function: error_trace_info.source_location.clone(),
            caller_function: None,
            parameters: Vec::new(),
            return_value: None,
            call_type: CallType::Direct,
        };

        let record = TraceRecord {
            id: record_id,
            session_id,
            record_type: TraceRecordType::ErrorOccurrence,
            timestamp,
            depth: session.current_depth,
            call_chain_info,
            error_info: Some(error_trace_info),
            performance_data: None,
            memory_data: None,
            system_state: Some(error_record.system_state.clone()),
        };

        session.traced_errors.push(error_record.id);
        self.stats.error_traces += 1;
        drop(session); // Release the session borrow

        self.add_trace_record(record);

        Ok(())
    }

    /// 追踪内存分配
    pub fn trace_memory_allocation(&mut self, session_id: u64, allocation_size: u64, allocation_address: u64, memory_type: MemoryType) -> Result<(), &'static str> {
        let session = self.active_sessions.get_mut(&session_id)
            .ok_or("Session not found")?;

        if session.status != SessionStatus::Active {
            return Err("Session is not active");
        }

        let record_id = self.record_counter.fetch_add(1, Ordering::SeqCst);
        let timestamp = crate::time::get_timestamp();

        let memory_data = MemoryData {
            allocation_size,
            allocation_address,
            memory_type,
            allocator_type: AllocatorType::Buddy,
            memory_tag: None,
            alignment: 8,
            is_aligned: false,
        };

        let record = TraceRecord {
            id: record_id,
            session_id,
            record_type: TraceRecordType::MemoryAllocation,
            timestamp,
            depth: session.current_depth,
            call_chain_info: CallChainInfo {
                chain_id: format!("memory-{}", allocation_address),
                current_function: FunctionInfo {
                    name: "memory_alloc".to_string(),
                    module: "alloc".to_string(),
                    file: "alloc.rs".to_string(),
                    line: 0,
                    address: 0,
                    signature: String::new(),
                    function_type: FunctionType::KernelFunction,
                },
                caller_function: None,
                parameters: Vec::new(),
                return_value: None,
                call_type: CallType::SystemCall,
            },
            error_info: None,
            performance_data: None,
            memory_data: Some(memory_data),
            system_state: None,
        };

        // 更新内存统计
        session.performance_metrics.memory_allocations += 1;
        drop(session); // Release the session borrow

        self.add_trace_record(record);

        Ok(())
    }

    /// 添加追踪记录
    fn add_trace_record(&mut self, record: TraceRecord) {
        // 提取record_type在移动之前
        let record_type = record.record_type;

        self.trace_records.push(record);

        // 限制记录数量
        if self.trace_records.len() > self.config.max_record_count {
            self.trace_records.remove(0);
        }

        // 更新统计
        *self.stats.records_by_type.entry(record_type).or_insert(0) += 1;
        self.stats.total_records += 1;
    }

    /// 生成调用链
    pub fn generate_call_chain(&mut self, session_id: u64) -> Result<CallChain, &'static str> {
        let session = self.active_sessions.get(&session_id)
            .ok_or("Session not found")?;

        let session_records: Vec<_> = self.trace_records
            .iter()
            .filter(|record| record.session_id == session_id)
            .collect();

        let mut call_frames = Vec::new();
        let mut current_depth = 0;
        let mut total_execution_time = 0u64;
        let mut peak_memory = 0u64;

        for record in &session_records {
            match record.record_type {
                TraceRecordType::FunctionEntry => {
                    let frame = CallFrame {
                        id: record.id,
                        function: record.call_chain_info.current_function.clone(),
                        entry_time: record.timestamp,
                        exit_time: None,
                        execution_time_us: 0,
                        child_calls: 0,
                        memory_usage: 0,
                        parameters: record.call_chain_info.parameters.clone(),
                        return_value: record.call_chain_info.return_value.clone(),
                    };
                    call_frames.push(frame);
                    current_depth = record.depth;
                }
                TraceRecordType::FunctionExit => {
                    if let Some(frame) = call_frames.last_mut() {
                        if frame.function.name == record.call_chain_info.current_function.name {
                            frame.exit_time = Some(record.timestamp);
                            if let Some(perf_data) = &record.performance_data {
                                frame.execution_time_us = perf_data.execution_time_us;
                                total_execution_time += perf_data.execution_time_us;
                            }
                        }
                    }
                }
                TraceRecordType::MemoryAllocation => {
                    if let Some(mem_data) = &record.memory_data {
                        peak_memory = peak_memory.max(mem_data.allocation_size);
                    }
                }
                _ => {}
            }
        }

        let call_chain = CallChain {
            id: format!("chain-{}", session_id),
            name: format!("Call Chain for Session {}", session_id),
            call_sequence: call_frames,
            total_depth: current_depth,
            total_execution_time_us: total_execution_time,
            peak_memory_usage: peak_memory,
            call_frequency: 1,
            last_called: session.start_time,
        };

        // 缓存调用链
        self.call_chains.insert(call_chain.id.clone(), call_chain.clone());

        Ok(call_chain)
    }

    /// 分析依赖关系
    pub fn analyze_dependencies(&mut self) -> Result<&DependencyGraph, &'static str> {
        // 清空现有图
        self.dependency_graph.nodes.clear();
        self.dependency_graph.edges.clear();

        // 分析所有追踪记录
        for record in &self.trace_records {
            if record.record_type == TraceRecordType::FunctionEntry {
                let function = &record.call_chain_info.current_function;
                let node_id = format!("{}::{}", function.module, function.name);

                // 创建或更新节点
                let node = self.dependency_graph.nodes.entry(node_id.clone()).or_insert(DependencyNode {
                    id: node_id.clone(),
                    name: function.name.clone(),
                    node_type: NodeType::Function,
                    dependency_count: 0,
                    reverse_dependency_count: 0,
                    weight: 1.0,
                    criticality_score: 0.0,
                });

                node.weight += 1.0;
            }
        }

        // 分析调用关系（简化实现）
        // 实际实现需要更复杂的图分析算法

        // 更新图统计
        self.dependency_graph.stats.total_nodes = self.dependency_graph.nodes.len() as u64;
        self.dependency_graph.stats.total_edges = self.dependency_graph.edges.len() as u64;

        Ok(&self.dependency_graph)
    }

    /// 获取活动会话
    pub fn get_active_sessions(&self) -> Vec<&TraceSession> {
        self.active_sessions.values().collect()
    }

    /// 获取追踪记录
    pub fn get_trace_records(&self, session_id: Option<u64>, limit: Option<usize>) -> Vec<&TraceRecord> {
        let mut records = self.trace_records.iter().collect::<Vec<_>>();

        // 按会话过滤
        if let Some(session_id) = session_id {
            records.retain(|record| record.session_id == session_id);
        }

        // 按时间排序
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        // 限制数量
        if let Some(limit) = limit {
            records.truncate(limit);
        }

        records
    }

    /// 获取调用链
    pub fn get_call_chain(&self, chain_id: &str) -> Option<&CallChain> {
        self.call_chains.get(chain_id)
    }

    /// 获取统计信息
    pub fn get_statistics(&self) -> TracingStats {
        self.stats.clone()
    }

    /// 更新配置
    pub fn update_config(&mut self, config: TracingConfig) -> Result<(), &'static str> {
        self.config = config;
        Ok(())
    }

    /// 清理过期数据
    pub fn cleanup_expired_data(&mut self, max_age_seconds: u64) -> Result<(), &'static str> {
        let current_time = crate::time::get_timestamp();
        let cutoff_time = current_time - max_age_seconds;

        // 清理过期的追踪记录
        self.trace_records.retain(|record| record.timestamp > cutoff_time);

        // 清理过期的会话
        let expired_sessions: Vec<u64> = self.active_sessions
            .iter()
            .filter(|(_, session)| session.start_time < cutoff_time)
            .map(|(id, _)| *id)
            .collect();

        for session_id in expired_sessions {
            let _ = self.stop_session(session_id);
        }

        crate::println!("[ErrorTracer] Cleaned up expired data");
        Ok(())
    }

    /// 停止错误追踪器
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        // 停止所有活动会话
        let active_session_ids: Vec<u64> = self.active_sessions.keys().copied().collect();
        for session_id in active_session_ids {
            let _ = self.stop_session(session_id);
        }

        // 清理所有数据
        self.active_sessions.clear();
        self.trace_records.clear();
        self.call_chains.clear();
        self.dependency_graph.nodes.clear();
        self.dependency_graph.edges.clear();

        crate::println!("[ErrorTracer] Error tracer shutdown successfully");
        Ok(())
    }
}

/// 创建默认的错误追踪器
pub fn create_error_tracer() -> Arc<Mutex<ErrorTracer>> {
    Arc::new(Mutex::new(ErrorTracer::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_tracer_creation() {
        let tracer = ErrorTracer::new();
        assert_eq!(tracer.id, 1);
        assert!(tracer.active_sessions.is_empty());
        assert!(tracer.trace_records.is_empty());
    }

    #[test]
    fn test_session_management() {
        let mut tracer = ErrorTracer::new();

        let session_id = tracer.start_session("test_session", SessionType::OnDemand, None).unwrap();
        assert_eq!(tracer.active_sessions.len(), 1);

        tracer.stop_session(session_id).unwrap();
        assert_eq!(tracer.active_sessions.len(), 0);
    }

    #[test]
    fn test_tracing_config_default() {
        let config = TracingConfig::default();
        assert!(config.enable_auto_tracing);
        assert_eq!(config.max_concurrent_sessions, 10);
        assert!(config.default_session_config.enable_performance_tracing);
    }
}
