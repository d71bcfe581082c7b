//! Formal Verification Module
//!
//! 形式化验证模块
//! 提供全面的形式化验证工具，包括模型检查、定理证明、静态分析等功能
//! 用于提高系统安全性和可靠性

extern crate alloc;

pub mod model_checker;
pub mod theorem_prover;
pub mod static_analyzer;
pub mod type_checker;
pub mod memory_safety;
pub mod concurrency_verifier;
pub mod security_prover;
pub mod verification_pipeline;
pub mod proof_assistant;
pub mod spec_language;

// Re-export all public types and functions

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::{format, vec};
use alloc::string::String;
use core::sync::atomic::{AtomicU64, AtomicBool, Ordering};
use spin::Mutex;

/// 验证结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    /// 未开始
    NotStarted,
    /// 进行中
    InProgress,
    /// 验证通过
    Verified,
    /// 验证失败
    Failed,
    /// 验证超时
    Timeout,
    /// 内存不足
    OutOfMemory,
    /// 内部错误
    InternalError,
}

/// 验证严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VerificationSeverity {
    /// 信息级别
    Info,
    /// 警告级别
    Warning,
    /// 错误级别
    Error,
    /// 严重错误
    Critical,
    /// 致命错误
    Fatal,
}

/// 验证类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationType {
    /// 模型检查
    ModelChecking,
    /// 定理证明
    TheoremProving,
    /// 静态分析
    StaticAnalysis,
    /// 类型检查
    TypeChecking,
    /// 内存安全验证
    MemorySafety,
    /// 并发验证
    ConcurrencyVerification,
    /// 安全属性验证
    SecurityVerification,
    /// 形式化规约验证
    SpecificationVerification,
}

/// 验证方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationMethod {
    /// 有界模型检查
    BoundedModelChecking,
    /// 抽象解释
    AbstractInterpretation,
    /// 符号执行
    SymbolicExecution,
    /// 定理证明
    TheoremProving,
    /// 数据流分析
    DataFlowAnalysis,
    /// 控制流分析
    ControlFlowAnalysis,
    /// 指针分析
    PointerAnalysis,
    /// 竞争检测
    RaceDetection,
}

/// 验证目标
#[derive(Debug, Clone)]
pub struct VerificationTarget {
    /// 目标ID
    pub id: u64,
    /// 目标名称
    pub name: String,
    /// 目标类型
    pub target_type: VerificationTargetType,
    /// 目标路径
    pub path: String,
    /// 目标描述
    pub description: String,
    /// 优先级
    pub priority: u8,
    /// 创建时间
    pub created_at: u64,
}

/// 验证目标类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationTargetType {
    /// 函数
    Function,
    /// 模块
    Module,
    /// 结构体
    Struct,
    /// 特征
    Trait,
    /// 常量
    Constant,
    /// 宏
    Macro,
    /// 整个程序
    Program,
    /// 特定属性
    Property,
}

/// 验证属性
#[derive(Debug, Clone)]
pub struct VerificationProperty {
    /// 属性ID
    pub id: u64,
    /// 属性名称
    pub name: String,
    /// 属性类型
    pub property_type: PropertyType,
    /// 属性描述
    pub description: String,
    /// 属性表达式
    pub expression: String,
    /// 属性类别
    pub category: PropertyCategory,
    /// 验证状态
    pub status: VerificationStatus,
    /// 验证结果
    pub result: Option<VerificationResult>,
}

/// 属性类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    /// 安全性属性
    Safety,
    /// 活性属性
    Liveness,
    /// 公平性属性
    Fairness,
    /// 功能正确性
    FunctionalCorrectness,
    /// 安全属性
    Security,
    /// 性能属性
    Performance,
    /// 可靠性属性
    Reliability,
}

/// 属性类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyCategory {
    /// 内存安全
    MemorySafety,
    /// 类型安全
    TypeSafety,
    /// 并发安全
    ConcurrencySafety,
    /// 信息流安全
    InformationFlow,
    /// 访问控制
    AccessControl,
    /// 加密正确性
    CryptographicCorrectness,
    /// 协议正确性
    ProtocolCorrectness,
    /// 系统不变量
    SystemInvariant,
}

/// 验证结果
#[derive(Debug, Clone)]
pub struct VerificationResult {
    /// 结果ID
    pub id: u64,
    /// 验证状态
    pub status: VerificationStatus,
    /// 严重程度
    pub severity: VerificationSeverity,
    /// 结果消息
    pub message: String,
    /// 证明对象
    pub proof_object: Option<ProofObject>,
    /// 反例路径
    pub counterexample: Option<Counterexample>,
    /// 验证时间（毫秒）
    pub verification_time_ms: u64,
    /// 内存使用（字节）
    pub memory_used: u64,
    /// 统计信息
    pub statistics: VerificationStatistics,
    /// 附加信息
    pub metadata: BTreeMap<String, String>,
}

/// 证明对象
#[derive(Debug, Clone)]
pub struct ProofObject {
    /// 证明ID
    pub id: u64,
    /// 证明类型
    pub proof_type: ProofType,
    /// 证明步骤
    pub proof_steps: Vec<ProofStep>,
    /// 证明策略
    pub proof_strategy: String,
    /// 证明工具
    pub prover_used: String,
    /// 证明时间
    pub proof_time_ms: u64,
    /// 证明大小（字节）
    pub proof_size: u64,
    /// 验证状态
    pub is_verified: bool,
}

/// 证明类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofType {
    /// 自然演绎证明
    NaturalDeduction,
    /// 序列演算证明
    SequentCalculus,
    /// 分辨率证明
    Resolution,
    /// 表格证明
    Tableaux,
    /// 模型检查证明
    ModelChecking,
    /// 归纳证明
    Induction,
    /// 反驳证明
    Refutation,
    /// 交互式证明
    Interactive,
}

/// 证明步骤
#[derive(Debug, Clone)]
pub struct ProofStep {
    /// 步骤ID
    pub id: u64,
    /// 步骤描述
    pub description: String,
    /// 前提条件
    pub premises: Vec<String>,
    /// 结论
    pub conclusion: String,
    /// 推理规则
    pub inference_rule: String,
    /// 步骤注释
    pub annotation: Option<String>,
}

/// 反例
#[derive(Debug, Clone)]
pub struct Counterexample {
    /// 反例ID
    pub id: u64,
    /// 反例类型
    pub counterexample_type: CounterexampleType,
    /// 执行路径
    pub execution_path: Vec<ExecutionStep>,
    /// 系统状态
    pub system_state: SystemState,
    /// 违反的属性
    pub violated_property: String,
    /// 反例描述
    pub description: String,
}

/// 反例类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterexampleType {
    /// 执行反例
    Execution,
    /// 状态反例
    State,
    /// 路径反例
    Path,
    /// 时序反例
    Temporal,
    /// 数据反例
    Data,
}

/// 执行步骤
#[derive(Debug, Clone)]
pub struct ExecutionStep {
    /// 步骤ID
    pub id: u64,
    /// 步骤类型
    pub step_type: String,
    /// 执行的函数
    pub function: String,
    /// 行号
    pub line_number: Option<u32>,
    /// 变量状态
    pub variable_states: BTreeMap<String, VariableState>,
    /// 内存状态
    pub memory_state: Option<MemoryState>,
    /// 时间戳
    pub timestamp: u64,
}

/// 变量状态
#[derive(Debug, Clone)]
pub struct VariableState {
    /// 变量名
    pub name: String,
    /// 变量值
    pub value: String,
    /// 变量类型
    pub var_type: String,
    /// 是否被初始化
    pub is_initialized: bool,
    /// 内存地址
    pub memory_address: Option<u64>,
}

/// 内存状态
#[derive(Debug, Clone)]
pub struct MemoryState {
    /// 内存布局
    pub memory_layout: BTreeMap<u64, MemoryRegion>,
    /// 堆状态
    pub heap_state: HeapState,
    /// 栈状态
    pub stack_state: StackState,
    /// 全局变量状态
    pub global_state: BTreeMap<String, VariableState>,
}

/// 内存区域
#[derive(Debug, Clone)]
pub struct MemoryRegion {
    /// 起始地址
    pub start_address: u64,
    /// 结束地址
    pub end_address: u64,
    /// 区域类型
    pub region_type: MemoryRegionType,
    /// 权限
    pub permissions: MemoryPermissions,
    /// 是否已分配
    pub is_allocated: bool,
    /// 区域标签
    pub label: Option<String>,
}

/// 内存区域类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryRegionType {
    /// 代码段
    Code,
    /// 数据段
    Data,
    /// 堆
    Heap,
    /// 栈
    Stack,
    /// 映射文件
    MappedFile,
    /// 共享内存
    SharedMemory,
}

/// 内存权限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryPermissions {
    /// 可读
    pub readable: bool,
    /// 可写
    pub writable: bool,
    /// 可执行
    pub executable: bool,
}

/// 堆状态
#[derive(Debug, Clone)]
pub struct HeapState {
    /// 已分配块
    pub allocated_blocks: Vec<HeapBlock>,
    /// 空闲块
    pub free_blocks: Vec<HeapBlock>,
    /// 总大小
    pub total_size: u64,
    /// 已使用大小
    pub used_size: u64,
}

/// 堆块
#[derive(Debug, Clone)]
pub struct HeapBlock {
    /// 起始地址
    pub start_address: u64,
    /// 大小
    pub size: u64,
    /// 是否已分配
    pub is_allocated: bool,
    /// 块标签
    pub label: Option<String>,
}

/// 栈状态
#[derive(Debug, Clone)]
pub struct StackState {
    /// 栈帧
    pub stack_frames: Vec<StackFrame>,
    /// 栈指针
    pub stack_pointer: u64,
    /// 基指针
    pub base_pointer: u64,
    /// 栈大小
    pub stack_size: u64,
}

/// 栈帧
#[derive(Debug, Clone)]
pub struct StackFrame {
    /// 函数名
    pub function_name: String,
    /// 返回地址
    pub return_address: u64,
    /// 局部变量
    pub local_variables: BTreeMap<String, VariableState>,
    /// 参数
    pub parameters: BTreeMap<String, VariableState>,
    /// 帧大小
    pub frame_size: u64,
}

/// 系统状态
#[derive(Debug, Clone)]
pub struct SystemState {
    /// 处理器状态
    pub processor_state: ProcessorState,
    /// 内存状态
    pub memory_state: MemoryState,
    /// 文件系统状态
    pub filesystem_state: FileSystemState,
    /// 网络状态
    pub network_state: NetworkState,
    /// 进程状态
    pub process_state: ProcessState,
}

/// 处理器状态
#[derive(Debug, Clone)]
pub struct ProcessorState {
    /// 寄存器状态
    pub registers: BTreeMap<String, u64>,
    /// 程序计数器
    pub program_counter: u64,
    /// 处理器模式
    pub processor_mode: ProcessorMode,
    /// 中断状态
    pub interrupt_state: InterruptState,
}

/// 处理器模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorMode {
    /// 用户模式
    User,
    /// 监管模式
    Supervisor,
    /// 中断模式
    Interrupt,
    /// 虚拟化模式
    Virtualization,
}

/// 中断状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptState {
    /// 中断是否启用
    pub enabled: bool,
    /// 当前中断级别
    pub current_level: u8,
    /// 待处理中断
    pub pending_interrupts: u32,
}

/// 文件系统状态
#[derive(Debug, Clone)]
pub struct FileSystemState {
    /// 打开的文件
    pub open_files: BTreeMap<u32, FileState>,
    /// 挂载点
    pub mount_points: Vec<String>,
    /// 当前工作目录
    pub current_directory: String,
    /// 文件系统类型
    pub fs_type: String,
}

/// 文件状态
#[derive(Debug, Clone)]
pub struct FileState {
    /// 文件路径
    pub path: String,
    /// 文件描述符
    pub descriptor: u32,
    /// 打开模式
    pub open_mode: String,
    /// 文件位置
    pub position: u64,
    /// 文件大小
    pub size: u64,
}

/// 网络状态
#[derive(Debug, Clone)]
pub struct NetworkState {
    /// 活动连接
    pub active_connections: Vec<ConnectionState>,
    /// 监听端口
    pub listening_ports: Vec<u16>,
    /// 网络接口
    pub interfaces: Vec<String>,
    /// 路由表
    pub routing_table: BTreeMap<String, String>,
}

/// 连接状态
#[derive(Debug, Clone)]
pub struct ConnectionState {
    /// 连接ID
    pub connection_id: u32,
    /// 本地地址
    pub local_address: String,
    /// 本地端口
    pub local_port: u16,
    /// 远程地址
    pub remote_address: String,
    /// 远程端口
    pub remote_port: u16,
    /// 连接状态
    pub state: String,
    /// 协议类型
    pub protocol: String,
}

/// 进程状态
#[derive(Debug, Clone)]
pub struct ProcessState {
    /// 进程ID
    pub process_id: u32,
    /// 父进程ID
    pub parent_id: u32,
    /// 进程状态
    pub state: String,
    /// 优先级
    pub priority: u8,
    /// 线程列表
    pub threads: Vec<u32>,
    /// 打开的文件
    pub open_files: Vec<u32>,
    /// 内存映射
    pub memory_mappings: Vec<MemoryMapping>,
}

/// 内存映射
#[derive(Debug, Clone)]
pub struct MemoryMapping {
    /// 虚拟地址
    pub virtual_address: u64,
    /// 物理地址
    pub physical_address: u64,
    /// 大小
    pub size: u64,
    /// 映射类型
    pub mapping_type: String,
    /// 权限
    pub permissions: MemoryPermissions,
}

/// 验证统计信息
#[derive(Debug, Clone, Default)]
pub struct VerificationStatistics {
    /// 检查的状态数
    pub states_checked: u64,
    /// 探索的路径数
    pub paths_explored: u64,
    /// 证明的引理数
    pub lemmas_proved: u64,
    /// 发现的bug数
    pub bugs_found: u64,
    /// 验证的属性数
    pub properties_verified: u64,
    /// 执行的规则数
    pub rules_applied: u64,
    /// 最大深度
    pub max_depth: u32,
    /// 分支因子
    pub branching_factor: f32,
}

/// 形式化验证配置
#[derive(Debug, Clone)]
pub struct FormalVerificationConfig {
    /// 启用验证
    pub enabled: bool,
    /// 验证工具配置
    pub tools: BTreeMap<String, ToolConfig>,
    /// 默认验证方法
    pub default_method: VerificationMethod,
    /// 超时时间（秒）
    pub timeout_seconds: u64,
    /// 内存限制（MB）
    pub memory_limit_mb: u64,
    /// 并行验证进程数
    pub parallel_processes: usize,
    /// 详细程度
    pub verbosity: u8,
    /// 输出格式
    pub output_format: OutputFormat,
    /// 验证级别
    pub verification_level: VerificationLevel,
}

impl Default for FormalVerificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tools: BTreeMap::new(),
            default_method: VerificationMethod::BoundedModelChecking,
            timeout_seconds: 300,
            memory_limit_mb: 1024,
            parallel_processes: 1,
            verbosity: 1,
            output_format: OutputFormat::JSON,
            verification_level: VerificationLevel::Standard,
        }
    }
}

/// 工具配置
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// 工具名称
    pub name: String,
    /// 工具路径
    pub path: String,
    /// 工具参数
    pub arguments: Vec<String>,
    /// 工具版本
    pub version: String,
    /// 是否启用
    pub enabled: bool,
}

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON格式
    JSON,
    /// XML格式
    XML,
    /// 文本格式
    Text,
    /// HTML格式
    HTML,
    /// 自定义格式
    Custom,
}

/// 验证级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationLevel {
    /// 快速验证
    Quick,
    /// 标准验证
    Standard,
    /// 深度验证
    Thorough,
    /// 完整验证
    Complete,
    /// 自定义级别
    Custom(u8),
}

/// 形式化验证引擎
pub struct FormalVerificationEngine {
    /// 引擎ID
    pub id: u64,
    /// 引擎配置
    config: FormalVerificationConfig,
    /// 验证目标
    targets: Vec<VerificationTarget>,
    /// 验证属性
    properties: Vec<VerificationProperty>,
    /// 验证结果
    results: Vec<VerificationResult>,
    /// 模型检查器
    model_checker: Arc<Mutex<model_checker::ModelChecker>>,
    /// 定理证明器
    theorem_prover: Arc<Mutex<theorem_prover::TheoremProver>>,
    /// 静态分析器
    static_analyzer: Arc<Mutex<static_analyzer::StaticAnalyzer>>,
    /// 类型检查器
    type_checker: Arc<Mutex<type_checker::TypeChecker>>,
    /// 内存安全验证器
    memory_verifier: Arc<Mutex<memory_safety::MemorySafetyVerifier>>,
    /// 并发验证器
    concurrency_verifier: Arc<Mutex<concurrency_verifier::ConcurrencyVerifier>>,
    /// 安全证明器
    security_prover: Arc<Mutex<security_prover::SecurityProver>>,
    /// 验证管道
    pipeline: Arc<Mutex<verification_pipeline::VerificationPipeline>>,
    /// 统计信息
    stats: Arc<Mutex<VerificationStatistics>>,
    /// 验证计数器
    verification_counter: AtomicU64,
    /// 是否正在运行
    running: AtomicBool,
}

impl FormalVerificationEngine {
    /// 创建新的形式化验证引擎
    pub fn new(config: FormalVerificationConfig) -> Self {
        Self {
            id: 1,
            config,
            targets: Vec::new(),
            properties: Vec::new(),
            results: Vec::new(),
            model_checker: Arc::new(Mutex::new(model_checker::ModelChecker::new())),
            theorem_prover: Arc::new(Mutex::new(theorem_prover::TheoremProver::new())),
            static_analyzer: Arc::new(Mutex::new(static_analyzer::StaticAnalyzer::new())),
            type_checker: Arc::new(Mutex::new(type_checker::TypeChecker::new())),
            memory_verifier: Arc::new(Mutex::new(memory_safety::MemorySafetyVerifier::new())),
            concurrency_verifier: Arc::new(Mutex::new(concurrency_verifier::ConcurrencyVerifier::new())),
            security_prover: Arc::new(Mutex::new(security_prover::SecurityProver::new())),
            pipeline: Arc::new(Mutex::new(verification_pipeline::VerificationPipeline::new())),
            stats: Arc::new(Mutex::new(VerificationStatistics::default())),
            verification_counter: AtomicU64::new(1),
            running: AtomicBool::new(false),
        }
    }

    /// 初始化验证引擎
    pub fn init(&mut self) -> Result<(), &'static str> {
        if !self.config.enabled {
            return Ok(());
        }

        self.running.store(true, Ordering::SeqCst);

        // 初始化各个验证组件
        self.model_checker.lock().init()?;
        self.theorem_prover.lock().init()?;
        self.static_analyzer.lock().init()?;
        self.type_checker.lock().init()?;
        self.memory_verifier.lock().init()?;
        self.concurrency_verifier.lock().init()?;
        self.security_prover.lock().init()?;
        self.pipeline.lock().init()?;

        crate::println!("[FormalVerification] Formal verification engine initialized successfully");
        Ok(())
    }

    /// 添加验证目标
    pub fn add_target(&mut self, target: VerificationTarget) {
        self.targets.push(target);
    }

    /// 添加验证属性
    pub fn add_property(&mut self, property: VerificationProperty) {
        self.properties.push(property);
    }

    /// 执行验证
    pub fn verify(&mut self) -> Result<Vec<VerificationResult>, &'static str> {
        if !self.running.load(Ordering::SeqCst) {
            return Err("Verification engine is not running");
        }

        let mut all_results = Vec::new();

        // 使用验证管道执行验证
        let pipeline_results = self.pipeline.lock().execute_verification(&self.targets, &self.properties)?;
        all_results.extend(pipeline_results);

        // 存储结果
        self.results.extend(all_results.clone());

        // 更新统计信息
        self.update_statistics();

        Ok(all_results)
    }

    /// 执行特定类型的验证
    pub fn verify_by_type(&mut self, verification_type: VerificationType) -> Result<Vec<VerificationResult>, &'static str> {
        let mut results = Vec::new();

        match verification_type {
            VerificationType::ModelChecking => {
                results.extend(self.model_checker.lock().check_models(&self.targets)?);
            }
            VerificationType::TheoremProving => {
                results.extend(self.theorem_prover.lock().prove_theorems(&self.properties)?);
            }
            VerificationType::StaticAnalysis => {
                results.extend(self.static_analyzer.lock().analyze(&self.targets)?);
            }
            VerificationType::TypeChecking => {
                results.extend(self.type_checker.lock().check_types(&self.targets)?);
            }
            VerificationType::MemorySafety => {
                results.extend(self.memory_verifier.lock().verify_memory_safety(&self.targets)?);
            }
            VerificationType::ConcurrencyVerification => {
                results.extend(self.concurrency_verifier.lock().verify_concurrency(&self.targets)?);
            }
            VerificationType::SecurityVerification => {
                results.extend(self.security_prover.lock().verify_security(&self.properties)?);
            }
            VerificationType::SpecificationVerification => {
                // 综合验证
                results.extend(self.verify()?);
            }
        }

        self.results.extend(results.clone());
        Ok(results)
    }

    /// 获取验证结果
    pub fn get_results(&self) -> Vec<VerificationResult> {
        self.results.clone()
    }

    /// 获取统计信息
    pub fn get_statistics(&self) -> VerificationStatistics {
        self.stats.lock().clone()
    }

    /// 更新配置
    pub fn update_config(&mut self, config: FormalVerificationConfig) -> Result<(), &'static str> {
        self.config = config;
        // 重新初始化组件
        self.init()
    }

    /// 停止验证引擎
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        self.running.store(false, Ordering::SeqCst);

        // 停止各个组件
        self.model_checker.lock().shutdown()?;
        self.theorem_prover.lock().shutdown()?;
        self.static_analyzer.lock().shutdown()?;
        self.type_checker.lock().shutdown()?;
        self.memory_verifier.lock().shutdown()?;
        self.concurrency_verifier.lock().shutdown()?;
        self.security_prover.lock().shutdown()?;
        self.pipeline.lock().shutdown()?;

        crate::println!("[FormalVerification] Formal verification engine shutdown successfully");
        Ok(())
    }

    /// 更新统计信息
    fn update_statistics(&self) {
        let mut stats = self.stats.lock();
        stats.properties_verified = self.properties.len() as u64;
        stats.bugs_found = self.results.iter()
            .filter(|r| r.status == VerificationStatus::Failed)
            .count() as u64;
    }
}

/// 全局形式化验证引擎实例
pub static FORMAL_VERIFICATION_ENGINE: spin::Mutex<Option<FormalVerificationEngine>> =
    spin::Mutex::new(None);

/// 初始化形式化验证引擎
pub fn init_formal_verification() -> Result<(), &'static str> {
    let config = FormalVerificationConfig::default();
    let mut guard = FORMAL_VERIFICATION_ENGINE.lock();
    let mut engine = FormalVerificationEngine::new(config);
    engine.init()?;
    *guard = Some(engine);
    Ok(())
}

/// 执行验证
pub fn verify() -> Result<Vec<VerificationResult>, &'static str> {
    let mut guard = FORMAL_VERIFICATION_ENGINE.lock();
    if let Some(ref mut e) = *guard {
        e.verify()
    } else {
        Ok(Vec::new())
    }
}

/// 执行特定类型的验证
pub fn verify_by_type(verification_type: VerificationType) -> Result<Vec<VerificationResult>, &'static str> {
    let mut guard = FORMAL_VERIFICATION_ENGINE.lock();
    if let Some(ref mut e) = *guard {
        e.verify_by_type(verification_type)
    } else {
        Ok(Vec::new())
    }
}

/// 获取验证结果
pub fn get_verification_results() -> Vec<VerificationResult> {
    let guard = FORMAL_VERIFICATION_ENGINE.lock();
    guard.as_ref().map(|e| e.get_results()).unwrap_or_default()
}

/// 获取验证统计信息
pub fn get_verification_statistics() -> VerificationStatistics {
    let guard = FORMAL_VERIFICATION_ENGINE.lock();
    guard.as_ref().map(|e| e.get_statistics()).unwrap_or_default()
}

/// 停止形式化验证引擎
pub fn shutdown_formal_verification() -> Result<(), &'static str> {
    let mut guard = FORMAL_VERIFICATION_ENGINE.lock();
    if let Some(ref mut e) = *guard {
        e.shutdown()
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_config_default() {
        let config = FormalVerificationConfig::default();
        assert!(config.enabled);
        assert_eq!(config.default_method, VerificationMethod::BoundedModelChecking);
    }

    #[test]
    fn test_verification_status() {
        assert_ne!(VerificationStatus::Verified, VerificationStatus::Failed);
        assert_eq!(VerificationStatus::NotStarted, VerificationStatus::NotStarted);
    }

    #[test]
    fn test_verification_severity_ordering() {
        assert!(VerificationSeverity::Info < VerificationSeverity::Warning);
        assert!(VerificationSeverity::Warning < VerificationSeverity::Error);
        assert!(VerificationSeverity::Error < VerificationSeverity::Critical);
        assert!(VerificationSeverity::Critical < VerificationSeverity::Fatal);
    }

    #[test]
    fn test_verification_target_creation() {
        let target = VerificationTarget {
            id: 1,
            name: "test_function".to_string(),
            target_type: VerificationTargetType::Function,
            path: "src/test.rs".to_string(),
            description: "Test function".to_string(),
            priority: 1,
            created_at: 0,
        };
        assert_eq!(target.id, 1);
        assert_eq!(target.target_type, VerificationTargetType::Function);
    }

    #[test]
    fn test_verification_result() {
        let result = VerificationResult {
            id: 1,
            status: VerificationStatus::Verified,
            severity: VerificationSeverity::Info,
            message: "Verification successful".to_string(),
            proof_object: None,
            counterexample: None,
            verification_time_ms: 1000,
            memory_used: 1024,
            statistics: VerificationStatistics::default(),
            metadata: BTreeMap::new(),
        };
        assert_eq!(result.status, VerificationStatus::Verified);
        assert_eq!(result.severity, VerificationSeverity::Info);
    }
}
