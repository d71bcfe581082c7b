//! Model Checker Module
//!
//! 模型检查器模块
//! 实现各种模型检查算法，用于验证系统的安全属性和活性属性

extern crate alloc;

extern crate hashbrown;

use alloc::collections::BTreeMap;
use hashbrown::{HashMap, HashSet};
use alloc::collections::binary_heap::BinaryHeap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::string::ToString;
use alloc::{format, vec};
use alloc::boxed::Box;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;
use crate::compat::DefaultHasherBuilder;

use super::*;

/// 模型检查器
pub struct ModelChecker {
    /// 检查器ID
    pub id: u64,
    /// 检查器配置
    config: ModelCheckerConfig,
    /// 状态空间
    state_space: StateSpace,
    /// 转移系统
    transition_system: TransitionSystem,
    /// 属性规范
    specifications: Vec<TemporalLogicFormula>,
    /// 检查结果
    results: Vec<ModelCheckingResult>,
    /// 检查统计
    stats: ModelCheckingStats,
    /// 是否正在运行
    running: AtomicBool,
}

/// 模型检查器配置
#[derive(Debug, Clone)]
pub struct ModelCheckerConfig {
    /// 检查算法
    pub algorithm: ModelCheckingAlgorithm,
    /// 状态空间探索策略
    pub exploration_strategy: ExplorationStrategy,
    /// 状态压缩方法
    pub state_compression: StateCompression,
    /// 抽象程度
    pub abstraction_level: AbstractionLevel,
    /// 最大状态数
    pub max_states: u64,
    /// 最大深度
    pub max_depth: u32,
    /// 超时时间（秒）
    pub timeout_seconds: u64,
    /// 并行度
    pub parallelism: u32,
    /// 是否使用增量检查
    pub incremental: bool,
    /// 是否进行等价性检查
    pub equivalence_checking: bool,
}

impl Default for ModelCheckerConfig {
    fn default() -> Self {
        Self {
            algorithm: ModelCheckingAlgorithm::ExplicitState,
            exploration_strategy: ExplorationStrategy::DepthFirst,
            state_compression: StateCompression::HashCompaction,
            abstraction_level: AbstractionLevel::Concrete,
            max_states: 1000000,
            max_depth: 1000,
            timeout_seconds: 300,
            parallelism: 1,
            incremental: false,
            equivalence_checking: false,
        }
    }
}

/// 模型检查算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelCheckingAlgorithm {
    /// 显式状态模型检查
    ExplicitState,
    /// 符号模型检查
    Symbolic,
    /// 有界模型检查
    Bounded,
    /// 参数化模型检查
    Parameterized,
    /// 概率模型检查
    Probabilistic,
    /// 混合模型检查
    Hybrid,
    /// 抽象解释
    AbstractInterpretation,
}

/// 探索策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorationStrategy {
    /// 深度优先搜索
    DepthFirst,
    /// 广度优先搜索
    BreadthFirst,
    /// 随机搜索
    Random,
    /// 启发式搜索
    Heuristic,
    /// 双向搜索
    Bidirectional,
    /// 增量搜索
    Incremental,
    /// 并行搜索
    Parallel,
}

/// 状态压缩方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCompression {
    /// 无压缩
    None,
    /// 哈希压缩
    HashCompaction,
    /// 路径压缩
    PathCompression,
    /// 状态合并
    StateMerger,
    /// 对称性压缩
    SymmetryReduction,
    /// 偏序约简
    PartialOrderReduction,
}

/// 抽象程度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbstractionLevel {
    /// 具体状态
    Concrete,
    /// 数据抽象
    DataAbstraction,
    /// 控制流抽象
    ControlFlowAbstraction,
    /// 时间抽象
    TimeAbstraction,
    /// 完全抽象
    FullAbstraction,
}

/// 状态空间
#[derive(Debug, Clone)]
pub struct StateSpace {
    /// 已访问的状态
    visited_states: HashMap<u64, SystemState, DefaultHasherBuilder>,
    /// 待探索的状态
    pending_states: Vec<StateNode>,
    /// 初始状态
    initial_states: Vec<SystemState>,
    /// 错误状态
    error_states: Vec<SystemState>,
    /// 状态转移
    transitions: HashMap<u64, Vec<StateTransition>, DefaultHasherBuilder>,
    /// 状态哈希
    state_hashes: HashMap<u64, u64, DefaultHasherBuilder>,
}

/// 状态节点
#[derive(Debug, Clone)]
pub struct StateNode {
    /// 状态ID
    pub id: u64,
    /// 系统状态
    pub state: SystemState,
    /// 父状态ID
    pub parent_id: Option<u64>,
    /// 深度
    pub depth: u32,
    /// 路径代价
    pub path_cost: f64,
    /// 启发式值
    pub heuristic_value: f64,
    /// 是否为错误状态
    pub is_error: bool,
    /// 访问标记
    pub visited: bool,
}

/// 状态转移
#[derive(Debug, Clone)]
pub struct StateTransition {
    /// 转移ID
    pub id: u64,
    /// 源状态ID
    pub source_state_id: u64,
    /// 目标状态ID
    pub target_state_id: u64,
    /// 转移动作
    pub action: TransitionAction,
    /// 转移条件
    pub guard: Option<String>,
    /// 转移标签
    pub label: Option<String>,
    /// 概率（用于概率模型检查）
    pub probability: Option<f64>,
}

/// 转移动作
#[derive(Debug, Clone)]
pub struct TransitionAction {
    /// 动作类型
    pub action_type: String,
    /// 动作参数
    pub parameters: Vec<String>,
    /// 执行时间
    pub execution_time: u64,
    /// 资源消耗
    pub resource_cost: ResourceCost,
}

/// 资源消耗
#[derive(Debug, Clone)]
pub struct ResourceCost {
    /// CPU时间
    pub cpu_time: u64,
    /// 内存使用
    pub memory_usage: u64,
    /// 网络带宽
    pub network_bandwidth: u64,
    /// 磁盘I/O
    pub disk_io: u64,
}

/// 转移系统
#[derive(Debug, Clone)]
pub struct TransitionSystem {
    /// 系统变量
    pub variables: Vec<SystemVariable>,
    /// 初始状态
    pub initial_states: Vec<SystemState>,
    /// 转移关系
    pub transitions: Vec<StateTransition>,
    /// 原子命题
    pub atomic_propositions: Vec<AtomicProposition>,
    /// 系统不变量
    pub invariants: Vec<StateInvariant>,
}

/// 系统变量
#[derive(Debug, Clone)]
pub struct SystemVariable {
    /// 变量名
    pub name: String,
    /// 变量类型
    pub var_type: VariableType,
    /// 初始值
    pub initial_value: String,
    /// 变量域
    pub domain: ValueDomain,
    /// 是否为全局变量
    pub is_global: bool,
}

/// 变量类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    /// 布尔类型
    Boolean,
    /// 整数类型
    Integer,
    /// 实数类型
    Real,
    /// 枚举类型
    Enum,
    /// 数组类型
    Array,
    /// 记录类型
    Record,
    /// 指针类型
    Pointer,
}

/// 值域
#[derive(Debug, Clone)]
pub struct ValueDomain {
    /// 域类型
    pub domain_type: String,
    /// 最小值
    pub min_value: Option<i64>,
    /// 最大值
    pub max_value: Option<i64>,
    /// 枚举值
    pub enum_values: Vec<String>,
    /// 数组大小
    pub array_size: Option<usize>,
}

/// 原子命题
#[derive(Debug, Clone)]
pub struct AtomicProposition {
    /// 命题ID
    pub id: u64,
    /// 命题名称
    pub name: String,
    /// 命题表达式
    pub expression: String,
    /// 命题类型
    pub proposition_type: PropositionType,
}

/// 命题类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropositionType {
    /// 状态命题
    State,
    /// 转移命题
    Transition,
    /// 路径命题
    Path,
}

/// 状态不变量
#[derive(Debug, Clone)]
pub struct StateInvariant {
    /// 不变量ID
    pub id: u64,
    /// 不变量名称
    pub name: String,
    /// 不变量表达式
    pub expression: String,
    /// 不变量类型
    pub invariant_type: InvariantType,
}

/// 不变量类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantType {
    /// 安全不变量
    Safety,
    /// 活性不变量
    Liveness,
    /// 公平性不变量
    Fairness,
}

/// 时序逻辑公式
#[derive(Debug, Clone)]
pub struct TemporalLogicFormula {
    /// 公式ID
    pub id: u64,
    /// 公式名称
    pub name: String,
    /// 公式类型
    pub formula_type: TemporalLogicType,
    /// 公式表达式
    pub expression: LogicExpression,
    /// 公式描述
    pub description: String,
    /// 验证状态
    pub verification_status: VerificationStatus,
}

/// 时序逻辑类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalLogicType {
    /// 线性时序逻辑 (LTL)
    LTL,
    /// 计算树逻辑 (CTL)
    CTL,
    /// 线性时序逻辑扩展 (LTL*)
    LTLStar,
    /// 计算树逻辑扩展 (CTL*)
    CTLStar,
    /// 实时时序逻辑 (RTTL)
    RTTL,
    /// 概率时序逻辑 (PTL)
    PTL,
}

/// 逻辑表达式
#[derive(Debug, Clone)]
pub enum LogicExpression {
    /// 原子命题
    Atomic(String),
    /// 否定
    Not(Box<LogicExpression>),
    /// 合取
    And(Box<LogicExpression>, Box<LogicExpression>),
    /// 析取
    Or(Box<LogicExpression>, Box<LogicExpression>),
    /// 蕴含
    Implies(Box<LogicExpression>, Box<LogicExpression>),
    /// 等价
    Iff(Box<LogicExpression>, Box<LogicExpression>),
    /// 全称量词
    ForAll(String, Box<LogicExpression>),
    /// 存在量词
    Exists(String, Box<LogicExpression>),
    /// 下一时刻 (X)
    Next(Box<LogicExpression>),
    /// 全局性 (G)
    Globally(Box<LogicExpression>),
    /// 最终性 (F)
    Finally(Box<LogicExpression>),
    /// 直到 (U)
    Until(Box<LogicExpression>, Box<LogicExpression>),
    /// 释放 (R)
    Release(Box<LogicExpression>, Box<LogicExpression>),
    /// 全局路径量词 (A)
    AllPaths(Box<LogicExpression>),
    /// 存在路径量词 (E)
    ExistsPath(Box<LogicExpression>),
}

/// 模型检查结果
#[derive(Debug, Clone)]
pub struct ModelCheckingResult {
    /// 结果ID
    pub id: u64,
    /// 检查的公式
    pub formula: TemporalLogicFormula,
    /// 检查结果
    pub result: CheckResult,
    /// 反例路径
    pub counterexample_path: Option<Vec<StateNode>>,
    /// 证明对象
    pub proof_object: Option<ProofObject>,
    /// 检查时间
    pub checking_time_ms: u64,
    /// 探索的状态数
    pub states_explored: u64,
    /// 最大深度
    pub max_depth_reached: u32,
    /// 内存使用
    pub memory_usage_mb: f64,
}

/// 检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    /// 属性成立
    PropertyHolds,
    /// 属性不成立
    PropertyViolated,
    /// 无法确定
    Inconclusive,
    /// 检查超时
    Timeout,
    /// 内存不足
    OutOfMemory,
    /// 内部错误
    InternalError,
}

/// 模型检查统计
#[derive(Debug, Clone, Default)]
pub struct ModelCheckingStats {
    /// 总状态数
    pub total_states: u64,
    /// 已访问状态数
    pub visited_states: u64,
    /// 转移数
    pub transitions: u64,
    /// 最大深度
    pub max_depth: u32,
    /// 检查时间（毫秒）
    pub checking_time_ms: u64,
    /// 内存使用（字节）
    pub memory_used: u64,
    /// 找到的错误数
    pub errors_found: u64,
    /// 验证的属性数
    pub properties_checked: u64,
}

impl ModelChecker {
    /// 创建新的模型检查器
    pub fn new() -> Self {
        Self {
            id: 1,
            config: ModelCheckerConfig::default(),
            state_space: StateSpace::new(),
            transition_system: TransitionSystem::new(),
            specifications: Vec::new(),
            results: Vec::new(),
            stats: ModelCheckingStats::default(),
            running: AtomicBool::new(false),
        }
    }

    /// 初始化模型检查器
    pub fn init(&mut self) -> Result<(), &'static str> {
        self.running.store(true, Ordering::SeqCst);

        // 初始化状态空间和转移系统
        self.state_space = StateSpace::new();
        self.transition_system = TransitionSystem::new();

        crate::println!("[ModelChecker] Model checker initialized successfully");
        Ok(())
    }

    /// 设置转移系统
    pub fn set_transition_system(&mut self, ts: TransitionSystem) {
        self.transition_system = ts;
    }

    /// 添加时序逻辑规范
    pub fn add_specification(&mut self, spec: TemporalLogicFormula) {
        self.specifications.push(spec);
    }

    /// 执行模型检查
    pub fn check_models(&mut self, targets: &[VerificationTarget]) -> Result<Vec<VerificationResult>, &'static str> {
        if !self.running.load(Ordering::SeqCst) {
            return Err("Model checker is not running");
        }

        let _start_time_ms = 0u64; // TODO: Implement proper timestamp
        let mut verification_results = Vec::new();

        // 构建状态空间
        self.build_state_space(targets)?;

        // 对每个规范进行检查
        let specs_to_check: Vec<_> = self.specifications.iter().cloned().collect();
        for spec in specs_to_check {
            let result = self.check_specification(&spec)?;

            // 转换为通用验证结果
            let verification_result = self.convert_to_verification_result(&result);
            verification_results.push(verification_result);

            // 存储模型检查结果
            self.results.push(result);
        }

        // 更新统计信息
        let elapsed_ms = 0u64; // TODO: Implement proper timestamp
        self.stats.checking_time_ms = elapsed_ms;

        Ok(verification_results)
    }

    /// 检查特定规范
    pub fn check_specification(&mut self, spec: &TemporalLogicFormula) -> Result<ModelCheckingResult, &'static str> {
        let _start_time_ms = 0u64; // TODO: Implement proper timestamp

        let result = match self.config.algorithm {
            ModelCheckingAlgorithm::ExplicitState => {
                self.explicit_state_checking(spec)
            }
            ModelCheckingAlgorithm::Bounded => {
                self.bounded_model_checking(spec)
            }
            ModelCheckingAlgorithm::Symbolic => {
                self.symbolic_model_checking(spec)
            }
            _ => {
                self.explicit_state_checking(spec) // 默认使用显式状态检查
            }
        };

        let elapsed_ms = 0u64; // TODO: Implement proper timestamp

        let checking_result = match result {
            Ok(check_result) => check_result,
            Err(e) => return Err(e),
        };

        Ok(ModelCheckingResult {
            id: self.results.len() as u64 + 1,
            formula: spec.clone(),
            result: checking_result,
            counterexample_path: None,
            proof_object: None,
            checking_time_ms: elapsed_ms,
            states_explored: self.stats.visited_states,
            max_depth_reached: self.stats.max_depth,
            memory_usage_mb: self.stats.memory_used as f64 / 1024.0 / 1024.0,
        })
    }

    /// 显式状态模型检查
    fn explicit_state_checking(&mut self, spec: &TemporalLogicFormula) -> Result<CheckResult, &'static str> {
        match self.config.exploration_strategy {
            ExplorationStrategy::DepthFirst => {
                self.depth_first_search(spec)
            }
            ExplorationStrategy::BreadthFirst => {
                self.breadth_first_search(spec)
            }
            ExplorationStrategy::Heuristic => {
                self.heuristic_search(spec)
            }
            _ => {
                self.depth_first_search(spec) // 默认使用深度优先搜索
            }
        }
    }

    /// 深度优先搜索
    fn depth_first_search(&mut self, spec: &TemporalLogicFormula) -> Result<CheckResult, &'static str> {
        // 初始化搜索
        let mut stack = Vec::new();
        let mut visited = HashSet::with_hasher(DefaultHasherBuilder);

        // 添加初始状态
        for initial_state in &self.transition_system.initial_states {
            let state_node = StateNode {
                id: self.generate_state_id(),
                state: initial_state.clone(),
                parent_id: None,
                depth: 0,
                path_cost: 0.0,
                heuristic_value: 0.0,
                is_error: false,
                visited: false,
            };
            stack.push(state_node);
        }

        // 开始搜索
        while let Some(current_node) = stack.pop() {
            if visited.contains(&current_node.id) {
                continue;
            }
            visited.insert(current_node.id);

            // 检查状态是否违反属性
            if self.violates_property(&current_node.state, spec) {
                return Ok(CheckResult::PropertyViolated);
            }

            // 检查深度限制
            if current_node.depth >= self.config.max_depth {
                continue;
            }

            // 获取后继状态
            let successors = self.get_successor_states(&current_node.state);

            for successor_state in successors {
                let successor_node = StateNode {
                    id: self.generate_state_id(),
                    state: successor_state,
                    parent_id: Some(current_node.id),
                    depth: current_node.depth + 1,
                    path_cost: current_node.path_cost + 1.0,
                    heuristic_value: 0.0,
                    is_error: false,
                    visited: false,
                };
                stack.push(successor_node);
            }

            // 更新统计信息
            self.stats.visited_states += 1;
            self.stats.max_depth = self.stats.max_depth.max(current_node.depth);
        }

        Ok(CheckResult::PropertyHolds)
    }

    /// 广度优先搜索
    fn breadth_first_search(&mut self, spec: &TemporalLogicFormula) -> Result<CheckResult, &'static str> {
        // 初始化搜索
        let mut queue = Vec::new();
        let mut visited = HashSet::with_hasher(DefaultHasherBuilder);

        // 添加初始状态
        for initial_state in &self.transition_system.initial_states {
            let state_node = StateNode {
                id: self.generate_state_id(),
                state: initial_state.clone(),
                parent_id: None,
                depth: 0,
                path_cost: 0.0,
                heuristic_value: 0.0,
                is_error: false,
                visited: false,
            };
            queue.push(state_node);
        }

        // 开始搜索
        while !queue.is_empty() {
            let current_node = queue.remove(0);
            if visited.contains(&current_node.id) {
                continue;
            }
            visited.insert(current_node.id);

            // 检查状态是否违反属性
            if self.violates_property(&current_node.state, spec) {
                return Ok(CheckResult::PropertyViolated);
            }

            // 检查深度限制
            if current_node.depth >= self.config.max_depth {
                continue;
            }

            // 获取后继状态
            let successors = self.get_successor_states(&current_node.state);

            for successor_state in successors {
                let successor_node = StateNode {
                    id: self.generate_state_id(),
                    state: successor_state,
                    parent_id: Some(current_node.id),
                    depth: current_node.depth + 1,
                    path_cost: current_node.path_cost + 1.0,
                    heuristic_value: 0.0,
                    is_error: false,
                    visited: false,
                };
                queue.push(successor_node);
            }

            // 更新统计信息
            self.stats.visited_states += 1;
            self.stats.max_depth = self.stats.max_depth.max(current_node.depth);
        }

        Ok(CheckResult::PropertyHolds)
    }

    /// 启发式搜索
    fn heuristic_search(&mut self, spec: &TemporalLogicFormula) -> Result<CheckResult, &'static str> {
        // 初始化队列（简化为 FIFO）
        let mut queue = alloc::collections::VecDeque::new();
        let mut visited = HashSet::with_hasher(DefaultHasherBuilder);

        // 添加初始状态
        for initial_state in &self.transition_system.initial_states {
            let state_node = StateNode {
                id: self.generate_state_id(),
                state: initial_state.clone(),
                parent_id: None,
                depth: 0,
                path_cost: 0.0,
                heuristic_value: self.calculate_heuristic(initial_state, spec),
                is_error: false,
                visited: false,
            };

            queue.push_back(state_node);
        }

        // 开始搜索
        while let Some(current_node) = queue.pop_front() {
            if visited.contains(&current_node.id) {
                continue;
            }
            visited.insert(current_node.id);

            // 检查状态是否违反属性
            if self.violates_property(&current_node.state, spec) {
                return Ok(CheckResult::PropertyViolated);
            }

            // 检查深度限制
            if current_node.depth >= self.config.max_depth {
                continue;
            }

            // 获取后继状态
            let successors = self.get_successor_states(&current_node.state);

            for successor_state in successors {
                let successor_node = StateNode {
                    id: self.generate_state_id(),
                    state: successor_state.clone(),
                    parent_id: Some(current_node.id),
                    depth: current_node.depth + 1,
                    path_cost: current_node.path_cost + 1.0,
                    heuristic_value: self.calculate_heuristic(&successor_state, spec),
                    is_error: false,
                    visited: false,
                };
                queue.push_back(successor_node);
            }

            // 更新统计信息
            self.stats.visited_states += 1;
            self.stats.max_depth = self.stats.max_depth.max(current_node.depth);
        }

        Ok(CheckResult::PropertyHolds)
    }

    /// 有界模型检查
    fn bounded_model_checking(&mut self, spec: &TemporalLogicFormula) -> Result<CheckResult, &'static str> {
        // 实现有界模型检查算法
        // 这里简化为有限深度的搜索
        let max_bound = 10; // 简化的界限

        for bound in 1..=max_bound {
            self.config.max_depth = bound;
            match self.depth_first_search(spec) {
                Ok(CheckResult::PropertyViolated) => return Ok(CheckResult::PropertyViolated),
                Ok(CheckResult::PropertyHolds) => continue,
                Ok(result) => return Ok(result),
                Err(e) => return Err(e),
            }
        }

        Ok(CheckResult::Inconclusive)
    }

    /// 符号模型检查
    fn symbolic_model_checking(&mut self, _spec: &TemporalLogicFormula) -> Result<CheckResult, &'static str> {
        // 符号模型检查的简化实现
        // 在实际实现中会使用BDD或其他符号表示
        Ok(CheckResult::Inconclusive)
    }

    /// 构建状态空间
    fn build_state_space(&mut self, targets: &[VerificationTarget]) -> Result<(), &'static str> {
        // 简化的状态空间构建
        // 在实际实现中会从代码中提取状态和转移

        // 添加一些示例变量
        self.transition_system.variables.push(SystemVariable {
            name: "counter".to_string(),
            var_type: VariableType::Integer,
            initial_value: "0".to_string(),
            domain: ValueDomain {
                domain_type: "integer".to_string(),
                min_value: Some(0),
                max_value: Some(100),
                enum_values: Vec::new(),
                array_size: None,
            },
            is_global: true,
        });

        // 添加初始状态
        let initial_state = SystemState {
            processor_state: ProcessorState {
                registers: BTreeMap::new(),
                program_counter: 0,
                processor_mode: ProcessorMode::User,
                interrupt_state: InterruptState {
                    enabled: true,
                    current_level: 0,
                    pending_interrupts: 0,
                },
            },
            memory_state: MemoryState {
                memory_layout: BTreeMap::new(),
                heap_state: HeapState {
                    allocated_blocks: Vec::new(),
                    free_blocks: Vec::new(),
                    total_size: 0,
                    used_size: 0,
                },
                stack_state: StackState {
                    stack_frames: Vec::new(),
                    stack_pointer: 0,
                    base_pointer: 0,
                    stack_size: 0,
                },
                global_state: BTreeMap::new(),
            },
            filesystem_state: FileSystemState {
                open_files: BTreeMap::new(),
                mount_points: Vec::new(),
                current_directory: "/".to_string(),
                fs_type: "ext4".to_string(),
            },
            network_state: NetworkState {
                active_connections: Vec::new(),
                listening_ports: Vec::new(),
                interfaces: Vec::new(),
                routing_table: BTreeMap::new(),
            },
            process_state: ProcessState {
                process_id: 1,
                parent_id: 0,
                state: "running".to_string(),
                priority: 10,
                threads: vec![1],
                open_files: Vec::new(),
                memory_mappings: Vec::new(),
            },
        };

        self.transition_system.initial_states.push(initial_state);
        Ok(())
    }

    /// 获取后继状态
    fn get_successor_states(&self, current_state: &SystemState) -> Vec<SystemState> {
        let mut successors = Vec::new();

        // 简化的后继状态生成
        // 在实际实现中会根据转移关系生成所有可能的后继状态

        // 示例：生成一个简单的后继状态
        let mut successor = current_state.clone();
        successor.processor_state.program_counter += 1;

        successors.push(successor);

        successors
    }

    /// 检查状态是否违反属性
    fn violates_property(&self, state: &SystemState, spec: &TemporalLogicFormula) -> bool {
        match &spec.expression {
            LogicExpression::Atomic(prop) => {
                // 简化的原子命题评估
                self.evaluate_atomic_proposition(state, prop)
            }
            LogicExpression::Not(expr) => {
                !self.violates_property(state, &TemporalLogicFormula {
                    id: 0,
                    name: "temp".to_string(),
                    formula_type: spec.formula_type,
                    expression: (**expr).clone(),
                    description: "".to_string(),
                    verification_status: VerificationStatus::NotStarted,
                })
            }
            LogicExpression::And(left, right) => {
                self.violates_property(state, &TemporalLogicFormula {
                    id: 0,
                    name: "temp".to_string(),
                    formula_type: spec.formula_type,
                    expression: (**left).clone(),
                    description: "".to_string(),
                    verification_status: VerificationStatus::NotStarted,
                }) ||
                self.violates_property(state, &TemporalLogicFormula {
                    id: 0,
                    name: "temp".to_string(),
                    formula_type: spec.formula_type,
                    expression: (**right).clone(),
                    description: "".to_string(),
                    verification_status: VerificationStatus::NotStarted,
                })
            }
            _ => {
                // 其他逻辑表达式的简化处理
                false
            }
        }
    }

    /// 评估原子命题
    fn evaluate_atomic_proposition(&self, state: &SystemState, proposition: &str) -> bool {
        // 简化的原子命题评估
        if proposition.contains("error") {
            return false;
        }
        if proposition.contains("valid") {
            return true;
        }

        // 默认返回false
        false
    }

    /// 计算启发式值
    fn calculate_heuristic(&self, _state: &SystemState, _spec: &TemporalLogicFormula) -> f64 {
        // 简化的启发式函数
        0.0
    }

    /// 生成状态ID
    fn generate_state_id(&self) -> u64 {
        // 简化的状态ID生成
        use core::sync::atomic::{AtomicU64, Ordering};
        static STATE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);
        STATE_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    /// 转换为通用验证结果
    fn convert_to_verification_result(&self, model_result: &ModelCheckingResult) -> VerificationResult {
        let status = match model_result.result {
            CheckResult::PropertyHolds => VerificationStatus::Verified,
            CheckResult::PropertyViolated => VerificationStatus::Failed,
            CheckResult::Inconclusive => VerificationStatus::InternalError,
            CheckResult::Timeout => VerificationStatus::Timeout,
            CheckResult::OutOfMemory => VerificationStatus::OutOfMemory,
            CheckResult::InternalError => VerificationStatus::InternalError,
        };

        VerificationResult {
            id: model_result.id,
            status,
            severity: VerificationSeverity::Info,
            message: format!("Model checking result: {:?}", model_result.result),
            proof_object: None,
            counterexample: None,
            verification_time_ms: model_result.checking_time_ms,
            memory_used: model_result.states_explored,
            statistics: VerificationStatistics {
                states_checked: model_result.states_explored,
                paths_explored: model_result.states_explored,
                lemmas_proved: 0,
                bugs_found: if matches!(model_result.result, CheckResult::PropertyViolated) { 1 } else { 0 },
                properties_verified: 1,
                rules_applied: 0,
                max_depth: model_result.max_depth_reached,
                branching_factor: 1.0,
            },
            metadata: BTreeMap::new(),
        }
    }

    /// 获取统计信息
    pub fn get_statistics(&self) -> ModelCheckingStats {
        self.stats.clone()
    }

    /// 重置统计信息
    pub fn reset_statistics(&mut self) {
        self.stats = ModelCheckingStats::default();
    }

    /// 停止模型检查器
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        self.running.store(false, Ordering::SeqCst);
        crate::println!("[ModelChecker] Model checker shutdown successfully");
        Ok(())
    }
}

impl StateSpace {
    /// 创建新的状态空间
    pub fn new() -> Self {
        Self {
            visited_states: HashMap::with_hasher(DefaultHasherBuilder),
            pending_states: Vec::new(),
            initial_states: Vec::new(),
            error_states: Vec::new(),
            transitions: HashMap::with_hasher(DefaultHasherBuilder),
            state_hashes: HashMap::with_hasher(DefaultHasherBuilder),
        }
    }
}

impl TransitionSystem {
    /// 创建新的转移系统
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            initial_states: Vec::new(),
            transitions: Vec::new(),
            atomic_propositions: Vec::new(),
            invariants: Vec::new(),
        }
    }
}

/// 创建默认的模型检查器
pub fn create_model_checker() -> Arc<Mutex<ModelChecker>> {
    Arc::new(Mutex::new(ModelChecker::new()))
}
