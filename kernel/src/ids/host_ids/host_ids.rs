/// Host Intrusion Detection System (HIDS)

extern crate alloc;

/// 主机入侵检测系统模块
/// 负责检测主机系统中的恶意活动和攻击模式

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::format;
use alloc::string::String;
use core::sync::atomic::Ordering;
use spin::Mutex;

use crate::types::Process;
use crate::security::audit::{AuditEvent, AuditEventType, AuditSeverity};
use super::super::{
    IntrusionDetection, DetectionType, ThreatLevel, DetectionSource, TargetInfo,
    AttackInfo, Evidence, ResponseAction, HostIdsConfig
};

/// 主机入侵检测系统
pub struct HostIds {
    /// 系统ID
    pub id: u64,
    /// 配置
    config: HostIdsConfig,
    /// 系统调用监控器
    syscall_monitor: Arc<Mutex<SyscallMonitor>>,
    /// 文件系统监控器
    file_monitor: Arc<Mutex<FileMonitor>>,
    /// 进程监控器
    process_monitor: Arc<Mutex<ProcessMonitor>>,
    /// 注册表监控器
    registry_monitor: Arc<Mutex<RegistryMonitor>>,
    /// 网络连接监控器
    network_monitor: Arc<Mutex<NetworkMonitor>>,
    /// 用户活动监控器
    user_monitor: Arc<Mutex<UserMonitor>>,
    /// 完整性检查器
    integrity_checker: Arc<Mutex<IntegrityChecker>>,
    /// 恶意软件扫描器
    malware_scanner: Arc<Mutex<MalwareScanner>>,
    /// 统计信息
    stats: Arc<Mutex<HostIdsStats>>,
}

/// 系统调用监控器
pub struct SyscallMonitor {
    /// 监控的系统调用
    monitored_syscalls: Vec<u32>,
    /// 系统调用统计
    syscall_stats: BTreeMap<u32, SyscallStats>,
    /// 异常检测器
    anomaly_detector: SyscallAnomalyDetector,
    /// 调用链跟踪器
    call_tracer: CallTracer,
}

/// 文件系统监控器
pub struct FileMonitor {
    /// 监控的路径
    monitored_paths: Vec<String>,
    /// 文件事件历史
    file_events: Vec<FileEvent>,
    /// 敏感文件列表
    sensitive_files: BTreeMap<String, SensitivityLevel>,
    /// 变化检测器
    change_detector: ChangeDetector,
}

/// 进程监控器
pub struct ProcessMonitor {
    /// 活跃进程
    active_processes: BTreeMap<u64, ProcessInfo>,
    /// 进程树
    process_tree: ProcessTree,
    /// 异常行为检测器
    behavior_detector: ProcessBehaviorDetector,
    /// 特权监控器
    privilege_monitor: PrivilegeMonitor,
}

/// 注册表监控器
pub struct RegistryMonitor {
    /// 监控的注册表项
    monitored_keys: Vec<String>,
    /// 注册表变化历史
    registry_changes: Vec<RegistryChange>,
    /// 启动项监控器
    startup_monitor: StartupMonitor,
}

/// 网络连接监控器
pub struct NetworkMonitor {
    /// 活跃连接
    active_connections: Vec<NetworkConnection>,
    /// 连接统计
    connection_stats: ConnectionStats,
    /// 异常连接检测器
    anomaly_detector: NetworkAnomalyDetector,
}

/// 用户活动监控器
pub struct UserMonitor {
    /// 用户会话
    user_sessions: BTreeMap<u32, UserSession>,
    /// 登录历史
    login_history: Vec<LoginEvent>,
    /// 异常行为检测器
    behavior_analyzer: UserBehaviorAnalyzer,
}

/// 完整性检查器
pub struct IntegrityChecker {
    /// 文件哈希
    file_hashes: BTreeMap<String, FileHash>,
    /// 完整性基线
    baseline: IntegrityBaseline,
    /// 检查调度器
    check_scheduler: CheckScheduler,
}

/// 恶意软件扫描器
pub struct MalwareScanner {
    /// 病毒特征库
    virus_signatures: BTreeMap<String, VirusSignature>,
    /// 启发式引擎
    heuristic_engine: HeuristicEngine,
    /// 行为分析器
    behavior_analyzer: MalwareBehaviorAnalyzer,
}

/// 系统调用统计
#[derive(Debug, Clone, Default)]
pub struct SyscallStats {
    /// 调用次数
    pub call_count: u64,
    /// 异常调用次数
    pub anomaly_count: u64,
    /// 最后调用时间
    pub last_call: u64,
    /// 平均参数大小
    pub avg_arg_size: f64,
}

/// 系统调用异常检测器
pub struct SyscallAnomalyDetector {
    /// 异常模型
    models: BTreeMap<u32, SyscallAnomalyModel>,
    /// 阈值设置
    thresholds: SyscallThresholds,
}

/// 系统调用异常模型
#[derive(Debug, Clone)]
pub struct SyscallAnomalyModel {
    /// 系统调用号
    pub syscall_number: u32,
    /// 正常频率
    pub normal_frequency: f64,
    /// 正常参数模式
    pub normal_arg_patterns: Vec<ArgPattern>,
    /// 异常分数阈值
    pub anomaly_threshold: f64,
}

/// 参数模式
#[derive(Debug, Clone)]
pub struct ArgPattern {
    /// 参数索引
    pub arg_index: usize,
    /// 模式类型
    pub pattern_type: ArgPatternType,
    /// 模式值
    pub pattern_value: String,
}

/// 参数模式类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgPatternType {
    /// 字符串
    String,
    /// 整数
    Integer,
    /// 文件路径
    FilePath,
    /// 网络地址
    NetworkAddress,
}

/// 系统调用阈值
#[derive(Debug, Clone)]
pub struct SyscallThresholds {
    /// 频率异常阈值
    pub frequency_threshold: f64,
    /// 参数大小异常阈值
    pub arg_size_threshold: usize,
    /// 时间间隔异常阈值
    pub time_interval_threshold: u64,
}

/// 调用链跟踪器
pub struct CallTracer {
    /// 调用栈
    call_stack: Vec<CallFrame>,
    /// 调用链历史
    call_chains: Vec<CallChain>,
    /// 最大栈深度
    pub max_stack_depth: usize,
}

/// 调用帧
#[derive(Debug, Clone)]
pub struct CallFrame {
    /// 系统调用号
    pub syscall_number: u32,
    /// 进程ID
    pub pid: u64,
    /// 返回地址
    pub return_address: u64,
    /// 参数
    pub arguments: Vec<SyscallArg>,
    /// 时间戳
    pub timestamp: u64,
}

/// 系统调用参数
#[derive(Debug, Clone)]
pub struct SyscallArg {
    /// 参数类型
    pub arg_type: SyscallArgType,
    /// 参数值
    pub value: Vec<u8>,
    /// 参数大小
    pub size: usize,
}

/// 系统调用参数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyscallArgType {
    /// 整数
    Integer,
    /// 字符串
    String,
    /// 指针
    Pointer,
    /// 缓冲区
    Buffer,
    /// 文件描述符
    FileDescriptor,
    /// 结构体
    Struct,
}

/// 调用链
#[derive(Debug, Clone)]
pub struct CallChain {
    /// 链ID
    pub chain_id: u64,
    /// 调用帧序列
    pub call_frames: Vec<CallFrame>,
    /// 链类型
    pub chain_type: CallChainType,
    /// 开始时间
    pub start_time: u64,
    /// 结束时间
    pub end_time: u64,
}

/// 调用链类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallChainType {
    /// 正常调用
    Normal,
    /// 异常调用
    Anomalous,
    /// 恶意调用
    Malicious,
    /// 系统调用
    System,
}

/// 文件事件
#[derive(Debug, Clone)]
pub struct FileEvent {
    /// 事件ID
    pub id: u64,
    /// 事件类型
    pub event_type: FileEventType,
    /// 文件路径
    pub file_path: String,
    /// 进程ID
    pub pid: u64,
    /// 用户ID
    pub uid: u32,
    /// 时间戳
    pub timestamp: u64,
    /// 事件详情
    pub details: FileEventDetails,
}

/// 文件事件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEventType {
    /// 创建
    Create,
    /// 读取
    Read,
    /// 写入
    Write,
    /// 删除
    Delete,
    /// 重命名
    Rename,
    /// 权限变更
    PermissionChange,
    /// 属性变更
    AttributeChange,
    /// 执行
    Execute,
}

/// 文件事件详情
#[derive(Debug, Clone)]
pub struct FileEventDetails {
    /// 旧路径（重命名时）
    pub old_path: Option<String>,
    /// 新路径（重命名时）
    pub new_path: Option<String>,
    /// 旧权限
    pub old_permissions: Option<u32>,
    /// 新权限
    pub new_permissions: Option<u32>,
    /// 文件大小
    pub file_size: Option<u64>,
    /// 文件哈希
    pub file_hash: Option<String>,
}

/// 敏感级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SensitivityLevel {
    /// 公开
    Public,
    /// 内部
    Internal,
    /// 机密
    Confidential,
    /// 绝密
    Secret,
    /// 顶级机密
    TopSecret,
}

/// 变化检测器
pub struct ChangeDetector {
    /// 文件变化历史
    change_history: BTreeMap<String, Vec<FileChange>>,
    /// 检测模式
    pub detection_mode: ChangeDetectionMode,
    /// 忽略模式
    pub ignore_patterns: Vec<String>,
}

/// 变化检测模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDetectionMode {
    /// 内容比较
    Content,
    /// 元数据比较
    Metadata,
    /// 哈希比较
    Hash,
    /// 完整比较
    Full,
}

/// 文件变化
#[derive(Debug, Clone)]
pub struct FileChange {
    /// 变化时间
    pub timestamp: u64,
    /// 变化类型
    pub change_type: FileChangeType,
    /// 变化内容
    pub content: String,
}

/// 文件变化类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChangeType {
    /// 内容变化
    Content,
    /// 权限变化
    Permission,
    /// 所有者变化
    Owner,
    /// 时间戳变化
    Timestamp,
    /// 大小变化
    Size,
}

/// 进程信息
#[derive(Debug, Clone)]
pub struct ProcessInfo {
    /// 进程ID
    pub pid: u64,
    /// 父进程ID
    pub parent_pid: u64,
    /// 进程名称
    pub name: String,
    /// 可执行文件路径
    pub executable_path: String,
    /// 命令行参数
    pub command_line: String,
    /// 环境变量
    pub environment: BTreeMap<String, String>,
    /// 工作目录
    pub working_dir: String,
    /// 用户ID
    pub uid: u32,
    /// 组ID
    pub gid: u32,
    /// 进程状态
    pub status: ProcessStatus,
    /// 创建时间
    pub created_at: u64,
    /// CPU时间
    pub cpu_time: u64,
    /// 内存使用
    pub memory_usage: u64,
    /// 打开的文件
    pub open_files: Vec<String>,
    /// 网络连接
    pub network_connections: Vec<NetworkConnection>,
}

/// 进程状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    /// 运行中
    Running,
    /// 睡眠
    Sleeping,
    /// 停止
    Stopped,
    /// 僵尸进程
    Zombie,
    /// 已终止
    Terminated,
}

/// 进程树
pub struct ProcessTree {
    /// 根进程
    pub root_processes: Vec<u64>,
    /// 进程关系
    parent_child_map: BTreeMap<u64, Vec<u64>>,
    /// 进程信息
    process_info: BTreeMap<u64, ProcessInfo>,
}

/// 进程行为检测器
pub struct ProcessBehaviorDetector {
    /// 行为模型
    behavior_models: BTreeMap<String, ProcessBehaviorModel>,
    /// 异常阈值
    anomaly_thresholds: ProcessAnomalyThresholds,
}

/// 进程行为模型
#[derive(Debug, Clone)]
pub struct ProcessBehaviorModel {
    /// 模型名称
    pub model_name: String,
    /// 正常行为模式
    pub normal_patterns: Vec<BehaviorPattern>,
    /// 异常阈值
    pub anomaly_threshold: f64,
}

/// 行为模式
#[derive(Debug, Clone)]
pub struct BehaviorPattern {
    /// 模式类型
    pub pattern_type: BehaviorPatternType,
    /// 模式权重
    pub weight: f64,
    /// 模式条件
    pub conditions: Vec<BehaviorCondition>,
}

/// 行为模式类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorPatternType {
    /// 系统调用模式
    SyscallPattern,
    /// 文件访问模式
    FileAccessPattern,
    /// 网络行为模式
    NetworkBehaviorPattern,
    /// 资源使用模式
    ResourceUsagePattern,
}

/// 行为条件
#[derive(Debug, Clone)]
pub struct BehaviorCondition {
    /// 条件表达式
    pub expression: String,
    /// 条件操作符
    pub operator: ConditionOperator,
    /// 期望值
    pub expected_value: String,
}

/// 条件操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOperator {
    /// 等于
    Equals,
    /// 不等于
    NotEquals,
    /// 大于
    GreaterThan,
    /// 小于
    LessThan,
    /// 包含
    Contains,
    /// 正则匹配
    Regex,
}

/// 进程异常阈值
#[derive(Debug, Clone)]
pub struct ProcessAnomalyThresholds {
    /// CPU使用率阈值
    pub cpu_threshold: f64,
    /// 内存使用率阈值
    pub memory_threshold: f64,
    /// 文件描述符数量阈值
    pub fd_threshold: u32,
    /// 网络连接数阈值
    pub connection_threshold: u32,
    /// 子进程数阈值
    pub child_process_threshold: u32,
}

/// 特权监控器
pub struct PrivilegeMonitor {
    /// 特权提升事件
    privilege_escalations: Vec<PrivilegeEscalation>,
    /// 特权模型
    privilege_model: PrivilegeModel,
    /// 监控规则
    monitor_rules: Vec<PrivilegeRule>,
}

/// 特权提升事件
#[derive(Debug, Clone)]
pub struct PrivilegeEscalation {
    /// 事件ID
    pub id: u64,
    /// 进程ID
    pub pid: u64,
    /// 原始UID
    pub original_uid: u32,
    /// 提升后UID
    pub escalated_uid: u32,
    /// 提升方法
    pub escalation_method: EscalationMethod,
    /// 时间戳
    pub timestamp: u64,
    /// 相关证据
    pub evidence: Vec<Evidence>,
}

/// 特权提升方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationMethod {
    /// setuid
    Setuid,
    /// sudo
    Sudo,
    /// su
    Su,
    /// 内核漏洞
    KernelExploit,
    /// 配置错误
    Misconfiguration,
}

/// 特权模型
pub struct PrivilegeModel {
    /// 用户权限
    user_privileges: BTreeMap<u32, UserPrivileges>,
    /// 组权限
    group_privileges: BTreeMap<u32, GroupPrivileges>,
    /// 能力列表
    capabilities: BTreeMap<u32, Vec<String>>,
}

/// 用户权限
#[derive(Debug, Clone)]
pub struct UserPrivileges {
    /// 用户ID
    pub uid: u32,
    /// 用户名
    pub username: String,
    /// 权限列表
    pub permissions: Vec<String>,
    /// 是否为root
    pub is_root: bool,
}

/// 组权限
#[derive(Debug, Clone)]
pub struct GroupPrivileges {
    /// 组ID
    pub gid: u32,
    /// 组名
    pub groupname: String,
    /// 权限列表
    pub permissions: Vec<String>,
}

/// 特权规则
#[derive(Debug, Clone)]
pub struct PrivilegeRule {
    /// 规则ID
    pub id: u64,
    /// 规则名称
    pub name: String,
    /// 规则条件
    pub conditions: Vec<PrivilegeCondition>,
    /// 动作
    pub actions: Vec<PrivilegeAction>,
    /// 严重性
    pub severity: ThreatLevel,
}

/// 特权条件
#[derive(Debug, Clone)]
pub enum PrivilegeCondition {
    /// UID条件
    Uid(PrivilegeUidCondition),
    /// GID条件
    Gid(PrivilegeGidCondition),
    /// 进程名条件
    ProcessName(String),
    /// 可执行文件条件
    Executable(String),
    /// 组合条件
    And(Vec<PrivilegeCondition>),
    /// 或条件
    Or(Vec<PrivilegeCondition>),
}

/// UID条件
#[derive(Debug, Clone)]
pub struct PrivilegeUidCondition {
    /// 操作符
    pub operator: ComparisonOperator,
    /// UID值
    pub uid: u32,
}

/// GID条件
#[derive(Debug, Clone)]
pub struct PrivilegeGidCondition {
    /// 操作符
    pub operator: ComparisonOperator,
    /// GID值
    pub gid: u32,
}

/// 特权动作
#[derive(Debug, Clone)]
pub enum PrivilegeAction {
    /// 记录日志
    Log(String),
    /// 告警
    Alert(String),
    /// 阻止
    Block,
    /// 终止进程
    Terminate,
    /// 重置权限
    Reset,
}

/// 比较操作符（复用）
use crate::ids::network_ids::ComparisonOperator;

/// 注册表变化
#[derive(Debug, Clone)]
pub struct RegistryChange {
    /// 变化ID
    pub id: u64,
    /// 注册表项
    pub key_path: String,
    /// 变化类型
    pub change_type: RegistryChangeType,
    /// 旧值
    pub old_value: Option<String>,
    /// 新值
    pub new_value: Option<String>,
    /// 进程ID
    pub pid: u64,
    /// 时间戳
    pub timestamp: u64,
}

/// 注册表变化类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryChangeType {
    /// 创建键
    CreateKey,
    /// 删除键
    DeleteKey,
    /// 设置值
    SetValue,
    /// 删除值
    DeleteValue,
    /// 重命名
    Rename,
}

/// 启动项监控器
pub struct StartupMonitor {
    /// 监控的启动项
    monitored_items: Vec<StartupItem>,
    /// 启动项变化历史
    startup_changes: Vec<StartupChange>,
}

/// 启动项
#[derive(Debug, Clone)]
pub struct StartupItem {
    /// 项路径
    pub item_path: String,
    /// 项类型
    pub item_type: StartupItemType,
    /// 敏感级别
    pub sensitivity: SensitivityLevel,
    /// 监控选项
    pub monitor_options: MonitorOptions,
}

/// 启动项类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupItemType {
    /// 注册表项
    Registry,
    /// 服务
    Service,
    /// 驱动程序
    Driver,
    /// 计划任务
    ScheduledTask,
    /// 启动脚本
    StartupScript,
}

/// 监控选项
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// 监控值变化
    pub monitor_value_changes: bool,
    /// 监控权限变化
    pub monitor_permission_changes: bool,
    /// 监控创建/删除
    pub monitor_creation_deletion: bool,
}

/// 启动项变化
#[derive(Debug, Clone)]
pub struct StartupChange {
    /// 变化ID
    pub id: u64,
    /// 变化时间
    pub timestamp: u64,
    /// 变化详情
    pub details: String,
    /// 严重程度
    pub severity: ThreatLevel,
}

/// 网络连接
#[derive(Debug, Clone)]
pub struct NetworkConnection {
    /// 连接ID
    pub connection_id: u64,
    /// 协议
    pub protocol: String,
    /// 本地地址
    pub local_address: String,
    /// 本地端口
    pub local_port: u16,
    /// 远程地址
    pub remote_address: String,
    /// 远程端口
    pub remote_port: u16,
    /// 连接状态
    pub state: ConnectionState,
    /// 进程ID
    pub pid: u64,
    /// 创建时间
    pub created_at: u64,
    /// 最后活动时间
    pub last_activity: u64,
    /// 字节传输数
    pub bytes_transferred: u64,
}

/// 连接状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// 已建立
    Established,
    /// 监听中
    Listening,
    /// 连接中
    Connecting,
    /// 已关闭
    Closed,
    /// 超时
    Timeout,
}

/// 连接统计
#[derive(Debug, Clone, Default)]
pub struct ConnectionStats {
    /// 总连接数
    pub total_connections: u64,
    /// 活跃连接数
    pub active_connections: u64,
    /// 按协议统计
    pub connections_by_protocol: BTreeMap<String, u64>,
    /// 按状态统计
    pub connections_by_state: BTreeMap<ConnectionState, u64>,
    /// 平均连接时长
    pub avg_connection_duration: u64,
}

/// 网络异常检测器
pub struct NetworkAnomalyDetector {
    /// 异常模型
    models: Vec<NetworkAnomalyModel>,
    /// 检测阈值
    pub thresholds: NetworkAnomalyThresholds,
}

/// 网络异常模型
#[derive(Debug, Clone)]
pub struct NetworkAnomalyModel {
    /// 模型ID
    pub model_id: u64,
    /// 模型类型
    pub model_type: NetworkModelType,
    /// 模型参数
    pub parameters: BTreeMap<String, f64>,
    /// 训练数据
    pub training_data: Vec<NetworkConnection>,
}

/// 网络模型类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkModelType {
    /// 连接模式
    ConnectionPattern,
    /// 流量模式
    TrafficPattern,
    /// 端口扫描
    PortScanning,
    /// 数据传输模式
    DataTransferPattern,
}

/// 网络异常阈值
#[derive(Debug, Clone)]
pub struct NetworkAnomalyThresholds {
    /// 连接频率阈值
    pub connection_frequency_threshold: f64,
    /// 异常端口阈值
    pub unusual_port_threshold: u16,
    /// 数据量异常阈值
    pub data_volume_threshold: u64,
    /// 连接时长异常阈值
    pub duration_threshold: u64,
}

/// 用户会话
#[derive(Debug, Clone)]
pub struct UserSession {
    /// 会话ID
    pub session_id: u64,
    /// 用户ID
    pub uid: u32,
    /// 用户名
    pub username: String,
    /// 登录时间
    pub login_time: u64,
    /// 最后活动时间
    pub last_activity: u64,
    /// 会话类型
    pub session_type: SessionType,
    /// 来源地址
    pub source_address: String,
    /// 会话状态
    pub session_state: SessionState,
}

/// 会话类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionType {
    /// 本地登录
    Local,
    /// 远程登录
    Remote,
    /// 网络服务
    NetworkService,
    /// 后台服务
    Background,
}

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 活动
    Active,
    /// 空闲
    Idle,
    /// 锁定
    Locked,
    /// 已断开
    Disconnected,
}

/// 登录事件
#[derive(Debug, Clone)]
pub struct LoginEvent {
    /// 事件ID
    pub id: u64,
    /// 登录类型
    pub login_type: LoginType,
    /// 用户ID
    pub uid: u32,
    /// 用户名
    pub username: String,
    /// 来源地址
    pub source_address: String,
    /// 登录结果
    pub login_result: LoginResult,
    /// 时间戳
    pub timestamp: u64,
    /// 附加信息
    pub additional_info: BTreeMap<String, String>,
}

/// 登录类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginType {
    /// 交互式登录
    Interactive,
    /// 网络登录
    Network,
    /// 批处理登录
    Batch,
    /// 服务登录
    Service,
    /// 系统登录
    System,
}

/// 登录结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginResult {
    /// 成功
    Success,
    /// 失败
    Failed,
    /// 被阻止
    Blocked,
    /// 超时
    Timeout,
}

/// 用户行为分析器
pub struct UserBehaviorAnalyzer {
    /// 用户行为模型
    user_models: BTreeMap<u32, UserBehaviorModel>,
    /// 行为模式
    behavior_patterns: Vec<UserBehaviorPattern>,
    /// 异常检测阈值
    pub anomaly_thresholds: UserAnomalyThresholds,
}

/// 用户行为模型
#[derive(Debug, Clone)]
pub struct UserBehaviorModel {
    /// 用户ID
    pub uid: u32,
    /// 用户名
    pub username: String,
    /// 正常活动时间
    pub normal_activity_hours: Vec<u8>,
    /// 常用命令
    pub common_commands: Vec<String>,
    /// 正常访问路径
    pub normal_paths: Vec<String>,
    /// 连接模式
    pub connection_patterns: Vec<ConnectionPattern>,
    /// 模型更新时间
    pub updated_at: u64,
}

/// 用户行为模式
#[derive(Debug, Clone)]
pub struct UserBehaviorPattern {
    /// 模式ID
    pub pattern_id: u64,
    /// 模式名称
    pub pattern_name: String,
    /// 模式类型
    pub pattern_type: UserPatternType,
    /// 模式权重
    pub weight: f64,
    /// 出现频率
    pub frequency: f64,
}

/// 用户模式类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserPatternType {
    /// 命令使用模式
    CommandUsage,
    /// 文件访问模式
    FileAccess,
    /// 网络连接模式
    NetworkConnection,
    /// 时间访问模式
    TimeAccess,
    /// 权限使用模式
    PrivilegeUsage,
}

/// 连接模式
#[derive(Debug, Clone)]
pub struct ConnectionPattern {
    /// 目标地址模式
    pub address_pattern: String,
    /// 端口模式
    pub port_pattern: u16,
    /// 协议模式
    pub protocol: String,
    /// 连接频率
    pub frequency: f64,
    /// 平均时长
    pub avg_duration: u64,
}

/// 用户异常阈值
#[derive(Debug, Clone)]
pub struct UserAnomalyThresholds {
    /// 非工作时间活动阈值
    pub off_hours_activity_threshold: f64,
    /// 异常命令使用阈值
    pub unusual_command_threshold: f64,
    /// 异常路径访问阈值
    pub unusual_path_threshold: f64,
    /// 异常连接模式阈值
    pub unusual_connection_threshold: f64,
}

/// 文件哈希
#[derive(Debug, Clone)]
pub struct FileHash {
    /// 文件路径
    pub file_path: String,
    /// MD5哈希
    pub md5_hash: String,
    /// SHA1哈希
    pub sha1_hash: String,
    /// SHA256哈希
    pub sha256_hash: String,
    /// 计算时间
    pub computed_at: u64,
    /// 文件大小
    pub file_size: u64,
    /// 文件权限
    pub file_permissions: u32,
}

/// 完整性基线
#[derive(Debug, Clone)]
pub struct IntegrityBaseline {
    /// 基线ID
    pub baseline_id: u64,
    /// 创建时间
    pub created_at: u64,
    /// 文件哈希
    pub file_hashes: BTreeMap<String, FileHash>,
    /// 基线版本
    pub baseline_version: String,
    /// 创建者
    pub created_by: String,
}

/// 检查调度器
pub struct CheckScheduler {
    /// 检查任务
    check_tasks: Vec<CheckTask>,
    /// 调度配置
    pub schedule_config: ScheduleConfig,
}

/// 检查任务
#[derive(Debug, Clone)]
pub struct CheckTask {
    /// 任务ID
    pub task_id: u64,
    /// 检查类型
    pub check_type: IntegrityCheckType,
    /// 检查路径
    pub check_path: String,
    /// 检查间隔
    pub check_interval: u64,
    /// 下次检查时间
    pub next_check_time: u64,
    /// 是否启用
    pub enabled: bool,
}

/// 完整性检查类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityCheckType {
    /// 文件哈希检查
    FileHash,
    /// 目录完整性检查
    DirectoryIntegrity,
    /// 权限检查
    PermissionCheck,
    /// 时间戳检查
    TimestampCheck,
    /// 所有者检查
    OwnershipCheck,
}

/// 调度配置
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// 默认检查间隔
    pub default_interval: u64,
    /// 检查时间窗口
    pub check_window: CheckWindow,
}

/// 检查时间窗口
#[derive(Debug, Clone)]
pub struct CheckWindow {
    /// 开始时间
    pub start_time: u64,
    /// 结束时间
    pub end_time: u64,
    /// 允许的检查天数
    pub allowed_days: Vec<u8>, // 0-6 (Sunday-Saturday)
}

/// 病毒特征
#[derive(Debug, Clone)]
pub struct VirusSignature {
    /// 特征ID
    pub signature_id: String,
    /// 病毒名称
    pub virus_name: String,
    /// 病毒家族
    pub virus_family: String,
    /// 特征类型
    pub signature_type: SignatureType,
    /// 特征模式
    pub pattern: String,
    /// 严重程度
    pub severity: ThreatLevel,
    /// 通配符
    pub wildcards: Vec<String>,
    /// 创建时间
    pub created_at: u64,
    /// 更新时间
    pub updated_at: u64,
}

/// 特征类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureType {
    /// 字符串特征
    String,
    /// 字节特征
    Byte,
    /// 正则表达式
    Regex,
    /// 结构特征
    Structural,
    /// 行为特征
    Behavioral,
}

/// 启发式引擎
pub struct HeuristicEngine {
    /// 启发式规则
    rules: Vec<HeuristicRule>,
    /// 评分系统
    scoring_system: HeuristicScoringSystem,
}

/// 启发式规则
#[derive(Debug, Clone)]
pub struct HeuristicRule {
    /// 规则ID
    pub rule_id: u64,
    /// 规则名称
    pub rule_name: String,
    /// 规则描述
    pub description: String,
    /// 规则条件
    pub conditions: Vec<HeuristicCondition>,
    /// 分数权重
    pub score_weight: f64,
    /// 严重性
    pub severity: ThreatLevel,
}

/// 启发式条件
#[derive(Debug, Clone)]
pub struct HeuristicCondition {
    /// 条件类型
    pub condition_type: HeuristicConditionType,
    /// 条件参数
    pub parameters: BTreeMap<String, String>,
    /// 匹配逻辑
    pub match_logic: MatchLogic,
}

/// 启发式条件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicConditionType {
    /// 加壳检测
    PackedExecutable,
    /// 入口点检测
    EntryPoint,
    /// API调用检测
    ApiCall,
    /// 资源使用
    ResourceUsage,
    /// 行为分析
    BehaviorAnalysis,
}

/// 匹配逻辑
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLogic {
    /// 与
    And,
    /// 或
    Or,
    /// 非
    Not,
}

/// 启发式评分系统
pub struct HeuristicScoringSystem {
    /// 评分规则
    pub scoring_rules: BTreeMap<String, ScoringRule>,
    /// 风险级别映射
    pub risk_level_mapping: BTreeMap<u32, ThreatLevel>,
}

/// 评分规则
#[derive(Debug, Clone)]
pub struct ScoringRule {
    /// 规则名称
    pub rule_name: String,
    /// 最小分数
    pub min_score: f64,
    /// 最大分数
    pub max_score: f64,
    /// 分数权重
    pub score_weight: f64,
}

/// 恶意软件行为分析器
pub struct MalwareBehaviorAnalyzer {
    /// 行为模型
    pub behavior_models: BTreeMap<String, MalwareBehaviorModel>,
    /// 行为特征
    pub behavior_features: Vec<BehaviorFeature>,
    /// 分析引擎
    pub analysis_engine: BehaviorAnalysisEngine,
}

/// 恶意软件行为模型
#[derive(Debug, Clone)]
pub struct MalwareBehaviorModel {
    /// 模型ID
    pub model_id: String,
    /// 模型类型
    pub model_type: MalwareModelType,
    /// 行为特征
    pub behavior_features: Vec<BehaviorFeature>,
    /// 分类器参数
    pub classifier_params: BTreeMap<String, f64>,
}

/// 恶意软件模型类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalwareModelType {
    /// 特洛伊木马
    Trojan,
    /// 后门
    Backdoor,
    /// 蠕虫
    Worm,
    /// 病毒
    Virus,
    /// 间谍软件
    Spyware,
    /// 广告软件
    Adware,
    /// 勒索软件
    Ransomware,
}

/// 行为特征
#[derive(Debug, Clone)]
pub struct BehaviorFeature {
    /// 特征ID
    pub feature_id: u64,
    /// 特征名称
    pub feature_name: String,
    /// 特征类型
    pub feature_type: BehaviorFeatureType,
    /// 特征值
    pub feature_value: f64,
    /// 特征权重
    pub feature_weight: f64,
}

/// 行为特征类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorFeatureType {
    /// 文件系统活动
    FileActivity,
    /// 网络活动
    NetworkActivity,
    /// 进程创建
    ProcessCreation,
    /// 注册表修改
    RegistryModification,
    /// 内存操作
    MemoryOperation,
    /// API调用
    ApiCall,
    /// 系统调用
    Syscall,
}

/// 行为分析引擎
pub struct BehaviorAnalysisEngine {
    /// 分析算法
    pub analysis_algorithms: Vec<AnalysisAlgorithm>,
    /// 特征提取器
    pub feature_extractor: FeatureExtractor,
    /// 分类器
    pub classifier: BehaviorClassifier,
}

/// 分析算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisAlgorithm {
    /// 随机森林
    IsolationForest,
    /// 支持向量机
    SupportVectorMachine,
    /// 神经网络
    NeuralNetwork,
    /// 决策树
    DecisionTree,
}

/// 特征提取器
pub struct FeatureExtractor {
    /// 提取器配置
    pub extractor_config: ExtractorConfig,
    /// 特征提取函数
    pub extractors: Vec<ExtractorFunction>,
}

/// 提取器配置
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// 提取窗口大小
    pub window_size: usize,
    /// 特征维度
    pub feature_dimension: usize,
    /// 数据预处理
    pub preprocessing: PreprocessingConfig,
}

/// 数据预处理配置
#[derive(Debug, Clone)]
pub struct PreprocessingConfig {
    /// 归一化方法
    pub normalization: NormalizationMethod,
    /// 降维方法
    pub dimensionality_reduction: Option<DimensionalityReduction>,
}

/// 归一化方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationMethod {
    /// Z-score标准化
    ZScore,
    /// Min-Max缩放
    MinMax,
    /// 单位向量
    UnitVector,
}

/// 降维方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionalityReduction {
    /// 主成分分析
    PCA,
    /// 线性判别分析
    LDA,
    /// t-SNE
    TSNE,
    /// 自编码器
    Autoencoder,
}

/// 提取器函数
#[derive(Debug, Clone)]
pub struct ExtractorFunction {
    /// 函数名
    pub function_name: String,
    /// 函数类型
    pub function_type: ExtractorFunctionType,
    /// 函数参数
    pub parameters: BTreeMap<String, String>,
}

/// 提取器函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorFunctionType {
    /// 统计特征
    Statistical,
    /// 频域特征
    Frequency,
    /// 序列特征
    Sequence,
    /// 图特征
    Graph,
    /// 文本特征
    Text,
}

/// 行为分类器
pub struct BehaviorClassifier {
    /// 分类模型
    pub classification_model: ClassificationModel,
    /// 分类阈值
    pub classification_threshold: f64,
    /// 类别标签
    pub class_labels: Vec<String>,
}

/// 分类模型
#[derive(Debug, Clone)]
pub enum ClassificationModel {
    /// 二元分类器
    Binary,
    /// 多类分类器
    MultiClass,
    /// 单分类器
    OneClass,
}

/// 主机入侵检测统计
#[derive(Debug, Clone, Default)]
pub struct HostIdsStats {
    /// 总监控事件数
    pub total_monitored_events: u64,
    /// 系统调用分析数
    pub syscalls_analyzed: u64,
    /// 文件事件数
    pub file_events: u64,
    /// 进程监控数
    pub processes_monitored: u64,
    /// 检测到的异常数
    pub anomalies_detected: u64,
    /// 恶意软件检测数
    pub malware_detected: u64,
    /// 特权提升检测数
    pub privilege_escalations: u64,
    /// 注册表变化数
    pub registry_changes: u64,
    /// 网络连接监控数
    pub network_connections_monitored: u64,
    /// 用户活动监控数
    pub user_activities_monitored: u64,
    /// 完整性检查数
    pub integrity_checks: u64,
    /// 平均处理时间（微秒）
    pub avg_processing_time_us: u64,
    /// 内存使用量
    pub memory_usage_bytes: usize,
}

impl HostIds {
    /// 创建新的主机入侵检测系统
    pub fn new() -> Self {
        Self {
            id: 1,
            config: HostIdsConfig::default(),
            syscall_monitor: Arc::new(Mutex::new(SyscallMonitor::new())),
            file_monitor: Arc::new(Mutex::new(FileMonitor::new())),
            process_monitor: Arc::new(Mutex::new(ProcessMonitor::new())),
            registry_monitor: Arc::new(Mutex::new(RegistryMonitor::new())),
            network_monitor: Arc::new(Mutex::new(NetworkMonitor::new())),
            user_monitor: Arc::new(Mutex::new(UserMonitor::new())),
            integrity_checker: Arc::new(Mutex::new(IntegrityChecker::new())),
            malware_scanner: Arc::new(Mutex::new(MalwareScanner::new())),
            stats: Arc::new(Mutex::new(HostIdsStats::default())),
        }
    }

    /// 初始化主机入侵检测系统
    pub fn init(&mut self, config: &HostIdsConfig) -> Result<(), &'static str> {
        self.config = config.clone();

        // 初始化各个监控器
        self.syscall_monitor.lock().init(&config.monitored_syscalls)?;
        self.file_monitor.lock().init(&config.monitored_paths)?;
        self.process_monitor.lock().init()?;
        self.registry_monitor.lock().init()?;
        self.network_monitor.lock().init(config.monitor_network)?;
        self.user_monitor.lock().init()?;
        self.integrity_checker.lock().init()?;
        self.malware_scanner.lock().init()?;

        crate::println!("[HostIds] Host intrusion detection system initialized");
        Ok(())
    }

    /// 分析系统调用
    pub fn analyze_syscall(&mut self, event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        let start_time = crate::time::timestamp_nanos();

        let detections = self.syscall_monitor.lock().analyze_syscall(event)?;

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.syscalls_analyzed += 1;
            stats.total_monitored_events += 1;

            let elapsed = crate::time::timestamp_nanos() - start_time;
            stats.avg_processing_time_us = (stats.avg_processing_time_us + elapsed / 1000) / 2;
        }

        Ok(detections)
    }

    /// 分析文件事件
    pub fn analyze_file_event(&mut self, event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        let start_time = crate::time::timestamp_nanos();

        let detections = self.file_monitor.lock().analyze_file_event(event)?;

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.file_events += 1;
            stats.total_monitored_events += 1;

            let elapsed = crate::time::timestamp_nanos() - start_time;
            stats.avg_processing_time_us = (stats.avg_processing_time_us + elapsed / 1000) / 2;
        }

        Ok(detections)
    }

    /// 分析进程事件
    pub fn analyze_process_event(&mut self, event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        let start_time = crate::time::timestamp_nanos();

        let detections = self.process_monitor.lock().analyze_process_event(event)?;

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.processes_monitored += 1;
            stats.total_monitored_events += 1;

            let elapsed = crate::time::timestamp_nanos() - start_time;
            stats.avg_processing_time_us = (stats.avg_processing_time_us + elapsed / 1000) / 2;
        }

        Ok(detections)
    }

    /// 分析注册表变化
    pub fn analyze_registry_change(&mut self, event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        let start_time = crate::time::timestamp_nanos();

        let detections = self.registry_monitor.lock().analyze_registry_change(event)?;

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.registry_changes += 1;
            stats.total_monitored_events += 1;

            let elapsed = crate::time::timestamp_nanos() - start_time;
            stats.avg_processing_time_us = (stats.avg_processing_time_us + elapsed / 1000) / 2;
        }

        Ok(detections)
    }

    /// 分析网络连接
    pub fn analyze_network_connection(&mut self, event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        let start_time = crate::time::timestamp_nanos();

        let detections = self.network_monitor.lock().analyze_network_connection(event)?;

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.network_connections_monitored += 1;
            stats.total_monitored_events += 1;

            let elapsed = crate::time::timestamp_nanos() - start_time;
            stats.avg_processing_time_us = (stats.avg_processing_time_us + elapsed / 1000) / 2;
        }

        Ok(detections)
    }

    /// 分析用户活动
    pub fn analyze_user_activity(&mut self, event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        let start_time = crate::time::timestamp_nanos();

        let detections = self.user_monitor.lock().analyze_user_activity(event)?;

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.user_activities_monitored += 1;
            stats.total_monitored_events += 1;

            let elapsed = crate::time::timestamp_nanos() - start_time;
            stats.avg_processing_time_us = (stats.avg_processing_time_us + elapsed / 1000) / 2;
        }

        Ok(detections)
    }

    /// Analyze a generic audit event and dispatch to the correct analyzer.
    /// This makes HostIds usable from higher-level callers that only have an AuditEvent.
    pub fn analyze_event(&mut self, event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        match event.event_type {
            AuditEventType::Syscall => self.analyze_syscall(event),
            AuditEventType::FileAccess => self.analyze_file_event(event),
            AuditEventType::Process => self.analyze_process_event(event),
            AuditEventType::Network => self.analyze_network_connection(event),
            // Map less-common event types to either specific analyzers or fall back to user activity
            AuditEventType::Authentication | AuditEventType::PermissionChange | AuditEventType::Configuration => self.analyze_user_activity(event),
            _ => Ok(Vec::new()),
        }
    }

    /// 执行完整性检查
    pub fn perform_integrity_check(&mut self) -> Result<Vec<IntrusionDetection>, &'static str> {
        let start_time = crate::time::timestamp_nanos();

        let detections = self.integrity_checker.lock().perform_integrity_check()?;

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.integrity_checks += 1;
            stats.total_monitored_events += 1;

            let elapsed = crate::time::timestamp_nanos() - start_time;
            stats.avg_processing_time_us = (stats.avg_processing_time_us + elapsed / 1000) / 2;
        }

        Ok(detections)
    }

    /// 执行恶意软件扫描
    pub fn perform_malware_scan(&mut self) -> Result<Vec<IntrusionDetection>, &'static str> {
        let start_time = crate::time::timestamp_nanos();

        let detections = self.malware_scanner.lock().perform_scan()?;

        // 更新统计
        {
            let mut stats = self.stats.lock();
            stats.malware_detected += detections.len() as u64;
            stats.total_monitored_events += 1;

            let elapsed = crate::time::timestamp_nanos() - start_time;
            stats.avg_processing_time_us = (stats.avg_processing_time_us + elapsed / 1000) / 2;
        }

        Ok(detections)
    }

    /// 获取统计信息
    pub fn get_stats(&self) -> HostIdsStats {
        self.stats.lock().clone()
    }

    /// 重置统计信息
    pub fn reset_stats(&self) {
        *self.stats.lock() = HostIdsStats::default();
    }

    /// 停止主机入侵检测系统
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        crate::println!("[HostIds] Host intrusion detection system shutdown");
        Ok(())
    }
}

// 为其他结构体实现默认特征和必要方法
impl SyscallMonitor {
    pub fn new() -> Self {
        Self::default()
    }
    
    pub fn init(&mut self, _monitored_syscalls: &[u32]) -> Result<(), &'static str> {
        // TODO: 实现初始化逻辑
        Ok(())
    }
    
    pub fn analyze_syscall(&mut self, _event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        // TODO: 实现系统调用分析逻辑
        Ok(Vec::new())
    }
}

impl Default for SyscallMonitor {
    fn default() -> Self {
        Self {
            monitored_syscalls: Vec::new(),
            syscall_stats: BTreeMap::new(),
            anomaly_detector: SyscallAnomalyDetector::default(),
            call_tracer: CallTracer::default(),
        }
    }
}

impl FileMonitor {
    pub fn new() -> Self {
        Self::default()
    }
    
    pub fn init(&mut self, _monitored_paths: &[String]) -> Result<(), &'static str> {
        // TODO: 实现初始化逻辑
        Ok(())
    }
    
    pub fn analyze_file_event(&mut self, _event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        // TODO: 实现文件事件分析逻辑
        Ok(Vec::new())
    }
}

impl Default for FileMonitor {
    fn default() -> Self {
        Self {
            monitored_paths: Vec::new(),
            file_events: Vec::new(),
            sensitive_files: BTreeMap::new(),
            change_detector: ChangeDetector::default(),
        }
    }
}

impl ProcessMonitor {
    pub fn new() -> Self {
        Self::default()
    }
    
    pub fn init(&mut self) -> Result<(), &'static str> {
        // TODO: 实现初始化逻辑
        Ok(())
    }
    
    pub fn analyze_process_event(&mut self, _event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        // TODO: 实现进程事件分析逻辑
        Ok(Vec::new())
    }
}

impl Default for ProcessMonitor {
    fn default() -> Self {
        Self {
            active_processes: BTreeMap::new(),
            process_tree: ProcessTree::default(),
            behavior_detector: ProcessBehaviorDetector::default(),
            privilege_monitor: PrivilegeMonitor::default(),
        }
    }
}

impl RegistryMonitor {
    pub fn new() -> Self {
        Self::default()
    }
    
    pub fn init(&mut self) -> Result<(), &'static str> {
        // TODO: 实现初始化逻辑
        Ok(())
    }
    
    pub fn analyze_registry_change(&mut self, _event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        // TODO: 实现注册表变化分析逻辑
        Ok(Vec::new())
    }
}

impl Default for RegistryMonitor {
    fn default() -> Self {
        Self {
            monitored_keys: Vec::new(),
            registry_changes: Vec::new(),
            startup_monitor: StartupMonitor::default(),
        }
    }
}

impl NetworkMonitor {
    pub fn new() -> Self {
        Self::default()
    }
    
    pub fn init(&mut self, _monitor_network: bool) -> Result<(), &'static str> {
        // TODO: 实现初始化逻辑
        Ok(())
    }
    
    pub fn analyze_network_connection(&mut self, _event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        // TODO: 实现网络连接分析逻辑
        Ok(Vec::new())
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self {
            active_connections: Vec::new(),
            connection_stats: ConnectionStats::default(),
            anomaly_detector: NetworkAnomalyDetector::default(),
        }
    }
}

impl UserMonitor {
    pub fn new() -> Self {
        Self::default()
    }
    
    pub fn init(&mut self) -> Result<(), &'static str> {
        // TODO: 实现初始化逻辑
        Ok(())
    }
    
    pub fn analyze_user_activity(&mut self, _event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        // TODO: 实现用户活动分析逻辑
        Ok(Vec::new())
    }

    pub fn analyze_syscall(&mut self, _event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        // TODO: 实现系统调用分析逻辑
        Ok(Vec::new())
    }

    pub fn analyze_file_event(&mut self, _event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        // TODO: 实现文件事件分析逻辑
        Ok(Vec::new())
    }

    pub fn analyze_process_event(&mut self, _event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        // TODO: 实现进程事件分析逻辑
        Ok(Vec::new())
    }

    pub fn analyze_network_connection(&mut self, _event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        // TODO: 实现网络连接分析逻辑
        Ok(Vec::new())
    }

    /// Analyze a generic audit event and dispatch to the correct analyzer.
    /// This makes HostIds usable from higher-level callers that only have an AuditEvent.
    pub fn analyze_event(&mut self, event: &AuditEvent) -> Result<Vec<IntrusionDetection>, &'static str> {
        match event.event_type {
            AuditEventType::Syscall => self.analyze_syscall(event),
            AuditEventType::FileAccess => self.analyze_file_event(event),
            AuditEventType::Process => self.analyze_process_event(event),
            AuditEventType::Network => self.analyze_network_connection(event),
            // Map less-common event types to either specific analyzers or fall back to user activity
            AuditEventType::Authentication | AuditEventType::PermissionChange | AuditEventType::Configuration => self.analyze_user_activity(event),
            _ => Ok(Vec::new()),
        }
    }
}

impl Default for UserMonitor {
    fn default() -> Self {
        Self {
            user_sessions: BTreeMap::new(),
            login_history: Vec::new(),
            behavior_analyzer: UserBehaviorAnalyzer::default(),
        }
    }
}

impl IntegrityChecker {
    pub fn new() -> Self {
        Self::default()
    }
    
    pub fn init(&mut self) -> Result<(), &'static str> {
        // TODO: 实现初始化逻辑
        Ok(())
    }
    
    pub fn perform_integrity_check(&mut self) -> Result<Vec<IntrusionDetection>, &'static str> {
        // TODO: 实现完整性检查逻辑
        Ok(Vec::new())
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self {
            file_hashes: BTreeMap::new(),
            baseline: IntegrityBaseline {
                baseline_id: 0,
                created_at: 0,
                file_hashes: BTreeMap::new(),
                baseline_version: String::from("1.0"),
                created_by: String::from("System"),
            },
            check_scheduler: CheckScheduler::default(),
        }
    }
}

impl MalwareScanner {
    pub fn new() -> Self {
        Self::default()
    }
    
    pub fn init(&mut self) -> Result<(), &'static str> {
        // TODO: 实现初始化逻辑
        Ok(())
    }
    
    pub fn perform_scan(&mut self) -> Result<Vec<IntrusionDetection>, &'static str> {
        // TODO: 实现恶意软件扫描逻辑
        Ok(Vec::new())
    }
}

impl Default for MalwareScanner {
    fn default() -> Self {
        Self {
            virus_signatures: BTreeMap::new(),
            heuristic_engine: HeuristicEngine::default(),
            behavior_analyzer: MalwareBehaviorAnalyzer::default(),
        }
    }
}

impl SyscallAnomalyDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for SyscallAnomalyDetector {
    fn default() -> Self {
        Self {
            models: BTreeMap::new(),
            thresholds: SyscallThresholds {
                frequency_threshold: 10.0,
                arg_size_threshold: 4096,
                time_interval_threshold: 5000,
            },
        }
    }
}

impl CallTracer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for CallTracer {
    fn default() -> Self {
        Self {
            call_stack: Vec::new(),
            call_chains: Vec::new(),
            max_stack_depth: 64,
        }
    }
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self {
            change_history: BTreeMap::new(),
            detection_mode: ChangeDetectionMode::Hash,
            ignore_patterns: vec![],
        }
    }
}

impl ProcessTree {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ProcessTree {
    fn default() -> Self {
        Self {
            root_processes: Vec::new(),
            parent_child_map: BTreeMap::new(),
            process_info: BTreeMap::new(),
        }
    }
}

impl ProcessBehaviorDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ProcessBehaviorDetector {
    fn default() -> Self {
        Self {
            behavior_models: BTreeMap::new(),
            anomaly_thresholds: ProcessAnomalyThresholds {
                cpu_threshold: 80.0,
                memory_threshold: 85.0,
                fd_threshold: 1024,
                connection_threshold: 100,
                child_process_threshold: 10,
            },
        }
    }
}

impl PrivilegeMonitor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for PrivilegeMonitor {
    fn default() -> Self {
        Self {
            privilege_escalations: Vec::new(),
            privilege_model: PrivilegeModel {
                user_privileges: BTreeMap::new(),
                group_privileges: BTreeMap::new(),
                capabilities: BTreeMap::new(),
            },
            monitor_rules: Vec::new(),
        }
    }
}

impl StartupMonitor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for StartupMonitor {
    fn default() -> Self {
        Self {
            monitored_items: Vec::new(),
            startup_changes: Vec::new(),
        }
    }
}

impl NetworkAnomalyDetector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for NetworkAnomalyDetector {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            thresholds: NetworkAnomalyThresholds {
                connection_frequency_threshold: 100.0,
                unusual_port_threshold: 32768,
                data_volume_threshold: 104857600, // 100MB
                duration_threshold: 300, // 5 minutes
            },
        }
    }
}

impl UserBehaviorAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for UserBehaviorAnalyzer {
    fn default() -> Self {
        Self {
            user_models: BTreeMap::new(),
            behavior_patterns: Vec::new(),
            anomaly_thresholds: UserAnomalyThresholds {
                off_hours_activity_threshold: 0.1,
                unusual_command_threshold: 0.05,
                unusual_path_threshold: 0.05,
                unusual_connection_threshold: 0.1,
            },
        }
    }
}

impl CheckScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for CheckScheduler {
    fn default() -> Self {
        Self {
            check_tasks: Vec::new(),
            schedule_config: ScheduleConfig {
                default_interval: 3600, // 1 hour
                check_window: CheckWindow {
                    start_time: 0,
                    end_time: 86399, // 23:59:59
                    allowed_days: vec![0, 1, 2, 3, 4, 5, 6], // All days
                },
            },
        }
    }
}

impl HeuristicEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            scoring_system: HeuristicScoringSystem {
                scoring_rules: BTreeMap::new(),
                risk_level_mapping: BTreeMap::new(),
            },
        }
    }
}

impl Default for HeuristicScoringSystem {
    fn default() -> Self {
        let mut mapping = BTreeMap::new();
        mapping.insert(0u32, ThreatLevel::Info);
        mapping.insert(30u32, ThreatLevel::Low);
        mapping.insert(50u32, ThreatLevel::Medium);
        mapping.insert(70u32, ThreatLevel::High);
        mapping.insert(90u32, ThreatLevel::Critical);

        Self {
            scoring_rules: BTreeMap::new(),
            risk_level_mapping: mapping,
        }
    }
}

impl Default for MalwareBehaviorAnalyzer {
    fn default() -> Self {
        Self {
            behavior_models: BTreeMap::new(),
            behavior_features: Vec::new(),
            analysis_engine: BehaviorAnalysisEngine {
                analysis_algorithms: vec![
                    AnalysisAlgorithm::IsolationForest,
                    AnalysisAlgorithm::DecisionTree,
                ],
                feature_extractor: FeatureExtractor {
                    extractor_config: ExtractorConfig {
                        window_size: 100,
                        feature_dimension: 256,
                        preprocessing: PreprocessingConfig {
                            normalization: NormalizationMethod::ZScore,
                            dimensionality_reduction: Some(DimensionalityReduction::PCA),
                        },
                    },
                    extractors: Vec::new(),
                },
                classifier: BehaviorClassifier {
                    classification_model: ClassificationModel::MultiClass,
                    classification_threshold: 0.5,
                    class_labels: vec![
                        String::from("Benign"),
                        String::from("Malicious"),
                        String::from("Suspicious"),
                    ],
                },
            },
        }
    }
}

impl Default for BehaviorAnalysisEngine {
    fn default() -> Self {
        Self {
            analysis_algorithms: vec![
                AnalysisAlgorithm::IsolationForest,
                AnalysisAlgorithm::DecisionTree,
            ],
            feature_extractor: FeatureExtractor {
                extractor_config: ExtractorConfig {
                    window_size: 100,
                    feature_dimension: 256,
                    preprocessing: PreprocessingConfig {
                        normalization: NormalizationMethod::ZScore,
                        dimensionality_reduction: Some(DimensionalityReduction::PCA),
                    },
                },
                extractors: Vec::new(),
            },
            classifier: BehaviorClassifier {
                classification_model: ClassificationModel::MultiClass,
                classification_threshold: 0.5,
                class_labels: vec![
                    String::from("Benign"),
                    String::from("Malicious"),
                    String::from("Suspicious"),
                ],
            },
        }
    }
}

impl Default for BehaviorClassifier {
    fn default() -> Self {
        Self {
            classification_model: ClassificationModel::MultiClass,
            classification_threshold: 0.5,
            class_labels: vec![
                String::from("Benign"),
                String::from("Malicious"),
                String::from("Suspicious"),
            ],
        }
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self {
            extractor_config: ExtractorConfig {
                window_size: 100,
                feature_dimension: 256,
                preprocessing: PreprocessingConfig {
                    normalization: NormalizationMethod::ZScore,
                    dimensionality_reduction: Some(DimensionalityReduction::PCA),
                },
            },
            extractors: Vec::new(),
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            window_size: 100,
            feature_dimension: 256,
            preprocessing: PreprocessingConfig {
                normalization: NormalizationMethod::ZScore,
                dimensionality_reduction: Some(DimensionalityReduction::PCA),
            },
        }
    }
}

impl Default for PreprocessingConfig {
    fn default() -> Self {
        Self {
            normalization: NormalizationMethod::ZScore,
            dimensionality_reduction: Some(DimensionalityReduction::PCA),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_interval: 3600,
            check_window: CheckWindow {
                start_time: 0,
                end_time: 86399,
                allowed_days: vec![0, 1, 2, 3, 4, 5, 6],
            },
        }
    }
}

impl Default for CheckWindow {
    fn default() -> Self {
        Self {
            start_time: 0,
            end_time: 86399,
            allowed_days: vec![0, 1, 2, 3, 4, 5, 6],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_ids_creation() {
        let hids = HostIds::new();
        assert_eq!(hids.id, 1);
        assert_eq!(hids.config.enabled, true);
    }

    #[test]
    fn test_file_event() {
        let event = FileEvent {
            id: 1,
            event_type: FileEventType::Create,
            file_path: String::from("/tmp/test.txt"),
            pid: 1234,
            uid: 1000,
            timestamp: 1234567890,
            details: FileEventDetails {
                old_path: None,
                new_path: None,
                old_permissions: None,
                new_permissions: Some(644),
                file_size: Some(1024),
                file_hash: None,
            },
        };

        assert_eq!(event.event_type, FileEventType::Create);
        assert_eq!(event.file_path, "/tmp/test.txt");
        assert_eq!(event.pid, 1234);
    }

    #[test]
    fn test_process_info() {
        let info = ProcessInfo {
            pid: 1234,
            parent_pid: 1,
            name: String::from("test_process"),
            executable_path: String::from("/usr/bin/test"),
            command_line: String::from("test --option"),
            environment: BTreeMap::new(),
            working_dir: String::from("/home/user"),
            uid: 1000,
            gid: 1000,
            status: ProcessStatus::Running,
            created_at: 1234567890,
            cpu_time: 1000,
            memory_usage: 1024 * 1024,
            open_files: vec![],
            network_connections: vec![],
        };

        assert_eq!(info.pid, 1234);
        assert_eq!(info.name, "test_process");
        assert_eq!(info.status, ProcessStatus::Running);
    }

    #[test]
    fn test_user_session() {
        let session = UserSession {
            session_id: 1,
            uid: 1000,
            username: String::from("testuser"),
            login_time: 1234567890,
            last_activity: 1234567890,
            session_type: SessionType::Interactive,
            source_address: String::from("192.168.1.100"),
            session_state: SessionState::Active,
        };

        assert_eq!(session.uid, 1000);
        assert_eq!(session.username, "testuser");
        assert_eq!(session.session_type, SessionType::Interactive);
        assert_eq!(session.session_state, SessionState::Active);
    }

    #[test]
    fn test_file_hash() {
        let hash = FileHash {
            file_path: String::from("/usr/bin/test"),
            md5_hash: String::from("d41d8cd98f00b204e98099ecf8427e"),
            sha1_hash: String::from("da39a3ee5e6b4b0d3255bfef95601890afd80709"),
            sha256_hash: String::from("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
            computed_at: 1234567890,
            file_size: 1024,
            file_permissions: 755,
        };

        assert_eq!(hash.file_path, "/usr/bin/test");
        assert_eq!(hash.file_size, 1024);
        assert_eq!(hash.file_permissions, 755);
    }

    #[test]
    fn test_virus_signature() {
        let signature = VirusSignature {
            signature_id: String::from("VIR-001"),
            virus_name: String::from("TestVirus"),
            virus_family: String::from("TestFamily"),
            signature_type: SignatureType::String,
            pattern: String::from("test_pattern"),
            severity: ThreatLevel::Critical,
            wildcards: vec![],
            created_at: 1234567890,
            updated_at: 1234567890,
        };

        assert_eq!(signature.signature_id, "VIR-001");
        assert_eq!(signature.virus_name, "TestVirus");
        assert_eq!(signature.severity, ThreatLevel::Critical);
    }

    #[test]
    fn test_host_ids_stats() {
        let stats = HostIdsStats::default();
        assert_eq!(stats.total_monitored_events, 0);
        assert_eq!(stats.syscalls_analyzed, 0);
        assert_eq!(stats.file_events, 0);
    }
}