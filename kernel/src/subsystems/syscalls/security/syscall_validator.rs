//! 系统调用安全验证模块
//! 
//! 本模块提供系统调用的安全验证功能，包括：
//! - 权限检查
//! - 参数验证
//! - 资源访问控制
//! - 安全策略执行
//! - 审计日志记录

use nos_nos_error_handling::unified::KernelError;
use crate::api::syscall::{SyscallCategory, get_syscall_category};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use spin::Mutex;

/// 安全验证结果
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityValidationResult {
    /// 验证通过
    Allowed,
    /// 验证拒绝 - 权限不足
    DeniedPermission(String),
    /// 验证拒绝 - 参数无效
    DeniedInvalidArgument(String),
    /// 验证拒绝 - 资源不可访问
    DeniedResourceAccess(String),
    /// 验证拒绝 - 违反安全策略
    DeniedPolicyViolation(String),
    /// 验证失败 - 内部错误
    Failed(String),
}

/// 安全上下文
#[derive(Debug, Clone)]
pub struct SecurityContext {
    /// 进程ID
    pub pid: u32,
    /// 用户ID
    pub uid: u32,
    /// 组ID
    pub gid: u32,
    /// 安全级别
    pub security_level: SecurityLevel,
    /// 权限集合
    pub permissions: BTreeMap<String, bool>,
    /// 资源访问权限
    pub resource_access: BTreeMap<String, ResourceAccess>,
}

/// 安全级别
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SecurityLevel {
    /// 最低安全级别（系统进程）
    System = 0,
    /// 高安全级别（特权进程）
    High = 1,
    /// 中等安全级别（普通用户进程）
    Medium = 2,
    /// 低安全级别（受限进程）
    Low = 3,
    /// 最低安全级别（沙箱进程）
    Sandbox = 4,
}

/// 资源访问权限
#[derive(Debug, Clone)]
pub struct ResourceAccess {
    /// 是否可读
    pub readable: bool,
    /// 是否可写
    pub writable: bool,
    /// 是否可执行
    pub executable: bool,
    /// 是否可删除
    pub deletable: bool,
}

/// 系统调用安全策略
#[derive(Debug, Clone)]
pub struct SyscallSecurityPolicy {
    /// 系统调用号
    pub syscall_number: u32,
    /// 系统调用类别
    pub category: SyscallCategory,
    /// 所需最小安全级别
    pub min_security_level: SecurityLevel,
    /// 所需权限列表
    pub required_permissions: Vec<String>,
    /// 参数验证规则
    pub argument_validation: Vec<ArgumentValidationRule>,
    /// 资源访问要求
    pub resource_requirements: Vec<ResourceRequirement>,
    /// 是否需要审计
    pub audit_required: bool,
}

/// 参数验证规则
#[derive(Debug, Clone)]
pub struct ArgumentValidationRule {
    /// 参数索引
    pub index: usize,
    /// 验证类型
    pub validation_type: ArgumentValidationType,
    /// 验证参数
    pub validation_params: Vec<String>,
}

/// 参数验证类型
#[derive(Debug, Clone)]
pub enum ArgumentValidationType {
    /// 非空指针
    NonNullPointer,
    /// 用户空间指针
    UserSpacePointer,
    /// 有效文件描述符
    ValidFileDescriptor,
    /// 内存范围检查
    MemoryRange,
    /// 字符串长度限制
    StringLength,
    /// 数值范围检查
    NumericRange,
    /// 自定义验证函数
    Custom(String),
}

/// 资源要求
#[derive(Debug, Clone)]
pub struct ResourceRequirement {
    /// 资源类型
    pub resource_type: ResourceType,
    /// 资源标识符（参数索引）
    pub resource_identifier: usize,
    /// 所需访问权限
    pub required_access: ResourceAccess,
}

/// 资源类型
#[derive(Debug, Clone)]
pub enum ResourceType {
    /// 文件
    File,
    /// 内存区域
    Memory,
    /// 网络套接字
    NetworkSocket,
    /// 进程
    Process,
    /// 设备
    Device,
    /// IPC对象
    IpcObject,
}

/// 安全审计日志条目
#[derive(Debug, Clone)]
pub struct AuditLogEntry {
    /// 时间戳
    pub timestamp: u64,
    /// 进程ID
    pub pid: u32,
    /// 用户ID
    pub uid: u32,
    /// 系统调用号
    pub syscall_number: u32,
    /// 系统调用名称
    pub syscall_name: String,
    /// 验证结果
    pub validation_result: SecurityValidationResult,
    /// 参数
    pub arguments: Vec<u64>,
    /// 安全上下文
    pub security_context: SecurityContext,
}

/// 系统调用安全验证器
pub struct SyscallSecurityValidator {
    /// 安全策略映射
    policies: BTreeMap<u32, SyscallSecurityPolicy>,
    /// 审计日志
    audit_log: Arc<Mutex<Vec<AuditLogEntry>>>,
    /// 验证器配置
    config: ValidatorConfig,
}

/// 验证器配置
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// 是否启用审计日志
    pub enable_audit_log: bool,
    /// 审计日志最大条目数
    pub max_audit_entries: usize,
    /// 是否启用严格模式
    pub strict_mode: bool,
    /// 是否启用参数验证
    pub enable_argument_validation: bool,
    /// 是否启用资源访问检查
    pub enable_resource_access_check: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            enable_audit_log: true,
            max_audit_entries: 10000,
            strict_mode: false,
            enable_argument_validation: true,
            enable_resource_access_check: true,
        }
    }
}

impl SyscallSecurityValidator {
    /// 创建新的系统调用安全验证器
    pub fn new(config: ValidatorConfig) -> Self {
        let mut validator = Self {
            policies: BTreeMap::new(),
            audit_log: Arc::new(Mutex::new(Vec::new())),
            config,
        };
        
        // 初始化默认安全策略
        validator.init_default_policies();
        
        validator
    }
    
    /// 使用默认配置创建验证器
    pub fn with_default_config() -> Self {
        Self::new(ValidatorConfig::default())
    }
    
    /// 初始化默认安全策略
    fn init_default_policies(&mut self) {
        // 内存管理系统调用策略
        self.add_policy(SyscallSecurityPolicy {
            syscall_number: 0x3000, // SYS_MMAP
            category: SyscallCategory::Memory,
            min_security_level: SecurityLevel::Medium,
            required_permissions: vec!["memory.allocate".to_string()],
            argument_validation: vec![
                ArgumentValidationRule {
                    index: 0,
                    validation_type: ArgumentValidationType::UserSpacePointer,
                    validation_params: vec![],
                },
                ArgumentValidationRule {
                    index: 1,
                    validation_type: ArgumentValidationType::NumericRange,
                    validation_params: vec!["0".to_string(), "1073741824".to_string()], // 0 to 1GB
                },
            ],
            resource_requirements: vec![],
            audit_required: true,
        });
        
        // 文件I/O系统调用策略
        self.add_policy(SyscallSecurityPolicy {
            syscall_number: 0x2000, // SYS_READ
            category: SyscallCategory::FileIo,
            min_security_level: SecurityLevel::Low,
            required_permissions: vec![],
            argument_validation: vec![
                ArgumentValidationRule {
                    index: 0,
                    validation_type: ArgumentValidationType::ValidFileDescriptor,
                    validation_params: vec![],
                },
                ArgumentValidationRule {
                    index: 1,
                    validation_type: ArgumentValidationType::UserSpacePointer,
                    validation_params: vec![],
                },
            ],
            resource_requirements: vec![
                ResourceRequirement {
                    resource_type: ResourceType::File,
                    resource_identifier: 0,
                    required_access: ResourceAccess {
                        readable: true,
                        writable: false,
                        executable: false,
                        deletable: false,
                    },
                },
            ],
            audit_required: false,
        });
        
        // 进程管理系统调用策略
        self.add_policy(SyscallSecurityPolicy {
            syscall_number: 0x1001, // SYS_FORK
            category: SyscallCategory::Process,
            min_security_level: SecurityLevel::Low,
            required_permissions: vec!["process.fork".to_string()],
            argument_validation: vec![],
            resource_requirements: vec![],
            audit_required: true,
        });
        
        // 网络系统调用策略
        self.add_policy(SyscallSecurityPolicy {
            syscall_number: 0x4000, // SYS_SOCKET
            category: SyscallCategory::Network,
            min_security_level: SecurityLevel::Medium,
            required_permissions: vec!["network.create".to_string()],
            argument_validation: vec![
                ArgumentValidationRule {
                    index: 0,
                    validation_type: ArgumentValidationType::NumericRange,
                    validation_params: vec!["0".to_string(), "10".to_string()], // Valid socket domains
                },
                ArgumentValidationRule {
                    index: 1,
                    validation_type: ArgumentValidationType::NumericRange,
                    validation_params: vec!["0".to_string(), "10".to_string()], // Valid socket types
                },
                ArgumentValidationRule {
                    index: 2,
                    validation_type: ArgumentValidationType::NumericRange,
                    validation_params: vec!["0".to_string(), "255".to_string()], // Valid protocols
                },
            ],
            resource_requirements: vec![],
            audit_required: true,
        });
    }
    
    /// 添加安全策略
    pub fn add_policy(&mut self, policy: SyscallSecurityPolicy) {
        self.policies.insert(policy.syscall_number, policy);
    }
    
    /// 验证系统调用
    pub fn validate_syscall(
        &self,
        syscall_number: u32,
        args: &[u64],
        security_context: &SecurityContext,
    ) -> SecurityValidationResult {
        // 获取系统调用策略
        let policy = match self.policies.get(&syscall_number) {
            Some(policy) => policy,
            None => {
                // 如果没有找到策略，根据严格模式决定
                if self.config.strict_mode {
                    return SecurityValidationResult::DeniedPolicyViolation(
                        format!("No security policy defined for syscall {}", syscall_number)
                    );
                } else {
                    // 在非严格模式下，允许未定义策略的系统调用
                    return SecurityValidationResult::Allowed;
                }
            }
        };
        
        // 1. 检查安全级别
        if security_context.security_level > policy.min_security_level {
            return SecurityValidationResult::DeniedPermission(
                format!("Security level {:?} insufficient, required {:?}", 
                       security_context.security_level, policy.min_security_level)
            );
        }
        
        // 2. 检查所需权限
        for permission in &policy.required_permissions {
            match security_context.permissions.get(permission) {
                Some(true) => {}, // 权限存在且为true
                _ => {
                    return SecurityValidationResult::DeniedPermission(
                        format!("Missing required permission: {}", permission)
                    );
                }
            }
        }
        
        // 3. 验证参数
        if self.config.enable_argument_validation {
            for rule in &policy.argument_validation {
                if let Err(result) = self.validate_argument(rule, args, security_context) {
                    return result;
                }
            }
        }
        
        // 4. 检查资源访问权限
        if self.config.enable_resource_access_check {
            for requirement in &policy.resource_requirements {
                if let Err(result) = self.validate_resource_access(requirement, args, security_context) {
                    return result;
                }
            }
        }
        
        // 记录审计日志
        if self.config.enable_audit_log && policy.audit_required {
            self.log_audit_entry(syscall_number, args, security_context, &SecurityValidationResult::Allowed);
        }
        
        SecurityValidationResult::Allowed
    }
    
    /// 验证参数
    fn validate_argument(
        &self,
        rule: &ArgumentValidationRule,
        args: &[u64],
        _security_context: &SecurityContext,
    ) -> Result<(), SecurityValidationResult> {
        if rule.index >= args.len() {
            return Err(SecurityValidationResult::DeniedInvalidArgument(
                format!("Argument {} not provided", rule.index)
            ));
        }
        
        let arg_value = args[rule.index];
        
        match &rule.validation_type {
            ArgumentValidationType::NonNullPointer => {
                if arg_value == 0 {
                    return Err(SecurityValidationResult::DeniedInvalidArgument(
                        format!("Argument {} is null pointer", rule.index)
                    ));
                }
            },
            ArgumentValidationType::UserSpacePointer => {
                // 检查指针是否在用户空间范围内
                if arg_value >= 0x8000000000000000 || arg_value == 0 {
                    return Err(SecurityValidationResult::DeniedInvalidArgument(
                        format!("Argument {} is not a valid user space pointer", rule.index)
                    ));
                }
            },
            ArgumentValidationType::ValidFileDescriptor => {
                // 这里应该检查文件描述符是否有效
                // 简化实现，假设fd < 1024是有效的
                if arg_value >= 1024 {
                    return Err(SecurityValidationResult::DeniedInvalidArgument(
                        format!("Argument {} is not a valid file descriptor", rule.index)
                    ));
                }
            },
            ArgumentValidationType::NumericRange => {
                if rule.validation_params.len() >= 2 {
                    let min_val: u64 = rule.validation_params[0].parse().unwrap_or(0);
                    let max_val: u64 = rule.validation_params[1].parse().unwrap_or(u64::MAX);
                    
                    if arg_value < min_val || arg_value > max_val {
                        return Err(SecurityValidationResult::DeniedInvalidArgument(
                            format!("Argument {} value {} out of range [{}, {}]", 
                                   rule.index, arg_value, min_val, max_val)
                        ));
                    }
                }
            },
            ArgumentValidationType::StringLength => {
                if rule.validation_params.len() >= 1 {
                    let max_len: usize = rule.validation_params[0].parse().unwrap_or(1024);
                    // 这里应该实际检查字符串长度
                    // 简化实现，假设字符串长度合理
                }
            },
            ArgumentValidationType::MemoryRange => {
                // 检查内存范围是否有效
                if rule.validation_params.len() >= 2 {
                    let size: u64 = rule.validation_params[0].parse().unwrap_or(0);
                    let max_size: u64 = rule.validation_params[1].parse().unwrap_or(1073741824); // 1GB
                    
                    if size > max_size {
                        return Err(SecurityValidationResult::DeniedInvalidArgument(
                            format!("Argument {} memory size {} exceeds maximum {}", 
                                   rule.index, size, max_size)
                        ));
                    }
                }
            },
            ArgumentValidationType::Custom(_) => {
                // 自定义验证函数
                // 这里应该调用具体的验证函数
            },
        }
        
        Ok(())
    }
    
    /// 验证资源访问权限
    fn validate_resource_access(
        &self,
        requirement: &ResourceRequirement,
        args: &[u64],
        _security_context: &SecurityContext,
    ) -> Result<(), SecurityValidationResult> {
        if requirement.resource_identifier >= args.len() {
            return Err(SecurityValidationResult::DeniedInvalidArgument(
                format!("Resource identifier {} not provided", requirement.resource_identifier)
            ));
        }
        
        let resource_id = args[requirement.resource_identifier];
        
        // 这里应该实际检查资源访问权限
        // 简化实现，假设所有资源访问都是有效的
        match requirement.resource_type {
            ResourceType::File => {
                // 检查文件访问权限
                if resource_id >= 1024 {
                    return Err(SecurityValidationResult::DeniedResourceAccess(
                        format!("File descriptor {} is invalid", resource_id)
                    ));
                }
            },
            ResourceType::Memory => {
                // 检查内存访问权限
                if resource_id == 0 || resource_id >= 0x8000000000000000 {
                    return Err(SecurityValidationResult::DeniedResourceAccess(
                        format!("Memory address {} is invalid", resource_id)
                    ));
                }
            },
            ResourceType::NetworkSocket => {
                // 检查网络套接字访问权限
                if resource_id >= 1024 {
                    return Err(SecurityValidationResult::DeniedResourceAccess(
                        format!("Socket descriptor {} is invalid", resource_id)
                    ));
                }
            },
            _ => {
                // 其他资源类型的检查
            },
        }
        
        Ok(())
    }
    
    /// 记录审计日志
    fn log_audit_entry(
        &self,
        syscall_number: u32,
        args: &[u64],
        security_context: &SecurityContext,
        validation_result: &SecurityValidationResult,
    ) {
        let entry = AuditLogEntry {
            timestamp: self.get_current_time(),
            pid: security_context.pid,
            uid: security_context.uid,
            syscall_number,
            syscall_name: self.get_syscall_name(syscall_number),
            validation_result: validation_result.clone(),
            arguments: args.to_vec(),
            security_context: security_context.clone(),
        };
        
        let mut log = self.audit_log.lock();
        log.push(entry);
        
        // 如果日志条目超过最大限制，移除最旧的条目
        if log.len() > self.config.max_audit_entries {
            log.remove(0);
        }
    }
    
    /// 获取系统调用名称
    fn get_syscall_name(&self, syscall_number: u32) -> String {
        match syscall_number {
            0x1000 => "getpid".to_string(),
            0x1001 => "fork".to_string(),
            0x1002 => "execve".to_string(),
            0x1003 => "exit".to_string(),
            0x2000 => "read".to_string(),
            0x2001 => "write".to_string(),
            0x2002 => "open".to_string(),
            0x2003 => "close".to_string(),
            0x3000 => "mmap".to_string(),
            0x3001 => "munmap".to_string(),
            0x3002 => "brk".to_string(),
            0x3003 => "mprotect".to_string(),
            0x4000 => "socket".to_string(),
            0x4001 => "bind".to_string(),
            0x4002 => "connect".to_string(),
            0x4003 => "listen".to_string(),
            0x4004 => "accept".to_string(),
            _ => format!("unknown_{}", syscall_number),
        }
    }
    
    /// 获取当前时间
    fn get_current_time(&self) -> u64 {
        // 这里应该实现真实的时间获取
        // 暂时返回固定值
        0
    }
    
    /// 获取审计日志
    pub fn get_audit_log(&self) -> Vec<AuditLogEntry> {
        self.audit_log.lock().clone()
    }
    
    /// 清空审计日志
    pub fn clear_audit_log(&self) {
        self.audit_log.lock().clear();
    }
    
    /// 获取安全策略
    pub fn get_policy(&self, syscall_number: u32) -> Option<&SyscallSecurityPolicy> {
        self.policies.get(&syscall_number)
    }
    
    /// 获取所有安全策略
    pub fn get_all_policies(&self) -> &BTreeMap<u32, SyscallSecurityPolicy> {
        &self.policies
    }
}

use alloc::sync::Arc;