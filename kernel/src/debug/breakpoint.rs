// Breakpoint Management Module
//
// 断点管理模块
// 提供断点设置、管理、条件断点等功能

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use alloc::string::String;
use core::sync::atomic::{AtomicU64, Ordering};

/// 断点管理器
#[derive(Debug)]
pub struct BreakpointManager {
    /// 断点ID计数器
    pub breakpoint_counter: AtomicU64,
    /// 断点列表
    pub breakpoints: BTreeMap<u64, Breakpoint>,
    /// 断点条件
    pub breakpoint_conditions: Vec<BreakpointCondition>,
}

impl Clone for BreakpointManager {
    fn clone(&self) -> Self {
        Self {
            breakpoint_counter: AtomicU64::new(self.breakpoint_counter.load(Ordering::SeqCst)),
            breakpoints: self.breakpoints.clone(),
            breakpoint_conditions: self.breakpoint_conditions.clone(),
        }
    }
}

impl BreakpointManager {
    /// 初始化断点管理器
    pub fn init(&mut self) -> Result<(), &'static str> {
        // 初始化断点计数器
        self.breakpoint_counter = AtomicU64::new(1);
        // 清空断点列表
        self.breakpoints.clear();
        // 清空断点条件
        self.breakpoint_conditions.clear();
        Ok(())
    }
}

/// 断点
#[derive(Debug, Clone)]
pub struct Breakpoint {
    /// 断点ID
    pub id: u64,
    /// 断点地址
    pub address: u64,
    /// 断点类型
    pub breakpoint_type: BreakpointType,
    /// 断点状态
    pub status: BreakpointStatus,
    /// 断点条件
    pub condition: Option<BreakpointCondition>,
    /// 断点命中次数
    pub hit_count: u64,
    /// 断点描述
    pub description: String,
    /// 创建时间
    pub created_at: u64,
    /// 最后命中时间
    pub last_hit: Option<u64>,
    /// 源文件位置
    pub source_location: Option<SourceLocation>,
    /// 原始指令
    pub original_instruction: Vec<u8>,
    /// 断点数据
    pub data: BTreeMap<String, String>,
}

/// 断点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointType {
    /// 软件断点
    Software,
    /// 硬件断点
    Hardware,
    /// 内存断点
    Memory,
    /// 数据断点
    Data,
    /// 条件断点
    Conditional,
    /// 临时断点
    Temporary,
    /// 看门断点
    Watchpoint,
}

/// 断点状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointStatus {
    /// 启用
    Enabled,
    /// 禁用
    Disabled,
    /// 命中
    Hit,
    /// 已删除
    Deleted,
    /// 错误
    Error,
}

/// 断点条件
#[derive(Debug, Clone)]
pub struct BreakpointCondition {
    /// 条件表达式
    pub expression: String,
    /// 条件类型
    pub condition_type: ConditionType,
    /// 条件参数
    pub parameters: BTreeMap<String, String>,
}

/// 条件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionType {
    /// 等于寄存器
    Register,
    /// 基于内存
    Memory,
    /// 基于变量
    Variable,
    /// 基于表达式
    Expression,
    /// 基于计数
    Counter,
    /// 自定义条件
    Custom,
}

/// 源文件位置
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// 文件名
    pub file_name: String,
    /// 行号
    pub line_number: u32,
    /// 列号
    pub column_number: u32,
    /// 函数名
    pub function_name: Option<String>,
    /// 模块名
    pub module_name: Option<String>,
}

