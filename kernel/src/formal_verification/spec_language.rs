// Specification Language Module

extern crate alloc;
//
// 规约语言模块
// 定义形式化规约语言，用于描述系统属性和行为

use hashbrown::{HashMap, HashSet};
use alloc::sync::Arc;
use alloc::vec::Vec;
use alloc::string::String;
use alloc::boxed::Box;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;
use crate::compat::DefaultHasherBuilder;

use super::*;

/// 规约语言解释器
pub struct SpecLanguageInterpreter {
    /// 解释器ID
    pub id: u64,
    /// 语法树
    pub syntax_tree: SpecSyntaxTree,
    /// 语义分析器
    pub semantic_analyzer: SpecSemanticAnalyzer,
}

/// 规约语法树
#[derive(Debug, Clone)]
pub struct SpecSyntaxTree {
    pub root: SpecNode,
}

/// 规约节点
#[derive(Debug, Clone)]
pub struct SpecNode {
    pub node_type: SpecNodeType,
    pub value: Option<String>,
    pub children: Vec<SpecNode>,
}

/// 规约节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecNodeType {
    Module,
    Specification,
    Property,
    Expression,
    Identifier,
    Literal,
}

/// 语义分析器
#[derive(Debug)]
pub struct SpecSemanticAnalyzer {
    pub symbol_table: HashMap<String, SpecSymbol, crate::compat::DefaultHasherBuilder>,
}

impl Clone for SpecSemanticAnalyzer {
    fn clone(&self) -> Self {
        Self {
            symbol_table: self.symbol_table.clone(),
        }
    }
}

/// 规约符号
#[derive(Debug, Clone)]
pub struct SpecSymbol {
    pub name: String,
    pub symbol_type: SpecSymbolType,
    pub definition: String,
}

/// 规约符号类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecSymbolType {
    Variable,
    Constant,
    Function,
    Predicate,
    Type,
}

impl SpecLanguageInterpreter {
    /// 创建新的规约语言解释器
    pub fn new() -> Self {
        Self {
            id: 1,
            syntax_tree: SpecSyntaxTree {
                root: SpecNode {
                    node_type: SpecNodeType::Module,
                    value: None,
                    children: Vec::new(),
                },
            },
            semantic_analyzer: SpecSemanticAnalyzer {
                symbol_table: HashMap::with_hasher(DefaultHasherBuilder),
            },
        }
    }
}

/// 创建默认的规约语言解释器
pub fn create_spec_language_interpreter() -> Arc<Mutex<SpecLanguageInterpreter>> {
    Arc::new(Mutex::new(SpecLanguageInterpreter::new()))
}