// Type Checker Module

extern crate alloc;
//
// 类型检查器模块
// 实现静态类型检查和类型推导功能

use hashbrown::{HashMap, HashSet};
use alloc::collections::BTreeMap;
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
use super::static_analyzer::{PrimitiveType, Scope, SourceLocation};

/// 类型检查器
pub struct TypeChecker {
    /// 检查器ID
    pub id: u64,
    /// 检查器配置
    config: TypeCheckerConfig,
    /// 类型环境
    type_environment: TypeEnvironment,
    /// 类型推导器
    type_inferencer: TypeInferencer,
    /// 约束求解器
    constraint_solver: ConstraintSolver,
    /// 检查结果
    results: Vec<TypeCheckingResult>,
    /// 检查统计
    stats: TypeCheckingStats,
    /// 是否正在运行
    running: AtomicBool,
}

/// 类型检查器配置
#[derive(Debug, Clone)]
pub struct TypeCheckerConfig {
    /// 检查严格程度
    pub strictness: StrictnessLevel,
    /// 启用类型推导
    pub enable_type_inference: bool,
    /// 启用泛型支持
    pub enable_generics: bool,
    /// 启用类型别名
    pub enable_type_aliases: bool,
    /// 最大推导深度
    pub max_inference_depth: u32,
    /// 超时时间（秒）
    pub timeout_seconds: u64,
    /// 允许隐式转换
    pub allow_implicit_conversions: bool,
    /// 类型变量命名策略
    pub type_variable_naming: TypeVariableNaming,
}

impl Default for TypeCheckerConfig {
    fn default() -> Self {
        Self {
            strictness: StrictnessLevel::Standard,
            enable_type_inference: true,
            enable_generics: true,
            enable_type_aliases: true,
            max_inference_depth: 100,
            timeout_seconds: 60,
            allow_implicit_conversions: true,
            type_variable_naming: TypeVariableNaming::Sequential,
        }
    }
}

/// 严格程度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrictnessLevel {
    /// 宽松检查
    Lenient,
    /// 标准检查
    Standard,
    /// 严格检查
    Strict,
    /// 非常严格
    VeryStrict,
}

/// 类型变量命名策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeVariableNaming {
    /// 顺序命名 ('a, 'b, 'c...)
    Sequential,
    /// 基于上下文命名
    Contextual,
    /// 哈希命名
    Hashed,
    /// 描述性命名
    Descriptive,
}

/// 类型环境
#[derive(Debug, Clone)]
pub struct TypeEnvironment {
    /// 类型绑定
    pub type_bindings: HashMap<String, Type, DefaultHasherBuilder>,
    /// 类型变量绑定
    pub type_variable_bindings: HashMap<String, TypeVariable, DefaultHasherBuilder>,
    /// 作用域栈
    pub scope_stack: Vec<Scope>,
    /// 当前作用域
    pub current_scope: Option<u64>,
    /// 类型别名
    pub type_aliases: HashMap<String, TypeAlias, DefaultHasherBuilder>,
    /// 隐式转换规则
    pub implicit_conversions: Vec<ImplicitConversion>,
}

/// 类型
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// 基础类型
    Primitive(PrimitiveType),
    /// 函数类型
    Function(Box<FunctionType>),
    /// 元组类型
    Tuple(Vec<Type>),
    /// 数组类型
    Array(Box<ArrayType>),
    /// 指针类型
    Pointer(Box<PointerType>),
    /// 引用类型
    Reference(Box<ReferenceType>),
    /// 结构体类型
    Struct(StructType),
    /// 枚举类型
    Enum(Box<EnumType>),
    /// 联合体类型
    Union(Box<UnionType>),
    /// 泛型类型
    Generic(GenericType),
    /// 类型变量
    TypeVariable(TypeVariable),
    /// 未知类型（用于推导）
    Unknown,
    /// 错误类型
    Error,
}

/// 函数类型
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    /// 参数类型
    pub parameters: Vec<Type>,
    /// 返回类型
    pub return_type: Type,
    /// 是否可变
    pub is_variadic: bool,
    /// 调用约定
    pub calling_convention: CallingConvention,
}

/// 调用约定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallingConvention {
    /// C调用约定
    C,
    /// 快速调用
    FastCall,
    /// 标准调用
    StdCall,
    /// 系统调用
    SysCall,
}

/// 数组类型
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    /// 元素类型
    pub element_type: Type,
    /// 数组大小
    pub size: Option<u64>,
    /// 是否为切片
    pub is_slice: bool,
}

/// 指针类型
#[derive(Debug, Clone, PartialEq)]
pub struct PointerType {
    /// 指向的类型
    pub pointee_type: Type,
    /// 是否为可变指针
    pub is_mutable: bool,
    /// 是否为空指针
    pub is_nullable: bool,
}

/// 引用类型
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceType {
    /// 引用的类型
    pub referenced_type: Type,
    /// 是否为可变引用
    pub is_mutable: bool,
    /// 生命周期
    pub lifetime: Option<String>,
}

/// 结构体类型
#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    /// 结构体名称
    pub name: String,
    /// 字段类型
    pub fields: Vec<StructField>,
    /// 泛型参数
    pub generic_parameters: Vec<String>,
    /// 方法
    pub methods: Vec<Method>,
}

/// 结构体字段
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    /// 字段名
    pub name: String,
    /// 字段类型
    pub field_type: Type,
    /// 字段偏移
    pub offset: Option<u64>,
    /// 可见性
    pub visibility: Visibility,
}

/// 可见性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// 公共
    Public,
    /// 私有
    Private,
    /// 保护
    Protected,
    /// 内部
    Internal,
}

/// 方法
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    /// 方法名
    pub name: String,
    /// 方法类型
    pub method_type: FunctionType,
    /// 是否为静态方法
    pub is_static: bool,
    /// 可见性
    pub visibility: Visibility,
}

/// 枚举类型
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    /// 枚举名称
    pub name: String,
    /// 枚举变体
    pub variants: Vec<EnumVariant>,
    /// 底层类型
    pub underlying_type: Option<Box<Type>>,
    /// 泛型参数
    pub generic_parameters: Vec<String>,
}

/// 枚举变体
#[derive(Debug, Clone, PartialEq)]
pub enum EnumVariant {
    /// 单元变体
    Unit(String),
    /// 元组变体
    Tuple(String, Vec<Type>),
    /// 结构体变体
    Struct(String, Vec<StructField>),
}

/// 联合体类型
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    /// 联合体名称
    pub name: String,
    /// 变体类型
    pub variants: Vec<Type>,
    /// 标签类型（用于标签联合体）
    pub tag_type: Option<Box<Type>>,
    /// 泛型参数
    pub generic_parameters: Vec<String>,
}

/// 泛型类型
#[derive(Debug, Clone, PartialEq)]
pub struct GenericType {
    /// 基础类型名
    pub base_type: String,
    /// 类型参数
    pub type_arguments: Vec<Type>,
    /// 泛型参数数量
    pub arity: usize,
}

/// 类型变量
#[derive(Debug, Clone, PartialEq)]
pub struct TypeVariable {
    /// 变量名
    pub name: String,
    /// 变量ID
    pub id: u64,
    /// 约束
    pub constraints: Vec<TypeConstraint>,
    /// 是否已求解
    pub is_solved: bool,
}

/// 类型约束
#[derive(Debug, Clone, PartialEq)]
pub struct TypeConstraint {
    /// 约束类型
    pub constraint_type: TypeConstraintType,
    /// 约束参数
    pub parameters: Vec<Type>,
}

/// 类型约束类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeConstraintType {
    /// 特征约束
    Trait,
    /// 上界约束
    UpperBound,
    /// 下界约束
    LowerBound,
    /// 相等约束
    Equality,
}

/// 类型别名
#[derive(Debug, Clone)]
pub struct TypeAlias {
    /// 别名名称
    pub name: String,
    /// 实际类型
    pub actual_type: Type,
    /// 泛型参数
    pub generic_parameters: Vec<String>,
}

/// 隐式转换规则
#[derive(Debug, Clone)]
pub struct ImplicitConversion {
    /// 源类型
    pub source_type: Type,
    /// 目标类型
    pub target_type: Type,
    /// 转换成本
    pub cost: u32,
    /// 转换函数
    pub conversion_function: Option<String>,
    /// 是否安全
    pub is_safe: bool,
}

/// 类型推导器
#[derive(Debug, Clone)]
pub struct TypeInferencer {
    /// 推导器ID
    pub id: u64,
    /// 类型约束集合
    pub constraints: Vec<TypeConstraint>,
    /// 类型变量映射
    pub type_variables: HashMap<String, TypeVariable, DefaultHasherBuilder>,
    /// 推导上下文
    pub context: InferenceContext,
    /// 推导统计
    pub statistics: InferenceStatistics,
}

/// 推导上下文
#[derive(Debug)]
pub struct InferenceContext {
    /// 当前作用域
    pub current_scope: u64,
    /// 局部变量类型
    pub local_variable_types: HashMap<String, Type, DefaultHasherBuilder>,
    /// 函数签名
    pub function_signatures: HashMap<String, FunctionType, DefaultHasherBuilder>,
    /// 泛型实例化
    pub generic_instantiations: HashMap<String, Type, DefaultHasherBuilder>,
}

impl Clone for InferenceContext {
    fn clone(&self) -> Self {
        Self {
            current_scope: self.current_scope,
            local_variable_types: self.local_variable_types.clone(),
            function_signatures: self.function_signatures.clone(),
            generic_instantiations: self.generic_instantiations.clone(),
        }
    }
}

/// 推导统计
#[derive(Debug, Clone, Default)]
pub struct InferenceStatistics {
    /// 推导的变量数
    pub variables_inferred: u64,
    /// 约束求解次数
    pub constraint_solves: u64,
    /// 泛型实例化数
    pub generic_instantiations: u64,
    /// 推导时间（毫秒）
    pub inference_time_ms: u64,
    /// 最大推导深度
    pub max_inference_depth: u32,
}

/// 约束求解器
#[derive(Debug)]
pub struct ConstraintSolver {
    /// 求解器ID
    pub id: u64,
    /// 求解算法
    pub algorithm: ConstraintSolvingAlgorithm,
    /// 求解结果
    pub solutions: HashMap<TypeVariable, Type, DefaultHasherBuilder>,
    /// 求解统计
    pub statistics: SolverStatistics,
}

impl Clone for ConstraintSolver {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            algorithm: self.algorithm,
            solutions: self.solutions.clone(),
            statistics: self.statistics.clone(),
        }
    }
}

/// 约束求解算法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSolvingAlgorithm {
    /// 统一算法
    Unification,
    /// Hindley-Milner算法
    HindleyMilner,
    /// Damas-Milner算法
    DamasMilner,
    /// 局化约束求解
    LocalizedTypeInference,
}

/// 求解统计
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    /// 求解的约束数
    pub constraints_solved: u64,
    /// 统一操作数
    pub unifications: u64,
    /// 回溯次数
    pub backtracks: u64,
    /// 求解时间（毫秒）
    pub solving_time_ms: u64,
    /// 内存使用（字节）
    pub memory_used: u64,
}

/// 类型检查结果
#[derive(Debug, Clone)]
pub struct TypeCheckingResult {
    /// 结果ID
    pub id: u64,
    /// 检查的目标
    pub target: VerificationTarget,
    /// 检查状态
    pub status: VerificationStatus,
    /// 类型错误
    pub type_errors: Vec<TypeError>,
    /// 类型警告
    pub type_warnings: Vec<TypeWarning>,
    /// 推导的类型
    pub inferred_types: HashMap<String, Type, DefaultHasherBuilder>,
    /// 检查统计
    pub statistics: TypeCheckingStatistics,
    /// 检查时间（毫秒）
    pub checking_time_ms: u64,
}

/// 类型错误
#[derive(Debug, Clone)]
pub struct TypeError {
    /// 错误ID
    pub id: u64,
    /// 错误类型
    pub error_type: TypeErrorType,
    /// 错误位置
    pub location: SourceLocation,
    /// 期望类型
    pub expected_type: Option<Type>,
    /// 实际类型
    pub actual_type: Option<Type>,
    /// 错误消息
    pub message: String,
    /// 修复建议
    pub suggestion: Option<String>,
    /// 上下文信息
    pub context: HashMap<String, String, DefaultHasherBuilder>,
}

/// 类型错误类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeErrorType {
    /// 类型不匹配
    TypeMismatch,
    /// 未定义类型
    UndefinedType,
    /// 未定义变量
    UndefinedVariable,
    /// 循环类型定义
    RecursiveType,
    /// 约束求解失败
    ConstraintSolvingFailure,
    /// 泛型实例化错误
    GenericInstantiationError,
    /// 函数参数数量错误
    ArityMismatch,
    /// 字段访问错误
    FieldAccessError,
    /// 方法调用错误
    MethodCallError,
    /// 隐式转换错误
    ImplicitConversionError,
}

/// 类型警告
#[derive(Debug, Clone)]
pub struct TypeWarning {
    /// 警告ID
    pub id: u64,
    /// 警告类型
    pub warning_type: TypeWarningType,
    /// 警告位置
    pub location: SourceLocation,
    /// 警告消息
    pub message: String,
    /// 改进建议
    pub suggestion: Option<String>,
}

/// 类型警告类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeWarningType {
    /// 未使用的变量
    UnusedVariable,
    /// 未使用的类型参数
    UnusedTypeParameter,
    /// 死代码
    DeadCode,
    /// 隐式转换
    ImplicitConversion,
    /// 类型推导模糊
    AmbiguousType,
    /// 过度泛型
    OverlyGeneric,
}

/// 类型检查统计
#[derive(Debug, Clone, Default)]
pub struct TypeCheckingStatistics {
    /// 检查的表达式数
    pub expressions_checked: u64,
    /// 检查的语句数
    pub statements_checked: u64,
    /// 检查的函数数
    pub functions_checked: u64,
    /// 推导的类型数
    pub types_inferred: u64,
    /// 发现的错误数
    pub errors_found: u64,
    /// 发现的警告数
    pub warnings_found: u64,
    /// 统一操作数
    pub unifications: u64,
    /// 泛型实例化数
    pub generic_instantiations: u64,
}

/// 类型检查器统计
#[derive(Debug, Clone, Default)]
pub struct TypeCheckingStats {
    /// 总检查数
    pub total_checks: u64,
    /// 成功检查数
    pub successful_checks: u64,
    /// 失败检查数
    pub failed_checks: u64,
    /// 总错误数
    pub total_errors: u64,
    /// 总警告数
    pub total_warnings: u64,
    /// 平均检查时间
    pub avg_checking_time_ms: u64,
    /// 最长检查时间
    pub max_checking_time_ms: u64,
}

impl TypeChecker {
    /// 创建新的类型检查器
    pub fn new() -> Self {
        Self {
            id: 1,
            config: TypeCheckerConfig::default(),
            type_environment: TypeEnvironment::new(),
            type_inferencer: TypeInferencer {
                id: 1,
                constraints: Vec::new(),
                type_variables: HashMap::with_hasher(DefaultHasherBuilder),
                context: InferenceContext::new(),
                statistics: InferenceStatistics::default(),
            },
            constraint_solver: ConstraintSolver {
                id: 1,
                algorithm: ConstraintSolvingAlgorithm::HindleyMilner,
                solutions: HashMap::with_hasher(DefaultHasherBuilder),
                statistics: SolverStatistics::default(),
            },
            results: Vec::new(),
            stats: TypeCheckingStats::default(),
            running: AtomicBool::new(false),
        }
    }

    /// 初始化类型检查器
    pub fn init(&mut self) -> Result<(), &'static str> {
        self.running.store(true, Ordering::SeqCst);

        // 初始化类型环境
        self.init_type_environment()?;

        crate::println!("[TypeChecker] Type checker initialized successfully");
        Ok(())
    }

    /// 执行类型检查
    pub fn check_types(&mut self, targets: &[VerificationTarget]) -> Result<Vec<VerificationResult>, &'static str> {
        if !self.running.load(Ordering::SeqCst) {
            return Err("Type checker is not running");
        }

        let mut all_results = Vec::new();

        for target in targets {
            let result = self.check_target(target)?;
            self.update_statistics(&result);
            all_results.push(result);
        }

        Ok(all_results)
    }

    /// 检查单个目标
    fn check_target(&mut self, target: &VerificationTarget) -> Result<VerificationResult, &'static str> {
        let start_time_ms = 0u64; // TODO: Implement proper timestamp

        // 模拟类型检查过程
        let mut type_errors = Vec::new();
        let mut type_warnings = Vec::new();
        let mut inferred_types = HashMap::with_hasher(DefaultHasherBuilder);

        // 根据目标类型执行不同的检查
        match target.target_type {
            VerificationTargetType::Function => {
                self.check_function_target(target, &mut type_errors, &mut type_warnings, &mut inferred_types)?;
            }
            VerificationTargetType::Struct => {
                self.check_struct_target(target, &mut type_errors, &mut type_warnings, &mut inferred_types)?;
            }
            VerificationTargetType::Module => {
                self.check_module_target(target, &mut type_errors, &mut type_warnings, &mut inferred_types)?;
            }
            _ => {
                self.check_generic_target(target, &mut type_errors, &mut type_warnings, &mut inferred_types)?;
            }
        }

        let elapsed_ms = 0u64; // TODO: Implement proper timestamp

        // 在移动之前提取长度统计
        let type_errors_count = type_errors.len() as u64;
        let type_warnings_count = type_warnings.len() as u64;
        let inferred_types_count = inferred_types.len() as u64;

        // 创建类型检查结果
        let checking_result = TypeCheckingResult {
            id: self.results.len() as u64 + 1,
            target: target.clone(),
            status: if type_errors.is_empty() {
                VerificationStatus::Verified
            } else {
                VerificationStatus::Failed
            },
            type_errors,
            type_warnings,
            inferred_types,
            statistics: TypeCheckingStatistics {
                expressions_checked: 50,
                statements_checked: 30,
                functions_checked: 1,
                types_inferred: inferred_types_count,
                errors_found: type_errors_count,
                warnings_found: type_warnings_count,
                unifications: 25,
                generic_instantiations: 5,
            },
            checking_time_ms: elapsed_ms,
        };

        // 转换为通用验证结果
        let status = if checking_result.type_errors.is_empty() {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Failed
        };

        let severity = if checking_result.type_errors.iter().any(|e|
            matches!(e.error_type, TypeErrorType::TypeMismatch | TypeErrorType::UndefinedType)
        ) {
            VerificationSeverity::Error
        } else if !checking_result.type_warnings.is_empty() {
            VerificationSeverity::Warning
        } else {
            VerificationSeverity::Info
        };

        Ok(VerificationResult {
            id: checking_result.id,
            status,
            severity,
            message: format!(
                "Type checking {} with {} errors and {} warnings",
                target.name,
                checking_result.type_errors.len(),
                checking_result.type_warnings.len()
            ),
            proof_object: None,
            counterexample: None,
            verification_time_ms: checking_result.checking_time_ms,
            memory_used: checking_result.statistics.types_inferred,
            statistics: VerificationStatistics {
                states_checked: checking_result.statistics.expressions_checked,
                paths_explored: checking_result.statistics.statements_checked,
                lemmas_proved: 0,
                bugs_found: checking_result.type_errors.len() as u64,
                properties_verified: 1,
                rules_applied: checking_result.statistics.unifications,
                max_depth: 0,
                branching_factor: 0.0,
            },
            metadata: BTreeMap::new(),
        })
    }

    /// 检查函数目标
    fn check_function_target(&self, target: &VerificationTarget, errors: &mut Vec<TypeError>, warnings: &mut Vec<TypeWarning>, inferred: &mut HashMap<String, Type, DefaultHasherBuilder>) -> Result<(), &'static str> {
        // 模拟函数类型检查
        inferred.insert("return".to_string(), Type::Primitive(PrimitiveType::I32));
        inferred.insert("param1".to_string(), Type::Primitive(PrimitiveType::I32));
        inferred.insert("param2".to_string(), Type::Primitive(PrimitiveType::F64));

        // 添加一个示例警告
        warnings.push(TypeWarning {
            id: 1,
            warning_type: TypeWarningType::UnusedVariable,
            location: SourceLocation {
                file: target.path.clone(),
                line: 5,
                column: 10,
                length: 8,
            },
            message: "Parameter 'unused_param' is never used".to_string(),
            suggestion: Some("Remove unused parameter or prefix with '_'".to_string()),
        });

        Ok(())
    }

    /// 检查结构体目标
    fn check_struct_target(&self, target: &VerificationTarget, errors: &mut Vec<TypeError>, warnings: &mut Vec<TypeWarning>, inferred: &mut HashMap<String, Type, DefaultHasherBuilder>) -> Result<(), &'static str> {
        // 模拟结构体类型检查
        let struct_type = Type::Struct(StructType {
            name: target.name.clone(),
            fields: vec![
                StructField {
                    name: "field1".to_string(),
                    field_type: Type::Primitive(PrimitiveType::I32),
                    offset: Some(0),
                    visibility: Visibility::Public,
                },
                StructField {
                    name: "field2".to_string(),
                    field_type: Type::Primitive(PrimitiveType::F64),
                    offset: Some(4),
                    visibility: Visibility::Private,
                },
            ],
            generic_parameters: Vec::new(),
            methods: Vec::new(),
        });

        inferred.insert(target.name.clone(), struct_type);

        // 添加一个示例错误
        errors.push(TypeError {
            id: 1,
            error_type: TypeErrorType::FieldAccessError,
            location: SourceLocation {
                file: target.path.clone(),
                line: 15,
                column: 20,
                length: 10,
            },
            expected_type: Some(Type::Primitive(PrimitiveType::I32)),
            actual_type: Some(Type::Primitive(PrimitiveType::F64)),
            message: "Field access type mismatch".to_string(),
            suggestion: Some("Check field type or use explicit conversion".to_string()),
            context: HashMap::with_hasher(DefaultHasherBuilder),
        });

        Ok(())
    }

    /// 检查模块目标
    fn check_module_target(&self, target: &VerificationTarget, errors: &mut Vec<TypeError>, warnings: &mut Vec<TypeWarning>, inferred: &mut HashMap<String, Type, DefaultHasherBuilder>) -> Result<(), &'static str> {
        // 模拟模块类型检查
        inferred.insert("module_type".to_string(), Type::Primitive(PrimitiveType::Void));

        // 添加一个示例警告
        warnings.push(TypeWarning {
            id: 2,
            warning_type: TypeWarningType::DeadCode,
            location: SourceLocation {
                file: target.path.clone(),
                line: 30,
                column: 5,
                length: 15,
            },
            message: "Unreachable code detected in module".to_string(),
            suggestion: Some("Remove unreachable code".to_string()),
        });

        Ok(())
    }

    /// 检查通用目标
    fn check_generic_target(&self, target: &VerificationTarget, errors: &mut Vec<TypeError>, warnings: &mut Vec<TypeWarning>, inferred: &mut HashMap<String, Type, DefaultHasherBuilder>) -> Result<(), &'static str> {
        // 模拟通用类型检查
        inferred.insert("generic_var".to_string(), Type::TypeVariable(TypeVariable {
            name: "T".to_string(),
            id: 1,
            constraints: Vec::new(),
            is_solved: false,
        }));

        Ok(())
    }

    /// 初始化类型环境
    fn init_type_environment(&mut self) -> Result<(), &'static str> {
        self.type_environment = TypeEnvironment::new();

        // 添加基础类型
        self.type_environment.type_bindings.insert("bool".to_string(), Type::Primitive(PrimitiveType::Bool));
        self.type_environment.type_bindings.insert("i8".to_string(), Type::Primitive(PrimitiveType::I8));
        self.type_environment.type_bindings.insert("i16".to_string(), Type::Primitive(PrimitiveType::I16));
        self.type_environment.type_bindings.insert("i32".to_string(), Type::Primitive(PrimitiveType::I32));
        self.type_environment.type_bindings.insert("i64".to_string(), Type::Primitive(PrimitiveType::I64));
        self.type_environment.type_bindings.insert("u8".to_string(), Type::Primitive(PrimitiveType::U8));
        self.type_environment.type_bindings.insert("u16".to_string(), Type::Primitive(PrimitiveType::U16));
        self.type_environment.type_bindings.insert("u32".to_string(), Type::Primitive(PrimitiveType::U32));
        self.type_environment.type_bindings.insert("u64".to_string(), Type::Primitive(PrimitiveType::U64));
        self.type_environment.type_bindings.insert("f32".to_string(), Type::Primitive(PrimitiveType::F32));
        self.type_environment.type_bindings.insert("f64".to_string(), Type::Primitive(PrimitiveType::F64));
        self.type_environment.type_bindings.insert("char".to_string(), Type::Primitive(PrimitiveType::Char));
        self.type_environment.type_bindings.insert("void".to_string(), Type::Primitive(PrimitiveType::Void));

        // 添加隐式转换规则
        self.type_environment.implicit_conversions.push(ImplicitConversion {
            source_type: Type::Primitive(PrimitiveType::I32),
            target_type: Type::Primitive(PrimitiveType::F64),
            cost: 1,
            conversion_function: None,
            is_safe: true,
        });

        Ok(())
    }

    /// 更新统计信息
    fn update_statistics(&mut self, result: &VerificationResult) {
        self.stats.total_checks += 1;
        if matches!(result.status, VerificationStatus::Verified) {
            self.stats.successful_checks += 1;
        } else {
            self.stats.failed_checks += 1;
        }

        self.stats.total_errors += result.statistics.bugs_found;
        self.stats.total_warnings += 0; // 从结果中提取警告数

        self.stats.avg_checking_time_ms =
            (self.stats.avg_checking_time_ms + result.verification_time_ms) / 2;
        self.stats.max_checking_time_ms =
            self.stats.max_checking_time_ms.max(result.verification_time_ms);
    }

    /// 获取统计信息
    pub fn get_statistics(&self) -> TypeCheckingStats {
        self.stats.clone()
    }

    /// 重置统计信息
    pub fn reset_statistics(&mut self) {
        self.stats = TypeCheckingStats::default();
    }

    /// 停止类型检查器
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        self.running.store(false, Ordering::SeqCst);
        crate::println!("[TypeChecker] Type checker shutdown successfully");
        Ok(())
    }
}

impl TypeEnvironment {
    /// 创建新的类型环境
    pub fn new() -> Self {
        Self {
            type_bindings: HashMap::with_hasher(DefaultHasherBuilder),
            type_variable_bindings: HashMap::with_hasher(DefaultHasherBuilder),
            scope_stack: Vec::new(),
            current_scope: None,
            type_aliases: HashMap::with_hasher(DefaultHasherBuilder),
            implicit_conversions: Vec::new(),
        }
    }
}

impl InferenceContext {
    /// 创建新的推导上下文
    pub fn new() -> Self {
        Self {
            current_scope: 0,
            local_variable_types: HashMap::with_hasher(DefaultHasherBuilder),
            function_signatures: HashMap::with_hasher(DefaultHasherBuilder),
            generic_instantiations: HashMap::with_hasher(DefaultHasherBuilder),
        }
    }
}

/// 创建默认的类型检查器
pub fn create_type_checker() -> Arc<Mutex<TypeChecker>> {
    Arc::new(Mutex::new(TypeChecker::new()))
}
impl Eq for StructType {}

impl StructType {
    pub fn methods_equal(&self, other: &Self) -> bool {
        self.methods.len() == other.methods.len()
    }
}
