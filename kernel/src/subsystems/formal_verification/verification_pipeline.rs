// Verification Pipeline Module

extern crate alloc;
//
// 验证管道模块
// 整合所有形式化验证工具，提供统一的验证流程

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

/// 验证管道
pub struct VerificationPipeline {
    /// 管道ID
    pub id: u64,
    /// 管道配置
    config: PipelineConfig,
    /// 验证阶段
    phases: Vec<VerificationPhase>,
    /// 管道统计
    stats: PipelineStats,
    /// 是否正在运行
    running: AtomicBool,
}

/// 管道配置
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// 并行执行
    pub parallel_execution: bool,
    /// 快速失败
    pub fail_fast: bool,
    /// 超时时间（秒）
    pub timeout_seconds: u64,
    /// 内存限制（MB）
    pub memory_limit_mb: u64,
    /// 输出格式
    pub output_format: OutputFormat,
    /// 详细程度
    pub verbosity: u8,
    /// 保存中间结果
    pub save_intermediate_results: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel_execution: false,
            fail_fast: true,
            timeout_seconds: 600,
            memory_limit_mb: 2048,
            output_format: OutputFormat::JSON,
            verbosity: 1,
            save_intermediate_results: false,
        }
    }
}

/// 验证阶段
#[derive(Debug)]
pub struct VerificationPhase {
    /// 阶段ID
    pub id: u64,
    /// 阶段名称
    pub name: String,
    /// 阶段类型
    pub phase_type: VerificationType,
    /// 阶段配置
    pub configuration: HashMap<String, String, crate::compat::DefaultHasherBuilder>,
    /// 依赖阶段
    pub dependencies: Vec<u64>,
    /// 阶段状态
    pub status: PhaseStatus,
    /// 执行顺序
    pub execution_order: u32,
    /// 是否为必需阶段
    pub is_required: bool,
}

impl Clone for VerificationPhase {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            phase_type: self.phase_type,
            configuration: self.configuration.clone(),
            dependencies: self.dependencies.clone(),
            status: self.status,
            execution_order: self.execution_order,
            is_required: self.is_required,
        }
    }
}

/// 阶段状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    /// 未开始
    NotStarted,
    /// 进行中
    InProgress,
    /// 已完成
    Completed,
    /// 失败
    Failed,
    /// 跳过
    Skipped,
}

/// 管道统计
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// 总验证次数
    pub total_verifications: u64,
    /// 成功验证次数
    pub successful_verifications: u64,
    /// 失败验证次数
    pub failed_verifications: u64,
    /// 平均执行时间（毫秒）
    pub avg_execution_time_ms: u64,
    /// 最长执行时间（毫秒）
    pub max_execution_time_ms: u64,
    /// 内存使用峰值（字节）
    pub peak_memory_usage: u64,
    /// 验证的目标数
    pub targets_verified: u64,
}

impl VerificationPipeline {
    /// 创建新的验证管道
    pub fn new() -> Self {
        Self {
            id: 1,
            config: PipelineConfig::default(),
            phases: Self::create_default_phases(),
            stats: PipelineStats::default(),
            running: AtomicBool::new(false),
        }
    }

    /// 初始化验证管道
    pub fn init(&mut self) -> Result<(), &'static str> {
        self.running.store(true, Ordering::SeqCst);

        crate::println!("[VerificationPipeline] Verification pipeline initialized successfully");
        Ok(())
    }

    /// 执行验证
    pub fn execute_verification(&mut self, targets: &[VerificationTarget], properties: &[VerificationProperty]) -> Result<Vec<VerificationResult>, &'static str> {
        if !self.running.load(Ordering::SeqCst) {
            return Err("Verification pipeline is not running");
        }

        let start_time_ms = 0u64; // TODO: Implement proper timestamp
        let mut all_results = Vec::new();

        // 按顺序执行各个验证阶段 - 使用索引避免借用冲突
        let phase_count = self.phases.len();
        for i in 0..phase_count {
            let phase_type = self.phases[i].phase_type;
            if phase_type == VerificationType::SpecificationVerification {
                continue; // 跳过综合验证阶段
            }

            // 更新阶段状态
            self.phases[i].status = PhaseStatus::InProgress;

            let phase_results = match phase_type {
                VerificationType::ModelChecking => {
                    let mut phase = self.phases[i].clone();
                    let result = self.execute_model_checking_phase(targets, &mut phase);
                    self.phases[i] = phase;
                    result
                }
                VerificationType::TheoremProving => {
                    let mut phase = self.phases[i].clone();
                    let result = self.execute_theorem_proving_phase(properties, &mut phase);
                    self.phases[i] = phase;
                    result
                }
                VerificationType::StaticAnalysis => {
                    let mut phase = self.phases[i].clone();
                    let result = self.execute_static_analysis_phase(targets, &mut phase);
                    self.phases[i] = phase;
                    result
                }
                VerificationType::TypeChecking => {
                    let mut phase = self.phases[i].clone();
                    let result = self.execute_type_checking_phase(targets, &mut phase);
                    self.phases[i] = phase;
                    result
                }
                VerificationType::MemorySafety => {
                    let mut phase = self.phases[i].clone();
                    let result = self.execute_memory_safety_phase(targets, &mut phase);
                    self.phases[i] = phase;
                    result
                }
                VerificationType::ConcurrencyVerification => {
                    let mut phase = self.phases[i].clone();
                    let result = self.execute_concurrency_phase(targets, &mut phase);
                    self.phases[i] = phase;
                    result
                }
                VerificationType::SecurityVerification => {
                    let mut phase = self.phases[i].clone();
                    let result = self.execute_security_phase(properties, &mut phase);
                    self.phases[i] = phase;
                    result
                }
                _ => {
                    Ok(Vec::new())
                }
            }?;

            if phase_results.is_empty() {
                self.phases[i].status = PhaseStatus::Completed;
            } else if phase_results.iter().any(|r| matches!(r.status, VerificationStatus::Failed)) {
                self.phases[i].status = PhaseStatus::Failed;
                if self.config.fail_fast {
                    return Ok(phase_results);
                }
            } else {
                self.phases[i].status = PhaseStatus::Completed;
            }

            all_results.extend(phase_results);
        }

        // 更新统计信息
        let elapsed_ms = 0u64; // TODO: Implement proper timestamp
        self.update_statistics(&all_results, elapsed_ms);

        Ok(all_results)
    }

    /// 执行模型检查阶段
    fn execute_model_checking_phase(&self, targets: &[VerificationTarget], _phase: &VerificationPhase) -> Result<Vec<VerificationResult>, &'static str> {
        // 模拟模型检查阶段
        let mut results = Vec::new();

        for target in targets {
            if target.target_type == VerificationTargetType::Function {
                results.push(VerificationResult {
                    id: results.len() as u64 + 1,
                    status: VerificationStatus::Verified,
                    severity: VerificationSeverity::Info,
                    message: format!("Model checking completed for {}", target.name),
                    proof_object: None,
                    counterexample: None,
                    verification_time_ms: 500,
                    memory_used: 1024 * 1024,
                    statistics: VerificationStatistics::default(),
                    metadata: BTreeMap::new(),
                });
            }
        }

        Ok(results)
    }

    /// 执行定理证明阶段
    fn execute_theorem_proving_phase(&self, properties: &[VerificationProperty], _phase: &VerificationPhase) -> Result<Vec<VerificationResult>, &'static str> {
        // 模拟定理证明阶段
        let mut results = Vec::new();

        for property in properties {
            results.push(VerificationResult {
                id: results.len() as u64 + 1,
                status: VerificationStatus::Verified,
                severity: VerificationSeverity::Info,
                message: format!("Theorem proving completed for {}", property.name),
                proof_object: None,
                counterexample: None,
                verification_time_ms: 800,
                memory_used: 2048 * 1024,
                statistics: VerificationStatistics::default(),
                metadata: BTreeMap::new(),
            });
        }

        Ok(results)
    }

    /// 执行静态分析阶段
    fn execute_static_analysis_phase(&self, targets: &[VerificationTarget], _phase: &VerificationPhase) -> Result<Vec<VerificationResult>, &'static str> {
        // 模拟静态分析阶段
        let mut results = Vec::new();

        for target in targets {
            results.push(VerificationResult {
                id: results.len() as u64 + 1,
                status: VerificationStatus::Verified,
                severity: VerificationSeverity::Info,
                message: format!("Static analysis completed for {}", target.name),
                proof_object: None,
                counterexample: None,
                verification_time_ms: 300,
                memory_used: 512 * 1024,
                statistics: VerificationStatistics::default(),
                metadata: BTreeMap::new(),
            });
        }

        Ok(results)
    }

    /// 执行类型检查阶段
    fn execute_type_checking_phase(&self, targets: &[VerificationTarget], _phase: &VerificationPhase) -> Result<Vec<VerificationResult>, &'static str> {
        // 模拟类型检查阶段
        let mut results = Vec::new();

        for target in targets {
            results.push(VerificationResult {
                id: results.len() as u64 + 1,
                status: VerificationStatus::Verified,
                severity: VerificationSeverity::Info,
                message: format!("Type checking completed for {}", target.name),
                proof_object: None,
                counterexample: None,
                verification_time_ms: 200,
                memory_used: 256 * 1024,
                statistics: VerificationStatistics::default(),
                metadata: BTreeMap::new(),
            });
        }

        Ok(results)
    }

    /// 执行内存安全阶段
    fn execute_memory_safety_phase(&self, targets: &[VerificationTarget], _phase: &VerificationPhase) -> Result<Vec<VerificationResult>, &'static str> {
        // 模拟内存安全验证阶段
        let mut results = Vec::new();

        for target in targets {
            results.push(VerificationResult {
                id: results.len() as u64 + 1,
                status: VerificationStatus::Verified,
                severity: VerificationSeverity::Info,
                message: format!("Memory safety verification completed for {}", target.name),
                proof_object: None,
                counterexample: None,
                verification_time_ms: 400,
                memory_used: 768 * 1024,
                statistics: VerificationStatistics::default(),
                metadata: BTreeMap::new(),
            });
        }

        Ok(results)
    }

    /// 执行并发验证阶段
    fn execute_concurrency_phase(&self, targets: &[VerificationTarget], _phase: &VerificationPhase) -> Result<Vec<VerificationResult>, &'static str> {
        // 模拟并发验证阶段
        let mut results = Vec::new();

        for target in targets {
            results.push(VerificationResult {
                id: results.len() as u64 + 1,
                status: VerificationStatus::Verified,
                severity: VerificationSeverity::Info,
                message: format!("Concurrency verification completed for {}", target.name),
                proof_object: None,
                counterexample: None,
                verification_time_ms: 600,
                memory_used: 1536 * 1024,
                statistics: VerificationStatistics::default(),
                metadata: BTreeMap::new(),
            });
        }

        Ok(results)
    }

    /// 执行安全验证阶段
    fn execute_security_phase(&self, properties: &[VerificationProperty], _phase: &VerificationPhase) -> Result<Vec<VerificationResult>, &'static str> {
        // 模拟安全验证阶段
        let mut results = Vec::new();

        for property in properties {
            results.push(VerificationResult {
                id: results.len() as u64 + 1,
                status: VerificationStatus::Verified,
                severity: VerificationSeverity::Info,
                message: format!("Security verification completed for {}", property.name),
                proof_object: None,
                counterexample: None,
                verification_time_ms: 450,
                memory_used: 1280 * 1024,
                statistics: VerificationStatistics::default(),
                metadata: BTreeMap::new(),
            });
        }

        Ok(results)
    }

    /// 创建默认验证阶段
    fn create_default_phases() -> Vec<VerificationPhase> {
        vec![
            VerificationPhase {
                id: 1,
                name: "Type Checking".to_string(),
                phase_type: VerificationType::TypeChecking,
                configuration: HashMap::with_hasher(DefaultHasherBuilder),
                dependencies: Vec::new(),
                status: PhaseStatus::NotStarted,
                execution_order: 1,
                is_required: true,
            },
            VerificationPhase {
                id: 2,
                name: "Static Analysis".to_string(),
                phase_type: VerificationType::StaticAnalysis,
                configuration: HashMap::with_hasher(DefaultHasherBuilder),
                dependencies: vec![1],
                status: PhaseStatus::NotStarted,
                execution_order: 2,
                is_required: true,
            },
            VerificationPhase {
                id: 3,
                name: "Memory Safety Verification".to_string(),
                phase_type: VerificationType::MemorySafety,
                configuration: HashMap::with_hasher(DefaultHasherBuilder),
                dependencies: vec![1, 2],
                status: PhaseStatus::NotStarted,
                execution_order: 3,
                is_required: true,
            },
            VerificationPhase {
                id: 4,
                name: "Concurrency Verification".to_string(),
                phase_type: VerificationType::ConcurrencyVerification,
                configuration: HashMap::with_hasher(DefaultHasherBuilder),
                dependencies: vec![1, 2],
                status: PhaseStatus::NotStarted,
                execution_order: 4,
                is_required: false,
            },
            VerificationPhase {
                id: 5,
                name: "Security Verification".to_string(),
                phase_type: VerificationType::SecurityVerification,
                configuration: HashMap::with_hasher(DefaultHasherBuilder),
                dependencies: vec![1, 2, 3],
                status: PhaseStatus::NotStarted,
                execution_order: 5,
                is_required: true,
            },
            VerificationPhase {
                id: 6,
                name: "Model Checking".to_string(),
                phase_type: VerificationType::ModelChecking,
                configuration: HashMap::with_hasher(DefaultHasherBuilder),
                dependencies: vec![1, 2],
                status: PhaseStatus::NotStarted,
                execution_order: 6,
                is_required: false,
            },
            VerificationPhase {
                id: 7,
                name: "Theorem Proving".to_string(),
                phase_type: VerificationType::TheoremProving,
                configuration: HashMap::with_hasher(DefaultHasherBuilder),
                dependencies: vec![1, 2],
                status: PhaseStatus::NotStarted,
                execution_order: 7,
                is_required: false,
            },
            VerificationPhase {
                id: 8,
                name: "Comprehensive Verification".to_string(),
                phase_type: VerificationType::SpecificationVerification,
                configuration: HashMap::with_hasher(DefaultHasherBuilder),
                dependencies: vec![1, 2, 3, 4, 5, 6, 7],
                status: PhaseStatus::NotStarted,
                execution_order: 8,
                is_required: true,
            },
        ]
    }

    /// 更新统计信息
    fn update_statistics(&mut self, results: &[VerificationResult], execution_time_ms: u64) {
        self.stats.total_verifications += 1;
        self.stats.targets_verified += results.len() as u64;

        if results.iter().all(|r| matches!(r.status, VerificationStatus::Verified)) {
            self.stats.successful_verifications += 1;
        } else {
            self.stats.failed_verifications += 1;
        }

        self.stats.avg_execution_time_ms =
            (self.stats.avg_execution_time_ms + execution_time_ms) / 2;
        self.stats.max_execution_time_ms =
            self.stats.max_execution_time_ms.max(execution_time_ms);
    }

    /// 获取统计信息
    pub fn get_statistics(&self) -> PipelineStats {
        self.stats.clone()
    }

    /// 重置统计信息
    pub fn reset_statistics(&mut self) {
        self.stats = PipelineStats::default();
    }

    /// 停止验证管道
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        self.running.store(false, Ordering::SeqCst);

        // 重置所有阶段状态
        for phase in &mut self.phases {
            phase.status = PhaseStatus::NotStarted;
        }

        crate::println!("[VerificationPipeline] Verification pipeline shutdown successfully");
        Ok(())
    }
}

/// 创建默认的验证管道
pub fn create_verification_pipeline() -> Arc<Mutex<VerificationPipeline>> {
    Arc::new(Mutex::new(VerificationPipeline::new()))
}