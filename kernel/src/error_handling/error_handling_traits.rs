//! Error Handling Traits and Interfaces
//! 
//! 错误处理接口和特征定义
//! 提供统一的错误处理接口和标准化工具

extern crate alloc;
use alloc::{
    collections::BTreeMap,
    sync::Arc,
    vec::Vec,
    string::{String, ToString},
    boxed::Box,
};
use core::sync::atomic::{AtomicU64, Ordering};

use crate::time::get_timestamp;
use super::{
    ErrorRecord, ErrorCategory, ErrorSeverity, ErrorType,
    UnifiedError, ErrorPriority, EnhancedErrorContext,
    error_prediction::{ErrorPredictor, ErrorPrediction, PreventionAction},
    self_healing::{SelfHealingSystem, SelfHealingStrategy, HealingExecution}
};

/// 统一错误处理器特征
pub trait ErrorHandler: Send + Sync {
    /// 处理错误
    fn handle_error(&self, error: UnifiedError) -> Result<ErrorHandlingResult, &'static str>;
    
    /// 获取处理器名称
    fn name(&self) -> &str;
    
    /// 获取处理器版本
    fn version(&self) -> &str;
    
    /// 检查是否支持特定错误类型
    fn supports_error_type(&self, error_type: ErrorType) -> bool;
    
    /// 获取处理器统计信息
    fn get_statistics(&self) -> HandlerStatistics;
}

/// 错误处理结果
#[derive(Debug, Clone)]
pub struct ErrorHandlingResult {
    /// 处理是否成功
    pub success: bool,
    /// 处理结果消息
    pub message: String,
    /// 执行的动作
    pub performed_actions: Vec<String>,
    /// 错误是否已解决
    pub error_resolved: bool,
    /// 处理时间（毫秒）
    pub processing_time_ms: u64,
    /// 额外的元数据
    pub metadata: BTreeMap<String, String>,
}

/// 处理器统计信息
#[derive(Debug, Clone, Default)]
pub struct HandlerStatistics {
    /// 处理的错误总数
    pub total_errors_handled: u64,
    /// 成功处理的错误数
    pub successful_handlings: u64,
    /// 失败处理的错误数
    pub failed_handlings: u64,
    /// 平均处理时间（毫秒）
    pub avg_processing_time_ms: u64,
    /// 成功率
    pub success_rate: f64,
    /// 最后处理时间
    pub last_handling_time: u64,
    /// 按错误类型统计
    pub errors_by_type: BTreeMap<ErrorType, u64>,
}

/// 错误恢复器特征
pub trait ErrorRecoverer: Send + Sync {
    /// 尝试恢复错误
    fn recover_from_error(&self, error: &UnifiedError) -> Result<RecoveryResult, &'static str>;
    
    /// 获取恢复器名称
    fn name(&self) -> &str;
    
    /// 获取支持的错误类别
    fn supported_categories(&self) -> Vec<ErrorCategory>;
    
    /// 获取恢复策略
    fn get_recovery_strategy(&self, error: &UnifiedError) -> Option<RecoveryStrategy>;
    
    /// 检查是否可以恢复
    fn can_recover(&self, error: &UnifiedError) -> bool;
}

/// 恢复结果
#[derive(Debug, Clone)]
pub struct RecoveryResult {
    /// 恢复是否成功
    pub success: bool,
    /// 恢复方法
    pub method: String,
    /// 恢复时间（毫秒）
    pub recovery_time_ms: u64,
    /// 恢复描述
    pub description: String,
    /// 恢复后的状态
    pub post_recovery_state: BTreeMap<String, String>,
    /// 是否需要人工干预
    pub requires_manual_intervention: bool,
}

/// 恢复策略
#[derive(Debug, Clone)]
pub struct RecoveryStrategy {
    /// 策略ID
    pub id: u64,
    /// 策略名称
    pub name: String,
    /// 策略描述
    pub description: String,
    /// 策略优先级
    pub priority: RecoveryPriority,
    /// 预期恢复时间（毫秒）
    pub expected_recovery_time_ms: u64,
    /// 成功率
    pub success_rate: f64,
    /// 恢复动作
    pub actions: Vec<RecoveryAction>,
}

/// 恢复优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RecoveryPriority {
    /// 低优先级
    Low = 1,
    /// 中等优先级
    Medium = 2,
    /// 高优先级
    High = 3,
    /// 紧急优先级
    Critical = 4,
}

/// 恢复动作
#[derive(Debug, Clone)]
pub struct RecoveryAction {
    /// 动作ID
    pub id: u64,
    /// 动作名称
    pub name: String,
    /// 动作描述
    pub description: String,
    /// 动作类型
    pub action_type: RecoveryActionType,
    /// 执行参数
    pub parameters: BTreeMap<String, String>,
    /// 预期执行时间（毫秒）
    pub expected_execution_time_ms: u64,
}

/// 恢复动作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryActionType {
    /// 重试操作
    Retry,
    /// 重启服务
    RestartService,
    /// 重置状态
    ResetState,
    /// 回滚操作
    Rollback,
    /// 释放资源
    ReleaseResource,
    /// 重新分配资源
    ReallocateResource,
    /// 切换到备份
    SwitchToBackup,
    /// 隔离组件
    IsolateComponent,
    /// 降级服务
    DegradeService,
    /// 扩容资源
    ScaleUp,
    /// 缩容资源
    ScaleDown,
    /// 自定义动作
    Custom,
}

/// 错误诊断器特征
pub trait ErrorDiagnoser: Send + Sync {
    /// 诊断错误
    fn diagnose_error(&self, error: &UnifiedError, context: &EnhancedErrorContext) -> Result<DiagnosisResult, &'static str>;
    
    /// 获取诊断器名称
    fn name(&self) -> &str;
    
    /// 获取支持的错误类型
    fn supported_error_types(&self) -> Vec<ErrorType>;
    
    /// 获取诊断深度
    fn diagnosis_depth(&self) -> DiagnosisDepth;
}

/// 诊断结果
#[derive(Debug, Clone)]
pub struct DiagnosisResult {
    /// 诊断ID
    pub id: u64,
    /// 诊断时间
    pub diagnosis_time: u64,
    /// 根本原因
    pub root_cause: String,
    /// 影响范围
    pub impact_scope: ImpactScope,
    /// 严重程度评估
    pub severity_assessment: ErrorSeverity,
    /// 相关组件
    pub affected_components: Vec<String>,
    /// 建议的修复方案
    pub recommended_fixes: Vec<String>,
    /// 预防措施
    pub preventive_measures: Vec<String>,
    /// 诊断置信度
    pub confidence: f64,
    /// 诊断元数据
    pub metadata: BTreeMap<String, String>,
}

/// 影响范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactScope {
    /// 局部影响
    Local,
    /// 模块影响
    Module,
    /// 系统影响
    System,
    /// 全局影响
    Global,
}

/// 诊断深度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosisDepth {
    /// 浅层诊断
    Shallow,
    /// 标准诊断
    Standard,
    /// 深度诊断
    Deep,
    /// 全面诊断
    Comprehensive,
}

/// 错误预测器特征
pub trait ErrorPredictorTrait: Send + Sync {
    /// 预测潜在错误
    fn predict_errors(&self) -> Result<Vec<ErrorPrediction>, &'static str>;
    
    /// 获取预测器名称
    fn name(&self) -> &str;
    
    /// 获取预测准确率
    fn get_accuracy(&self) -> f64;
    
    /// 更新预测模型
    fn update_model(&self, error_record: &ErrorRecord) -> Result<(), &'static str>;
}

/// 错误监听器特征
pub trait ErrorListener: Send + Sync {
    /// 错误发生时的回调
    fn on_error_occurred(&self, error: &UnifiedError, context: &EnhancedErrorContext);
    
    /// 错误解决时的回调
    fn on_error_resolved(&self, error: &UnifiedError, resolution: &str);
    
    /// 错误升级时的回调
    fn on_error_escalated(&self, error: &UnifiedError, escalation_level: ErrorSeverity);
    
    /// 获取监听器名称
    fn name(&self) -> &str;
}

/// 统一错误处理管理器
pub struct UnifiedErrorHandlingManager {
    /// 管理器ID
    pub id: u64,
    /// 错误处理器
    handlers: Arc<Vec<Box<dyn ErrorHandler>>>,
    /// 错误恢复器
    recoverers: Arc<Vec<Box<dyn ErrorRecoverer>>>,
    /// 错误诊断器
    diagnosers: Arc<Vec<Box<dyn ErrorDiagnoser>>>,
    /// 错误预测器
    predictors: Arc<Vec<Box<dyn ErrorPredictorTrait>>>,
    /// 错误监听器
    listeners: Arc<Vec<Box<dyn ErrorListener>>>,
    /// 错误预测器实例
    error_predictor: Arc<ErrorPredictor>,
    /// 自愈合系统实例
    self_healing_system: Arc<SelfHealingSystem>,
    /// 统计信息
    stats: Arc<ManagerStatistics>,
    /// 错误计数器
    error_counter: AtomicU64,
}

/// 管理器统计信息
#[derive(Debug, Clone, Default)]
pub struct ManagerStatistics {
    /// 总处理错误数
    pub total_errors_processed: u64,
    /// 成功处理数
    pub successful_processings: u64,
    /// 失败处理数
    pub failed_processings: u64,
    /// 平均处理时间（毫秒）
    pub avg_processing_time_ms: u64,
    /// 成功率
    pub success_rate: f64,
    /// 预测并防止的错误数
    pub predicted_and_prevented_errors: u64,
    /// 自动恢复的错误数
    pub auto_recovered_errors: u64,
    /// 最后处理时间
    pub last_processing_time: u64,
}

impl UnifiedErrorHandlingManager {
    /// 创建新的统一错误处理管理器
    pub fn new(
        error_predictor: Arc<ErrorPredictor>,
        self_healing_system: Arc<SelfHealingSystem>,
    ) -> Self {
        Self {
            id: 1,
            handlers: Arc::new(Vec::new()),
            recoverers: Arc::new(Vec::new()),
            diagnosers: Arc::new(Vec::new()),
            predictors: Arc::new(Vec::new()),
            listeners: Arc::new(Vec::new()),
            error_predictor,
            self_healing_system,
            stats: Arc::new(ManagerStatistics::default()),
            error_counter: AtomicU64::new(1),
        }
    }

    /// 注册错误处理器
    pub fn register_handler(&self, handler: Box<dyn ErrorHandler>) {
        let mut handlers = Arc::as_ptr(&self.handlers) as *mut Vec<Box<dyn ErrorHandler>>;
        unsafe {
            (*handlers).push(handler);
        }
    }

    /// 注册错误恢复器
    pub fn register_recoverer(&self, recoverer: Box<dyn ErrorRecoverer>) {
        let mut recoverers = Arc::as_ptr(&self.recoverers) as *mut Vec<Box<dyn ErrorRecoverer>>;
        unsafe {
            (*recoverers).push(recoverer);
        }
    }

    /// 注册错误诊断器
    pub fn register_diagnoser(&self, diagnoser: Box<dyn ErrorDiagnoser>) {
        let mut diagnosers = Arc::as_ptr(&self.diagnosers) as *mut Vec<Box<dyn ErrorDiagnoser>>;
        unsafe {
            (*diagnosers).push(diagnoser);
        }
    }

    /// 注册错误预测器
    pub fn register_predictor(&self, predictor: Box<dyn ErrorPredictorTrait>) {
        let mut predictors = Arc::as_ptr(&self.predictors) as *mut Vec<Box<dyn ErrorPredictorTrait>>;
        unsafe {
            (*predictors).push(predictor);
        }
    }

    /// 注册错误监听器
    pub fn register_listener(&self, listener: Box<dyn ErrorListener>) {
        let mut listeners = Arc::as_ptr(&self.listeners) as *mut Vec<Box<dyn ErrorListener>>;
        unsafe {
            (*listeners).push(listener);
        }
    }

    /// 处理错误
    pub fn handle_error(&self, error: UnifiedError, context: EnhancedErrorContext) -> Result<ErrorHandlingResult, &'static str> {
        let start_time = get_timestamp();
        let error_id = self.error_counter.fetch_add(1, Ordering::SeqCst);

        // 通知监听器错误发生
        self.notify_error_occurred(&error, &context);

        // 诊断错误
        let diagnosis_result = self.diagnose_error(&error, &context)?;

        // 尝试恢复
        let recovery_result = self.recover_from_error(&error)?;

        // 记录错误到预测器
        let error_record = self.create_error_record(&error, &context, &diagnosis_result);
        let _ = self.error_predictor.add_error_record(error_record);

        // 触发自愈合
        let _ = self.self_healing_system.handle_error(&error_record);

        // 通知监听器错误解决
        self.notify_error_resolved(&error, &recovery_result.method);

        // 更新统计信息
        let processing_time = get_timestamp() - start_time;
        self.update_statistics(true, processing_time);

        Ok(ErrorHandlingResult {
            success: recovery_result.success,
            message: format!("Error processed with recovery: {}", recovery_result.description),
            performed_actions: vec![recovery_result.method],
            error_resolved: recovery_result.success,
            processing_time_ms: processing_time,
            metadata: BTreeMap::new(),
        })
    }

    /// 诊断错误
    fn diagnose_error(&self, error: &UnifiedError, context: &EnhancedErrorContext) -> Result<DiagnosisResult, &'static str> {
        let diagnosers = unsafe { &*Arc::as_ptr(&self.diagnosers) };
        
        for diagnoser in diagnosers {
            if diagnoser.supported_error_types().contains(&error.error_type()) {
                return diagnoser.diagnose_error(error, context);
            }
        }

        // 默认诊断结果
        Ok(DiagnosisResult {
            id: self.error_counter.load(Ordering::SeqCst),
            diagnosis_time: get_timestamp(),
            root_cause: format!("Error of type {:?}", error.error_type()),
            impact_scope: ImpactScope::Local,
            severity_assessment: error.severity(),
            affected_components: vec![],
            recommended_fixes: vec!["Restart the affected component".to_string()],
            preventive_measures: vec!["Monitor system resources".to_string()],
            confidence: 0.5,
            metadata: BTreeMap::new(),
        })
    }

    /// 尝试恢复错误
    fn recover_from_error(&self, error: &UnifiedError) -> Result<RecoveryResult, &'static str> {
        let recoverers = unsafe { &*Arc::as_ptr(&self.recoverers) };
        
        for recoverer in recoverers {
            if recoverer.can_recover(error) {
                return recoverer.recover_from_error(error);
            }
        }

        // 默认恢复结果
        Ok(RecoveryResult {
            success: false,
            method: "No recovery available".to_string(),
            recovery_time_ms: 0,
            description: "No suitable recovery method found".to_string(),
            post_recovery_state: BTreeMap::new(),
            requires_manual_intervention: true,
        })
    }

    /// 创建错误记录
    fn create_error_record(&self, error: &UnifiedError, context: &EnhancedErrorContext, diagnosis: &DiagnosisResult) -> ErrorRecord {
        ErrorRecord {
            id: self.error_counter.load(Ordering::SeqCst),
            code: error.error_code(),
            error_type: error.error_type(),
            category: error.category(),
            severity: error.severity(),
            status: super::ErrorStatus::New,
            message: error.message().to_string(),
            description: diagnosis.root_cause.clone(),
            source: super::ErrorSource {
                module: "unknown".to_string(),
                function: "unknown".to_string(),
                file: "unknown".to_string(),
                line: 0,
                column: 0,
                process_id: 0,
                thread_id: 0,
                cpu_id: 0,
            },
            timestamp: get_timestamp(),
            context: super::ErrorContext {
                environment_variables: BTreeMap::new(),
                system_config: BTreeMap::new(),
                user_input: None,
                related_data: Vec::new(),
                operation_sequence: Vec::new(),
                preconditions: Vec::new(),
                postconditions: Vec::new(),
            },
            stack_trace: Vec::new(),
            system_state: super::SystemStateSnapshot::default(),
            recovery_actions: Vec::new(),
            occurrence_count: 1,
            last_occurrence: get_timestamp(),
            resolved: false,
            resolution_time: None,
            resolution_method: None,
            metadata: BTreeMap::new(),
        }
    }

    /// 通知错误发生
    fn notify_error_occurred(&self, error: &UnifiedError, context: &EnhancedErrorContext) {
        let listeners = unsafe { &*Arc::as_ptr(&self.listeners) };
        for listener in listeners {
            listener.on_error_occurred(error, context);
        }
    }

    /// 通知错误解决
    fn notify_error_resolved(&self, error: &UnifiedError, resolution: &str) {
        let listeners = unsafe { &*Arc::as_ptr(&self.listeners) };
        for listener in listeners {
            listener.on_error_resolved(error, resolution);
        }
    }

    /// 更新统计信息
    fn update_statistics(&self, success: bool, processing_time: u64) {
        let mut stats = unsafe { &mut *Arc::as_ptr(&self.stats) as *mut ManagerStatistics };
        unsafe {
            (*stats).total_errors_processed += 1;
            if success {
                (*stats).successful_processings += 1;
            } else {
                (*stats).failed_processings += 1;
            }
            
            // 更新平均处理时间
            if (*stats).total_errors_processed > 0 {
                (*stats).avg_processing_time_ms = 
                    ((*stats).avg_processing_time_ms * ((*stats).total_errors_processed - 1) + processing_time) / (*stats).total_errors_processed;
            }
            
            // 更新成功率
            (*stats).success_rate = (*stats).successful_processings as f64 / (*stats).total_errors_processed as f64;
            (*stats).last_processing_time = get_timestamp();
        }
    }

    /// 获取统计信息
    pub fn get_statistics(&self) -> ManagerStatistics {
        let stats = unsafe { &*Arc::as_ptr(&self.stats) };
        stats.clone()
    }

    /// 执行预测
    pub fn perform_prediction(&self) -> Result<Vec<ErrorPrediction>, &'static str> {
        let predictors = unsafe { &*Arc::as_ptr(&self.predictors) };
        let mut all_predictions = Vec::new();
        
        for predictor in predictors {
            let predictions = predictor.predict_errors()?;
            all_predictions.extend(predictions);
        }
        
        // 也调用内置预测器
        let builtin_predictions = self.error_predictor.predict_errors()?;
        all_predictions.extend(builtin_predictions);
        
        Ok(all_predictions)
    }

    /// 执行健康检查
    pub fn perform_health_check(&self) -> Result<HealthCheckResult, &'static str> {
        // 简化的健康检查实现
        Ok(HealthCheckResult {
            healthy: true,
            score: 0.9,
            issues: Vec::new(),
            recommendations: Vec::new(),
            check_time: get_timestamp(),
        })
    }
}

/// 健康检查结果
#[derive(Debug, Clone)]
pub struct HealthCheckResult {
    /// 是否健康
    pub healthy: bool,
    /// 健康评分（0-1）
    pub score: f64,
    /// 发现的问题
    pub issues: Vec<String>,
    /// 建议
    pub recommendations: Vec<String>,
    /// 检查时间
    pub check_time: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // 测试用的简单错误处理器
    struct TestErrorHandler {
        name: String,
        stats: HandlerStatistics,
    }

    impl ErrorHandler for TestErrorHandler {
        fn handle_error(&self, error: UnifiedError) -> Result<ErrorHandlingResult, &'static str> {
            Ok(ErrorHandlingResult {
                success: true,
                message: format!("Handled by {}", self.name),
                performed_actions: vec!["Test action".to_string()],
                error_resolved: true,
                processing_time_ms: 10,
                metadata: BTreeMap::new(),
            })
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn version(&self) -> &str {
            "1.0.0"
        }

        fn supports_error_type(&self, _error_type: ErrorType) -> bool {
            true
        }

        fn get_statistics(&self) -> HandlerStatistics {
            self.stats.clone()
        }
    }

    #[test]
    fn test_recovery_priority_ordering() {
        assert!(RecoveryPriority::Low < RecoveryPriority::Medium);
        assert!(RecoveryPriority::Medium < RecoveryPriority::High);
        assert!(RecoveryPriority::High < RecoveryPriority::Critical);
    }

    #[test]
    fn test_diagnosis_depth_ordering() {
        assert!((DiagnosisDepth::Shallow as u8) < (DiagnosisDepth::Standard as u8));
        assert!((DiagnosisDepth::Standard as u8) < (DiagnosisDepth::Deep as u8));
        assert!((DiagnosisDepth::Deep as u8) < (DiagnosisDepth::Comprehensive as u8));
    }

    #[test]
    fn test_error_handling_result() {
        let result = ErrorHandlingResult {
            success: true,
            message: "Test success".to_string(),
            performed_actions: vec!["Action 1".to_string(), "Action 2".to_string()],
            error_resolved: true,
            processing_time_ms: 100,
            metadata: BTreeMap::new(),
        };

        assert!(result.success);
        assert_eq!(result.message, "Test success");
        assert_eq!(result.performed_actions.len(), 2);
        assert!(result.error_resolved);
        assert_eq!(result.processing_time_ms, 100);
    }

    #[test]
    fn test_recovery_strategy() {
        let strategy = RecoveryStrategy {
            id: 1,
            name: "Test Strategy".to_string(),
            description: "Test description".to_string(),
            priority: RecoveryPriority::High,
            expected_recovery_time_ms: 5000,
            success_rate: 0.85,
            actions: vec![
                RecoveryAction {
                    id: 1,
                    name: "Test Action".to_string(),
                    description: "Test action description".to_string(),
                    action_type: RecoveryActionType::Retry,
                    parameters: BTreeMap::new(),
                    expected_execution_time_ms: 1000,
                },
            ],
        };

        assert_eq!(strategy.id, 1);
        assert_eq!(strategy.name, "Test Strategy");
        assert_eq!(strategy.priority, RecoveryPriority::High);
        assert_eq!(strategy.success_rate, 0.85);
        assert_eq!(strategy.actions.len(), 1);
    }
}