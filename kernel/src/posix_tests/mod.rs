//! POSIX兼容性测试套件
//!
//! 提供全面的POSIX标准合规性测试，包括：
//! - 核心POSIX系统调用测试
//! - 高级POSIX特性测试
//! - POSIX实时扩展测试
//! - POSIX线程高级特性测试
//! - POSIX权限和安全机制测试
//! - Linux兼容性验证测试
//! - POSIX标准合规性测试
//! - 应用程序兼容性测试
//! - 性能和压力测试
//!
//! # 使用方法
//!
//! ```
//! use kernel::posix_tests::*;
//!
//! // 运行所有POSIX测试
//! run_all_posix_tests();
//!
//! // 运行特定模块测试
//! run_core_posix_tests();
//! run_advanced_posix_tests();
//! run_realtime_posix_tests();
//! ```

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

/// 测试结果类型
pub type PosixTestResult = Result<(), String>;

/// POSIX测试结果统计
#[derive(Debug, Clone, Default)]
pub struct PosixTestResults {
    /// 总测试数
    pub total_tests: u32,
    /// 通过的测试数
    pub passed_tests: u32,
    /// 失败的测试数
    pub failed_tests: u32,
    /// 跳过的测试数
    pub skipped_tests: u32,
    /// 测试错误信息
    pub errors: Vec<String>,
    /// 测试执行时间（纳秒）
    pub execution_time_ns: u64,
    /// 性能统计
    pub performance_stats: Vec<PerformanceMetric>,
}

/// 性能指标
#[derive(Debug, Clone)]
pub struct PerformanceMetric {
    /// 测试名称
    pub test_name: String,
    /// 执行时间（纳秒）
    pub execution_time_ns: u64,
    /// 内存使用（字节）
    pub memory_used_bytes: usize,
    /// CPU周期数
    pub cpu_cycles: u64,
}

impl PosixTestResults {
    /// 创建新的测试结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录测试结果
    pub fn record_result(&mut self, passed: bool, test_name: &str, error_msg: Option<&str>) {
        self.total_tests += 1;
        if passed {
            self.passed_tests += 1;
            crate::println!("  ✅ {}", test_name);
        } else {
            self.failed_tests += 1;
            crate::println!("  ❌ {}", test_name);
            if let Some(msg) = error_msg {
                crate::println!("     错误: {}", msg);
                self.errors.push(format!("{}: {}", test_name, msg));
            }
        }
    }

    /// 记录跳过的测试
    pub fn record_skip(&mut self, test_name: &str, reason: &str) {
        self.total_tests += 1;
        self.skipped_tests += 1;
        crate::println!("  ⏭️ {} (跳过: {})", test_name, reason);
    }

    /// 记录性能指标
    pub fn record_performance(&mut self, metric: PerformanceMetric) {
        self.performance_stats.push(metric);
    }

    /// 获取成功率
    pub fn success_rate(&self) -> f32 {
        if self.total_tests == 0 {
            0.0
        } else {
            (self.passed_tests as f32 / self.total_tests as f32) * 100.0
        }
    }

    /// 打印测试报告
    pub fn print_report(&self) {
        crate::println!("\n📊 POSIX测试结果统计:");
        crate::println!("  总测试数: {}", self.total_tests);
        crate::println!("  通过: {} ({:.1}%)", self.passed_tests, self.success_rate());
        crate::println!("  失败: {}", self.failed_tests);
        crate::println!("  跳过: {}", self.skipped_tests);
        crate::println!("  执行时间: {}ms", self.execution_time_ns / 1_000_000);

        if !self.errors.is_empty() {
            crate::println!("\n❌ 失败的测试:");
            for error in &self.errors {
                crate::println!("  {}", error);
            }
        }

        if !self.performance_stats.is_empty() {
            crate::println!("\n📈 性能统计:");
            for metric in &self.performance_stats {
                crate::println!("  {}: {}ms, {}KB, {}cycles",
                    metric.test_name,
                    metric.execution_time_ns / 1_000_000,
                    metric.memory_used_bytes / 1024,
                    metric.cpu_cycles);
            }
        }
    }

    /// 合并其他测试结果
    pub fn merge(&mut self, other: &PosixTestResults) {
        self.total_tests += other.total_tests;
        self.passed_tests += other.passed_tests;
        self.failed_tests += other.failed_tests;
        self.skipped_tests += other.skipped_tests;
        self.execution_time_ns += other.execution_time_ns;
        self.errors.extend_from(&other.errors);
        self.performance_stats.extend_from(&other.performance_stats);
    }
}

/// POSIX测试套件
pub struct PosixTestSuite {
    /// 测试结果
    results: PosixTestResults,
    /// 测试开始时间
    start_time_ns: u64,
}

impl PosixTestSuite {
    /// 创建新的测试套件
    pub fn new() -> Self {
        Self {
            results: PosixTestResults::new(),
            start_time_ns: crate::subsystems::time::get_time_ns(),
        }
    }

    /// 运行所有POSIX测试
    pub fn run_all_tests(&mut self) {
        crate::println!("\n🧪 开始POSIX兼容性全面测试");
        crate::println!("==========================");

        // 运行各模块测试
        self.run_core_posix_tests();
        self.run_advanced_posix_tests();
        self.run_realtime_posix_tests();
        self.run_thread_posix_tests();
        self.run_security_posix_tests();
        self.run_linux_compatibility_tests();
        self.run_posix_compliance_tests();
        self.run_application_compatibility_tests();
        self.run_performance_stress_tests();

        // 计算总执行时间
        self.results.execution_time_ns = crate::subsystems::time::get_time_ns() - self.start_time_ns;

        // 打印最终报告
        self.results.print_report();
        crate::println!("\n🏁 POSIX兼容性测试完成");
    }

    /// 运行核心POSIX系统调用测试
    fn run_core_posix_tests(&mut self) {
        crate::println!("\n🔧 核心POSIX系统调用测试:");
        crate::println!("=========================");

        // 文件系统相关测试
        self.test_filesystem_syscalls();
        
        // 进程管理相关测试
        self.test_process_syscalls();
        
        // 内存管理相关测试
        self.test_memory_syscalls();
        
        // 网络相关测试
        self.test_network_syscalls();
    }

    /// 运行高级POSIX特性测试
    fn run_advanced_posix_tests(&mut self) {
        crate::println!("\n⚡ 高级POSIX特性测试:");
        crate::println!("======================");

        // 异步I/O测试
        self.test_async_io();
        
        // 内存映射文件高级特性测试
        self.test_advanced_mmap();
        
        // 文件锁机制测试
        self.test_file_locking();
        
        // 消息队列测试
        self.test_message_queues();
    }

    /// 运行POSIX实时扩展测试
    fn run_realtime_posix_tests(&mut self) {
        crate::println!("\n⏱️ POSIX实时扩展测试:");
        crate::println!("=======================");

        // 实时调度测试
        self.test_realtime_scheduling();
        
        // 实时优先级管理测试
        self.test_realtime_priority();
        
        // 实时内存管理测试
        self.test_realtime_memory();
    }

    /// 运行POSIX线程高级特性测试
    fn run_thread_posix_tests(&mut self) {
        crate::println!("\n🧵 POSIX线程高级特性测试:");
        crate::println!("=========================");

        // 线程基础框架测试
        self.test_thread_framework();
        
        // 线程同步原语测试
        self.test_thread_synchronization();
        
        // 高级线程特性测试
        self.test_advanced_thread_features();
    }

    /// 运行POSIX权限和安全机制测试
    fn run_security_posix_tests(&mut self) {
        crate::println!("\n🔒 POSIX权限和安全机制测试:");
        crate::println!("===========================");

        // 用户和组管理测试
        self.test_user_group_management();
        
        // 文件权限测试
        self.test_file_permissions();
        
        // 能力机制测试
        self.test_capabilities();
        
        // 安全模块集成测试
        self.test_security_modules();
    }

    /// 运行Linux兼容性验证测试
    fn run_linux_compatibility_tests(&mut self) {
        crate::println!("\n🐧 Linux兼容性验证测试:");
        crate::println!("=========================");

        // Linux系统调用兼容性测试
        self.test_linux_syscall_compatibility();
        
        // Linux特定系统调用测试
        self.test_linux_specific_syscalls();
        
        // Linux二进制兼容性测试
        self.test_linux_binary_compatibility();
        
        // Linux ABI兼容性验证
        self.test_linux_abi_compatibility();
    }

    /// 运行POSIX标准合规性测试
    fn run_posix_compliance_tests(&mut self) {
        crate::println!("\n📋 POSIX标准合规性测试:");
        crate::println!("=========================");

        // POSIX.1-2008标准合规性测试
        self.test_posix_2008_compliance();
        
        // POSIX实时扩展合规性测试
        self.test_posix_realtime_compliance();
        
        // POSIX线程合规性测试
        self.test_posix_thread_compliance();
    }

    /// 运行应用程序兼容性测试
    fn run_application_compatibility_tests(&mut self) {
        crate::println!("\n📱 应用程序兼容性测试:");
        crate::println!("=======================");

        // 常见Linux应用程序兼容性测试
        self.test_common_applications();
        
        // 开源软件兼容性测试
        self.test_open_source_software();
        
        // 开发工具链兼容性测试
        self.test_development_toolchain();
    }

    /// 运行性能和压力测试
    fn run_performance_stress_tests(&mut self) {
        crate::println!("\n🔥 性能和压力测试:");
        crate::println!("==================");

        // 系统调用性能基准测试
        self.test_syscall_performance();
        
        // 高并发场景测试
        self.test_high_concurrency();
        
        // 内存压力测试
        self.test_memory_stress();
        
        // 长时间稳定性测试
        self.test_long_term_stability();
    }

    // 具体测试方法将在各个子模块中实现
    fn test_filesystem_syscalls(&mut self) {
        crate::println!("  📁 文件系统系统调用测试:");
        // 具体实现将在filesystem_tests.rs中
    }

    fn test_process_syscalls(&mut self) {
        crate::println!("  ⚙️ 进程管理系统调用测试:");
        // 具体实现将在process_tests.rs中
    }

    fn test_memory_syscalls(&mut self) {
        crate::println!("  💾 内存管理系统调用测试:");
        // 具体实现将在memory_tests.rs中
    }

    fn test_network_syscalls(&mut self) {
        crate::println!("  🌐 网络系统调用测试:");
        // 具体实现将在network_tests.rs中
    }

    fn test_async_io(&mut self) {
        crate::println!("  ⚡ 异步I/O测试:");
        // 具体实现将在async_io_tests.rs中
    }

    fn test_advanced_mmap(&mut self) {
        crate::println!("  🗺️ 高级内存映射测试:");
        // 具体实现将在advanced_mmap_tests.rs中
    }

    fn test_file_locking(&mut self) {
        crate::println!("  🔒 文件锁机制测试:");
        // 具体实现将在file_locking_tests.rs中
    }

    fn test_message_queues(&mut self) {
        crate::println!("  📨 消息队列测试:");
        // 具体实现将在message_queue_tests.rs中
    }

    fn test_realtime_scheduling(&mut self) {
        crate::println!("  ⏰ 实时调度测试:");
        // 具体实现将在realtime_tests.rs中
    }

    fn test_realtime_priority(&mut self) {
        crate::println!("  🎯 实时优先级测试:");
        // 具体实现将在realtime_tests.rs中
    }

    fn test_realtime_memory(&mut self) {
        crate::println!("  🧠 实时内存测试:");
        // 具体实现将在realtime_tests.rs中
    }

    fn test_thread_framework(&mut self) {
        crate::println!("  🧵 线程框架测试:");
        // 具体实现将在thread_tests.rs中
    }

    fn test_thread_synchronization(&mut self) {
        crate::println!("  🔗 线程同步测试:");
        // 具体实现将在thread_tests.rs中
    }

    fn test_advanced_thread_features(&mut self) {
        crate::println!("  ⚡ 高级线程特性测试:");
        // 具体实现将在thread_tests.rs中
    }

    fn test_user_group_management(&mut self) {
        crate::println!("  👥 用户组管理测试:");
        // 具体实现将在security_tests.rs中
    }

    fn test_file_permissions(&mut self) {
        crate::println!("  🔐 文件权限测试:");
        // 具体实现将在security_tests.rs中
    }

    fn test_capabilities(&mut self) {
        crate::println!("  🛡️ 能力机制测试:");
        // 具体实现将在security_tests.rs中
    }

    fn test_security_modules(&mut self) {
        crate::println!("  🔒 安全模块测试:");
        // 具体实现将在security_tests.rs中
    }

    fn test_linux_syscall_compatibility(&mut self) {
        crate::println!("  🐧 Linux系统调用兼容性测试:");
        // 具体实现将在linux_compat_tests.rs中
    }

    fn test_linux_specific_syscalls(&mut self) {
        crate::println!("  🔧 Linux特定系统调用测试:");
        // 具体实现将在linux_compat_tests.rs中
    }

    fn test_linux_binary_compatibility(&mut self) {
        crate::println!("  📦 Linux二进制兼容性测试:");
        // 具体实现将在linux_compat_tests.rs中
    }

    fn test_linux_abi_compatibility(&mut self) {
        crate::println!("  🔗 Linux ABI兼容性测试:");
        // 具体实现将在linux_compat_tests.rs中
    }

    fn test_posix_2008_compliance(&mut self) {
        crate::println!("  📋 POSIX.1-2008合规性测试:");
        // 具体实现将在compliance_tests.rs中
    }

    fn test_posix_realtime_compliance(&mut self) {
        crate::println!("  ⏱️ POSIX实时扩展合规性测试:");
        // 具体实现将在compliance_tests.rs中
    }

    fn test_posix_thread_compliance(&mut self) {
        crate::println!("  🧵 POSIX线程合规性测试:");
        // 具体实现将在compliance_tests.rs中
    }

    fn test_common_applications(&mut self) {
        crate::println!("  📱 常见应用程序兼容性测试:");
        // 具体实现将在application_tests.rs中
    }

    fn test_open_source_software(&mut self) {
        crate::println!("  🌍 开源软件兼容性测试:");
        // 具体实现将在application_tests.rs中
    }

    fn test_development_toolchain(&mut self) {
        crate::println!("  🔨 开发工具链兼容性测试:");
        // 具体实现将在application_tests.rs中
    }

    fn test_syscall_performance(&mut self) {
        crate::println!("  📊 系统调用性能测试:");
        // 具体实现将在performance_tests.rs中
    }

    fn test_high_concurrency(&mut self) {
        crate::println!("  🚀 高并发测试:");
        // 具体实现将在performance_tests.rs中
    }

    fn test_memory_stress(&mut self) {
        crate::println!("  💾 内存压力测试:");
        // 具体实现将在performance_tests.rs中
    }

    fn test_long_term_stability(&mut self) {
        crate::println!("  ⏰ 长期稳定性测试:");
        // 具体实现将在performance_tests.rs中
    }

    /// 获取测试结果
    pub fn get_results(&self) -> &PosixTestResults {
        &self.results
    }

    /// 获取测试结果（可变）
    pub fn get_results_mut(&mut self) -> &mut PosixTestResults {
        &mut self.results
    }
}

/// 运行所有POSIX测试的便捷函数
pub fn run_all_posix_tests() {
    let mut test_suite = PosixTestSuite::new();
    test_suite.run_all_tests();
}

/// 运行核心POSIX测试的便捷函数
pub fn run_core_posix_tests() {
    let mut test_suite = PosixTestSuite::new();
    test_suite.run_core_posix_tests();
    test_suite.results.print_report();
}

/// 运行高级POSIX测试的便捷函数
pub fn run_advanced_posix_tests() {
    let mut test_suite = PosixTestSuite::new();
    test_suite.run_advanced_posix_tests();
    test_suite.results.print_report();
}

/// 运行POSIX实时扩展测试的便捷函数
pub fn run_realtime_posix_tests() {
    let mut test_suite = PosixTestSuite::new();
    test_suite.run_realtime_posix_tests();
    test_suite.results.print_report();
}

/// 运行POSIX线程测试的便捷函数
pub fn run_thread_posix_tests() {
    let mut test_suite = PosixTestSuite::new();
    test_suite.run_thread_posix_tests();
    test_suite.results.print_report();
}

/// 运行POSIX安全测试的便捷函数
pub fn run_security_posix_tests() {
    let mut test_suite = PosixTestSuite::new();
    test_suite.run_security_posix_tests();
    test_suite.results.print_report();
}

/// 运行Linux兼容性测试的便捷函数
pub fn run_linux_compatibility_tests() {
    let mut test_suite = PosixTestSuite::new();
    test_suite.run_linux_compatibility_tests();
    test_suite.results.print_report();
}

/// 运行POSIX合规性测试的便捷函数
pub fn run_posix_compliance_tests() {
    let mut test_suite = PosixTestSuite::new();
    test_suite.run_posix_compliance_tests();
    test_suite.results.print_report();
}

/// 运行应用程序兼容性测试的便捷函数
pub fn run_application_compatibility_tests() {
    let mut test_suite = PosixTestSuite::new();
    test_suite.run_application_compatibility_tests();
    test_suite.results.print_report();
}

/// 运行性能和压力测试的便捷函数
pub fn run_performance_stress_tests() {
    let mut test_suite = PosixTestSuite::new();
    test_suite.run_performance_stress_tests();
    test_suite.results.print_report();
}

// 导出各个子模块
pub mod core_tests;
pub mod advanced_tests;
pub mod realtime_tests;
pub mod thread_tests;
pub mod security_tests;
pub mod linux_compat_tests;
pub mod compliance_tests;
pub mod application_tests;
pub mod performance_tests;
pub mod test_utils;
pub mod test_framework;

// 重新导出常用类型和函数
pub use test_framework::*;
pub use test_utils::*;