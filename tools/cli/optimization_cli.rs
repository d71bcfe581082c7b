//! NOS优化系统命令行工具
//!
//! 本工具提供了管理和监控NOS优化系统的命令行接口，包括：
//! - 运行优化测试
//! - 生成优化报告
//! - 监控系统性能
//! - 配置优化参数

use crate::syscalls::{
    get_optimization_report, run_optimization_tests, dispatch
};
use crate::syscalls::common::SyscallError;
use alloc::string::String;
use alloc::vec::Vec;

/// 命令行参数
#[derive(Debug, Clone)]
pub struct OptimizeCliArgs {
    pub command: String,
    pub subcommand: Option<String>,
    pub options: Vec<(String, String)>,
}

impl OptimizeCliArgs {
    pub fn new(args: &[String]) -> Self {
        if args.is_empty() {
            return Self {
                command: "help".to_string(),
                subcommand: None,
                options: Vec::new(),
            };
        }
        
        let command = args[0].clone();
        let subcommand = if args.len() > 1 {
            Some(args[1].clone())
        } else {
            None
        };
        
        let mut options = Vec::new();
        for i in (2..args.len()).step_by(2) {
            if i + 1 < args.len() {
                options.push((args[i].clone(), args[i + 1].clone()));
            }
        }
        
        Self {
            command,
            subcommand,
            options,
        }
    }
}

/// 运行优化命令行工具
pub fn run_optimize_cli(args: &[String]) -> Result<String, SyscallError> {
    let cli_args = OptimizeCliArgs::new(args);
    
    match cli_args.command.as_str() {
        "test" => run_test_command(&cli_args),
        "report" => run_report_command(&cli_args),
        "monitor" => run_monitor_command(&cli_args),
        "config" => run_config_command(&cli_args),
        "benchmark" => run_benchmark_command(&cli_args),
        "stress" => run_stress_command(&cli_args),
        "help" | _ => show_help(),
    }
}

/// 运行测试命令
fn run_test_command(args: &OptimizeCliArgs) -> Result<String, SyscallError> {
    let mut output = String::new();
    
    match &args.subcommand {
        Some(subcommand) => {
            match subcommand.as_str() {
                "all" => {
                    output.push_str("运行所有优化测试...\n");
                    let results = run_optimization_tests()?;
                    output.push_str(&results);
                }
                "performance" => {
                    output.push_str("运行性能优化测试...\n");
                    // 运行特定的性能测试
                    let test_args = [0u64; 6];
                    let result = dispatch(0x1004, &test_args); // getpid
                    output.push_str(&format!("getpid测试结果: {}\n", result));
                }
                "scheduler" => {
                    output.push_str("运行调度器优化测试...\n");
                    // 运行特定的调度器测试
                    let test_args = [];
                    let result = dispatch(0xE010, &test_args); // sched_yield_fast
                    output.push_str(&format!("sched_yield_fast测试结果: {}\n", result));
                }
                "zerocopy" => {
                    output.push_str("运行零拷贝I/O优化测试...\n");
                    // 运行特定的零拷贝测试
                    let test_args = [1u64, 0u64, 0u64, 1024u64]; // out_fd, in_fd, offset, count
                    let result = dispatch(0x9000, &test_args); // sendfile
                    output.push_str(&format!("sendfile测试结果: {}\n", result));
                }
                _ => {
                    output.push_str(&format!("未知的测试子命令: {}\n", subcommand));
                    output.push_str("可用的子命令: all, performance, scheduler, zerocopy\n");
                }
            }
        }
        None => {
            output.push_str("请指定测试子命令\n");
            output.push_str("可用的子命令: all, performance, scheduler, zerocopy\n");
        }
    }
    
    Ok(output)
}

/// 运行报告命令
fn run_report_command(args: &OptimizeCliArgs) -> Result<String, SyscallError> {
    let mut output = String::new();
    
    match &args.subcommand {
        Some(subcommand) => {
            match subcommand.as_str() {
                "all" => {
                    output.push_str("生成综合优化报告...\n");
                    let report = get_optimization_report()?;
                    output.push_str(&report);
                }
                "performance" => {
                    output.push_str("生成性能优化报告...\n");
                    // 生成特定的性能报告
                    output.push_str("性能优化报告功能待实现\n");
                }
                "scheduler" => {
                    output.push_str("生成调度器优化报告...\n");
                    // 生成特定的调度器报告
                    output.push_str("调度器优化报告功能待实现\n");
                }
                "zerocopy" => {
                    output.push_str("生成零拷贝I/O优化报告...\n");
                    // 生成特定的零拷贝报告
                    output.push_str("零拷贝I/O优化报告功能待实现\n");
                }
                _ => {
                    output.push_str(&format!("未知的报告子命令: {}\n", subcommand));
                    output.push_str("可用的子命令: all, performance, scheduler, zerocopy\n");
                }
            }
        }
        None => {
            output.push_str("请指定报告子命令\n");
            output.push_str("可用的子命令: all, performance, scheduler, zerocopy\n");
        }
    }
    
    Ok(output)
}

/// 运行监控命令
fn run_monitor_command(args: &OptimizeCliArgs) -> Result<String, SyscallError> {
    let mut output = String::new();
    
    output.push_str("启动优化系统监控...\n");
    
    // 获取监控选项
    let duration = get_option_value(&args.options, "duration").unwrap_or_else(|| "10".to_string());
    let interval = get_option_value(&args.options, "interval").unwrap_or_else(|| "1".to_string());
    
    output.push_str(&format!("监控时长: {}秒\n", duration));
    output.push_str(&format!("采样间隔: {}秒\n", interval));
    
    // 简化实现，实际应该启动监控循环
    output.push_str("监控功能待实现\n");
    
    Ok(output)
}

/// 运行配置命令
fn run_config_command(args: &OptimizeCliArgs) -> Result<String, SyscallError> {
    let mut output = String::new();
    
    match &args.subcommand {
        Some(subcommand) => {
            match subcommand.as_str() {
                "show" => {
                    output.push_str("显示当前优化配置...\n");
                    // 显示当前配置
                    output.push_str("配置显示功能待实现\n");
                }
                "set" => {
                    output.push_str("设置优化配置...\n");
                    // 设置配置
                    if args.options.is_empty() {
                        output.push_str("请提供配置选项\n");
                        output.push_str("示例: config set enable_performance true\n");
                    } else {
                        for (key, value) in &args.options {
                            output.push_str(&format!("设置 {} = {}\n", key, value));
                        }
                        output.push_str("配置设置功能待实现\n");
                    }
                }
                "reset" => {
                    output.push_str("重置优化配置为默认值...\n");
                    // 重置配置
                    output.push_str("配置重置功能待实现\n");
                }
                _ => {
                    output.push_str(&format!("未知的配置子命令: {}\n", subcommand));
                    output.push_str("可用的子命令: show, set, reset\n");
                }
            }
        }
        None => {
            output.push_str("请指定配置子命令\n");
            output.push_str("可用的子命令: show, set, reset\n");
        }
    }
    
    Ok(output)
}

/// 运行基准测试命令
fn run_benchmark_command(args: &OptimizeCliArgs) -> Result<String, SyscallError> {
    let mut output = String::new();
    
    output.push_str("运行性能基准测试...\n");
    
    // 获取基准测试选项
    let iterations = get_option_value(&args.options, "iterations")
        .unwrap_or_else(|| "10000".to_string())
        .parse::<u32>()
        .unwrap_or(10000);
    
    output.push_str(&format!("基准测试迭代次数: {}\n", iterations));
    
    // 运行基准测试
    for i in 0..iterations {
        let test_args = [0u64; 6];
        let _result = dispatch(0x1004, &test_args); // getpid
        
        if i % 1000 == 0 && i > 0 {
            output.push_str(&format!("基准测试进度: {}/{}\n", i, iterations));
        }
    }
    
    output.push_str("基准测试完成\n");
    
    Ok(output)
}

/// 运行压力测试命令
fn run_stress_command(args: &OptimizeCliArgs) -> Result<String, SyscallError> {
    let mut output = String::new();
    
    output.push_str("运行压力测试...\n");
    
    // 获取压力测试选项
    let threads = get_option_value(&args.options, "threads")
        .unwrap_or_else(|| "4".to_string())
        .parse::<u32>()
        .unwrap_or(4);
    
    let duration = get_option_value(&args.options, "duration")
        .unwrap_or_else(|| "60".to_string())
        .parse::<u32>()
        .unwrap_or(60);
    
    output.push_str(&format!("压力测试线程数: {}\n", threads));
    output.push_str(&format!("压力测试持续时间: {}秒\n", duration));
    
    // 运行压力测试
    output.push_str("压力测试功能待实现\n");
    
    Ok(output)
}

/// 显示帮助信息
fn show_help() -> Result<String, SyscallError> {
    let mut output = String::new();
    
    output.push_str("NOS优化系统命令行工具\n\n");
    output.push_str("用法:\n");
    output.push_str("  optimize <command> [subcommand] [options]\n\n");
    output.push_str("命令:\n");
    output.push_str("  test       - 运行优化测试\n");
    output.push_str("  report     - 生成优化报告\n");
    output.push_str("  monitor    - 监控系统性能\n");
    output.push_str("  config     - 配置优化参数\n");
    output.push_str("  benchmark  - 运行性能基准测试\n");
    output.push_str("  stress     - 运行压力测试\n");
    output.push_str("  help       - 显示此帮助信息\n\n");
    
    output.push_str("测试子命令:\n");
    output.push_str("  all         - 运行所有测试\n");
    output.push_str("  performance - 运行性能优化测试\n");
    output.push_str("  scheduler   - 运行调度器优化测试\n");
    output.push_str("  zerocopy    - 运行零拷贝I/O优化测试\n\n");
    
    output.push_str("报告子命令:\n");
    output.push_str("  all         - 生成综合报告\n");
    output.push_str("  performance - 生成性能优化报告\n");
    output.push_str("  scheduler   - 生成调度器优化报告\n");
    output.push_str("  zerocopy    - 生成零拷贝I/O优化报告\n\n");
    
    output.push_str("配置子命令:\n");
    output.push_str("  show        - 显示当前配置\n");
    output.push_str("  set         - 设置配置选项\n");
    output.push_str("  reset       - 重置为默认配置\n\n");
    
    output.push_str("选项:\n");
    output.push_str("  duration <seconds>    - 监控或压力测试持续时间\n");
    output.push_str("  interval <seconds>    - 监控采样间隔\n");
    output.push_str("  iterations <count>   - 基准测试迭代次数\n");
    output.push_str("  threads <count>      - 压力测试线程数\n\n");
    
    output.push_str("示例:\n");
    output.push_str("  optimize test all                    # 运行所有优化测试\n");
    output.push_str("  optimize report all                  # 生成综合优化报告\n");
    output.push_str("  optimize monitor duration 60         # 监控60秒\n");
    output.push_str("  optimize config set enable_perf true  # 启用性能优化\n");
    output.push_str("  optimize benchmark iterations 50000  # 运行50000次基准测试\n");
    output.push_str("  optimize stress threads 8 duration 120 # 8线程压力测试120秒\n");
    
    Ok(output)
}

/// 获取选项值
fn get_option_value(options: &[(String, String)], key: &str) -> Option<String> {
    for (k, v) in options {
        if k == key {
            return Some(v.clone());
        }
    }
    None
}