// Debug Manager Module
//
// 调试管理器模块
// 提供调试管理器的主要实现

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use alloc::vec;
use alloc::string::String;
use alloc::string::ToString;
use alloc::format;
use core::sync::atomic::{AtomicU64, Ordering};
use spin::Mutex;
use alloc::sync::Arc;

use crate::debug::session::{DebugSession, DebugSessionType, DebugSessionStatus, DebugEvent, DebugEventType, DebugLevel, SessionConfig, ProcessInfo, ProcessState, ProcessMemoryUsage};
use crate::debug::breakpoint::{BreakpointManager, Breakpoint, BreakpointType, BreakpointStatus};
use crate::debug::analyzer::{
    MemoryAnalyzer, MemorySnapshot, MemoryRegion, MemoryRegionType, MemoryPermissions,
    LeakDetector, LeakDetectionStats, MemoryUsageStatistics,
    StackAnalyzer, StackOverflowDetector, StackFrame,
    PerformanceAnalyzer, PerformanceCounter, CounterType, PerformanceSample,
    HotspotAnalysis, HotspotAnalysisConfig, PerformanceAnalysisConfig,
    SystemState, CPUInfo, MemoryInfo, NetworkInfo, PerformanceSnapshot,
    InterfaceStatus, InterfaceState, InterfaceType,
};
use crate::debug::types::{SymbolManager, Symbol, SymbolType, SymbolScope, DebugInfo, DebugFormat, DebugFeature, DebugConfig, DebugStats};
use crate::debug::plugin::DebugPlugin;

/// 调试管理器
pub struct DebugManager {
    /// 调试器ID
    pub id: u64,
    /// 活动调试会话
    pub active_sessions: BTreeMap<String, DebugSession>,
    /// 调试器插件
    pub debug_plugins: BTreeMap<String, DebugPlugin>,
    /// 调试断点管理器
    pub breakpoint_manager: BreakpointManager,
    /// 内存分析器
    pub memory_analyzer: MemoryAnalyzer,
    /// 性能分析器
    pub performance_analyzer: PerformanceAnalyzer,
    /// 调试符号管理器
    pub symbol_manager: SymbolManager,
    /// 调试配置
    config: DebugConfig,
    /// 统计信息
    stats: DebugStats,
    /// 会话计数器
    session_counter: AtomicU64,
}

impl DebugManager {
    /// 创建新的调试管理器
    pub fn new() -> Self {
        Self {
            id: 1,
            active_sessions: BTreeMap::new(),
            debug_plugins: BTreeMap::new(),
            breakpoint_manager: BreakpointManager {
                breakpoint_counter: AtomicU64::new(1),
                breakpoints: BTreeMap::new(),
                breakpoint_conditions: Vec::new(),
            },
            memory_analyzer: MemoryAnalyzer::new(1),
            performance_analyzer: PerformanceAnalyzer {
                id: 1,
                performance_counters: BTreeMap::new(),
                sampling_data: Vec::new(),
                hotspot_analysis: HotspotAnalysis {
                    id: 1,
                    analysis_time: 0,
                    hotspot_functions: Vec::new(),
                    hotspot_lines: Vec::new(),
                    hotspot_modules: Vec::new(),
                    analysis_config: HotspotAnalysisConfig::default(),
                },
                performance_reports: Vec::new(),
                analysis_config: PerformanceAnalysisConfig::default(),
            },
            symbol_manager: SymbolManager {
                id: 1,
                symbol_tables: BTreeMap::new(),
                debug_info: DebugInfo {
                    debug_format: DebugFormat::ELF,
                    debug_level: DebugLevel::Info,
                    enabled_features: vec![
                        DebugFeature::FunctionTracing,
                        DebugFeature::VariableTracking,
                        DebugFeature::MemoryTracking,
                        DebugFeature::PerformanceMonitoring,
                    ],
                    output_buffer: Vec::new(),
                },
                symbol_cache: BTreeMap::new(),
                source_mappings: BTreeMap::new(),
            },
            stats: DebugStats::default(),
            config: DebugConfig::default(),
            session_counter: AtomicU64::new(1),
        }
    }

    /// 初始化调试管理器
    pub fn init(&mut self) -> Result<(), &'static str> {
        // 加载默认调试插件（placeholder）
        // TODO: Implement load_default_plugins

        // 初始化断点管理器
        self.breakpoint_manager.init()?;

        // 初始化内存分析器
        self.memory_analyzer.init()?;

        // 初始化性能分析器
        self.performance_analyzer.init()?;

        // 初始化符号管理器
        self.symbol_manager.init()?;

        crate::println!("[DebugManager] Debug manager initialized successfully");
        Ok(())
    }

    /// 开始调试会话
    pub fn start_debug_session(&mut self, session_name: &str, session_type: DebugSessionType, config: Option<SessionConfig>) -> Result<String, &'static str> {
        let session_id = format!("debug_{}", self.session_counter.fetch_add(1, Ordering::SeqCst));
        let start_time = crate::subsystems::time::get_timestamp();

        let session_config = config.unwrap_or_else(|| SessionConfig::default());

        let session = DebugSession {
            id: session_id.clone(),
            name: session_name.to_string(),
            session_type,
            start_time,
            end_time: None,
            status: DebugSessionStatus::Initializing,
            target_process: None,
            debug_events: Vec::new(),
            debug_data: BTreeMap::new(),
            config: session_config,
            performance_data: Vec::new(),
        };

        self.active_sessions.insert(session_id.clone(), session);
        self.stats.total_sessions += 1;

        // 添加启动事件
        if let Some(session) = self.active_sessions.get_mut(&session_id) {
            let event = DebugEvent {
                id: format!("event_{}", crate::subsystems::time::get_timestamp()),
                timestamp: start_time,
                event_type: DebugEventType::InfoEvent,
                level: DebugLevel::Info,
                description: format!("Debug session '{}' started", session_name),
                event_data: BTreeMap::new(),
                source: "DebugManager".to_string(),
                thread_info: None,
            };
            session.debug_events.push(event);
        }

        crate::println!("[DebugManager] Debug session '{}' started (ID: {})", session_name, session_id);
        Ok(session_id)
    }

    /// 停止调试会话
    pub fn stop_debug_session(&mut self, session_id: &str) -> Result<(), &'static str> {
        let end_time = crate::subsystems::time::get_timestamp();
        
        // 先获取需要的信息，避免同时持有多个借用
        let (session_name, start_time) = {
            let session = self.active_sessions.get(session_id)
                .ok_or("Debug session not found")?;
            (session.name.clone(), session.start_time)
        };

        // 更新会话状态
        {
            let session = self.active_sessions.get_mut(session_id)
                .ok_or("Debug session not found")?;
            session.status = DebugSessionStatus::Completed;
            session.end_time = Some(end_time);
        }

        // 更新统计信息
        let duration = end_time - start_time;
        self.stats.successful_sessions += 1;
        self.stats.avg_session_duration = (self.stats.avg_session_duration * (self.stats.total_sessions - 1) + duration) / self.stats.total_sessions;

        // 添加结束事件
        {
            let session = self.active_sessions.get_mut(session_id)
                .ok_or("Debug session not found")?;
            let end_event = DebugEvent {
                id: format!("event_{}", end_time),
                timestamp: end_time,
                event_type: DebugEventType::InfoEvent,
                level: DebugLevel::Info,
                description: format!("Debug session '{}' completed", session_name),
                event_data: BTreeMap::new(),
                source: "DebugManager".to_string(),
                thread_info: None,
            };
            session.debug_events.push(end_event);
        }

        crate::println!("[DebugManager] Debug session '{}' completed (ID: {})", session_name, session_id);
        Ok(())
    }

    /// 设置断点
    pub fn set_breakpoint(&mut self, address: u64, breakpoint_type: BreakpointType, description: Option<String>) -> Result<u64, &'static str> {
        let breakpoint_id = self.breakpoint_manager.breakpoint_counter.fetch_add(1, Ordering::SeqCst);

        let breakpoint = Breakpoint {
            id: breakpoint_id,
            address,
            breakpoint_type,
            status: BreakpointStatus::Enabled,
            condition: None,
            hit_count: 0,
            description: description.unwrap_or_else(|| format!("Breakpoint at 0x{:x}", address)),
            created_at: crate::subsystems::time::get_timestamp(),
            last_hit: None,
            source_location: None,
            original_instruction: Vec::new(),
            data: BTreeMap::new(),
        };

        self.breakpoint_manager.breakpoints.insert(breakpoint_id, breakpoint);
        self.stats.breakpoints_set += 1;

        crate::println!("[DebugManager] Breakpoint set at 0x{:x} (ID: {})", address, breakpoint_id);
        Ok(breakpoint_id)
    }

    /// 移除断点
    pub fn remove_breakpoint(&mut self, breakpoint_id: u64) -> Result<(), &'static str> {
        if self.breakpoint_manager.breakpoints.remove(&breakpoint_id).is_some() {
            self.stats.breakpoints_set -= 1;
            crate::println!("[DebugManager] Breakpoint {} removed", breakpoint_id);
            Ok(())
        } else {
            Err("Breakpoint not found")
        }
    }

    /// 创建内存快照
    pub fn create_memory_snapshot(&mut self, process_id: u32, thread_id: u32) -> Result<u64, &'static str> {
        let snapshot_id = self.memory_analyzer.memory_snapshots.len() as u64 + 1;
        let timestamp = crate::subsystems::time::get_timestamp();

        let snapshot = MemorySnapshot {
            id: snapshot_id,
            timestamp,
            process_id,
            thread_id,
            memory_regions: self.collect_memory_regions()?,
            stack_info: self.collect_stack_info(thread_id)?,
            stack_pointer: 0, // 需要实现栈指针获取
            stack_size: 0,
            stack_usage: 0,
        };

        self.memory_analyzer.memory_snapshots.push(snapshot);
        self.stats.memory_snapshots_taken += 1;

        crate::println!("[DebugManager] Memory snapshot created (ID: {}) for process {}, thread {}", snapshot_id, process_id, thread_id);
        Ok(snapshot_id)
    }

    /// 收集内存区域
    fn collect_memory_regions(&self) -> Result<Vec<MemoryRegion>, &'static str> {
        let mut regions = Vec::new();

        // 代码段
        regions.push(MemoryRegion {
            id: "code_region".to_string(),
            region_type: MemoryRegionType::Code,
            start_address: 0x400000, // 示例地址
            end_address: 0x4FFFF,
            size: 0x10000,
            permissions: MemoryPermissions {
                readable: true,
                writable: false,
                executable: true,
                shared: false,
                private: false,
            },
            name: Some("code".to_string()),
            mapped_file: None,
        });

        // 数据段
        regions.push(MemoryRegion {
            id: "data_region".to_string(),
            region_type: MemoryRegionType::Data,
            start_address: 0x50000,
            end_address: 0x6FFFF,
            size: 0x20000,
            permissions: MemoryPermissions {
                readable: true,
                writable: true,
                executable: false,
                shared: false,
                private: true,
            },
            name: Some("data".to_string()),
            mapped_file: None,
        });

        // 堆段
        regions.push(MemoryRegion {
            id: "stack_region".to_string(),
            region_type: MemoryRegionType::Stack,
            start_address: 0x7FFFF0000, // 示例地址
            end_address: 0x7FFFFFFF,
            size: 0x10000,
            permissions: MemoryPermissions {
                readable: true,
                writable: true,
                executable: false,
                shared: false,
                private: true,
            },
            name: Some("stack".to_string()),
            mapped_file: None,
        });

        Ok(regions)
    }

    /// 收集堆栈信息
    fn collect_stack_info(&self, _thread_id: u32) -> Result<Vec<StackFrame>, &'static str> {
        // 简化实现，实际实现需要调用栈遍历
        // TODO: 使用 thread_id 参数来获取特定线程的堆栈信息
        Ok(vec![
            StackFrame {
                return_address: 0x7FFFFFF0,
                frame_pointer: 0x7FFFFF00,
                stack_pointer: 0x7FFFF000,
                function_address: 0x400100,
                function_name: Some("main".to_string()),
                module_name: Some("kernel".to_string()),
                source_location: None,
                local_variables: Vec::new(),
                parameters: Vec::new(),
                frame_size: 0x1000,
            },
        ])
    }

    /// 创建性能采样
    pub fn create_performance_sample(&mut self, process_id: u32, _thread_id: u32) -> Result<String, &'static str> {
        let sample_id = format!("sample_{}", crate::subsystems::time::get_timestamp());
        let timestamp = crate::subsystems::time::get_timestamp();

        let sample_data: BTreeMap<String, f64> = BTreeMap::new();
        let system_state = self.collect_system_state();
        let cpu_info = self.collect_cpu_info();
        let memory_info = self.collect_memory_info();
        let network_info = self.collect_network_info();

        // 更新性能计数器（在创建sample之前）
        // 先克隆键值对，避免借用检查问题
        let sample_data_clone: Vec<(String, f64)> = sample_data.iter().map(|(k, v)| (k.clone(), *v)).collect();
        for (key, value) in &sample_data_clone {
            let counter = self.performance_analyzer.performance_counters
                .entry(key.clone()).or_insert_with(|| PerformanceCounter {
                    id: key.clone(),
                    name: key.clone(),
                    counter_type: CounterType::Counter,
                    current_value: 0,
                    total_value: 0,
                    average_value: 0.0,
                    max_value: 0,
                    min_value: u64::MAX,
                    reset_count: 0,
                    last_updated: timestamp,
                    unit: "".to_string(),
                });

            counter.current_value = *value as u64;
            counter.total_value += *value as u64;
            counter.last_updated = timestamp;

            // 计算平均值
            if counter.reset_count > 0 {
                counter.average_value = counter.total_value as f64 / (counter.reset_count + 1) as f64;
            } else {
                counter.average_value = counter.total_value as f64;
            }
        }

        let sample = PerformanceSample {
            id: sample_id.clone(),
            timestamp,
            sample_data,
            system_state,
            process_info: ProcessInfo {
                pid: process_id,
                name: "kernel".to_string(),
                state: ProcessState::Running,
                parent_pid: 0,
                exec_path: "/kernel".to_string(),
                args: Vec::new(),
                env_vars: BTreeMap::new(),
                thread_count: 1,
                memory_usage: ProcessMemoryUsage {
                    virtual_size: 8 * 1024 * 1024 * 1024, // 8GB
                    resident_size: 512 * 1024 * 1024, // 512MB
                    shared_size: 0,
                    text_size: 2 * 1024 * 1024, // 2MB
                    data_size: 100 * 1024 * 1024, // 100MB
                    stack_size: 8 * 1024 * 1024, // 8MB
                },
                cpu_usage: 25.5,
            },
            cpu_info,
            memory_info,
            network_info,
        };

        self.performance_analyzer.sampling_data.push(sample);

        Ok(sample_id)
    }

    /// 收集系统状态
    fn collect_system_state(&self) -> SystemState {
        SystemState {
            system_load: 0.5,
            context_switches: 100,
            interrupts: 1000,
            system_calls: 5000,
            page_faults: 50,
            cache_misses: 10,
        }
    }

    /// 收集CPU信息
    fn collect_cpu_info(&self) -> CPUInfo {
        CPUInfo {
            cpu_frequency: 2000.0,
            cpu_usage: 25.5,
            user_usage: 20.0,
            system_usage: 5.5,
            idle_usage: 74.5,
            wait_usage: 0.0,
            interrupt_rate: 0.01,
            temperature: Some(45.0),
        }
    }

    /// 收集内存信息
    fn collect_memory_info(&self) -> MemoryInfo {
        MemoryInfo {
            total_memory: 8 * 1024 * 1024 * 1024, // 8GB
            available_memory: 6 * 1024 * 1024 * 1024, // 6GB
            used_memory: 2 * 1024 * 1024 * 1024, // 2GB
            cached_memory: 512 * 1024 * 1024, // 512MB
            swap_memory: 0,
            shared_memory: 0,
            memory_usage: 25.0,
            fragmentation_ratio: 0.1,
        }
    }

    /// 收集网络信息
    fn collect_network_info(&self) -> NetworkInfo {
        NetworkInfo {
            interface_status: vec![
                InterfaceStatus {
                    interface_name: "eth0".to_string(),
                    status: InterfaceState::Up,
                    speed: 1000, // 1Gbps
                    rx_bytes: 1024 * 1024, // 1MB
                    tx_bytes: 2048 * 1024, // 2MB
                    rx_packets: 100,
                    tx_packets: 200,
                    error_packets: 0,
                    interface_type: InterfaceType::Ethernet,
                },
                InterfaceStatus {
                    interface_name: "lo".to_string(),
                    status: InterfaceState::Up,
                    speed: 0, // 回环接口
                    rx_bytes: 0,
                    tx_bytes: 0,
                    rx_packets: 0,
                    tx_packets: 0,
                    error_packets: 0,
                    interface_type: InterfaceType::Loopback,
                },
            ],
            active_connections: 50,
            total_rx_bytes: 1024 * 1024,
            total_tx_bytes: 2048 * 1024,
            total_rx_packets: 100,
            total_tx_packets: 200,
            network_latency: 10.0,
            bandwidth_utilization: 0.1,
        }
    }

    /// 解析符号
    pub fn resolve_symbol(&mut self, address: u64) -> Option<Symbol> {
        // 检查缓存
        if let Some(symbol) = self.symbol_manager.symbol_cache.get(&address) {
            return Some(symbol.clone());
        }

        // 在符号表中查找
        let found_symbol = {
            let mut found: Option<Symbol> = None;
            for symbol_table in self.symbol_manager.symbol_tables.values() {
                if let Some(symbol) = symbol_table.symbols.get(&format!("0x{:x}", address)) {
                    found = Some(symbol.clone());
                    break;
                }
            }
            found
        };

        if let Some(symbol) = found_symbol {
            // 缓存符号
            self.symbol_manager.symbol_cache.insert(address, symbol.clone());
            return Some(symbol);
        }

        // 尝试从源文件映射中解析
        if let Some(symbol) = self.resolve_symbol_from_mappings(address) {
            // 缓存符号
            self.symbol_manager.symbol_cache.insert(address, symbol.clone());
            return Some(symbol);
        }

        None
    }

    /// 从源文件映射解析符号
    fn resolve_symbol_from_mappings(&self, address: u64) -> Option<Symbol> {
        for mapping in self.symbol_manager.source_mappings.values() {
            if address >= mapping.target_address && address < mapping.target_address + mapping.mapping_size {
                // 在行号映射中查找
                for line_mapping in &mapping.line_mappings {
                    let target_addr = mapping.target_address + line_mapping.address_offset;
                    if address == target_addr {
                        return Some(Symbol {
                            name: format!("line_{}", line_mapping.source_line),
                            address,
                            size: 0,
                            symbol_type: SymbolType::Label,
                            scope: SymbolScope::Local,
                            source_file: Some(mapping.source_file.clone()),
                            source_line: Some(line_mapping.source_line),
                            description: None,
                        });
                    }
                }
            }
        }

        None
    }

    /// 获取活动调试会话
    pub fn get_active_sessions(&self) -> &BTreeMap<String, DebugSession> {
        &self.active_sessions
    }

    /// 获取调试统计
    pub fn get_statistics(&self) -> DebugStats {
        self.stats.clone()
    }

    /// 更新配置
    pub fn update_config(&mut self, config: DebugConfig) -> Result<(), &'static str> {
        self.config = config;
        Ok(())
    }

    /// 停止调试管理器
    pub fn shutdown(&mut self) -> Result<(), &'static str> {
        // 停止所有活动会话
        let session_ids: Vec<String> = self.active_sessions.keys().cloned().collect();
        for session_id in session_ids {
            let _ = self.stop_debug_session(&session_id);
        }

        // 清理所有数据
        self.active_sessions.clear();
        self.debug_plugins.clear();
        self.memory_analyzer.memory_snapshots.clear();
        self.performance_analyzer.performance_reports.clear();

        crate::println!("[DebugManager] Debug manager shutdown successfully");
        Ok(())
    }
}

/// 创建默认的调试管理器
pub fn create_debug_manager() -> Arc<Mutex<DebugManager>> {
    Arc::new(Mutex::new(DebugManager::new()))
}
