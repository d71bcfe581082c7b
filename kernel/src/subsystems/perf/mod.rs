pub mod monitor;
pub mod profiler;

pub use monitor::{
    PerformanceMonitor,
    PerformanceSnapshot,
    CpuMetrics,
    MemoryMetrics,
    IoMetrics,
    NetworkMetrics,
    SchedulerMetrics,
};

pub use profiler::{
    Profiler,
    ProfilingMode,
    ProfilingEvent,
    ProfilingSample,
    ProfilingSession,
    ProfilingStatistics,
    CallGraph,
    FunctionInfo,
    ProfilingConfig,
    Frame,
    FrameType,
    ExportFormat,
    profile_function,
    ProfilerGuard,
};
