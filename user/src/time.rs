//! 时间模块
//!
//! 提供时间相关的函数，包括：
//! - 获取当前时间戳
//! - 时间格式化
//! - 时间计算

#![no_std]

/// 获取当前时间戳（秒）
///
/// 注意：在no_std环境中，这是一个简化的实现，
/// 在实际内核环境中应该通过系统调用获取真实时间
pub fn get_timestamp() -> u64 {
    // 简化实现：返回一个固定的模拟时间戳
    // 在实际内核环境中，这应该通过系统调用获取
    1640995200 // 2022-01-01 00:00:00 UTC
}

/// 睡眠函数
///
/// 注意：在用户空间中，这是一个简化的实现，
/// 在实际环境中应该通过系统调用实现
pub fn sleep(duration: core::time::Duration) {
    // 简化实现：忙等待
    // 在实际环境中，这应该通过系统调用实现
    let start = get_timestamp();
    let end = start + duration.as_secs() as u64;
    while get_timestamp() < end {
        // 忙等待
        core::hint::spin_loop();
    }
}
