//! 示例字符设备驱动程序
//! 
//! 本模块实现了一个简单的字符设备驱动程序，演示如何使用驱动程序架构

use crate::subsystems::drivers::driver_manager::*;
use nos_nos_error_handling::unified::KernelError;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// 示例字符设备驱动程序
pub struct ExampleCharDriver {
    /// 驱动程序信息
    info: DriverInfo,
    /// 设备数据
    device_data: BTreeMap<DeviceId, Vec<u8>>,
    /// 设备状态
    device_states: BTreeMap<DeviceId, DeviceStatus>,
}

impl ExampleCharDriver {
    /// 创建新的示例字符设备驱动程序
    pub fn new() -> Self {
        Self {
            info: DriverInfo {
                id: 0, // Will be set by driver manager
                name: "example_char".to_string(),
                version: "1.0.0".to_string(),
                status: DriverStatus::Unloaded,
                supported_device_types: vec![DeviceType::Character],
                supported_device_ids: vec![
                    "example_char_dev".to_string(),
                    "example_char_dev_v2".to_string(),
                ],
                path: "/lib/drivers/example_char.ko".to_string(),
                dependencies: vec![],
                capabilities: vec![
                    "read".to_string(),
                    "write".to_string(),
                    "ioctl".to_string(),
                    "mmap".to_string(),
                ],
                attributes: BTreeMap::new(),
            },
            device_data: BTreeMap::new(),
            device_states: BTreeMap::new(),
        }
    }
}

impl Driver for ExampleCharDriver {
    fn get_info(&self) -> DriverInfo {
        let mut info = self.info.clone();
        info.status = DriverStatus::Running;
        info
    }
    
    fn initialize(&mut self) -> Result<(), KernelError> {
        // 更新状态为初始化中
        self.info.status = DriverStatus::Initializing;
        
        // 执行初始化逻辑
        // 这里可以分配资源、注册中断等
        
        // 更新状态为已初始化
        self.info.status = DriverStatus::Initialized;
        
        Ok(())
    }
    
    fn cleanup(&mut self) -> Result<(), KernelError> {
        // 更新状态为停止中
        self.info.status = DriverStatus::Stopping;
        
        // 清理所有设备
        self.device_data.clear();
        self.device_states.clear();
        
        // 执行清理逻辑
        // 这里可以释放资源、注销中断等
        
        // 更新状态为已停止
        self.info.status = DriverStatus::Stopped;
        
        Ok(())
    }
    
    fn probe_device(&self, device_info: &DeviceInfo) -> Result<bool, KernelError> {
        // 检查设备类型
        if device_info.device_type != DeviceType::Character {
            return Ok(false);
        }
        
        // 检查设备ID
        if !self.info.supported_device_ids.contains(&device_info.name) {
            return Ok(false);
        }
        
        // 执行设备特定的探测逻辑
        // 这里可以读取设备寄存器、发送测试命令等
        
        Ok(true)
    }
    
    fn add_device(&mut self, device_info: &DeviceInfo) -> Result<(), KernelError> {
        // 初始化设备数据
        self.device_data.insert(device_info.id, Vec::new());
        
        // 设置设备状态为就绪
        self.device_states.insert(device_info.id, DeviceStatus::Ready);
        
        Ok(())
    }
    
    fn remove_device(&mut self, device_id: DeviceId) -> Result<(), KernelError> {
        // 移除设备数据
        self.device_data.remove(&device_id);
        self.device_states.remove(&device_id);
        
        Ok(())
    }
    
    fn handle_io(&mut self, device_id: DeviceId, operation: IoOperation) -> Result<IoResult, KernelError> {
        // 检查设备状态
        let device_status = self.device_states.get(&device_id)
            .copied()
            .unwrap_or(DeviceStatus::Uninitialized);
        
        if device_status != DeviceStatus::Ready {
            return Err(KernelError::Busy);
        }
        
        // 获取设备数据
        let device_data = self.device_data.get_mut(&device_id)
            .ok_or(KernelError::NotFound)?;
        
        // 处理I/O操作
        match operation {
            IoOperation::Read { offset, size } => {
                let data_len = device_data.len() as u64;
                
                // 检查偏移量
                if offset >= data_len {
                    return Ok(IoResult::ReadResult {
                        data: Vec::new(),
                        bytes_read: 0,
                    });
                }
                
                // 计算可读取的字节数
                let available = data_len - offset;
                let bytes_to_read = size.min(available);
                
                // 读取数据
                let start = offset as usize;
                let end = start + bytes_to_read as usize;
                let data = device_data[start..end].to_vec();
                
                Ok(IoResult::ReadResult {
                    data,
                    bytes_read: bytes_to_read,
                })
            },
            IoOperation::Write { offset, data } => {
                let data_len = device_data.len() as u64;
                let write_len = data.len() as u64;
                
                // 检查偏移量
                if offset > data_len {
                    return Err(KernelError::InvalidArgument);
                }
                
                // 扩展设备数据（如果需要）
                let required_size = offset + write_len;
                if required_size > data_len {
                    device_data.resize(required_size as usize, 0);
                }
                
                // 写入数据
                let start = offset as usize;
                let end = start + write_len as usize;
                device_data[start..end].copy_from_slice(&data);
                
                Ok(IoResult::WriteResult {
                    bytes_written: write_len,
                })
            },
            IoOperation::Ioctl { command, arg } => {
                // 处理控制命令
                match command {
                    0x1001 => { // 获取设备大小
                        let size = device_data.len() as u64;
                        Ok(IoResult::IoctlResult { result: size })
                    },
                    0x1002 => { // 清空设备
                        device_data.clear();
                        Ok(IoResult::IoctlResult { result: 0 })
                    },
                    0x1003 => { // 设置设备大小
                        let new_size = arg;
                        device_data.resize(new_size as usize, 0);
                        Ok(IoResult::IoctlResult { result: 0 })
                    },
                    _ => {
                        Err(KernelError::InvalidArgument)
                    }
                }
            },
            IoOperation::Mmap { offset, size, permissions } => {
                // 检查偏移量
                let data_len = device_data.len() as u64;
                if offset >= data_len {
                    return Err(KernelError::InvalidArgument);
                }
                
                // 计算可映射的大小
                let available = data_len - offset;
                let size_to_map = size.min(available);
                
                // 返回映射地址（模拟）
                let address = 0x10000000 + offset;
                
                Ok(IoResult::MmapResult { address })
            },
            IoOperation::Munmap { offset, size } => {
                // 检查偏移量
                let data_len = device_data.len() as u64;
                if offset >= data_len {
                    return Err(KernelError::InvalidArgument);
                }
                
                // 执行取消映射（模拟）
                
                Ok(IoResult::MunmapResult)
            },
        }
    }
    
    fn get_device_status(&self, device_id: DeviceId) -> Result<DeviceStatus, KernelError> {
        self.device_states.get(&device_id)
            .copied()
            .ok_or(KernelError::NotFound)
    }
    
    fn set_device_attribute(&mut self, device_id: DeviceId, name: &str, value: &str) -> Result<(), KernelError> {
        // 检查设备是否存在
        if !self.device_states.contains_key(&device_id) {
            return Err(KernelError::NotFound);
        }
        
        // 处理属性设置
        match name {
            "status" => {
                let status = match value {
                    "ready" => DeviceStatus::Ready,
                    "busy" => DeviceStatus::Busy,
                    "error" => DeviceStatus::Error,
                    "disabled" => DeviceStatus::Disabled,
                    _ => return Err(KernelError::InvalidArgument),
                };
                self.device_states.insert(device_id, status);
            },
            _ => {
                return Err(KernelError::InvalidArgument);
            }
        }
        
        Ok(())
    }
    
    fn get_device_attribute(&self, device_id: DeviceId, name: &str) -> Result<String, KernelError> {
        // 检查设备是否存在
        if !self.device_states.contains_key(&device_id) {
            return Err(KernelError::NotFound);
        }
        
        // 处理属性获取
        match name {
            "status" => {
                let status = self.device_states.get(&device_id)
                    .copied()
                    .unwrap_or(DeviceStatus::Uninitialized);
                Ok(format!("{:?}", status))
            },
            "size" => {
                let size = self.device_data.get(&device_id)
                    .map(|data| data.len())
                    .unwrap_or(0);
                Ok(size.to_string())
            },
            _ => {
                Err(KernelError::InvalidArgument)
            }
        }
    }
    
    fn suspend_device(&mut self, device_id: DeviceId) -> Result<(), KernelError> {
        // 检查设备是否存在
        if !self.device_states.contains_key(&device_id) {
            return Err(KernelError::NotFound);
        }
        
        // 设置设备状态为忙碌
        self.device_states.insert(device_id, DeviceStatus::Busy);
        
        // 执行挂起逻辑
        
        Ok(())
    }
    
    fn resume_device(&mut self, device_id: DeviceId) -> Result<(), KernelError> {
        // 检查设备是否存在
        if !self.device_states.contains_key(&device_id) {
            return Err(KernelError::NotFound);
        }
        
        // 设置设备状态为就绪
        self.device_states.insert(device_id, DeviceStatus::Ready);
        
        // 执行恢复逻辑
        
        Ok(())
    }
    
    fn handle_interrupt(&mut self, device_id: DeviceId, interrupt_info: &InterruptInfo) -> Result<(), KernelError> {
        // 检查设备是否存在
        if !self.device_states.contains_key(&device_id) {
            return Err(KernelError::NotFound);
        }
        
        // 处理中断
        match interrupt_info.irq {
            1 => {
                // 读中断
                // 可以在这里实现读就绪通知
            },
            2 => {
                // 写中断
                // 可以在这里实现写就绪通知
            },
            _ => {
                // 其他中断
            }
        }
        
        Ok(())
    }
}

/// 创建示例字符设备驱动程序实例
pub fn create_example_char_driver() -> Box<dyn Driver> {
    Box::new(ExampleCharDriver::new())
}