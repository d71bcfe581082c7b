// Windows API Compatibility Layer

extern crate alloc;
// - .NET runtime integration

extern crate hashbrown;

use alloc::string::String;
use alloc::string::ToString;
use alloc::vec::Vec;
use alloc::boxed::Box;
use hashbrown::HashMap;
use crate::compat::*;
use crate::compat::DefaultHasherBuilder;

/// Windows compatibility module
pub struct WindowsModule {
    api_registry: WindowsApiRegistry,
    registry_simulator: WindowsRegistry,
    service_manager: WindowsServiceManager,
    com_runtime: WindowsComRuntime,
}

impl WindowsModule {
    pub fn new() -> Self {
        Self {
            api_registry: WindowsApiRegistry::new(),
            registry_simulator: WindowsRegistry::new(),
            service_manager: WindowsServiceManager::new(),
            com_runtime: WindowsComRuntime::new(),
        }
    }
}

impl PlatformModule for WindowsModule {
    fn name(&self) -> &str {
        "Windows Compatibility Layer"
    }

    fn version(&self) -> &str {
        "0.1.0"
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn initialize(&mut self) -> Result<(), &'static str> {
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), &'static str> {
        Ok(())
    }

}

/// Windows API registry
#[derive(Debug)]
pub struct WindowsApiRegistry {
    registered_functions: HashMap<String, usize, DefaultHasherBuilder>,
    api_versions: HashMap<String, u32, DefaultHasherBuilder>,
}

impl WindowsApiRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            registered_functions: HashMap::with_hasher(DefaultHasherBuilder),
            api_versions: HashMap::with_hasher(DefaultHasherBuilder),
        };

        // Register core Win32 APIs
        registry.register_core_apis();
        registry
    }

    fn register_core_apis(&mut self) {
        // Kernel32 APIs
        self.register_api("CreateFileA", 0);
        self.register_api("CreateFileW", 1);
        self.register_api("ReadFile", 2);
        self.register_api("WriteFile", 3);
        self.register_api("CloseHandle", 4);
        self.register_api("GetLastError", 5);
        self.register_api("SetLastError", 6);
        self.register_api("GetModuleHandleA", 7);
        self.register_api("GetProcAddress", 8);

        // User32 APIs
        self.register_api("MessageBoxA", 100);
        self.register_api("MessageBoxW", 101);
        self.register_api("CreateWindowExA", 102);
        self.register_api("CreateWindowExW", 103);
        self.register_api("DestroyWindow", 104);
        self.register_api("ShowWindow", 105);
        self.register_api("UpdateWindow", 106);
        self.register_api("GetMessageA", 107);
        self.register_api("TranslateMessage", 108);
        self.register_api("DispatchMessageA", 109);

        // GDI32 APIs
        self.register_api("CreateCompatibleDC", 200);
        self.register_api("CreateCompatibleBitmap", 201);
        self.register_api("SelectObject", 202);
        self.register_api("BitBlt", 203);
        self.register_api("DeleteObject", 204);

        // Advapi32 APIs
        self.register_api("RegOpenKeyExA", 300);
        self.register_api("RegCloseKey", 301);
        self.register_api("RegQueryValueExA", 302);
        self.register_api("RegSetValueExA", 303);
    }

    fn register_api(&mut self, name: &str, id: usize) {
        self.registered_functions.insert(name.to_string(), id);
        self.api_versions.insert(name.to_string(), 0x0601); // Windows 7 version
    }
}

/// Windows Registry simulation
#[derive(Debug)]
pub struct WindowsRegistry {
    registry: HashMap<String, RegistryValue, DefaultHasherBuilder>,
    dll_registry: HashMap<String, DllInfo, DefaultHasherBuilder>,
}

#[derive(Debug, Clone)]
pub enum RegistryValue {
    String(String),
    Dword(u32),
    Binary(Vec<u8>),
    MultiString(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct DllInfo {
    path: String,
    version: String,
    functions: Vec<String>,
}

impl WindowsRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            registry: HashMap::with_hasher(DefaultHasherBuilder),
            dll_registry: HashMap::with_hasher(DefaultHasherBuilder),
        };

        registry.initialize_system_registry();
        registry
    }

    fn initialize_system_registry(&mut self) {
        // Add basic registry entries
        self.registry.insert(
            "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion".to_string(),
            RegistryValue::String("6.1".to_string()) // Windows 7
        );

        self.registry.insert(
            "HKEY_LOCAL_MACHINE\\SOFTWARE\\Microsoft\\Windows\\CurrentVersion".to_string(),
            RegistryValue::String("Windows 7".to_string())
        );

        // Register system DLLs
        self.register_dll("kernel32.dll", "6.1.7600.16385", vec![
            "CreateFileA".to_string(), "ReadFile".to_string(), "WriteFile".to_string(), "CloseHandle".to_string(), "GetLastError".to_string()
        ]);

        self.register_dll("user32.dll", "6.1.7600.16385", vec![
            "MessageBoxA".to_string(), "CreateWindowExA".to_string(), "DestroyWindow".to_string(), "ShowWindow".to_string()
        ]);

        self.register_dll("gdi32.dll", "6.1.7600.16385", vec![
            "CreateCompatibleDC".to_string(), "CreateCompatibleBitmap".to_string(), "BitBlt".to_string()
        ]);

        self.register_dll("ntdll.dll", "6.1.7600.16385", vec![
            "NtCreateFile".to_string(), "NtReadFile".to_string(), "NtWriteFile".to_string(), "NtClose".to_string()
        ]);
    }

    fn register_dll(&mut self, name: &str, version: &str, functions: Vec<String>) {
        self.dll_registry.insert(name.to_string(), DllInfo {
            path: format!("C:\\Windows\\System32\\{}", name),
            version: version.to_string(),
            functions,
        });
    }

    pub fn is_dll_available(&self, name: &str) -> bool {
        self.dll_registry.contains_key(name)
    }
}

/// Windows Service Manager
#[derive(Debug)]
pub struct WindowsServiceManager {
    services: HashMap<String, WindowsService, DefaultHasherBuilder>,
}

#[derive(Debug, Clone)]
pub struct WindowsService {
    name: String,
    display_name: String,
    service_type: u32,
    start_type: u32,
    error_control: u32,
    binary_path: String,
    state: ServiceState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Stopped,
    Starting,
    Running,
    Stopping,
    Paused,
}

impl WindowsServiceManager {
    pub fn new() -> Self {
        Self {
            services: HashMap::with_hasher(DefaultHasherBuilder),
        }
    }
}

/// COM Error type
#[derive(Debug, Clone)]
pub enum ComError {
    Failed(String),
    NotImpl,
    NoInterface,
    InvalidArg,
    OutOfMemory,
    Unexpected,
}

impl From<ComError> for nos_api::Error {
    fn from(err: ComError) -> Self {
        nos_api::Error::ComError(match err {
            ComError::Failed(msg) => msg,
            ComError::NotImpl => "Not implemented".to_string(),
            ComError::NoInterface => "No such interface".to_string(),
            ComError::InvalidArg => "Invalid argument".to_string(),
            ComError::OutOfMemory => "Out of memory".to_string(),
            ComError::Unexpected => "Unexpected error".to_string(),
        })
    }
}

/// Windows COM Runtime
pub struct WindowsComRuntime {
    class_factory_registry: HashMap<String, ComClassFactory, DefaultHasherBuilder>,
    active_objects: HashMap<u32, Box<dyn ComObject>, DefaultHasherBuilder>,
    next_object_id: u32,
}

pub struct ComClassFactory {
    class_id: String,
    create_instance_fn: fn() -> Result<Box<dyn ComObject>, ComError>,
}

pub trait ComObject: Send + Sync {
    fn query_interface(&mut self, iid: &str) -> Option<*mut c_void>;
    fn add_ref(&mut self) -> u32;
    fn release(&mut self) -> u32;
}

impl WindowsComRuntime {
    pub fn new() -> Self {
        Self {
            class_factory_registry: HashMap::with_hasher(DefaultHasherBuilder),
            active_objects: HashMap::with_hasher(DefaultHasherBuilder),
            next_object_id: 1,
        }
    }
}
