//! Web runtime support (PWA and WASM)
//!
//! Provides Progressive Web App (PWA) and WebAssembly (WASM) runtime support.

extern crate alloc;

use alloc::vec::Vec;
use alloc::string::String;
use alloc::collections::BTreeMap;
use crate::sync::Mutex;
use crate::reliability::errno::{EINVAL, ENOMEM};

/// PWA manifest
#[derive(Debug, Clone)]
pub struct PwaManifest {
    /// App name
    pub name: String,
    /// App short name
    pub short_name: String,
    /// App description
    pub description: String,
    /// Start URL
    pub start_url: String,
    /// Display mode
    pub display: String,
    /// Icons
    pub icons: Vec<PwaIcon>,
    /// Theme color
    pub theme_color: String,
}

/// PWA icon
#[derive(Debug, Clone)]
pub struct PwaIcon {
    /// Icon URL
    pub src: String,
    /// Icon sizes
    pub sizes: String,
    /// Icon type
    pub icon_type: String,
}

/// PWA application
pub struct PwaApp {
    /// Manifest
    pub manifest: PwaManifest,
    /// Service worker script
    pub service_worker: Option<String>,
    /// Installed flag
    pub installed: bool,
    /// Cache storage
    pub cache: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl PwaApp {
    /// Create a new PWA app
    pub fn new(manifest: PwaManifest) -> Self {
        Self {
            manifest,
            service_worker: None,
            installed: false,
            cache: Mutex::new(BTreeMap::new()),
        }
    }
    
    /// Install PWA
    pub fn install(&mut self) -> Result<(), i32> {
        self.installed = true;
        crate::println!("[pwa] Installed PWA: {}", self.manifest.name);
        Ok(())
    }
    
    /// Uninstall PWA
    pub fn uninstall(&mut self) -> Result<(), i32> {
        self.installed = false;
        let mut cache = self.cache.lock();
        cache.clear();
        crate::println!("[pwa] Uninstalled PWA: {}", self.manifest.name);
        Ok(())
    }
    
    /// Cache resource
    pub fn cache_resource(&self, url: &str, data: Vec<u8>) -> Result<(), i32> {
        let mut cache = self.cache.lock();
        cache.insert(url.to_string(), data);
        Ok(())
    }
    
    /// Get cached resource
    pub fn get_cached_resource(&self, url: &str) -> Option<Vec<u8>> {
        let cache = self.cache.lock();
        cache.get(url).cloned()
    }
}

/// WASM module
pub struct WasmModule {
    /// Module bytes
    pub bytes: Vec<u8>,
    /// Module name
    pub name: String,
    /// Exported functions
    pub exports: BTreeMap<String, WasmFunction>,
    /// Memory
    pub memory: Option<WasmMemory>,
}

/// WASM function
#[derive(Debug, Clone)]
pub struct WasmFunction {
    /// Function name
    pub name: String,
    /// Function signature
    pub signature: WasmSignature,
}

/// WASM function signature
#[derive(Debug, Clone)]
pub struct WasmSignature {
    /// Parameter types
    pub params: Vec<WasmType>,
    /// Return types
    pub returns: Vec<WasmType>,
}

/// WASM type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasmType {
    I32,
    I64,
    F32,
    F64,
}

/// WASM memory
pub struct WasmMemory {
    /// Memory data
    pub data: Vec<u8>,
    /// Memory size (pages)
    pub pages: u32,
}

impl WasmMemory {
    /// Create new WASM memory
    pub fn new(initial_pages: u32) -> Self {
        let page_size = 64 * 1024; // 64KB per page
        Self {
            data: vec![0; (initial_pages as usize) * page_size],
            pages: initial_pages,
        }
    }
    
    /// Grow memory
    pub fn grow(&mut self, pages: u32) -> Result<(), i32> {
        let page_size = 64 * 1024;
        let new_size = ((self.pages + pages) as usize) * page_size;
        self.data.resize(new_size, 0);
        self.pages += pages;
        Ok(())
    }
}

/// WASM runtime
pub struct WasmRuntime {
    /// Loaded modules
    modules: Mutex<BTreeMap<String, WasmModule>>,
    /// Runtime memory
    memory: Mutex<WasmMemory>,
}

impl WasmRuntime {
    /// Create a new WASM runtime
    pub fn new() -> Self {
        Self {
            modules: Mutex::new(BTreeMap::new()),
            memory: Mutex::new(WasmMemory::new(1)), // 1 page initial
        }
    }
    
    /// Load WASM module
    pub fn load_module(&self, name: &str, bytes: Vec<u8>) -> Result<(), i32> {
        // In real implementation, this would:
        // 1. Parse WASM binary format
        // 2. Validate module
        // 3. Instantiate module
        // 4. Extract exports
        
        let module = WasmModule {
            bytes,
            name: name.to_string(),
            exports: BTreeMap::new(),
            memory: Some(WasmMemory::new(1)),
        };
        
        let mut modules = self.modules.lock();
        modules.insert(name.to_string(), module);
        
        crate::println!("[wasm] Loaded module: {}", name);
        Ok(())
    }
    
    /// Call WASM function
    pub fn call_function(&self, module_name: &str, function_name: &str, args: &[u64]) -> Result<Vec<u64>, i32> {
        let modules = self.modules.lock();
        if let Some(module) = modules.get(module_name) {
            if module.exports.contains_key(function_name) {
                // In real implementation, this would:
                // 1. Prepare arguments
                // 2. Set up execution context
                // 3. Execute WASM function
                // 4. Return results
                crate::println!("[wasm] Calling function: {}::{}", module_name, function_name);
                Ok(Vec::new())
            } else {
                Err(EINVAL)
            }
        } else {
            Err(EINVAL)
        }
    }
}

/// Web runtime manager
pub struct WebRuntimeManager {
    /// Installed PWAs
    pwas: Mutex<BTreeMap<String, PwaApp>>,
    /// WASM runtime
    wasm_runtime: WasmRuntime,
}

impl WebRuntimeManager {
    /// Create a new web runtime manager
    pub fn new() -> Self {
        Self {
            pwas: Mutex::new(BTreeMap::new()),
            wasm_runtime: WasmRuntime::new(),
        }
    }
    
    /// Install PWA
    pub fn install_pwa(&self, manifest: PwaManifest) -> Result<String, i32> {
        let app_id = manifest.short_name.clone();
        let mut pwas = self.pwas.lock();
        
        let mut app = PwaApp::new(manifest);
        app.install()?;
        pwas.insert(app_id.clone(), app);
        
        Ok(app_id)
    }
    
    /// Get WASM runtime
    pub fn get_wasm_runtime(&self) -> &WasmRuntime {
        &self.wasm_runtime
    }
}

/// Global web runtime manager instance
static WEB_RUNTIME_MANAGER: Mutex<Option<WebRuntimeManager>> = Mutex::new(None);

/// Initialize web runtime manager
pub fn init_web_runtime_manager() -> Result<(), i32> {
    let mut manager = WEB_RUNTIME_MANAGER.lock();
    if manager.is_none() {
        *manager = Some(WebRuntimeManager::new());
        crate::println!("[web] Web runtime manager initialized");
    }
    Ok(())
}

/// Get web runtime manager
pub fn get_web_runtime_manager() -> &'static WebRuntimeManager {
    static INIT_ONCE: crate::sync::Once = crate::sync::Once::new();
    INIT_ONCE.call_once(|| {
        let mut manager = WEB_RUNTIME_MANAGER.lock();
        if manager.is_none() {
            *manager = Some(WebRuntimeManager::new());
        }
    });
    
    unsafe {
        &*(WEB_RUNTIME_MANAGER.lock().as_ref().unwrap() as *const WebRuntimeManager)
    }
}

