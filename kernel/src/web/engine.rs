//! Web engine backend adapters
//!
//! Provides backend adapters for Servo and Blitz web engines to work with NOS.

extern crate alloc;

use alloc::vec::Vec;
use alloc::string::{String, ToString};
use crate::graphics::surface::{SurfaceId, SurfaceFormat, get_surface_manager};
use crate::graphics::compositor::{get_compositor, composite_frame};
use crate::reliability::errno::{EINVAL, ENOMEM};

/// Web engine type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebEngineType {
    Servo,
    Blitz,
}

/// Web engine backend trait
pub trait WebEngineBackend: Send + Sync {
    /// Initialize the engine
    fn init(&mut self, width: u32, height: u32) -> Result<(), i32>;
    
    /// Load a URL
    fn load_url(&mut self, url: &str) -> Result<(), i32>;
    
    /// Navigate back
    fn go_back(&mut self) -> Result<(), i32>;
    
    /// Navigate forward
    fn go_forward(&mut self) -> Result<(), i32>;
    
    /// Reload page
    fn reload(&mut self) -> Result<(), i32>;
    
    /// Get current URL
    fn get_current_url(&self) -> Option<String>;
    
    /// Get surface ID for rendering
    fn get_surface_id(&self) -> Option<SurfaceId>;
    
    /// Render frame
    fn render_frame(&mut self) -> Result<(), i32>;
    
    /// Handle input event
    fn handle_input(&mut self, event: crate::graphics::input::InputEvent) -> Result<(), i32>;
    
    /// Execute JavaScript
    fn execute_script(&mut self, script: &str) -> Result<String, i32>;
    
    /// Get page title
    fn get_title(&self) -> Option<String>;
}

/// Servo engine backend adapter
pub struct ServoBackend {
    /// Surface ID for rendering
    surface_id: Option<SurfaceId>,
    /// Current URL
    current_url: Option<String>,
    /// Page title
    title: Option<String>,
    /// Surface width
    width: u32,
    /// Surface height
    height: u32,
    /// Engine initialized flag
    initialized: bool,
}

impl ServoBackend {
    /// Create a new Servo backend
    pub fn new() -> Self {
        Self {
            surface_id: None,
            current_url: None,
            title: None,
            width: 0,
            height: 0,
            initialized: false,
        }
    }
}

impl WebEngineBackend for ServoBackend {
    fn init(&mut self, width: u32, height: u32) -> Result<(), i32> {
        self.width = width;
        self.height = height;
        
        // Create surface for rendering
        let surface_manager = get_surface_manager();
        let surface_id = surface_manager.create_surface(width, height, SurfaceFormat::ARGB8888, 0)?;
        self.surface_id = Some(surface_id);
        self.initialized = true;
        
        crate::println!("[web] Servo engine initialized ({}x{})", width, height);
        Ok(())
    }
    
    fn load_url(&mut self, url: &str) -> Result<(), i32> {
        if !self.initialized {
            return Err(EINVAL);
        }
        
        self.current_url = Some(url.to_string());
        crate::println!("[web] Loading URL: {}", url);
        
        // In real implementation, this would:
        // 1. Parse URL
        // 2. Create HTTP request via network stack
        // 3. Receive response
        // 4. Parse HTML/CSS/JS
        // 5. Render to surface
        
        Ok(())
    }
    
    fn go_back(&mut self) -> Result<(), i32> {
        crate::println!("[web] Navigate back");
        Ok(())
    }
    
    fn go_forward(&mut self) -> Result<(), i32> {
        crate::println!("[web] Navigate forward");
        Ok(())
    }
    
    fn reload(&mut self) -> Result<(), i32> {
        if let Some(url) = self.current_url.clone() {
            self.load_url(&url)
        } else {
            Err(EINVAL)
        }
    }
    
    fn get_current_url(&self) -> Option<String> {
        self.current_url.clone()
    }
    
    fn get_surface_id(&self) -> Option<SurfaceId> {
        self.surface_id
    }
    
    fn render_frame(&mut self) -> Result<(), i32> {
        // Render web content to surface
        // In real implementation, this would:
        // 1. Get rendering commands from Servo
        // 2. Execute rendering commands
        // 3. Composite to surface
        // 4. Trigger compositor
        
        if let Some(surface_id) = self.surface_id {
            // Mark surface as dirty
            let surface_manager = get_surface_manager();
            // TODO: Mark surface dirty and trigger compositor
            composite_frame()?;
        }
        
        Ok(())
    }
    
    fn handle_input(&mut self, _event: crate::graphics::input::InputEvent) -> Result<(), i32> {
        // Handle input events (mouse, keyboard, touch)
        // In real implementation, this would forward to Servo's event handling
        Ok(())
    }
    
    fn execute_script(&mut self, script: &str) -> Result<String, i32> {
        // Execute JavaScript
        // In real implementation, this would use Servo's JavaScript engine
        crate::println!("[web] Executing script: {}", script);
        Ok(String::new())
    }
    
    fn get_title(&self) -> Option<String> {
        self.title.clone()
    }
}

/// Blitz engine backend adapter
pub struct BlitzBackend {
    /// Surface ID for rendering
    surface_id: Option<SurfaceId>,
    /// Current URL
    current_url: Option<String>,
    /// Page title
    title: Option<String>,
    /// Surface width
    width: u32,
    /// Surface height
    height: u32,
    /// Engine initialized flag
    initialized: bool,
}

impl BlitzBackend {
    /// Create a new Blitz backend
    pub fn new() -> Self {
        Self {
            surface_id: None,
            current_url: None,
            title: None,
            width: 0,
            height: 0,
            initialized: false,
        }
    }
}

impl WebEngineBackend for BlitzBackend {
    fn init(&mut self, width: u32, height: u32) -> Result<(), i32> {
        self.width = width;
        self.height = height;
        
        // Create surface for rendering
        let surface_manager = get_surface_manager();
        let surface_id = surface_manager.create_surface(width, height, SurfaceFormat::ARGB8888, 0)?;
        self.surface_id = Some(surface_id);
        self.initialized = true;
        
        crate::println!("[web] Blitz engine initialized ({}x{})", width, height);
        Ok(())
    }
    
    fn load_url(&mut self, url: &str) -> Result<(), i32> {
        if !self.initialized {
            return Err(EINVAL);
        }
        
        self.current_url = Some(url.to_string());
        crate::println!("[web] Loading URL: {}", url);
        
        // In real implementation, this would use Blitz's rendering engine
        Ok(())
    }
    
    fn go_back(&mut self) -> Result<(), i32> {
        crate::println!("[web] Navigate back");
        Ok(())
    }
    
    fn go_forward(&mut self) -> Result<(), i32> {
        crate::println!("[web] Navigate forward");
        Ok(())
    }
    
    fn reload(&mut self) -> Result<(), i32> {
        if let Some(url) = self.current_url.clone() {
            self.load_url(&url)
        } else {
            Err(EINVAL)
        }
    }
    
    fn get_current_url(&self) -> Option<String> {
        self.current_url.clone()
    }
    
    fn get_surface_id(&self) -> Option<SurfaceId> {
        self.surface_id
    }
    
    fn render_frame(&mut self) -> Result<(), i32> {
        // Render web content to surface using Blitz
        if let Some(surface_id) = self.surface_id {
            composite_frame()?;
        }
        Ok(())
    }
    
    fn handle_input(&mut self, _event: crate::graphics::input::InputEvent) -> Result<(), i32> {
        // Handle input events
        Ok(())
    }
    
    fn execute_script(&mut self, script: &str) -> Result<String, i32> {
        // Execute JavaScript using Blitz's JS engine
        crate::println!("[web] Executing script: {}", script);
        Ok(String::new())
    }
    
    fn get_title(&self) -> Option<String> {
        self.title.clone()
    }
}

/// Web engine manager
pub struct WebEngineManager {
    /// Active engine
    engine: Option<alloc::boxed::Box<dyn WebEngineBackend>>,
    /// Engine type
    engine_type: Option<WebEngineType>,
}

impl WebEngineManager {
    /// Create a new web engine manager
    pub fn new() -> Self {
        Self {
            engine: None,
            engine_type: None,
        }
    }
    
    /// Initialize web engine
    pub fn init_engine(&mut self, engine_type: WebEngineType, width: u32, height: u32) -> Result<(), i32> {
        let mut engine: alloc::boxed::Box<dyn WebEngineBackend> = match engine_type {
            WebEngineType::Servo => alloc::boxed::Box::new(ServoBackend::new()),
            WebEngineType::Blitz => alloc::boxed::Box::new(BlitzBackend::new()),
        };
        
        engine.init(width, height)?;
        self.engine = Some(engine);
        self.engine_type = Some(engine_type);
        
        crate::println!("[web] Initialized {} engine", match engine_type {
            WebEngineType::Servo => "Servo",
            WebEngineType::Blitz => "Blitz",
        });
        
        Ok(())
    }
    
    /// Get engine
    pub fn get_engine(&mut self) -> Option<&mut dyn WebEngineBackend + '_> {
        self.engine.as_mut().map(move |e| e.as_mut())
    }
}

/// Global web engine manager instance
static WEB_ENGINE_MANAGER: crate::sync::Mutex<Option<WebEngineManager>> = crate::sync::Mutex::new(None);

/// Initialize web engine manager
pub fn init_web_engine_manager() -> Result<(), i32> {
    let mut manager = WEB_ENGINE_MANAGER.lock();
    if manager.is_none() {
        *manager = Some(WebEngineManager::new());
        crate::println!("[web] Web engine manager initialized");
    }
    Ok(())
}

/// Get web engine manager
pub fn get_web_engine_manager() -> &'static crate::sync::Mutex<WebEngineManager> {
    static INIT_ONCE: crate::sync::Once = crate::sync::Once::new();
    INIT_ONCE.call_once(|| {
        let mut manager = WEB_ENGINE_MANAGER.lock();
        if manager.is_none() {
            *manager = Some(WebEngineManager::new());
        }
    });
    
    unsafe {
        &*(WEB_ENGINE_MANAGER.lock().as_ref().unwrap() as *const WebEngineManager as *const crate::sync::Mutex<WebEngineManager>)
    }
}

