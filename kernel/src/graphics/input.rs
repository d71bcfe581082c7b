//! Input event handling for GUI frameworks
//!
//! Provides keyboard, mouse, and touch input event handling for GUI applications.

extern crate alloc;

use alloc::vec::Vec;
use alloc::collections::BTreeMap;
use core::sync::atomic::{AtomicU32, AtomicBool, Ordering};
use crate::subsystems::sync::Mutex;
use crate::reliability::errno::{EINVAL, ENOMEM};
use crate::graphics::surface::SurfaceId;

/// Input device type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDeviceType {
    Keyboard,
    Mouse,
    Touch,
    Gamepad,
}

/// Key code (simplified - matches common GUI frameworks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Unknown,
    Space,
    Enter,
    Tab,
    Escape,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    // Numbers
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
    // Modifiers
    ShiftLeft, ShiftRight,
    ControlLeft, ControlRight,
    AltLeft, AltRight,
    MetaLeft, MetaRight,
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Default for KeyModifiers {
    fn default() -> Self {
        Self {
            shift: false,
            control: false,
            alt: false,
            meta: false,
        }
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

/// Input event
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Key pressed
    KeyPress {
        key: KeyCode,
        modifiers: KeyModifiers,
        repeat: bool,
    },
    /// Key released
    KeyRelease {
        key: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Character input (after IME processing)
    CharInput {
        ch: char,
    },
    /// Mouse moved
    MouseMove {
        x: f32,
        y: f32,
        buttons: u8, // Bitmask of pressed buttons
    },
    /// Mouse button pressed
    MousePress {
        button: MouseButton,
        x: f32,
        y: f32,
    },
    /// Mouse button released
    MouseRelease {
        button: MouseButton,
        x: f32,
        y: f32,
    },
    /// Mouse wheel scrolled
    MouseWheel {
        delta_x: f32,
        delta_y: f32,
    },
    /// Touch started
    TouchStart {
        id: u64,
        x: f32,
        y: f32,
    },
    /// Touch moved
    TouchMove {
        id: u64,
        x: f32,
        y: f32,
    },
    /// Touch ended
    TouchEnd {
        id: u64,
        x: f32,
        y: f32,
    },
}

/// Input event handler trait (for GUI frameworks)
pub trait InputEventHandler: Send + Sync {
    /// Handle an input event
    fn handle_event(&mut self, event: InputEvent, surface_id: SurfaceId) -> Result<(), i32>;
    
    /// Get focused surface
    fn get_focused_surface(&self) -> Option<SurfaceId>;
    
    /// Set focused surface
    fn set_focused_surface(&mut self, surface_id: Option<SurfaceId>) -> Result<(), i32>;
}

/// Input manager - manages input devices and event routing
pub struct InputManager {
    /// Focused surface (receives keyboard input)
    focused_surface: Mutex<Option<SurfaceId>>,
    /// Mouse position
    mouse_x: AtomicU32,
    mouse_y: AtomicU32,
    /// Mouse button state
    mouse_buttons: AtomicU32,
    /// Keyboard state (pressed keys)
    keyboard_state: Mutex<BTreeMap<KeyCode, bool>>,
    /// Event handlers by surface
    handlers: Mutex<BTreeMap<SurfaceId, alloc::sync::Arc<Mutex<dyn InputEventHandler>>>>,
    /// Input enabled flag
    input_enabled: AtomicBool,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self {
            focused_surface: Mutex::new(None),
            mouse_x: AtomicU32::new(0),
            mouse_y: AtomicU32::new(0),
            mouse_buttons: AtomicU32::new(0),
            keyboard_state: Mutex::new(BTreeMap::new()),
            handlers: Mutex::new(BTreeMap::new()),
            input_enabled: AtomicBool::new(true),
        }
    }
    
    /// Register an input event handler for a surface
    pub fn register_handler(&self, surface_id: SurfaceId, handler: alloc::sync::Arc<Mutex<dyn InputEventHandler>>) -> Result<(), i32> {
        let mut handlers = self.handlers.lock();
        handlers.insert(surface_id, handler);
        crate::println!("[input] Registered handler for surface {}", surface_id);
        Ok(())
    }
    
    /// Unregister an input event handler
    pub fn unregister_handler(&self, surface_id: SurfaceId) -> Result<(), i32> {
        let mut handlers = self.handlers.lock();
        handlers.remove(&surface_id);
        crate::println!("[input] Unregistered handler for surface {}", surface_id);
        Ok(())
    }
    
    /// Process an input event
    pub fn process_event(&self, event: InputEvent) -> Result<(), i32> {
        if !self.input_enabled.load(Ordering::Acquire) {
            return Ok(()); // Input disabled
        }
        
        match &event {
            InputEvent::KeyPress { .. } | InputEvent::KeyRelease { .. } | InputEvent::CharInput { .. } => {
                // Keyboard events go to focused surface
                let focused = self.focused_surface.lock();
                if let Some(surface_id) = *focused {
                    drop(focused);
                    self.send_to_surface(surface_id, event)?;
                }
            }
            InputEvent::MouseMove { x, y, .. } => {
                // Update mouse position
                self.mouse_x.store(*x as u32, Ordering::Release);
                self.mouse_y.store(*y as u32, Ordering::Release);
                
                // Find surface under cursor and send event
                // TODO: Implement hit testing
                if let Some(surface_id) = self.find_surface_at(*x, *y) {
                    self.send_to_surface(surface_id, event)?;
                }
            }
            InputEvent::MousePress { .. } | InputEvent::MouseRelease { .. } | InputEvent::MouseWheel { .. } => {
                // Mouse events go to surface under cursor
                let x = self.mouse_x.load(Ordering::Acquire) as f32;
                let y = self.mouse_y.load(Ordering::Acquire) as f32;
                if let Some(surface_id) = self.find_surface_at(x, y) {
                    self.send_to_surface(surface_id, event)?;
                }
            }
            InputEvent::TouchStart { .. } | InputEvent::TouchMove { .. } | InputEvent::TouchEnd { .. } => {
                // Touch events go to surface under touch point
                // TODO: Implement touch hit testing
            }
        }
        
        Ok(())
    }
    
    /// Send event to a surface
    fn send_to_surface(&self, surface_id: SurfaceId, event: InputEvent) -> Result<(), i32> {
        let handlers = self.handlers.lock();
        if let Some(handler) = handlers.get(&surface_id) {
            let mut handler = handler.lock();
            handler.handle_event(event, surface_id)
        } else {
            Ok(()) // No handler registered
        }
    }
    
    /// Find surface at coordinates (simplified)
    fn find_surface_at(&self, _x: f32, _y: f32) -> Option<SurfaceId> {
        // TODO: Implement proper hit testing using compositor
        None
    }
    
    /// Set focused surface
    pub fn set_focused_surface(&self, surface_id: Option<SurfaceId>) -> Result<(), i32> {
        let mut focused = self.focused_surface.lock();
        *focused = surface_id;
        crate::println!("[input] Focus changed to surface {:?}", surface_id);
        Ok(())
    }
    
    /// Get focused surface
    pub fn get_focused_surface(&self) -> Option<SurfaceId> {
        let focused = self.focused_surface.lock();
        *focused
    }
}

/// Global input manager instance
static INPUT_MANAGER: Mutex<Option<InputManager>> = Mutex::new(None);

/// Initialize input manager
pub fn init_input_manager() -> Result<(), i32> {
    let mut manager = INPUT_MANAGER.lock();
    if manager.is_none() {
        *manager = Some(InputManager::new());
        crate::println!("[input] Input manager initialized");
    }
    Ok(())
}

/// Get input manager
pub fn get_input_manager() -> &'static InputManager {
    static INIT_ONCE: crate::subsystems::sync::Once = crate::subsystems::sync::Once::new();
    INIT_ONCE.call_once(|| {
        let mut manager = INPUT_MANAGER.lock();
        if manager.is_none() {
            *manager = Some(InputManager::new());
        }
    });
    
    unsafe {
        &*(INPUT_MANAGER.lock().as_ref().unwrap() as *const InputManager)
    }
}

