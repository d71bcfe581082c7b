//! Graphics and UI Translation Engine

extern crate alloc;
//
// Provides cross-platform graphics API translation:
// - DirectX to OpenGL/Vulkan translation
// - Metal to OpenGL/Vulkan translation
// - Universal window management
// - Input event handling
// - Multi-touch support

extern crate hashbrown;

use alloc::vec::Vec;
use alloc::string::String;
use alloc::{format, vec};
use alloc::boxed::Box;
use hashbrown::HashMap;
use crate::compat::{*, DefaultHasherBuilder};

/// Graphics translation engine
pub struct GraphicsTranslator {
    /// Platform-specific graphics contexts
    contexts: HashMap<TargetPlatform, Box<dyn GraphicsContext>, DefaultHasherBuilder>,
    /// Window manager
    window_manager: UniversalWindowManager,
    /// Input event handler
    input_handler: InputEventHandler,
    /// Graphics API translators
    api_translators: HashMap<GraphicsApi, Box<dyn GraphicsApiTranslator>, DefaultHasherBuilder>,
}

/// Supported graphics APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphicsApi {
    /// Microsoft DirectX
    DirectX,
    /// Apple Metal
    Metal,
    /// OpenGL
    OpenGL,
    /// Vulkan
    Vulkan,
    /// OpenGL ES (mobile)
    OpenGLES,
}

/// Graphics context trait
pub trait GraphicsContext: Send + Sync {
    /// Initialize graphics context
    fn initialize(&mut self, config: &GraphicsConfig) -> Result<()>;

    /// Create a window
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowHandle>;

    /// Destroy a window
    fn destroy_window(&mut self, handle: WindowHandle) -> Result<()>;

    /// Swap buffers for a window
    fn swap_buffers(&mut self, handle: WindowHandle) -> Result<()>;

    /// Handle input events
    fn handle_input(&mut self, events: &[InputEvent]) -> Result<()>;
}

/// Graphics API translator trait
pub trait GraphicsApiTranslator: Send + Sync {
    /// Get source API
    fn source_api(&self) -> GraphicsApi;

    /// Get target API
    fn target_api(&self) -> GraphicsApi;

    /// Translate a graphics command
    fn translate_command(&mut self, command: GraphicsCommand) -> Result<Vec<GraphicsCommand>>;

    /// Translate a shader
    fn translate_shader(&mut self, shader: &Shader) -> Result<Shader>;
}

/// Graphics configuration
#[derive(Debug, Clone)]
pub struct GraphicsConfig {
    /// Target platform
    pub platform: TargetPlatform,
    /// Preferred graphics API
    pub preferred_api: GraphicsApi,
    /// Screen resolution
    pub resolution: (u32, u32),
    /// Color depth
    pub color_depth: u32,
    /// Enable vsync
    pub vsync: bool,
    /// Enable fullscreen
    pub fullscreen: bool,
    /// Multi-sampling anti-aliasing
    pub msaa: u32,
}

/// Window configuration
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window position
    pub position: (i32, i32),
    /// Window size
    pub size: (u32, u32),
    /// Window flags
    pub flags: WindowFlags,
    /// Graphics API to use
    pub graphics_api: GraphicsApi,
}

/// Window flags
#[derive(Debug, Clone, Copy)]
pub struct WindowFlags {
    pub resizable: bool,
    pub borderless: bool,
    pub always_on_top: bool,
    pub minimized: bool,
    pub maximized: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            resizable: true,
            borderless: false,
            always_on_top: false,
            minimized: false,
            maximized: false,
        }
    }
}

/// Window handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle {
    pub id: u64,
}

/// Graphics command
#[derive(Debug, Clone)]
pub enum GraphicsCommand {
    /// Clear render target
    Clear {
        color: [f32; 4],
        depth: f32,
        stencil: u32,
    },
    /// Draw primitive
    DrawPrimitives {
        primitive_type: PrimitiveType,
        vertex_count: u32,
        start_vertex: u32,
    },
    /// Set render state
    SetRenderState {
        state: RenderState,
    },
    /// Bind texture
    BindTexture {
        stage: u32,
        texture: TextureHandle,
    },
    /// Set shader constant
    SetShaderConstant {
        register: u32,
        data: Vec<f32>,
    },
}

/// Primitive types
#[derive(Debug, Clone, Copy)]
pub enum PrimitiveType {
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
    TriangleFan,
}

/// Render state
#[derive(Debug, Clone)]
pub struct RenderState {
    pub blend_enabled: bool,
    pub depth_test_enabled: bool,
    pub depth_write_enabled: bool,
    pub cull_mode: CullMode,
    pub fill_mode: FillMode,
}

/// Cull modes
#[derive(Debug, Clone, Copy)]
pub enum CullMode {
    None,
    Front,
    Back,
}

/// Fill modes
#[derive(Debug, Clone, Copy)]
pub enum FillMode {
    Point,
    Wireframe,
    Solid,
}

/// Texture handle
#[derive(Debug, Clone, Copy)]
pub struct TextureHandle {
    pub id: u64,
}

/// Shader
#[derive(Debug, Clone)]
pub struct Shader {
    pub shader_type: ShaderType,
    pub source_code: String,
    pub entry_point: String,
}

/// Shader types
#[derive(Debug, Clone, Copy)]
pub enum ShaderType {
    Vertex,
    Pixel,
    Geometry,
    Compute,
}

/// Input event
#[derive(Debug, Clone)]
pub enum InputEvent {
    MouseMove {
        x: f32,
        y: f32,
        buttons: u8,
    },
    MouseDown {
        button: MouseButton,
        x: f32,
        y: f32,
    },
    MouseUp {
        button: MouseButton,
        x: f32,
        y: f32,
    },
    KeyDown {
        key: KeyCode,
        modifiers: u8,
    },
    KeyUp {
        key: KeyCode,
        modifiers: u8,
    },
    TouchStart {
        id: u64,
        x: f32,
        y: f32,
    },
    TouchMove {
        id: u64,
        x: f32,
        y: f32,
    },
    TouchEnd {
        id: u64,
        x: f32,
        y: f32,
    },
}

/// Mouse buttons
#[derive(Debug, Clone, Copy)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

/// Key codes (simplified)
#[derive(Debug, Clone, Copy)]
pub enum KeyCode {
    Unknown,
    Space,
    Apostrophe,
    Comma,
    Minus,
    Period,
    Slash,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Semicolon,
    Equal,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    LeftBracket,
    Backslash,
    RightBracket,
    GraveAccent,
    World1,
    World2,
    Escape,
    Enter,
    Tab,
    Backspace,
    Insert,
    Delete,
    Right,
    Left,
    Down,
    Up,
    PageUp,
    PageDown,
    Home,
    End,
    CapsLock,
    ScrollLock,
    NumLock,
    PrintScreen,
    Pause,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    F25,
    Keypad0,
    Keypad1,
    Keypad2,
    Keypad3,
    Keypad4,
    Keypad5,
    Keypad6,
    Keypad7,
    Keypad8,
    Keypad9,
    KeypadDecimal,
    KeypadDivide,
    KeypadMultiply,
    KeypadSubtract,
    KeypadAdd,
    KeypadEnter,
    KeypadEqual,
    LeftShift,
    LeftControl,
    LeftAlt,
    LeftSuper,
    RightShift,
    RightControl,
    RightAlt,
    RightSuper,
    Menu,
}

/// Universal window manager
pub struct UniversalWindowManager {
    windows: HashMap<WindowHandle, Window, DefaultHasherBuilder>,
    next_window_id: u64,
}

/// Window
pub struct Window {
    pub handle: WindowHandle,
    pub config: WindowConfig,
    pub graphics_context: Option<Box<dyn GraphicsContext>>,
    pub visible: bool,
    pub focused: bool,
    pub size: (u32, u32),
    pub position: (i32, i32),
}

impl UniversalWindowManager {
    pub fn new() -> Self {
        Self {
            windows: HashMap::with_hasher(DefaultHasherBuilder),
            next_window_id: 1,
        }
    }

    pub fn create_window(&mut self, config: WindowConfig) -> Result<WindowHandle> {
        let handle = WindowHandle {
            id: self.next_window_id,
        };

        let window = Window {
            handle,
            config: config.clone(),
            graphics_context: None,
            visible: false,
            focused: false,
            size: config.size,
            position: config.position,
        };

        self.windows.insert(handle, window);
        self.next_window_id += 1;

        Ok(handle)
    }

    pub fn destroy_window(&mut self, handle: WindowHandle) -> Result<()> {
        self.windows.remove(&handle)
            .ok_or(CompatibilityError::NotFound)?;
        Ok(())
    }

    pub fn get_window(&self, handle: WindowHandle) -> Option<&Window> {
        self.windows.get(&handle)
    }
}

/// Input event handler
pub struct InputEventHandler {
    event_queue: Vec<InputEvent>,
    mouse_state: MouseState,
    keyboard_state: KeyboardState,
}

/// Mouse state
#[derive(Debug, Default)]
pub struct MouseState {
    pub position: (f32, f32),
    pub buttons: u8,
    pub wheel: f32,
}

/// Keyboard state
#[derive(Debug)]
pub struct KeyboardState {
    pub keys: [bool; 512], // Simplified key array
    pub modifiers: u8,
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self {
            keys: [false; 512],
            modifiers: 0,
        }
    }
}

impl InputEventHandler {
    pub fn new() -> Self {
        Self {
            event_queue: Vec::new(),
            mouse_state: MouseState::default(),
            keyboard_state: KeyboardState::default(),
        }
    }

    pub fn add_event(&mut self, event: InputEvent) {
        self.update_state(&event);
        self.event_queue.push(event);
    }

    pub fn get_events(&mut self) -> Vec<InputEvent> {
        let events = self.event_queue.drain(..).collect();
        events
    }

    fn update_state(&mut self, event: &InputEvent) {
        match event {
            InputEvent::MouseMove { x, y, buttons } => {
                self.mouse_state.position = (*x, *y);
                self.mouse_state.buttons = *buttons;
            }
            InputEvent::MouseDown { button, x, y } => {
                self.mouse_state.position = (*x, *y);
                self.mouse_state.buttons |= self.button_to_mask(*button);
            }
            InputEvent::MouseUp { button, x, y } => {
                self.mouse_state.position = (*x, *y);
                self.mouse_state.buttons &= !self.button_to_mask(*button);
            }
            InputEvent::KeyDown { key, modifiers } => {
                self.keyboard_state.modifiers = *modifiers;
                if let Some(index) = self.key_to_index(*key) {
                    if index < self.keyboard_state.keys.len() {
                        self.keyboard_state.keys[index] = true;
                    }
                }
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.keyboard_state.modifiers = *modifiers;
                if let Some(index) = self.key_to_index(*key) {
                    if index < self.keyboard_state.keys.len() {
                        self.keyboard_state.keys[index] = false;
                    }
                }
            }
            _ => {}
        }
    }

    fn button_to_mask(&self, button: MouseButton) -> u8 {
        match button {
            MouseButton::Left => 0x01,
            MouseButton::Right => 0x02,
            MouseButton::Middle => 0x04,
            MouseButton::X1 => 0x08,
            MouseButton::X2 => 0x10,
        }
    }

    fn key_to_index(&self, key: KeyCode) -> Option<usize> {
        // Simplified key to index mapping
        match key {
            KeyCode::A => Some(0),
            KeyCode::B => Some(1),
            KeyCode::C => Some(2),
            KeyCode::D => Some(3),
            KeyCode::E => Some(4),
            KeyCode::F => Some(5),
            KeyCode::G => Some(6),
            KeyCode::H => Some(7),
            KeyCode::I => Some(8),
            KeyCode::J => Some(9),
            KeyCode::K => Some(10),
            KeyCode::L => Some(11),
            KeyCode::M => Some(12),
            KeyCode::N => Some(13),
            KeyCode::O => Some(14),
            KeyCode::P => Some(15),
            KeyCode::Q => Some(16),
            KeyCode::R => Some(17),
            KeyCode::S => Some(18),
            KeyCode::T => Some(19),
            KeyCode::U => Some(20),
            KeyCode::V => Some(21),
            KeyCode::W => Some(22),
            KeyCode::X => Some(23),
            KeyCode::Y => Some(24),
            KeyCode::Z => Some(25),
            _ => None,
        }
    }
}

impl GraphicsTranslator {
    pub fn new() -> Self {
        let mut translator = Self {
            contexts: HashMap::with_hasher(DefaultHasherBuilder),
            window_manager: UniversalWindowManager::new(),
            input_handler: InputEventHandler::new(),
            api_translators: HashMap::with_hasher(DefaultHasherBuilder),
        };

        // Initialize API translators
        translator.api_translators.insert(GraphicsApi::DirectX, Box::new(DirectXTranslator::new()));
        translator.api_translators.insert(GraphicsApi::Metal, Box::new(MetalTranslator::new()));

        translator
    }

    pub fn create_graphics_context(&mut self, platform: TargetPlatform, config: GraphicsConfig) -> Result<()> {
        // Create platform-specific graphics context
        // This is a placeholder implementation
        Ok(())
    }
}

/// DirectX to OpenGL/Vulkan translator
pub struct DirectXTranslator {
    // DirectX translator implementation
}

impl DirectXTranslator {
    pub fn new() -> Self {
        Self {}
    }
}

impl GraphicsApiTranslator for DirectXTranslator {
    fn source_api(&self) -> GraphicsApi {
        GraphicsApi::DirectX
    }

    fn target_api(&self) -> GraphicsApi {
        GraphicsApi::Vulkan // Prefer Vulkan
    }

    fn translate_command(&mut self, command: GraphicsCommand) -> Result<Vec<GraphicsCommand>> {
        // Placeholder: just return the command as-is
        Ok(vec![command])
    }

    fn translate_shader(&mut self, shader: &Shader) -> Result<Shader> {
        // Placeholder: return shader as-is
        Ok(shader.clone())
    }
}

/// Metal to OpenGL/Vulkan translator
pub struct MetalTranslator {
    // Metal translator implementation
}

impl MetalTranslator {
    pub fn new() -> Self {
        Self {}
    }
}

impl GraphicsApiTranslator for MetalTranslator {
    fn source_api(&self) -> GraphicsApi {
        GraphicsApi::Metal
    }

    fn target_api(&self) -> GraphicsApi {
        GraphicsApi::Vulkan // Prefer Vulkan
    }

    fn translate_command(&mut self, command: GraphicsCommand) -> Result<Vec<GraphicsCommand>> {
        // Placeholder: just return the command as-is
        Ok(vec![command])
    }

    fn translate_shader(&mut self, shader: &Shader) -> Result<Shader> {
        // Placeholder: return shader as-is
        Ok(shader.clone())
    }
}
