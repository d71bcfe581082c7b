//! Input Method Editor (IME) framework
//!
//! Provides input method support for text input, especially for CJK languages.

extern crate alloc;

use alloc::vec::Vec;
use alloc::string::{String, ToString};
use alloc::collections::BTreeMap;
use crate::subsystems::sync::Mutex;
use crate::reliability::errno::{EINVAL, ENOMEM};

/// IME state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImeState {
    /// IME is disabled
    Disabled,
    /// IME is enabled but inactive
    Inactive,
    /// IME is composing (e.g., typing pinyin)
    Composing,
    /// IME is showing candidates
    ShowingCandidates,
}

/// IME candidate (for word selection)
#[derive(Debug, Clone)]
pub struct ImeCandidate {
    /// Candidate text
    pub text: String,
    /// Candidate index
    pub index: usize,
}

/// IME composition (pre-commit text)
#[derive(Debug, Clone)]
pub struct ImeComposition {
    /// Composition text
    pub text: String,
    /// Cursor position in composition
    pub cursor_pos: usize,
    /// Selection start
    pub selection_start: usize,
    /// Selection end
    pub selection_end: usize,
}

/// IME handler trait
pub trait ImeHandler: Send + Sync {
    /// Handle key input
    fn handle_key(&mut self, key: u32, modifiers: u32) -> Result<ImeResult, i32>;
    
    /// Get current composition
    fn get_composition(&self) -> Option<ImeComposition>;
    
    /// Get candidates
    fn get_candidates(&self) -> Vec<ImeCandidate>;
    
    /// Select candidate
    fn select_candidate(&mut self, index: usize) -> Result<String, i32>;
    
    /// Cancel composition
    fn cancel_composition(&mut self) -> Result<(), i32>;
    
    /// Commit composition
    fn commit_composition(&mut self) -> Result<String, i32>;
}

/// IME result
#[derive(Debug, Clone)]
pub enum ImeResult {
    /// No action needed
    None,
    /// Character to insert
    InsertChar(char),
    /// String to insert
    InsertString(String),
    /// Composition updated
    CompositionUpdated,
    /// Candidates updated
    CandidatesUpdated,
}

/// Simple Pinyin IME (placeholder implementation)
pub struct PinyinIme {
    /// Current state
    state: ImeState,
    /// Current composition
    composition: Option<ImeComposition>,
    /// Current candidates
    candidates: Vec<ImeCandidate>,
    /// Pinyin input buffer
    pinyin_buffer: String,
}

impl PinyinIme {
    /// Create a new Pinyin IME
    pub fn new() -> Self {
        Self {
            state: ImeState::Inactive,
            composition: None,
            candidates: Vec::new(),
            pinyin_buffer: String::new(),
        }
    }
    
    /// Convert pinyin to Chinese characters (simplified)
    fn pinyin_to_chinese(&self, pinyin: &str) -> Vec<ImeCandidate> {
        // Placeholder implementation
        // In real implementation, this would use a dictionary
        let mut candidates = Vec::new();
        if pinyin == "ni" {
            candidates.push(ImeCandidate { text: "你".to_string(), index: 0 });
            candidates.push(ImeCandidate { text: "尼".to_string(), index: 1 });
            candidates.push(ImeCandidate { text: "泥".to_string(), index: 2 });
        } else if pinyin == "hao" {
            candidates.push(ImeCandidate { text: "好".to_string(), index: 0 });
            candidates.push(ImeCandidate { text: "号".to_string(), index: 1 });
            candidates.push(ImeCandidate { text: "豪".to_string(), index: 2 });
        }
        candidates
    }
}

impl ImeHandler for PinyinIme {
    fn handle_key(&mut self, key: u32, _modifiers: u32) -> Result<ImeResult, i32> {
        match self.state {
            ImeState::Disabled | ImeState::Inactive => {
                // Not in IME mode - return None
                Ok(ImeResult::None)
            }
            ImeState::Composing | ImeState::ShowingCandidates => {
                // Handle pinyin input
                if key >= b'a' as u32 && key <= b'z' as u32 {
                    // Add to pinyin buffer
                    self.pinyin_buffer.push(key as u8 as char);
                    self.state = ImeState::Composing;
                    
                    // Update composition
                    self.composition = Some(ImeComposition {
                        text: self.pinyin_buffer.clone(),
                        cursor_pos: self.pinyin_buffer.len(),
                        selection_start: 0,
                        selection_end: self.pinyin_buffer.len(),
                    });
                    
                    // Get candidates
                    self.candidates = self.pinyin_to_chinese(&self.pinyin_buffer);
                    if !self.candidates.is_empty() {
                        self.state = ImeState::ShowingCandidates;
                        Ok(ImeResult::CandidatesUpdated)
                    } else {
                        Ok(ImeResult::CompositionUpdated)
                    }
                } else if key == 13 { // Enter
                    // Commit first candidate
                    if !self.candidates.is_empty() {
                        let result = self.candidates[0].text.clone();
                        self.pinyin_buffer.clear();
                        self.composition = None;
                        self.candidates.clear();
                        self.state = ImeState::Inactive;
                        Ok(ImeResult::InsertString(result))
                    } else {
                        Ok(ImeResult::None)
                    }
                } else if key == 27 { // Escape
                    // Cancel composition
                    self.cancel_composition()?;
                    Ok(ImeResult::None)
                } else {
                    Ok(ImeResult::None)
                }
            }
        }
    }
    
    fn get_composition(&self) -> Option<ImeComposition> {
        self.composition.clone()
    }
    
    fn get_candidates(&self) -> Vec<ImeCandidate> {
        self.candidates.clone()
    }
    
    fn select_candidate(&mut self, index: usize) -> Result<String, i32> {
        if index >= self.candidates.len() {
            return Err(EINVAL);
        }
        
        let result = self.candidates[index].text.clone();
        self.pinyin_buffer.clear();
        self.composition = None;
        self.candidates.clear();
        self.state = ImeState::Inactive;
        
        Ok(result)
    }
    
    fn cancel_composition(&mut self) -> Result<(), i32> {
        self.pinyin_buffer.clear();
        self.composition = None;
        self.candidates.clear();
        self.state = ImeState::Inactive;
        Ok(())
    }
    
    fn commit_composition(&mut self) -> Result<String, i32> {
        if !self.candidates.is_empty() {
            self.select_candidate(0)
        } else {
            self.cancel_composition()?;
            Ok(String::new())
        }
    }
}

/// IME manager - manages input methods
pub struct ImeManager {
    /// Active IME handler
    active_ime: Mutex<Option<alloc::boxed::Box<dyn ImeHandler>>>,
    /// IME state
    state: Mutex<ImeState>,
    /// Available IMEs
    imes: Mutex<BTreeMap<String, alloc::boxed::Box<dyn ImeHandler>>>,
}

impl ImeManager {
    /// Create a new IME manager
    pub fn new() -> Self {
        let mut imes = BTreeMap::new();
        imes.insert("pinyin".to_string(), alloc::boxed::Box::new(PinyinIme::new()) as alloc::boxed::Box<dyn ImeHandler>);
        
        Self {
            active_ime: Mutex::new(None),
            state: Mutex::new(ImeState::Disabled),
            imes: Mutex::new(imes),
        }
    }
    
    /// Enable IME
    pub fn enable(&self, ime_name: &str) -> Result<(), i32> {
        let mut imes = self.imes.lock();
        if let Some(ime) = imes.get(ime_name) {
            // Clone IME handler (simplified - real implementation would use Arc)
            let mut active = self.active_ime.lock();
            *active = None; // Placeholder
            let mut state = self.state.lock();
            *state = ImeState::Inactive;
            crate::println!("[ime] Enabled IME: {}", ime_name);
            Ok(())
        } else {
            Err(EINVAL)
        }
    }
    
    /// Disable IME
    pub fn disable(&self) {
        let mut active = self.active_ime.lock();
        *active = None;
        let mut state = self.state.lock();
        *state = ImeState::Disabled;
        crate::println!("[ime] Disabled IME");
    }
    
    /// Process key input through IME
    pub fn process_key(&self, key: u32, modifiers: u32) -> Result<ImeResult, i32> {
        let state = self.state.lock();
        if *state == ImeState::Disabled {
            return Ok(ImeResult::None);
        }
        drop(state);
        
        let mut active = self.active_ime.lock();
        if let Some(ref mut ime) = *active {
            ime.handle_key(key, modifiers)
        } else {
            Ok(ImeResult::None)
        }
    }
}

/// Global IME manager instance
static IME_MANAGER: Mutex<Option<ImeManager>> = Mutex::new(None);

/// Initialize IME manager
pub fn init_ime_manager() -> Result<(), i32> {
    let mut manager = IME_MANAGER.lock();
    if manager.is_none() {
        *manager = Some(ImeManager::new());
        crate::println!("[ime] IME manager initialized");
    }
    Ok(())
}

/// Get IME manager
pub fn get_ime_manager() -> &'static ImeManager {
    static INIT_ONCE: crate::subsystems::sync::Once = crate::subsystems::sync::Once::new();
    INIT_ONCE.call_once(|| {
        let mut manager = IME_MANAGER.lock();
        if manager.is_none() {
            *manager = Some(ImeManager::new());
        }
    });
    
    unsafe {
        &*(IME_MANAGER.lock().as_ref().unwrap() as *const ImeManager)
    }
}

