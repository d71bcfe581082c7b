/// Real Mode Switcher - Real Mode Transition Framework
///
/// Provides framework for switching between long mode (x86_64) and real mode.
/// Only enabled for bare metal targets (target_os = "none").

/// CPU state for mode switching
#[derive(Debug, Clone, Copy)]
pub struct CPUState {
    pub cr0: u64,
    pub cr3: u64,
    pub cr4: u64,
}

impl CPUState {
    pub fn new() -> Self {
        Self {
            cr0: 0,
            cr3: 0,
            cr4: 0,
        }
    }
}

/// Real Mode Switcher
pub struct RealmModeSwitcher {
    saved_state: Option<CPUState>,
}

impl RealmModeSwitcher {
    /// Create new switcher
    pub fn new() -> Self {
        Self {
            saved_state: None,
        }
    }

    /// Enter real mode (bare metal only)
    #[cfg(target_os = "none")]
    pub unsafe fn enter_real_mode(&mut self) -> Result<(), &'static str> {
        // Save current state
        let state = CPUState {
            cr0: 0,
            cr3: 0,
            cr4: 0,
        };
        self.saved_state = Some(state);

        // Disable interrupts
        #[cfg(target_arch = "x86_64")]
        core::arch::asm!("cli", options(nostack, preserves_flags));
        
        #[cfg(not(target_arch = "x86_64"))]
        {
            // Non-x86 architectures use different interrupt control methods
        }

        // In real implementation would:
        // 1. Disable paging
        // 2. Disable long mode
        // 3. Load real mode GDT
        // 4. Far jump to real mode code

        Ok(())
    }

    /// Enter real mode (host OS stub)
    #[cfg(not(target_os = "none"))]
    pub unsafe fn enter_real_mode(&mut self) -> Result<(), &'static str> {
        self.saved_state = Some(CPUState::new());
        Ok(())
    }

    /// Exit real mode (bare metal only)
    #[cfg(target_os = "none")]
    pub unsafe fn exit_real_mode(&mut self) -> Result<(), &'static str> {
        let _state = self.saved_state.ok_or("No saved state")?;

        // In real implementation would:
        // 1. Enable protected mode
        // 2. Enable long mode
        // 3. Enable paging
        // 4. Restore original GDT
        // 5. Far jump back to long mode

        self.saved_state = None;
        Ok(())
    }

    /// Exit real mode (host OS stub)
    #[cfg(not(target_os = "none"))]
    pub unsafe fn exit_real_mode(&mut self) -> Result<(), &'static str> {
        self.saved_state = None;
        Ok(())
    }

    pub fn has_saved_state(&self) -> bool {
        self.saved_state.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switcher_creation() {
        let switcher = RealmModeSwitcher::new();
        assert!(!switcher.has_saved_state());
    }

    #[test]
    fn test_cpu_state() {
        let state = CPUState::new();
        assert_eq!(state.cr0, 0);
        assert_eq!(state.cr3, 0);
        assert_eq!(state.cr4, 0);
    }

    #[test]
    fn test_mode_switching_sequence() {
        unsafe {
            let mut switcher = RealmModeSwitcher::new();
            
            // Enter real mode
            assert!(switcher.enter_real_mode().is_ok());
            assert!(switcher.has_saved_state());
            
            // Exit real mode
            assert!(switcher.exit_real_mode().is_ok());
            assert!(!switcher.has_saved_state());
        }
    }
}
