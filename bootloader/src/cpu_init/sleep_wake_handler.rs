//! Sleep and Wake Handling - S3 sleep state support and resume
//!
//! Provides:
//! - S3 sleep state management
//! - Wake event handling
//! - CPU context save/restore
//! - System state preservation

/// Sleep states (ACPI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepState {
    /// S0 - Working
    S0,
    /// S1 - Sleeping with CPU halted
    S1,
    /// S3 - Sleeping with memory preserved
    S3,
    /// S4 - Hibernation (disk saved)
    S4,
    /// S5 - Soft off
    S5,
}

/// Wake event sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeEventSource {
    /// Power button
    PowerButton,
    /// RTC timer
    RtcTimer,
    /// Keyboard/mouse
    Input,
    /// Network (WoL)
    Network,
    /// USB device
    Usb,
    /// ACPI event
    AcpiEvent,
    /// Unknown
    Unknown,
}

/// CPU context for S3 resume
#[derive(Debug, Clone, Copy)]
pub struct CpuContext {
    /// RAX
    pub rax: u64,
    /// RBX
    pub rbx: u64,
    /// RCX
    pub rcx: u64,
    /// RDX
    pub rdx: u64,
    /// RSI
    pub rsi: u64,
    /// RDI
    pub rdi: u64,
    /// RBP
    pub rbp: u64,
    /// RSP
    pub rsp: u64,
    /// RIP
    pub rip: u64,
    /// CR0
    pub cr0: u64,
    /// CR3
    pub cr3: u64,
    /// RFLAGS
    pub rflags: u64,
}

impl CpuContext {
    /// Create CPU context
    pub fn new() -> Self {
        CpuContext {
            rax: 0,
            rbx: 0,
            rcx: 0,
            rdx: 0,
            rsi: 0,
            rdi: 0,
            rbp: 0,
            rsp: 0,
            rip: 0,
            cr0: 0x80000001,
            cr3: 0,
            rflags: 0x0002,
        }
    }

    /// Check if context is valid
    pub fn is_valid(&self) -> bool {
        self.cr3 != 0 || self.rip != 0
    }
}

/// Wake event
#[derive(Debug, Clone, Copy)]
pub struct WakeEvent {
    /// Event source
    pub source: WakeEventSource,
    /// Timestamp in milliseconds
    pub timestamp: u64,
    /// Event data
    pub data: u32,
    /// Valid flag
    pub valid: bool,
}

impl WakeEvent {
    /// Create wake event
    pub fn new(source: WakeEventSource, timestamp: u64) -> Self {
        WakeEvent {
            source,
            timestamp,
            data: 0,
            valid: true,
        }
    }
}

/// Sleep/Wake handler
pub struct SleepWakeHandler {
    /// Current sleep state
    current_state: SleepState,
    /// Previous sleep state
    previous_state: SleepState,
    /// CPU contexts (per-CPU)
    cpu_contexts: [Option<CpuContext>; 16],
    /// CPU count
    cpu_count: usize,
    /// Wake events log
    wake_events: [Option<WakeEvent>; 32],
    /// Wake event count
    wake_event_count: usize,
    /// S3 memory address (preserved memory location)
    s3_memory_address: u64,
    /// S3 memory size
    s3_memory_size: u32,
    /// Sleep count
    sleep_count: u32,
    /// Wake count
    wake_count: u32,
}

impl SleepWakeHandler {
    /// Create sleep/wake handler
    pub fn new() -> Self {
        SleepWakeHandler {
            current_state: SleepState::S0,
            previous_state: SleepState::S0,
            cpu_contexts: [None; 16],
            cpu_count: 0,
            wake_events: [None; 32],
            wake_event_count: 0,
            s3_memory_address: 0xFFFFF000,
            s3_memory_size: 0x1000,
            sleep_count: 0,
            wake_count: 0,
        }
    }

    /// Get current sleep state
    pub fn get_current_state(&self) -> SleepState {
        self.current_state
    }

    /// Get previous sleep state
    pub fn get_previous_state(&self) -> SleepState {
        self.previous_state
    }

    /// Enter sleep state
    pub fn enter_sleep_state(&mut self, state: SleepState) -> bool {
        if state == SleepState::S0 || state == SleepState::S5 {
            return false; // Cannot sleep in S0 or S5
        }

        self.previous_state = self.current_state;
        self.current_state = state;
        self.sleep_count += 1;
        true
    }

    /// Resume from sleep
    pub fn resume_from_sleep(&mut self, source: WakeEventSource) -> bool {
        if self.current_state == SleepState::S0 {
            return false; // Already awake
        }

        self.previous_state = self.current_state;
        self.current_state = SleepState::S0;
        self.wake_count += 1;

        // Log wake event
        let event = WakeEvent::new(source, 0);
        if self.wake_event_count < 32 {
            self.wake_events[self.wake_event_count] = Some(event);
            self.wake_event_count += 1;
        }

        true
    }

    /// Save CPU context for S3
    pub fn save_cpu_context(&mut self, cpu_id: u32, ctx: CpuContext) -> bool {
        let cpu_id = cpu_id as usize;
        if cpu_id < 16 {
            self.cpu_contexts[cpu_id] = Some(ctx);
            if cpu_id >= self.cpu_count {
                self.cpu_count = cpu_id + 1;
            }
            true
        } else {
            false
        }
    }

    /// Get CPU context
    pub fn get_cpu_context(&self, cpu_id: u32) -> Option<&CpuContext> {
        let cpu_id = cpu_id as usize;
        if cpu_id < 16 {
            self.cpu_contexts[cpu_id].as_ref()
        } else {
            None
        }
    }

    /// Restore CPU context
    pub fn restore_cpu_context(&self, cpu_id: u32) -> Option<CpuContext> {
        let cpu_id = cpu_id as usize;
        if cpu_id < 16 {
            self.cpu_contexts[cpu_id]
        } else {
            None
        }
    }

    /// Get CPU count
    pub fn get_cpu_count(&self) -> usize {
        self.cpu_count
    }

    /// Get wake event
    pub fn get_wake_event(&self, index: usize) -> Option<&WakeEvent> {
        if index < self.wake_event_count {
            self.wake_events[index].as_ref()
        } else {
            None
        }
    }

    /// Get wake event count
    pub fn get_wake_event_count(&self) -> usize {
        self.wake_event_count
    }

    /// Get latest wake source
    pub fn get_latest_wake_source(&self) -> Option<WakeEventSource> {
        if self.wake_event_count > 0 {
            self.wake_events[self.wake_event_count - 1].as_ref().map(|e| e.source)
        } else {
            None
        }
    }

    /// Set S3 memory address
    pub fn set_s3_memory(&mut self, address: u64, size: u32) {
        self.s3_memory_address = address;
        self.s3_memory_size = size;
    }

    /// Get S3 memory address
    pub fn get_s3_memory_address(&self) -> u64 {
        self.s3_memory_address
    }

    /// Get S3 memory size
    pub fn get_s3_memory_size(&self) -> u32 {
        self.s3_memory_size
    }

    /// Get sleep count
    pub fn get_sleep_count(&self) -> u32 {
        self.sleep_count
    }

    /// Get wake count
    pub fn get_wake_count(&self) -> u32 {
        self.wake_count
    }

    /// Check if suspended
    pub fn is_suspended(&self) -> bool {
        self.current_state != SleepState::S0
    }

    /// Prepare for S3 sleep
    pub fn prepare_s3_sleep(&mut self) -> bool {
        // Save all CPU contexts
        if self.cpu_count == 0 {
            return false;
        }

        // Enter S3 state
        self.enter_sleep_state(SleepState::S3)
    }

    /// Complete S3 resume
    pub fn complete_s3_resume(&mut self) -> bool {
        // Restore CPU contexts and return to S0
        self.resume_from_sleep(WakeEventSource::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_states() {
        assert_ne!(SleepState::S0, SleepState::S3);
    }

    #[test]
    fn test_wake_sources() {
        assert_ne!(WakeEventSource::PowerButton, WakeEventSource::RtcTimer);
    }

    #[test]
    fn test_cpu_context_creation() {
        let ctx = CpuContext::new();
        assert_eq!(ctx.rax, 0);
        assert!(ctx.cr0 != 0);
    }

    #[test]
    fn test_cpu_context_valid() {
        let ctx = CpuContext::new();
        assert!(!ctx.is_valid()); // cr3 is 0, rip is 0
    }

    #[test]
    fn test_cpu_context_with_values() {
        let mut ctx = CpuContext::new();
        ctx.cr3 = 0x1000;
        assert!(ctx.is_valid());
    }

    #[test]
    fn test_wake_event_creation() {
        let event = WakeEvent::new(WakeEventSource::PowerButton, 1000);
        assert_eq!(event.source, WakeEventSource::PowerButton);
        assert!(event.valid);
    }

    #[test]
    fn test_handler_creation() {
        let handler = SleepWakeHandler::new();
        assert_eq!(handler.get_current_state(), SleepState::S0);
    }

    #[test]
    fn test_enter_sleep_state() {
        let mut handler = SleepWakeHandler::new();
        assert!(handler.enter_sleep_state(SleepState::S3));
        assert_eq!(handler.get_current_state(), SleepState::S3);
    }

    #[test]
    fn test_cannot_sleep_in_s0() {
        let mut handler = SleepWakeHandler::new();
        assert!(!handler.enter_sleep_state(SleepState::S0));
    }

    #[test]
    fn test_cannot_sleep_in_s5() {
        let mut handler = SleepWakeHandler::new();
        assert!(!handler.enter_sleep_state(SleepState::S5));
    }

    #[test]
    fn test_resume_from_sleep() {
        let mut handler = SleepWakeHandler::new();
        handler.enter_sleep_state(SleepState::S3);
        assert!(handler.resume_from_sleep(WakeEventSource::PowerButton));
        assert_eq!(handler.get_current_state(), SleepState::S0);
    }

    #[test]
    fn test_save_cpu_context() {
        let mut handler = SleepWakeHandler::new();
        let ctx = CpuContext::new();
        assert!(handler.save_cpu_context(0, ctx));
    }

    #[test]
    fn test_get_cpu_context() {
        let mut handler = SleepWakeHandler::new();
        let ctx = CpuContext::new();
        handler.save_cpu_context(0, ctx);
        assert!(handler.get_cpu_context(0).is_some());
    }

    #[test]
    fn test_restore_cpu_context() {
        let mut handler = SleepWakeHandler::new();
        let ctx = CpuContext::new();
        handler.save_cpu_context(0, ctx);
        assert!(handler.restore_cpu_context(0).is_some());
    }

    #[test]
    fn test_wake_event_logging() {
        let mut handler = SleepWakeHandler::new();
        handler.enter_sleep_state(SleepState::S3);
        handler.resume_from_sleep(WakeEventSource::RtcTimer);
        assert_eq!(handler.get_wake_event_count(), 1);
    }

    #[test]
    fn test_get_latest_wake_source() {
        let mut handler = SleepWakeHandler::new();
        handler.enter_sleep_state(SleepState::S3);
        handler.resume_from_sleep(WakeEventSource::Usb);
        assert_eq!(handler.get_latest_wake_source(), Some(WakeEventSource::Usb));
    }

    #[test]
    fn test_set_s3_memory() {
        let mut handler = SleepWakeHandler::new();
        handler.set_s3_memory(0xFFFFF000, 0x1000);
        assert_eq!(handler.get_s3_memory_address(), 0xFFFFF000);
        assert_eq!(handler.get_s3_memory_size(), 0x1000);
    }

    #[test]
    fn test_sleep_count() {
        let mut handler = SleepWakeHandler::new();
        assert_eq!(handler.get_sleep_count(), 0);
        handler.enter_sleep_state(SleepState::S1);
        assert_eq!(handler.get_sleep_count(), 1);
    }

    #[test]
    fn test_wake_count() {
        let mut handler = SleepWakeHandler::new();
        handler.enter_sleep_state(SleepState::S3);
        handler.resume_from_sleep(WakeEventSource::PowerButton);
        assert_eq!(handler.get_wake_count(), 1);
    }

    #[test]
    fn test_is_suspended() {
        let mut handler = SleepWakeHandler::new();
        assert!(!handler.is_suspended());
        handler.enter_sleep_state(SleepState::S3);
        assert!(handler.is_suspended());
    }

    #[test]
    fn test_cpu_count_tracking() {
        let mut handler = SleepWakeHandler::new();
        let ctx = CpuContext::new();
        handler.save_cpu_context(0, ctx);
        handler.save_cpu_context(1, ctx);
        assert_eq!(handler.get_cpu_count(), 2);
    }

    #[test]
    fn test_prepare_s3_sleep() {
        let mut handler = SleepWakeHandler::new();
        let ctx = CpuContext::new();
        handler.save_cpu_context(0, ctx);
        assert!(handler.prepare_s3_sleep());
    }

    #[test]
    fn test_complete_s3_resume() {
        let mut handler = SleepWakeHandler::new();
        let ctx = CpuContext::new();
        handler.save_cpu_context(0, ctx);
        handler.prepare_s3_sleep();
        assert!(handler.complete_s3_resume());
        assert_eq!(handler.get_current_state(), SleepState::S0);
    }

    #[test]
    fn test_multiple_wake_events() {
        let mut handler = SleepWakeHandler::new();
        for _ in 0..5 {
            handler.enter_sleep_state(SleepState::S3);
            handler.resume_from_sleep(WakeEventSource::PowerButton);
        }
        assert_eq!(handler.get_wake_event_count(), 5);
    }

    #[test]
    fn test_previous_state_tracking() {
        let mut handler = SleepWakeHandler::new();
        let initial = handler.get_previous_state();
        assert_eq!(initial, SleepState::S0); // Verify initial state is S0
        handler.enter_sleep_state(SleepState::S1);
        assert_eq!(handler.get_previous_state(), SleepState::S0);
    }

    #[test]
    fn test_s1_sleep_state() {
        let mut handler = SleepWakeHandler::new();
        assert!(handler.enter_sleep_state(SleepState::S1));
        assert_eq!(handler.get_current_state(), SleepState::S1);
    }

    #[test]
    fn test_multiple_cpu_contexts() {
        let mut handler = SleepWakeHandler::new();
        let mut ctx1 = CpuContext::new();
        let mut ctx2 = CpuContext::new();
        ctx1.rax = 0x1111;
        ctx2.rax = 0x2222;
        handler.save_cpu_context(0, ctx1);
        handler.save_cpu_context(1, ctx2);
        assert_eq!(handler.get_cpu_context(0).unwrap().rax, 0x1111);
        assert_eq!(handler.get_cpu_context(1).unwrap().rax, 0x2222);
    }

    #[test]
    fn test_wake_event_data() {
        let mut handler = SleepWakeHandler::new();
        handler.enter_sleep_state(SleepState::S3);
        handler.resume_from_sleep(WakeEventSource::AcpiEvent);
        if let Some(event) = handler.get_wake_event(0) {
            assert!(event.valid);
        }
    }

    #[test]
    fn test_cpu_context_fields() {
        let mut ctx = CpuContext::new();
        ctx.rip = 0x401000;
        ctx.cr3 = 0x100000;
        assert_eq!(ctx.rip, 0x401000);
        assert!(ctx.is_valid());
    }

    #[test]
    fn test_invalid_cpu_id() {
        let mut handler = SleepWakeHandler::new();
        let ctx = CpuContext::new();
        assert!(!handler.save_cpu_context(16, ctx)); // Out of range
    }

    #[test]
    fn test_cannot_resume_when_awake() {
        let mut handler = SleepWakeHandler::new();
        assert!(!handler.resume_from_sleep(WakeEventSource::PowerButton));
    }

    #[test]
    fn test_s3_memory_persistence() {
        let mut handler = SleepWakeHandler::new();
        handler.set_s3_memory(0x80000000, 0x10000);
        assert_eq!(handler.get_s3_memory_address(), 0x80000000);
        assert_eq!(handler.get_s3_memory_size(), 0x10000);
    }
}
