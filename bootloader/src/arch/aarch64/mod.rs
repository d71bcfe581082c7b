//! AArch64 architecture support

pub use self::cpu::*;

mod cpu {
    pub fn early_init() {
        // AArch64 early initialization
    }

    pub fn get_cpu_features() -> u64 {
        0
    }

    pub fn interrupt_disable() {
        unsafe { core::arch::asm!("msr daifset, #15"); }
    }

    pub fn interrupt_enable() {
        unsafe { core::arch::asm!("msr daifclr, #15"); }
    }

    pub fn interrupt_enabled() -> bool {
        false
    }

    pub fn wait_for_interrupt() {
        unsafe { core::arch::asm!("wfi"); }
    }

    pub fn memory_barrier() {
        unsafe { core::arch::asm!("dsb sy"); }
    }

    pub fn cache_invalidate() {
        unsafe { core::arch::asm!("ic iallu"); }
    }

    pub fn tlb_invalidate() {
        unsafe { core::arch::asm!("tlbi alle1"); }
    }

    pub fn get_el() -> u8 {
        0
    }

    pub fn get_mpidr() -> u64 {
        0
    }

    pub fn cpu_id() -> usize {
        0
    }

    pub fn jump_to_kernel(addr: usize) -> ! {
        log::info!("Jumping to kernel at address: {:#x}", addr);
        if addr == 0 {
            log::error!("Invalid kernel address: 0x0");
        }
        // Validate address alignment (typically 4KB for ARM64)
        if addr & 0xFFF != 0 {
            log::warn!("Kernel address {:#x} is not 4KB aligned", addr);
        }
        log::debug!("Executing kernel handoff...");
        loop {}
    }

    pub fn reboot() -> ! {
        loop {}
    }

    pub fn shutdown() -> ! {
        loop {}
    }
}
