// Boot flow integration test framework

#[cfg(test)]
use crate::kernel_if::kernel_loader::validate_kernel;

#[cfg(test)]
use crate::memory_mgmt::paging_setup::initialize_paging;

pub struct BootFlowTest {
    name: &'static str,
    passed: bool,
    message: &'static str,
}

impl BootFlowTest {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            passed: false,
            message: "",
        }
    }

    pub fn run(&mut self, test_fn: fn() -> Result<(), &'static str>) {
        match test_fn() {
            Ok(()) => {
                self.passed = true;
                self.message = "PASS";
            }
            Err(e) => {
                self.passed = false;
                self.message = e;
            }
        }
    }

    pub fn print_result(&self) {
        crate::drivers::console::write_str("[TEST] ");
        crate::drivers::console::write_str(self.name);
        crate::drivers::console::write_str(": ");
        if self.passed {
            crate::drivers::console::write_str("PASS\n");
        } else {
            crate::drivers::console::write_str("FAIL (");
            crate::drivers::console::write_str(self.message);
            crate::drivers::console::write_str(")\n");
        }
    }
}

pub struct BootFlowTestSuite {
    tests: [BootFlowTest; 10],
    count: usize,
}

impl BootFlowTestSuite {
    pub fn new() -> Self {
        Self {
            tests: [
                BootFlowTest::new("Console I/O"),
                BootFlowTest::new("ELF Validation"),
                BootFlowTest::new("Kernel Loading"),
                BootFlowTest::new("Memory Mapping"),
                BootFlowTest::new("Paging Setup"),
                BootFlowTest::new("UEFI Detection"),
                BootFlowTest::new("Multiboot2 Parse"),
                BootFlowTest::new("Boot Security"),
                BootFlowTest::new("Stack Setup"),
                BootFlowTest::new("Jump Preparation"),
            ],
            count: 0,
        }
    }

    pub fn run_tests(&mut self) {
        crate::drivers::console::write_str("\n=== Boot Flow Integration Tests ===\n\n");

        // Set count to the actual number of tests we're running
        self.count = 10;

        // Test 1: Console I/O
        self.tests[0].run(test_console_io);
        self.tests[0].print_result();

        // Test 2: ELF Validation
        self.tests[1].run(test_elf_validation);
        self.tests[1].print_result();

        // Test 3: Kernel Loading
        self.tests[2].run(test_kernel_loading);
        self.tests[2].print_result();

        // Test 4: Memory Mapping
        self.tests[3].run(test_memory_mapping);
        self.tests[3].print_result();

        // Test 5: Paging Setup
        self.tests[4].run(test_paging_setup);
        self.tests[4].print_result();

        // Test 6: UEFI Detection
        self.tests[5].run(test_uefi_detection);
        self.tests[5].print_result();

        // Test 7: Multiboot2 Parse
        self.tests[6].run(test_multiboot2_parse);
        self.tests[6].print_result();

        // Test 8: Boot Security
        self.tests[7].run(test_boot_security);
        self.tests[7].print_result();

        // Test 9: Stack Setup
        self.tests[8].run(test_stack_setup);
        self.tests[8].print_result();

        // Test 10: Jump Preparation
        self.tests[9].run(test_jump_preparation);
        self.tests[9].print_result();

        // Print summary
        let passed = self.tests.iter().filter(|t| t.passed).count();
        let total = self.count;
        log::info!("Boot tests completed: {} out of {} passed", passed, total);

        crate::drivers::console::write_str("\n=== Test Summary ===\n");
        crate::drivers::console::write_str("Passed: ");
        // Would use write_dec here if available
        crate::drivers::console::write_str("/");
        crate::drivers::console::write_str("\n");
    }

    /// Get the number of tests in the suite
    pub fn test_count(&self) -> usize {
        self.count
    }

    /// Get the number of passed tests
    pub fn passed_count(&self) -> usize {
        self.tests.iter().filter(|t| t.passed).take(self.count).count()
    }
}

// Individual test implementations

fn test_console_io() -> Result<(), &'static str> {
    crate::drivers::console::write_str("  Testing console...");
    Ok(())
}

fn test_elf_validation() -> Result<(), &'static str> {
    // Create minimal ELF header for testing
    // This would test ELF64 validation logic
    Ok(())
}

fn test_kernel_loading() -> Result<(), &'static str> {
    // Test kernel loader with mock kernel data
    Ok(())
}

fn test_memory_mapping() -> Result<(), &'static str> {
    // Test memory mapping functions
    crate::memory_mgmt::memory_mapping::validate_memory_range(0x100000, 0x10000)?;
    Ok(())
}

fn test_paging_setup() -> Result<(), &'static str> {
    // Test paging structures
    Ok(())
}

fn test_uefi_detection() -> Result<(), &'static str> {
    // Test UEFI system table validation
    // Would test with mock UEFI table
    Ok(())
}

fn test_multiboot2_parse() -> Result<(), &'static str> {
    // Test Multiboot2 tag parsing
    Ok(())
}

fn test_boot_security() -> Result<(), &'static str> {
    // Test security validation
    Ok(())
}

fn test_stack_setup() -> Result<(), &'static str> {
    // Test stack initialization
    Ok(())
}

fn test_jump_preparation() -> Result<(), &'static str> {
    // Test kernel jump setup
    Ok(())
}

/// Run integration tests for boot sequence
pub fn run_boot_integration_tests() {
    let mut suite = BootFlowTestSuite::new();
    suite.run_tests();
}

// Mock boot integration tests for testing purposes only
#[cfg(test)]
mod tests {
    // Use the correct import paths based on the file structure
    use crate::kernel_if::kernel_loader::KernelLoadInfo;

    #[test]
    fn test_kernel_load_info() {
        // Mock kernel load info test
        let _info = KernelLoadInfo {
            entry_point: 0x100000,
            image_size: 0x1000,
            base_address: 0x80000000
        };
        assert!(true); // Just to avoid unused variable warning
    }

    #[test]
    fn test_boot_flow_test_creation() {
        // Test BootFlowTest creation
        let test = super::BootFlowTest::new("test");
        assert_eq!(test.name, "test");
        assert!(!test.passed);
        assert_eq!(test.message, "");
    }
}