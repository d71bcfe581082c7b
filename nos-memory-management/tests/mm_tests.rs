//! Memory management integration tests

use nos_memory_management::initialize_memory_management;

#[test]
fn test_memory_management_initialization() {
    assert!(initialize_memory_management().is_ok());
}

#[test]
fn test_layout_helpers_round_trip() {
    use nos_memory_management::{page_round_down, page_round_up, PAGE_SIZE};

    let addr = PAGE_SIZE + 17;
    assert_eq!(page_round_down(addr), PAGE_SIZE);
    assert_eq!(page_round_up(addr), 2 * PAGE_SIZE);
}

#[test]
fn test_phys_addr_page_arithmetic() {
    use nos_memory_management::{PhysAddr, PAGE_SIZE};

    let addr = PhysAddr::new(PAGE_SIZE * 3 + 5);
    assert_eq!(addr.page_number(), 3);
    assert_eq!(addr.page_offset(), 5);
    assert!(!addr.is_page_aligned());
    assert!(addr.page_round_down().is_page_aligned());
}
