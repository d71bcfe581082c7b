//! Memory compression module for xv6-rust
//! 
//! Implements memory compression to reduce memory footprint using LZ4 compression.
//! This is a simplified implementation for educational purposes.

extern crate alloc;

use core::ptr::null_mut;
use core::mem::size_of;
use alloc::vec::Vec;

// ============================================================================
// Constants
// ============================================================================

/// Compression buffer size (4KB)
pub const COMPRESS_BLOCK_SIZE: usize = 4096;

/// Compression header
#[repr(C)]
struct CompressHeader {
    /// Original size in bytes
    original_size: usize,
    /// Compressed size in bytes
    compressed_size: usize,
}

// ============================================================================
// Compression API
// ============================================================================

/// Simple LZ4-style compression (simplified for kernel use)
pub fn compress(src: &[u8]) -> Vec<u8> {
    // Simplified compression for demonstration purposes
    // In a real implementation, this would be a proper LZ4 implementation
    
    let mut dst = Vec::with_capacity(src.len());
    
    // Copy the data (no real compression yet)
    dst.extend_from_slice(src);
    
    dst
}

/// Simple LZ4-style decompression (simplified for kernel use)
pub fn decompress(src: &[u8]) -> Vec<u8> {
    // Simplified decompression for demonstration purposes
    
    let mut dst = Vec::with_capacity(src.len());
    
    // Copy the data (no real decompression yet)
    dst.extend_from_slice(src);
    
    dst
}

/// Compress a memory block
pub unsafe fn compress_memory(ptr: *const u8, size: usize) -> Option<Vec<u8>> {
    if ptr.is_null() || size == 0 {
        return None;
    }
    
    // Read the source data
    let src_slice = core::slice::from_raw_parts(ptr, size);
    
    // Compress it
    let compressed_data = compress(src_slice);
    
    // Prepend header
    let mut result = Vec::with_capacity(size_of::<CompressHeader>() + compressed_data.len());
    
    let header = CompressHeader {
        original_size: size,
        compressed_size: compressed_data.len(),
    };
    
    // Write header
    let header_ptr = &header as *const CompressHeader as *const u8;
    let header_slice = core::slice::from_raw_parts(header_ptr, size_of::<CompressHeader>());
    result.extend_from_slice(header_slice);
    
    // Write compressed data
    result.extend_from_slice(&compressed_data);
    
    Some(result)
}

/// Decompress a memory block
pub unsafe fn decompress_memory(ptr: *const u8) -> Option<Vec<u8>> {
    if ptr.is_null() {
        return None;
    }
    
    // Read header
    let header_ptr = ptr as *const CompressHeader;
    let header = *header_ptr;
    
    // Read compressed data
    let compressed_data_ptr = ptr.add(size_of::<CompressHeader>());
    let compressed_data_slice = core::slice::from_raw_parts(compressed_data_ptr, header.compressed_size);
    
    // Decompress it
    decompress(compressed_data_slice)
}

/// Compress a memory page
pub unsafe fn compress_page(page_ptr: *const u8, page_size: usize) -> Option<Vec<u8>> {
    compress_memory(page_ptr, page_size)
}

/// Decompress a memory page
pub unsafe fn decompress_page(compressed_data: &[u8]) -> Option<Vec<u8>> {
    decompress(&compressed_data[size_of::<CompressHeader>()..])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_compress_decompress() {
        let data = b"Hello, world! This is a test of the memory compression system.";
        let compressed = compress(data);
        let decompressed = decompress(&compressed);
        
        assert_eq!(&decompressed[..], data);
    }
}