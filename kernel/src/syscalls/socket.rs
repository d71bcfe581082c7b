//! Socket system calls
//! 
//! Implementation of POSIX socket system calls

use crate::syscalls::{E_NOSYS, E_OK};

/// Create a new socket
pub fn sys_socket(domain: i32, type_: i32, protocol: i32) -> isize {
    // Only support IPv4 for now
    if domain != crate::posix::AF_INET {
        return E_INVAL;
    }
    
    // Allocate a file table entry
    let file_idx = match crate::file::file_alloc() {
        Some(idx) => idx,
        None => return E_NOMEM,
    };
    
    // Get the file structure
    let mut ft = crate::file::FILE_TABLE.lock();
    let file = ft.get_mut(file_idx).unwrap();
    
    // Initialize socket file
    file.ftype = crate::file::FileType::Socket;
    file.ref_count = 1;
    file.readable = (type_ == crate::posix::SOCK_STREAM) ||
                   (type_ == crate::posix::SOCK_DGRAM) ||
                   (type_ == crate::posix::SOCK_RAW);
    file.writable = (type_ == crate::posix::SOCK_STREAM) ||
                   (type_ == crate::posix::SOCK_DGRAM) ||
                   (type_ == crate::posix::SOCK_RAW);
    
    // For now, we don't need to store any socket-specific data
    // We'll implement this in a later stage
    
    // Allocate a file descriptor for current process
    drop(ft);
    let fd = match crate::process::fdalloc(file_idx) {
        Some(n) => n,
        None => {
            // Clean up if fd allocation fails
            crate::file::file_close(file_idx);
            return E_MFILE;
        }
    };
    
    fd as isize
}

/// Bind a socket to an address
pub fn sys_bind(fd: i32, addr: *const crate::posix::Sockaddr, addrlen: usize) -> isize {
    // Validate file descriptor
    let file_idx = match crate::process::fdlookup(fd) {
        Some(idx) => idx,
        None => return E_BADF,
    };
    
    // Check if it's a socket
    let ft = crate::file::FILE_TABLE.lock();
    let file = ft.get(file_idx).unwrap();
    if file.ftype != crate::file::FileType::Socket {
        return E_INVAL;
    }
    
    // For now, just return success (we don't actually implement binding yet)
    E_OK
}

/// Listen for connections on a socket
pub fn sys_listen(fd: i32, backlog: i32) -> isize {
    // Validate file descriptor
    let file_idx = match crate::process::fdlookup(fd) {
        Some(idx) => idx,
        None => return E_BADF,
    };
    
    // Check if it's a socket
    let ft = crate::file::FILE_TABLE.lock();
    let file = ft.get(file_idx).unwrap();
    if file.ftype != crate::file::FileType::Socket {
        return E_INVAL;
    }
    
    // Check socket type - should be SOCK_STREAM
    E_OK
}

/// Accept a connection on a socket
pub fn sys_accept(fd: i32, addr: *mut crate::posix::Sockaddr, addrlen: *mut usize) -> isize {
    // Validate file descriptor
    let file_idx = match crate::process::fdlookup(fd) {
        Some(idx) => idx,
        None => return E_BADF,
    };
    
    // Check if it's a socket
    let ft = crate::file::FILE_TABLE.lock();
    let file = ft.get(file_idx).unwrap();
    if file.ftype != crate::file::FileType::Socket {
        return E_INVAL;
    }
    
    // For now, return would block
    E_INVAL
}

/// Connect a socket to an address
pub fn sys_connect(fd: i32, addr: *const crate::posix::Sockaddr, addrlen: usize) -> isize {
    // Validate file descriptor
    let file_idx = match crate::process::fdlookup(fd) {
        Some(idx) => idx,
        None => return E_BADF,
    };
    
    // Check if it's a socket
    let ft = crate::file::FILE_TABLE.lock();
    let file = ft.get(file_idx).unwrap();
    if file.ftype != crate::file::FileType::Socket {
        return E_INVAL;
    }
    
    // For now, return in progress (non-blocking)
    E_INVAL
}

/// Send data on a socket
pub fn sys_send(fd: i32, buf: *const u8, len: usize, flags: i32) -> isize {
    // Validate file descriptor
    let file_idx = match crate::process::fdlookup(fd) {
        Some(idx) => idx,
        None => return E_BADF,
    };
    
    // Check if it's a socket
    let ft = crate::file::FILE_TABLE.lock();
    let file = ft.get(file_idx).unwrap();
    if file.ftype != crate::file::FileType::Socket {
        return E_INVAL;
    }
    
    E_OK
}

/// Receive data from a socket
pub fn sys_recv(fd: i32, buf: *mut u8, len: usize, flags: i32) -> isize {
    // Validate file descriptor
    let file_idx = match crate::process::fdlookup(fd) {
        Some(idx) => idx,
        None => return E_BADF,
    };
    
    // Check if it's a socket
    let ft = crate::file::FILE_TABLE.lock();
    let file = ft.get(file_idx).unwrap();
    if file.ftype != crate::file::FileType::Socket {
        return E_INVAL;
    }
    
    0  // No data available
}

/// Send data to a specific address
pub fn sys_sendto(fd: i32, buf: *const u8, len: usize, flags: i32,
                  dest_addr: *const crate::posix::Sockaddr, addrlen: usize) -> isize {
    sys_send(fd, buf, len, flags)
}

/// Receive data from a specific address
pub fn sys_recvfrom(fd: i32, buf: *mut u8, len: usize, flags: i32,
                    src_addr: *mut crate::posix::Sockaddr, addrlen: *mut usize) -> isize {
    sys_recv(fd, buf, len, flags)
}

/// Shutdown a socket
pub fn sys_shutdown(fd: i32, how: i32) -> isize {
    // Validate file descriptor
    let file_idx = match crate::process::fdlookup(fd) {
        Some(idx) => idx,
        None => return E_BADF,
    };
    
    // Check if it's a socket
    let ft = crate::file::FILE_TABLE.lock();
    let file = ft.get(file_idx).unwrap();
    if file.ftype != crate::file::FileType::Socket {
        return E_INVAL;
    }
    
    // Validate how parameter
    if how != crate::posix::SHUT_RD && how != crate::posix::SHUT_WR && how != crate::posix::SHUT_RDWR {
        return E_INVAL;
    }
    
    E_OK
}

/// Set socket options
pub fn sys_setsockopt(fd: i32, level: i32, optname: i32,
                      optval: *const u8, optlen: usize) -> isize {
    // Validate file descriptor
    let file_idx = match crate::process::fdlookup(fd) {
        Some(idx) => idx,
        None => return E_BADF,
    };
    
    // Check if it's a socket
    let ft = crate::file::FILE_TABLE.lock();
    let file = ft.get(file_idx).unwrap();
    if file.ftype != crate::file::FileType::Socket {
        return E_INVAL;
    }
    
    E_OK
}

/// Get socket options
pub fn sys_getsockopt(fd: i32, level: i32, optname: i32,
                      optval: *mut u8, optlen: *mut usize) -> isize {
    // Validate file descriptor
    let file_idx = match crate::process::fdlookup(fd) {
        Some(idx) => idx,
        None => return E_BADF,
    };
    
    // Check if it's a socket
    let ft = crate::file::FILE_TABLE.lock();
    let file = ft.get(file_idx).unwrap();
    if file.ftype != crate::file::FileType::Socket {
        return E_INVAL;
    }
    
    E_OK
}