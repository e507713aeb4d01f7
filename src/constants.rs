//! Platform values of the interface-flag ioctl requests.
//!
//! Only the targets below define the constants; on anything else they are
//! left out and the exported table holds the sentinel alone.

#[cfg(any(target_os = "linux", target_os = "android"))]
mod imp {
    pub const SIOCGIFFLAGS: u64 = libc::SIOCGIFFLAGS as u64;
    pub const SIOCSIFFLAGS: u64 = libc::SIOCSIFFLAGS as u64;
}

// https://github.com/apple/darwin-xnu/blob/main/bsd/sys/sockio.h
// https://github.com/freebsd/freebsd-src/blob/main/sys/sys/sockio.h
#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
mod imp {
    use crate::ioc;

    /// `sizeof(struct ifreq)`: the interface name followed by a union whose
    /// largest member is a `struct sockaddr`.
    pub const IFREQ_SIZE: u64 =
        (libc::IFNAMSIZ + std::mem::size_of::<libc::sockaddr>()) as u64;

    pub const SIOCSIFFLAGS: u64 = ioc::iow(ioc::I, 16, IFREQ_SIZE);
    pub const SIOCGIFFLAGS: u64 = ioc::iorw(ioc::I, 17, IFREQ_SIZE);
}

#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
))]
pub use imp::*;
