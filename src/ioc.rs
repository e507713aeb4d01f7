//! BSD ioctl request encoding, as defined by `<sys/ioccom.h>`.
//!
//! A request code packs the transfer direction, the parameter length, a group
//! character and a command number:
//!
//! ```text
//!  31 29 28                16 15          8 7           0
//! +-----+--------------------+-------------+-------------+
//! | dir |       length       |    group    |   number    |
//! +-----+--------------------+-------------+-------------+
//! ```
//!
//! The encoding is plain arithmetic with no dependency on the host headers, so
//! the module is built on every target: BSD request codes can be computed and
//! checked from a Linux host as well.

/// Parameter length is limited to 13 bits.
pub const IOCPARM_MASK: u64 = 0x1fff;

/// No parameters.
pub const IOC_VOID: u64 = 0x2000_0000;
/// Copy parameters out.
pub const IOC_OUT: u64 = 0x4000_0000;
/// Copy parameters in.
pub const IOC_IN: u64 = 0x8000_0000;
/// Copy parameters in and out.
pub const IOC_INOUT: u64 = IOC_IN | IOC_OUT;

/// Group of the network interface requests (`'i'`).
pub const I: u8 = b'i';

/// `_IOC(inout, group, num, len)`: the parameter length is masked to
/// [`IOCPARM_MASK`].
pub const fn ioc(inout: u64, group: u8, num: u8, len: u64) -> u64 {
    inout | ((len & IOCPARM_MASK) << 16) | ((group as u64) << 8) | num as u64
}

/// `_IO(g, n)`
pub const fn io(group: u8, num: u8) -> u64 {
    ioc(IOC_VOID, group, num, 0)
}

/// `_IOR(g, n, t)`
pub const fn ior(group: u8, num: u8, len: u64) -> u64 {
    ioc(IOC_OUT, group, num, len)
}

/// `_IOW(g, n, t)`
pub const fn iow(group: u8, num: u8, len: u64) -> u64 {
    ioc(IOC_IN, group, num, len)
}

/// `_IOWR(g, n, t)`
pub const fn iorw(group: u8, num: u8, len: u64) -> u64 {
    ioc(IOC_INOUT, group, num, len)
}
