use anyhow::{Context as _, Result};
use lazy_static::lazy_static;
use std::{collections::HashMap, ffi::CStr, fmt, os::raw::c_char};

/// One record of the exported table, laid out as
/// `struct { const char *name; uint64_t value; }`.
///
/// The table ends with [`ConstantEntry::SENTINEL`], whose name is `NULL`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ConstantEntry {
    name: *const c_char,
    value: u64,
}

// Names only ever point at NUL-terminated 'static literals.
unsafe impl Send for ConstantEntry {}
unsafe impl Sync for ConstantEntry {}

impl ConstantEntry {
    pub const SENTINEL: ConstantEntry = ConstantEntry {
        name: std::ptr::null(),
        value: 0,
    };

    /// `name` must end with a NUL byte.
    const fn new(name: &'static str, value: u64) -> ConstantEntry {
        ConstantEntry {
            name: name.as_ptr() as *const c_char,
            value,
        }
    }

    /// The symbolic name, or `None` for the end-of-list sentinel.
    pub fn name(&self) -> Option<&'static CStr> {
        if self.name.is_null() {
            return None;
        }
        let name = unsafe { CStr::from_ptr(self.name) };
        if name.to_bytes().is_empty() {
            None
        } else {
            Some(name)
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn is_sentinel(&self) -> bool {
        self.name().is_none()
    }
}

impl fmt::Debug for ConstantEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f
                .debug_struct("ConstantEntry")
                .field("name", &name)
                .field("value", &format_args!("{:#x}", self.value))
                .finish(),
            None => f.write_str("ConstantEntry(sentinel)"),
        }
    }
}

/// A named constant read out of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Constant {
    pub name: &'static str,
    pub value: u64,
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:#x}", self.name, self.value)
    }
}

/// Builds the process-wide table from constant names exported by
/// `crate::constants`, in declaration order, followed by the sentinel.
macro_rules! constant_table {
    ($($name:ident),* $(,)?) => {
        static CONSTANTS: &[ConstantEntry] = &[
            $(ConstantEntry::new(concat!(stringify!($name), "\0"), crate::constants::$name),)*
            ConstantEntry::SENTINEL,
        ];
    };
}

#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
))]
constant_table!(SIOCGIFFLAGS, SIOCSIFFLAGS);

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
)))]
constant_table!();

/// Returns the first entry of the constant table. Callers scan forward until
/// they reach the entry whose name is `NULL`.
///
/// The table is static: it must not be written to or freed.
#[no_mangle]
pub extern "C" fn rust_get_constants() -> *const ConstantEntry {
    CONSTANTS.as_ptr()
}

/// Number of entries before the sentinel.
#[no_mangle]
pub extern "C" fn rust_get_constants_len() -> usize {
    CONSTANTS.len() - 1
}

/// Iterator over a sentinel-terminated table.
pub struct Constants {
    next: *const ConstantEntry,
}

impl Constants {
    /// # Safety
    ///
    /// `ptr` must point at a table that ends with a sentinel entry, whose
    /// names are valid C strings, and which is never freed or mutated.
    pub unsafe fn from_raw(ptr: *const ConstantEntry) -> Constants {
        Constants { next: ptr }
    }
}

impl Iterator for Constants {
    type Item = Constant;

    fn next(&mut self) -> Option<Constant> {
        loop {
            let entry = unsafe { &*self.next };
            let name = entry.name()?;
            self.next = unsafe { self.next.add(1) };
            match name.to_str() {
                Ok(name) => {
                    return Some(Constant {
                        name,
                        value: entry.value,
                    })
                }
                Err(err) => log::warn!("skipping constant {:?}: {}", name, err),
            }
        }
    }
}

/// All constants defined for this target, in declaration order.
pub fn entries() -> Constants {
    unsafe { Constants::from_raw(rust_get_constants()) }
}

pub fn len() -> usize {
    rust_get_constants_len()
}

lazy_static! {
    static ref INDEX: HashMap<&'static str, Constant> = {
        let index: HashMap<_, _> = entries().map(|c| (c.name, c)).collect();
        log::debug!(
            "indexed {} interface constants for {}",
            index.len(),
            std::env::consts::OS
        );
        index
    };
}

pub fn find(name: &str) -> Option<Constant> {
    let constant = INDEX.get(name).copied();
    if constant.is_none() {
        log::trace!("no constant named {}", name);
    }
    constant
}

pub fn lookup(name: &str) -> Option<u64> {
    find(name).map(|c| c.value)
}

/// Like [`lookup`], but a missing name is an error.
pub fn require(name: &str) -> Result<u64> {
    lookup(name).with_context(|| {
        format!(
            "unknown constant: {} (target_os = {})",
            name,
            std::env::consts::OS
        )
    })
}
