/// Size in bytes of an atom header with 32-bit size:
/// `size (u32) | fourcc ([u8; 4])`.
pub const HEADER_SIZE: u64 = 8;

/// Size in bytes of an atom header with 64-bit size:
/// `1 (u32) | fourcc ([u8; 4]) | size (u64)`.
pub const LARGE_HEADER_SIZE: u64 = 16;

/// Version (1 byte) and flags (3 bytes) of a "full" atom.
pub const VERSION_FLAGS_SIZE: u64 = 4;

/// Mask for the 24 flag bits in the version/flags word.
pub const FLAGS_MASK: u32 = 0x00ff_ffff;

/// Size in bytes of a single composition offset table entry,
/// `sample_count (u32) | sample_offset (i32)`.
pub const CTTS_ENTRY_SIZE: u64 = 8;

/// Fixed part of the `ctts` body: version/flags and entry count.
pub const CTTS_FIXED_SIZE: u64 = VERSION_FLAGS_SIZE + 4;
