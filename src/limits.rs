//! Compile-time capacity constants shared by every module.
//!
//! Changing any of these is an ABI break: entity indices, signature bit
//! layout, and page geometry all derive from the values here.

/// Upper bound on live + recyclable entity identifiers.
pub const MAX_ENTITIES: u32 = 1_000_000;

/// Upper bound on distinct component types a single process may register.
/// Must fit in the `Signature` bitmask, hence `<= 64`.
pub const MAX_COMPONENTS: u32 = 64;

/// Number of sparse-array slots per lazily-allocated page. Must be a power
/// of two so page/offset splitting reduces to shift + mask.
pub const PAGE_SIZE: usize = 4096;

/// Number of pages needed to cover `MAX_ENTITIES` at `PAGE_SIZE` slots each.
pub const MAX_PAGES: usize = (MAX_ENTITIES as usize + PAGE_SIZE - 1) / PAGE_SIZE;

const _: () = assert!(PAGE_SIZE.is_power_of_two(), "PAGE_SIZE must be a power of two");
const _: () = assert!(MAX_COMPONENTS <= 64, "MAX_COMPONENTS must fit in a u64 signature");
