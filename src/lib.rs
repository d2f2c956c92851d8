pub mod codec;
pub mod font;
pub mod optimizer;

/// The type representing the pixels of a glyph, scanned in row-major order.
/// Dictionary replacement patterns are sequences of the same type.
///
/// # Note
/// Slicing a BitString yields a borrowed `BitSlice`; every owned copy taken
/// from a slice (with `.to_bitvec()`) is independent of the source.
pub type BitString = bitvec::vec::BitVec;
