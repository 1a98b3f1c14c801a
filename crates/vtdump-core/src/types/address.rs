//! Address type for symbol values and section offsets.

use std::fmt;
use std::ops::Add;

/// Strongly typed address
///
/// This wrapper around `u64` keeps symbol values, section-relative offsets
/// and hex-dump line addresses apart from sizes and counts.
///
/// In a linked executable a symbol's value is its virtual address. In a
/// relocatable object it is an offset from the start of the owning section,
/// which is also what `readelf -x` prints at the start of every dump line for
/// such a file, so both kinds of artifact compare addresses the same way.
///
/// ## Example
///
/// ```rust
/// use vtdump_core::types::Address;
///
/// let addr = Address::from(0x1000);
/// let next_slot = addr + 8;
/// assert_eq!(next_slot.value(), 0x1008);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(u64);

impl Address
{
    /// The null address (0x0)
    pub const ZERO: Self = Address(0);

    /// Create a new address from a `u64` value
    ///
    /// This is equivalent to `Address::from(value)` but can be used in const contexts.
    pub const fn new(value: u64) -> Self
    {
        Address(value)
    }

    /// Get the raw `u64` value of this address
    pub const fn value(self) -> u64
    {
        self.0
    }

    /// Add an offset to this address, checking for overflow
    ///
    /// ## Example
    ///
    /// ```rust
    /// use vtdump_core::types::Address;
    ///
    /// let addr = Address::from(0x1000);
    /// assert_eq!(addr.checked_add(0x100), Some(Address::from(0x1100)));
    /// assert_eq!(addr.checked_add(u64::MAX), None);
    /// ```
    pub fn checked_add(self, offset: u64) -> Option<Self>
    {
        self.0.checked_add(offset).map(Address)
    }

    /// Add an offset to this address, saturating at the maximum value
    pub fn saturating_add(self, offset: u64) -> Self
    {
        Address(self.0.saturating_add(offset))
    }

    /// Interpret a decoded slot value as an address.
    ///
    /// Negative values (offset-to-top entries and the like) are never
    /// addresses.
    pub fn from_slot(value: i64) -> Option<Self>
    {
        u64::try_from(value).ok().map(Address)
    }
}

impl From<u64> for Address
{
    fn from(value: u64) -> Self
    {
        Address(value)
    }
}

impl From<Address> for u64
{
    fn from(address: Address) -> Self
    {
        address.0
    }
}

impl fmt::Display for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::LowerHex for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl Add<u64> for Address
{
    type Output = Address;

    fn add(self, rhs: u64) -> Self::Output
    {
        Address(self.0.wrapping_add(rhs))
    }
}
