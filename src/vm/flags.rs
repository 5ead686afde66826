/// Condition flags derived from the most recent arithmetic result.
///
/// Every update overwrites all three; the flags carry no history.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub zero: bool,
    pub sign: bool,
    pub overflow: bool,
}

impl Flags {
    /// Recomputes all three flags from a result evaluated at i32 width.
    pub fn update(&mut self, value: i32) {
        self.zero = value == 0;
        self.sign = value < 0;
        // The overflow window matches the C runtime's update_flags and is
        // kept bit-for-bit, even though it differs from the i8 range.
        self.overflow = value < -127 || value > 128;
    }
}
