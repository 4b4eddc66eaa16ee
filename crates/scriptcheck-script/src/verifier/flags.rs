//! Verification flags (bitmask).

use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Flags controlling how strictly encodings are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptFlags(pub u32);

impl ScriptFlags {
    pub const NONE: ScriptFlags = ScriptFlags(0);
    /// The extra element `OP_CHECKMULTISIG` pops must be an empty push.
    pub const STRICT_MULTI_SIG: ScriptFlags = ScriptFlags(1 << 0);
    /// Reject signatures with `s` above half the curve order.
    pub const VERIFY_LOW_S: ScriptFlags = ScriptFlags(1 << 1);
    /// Every push in raw script bytes must use its shortest encoding.
    pub const VERIFY_MINIMAL_DATA: ScriptFlags = ScriptFlags(1 << 2);
    pub const STANDARD: ScriptFlags = ScriptFlags(
        Self::STRICT_MULTI_SIG.0 | Self::VERIFY_LOW_S.0 | Self::VERIFY_MINIMAL_DATA.0,
    );

    pub fn has_flag(self, flag: ScriptFlags) -> bool {
        self.0 & flag.0 == flag.0
    }

    pub fn add_flag(&mut self, flag: ScriptFlags) {
        self.0 |= flag.0;
    }

    pub fn remove_flag(&mut self, flag: ScriptFlags) {
        self.0 &= !flag.0;
    }
}

impl Default for ScriptFlags {
    fn default() -> Self {
        ScriptFlags::STANDARD
    }
}

impl BitOr for ScriptFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        ScriptFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ScriptFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ScriptFlags {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        ScriptFlags(self.0 & rhs.0)
    }
}
