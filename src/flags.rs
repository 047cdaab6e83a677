use std::fmt::{self, Debug};
use std::ops::{BitOr, BitOrAssign};

/// Creation mode of a dictionary: which side, if any, uses a predefined ownership policy.
///
/// A side with neither its `INT_*` nor its `STR_*` bit set is custom and takes its
/// operations from the [`Ops`](crate::Ops) passed at creation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u8);

impl Flags {
    /// Both sides custom.
    pub const CUSTOM: Flags = Flags(0);
    /// Keys are inline integers.
    pub const INT_KEY: Flags = Flags(1);
    /// Values are inline integers.
    pub const INT_VAL: Flags = Flags(1 << 1);
    /// Keys are owned strings.
    pub const STR_KEY: Flags = Flags(1 << 2);
    /// Values are owned strings.
    pub const STR_VAL: Flags = Flags(1 << 3);

    /// Owned string keys and values.
    pub const STR_STR: Flags = Flags(Self::STR_KEY.0 | Self::STR_VAL.0);
    /// Owned string keys, inline integer values.
    pub const STR_INT: Flags = Flags(Self::STR_KEY.0 | Self::INT_VAL.0);
    /// Inline integer keys, owned string values.
    pub const INT_STR: Flags = Flags(Self::INT_KEY.0 | Self::STR_VAL.0);
    /// Inline integer keys and values.
    pub const INT_INT: Flags = Flags(Self::INT_KEY.0 | Self::INT_VAL.0);

    /// Returns the raw bits.
    pub fn bits(self) -> u8 { self.0 }

    /// Checks if every bit of `other` is set in `self`.
    pub fn contains(self, other: Flags) -> bool { self.0 & other.0 == other.0 }
}

impl BitOr for Flags {
    type Output = Flags;
    fn bitor(self, other: Flags) -> Flags { Flags(self.0 | other.0) }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, other: Flags) { self.0 |= other.0; }
}

impl Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const NAMES: [(Flags, &str); 4] = [
            (Flags::INT_KEY, "INT_KEY"),
            (Flags::INT_VAL, "INT_VAL"),
            (Flags::STR_KEY, "STR_KEY"),
            (Flags::STR_VAL, "STR_VAL"),
        ];

        let mut names = NAMES.iter().filter(|&&(flag, _)| self.contains(flag)).map(|e| e.1);

        match names.next() {
            None => write!(f, "CUSTOM"),
            Some(first) => {
                write!(f, "{}", first)?;
                for name in names { write!(f, " | {}", name)?; }
                Ok(())
            }
        }
    }
}

/// Whether exported keys or values are borrowed from the dictionary or cloned out of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Export {
    /// Write references into the dictionary's own keys or values.
    Borrow,
    /// Write fresh copies produced by the dictionary's clone operation.
    Clone,
}
