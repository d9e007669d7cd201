//! Annunciator flags shown beneath the character cells

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// One indicator on the HP-41 annunciator row, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum Annunciator {
    Bat,
    User,
    G,
    Rad,
    Shift,
    Flag0,
    Flag1,
    Flag2,
    Flag3,
    Flag4,
    Prgm,
    Alpha,
}

impl Annunciator {
    /// All annunciators, left to right
    pub const ALL: [Annunciator; 12] = [
        Annunciator::Bat,
        Annunciator::User,
        Annunciator::G,
        Annunciator::Rad,
        Annunciator::Shift,
        Annunciator::Flag0,
        Annunciator::Flag1,
        Annunciator::Flag2,
        Annunciator::Flag3,
        Annunciator::Flag4,
        Annunciator::Prgm,
        Annunciator::Alpha,
    ];

    /// Text printed on the LCD for this annunciator
    pub fn label(self) -> &'static str {
        match self {
            Annunciator::Bat => "BAT",
            Annunciator::User => "USER",
            Annunciator::G => "G",
            Annunciator::Rad => "RAD",
            Annunciator::Shift => "SHIFT",
            Annunciator::Flag0 => "0",
            Annunciator::Flag1 => "1",
            Annunciator::Flag2 => "2",
            Annunciator::Flag3 => "3",
            Annunciator::Flag4 => "4",
            Annunciator::Prgm => "PRGM",
            Annunciator::Alpha => "ALPHA",
        }
    }

    /// Horizontal slot on the annunciator row, in character cells
    ///
    /// The flag digits are packed closely; the others are spread out
    /// over the twelve cells like on the real display.
    pub fn slot(self) -> f64 {
        match self {
            Annunciator::Bat => 0.0,
            Annunciator::User => 1.0,
            Annunciator::G => 2.5,
            Annunciator::Rad => 3.0,
            Annunciator::Shift => 4.5,
            Annunciator::Flag0 => 6.0,
            Annunciator::Flag1 => 6.5,
            Annunciator::Flag2 => 7.0,
            Annunciator::Flag3 => 7.5,
            Annunciator::Flag4 => 8.0,
            Annunciator::Prgm => 9.0,
            Annunciator::Alpha => 10.5,
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Annunciator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an annunciator name that does not exist
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown annunciator '{0}'")]
pub struct UnknownAnnunciator(pub String);

impl FromStr for Annunciator {
    type Err = UnknownAnnunciator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Annunciator::ALL
            .iter()
            .copied()
            .find(|a| a.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownAnnunciator(s.to_string()))
    }
}

impl TryFrom<String> for Annunciator {
    type Error = UnknownAnnunciator;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The set of active annunciators for one display state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Annunciators {
    bits: u16,
}

impl Annunciators {
    /// No annunciators active
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate an annunciator
    pub fn set(&mut self, annunciator: Annunciator) {
        self.bits |= annunciator.bit();
    }

    /// Deactivate an annunciator
    pub fn clear(&mut self, annunciator: Annunciator) {
        self.bits &= !annunciator.bit();
    }

    /// Builder form of [`Annunciators::set`]
    pub fn with(mut self, annunciator: Annunciator) -> Self {
        self.set(annunciator);
        self
    }

    pub fn is_set(&self, annunciator: Annunciator) -> bool {
        self.bits & annunciator.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Active annunciators in display order
    pub fn active(&self) -> impl Iterator<Item = Annunciator> + '_ {
        Annunciator::ALL.into_iter().filter(|a| self.is_set(*a))
    }
}

impl FromIterator<Annunciator> for Annunciators {
    fn from_iter<I: IntoIterator<Item = Annunciator>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Annunciators::new(), |acc, a| acc.with(a))
    }
}
