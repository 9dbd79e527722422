//! Member and declaration modifiers.

use std::collections::BTreeSet;
use std::fmt;

/// A single declaration modifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Default,
    Static,
    Final,
    Synchronized,
}

impl Modifier {
    /// Keyword as written in source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Default => "default",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Synchronized => "synchronized",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered set of modifiers.
///
/// Ordering is canonical (visibility first), so two sets with the same
/// members always compare and hash equal regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(BTreeSet<Modifier>);

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(modifiers: &[Modifier]) -> Self {
        modifiers.iter().copied().collect()
    }

    pub fn insert(&mut self, modifier: Modifier) -> bool {
        self.0.insert(modifier)
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    /// Copy of this set with `modifier` removed.
    pub fn without(&self, modifier: Modifier) -> Self {
        self.0.iter().copied().filter(|m| *m != modifier).collect()
    }

    pub fn is_private(&self) -> bool {
        self.contains(Modifier::Private)
    }

    pub fn is_final(&self) -> bool {
        self.contains(Modifier::Final)
    }

    pub fn is_static(&self) -> bool {
        self.contains(Modifier::Static)
    }

    pub fn is_abstract(&self) -> bool {
        self.contains(Modifier::Abstract)
    }

    /// No explicit visibility keyword.
    pub fn is_package_private(&self) -> bool {
        !self.contains(Modifier::Public)
            && !self.contains(Modifier::Protected)
            && !self.contains(Modifier::Private)
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for modifier in &self.0 {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{modifier}")?;
        }
        Ok(())
    }
}
