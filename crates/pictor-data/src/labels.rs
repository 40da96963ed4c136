// Label vocabularies — directory name → class index
//
// A class folder dataset names its classes by directory. The mapping is
// either a fixed enumeration known at compile time (`FixedLabels<C>`) or a
// table chosen per instance (`ClassTable`). Both implement `LabelTable`.

use std::marker::PhantomData;

/// Maps a class directory name to a class index.
pub trait LabelTable: Send + Sync {
    /// Index for `name`, or `None` when the name is outside the vocabulary.
    fn index_of(&self, name: &str) -> Option<usize>;

    /// Class names ordered by index.
    fn names(&self) -> Vec<String>;

    fn num_classes(&self) -> usize {
        self.names().len()
    }
}

/// A closed set of classes whose identity is an enum variant.
pub trait ClassLabel: Copy + Send + Sync + 'static {
    /// Every variant, ordered by class index.
    const ALL: &'static [Self];

    /// The directory name this class is stored under.
    fn dir_name(self) -> &'static str;

    /// Class index; must equal the variant's position in `ALL`.
    fn index(self) -> usize;

    fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.dir_name() == name)
    }
}

/// Banknote denomination for the two-class RMB currency set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Denomination {
    /// 1 yuan, stored under `1/`.
    One,
    /// 100 yuan, stored under `100/`.
    Hundred,
}

impl ClassLabel for Denomination {
    const ALL: &'static [Self] = &[Denomination::One, Denomination::Hundred];

    fn dir_name(self) -> &'static str {
        match self {
            Denomination::One => "1",
            Denomination::Hundred => "100",
        }
    }

    fn index(self) -> usize {
        match self {
            Denomination::One => 0,
            Denomination::Hundred => 1,
        }
    }
}

/// [`LabelTable`] backed by a [`ClassLabel`] enum.
pub struct FixedLabels<C>(PhantomData<C>);

impl<C> FixedLabels<C> {
    pub fn new() -> Self {
        FixedLabels(PhantomData)
    }
}

impl<C> Default for FixedLabels<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ClassLabel> LabelTable for FixedLabels<C> {
    fn index_of(&self, name: &str) -> Option<usize> {
        C::from_dir_name(name).map(ClassLabel::index)
    }

    fn names(&self) -> Vec<String> {
        C::ALL.iter().map(|c| c.dir_name().to_string()).collect()
    }
}

/// Per-instance vocabulary: the class index of a name is its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTable {
    names: Vec<String>,
}

impl ClassTable {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The hymenoptera vocabulary: `ants` → 0, `bees` → 1.
    pub fn ants_bees() -> Self {
        Self::new(["ants", "bees"])
    }
}

impl LabelTable for ClassTable {
    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    fn names(&self) -> Vec<String> {
        self.names.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denomination_table() {
        let t = FixedLabels::<Denomination>::new();
        assert_eq!(t.index_of("1"), Some(0));
        assert_eq!(t.index_of("100"), Some(1));
        assert_eq!(t.index_of("10"), None);
        assert_eq!(t.names(), vec!["1", "100"]);
        assert_eq!(t.num_classes(), 2);
    }

    #[test]
    fn denomination_round_trips_dir_name() {
        for &d in Denomination::ALL {
            assert_eq!(Denomination::from_dir_name(d.dir_name()), Some(d));
        }
    }

    #[test]
    fn class_table_is_positional() {
        let t = ClassTable::ants_bees();
        assert_eq!(t.index_of("ants"), Some(0));
        assert_eq!(t.index_of("bees"), Some(1));
        assert_eq!(t.index_of("Ants"), None);

        let t = ClassTable::new(vec![String::from("cat"), String::from("dog"), String::from("fox")]);
        assert_eq!(t.index_of("fox"), Some(2));
    }
}
