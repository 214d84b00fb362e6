//! Closed set of input shapes accepted by the dataframe operations.
//!
//! Every operation resolves its argument once, at the boundary, into one of the
//! variants below. No operation inspects runtime types further down.

use strum_macros::{Display, EnumIter};

use crate::dataframe::cell::Cell;
use crate::dataframe::frame_core::Dataframe;

/// value of one mapping entry: a single cell or a whole column
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<V> {
    Scalar(V),
    Sequence(Vec<V>),
}

impl<V: Clone> Entry<V> {
    /// a scalar counts as one row
    pub fn len(&self) -> usize {
        match self {
            Entry::Scalar(_) => 1,
            Entry::Sequence(cells) => cells.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_cells(self) -> Vec<V> {
        match self {
            Entry::Scalar(v) => vec![v],
            Entry::Sequence(cells) => cells,
        }
    }

    /// the cell a single-row append takes from this entry
    pub fn first_or(&self, filler: &V) -> V {
        match self {
            Entry::Scalar(v) => v.clone(),
            Entry::Sequence(cells) => cells.first().unwrap_or(filler).clone(),
        }
    }
}

impl<V, T: Into<V>> From<Vec<T>> for Entry<V> {
    fn from(cells: Vec<T>) -> Self {
        Entry::Sequence(cells.into_iter().map(Into::into).collect())
    }
}

impl<V, T: Into<V>, const N: usize> From<[T; N]> for Entry<V> {
    fn from(cells: [T; N]) -> Self {
        Entry::Sequence(cells.into_iter().map(Into::into).collect())
    }
}

/// Insertion-ordered mapping column name -> [`Entry`].
///
/// Inserting a key that is already present replaces its entry and keeps the original
/// position, like a dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap<K, V> {
    entries: Vec<(K, Entry<V>)>,
}

impl<K, V> Default for ColumnMap<K, V> {
    fn default() -> Self {
        ColumnMap {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq, V: Clone> ColumnMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<K>, value: impl Into<Entry<V>>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &K) -> Option<&Entry<V>> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Entry<V>)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// dictionary update: entries of `other` win
    pub fn merge(&mut self, other: ColumnMap<K, V>) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// number of rows this mapping spans when used as a batch
    pub fn batch_width(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).max().unwrap_or(0)
    }

    /// drops every entry whose key fails the predicate, returns the dropped keys
    pub fn retain_keys<F: FnMut(&K) -> bool>(&mut self, mut keep: F) -> Vec<K> {
        let mut dropped = Vec::new();
        let mut kept = Vec::with_capacity(self.entries.len());
        for (key, value) in self.entries.drain(..) {
            if keep(&key) {
                kept.push((key, value));
            } else {
                dropped.push(key);
            }
        }
        self.entries = kept;
        dropped
    }
}

impl<K, V> IntoIterator for ColumnMap<K, V> {
    type Item = (K, Entry<V>);
    type IntoIter = std::vec::IntoIter<(K, Entry<V>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: PartialEq, V: Clone, E: Into<Entry<V>>> FromIterator<(K, E)> for ColumnMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        let mut map = ColumnMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Shape of an operation argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Seed<K, V> {
    /// a single value, broadcast where a row or column is expected
    Scalar(V),
    /// a bare row batch
    Sequence(Vec<V>),
    Mapping(ColumnMap<K, V>),
    Frame(Dataframe<K, V>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SeedKind {
    #[strum(serialize = "scalar")]
    Scalar,
    #[strum(serialize = "sequence")]
    Sequence,
    #[strum(serialize = "mapping")]
    Mapping,
    #[strum(serialize = "dataframe")]
    Frame,
}

impl<K, V> Seed<K, V> {
    pub fn kind(&self) -> SeedKind {
        match self {
            Seed::Scalar(_) => SeedKind::Scalar,
            Seed::Sequence(_) => SeedKind::Sequence,
            Seed::Mapping(_) => SeedKind::Mapping,
            Seed::Frame(_) => SeedKind::Frame,
        }
    }

    pub fn scalar(value: impl Into<V>) -> Self {
        Seed::Scalar(value.into())
    }

    pub fn sequence<T: Into<V>>(values: impl IntoIterator<Item = T>) -> Self {
        Seed::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<K, V> From<ColumnMap<K, V>> for Seed<K, V> {
    fn from(map: ColumnMap<K, V>) -> Self {
        Seed::Mapping(map)
    }
}

impl<K, V> From<Dataframe<K, V>> for Seed<K, V> {
    fn from(frame: Dataframe<K, V>) -> Self {
        Seed::Frame(frame)
    }
}

impl<K: Clone, V: Clone> From<&Dataframe<K, V>> for Seed<K, V> {
    fn from(frame: &Dataframe<K, V>) -> Self {
        Seed::Frame(frame.clone())
    }
}

impl<K, V, T: Into<V>> From<Vec<T>> for Seed<K, V> {
    fn from(values: Vec<T>) -> Self {
        Seed::Sequence(values.into_iter().map(Into::into).collect())
    }
}

// scalar conversions for the default cell type
macro_rules! cell_scalar_conversions {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Entry<Cell> {
                fn from(value: $t) -> Self {
                    Entry::Scalar(Cell::from(value))
                }
            }

            impl<K> From<$t> for Seed<K, Cell> {
                fn from(value: $t) -> Self {
                    Seed::Scalar(Cell::from(value))
                }
            }
        )*
    };
}

cell_scalar_conversions!(Cell, bool, i32, i64, usize, f64, &str, String);

/// Whether a merge may create columns the receiving table does not have yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum MergeMode {
    /// only columns already present are touched, unknown incoming columns are discarded
    #[default]
    Strict,
    /// unknown incoming columns are created and back-filled with the filler
    Relaxed,
}

impl MergeMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            MergeMode::Strict
        } else {
            MergeMode::Relaxed
        }
    }

    pub fn is_strict(self) -> bool {
        self == MergeMode::Strict
    }
}

/// Builds a `ColumnMap<String, Cell>`.
///
/// ```
/// use RustedDataframe::columns;
/// let map = columns! { "a" => vec![1, 2], "b" => 3 };
/// assert_eq!(map.batch_width(), 2);
/// ```
#[macro_export]
macro_rules! columns {
    () => {
        $crate::dataframe::ColumnMap::<String, $crate::dataframe::Cell>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::dataframe::ColumnMap::<String, $crate::dataframe::Cell>::new();
        $( map.insert($key, $value); )+
        map
    }};
}
