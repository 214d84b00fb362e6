//! # Dataframe storage
//!
//! A `Dataframe` maps column names to cell sequences that all share one length, the
//! `width`. Naming follows the notebook layer this table feeds:
//! - `width` is the number of rows (cells per column)
//! - `length` is the number of columns
//! - `shape` is `(length, width)`
//!
//! Columns keep their insertion order, rows are purely positional.
//!
//! ## Construction
//! - [`Dataframe::new`] / [`Dataframe::with_filler`]: empty table
//! - [`Dataframe::from_records`]: list of row mappings, the first row fixes the columns
//! - [`Dataframe::from_columns`]: one mapping, scalars become one-cell columns and short
//!   columns are right-padded with the filler
//! - [`Dataframe::from_args`]: positional/keyword form with argument-count checking
//!
//! The filler is fixed at construction and used for every later padding.
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Index;

use log::debug;

use crate::dataframe::cell::Cell;
use crate::dataframe::errors::DataframeError;
use crate::dataframe::seed::{ColumnMap, Entry, Seed};

/// Columnar table of cells, every column holding exactly `width` cells.
#[derive(Debug, Clone)]
pub struct Dataframe<K = String, V = Cell> {
    // column names in insertion order
    keys: Vec<K>,
    // column name -> position in `keys`/`columns`
    index: HashMap<K, usize>,
    columns: Vec<Vec<V>>,
    width: usize,
    filler: V,
}

impl<K: Clone + Eq + Hash, V: Clone + Default> Default for Dataframe<K, V> {
    fn default() -> Self {
        Self::with_filler(V::default())
    }
}

impl<K: Clone + Eq + Hash, V: Clone + Default> Dataframe<K, V> {
    /// empty table, filler is `V::default()` (`Cell::Null` for cells)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(rows: Vec<ColumnMap<K, V>>) -> Self {
        Self::from_records_with_filler(rows, V::default())
    }

    pub fn from_columns(map: ColumnMap<K, V>) -> Self {
        Self::from_columns_with_filler(map, V::default())
    }
}

impl<K: Clone + Eq + Hash, V: Clone> Dataframe<K, V> {
    pub fn with_filler(filler: V) -> Self {
        Dataframe {
            keys: Vec::new(),
            index: HashMap::new(),
            columns: Vec::new(),
            width: 0,
            filler,
        }
    }

    /// Builds a table from row mappings. The keys of the first row define the columns
    /// and their order; keys the first row lacks are ignored in later rows, and later rows
    /// lacking a key contribute the filler. A sequence entry contributes its first cell.
    pub fn from_records_with_filler(rows: Vec<ColumnMap<K, V>>, filler: V) -> Self {
        let mut frame = Self::with_filler(filler);
        let Some(first) = rows.first() else {
            return frame;
        };
        let keys: Vec<K> = first.keys().cloned().collect();
        for key in keys {
            let cells = rows
                .iter()
                .map(|row| match row.get(&key) {
                    Some(entry) => entry.first_or(&frame.filler),
                    None => frame.filler.clone(),
                })
                .collect();
            frame.push_column(key, cells);
        }
        frame.width = rows.len();
        frame.debug_check_width();
        frame
    }

    /// Builds a table from one mapping. Scalars become single-cell columns; the width is
    /// the longest entry and shorter columns are right-padded with the filler.
    pub fn from_columns_with_filler(map: ColumnMap<K, V>, filler: V) -> Self {
        let mut frame = Self::with_filler(filler);
        let width = map.batch_width();
        for (key, entry) in map {
            let mut cells = entry.into_cells();
            cells.resize(width, frame.filler.clone());
            frame.push_column(key, cells);
        }
        frame.width = width;
        frame.debug_check_width();
        frame
    }

    /// Positional/keyword construction: at most one positional seed (a mapping or a
    /// dataframe), merged with `keywords`, the keywords winning on shared keys.
    pub fn from_args(
        positional: Vec<Seed<K, V>>,
        keywords: ColumnMap<K, V>,
        filler: V,
    ) -> Result<Self, DataframeError> {
        let map = resolve_args("Dataframe", positional, keywords)?;
        Ok(Self::from_columns_with_filler(map, filler))
    }

    ////////////////////////////////////////////////////////////////////////////////////////
    //                         READ ACCESS
    ////////////////////////////////////////////////////////////////////////////////////////

    /// number of rows
    pub fn width(&self) -> usize {
        self.width
    }

    /// number of columns
    pub fn length(&self) -> usize {
        self.keys.len()
    }

    /// `(length, width)`, i.e. (columns, rows)
    pub fn shape(&self) -> (usize, usize) {
        (self.length(), self.width)
    }

    pub fn filler(&self) -> &V {
        &self.filler
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&[V]>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&i| self.columns[i].as_slice())
    }

    /// Like [`Dataframe::get`], but an absent key is an error rather than `None`.
    pub fn column<Q>(&self, key: &Q) -> Result<&[V], DataframeError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.get(key)
            .ok_or_else(|| DataframeError::MissingColumn(format!("{:?}", key)))
    }

    /// `(name, cells)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.keys
            .iter()
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// the cells of row `i`, one per column in column order
    pub fn row(&self, i: usize) -> Option<Vec<&V>> {
        if i >= self.width {
            return None;
        }
        Some(self.columns.iter().map(|col| &col[i]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<&V>> {
        (0..self.width).map(move |i| self.columns.iter().map(|col| &col[i]).collect())
    }

    ////////////////////////////////////////////////////////////////////////////////////////
    //                         CRATE-INTERNAL STORAGE
    ////////////////////////////////////////////////////////////////////////////////////////

    /// appends a new column; the caller guarantees the key is absent
    pub(crate) fn push_column(&mut self, key: K, cells: Vec<V>) {
        self.index.insert(key.clone(), self.keys.len());
        self.keys.push(key);
        self.columns.push(cells);
    }

    /// replaces the column if present, appends it otherwise
    pub(crate) fn set_column(&mut self, key: K, cells: Vec<V>) {
        match self.index.get(&key) {
            Some(&i) => self.columns[i] = cells,
            None => self.push_column(key, cells),
        }
    }

    pub(crate) fn position(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Vec<V>> {
        &mut self.columns
    }

    pub(crate) fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    pub(crate) fn debug_check_width(&self) {
        debug_assert!(
            self.columns.iter().all(|col| col.len() == self.width),
            "every column must hold exactly {} cells",
            self.width
        );
    }
}

/// Resolves the positional/keyword argument form shared by construction and `update`.
pub(crate) fn resolve_args<K: Clone + Eq + Hash, V: Clone>(
    operation: &'static str,
    positional: Vec<Seed<K, V>>,
    keywords: ColumnMap<K, V>,
) -> Result<ColumnMap<K, V>, DataframeError> {
    if positional.len() > 1 {
        return Err(DataframeError::ArgumentCount {
            operation,
            expected: 1,
            got: positional.len(),
        });
    }
    let mut map = match positional.into_iter().next() {
        None => ColumnMap::new(),
        Some(Seed::Mapping(map)) => map,
        Some(Seed::Frame(frame)) => ColumnMap::from(frame),
        Some(other) => {
            return Err(DataframeError::TypeMismatch {
                operation,
                found: other.kind(),
                hint: "Pass a mapping or a Dataframe.",
            });
        }
    };
    if !keywords.is_empty() {
        debug!("{}: {} keyword column(s) override the positional seed", operation, keywords.len());
    }
    map.merge(keywords);
    Ok(map)
}

impl<K: Clone + Eq + Hash, V: Clone> From<Dataframe<K, V>> for ColumnMap<K, V> {
    fn from(frame: Dataframe<K, V>) -> Self {
        frame
            .keys
            .into_iter()
            .zip(frame.columns)
            .map(|(key, cells)| (key, Entry::Sequence(cells)))
            .collect()
    }
}

impl<K: Clone + Eq + Hash, V: Clone> From<&Dataframe<K, V>> for ColumnMap<K, V> {
    fn from(frame: &Dataframe<K, V>) -> Self {
        frame
            .iter()
            .map(|(key, cells)| (key.clone(), Entry::Sequence(cells.to_vec())))
            .collect()
    }
}

impl<K: Clone + Eq + Hash, V: Clone + Default> From<ColumnMap<K, V>> for Dataframe<K, V> {
    fn from(map: ColumnMap<K, V>) -> Self {
        Self::from_columns(map)
    }
}

impl<K: Clone + Eq + Hash, V: Clone + Default> From<Vec<ColumnMap<K, V>>> for Dataframe<K, V> {
    fn from(rows: Vec<ColumnMap<K, V>>) -> Self {
        Self::from_records(rows)
    }
}

/// Panics on an absent key, like the standard maps do. Use [`Dataframe::column`] for a
/// `Result`.
impl<K, V, Q> Index<&Q> for Dataframe<K, V>
where
    K: Clone + Eq + Hash + Borrow<Q>,
    V: Clone,
    Q: Hash + Eq + Debug + ?Sized,
{
    type Output = [V];

    fn index(&self, key: &Q) -> &Self::Output {
        match self.get(key) {
            Some(cells) => cells,
            None => panic!("column not found: {:?}", key),
        }
    }
}

impl<'a, K: Clone + Eq + Hash, V: Clone> IntoIterator for &'a Dataframe<K, V> {
    type Item = (&'a K, &'a [V]);
    type IntoIter = std::iter::Zip<
        std::slice::Iter<'a, K>,
        std::iter::Map<std::slice::Iter<'a, Vec<V>>, fn(&'a Vec<V>) -> &'a [V]>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        let as_slice: fn(&'a Vec<V>) -> &'a [V] = Vec::as_slice;
        self.keys.iter().zip(self.columns.iter().map(as_slice))
    }
}

/// The filler is construction detail and does not take part in equality.
impl<K: PartialEq, V: PartialEq> PartialEq for Dataframe<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.keys == other.keys && self.columns == other.columns
    }
}
