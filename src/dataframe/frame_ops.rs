//! Mutating and combining operations.
//!
//! Two categories:
//! - in place: [`Dataframe::update`], [`Dataframe::append`], [`Dataframe::extend`]
//! - returning a new table, operands untouched: [`Dataframe::updated`] (`|`) and
//!   [`Dataframe::extended`] (`+`)
//!
//! Every operation resolves and validates its argument before touching any column, so a
//! failed call leaves the table as it was.
use std::hash::Hash;
use std::ops::{Add, BitOr};

use log::debug;

use crate::dataframe::errors::DataframeError;
use crate::dataframe::frame_core::{Dataframe, resolve_args};
use crate::dataframe::seed::{ColumnMap, Entry, MergeMode, Seed, SeedKind};

impl<K: Clone + Eq + Hash, V: Clone> Dataframe<K, V> {
    ////////////////////////////////////////////////////////////////////////////////////////
    //                         UPDATE
    ////////////////////////////////////////////////////////////////////////////////////////

    /// Column-wise replace/insert.
    ///
    /// The new width is the largest of the current width and every incoming entry length
    /// (scalars count as one). Columns named in `other` are replaced by its cells padded
    /// with the filler; the remaining columns are padded or truncated to the new width.
    pub fn update(&mut self, other: impl Into<ColumnMap<K, V>>) {
        let other = other.into();
        let target_width = self
            .iter()
            .map(|(_, cells)| cells.len())
            .chain(other.iter().map(|(_, entry)| entry.len()))
            .chain(std::iter::once(self.width()))
            .max()
            .unwrap_or(0);

        let mut replaced = vec![false; self.length()];
        for (key, entry) in other {
            let mut cells = entry.into_cells();
            cells.resize(target_width, self.filler().clone());
            if let Some(i) = self.position(&key) {
                replaced[i] = true;
            }
            self.set_column(key, cells);
        }
        let filler = self.filler().clone();
        for (i, column) in self.columns_mut().iter_mut().enumerate() {
            if !replaced.get(i).copied().unwrap_or(true) {
                column.resize(target_width, filler.clone());
            }
        }
        self.set_width(target_width);
        self.debug_check_width();
        debug!("update: shape is now {:?}", self.shape());
    }

    /// `update` with the positional/keyword argument form; more than one positional
    /// seed is rejected before anything changes.
    pub fn update_args(
        &mut self,
        positional: Vec<Seed<K, V>>,
        keywords: ColumnMap<K, V>,
    ) -> Result<(), DataframeError> {
        let map = resolve_args("update", positional, keywords)?;
        self.update(map);
        Ok(())
    }

    ////////////////////////////////////////////////////////////////////////////////////////
    //                         APPEND
    ////////////////////////////////////////////////////////////////////////////////////////

    /// Adds exactly one row.
    ///
    /// - mapping or dataframe: every existing column takes the row's cell for its key
    ///   (the first cell of a dataframe column) or the filler. A mapping entry holding
    ///   more than one cell is rejected. In
    ///   [`MergeMode::Relaxed`] keys unknown to the table become new columns, back-filled
    ///   with the filler over the rows that existed before this call.
    /// - scalar: appended to every existing column, no columns are created.
    /// - a bare sequence is rejected, use [`Dataframe::extend`].
    pub fn append(&mut self, row: impl Into<Seed<K, V>>, mode: MergeMode) -> Result<(), DataframeError> {
        let row = match row.into() {
            Seed::Scalar(value) => {
                for column in self.columns_mut().iter_mut() {
                    column.push(value.clone());
                }
                self.finish_rows("append", 1);
                return Ok(());
            }
            Seed::Sequence(_) => {
                return Err(DataframeError::TypeMismatch {
                    operation: "append",
                    found: SeedKind::Sequence,
                    hint: "Use 'extend' to add several rows.",
                });
            }
            Seed::Mapping(map) => {
                if map.iter().any(|(_, entry)| entry.len() > 1) {
                    return Err(DataframeError::TypeMismatch {
                        operation: "append",
                        found: SeedKind::Sequence,
                        hint: "A row holds one cell per column. Use 'extend' to add several rows.",
                    });
                }
                map
            }
            Seed::Frame(frame) => {
                if frame.width() > 1 {
                    debug!("append: row taken from the first of {} frame rows", frame.width());
                }
                ColumnMap::from(frame)
            }
        };

        let prior_width = self.width();
        let filler = self.filler().clone();
        let cells: Vec<V> = self
            .keys()
            .iter()
            .map(|key| match row.get(key) {
                Some(entry) => entry.first_or(&filler),
                None => filler.clone(),
            })
            .collect();
        for (column, cell) in self.columns_mut().iter_mut().zip(cells) {
            column.push(cell);
        }

        let mut unknown = row;
        unknown.retain_keys(|key| !self.contains_key(key));
        if !unknown.is_empty() {
            if mode.is_strict() {
                debug!("append ({}): {} unknown column(s) ignored", mode, unknown.len());
            } else {
                for (key, entry) in unknown {
                    let mut column = vec![filler.clone(); prior_width];
                    column.push(entry.first_or(&filler));
                    self.push_column(key, column);
                }
            }
        }
        self.finish_rows("append", 1);
        Ok(())
    }

    ////////////////////////////////////////////////////////////////////////////////////////
    //                         EXTEND
    ////////////////////////////////////////////////////////////////////////////////////////

    /// Adds a batch of rows.
    ///
    /// - mapping or dataframe: the batch spans the dataframe's width, or the longest
    ///   mapping entry (scalars are broadcast over the batch). Shared columns get the
    ///   batch cells padded with the filler, columns the batch lacks get filler cells.
    ///   [`MergeMode::Strict`] discards batch columns unknown to the table first, and a
    ///   batch left without columns changes nothing. [`MergeMode::Relaxed`] creates them,
    ///   back-filled with the filler over the existing rows.
    /// - sequence: appended verbatim to every existing column.
    /// - a scalar is rejected, use [`Dataframe::append`].
    pub fn extend(&mut self, other: impl Into<Seed<K, V>>, mode: MergeMode) -> Result<(), DataframeError> {
        match other.into() {
            Seed::Scalar(_) => Err(DataframeError::TypeMismatch {
                operation: "extend",
                found: SeedKind::Scalar,
                hint: "Use 'append' for single values.",
            }),
            Seed::Sequence(values) => {
                for column in self.columns_mut().iter_mut() {
                    column.extend(values.iter().cloned());
                }
                self.finish_rows("extend", values.len());
                Ok(())
            }
            Seed::Mapping(map) => {
                self.extend_mapping(map, mode);
                Ok(())
            }
            Seed::Frame(frame) => {
                self.extend_frame(frame, mode);
                Ok(())
            }
        }
    }

    pub(crate) fn extend_frame(&mut self, frame: Dataframe<K, V>, mode: MergeMode) {
        let batch_width = frame.width();
        let mut batch = ColumnMap::from(frame);
        if self.filter_batch(&mut batch, mode) {
            self.extend_columns(batch, batch_width);
        }
    }

    pub(crate) fn extend_mapping(&mut self, mut batch: ColumnMap<K, V>, mode: MergeMode) {
        if self.filter_batch(&mut batch, mode) {
            let batch_width = batch.batch_width();
            self.extend_columns(batch, batch_width);
        }
    }

    /// strict mode drops unknown columns; false when nothing is left to extend with
    fn filter_batch(&self, batch: &mut ColumnMap<K, V>, mode: MergeMode) -> bool {
        if !mode.is_strict() {
            return true;
        }
        let dropped = batch.retain_keys(|key| self.contains_key(key));
        if !dropped.is_empty() {
            debug!("extend ({}): {} unknown column(s) discarded", mode, dropped.len());
        }
        if batch.is_empty() {
            debug!("extend ({}): no shared columns, nothing to do", mode);
            return false;
        }
        true
    }

    fn extend_columns(&mut self, batch: ColumnMap<K, V>, batch_width: usize) {
        let prior_width = self.width();
        let filler = self.filler().clone();
        let mut touched = vec![false; self.length()];
        for (key, entry) in batch {
            let cells = batch_cells(entry, batch_width, &filler);
            match self.position(&key) {
                Some(i) => {
                    touched[i] = true;
                    self.columns_mut()[i].extend(cells);
                }
                None => {
                    let mut column = vec![filler.clone(); prior_width];
                    column.extend(cells);
                    self.push_column(key, column);
                }
            }
        }
        for (column, _) in self
            .columns_mut()
            .iter_mut()
            .zip(touched)
            .filter(|(_, touched)| !touched)
        {
            column.extend(std::iter::repeat_n(filler.clone(), batch_width));
        }
        self.finish_rows("extend", batch_width);
    }

    fn finish_rows(&mut self, operation: &str, added: usize) {
        let width = self.width() + added;
        self.set_width(width);
        self.debug_check_width();
        debug!("{}: {} row(s) added, shape is now {:?}", operation, added, self.shape());
    }

    ////////////////////////////////////////////////////////////////////////////////////////
    //                         NON-MUTATING COMBINATIONS
    ////////////////////////////////////////////////////////////////////////////////////////

    /// Outer union by rows (`+`): a copy of `self` extended in relaxed mode.
    pub fn extended(&self, other: impl Into<Seed<K, V>>) -> Result<Self, DataframeError> {
        let mut result = self.clone();
        result.extend(other, MergeMode::Relaxed)?;
        Ok(result)
    }

    /// Column-wise override (`|`): a copy of `self` updated with `other`.
    pub fn updated(&self, other: impl Into<ColumnMap<K, V>>) -> Self {
        let mut result = self.clone();
        result.update(other);
        result
    }
}

/// cells an entry contributes to a batch of `batch_width` rows
fn batch_cells<V: Clone>(entry: Entry<V>, batch_width: usize, filler: &V) -> Vec<V> {
    match entry {
        Entry::Scalar(value) => vec![value; batch_width],
        Entry::Sequence(mut cells) => {
            cells.resize(batch_width, filler.clone());
            cells
        }
    }
}

impl<K: Clone + Eq + Hash, V: Clone> Add<&Dataframe<K, V>> for &Dataframe<K, V> {
    type Output = Dataframe<K, V>;

    fn add(self, other: &Dataframe<K, V>) -> Dataframe<K, V> {
        let mut result = self.clone();
        result.extend_frame(other.clone(), MergeMode::Relaxed);
        result
    }
}

impl<K: Clone + Eq + Hash, V: Clone> Add for Dataframe<K, V> {
    type Output = Dataframe<K, V>;

    fn add(mut self, other: Dataframe<K, V>) -> Dataframe<K, V> {
        self.extend_frame(other, MergeMode::Relaxed);
        self
    }
}

impl<K: Clone + Eq + Hash, V: Clone> Add<ColumnMap<K, V>> for &Dataframe<K, V> {
    type Output = Dataframe<K, V>;

    fn add(self, other: ColumnMap<K, V>) -> Dataframe<K, V> {
        let mut result = self.clone();
        result.extend_mapping(other, MergeMode::Relaxed);
        result
    }
}

impl<K: Clone + Eq + Hash, V: Clone> BitOr<&Dataframe<K, V>> for &Dataframe<K, V> {
    type Output = Dataframe<K, V>;

    fn bitor(self, other: &Dataframe<K, V>) -> Dataframe<K, V> {
        self.updated(other)
    }
}

impl<K: Clone + Eq + Hash, V: Clone> BitOr for Dataframe<K, V> {
    type Output = Dataframe<K, V>;

    fn bitor(mut self, other: Dataframe<K, V>) -> Dataframe<K, V> {
        self.update(other);
        self
    }
}

impl<K: Clone + Eq + Hash, V: Clone> BitOr<ColumnMap<K, V>> for &Dataframe<K, V> {
    type Output = Dataframe<K, V>;

    fn bitor(self, other: ColumnMap<K, V>) -> Dataframe<K, V> {
        self.updated(other)
    }
}
