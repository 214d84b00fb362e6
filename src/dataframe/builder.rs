//! Builds a dataframe of fixed keys and width out of any seed shape, e.g. to align
//! per-column formatting options with the columns of an equation table.
use std::hash::Hash;
use std::iter::repeat_n;

use log::debug;

use crate::dataframe::frame_core::Dataframe;
use crate::dataframe::seed::{Entry, Seed};

/// Creates a dataframe holding exactly `keys`, every column `width` cells long.
///
/// - scalar seed: every column is `width` copies of the seed itself
/// - sequence seed: the same sequence for every key, truncated to `width` or padded
///   with `default_value`
/// - dataframe seed: a key present in the seed takes its column truncated/padded,
///   an absent key is `width` copies of `default_value`
/// - mapping seed: a sequence entry is truncated/padded, a scalar entry is broadcast,
///   an absent key is `width` copies of `default_value`
///
/// `default_value` only pads up to `width`; the result's filler for later operations is
/// `V::default()` (`Cell::Null`), as for [`Dataframe::new`]. Repeated keys produce one column.
///
/// # Example
/// ```
/// use RustedDataframe::columns;
/// use RustedDataframe::dataframe::{Cell, create_dataframe};
/// let df = create_dataframe(["a", "b"], 3, columns! { "a" => vec![1, 2], "b" => 3 }, Cell::from(-1));
/// assert_eq!(df["a"], [Cell::from(1), Cell::from(2), Cell::from(-1)]);
/// assert_eq!(df["b"], [Cell::from(3), Cell::from(3), Cell::from(3)]);
/// ```
pub fn create_dataframe<K, V, I>(
    keys: I,
    width: usize,
    seed: impl Into<Seed<K, V>>,
    default_value: V,
) -> Dataframe<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Default,
    I: IntoIterator,
    I::Item: Into<K>,
{
    let seed = seed.into();
    debug!("create_dataframe: {} seed, width {}", seed.kind(), width);
    let fit = |cells: &[V]| -> Vec<V> {
        let mut cells: Vec<V> = cells.iter().take(width).cloned().collect();
        cells.resize(width, default_value.clone());
        cells
    };
    let defaults = || repeat_n(default_value.clone(), width).collect::<Vec<V>>();

    let mut frame = Dataframe::new();
    for key in keys.into_iter().map(Into::into) {
        if frame.contains_key(&key) {
            continue;
        }
        let cells = match &seed {
            Seed::Scalar(value) => repeat_n(value.clone(), width).collect(),
            Seed::Sequence(values) => fit(values),
            Seed::Frame(source) => match source.get(&key) {
                Some(column) => fit(column),
                None => defaults(),
            },
            Seed::Mapping(map) => match map.get(&key) {
                Some(Entry::Sequence(values)) => fit(values),
                Some(Entry::Scalar(value)) => repeat_n(value.clone(), width).collect(),
                None => defaults(),
            },
        };
        frame.push_column(key, cells);
    }
    frame.set_width(width);
    frame.debug_check_width();
    frame
}

/// [`create_dataframe`] with `V::default()` as the default value.
pub fn create_dataframe_default<K, V, I>(keys: I, width: usize, seed: impl Into<Seed<K, V>>) -> Dataframe<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone + Default,
    I: IntoIterator,
    I::Item: Into<K>,
{
    create_dataframe(keys, width, seed, V::default())
}
