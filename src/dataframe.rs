//! # Dataframe
//!
//! A small columnar container used to align values (symbolic expressions, numbers,
//! labels) before they are rendered as equation blocks. Column name -> cell sequence,
//! every sequence kept at one shared `width` (row count) by every operation.
//!
//! ## Main Structures
//! - [`Dataframe`]: the table itself
//! - [`Cell`]: default cell type, the table itself is generic over any `Clone` cell
//! - [`Seed`], [`ColumnMap`], [`Entry`]: the closed set of argument shapes
//! - [`MergeMode`]: strict/relaxed column handling of `append` and `extend`
//!
//! ## Operations
//! - in place: `update`, `append`, `extend`
//! - copying: `updated` (`|`), `extended` (`+`)
//! - [`create_dataframe`]: fixed keys and width from any seed shape
//!
//! # Example
//! ```
//! use RustedDataframe::columns;
//! use RustedDataframe::dataframe::{Cell, Dataframe, MergeMode};
//! let mut df = Dataframe::from_columns(columns! { "a" => vec![1, 2], "b" => vec![3, 4] });
//! df.extend(columns! { "a" => vec![5, 6], "c" => vec![9, 10, 11] }, MergeMode::Strict).unwrap();
//! assert_eq!(df.width(), 4);
//! assert_eq!(df["b"], [Cell::from(3), Cell::from(4), Cell::Null, Cell::Null]);
//! assert!(!df.contains_key("c"));
//! ```
/// closed input variants resolved at operation boundaries
pub mod seed;
/// default cell type
pub mod cell;
pub mod errors;
/// storage, construction and read access
pub mod frame_core;
/// update/append/extend and the `+`/`|` combinations
pub mod frame_ops;
/// repr and pretty printing
pub mod frame_display;
/// `create_dataframe`
pub mod builder;
mod dataframe_tests;

pub use builder::{create_dataframe, create_dataframe_default};
pub use cell::Cell;
pub use errors::DataframeError;
pub use frame_core::Dataframe;
pub use seed::{ColumnMap, Entry, MergeMode, Seed, SeedKind};
