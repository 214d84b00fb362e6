use std::fmt::{self, Display};
use std::hash::Hash;

use itertools::Itertools;
use log::info;
use tabled::{builder::Builder, settings::Style};

use crate::dataframe::frame_core::Dataframe;

impl<K: Clone + Eq + Hash + Display, V: Clone + Display> Dataframe<K, V> {
    /// mapping-style representation: `{a: [1, 2], b: [3, 4]}`
    pub fn dict_repr(&self) -> String {
        let body = self
            .iter()
            .map(|(key, cells)| format!("{}: [{}]", key, cells.iter().join(", ")))
            .join(", ");
        format!("{{{}}}", body)
    }

    pub fn print_dict(&self) {
        info!("{}", self.dict_repr());
    }

    /// Grid with one header line of column names and one line per row.
    pub fn to_pretty_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.keys().iter().map(|key| key.to_string()));
        for row in self.rows() {
            builder.push_record(row.into_iter().map(|cell| cell.to_string()));
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.to_string()
    }
}

impl<K: Clone + Eq + Hash + Display, V: Clone + Display> Display for Dataframe<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dataframe({}, shape={:?})", self.dict_repr(), self.shape())
    }
}
