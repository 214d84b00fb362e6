/////////////////////////////TESTS////////////////////////////////////////////////////
/*
scenario and property tests across operations:
concrete merge scenarios
width invariant over operation sequences, both merge modes
append/extend additivity
relaxed extend values of new columns
non-mutation of + and |
right bias of |
*/

#[cfg(test)]
mod tests {
    use crate::columns;
    use crate::dataframe::{Cell, ColumnMap, Dataframe, MergeMode, create_dataframe};
    use strum::IntoEnumIterator;

    fn ints(values: &[i64]) -> Vec<Cell> {
        values.iter().map(|&v| Cell::from(v)).collect()
    }

    fn assert_width_invariant(df: &Dataframe) {
        for (key, cells) in df.iter() {
            assert_eq!(cells.len(), df.width(), "column {} breaks the width", key);
        }
    }

    fn ab() -> Dataframe {
        Dataframe::from_columns(columns! { "a" => vec![1, 2], "b" => vec![3, 4] })
    }

    #[test]
    fn scenario_append_strict_ignores_new_key() {
        let mut df = Dataframe::from_columns(columns! { "a" => vec![1, 2] });
        df.append(columns! { "a" => 5, "b" => 6 }, MergeMode::default()).unwrap();
        assert_eq!(df["a"], ints(&[1, 2, 5])[..]);
        assert!(!df.contains_key("b"));
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn scenario_extend_strict_pads_missing_column() {
        let mut df = ab();
        df.extend(columns! { "a" => vec![5, 6], "c" => vec![9, 10, 11] }, MergeMode::Strict)
            .unwrap();
        assert_eq!(df["a"], ints(&[1, 2, 5, 6])[..]);
        assert_eq!(df["b"], [Cell::from(3), Cell::from(4), Cell::Null, Cell::Null]);
        assert!(!df.contains_key("c"));
        assert_eq!(df.width(), 4);
    }

    #[test]
    fn scenario_add_is_outer_union_by_rows() {
        let a = ab();
        let b = Dataframe::from_columns(columns! { "a" => vec![5, 6], "c" => vec![7, 8] });
        let sum = &a + &b;
        assert_eq!(sum["a"], ints(&[1, 2, 5, 6])[..]);
        assert_eq!(sum["b"], [Cell::from(3), Cell::from(4), Cell::Null, Cell::Null]);
        assert_eq!(sum["c"], [Cell::Null, Cell::Null, Cell::from(7), Cell::from(8)]);
    }

    #[test]
    fn scenario_or_is_column_override() {
        let a = ab();
        let b = Dataframe::from_columns(columns! { "a" => vec![5, 6], "c" => vec![7, 8] });
        let merged = &a | &b;
        assert_eq!(merged["a"], ints(&[5, 6])[..]);
        assert_eq!(merged["b"], ints(&[3, 4])[..]);
        assert_eq!(merged["c"], ints(&[7, 8])[..]);
    }

    #[test]
    fn scenario_builder_list_seed() {
        let df: Dataframe = create_dataframe(["a", "b"], 3, vec![1, 2], Cell::from(-1));
        assert_eq!(df["a"], ints(&[1, 2, -1])[..]);
        assert_eq!(df["b"], ints(&[1, 2, -1])[..]);
    }

    #[test]
    fn scenario_builder_mapping_seed() {
        let df: Dataframe =
            create_dataframe(["a", "b"], 3, columns! { "a" => vec![1, 2], "b" => 3 }, Cell::from(-1));
        assert_eq!(df["a"], ints(&[1, 2, -1])[..]);
        assert_eq!(df["b"], ints(&[3, 3, 3])[..]);
    }

    #[test]
    fn width_invariant_over_operation_sequences() {
        for mode in MergeMode::iter() {
            let mut df = Dataframe::from_columns(columns! { "a" => vec![1], "b" => vec![2, 3, 4] });
            assert_width_invariant(&df);
            df.append(columns! { "a" => 1, "z" => 9 }, mode).unwrap();
            assert_width_invariant(&df);
            df.extend(columns! { "b" => vec![1, 2, 3, 4, 5], "y" => 0 }, mode).unwrap();
            assert_width_invariant(&df);
            df.update(columns! { "x" => vec![1, 2] });
            assert_width_invariant(&df);
            df.extend(vec![7, 7], mode).unwrap();
            assert_width_invariant(&df);
            df.append(0, mode).unwrap();
            assert_width_invariant(&df);
            let other = Dataframe::from_columns(columns! { "q" => vec![1, 2, 3], "a" => 4 });
            df.extend(&other, mode).unwrap();
            assert_width_invariant(&df);
            df = &df + &other;
            assert_width_invariant(&df);
            df = &df | &other;
            assert_width_invariant(&df);
        }
    }

    #[test]
    fn append_grows_every_column_by_one() {
        for mode in MergeMode::iter() {
            let mut df = ab();
            let before: Vec<usize> = df.iter().map(|(_, cells)| cells.len()).collect();
            df.append(columns! { "b" => 1, "new" => 2 }, mode).unwrap();
            assert_eq!(df.width(), 3);
            for (key, len) in ["a", "b"].iter().zip(before) {
                assert_eq!(df[*key].len(), len + 1);
            }
            assert_eq!(df.contains_key("new"), mode == MergeMode::Relaxed);
        }
    }

    #[test]
    fn relaxed_extend_new_columns_are_backfilled_then_padded_or_broadcast() {
        let mut df = ab();
        df.extend(
            columns! { "a" => vec![5, 6, 7], "c" => 9, "d" => vec![1] },
            MergeMode::Relaxed,
        )
        .unwrap();
        assert_eq!(df.width(), 5);
        assert_eq!(df["a"], ints(&[1, 2, 5, 6, 7])[..]);
        assert_eq!(df["b"], [Cell::from(3), Cell::from(4), Cell::Null, Cell::Null, Cell::Null]);
        assert_eq!(df["c"], [Cell::Null, Cell::Null, Cell::from(9), Cell::from(9), Cell::from(9)]);
        assert_eq!(df["d"], [Cell::Null, Cell::Null, Cell::from(1), Cell::Null, Cell::Null]);
    }

    #[test]
    fn strict_extend_keeps_column_set() {
        let mut df = ab();
        let keys_before = df.keys().to_vec();
        let batch = Dataframe::from_columns(columns! { "b" => vec![1, 2, 3], "c" => vec![4] });
        df.extend(&batch, MergeMode::Strict).unwrap();
        assert_eq!(df.keys(), keys_before.as_slice());
        assert_eq!(df.width(), 2 + batch.width());
    }

    #[test]
    fn add_does_not_mutate_operands() {
        let a = ab();
        let b = Dataframe::from_columns(columns! { "c" => vec![1, 2, 3] });
        let (a_before, b_before) = (a.clone(), b.clone());
        let sum = &a + &b;
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
        assert_eq!(sum.width(), a.width() + b.width());
    }

    #[test]
    fn or_is_right_biased_and_reconciles_width() {
        let a = ab();
        let b = Dataframe::from_columns(columns! { "b" => vec![7, 8, 9] });
        let merged = &a | &b;
        assert_eq!(merged["b"], b["b"]);
        assert_eq!(merged["a"], [Cell::from(1), Cell::from(2), Cell::Null]);
        assert_eq!(a, ab());
    }

    #[test]
    fn generic_keys_and_cells() {
        let mut map: ColumnMap<u32, f64> = ColumnMap::new();
        map.insert(1u32, vec![0.5, 1.5]);
        map.insert(2u32, vec![2.5]);
        let mut df = Dataframe::from_columns_with_filler(map, f64::NAN);
        assert!(df[&2u32][1].is_nan());
        let mut row: ColumnMap<u32, f64> = ColumnMap::new();
        row.insert(3u32, vec![9.0]);
        df.append(row, MergeMode::Relaxed).unwrap();
        assert_eq!(df.shape(), (3, 3));
        approx::assert_relative_eq!(df[&3u32][2], 9.0);
    }
}
