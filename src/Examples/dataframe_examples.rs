// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use log::{error, info};

use crate::Utils::task_parser::load_dataframes;
use crate::columns;
use crate::dataframe::{Cell, ColumnMap, Dataframe, MergeMode, Seed, create_dataframe, create_dataframe_default};

pub fn dataframe_examples(example: usize) {
    match example {
        0 => {
            // CONSTRUCTION
            // from named columns: short columns are padded with the filler
            let df = Dataframe::from_columns(columns! {
                "F_Ed" => vec![12.5, 14.0, 9.75],
                "unit" => "kN",
            });
            info!("from columns: {}", df);
            // from rows: the first row fixes the column set
            let rows = vec![
                columns! { "x" => 0.0, "y" => Cell::symbol("a*x") },
                columns! { "x" => 1.0, "y" => Cell::symbol("a*x + b") },
            ];
            let df = Dataframe::from_records(rows);
            info!("from records:\n{}", df.to_pretty_table());
            df.print_dict();
            // positional seed plus keywords, keywords win on shared keys
            let positional: Vec<Seed<String, Cell>> = vec![columns! { "a" => vec![1, 2], "b" => 0 }.into()];
            match Dataframe::from_args(positional, columns! { "b" => vec![3, 4] }, Cell::Null) {
                Ok(df) => info!("from args: {}", df),
                Err(e) => error!("{}", e),
            }
            // more than one positional seed is rejected
            let two = vec![Seed::from(columns! { "a" => 1 }), Seed::from(columns! { "b" => 2 })];
            if let Err(e) = Dataframe::from_args(two, ColumnMap::new(), Cell::Null) {
                info!("expected error: {}", e);
            }
        }
        1 => {
            // APPEND AND EXTEND
            let mut df = Dataframe::from_columns(columns! { "a" => vec![1, 2], "b" => vec![3, 4] });
            // strict: a column the frame does not have is ignored
            if let Err(e) = df.append(columns! { "a" => 5, "c" => 6 }, MergeMode::Strict) {
                error!("{}", e);
            }
            info!("strict append: {}", df);
            // relaxed: the new column is created and back-filled
            if let Err(e) = df.append(columns! { "c" => 7 }, MergeMode::Relaxed) {
                error!("{}", e);
            }
            info!("relaxed append: {}", df);
            // several rows at once, the longest column sets the batch width
            if let Err(e) = df.extend(columns! { "a" => vec![8, 9, 10], "b" => 0 }, MergeMode::Strict) {
                error!("{}", e);
            }
            info!("extend:\n{}", df.to_pretty_table());
            // a bare sequence is broadcast to every column
            if let Err(e) = df.extend(vec![-1, -2], MergeMode::Strict) {
                error!("{}", e);
            }
            info!("broadcast extend: {}", df);
            // a sequence is not a single row
            if let Err(e) = df.append(vec![1, 2], MergeMode::Strict) {
                info!("expected error: {}", e);
            }
        }
        2 => {
            // COMBINING
            let left = Dataframe::from_columns(columns! { "a" => vec![1, 2], "b" => vec![3, 4] });
            let right = Dataframe::from_columns(columns! { "a" => vec![5, 6], "c" => vec![7, 8] });
            // rows of both, union of columns
            let sum = &left + &right;
            info!("left + right:\n{}", sum.to_pretty_table());
            // columns of both, right side wins
            let merged = &left | &right;
            info!("left | right:\n{}", merged.to_pretty_table());
            // operands are left untouched
            info!("left is still {}", left);
            let updated = &left | columns! { "b" => vec![0, 0, 0] };
            info!("left | mapping: {}", updated);
        }
        3 => {
            // BUILDER
            let keys = ["g_k", "q_k", "psi_0"];
            let scalar: Dataframe = create_dataframe(keys, 3, Seed::scalar(0.0), Cell::Null);
            info!("scalar seed:\n{}", scalar.to_pretty_table());
            let sequence: Dataframe = create_dataframe(keys, 4, Seed::sequence([1.35, 1.5]), Cell::from(1.0));
            info!("sequence seed:\n{}", sequence.to_pretty_table());
            let mapping: Dataframe = create_dataframe(
                keys,
                3,
                columns! { "g_k" => vec![2.5, 3.0], "psi_0" => 0.7 },
                Cell::Null,
            );
            info!("mapping seed:\n{}", mapping.to_pretty_table());
            let frame: Dataframe = create_dataframe_default(["q_k", "psi_0"], 2, &mapping);
            info!("dataframe seed: {}", frame);
        }
        4 => {
            // DOCUMENT SEEDS
            let input = r#"
                // loads on the slab
                loads
                  g_k: 2.5, 3.0, 4.1
                  q_k: 5.0
                  M_Ed: $1.35*g_k*L**2/8$
                # geometry
                geometry
                  L: 6.0
                  b: 1.0, 1.2
                options
                  filler: None
                  strict: false
                  loglevel: info
            "#;
            match load_dataframes(input) {
                Ok((options, frames)) => {
                    // no-op when a logger is already installed
                    options.init_logging();
                    info!("merge mode: {}", options.mode);
                    let mut frames = frames.into_iter();
                    if let Some((_, mut total)) = frames.next() {
                        for (title, frame) in frames {
                            info!("section {}: {}", title, frame);
                            if let Err(e) = total.extend(&frame, options.mode) {
                                error!("{}", e);
                            }
                        }
                        info!("all sections:\n{}", total.to_pretty_table());
                    }
                }
                Err(e) => error!("{}", e),
            }
        }
        _ => {
            error!("no example number {}", example);
        }
    }
}
