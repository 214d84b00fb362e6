#![allow(non_snake_case)]
use std::env;

use log::{error, info};
use RustedDataframe::Examples::dataframe_examples::dataframe_examples;
use RustedDataframe::Utils::logger::{LoggerSettings, init_logger};
use RustedDataframe::Utils::task_parser::parse_document_file;

/// `RustedDataframe <document>` prints the data sections of a task document, logging as its
/// `options` section says; without arguments a numbered example is run.
fn main() {
    let Some(path) = env::args().nth(1) else {
        init_logger(&LoggerSettings::default());
        let example = 4;
        dataframe_examples(example);
        return;
    };

    let document = match parse_document_file(&path) {
        Ok(document) => document,
        Err(e) => {
            init_logger(&LoggerSettings::default());
            error!("{}: {}", path, e);
            return;
        }
    };
    match document.options() {
        Ok(options) => {
            options.init_logging();
            for (title, frame) in document.to_dataframes(&options.filler) {
                info!("{}:\n{}", title, frame.to_pretty_table());
            }
        }
        Err(e) => {
            init_logger(&LoggerSettings::default());
            error!("{}: {}", path, e);
        }
    }
}
