//! examples of usage of RustedDataframe
/// construction, merging and building of dataframes
pub mod dataframe_examples;
