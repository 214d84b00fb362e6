//! different utility modules used throughout the project
/// logger setup: terminal and/or time-stamped file via simplelog
pub mod logger;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into
/// ordered sections, each one a seed for a Dataframe
pub mod task_parser;
