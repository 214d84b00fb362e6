/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into
/// ordered sections of key -> values, each section being a ready-made seed for a Dataframe.
///
/// ```text
/// // loads on the slab
/// loads
///   g_k: 2.5, 3.0, 4.1
///   q_k: 5.0
///   unit: kN/m2
///
/// options
///   filler: None
///   strict: false
///   loglevel: info
/// ```
/// - comment lines start with `//`, `#`, `%` or `;`
/// - a key with a single value is a scalar entry, several values form a column
/// - values are classified as integer, float, bool, `None`, `$symbolic$` or plain string
/// - a repeated title merges into the earlier section, a repeated key replaces the earlier one
/// - the `options` section configures filler, merge mode and logging instead of holding data
use std::fs;
use std::path::Path;

use log::{LevelFilter, debug};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use thiserror::Error;

use crate::Utils::logger::{LoggerSettings, init_logger, level_from_str};
use crate::dataframe::{Cell, ColumnMap, Dataframe, Entry, MergeMode};

/// title of the reserved configuration section
pub const OPTIONS_SECTION: &str = "options";

type Section = ColumnMap<String, Cell>;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Parsing error: {0}")]
    Parse(String),
    #[error("Failed to parse entire document. Remaining: '{0}'")]
    Trailing(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("section not found: {0}")]
    MissingSection(String),
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error("invalid value for option {key}: {value}")]
    InvalidOption { key: String, value: String },
}

/// Parsed document: titled sections in order of first appearance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    sections: Vec<(String, Section)>,
}

/// Settings read from the `options` section.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataframeOptions {
    pub filler: Cell,
    pub mode: MergeMode,
    pub logger: LoggerSettings,
}

impl DataframeOptions {
    /// Installs the global logger the `options` section asks for (`loglevel`, `logfile`,
    /// `console`). Returns false if nothing was installed, see [`init_logger`].
    pub fn init_logging(&self) -> bool {
        init_logger(&self.logger)
    }
}

/// Parses a name (letters, digits, underscores, not starting with a digit)
fn parse_name(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    map(parser, String::from).parse(input)
}

/// `$...$` marks a symbolic expression and may contain spaces, e.g. `$q * L**2 / 8$`
fn parse_symbol(input: &str) -> IResult<&str, Cell> {
    let expr = take_while1(|c: char| !matches!(c, '$' | '\n' | '\r'));
    map(delimited(tag("$"), expr, tag("$")), |expr: &str| Cell::symbol(expr.trim())).parse(input)
}

fn parse_value(input: &str) -> IResult<&str, Cell> {
    // a single literal - excluding commas, whitespace, newlines and semicolons
    let literal = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | ';'));
    alt((parse_symbol, map(literal, Cell::parse_scalar))).parse(input)
}

fn parse_value_list(input: &str) -> IResult<&str, Vec<Cell>> {
    let separator_comma = delimited(space0, tag(","), space0);
    let (input, _) = space0(input)?;
    separated_list0(separator_comma, parse_value).parse(input)
}

/// Parses a key-value pair where value is a list
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Cell>)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let (input, result) = separated_pair(parse_name, colon_separator, parse_value_list).parse(input)?;
    let (input, _) = terminated(space0, alt((tag(";"), space0))).parse(input)?;
    Ok((input, result))
}

/// Parses a section with a title and one or more key-value pairs
fn parse_section(input: &str) -> IResult<&str, (String, Section)> {
    let (input, title) = parse_name(input)?;
    let (input, _) = multispace0(input)?;
    let (input, pairs) = many1(terminated(parse_key_value_pair, multispace0)).parse(input)?;

    let mut section = Section::new();
    for (key, mut values) in pairs {
        let entry = if values.len() == 1 {
            Entry::Scalar(values.remove(0))
        } else {
            Entry::Sequence(values)
        };
        section.insert(key, entry);
    }
    Ok((input, (title, section)))
}

/// Filters out comment lines (starting with //, #, %, or ;)
fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the entire document.
pub fn parse_document(input: &str) -> Result<Document, DocumentError> {
    let filtered = filter_comments(input);
    if filtered.trim().is_empty() {
        return Ok(Document::default());
    }
    let mut parser = many1(delimited(multispace0, parse_section, multispace0));
    let (remaining, sections) = parser
        .parse(filtered.as_str())
        .map_err(|e| DocumentError::Parse(e.to_string()))?;
    if !remaining.trim().is_empty() {
        return Err(DocumentError::Trailing(remaining.to_string()));
    }

    let mut document = Document::default();
    for (title, section) in sections {
        document.insert_section(title, section);
    }
    debug!("parsed document with {} section(s)", document.sections.len());
    Ok(document)
}

pub fn parse_document_file<P: AsRef<Path>>(path: P) -> Result<Document, DocumentError> {
    let input = fs::read_to_string(path)?;
    parse_document(&input)
}

/// Parses a document and turns every data section into a Dataframe, using the filler
/// configured in its `options` section.
pub fn load_dataframes(input: &str) -> Result<(DataframeOptions, Vec<(String, Dataframe)>), DocumentError> {
    let document = parse_document(input)?;
    let options = document.options()?;
    let frames = document.to_dataframes(&options.filler);
    Ok((options, frames))
}

impl Document {
    fn insert_section(&mut self, title: String, section: Section) {
        match self.sections.iter_mut().find(|(t, _)| *t == title) {
            Some((_, existing)) => existing.merge(section),
            None => self.sections.push((title, section)),
        }
    }

    pub fn titles(&self) -> impl Iterator<Item = &String> {
        self.sections.iter().map(|(title, _)| title)
    }

    pub fn section(&self, title: &str) -> Option<&ColumnMap<String, Cell>> {
        self.sections
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, section)| section)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// one section as a Dataframe, short columns padded with `filler`
    pub fn section_to_dataframe(&self, title: &str, filler: &Cell) -> Result<Dataframe, DocumentError> {
        let section = self
            .section(title)
            .ok_or_else(|| DocumentError::MissingSection(title.to_string()))?;
        Ok(Dataframe::from_columns_with_filler(section.clone(), filler.clone()))
    }

    /// every section except `options`, in document order
    pub fn to_dataframes(&self, filler: &Cell) -> Vec<(String, Dataframe)> {
        self.sections
            .iter()
            .filter(|(title, _)| title != OPTIONS_SECTION)
            .map(|(title, section)| {
                (
                    title.clone(),
                    Dataframe::from_columns_with_filler(section.clone(), filler.clone()),
                )
            })
            .collect()
    }

    /// Reads the `options` section; defaults when it is absent.
    pub fn options(&self) -> Result<DataframeOptions, DocumentError> {
        let mut options = DataframeOptions::default();
        let Some(section) = self.section(OPTIONS_SECTION) else {
            return Ok(options);
        };
        for (key, entry) in section.iter() {
            let value = entry.first_or(&Cell::Null);
            let invalid = || DocumentError::InvalidOption {
                key: key.clone(),
                value: value.to_string(),
            };
            match key.as_str() {
                "filler" => options.filler = value.clone(),
                "strict" => {
                    let strict = value.as_boolean().ok_or_else(invalid)?;
                    options.mode = MergeMode::from_strict(strict);
                }
                "loglevel" => {
                    let level: LevelFilter = value
                        .as_string()
                        .map(String::as_str)
                        .and_then(level_from_str)
                        .ok_or_else(invalid)?;
                    options.logger.level = level;
                }
                "logfile" => {
                    let file = value.as_string().ok_or_else(invalid)?;
                    options.logger.log_file = Some(file.clone());
                }
                "console" => {
                    options.logger.console = value.as_boolean().ok_or_else(invalid)?;
                }
                _ => return Err(DocumentError::UnknownOption(key.clone())),
            }
        }
        Ok(options)
    }
}

/////////////////////////////TESTS////////////////////////////////////////////////////
/*
tests:
name/value/pair/section parsers
comments and empty documents
repeated sections and keys
options section
malformed document
file-based parsing
*/

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_parse_name() {
        let (remaining, name) = parse_name("title1\n key1: value1").unwrap();
        assert_eq!(name, "title1");
        assert_eq!(remaining, "\n key1: value1");

        let (remaining, name) = parse_name("F_Ed: 12").unwrap();
        assert_eq!(name, "F_Ed");
        assert_eq!(remaining, ": 12");

        assert!(parse_name("1abc").is_err());
    }

    #[test]
    fn test_parse_value() {
        let (remaining, value) = parse_value("value1, value2").unwrap();
        assert_eq!(value, Cell::String("value1".to_string()));
        assert_eq!(remaining, ", value2");

        let (_, value) = parse_value("123, next").unwrap();
        assert_eq!(value, Cell::Integer(123));

        let (_, value) = parse_value("-0.25 next").unwrap();
        assert_relative_eq!(value.as_float().unwrap(), -0.25);

        let (_, value) = parse_value("$F_Ed/A$").unwrap();
        assert_eq!(value, Cell::symbol("F_Ed/A"));

        let (remaining, value) = parse_value("$q * L**2 / 8$, 2").unwrap();
        assert_eq!(value, Cell::symbol("q * L**2 / 8"));
        assert_eq!(remaining, ", 2");

        let (_, value) = parse_value("None").unwrap();
        assert_eq!(value, Cell::Null);
    }

    #[test]
    fn test_parse_value_list() {
        let (remaining, values) = parse_value_list("value1, 123, 45.67, true").unwrap();
        assert_eq!(
            values,
            vec![
                Cell::String("value1".to_string()),
                Cell::Integer(123),
                Cell::Float(45.67),
                Cell::Boolean(true)
            ]
        );
        assert_eq!(remaining, "");

        let (remaining, values) = parse_value_list("").unwrap();
        assert_eq!(values, Vec::<Cell>::new());
        assert_eq!(remaining, "");
    }

    #[test]
    fn test_parse_key_value_pair() {
        let (remaining, (key, values)) = parse_key_value_pair("key1 : 1 , 2 key2: 3").unwrap();
        assert_eq!(key, "key1");
        assert_eq!(values, vec![Cell::Integer(1), Cell::Integer(2)]);
        assert_eq!(remaining, "key2: 3");

        let (remaining, (_, values)) = parse_key_value_pair("key1: a, b;").unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(remaining, "");
    }

    #[test]
    fn test_parse_section() {
        let input = "section1 key1: value1, value2 key2: 7 section2";
        let (remaining, (title, section)) = parse_section(input).unwrap();
        assert_eq!(title, "section1");
        assert_eq!(section.len(), 2);
        assert_eq!(
            section.get(&"key2".to_string()),
            Some(&Entry::Scalar(Cell::Integer(7)))
        );
        assert_eq!(section.get(&"key1".to_string()).unwrap().len(), 2);
        assert_eq!(remaining, "section2");
    }

    #[test]
    fn test_parse_document_multiline_with_comments() {
        let input = r#"
            // loads on the slab
            loads
              g_k: 2.5, 3.0, 4.1
              q_k: 5.0
            # materials
            material
              f_ck: 30
              gamma_c: 1.5
            "#;
        let document = parse_document(input).unwrap();
        let titles: Vec<&String> = document.titles().collect();
        assert_eq!(titles, vec!["loads", "material"]);
        let loads = document.section_to_dataframe("loads", &Cell::Null).unwrap();
        assert_eq!(loads.shape(), (2, 3));
        assert_eq!(loads["q_k"], [Cell::Float(5.0), Cell::Null, Cell::Null]);
    }

    #[test]
    fn test_parse_document_empty() {
        let document = parse_document("  \n // nothing here \n").unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn test_repeated_section_and_key() {
        let input = "a x: 1 y: 2\nb z: 0\na y: 5, 6";
        let document = parse_document(input).unwrap();
        let titles: Vec<&String> = document.titles().collect();
        assert_eq!(titles, vec!["a", "b"]);
        let section = document.section("a").unwrap();
        let keys: Vec<&String> = section.keys().collect();
        assert_eq!(keys, vec!["x", "y"]);
        assert_eq!(section.get(&"y".to_string()).unwrap().len(), 2);
    }

    #[test]
    fn test_options_section() {
        let input = "options filler: - strict: false loglevel: debug\ndata a: 1, 2 b: 3";
        let (options, frames) = load_dataframes(input).unwrap();
        assert_eq!(options.filler, Cell::String("-".to_string()));
        assert_eq!(options.mode, MergeMode::Relaxed);
        assert_eq!(options.logger.level, LevelFilter::Debug);
        assert_eq!(frames.len(), 1);
        let (title, frame) = &frames[0];
        assert_eq!(title, "data");
        assert_eq!(frame["b"], [Cell::Integer(3), Cell::String("-".to_string())]);
    }

    #[test]
    fn test_options_logging_settings() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("missing").join("notebook.log");
        let input = format!(
            "options loglevel: warn console: false logfile: {}\ndata a: 1",
            log_path.display()
        );
        let (options, _) = load_dataframes(&input).unwrap();
        assert_eq!(options.logger.level, LevelFilter::Warn);
        assert!(!options.logger.console);
        assert_eq!(options.logger.log_file.as_deref(), log_path.to_str());
        // file cannot be created and the console is off: no logger is installed
        assert!(!options.init_logging());
    }

    #[test]
    fn test_options_defaults_and_errors() {
        let document = parse_document("data a: 1").unwrap();
        assert_eq!(document.options().unwrap(), DataframeOptions::default());

        let document = parse_document("options strict: maybe").unwrap();
        assert!(matches!(
            document.options(),
            Err(DocumentError::InvalidOption { .. })
        ));

        let document = parse_document("options colour: red").unwrap();
        assert!(matches!(
            document.options(),
            Err(DocumentError::UnknownOption(key)) if key == "colour"
        ));
    }

    #[test]
    fn test_missing_section() {
        let document = parse_document("data a: 1").unwrap();
        assert!(matches!(
            document.section_to_dataframe("loads", &Cell::Null),
            Err(DocumentError::MissingSection(_))
        ));
    }

    #[test]
    fn test_malformed_document() {
        assert!(parse_document("123 key: value").is_err());
        assert!(matches!(
            parse_document("data a: 1\n: orphan"),
            Err(DocumentError::Trailing(_))
        ));
    }

    #[test]
    fn test_parse_document_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("notebook_data.txt");
        let mut file = fs::File::create(&file_path).unwrap();
        writeln!(file, "beam").unwrap();
        writeln!(file, "  L: 6.0").unwrap();
        writeln!(file, "  M_Ed: $q * L**2 / 8$").unwrap();
        drop(file);

        let document = parse_document_file(&file_path).unwrap();
        let beam = document.section("beam").unwrap();
        assert_eq!(
            beam.get(&"M_Ed".to_string()),
            Some(&Entry::Scalar(Cell::symbol("q * L**2 / 8")))
        );

        assert!(matches!(
            parse_document_file(dir.path().join("missing.txt")),
            Err(DocumentError::Io(_))
        ));
    }
}
