//! The sheet model: a tabular view of the language-line store.
//!
//! Layout: a required header row `group,key,<locale>...`, then one row per
//! line with that locale's translation in each cell. An empty cell means
//! the line is untranslated for that locale.
//!
//! Reading tolerates a UTF-8 BOM and UTF-16 input (uploaded spreadsheets
//! saved by desktop tools frequently carry both), via `encoding_rs_io`.

use std::{io::BufRead, str::FromStr};

use encoding_rs_io::DecodeReaderBytes;
use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    formats::SheetFormat,
    types::TextMap,
};

/// One data row of a sheet. `values` is aligned with the parent sheet's
/// locale columns; missing trailing cells read as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub group: String,
    pub key: String,
    pub values: Vec<String>,
}

impl SheetRow {
    /// The text mapping carried by this row, given the sheet's locale
    /// columns. Empty cells produce no entry.
    pub fn text_map(&self, locales: &[String]) -> TextMap {
        locales
            .iter()
            .zip(self.values.iter())
            .filter(|(_, value)| !value.is_empty())
            .map(|(locale, value)| (locale.clone(), value.clone()))
            .collect()
    }
}

/// A parsed sheet: locale columns plus data rows, with a count of rows
/// that did not fit the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    /// Locale codes, in column order.
    pub locales: Vec<String>,
    /// Data rows, in file order.
    pub rows: Vec<SheetRow>,
    /// Rows that could not be mapped onto the header (too few or too many
    /// cells). Counted here, surfaced as failures by the importer.
    pub malformed_rows: usize,
}

impl Sheet {
    /// Creates an empty sheet with the given locale columns.
    pub fn new(locales: Vec<String>) -> Self {
        Sheet {
            locales,
            rows: Vec::new(),
            malformed_rows: 0,
        }
    }

    /// Appends a row, padding missing trailing cells with empty strings.
    pub fn push_row(&mut self, group: &str, key: &str, mut values: Vec<String>) {
        values.resize(self.locales.len(), String::new());
        self.rows.push(SheetRow {
            group: group.to_string(),
            key: key.to_string(),
            values,
        });
    }

    /// Parse from any reader in the given format.
    pub fn from_reader_with<R: BufRead>(reader: R, format: SheetFormat) -> Result<Self, Error> {
        let decoded = DecodeReaderBytes::new(reader);
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(format.delimiter())
            .from_reader(decoded);

        let mut records = rdr.records();
        let header = match records.next() {
            Some(record) => record?,
            None => return Err(Error::invalid_header("sheet is empty")),
        };
        let locales = parse_header(&header)?;
        let width = locales.len() + 2;

        let mut sheet = Sheet::new(locales);
        for record in records {
            let record = record?;
            if record.len() < 2 || record.len() > width {
                sheet.malformed_rows += 1;
                continue;
            }
            let values = record.iter().skip(2).map(str::to_string).collect();
            sheet.push_row(&record[0], &record[1], values);
        }
        Ok(sheet)
    }

    /// Write to any writer in the given format.
    pub fn to_writer_with<W: std::io::Write>(
        &self,
        writer: W,
        format: SheetFormat,
    ) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(format.delimiter())
            .from_writer(writer);

        let mut header = vec!["group".to_string(), "key".to_string()];
        header.extend(self.locales.iter().cloned());
        wtr.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![row.group.clone(), row.key.clone()];
            record.extend(row.values.iter().cloned());
            record.resize(header.len(), String::new());
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Parse a byte buffer as CSV.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::from_reader_with(std::io::Cursor::new(bytes), SheetFormat::Csv)
    }

    /// Parse from a file path in the given format.
    pub fn read_file<P: AsRef<std::path::Path>>(
        path: P,
        format: SheetFormat,
    ) -> Result<Self, Error> {
        let file = std::fs::File::open(path)?;
        Self::from_reader_with(std::io::BufReader::new(file), format)
    }

    /// Write to a file path in the given format.
    pub fn write_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
        format: SheetFormat,
    ) -> Result<(), Error> {
        let file = std::fs::File::create(path)?;
        self.to_writer_with(std::io::BufWriter::new(file), format)
    }
}

impl FromStr for Sheet {
    type Err = Error;

    /// Parse a string as CSV.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

// Header shape: `group`, `key`, then locale codes that parse as BCP 47.
fn parse_header(header: &csv::StringRecord) -> Result<Vec<String>, Error> {
    let mut fields = header.iter().map(str::trim);
    match fields.next() {
        Some(first) if first.eq_ignore_ascii_case("group") => {}
        other => {
            return Err(Error::invalid_header(format!(
                "first column must be `group`, found {:?}",
                other.unwrap_or("")
            )));
        }
    }
    match fields.next() {
        Some(second) if second.eq_ignore_ascii_case("key") => {}
        other => {
            return Err(Error::invalid_header(format!(
                "second column must be `key`, found {:?}",
                other.unwrap_or("")
            )));
        }
    }

    let mut locales = Vec::new();
    for field in fields {
        if field.parse::<LanguageIdentifier>().is_err() {
            return Err(Error::invalid_header(format!(
                "`{}` is not a valid locale code",
                field
            )));
        }
        locales.push(field.to_string());
    }
    Ok(locales)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Cursor;

    #[test]
    fn test_parse_simple_sheet() {
        let content = indoc! {"
            group,key,en,fr
            validation,required,This field is required,Ce champ est requis
            ,welcome,Welcome,
        "};
        let sheet = Sheet::from_str(content).unwrap();

        assert_eq!(sheet.locales, vec!["en", "fr"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.malformed_rows, 0);
        assert_eq!(sheet.rows[0].group, "validation");
        assert_eq!(sheet.rows[0].key, "required");
        assert_eq!(sheet.rows[1].group, "");

        let text = sheet.rows[1].text_map(&sheet.locales);
        assert_eq!(text.len(), 1);
        assert_eq!(text.get("en").unwrap(), "Welcome");
        assert!(!text.contains_key("fr"));
    }

    #[test]
    fn test_parse_tolerates_utf8_bom() {
        let content = "\u{feff}group,key,en\nauth,failed,Failed\n";
        let sheet = Sheet::from_bytes(content.as_bytes()).unwrap();
        assert_eq!(sheet.locales, vec!["en"]);
        assert_eq!(sheet.rows[0].group, "auth");
    }

    #[test]
    fn test_parse_rejects_bad_header() {
        let err = Sheet::from_str("key,group,en\n").unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));

        let err = Sheet::from_str("group,key,not a locale\n").unwrap_err();
        assert!(err.to_string().contains("not a valid locale code"));

        let err = Sheet::from_str("").unwrap_err();
        assert!(err.to_string().contains("sheet is empty"));
    }

    #[test]
    fn test_parse_counts_malformed_rows() {
        let content = indoc! {"
            group,key,en
            auth,failed,Failed
            only-one-cell
            auth,extra,Too,many,cells
        "};
        let sheet = Sheet::from_str(content).unwrap();
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.malformed_rows, 2);
    }

    #[test]
    fn test_short_rows_pad_as_untranslated() {
        let content = "group,key,en,fr\nauth,failed,Failed\n";
        let sheet = Sheet::from_str(content).unwrap();
        assert_eq!(sheet.rows[0].values, vec!["Failed".to_string(), String::new()]);
        assert_eq!(sheet.rows[0].text_map(&sheet.locales).len(), 1);
    }

    #[test]
    fn test_round_trip_csv_and_tsv() {
        let mut sheet = Sheet::new(vec!["en".to_string(), "fr".to_string()]);
        sheet.push_row("validation", "required", vec!["Required".to_string(), "Requis".to_string()]);
        sheet.push_row("", "welcome", vec!["Welcome".to_string()]);

        for format in [SheetFormat::Csv, SheetFormat::Tsv] {
            let mut buf = Vec::new();
            sheet.to_writer_with(&mut buf, format).unwrap();
            let parsed = Sheet::from_reader_with(Cursor::new(buf), format).unwrap();
            assert_eq!(parsed, sheet);
        }
    }
}
