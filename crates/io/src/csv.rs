// CSV-backed workbook: one file per sheet

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sheetclerk_signup::{Cell, RawRow};

use crate::store::{insert_at, StoreError, TabularStore};

const DELIMITERS: [u8; 4] = [b'\t', b';', b',', b'|'];
const SNIFF_LINES: usize = 10;

/// A directory of sheets, each stored as `<name>.csv`.
#[derive(Debug, Clone)]
pub struct Workbook {
    dir: PathBuf,
}

impl Workbook {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// A sheet that may not exist yet (write targets).
    pub fn sheet(&self, name: &str) -> CsvSheet {
        CsvSheet::new(self.dir.join(format!("{name}.csv")))
    }

    /// A sheet the caller reads from; its file must already exist.
    pub fn require_sheet(&self, name: &str) -> Result<CsvSheet, StoreError> {
        let sheet = self.sheet(name);
        if !sheet.path.is_file() {
            return Err(StoreError::Missing {
                sheet: name.to_string(),
                path: sheet.path.display().to_string(),
            });
        }
        Ok(sheet)
    }
}

/// One sheet stored as a CSV file. A missing file reads as an empty sheet and
/// is created on first write. Writes keep the delimiter the file already uses.
#[derive(Debug, Clone)]
pub struct CsvSheet {
    path: PathBuf,
}

impl CsvSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<(Vec<RawRow>, u8), StoreError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok((Vec::new(), b',')),
            Err(e) => return Err(self.read_err(e.to_string())),
        };
        let content = decode_text(bytes, &self.path);
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        let delimiter = sniff_delimiter(content);
        let rows = parse_rows(content, delimiter).map_err(|message| self.read_err(message))?;
        Ok((rows, delimiter))
    }

    fn save(&self, rows: &[RawRow], delimiter: u8) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.write_err(e.to_string()))?;
            }
        }
        write_rows(&self.path, rows, delimiter).map_err(|message| self.write_err(message))?;
        log::debug!("wrote {} rows to {}", rows.len(), self.path.display());
        Ok(())
    }

    fn read_err(&self, message: String) -> StoreError {
        StoreError::Read { path: self.path.display().to_string(), message }
    }

    fn write_err(&self, message: String) -> StoreError {
        StoreError::Write { path: self.path.display().to_string(), message }
    }
}

impl TabularStore for CsvSheet {
    fn read(&self) -> Result<Vec<RawRow>, StoreError> {
        self.load().map(|(rows, _)| rows)
    }

    fn insert_row(&mut self, position: usize, cells: RawRow) -> Result<(), StoreError> {
        let (mut rows, delimiter) = self.load()?;
        insert_at(&mut rows, position, cells);
        self.save(&rows, delimiter)
    }

    fn overwrite(&mut self, rows: Vec<RawRow>) -> Result<(), StoreError> {
        let (_, delimiter) = self.load()?;
        self.save(&rows, delimiter)
    }
}

/// Spreadsheet exports are not always UTF-8; anything else is read as
/// Windows-1252.
fn decode_text(bytes: Vec<u8>, path: &Path) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        log::warn!("{} is not UTF-8, decoding as Windows-1252", path.display());
        encoding_rs::WINDOWS_1252.decode(e.as_bytes()).0.into_owned()
    })
}

/// The delimiter that splits the leading lines into the same number of
/// fields most often. Comma when nothing splits the first line.
fn sniff_delimiter(content: &str) -> u8 {
    let sample = content.lines().take(SNIFF_LINES).collect::<Vec<_>>().join("\n");
    DELIMITERS
        .iter()
        .map(|&delimiter| (delimiter, width_score(&sample, delimiter)))
        .filter(|&(_, score)| score > 0)
        .fold((b',', 0), |best, candidate| if candidate.1 > best.1 { candidate } else { best })
        .0
}

/// Width of the first record times the number of records sharing it; zero
/// when the first record has a single field.
fn width_score(sample: &str, delimiter: u8) -> usize {
    let widths: Vec<usize> = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(sample.as_bytes())
        .records()
        .map(|record| record.map_or(1, |r| r.len()))
        .collect();
    match widths.first() {
        Some(&width) if width > 1 => width * widths.iter().filter(|&&w| w == width).count(),
        _ => 0,
    }
}

fn parse_rows(content: &str, delimiter: u8) -> Result<Vec<RawRow>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| e.to_string())?;
        rows.push(record.iter().map(Cell::text).collect());
    }
    Ok(rows)
}

fn write_rows(path: &Path, rows: &[RawRow], delimiter: u8) -> Result<(), String> {
    // Trailing empties are dropped, so rows can have different field counts.
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|e| e.to_string())?;

    for row in rows {
        let mut record: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        let last_non_empty = record.iter().rposition(|v| !v.is_empty()).map_or(0, |i| i + 1);
        record.truncate(last_non_empty.max(1));
        if record.is_empty() {
            record.push(String::new());
        }
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn row(cells: &[&str]) -> RawRow {
        cells.iter().map(|c| Cell::text(*c)).collect()
    }

    #[test]
    fn missing_sheet_reads_empty() {
        let dir = tempdir().unwrap();
        let sheet = Workbook::open(dir.path()).sheet("Intro Class");
        assert!(sheet.read().unwrap().is_empty());
        assert!(sheet.path().ends_with("Intro Class.csv"));
    }

    #[test]
    fn required_sheet_must_exist() {
        let dir = tempdir().unwrap();
        let workbook = Workbook::open(dir.path().join("nowhere"));
        match workbook.require_sheet("Prices") {
            Err(StoreError::Missing { sheet, path }) => {
                assert_eq!(sheet, "Prices");
                assert!(path.ends_with("Prices.csv"), "path: {}", path);
            }
            other => panic!("expected Missing, got {:?}", other),
        }

        fs::write(dir.path().join("Prices.csv"), ",Cash\n").unwrap();
        assert!(Workbook::open(dir.path()).require_sheet("Prices").is_ok());
    }

    #[test]
    fn overwrite_refuses_unreadable_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("busy.csv");
        fs::create_dir(&path).unwrap();

        let err = CsvSheet::new(&path).overwrite(vec![row(&["x"])]).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }), "got {:?}", err);
        assert!(path.is_dir());
    }

    #[test]
    fn insert_keeps_existing_rows_and_delimiter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.csv");
        fs::write(&path, "Name;Email\nAnn;a@x.com\n").unwrap();

        let mut sheet = CsvSheet::new(&path);
        sheet.insert_row(1, row(&["Bo", "b@x.com"])).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Name;Email\nBo;b@x.com\nAnn;a@x.com\n");
    }

    #[test]
    fn blank_rows_survive_a_round_trip() {
        let dir = tempdir().unwrap();
        let mut sheet = Workbook::open(dir.path()).sheet("t");
        sheet
            .overwrite(vec![row(&["h1", "h2"]), row(&["", ""]), row(&["x", ""])])
            .unwrap();

        let rows = sheet.read().unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].iter().all(Cell::is_blank));
        assert_eq!(rows[2], row(&["x"]));
    }

    #[test]
    fn numbers_are_written_without_fraction() {
        let dir = tempdir().unwrap();
        let mut sheet = Workbook::open(dir.path()).sheet("n");
        sheet.overwrite(vec![vec![Cell::Number(300.0), Cell::Number(2.5)]]).unwrap();
        let content = fs::read_to_string(sheet.path()).unwrap();
        assert_eq!(content, "300,2.5\n");
    }

    #[test]
    fn windows_1252_input_is_decoded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("w.csv");
        fs::write(&path, b"Name,City\nJos\xe9,Montr\xe9al\n").unwrap();

        let rows = CsvSheet::new(&path).read().unwrap();
        assert_eq!(rows[1], row(&["José", "Montréal"]));
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("b.csv");
        fs::write(&path, "\u{feff}Name,Email\n").unwrap();
        let rows = CsvSheet::new(&path).read().unwrap();
        assert_eq!(rows[0], row(&["Name", "Email"]));
    }

    #[test]
    fn sniff_prefers_consistent_delimiter() {
        assert_eq!(sniff_delimiter("a\tb\tc\n1\t2\t3\n"), b'\t');
        assert_eq!(sniff_delimiter("a;b\n1;2\n"), b';');
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3\n"), b',');
        assert_eq!(sniff_delimiter("single\n"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }
}
