//! CSV persistence for the incidence table.
//!
//! Layout: a `Character` header cell followed by every universe, then one line per
//! character with `True`/`False` per universe. Cells are quoted RFC 4180 style when they
//! contain a delimiter, quote or line break.

use crate::constants::{ENTITY_HEADER, FALSE_TOKEN, TRUE_TOKEN};
use crate::error::{CensusError, Result};
use crate::matrix::IncidenceTable;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub fn write_table(path: &Path, table: &IncidenceTable) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let contents = to_csv(table);
    fs::write(path, contents)?;
    info!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "Wrote incidence table"
    );
    Ok(())
}

pub fn read_table(path: &Path) -> Result<IncidenceTable> {
    let contents = fs::read_to_string(path)?;
    let table = from_csv(&contents)?;
    debug!(path = %path.display(), rows = table.row_count(), "Loaded incidence table");
    Ok(table)
}

pub fn to_csv(table: &IncidenceTable) -> String {
    let mut out = String::new();
    let header = std::iter::once(ENTITY_HEADER).chain(table.origins().iter().map(String::as_str));
    push_record(&mut out, header);
    for (name, row) in table.rows() {
        let cells = row.iter().map(|&c| if c { TRUE_TOKEN } else { FALSE_TOKEN });
        push_record(&mut out, std::iter::once(name).chain(cells));
    }
    out
}

pub fn from_csv(contents: &str) -> Result<IncidenceTable> {
    let mut records = parse_records(contents)?.into_iter();

    let (_, header) = records.next().ok_or_else(|| CensusError::Table {
        line: 1,
        message: "missing header".into(),
    })?;
    let mut header = header.into_iter();
    match header.next() {
        Some(first) if first == ENTITY_HEADER => {}
        other => {
            return Err(CensusError::Table {
                line: 1,
                message: format!("expected '{}' as first header cell, found {:?}", ENTITY_HEADER, other),
            })
        }
    }
    let origins: Vec<String> = header.collect();

    let mut entities = Vec::new();
    let mut cells = Vec::new();
    for (line, record) in records {
        if record.len() != origins.len() + 1 {
            return Err(CensusError::Table {
                line,
                message: format!("expected {} cells, found {}", origins.len() + 1, record.len()),
            });
        }
        let mut fields = record.into_iter();
        let name = fields.next().unwrap_or_default();
        let row = fields
            .map(|token| match token.as_str() {
                TRUE_TOKEN => Ok(true),
                FALSE_TOKEN => Ok(false),
                other => Err(CensusError::Table {
                    line,
                    message: format!("'{}' is not {} or {}", other, TRUE_TOKEN, FALSE_TOKEN),
                }),
            })
            .collect::<Result<Vec<bool>>>()?;
        entities.push(name);
        cells.push(row);
    }

    IncidenceTable::from_parts(entities, origins, cells)
}

fn push_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains(&[',', '"', '\r', '\n'][..]) {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out.push_str("\r\n");
}

/// Split CSV text into records, each tagged with the line it starts on.
/// Blank lines between records are ignored.
fn parse_records(contents: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = contents.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                if !record.is_empty() || !field.is_empty() {
                    record.push(std::mem::take(&mut field));
                    records.push((record_line, std::mem::take(&mut record)));
                }
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(CensusError::Table { line: record_line, message: "unterminated quoted field".into() });
    }
    if !record.is_empty() || !field.is_empty() {
        record.push(field);
        records.push((record_line, record));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::CatalogIndex;
    use crate::types::ParsedEntry;

    fn table(entries: &[(&str, &str)]) -> IncidenceTable {
        entries
            .iter()
            .map(|(n, o)| ParsedEntry { name: n.to_string(), origin: o.to_string() })
            .collect::<CatalogIndex>()
            .into_table()
    }

    #[test]
    fn writes_header_and_boolean_tokens() {
        let t = table(&[("A", "X"), ("A", "Y"), ("B", "X")]);
        assert_eq!(to_csv(&t), "Character,X,Y\r\nA,True,True\r\nB,True,False\r\n");
    }

    #[test]
    fn round_trips_awkward_names() {
        let t = table(&[
            ("Hank Pym, Jr.", "Earth-616"),
            ("\"Mad\" Thinker", "Earth-616"),
            ("Iron Man (House of M)", "Earth-58163"),
            ("Plain", "Earth, Alt"),
        ]);
        let back = from_csv(&to_csv(&t)).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.csv");
        let t = table(&[("A", "X"), ("B", "Y"), ("C", "X"), ("C", "Z")]);
        write_table(&path, &t).unwrap();
        let back = read_table(&path).unwrap();
        assert_eq!(back.entities(), t.entities());
        assert_eq!(back.origins(), t.origins());
        assert_eq!(back, t);
    }

    #[test]
    fn accepts_unix_line_endings() {
        let t = from_csv("Character,X\nA,True\nB,False\n").unwrap();
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.cell(1, 0), Some(false));
    }

    #[test]
    fn header_only_is_an_empty_table() {
        let t = from_csv("Character,X,Y\r\n").unwrap();
        assert!(t.is_empty());
        assert_eq!(t.column_count(), 2);
    }

    #[test]
    fn rejects_unknown_tokens() {
        let err = from_csv("Character,X\nA,yes\n").unwrap_err();
        assert!(matches!(err, CensusError::Table { line: 2, .. }));
    }

    #[test]
    fn rejects_short_rows() {
        let err = from_csv("Character,X,Y\nA,True,False\nB,True\n").unwrap_err();
        assert!(matches!(err, CensusError::Table { line: 3, .. }));
    }

    #[test]
    fn rejects_wrong_header() {
        assert!(matches!(from_csv("Name,X\nA,True\n"), Err(CensusError::Table { line: 1, .. })));
        assert!(matches!(from_csv(""), Err(CensusError::Table { line: 1, .. })));
    }

    #[test]
    fn rejects_unterminated_quote() {
        assert!(from_csv("Character,X\n\"A,True\n").is_err());
    }
}
