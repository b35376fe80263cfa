use std::collections::BTreeMap;
use std::fmt;

use crate::error::{MapError, Result};

// ---------------------------------------------------------------------------
// AttributeValue – a single cell in an attribute column
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Float(f64),
    Integer(i64),
    Bool(bool),
    String(String),
    Null,
}

/// Spellings treated as a missing value, as `pandas.read_csv` does.
const NULL_MARKERS: [&str; 5] = ["", "NA", "NaN", "nan", "null"];

impl AttributeValue {
    /// Guess the type of a raw text cell.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if NULL_MARKERS.contains(&s) {
            return AttributeValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return AttributeValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return AttributeValue::Float(f);
        }
        match s {
            "true" | "TRUE" | "True" => AttributeValue::Bool(true),
            "false" | "FALSE" | "False" => AttributeValue::Bool(false),
            _ => AttributeValue::String(s.to_string()),
        }
    }

    /// Try to interpret the value as an `f64` for colour mapping.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(v) => Some(*v),
            AttributeValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Float(v) => write!(f, "{}", format_float(*v)),
            AttributeValue::Integer(i) => write!(f, "{i}"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::String(s) => write!(f, "{s}"),
            AttributeValue::Null => write!(f, "NaN"),
        }
    }
}

/// Six decimals with trailing zeros trimmed, keeping at least one.
fn format_float(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let s = format!("{v:.6}");
    let trimmed = s.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}

// ---------------------------------------------------------------------------
// PointRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single sample: planar coordinates plus measured attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    /// Attribute columns: column_name → value.
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl PointRecord {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute insertion.
    pub fn with(mut self, column: &str, value: AttributeValue) -> Self {
        self.attributes.insert(column.to_string(), value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&AttributeValue> {
        self.attributes.get(column)
    }
}

// ---------------------------------------------------------------------------
// PointTable – the complete loaded or generated table
// ---------------------------------------------------------------------------

/// Ordered point records with the attribute column order of the source.
#[derive(Debug, Clone, PartialEq)]
pub struct PointTable {
    /// All records, in load / generation order.
    pub records: Vec<PointRecord>,
    /// Attribute column names in source order (excludes x, y).
    pub column_names: Vec<String>,
}

impl PointTable {
    pub fn new(column_names: Vec<String>, records: Vec<PointRecord>) -> Self {
        Self {
            records,
            column_names,
        }
    }

    /// Build a table whose column order is the first-seen order of the records.
    pub fn from_records(records: Vec<PointRecord>) -> Self {
        let mut column_names: Vec<String> = Vec::new();
        for rec in &records {
            for col in rec.attributes.keys() {
                if !column_names.contains(col) {
                    column_names.push(col.clone());
                }
            }
        }
        Self {
            records,
            column_names,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Numeric view of one attribute column; `Null` cells become `None`.
    ///
    /// Fails when the column does not exist or holds a non-numeric cell.
    pub fn column_values(&self, column: &str) -> Result<Vec<Option<f64>>> {
        if !self.has_column(column) {
            return Err(MapError::MissingColumn(column.to_string()));
        }
        self.records
            .iter()
            .enumerate()
            .map(|(row, rec)| match rec.get(column) {
                None | Some(AttributeValue::Null) => Ok(None),
                Some(value) => value.as_f64().map(Some).ok_or_else(|| {
                    MapError::NonNumericValue {
                        column: column.to_string(),
                        row,
                        value: value.to_string(),
                    }
                }),
            })
            .collect()
    }

    /// Printable preview of the first `n` rows.
    pub fn head(&self, n: usize) -> TablePreview<'_> {
        TablePreview { table: self, n }
    }
}

// ---------------------------------------------------------------------------
// TablePreview – `df.head()` style rendering
// ---------------------------------------------------------------------------

pub struct TablePreview<'a> {
    table: &'a PointTable,
    n: usize,
}

impl fmt::Display for TablePreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.table.records.iter().take(self.n);

        let mut header: Vec<String> = vec![String::new(), "x".into(), "y".into()];
        header.extend(self.table.column_names.iter().cloned());

        let mut cells: Vec<Vec<String>> = Vec::new();
        for (i, rec) in rows.enumerate() {
            let mut line = vec![i.to_string(), format_float(rec.x), format_float(rec.y)];
            for col in &self.table.column_names {
                let cell = rec
                    .get(col)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| AttributeValue::Null.to_string());
                line.push(cell);
            }
            cells.push(line);
        }

        let widths: Vec<usize> = (0..header.len())
            .map(|c| {
                cells
                    .iter()
                    .map(|line| line[c].len())
                    .chain(std::iter::once(header[c].len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write_row(f, &header, &widths)?;
        for line in &cells {
            writeln!(f)?;
            write_row(f, line, &widths)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == 0 {
            write!(f, "{cell:<width$}")?;
        } else {
            write!(f, "  {cell:>width$}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> PointTable {
        PointTable::new(
            vec!["zinc".into(), "landuse".into()],
            vec![
                PointRecord::new(181072.0, 333611.0)
                    .with("zinc", AttributeValue::Integer(1022))
                    .with("landuse", AttributeValue::String("Ah".into())),
                PointRecord::new(181025.0, 333558.0)
                    .with("zinc", AttributeValue::Null)
                    .with("landuse", AttributeValue::String("Ah".into())),
            ],
        )
    }

    #[test]
    fn parse_guesses_cell_types() {
        assert_eq!(AttributeValue::parse("12"), AttributeValue::Integer(12));
        assert_eq!(AttributeValue::parse(" 1.5 "), AttributeValue::Float(1.5));
        assert_eq!(AttributeValue::parse("true"), AttributeValue::Bool(true));
        assert_eq!(AttributeValue::parse("NA"), AttributeValue::Null);
        assert_eq!(AttributeValue::parse(""), AttributeValue::Null);
        assert_eq!(
            AttributeValue::parse("Ah"),
            AttributeValue::String("Ah".into())
        );
    }

    #[test]
    fn column_values_maps_nulls_to_none() {
        let table = sample_table();
        let values = table.column_values("zinc").unwrap();
        assert_eq!(values, vec![Some(1022.0), None]);
    }

    #[test]
    fn column_values_rejects_missing_and_text_columns() {
        let table = sample_table();
        assert!(matches!(
            table.column_values("copper"),
            Err(MapError::MissingColumn(c)) if c == "copper"
        ));
        assert!(matches!(
            table.column_values("landuse"),
            Err(MapError::NonNumericValue { row: 0, .. })
        ));
    }

    #[test]
    fn from_records_keeps_first_seen_column_order() {
        let table = PointTable::from_records(vec![
            PointRecord::new(0.0, 0.0).with("z", AttributeValue::Float(1.0)),
            PointRecord::new(1.0, 1.0)
                .with("z", AttributeValue::Float(2.0))
                .with("w", AttributeValue::Integer(3)),
        ]);
        assert_eq!(table.column_names, vec!["z".to_string(), "w".to_string()]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn head_renders_aligned_preview() {
        let table = sample_table();
        let text = table.head(1).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("zinc"));
        assert!(lines[0].contains("landuse"));
        assert!(lines[1].starts_with('0'));
        assert!(lines[1].contains("181072.0"));
        assert!(lines[1].contains("1022"));
        assert_eq!(lines[0].len(), lines[1].len());
    }

    #[test]
    fn float_formatting_trims_zeros() {
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(2.0), "2.0");
        assert_eq!(format_float(0.1234567), "0.123457");
    }
}
