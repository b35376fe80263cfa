use std::collections::BTreeMap;
use std::io::Read;

use csv::{ReaderBuilder, Trim};
use log::debug;

use super::model::{AttributeValue, PointRecord, PointTable};
use crate::error::{MapError, Result};

/// Meuse river heavy-metal samples (155 rows, RD New coordinates).
pub const MEUSE_URL: &str =
    "https://raw.githubusercontent.com/filipkral/meuse/refs/heads/master/meuse.txt";

const X_COLUMN: &str = "x";
const Y_COLUMN: &str = "y";

// ---------------------------------------------------------------------------
// Remote entry-point
// ---------------------------------------------------------------------------

/// Download a CSV table with a single blocking GET and parse it.
///
/// No retry and no fallback: a network failure, a non-2xx status or a
/// malformed body is returned to the caller.
pub fn fetch_csv(url: &str) -> Result<PointTable> {
    debug!("GET {url}");
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let body = response.bytes()?;
    debug!("received {} bytes", body.len());
    read_csv(body.as_ref())
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, `x` and `y` required and
/// numeric, every other column kept as an attribute.
pub fn read_csv<R: Read>(reader: R) -> Result<PointTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let x_idx = column_index(&headers, X_COLUMN)?;
    let y_idx = column_index(&headers, Y_COLUMN)?;

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let rec = result?;
        let row = i + 1;

        let x = parse_coordinate(rec.get(x_idx), row, X_COLUMN)?;
        let y = parse_coordinate(rec.get(y_idx), row, Y_COLUMN)?;

        let mut attributes = BTreeMap::new();
        for (col_idx, value) in rec.iter().enumerate() {
            if col_idx == x_idx || col_idx == y_idx {
                continue;
            }
            attributes.insert(headers[col_idx].clone(), AttributeValue::parse(value));
        }

        records.push(PointRecord { x, y, attributes });
    }

    let column_names = headers
        .into_iter()
        .filter(|h| h != X_COLUMN && h != Y_COLUMN)
        .collect();

    Ok(PointTable::new(column_names, records))
}

fn column_index(headers: &[String], name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| MapError::MissingColumn(name.to_string()))
}

fn parse_coordinate(cell: Option<&str>, row: usize, column: &str) -> Result<f64> {
    let raw = cell.unwrap_or("");
    raw.parse::<f64>().map_err(|_| MapError::DataShape {
        row,
        message: format!("'{column}' value '{raw}' is not a number"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEUSE_HEAD: &str = "\
x,y,cadmium,copper,lead,zinc,elev,dist,om,ffreq,soil,lime,landuse,dist.m
181072,333611,11.7,85,299,1022,7.909,0.00135803,13.6,1,1,1,Ah,50
181025,333558,8.6,81,277,1141,6.983,0.0122243,14,1,1,1,Ah,30
181165,333537,6.5,68,199,640,7.8,0.103029,NA,1,1,1,Ah,150
";

    #[test]
    fn read_csv_parses_meuse_layout() {
        let table = read_csv(MEUSE_HEAD.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.column_names.len(), 12);
        assert_eq!(table.column_names[3], "zinc");
        assert!(!table.has_column("x"));

        let first = &table.records[0];
        assert_eq!(first.x, 181072.0);
        assert_eq!(first.y, 333611.0);
        assert_eq!(first.get("zinc"), Some(&AttributeValue::Integer(1022)));
        assert_eq!(
            first.get("landuse"),
            Some(&AttributeValue::String("Ah".into()))
        );
        assert_eq!(table.records[2].get("om"), Some(&AttributeValue::Null));
    }

    #[test]
    fn read_csv_requires_coordinate_columns() {
        let err = read_csv("lon,y,zinc\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::MissingColumn(c) if c == "x"));
    }

    #[test]
    fn read_csv_rejects_non_numeric_coordinates() {
        let err = read_csv("x,y,zinc\n1,2,3\nabc,4,5\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MapError::DataShape { row: 2, .. }));
    }
}
