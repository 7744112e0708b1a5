//! Price files and the file-backed price source.

use std::path::{Path, PathBuf};

use replica_core::prelude::*;
use serde::Deserialize;
use tracing::{debug, info};

use crate::csv_io::{
    create_writer, normalize_headers, open_reader, parse_date, parse_err, write_err,
};

/// One row of a price file. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    date: String,
    symbol: String,
    close: Option<f64>,
}

/// Reads a `date,symbol,close` file.
///
/// Header names are matched case-insensitively, so `Close` is accepted, and
/// extra columns are ignored. Rows with an empty close are skipped; repeated
/// `(date, symbol)` pairs keep the first row.
///
/// # Errors
///
/// `ReplicaError::MissingColumn` if a required column is absent,
/// `ReplicaError::Parse` for malformed cells and `ReplicaError::InvalidPrice`
/// for non-positive closes.
pub fn read_prices(path: impl AsRef<Path>) -> ReplicaResult<PriceTable> {
    let path = path.as_ref();
    let mut reader = open_reader(path)?;
    normalize_headers(&mut reader, path, &["date", "symbol", "close"])?;

    let mut points = Vec::new();
    let mut blank = 0usize;
    for (i, result) in reader.deserialize().enumerate() {
        let line = i + 2;
        let record: PriceRecord = result.map_err(|e| parse_err(path, line, e))?;
        let Some(close) = record.close.filter(|c| !c.is_nan()) else {
            blank += 1;
            continue;
        };
        let date = parse_date(&record.date).map_err(|e| parse_err(path, line, e))?;
        points.push(PricePoint::new(date, record.symbol, close));
    }

    if blank > 0 {
        debug!(path = %path.display(), blank, "skipped rows without a close");
    }
    let table = PriceTable::from_points(points)?;
    info!(
        path = %path.display(),
        rows = table.len(),
        symbols = table.symbols().len(),
        "prices loaded"
    );
    Ok(table)
}

/// Writes a `date,symbol,close` file.
pub fn write_prices(path: impl AsRef<Path>, prices: &PriceTable) -> ReplicaResult<()> {
    let path = path.as_ref();
    let mut writer = create_writer(path)?;
    writer
        .write_record(["date", "symbol", "close"])
        .map_err(|e| write_err(path, e))?;
    for p in prices.points() {
        writer
            .write_record([p.date.to_string(), p.symbol.to_string(), p.close.to_string()])
            .map_err(|e| write_err(path, e))?;
    }
    writer.flush()?;
    Ok(())
}

/// A [`PriceSource`] backed by a price file loaded once at construction.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    path: PathBuf,
    prices: PriceTable,
}

impl CsvPriceSource {
    /// Loads the price file at `path`.
    pub fn open(path: impl AsRef<Path>) -> ReplicaResult<Self> {
        let path = path.as_ref().to_path_buf();
        let prices = read_prices(&path)?;
        Ok(Self { path, prices })
    }

    /// Every loaded price.
    #[must_use]
    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }
}

impl PriceSource for CsvPriceSource {
    fn name(&self) -> &str {
        self.path.to_str().unwrap_or("csv")
    }

    fn fetch_history(
        &self,
        symbol: &Symbol,
        start: Date,
        end: Date,
    ) -> ReplicaResult<Vec<PricePoint>> {
        let history: Vec<PricePoint> = self
            .prices
            .points()
            .iter()
            .filter(|p| &p.symbol == symbol && p.date >= start && p.date <= end)
            .cloned()
            .collect();
        if history.is_empty() && !self.prices.symbols().contains(symbol) {
            return Err(ReplicaError::data(format!(
                "{symbol} not found in {}",
                self.path.display()
            )));
        }
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 3, day).unwrap()
    }

    #[test]
    fn test_read_yahoo_style_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.csv");
        fs::write(
            &path,
            "symbol,date,open,Close,volume\n\
             AAPL,2024-03-25 00:00:00-04:00,170.0,170.85,100\n\
             AAPL,2024-03-26 00:00:00-04:00,171.0,169.71,100\n\
             AAPL,2024-03-26 00:00:00-04:00,171.0,1.0,100\n\
             MSFT,2024-03-25,420.0,,100\n",
        )
        .unwrap();

        let table = read_prices(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.points()[1].close, 169.71);
        assert_eq!(table.symbols(), vec![Symbol::from("AAPL")]);
    }

    #[test]
    fn test_missing_close_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.csv");
        fs::write(&path, "date,symbol,open\n2024-03-25,AAPL,1.0\n").unwrap();
        let err = read_prices(&path).unwrap_err();
        assert!(matches!(err, ReplicaError::MissingColumn { ref column, .. } if column == "close"));
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn test_upper_case_headers_and_bad_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prices.csv");
        fs::write(&path, "DATE,Symbol,CLOSE\n2024-03-25,KO,60.1\n2024-03-26,KO,\n").unwrap();
        let table = read_prices(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.points()[0].symbol, Symbol::from("KO"));

        fs::write(&path, "date,symbol,close\n2024-03-25,KO,60.1\n2024-03-26,KO,n/a\n").unwrap();
        let err = read_prices(&path).unwrap_err();
        assert!(matches!(err, ReplicaError::Parse { .. }));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_prices("/nonexistent/prices.csv").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_write_then_source_filters_by_range() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/prices.csv");
        let table = PriceTable::from_points(vec![
            PricePoint::new(d(1), "A", 10.0),
            PricePoint::new(d(2), "A", 11.0),
            PricePoint::new(d(3), "A", 12.0),
            PricePoint::new(d(1), "B", 5.0),
        ])
        .unwrap();
        write_prices(&path, &table).unwrap();

        let source = CsvPriceSource::open(&path).unwrap();
        let history = source.fetch_history(&Symbol::from("A"), d(2), d(3)).unwrap();
        assert_eq!(history.len(), 2);
        assert!(source.fetch_history(&Symbol::from("ZZZ"), d(1), d(3)).is_err());
        assert!(source
            .fetch_history(&Symbol::from("B"), d(2), d(3))
            .unwrap()
            .is_empty());
    }
}
