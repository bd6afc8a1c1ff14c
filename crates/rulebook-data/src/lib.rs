//! Historical data sources.

mod csv_source;

pub use csv_source::CsvDataSource;
