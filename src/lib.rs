mod analysis;
mod cleaning;
mod config;
mod error;
mod persistence;
mod store;
mod types;
mod utils;

#[cfg(test)]
mod test_fixtures;

pub use config::WeatherConfig;
pub use error::{ConfigError, WeatherStoreError};

pub use store::weather_table::WeatherTable;

pub use types::columns;
pub use types::field_value::FieldValue;
pub use types::fill_strategy::{FillStrategy, UnknownFillStrategy};
pub use types::identifier::RecordIdentifier;
pub use types::period::{DateSpan, Month, Period, Year};
pub use types::record::WeatherRecord;

pub use cleaning::dates::parse_dates;
pub use cleaning::missing::{fill_missing, fill_missing_named};
pub use cleaning::normalize::{normalize_column_name, normalize_columns, remove_duplicate_rows};
pub use cleaning::prepare;

pub use analysis::aggregates::{DailyValue, MonthlyValue, PeriodSummary, RegionValue};
pub use analysis::correlation::{pearson, CorrelationMatrix};
pub use analysis::heatwave::{find_heatwaves, Heatwave};
pub use analysis::heavy_rain::HeavyRainDay;

pub use persistence::csv_file::{load_csv, save};

pub use analysis::error::AnalysisError;
pub use cleaning::error::CleaningError;
pub use persistence::error::PersistenceError;
pub use store::error::StoreError;
