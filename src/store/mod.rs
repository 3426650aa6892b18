pub mod error;
pub mod mutation;
pub mod weather_table;
