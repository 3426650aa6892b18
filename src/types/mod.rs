pub mod columns;
pub mod field_value;
pub mod fill_strategy;
pub mod identifier;
pub mod period;
pub mod record;
