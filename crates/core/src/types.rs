/// All database primary keys are SQLite `INTEGER PRIMARY KEY`.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Stock levels and recipe amounts, stored as SQLite `REAL`.
pub type Quantity = f64;
