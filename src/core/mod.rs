pub mod aggregate;
pub mod import;
pub mod log;
pub mod record;
pub mod upsert;
