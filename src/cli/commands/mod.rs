pub mod config;
pub mod db;
pub mod del;
pub mod export;
pub mod get;
pub mod import;
pub mod init;
pub mod leaderboard;
pub mod list;
pub mod log;
pub mod mark;
pub mod report;
pub mod update;
