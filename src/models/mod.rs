pub mod candidate;
pub mod filter;
pub mod key;
pub mod record;
pub mod status;
pub mod summary;

pub use candidate::{AttendancePatch, Candidate, NewAttendance, RowIssue};
pub use filter::AttendanceFilter;
pub use key::AttendanceKey;
pub use record::AttendanceRecord;
pub use status::AttendanceStatus;
pub use summary::{AttendanceReport, AttendanceSummary};
