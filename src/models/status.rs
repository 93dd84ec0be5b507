use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            _ => None,
        }
    }

    /// Case-insensitive parse of an exact status word.
    pub fn parse(s: &str) -> Option<Self> {
        Self::from_db_str(s.trim().to_lowercase().as_str())
    }

    pub fn from_present_flag(present: bool) -> Self {
        if present {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Absent
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, AttendanceStatus::Present)
    }

    /// Resolve the status of a loosely-typed payload.
    ///
    /// An exact `status` word wins; otherwise the `present` flag decides;
    /// anything else counts as present.
    pub fn normalize(data: &Map<String, Value>) -> Self {
        if let Some(Value::String(s)) = data.get("status")
            && let Some(status) = Self::parse(s)
        {
            return status;
        }

        data.get("present")
            .and_then(truthy)
            .map(Self::from_present_flag)
            .unwrap_or(AttendanceStatus::Present)
    }
}

/// Interpret JSON and CSV spellings of a boolean.
pub(crate) fn truthy(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "y" | "present" => Some(true),
            "false" | "0" | "no" | "n" | "absent" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_db_str())
    }
}
