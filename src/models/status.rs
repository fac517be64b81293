use serde::{Deserialize, Serialize};
use std::fmt;

/// Attendance status of a cadet on a given day.
///
/// Persisted as the single-letter code (`P`, `A`, `R`, `M`, `C`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "A")]
    Absent,
    #[serde(rename = "R")]
    Remarks,
    #[serde(rename = "M")]
    Medical,
    #[serde(rename = "C")]
    Camp,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 5] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Remarks,
        AttendanceStatus::Medical,
        AttendanceStatus::Camp,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "P",
            AttendanceStatus::Absent => "A",
            AttendanceStatus::Remarks => "R",
            AttendanceStatus::Medical => "M",
            AttendanceStatus::Camp => "C",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::Remarks => "Remarks",
            AttendanceStatus::Medical => "Medical",
            AttendanceStatus::Camp => "Camp",
        }
    }

    /// Convert a code or label coming from the CLI (any case) into a status.
    pub fn from_input(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|st| st.code().eq_ignore_ascii_case(s) || st.label().eq_ignore_ascii_case(s))
    }

    pub fn is_present(&self) -> bool {
        matches!(self, AttendanceStatus::Present)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_and_labels() {
        assert_eq!(AttendanceStatus::from_input("p"), Some(AttendanceStatus::Present));
        assert_eq!(AttendanceStatus::from_input("Medical"), Some(AttendanceStatus::Medical));
        assert_eq!(AttendanceStatus::from_input(" c "), Some(AttendanceStatus::Camp));
        assert_eq!(AttendanceStatus::from_input("X"), None);
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&AttendanceStatus::Remarks).unwrap();
        assert_eq!(json, "\"R\"");
    }
}
