//! Error codes for all engine diagnostics.
//!
//! Format: E#### where the first digit indicates the category:
//! - E1xxx: Malformed class model
//! - E9xxx: Internal consistency faults

use std::fmt;

/// Error codes for all engine diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Malformed model (E1xxx)
    /// Constructor parameter does not name any field
    E1001,
    /// Two constructor parameters name the same field
    E1002,

    // Internal (E9xxx)
    /// Internal consistency fault (e.g. capability set and copy targets disagree)
    E9001,
    /// Synthesis requested for a class without a canonical constructor
    E9002,
}

impl ErrorCode {
    /// All codes, in numeric order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    /// The code as printed, e.g. `E1001`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// One-line description for `--explain`-style lookups.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E1001 => "constructor parameter does not map to any field",
            ErrorCode::E1002 => "constructor parameters map to the same field",
            ErrorCode::E9001 => "internal consistency fault",
            ErrorCode::E9002 => "synthesis requested for a class without a canonical constructor",
        }
    }

    /// Whether this is an internal fault rather than a problem in the input.
    pub fn is_internal(self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
