use std::fmt;

/// Error codes for runtime faults.
///
/// All runtime codes live in the E6xxx range, grouped by decade:
/// - E600x: arithmetic
/// - E601x: type errors
/// - E602x: access (variables, fields)
/// - E603x: calls (arity, depth, applicability)
/// - E604x: pattern matching
/// - E606x: capabilities
/// - E6099: uncategorized
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Division by zero
    E6001,
    /// Modulo by zero
    E6002,
    /// Integer overflow
    E6003,
    /// Negative exponent
    E6004,
    /// Index out of bounds
    E6005,
    /// Type mismatch
    E6010,
    /// Value not comparable
    E6011,
    /// Unbound variable
    E6020,
    /// Missing record field
    E6023,
    /// Wrong number of arguments
    E6030,
    /// Call depth limit exceeded
    E6031,
    /// Value is not applicable
    E6032,
    /// No case alternative matched
    E6040,
    /// Capability not registered
    E6060,
    /// Capability has no such method
    E6061,
    /// Capability call failed
    E6062,
    /// Uncategorized runtime error
    E6099,
}

impl ErrorCode {
    /// The code as written in output, e.g. `"E6001"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6020 => "E6020",
            ErrorCode::E6023 => "E6023",
            ErrorCode::E6030 => "E6030",
            ErrorCode::E6031 => "E6031",
            ErrorCode::E6032 => "E6032",
            ErrorCode::E6040 => "E6040",
            ErrorCode::E6060 => "E6060",
            ErrorCode::E6061 => "E6061",
            ErrorCode::E6062 => "E6062",
            ErrorCode::E6099 => "E6099",
        }
    }

    /// One-line description of what the code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E6001 => "division by zero",
            ErrorCode::E6002 => "modulo by zero",
            ErrorCode::E6003 => "integer overflow",
            ErrorCode::E6004 => "negative exponent",
            ErrorCode::E6005 => "index out of bounds",
            ErrorCode::E6010 => "type mismatch",
            ErrorCode::E6011 => "value not comparable",
            ErrorCode::E6020 => "unbound variable",
            ErrorCode::E6023 => "missing record field",
            ErrorCode::E6030 => "wrong number of arguments",
            ErrorCode::E6031 => "call depth limit exceeded",
            ErrorCode::E6032 => "value is not applicable",
            ErrorCode::E6040 => "no case alternative matched",
            ErrorCode::E6060 => "capability not registered",
            ErrorCode::E6061 => "unknown capability method",
            ErrorCode::E6062 => "capability call failed",
            ErrorCode::E6099 => "runtime error",
        }
    }

    /// Arithmetic faults (E600x).
    pub fn is_arithmetic(&self) -> bool {
        self.as_str().starts_with("E600")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
