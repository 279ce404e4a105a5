//! Manifest Domain Models
//!
//! Read-only description of each target function's argument layout, supplied
//! by the upstream analysis tool.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Argument direction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    In,
    Out,
    InOut,
    /// Anything else the manifest carries; never encoded
    Other(String),
}

impl Direction {
    /// Case-insensitive parse; unrecognised text becomes `Other`
    pub fn parse(text: &str) -> Self {
        match text.trim().to_ascii_uppercase().as_str() {
            "IN" => Self::In,
            "OUT" => Self::Out,
            "INOUT" | "IN_OUT" | "IN OUT" => Self::InOut,
            _ => Self::Other(text.to_string()),
        }
    }

    /// Only pure inputs occupy a slot in the encoded buffer
    pub fn is_input(&self) -> bool {
        matches!(self, Self::In)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "IN"),
            Self::Out => write!(f, "OUT"),
            Self::InOut => write!(f, "INOUT"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Slot width inferred from a declared type token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidthHint {
    Bits8,
    Bits16,
    Bits32,
    Bits64,
    /// No width digits in the token; encoded as 4 bytes
    Unspecified,
}

impl WidthHint {
    /// Substring test in the order 64, 32, 16, 8; first hit wins
    ///
    /// `UINT64` -> 8 bytes, `UINT32` -> 4, `CHAR16 *` -> 2, `UINT8` -> 1,
    /// `UINTN` -> 4.
    pub fn from_declared_type(token: &str) -> Self {
        if token.contains("64") {
            Self::Bits64
        } else if token.contains("32") {
            Self::Bits32
        } else if token.contains("16") {
            Self::Bits16
        } else if token.contains('8') {
            Self::Bits8
        } else {
            Self::Unspecified
        }
    }

    pub fn byte_width(self) -> usize {
        match self {
            Self::Bits8 => 1,
            Self::Bits16 => 2,
            Self::Bits32 | Self::Unspecified => 4,
            Self::Bits64 => 8,
        }
    }
}

/// One argument of a target function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDescriptor {
    pub name: String,
    pub direction: Direction,
    /// Declared C type, e.g. `UINT16` or `EFI_IP_ADDRESS *`
    pub declared_type: String,
    /// Name used for this argument inside predicates
    pub backing_variable: String,
}

impl ArgumentDescriptor {
    pub fn new(
        name: impl Into<String>,
        direction: Direction,
        declared_type: impl Into<String>,
        backing_variable: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            direction,
            declared_type: declared_type.into(),
            backing_variable: backing_variable.into(),
        }
    }

    /// IN argument whose backing variable is its own name
    pub fn input(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(name.clone(), Direction::In, declared_type, name)
    }

    pub fn width_hint(&self) -> WidthHint {
        WidthHint::from_declared_type(&self.declared_type)
    }
}

/// Ordered argument layout of one function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionManifest {
    pub function: String,
    pub arguments: Vec<ArgumentDescriptor>,
}

impl FunctionManifest {
    pub fn new(function: impl Into<String>, arguments: Vec<ArgumentDescriptor>) -> Self {
        Self {
            function: function.into(),
            arguments,
        }
    }

    /// IN arguments in manifest order
    pub fn inputs(&self) -> impl Iterator<Item = &ArgumentDescriptor> {
        self.arguments.iter().filter(|a| a.direction.is_input())
    }
}

/// Every function of one analysis run, in manifest order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisManifest {
    pub functions: Vec<FunctionManifest>,
}

impl AnalysisManifest {
    pub fn new(functions: Vec<FunctionManifest>) -> Self {
        Self { functions }
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FunctionManifest> {
        self.functions.iter()
    }
}
