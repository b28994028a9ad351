use std::fmt;

/// A tree the emitter cannot turn into C#. Emission stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("{node} has an empty name")]
    MissingName { node: &'static str },
    #[error("malformed {node}: {reason}")]
    Malformed { node: &'static str, reason: String },
}

impl EmitError {
    pub(crate) fn malformed(node: &'static str, reason: impl Into<String>) -> Self {
        EmitError::Malformed {
            node,
            reason: reason.into(),
        }
    }
}

/// Member kinds the emitter does not implement. They are written as a
/// placeholder comment and reported instead of failing the pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnsupportedKind {
    Event,
}

impl UnsupportedKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnsupportedKind::Event => "event",
        }
    }

    /// Marker text written in place of the member.
    pub fn marker(&self) -> &'static str {
        match self {
            UnsupportedKind::Event => "<GenerateEvent>",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unsupported {
    pub kind: UnsupportedKind,
    /// Enclosing type; empty when emitted outside any type.
    pub type_name: String,
    pub member_name: String,
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind.as_str(), self.member_name)?;
        if !self.type_name.is_empty() {
            write!(f, " in `{}`", self.type_name)?;
        }
        Ok(())
    }
}
