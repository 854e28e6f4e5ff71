use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'; expected one of: {expected}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl UnknownLabel {
    pub fn new(kind: &'static str, value: impl Into<String>, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.into(),
            expected: expected.join(", "),
        }
    }
}
