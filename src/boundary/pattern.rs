use super::{clean_blocks, BoundaryDetector};
use crate::error::Result;
use regex::Regex;

/// Splits on every match of a regular expression
#[derive(Debug, Clone)]
pub struct PatternBoundary {
    pattern: Regex,
}

impl PatternBoundary {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl BoundaryDetector for PatternBoundary {
    fn blocks<'a>(&self, text: &'a str) -> Vec<&'a str> {
        clean_blocks(self.pattern.split(text))
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

/// Splits on a literal delimiter string
#[derive(Debug, Clone)]
pub struct DelimiterBoundary {
    delimiter: String,
}

impl DelimiterBoundary {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }
}

impl BoundaryDetector for DelimiterBoundary {
    fn blocks<'a>(&self, text: &'a str) -> Vec<&'a str> {
        if self.delimiter.is_empty() {
            return clean_blocks(std::iter::once(text));
        }
        clean_blocks(text.split(self.delimiter.as_str()))
    }

    fn name(&self) -> &str {
        "delimiter"
    }
}

/// Every line is its own block
#[derive(Debug, Clone, Copy, Default)]
pub struct LineBoundary;

impl BoundaryDetector for LineBoundary {
    fn blocks<'a>(&self, text: &'a str) -> Vec<&'a str> {
        clean_blocks(text.lines())
    }

    fn name(&self) -> &str {
        "line"
    }
}
