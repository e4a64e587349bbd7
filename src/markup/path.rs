//! A small path language for selecting elements.
//!
//! Supported forms:
//!
//! - `/a/b`: absolute child steps from the document root
//! - `//a`: descendant step, at the start or between other steps
//! - `*`: any element
//! - `w:tr`: exact qualified name
//! - `tr`: local name, matching `tr` as well as `w:tr` or `x:tr`
//! - `*[local-name()='tr']`: local name, explicit form
//!
//! Anything else fails with [`Json2DocError::InvalidPath`].

use std::fmt;
use std::str::FromStr;

use crate::core::Json2DocError;

/// How a step relates to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

/// What a step accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    Exact(String),
    Local(String),
}

impl NameTest {
    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => name == expected.as_str(),
            Self::Local(expected) => local_name(name) == expected.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NameTest,
}

/// A parsed path expression.
///
/// # Examples
///
/// ```rust
/// use json2doc::markup::PathExpr;
///
/// let path: PathExpr = "//*[local-name()='tr']".parse().unwrap();
/// assert!(path.matches(&["w:document", "w:body", "w:tbl", "w:tr"]));
/// assert!(!path.matches(&["w:document", "w:body", "w:p"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpr {
    source: String,
    steps: Vec<Step>,
}

impl PathExpr {
    /// Parse a path expression.
    ///
    /// # Errors
    ///
    /// Returns [`Json2DocError::InvalidPath`] for anything outside the
    /// supported forms.
    pub fn parse(path: &str) -> Result<Self, Json2DocError> {
        let invalid = |reason: &str| Json2DocError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let mut steps = Vec::new();
        let mut rest = path.trim();
        if rest.is_empty() {
            return Err(invalid("path is empty"));
        }

        while !rest.is_empty() {
            let axis = if let Some(after) = rest.strip_prefix("//") {
                rest = after;
                Axis::Descendant
            } else if let Some(after) = rest.strip_prefix('/') {
                rest = after;
                Axis::Child
            } else {
                return Err(invalid("steps must start with '/' or '//'"));
            };

            let end = rest.find('/').unwrap_or(rest.len());
            let (step, remainder) = rest.split_at(end);
            if step.is_empty() {
                return Err(invalid("empty step"));
            }

            let test = parse_name_test(step).map_err(|reason| invalid(&reason))?;
            steps.push(Step {
                axis,
                test,
            });
            rest = remainder;
        }

        Ok(Self {
            source: path.to_string(),
            steps,
        })
    }

    /// Whether an element matches, given its lineage of element names from the
    /// outermost ancestor down to the element itself.
    #[must_use]
    pub fn matches(&self, lineage: &[&str]) -> bool {
        match_steps(&self.steps, lineage)
    }

    /// The expression as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for PathExpr {
    type Err = Json2DocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// The part of a qualified name after the prefix.
#[must_use]
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

fn parse_name_test(step: &str) -> Result<NameTest, String> {
    if step == "*" {
        return Ok(NameTest::Any);
    }

    if let Some(predicate) = step.strip_prefix("*[") {
        let inner = predicate
            .strip_suffix(']')
            .and_then(|p| p.strip_prefix("local-name()"))
            .map(str::trim_start)
            .and_then(|p| p.strip_prefix('='))
            .map(str::trim_start)
            .ok_or_else(|| format!("unsupported predicate in '{step}'"))?;

        let name = ['\'', '"']
            .iter()
            .find_map(|q| inner.strip_prefix(*q).and_then(|n| n.strip_suffix(*q)))
            .ok_or_else(|| format!("local-name() must compare against a quoted name in '{step}'"))?;

        if !is_name(name) || name.contains(':') {
            return Err(format!("'{name}' is not a valid local name"));
        }
        return Ok(NameTest::Local(name.to_string()));
    }

    if !is_name(step) {
        return Err(format!("'{step}' is not a supported step"));
    }

    match step.split_once(':') {
        Some((prefix, local)) if prefix.is_empty() || local.is_empty() || local.contains(':') => {
            Err(format!("'{step}' is not a valid qualified name"))
        }
        Some(_) => Ok(NameTest::Exact(step.to_string())),
        None => Ok(NameTest::Local(step.to_string())),
    }
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
}

/// Match steps against a lineage from the right: the last step is the element
/// itself, earlier steps are its ancestors.
fn match_steps(steps: &[Step], lineage: &[&str]) -> bool {
    match (steps.split_last(), lineage.split_last()) {
        (None, None) => true,
        (None, Some(_)) | (Some(_), None) => false,
        (Some((step, outer_steps)), Some((name, ancestors))) => {
            if !step.test.matches(name) {
                return false;
            }
            match step.axis {
                Axis::Child => match_steps(outer_steps, ancestors),
                Axis::Descendant => {
                    (0..=ancestors.len()).any(|k| match_steps(outer_steps, &ancestors[..k]))
                }
            }
        }
    }
}
