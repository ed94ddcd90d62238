//! Installed-package requirement constraints.
//!
//! Authors may write three kinds of tokens under `requirements.installed`:
//!
//! - `pkg`: the package must be installed (any version), becomes `pkg>=0`;
//! - `~pkg`: the package must not be installed, becomes `pkg==-1`
//!   (version `-1` is how the client reports an absent package);
//! - `pkg<op><version>`: an explicit constraint, kept as written.
//!
//! Because an absent package reports version `-1`, an upper bound such as
//! `pkg<2.0` would also match machines without the package. Every `<`/`<=`
//! constraint therefore gets a `pkg>=0` companion.
//!
//! A package name that itself contains an operator substring cannot be told
//! apart from a constraint; the first operator occurrence is taken as the
//! split point.

use std::fmt;

use thiserror::Error;

/// Requirement translation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequirementError {
    #[error("empty constraint")]
    Empty,

    #[error("constraint `{0}` has no package name")]
    MissingPackage(String),
}

/// Comparison operator of a version constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Operator {
    /// All operators, two-character spellings first so that the longest
    /// match wins at any given position.
    pub const ALL: [Operator; 5] = [Self::Le, Self::Ge, Self::Eq, Self::Lt, Self::Gt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Eq => "==",
        }
    }

    /// Upper bounds also match absent packages and need a presence check.
    pub fn is_upper_bound(&self) -> bool {
        matches!(self, Self::Lt | Self::Le)
    }

    /// Find the first operator in `token`, returning its byte offset.
    fn find(token: &str) -> Option<(usize, Operator)> {
        token.char_indices().find_map(|(idx, _)| {
            let rest = &token[idx..];
            Self::ALL
                .into_iter()
                .find(|op| rest.starts_with(op.as_str()))
                .map(|op| (idx, op))
        })
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An explicit `<package><operator><version>` constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionConstraint {
    pub package: String,
    pub operator: Operator,
    pub version: String,
}

impl VersionConstraint {
    pub fn new(package: impl Into<String>, operator: Operator, version: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            operator,
            version: version.into(),
        }
    }

    /// `package>=0`: installed at any version.
    pub fn installed(package: impl Into<String>) -> Self {
        Self::new(package, Operator::Ge, "0")
    }

    /// `package==-1`: not installed.
    pub fn not_installed(package: impl Into<String>) -> Self {
        Self::new(package, Operator::Eq, "-1")
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.package, self.operator, self.version)
    }
}

/// A token as written by a spec author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementToken {
    /// Bare package name.
    Installed(String),
    /// `~`-prefixed package name.
    NotInstalled(String),
    /// Already explicit; kept verbatim.
    Explicit {
        raw: String,
        constraint: VersionConstraint,
    },
}

impl RequirementToken {
    /// Classify a single token.
    pub fn parse(token: &str) -> Result<Self, RequirementError> {
        if token.is_empty() {
            return Err(RequirementError::Empty);
        }

        match Operator::find(token) {
            Some((idx, operator)) => {
                let package = &token[..idx];
                if package.is_empty() {
                    return Err(RequirementError::MissingPackage(token.to_string()));
                }
                Ok(Self::Explicit {
                    raw: token.to_string(),
                    constraint: VersionConstraint::new(
                        package,
                        operator,
                        &token[idx + operator.as_str().len()..],
                    ),
                })
            }
            None => match token.strip_prefix('~') {
                Some("") => Err(RequirementError::MissingPackage(token.to_string())),
                Some(package) => Ok(Self::NotInstalled(package.to_string())),
                None => Ok(Self::Installed(token.to_string())),
            },
        }
    }
}

/// Expand shorthand tokens into explicit constraints.
///
/// The result holds the explicit tokens in their original order, followed by
/// the expansions of bare names, followed by the `>=0` companions of upper
/// bounds.
pub fn translate_installed<S: AsRef<str>>(installed: &[S]) -> Result<Vec<String>, RequirementError> {
    let tokens = installed
        .iter()
        .map(|t| RequirementToken::parse(t.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut explicit = Vec::with_capacity(tokens.len());
    let mut expanded = Vec::new();
    let mut companions = Vec::new();

    for token in tokens {
        match token {
            RequirementToken::Installed(package) => {
                expanded.push(VersionConstraint::installed(package).to_string());
            }
            RequirementToken::NotInstalled(package) => {
                expanded.push(VersionConstraint::not_installed(package).to_string());
            }
            RequirementToken::Explicit { raw, constraint } => {
                if constraint.operator.is_upper_bound() {
                    companions.push(VersionConstraint::installed(constraint.package).to_string());
                }
                explicit.push(raw);
            }
        }
    }

    explicit.extend(expanded);
    explicit.extend(companions);
    Ok(explicit)
}
