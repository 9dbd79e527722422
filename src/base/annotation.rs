//! Annotation data attached to declarations, members and parameters.

use std::fmt;
use std::sync::Arc;

/// An annotation with its arguments, preserved verbatim.
///
/// Argument values are kept as source text; the core never evaluates them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Annotation {
    name: Arc<str>,
    args: Vec<(Arc<str>, Arc<str>)>,
}

impl Annotation {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument (`key = value`).
    pub fn with_arg(mut self, key: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Self {
        self.args.push((key.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    pub fn args(&self) -> &[(Arc<str>, Arc<str>)] {
        &self.args
    }

    /// Value of the argument named `key`.
    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// True when the argument is present and spelled `true`.
    pub fn flag(&self, key: &str) -> bool {
        self.arg(key).is_some_and(|v| v.trim() == "true")
    }

    /// Match by qualified name, or by simple name when `name` has no package.
    pub fn is(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.simple_name())?;
        match self.args.as_slice() {
            [] => Ok(()),
            [(key, value)] if key.as_ref() == "value" => write!(f, "({value})"),
            args => {
                f.write_str("(")?;
                for (i, (key, value)) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Last dotted segment of a qualified name.
pub fn simple_name_of(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Compare a qualified name against a wanted name that may be simple.
///
/// `"com.example.Nullable"` matches `"Nullable"` and
/// `"com.example.Nullable"`, but not `"example.Other"`.
pub fn names_match(qualified: &str, wanted: &str) -> bool {
    if qualified == wanted {
        return true;
    }
    if wanted.contains('.') {
        return false;
    }
    simple_name_of(qualified) == wanted
}
