use std::fmt;

/// Qualified name for schema object identity.
///
/// Every schema object lives in a module and is keyed by its qualified name in a
/// snapshot. Overloaded functions share a base name and are told apart by a
/// specialized local name (see [`QualifiedName::specialize`]).
///
/// # Examples
///
/// ```
/// use ddlc_core::QualifiedName;
///
/// let f = QualifiedName::new("default", "len");
/// assert_eq!(f.to_string(), "default::len");
///
/// let g = QualifiedName::from_qualified_string("std::math::floor");
/// assert_eq!(g.module, "std::math");
/// assert_eq!(g.name, "floor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    /// Module path (e.g., "default", "std::math"). Empty for unqualified names.
    pub module: String,
    /// Local name within the module.
    pub name: String,
}

/// Separator placed between the escaped base name and each qualifier.
const QUAL_SEPARATOR: char = '_';
/// Escape introducer; never produced unescaped inside a component.
const ESCAPE: char = '~';

impl QualifiedName {
    /// Create a new qualified name.
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Create from a qualified string (e.g., "default::User").
    ///
    /// Splits on the last "::" - the tail is the name, the rest is the module.
    pub fn from_qualified_string(s: &str) -> Self {
        match s.rfind("::") {
            Some(pos) => Self::new(&s[..pos], &s[pos + 2..]),
            None => Self::new("", s),
        }
    }

    /// Check if this name carries no module.
    pub fn is_unqualified(&self) -> bool {
        self.module.is_empty()
    }

    /// Get the local name.
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// The same local name moved into another module.
    pub fn with_module(&self, module: impl Into<String>) -> Self {
        Self::new(module, self.name.clone())
    }

    /// Specialize this name with an ordered list of qualifiers.
    ///
    /// The result stays in the same module. Its local name is the escaped base
    /// name followed by `_<escaped qualifier>` for every qualifier, where escaping
    /// maps `~` to `~~`, `_` to `~u` and `:` to `~c`. The separator never appears
    /// inside an escaped component and the escape is a prefix code, so distinct
    /// qualifier sequences always yield distinct names. Plain identifiers pass
    /// through untouched:
    ///
    /// ```
    /// use ddlc_core::QualifiedName;
    ///
    /// let base = QualifiedName::new("a", "f");
    /// assert_eq!(base.specialize(["int64"]).name, "f_int64");
    /// assert_eq!(base.specialize(["default::User"]).name, "f_default~c~cUser");
    /// ```
    pub fn specialize<I, S>(&self, qualifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut name = String::with_capacity(self.name.len());
        escape_into(&mut name, &self.name);
        for qual in qualifiers {
            name.push(QUAL_SEPARATOR);
            escape_into(&mut name, qual.as_ref());
        }
        Self {
            module: self.module.clone(),
            name,
        }
    }
}

fn escape_into(out: &mut String, component: &str) {
    for ch in component.chars() {
        match ch {
            ESCAPE => {
                out.push(ESCAPE);
                out.push(ESCAPE);
            }
            QUAL_SEPARATOR => {
                out.push(ESCAPE);
                out.push('u');
            }
            ':' => {
                out.push(ESCAPE);
                out.push('c');
            }
            other => out.push(other),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.module.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}::{}", self.module, self.name)
        }
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self::from_qualified_string(s)
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from_qualified_string(&s)
    }
}
