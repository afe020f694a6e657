//! Compilation context: module aliases and the schema snapshot being compiled against.

use ddlc_core::QualifiedName;
use ddlc_schema::Schema;
use rustc_hash::FxHashMap;

/// Module that unqualified names belong to when no other default is configured.
pub const DEFAULT_MODULE: &str = "default";

/// Module holding the builtin types.
pub const STD_MODULE: &str = "std";

/// Module alias table plus the default module for unqualified names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleAliases {
    default_module: String,
    aliases: FxHashMap<String, String>,
}

impl ModuleAliases {
    pub fn new(default_module: impl Into<String>) -> Self {
        Self {
            default_module: default_module.into(),
            aliases: FxHashMap::default(),
        }
    }

    /// Add `alias` as another name for `module`.
    pub fn with_alias(mut self, alias: impl Into<String>, module: impl Into<String>) -> Self {
        self.insert(alias, module);
        self
    }

    pub fn insert(&mut self, alias: impl Into<String>, module: impl Into<String>) {
        self.aliases.insert(alias.into(), module.into());
    }

    pub fn default_module(&self) -> &str {
        &self.default_module
    }

    /// The module a written module name refers to.
    ///
    /// `None` is the default module; an alias maps to its target; anything else
    /// is taken literally.
    pub fn resolve_module<'a>(&'a self, written: Option<&'a str>) -> &'a str {
        match written {
            None => &self.default_module,
            Some(module) => self.aliases.get(module).map_or(module, String::as_str),
        }
    }

    /// Qualify `name` as written with an optional module.
    pub fn qualify(&self, module: Option<&str>, name: &str) -> QualifiedName {
        QualifiedName::new(self.resolve_module(module), name)
    }
}

impl Default for ModuleAliases {
    fn default() -> Self {
        Self::new(DEFAULT_MODULE)
    }
}

/// Everything a statement is compiled against.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext<'a> {
    pub modaliases: &'a ModuleAliases,
    pub schema: &'a Schema,
}

impl<'a> CommandContext<'a> {
    pub fn new(modaliases: &'a ModuleAliases, schema: &'a Schema) -> Self {
        Self { modaliases, schema }
    }
}
