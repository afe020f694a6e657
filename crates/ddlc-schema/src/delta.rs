//! Command trees describing schema changes.
//!
//! A change is a tree: object-level commands ([`ObjectCommand`]) carry an ordered
//! list of children, which are either property assignments
//! ([`AlterObjectProperty`]) or further object commands. Trees are built through
//! [`ObjectCommandBuilder`] and are immutable afterwards.
//!
//! Applying a tree never modifies its input snapshot:
//!
//! ```text
//! Schema::apply(&cmd)
//!   clone snapshot ─► apply_object(root) ─► Ok(new snapshot)
//!                       ├── own effect (create / alter / rename / delete)
//!                       ├── property children, in order
//!                       ├── kind invariants
//!                       └── nested object commands, in order
//! ```
//!
//! The first failure aborts the whole application and the working copy is dropped.

use std::fmt;

use ddlc_core::{DeltaError, QualifiedName, Span};
use tracing::{debug, trace};

use crate::field::Value;
use crate::object::{ObjectKind, SchemaObject};
use crate::schema::Schema;

// ============================================================================
// Command Types
// ============================================================================

/// A node in a command tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Property(AlterObjectProperty),
    Object(ObjectCommand),
}

impl Command {
    /// A leaf command setting `property` to `value`.
    pub fn property(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Command::Property(AlterObjectProperty {
            property: property.into(),
            new_value: value.into(),
        })
    }

    pub fn as_object(&self) -> Option<&ObjectCommand> {
        match self {
            Command::Object(cmd) => Some(cmd),
            Command::Property(_) => None,
        }
    }

    pub fn as_property(&self) -> Option<&AlterObjectProperty> {
        match self {
            Command::Property(prop) => Some(prop),
            Command::Object(_) => None,
        }
    }
}

impl From<AlterObjectProperty> for Command {
    fn from(prop: AlterObjectProperty) -> Self {
        Command::Property(prop)
    }
}

impl From<ObjectCommand> for Command {
    fn from(cmd: ObjectCommand) -> Self {
        Command::Object(cmd)
    }
}

/// Set one field of the enclosing object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterObjectProperty {
    property: String,
    new_value: Value,
}

impl AlterObjectProperty {
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn new_value(&self) -> &Value {
        &self.new_value
    }
}

/// What an object command does to its target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectOp {
    Create,
    Alter,
    Rename { new_name: QualifiedName },
    Delete,
}

impl ObjectOp {
    pub fn keyword(&self) -> &'static str {
        match self {
            ObjectOp::Create => "CREATE",
            ObjectOp::Alter => "ALTER",
            ObjectOp::Rename { .. } => "RENAME",
            ObjectOp::Delete => "DELETE",
        }
    }
}

/// An object-level command with ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectCommand {
    op: ObjectOp,
    kind: ObjectKind,
    name: QualifiedName,
    children: Vec<Command>,
    span: Option<Span>,
}

impl ObjectCommand {
    /// Start building a command on `name`.
    pub fn builder(op: ObjectOp, kind: ObjectKind, name: QualifiedName) -> ObjectCommandBuilder {
        ObjectCommandBuilder {
            op,
            kind,
            name,
            children: Vec::new(),
            span: None,
        }
    }

    pub fn op(&self) -> &ObjectOp {
        &self.op
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// The object the command targets (the old name, for a rename).
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn children(&self) -> &[Command] {
        &self.children
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Property children, in order.
    pub fn properties(&self) -> impl Iterator<Item = &AlterObjectProperty> {
        self.children.iter().filter_map(Command::as_property)
    }

    /// Value assigned to `property` by this command; the last assignment wins.
    pub fn property(&self, property: &str) -> Option<&Value> {
        self.properties()
            .filter(|p| p.property == property)
            .last()
            .map(|p| &p.new_value)
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "    ".repeat(depth);
        write!(
            f,
            "{}{} {} {}",
            indent,
            self.op.keyword(),
            self.kind.name().to_ascii_uppercase(),
            self.name
        )?;
        if let ObjectOp::Rename { new_name } = &self.op {
            write!(f, " TO {}", new_name)?;
        }
        if self.children.is_empty() {
            return f.write_str(";");
        }
        f.write_str(" {\n")?;
        for child in &self.children {
            match child {
                Command::Property(prop) => writeln!(
                    f,
                    "{}    SET {} := {};",
                    indent, prop.property, prop.new_value
                )?,
                Command::Object(cmd) => {
                    cmd.fmt_indented(f, depth + 1)?;
                    f.write_str("\n")?;
                }
            }
        }
        write!(f, "{}}};", indent)
    }
}

impl fmt::Display for ObjectCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Property(prop) => write!(f, "SET {} := {};", prop.property, prop.new_value),
            Command::Object(cmd) => fmt::Display::fmt(cmd, f),
        }
    }
}

/// Builder for [`ObjectCommand`]s.
#[derive(Debug, Clone)]
pub struct ObjectCommandBuilder {
    op: ObjectOp,
    kind: ObjectKind,
    name: QualifiedName,
    children: Vec<Command>,
    span: Option<Span>,
}

impl ObjectCommandBuilder {
    /// Append a child command.
    pub fn add(&mut self, child: impl Into<Command>) -> &mut Self {
        self.children.push(child.into());
        self
    }

    /// Append a property command.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.add(Command::property(property, value))
    }

    /// Record the source location of the statement this command came from.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn build(self) -> Command {
        Command::Object(ObjectCommand {
            op: self.op,
            kind: self.kind,
            name: self.name,
            children: self.children,
            span: self.span,
        })
    }
}

// ============================================================================
// Application
// ============================================================================

/// Apply `command` to `schema`, returning the resulting snapshot.
pub fn apply(command: &Command, schema: &Schema) -> Result<Schema, DeltaError> {
    schema.apply(command)
}

impl Schema {
    /// Apply a command tree, returning the resulting snapshot.
    ///
    /// `self` is never modified; on error no partial result is produced.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn apply(&self, command: &Command) -> Result<Schema, DeltaError> {
        let mut working = self.clone();
        match command {
            Command::Object(cmd) => apply_object(&mut working, cmd)?,
            Command::Property(prop) => {
                return Err(DeltaError::InvalidCommand {
                    detail: format!(
                        "property command for '{}' has no enclosing object command",
                        prop.property
                    ),
                    span: None,
                });
            }
        }
        Ok(working)
    }
}

fn apply_object(schema: &mut Schema, cmd: &ObjectCommand) -> Result<(), DeltaError> {
    debug!(
        op = cmd.op.keyword(),
        kind = cmd.kind.name(),
        name = %cmd.name,
        children = cmd.children.len(),
        "applying object command"
    );

    match &cmd.op {
        ObjectOp::Create => {
            if schema.contains(&cmd.name) {
                return Err(DeltaError::DuplicateObject {
                    kind: cmd.kind.name(),
                    name: cmd.name.to_string(),
                    span: cmd.span,
                });
            }
            let mut object = SchemaObject::new(cmd.kind, cmd.name.clone());
            apply_properties(&mut object, cmd)?;
            cmd.kind.validate(&object, cmd.span)?;
            schema.insert(object);
        }
        ObjectOp::Alter => {
            let mut object = lookup(schema, cmd)?.clone();
            apply_properties(&mut object, cmd)?;
            cmd.kind.validate(&object, cmd.span)?;
            schema.insert(object);
        }
        ObjectOp::Rename { new_name } => {
            lookup(schema, cmd)?;
            if *new_name != cmd.name && schema.contains(new_name) {
                return Err(DeltaError::DuplicateObject {
                    kind: cmd.kind.name(),
                    name: new_name.to_string(),
                    span: cmd.span,
                });
            }
            let mut object = schema.remove(&cmd.name).ok_or_else(|| not_found(cmd))?;
            object.set_name(new_name.clone());
            apply_properties(&mut object, cmd)?;
            cmd.kind.validate(&object, cmd.span)?;
            schema.insert(object);
        }
        ObjectOp::Delete => {
            if let Some(prop) = cmd.properties().next() {
                return Err(DeltaError::InvalidCommand {
                    detail: format!(
                        "cannot set '{}' on {} '{}' while deleting it",
                        prop.property,
                        cmd.kind.name(),
                        cmd.name
                    ),
                    span: cmd.span,
                });
            }
            lookup(schema, cmd)?;
            schema.remove(&cmd.name);
        }
    }

    for child in cmd.children.iter().filter_map(Command::as_object) {
        apply_object(schema, child)?;
    }
    Ok(())
}

fn lookup<'s>(schema: &'s Schema, cmd: &ObjectCommand) -> Result<&'s SchemaObject, DeltaError> {
    schema
        .get(&cmd.name)
        .filter(|o| o.kind() == cmd.kind)
        .ok_or_else(|| not_found(cmd))
}

fn not_found(cmd: &ObjectCommand) -> DeltaError {
    DeltaError::ObjectNotFound {
        kind: cmd.kind.name(),
        name: cmd.name.to_string(),
        span: cmd.span,
    }
}

fn apply_properties(object: &mut SchemaObject, cmd: &ObjectCommand) -> Result<(), DeltaError> {
    for prop in cmd.properties() {
        trace!(
            name = %cmd.name,
            property = %prop.property,
            value = %prop.new_value,
            "setting property"
        );
        object
            .set(&prop.property, prop.new_value.clone())
            .map_err(|e| DeltaError::field(e, cmd.span))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::TypedList;
    use crate::function::fields;
    use ddlc_core::{FieldError, TypeRef};

    fn name(s: &str) -> QualifiedName {
        QualifiedName::from_qualified_string(s)
    }

    fn create_f_int64() -> Command {
        let mut b = ObjectCommand::builder(ObjectOp::Create, ObjectKind::Function, name("default::f_int64"));
        b.set(fields::PARAMNAMES, Value::Seq(vec!["x".into()]))
            .set(fields::PARAMTYPES, Value::Seq(vec![TypeRef::scalar("int64").into()]))
            .set(fields::PARAMTYPEMODS, Value::Seq(vec!["SINGLETON".into()]))
            .set(fields::PARAMKINDS, Value::Seq(vec!["POSITIONAL".into()]))
            .set(fields::RETURN_TYPE, TypeRef::scalar("int64"));
        b.with_span(Span::new(1, 1, 6)).build()
    }

    fn simple(op: ObjectOp, target: &str) -> Command {
        ObjectCommand::builder(op, ObjectKind::Function, name(target)).build()
    }

    #[test]
    fn create_then_lookup() {
        let schema = Schema::new().apply(&create_f_int64()).unwrap();
        let f = schema.get_function(&name("default::f_int64")).unwrap();
        assert_eq!(f.param_names(), ["x".to_string()]);
        assert_eq!(f.return_type(), Some(&TypeRef::scalar("int64")));
    }

    #[test]
    fn duplicate_create_leaves_snapshot_unchanged() {
        let schema = Schema::new().apply(&create_f_int64()).unwrap();
        let err = schema.apply(&create_f_int64()).unwrap_err();
        assert_eq!(
            err,
            DeltaError::DuplicateObject {
                kind: "function",
                name: "default::f_int64".into(),
                span: Some(Span::new(1, 1, 6)),
            }
        );
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn alter_missing_object_fails() {
        let schema = Schema::new();
        let err = schema
            .apply(&simple(ObjectOp::Alter, "default::f_int64"))
            .unwrap_err();
        assert!(matches!(err, DeltaError::ObjectNotFound { .. }));
        assert!(schema.is_empty());
    }

    #[test]
    fn alter_updates_fields() {
        let schema = Schema::new().apply(&create_f_int64()).unwrap();
        let mut b = ObjectCommand::builder(ObjectOp::Alter, ObjectKind::Function, name("default::f_int64"));
        b.set(fields::LANGUAGE, "sql").set(fields::CODE, "SELECT $1");
        let altered = schema.apply(&b.build()).unwrap();

        let f = altered.get_function(&name("default::f_int64")).unwrap();
        assert_eq!(f.code(), Some("SELECT $1"));
        assert!(schema.get_function(&name("default::f_int64")).unwrap().code().is_none());
    }

    #[test]
    fn failing_property_is_all_or_nothing() {
        let schema = Schema::new().apply(&create_f_int64()).unwrap();
        let mut b = ObjectCommand::builder(ObjectOp::Alter, ObjectKind::Function, name("default::f_int64"));
        b.set(fields::CODE, "SELECT 1").set(fields::AGGREGATE, "yes");
        let err = schema.apply(&b.with_span(Span::new(7, 3, 5)).build()).unwrap_err();
        assert!(matches!(
            err,
            DeltaError::Field {
                source: FieldError::TypeCoercion { .. },
                ..
            }
        ));
        assert_eq!(err.span(), Some(Span::new(7, 3, 5)));
        assert!(schema.get_function(&name("default::f_int64")).unwrap().code().is_none());
    }

    #[test]
    fn rename_preserves_fields() {
        let schema = Schema::new().apply(&create_f_int64()).unwrap();
        let rename = simple(
            ObjectOp::Rename {
                new_name: name("other::f_int64"),
            },
            "default::f_int64",
        );
        let renamed = schema.apply(&rename).unwrap();
        assert!(!renamed.contains(&name("default::f_int64")));
        let before = schema.get(&name("default::f_int64")).unwrap();
        let after = renamed.get(&name("other::f_int64")).unwrap();
        assert!(before.fields().eq(after.fields()));
    }

    #[test]
    fn rename_onto_existing_name_fails() {
        let schema = Schema::new()
            .apply(&create_f_int64())
            .and_then(|s| s.apply(&simple(ObjectOp::Create, "default::g_int64")))
            .unwrap();
        let rename = simple(
            ObjectOp::Rename {
                new_name: name("default::g_int64"),
            },
            "default::f_int64",
        );
        assert!(matches!(
            schema.apply(&rename),
            Err(DeltaError::DuplicateObject { .. })
        ));
    }

    #[test]
    fn delete_restores_empty_snapshot() {
        let empty = Schema::new();
        let created = empty.apply(&create_f_int64()).unwrap();
        let deleted = created
            .apply(&simple(ObjectOp::Delete, "default::f_int64"))
            .unwrap();
        assert_eq!(deleted, empty);
        assert!(matches!(
            deleted.apply(&simple(ObjectOp::Delete, "default::f_int64")),
            Err(DeltaError::ObjectNotFound { .. })
        ));
    }

    #[test]
    fn delete_rejects_property_children() {
        let schema = Schema::new().apply(&create_f_int64()).unwrap();
        let mut b = ObjectCommand::builder(ObjectOp::Delete, ObjectKind::Function, name("default::f_int64"));
        b.set(fields::CODE, "x");
        assert!(matches!(
            schema.apply(&b.build()),
            Err(DeltaError::InvalidCommand { .. })
        ));
    }

    #[test]
    fn nested_commands_apply_after_parent() {
        let mut b = ObjectCommand::builder(ObjectOp::Create, ObjectKind::Function, name("default::f"));
        b.add(simple(
            ObjectOp::Rename {
                new_name: name("default::g"),
            },
            "default::f",
        ));
        let schema = Schema::new().apply(&b.build()).unwrap();
        assert!(schema.contains(&name("default::g")));
        assert!(!schema.contains(&name("default::f")));
    }

    #[test]
    fn bare_property_command_is_invalid() {
        let err = Schema::new()
            .apply(&Command::property(fields::CODE, "x"))
            .unwrap_err();
        assert!(matches!(err, DeltaError::InvalidCommand { .. }));
    }

    #[test]
    fn invariant_violation_is_reported() {
        let mut b = ObjectCommand::builder(ObjectOp::Create, ObjectKind::Function, name("default::f"));
        b.set(fields::PARAMNAMES, Value::Seq(vec!["x".into()]));
        assert!(matches!(
            Schema::new().apply(&b.build()),
            Err(DeltaError::MalformedSignature { .. })
        ));
    }

    #[test]
    fn last_property_assignment_wins() {
        let mut b = ObjectCommand::builder(ObjectOp::Alter, ObjectKind::Function, name("default::f"));
        b.set(fields::CODE, "a").set(fields::CODE, "b");
        let cmd = b.build();
        let obj = cmd.as_object().unwrap();
        assert_eq!(obj.property(fields::CODE), Some(&Value::from("b")));
        assert_eq!(obj.properties().count(), 2);
    }

    #[test]
    fn display_renders_tree() {
        let mut b = ObjectCommand::builder(ObjectOp::Create, ObjectKind::Function, name("default::f_int64"));
        b.set(fields::PARAMNAMES, Value::List(TypedList::Str(vec!["x".into()])))
            .set(fields::AGGREGATE, false)
            .add(simple(
                ObjectOp::Rename {
                    new_name: name("default::g_int64"),
                },
                "default::f_int64",
            ));
        assert_eq!(
            b.build().to_string(),
            "CREATE FUNCTION default::f_int64 {\n    SET paramnames := ['x'];\n    SET aggregate := false;\n    RENAME FUNCTION default::f_int64 TO default::g_int64;\n};"
        );
    }
}
