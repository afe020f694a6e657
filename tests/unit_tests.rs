//! Integration tests for the DDL pipeline using `execute` as the entry point.
//!
//! These tests build statements with `AstBuilder`, compile them against a
//! snapshot and check the resulting snapshot (or the error).

use ddlc::compile_create;
use ddlc::prelude::*;
use ddlc::schema::TypedList;
use proptest::prelude::*;

fn name(s: &str) -> QualifiedName {
    QualifiedName::from_qualified_string(s)
}

fn run(stmt: DdlStatement<'_>, schema: &Schema) -> Result<Schema, DdlError> {
    ddlc::execute(&stmt, &ModuleAliases::default(), schema)
}

// =============================================================================
// Create / Delete
// =============================================================================

#[test]
fn test_create_then_drop_restores_snapshot() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let params = [b.param("x", b.type_name("int64"))];

    let empty = Schema::new();
    let created = run(
        DdlStatement::CreateFunction(b.create_function("f", &params, b.type_name("int64"))),
        &empty,
    )
    .unwrap();
    assert!(created.contains(&name("default::f_int64")));

    let dropped = run(DdlStatement::DropFunction(b.drop_function("f", &params)), &created).unwrap();
    assert_eq!(dropped, empty);
}

#[test]
fn test_overloads_coexist() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let statements = [
        DdlStatement::CreateFunction(b.create_function(
            "f",
            &[b.param("x", b.type_name("int64"))],
            b.type_name("str"),
        )),
        DdlStatement::CreateFunction(b.create_function(
            "f",
            &[b.param("x", b.type_name("str"))],
            b.type_name("str"),
        )),
    ];

    let schema = ddlc::execute_all(&statements, &ModuleAliases::default(), &Schema::new()).unwrap();
    assert_eq!(schema.len(), 2);
    let by_int = schema.get_function(&name("default::f_int64")).unwrap();
    let by_str = schema.get_function(&name("default::f_str")).unwrap();
    assert_eq!(by_int.param_types(), [TypeRef::scalar("int64")]);
    assert_eq!(by_str.param_types(), [TypeRef::scalar("str")]);
}

#[test]
fn test_duplicate_create_fails_and_keeps_snapshot() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let create = DdlStatement::CreateFunction(b.create_function(
        "f",
        &[b.param("x", b.type_name("int64"))],
        b.type_name("int64"),
    ));

    let schema = run(create, &Schema::new()).unwrap();
    let before = schema.clone();
    let err = run(create, &schema).unwrap_err();
    assert!(matches!(
        err,
        DdlError::Compile(CompileError::DuplicateSignature { .. })
    ));
    assert_eq!(schema, before);
}

#[test]
fn test_polymorphic_default_fails_before_any_change() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let params = [
        b.param("a", b.type_name("str")),
        b.param("b", b.type_name("std::any")).with_default(b.expr(b.set(&[]))),
    ];
    let create = DdlStatement::CreateFunction(b.create_function("f", &params, b.type_name("str")));

    let err = run(create, &Schema::new()).unwrap_err();
    match err {
        DdlError::Compile(CompileError::PolymorphicDefault { param, ty, .. }) => {
            assert_eq!(param, "b");
            assert_eq!(ty, "any");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_drop_missing_signature_fails() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let create = DdlStatement::CreateFunction(b.create_function(
        "f",
        &[b.param("x", b.type_name("int64"))],
        b.type_name("int64"),
    ));
    let schema = run(create, &Schema::new()).unwrap();

    let drop = DdlStatement::DropFunction(b.drop_function("f", &[b.param("x", b.type_name("str"))]));
    let err = run(drop, &schema).unwrap_err();
    assert_eq!(err.to_string(), "function 'default::f_str' does not exist at 1:1");
}

// =============================================================================
// Rename / Alter
// =============================================================================

#[test]
fn test_rename_across_modules_preserves_fields() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let params = [b.param("x", b.type_name("int64")).with_default(b.expr(b.int(0)))];
    let mut create = b.create_function("a::f", &params, b.type_name("int64"));
    create.code = Some(b.code(Language::Sql, "SELECT $1"));

    let schema = run(DdlStatement::CreateFunction(create), &Schema::new()).unwrap();
    let renamed = run(
        DdlStatement::RenameFunction(b.rename_function("a::f", &params, "b::f")),
        &schema,
    )
    .unwrap();

    assert!(!renamed.contains(&name("a::f_int64")));
    let before = schema.get(&name("a::f_int64")).unwrap();
    let after = renamed.get(&name("b::f_int64")).unwrap();
    assert!(before.fields().eq(after.fields()));
}

#[test]
fn test_alter_missing_function_fails_and_keeps_snapshot() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let schema = Schema::new();
    let alter = DdlStatement::AlterFunction(b.alter_function(
        "f",
        &[b.param("x", b.type_name("int64"))],
        &[b.set_field("code", b.string("SELECT 1"))],
    ));

    let err = run(alter, &schema).unwrap_err();
    assert!(matches!(
        err,
        DdlError::Delta(DeltaError::ObjectNotFound { .. })
    ));
    assert!(schema.is_empty());
}

#[test]
fn test_alter_switches_implementation() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let params = [b.param("x", b.type_name("str"))];
    let mut create = b.create_function("f", &params, b.type_name("str"));
    create.code = Some(b.from_function(Language::Sql, "upper"));

    let alter = b.alter_function(
        "f",
        &params,
        &[
            b.set_field("from_function", b.set(&[])),
            b.set_field("code", b.string("SELECT upper($1)")),
        ],
    );
    let statements = [
        DdlStatement::CreateFunction(create),
        DdlStatement::AlterFunction(alter),
    ];
    let schema = ddlc::execute_all(&statements, &ModuleAliases::default(), &Schema::new()).unwrap();

    let f = schema.get_function(&name("default::f_str")).unwrap();
    assert_eq!(f.from_function(), None);
    assert_eq!(f.code(), Some("SELECT upper($1)"));
    assert_eq!(f.language(), Some(Language::Sql));
}

#[test]
fn test_alter_to_both_code_and_delegate_is_malformed() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let mut create = b.create_function("f", &[], b.type_name("str"));
    create.code = Some(b.code(Language::Sql, "SELECT 'x'"));
    let schema = run(DdlStatement::CreateFunction(create), &Schema::new()).unwrap();

    let alter = b.alter_function("f", &[], &[b.set_field("from_function", b.string("now"))]);
    let err = run(DdlStatement::AlterFunction(alter), &schema).unwrap_err();
    assert!(matches!(
        err,
        DdlError::Delta(DeltaError::MalformedSignature { .. })
    ));
}

#[test]
fn test_alter_type_error_reports_statement_location() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let schema = run(
        DdlStatement::CreateFunction(b.create_function("f", &[], b.type_name("str"))),
        &Schema::new(),
    )
    .unwrap();

    let alter = b
        .at(7, 3)
        .alter_function("f", &[], &[b.set_field("aggregate", b.string("yes"))]);
    let err = run(DdlStatement::AlterFunction(alter), &schema).unwrap_err();
    assert!(matches!(
        err,
        DdlError::Delta(DeltaError::Field {
            source: FieldError::TypeCoercion { .. },
            ..
        })
    ));
    assert_eq!(err.span(), Some(Span::new(7, 3, 1)));
    assert!(err.to_string().ends_with(" at 7:3"));
}

#[test]
fn test_alter_empty_set_resets_fields() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let mut create = b.create_function("f", &[], b.type_name("int64"));
    create.aggregate = true;
    create.returning_typemod = TypeModifier::SetOf;
    let schema = run(DdlStatement::CreateFunction(create), &Schema::new()).unwrap();
    let f = schema.get_function(&name("default::f")).unwrap();
    assert!(f.is_aggregate());

    let alter = b.alter_function(
        "f",
        &[],
        &[
            b.set_field("aggregate", b.set(&[])),
            b.set_field("return_typemod", b.set(&[])),
        ],
    );
    let schema = run(DdlStatement::AlterFunction(alter), &schema).unwrap();
    let f = schema.get_function(&name("default::f")).unwrap();
    assert!(!f.is_aggregate());
    assert_eq!(f.return_typemod(), TypeModifier::Singleton);
}

// =============================================================================
// Parameters and names
// =============================================================================

#[test]
fn test_extraction_yields_parallel_sequences() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let params = [
        b.param("a", b.type_name("int64")),
        b.param("opts", b.type_name("json")).with_kind(ParameterKind::NamedOnly),
        b.param("rest", b.type_name("str")).with_kind(ParameterKind::Variadic),
    ];
    let node = b.create_function("f", &params, b.type_name("str"));

    let info = ddlc::extract_parameters(&node, &ModuleAliases::default(), &Schema::new(), true).unwrap();
    assert_eq!(info.len(), 3);
    assert_eq!(info.types.len(), 3);
    assert_eq!(info.typemods.len(), 3);
    assert_eq!(info.kinds.len(), 3);
    assert_eq!(info.defaults.len(), 3);
    assert_eq!(info.variadic, Some(2));

    let err = ddlc::extract_parameters(&node, &ModuleAliases::default(), &Schema::new(), false)
        .unwrap_err();
    assert!(matches!(err, CompileError::InvalidParameterKind { .. }));
}

#[test]
fn test_module_aliases_resolve_names_and_types() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let aliases = ModuleAliases::new("app").with_alias("geo", "geometry");
    let create = b.create_function(
        "geo::area",
        &[b.param("shape", b.type_name("geo::Shape"))],
        b.type_name("float64"),
    );

    let schema = ddlc::execute(&DdlStatement::CreateFunction(create), &aliases, &Schema::new()).unwrap();
    let f = schema
        .get_function(&name("geometry::area_geometry~c~cShape"))
        .unwrap();
    assert_eq!(
        f.param_types(),
        [TypeRef::forward(QualifiedName::new("geometry", "Shape"))]
    );
}

#[test]
fn test_create_command_renders() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let create = b.create_function("f", &[b.param("x", b.type_name("int64"))], b.type_name("int64"));
    let aliases = ModuleAliases::default();
    let schema = Schema::new();
    let cmd = compile_create(&create, &CommandContext::new(&aliases, &schema)).unwrap();

    let rendered = cmd.to_string();
    assert!(rendered.starts_with("CREATE FUNCTION default::f_int64 {\n"));
    assert!(rendered.contains("    SET paramnames := ['x'];\n"));
    assert!(rendered.contains("    SET paramtypes := [int64];\n"));
    assert!(rendered.contains("    SET return_typemod := SINGLETON;\n"));
    assert!(rendered.ends_with("};"));

    let obj = cmd.as_object().unwrap();
    assert_eq!(
        obj.property(fields::PARAMKINDS),
        Some(&Value::List(TypedList::Kind(vec![ParameterKind::Positional])))
    );
}

fn scalar_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

proptest! {
    #[test]
    fn test_distinct_scalar_signatures_never_collide(
        a in prop::collection::vec(scalar_name(), 0..5),
        b in prop::collection::vec(scalar_name(), 0..5),
    ) {
        prop_assume!(a != b);
        let base = QualifiedName::new("default", "f");
        let types = |names: &[String]| names.iter().map(|n| TypeRef::scalar(n.as_str())).collect::<Vec<_>>();
        prop_assert_ne!(
            ddlc::qualify_name(&base, &types(&a)),
            ddlc::qualify_name(&base, &types(&b))
        );
    }
}
