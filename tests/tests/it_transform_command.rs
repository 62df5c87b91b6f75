//! End-to-end tests for command transformation.

use decli::{DiagnosticsKind, Project, transform_command};
use serde_json::json;

fn project_of(code: &str) -> Project {
    let mut project = Project::new();
    project
        .add_source("cmd.rs", code)
        .expect("source should parse");
    project
}

fn transform(code: &str, name: &str) -> serde_json::Value {
    let project = project_of(code);
    let command = project.command(name).expect("command should be declared");
    let schema = transform_command(&project, command).expect("command should transform");
    serde_json::to_value(&schema).expect("schema should serialize")
}

#[test]
fn command_with_no_parameters_and_no_docs_yields_an_empty_schema() {
    //* Given
    let code = "fn foo() {}";

    //* When
    let rendered = transform(code, "foo");

    //* Then
    assert_eq!(
        rendered,
        json!({
            "name": "foo",
            "description": "",
            "positionals": [],
            "options": [],
            "references": {}
        })
    );
}

#[test]
fn documented_required_parameter_yields_a_full_positional() {
    //* Given
    let code = r#"
/// @param {string} foo - desc for foo
fn cmd(foo: String) {}
"#;

    //* When
    let rendered = transform(code, "cmd");

    //* Then
    assert_eq!(
        rendered["positionals"],
        json!([{
            "name": "foo",
            "properties": {
                "type": "string",
                "description": "desc for foo",
                "demandOption": "true"
            }
        }])
    );
}

#[test]
fn parameters_keep_signature_order_and_partial_docs() {
    //* Given
    let code = r#"
/// @param foo - desc for foo
fn cmd(foo: _, bar: u32) {}
"#;

    //* When
    let rendered = transform(code, "cmd");

    //* Then
    assert_eq!(
        rendered["positionals"],
        json!([
            {
                "name": "foo",
                "properties": {
                    "type": "string",
                    "description": "desc for foo",
                    "demandOption": "true"
                }
            },
            {
                "name": "bar",
                "properties": { "type": "number", "demandOption": "true" }
            }
        ]),
        "an undocumented parameter still resolves, just without a description"
    );
}

#[test]
fn optional_parameter_has_no_demand_option_field() {
    //* Given
    let code = "fn cmd(target: Option<String>) {}";

    //* When
    let rendered = transform(code, "cmd");

    //* Then
    assert_eq!(
        rendered["positionals"],
        json!([{ "name": "target", "properties": { "type": "string" } }])
    );
}

#[test]
fn array_notations_yield_identical_positionals() {
    //* Given
    let vec_form = transform("fn cmd(files: Vec<String>) {}", "cmd");
    let slice_form = transform("fn cmd(files: &[String]) {}", "cmd");

    //* When / Then
    assert_eq!(
        vec_form["positionals"],
        json!([{
            "name": "files",
            "properties": { "type": "string", "array": true, "demandOption": "true" }
        }])
    );
    assert_eq!(
        vec_form["positionals"], slice_form["positionals"],
        "`Vec<T>` and `&[T]` are the same declared array"
    );
}

#[test]
fn enum_parameter_yields_choices_and_a_reference() {
    //* Given
    let mut project = Project::new();
    project
        .add_source("types.rs", "pub enum Level { Debug, Info }")
        .expect("types should parse");
    project
        .add_source("cmd.rs", "fn run(level: Level) {}")
        .expect("command should parse");
    let command = project.command("run").expect("command should be declared");

    //* When
    let schema = transform_command(&project, command).expect("command should transform");
    let rendered = serde_json::to_value(&schema).expect("schema should serialize");

    //* Then
    assert_eq!(
        rendered,
        json!({
            "name": "run",
            "description": "",
            "positionals": [{
                "name": "level",
                "properties": {
                    "choices": ["Level::Debug", "Level::Info"],
                    "demandOption": "true"
                }
            }],
            "options": [],
            "references": {
                "types.rs": {
                    "default": [],
                    "named": [{
                        "name": "Level",
                        "exportKind": "named",
                        "sourceFile": "types.rs"
                    }]
                }
            }
        })
    );
}

#[test]
fn non_pub_enum_is_referenced_as_a_default_export() {
    //* Given
    let mut project = Project::new();
    project
        .add_source("level.rs", "enum Level { Debug }")
        .expect("types should parse");
    project
        .add_source("cmd.rs", "fn run(level: Level) {}")
        .expect("command should parse");
    let command = project.command("run").expect("command should be declared");

    //* When
    let schema = transform_command(&project, command).expect("command should transform");

    //* Then
    let refs = schema
        .references
        .get("level.rs")
        .expect("reference should be keyed by the enum's file");
    assert_eq!(refs.default.len(), 1, "non-pub enums import as the primary export");
    assert!(refs.named.is_empty());
}

#[test]
fn single_member_enum_keeps_a_one_element_choice_list() {
    //* Given
    let code = r#"
pub enum Only { One }
fn run(choice: Only) {}
"#;

    //* When
    let rendered = transform(code, "run");

    //* Then
    assert_eq!(
        rendered["positionals"][0]["properties"]["choices"],
        json!(["Only::One"]),
        "no collapse at one member"
    );
}

#[test]
fn unsupported_parameter_type_aborts_the_transform() {
    //* Given
    let project = project_of("fn run(when: SystemTime) {}");
    let command = project.command("run").expect("command should be declared");

    //* When
    let error =
        transform_command(&project, command).expect_err("SystemTime is not a supported type");

    //* Then
    assert_eq!(error.kind(), DiagnosticsKind::UnsupportedType);
    assert!(
        error.to_string().contains("positional") && error.to_string().contains("SystemTime"),
        "the error names the context and type: {error}"
    );
}

#[test]
fn unsupported_array_element_aborts_the_transform() {
    //* Given
    let project = project_of("fn run(whens: Vec<SystemTime>) {}");
    let command = project.command("run").expect("command should be declared");

    //* When
    let error = transform_command(&project, command)
        .expect_err("arrays only hold supported primitives");

    //* Then
    assert_eq!(error.kind(), DiagnosticsKind::UnsupportedArrayElement);
}

#[test]
fn enum_sharing_the_command_identifier_is_a_name_conflict() {
    //* Given
    let code = r#"
pub enum E { A }
fn E(foo: E) {}
"#;
    let project = project_of(code);
    let command = project.command("E").expect("command should be declared");

    //* When
    let error = transform_command(&project, command)
        .expect_err("`E` would resolve to two different imports");

    //* Then
    assert_eq!(error.kind(), DiagnosticsKind::NameConflict);
}
