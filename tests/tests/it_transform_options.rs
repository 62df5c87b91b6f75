//! End-to-end tests for options transformation and command/options pairing.

use decli::{DiagnosticsKind, Project, transform_command_with_options, transform_options};
use serde_json::json;

fn project_of(code: &str) -> Project {
    let mut project = Project::new();
    project
        .add_source("opts.rs", code)
        .expect("source should parse");
    project
}

fn transform(code: &str, name: &str) -> serde_json::Value {
    let project = project_of(code);
    let options = project.options(name).expect("options should be declared");
    let schema = transform_options(&project, options).expect("options should transform");
    serde_json::to_value(&schema).expect("schema should serialize")
}

#[test]
fn documented_property_yields_a_full_named_option() {
    //* Given
    let code = r#"
struct Opts {
    /// Number of retries.
    /// @alias r
    /// @default 3
    /// @required
    retries: u32,
}
"#;

    //* When
    let rendered = transform(code, "Opts");

    //* Then
    assert_eq!(
        rendered["options"],
        json!([{
            "name": "retries",
            "properties": {
                "type": "number",
                "description": "Number of retries.",
                "alias": "r",
                "default": 3,
                "demandOption": true
            }
        }]),
        "option requiredness is a boolean literal, unlike positionals"
    );
}

#[test]
fn undocumented_property_carries_only_its_type() {
    //* Given
    let code = "struct Opts { verbose: bool }";

    //* When
    let rendered = transform(code, "Opts");

    //* Then
    assert_eq!(
        rendered["options"],
        json!([{ "name": "verbose", "properties": { "type": "boolean" } }])
    );
}

#[test]
fn enum_property_with_a_single_member_still_records_choices_and_reference() {
    //* Given
    let code = r#"
pub enum Only { One }
struct Opts { choice: Only }
"#;

    //* When
    let rendered = transform(code, "Opts");

    //* Then
    assert_eq!(
        rendered,
        json!({
            "options": [{
                "name": "choice",
                "properties": { "choices": ["Only::One"] }
            }],
            "references": {
                "opts.rs": {
                    "default": [],
                    "named": [{
                        "name": "Only",
                        "exportKind": "named",
                        "sourceFile": "opts.rs"
                    }]
                }
            }
        })
    );
}

#[test]
fn malformed_default_tag_aborts_with_doc_tag_parse() {
    //* Given
    let code = r#"
struct Opts {
    /// @default not ~ a ~ literal
    foo: String,
}
"#;
    let project = project_of(code);
    let options = project.options("Opts").expect("options should be declared");

    //* When
    let error = transform_options(&project, options)
        .expect_err("the default fragment is outside the literal grammar");

    //* Then
    assert_eq!(error.kind(), DiagnosticsKind::DocTagParse);
}

#[test]
fn paired_command_and_options_share_one_reference_table() {
    //* Given
    let mut project = Project::new();
    project
        .add_source("types.rs", "pub enum Level { Debug, Info }")
        .expect("types should parse");
    project
        .add_source(
            "cmd.rs",
            r#"
/// Runs the thing.
fn run(level: Level) {}

struct Opts { verbosity: Level }
"#,
        )
        .expect("command file should parse");
    let command = project.command("run").expect("command should be declared");
    let options = project.options("Opts").expect("options should be declared");

    //* When
    let schema = transform_command_with_options(&project, command, options)
        .expect("paired transform should succeed");

    //* Then
    let refs = schema
        .references
        .get("types.rs")
        .expect("both members reference the same file");
    assert_eq!(
        refs.named.len(),
        1,
        "the shared enum declaration is recorded exactly once"
    );
    assert_eq!(schema.positionals.len(), 1);
    assert_eq!(schema.options.len(), 1);
}

#[test]
fn positional_and_option_sharing_a_name_is_a_conflict() {
    //* Given
    let code = r#"
fn run(mode: String) {}
struct Opts { mode: bool }
"#;
    let project = project_of(code);
    let command = project.command("run").expect("command should be declared");
    let options = project.options("Opts").expect("options should be declared");

    //* When
    let error = transform_command_with_options(&project, command, options)
        .expect_err("`mode` is claimed by both namespaces");

    //* Then
    assert_eq!(error.kind(), DiagnosticsKind::NameConflict);
}
