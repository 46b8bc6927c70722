//! Integration tests that run the siphon binary on commands that work
//! without a network: offline column derivation, init and check.

use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn siphon(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_siphon"))
        .args(args)
        .env_remove("SIPHON_LOG")
        .output()
        .expect("Failed to run siphon")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_columns_from_dump() {
    let schema = fixture("countries.json");
    let output = siphon(&["columns", "Country", "--schema", schema.to_str().unwrap()]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("Country → table 'country' (11 columns):\n"));

    let columns: Vec<&str> = text
        .lines()
        .skip(1)
        .take_while(|line| !line.is_empty())
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(
        columns,
        [
            "awsRegion",
            "capital",
            "code",
            "continent_code",
            "continent_name",
            "currency",
            "emoji",
            "emojiU",
            "name",
            "native",
            "phone",
        ]
    );
    assert!(text.contains("  - continent.countries: list of objects\n"));
    assert!(text.contains("  - languages: list of objects\n"));
    assert!(text.contains("  - states: list of objects\n"));
}

#[test]
fn test_columns_ddl() {
    let schema = fixture("countries.json");
    let output = siphon(&[
        "columns",
        "Language",
        "--schema",
        schema.to_str().unwrap(),
        "--ddl",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "CREATE TABLE IF NOT EXISTS \"language\" (\n    \
         \"code\" TEXT,\n    \
         \"name\" TEXT,\n    \
         \"native\" TEXT,\n    \
         \"rtl\" TEXT\n);\n"
    );
}

#[test]
fn test_columns_max_depth() {
    let schema = fixture("countries.json");
    let output = siphon(&[
        "columns",
        "State",
        "--schema",
        schema.to_str().unwrap(),
        "--max-depth",
        "2",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("country_continent_code"));
    assert!(text.contains("  - country.continent.countries: list of objects\n"));
}

#[test]
fn test_columns_unknown_type_fails() {
    let schema = fixture("countries.json");
    let output = siphon(&["columns", "Planet", "--schema", schema.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Planet"));
}

#[test]
fn test_init_then_check() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_str().unwrap();

    let output = siphon(&[
        "init",
        "--endpoint",
        "https://countries.trevorblades.com/",
        "--output",
        dir,
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let config = temp.path().join("siphon.toml");
    let content = fs::read_to_string(&config).unwrap();
    assert!(content.contains("url = \"https://countries.trevorblades.com/\""));

    let output = siphon(&["check", "-c", config.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("is valid"));
    assert!(stdout(&output).contains("0 sources:"));
    assert!(stderr(&output).contains("warning: no sources defined"));
}

#[test]
fn test_init_keeps_existing_manifest() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("siphon.toml");
    fs::write(&config, "# mine\n").unwrap();

    let output = siphon(&[
        "init",
        "--endpoint",
        "https://example.com/graphql",
        "--output",
        temp.path().to_str().unwrap(),
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("already exists"));
    assert_eq!(fs::read_to_string(&config).unwrap(), "# mine\n");
}

#[test]
fn test_init_rejects_bad_endpoint_without_writing() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().to_str().unwrap();
    let config = temp.path().join("siphon.toml");

    let output = siphon(&["init", "--endpoint", "ftp://example.com", "--output", dir]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("endpoint url must start with http:// or https://"));
    assert!(!config.exists());

    // A corrected retry is not blocked by a leftover file.
    let output = siphon(&["init", "--endpoint", "https://example.com/graphql", "--output", dir]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created"));

    let output = siphon(&["check", "-c", config.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_check_lists_sources() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("siphon.toml");
    fs::write(
        &config,
        r#"
[endpoint]
url = "https://countries.trevorblades.com/"

[database]
type = "sqlite"
path = "countries.db"

[sources.countries]
type = "Country"
max_depth = 2
query = "{ countries { code name } }"
"#,
    )
    .unwrap();

    let output = siphon(&["check", "--config", config.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains(
        "  - countries: Country → table 'country' (field 'countries', max depth 2)\n"
    ));
}

#[test]
fn test_check_rejects_bad_url() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("siphon.toml");
    fs::write(
        &config,
        r#"
[endpoint]
url = "countries.trevorblades.com"

[database]
type = "sqlite"
path = "countries.db"
"#,
    )
    .unwrap();

    let output = siphon(&["check", "-c", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("endpoint url must start with http:// or https://"));
}

#[test]
fn test_preview_without_database_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("siphon.toml");
    fs::write(
        &config,
        r#"
[endpoint]
url = "https://countries.trevorblades.com/"

[database]
type = "sqlite"
path = "countries.db"

[sources.countries]
type = "Country"
query = "{ countries { code } }"
"#,
    )
    .unwrap();

    let output = siphon(&["preview", "countries", "-c", config.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(!temp.path().join("countries.db").exists());
}

#[test]
fn test_completions() {
    let output = siphon(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("siphon"));
}
