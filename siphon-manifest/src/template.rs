/// Starter siphon.toml for `endpoint`.
pub fn starter_manifest(endpoint: &str) -> String {
    let url = toml::Value::String(endpoint.to_string());
    format!(
        r#"[endpoint]
url = {url}
# timeout = 30
# user_agent = "siphon"

# [endpoint.headers]
# Authorization = "Bearer <token>"

[database]
type = "sqlite"
path = "siphon.db"
# env = "SIPHON_DATABASE"
# journal_mode = "wal"
# synchronous = "normal"
# busy_timeout = 5000

[introspection]
dump = "schema_metadata.json"

# One table per source, named after the lowercased root type.
# List the types with `siphon introspect`, preview the columns of one with
# `siphon columns <TYPE>`, then load with `siphon load`.
#
# [sources.countries]
# type = "Country"
# field = "countries"
# max_depth = 2
# query = """
# {{ countries {{ code name capital continent {{ code name }} }} }}
# """
"#
    )
}
