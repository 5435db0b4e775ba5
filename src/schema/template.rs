/// Starter `.envres.toml` written by `envres --init`.
pub fn init_template() -> &'static str {
	r#"# envres schema
#
# Declares every configuration key the application reads, its type and its
# default. Values come from the environment and from the override file below.

# Local, unversioned KEY=VALUE file used during development.
override-file = ".env"
override-file-required = false

# Which source wins when a key is set in both: "environment" or "override-file".
precedence = "environment"

[[fields]]
name = "DEBUG"
type = "boolean"
default = false

[[fields]]
name = "SECRET_KEY"
type = "string"
required = true
non-empty = true
secret = true

[[fields]]
name = "WEB_CONCURRENCY"
type = "integer"
default = 2

[[fields]]
name = "STATIC_ROOT"
type = "string"
default = "staticfiles"

[[fields]]
name = "DATABASE_URL"
type = "url"
required = true
"#
}
