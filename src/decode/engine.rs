use std::fmt;

/// Database or broker family selected by a connection URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
	Postgres,
	MySql,
	MariaDb,
	Redis,
	MongoDb,
	/// DNS seedlist form; the port comes from SRV records.
	MongoDbSrv,
	SqlServer,
	CockroachDb,
	Oracle,
	Amqp,
}

/// Scheme spellings and the engine each selects.
const SCHEMES: &[(&str, Engine)] = &[
	("postgres", Engine::Postgres),
	("postgresql", Engine::Postgres),
	("mysql", Engine::MySql),
	("mariadb", Engine::MariaDb),
	("redis", Engine::Redis),
	("rediss", Engine::Redis),
	("mongodb", Engine::MongoDb),
	("mongodb+srv", Engine::MongoDbSrv),
	("mssql", Engine::SqlServer),
	("sqlserver", Engine::SqlServer),
	("cockroachdb", Engine::CockroachDb),
	("oracle", Engine::Oracle),
	("amqp", Engine::Amqp),
	("amqps", Engine::Amqp),
];

impl Engine {
	/// Look up the engine for a scheme, case-insensitively.
	pub fn from_scheme(scheme: &str) -> Option<Self> {
		SCHEMES
			.iter()
			.find(|(name, _)| name.eq_ignore_ascii_case(scheme))
			.map(|(_, engine)| *engine)
	}

	/// Default port for a scheme, or `None` if it has none.
	///
	/// TLS variants of a scheme may use a different port than the plain one.
	pub fn default_port(scheme: &str) -> Option<u16> {
		let engine = Self::from_scheme(scheme)?;
		if scheme.eq_ignore_ascii_case("amqps") {
			return Some(5671);
		}
		match engine {
			Engine::Postgres => Some(5432),
			Engine::MySql | Engine::MariaDb => Some(3306),
			Engine::Redis => Some(6379),
			Engine::MongoDb => Some(27017),
			Engine::MongoDbSrv => None,
			Engine::SqlServer => Some(1433),
			Engine::CockroachDb => Some(26257),
			Engine::Oracle => Some(1521),
			Engine::Amqp => Some(5672),
		}
	}

	/// All scheme spellings this crate understands.
	pub fn known_schemes() -> impl Iterator<Item = &'static str> {
		SCHEMES.iter().map(|(name, _)| *name)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Engine::Postgres => "postgres",
			Engine::MySql => "mysql",
			Engine::MariaDb => "mariadb",
			Engine::Redis => "redis",
			Engine::MongoDb => "mongodb",
			Engine::MongoDbSrv => "mongodb+srv",
			Engine::SqlServer => "sqlserver",
			Engine::CockroachDb => "cockroachdb",
			Engine::Oracle => "oracle",
			Engine::Amqp => "amqp",
		}
	}
}

impl fmt::Display for Engine {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_scheme_lookup_is_case_insensitive() {
		assert_eq!(Engine::from_scheme("POSTGRES"), Some(Engine::Postgres));
		assert_eq!(Engine::from_scheme("PostgreSQL"), Some(Engine::Postgres));
		assert_eq!(Engine::from_scheme("sqlite"), None);
	}

	#[test]
	fn test_default_ports() {
		assert_eq!(Engine::default_port("postgres"), Some(5432));
		assert_eq!(Engine::default_port("mysql"), Some(3306));
		assert_eq!(Engine::default_port("rediss"), Some(6379));
		assert_eq!(Engine::default_port("amqp"), Some(5672));
		assert_eq!(Engine::default_port("amqps"), Some(5671));
		assert_eq!(Engine::default_port("mongodb+srv"), None);
		assert_eq!(Engine::default_port("unknown"), None);
	}
}
