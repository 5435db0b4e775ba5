use crate::decode::engine::Engine;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::fmt::{self, Write as _};

/// Characters left unescaped when encoding user, password and name: RFC 3986 unreserved.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'~');

const REDACTED: &str = "***";

/// Errors from decoding a connection URL.
///
/// The `fragment` carried by [`DecodeError::Malformed`] has already been passed
/// through [`redact_url`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
	#[error("Unknown connection scheme: {scheme:?}")]
	UnknownScheme { scheme: String },

	#[error("{reason} in {fragment:?}")]
	Malformed {
		reason: &'static str,
		fragment: String,
	},
}

/// A password that never appears in `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
	pub fn new(password: impl Into<String>) -> Self {
		Password(password.into())
	}

	/// The plain-text password, for handing to a database client.
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for Password {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Password({REDACTED})")
	}
}

impl fmt::Display for Password {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

/// Decoded form of `scheme://[user[:password]@]host[:port]/name[?options]`.
///
/// This is a plain value; it never holds a live connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDescriptor {
	/// Scheme as written, lowercased.
	pub scheme: String,

	/// Engine family the scheme selects.
	pub engine: Engine,

	pub user: Option<String>,

	pub password: Option<Password>,

	/// Host name or address. IPv6 literals are stored without brackets.
	pub host: String,

	/// Explicit port, else the scheme default, else `None`.
	pub port: Option<u16>,

	/// Database or catalog name.
	pub name: String,

	/// Query options in their original order, uninterpreted.
	pub options: Vec<(String, String)>,
}

impl ConnectionDescriptor {
	/// Encode back into URL form, including the password.
	///
	/// Use this only to hand the value to a client library. For anything a
	/// person may read, use the `Display` impl, which redacts the password.
	pub fn to_url(&self) -> String {
		self.render(false)
	}

	/// Look up a query option by key. The first occurrence wins.
	pub fn option(&self, key: &str) -> Option<&str> {
		self.options
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	fn render(&self, redact: bool) -> String {
		let mut url = format!("{}://", self.scheme);

		if self.user.is_some() || self.password.is_some() {
			if let Some(ref user) = self.user {
				url.push_str(&encode_component(user));
			}
			if let Some(ref password) = self.password {
				url.push(':');
				if redact {
					url.push_str(REDACTED);
				} else {
					url.push_str(&encode_component(password.expose()));
				}
			}
			url.push('@');
		}

		if self.host.contains(':') {
			let _ = write!(url, "[{}]", self.host);
		} else {
			url.push_str(&self.host);
		}

		if let Some(port) = self.port {
			let _ = write!(url, ":{port}");
		}

		url.push('/');
		url.push_str(&encode_component(&self.name));

		if !self.options.is_empty() {
			let query: Vec<String> = self
				.options
				.iter()
				.map(|(k, v)| format!("{k}={v}"))
				.collect();
			url.push('?');
			url.push_str(&query.join("&"));
		}

		url
	}
}

impl fmt::Display for ConnectionDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render(true))
	}
}

/// Decode a connection URL into its parts.
///
/// Grammar: `scheme://[user[:password]@]host[:port]/name[?k1=v1&k2=v2...]`.
/// User, password and name are percent-decoded; a password containing `@`,
/// `:` or `/` must therefore be percent-encoded by whoever wrote the URL.
pub fn decode_connection(raw: &str) -> Result<ConnectionDescriptor, DecodeError> {
	let (scheme, rest) = raw
		.split_once("://")
		.ok_or_else(|| malformed("missing scheme separator \"://\"", raw))?;

	if scheme.is_empty() {
		return Err(malformed("missing scheme", raw));
	}
	if !is_valid_scheme(scheme) {
		return Err(malformed("invalid characters in scheme", raw));
	}
	let engine = Engine::from_scheme(scheme).ok_or_else(|| DecodeError::UnknownScheme {
		scheme: scheme.to_string(),
	})?;
	let scheme = scheme.to_ascii_lowercase();

	let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
	let (authority, tail) = rest.split_at(authority_end);

	let (userinfo, hostport) = match authority.rfind('@') {
		Some(at) => (Some(&authority[..at]), &authority[at + 1..]),
		None => (None, authority),
	};

	let (user, password) = match userinfo {
		None => (None, None),
		Some(info) => {
			let (user, password) = match info.split_once(':') {
				Some((user, password)) => (user, Some(password)),
				None => (info, None),
			};
			// `:password@` (no user) is the usual form for Redis.
			if user.is_empty() && password.is_none() {
				return Err(malformed("empty user name", raw));
			}
			let user = if user.is_empty() {
				None
			} else {
				Some(decode_component(user, raw)?)
			};
			let password = password
				.map(|p| decode_component(p, raw).map(Password))
				.transpose()?;
			(user, password)
		}
	};

	let (host, port) = split_host_port(hostport, raw)?;
	let port = port.or_else(|| Engine::default_port(&scheme));

	let path = tail
		.strip_prefix('/')
		.ok_or_else(|| malformed("missing database name", raw))?;
	let (name, query) = match path.split_once('?') {
		Some((name, query)) => (name, Some(query)),
		None => (path, None),
	};
	if name.is_empty() {
		return Err(malformed("empty database name", raw));
	}
	let name = decode_component(name, raw)?;

	let options = query.map(parse_options).unwrap_or_default();

	Ok(ConnectionDescriptor {
		scheme,
		engine,
		user,
		password,
		host,
		port,
		name,
		options,
	})
}

/// Replace the password segment of a URL-shaped string with `***`.
///
/// Errs on the side of hiding too much: the userinfo is taken to end at the
/// last `@`, so an unescaped `/` or `?` inside a password is still hidden.
///
/// When the text before the first `://` is not a plausible scheme (for
/// example `user:pw@host/db?next=http://x`), everything before the last `@`
/// is hidden instead.
pub fn redact_url(raw: &str) -> String {
	let (scheme, rest) = match raw.split_once("://") {
		Some((scheme, rest)) if is_valid_scheme(scheme) => (scheme, rest),
		_ => {
			return match raw.rfind('@') {
				Some(at) => format!("<redacted>{}", &raw[at..]),
				None => raw.to_string(),
			};
		}
	};

	let Some(at) = rest.rfind('@') else {
		return raw.to_string();
	};

	match rest[..at].split_once(':') {
		Some((user, _)) => format!("{scheme}://{user}:{REDACTED}{}", &rest[at..]),
		None => raw.to_string(),
	}
}

fn split_host_port(hostport: &str, raw: &str) -> Result<(String, Option<u16>), DecodeError> {
	let (host, port) = if let Some(bracketed) = hostport.strip_prefix('[') {
		let (host, after) = bracketed
			.split_once(']')
			.ok_or_else(|| malformed("unterminated IPv6 host", raw))?;
		let port = if after.is_empty() {
			None
		} else {
			Some(
				after
					.strip_prefix(':')
					.ok_or_else(|| malformed("unexpected text after IPv6 host", raw))?,
			)
		};
		(host, port)
	} else {
		match hostport.split_once(':') {
			Some((host, port)) => {
				if port.contains(':') {
					return Err(malformed("IPv6 hosts must be enclosed in brackets", raw));
				}
				(host, Some(port))
			}
			None => (hostport, None),
		}
	};

	if host.is_empty() {
		return Err(malformed("missing host", raw));
	}
	let bracketed = hostport.starts_with('[');
	if !host.bytes().all(|b| is_host_byte(b, bracketed)) {
		return Err(malformed("invalid characters in host", raw));
	}

	let port = port.map(|p| parse_port(p, raw)).transpose()?;
	Ok((host.to_string(), port))
}

fn is_valid_scheme(scheme: &str) -> bool {
	!scheme.is_empty()
		&& scheme
			.bytes()
			.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
}

/// RFC 3986 reg-name bytes; IPv6 literals also allow `:` and a `%` zone id.
fn is_host_byte(b: u8, bracketed: bool) -> bool {
	b.is_ascii_alphanumeric()
		|| matches!(
			b,
			b'-' | b'.' | b'_' | b'~' | b'%' | b'!' | b'$' | b'&' | b'\'' | b'(' | b')'
				| b'*' | b'+' | b',' | b';' | b'='
		)
		|| (bracketed && b == b':')
}

fn parse_port(port: &str, raw: &str) -> Result<u16, DecodeError> {
	if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
		return Err(malformed("invalid port", raw));
	}
	port.parse().map_err(|_| malformed("port out of range", raw))
}

fn parse_options(query: &str) -> Vec<(String, String)> {
	query
		.split('&')
		.filter(|pair| !pair.is_empty())
		.map(|pair| match pair.split_once('=') {
			Some((key, value)) => (key.to_string(), value.to_string()),
			None => (pair.to_string(), String::new()),
		})
		.collect()
}

fn decode_component(component: &str, raw: &str) -> Result<String, DecodeError> {
	percent_decode_str(component)
		.decode_utf8()
		.map(|decoded| decoded.into_owned())
		.map_err(|_| malformed("percent-encoded text is not valid UTF-8", raw))
}

fn encode_component(component: &str) -> String {
	utf8_percent_encode(component, COMPONENT).to_string()
}

fn malformed(reason: &'static str, raw: &str) -> DecodeError {
	DecodeError::Malformed {
		reason,
		fragment: redact_url(raw),
	}
}
