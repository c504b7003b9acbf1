use graphload_core::{Error, Result};
use std::str::FromStr;

/// The only API kind this tool can talk to.
pub const GREMLIN_API_KIND: &str = "gremlin";

/// Parsed `AccountEndpoint=...;AccountKey=...;ApiKind=Gremlin;Database=...;Collection=...`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionString {
    pub account_endpoint: String,
    pub account_key: String,
    pub api_kind: String,
    pub database: String,
    pub collection: String,
}

impl ConnectionString {
    /// Lenient parse: keys are case-insensitive, values split on the first `=`
    /// only, unknown keys and fragments without `=` are ignored.
    pub fn parse(raw: &str) -> Self {
        let mut conn = Self::default();
        for part in raw.trim().split(';') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            let value = value.trim().to_string();
            match key.trim().to_ascii_lowercase().as_str() {
                "accountendpoint" => conn.account_endpoint = value,
                "accountkey" => conn.account_key = value,
                "apikind" => conn.api_kind = value,
                "database" => conn.database = value,
                "collection" => conn.collection = value,
                _ => {}
            }
        }
        conn
    }

    pub fn validate(&self) -> Result<()> {
        if !self.api_kind.eq_ignore_ascii_case(GREMLIN_API_KIND) {
            return Err(Error::InvalidConfig(format!(
                "ApiKind must be Gremlin, got '{}'",
                self.api_kind
            )));
        }

        let missing: Vec<&str> = [
            ("AccountEndpoint", &self.account_endpoint),
            ("AccountKey", &self.account_key),
            ("Database", &self.database),
            ("Collection", &self.collection),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "connection string is missing {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    /// Endpoint without a trailing slash.
    #[inline]
    pub fn endpoint(&self) -> &str {
        self.account_endpoint.trim_end_matches('/')
    }
}

impl FromStr for ConnectionString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let conn = Self::parse(s);
        conn.validate()?;
        Ok(conn)
    }
}
