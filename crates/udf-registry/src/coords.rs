//! Schema identifier → registry coordinates.
//!
//! Producers ship schema identifiers as content-type style strings,
//! `application/vnd.{subject}.v{version}+{format}`. The prefix, version,
//! and format are all optional: a bare token names a subject at its
//! latest version in the default format. Splitting the identifier is a
//! pure string transform, independent of any network I/O.

use crate::error::RegistryError;

/// Format used when the identifier does not name one.
pub const DEFAULT_FORMAT: &str = "avro";

/// Registry coordinates derived from a schema identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCoords {
    pub subject: String,
    /// `None` means the registry's latest version.
    pub version: Option<u32>,
    pub format: String,
}

impl SchemaCoords {
    /// Parse a schema identifier.
    ///
    /// Accepted shapes (most to least specific):
    /// `application/vnd.user.v3+avro`, `vnd.user.v3+avro`,
    /// `user.v3+avro`, `user+avro`, `user.v3`, `user`.
    pub fn parse(schema_id: &str) -> Result<Self, RegistryError> {
        let trimmed = schema_id.trim();
        let rest = trimmed.strip_prefix("application/").unwrap_or(trimmed);
        let rest = rest.strip_prefix("vnd.").unwrap_or(rest);

        let (body, format) = match rest.rsplit_once('+') {
            Some((body, format)) if !format.is_empty() => (body, format),
            Some((body, _)) => (body, DEFAULT_FORMAT),
            None => (rest, DEFAULT_FORMAT),
        };

        let (subject, version) = match body.rsplit_once(".v") {
            Some((subject, digits))
                if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
            {
                let version = digits.parse::<u32>().map_err(|_| {
                    RegistryError::InvalidSchemaId {
                        id: schema_id.to_string(),
                        reason: "version number out of range",
                    }
                })?;
                (subject, Some(version))
            }
            _ => (body, None),
        };

        if subject.is_empty() {
            return Err(RegistryError::InvalidSchemaId {
                id: schema_id.to_string(),
                reason: "empty subject",
            });
        }

        Ok(Self {
            subject: subject.to_string(),
            version,
            format: format.to_string(),
        })
    }

    /// Registry resource path for these coordinates.
    ///
    /// `/{subject}/{format}/v{version}`, or `/{subject}/{format}` for
    /// the latest version.
    pub fn lookup_path(&self) -> String {
        match self.version {
            Some(version) => format!("/{}/{}/v{}", self.subject, self.format, version),
            None => format!("/{}/{}", self.subject, self.format),
        }
    }
}

impl std::fmt::Display for SchemaCoords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.subject)?;
        if let Some(version) = self.version {
            write!(f, ".v{version}")?;
        }
        write!(f, "+{}", self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(subject: &str, version: Option<u32>, format: &str) -> SchemaCoords {
        SchemaCoords {
            subject: subject.to_string(),
            version,
            format: format.to_string(),
        }
    }

    #[test]
    fn parses_full_content_type() {
        assert_eq!(
            SchemaCoords::parse("application/vnd.user.v3+avro").unwrap(),
            coords("user", Some(3), "avro")
        );
    }

    #[test]
    fn parses_without_application_prefix() {
        assert_eq!(
            SchemaCoords::parse("vnd.user.v1+avro").unwrap(),
            coords("user", Some(1), "avro")
        );
    }

    #[test]
    fn parses_bare_subject_and_version() {
        assert_eq!(
            SchemaCoords::parse("user.v2+avro").unwrap(),
            coords("user", Some(2), "avro")
        );
        assert_eq!(
            SchemaCoords::parse("user.v2").unwrap(),
            coords("user", Some(2), "avro")
        );
    }

    #[test]
    fn bare_subject_is_latest_default_format() {
        assert_eq!(
            SchemaCoords::parse("clickstream").unwrap(),
            coords("clickstream", None, "avro")
        );
    }

    #[test]
    fn keeps_dotted_subjects_intact() {
        assert_eq!(
            SchemaCoords::parse("events.orders").unwrap(),
            coords("events.orders", None, "avro")
        );
        // ".v" followed by non-digits is part of the subject.
        assert_eq!(
            SchemaCoords::parse("events.v2beta.orders").unwrap(),
            coords("events.v2beta.orders", None, "avro")
        );
    }

    #[test]
    fn explicit_format() {
        assert_eq!(
            SchemaCoords::parse("user+json").unwrap(),
            coords("user", None, "json")
        );
    }

    #[test]
    fn rejects_empty_subject() {
        assert!(SchemaCoords::parse("").is_err());
        assert!(SchemaCoords::parse("application/vnd.").is_err());
        assert!(SchemaCoords::parse("+avro").is_err());
    }

    #[test]
    fn lookup_path_versioned_and_latest() {
        assert_eq!(
            SchemaCoords::parse("user.v3+avro").unwrap().lookup_path(),
            "/user/avro/v3"
        );
        assert_eq!(
            SchemaCoords::parse("user").unwrap().lookup_path(),
            "/user/avro"
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        let parsed = SchemaCoords::parse("application/vnd.user.v3+avro").unwrap();
        assert_eq!(parsed.to_string(), "user.v3+avro");
        assert_eq!(SchemaCoords::parse(&parsed.to_string()).unwrap(), parsed);
    }
}
