use core::fmt;
use core::str::FromStr;

use crate::DirectoryError;

/// A qualified service name: an optional namespace and a local part.
///
/// The text form is `{namespace}local`, or just `local` without a namespace.
///
/// # Examples
///
/// ```
/// use og_directory::ServiceName;
///
/// let name: ServiceName = "{urn:shop}Orders".parse().unwrap();
/// assert_eq!(name.namespace(), "urn:shop");
/// assert_eq!(name.local(), "Orders");
/// assert_eq!(name.to_string(), "{urn:shop}Orders");
///
/// assert_eq!(ServiceName::local_only("Ping").to_string(), "Ping");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceName {
    namespace: String,
    local: String,
}

impl ServiceName {
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }

    /// A name without namespace.
    pub fn local_only(local: impl Into<String>) -> Self {
        Self::new(String::new(), local)
    }

    /// The namespace, empty if there is none.
    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[inline]
    pub fn local(&self) -> &str {
        &self.local
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.namespace.is_empty() {
            write!(f, "{{{}}}", self.namespace)?;
        }
        f.write_str(&self.local)
    }
}

impl FromStr for ServiceName {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DirectoryError::InvalidName(s.into());

        let (namespace, local) = match s.strip_prefix('{') {
            Some(rest) => rest.split_once('}').ok_or_else(invalid)?,
            None => ("", s),
        };
        if local.is_empty() || local.contains(['{', '}']) {
            return Err(invalid());
        }
        Ok(Self::new(namespace, local))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ServiceName;
    use crate::DirectoryError;

    #[test]
    fn parse() {
        let name: ServiceName = "Ping".parse().unwrap();
        assert_eq!(name.namespace(), "");
        assert_eq!(name, ServiceName::local_only("Ping"));

        let name: ServiceName = "{}Ping".parse().unwrap();
        assert_eq!(name.to_string(), "Ping");
    }

    #[test]
    fn reject() {
        for bad in ["", "{urn:x}", "{urn:x", "a}b"] {
            assert_eq!(
                bad.parse::<ServiceName>(),
                Err(DirectoryError::InvalidName(bad.into()))
            );
        }
    }
}
