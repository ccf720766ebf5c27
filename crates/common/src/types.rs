use crate::error::AliasError;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Short name a user or service registers in place of a full onion address
///
/// Only non-emptiness is enforced. Case and character set are left to the
/// caller, so `Foo.tor.onion` and `foo.tor.onion` are different aliases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alias(String);

impl Alias {
    pub fn new(alias: impl Into<String>) -> Result<Self, AliasError> {
        let alias = alias.into();
        if alias.is_empty() {
            return Err(AliasError::invalid_input("alias must not be empty"));
        }
        Ok(Self(alias))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Lets the registry map be queried with a plain `&str`.
impl Borrow<str> for Alias {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Alias {
    type Error = AliasError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Alias {
    type Error = AliasError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for Alias {
    type Err = AliasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<Alias> for String {
    fn from(value: Alias) -> Self {
        value.0
    }
}

/// Full onion address an alias resolves to (e.g. "abc...xyz.onion")
///
/// Kept in a `CompactString` so short targets stay inline instead of
/// allocating per entry. No format or checksum validation is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OnionAddress(CompactString);

impl OnionAddress {
    pub fn new(address: impl AsRef<str>) -> Result<Self, AliasError> {
        let address = address.as_ref();
        if address.is_empty() {
            return Err(AliasError::invalid_input("onion address must not be empty"));
        }
        Ok(Self(CompactString::new(address)))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the value is stored inline rather than on the heap
    pub fn is_inline(&self) -> bool {
        !self.0.is_heap_allocated()
    }
}

impl fmt::Display for OnionAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for OnionAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for OnionAddress {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for OnionAddress {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl TryFrom<String> for OnionAddress {
    type Error = AliasError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for OnionAddress {
    type Error = AliasError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for OnionAddress {
    type Err = AliasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<OnionAddress> for String {
    fn from(value: OnionAddress) -> Self {
        value.0.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_rejects_empty() {
        let err = Alias::new("").unwrap_err();
        assert!(matches!(err, AliasError::InvalidInput(_)));
        assert!("".parse::<Alias>().is_err());
    }

    #[test]
    fn test_alias_is_case_sensitive() {
        let lower = Alias::new("bridge1").unwrap();
        let upper = Alias::new("Bridge1").unwrap();
        assert_ne!(lower, upper);
        assert_eq!(lower.to_string(), "bridge1");
    }

    #[test]
    fn test_onion_address_rejects_empty() {
        let err = OnionAddress::new("").unwrap_err();
        assert!(matches!(err, AliasError::InvalidInput(_)));
    }

    #[test]
    fn test_short_address_is_inline() {
        let address = OnionAddress::new("abc123.onion").unwrap();
        assert!(address.is_inline());
        assert_eq!(address, "abc123.onion");

        let v3 = "a".repeat(56) + ".onion";
        let address = OnionAddress::new(&v3).unwrap();
        assert_eq!(address.as_str(), v3);
    }

    #[test]
    fn test_serde_rejects_empty_values() {
        #[derive(Debug, Deserialize)]
        struct Entry {
            #[allow(dead_code)]
            alias: Alias,
            #[allow(dead_code)]
            address: OnionAddress,
        }

        let ok: Result<Entry, _> = toml::from_str("alias = \"a\"\naddress = \"b.onion\"");
        assert!(ok.is_ok());

        let bad: Result<Entry, _> = toml::from_str("alias = \"\"\naddress = \"b.onion\"");
        assert!(bad.is_err());
    }
}
