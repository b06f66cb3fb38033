use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps personal data (passenger names, ages) so it never shows up in
/// `Debug` or `Display` output, including `tracing` fields.
///
/// Serialization still emits the real value: summaries shown to the user
/// and exported to disk need it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Masked<T>(pub T);

const MASK: &str = "********";

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn inner(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_hides_value_in_formatting() {
        let name = Masked("Ada Lovelace".to_string());
        assert_eq!(format!("{:?}", name), MASK);
        assert_eq!(format!("{}", name), MASK);
        assert_eq!(name.inner(), "Ada Lovelace");
    }

    #[test]
    fn test_masked_serializes_real_value() {
        let name = Masked("Ada".to_string());
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Ada\"");
    }
}
