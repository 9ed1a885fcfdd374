//! API variant detection result.

use std::fmt;

/// The API root-path family exposed by the recorder.
///
/// Full QVR Pro firmware serves its API under `/qvrpro`; the cut-down
/// QVR Elite firmware serves the same endpoints under `/qvrelite`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Variant {
    #[default]
    Pro,
    Lite,
}

impl Variant {
    /// Choose the variant from the `is_qvp` field of the entry probe.
    ///
    /// Only an explicit "no" (string `"no"` or JSON `false`) selects the lite
    /// variant; anything else, including a missing field, selects pro.
    pub fn from_is_qvp(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(serde_json::Value::String(s)) if s == "no" => Variant::Lite,
            Some(serde_json::Value::Bool(false)) => Variant::Lite,
            _ => Variant::Pro,
        }
    }

    /// Returns the path prefix every endpoint of this variant lives under.
    pub fn prefix(&self) -> &'static str {
        match self {
            Variant::Pro => "/qvrpro",
            Variant::Lite => "/qvrelite",
        }
    }

    /// Returns `suffix` rooted at this variant's prefix.
    ///
    /// ```
    /// use qvrpro::Variant;
    ///
    /// assert_eq!(Variant::Lite.path("/camera/list"), "/qvrelite/camera/list");
    /// ```
    pub fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.prefix(), suffix)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Pro => f.write_str("pro"),
            Variant::Lite => f.write_str("lite"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn explicit_no_selects_lite() {
        assert_eq!(Variant::from_is_qvp(Some(&json!("no"))), Variant::Lite);
        assert_eq!(Variant::from_is_qvp(Some(&json!(false))), Variant::Lite);
    }

    #[test]
    fn anything_else_selects_pro() {
        assert_eq!(Variant::from_is_qvp(Some(&json!("yes"))), Variant::Pro);
        assert_eq!(Variant::from_is_qvp(Some(&json!(true))), Variant::Pro);
        assert_eq!(Variant::from_is_qvp(Some(&json!(""))), Variant::Pro);
        assert_eq!(Variant::from_is_qvp(None), Variant::Pro);
    }

    #[test]
    fn paths_are_rooted_at_prefix() {
        assert_eq!(Variant::Pro.path("/camera/list"), "/qvrpro/camera/list");
        assert_eq!(Variant::Lite.prefix(), "/qvrelite");
    }
}
