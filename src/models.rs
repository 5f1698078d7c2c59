use serde::{Deserialize, Serialize};

/// Metadata for one region as served by the counties endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionMeta {
    /// Unique key, shared with the `slug` property of the boundary feature.
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub primary_colour: Option<String>,
    #[serde(default)]
    pub colours: Vec<String>,
    /// Province (Ireland) or region (UK). Older payloads call this `province`.
    #[serde(default, alias = "province")]
    pub province_or_region: Option<String>,
}

impl RegionMeta {
    /// Primary colour, if the payload carried a non-blank one.
    pub fn colour(&self) -> Option<&str> {
        self.primary_colour
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn group(&self) -> Option<&str> {
        self.province_or_region.as_deref()
    }
}

/// Answer of the caller-location endpoint.
///
/// Every field may be missing; a guess without a region is a normal outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeoGuess {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default, alias = "guessed_region")]
    pub guessed_county: Option<String>,
    /// Some backends encode `confidence` as a string, others as a number.
    /// Accept both.
    #[serde(default, deserialize_with = "de_opt_f64_from_string_or_number")]
    pub confidence: Option<f64>,
}

impl GeoGuess {
    /// The guessed slug, ignoring blank values.
    pub fn slug(&self) -> Option<&str> {
        self.guessed_county
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Serde helper: parse `Option<f64>` from a JSON number, a string or null.
/// Strings that are not numbers yield `None`.
fn de_opt_f64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct F64Visitor;

    impl<'de> Visitor<'de> for F64Visitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number, a string or null")
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            // Non-numeric labels ("high") carry no usable value.
            Ok(s.trim().parse::<f64>().ok())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(F64Visitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn province_alias_is_accepted() {
        let m: RegionMeta = serde_json::from_str(
            r##"{"slug":"cork","name":"Cork","primary_colour":"#ff0000","colours":["Red","White"],"province":"Munster"}"##,
        )
        .unwrap();
        assert_eq!(m.group(), Some("Munster"));
        assert_eq!(m.colour(), Some("#ff0000"));
    }

    #[test]
    fn blank_colour_counts_as_missing() {
        let m: RegionMeta =
            serde_json::from_str(r#"{"slug":"x","name":"X","primary_colour":"  "}"#).unwrap();
        assert_eq!(m.colour(), None);
        assert!(m.colours.is_empty());
    }

    #[test]
    fn confidence_accepts_string_number_and_null() {
        let a: GeoGuess = serde_json::from_str(r#"{"confidence":"0.4"}"#).unwrap();
        let b: GeoGuess = serde_json::from_str(r#"{"confidence":0.2}"#).unwrap();
        let c: GeoGuess = serde_json::from_str(r#"{"confidence":null}"#).unwrap();
        let d: GeoGuess = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(a.confidence, Some(0.4));
        assert_eq!(b.confidence, Some(0.2));
        assert_eq!(c.confidence, None);
        assert_eq!(d.confidence, None);
    }

    #[test]
    fn non_numeric_confidence_is_dropped() {
        let g: GeoGuess =
            serde_json::from_str(r#"{"guessed_county":"cork","confidence":"high"}"#).unwrap();
        assert_eq!(g.confidence, None);
        assert_eq!(g.slug(), Some("cork"));
    }
}
