use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ModelError, ModelResult};

/// Which metadata map the well-known keys are read from.
///
/// Chosen once per process; every group and instance is read through the same source.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataSource {
    /// Read keys from labels (default).
    #[default]
    Labels,
    /// Read keys from annotations.
    Annotations,
}

impl FromStr for MetadataSource {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "labels" | "label" => Ok(MetadataSource::Labels),
            "annotations" | "annotation" => Ok(MetadataSource::Annotations),
            _ => Err(ModelError::UnknownMetadataSource(s.to_string())),
        }
    }
}

impl fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MetadataSource::Labels => "labels",
            MetadataSource::Annotations => "annotations",
        })
    }
}

impl Serialize for MetadataSource {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MetadataSource {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
