//! Legal document records as stored and as returned by retrieval

use serde::Deserialize;
use serde::Serialize;

/// A legal passage returned by the retriever
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalDocument {
    pub id: String,
    pub content: String,
    pub title: String,
    /// Section/article number within the source law
    pub section: i64,
    /// Category label such as the statute name
    pub law_type: String,
    /// Cosine similarity to the query; only set on retrieval results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f32>,
}

impl LegalDocument {
    /// Similarity used for threshold comparisons; an unscored document counts as 0.0
    #[must_use]
    pub fn score(&self) -> f32 {
        self.similarity.unwrap_or(0.0)
    }
}

/// Raw row from the document store. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default, deserialize_with = "de::opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i64_lenient")]
    pub section: Option<i64>,
    #[serde(default, rename = "lawType", alias = "law_type")]
    pub law_type: Option<String>,
    #[serde(default)]
    pub similarity: Option<f64>,
}

impl From<DocumentRecord> for LegalDocument {
    fn from(record: DocumentRecord) -> Self {
        Self {
            id: record.id.unwrap_or_default(),
            content: record.content.unwrap_or_default(),
            title: record.title.unwrap_or_default(),
            section: record.section.unwrap_or_default(),
            law_type: record.law_type.unwrap_or_default(),
            similarity: record.similarity.map(|s| s as f32),
        }
    }
}

/// Lenient deserializers for store rows whose column types vary between deployments
mod de {
    use serde::Deserialize;
    use serde::Deserializer;
    use serde_json::Value;

    pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn opt_i64_lenient<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        })
    }
}
