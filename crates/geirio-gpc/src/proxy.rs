use geirio_config::remote::GpcConfig;
use geirio_types::{DefinitionBlock, Lang, MatchCandidate};
use serde::Deserialize;
use serde_json::Value;

use crate::GpcError;
use crate::extract;

/// Client for the thin proxy server, which performs the two-step
/// search+entry sequence server-side and returns one JSON envelope.
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

/// A resolved proxy lookup: the match the proxy picked plus its entry.
#[derive(Debug, Clone)]
pub struct ProxyLookup {
    pub candidate: MatchCandidate,
    pub definitions: Vec<DefinitionBlock>,
}

#[derive(Deserialize)]
struct ProxyEnvelope {
    #[serde(rename = "matchId")]
    match_id: String,
    entry: Value,
}

#[derive(Deserialize)]
struct ProxyError {
    error: Option<String>,
}

impl ProxyClient {
    pub fn new(config: &GpcConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.proxy_url.clone(),
        }
    }

    pub async fn lookup(&self, word: &str, lang: Lang) -> Result<ProxyLookup, GpcError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(GpcError::EmptyQuery);
        }

        let url = format!("{}/api/lookup", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("word", word), ("lang", lang.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ProxyError>()
                .await
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(match status.as_u16() {
                404 => GpcError::NoMatch,
                400 => GpcError::BadRequest(message),
                _ => GpcError::Upstream(message),
            });
        }

        let envelope: ProxyEnvelope = response.json().await?;
        let definitions = entry_definitions(&envelope.entry);

        Ok(ProxyLookup {
            candidate: MatchCandidate::ById {
                id: envelope.match_id,
                headword: word.to_string(),
            },
            definitions,
        })
    }
}

/// Pull definition blocks out of a proxy entry payload.
///
/// The proxy forwards the entry either as the raw markup string or as a
/// markup-to-JSON conversion whose shape varies with the upstream response;
/// both are handled best-effort.
pub fn entry_definitions(entry: &Value) -> Vec<DefinitionBlock> {
    if let Some(markup) = entry.as_str() {
        return extract::definition_blocks(markup);
    }

    let mut texts = Vec::new();
    let mut pos = None;
    walk(entry, &mut texts, &mut pos);

    texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| DefinitionBlock {
            text,
            part_of_speech: if i == 0 { pos.clone() } else { None },
        })
        .collect()
}

fn walk(value: &Value, texts: &mut Vec<String>, pos: &mut Option<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match key.as_str() {
                    "p" | "definition" | "#text" | "_" => collect_text(child, texts),
                    "pos" => {
                        if pos.is_none() {
                            *pos = first_string(child);
                        }
                    }
                    _ => walk(child, texts, pos),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, texts, pos);
            }
        }
        _ => {}
    }
}

fn collect_text(value: &Value, texts: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            let cleaned = extract::strip_inline(s);
            if !cleaned.is_empty() {
                texts.push(cleaned);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_text(item, texts);
            }
        }
        Value::Object(map) => {
            // Converted mixed content keeps its text under "_" or "#text".
            for key in ["_", "#text"] {
                if let Some(inner) = map.get(key) {
                    collect_text(inner, texts);
                }
            }
        }
        _ => {}
    }
}

fn first_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Array(items) => items.iter().find_map(first_string),
        Value::Object(map) => map.get("_").or_else(|| map.get("#text")).and_then(first_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_entry_runs_markup_extraction() {
        let entry = json!("<entry><p>a greeting</p></entry>");
        let blocks = entry_definitions(&entry);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "a greeting");
    }

    #[test]
    fn converted_entry_collects_definition_arrays() {
        let entry = json!({
            "entry": {
                "pos": ["n"],
                "definition": ["a dog", "a rascal"]
            }
        });
        let blocks = entry_definitions(&entry);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "a dog");
        assert_eq!(blocks[0].part_of_speech.as_deref(), Some("n"));
        assert_eq!(blocks[1].part_of_speech, None);
    }

    #[test]
    fn mixed_content_text_is_found_under_underscore() {
        let entry = json!({
            "p": [{ "_": "sense <i>one</i>", "lang": "cy" }]
        });
        let blocks = entry_definitions(&entry);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "sense one");
    }

    #[test]
    fn unrecognized_shape_yields_empty_list() {
        assert!(entry_definitions(&json!({ "unexpected": 42 })).is_empty());
        assert!(entry_definitions(&json!(null)).is_empty());
    }
}
