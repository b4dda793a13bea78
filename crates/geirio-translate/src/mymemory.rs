//! MyMemory response filtering.
//!
//! The public corpus is noisy, so only exact-segment matches from an
//! allow-listed set of contributors are accepted, minus a denylist of
//! known-garbage outputs, above a minimum match score.

use serde::Deserialize;
use serde_json::Value;

pub const TRUSTED_CREATORS: [&str; 4] = ["MateCat", "SDL", "Microsoft", "Google"];
pub const DENYLIST: [&str; 2] = ["ipiales", "i'm in"];
pub const MIN_MATCH: f64 = 0.75;

#[derive(Debug, Deserialize)]
pub struct MyMemoryResponse {
    #[serde(default)]
    pub matches: Vec<MyMemoryMatch>,
}

#[derive(Debug, Deserialize)]
pub struct MyMemoryMatch {
    #[serde(default)]
    pub segment: String,
    #[serde(default)]
    pub translation: String,
    /// Returned as a string by some corpus revisions, a number by others.
    #[serde(default)]
    pub quality: Value,
    #[serde(rename = "match", default)]
    pub match_score: Value,
    #[serde(rename = "created-by", default)]
    pub created_by: String,
}

impl MyMemoryMatch {
    pub fn quality_score(&self) -> i64 {
        match &self.quality {
            Value::Number(n) => n.as_i64().unwrap_or(0),
            Value::String(s) => s.parse().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn match_score(&self) -> f64 {
        match &self.match_score {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

/// Pick the highest-quality accepted translation for `source`, if any.
pub fn best_match(matches: &[MyMemoryMatch], source: &str) -> Option<String> {
    let needle = source.to_lowercase();

    let mut accepted: Vec<&MyMemoryMatch> = matches
        .iter()
        .filter(|m| {
            m.segment.to_lowercase() == needle
                && TRUSTED_CREATORS.contains(&m.created_by.as_str())
                && !DENYLIST.contains(&m.translation.to_lowercase().as_str())
                && m.match_score() >= MIN_MATCH
        })
        .collect();

    accepted.sort_by_key(|m| std::cmp::Reverse(m.quality_score()));
    accepted.first().map(|m| m.translation.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> MyMemoryResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn accepts_exact_trusted_match_highest_quality_first() {
        let resp = parse(
            r#"{"matches":[
                {"segment":"bore","translation":"morn","quality":"40","match":1.0,"created-by":"Google"},
                {"segment":"bore","translation":"morning","quality":"74","match":0.99,"created-by":"MateCat"}
            ]}"#,
        );
        assert_eq!(best_match(&resp.matches, "Bore").as_deref(), Some("morning"));
    }

    #[test]
    fn rejects_untrusted_contributors() {
        let resp = parse(
            r#"{"matches":[
                {"segment":"bore","translation":"morning","quality":"90","match":1.0,"created-by":"anonymous"}
            ]}"#,
        );
        assert_eq!(best_match(&resp.matches, "bore"), None);
    }

    #[test]
    fn rejects_partial_segment_matches() {
        let resp = parse(
            r#"{"matches":[
                {"segment":"bore da","translation":"good morning","quality":"90","match":1.0,"created-by":"Google"}
            ]}"#,
        );
        assert_eq!(best_match(&resp.matches, "bore"), None);
    }

    #[test]
    fn rejects_denylisted_outputs_and_low_match_scores() {
        let resp = parse(
            r#"{"matches":[
                {"segment":"croeso","translation":"Ipiales","quality":"99","match":1.0,"created-by":"Google"},
                {"segment":"croeso","translation":"welcome","quality":"80","match":0.5,"created-by":"Google"}
            ]}"#,
        );
        assert_eq!(best_match(&resp.matches, "croeso"), None);
    }

    #[test]
    fn tolerates_numeric_quality_and_string_match() {
        let resp = parse(
            r#"{"matches":[
                {"segment":"nos","translation":"night","quality":70,"match":"0.98","created-by":"SDL"}
            ]}"#,
        );
        assert_eq!(best_match(&resp.matches, "nos").as_deref(), Some("night"));
    }

    #[test]
    fn empty_matches_yield_none() {
        let resp = parse(r#"{"matches":[]}"#);
        assert_eq!(best_match(&resp.matches, "bore"), None);
        let resp = parse(r#"{}"#);
        assert_eq!(best_match(&resp.matches, "bore"), None);
    }
}
