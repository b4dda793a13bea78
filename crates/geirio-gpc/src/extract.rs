//! Tolerant extraction over the GPC servlet's semi-structured markup.
//!
//! The response format has drifted over time and is not a stable schema, so
//! each shape is handled by an independent pure strategy. Strategies are
//! tried in a fixed order and the first one yielding any candidate wins;
//! there is no exception-driven fallback.

use std::sync::LazyLock;

use geirio_types::{DefinitionBlock, Lang, MatchCandidate};
use regex::Regex;

static LIVE_MATCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<match>.*?<word>(.*?)</word>.*?<matchId>(.*?)</matchId>.*?</match>")
        .expect("live match pattern")
});

static LEGACY_MATCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<match>.*?<word>(.*?)</word>.*?<matchid>(.*?)</matchid>.*?</match>")
        .expect("legacy match pattern")
});

static ANY_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<word[^>]*>(.*?)</word>").expect("word pattern")
});

static ANY_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<matchid[^>]*>([^<]+)</matchid>").expect("id pattern")
});

static INLINE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("inline tag pattern"));

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("line break pattern"));

static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p>").expect("paragraph pattern"));

static DEFINITION_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<definition[^>]*>(.*?)</definition>").expect("definition pattern")
});

static POS_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<pos[^>]*>(.*?)</pos>").expect("pos pattern"));

/// Strip embedded inline markup (emphasis tags and the like) from text that
/// will be shown to the user.
pub fn strip_inline(text: &str) -> String {
    INLINE_TAG.replace_all(text, "").trim().to_string()
}

/// Extract match candidates from a search response, first non-empty
/// strategy wins. This function only reads the markup; the Welsh-only
/// direct-lookup fallback is applied afterwards by
/// [`with_direct_fallback`].
pub fn search_candidates(body: &str) -> Vec<MatchCandidate> {
    for strategy in [candidates_live, candidates_legacy, candidate_scan] {
        let found = strategy(body);
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

/// Strategy 4, Welsh direction only: when every markup strategy came up
/// empty, fall back to one synthetic by-term candidate so the entry
/// endpoint can resolve the literal query instead of a backend id.
pub fn with_direct_fallback(
    candidates: Vec<MatchCandidate>,
    query: &str,
    lang: Lang,
) -> Vec<MatchCandidate> {
    if candidates.is_empty() && lang == Lang::Welsh {
        return vec![MatchCandidate::ByTerm {
            term: query.trim().to_string(),
        }];
    }
    candidates
}

/// Strategy 1: current servlet schema, case-sensitive `<matchId>` tags.
fn candidates_live(body: &str) -> Vec<MatchCandidate> {
    LIVE_MATCH
        .captures_iter(body)
        .filter_map(|c| candidate(&c[1], &c[2]))
        .collect()
}

/// Strategy 2: legacy all-lowercase tag variant.
fn candidates_legacy(body: &str) -> Vec<MatchCandidate> {
    LEGACY_MATCH
        .captures_iter(body)
        .filter_map(|c| candidate(&c[1], &c[2]))
        .collect()
}

/// Strategy 3: best-effort scan pairing the first headword with the first
/// id found anywhere in the body. At most one candidate.
fn candidate_scan(body: &str) -> Vec<MatchCandidate> {
    let word = ANY_WORD.captures(body).map(|c| c[1].to_string());
    let id = ANY_ID.captures(body).map(|c| c[1].to_string());
    match (word, id) {
        (Some(word), Some(id)) => candidate(&word, &id).into_iter().collect(),
        _ => Vec::new(),
    }
}

fn candidate(word: &str, id: &str) -> Option<MatchCandidate> {
    let headword = strip_inline(word);
    let id = id.trim().to_string();
    if headword.is_empty() || id.is_empty() {
        return None;
    }
    Some(MatchCandidate::ById { id, headword })
}

/// Extract definition blocks from an entry response.
///
/// Paragraph-level extraction is preferred (line breaks become literal
/// newlines, other inline markup is stripped); block-level `<definition>`
/// tags are the fallback. A discovered part-of-speech tag attaches to the
/// first block only.
pub fn definition_blocks(body: &str) -> Vec<DefinitionBlock> {
    let mut texts = paragraphs(body);
    if texts.is_empty() {
        texts = definition_tags(body);
    }

    let pos = entry_pos(body);
    texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| DefinitionBlock {
            text,
            part_of_speech: if i == 0 { pos.clone() } else { None },
        })
        .collect()
}

fn paragraphs(body: &str) -> Vec<String> {
    PARAGRAPH
        .captures_iter(body)
        .map(|c| clean_block(&c[1]))
        .filter(|t| !t.is_empty())
        .collect()
}

fn definition_tags(body: &str) -> Vec<String> {
    DEFINITION_TAG
        .captures_iter(body)
        .map(|c| clean_block(&c[1]))
        .filter(|t| !t.is_empty())
        .collect()
}

fn entry_pos(body: &str) -> Option<String> {
    POS_TAG
        .captures(body)
        .map(|c| strip_inline(&c[1]))
        .filter(|p| !p.is_empty())
}

fn clean_block(raw: &str) -> String {
    let with_breaks = LINE_BREAK.replace_all(raw, "\n");
    INLINE_TAG
        .replace_all(&with_breaks, "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_schema_yields_all_candidates() {
        let body = "<matches>\
            <match><word>bore</word><matchId>101</matchId></match>\
            <match><word>boreol</word><matchId>102</matchId></match>\
            </matches>";
        let found = search_candidates(body);
        assert_eq!(found.len(), 2);
        assert_eq!(
            found[0],
            MatchCandidate::ById {
                id: "101".into(),
                headword: "bore".into()
            }
        );
    }

    #[test]
    fn legacy_lowercase_schema_is_second_strategy() {
        let body = "<match><word>nos</word><matchid>7</matchid></match>";
        let found = search_candidates(body);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].headword(), "nos");
    }

    #[test]
    fn scan_strategy_pairs_first_word_with_first_id() {
        // No well-formed match blocks at all; fields scattered.
        let body = "<result><WORD>hwyl</WORD><junk/><MATCHID>55</MATCHID><WORD>x</WORD></result>";
        let found = search_candidates(body);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0],
            MatchCandidate::ById {
                id: "55".into(),
                headword: "hwyl".into()
            }
        );
    }

    #[test]
    fn headword_emphasis_markup_is_stripped() {
        let body = "<match><word><b>canu</b></word><matchId>9</matchId></match>";
        let found = search_candidates(body);
        assert_eq!(found[0].headword(), "canu");
    }

    #[test]
    fn zero_candidates_is_empty_not_error() {
        assert!(search_candidates("<matches></matches>").is_empty());
        assert!(search_candidates("plain text, no tags").is_empty());
    }

    #[test]
    fn welsh_direction_falls_back_to_a_synthetic_by_term_candidate() {
        let found = with_direct_fallback(Vec::new(), " bore ", Lang::Welsh);
        assert_eq!(found, vec![MatchCandidate::ByTerm { term: "bore".into() }]);
    }

    #[test]
    fn english_direction_has_no_direct_lookup_fallback() {
        assert!(with_direct_fallback(Vec::new(), "morning", Lang::English).is_empty());
    }

    #[test]
    fn direct_fallback_leaves_real_candidates_alone() {
        let real = vec![MatchCandidate::ById {
            id: "101".into(),
            headword: "bore".into(),
        }];
        let found = with_direct_fallback(real.clone(), "bore", Lang::Welsh);
        assert_eq!(found, real);
    }

    #[test]
    fn paragraphs_win_over_definition_tags() {
        let body = "<entry><p>first sense</p><definition>ignored</definition></entry>";
        let blocks = definition_blocks(body);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "first sense");
    }

    #[test]
    fn definition_tags_carry_pos_on_first_block_only() {
        let body = "<entry><pos>n</pos>\
            <definition>a dog</definition>\
            <definition>a rascal</definition></entry>";
        let blocks = definition_blocks(body);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].part_of_speech.as_deref(), Some("n"));
        assert_eq!(blocks[1].part_of_speech, None);
        assert_eq!(blocks[1].text, "a rascal");
    }

    #[test]
    fn line_breaks_become_newlines_and_inline_markup_is_stripped() {
        let body = "<entry><p>sense one<br/>continued, <i>fig.</i> sense</p></entry>";
        let blocks = definition_blocks(body);
        assert_eq!(blocks[0].text, "sense one\ncontinued, fig. sense");
    }

    #[test]
    fn empty_entry_yields_empty_list() {
        assert!(definition_blocks("<entry></entry>").is_empty());
    }
}
