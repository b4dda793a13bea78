use geirio_types::{Lang, WordRecord};
use roxmltree::{Document, Node};

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("failed to read lexicon asset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse lexicon markup: {0}")]
    Parse(#[from] roxmltree::Error),
}

/// The bundled Welsh-English lexicon, parsed into a flat in-memory table.
///
/// The source document is irregular across asset revisions: entries can sit
/// at `dictionary/section/e`, `dictionary/e`, or at the root; the pair
/// element may be wrapped in `<p>` or spelled directly; either side may be
/// plain text or mixed content carrying an `<s n="..."/>` part-of-speech
/// marker. Entries missing a side are noise and are dropped silently.
pub struct Lexicon {
    words: Vec<WordRecord>,
}

impl Lexicon {
    pub fn empty() -> Self {
        Self { words: Vec::new() }
    }

    pub fn parse(xml: &str) -> Result<Self, LexiconError> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();

        let entries: Vec<Node> = if root.has_tag_name("e") {
            vec![root]
        } else {
            root.descendants()
                .filter(|n| n.is_element() && n.has_tag_name("e"))
                .collect()
        };

        let total = entries.len();
        let words: Vec<WordRecord> = entries
            .into_iter()
            .filter_map(parse_entry)
            .collect();

        let dropped = total - words.len();
        if dropped > 0 {
            tracing::warn!(dropped, total, "lexicon entries dropped during parse");
        }
        tracing::info!(count = words.len(), "lexicon loaded");

        Ok(Self { words })
    }

    pub fn words(&self) -> &[WordRecord] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Case-insensitive substring search on the chosen language field.
    pub fn search(&self, query: &str, lang: Lang) -> Vec<WordRecord> {
        let needle = query.trim().to_lowercase();
        self.words
            .iter()
            .filter(|w| w.field(lang).to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

fn parse_entry(entry: Node) -> Option<WordRecord> {
    // Pair may be wrapped in <p> or live directly on the entry.
    let pair = entry
        .children()
        .find(|n| n.is_element() && n.has_tag_name("p"))
        .unwrap_or(entry);

    let left = pair
        .children()
        .find(|n| n.is_element() && n.has_tag_name("l"))?;
    let right = pair
        .children()
        .find(|n| n.is_element() && n.has_tag_name("r"))?;

    let welsh = side_text(left);
    let english = side_text(right);
    if welsh.is_empty() || english.is_empty() {
        return None;
    }

    // POS may be carried on either side; the Welsh side wins.
    let part_of_speech = side_pos(left).or_else(|| side_pos(right));

    Some(WordRecord {
        welsh,
        english,
        part_of_speech,
    })
}

/// Concatenated text content of a side, ignoring marker elements.
fn side_text(node: Node) -> String {
    let mut text = String::new();
    for d in node.descendants() {
        if d.is_text() {
            if let Some(t) = d.text() {
                text.push_str(t);
            }
        }
    }
    text.trim().to_string()
}

/// Part of speech from an `<s n="..."/>` child, when present.
fn side_pos(node: Node) -> Option<String> {
    node.descendants()
        .find(|n| n.is_element() && n.has_tag_name("s"))
        .and_then(|s| s.attribute("n"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTIONED: &str = r#"
        <dictionary>
          <section>
            <e><p><l>ci<s n="n"/></l><r>dog</r></p></e>
            <e><p><l>cath</l><r>cat<s n="n"/></r></p></e>
            <e><p><l>rhedeg</l><r>to run<s n="vblex"/></r></p></e>
          </section>
        </dictionary>"#;

    #[test]
    fn parses_sectioned_document() {
        let lex = Lexicon::parse(SECTIONED).unwrap();
        assert_eq!(lex.len(), 3);
        assert_eq!(lex.words()[0].welsh, "ci");
        assert_eq!(lex.words()[0].english, "dog");
        assert_eq!(lex.words()[0].part_of_speech.as_deref(), Some("n"));
    }

    #[test]
    fn pos_falls_back_to_english_side() {
        let lex = Lexicon::parse(SECTIONED).unwrap();
        assert_eq!(lex.words()[1].part_of_speech.as_deref(), Some("n"));
    }

    #[test]
    fn parses_flat_document_without_section() {
        let xml = r#"<dictionary><e><p><l>bore</l><r>morning</r></p></e></dictionary>"#;
        let lex = Lexicon::parse(xml).unwrap();
        assert_eq!(lex.len(), 1);
        assert_eq!(lex.words()[0].english, "morning");
    }

    #[test]
    fn tolerates_unwrapped_pair() {
        let xml = r#"<dictionary><e><l>nos</l><r>night</r></e></dictionary>"#;
        let lex = Lexicon::parse(xml).unwrap();
        assert_eq!(lex.len(), 1);
        assert_eq!(lex.words()[0].welsh, "nos");
    }

    #[test]
    fn drops_entries_missing_a_side() {
        let xml = r#"
            <dictionary>
              <e><p><l>da</l><r>good</r></p></e>
              <e><p><l>drwg</l><r></r></p></e>
              <e><p><l></l><r>orphan</r></p></e>
              <e><p><l>lonely</l></p></e>
            </dictionary>"#;
        let lex = Lexicon::parse(xml).unwrap();
        assert_eq!(lex.len(), 1);
        assert_eq!(lex.words()[0].welsh, "da");
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let lex = Lexicon::parse(SECTIONED).unwrap();
        let hits = lex.search("CI", Lang::Welsh);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].welsh, "ci");

        let hits = lex.search("run", Lang::English);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].welsh, "rhedeg");
    }

    #[test]
    fn malformed_markup_is_an_error() {
        assert!(Lexicon::parse("<dictionary><e>").is_err());
    }
}
