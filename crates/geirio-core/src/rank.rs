use geirio_types::{Lang, WordRecord};

/// Order local search results for display: exact case-insensitive matches
/// on the query first, then partial matches, each tier alphabetical on the
/// matched-language field. Exact hits must never be buried under
/// alphabetically-earlier partial hits.
pub fn rank_local(mut records: Vec<WordRecord>, query: &str, lang: Lang) -> Vec<WordRecord> {
    let needle = query.trim().to_lowercase();
    records.sort_by(|a, b| {
        let a_field = a.field(lang).to_lowercase();
        let b_field = b.field(lang).to_lowercase();
        let a_exact = a_field == needle;
        let b_exact = b_field == needle;
        b_exact.cmp(&a_exact).then_with(|| a_field.cmp(&b_field))
    });
    records
}
