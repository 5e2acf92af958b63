//! Name similarity for benchmark lookup.
//!
//! Extracted test names are noisy ("Platelet Count", "Haemoglobin (Hb)",
//! "SGPT/ALT"). Names are reduced to lower-case alphanumeric tokens and
//! compared two ways; the better score wins.

/// Candidates scoring below this are not matches.
pub const MIN_MATCH_SCORE: f64 = 0.6;

/// Minimum length for typo tolerance, on tokens and on whole names.
const FUZZY_MIN_LEN: usize = 5;

/// Maximum edit distance between two tokens considered the same word.
const FUZZY_MAX_DISTANCE: usize = 2;

/// Lower-case, non-alphanumerics become separators, runs collapse to one space.
pub fn normalize_name(name: &str) -> String {
    tokens(name).join(" ")
}

pub fn tokens(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Levenshtein distance (insert, delete, substitute all cost 1).
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for (i, &a_ch) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &b_ch) in b_chars.iter().enumerate() {
            let cost = usize::from(a_ch != b_ch);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

fn tokens_match(a: &str, b: &str) -> bool {
    a == b
        || (a.chars().count() >= FUZZY_MIN_LEN
            && b.chars().count() >= FUZZY_MIN_LEN
            && edit_distance(a, b) <= FUZZY_MAX_DISTANCE)
}

/// Dice coefficient over tokens. Each token of `b` pairs with at most one of `a`.
fn token_dice(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let mut used = vec![false; b.len()];
    let mut matched = 0usize;
    for ta in a {
        if let Some(j) = (0..b.len()).find(|&j| !used[j] && tokens_match(ta, &b[j])) {
            used[j] = true;
            matched += 1;
        }
    }
    (2 * matched) as f64 / (a.len() + b.len()) as f64
}

fn string_similarity(a: &str, b: &str) -> f64 {
    let la = a.chars().count();
    let lb = b.chars().count();
    if la < FUZZY_MIN_LEN || lb < FUZZY_MIN_LEN {
        return 0.0;
    }
    1.0 - edit_distance(a, b) as f64 / la.max(lb) as f64
}

/// Similarity of two already-tokenized names, in [0, 1].
pub fn similarity(a: &[String], b: &[String]) -> f64 {
    if a == b {
        return if a.is_empty() { 0.0 } else { 1.0 };
    }
    token_dice(a, b).max(string_similarity(&a.join(" "), &b.join(" ")))
}

/// Score `query` against every key, keep those at or above [`MIN_MATCH_SCORE`],
/// and order by descending score. Ties keep key order.
pub fn rank<'a, I>(query: &str, keys: I) -> Vec<(usize, f64)>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let query = tokens(query);
    let mut scored: Vec<(usize, f64)> = keys
        .into_iter()
        .enumerate()
        .map(|(idx, key)| (idx, similarity(&query, key)))
        .filter(|(_, score)| *score >= MIN_MATCH_SCORE)
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Vec<String> {
        tokens(s)
    }

    #[test]
    fn normalization() {
        assert_eq!(normalize_name("  SGPT/ALT "), "sgpt alt");
        assert_eq!(normalize_name("Haemoglobin (Hb)"), "haemoglobin hb");
        assert_eq!(normalize_name("---"), "");
    }

    #[test]
    fn edit_distance_basic() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("tsh", "tsh"), 0);
        assert_eq!(edit_distance("creatinine", "creatinin"), 1);
    }

    #[test]
    fn exact_name_scores_one() {
        assert_eq!(similarity(&t("Hemoglobin"), &t("hemoglobin")), 1.0);
    }

    #[test]
    fn spelling_variant_matches_by_token() {
        assert_eq!(similarity(&t("Haemoglobin"), &t("Hemoglobin")), 1.0);
    }

    #[test]
    fn word_order_ignored() {
        assert_eq!(similarity(&t("Total Bilirubin"), &t("Bilirubin Total")), 1.0);
    }

    #[test]
    fn extra_qualifier_still_matches() {
        let score = similarity(&t("Platelet Count"), &t("Platelets"));
        assert!((score - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn short_codes_need_exact_match() {
        assert_eq!(similarity(&t("MCH"), &t("MCV")), 0.0);
        assert_eq!(similarity(&t("T3"), &t("T4")), 0.0);
        assert_eq!(similarity(&t("TSH"), &t("TSH")), 1.0);
    }

    #[test]
    fn empty_query_never_matches() {
        assert_eq!(similarity(&t(""), &t("")), 0.0);
        assert!(rank("", [t("TSH").as_slice()]).is_empty());
    }

    #[test]
    fn rank_orders_by_score_then_key_order() {
        let keys = [t("SGPT"), t("ALT"), t("SGOT")];
        let ranked = rank("SGPT/ALT", keys.iter().map(Vec::as_slice));
        let order: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn rank_drops_weak_candidates() {
        let keys = [t("Hematocrit"), t("Hemoglobin")];
        let ranked = rank("Hemoglobin", keys.iter().map(Vec::as_slice));
        assert_eq!(ranked, vec![(1, 1.0)]);
    }
}
