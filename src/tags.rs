//! Tag and SEO keyword generation for viral reach.
//!
//! Everything here is pure string work over static vocabularies. The
//! sampling steps take a caller-supplied [`rand::Rng`] so the editor gets
//! varied suggestions while tests stay reproducible.

use indexmap::{IndexMap, IndexSet};
use rand::{seq::SliceRandom, Rng};

/// Probability that a category tag is included without a text match.
pub const TAG_INCLUDE_P: f64 = 0.3;
/// Probability that a category SEO phrase is included without a text match.
pub const KEYWORD_INCLUDE_P: f64 = 0.4;

pub const MAX_AUTO_TAGS: usize = 12;
pub const MAX_SEO_KEYWORDS: usize = 10;
pub const MAX_CLEAN_TAGS: usize = 15;
pub const MAX_TAG_LEN: usize = 50;

const VIRAL_TAGS: &[&str] = &[
    "viral", "trending", "breaking news", "hot topic", "must read",
    "exclusive", "insider", "secret", "revealed", "shocking",
    "amazing", "incredible", "unbelievable", "mind-blowing",
];

const SEO_TAGS: &[&str] = &[
    "high reach", "seo optimized", "google trending", "search ranking",
    "viral content", "social media", "shareable", "engaging",
    "clickbait", "attention grabbing", "buzzworthy",
];

const FINANCIAL_TAGS: &[&str] = &[
    "investment", "finance", "money", "wealth", "millionaire",
    "billionaire", "rich", "success", "profit", "earnings",
    "stock market", "cryptocurrency", "bitcoin", "trading",
    "portfolio", "assets", "returns", "dividends",
];

const TECH_TAGS: &[&str] = &[
    "technology", "innovation", "future", "ai", "artificial intelligence",
    "machine learning", "automation", "digital", "tech stocks",
    "startup", "unicorn", "disruption", "revolutionary",
];

const REAL_ESTATE_TAGS: &[&str] = &[
    "real estate", "property", "housing", "mortgage", "rental",
    "investment property", "commercial", "residential", "flipping",
    "landlord", "tenant", "appreciation", "equity",
];

const CRYPTO_TAGS: &[&str] = &[
    "cryptocurrency", "bitcoin", "ethereum", "crypto", "blockchain",
    "defi", "nft", "altcoin", "mining", "wallet", "exchange",
    "trading", "hodl", "bull market", "bear market",
];

const AGE_TAGS: &[&str] = &[
    "young millionaire", "millennial", "gen z", "college student",
    "teenager", "20s", "30s", "40s", "retirement", "early retirement",
];

const SUCCESS_TAGS: &[&str] = &[
    "success story", "rags to riches", "self-made", "entrepreneur",
    "business owner", "ceo", "founder", "startup", "scaling",
    "growth", "expansion", "acquisition", "ipo",
];

const HIGH_VOLUME_KEYWORDS: &[&str] = &[
    "news", "today", "latest", "breaking", "viral", "trending", "popular", "hot",
    "success", "millionaire", "billionaire", "rich", "wealthy", "money", "earnings",
    "investment", "trading", "crypto", "bitcoin", "stocks", "real estate", "business",
    "entrepreneur", "startup", "technology", "ai", "future", "prediction", "analysis",
];

const LONG_TAIL_KEYWORDS: &[&str] = &[
    "how to make money", "investment strategies", "crypto trading tips", "real estate investment",
    "young millionaire stories", "success stories", "wealth building tips", "financial freedom",
    "passive income ideas", "side hustle ideas", "entrepreneur success", "startup success stories",
];

const MONEY_CUES: &[&str] = &["money", "dollar", "million", "billion"];
const AGE_CUES: &[&str] = &["year old", "age", "young", "teen"];
const SUCCESS_CUES: &[&str] = &["success", "made", "earned", "built"];

/// The text fields of a post draft that generation works from. Missing
/// fields are just empty strings; an unknown category contributes nothing.
#[derive(Debug, Clone, Copy)]
pub struct TagInput<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub content: &'a str,
    pub category: &'a str,
}

fn category_tags(category: &str) -> Vec<&'static str> {
    match category {
        "Breaking News" => [VIRAL_TAGS, SEO_TAGS, &["breaking", "urgent", "latest"][..]].concat(),
        "Viral Stories" => [VIRAL_TAGS, SUCCESS_TAGS, AGE_TAGS, &["inspirational"][..]].concat(),
        "AI & Tech" => [TECH_TAGS, VIRAL_TAGS, &["innovation", "disruption"][..]].concat(),
        "Crypto" => [CRYPTO_TAGS, VIRAL_TAGS, SUCCESS_TAGS].concat(),
        "Real Estate" => [REAL_ESTATE_TAGS, VIRAL_TAGS, SUCCESS_TAGS].concat(),
        "Investment" => [FINANCIAL_TAGS, VIRAL_TAGS, SUCCESS_TAGS].concat(),
        _ => Vec::new(),
    }
}

fn category_seo_keywords(category: &str) -> &'static [&'static str] {
    match category {
        "Breaking News" => &[
            "breaking news", "latest news", "urgent news", "news today", "current events",
            "news update", "live news", "news alert", "top news", "news headlines",
        ],
        "Viral Stories" => &[
            "viral story", "success story", "inspirational story", "amazing story", "incredible story",
            "viral video", "viral post", "trending story", "popular story", "shareable story",
        ],
        "AI & Tech" => &[
            "artificial intelligence", "ai technology", "tech news", "innovation", "technology trends",
            "ai tools", "machine learning", "tech startup", "digital transformation", "tech industry",
        ],
        "Crypto" => &[
            "cryptocurrency", "bitcoin news", "crypto market", "blockchain technology", "crypto trading",
            "digital currency", "crypto investment", "altcoin news", "crypto analysis", "crypto trends",
        ],
        "Real Estate" => &[
            "real estate news", "property market", "housing market", "real estate investment", "property trends",
            "real estate tips", "property investment", "real estate market", "housing trends", "property news",
        ],
        "Investment" => &[
            "investment news", "stock market", "investment tips", "financial news", "investment strategy",
            "portfolio management", "investment advice", "market analysis", "investment opportunities", "wealth building",
        ],
        _ => &[],
    }
}

fn assemble_text(input: &TagInput<'_>) -> String {
    format!("{} {} {}", input.title, input.description, input.content).to_lowercase()
}

fn contains_any(text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| text.contains(cue))
}

/// Shuffle-and-take sampling without replacement.
fn sample<R: Rng>(pool: &[&'static str], count: usize, rng: &mut R) -> Vec<&'static str> {
    let mut pool = pool.to_vec();
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

/// Most frequent tokens of `text`, longest-standing ties first.
///
/// Non-word characters are blanked, tokens of length <= 3 dropped, and the
/// remaining tokens ranked by frequency. The sort is stable over first-seen
/// order, so repeated runs agree on ties.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();

    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for word in cleaned.split_whitespace().filter(|w| w.len() > 3) {
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(5)
        .map(|(word, _)| word.to_string())
        .collect()
}

/// Derive up to [`MAX_AUTO_TAGS`] discoverability tags for a draft.
///
/// Category tags are included on a substring match, or with probability
/// [`TAG_INCLUDE_P`] regardless; a few viral and SEO tags are always
/// sampled in; extracted keywords and cue-triggered topical tags round out
/// the set. Insertion order is preserved.
pub fn generate_auto_tags<R: Rng>(input: &TagInput<'_>, rng: &mut R) -> Vec<String> {
    let all_text = assemble_text(input);
    let mut tags: IndexSet<String> = IndexSet::new();

    for tag in category_tags(input.category) {
        if all_text.contains(&tag.to_lowercase()) || rng.gen::<f64>() < TAG_INCLUDE_P {
            tags.insert(tag.to_string());
        }
    }

    let viral_count = rng.gen_range(1..=4).min(3);
    for tag in sample(VIRAL_TAGS, viral_count, rng) {
        tags.insert(tag.to_string());
    }

    let seo_count = rng.gen_range(1..=3).min(2);
    for tag in sample(SEO_TAGS, seo_count, rng) {
        tags.insert(tag.to_string());
    }

    for keyword in extract_keywords(&all_text).into_iter().take(3) {
        tags.insert(keyword);
    }

    if contains_any(&all_text, MONEY_CUES) {
        let count = rng.gen_range(1..=3).min(2);
        for tag in sample(FINANCIAL_TAGS, count, rng) {
            tags.insert(tag.to_string());
        }
    }

    if contains_any(&all_text, AGE_CUES) {
        let count = rng.gen_range(1..=3).min(2);
        for tag in sample(AGE_TAGS, count, rng) {
            tags.insert(tag.to_string());
        }
    }

    if contains_any(&all_text, SUCCESS_CUES) {
        let count = rng.gen_range(1..=3).min(2);
        for tag in sample(SUCCESS_TAGS, count, rng) {
            tags.insert(tag.to_string());
        }
    }

    tags.into_iter().take(MAX_AUTO_TAGS).collect()
}

/// Derive up to [`MAX_SEO_KEYWORDS`] search-engine keyword phrases.
///
/// Same skeleton as [`generate_auto_tags`] over the keyword catalogs, except
/// the cue triggers append fixed phrases instead of sampling.
pub fn generate_seo_keywords<R: Rng>(input: &TagInput<'_>, rng: &mut R) -> Vec<String> {
    let all_text = assemble_text(input);
    let mut keywords: IndexSet<String> = IndexSet::new();

    for keyword in category_seo_keywords(input.category) {
        if all_text.contains(&keyword.to_lowercase()) || rng.gen::<f64>() < KEYWORD_INCLUDE_P {
            keywords.insert(keyword.to_string());
        }
    }

    let high_volume_count = rng.gen_range(1..=4).min(3);
    for keyword in sample(HIGH_VOLUME_KEYWORDS, high_volume_count, rng) {
        keywords.insert(keyword.to_string());
    }

    let long_tail_count = rng.gen_range(1..=3).min(2);
    for keyword in sample(LONG_TAIL_KEYWORDS, long_tail_count, rng) {
        keywords.insert(keyword.to_string());
    }

    for keyword in extract_keywords(&all_text).into_iter().take(4) {
        keywords.insert(keyword);
    }

    if contains_any(&all_text, MONEY_CUES) {
        keywords.insert("financial news".to_string());
        keywords.insert("money making".to_string());
        keywords.insert("wealth building".to_string());
    }

    if contains_any(&all_text, AGE_CUES) {
        keywords.insert("young entrepreneur".to_string());
        keywords.insert("millennial success".to_string());
        keywords.insert("gen z success".to_string());
    }

    if contains_any(&all_text, SUCCESS_CUES) {
        keywords.insert("success story".to_string());
        keywords.insert("entrepreneur success".to_string());
        keywords.insert("business success".to_string());
    }

    keywords.into_iter().take(MAX_SEO_KEYWORDS).collect()
}

/// Deterministic tag suggestions for the editor's category picker.
pub fn suggested_tags(category: &str) -> Vec<String> {
    let mut out: IndexSet<&str> = IndexSet::new();
    out.extend(category_tags(category));
    out.extend(&VIRAL_TAGS[..3]);
    out.extend(&SEO_TAGS[..2]);
    out.into_iter().take(10).map(str::to_string).collect()
}

/// Deterministic keyword suggestions for the editor's category picker.
pub fn suggested_seo_keywords(category: &str) -> Vec<String> {
    let mut out: IndexSet<&str> = IndexSet::new();
    out.extend(category_seo_keywords(category));
    out.extend(&HIGH_VOLUME_KEYWORDS[..3]);
    out.extend(&LONG_TAIL_KEYWORDS[..2]);
    out.into_iter().take(8).map(str::to_string).collect()
}

/// Normalize a user-edited tag list: trim, lowercase, drop empty and
/// over-length entries, dedup keeping the first occurrence, cap at
/// [`MAX_CLEAN_TAGS`].
pub fn clean_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: IndexSet<String> = IndexSet::new();
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if tag.is_empty() || tag.chars().count() > MAX_TAG_LEN {
            continue;
        }
        seen.insert(tag);
    }
    seen.into_iter().take(MAX_CLEAN_TAGS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn input<'a>(title: &'a str, content: &'a str, category: &'a str) -> TagInput<'a> {
        TagInput {
            title,
            description: "",
            content,
            category,
        }
    }

    // StepRng(0, 0) makes every probabilistic include fire and every
    // sampled count come out as 1.
    fn always_include() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn extract_keywords_empty_text() {
        assert!(extract_keywords("").is_empty());
    }

    #[test]
    fn extract_keywords_drops_short_tokens() {
        let keywords = extract_keywords("the ai era of gold and risk");
        assert!(keywords.iter().all(|k| k.len() > 3));
        assert_eq!(keywords, vec!["gold", "risk"]);
    }

    #[test]
    fn extract_keywords_ranks_by_frequency() {
        let keywords = extract_keywords("wealth market wealth market wealth gold");
        assert_eq!(keywords, vec!["wealth", "market", "gold"]);
    }

    #[test]
    fn extract_keywords_breaks_ties_by_first_seen() {
        let keywords = extract_keywords("alpha beta alpha beta gamma");
        assert_eq!(keywords, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn extract_keywords_strips_punctuation() {
        let keywords = extract_keywords("bitcoin, bitcoin! bitcoin? surge.");
        assert_eq!(keywords, vec!["bitcoin", "surge"]);
    }

    #[test]
    fn extract_keywords_caps_at_five() {
        let keywords = extract_keywords("apple banana cherry durian elderberry feijoa grape");
        assert_eq!(keywords.len(), 5);
    }

    #[test]
    fn auto_tags_deterministic_under_seeded_rng() {
        let draft = input("Bitcoin Hits 100K", "crypto markets went wild today", "Crypto");
        let a = generate_auto_tags(&draft, &mut StdRng::seed_from_u64(7));
        let b = generate_auto_tags(&draft, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn seo_keywords_deterministic_under_seeded_rng() {
        let draft = input("Bitcoin Hits 100K", "crypto markets went wild today", "Crypto");
        let a = generate_seo_keywords(&draft, &mut StdRng::seed_from_u64(7));
        let b = generate_seo_keywords(&draft, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn auto_tags_capped_at_twelve() {
        let draft = input("Investment news", "profit wealth money stock market", "Investment");
        for seed in 0..20 {
            let tags = generate_auto_tags(&draft, &mut StdRng::seed_from_u64(seed));
            assert!(tags.len() <= MAX_AUTO_TAGS);
        }
    }

    #[test]
    fn seo_keywords_capped_at_ten() {
        let draft = input("Investment news", "profit wealth money stock market", "Investment");
        for seed in 0..20 {
            let keywords = generate_seo_keywords(&draft, &mut StdRng::seed_from_u64(seed));
            assert!(keywords.len() <= MAX_SEO_KEYWORDS);
        }
    }

    #[test]
    fn million_cue_fires_financial_branch() {
        // Unknown category keeps the set small enough that the trigger's
        // contribution survives the cap.
        let draft = input("She turned a side gig into a million", "", "");
        let tags = generate_auto_tags(&draft, &mut always_include());
        assert!(tags.iter().any(|t| FINANCIAL_TAGS.contains(&t.as_str())));
    }

    #[test]
    fn money_cue_adds_fixed_seo_phrases() {
        let draft = input("How he made a billion dollar fortune", "", "");
        let keywords = generate_seo_keywords(&draft, &mut always_include());
        assert!(keywords.contains(&"financial news".to_string()));
        assert!(keywords.contains(&"money making".to_string()));
        assert!(keywords.contains(&"wealth building".to_string()));
    }

    #[test]
    fn age_cue_adds_fixed_seo_phrases() {
        let draft = input("19 year old builds an empire", "", "");
        let keywords = generate_seo_keywords(&draft, &mut always_include());
        assert!(keywords.contains(&"young entrepreneur".to_string()));
    }

    #[test]
    fn category_tags_included_on_substring_match() {
        // "never include" side of the probabilistic branch: a matching tag
        // still gets in because the substring check short-circuits first.
        let draft = input("bitcoin rallies", "", "Crypto");
        let tags = generate_auto_tags(&draft, &mut StdRng::seed_from_u64(3));
        assert!(tags.contains(&"bitcoin".to_string()));
    }

    #[test]
    fn unknown_category_contributes_nothing() {
        let draft = input("plain words only here", "", "Gardening");
        let tags = generate_auto_tags(&draft, &mut always_include());
        // viral sample + seo sample + extracted keywords, nothing else
        assert!(tags.len() <= 2 + 5);
    }

    #[test]
    fn suggested_tags_nonempty_for_unknown_category() {
        let tags = suggested_tags("No Such Category");
        assert!(!tags.is_empty());
        assert!(tags.len() <= 10);
        assert_eq!(tags[0], "viral");
    }

    #[test]
    fn suggested_seo_keywords_nonempty_for_unknown_category() {
        let keywords = suggested_seo_keywords("No Such Category");
        assert!(!keywords.is_empty());
        assert!(keywords.len() <= 8);
        assert_eq!(keywords[0], "news");
    }

    #[test]
    fn suggested_tags_known_category_caps_at_ten() {
        let tags = suggested_tags("Breaking News");
        assert_eq!(tags.len(), 10);
        assert_eq!(tags[0], "viral");
    }

    #[test]
    fn clean_tags_worked_example() {
        let cleaned = clean_tags(["Bitcoin ", "bitcoin", "CRYPTO", ""]);
        assert_eq!(cleaned, vec!["bitcoin", "crypto"]);
    }

    #[test]
    fn clean_tags_drops_over_length_entries() {
        let long = "x".repeat(51);
        let ok = "y".repeat(50);
        let cleaned = clean_tags([long.as_str(), ok.as_str()]);
        assert_eq!(cleaned, vec![ok]);
    }

    proptest! {
        #[test]
        fn clean_tags_idempotent(tags in proptest::collection::vec(".{0,60}", 0..25)) {
            let once = clean_tags(tags.iter());
            let twice = clean_tags(once.iter());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn clean_tags_bounds(tags in proptest::collection::vec(".{0,60}", 0..25)) {
            let cleaned = clean_tags(tags.iter());
            prop_assert!(cleaned.len() <= MAX_CLEAN_TAGS);
            for tag in &cleaned {
                let n = tag.chars().count();
                prop_assert!(n > 0 && n <= MAX_TAG_LEN);
                let lowered = tag.to_lowercase();
                prop_assert_eq!(tag.as_str(), lowered.as_str());
                prop_assert_eq!(tag.as_str(), tag.trim());
            }
            let unique: std::collections::HashSet<&String> = cleaned.iter().collect();
            prop_assert_eq!(unique.len(), cleaned.len());
        }
    }
}
