//! Static vocabularies used by the scoring heuristics.

use regex::Regex;
use std::sync::LazyLock;

/// Keywords per knowledge domain.
///
/// Domains outside this table match only on their own name.
pub const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "technology",
        &[
            "technology", "tech", "software", "hardware", "computer", "algorithm", "code",
            "programming", "ai", "data", "internet", "digital", "app", "device", "robot",
        ],
    ),
    (
        "science",
        &[
            "science", "research", "experiment", "theory", "hypothesis", "physics", "chemistry",
            "biology", "study", "evidence", "discovery",
        ],
    ),
    (
        "arts",
        &[
            "art", "painting", "creative", "design", "aesthetic", "sculpture", "gallery",
            "artist", "beauty", "drawing",
        ],
    ),
    (
        "philosophy",
        &[
            "philosophy", "ethics", "moral", "meaning", "existence", "consciousness", "truth",
            "logic", "reason", "metaphysics", "free will",
        ],
    ),
    (
        "history",
        &[
            "history", "historical", "past", "ancient", "war", "civilization", "century",
            "empire", "era", "revolution",
        ],
    ),
    (
        "business",
        &[
            "business", "market", "company", "startup", "finance", "economy", "strategy",
            "profit", "investment", "management",
        ],
    ),
    (
        "health",
        &[
            "health", "medical", "medicine", "fitness", "wellness", "disease", "nutrition",
            "exercise", "doctor", "sleep",
        ],
    ),
    (
        "sports",
        &[
            "sport", "game", "team", "match", "player", "football", "soccer", "basketball",
            "tennis", "score", "championship",
        ],
    ),
    (
        "music",
        &[
            "music", "song", "band", "album", "melody", "rhythm", "concert", "guitar", "piano",
            "lyrics",
        ],
    ),
    (
        "literature",
        &[
            "book", "novel", "poem", "poetry", "author", "writer", "story", "character",
            "chapter", "literature",
        ],
    ),
    (
        "politics",
        &[
            "politics", "government", "election", "policy", "law", "vote", "democracy",
            "president", "parliament", "rights",
        ],
    ),
    (
        "education",
        &[
            "education", "school", "learn", "learning", "teacher", "student", "university",
            "course", "lesson", "curriculum",
        ],
    ),
    (
        "psychology",
        &[
            "psychology", "mind", "behavior", "emotion", "feeling", "cognitive", "mental",
            "therapy", "personality", "anxiety",
        ],
    ),
    (
        "environment",
        &[
            "environment", "climate", "nature", "pollution", "sustainability", "energy",
            "carbon", "ocean", "forest", "recycling",
        ],
    ),
    (
        "gaming",
        &[
            "gaming", "videogame", "console", "level", "quest", "multiplayer", "rpg", "esports",
            "controller", "gamer",
        ],
    ),
    (
        "food",
        &[
            "food", "recipe", "cooking", "restaurant", "dish", "flavor", "chef", "meal",
            "ingredient", "baking",
        ],
    ),
    (
        "travel",
        &[
            "travel", "trip", "journey", "flight", "hotel", "destination", "tourist", "vacation",
            "explore", "abroad",
        ],
    ),
];

/// Social greeting phrases; they favour extraverted personas.
pub static GREETING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:hello|hi|hey|greetings|good\s+(?:morning|afternoon|evening)|welcome|nice\s+to\s+meet)\b",
    )
    .expect("valid greeting regex")
});

/// Creative or novel-idea phrases; they favour open personas.
pub static CREATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:ideas?|imagine|creative|what\s+if|new|novel|innovative|invent|brainstorm)\b")
        .expect("valid creative regex")
});

/// Help-request phrases; together with questions they favour agreeable personas.
pub static HELP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:help|advice|assist|how\s+(?:do|can)|(?:could|can)\s+you|explain)\b")
        .expect("valid help regex")
});

/// Phrases that address the AI participants directly.
pub static AI_DIRECTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:what\s+do\s+you\s+think|how\s+would\s+you|can\s+you\s+help|do\s+you\s+know|what\s+about\s+you|your\s+(?:opinion|thoughts))\b",
    )
    .expect("valid ai-directed regex")
});

/// Keywords registered for `domain` (case-insensitive), if it is a known domain.
pub fn keywords_for(domain: &str) -> Option<&'static [&'static str]> {
    let domain = domain.trim().to_lowercase();
    DOMAIN_KEYWORDS
        .iter()
        .find(|(name, _)| *name == domain)
        .map(|(_, keywords)| *keywords)
}
