//! Fixed word lists used by the analyzer.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Technical-term dictionary (lower-case, matched as whole tokens)
pub const TECHNICAL_TERMS: &[&str] = &[
    "api",
    "architecture",
    "database",
    "algorithm",
    "optimization",
    "security",
    "infrastructure",
    "framework",
    "protocol",
    "middleware",
    "runtime",
    "compiler",
    "deployment",
    "authentication",
    "authorization",
    "encryption",
    "scalability",
    "redundancy",
    "latency",
];

pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
    "i", "if", "in", "into", "is", "it", "its", "just", "may", "me", "might", "more", "most",
    "must", "my", "need", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "out", "over", "own", "same", "she", "should", "so", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
    "your", "yours",
];

/// Words that flip the polarity of the next sentiment hit
pub const NEGATORS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "don't", "doesn't",
    "didn't", "isn't", "wasn't", "aren't", "won't", "can't", "cannot", "shouldn't", "wouldn't",
];

/// AFINN-style polarity lexicon (-5..=5)
const SENTIMENT_WORDS: &[(&str, i32)] = &[
    ("amazing", 4),
    ("appreciate", 2),
    ("awesome", 4),
    ("bad", -3),
    ("benefit", 2),
    ("best", 3),
    ("better", 2),
    ("broken", -1),
    ("concern", -1),
    ("confused", -2),
    ("crash", -2),
    ("critical", -2),
    ("delay", -1),
    ("disappointed", -2),
    ("easy", 1),
    ("efficient", 2),
    ("error", -2),
    ("excellent", 3),
    ("excited", 3),
    ("fail", -2),
    ("failed", -2),
    ("failure", -2),
    ("fast", 1),
    ("fix", 1),
    ("frustrated", -2),
    ("glad", 3),
    ("good", 3),
    ("great", 3),
    ("happy", 3),
    ("help", 2),
    ("helpful", 2),
    ("impressive", 3),
    ("improve", 2),
    ("interested", 2),
    ("issue", -1),
    ("love", 3),
    ("nice", 3),
    ("outage", -2),
    ("pain", -2),
    ("perfect", 3),
    ("poor", -2),
    ("problem", -2),
    ("recommend", 2),
    ("reliable", 2),
    ("risk", -2),
    ("slow", -2),
    ("strong", 2),
    ("stuck", -2),
    ("success", 2),
    ("successful", 3),
    ("terrible", -3),
    ("thank", 2),
    ("thanks", 2),
    ("trouble", -2),
    ("unhappy", -2),
    ("urgent", -1),
    ("useful", 2),
    ("valuable", 2),
    ("worried", -3),
    ("worse", -3),
    ("worst", -3),
    ("wrong", -2),
];

/// Topic tags and the tokens that trigger them
pub const TOPICS: &[(&str, &[&str])] = &[
    (
        "databases",
        &[
            "database", "databases", "sql", "postgres", "postgresql", "mysql", "query", "queries",
            "replication", "schema", "index", "indexing", "sharding", "caching", "cache",
        ],
    ),
    (
        "performance",
        &[
            "performance", "latency", "throughput", "optimization", "optimize", "speed", "fast",
            "slow", "bottleneck", "scalability", "caching", "cache",
        ],
    ),
    (
        "security",
        &[
            "security", "authentication", "authorization", "encryption", "vulnerability", "breach",
            "compliance", "password", "firewall",
        ],
    ),
    (
        "e-commerce",
        &[
            "ecommerce", "commerce", "checkout", "cart", "store", "shop", "retail", "order",
            "orders", "payment", "payments",
        ],
    ),
    (
        "infrastructure",
        &[
            "infrastructure", "deployment", "cloud", "server", "servers", "kubernetes", "docker",
            "redundancy", "uptime", "hosting", "network",
        ],
    ),
    (
        "software development",
        &[
            "software", "code", "api", "framework", "architecture", "compiler", "runtime",
            "middleware", "protocol", "algorithm", "bug", "release", "service",
        ],
    ),
    (
        "finance",
        &[
            "finance", "financial", "invoice", "billing", "budget", "pricing", "revenue",
            "accounting", "tax", "investment",
        ],
    ),
    (
        "marketing",
        &[
            "marketing", "campaign", "brand", "seo", "advertising", "newsletter", "audience",
            "promotion", "leads",
        ],
    ),
    (
        "hiring",
        &[
            "hiring", "recruiting", "candidate", "resume", "interview", "job", "position",
            "salary", "role",
        ],
    ),
    (
        "customer support",
        &[
            "support", "ticket", "complaint", "refund", "customer", "customers", "helpdesk",
            "issue",
        ],
    ),
    (
        "legal",
        &[
            "legal", "contract", "agreement", "lawsuit", "license", "licensing", "liability",
            "terms", "gdpr",
        ],
    ),
    (
        "food & dining",
        &[
            "lunch", "dinner", "breakfast", "restaurant", "restaurants", "food", "cafe", "menu",
            "cuisine", "eat", "recommendations",
        ],
    ),
    (
        "travel",
        &[
            "travel", "flight", "hotel", "trip", "downtown", "vacation", "airport", "booking",
            "itinerary", "tour",
        ],
    ),
];

pub const HONORIFICS: &[&str] = &["Mr", "Mrs", "Ms", "Miss", "Dr", "Prof", "Professor", "Sir"];

pub const GIVEN_NAMES: &[&str] = &[
    "Alice", "Andrew", "Anna", "Ben", "Carlos", "Chris", "Daniel", "David", "Elena", "Emily",
    "Emma", "Grace", "Hannah", "James", "Jane", "John", "Jose", "Julia", "Kevin", "Laura",
    "Linda", "Maria", "Mark", "Mary", "Michael", "Olivia", "Paul", "Peter", "Priya", "Rachel",
    "Robert", "Sarah", "Sophia", "Thomas", "Wei", "William",
];

pub const KNOWN_PLACES: &[&str] = &[
    "Amsterdam", "Austin", "Berlin", "Boston", "California", "Canada", "Chicago", "China",
    "Europe", "France", "Germany", "India", "Japan", "London", "Los Angeles", "Madrid",
    "New York", "Paris", "San Francisco", "Seattle", "Singapore", "Sydney", "Texas", "Tokyo",
    "Toronto", "UK", "US", "USA", "EU",
];

pub const ORG_SUFFIXES: &[&str] = &[
    "Inc", "Corp", "Corporation", "LLC", "Ltd", "Co", "Company", "Group", "Labs", "Technologies",
    "Systems", "Bank", "University", "Foundation", "Institute", "Partners", "Holdings",
];

/// Capitalised words that never name an entity on their own
pub const NON_ENTITY_WORDS: &[&str] = &[
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday", "January",
    "February", "March", "April", "May", "June", "July", "August", "September", "October",
    "November", "December", "The", "This", "That", "We", "Our", "They", "I",
];

/// Upper-case tokens that are not organization acronyms
pub const NON_ORG_ACRONYMS: &[&str] = &[
    "OK", "FYI", "ASAP", "FAQ", "CEO", "CTO", "CFO", "COO", "PM", "AM", "TBD", "ETA", "QA",
];

pub static TECHNICAL_TERM_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| TECHNICAL_TERMS.iter().copied().collect());

pub static STOP_WORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STOP_WORDS.iter().copied().collect());

pub static NEGATOR_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NEGATORS.iter().copied().collect());

pub static SENTIMENT_LEXICON: Lazy<HashMap<&'static str, i32>> =
    Lazy::new(|| SENTIMENT_WORDS.iter().copied().collect());

pub fn is_technical_term(token: &str) -> bool {
    TECHNICAL_TERM_SET.contains(token)
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORD_SET.contains(token)
}
