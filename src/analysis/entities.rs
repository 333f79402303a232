//! Heuristic named-entity recognition.
//!
//! Recognizes three categories from surface patterns:
//! - **Persons**: honorific + capitalised name, or a known given name + surname
//! - **Places**: known place names, or a capitalised phrase after `in`/`at`/`near`/`from`
//! - **Organizations**: capitalised phrase ending in a corporate suffix, or a short
//!   all-caps acronym that is not a technical term

use crate::analysis::lexicon::{
    is_technical_term, GIVEN_NAMES, HONORIFICS, KNOWN_PLACES, NON_ENTITY_WORDS, NON_ORG_ACRONYMS,
    ORG_SUFFIXES,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static TITLED_PERSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:{})\.?\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)",
        HONORIFICS.join("|")
    ))
    .expect("valid titled person regex")
});

static NAMED_PERSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b((?:{})\s+[A-Z][a-z]+)\b",
        GIVEN_NAMES.join("|")
    ))
    .expect("valid named person regex")
});

static KNOWN_PLACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\b(?:{})\b", KNOWN_PLACES.join("|"))).expect("valid place regex")
});

static PREPOSITION_PLACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:in|at|near|from)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)?)")
        .expect("valid preposition place regex")
});

static SUFFIXED_ORG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b((?:[A-Z][A-Za-z0-9&]*\s+){{1,3}}(?:{}))\b",
        ORG_SUFFIXES.join("|")
    ))
    .expect("valid organization regex")
});

static ACRONYM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z]{2,6}\b").expect("valid acronym regex"));

fn ends_with_org_suffix(phrase: &str) -> bool {
    phrase
        .split_whitespace()
        .last()
        .is_some_and(|last| ORG_SUFFIXES.contains(&last))
}

fn is_non_entity(phrase: &str) -> bool {
    phrase
        .split_whitespace()
        .any(|word| NON_ENTITY_WORDS.contains(&word))
}

fn push_unique(out: &mut Vec<String>, seen: &mut HashSet<String>, candidate: &str) {
    let candidate = candidate.trim();
    if !candidate.is_empty() && seen.insert(candidate.to_lowercase()) {
        out.push(candidate.to_string());
    }
}

/// Person names in first-seen order
pub fn persons(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for caps in TITLED_PERSON.captures_iter(text) {
        push_unique(&mut out, &mut seen, &caps[1]);
    }
    for caps in NAMED_PERSON.captures_iter(text) {
        if !ends_with_org_suffix(&caps[1]) {
            push_unique(&mut out, &mut seen, &caps[1]);
        }
    }

    out
}

/// Place names in first-seen order
pub fn places(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for m in KNOWN_PLACE.find_iter(text) {
        push_unique(&mut out, &mut seen, m.as_str());
    }

    let people: HashSet<String> = persons(text).iter().map(|p| p.to_lowercase()).collect();
    for caps in PREPOSITION_PLACE.captures_iter(text) {
        let phrase = &caps[1];
        let first = phrase.split_whitespace().next().unwrap_or_default();
        if ends_with_org_suffix(phrase)
            || is_non_entity(phrase)
            || GIVEN_NAMES.contains(&first)
            || people.contains(&phrase.to_lowercase())
        {
            continue;
        }
        push_unique(&mut out, &mut seen, phrase);
    }

    out
}

/// Organization names in first-seen order
pub fn organizations(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for caps in SUFFIXED_ORG.captures_iter(text) {
        let phrase = &caps[1];
        if !is_non_entity(phrase.split_whitespace().next().unwrap_or_default()) {
            push_unique(&mut out, &mut seen, phrase);
        }
    }

    for m in ACRONYM.find_iter(text) {
        let acronym = m.as_str();
        if is_technical_term(&acronym.to_lowercase())
            || NON_ORG_ACRONYMS.contains(&acronym)
            || KNOWN_PLACES.contains(&acronym)
            || ORG_SUFFIXES.contains(&acronym)
        {
            continue;
        }
        push_unique(&mut out, &mut seen, acronym);
    }

    out
}

/// Persons, places and organizations flattened, duplicates removed
pub fn extract_entities(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for entity in persons(text)
        .into_iter()
        .chain(places(text))
        .chain(organizations(text))
    {
        push_unique(&mut out, &mut seen, &entity);
    }

    out
}
