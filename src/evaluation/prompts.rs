//! Scoring prompt construction.

use crate::evaluation::feature_extractor::PreScores;
use crate::types::{FormattedKnowledgeBase, TextAnalysis};

/// Everything the scoring prompt embeds
pub struct PromptInput<'a> {
    pub summary: &'a str,
    pub considerations: &'a str,
    pub request: &'a TextAnalysis,
    pub knowledge_base: &'a FormattedKnowledgeBase,
    pub knowledge_base_analysis: &'a TextAnalysis,
    pub pre_scores: PreScores,
}

fn list(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

fn or_none(text: &str) -> &str {
    if text.trim().is_empty() {
        "(none)"
    } else {
        text
    }
}

/// Build the single structured prompt sent to the completion provider
pub fn build_scoring_prompt(input: &PromptInput<'_>) -> String {
    let kb = input.knowledge_base_analysis;
    let request = input.request;

    format!(
        r#"You are scoring how relevant an inbound request is to a recipient's knowledge base.

KNOWLEDGE BASE
Keywords: {kb_keywords}
Concepts: {kb_concepts}
Technical terms: {kb_terms}
Complexity: {kb_complexity:.2}
Industry: {industry}
Use case: {use_case}
Main goals: {goals}

REQUEST
Summary: {summary}
Considerations: {considerations}
Keywords: {req_keywords}
Concepts: {req_concepts}
Technical terms: {req_terms}
Complexity: {req_complexity:.2}

PRE-CALCULATED METRICS (calibration hints, use your own judgment)
Content alignment: {content_alignment:.2}
Technical match: {technical_match:.2}

Score each factor from 0 to 1:
- contentAlignment: how closely the request's subject matches what the knowledge base covers
- technicalLevelMatch: how well the request's technical depth matches the knowledge base
- domainRelevance: how well the request fits the industry and use case
- contextualFit: how well the request serves the main goals

Respond with ONLY a JSON object, no prose and no markdown, exactly in this shape:
{{"contentAlignment": 0.0, "technicalLevelMatch": 0.0, "domainRelevance": 0.0, "contextualFit": 0.0, "explanation": "one or two sentences"}}
"#,
        kb_keywords = list(&kb.keywords),
        kb_concepts = list(&kb.concepts),
        kb_terms = list(&kb.technical_terms),
        kb_complexity = kb.complexity,
        industry = or_none(&input.knowledge_base.industry),
        use_case = or_none(&input.knowledge_base.use_case),
        goals = list(&input.knowledge_base.main_goals),
        summary = or_none(input.summary),
        considerations = or_none(input.considerations),
        req_keywords = list(&request.keywords),
        req_concepts = list(&request.concepts),
        req_terms = list(&request.technical_terms),
        req_complexity = request.complexity,
        content_alignment = input.pre_scores.content_alignment,
        technical_match = input.pre_scores.technical_match,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_both_sides_and_metrics() {
        let request = TextAnalysis {
            keywords: vec!["checkout".into(), "replication".into()],
            technical_terms: vec!["database".into()],
            complexity: 1.0,
            ..Default::default()
        };
        let kb_analysis = TextAnalysis {
            concepts: vec!["databases".into()],
            complexity: 0.75,
            ..Default::default()
        };
        let kb = FormattedKnowledgeBase {
            industry: "e-commerce".into(),
            use_case: "consulting".into(),
            main_goals: vec!["win database projects".into()],
            ..Default::default()
        };

        let prompt = build_scoring_prompt(&PromptInput {
            summary: "database performance optimization",
            considerations: "",
            request: &request,
            knowledge_base: &kb,
            knowledge_base_analysis: &kb_analysis,
            pre_scores: PreScores {
                content_alignment: 0.4,
                technical_match: 0.9,
            },
        });

        assert!(prompt.contains("Keywords: checkout, replication"));
        assert!(prompt.contains("Concepts: databases"));
        assert!(prompt.contains("Complexity: 0.75"));
        assert!(prompt.contains("Industry: e-commerce"));
        assert!(prompt.contains("Main goals: win database projects"));
        assert!(prompt.contains("Considerations: (none)"));
        assert!(prompt.contains("Content alignment: 0.40"));
        assert!(prompt.contains("Technical match: 0.90"));
        assert!(prompt.contains(r#"{"contentAlignment": 0.0,"#));
    }
}
