//! Prompt construction for feedback rewriting.
//!
//! `build_prompt` is a pure function of its inputs: identical subject, topics
//! and section always produce byte-identical output.

use crate::models::{FeedbackSection, ReviewSubject, ToneScale, NAME_PLACEHOLDER};

/// Suggested length of the rewritten feedback
pub const OUTPUT_RECOMMENDED_WORDS: usize = 200;

/// Hard cap on the length of the rewritten feedback
pub const OUTPUT_MAX_WORDS: usize = 300;

/// Replace every `{name}` token with the subject's name.
///
/// A blank name leaves the placeholder in place so the question still reads
/// as a template.
pub fn resolve_question(question: &str, name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        question.to_string()
    } else {
        question.replace(NAME_PLACEHOLDER, name)
    }
}

/// Render topics as a single comma-separated string, order preserved
pub fn format_topics(topics: &[String]) -> String {
    if topics.is_empty() {
        "(none)".to_string()
    } else {
        topics.join(", ")
    }
}

/// Build the generation request for one section
pub fn build_prompt(subject: &ReviewSubject, topics: &[String], section: &FeedbackSection) -> String {
    let tone_scale = ToneScale::ALL
        .iter()
        .map(|t| format!("'{}'", t.label()))
        .collect::<Vec<_>>()
        .join(", ");
    let tone = section.tone.map_or("Unspecified", |t| t.label());
    let topics = format_topics(topics);
    let name = subject.name.trim();

    format!(
        "You are a software engineering manager with more than 15 years of experience \
         writing performance reviews that highlight strengths and areas for improvement. \
         Your feedback is constructive, professional and clear, and it motivates growth.\n\n\
         Write a performance review for my colleague.\n\n\
         Colleague details:\n\
         - Name: {name}\n\
         - Position: {position}\n\
         - Gender: {gender}\n\
         - Relationship to me: {relationship}\n\n\
         Topics: {topics}\n\
         Question: {question}\n\n\
         My initial feedback:\n\
         <<<\n\
         {initial}\n\
         >>>\n\n\
         Tones are rated on a five-point scale: {tone_scale}.\n\
         My initial feedback has a tone of: {tone}\n\n\
         Rewrite my initial feedback as a well-structured, professional performance review. Rules:\n\
         - Keep it constructive, professional and clear, and encourage growth.\n\
         - Choose wording that fits my relationship to the colleague (manager, report, peer, ...).\n\
         - Focus on these topics: {topics}\n\
         - Use only facts stated in my initial feedback. Do not introduce details that are not in it.\n\
         - Output only the rewritten feedback, with no headings or commentary.\n\
         - Word limit: Recommended {recommended} words, maximum {max} words.\n\n\
         Refined feedback:\n",
        name = name,
        position = subject.position,
        gender = subject.gender.label(),
        relationship = subject.relationship,
        topics = topics,
        question = resolve_question(&section.question, name),
        initial = section.initial_feedback,
        tone_scale = tone_scale,
        tone = tone,
        recommended = OUTPUT_RECOMMENDED_WORDS,
        max = OUTPUT_MAX_WORDS,
    )
}

/// Pull the initial feedback block back out of a prompt built by [`build_prompt`]
pub fn extract_initial_feedback(prompt: &str) -> Option<&str> {
    let start = prompt.find("<<<\n")? + 4;
    let end = prompt[start..].rfind("\n>>>")? + start;
    prompt.get(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, SectionId};

    fn subject() -> ReviewSubject {
        ReviewSubject {
            name: "Dana".to_string(),
            gender: Gender::Female,
            position: "Staff Engineer".to_string(),
            relationship: "Peer".to_string(),
        }
    }

    fn section(question: &str, initial: &str) -> FeedbackSection {
        let mut section = FeedbackSection::new(SectionId(7), question);
        section.initial_feedback = initial.to_string();
        section.tone = Some(ToneScale::Positive);
        section
    }

    #[test]
    fn test_resolve_question_replaces_every_token() {
        assert_eq!(
            resolve_question("{name} did it; thanks {name}", "Dana"),
            "Dana did it; thanks Dana"
        );
    }

    #[test]
    fn test_resolve_question_blank_name_keeps_token() {
        assert_eq!(resolve_question("Impact of {name}?", "  "), "Impact of {name}?");
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let topics = vec!["Leadership".to_string(), "Testing".to_string()];
        let s = section("What impact did {name} have?", "Shipped the release early.");
        assert_eq!(
            build_prompt(&subject(), &topics, &s),
            build_prompt(&subject(), &topics, &s)
        );
    }

    #[test]
    fn test_build_prompt_contains_inputs() {
        let topics = vec!["Leadership".to_string(), "Code Review".to_string()];
        let initial = "  Mentored two juniors.\n\nAlso fixed   flaky CI.  ";
        let prompt = build_prompt(&subject(), &topics, &section("What impact did {name} have?", initial));

        assert!(prompt.contains("Dana"));
        assert!(prompt.contains("Staff Engineer"));
        assert!(prompt.contains("Female"));
        assert!(prompt.contains("Peer"));
        assert!(prompt.contains("Leadership, Code Review"));
        assert!(prompt.contains("What impact did Dana have?"));
        assert!(prompt.contains("My initial feedback has a tone of: Positive"));
        assert!(prompt.contains(initial));
        assert!(prompt.contains("Recommended 200 words, maximum 300 words."));
        assert!(prompt.contains("Do not introduce details"));
    }

    #[test]
    fn test_build_prompt_topic_order_preserved() {
        let topics = vec!["Zeta".to_string(), "Alpha".to_string(), "Zeta".to_string()];
        let prompt = build_prompt(&subject(), &topics, &section("Q", "fine"));
        assert!(prompt.contains("Topics: Zeta, Alpha, Zeta"));
    }

    #[test]
    fn test_build_prompt_unset_fields() {
        let mut s = section("How did {name} do?", "ok");
        s.tone = None;
        let prompt = build_prompt(&ReviewSubject::default(), &[], &s);
        assert!(prompt.contains("How did {name} do?"));
        assert!(prompt.contains("Topics: (none)"));
        assert!(prompt.contains("My initial feedback has a tone of: Unspecified"));
        assert!(prompt.contains("- Gender: Unspecified"));
    }

    #[test]
    fn test_extract_initial_feedback() {
        let initial = "line one\nline two with >>> inside";
        let prompt = build_prompt(&subject(), &[], &section("Q", initial));
        assert_eq!(extract_initial_feedback(&prompt), Some(initial));
    }

    #[test]
    fn test_build_prompt_trims_name_everywhere() {
        let mut padded = subject();
        padded.name = "  Dana ".to_string();
        let prompt = build_prompt(&padded, &[], &section("What impact did {name} have?", "ok"));
        assert!(prompt.contains("- Name: Dana\n"));
        assert!(prompt.contains("Question: What impact did Dana have?\n"));
        assert_eq!(prompt, build_prompt(&subject(), &[], &section("What impact did {name} have?", "ok")));
    }
}
