//! Prompt templates for quote generation

use crate::personalization::Personalization;

/// Templates for the generation requests sent to the quote provider
pub struct QuotePromptTemplate;

impl QuotePromptTemplate {
    /// System prompt for quote generation
    pub fn system() -> &'static str {
        r#"You are a quote curator for a guessing game where players decide whether a quote
was written by an AI or by a real human.
Produce quotes that are plausible in either direction — do not make the AI quotes
obviously robotic or the human quotes obviously famous.
Respond with JSON only, exactly in the shape requested. Do not add commentary."#
    }

    /// User prompt requesting a batch of quotes
    pub fn batch_request(personalization: &Personalization, count: usize) -> String {
        format!(
            r#"Generate {count} quotes for the guessing game.

Audience: {audience}
Topic: {topic}

Requirements:
- Each quote is 10 to 40 words long.
- All quotes are distinct from each other.
- Roughly half the quotes are AI-authored and half are real human quotes.
- For human quotes, include the author's name when it is well known; otherwise use "none".

Respond with a JSON array of objects with this exact shape:
[{{"quote": "...", "source": "AI", "author": "none"}},
 {{"quote": "...", "source": "Human", "author": "Albert Einstein"}}]

The "source" field must be exactly "AI" or "Human"."#,
            count = count,
            audience = personalization.age_group.prompt_phrase(),
            topic = personalization.topic,
        )
    }

    /// User prompt requesting a single quote
    pub fn single_request(personalization: &Personalization) -> String {
        format!(
            r#"Generate one quote for the guessing game.

Audience: {audience}
Topic: {topic}

Requirements:
- The quote is 10 to 40 words long.
- Decide at random whether it is AI-authored or a real human quote.
- For a human quote, include the author's name when it is well known; otherwise use "none".

Respond with a single JSON object with this exact shape:
{{"quote": "...", "source": "AI", "author": "none"}}

The "source" field must be exactly "AI" or "Human"."#,
            audience = personalization.age_group.prompt_phrase(),
            topic = personalization.topic,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personalization::{AgeGroup, Topic};

    #[test]
    fn test_batch_request_mentions_count_and_context() {
        let p = Personalization::new(AgeGroup::Teens, Topic::Science);
        let prompt = QuotePromptTemplate::batch_request(&p, 10);
        assert!(prompt.contains("Generate 10 quotes"));
        assert!(prompt.contains("teenagers"));
        assert!(prompt.contains("science"));
        assert!(prompt.contains(r#""source": "AI""#));
    }

    #[test]
    fn test_single_request_shape() {
        let prompt = QuotePromptTemplate::single_request(&Personalization::default());
        assert!(prompt.contains("one quote"));
        assert!(prompt.contains(r#"{"quote": "...""#));
    }
}
