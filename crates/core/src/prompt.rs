//! The fixed prompt sent to the generation service.

/// Instructs the model to return five multiple-choice questions about recent
/// AI news as a bare JSON array of `{question, options, correctAnswer}`.
pub const NEWS_QUIZ_PROMPT: &str = r#"Generate exactly 5 multiple choice questions about the latest artificial intelligence news, updates, and developments from the last 24 hours. Focus on recent AI announcements, product launches, research breakthroughs, or industry developments.

Format your response as a JSON array of objects. Each object should have:
{
  "question": "the question text about a specific recent AI news or update",
  "options": ["option 1", "option 2", "option 3", "option 4"],
  "correctAnswer": 0
}
where "correctAnswer" is the zero-based index (0-3) of the correct option.

Guidelines for questions:
- Each question should be about a different recent AI news item or update
- Include specific details like company names, product names, or research findings
- Make questions factual and based on real recent developments
- Ensure questions are engaging and informative
- Keep technical terms explained clearly

Ensure the JSON is valid and properly formatted."#;

#[must_use]
pub fn news_quiz_prompt() -> &'static str {
    NEWS_QUIZ_PROMPT
}
