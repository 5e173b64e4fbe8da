//! Prompt templates sent to the text generator.

use serde_json::json;

use super::PlanRequest;
use crate::models::{GoalMode, Level, Plan, Step};

/// Compact JSON view of a plan for prompt context.
pub fn plan_context(plan: &Plan) -> String {
    let steps: Vec<_> = plan
        .steps
        .iter()
        .map(|step| json!({ "title": step.title, "objective": step.objective }))
        .collect();
    json!({
        "topic": plan.topic,
        "level": plan.level,
        "overview": plan.overview,
        "steps": steps,
    })
    .to_string()
}

fn mode_hint(mode: GoalMode) -> &'static str {
    match mode {
        GoalMode::ExamPrep => "exam preparation: favour definitions, exposition practice and past-paper style tasks",
        GoalMode::QuizPrep => "quiz preparation: favour active recall and short-answer drills",
        GoalMode::Balanced => "balanced: mix understanding and practice",
    }
}

pub fn plan_prompt(request: &PlanRequest, language: &str) -> String {
    let goals = request
        .goals
        .as_deref()
        .filter(|g| !g.trim().is_empty())
        .map(|g| format!("Learner goals: {g}\n"))
        .unwrap_or_default();
    format!(
        r#"You are Synapse, a learning designer.
Goal: create a detailed, genuinely didactic study plan in {language} for the topic: "{topic}".
Learner level: {level}. Time per day: {minutes} minutes. Mode: {mode}.
{goals}
Return ONLY a JSON object in {language} with:
- overview: 1-3 sentences that actually explain the topic at that level (not a to-do list).
- steps: array of steps; each step has
  title, objective, theory_outline (points), theory_explanations (short explanations of the points pitched at the level),
  practice_tasks (points), suggested_resources (URLs or kinds of material)
- review_strategy: spaced-review advice (points)

Style: practical and clear. Number of steps: 9-14, with full coverage and a few deep dives.

If the topic is an AUTHOR or a MOVEMENT, include at least these distinct blocks among the steps: biography/context, method, key concepts, main works (each separate), technical vocabulary, criticism, legacy/influence, guided exercises.
"#,
        topic = request.topic,
        level = request.level,
        minutes = request.time_per_day,
        mode = mode_hint(request.goal_mode),
    )
}

fn step_header(plan: &Plan, index: usize, step: &Step, level: Level, mode: GoalMode) -> String {
    format!(
        "Target step: {number} of {total}\nLevel: {level} | Mode: {mode}\nStep title: {title}\nStep outline: {outline}",
        number = index + 1,
        total = plan.steps.len(),
        mode = mode_hint(mode),
        title = step.title,
        outline = step.theory_outline.join("; "),
    )
}

pub fn explain_prompt(
    plan: &Plan,
    index: usize,
    step: &Step,
    level: Level,
    mode: GoalMode,
    language: &str,
) -> String {
    format!(
        r#"You are Synapse, a teacher who explains clearly and rigorously in {language}.
Explain the given step of the following plan (reduced JSON):
{context}

{header}

Produce a very detailed DIDACTIC explanation in Markdown with this structure:
- Who/what it is (if relevant) in 1-2 lines
- Explicit learning objective
- Key ideas (rich points with definitions and micro-examples)
- Deeper notes (technical vocabulary, myths to dispel)
- Connections (historical, conceptual or applied)
- Mini-check (3 quick short-answer questions)

Avoid vague sentences; use examples and technical definitions where needed.
Do not add biography or historical context unless the step title or outline asks for it.
"#,
        context = plan_context(plan),
        header = step_header(plan, index, step, level, mode),
    )
}

pub fn exercise_prompt(
    plan: &Plan,
    index: usize,
    step: &Step,
    level: Level,
    mode: GoalMode,
    language: &str,
) -> String {
    format!(
        r#"You are Synapse, an exercise generator writing in {language}.
Plan context (reduced JSON):
{context}

{header}

Return ONLY a JSON object with this structure:
{{
  "guided": {{"title": string, "steps": [string, ...]}},
  "quiz": [{{"q": string, "opts": [string, string, string, string], "a": 0-3, "why": string}}, ... 5 questions],
  "writing": {{"prompt": string, "min": 120, "max": 180, "rubric": [string, ...]}}
}}

Constraints:
- Questions and content must use the language of the plan.
- Be concrete and aimed at the step's objectives.
- Stay on topic: use ONLY concepts relevant to the step title and outline.
"#,
        context = plan_context(plan),
        header = step_header(plan, index, step, level, mode),
    )
}

pub fn tutor_prompt(plan: &Plan, question: &str, language: &str) -> String {
    format!(
        r#"You are Synapse, a supportive tutor.
Context (excerpt of the study plan as JSON):
{context}

Learner question:
{question}

Rules:
- Answer only with information useful for this plan and level.
- Be concise, show micro-examples, suggest one small next action.
- If the learner seems unsure, offer a quick check question.
Always write in {language}.
"#,
        context = plan_context(plan),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_prompt_mentions_request_fields() {
        let request = PlanRequest {
            topic: "Hegel".to_string(),
            level: Level::Advanced,
            goals: Some("oral exam".to_string()),
            goal_mode: GoalMode::ExamPrep,
            time_per_day: 90,
        };
        let prompt = plan_prompt(&request, "Italian");
        assert!(prompt.contains("\"Hegel\""));
        assert!(prompt.contains("advanced"));
        assert!(prompt.contains("90 minutes"));
        assert!(prompt.contains("Learner goals: oral exam"));
        assert!(prompt.contains("JSON object in Italian"));
    }
}
