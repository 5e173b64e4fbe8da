//! Deterministic local synthesis used when no generator answers.
//!
//! Everything here is a pure function of its inputs and always satisfies the
//! corresponding contract.

use std::fmt::Write as _;

use super::PlanRequest;
use crate::models::{
    ExerciseSet, GoalMode, GuidedExercise, Level, Plan, PlanDraft, QuizQuestion, Step, StepDraft,
    WritingTask,
};

/// Fewest steps a synthesized plan has.
pub const MIN_STEPS: usize = 9;
/// Most steps a synthesized plan has.
pub const MAX_STEPS: usize = 12;

const REVIEW_STRATEGY: [&str; 3] = [
    "Spaced review on Day 2, 4, 7",
    "Turn mistakes into flashcards",
    "Teach-back after each session",
];

/// One didactic stage of the template bank. `{topic}` in the objective is
/// replaced with the plan topic.
struct Stage {
    title: &'static str,
    objective: &'static str,
    outline: &'static [&'static str],
    practice: &'static [&'static str],
    resources: &'static [&'static str],
}

const ORIENTATION: Stage = Stage {
    title: "Orientation and key vocabulary",
    objective: "Map the scope of {topic} and learn its core terms.",
    outline: &["Scope and boundaries", "Key terms", "How the parts fit together"],
    practice: &["Write a 10-term glossary", "Sketch a one-page overview"],
    resources: &["Introductory encyclopedia entry", "Course syllabus or table of contents"],
};

const FOUNDATIONS: Stage = Stage {
    title: "Foundations",
    objective: "Understand the core ideas of {topic}.",
    outline: &["Core principles", "Typical pitfalls", "Minimal worked case"],
    practice: &["Summarize in 5 bullets", "Explain to a friend in 3 minutes"],
    resources: &["Search: official docs", "Video: crash course"],
};

const GUIDED_EXAMPLES: Stage = Stage {
    title: "Guided examples",
    objective: "See the concepts of {topic} in action.",
    outline: &["2-3 worked examples", "What each example shows"],
    practice: &["Replicate the examples", "Note where you get stuck"],
    resources: &["Blog walkthroughs", "Tutorial playlist"],
};

const CORE_METHODS: Stage = Stage {
    title: "Core methods",
    objective: "Learn the main techniques used in {topic}.",
    outline: &["Standard procedures", "When to use which method"],
    practice: &["Apply each method once", "Compare two methods on the same problem"],
    resources: &["Textbook chapter on methods", "Reference cheat sheet"],
};

const STRUCTURED_PRACTICE: Stage = Stage {
    title: "Structured practice",
    objective: "Build fluency through short exercises.",
    outline: &["Patterns and heuristics", "Checking your own answers"],
    practice: &["3 short exercises", "Keep a mistake log"],
    resources: &["Practice websites", "Short quizzes"],
};

const MISCONCEPTIONS: Stage = Stage {
    title: "Common mistakes and misconceptions",
    objective: "Recognize and avoid the usual errors in {topic}.",
    outline: &["Frequent misconceptions", "Why they are tempting", "How to correct them"],
    practice: &["Find the error in 3 flawed solutions", "Update your mistake log"],
    resources: &["FAQ or errata pages", "Forum threads on common errors"],
};

const CONNECTIONS: Stage = Stage {
    title: "Connections and context",
    objective: "Relate {topic} to neighbouring subjects.",
    outline: &["Historical or conceptual context", "Links to related subjects"],
    practice: &["Draw a concept map", "Write 3 cross-topic questions"],
    resources: &["Survey article", "Related course notes"],
};

const DEEPENING: Stage = Stage {
    title: "Deepening: advanced topics",
    objective: "Explore the harder corners of {topic}.",
    outline: &["Advanced concepts", "Open questions"],
    practice: &["Solve 2 challenging problems", "Read one advanced source"],
    resources: &["Advanced textbook", "Lecture from a specialist"],
};

const MINI_PROJECT: Stage = Stage {
    title: "Mini project",
    objective: "Apply {topic} end to end.",
    outline: &["Plan, build, review"],
    practice: &["Small project", "150-word reflection"],
    resources: &["Starter template", "Checklists"],
};

const REVIEW: Stage = Stage {
    title: "Review and next steps",
    objective: "Consolidate and extend.",
    outline: &["What you know and what you don't"],
    practice: &["Teach-back in 5 bullets", "Plan next week"],
    resources: &["Advanced playlist", "Community or forum"],
};

const SYLLABUS_MAPPING: Stage = Stage {
    title: "Exam syllabus mapping",
    objective: "Match the exam requirements to the parts of {topic}.",
    outline: &["Exam format", "Weight of each topic", "Assessment criteria"],
    practice: &["Build a syllabus checklist", "Rate your confidence per item"],
    resources: &["Official exam syllabus", "Marking schemes"],
};

const PAST_PAPERS: Stage = Stage {
    title: "Past papers under timed conditions",
    objective: "Practise exam questions on {topic} under real time limits.",
    outline: &["Question types", "Time management"],
    practice: &["One timed past paper", "Mark it with the official scheme"],
    resources: &["Past exam papers", "Examiner reports"],
};

const ORAL_EXPOSITION: Stage = Stage {
    title: "Oral exposition practice",
    objective: "Present the key ideas of {topic} clearly and in order.",
    outline: &["Structuring an answer", "Precise vocabulary"],
    practice: &["Record a 5-minute exposition", "Answer 3 follow-up questions aloud"],
    resources: &["Model answers", "Study partner"],
};

const MOCK_EXAM: Stage = Stage {
    title: "Mock exam and error review",
    objective: "Simulate the exam on {topic} and fix the remaining gaps.",
    outline: &["Full simulation", "Error analysis"],
    practice: &["Complete mock exam", "Rewrite the weakest answer"],
    resources: &["Mock exam set", "Error log"],
};

const FLASHCARDS: Stage = Stage {
    title: "Active recall with flashcards",
    objective: "Memorize the essential facts of {topic} through retrieval.",
    outline: &["Writing good flashcards", "Spacing the reviews"],
    practice: &["Create 20 flashcards", "Two recall sessions"],
    resources: &["Flashcard app", "Glossary from earlier steps"],
};

const QUIZ_DRILLS: Stage = Stage {
    title: "Rapid-fire quiz drills",
    objective: "Answer short questions on {topic} quickly and accurately.",
    outline: &["Question patterns", "Eliminating wrong options"],
    practice: &["Three 10-question drills", "Track your accuracy"],
    resources: &["Online quiz banks", "Self-made question list"],
};

const WEAK_SPOTS: Stage = Stage {
    title: "Targeted weak-spot review",
    objective: "Close the gaps revealed by your quiz results.",
    outline: &["Reading your error pattern", "Focused re-study"],
    practice: &["Redo every missed question", "Explain each fix in one line"],
    resources: &["Mistake log", "Relevant earlier steps"],
};

static BALANCED_STAGES: [&Stage; 10] = [
    &ORIENTATION,
    &FOUNDATIONS,
    &GUIDED_EXAMPLES,
    &CORE_METHODS,
    &STRUCTURED_PRACTICE,
    &MISCONCEPTIONS,
    &CONNECTIONS,
    &DEEPENING,
    &MINI_PROJECT,
    &REVIEW,
];

static EXAM_STAGES: [&Stage; 12] = [
    &ORIENTATION,
    &SYLLABUS_MAPPING,
    &FOUNDATIONS,
    &GUIDED_EXAMPLES,
    &CORE_METHODS,
    &STRUCTURED_PRACTICE,
    &MISCONCEPTIONS,
    &PAST_PAPERS,
    &ORAL_EXPOSITION,
    &CONNECTIONS,
    &MOCK_EXAM,
    &REVIEW,
];

static QUIZ_STAGES: [&Stage; 11] = [
    &ORIENTATION,
    &FOUNDATIONS,
    &GUIDED_EXAMPLES,
    &FLASHCARDS,
    &STRUCTURED_PRACTICE,
    &QUIZ_DRILLS,
    &MISCONCEPTIONS,
    &WEAK_SPOTS,
    &CORE_METHODS,
    &CONNECTIONS,
    &REVIEW,
];

fn stages_for(mode: GoalMode) -> &'static [&'static Stage] {
    match mode {
        GoalMode::ExamPrep => &EXAM_STAGES,
        GoalMode::QuizPrep => &QUIZ_STAGES,
        GoalMode::Balanced => &BALANCED_STAGES,
    }
}

/// Number of steps a synthesized plan gets.
pub fn step_count(level: Level, mode: GoalMode, time_per_day: u32) -> usize {
    let mut count = match level {
        Level::Beginner => 9,
        Level::Intermediate => 10,
        Level::Advanced => 11,
    };
    if mode == GoalMode::ExamPrep {
        count += 1;
    }
    if time_per_day >= 60 {
        count += 1;
    }
    count.clamp(MIN_STEPS, MAX_STEPS)
}

/// Explanations for outline points in the level's tone.
pub fn explain_points(outline: &[String], level: Level, topic: &str) -> Vec<String> {
    outline
        .iter()
        .map(|point| format!("{point}: explained {}, applied to '{topic}'.", level.tone()))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

fn stage_step(stage: &Stage, topic: &str, level: Level) -> StepDraft {
    let outline = strings(stage.outline);
    StepDraft {
        title: stage.title.to_string(),
        objective: stage.objective.replace("{topic}", topic),
        theory_explanations: explain_points(&outline, level, topic),
        theory_outline: outline,
        practice_tasks: strings(stage.practice),
        suggested_resources: strings(stage.resources),
    }
}

fn extra_step(n: usize, topic: &str, level: Level) -> StepDraft {
    let outline = vec![
        "Pick a subtopic you found hard".to_string(),
        "Find one new source".to_string(),
    ];
    StepDraft {
        title: format!("Extra deepening {n}"),
        objective: format!("Go further into {topic} on a point of your choice."),
        theory_explanations: explain_points(&outline, level, topic),
        theory_outline: outline,
        practice_tasks: vec![
            "Write a one-page summary".to_string(),
            "Solve two harder exercises".to_string(),
        ],
        suggested_resources: vec![
            "Advanced textbook chapter".to_string(),
            "Research article or talk".to_string(),
        ],
    }
}

/// Synthesizes a complete plan for the request.
///
/// The review stage always closes the plan: shorter plans drop stages from
/// the end of the list before it, longer ones get "Extra deepening" steps
/// inserted before it.
pub fn plan(request: &PlanRequest) -> PlanDraft {
    let topic = request.topic.trim();
    let level = request.level;
    let count = step_count(level, request.goal_mode, request.time_per_day);
    let stages = stages_for(request.goal_mode);
    let (body, closing) = stages.split_at(stages.len() - 1);

    let mut steps: Vec<StepDraft> = body
        .iter()
        .take(count - 1)
        .map(|stage| stage_step(stage, topic, level))
        .collect();
    let mut extra = 1;
    while steps.len() < count - 1 {
        steps.push(extra_step(extra, topic, level));
        extra += 1;
    }
    steps.push(stage_step(closing[0], topic, level));

    let mut overview = format!(
        "A concise plan to learn {topic} at {level} level in {minutes} min/day.",
        minutes = request.time_per_day
    );
    if let Some(goals) = request.goals.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
        let _ = write!(overview, " Goal: {goals}.");
    }

    PlanDraft {
        overview,
        steps,
        review_strategy: strings(&REVIEW_STRATEGY),
    }
}

/// Markdown explanation skeleton for one step.
pub fn explanation(plan: &Plan, index: usize, step: &Step, level: Level) -> String {
    let mut md = String::new();
    let objective = if step.objective.trim().is_empty() {
        format!("Understand the role of {} within {}.", step.title, plan.topic)
    } else {
        step.objective.clone()
    };

    let _ = writeln!(md, "## {}\n", step.title);
    let _ = writeln!(
        md,
        "**What it is.** Step {} of {} in the study of *{}*.\n",
        index + 1,
        plan.steps.len(),
        plan.topic
    );
    let _ = writeln!(md, "**Objective.** {objective}\n");

    let _ = writeln!(md, "### Key ideas\n");
    if step.theory_outline.is_empty() {
        let _ = writeln!(
            md,
            "- **{}**: explained {}. Example: restate it with a case from your own notes.",
            step.title,
            level.tone()
        );
    }
    for point in &step.theory_outline {
        let _ = writeln!(
            md,
            "- **{point}**: explained {}. Example: apply *{point}* to a small case from {}.",
            level.tone(),
            plan.topic
        );
    }

    let _ = writeln!(md, "\n### Deeper notes\n");
    if !step.theory_outline.is_empty() {
        let _ = writeln!(
            md,
            "- Technical vocabulary: {}.",
            step.theory_outline.join(", ")
        );
    }
    let _ = writeln!(
        md,
        "- Myth to dispel: reading about *{}* is not the same as practising it.",
        step.title
    );

    let _ = writeln!(md, "\n### Connections\n");
    match index.checked_sub(1).and_then(|i| plan.steps.get(i)) {
        Some(previous) => {
            let _ = writeln!(md, "- Builds on: {}", previous.title);
        }
        None => {
            let _ = writeln!(md, "- Starting point of the plan");
        }
    }
    match plan.steps.get(index + 1) {
        Some(next) => {
            let _ = writeln!(md, "- Leads to: {}", next.title);
        }
        None => {
            let _ = writeln!(md, "- Closes the plan");
        }
    }

    let _ = writeln!(md, "\n### Mini-check\n");
    let first = step
        .theory_outline
        .first()
        .map_or(step.title.as_str(), String::as_str);
    let _ = writeln!(md, "1. How would you define *{first}* in one sentence?");
    let _ = writeln!(md, "2. Which example best illustrates *{}*?", step.title);
    let _ = writeln!(md, "3. What is one mistake to avoid in this step?");
    md
}

fn question(q: String, opts: [&str; 4], answer: usize, why: &str) -> QuizQuestion {
    QuizQuestion {
        question: q,
        options: strings(&opts),
        answer,
        explanation: why.to_string(),
    }
}

/// Fixed exercise set parameterized by the step.
pub fn exercises(step: &Step, level: Level) -> ExerciseSet {
    let title = step.title.as_str();
    let guided_title = match step.practice_tasks.first() {
        Some(task) => format!("Guided exercise: {task}"),
        None => format!("Guided exercise: apply the concepts of '{title}'"),
    };

    ExerciseSet {
        guided: GuidedExercise {
            title: guided_title,
            steps: strings(&[
                "State the goal in one sentence.",
                "Choose a real example or case study.",
                "Apply the concepts of this step one by one.",
                "Write a short report (5 bullets) on what worked and what did not.",
            ]),
        },
        quiz: vec![
            question(
                format!("What is the main purpose of '{title}'?"),
                [
                    "Memorizing definitions",
                    "Understanding the key concepts",
                    "Skipping straight to practice",
                    "None of the above",
                ],
                1,
                "Each step exists to build understanding first.",
            ),
            question(
                "What should you do when you get stuck?".to_string(),
                [
                    "Ignore the point",
                    "Go back to first principles",
                    "Copy the solution",
                    "Close the book",
                ],
                1,
                "Returning to the principles usually reveals the missing link.",
            ),
            question(
                "Which option best describes a common mistake?".to_string(),
                [
                    "Explaining out loud",
                    "Working through an example",
                    "Moving on without understanding",
                    "Comparing approaches",
                ],
                2,
                "The other options are good study habits.",
            ),
            question(
                "What is a good outcome at the end of the step?".to_string(),
                [
                    "No questions at all",
                    "A concise summary",
                    "No notes",
                    "Only saved links",
                ],
                1,
                "A summary shows you can restate what you learned.",
            ),
            question(
                "How long should an effective recap be?".to_string(),
                ["Over 500 words", "1-2 sentences", "About 120 words", "No limit"],
                2,
                "Around 120 words is long enough to be complete and short enough to stay focused.",
            ),
        ],
        writing: WritingTask {
            prompt: format!(
                "Write a summary (100-140 words) explaining the heart of '{title}' at {level} level."
            ),
            min: 100,
            max: 140,
            rubric: strings(&[
                "Covers the key ideas of the step",
                "Uses at least one concrete example",
                "Stays within the word limit",
            ]),
        },
    }
}

/// Short coaching message used when the tutor cannot reach a generator.
pub fn tutor(plan: &Plan, question: &str) -> String {
    format!(
        "Offline tutor, no generator call.\nQ: {question}\nTip: follow the next step in your '{}' plan, do one tiny practice task, and write down the smallest sub-question blocking you.",
        plan.topic
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::Contract;

    fn request(level: Level, goal_mode: GoalMode, time_per_day: u32) -> PlanRequest {
        PlanRequest {
            topic: "Linear algebra".to_string(),
            level,
            goals: None,
            goal_mode,
            time_per_day,
        }
    }

    #[test]
    fn test_stage_bank_has_at_least_fourteen_stages() {
        let mut titles: Vec<&str> = BALANCED_STAGES
            .iter()
            .chain(EXAM_STAGES.iter())
            .chain(QUIZ_STAGES.iter())
            .map(|stage| stage.title)
            .collect();
        titles.sort_unstable();
        titles.dedup();
        assert!(titles.len() >= 14);
    }

    #[test]
    fn test_step_count_rules() {
        assert_eq!(step_count(Level::Beginner, GoalMode::Balanced, 30), 9);
        assert_eq!(step_count(Level::Intermediate, GoalMode::Balanced, 30), 10);
        assert_eq!(step_count(Level::Advanced, GoalMode::Balanced, 30), 11);
        assert_eq!(step_count(Level::Beginner, GoalMode::ExamPrep, 30), 10);
        assert_eq!(step_count(Level::Beginner, GoalMode::QuizPrep, 60), 10);
        assert_eq!(step_count(Level::Advanced, GoalMode::ExamPrep, 120), 12);
    }

    #[test]
    fn test_plan_matches_step_count_and_contract() {
        for level in [Level::Beginner, Level::Intermediate, Level::Advanced] {
            for mode in [GoalMode::ExamPrep, GoalMode::QuizPrep, GoalMode::Balanced] {
                for minutes in [0, 30, 60, 240] {
                    let draft = plan(&request(level, mode, minutes));
                    assert_eq!(draft.steps.len(), step_count(level, mode, minutes));
                    assert!(draft.validate().is_ok());
                    assert_eq!(draft.steps.last().unwrap().title, "Review and next steps");
                    assert_eq!(draft.review_strategy.len(), 3);
                }
            }
        }
    }

    #[test]
    fn test_plan_pads_with_extra_deepening() {
        let draft = plan(&request(Level::Advanced, GoalMode::Balanced, 90));
        assert_eq!(draft.steps.len(), 12);
        assert_eq!(draft.steps[9].title, "Extra deepening 1");
        assert_eq!(draft.steps[10].title, "Extra deepening 2");
    }

    #[test]
    fn test_explanations_follow_level_tone() {
        let draft = plan(&request(Level::Beginner, GoalMode::Balanced, 30));
        let foundations = &draft.steps[1];
        assert_eq!(
            foundations.theory_explanations.len(),
            foundations.theory_outline.len()
        );
        assert!(foundations.theory_explanations[0].contains(Level::Beginner.tone()));
        assert!(foundations.objective.contains("Linear algebra"));
    }

    #[test]
    fn test_overview_mentions_goals() {
        let mut req = request(Level::Beginner, GoalMode::Balanced, 30);
        req.goals = Some("pass the midterm".to_string());
        let draft = plan(&req);
        assert!(draft
            .overview
            .starts_with("A concise plan to learn Linear algebra at beginner level in 30 min/day."));
        assert!(draft.overview.ends_with("Goal: pass the midterm."));
    }

    #[test]
    fn test_exercises_satisfy_contract() {
        let step = Step {
            id: crate::models::StepId(0),
            title: "Vectors".to_string(),
            objective: String::new(),
            theory_outline: vec![],
            theory_explanations: vec![],
            practice_tasks: vec![],
            suggested_resources: vec![],
        };
        let set = exercises(&step, Level::Intermediate);
        assert!(set.validate().is_ok());
        assert_eq!(set.quiz.len(), 5);
        assert_eq!(set.score(&[1, 1, 2, 1, 2]).correct, 5);
        assert_eq!((set.writing.min, set.writing.max), (100, 140));
        assert!(set.guided.title.contains("Vectors"));
        assert!(set.quiz[0].question.contains("Vectors"));
    }
}
