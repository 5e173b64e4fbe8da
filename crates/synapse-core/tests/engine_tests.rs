mod common;

use jiff::civil::date;
use synapse_core::{
    generator::PlanRequest,
    models::{GoalMode, Level, ProgressStatus, StepMeta},
    params::{AgendaQuery, GradeExercises, Id, ListPlans, RenderMap, StepRef},
    EngineError, MapFormat, MapStyle, Session,
};

use common::{create_test_engine, open_engine};

fn request(topic: &str) -> PlanRequest {
    PlanRequest {
        topic: topic.to_string(),
        level: Level::Beginner,
        goals: Some("understand the basics".to_string()),
        goal_mode: GoalMode::Balanced,
        time_per_day: 20,
    }
}

#[tokio::test]
async fn test_complete_learning_workflow() {
    let (_temp_dir, engine) = create_test_engine().await;
    let mut session = Session::new(engine.clone(), "learner");

    let plan = session
        .create_plan(request("Cell biology"))
        .await
        .expect("Failed to create plan");
    assert_eq!(session.selected_plan(), Some(plan.id));
    assert!(plan.len() >= 2);

    // Explanations are generated once and then served from the cache
    let step = StepRef::new(plan.id, 0);
    let first = engine.explain_step(&step).await.expect("Failed to explain");
    assert!(!first.is_cached());
    let second = engine.explain_step(&step).await.expect("Failed to explain");
    assert!(second.is_cached());
    assert_eq!(first.content, second.content);

    // Answering every question correctly gives a full score
    let exercises = engine
        .generate_exercises(&step)
        .await
        .expect("Failed to generate exercises")
        .content;
    let answers: Vec<usize> = exercises.quiz.iter().map(|q| q.answer).collect();
    let report = engine
        .grade_exercises(&GradeExercises {
            step,
            answers,
            essay: None,
        })
        .await
        .expect("Failed to grade");
    assert_eq!(report.score.correct, report.score.total);
    assert!(report.writing.is_none());

    // Progress
    session.set_progress(0, ProgressStatus::Done).await.unwrap();
    let summary = session
        .set_progress(1, ProgressStatus::Doing)
        .await
        .unwrap();
    assert_eq!(summary.done, 1);
    assert_eq!(summary.doing, 1);
    assert_eq!(summary.total, plan.len());

    let progress = engine.plan_progress(&Id { id: plan.id }).await.unwrap();
    assert_eq!(progress.statuses[0], ProgressStatus::Done);
    assert_eq!(progress.statuses[1], ProgressStatus::Doing);

    // Listing reflects the progress
    let summaries = engine
        .list_plans(&ListPlans {
            owner_id: "learner".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].progress.done, 1);
    assert!(summaries[0].fallback);

    // Deleting removes the plan and closes it
    session.delete_plan().await.expect("Failed to delete");
    assert_eq!(session.selected_plan(), None);
    assert!(engine.get_plan(&Id { id: plan.id }).await.unwrap().is_none());
}

#[tokio::test]
async fn test_state_survives_reopening_database() {
    let (temp_dir, engine) = create_test_engine().await;
    let mut session = Session::new(engine, "learner");
    let plan = session.create_plan(request("Optics")).await.unwrap();
    session.set_progress(2, ProgressStatus::Done).await.unwrap();
    drop(session);

    let engine = open_engine(&temp_dir).await;
    let reopened = engine.get_plan(&Id { id: plan.id }).await.unwrap();
    assert_eq!(reopened.as_ref(), Some(&plan));

    let statuses = engine.progress_map(&Id { id: plan.id }).await.unwrap();
    assert_eq!(statuses.get(&2), Some(&ProgressStatus::Done));
    assert_eq!(statuses.len(), 1);
}

#[tokio::test]
async fn test_agenda_lists_due_and_overdue_steps() {
    let (_temp_dir, engine) = create_test_engine().await;
    let mut session = Session::new(engine.clone(), "learner");
    let plan = session.create_plan(request("Accounting")).await.unwrap();

    let today = date(2026, 9, 14);
    for (index, due) in [(0, date(2026, 9, 10)), (1, today), (2, date(2026, 9, 20))] {
        session
            .set_step_meta(
                index,
                StepMeta {
                    due_date: Some(due),
                    notes: String::new(),
                },
            )
            .await
            .unwrap();
    }
    // Finished steps never show up
    session.set_progress(1, ProgressStatus::Done).await.unwrap();

    let agenda = engine
        .agenda(&AgendaQuery {
            plan_id: plan.id,
            today,
        })
        .await
        .unwrap();
    assert_eq!(agenda.overdue.len(), 1);
    assert_eq!(agenda.overdue[0].index, 0);
    assert!(agenda.due_today.is_empty());
}

#[tokio::test]
async fn test_render_map_every_style() {
    let (_temp_dir, engine) = create_test_engine().await;
    let mut session = Session::new(engine.clone(), "learner");
    let plan = session.create_plan(request("Topology")).await.unwrap();

    for style in [MapStyle::Linear, MapStyle::Radial, MapStyle::Tiered] {
        let map = engine
            .render_map(&RenderMap {
                plan_id: plan.id,
                style,
                format: MapFormat::Svg,
                highlight: Some(0),
            })
            .await
            .unwrap()
            .expect("SVG is always available");
        let svg = String::from_utf8(map.bytes).unwrap();
        assert!(svg.starts_with("<svg"), "{style} map is not SVG");
        assert!(map.width > 0 && map.height > 0);
    }
}

#[tokio::test]
async fn test_foreign_plan_is_read_only() {
    let (_temp_dir, engine) = create_test_engine().await;
    let mut owner = Session::new(engine.clone(), "owner");
    let plan = owner.create_plan(request("Chess openings")).await.unwrap();

    let mut visitor = Session::new(engine, "visitor");
    visitor.open_plan(plan.id).await.unwrap();
    assert!(visitor.is_read_only());

    let result = visitor.set_progress(0, ProgressStatus::Done).await;
    assert!(matches!(result, Err(EngineError::ReadOnly { plan_id }) if plan_id == plan.id));
}
