// ABOUTME: Integration tests for AI workout-plan generation
// ABOUTME: Valid model JSON is used as-is; malformed output or provider errors use the template plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
// Test files don't require documentation - this is a rustc lint (not clippy)
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use fittrack::coach::{
    fallback_plan, parse_plan_response, ExperienceLevel, PlanRequest, PlanSource, WorkoutPlanner,
};
use fittrack::errors::{AppError, ErrorKind};
use fittrack::llm::{LlmCapabilities, LlmProvider};
use fittrack::models::FitnessGoal;
use helpers::scripted_provider::{Script, ScriptedProvider};

const VALID_PLAN: &str = r#"{
  "title": "Three-Day Strength",
  "days_per_week": 3,
  "days": [
    {"day": "Monday", "focus": "Legs", "exercises": [{"name": "Squat", "sets": 3, "reps": 8, "rest_seconds": 120}]},
    {"day": "Wednesday", "focus": "Push", "exercises": [{"name": "Bench Press", "sets": 3, "reps": 8, "rest_seconds": 120}]},
    {"day": "Friday", "focus": "Pull", "exercises": [{"name": "Deadlift", "sets": 2, "reps": 5, "rest_seconds": 180}]}
  ],
  "notes": ["Sleep at least 7 hours."]
}"#;

fn request() -> PlanRequest {
    PlanRequest::new(FitnessGoal::Gain, ExperienceLevel::Intermediate, 3).unwrap()
}

fn planner(scripts: Vec<Script>) -> (WorkoutPlanner, Arc<ScriptedProvider>) {
    common::init_test_logging();
    let provider = Arc::new(ScriptedProvider::new(scripts));
    let dyn_provider: Arc<dyn LlmProvider> = provider.clone();
    (WorkoutPlanner::new(Some(dyn_provider)), provider)
}

#[tokio::test]
async fn test_valid_json_is_model_plan() {
    let (planner, provider) = planner(vec![Script::Reply(VALID_PLAN.to_owned())]);

    let generated = planner
        .generate(&request(), Some(&common::sample_profile()))
        .await
        .unwrap();

    assert_eq!(generated.source, PlanSource::Model);
    assert_eq!(generated.plan.title, "Three-Day Strength");
    assert_eq!(generated.plan.days[2].exercises[0].name, "Deadlift");

    let sent = &provider.requests()[0];
    assert!(sent.json_response);
    assert!(!sent.stream);
    let prompt = &sent.messages[0].content;
    assert!(prompt.contains("Goal: gain"));
    assert!(prompt.contains("Experience: intermediate"));
    assert!(prompt.contains("Weight: 70.0 kg"));
}

#[tokio::test]
async fn test_fenced_json_is_accepted() {
    let fenced = format!("```json\n{VALID_PLAN}\n```");
    let (planner, _) = planner(vec![Script::Reply(fenced)]);

    let generated = planner.generate(&request(), None).await.unwrap();
    assert_eq!(generated.source, PlanSource::Model);
}

#[tokio::test]
async fn test_malformed_json_uses_template() {
    let (planner, _) = planner(vec![Script::Reply(
        "Here is your plan: squats on Monday!".to_owned(),
    )]);

    let generated = planner.generate(&request(), None).await.unwrap();

    assert!(matches!(generated.source, PlanSource::Fallback { .. }));
    assert_eq!(generated.plan, fallback_plan(&request()));
}

#[tokio::test]
async fn test_provider_error_uses_template() {
    let (planner, _) = planner(vec![Script::Fail(AppError::network("timeout"))]);

    let generated = planner.generate(&request(), None).await.unwrap();

    let PlanSource::Fallback { reason } = generated.source else {
        panic!("expected template plan");
    };
    assert!(reason.contains("timeout"));
    assert_eq!(generated.plan.days.len(), 3);
}

#[tokio::test]
async fn test_plan_with_wrong_day_count_uses_template() {
    let (planner, _) = planner(vec![Script::Reply(VALID_PLAN.to_owned())]);
    let five_days = PlanRequest::new(FitnessGoal::Gain, ExperienceLevel::Intermediate, 5).unwrap();

    let generated = planner.generate(&five_days, None).await.unwrap();

    let PlanSource::Fallback { reason } = generated.source else {
        panic!("a 3-day answer must not satisfy a 5-day request");
    };
    assert!(reason.contains("5 were requested"), "{reason}");
    assert_eq!(generated.plan, fallback_plan(&five_days));
    assert_eq!(generated.plan.days_per_week, 5);
}

#[tokio::test]
async fn test_json_mode_only_when_supported() {
    common::init_test_logging();
    let provider = Arc::new(
        ScriptedProvider::new(vec![Script::Reply(VALID_PLAN.to_owned())])
            .with_capabilities(LlmCapabilities::text_only()),
    );
    let dyn_provider: Arc<dyn LlmProvider> = provider.clone();
    let planner = WorkoutPlanner::new(Some(dyn_provider));

    planner.generate(&request(), None).await.unwrap();
    assert!(!provider.requests()[0].json_response);
}

#[tokio::test]
async fn test_offline_planner_returns_template() {
    let planner = WorkoutPlanner::new(None);
    let generated = planner.generate(&request(), None).await.unwrap();
    assert_eq!(
        generated.source,
        PlanSource::Fallback {
            reason: "offline mode".to_owned()
        }
    );
}

#[test]
fn test_schema_violations_are_validation_errors() {
    let zero_sets = VALID_PLAN.replace("\"sets\": 2", "\"sets\": 0");
    let err = parse_plan_response(&zero_sets).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = parse_plan_response("{\"title\": 5}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_template_plan_is_deterministic() {
    let req = PlanRequest::new(FitnessGoal::Lose, ExperienceLevel::Beginner, 5).unwrap();
    assert_eq!(fallback_plan(&req), fallback_plan(&req));
    assert_eq!(fallback_plan(&req).days_per_week, 5);
}
