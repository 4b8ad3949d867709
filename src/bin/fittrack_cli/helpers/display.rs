// ABOUTME: Output formatting helpers for fittrack-cli
// ABOUTME: Provides consistent display functions for profiles, logs, workouts and plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fittrack::coach::{GeneratedPlan, PlanSource};
use fittrack::models::{BodyAnalysis, CalorieTargets, DailyMealLog, UserProfile, WorkoutSession};
use fittrack::trackers::{DietProgress, HydrationProgress, ProfileSummary, WorkoutSummary};

/// Print a section header
pub fn print_header(title: &str) {
    println!("\n{title}");
    println!("{}", "=".repeat(title.len().max(40)));
}

/// Display saved calorie targets
pub fn display_targets(targets: &CalorieTargets) {
    print_header("Daily Targets");
    println!("   BMI:          {:.1}", targets.bmi);
    println!("   BMR:          {:.0} kcal", targets.bmr);
    println!("   TDEE:         {:.0} kcal", targets.tdee);
    println!("   Calorie goal: {:.0} kcal", targets.goal_calories);
    println!(
        "   Macros:       {:.0} g protein, {:.0} g carbs, {:.0} g fats",
        targets.protein, targets.carbs, targets.fats
    );
}

/// Display a profile with its derived figures
pub fn display_profile(profile: &UserProfile, summary: &ProfileSummary) {
    print_header(&format!("Profile: {}", profile.name));
    println!("   Age:       {}", profile.age);
    println!("   Gender:    {}", profile.gender);
    println!("   Height:    {:.0} cm", profile.height_cm);
    println!("   Weight:    {:.1} kg", profile.current_weight_kg);
    if let Some(goal) = profile.goal_weight_kg {
        println!("   Goal:      {goal:.1} kg");
    }
    println!("   Activity:  {}", profile.activity_level.description());
    println!("   Aim:       {}", profile.fitness_goal);
    println!("   Joined:    {}", profile.join_date);
    println!(
        "   BMI:       {:.1} ({}, {})",
        summary.bmi,
        summary.classification.category,
        summary.classification.color.as_str()
    );
    println!(
        "   Healthy:   {:.1} to {:.1} kg",
        summary.healthy_range.min_kg, summary.healthy_range.max_kg
    );
    if let Some(diff) = summary.weight_to_goal_kg {
        println!("   To goal:   {diff:+.1} kg");
    }
}

/// Display today's meals and calorie progress
pub fn display_diet(log: &DailyMealLog, progress: &DietProgress) {
    print_header(&format!("Meals for {}", log.date));
    if log.meals.is_empty() {
        println!("   No meals logged today.");
    }
    for (i, meal) in log.meals.iter().enumerate() {
        println!(
            "   [{i}] {:<24} {:>6.0} kcal {:>5.0} g protein",
            meal.name, meal.calories, meal.protein
        );
    }
    println!(
        "\n   Total: {:.0} kcal, {:.0} g protein",
        progress.totals.calories, progress.totals.protein
    );
    match (progress.goal_calories, progress.remaining_calories) {
        (Some(goal), Some(remaining)) => {
            println!(
                "   Goal:  {goal:.0} kcal ({}%), {remaining:.0} kcal remaining",
                progress.calorie_percent.unwrap_or(0)
            );
        }
        _ => println!("   No targets saved. Run `fittrack-cli profile targets --save`."),
    }
}

/// Display today's water intake
pub fn display_hydration(progress: &HydrationProgress) {
    print_header("Water");
    let filled = progress.glasses.min(progress.goal) as usize;
    let empty = progress.goal.saturating_sub(progress.glasses) as usize;
    println!(
        "   [{}{}] {} / {} glasses ({} ml, {}%)",
        "#".repeat(filled),
        ".".repeat(empty),
        progress.glasses,
        progress.goal,
        progress.millilitres,
        progress.percent
    );
    if progress.goal_met() {
        println!("   Daily goal reached!");
    }
}

/// Display one workout session
pub fn display_session(session: &WorkoutSession) {
    println!(
        "   {} {}  volume {:.0} kg, {:.0} kcal{}",
        session.date,
        session.id,
        session.volume,
        session.calories,
        session
            .duration_minutes
            .map_or_else(String::new, |m| format!(", {m} min"))
    );
    for exercise in &session.exercises {
        println!(
            "      - {} {}x{} @ {:.1} kg",
            exercise.name, exercise.sets, exercise.reps, exercise.weight_kg
        );
    }
}

/// Display workout aggregates
pub fn display_workout_summary(summary: &WorkoutSummary) {
    print_header("Workout Summary");
    println!("   Sessions:      {}", summary.total_workouts);
    println!("   Last 7 days:   {}", summary.sessions_last_7_days);
    println!("   Total volume:  {:.0} kg", summary.total_volume);
    println!(
        "   Calories:      {:.0} kcal (average {:.0})",
        summary.total_calories, summary.average_calories
    );
    if let Some(last) = summary.last_workout {
        println!("   Last workout:  {last}");
    }
}

/// Display a saved analysis
pub fn display_analysis(analysis: &BodyAnalysis) {
    println!(
        "   {} {}  {}  areas: {}  ({} bytes base64)",
        analysis.date,
        analysis.id,
        analysis.name,
        analysis.areas.join(", "),
        analysis.image_payload().len()
    );
}

/// Display a generated workout plan
pub fn display_plan(generated: &GeneratedPlan) {
    let plan = &generated.plan;
    print_header(&plan.title);
    if let PlanSource::Fallback { reason } = &generated.source {
        println!("   (Template plan: the AI coach was unavailable: {reason})");
    }
    for day in &plan.days {
        println!("\n   {}: {}", day.day, day.focus);
        for exercise in &day.exercises {
            println!(
                "      - {:<22} {} x {:<3} rest {}s",
                exercise.name, exercise.sets, exercise.reps, exercise.rest_seconds
            );
        }
    }
    if !plan.notes.is_empty() {
        println!("\n   Notes:");
        for note in &plan.notes {
            println!("      * {note}");
        }
    }
}
