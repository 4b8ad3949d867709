// ABOUTME: Deterministic coach replies used when the AI endpoint is unavailable
// ABOUTME: Picks a topic from message keywords and fills a template from the user's aggregates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fallback Replies
//!
//! Offline answers built only from [`AssistantContext`] aggregates. The same
//! context and message always produce the same text, and the text is never
//! empty.

use super::context::AssistantContext;
use crate::trackers::percent_of;

/// What the user is asking about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTopic {
    /// Training, exercises, sessions
    Workout,
    /// Food, calories, macros
    Nutrition,
    /// Water intake
    Hydration,
    /// Body weight and BMI
    Weight,
    /// Motivation and consistency
    Motivation,
    /// Anything else
    General,
}

/// Keywords match whole words; a trailing `*` matches any word with that
/// prefix, and a space separates the words of a phrase
const TOPIC_KEYWORDS: &[(FallbackTopic, &[&str])] = &[
    (
        FallbackTopic::Hydration,
        &["water*", "hydrat*", "drink*", "glass*", "thirst*"],
    ),
    (
        FallbackTopic::Nutrition,
        &[
            "eat", "eats", "eating", "ate", "food*", "meal*", "diet*", "calori*", "kcal",
            "protein*", "carb*", "fat", "fats", "fatty", "macro*", "nutri*", "snack*",
        ],
    ),
    (
        FallbackTopic::Workout,
        &[
            "workout*", "exercis*", "train*", "gym*", "lift*", "squat*", "run", "runs",
            "running", "cardio", "muscle*", "strength*",
        ],
    ),
    (
        FallbackTopic::Weight,
        &["weigh*", "bmi", "lose", "losing", "gain", "gaining", "kg", "body"],
    ),
    (
        FallbackTopic::Motivation,
        &["motivat*", "tired", "lazy", "consisten*", "habit*", "give up"],
    ),
];

fn word_matches(word: &str, keyword: &str) -> bool {
    keyword
        .strip_suffix('*')
        .map_or(word == keyword, |stem| word.starts_with(stem))
}

fn mentions(words: &[&str], keyword: &str) -> bool {
    let parts: Vec<&str> = keyword.split(' ').collect();
    words.windows(parts.len()).any(|window| {
        window
            .iter()
            .zip(&parts)
            .all(|(word, part)| word_matches(word, part))
    })
}

impl FallbackTopic {
    /// Classify a message by its first matching keyword group
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let lowered = message.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        TOPIC_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| mentions(&words, k)))
            .map_or(Self::General, |(topic, _)| *topic)
    }
}

/// Build the offline reply for a message
#[must_use]
pub fn fallback_reply(context: &AssistantContext, message: &str) -> String {
    let greeting = context.profile.as_ref().map_or_else(
        || "I'm offline right now, but here's what I can tell you.".to_owned(),
        |p| format!("Hi {}! I'm offline right now, but here's what I can tell you.", p.name),
    );
    let body = match FallbackTopic::classify(message) {
        FallbackTopic::Workout => workout_reply(context),
        FallbackTopic::Nutrition => nutrition_reply(context),
        FallbackTopic::Hydration => hydration_reply(context),
        FallbackTopic::Weight => weight_reply(context),
        FallbackTopic::Motivation => motivation_reply(context),
        FallbackTopic::General => general_reply(context),
    };
    format!("{greeting}\n\n{body}")
}

fn workout_reply(ctx: &AssistantContext) -> String {
    let w = &ctx.workouts;
    if w.total_workouts == 0 {
        return "You haven't logged a workout yet. Start with three full-body sessions a week: \
                squats, push-ups and rows, 3 sets of 10 reps each, resting 90 seconds between sets."
            .to_owned();
    }
    let pace = if w.sessions_last_7_days >= 3 {
        "That's a solid weekly rhythm, so keep adding a little weight or a rep each week."
    } else {
        "Aim for at least three sessions a week to keep progressing."
    };
    format!(
        "You've logged {} workouts with a total volume of {:.0} kg, averaging {:.0} kcal per session. \
         {} of them were in the last 7 days. {pace}",
        w.total_workouts, w.total_volume, w.average_calories, w.sessions_last_7_days
    )
}

fn nutrition_reply(ctx: &AssistantContext) -> String {
    let n = &ctx.nutrition;
    let eaten = format!(
        "Today you've logged {:.0} kcal and {:.0} g of protein across {} meals.",
        n.totals.calories, n.totals.protein, n.totals.meal_count
    );
    match (n.goal_calories, n.goal_protein) {
        (Some(goal), Some(protein)) => {
            let remaining = goal - n.totals.calories;
            let advice = if remaining >= 0.0 {
                format!("You have {remaining:.0} kcal left for the day.")
            } else {
                format!("You're {:.0} kcal over your goal for the day.", -remaining)
            };
            format!(
                "{eaten} Your goal is {goal:.0} kcal ({}% reached) with {protein:.0} g of protein. {advice} \
                 Build meals around a lean protein source and vegetables.",
                percent_of(n.totals.calories, goal)
            )
        }
        _ => format!(
            "{eaten} Save your profile and calculate your targets to get a personal calorie and macro goal."
        ),
    }
}

fn hydration_reply(ctx: &AssistantContext) -> String {
    let h = &ctx.hydration;
    if h.glasses >= h.goal {
        format!(
            "You've had {} glasses of water today and met your goal of {}. Nice work!",
            h.glasses, h.goal
        )
    } else {
        format!(
            "You've had {} of {} glasses of water today. Drink {} more, spread across the rest of the day.",
            h.glasses,
            h.goal,
            h.goal - h.glasses
        )
    }
}

fn weight_reply(ctx: &AssistantContext) -> String {
    let Some(profile) = &ctx.profile else {
        return "Save your profile with your height and weight so I can work out your BMI and a healthy weight range."
            .to_owned();
    };
    let bmi = ctx
        .targets
        .as_ref()
        .map_or_else(String::new, |t| format!(" Your BMI is {:.1}.", t.bmi));
    let goal = profile.weight_to_goal_kg().map_or_else(String::new, |diff| {
        if diff.abs() < 0.05 {
            " You're at your goal weight.".to_owned()
        } else {
            format!(" You're {:.1} kg from your goal weight.", diff.abs())
        }
    });
    format!(
        "You currently weigh {:.1} kg.{bmi}{goal} Steady changes of about 0.5 kg per week are sustainable.",
        profile.current_weight_kg
    )
}

fn motivation_reply(ctx: &AssistantContext) -> String {
    let recent = ctx.workouts.sessions_last_7_days;
    if recent > 0 {
        format!(
            "You've trained {recent} times in the last 7 days, so the habit is already forming. \
             Focus on showing up, even for a short session."
        )
    } else {
        "Start small: a 20 minute walk or a short bodyweight circuit today counts. \
         Consistency beats intensity."
            .to_owned()
    }
}

fn general_reply(ctx: &AssistantContext) -> String {
    format!(
        "Here's your snapshot: {} workouts logged, {:.0} kcal eaten today, {} of {} glasses of water, \
         {} body analyses saved. Ask me about workouts, nutrition, hydration or your weight.",
        ctx.workouts.total_workouts,
        ctx.nutrition.totals.calories,
        ctx.hydration.glasses,
        ctx.hydration.goal,
        ctx.analyses.count
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coach::context::ContextSources;
    use chrono::NaiveDate;

    fn empty_context() -> AssistantContext {
        let today = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        AssistantContext::from_sources(ContextSources::default(), today, 8)
    }

    #[test]
    fn test_topic_classification() {
        assert_eq!(
            FallbackTopic::classify("How much WATER should I drink?"),
            FallbackTopic::Hydration
        );
        assert_eq!(
            FallbackTopic::classify("best protein sources"),
            FallbackTopic::Nutrition
        );
        assert_eq!(FallbackTopic::classify("leg day ideas for the gym"), FallbackTopic::Workout);
        assert_eq!(FallbackTopic::classify("hello"), FallbackTopic::General);
    }

    #[test]
    fn test_keywords_match_whole_words() {
        assert_eq!(FallbackTopic::classify("Ask me again"), FallbackTopic::General);
        assert_eq!(FallbackTopic::classify("That's great"), FallbackTopic::General);
        assert_eq!(FallbackTopic::classify("So much fatigue"), FallbackTopic::General);
        assert_eq!(FallbackTopic::classify("Is fat bad?"), FallbackTopic::Nutrition);
        assert_eq!(FallbackTopic::classify("eating late"), FallbackTopic::Nutrition);
        assert_eq!(FallbackTopic::classify("How to gain muscle"), FallbackTopic::Workout);
        assert_eq!(FallbackTopic::classify("I want to give up"), FallbackTopic::Motivation);
        assert_eq!(FallbackTopic::classify("my weight, 70kg"), FallbackTopic::Weight);
    }

    #[test]
    fn test_reply_is_deterministic_and_never_empty() {
        let ctx = empty_context();
        for message in ["", "water", "workout", "weight", "motivation", "food"] {
            let reply = fallback_reply(&ctx, message);
            assert!(!reply.trim().is_empty());
            assert_eq!(reply, fallback_reply(&ctx, message));
        }
    }

    #[test]
    fn test_hydration_reply_counts_remaining_glasses() {
        let reply = fallback_reply(&empty_context(), "water?");
        assert!(reply.contains("0 of 8 glasses"));
        assert!(reply.contains("Drink 8 more"));
    }
}
