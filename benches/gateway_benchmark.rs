// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use criterion::{criterion_group, criterion_main, Criterion};
use holiday_planner::models::{GroupType, PlanRequest, SuggestionRequest};
use holiday_planner::services::planner::{
    into_payload, render_plan_prompt, render_suggestion_prompt, strip_code_fences,
};
use std::hint::black_box;

fn bench_prompts(c: &mut Criterion) {
    let suggestion = SuggestionRequest {
        location: "San Francisco".to_string(),
        budget: 4200.0,
        people: 4,
        days: 7,
        group_type: GroupType::Family,
    };
    let plan = PlanRequest {
        destination: "Reykjavik".to_string(),
        budget: 3100.0,
        people: 2,
        days: 5,
        group_type: GroupType::Couple,
    };

    c.bench_function("render_suggestion_prompt", |b| {
        b.iter(|| render_suggestion_prompt(black_box(&suggestion), black_box("2025-06-01")))
    });
    c.bench_function("render_plan_prompt", |b| {
        b.iter(|| render_plan_prompt(black_box(&plan), black_box("2025-06-01")))
    });
}

fn bench_reply_handling(c: &mut Criterion) {
    let days: Vec<String> = (1..=14)
        .map(|d| format!(r#"{{"day": {d}, "activities": ["Museum", "Harbour walk"], "notes": "", "approximate_cost": 120}}"#))
        .collect();
    let reply = format!(
        "Here is your plan:\n```json\n{{\"itinerary\": [{}], \"local_customs\": [\"Tip 10%\"]}}\n```\nHave fun!",
        days.join(",")
    );

    c.bench_function("strip_code_fences", |b| {
        b.iter(|| strip_code_fences(black_box(&reply)))
    });
    c.bench_function("into_payload", |b| b.iter(|| into_payload(black_box(&reply))));
}

criterion_group!(benches, bench_prompts, bench_reply_handling);
criterion_main!(benches);
