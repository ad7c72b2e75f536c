// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text and JSON rendering for jobs, plans, and progress events.
//!
//! The `*_lines` builders return uncolored text so they can be asserted on;
//! color is applied only when printing.

use crate::color;
use clap::ValueEnum;
use fl_core::{BranchPlan, DuplicateResolution, Job, ProgressEvent, Stage};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Header,
    Muted,
    Success,
    Failure,
}

pub type Line = (Tone, String);

const STAGE_WIDTH: usize = 13;

pub fn event_line(event: &ProgressEvent) -> Line {
    let tone = match event.stage {
        Stage::Failed => Tone::Failure,
        Stage::Completed => Tone::Success,
        _ => Tone::Plain,
    };
    let stage = event.stage.to_string();
    (tone, format!("[{:>3}%] {stage:<STAGE_WIDTH$} {}", event.percent, event.message))
}

fn short_commit(commit: &str) -> &str {
    commit.get(..7).unwrap_or(commit)
}

pub fn job_lines(job: &Job) -> Vec<Line> {
    let mut lines = vec![(Tone::Header, format!("{} {} ({}%)", job.id, job.stage, job.percent))];
    lines.push((Tone::Muted, format!("source: {}", job.source_name)));

    if let Some(message) = &job.error_message {
        let kind = job.error_kind.map(|k| k.to_string()).unwrap_or_else(|| "error".to_string());
        lines.push((Tone::Failure, format!("error ({kind}): {message}")));
    }

    let Some(outcome) = &job.result else {
        return lines;
    };
    lines.push((Tone::Header, format!("repository: {} {}", outcome.attempted_name, outcome.repository_url)));
    lines.push((Tone::Muted, format!("clone: {}", outcome.clone_url)));
    if outcome.name_retry_count > 0 {
        lines.push((Tone::Muted, format!("name retries: {}", outcome.name_retry_count)));
    }
    for branch in &outcome.branch_results {
        if branch.pushed {
            let commit = branch.commit_ref.as_deref().map(short_commit).unwrap_or("-");
            lines.push((Tone::Success, format!("  pushed  {} {commit}", branch.branch_name)));
        } else {
            let error = branch.error.as_deref().unwrap_or("unknown error");
            lines.push((Tone::Failure, format!("  failed  {}: {error}", branch.branch_name)));
        }
    }
    lines.push((
        Tone::Plain,
        format!("{}/{} branches pushed", outcome.pushed_count(), outcome.branch_results.len()),
    ));
    lines
}

fn join_set<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    let joined: Vec<&str> = items.into_iter().map(String::as_str).collect();
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined.join(", ")
    }
}

pub fn plan_lines(plan: &BranchPlan) -> Vec<Line> {
    let mut lines = vec![
        (Tone::Plain, format!("languages: {}", join_set(&plan.detected_languages))),
        (Tone::Plain, format!("frameworks: {}", join_set(&plan.detected_frameworks))),
    ];
    for (name, files) in plan.branches() {
        let noun = if files.len() == 1 { "file" } else { "files" };
        lines.push((Tone::Header, format!("{name} ({} {noun})", files.len())));
        lines.extend(files.iter().map(|path| (Tone::Muted, format!("  {path}"))));
    }

    let conflicts = &plan.conflicts;
    if !conflicts.has_conflicts() {
        return lines;
    }
    lines.push((Tone::Header, "conflicts".to_string()));
    for group in &conflicts.duplicates {
        let action = match &group.resolution {
            DuplicateResolution::KeepOne { recommended } => format!("keep {recommended}"),
            DuplicateResolution::Rename { renamed } => format!("rename to {}", renamed.join(", ")),
        };
        lines.push((Tone::Failure, format!("  duplicate {}: {} ({action})", group.file_name, group.paths.join(", "))));
    }
    for file in &conflicts.oversized {
        lines.push((Tone::Failure, format!("  oversized {} ({}): {}", file.path, file.display_size, file.suggestion)));
    }
    for path in &conflicts.secret_bearing {
        lines.push((Tone::Failure, format!("  secret-bearing {path}")));
    }
    for collision in &conflicts.case_collisions {
        lines.push((Tone::Failure, format!("  case collision {}: {}", collision.names.join(" / "), collision.suggestion)));
    }
    lines
}

fn paint((tone, text): &Line) -> String {
    match tone {
        Tone::Plain => text.clone(),
        Tone::Header => color::header(text),
        Tone::Muted => color::muted(text),
        Tone::Success => color::success(text),
        Tone::Failure => color::failure(text),
    }
}

fn print_lines(lines: &[Line]) {
    for line in lines {
        println!("{}", paint(line));
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty { serde_json::to_string_pretty(value)? } else { serde_json::to_string(value)? };
    println!("{text}");
    Ok(())
}

/// Events are printed one per line so JSON output streams as NDJSON.
pub fn print_event(event: &ProgressEvent, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", paint(&event_line(event)));
            Ok(())
        }
        OutputFormat::Json => print_json(event, false),
    }
}

pub fn print_job(job: &Job, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            print_lines(&job_lines(job));
            Ok(())
        }
        OutputFormat::Json => print_json(job, true),
    }
}

pub fn print_plan(plan: &BranchPlan, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            print_lines(&plan_lines(plan));
            Ok(())
        }
        OutputFormat::Json => print_json(plan, true),
    }
}

/// Dimmed note for text output; JSON output stays machine-readable.
pub fn note(text: &str, format: OutputFormat) {
    if format == OutputFormat::Text {
        println!("{}", color::context(text));
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
