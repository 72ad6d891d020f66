//! Flat projections of a profile for spreadsheets and plain-text reports.

use serde::Serialize;
use std::fmt::Write;

use crate::profile::{ResumeProfile, SkillSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRow {
    pub category: String,
    pub skill: String,
}

/// `"web_development"` -> `"Web Development"`.
pub fn display_category(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One row per matched skill, categories in taxonomy order.
pub fn skill_rows(skills: &SkillSet) -> Vec<SkillRow> {
    skills
        .iter()
        .flat_map(|(category, terms)| {
            let category = display_category(category);
            terms.iter().map(move |skill| SkillRow {
                category: category.clone(),
                skill: skill.clone(),
            })
        })
        .collect()
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn skills_csv(skills: &SkillSet) -> String {
    let mut out = String::from("Category,Skill\n");
    for row in skill_rows(skills) {
        out.push_str(&csv_field(&row.category));
        out.push(',');
        out.push_str(&csv_field(&row.skill));
        out.push('\n');
    }
    out
}

pub fn summary_report(profile: &ResumeProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "RESUME ANALYSIS REPORT");
    let _ = writeln!(out, "{}", "=".repeat(50));
    let _ = writeln!(out);
    let _ = writeln!(out, "Name: {}", profile.name);
    let _ = writeln!(out, "Email: {}", profile.contact_info.email);
    let _ = writeln!(out, "Phone: {}", profile.contact_info.phone);
    let _ = writeln!(out, "Experience: {}", profile.experience.years);
    let _ = writeln!(out);
    let _ = writeln!(out, "SKILLS:");

    for (category, terms) in profile.skills.iter() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}:", display_category(category).to_uppercase());
        for skill in terms {
            let _ = writeln!(out, "  - {skill}");
        }
    }
    out
}
