//! Plain-text rendering of core view-models

use std::fmt::Write;
use triage_core::prelude::*;
use triage_core::CatalogSummary;

pub(crate) fn summary(summary: &CatalogSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Shape:       {:?}", summary.shape);
    let _ = writeln!(out, "Records:     {}", summary.records);
    let _ = writeln!(out, "Symptoms:    {}", summary.symptoms);
    let _ = writeln!(out, "Fingerprint: {}", summary.fingerprint);
    let _ = writeln!(out, "Loaded at:   {}", summary.loaded_at.to_rfc3339());
    let _ = writeln!(out);
    let _ = writeln!(out, "Column roles:");
    let roles = serde_json::to_value(&summary.roles).unwrap_or_default();
    if let Some(map) = roles.as_object() {
        for (role, key) in map {
            let key = key.as_str().unwrap_or("(unresolved)");
            let _ = writeln!(out, "  {role:<15} {key}");
        }
    }
    if !summary.unresolved.is_empty() {
        let names: Vec<_> = summary.unresolved.iter().map(|r| r.name()).collect();
        let _ = writeln!(out, "\nwarning: no column for {}", names.join(", "));
    }
    out
}

pub(crate) fn symptoms(hits: &[SymptomEntry], query: &str) -> String {
    if hits.is_empty() {
        return if query.is_empty() {
            "No symptoms in dataset.\n".to_string()
        } else {
            format!("No symptom matches \"{query}\".\n")
        };
    }
    hits.iter().map(|e| format!("{}\n", e.label())).collect()
}

pub(crate) fn actions(label: &str, resolution: &Resolution) -> String {
    if resolution.is_empty() {
        return format!("No applicable diagnostic actions for {label}.\n");
    }
    let mut out = format!("{label}\n");
    let mut number = 0;
    for block in &resolution.blocks {
        let _ = writeln!(out, "\n{}", block.label);
        for group in &block.groups {
            number += 1;
            let _ = write!(out, "  [{number}] {}", group.support_text);
            if let Some(target) = group.how_to_target() {
                let _ = write!(out, "  (how to: {target})");
            }
            out.push('\n');
        }
    }
    out
}

pub(crate) fn checklist(plan: &MaintenancePlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Sub issue: {}", plan.sub_issue);
    let _ = writeln!(out, "Symptom to confirm on site: {}", plan.symptom_label);
    let _ = writeln!(out, "Actions to do:");
    if plan.checklist.is_empty() {
        let _ = writeln!(out, "  (none listed)");
    }
    for step in &plan.checklist {
        let _ = writeln!(out, "  [ ] {step}");
    }
    if let Some(spare) = &plan.spare_part {
        let _ = writeln!(out, "Spare parts needed:");
        let _ = writeln!(out, "  [ ] {spare}");
    }
    out
}
