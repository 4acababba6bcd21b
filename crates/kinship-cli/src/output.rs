//! Output formatting utilities

use kinship_core::{group_by_distance, IndexStats, Relationship, RelationshipView};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    /// Strict parse, for validating user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Format output as JSON
pub fn format_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// Relatives of `subject`, nearest first, without the subject itself
pub fn format_relationships(
    heading: &str,
    subject: &str,
    relationships: &[Relationship],
    format: OutputFormat,
) -> anyhow::Result<String> {
    let rings = group_by_distance(relationships);

    match format {
        OutputFormat::Json => {
            let views: Vec<RelationshipView> = rings
                .values()
                .flatten()
                .map(Relationship::view)
                .collect();
            format_json(&views)
        }
        OutputFormat::Table => {
            if rings.is_empty() {
                return Ok(format!("No {} found for {}", heading.to_lowercase(), subject));
            }

            let found: usize = rings.values().map(Vec::len).sum();
            let mut out = format!("{} of {} ({} found):", heading, subject, found);
            for (distance, ring) in &rings {
                out.push_str(&format!("\n  Distance {}:", distance));
                for relationship in ring {
                    out.push_str(&format!(
                        "\n    {} - {} [{}]",
                        relationship.node.name(),
                        relationship.description,
                        relationship.id()
                    ));
                }
            }
            Ok(out)
        }
    }
}

pub fn format_stats(stats: &IndexStats, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(stats),
        OutputFormat::Table => {
            let mut out = format!("Persons: {}\nEdges: {}", stats.nodes, stats.edges);
            for (kind, count) in &stats.edges_by_kind {
                out.push_str(&format!("\n  {}: {}", kind, count));
            }
            Ok(out)
        }
    }
}
