//! Graph statistics command

use crate::output::format_stats;
use crate::AppContext;

pub fn run(ctx: &AppContext) -> anyhow::Result<()> {
    let stats = ctx.service.stats();
    tracing::info!("Graph has {} persons and {} edges", stats.nodes, stats.edges);
    println!("{}", format_stats(&stats, ctx.format)?);
    Ok(())
}
