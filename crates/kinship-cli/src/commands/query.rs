//! Relationship query commands

use clap::Args;

use crate::output::format_relationships;
use crate::AppContext;

#[derive(Args)]
pub struct PersonArgs {
    /// Person id
    pub id: String,
}

#[derive(Args)]
pub struct DistanceArgs {
    /// Person id
    pub id: String,
    /// Maximum distance (defaults to max_distance from config)
    #[arg(short, long)]
    pub depth: Option<u32>,
}

#[derive(Args)]
pub struct RelativesArgs {
    /// Person id
    pub id: String,
    /// Maximum distance (defaults to max_distance from config)
    #[arg(short, long)]
    pub depth: Option<u32>,
    /// Do not follow marriages
    #[arg(long)]
    pub no_marriage: bool,
}

pub fn ancestors(args: &DistanceArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let depth = ctx.distance(args.depth)?;
    let Some(person) = ctx.person(&args.id)? else {
        return not_found(&args.id);
    };

    let found = ctx.service.ancestors(&person.id(), depth);
    tracing::info!("Found {} ancestors within {} of {}", found.len().saturating_sub(1), depth, person);
    println!("{}", format_relationships("Ancestors", person.name(), &found, ctx.format)?);
    Ok(())
}

pub fn descendants(args: &DistanceArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let depth = ctx.distance(args.depth)?;
    let Some(person) = ctx.person(&args.id)? else {
        return not_found(&args.id);
    };

    let found = ctx.service.descendants(&person.id(), depth);
    tracing::info!("Found {} descendants within {} of {}", found.len().saturating_sub(1), depth, person);
    println!("{}", format_relationships("Descendants", person.name(), &found, ctx.format)?);
    Ok(())
}

pub fn siblings(args: &PersonArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let Some(person) = ctx.person(&args.id)? else {
        return not_found(&args.id);
    };

    let found = ctx.service.siblings(&person.id());
    println!("{}", format_relationships("Siblings", person.name(), &found, ctx.format)?);
    Ok(())
}

pub fn relatives(args: &RelativesArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let depth = ctx.distance(args.depth)?;
    let Some(person) = ctx.person(&args.id)? else {
        return not_found(&args.id);
    };

    let found = if args.no_marriage {
        ctx.service.close_relatives_excluding_marriage(&person.id(), depth)
    } else {
        ctx.service.close_relatives_including_marriage(&person.id(), depth)
    };
    println!("{}", format_relationships("Relatives", person.name(), &found, ctx.format)?);
    Ok(())
}

pub fn others(args: &DistanceArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let depth = ctx.distance(args.depth)?;
    let Some(person) = ctx.person(&args.id)? else {
        return not_found(&args.id);
    };

    let found = ctx.service.other_relatives(&person.id(), depth);
    println!(
        "{}",
        format_relationships("Other relatives", person.name(), &found, ctx.format)?
    );
    Ok(())
}

fn not_found(id: &str) -> anyhow::Result<()> {
    println!("Person '{}' not found", id.trim());
    Ok(())
}
