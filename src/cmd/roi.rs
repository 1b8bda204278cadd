use clap::Args;
use crewforge::api;
use crewforge::config::Config;
use crewforge::error::CfResult;
use crewforge::model::CharacterTable;

#[derive(Args, Debug, Clone)]
pub struct RoiArgs {
    #[command(flatten)]
    pub ship: super::ShipArgs,

    #[command(flatten)]
    pub roster: super::RosterArgs,

    #[command(flatten)]
    pub config: Config,

    /// Emit the report as JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    /// Show only the top N upgrades.
    #[arg(long)]
    pub top: Option<usize>,
}

pub fn run(args: RoiArgs, table: &CharacterTable) -> CfResult<()> {
    let ship = args.ship.build()?;
    let selection = args.roster.build(table)?;

    if !args.json {
        println!("📈 Evaluating rank upgrades for {} characters...", selection.len());
    }

    let mut progress = super::CliProgress::default();
    let mut report = api::analyze_roi(table, &selection, &ship, &args.config, &mut progress)?;

    if let Some(top) = args.top {
        report.results.truncate(top);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    crate::reports::print_roi(&report);
    Ok(())
}
