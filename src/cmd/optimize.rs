use clap::Args;
use crewforge::api;
use crewforge::config::Config;
use crewforge::error::CfResult;
use crewforge::model::CharacterTable;

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub ship: super::ShipArgs,

    #[command(flatten)]
    pub roster: super::RosterArgs,

    #[command(flatten)]
    pub config: Config,

    /// Emit the report as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: OptimizeArgs, table: &CharacterTable) -> CfResult<()> {
    let ship = args.ship.build()?;
    let selection = args.roster.build(table)?;

    if !args.json {
        println!(
            "🚀 Placing {} characters across {} rooms...",
            selection.len(),
            ship.len()
        );
    }

    let mut progress = super::CliProgress::default();
    let out = api::optimize(table, &selection, &ship, &args.config, &mut progress)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&out.report)?);
        return Ok(());
    }

    crate::reports::print_layout(&out.report);
    println!(
        "\nTotal efficiency {:.1} after trying {} control-room rosters",
        out.efficiency, out.configs_tried
    );
    Ok(())
}
