use clap::Args;
use crewforge::error::{CfResult, CrewForgeError};
use crewforge::model::{CharacterTable, Rank};

#[derive(Args, Debug, Clone)]
pub struct TalentsArgs {
    /// Character name, as spelled in the talent table.
    #[arg(long)]
    pub name: String,

    /// Rank to resolve talents at.
    #[arg(long, default_value_t = Rank::E4)]
    pub rank: Rank,
}

pub fn run(args: TalentsArgs, table: &CharacterTable) -> CfResult<()> {
    if !table.contains(&args.name) {
        return Err(CrewForgeError::Data(format!(
            "character '{}' is not in the talent table",
            args.name
        )));
    }
    let talents = table.talents_for_rank(&args.name, args.rank);
    crate::reports::print_talents(&args.name, args.rank, &talents);
    Ok(())
}
