pub mod optimize;
pub mod roi;
pub mod talents;

use clap::Args;
use crewforge::error::{CfResult, CrewForgeError};
use crewforge::model::{CharacterTable, Rank, RoomKind, RoomTarget, ShipConfig, Stat};
use crewforge::solver::driver::ProgressSink;
use std::str::FromStr;

/// Ship shape flags shared by `optimize` and `roi`.
#[derive(Args, Debug, Clone)]
pub struct ShipArgs {
    /// Kinds of the three configurable bays (rooms 2-4):
    /// `manufacturing` or `growth`.
    #[arg(long, value_delimiter = ',', default_values_t = vec![RoomKind::ManufacturingCabin; 3])]
    pub bays: Vec<RoomKind>,

    /// Production target override per bay, e.g. `2=operator_exp` or
    /// `3=plant+fungal_matter`. Repeatable.
    #[arg(long = "target", value_parser = parse_target)]
    pub targets: Vec<TargetSpec>,
}

#[derive(Debug, Clone)]
pub struct TargetSpec {
    pub index: usize,
    pub target: RoomTarget,
}

fn parse_target(s: &str) -> Result<TargetSpec, String> {
    let (idx, rest) = s
        .split_once('=')
        .ok_or_else(|| "expected INDEX=STAT[+STAT...]".to_string())?;
    let index: usize = idx
        .trim()
        .parse()
        .map_err(|_| format!("bad room index '{idx}'"))?;
    let stats: Vec<Stat> = rest
        .split('+')
        .map(|p| Stat::from_str(p.trim()).map_err(|_| format!("unknown stat '{p}'")))
        .collect::<Result<_, _>>()?;
    let target = if stats.len() == 1 {
        RoomTarget::Single(stats[0])
    } else {
        RoomTarget::Multi(stats)
    };
    Ok(TargetSpec { index, target })
}

impl ShipArgs {
    pub fn build(&self) -> CfResult<ShipConfig> {
        if self.bays.len() != 3 {
            return Err(CrewForgeError::Validation(format!(
                "--bays needs exactly 3 kinds, got {}",
                self.bays.len()
            )));
        }
        for kind in &self.bays {
            if !matches!(
                kind,
                RoomKind::ManufacturingCabin | RoomKind::GrowthChamber
            ) {
                return Err(CrewForgeError::Validation(format!(
                    "bay kind '{kind}' is not configurable"
                )));
            }
        }
        let mut ship = ShipConfig::with_bays([self.bays[0], self.bays[1], self.bays[2]]);
        for spec in &self.targets {
            if !(2..=4).contains(&spec.index) {
                return Err(CrewForgeError::Validation(format!(
                    "room {} has no configurable target",
                    spec.index
                )));
            }
            // Shape and stat membership are checked by the model.
            ship.set_target(spec.index, spec.target.clone())?;
        }
        Ok(ship)
    }
}

/// Roster selection flags shared by `optimize` and `roi`.
#[derive(Args, Debug, Clone)]
pub struct RosterArgs {
    /// Characters to include, comma separated. Default: everyone in
    /// the table.
    #[arg(long, value_delimiter = ',')]
    pub select: Option<Vec<String>>,

    /// Rank applied to every selected character.
    #[arg(long, default_value_t = Rank::E4)]
    pub rank: Rank,

    /// Per-character rank override, e.g. `--rank-for "Perlica=e2"`.
    /// Repeatable.
    #[arg(long = "rank-for", value_parser = parse_rank_override)]
    pub rank_for: Vec<RankOverride>,
}

#[derive(Debug, Clone)]
pub struct RankOverride {
    pub name: String,
    pub rank: Rank,
}

fn parse_rank_override(s: &str) -> Result<RankOverride, String> {
    let (name, rank) = s
        .split_once('=')
        .ok_or_else(|| "expected NAME=RANK".to_string())?;
    let rank = Rank::from_str(rank.trim()).map_err(|_| format!("unknown rank '{rank}'"))?;
    Ok(RankOverride {
        name: name.trim().to_string(),
        rank,
    })
}

impl RosterArgs {
    pub fn build(&self, table: &CharacterTable) -> CfResult<Vec<(String, Rank)>> {
        let names: Vec<String> = match &self.select {
            Some(list) => {
                for name in list {
                    if !table.contains(name) {
                        return Err(CrewForgeError::Data(format!(
                            "character '{name}' is not in the talent table"
                        )));
                    }
                }
                list.clone()
            }
            None => table.names().iter().map(|s| s.to_string()).collect(),
        };
        let mut selection: Vec<(String, Rank)> =
            names.into_iter().map(|n| (n, self.rank)).collect();
        for over in &self.rank_for {
            match selection.iter_mut().find(|(n, _)| *n == over.name) {
                Some(entry) => entry.1 = over.rank,
                None => {
                    return Err(CrewForgeError::Validation(format!(
                        "--rank-for names '{}', which is not selected",
                        over.name
                    )))
                }
            }
        }
        Ok(selection)
    }
}

/// Prints a progress line every few hundred rosters so long runs are
/// visibly alive without flooding the terminal.
#[derive(Default)]
pub struct CliProgress {
    last: usize,
}

impl ProgressSink for CliProgress {
    fn on_progress(&mut self, done: usize, total: usize) -> bool {
        if done == total || done - self.last >= 250 {
            println!("   {done}/{total}");
            self.last = done;
        }
        true
    }
}
