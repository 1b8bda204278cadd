use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use crewforge::model::{Rank, Talent};
use crewforge::results::LayoutReport;
use crewforge::solver::roi::RoiReport;

pub fn print_layout(report: &LayoutReport) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Room").add_attribute(Attribute::Bold),
        Cell::new("Target"),
        Cell::new("Operators"),
        Cell::new("Efficiency").fg(Color::Cyan),
    ]);

    if let Some(col) = table.column_mut(3) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for room in &report.rooms {
        let operators = if room.operators.is_empty() {
            "(empty)".to_string()
        } else {
            room.operators
                .iter()
                .map(|op| {
                    if op.stats.is_empty() {
                        format!("{} ({}): no matching talent", op.name, op.rank)
                    } else {
                        let stats = op
                            .stats
                            .iter()
                            .map(|s| format!("{} {:+.0}%", s.stat, s.value))
                            .collect::<Vec<_>>()
                            .join(", ");
                        format!("{} ({}, {}): {}", op.name, op.rank, op.tier, stats)
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let mut efficiency = match room.efficiency {
            Some(e) => format!("{:.1}%", e),
            None => format!("regen {:+.0}%", report.summary.global_regen_bonus),
        };
        if let Some(split) = &room.efficiency_by_product {
            for p in split {
                efficiency.push_str(&format!("\n{}: {:.1}%", p.product, p.effective));
            }
        }

        table.add_row(vec![
            Cell::new(&room.name).add_attribute(Attribute::Bold),
            Cell::new(room.target.as_deref().unwrap_or("-")),
            Cell::new(operators),
            Cell::new(efficiency).fg(Color::Cyan),
        ]);
    }

    println!("\n{}", table);

    let s = &report.summary;
    println!("\n=== 📊 SUMMARY ===");
    println!("Uptime:            {:.1}%", s.uptime);
    println!("Avg production:    {:.1}%", s.avg_production);
    println!("Clue efficiency:   {:.1}%", s.clue_efficiency);
    println!("Global mood regen: {:+.0}%", s.global_regen_bonus);
    println!("Swaps made:        {}", s.swaps_made);
}

pub fn print_roi(report: &RoiReport) {
    println!("\nBaseline efficiency: {:.1}", report.baseline);
    if report.results.is_empty() {
        println!("Everyone is already at max rank.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Character").add_attribute(Attribute::Bold),
        Cell::new("Upgrade"),
        Cell::new("New Total"),
        Cell::new("Gain").fg(Color::Green),
    ]);

    for i in 2..=3 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for row in &report.results {
        table.add_row(vec![
            Cell::new(&row.name).add_attribute(Attribute::Bold),
            Cell::new(format!("{} -> {}", row.current_rank, row.target_rank)),
            Cell::new(format!("{:.1}", row.new_efficiency)),
            Cell::new(format!("{:+.2}", row.delta)).fg(Color::Green),
        ]);
    }

    println!("\n{}", table);
    if report.aborted {
        println!("(analysis stopped early)");
    }
}

pub fn print_talents(name: &str, rank: Rank, talents: &[Talent]) {
    println!("\n{} at {}:", name, rank);
    if talents.is_empty() {
        println!("  (no active talents)");
        return;
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    table.add_row(vec![
        Cell::new("Room").add_attribute(Attribute::Bold),
        Cell::new("Stat"),
        Cell::new("Value"),
        Cell::new("Tier"),
    ]);

    if let Some(col) = table.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for t in talents {
        table.add_row(vec![
            Cell::new(t.room.to_string()),
            Cell::new(t.stat.to_string()),
            Cell::new(format!("{:+.0}%", t.value)),
            Cell::new(t.tier.to_string()),
        ]);
    }

    println!("{}", table);
}
