use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use loadforge::api::ResultRow;
use loadforge::instances::Instance;
use loadforge::optimizer::{BestSolution, Strategy};
use loadforge::scorer::FitnessReport;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn fitness_cell(value: f64) -> Cell {
    let text = format!("{:.4}", value);
    if value == 0.0 {
        Cell::new(text).fg(Color::Green)
    } else {
        Cell::new(text).fg(Color::Red)
    }
}

pub fn print_instance_table(instances: &[&Instance]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Instance").add_attribute(Attribute::Bold),
        Cell::new("Category"),
        Cell::new("Items"),
        Cell::new("Container"),
        Cell::new("Weight / Max"),
        Cell::new("Area %"),
    ]);
    align_right(&mut table, 2..=5);

    for inst in instances {
        let c = &inst.container;
        let fill = inst.total_area() / (c.width * c.depth) * 100.0;
        let weight = Cell::new(format!("{:.0} / {:.0}", inst.total_weight(), c.max_weight));
        let weight = if inst.total_weight() > c.max_weight {
            weight.fg(Color::Red)
        } else {
            weight
        };
        table.add_row(vec![
            Cell::new(&inst.name).add_attribute(Attribute::Bold),
            Cell::new(inst.category.to_string()),
            Cell::new(inst.len()),
            Cell::new(format!("{} x {}", c.width, c.depth)),
            weight,
            Cell::new(format!("{:.1}", fill)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_placement(instance: &Instance, best: &BestSolution) {
    println!("\nInstance: {}", instance.name);
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Item").add_attribute(Attribute::Bold),
        Cell::new("x"),
        Cell::new("y"),
        Cell::new("w"),
        Cell::new("d"),
        Cell::new("Rot"),
        Cell::new("Weight"),
    ]);
    align_right(&mut table, 1..=6);

    let bounds = instance.container.bounds();
    for p in &best.placement.items {
        let id = Cell::new(p.item_id).add_attribute(Attribute::Bold);
        let id = if bounds.contains(&p.rect) {
            id
        } else {
            id.fg(Color::Red)
        };
        table.add_row(vec![
            id,
            Cell::new(format!("{:.2}", p.rect.x0)),
            Cell::new(format!("{:.2}", p.rect.y0)),
            Cell::new(format!("{:.2}", p.rect.width())),
            Cell::new(format!("{:.2}", p.rect.depth())),
            Cell::new(if p.rotated { "R" } else { "" }),
            Cell::new(format!("{:.1}", p.weight)),
        ]);
    }
    println!("{}", table);
}

pub fn print_fitness_breakdown(r: &FitnessReport) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Component").add_attribute(Attribute::Bold),
        Cell::new("Raw"),
        Cell::new("Penalty"),
    ]);
    align_right(&mut table, 1..=2);

    let rows = [
        ("Overlap area", r.overlap_area, r.overlap_penalty),
        ("Out of bounds", r.bounds_area, r.bounds_penalty),
        ("Excess weight", r.excess_weight, r.weight_penalty),
        ("CoM offset", r.com_offset, r.balance_penalty),
    ];
    for (name, raw, penalty) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{:.4}", raw)),
            Cell::new(format!("{:.2}", penalty)),
        ]);
    }
    if r.feasibility_floor > 0.0 {
        table.add_row(vec![
            Cell::new("Infeasible floor"),
            Cell::new(""),
            Cell::new(format!("{:.2}", r.feasibility_floor)).fg(Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(format!(
            "CoM ({:.2}, {:.2}) | {:.0} kg",
            r.center_of_mass.0, r.center_of_mass.1, r.total_weight
        )),
        fitness_cell(r.total).add_attribute(Attribute::Bold),
    ]);
    println!("\n{}", table);
}

pub fn print_results_table(rows: &[ResultRow]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Instance").add_attribute(Attribute::Bold),
        Cell::new("Strategy"),
        Cell::new("Fitness").fg(Color::Cyan),
        Cell::new("Overlap"),
        Cell::new("OOB"),
        Cell::new("Excess"),
        Cell::new("CoM"),
        Cell::new("Time (s)"),
    ]);
    align_right(&mut table, 2..=7);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.instance).add_attribute(Attribute::Bold),
            Cell::new(row.strategy.abbrev()),
            fitness_cell(row.fitness),
            Cell::new(format!("{:.3}", row.overlap_area)),
            Cell::new(format!("{:.3}", row.bounds_area)),
            Cell::new(format!("{:.1}", row.excess_weight)),
            Cell::new(format!("({:.2}, {:.2})", row.com_x, row.com_y)),
            Cell::new(format!("{:.2}", row.runtime_secs)),
        ]);
    }
    println!("\n{}", table);
}

/// Per-strategy perfect count and mean fitness; the lowest mean is highlighted.
pub fn print_strategy_summary(rows: &[ResultRow], strategies: &[Strategy]) {
    if rows.is_empty() {
        return;
    }
    let stats: Vec<(Strategy, usize, usize, f64)> = strategies
        .iter()
        .map(|&s| {
            let mine: Vec<&ResultRow> = rows.iter().filter(|r| r.strategy == s).collect();
            let perfect = mine.iter().filter(|r| r.perfect).count();
            let mean = if mine.is_empty() {
                0.0
            } else {
                mine.iter().map(|r| r.fitness).sum::<f64>() / mine.len() as f64
            };
            (s, mine.len(), perfect, mean)
        })
        .collect();
    let best_mean = stats.iter().map(|s| s.3).fold(f64::INFINITY, f64::min);

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Strategy").add_attribute(Attribute::Bold),
        Cell::new("Runs"),
        Cell::new("Perfect"),
        Cell::new("Mean fitness"),
    ]);
    align_right(&mut table, 1..=3);

    for (s, runs, perfect, mean) in stats {
        let name = Cell::new(s.to_string()).add_attribute(Attribute::Bold);
        let name = if mean == best_mean { name.fg(Color::Green) } else { name };
        table.add_row(vec![
            name,
            Cell::new(runs),
            Cell::new(format!("{}/{}", perfect, runs)),
            Cell::new(format!("{:.2}", mean)),
        ]);
    }
    println!("\n{}", table);
}
