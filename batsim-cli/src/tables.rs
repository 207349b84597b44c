use batsim_quantities::{cost::Cost, power::Watts};
use chrono::{DateTime, Local};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::Outputs;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn cents_cell(cost: Cost) -> Cell {
    Cell::new(format!("{:.2}", cost.to_cents())).set_alignment(CellAlignment::Right)
}

fn saving_cell(saving: Cost) -> Cell {
    cents_cell(saving).fg(if saving >= Cost::ZERO { Color::Green } else { Color::Red })
}

/// Running costs and savings in cents.
pub fn build_summary_table(outputs: &Outputs) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Tariff", "Real, ¢", "Simulated, ¢", "Savings, ¢"]);
    table.add_row(vec![
        Cell::new("Fixed"),
        cents_cell(outputs.costs.real.fixed),
        cents_cell(outputs.costs.simulated.fixed),
        saving_cell(outputs.savings.fixed),
    ]);
    table.add_row(vec![
        Cell::new("Dynamic"),
        cents_cell(outputs.costs.real.dynamic),
        cents_cell(outputs.costs.simulated.dynamic),
        saving_cell(outputs.savings.dynamic),
    ]);
    table
}

/// Battery state right now.
pub fn build_battery_table(outputs: &Outputs) -> Table {
    let mut table = new_table();
    table.set_header(vec!["State of charge", "Residual energy", "Simulated meter"]);
    table.add_row(vec![
        Cell::new(format!("{:.1}%", outputs.state_of_charge)).set_alignment(CellAlignment::Right),
        Cell::new(outputs.residual_energy).set_alignment(CellAlignment::Right),
        Cell::new(outputs.simulated_meter).set_alignment(CellAlignment::Right),
    ]);
    table
}

pub fn build_steps_table(steps: &[(DateTime<Local>, Outputs)]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Time", "Net", "Battery", "Simulated", "SoC", "Fixed", "Dynamic"]);
    for (at, outputs) in steps {
        table.add_row(vec![
            Cell::new(at.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(at.format("%H:%M:%S")),
            Cell::new(outputs.power.net).set_alignment(CellAlignment::Right).fg(
                if outputs.power.net <= Watts::ZERO { Color::Green } else { Color::Red },
            ),
            Cell::new(outputs.power.battery).set_alignment(CellAlignment::Right).fg(
                if outputs.power.battery >= Watts::ZERO { Color::DarkYellow } else { Color::Cyan },
            ),
            Cell::new(outputs.power.simulated)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(format!("{:.1}%", outputs.state_of_charge)).set_alignment(CellAlignment::Right),
            saving_cell(outputs.savings.fixed),
            saving_cell(outputs.savings.dynamic),
        ]);
    }
    table
}
