use chrono::NaiveDateTime;
use gateboard::{AssignmentReport, Decision, Flight, FlightBatch, Movement, Tier};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

const UNSET: &str = "-";

pub fn print_board(batch: &FlightBatch, reference: NaiveDateTime, color: bool) {
    let palette = ansi::Palette::new(color);
    println!(
        "\n{}  {}",
        palette.bold(palette.paint("✈  Flight board", ansi::CYAN)),
        palette.dim(reference.format("%Y-%m-%d %H:%M:%S").to_string())
    );

    print_section("Departures", Movement::Departure, &batch.departures, &palette);
    print_section("Arrivals", Movement::Arrival, &batch.arrivals, &palette);
    println!();
}

fn print_section(title: &str, movement: Movement, flights: &[Flight], palette: &ansi::Palette) {
    println!("\n{}", palette.paint(format!("━━━ {title} ━━━"), ansi::GRAY));
    if flights.is_empty() {
        println!("{}", palette.dim("  No flights"));
        return;
    }

    println!(
        "  {}",
        palette.dim(format!(
            "{:<10} {:<6} {:<11} {:<6} {:<10} {:<8}",
            "FLIGHT", "TIME", "ROUTE", "TYPE", "TERMINAL", "GATE"
        ))
    );
    for flight in flights {
        let time = match movement {
            Movement::Departure => flight.deptime.as_deref(),
            Movement::Arrival => flight.arrtime.as_deref(),
        };
        let (from, to) = (flight.departure.as_deref().unwrap_or(UNSET), flight.arrival.as_deref().unwrap_or(UNSET));
        let route = format!("{from}→{to}");
        let terminal = flight.terminal.as_deref().map(|t| palette.paint(format!("{t:<10}"), ansi::GREEN));
        let gate = flight.gate.as_deref().map(|g| palette.bold(palette.paint(format!("{g:<8}"), ansi::GREEN)));

        // Padding is applied before painting so escape codes don't skew columns.
        println!(
            "  {} {:<6} {:<11} {} {} {}",
            palette.paint(format!("{:<10}", flight.callsign.as_deref().unwrap_or(UNSET)), ansi::BLUE),
            time.unwrap_or(UNSET),
            route,
            palette.dim(format!("{:<6}", flight.aircraft_short.as_deref().unwrap_or(UNSET))),
            terminal.unwrap_or_else(|| palette.paint(format!("{UNSET:<10}"), ansi::RED)),
            gate.unwrap_or_else(|| palette.paint(format!("{UNSET:<8}"), ansi::RED)),
        );
    }
}

pub fn print_trace(report: &AssignmentReport, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("{}", palette.paint("━━━ Trace ━━━", ansi::GRAY));

    for trace in &report.flights {
        println!(
            "  {} {} {}",
            palette.paint(format!("{}[{}]", trace.movement.label(), trace.index), ansi::GRAY),
            palette.bold(palette.paint(trace.callsign.as_deref().unwrap_or(UNSET), ansi::BLUE)),
            trace.hash.map(|h| palette.dim(format!("hash {h}"))).unwrap_or_default(),
        );
        println!(
            "      {} {}  {} {}",
            palette.dim("terminal:"),
            fmt_decision(trace.terminal.as_ref(), &palette),
            palette.dim("│ gate:"),
            fmt_decision(trace.gate.as_ref(), &palette)
        );
    }

    println!("\n{}", palette.paint("━━━ Summary ━━━", ansi::GRAY));
    let (unplaced, without_gate) = (report.unplaced(), report.without_gate());
    println!(
        "  Flights: {}  │  Unplaced: {}  │  Without gate: {}  │  Hashed picks: {}  │  Total: {}",
        palette.paint(report.flights.len().to_string(), ansi::BLUE),
        palette.paint(unplaced.to_string(), if unplaced > 0 { ansi::RED } else { ansi::GREEN }),
        palette.paint(without_gate.to_string(), if without_gate > 0 { ansi::YELLOW } else { ansi::GREEN }),
        palette.paint(report.hashed_selections().to_string(), ansi::CYAN),
        palette.dim(format!("{:?}", report.elapsed)),
    );
    println!();
}

fn fmt_decision(decision: Option<&Decision>, palette: &ansi::Palette) -> String {
    let Some(decision) = decision else {
        return palette.paint("none", ansi::RED);
    };

    let tier_color = match decision.tier {
        Tier::Best => ansi::GREEN,
        Tier::Ok => ansi::CYAN,
        Tier::Worst => ansi::YELLOW,
    };
    format!(
        "{} {} {}",
        palette.bold(&decision.name),
        palette.paint(decision.tier.label(), tier_color),
        palette.dim(format!("(shortlist {}{})", decision.shortlist, if decision.hashed { ", hashed" } else { "" }))
    )
}
