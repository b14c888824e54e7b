use clap::{Arg, ArgAction, Command};
use std::io::{self, Write};

const COMMITTEES: [&str; 5] = ["Kitchen", "Garden", "Grounds", "Maintenance", "Common House"];
const PRIORITIES: [&str; 3] = ["Low", "Medium", "High"];

fn main() -> anyhow::Result<()> {
    let matches = Command::new("gen")
        .about("Write a synthetic workday job sheet as CSV")
        .arg(
            Arg::new("rows")
                .long("rows")
                .value_parser(clap::value_parser!(u64))
                .required(true),
        )
        .arg(
            Arg::new("work_day_column")
                .long("work-day-column")
                .default_value("Which work day: Saturday or Sunday or Flexible"),
        )
        .arg(
            Arg::new("blank_every")
                .long("blank-every")
                .value_parser(clap::value_parser!(u64))
                .default_value("0")
                .help("Leave the job name empty on every Nth row (0 = never)"),
        )
        .arg(
            Arg::new("no_header")
                .long("no-header")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let rows: u64 = *matches.get_one("rows").unwrap();
    let blank_every: u64 = *matches.get_one("blank_every").unwrap();
    let work_day = matches.get_one::<String>("work_day_column").unwrap();

    let mut out = io::BufWriter::new(io::stdout().lock());

    if !matches.get_flag("no_header") {
        let header = [
            "Committee",
            "Job Name",
            "Job Description",
            "Supplies Needed",
            "Where will the supplies be for the job on the work day?",
            "Honcho (leader who gives direction/provides supplies for project)",
            "Number of workers: if Honcho is working this job then include them in this count.",
            "How long will it take per worker?",
            "Priority - Indicate: Low, Medium, or High",
            work_day.as_str(),
        ];
        let cells: Vec<String> = header.iter().map(|h| quote(h)).collect();
        writeln!(&mut out, "{}", cells.join(","))?;
    }

    // Deterministic rows; descriptions carry commas, quotes and line breaks
    // so the quoting rules get exercised.
    for i in 0..rows {
        let committee = COMMITTEES[(i % COMMITTEES.len() as u64) as usize];
        let name = if blank_every > 0 && i % blank_every == blank_every - 1 {
            String::new()
        } else {
            format!("Job {i:06}")
        };
        let cells = [
            committee.to_string(),
            name,
            format!("Step one, step two.\nSay \"done\" when finished ({i})"),
            format!("rake, bags x{}", i % 4 + 1),
            "Shed".to_string(),
            format!("Honcho {}", i % 17),
            (i % 6 + 1).to_string(),
            format!("{} hours", i % 3 + 1),
            PRIORITIES[(i % 3) as usize].to_string(),
            if i % 2 == 0 { "Saturday" } else { "Flexible" }.to_string(),
        ];
        let cells: Vec<String> = cells.iter().map(|c| quote(c)).collect();
        writeln!(&mut out, "{}", cells.join(","))?;
        if i % 10_000 == 0 {
            out.flush()?;
        }
    }

    out.flush()?;
    Ok(())
}

fn quote(cell: &str) -> String {
    if cell.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
