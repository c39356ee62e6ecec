use crate::domain::models::JsonOut;
use colored::Colorize;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

// Progress lines go to stderr so `--json` stdout stays a single document.

pub fn step(msg: &str) {
    eprintln!("{} {}", "==>".cyan().bold(), msg);
}

pub fn success(msg: &str) {
    eprintln!("{} {}", "ok".green().bold(), msg);
}

pub fn warn(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

pub fn fail(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}
