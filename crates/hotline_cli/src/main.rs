//! Interactive hotline directory shell.
//!
//! # Responsibility
//! - Drive the interaction engine from line commands on stdin.
//! - Render notifications and counters as plain text.
//!
//! Logs go to `HOTLINE_LOG_DIR` when set; history persists to the database
//! resolved from `HOTLINE_DB_PATH`.

use hotline_core::{
    default_log_level, init_logging, resolve_db_path, Catalog, EngineConfig, HistoryStore,
    InteractionService, SqliteHistoryStore,
};
use std::io::{self, BufRead, Write};

const LOG_DIR_ENV: &str = "HOTLINE_LOG_DIR";
const HELP: &str = "commands: list | fav <id> | copy <id> | call <id> | clear | history | status | help | quit";

fn main() {
    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = match SqliteHistoryStore::open(resolve_db_path()) {
        Ok(store) => {
            match InteractionService::with_store(Catalog::builtin(), EngineConfig::default(), store)
            {
                Ok(mut service) => run(&mut service, stdin.lock(), stdout.lock()),
                Err(err) => {
                    eprintln!("invalid engine config: {err}");
                    std::process::exit(2);
                }
            }
        }
        Err(err) => {
            eprintln!("history database unavailable, running without persistence: {err}");
            run(
                &mut InteractionService::new(Catalog::builtin()),
                stdin.lock(),
                stdout.lock(),
            )
        }
    };

    if let Err(err) = result {
        eprintln!("hotline: {err}");
        std::process::exit(1);
    }
}

/// Processes commands until `quit` or end of input.
fn run<S: HistoryStore>(
    service: &mut InteractionService<S>,
    input: impl BufRead,
    mut out: impl Write,
) -> io::Result<()> {
    writeln!(out, "{HELP}")?;
    print_status(service, &mut out)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(command) => command.to_ascii_lowercase(),
            None => continue,
        };
        let argument = parts.next().unwrap_or_default();

        match command.as_str() {
            "list" => print_catalog(service, &mut out)?,
            "fav" => {
                if let Some(record) = find(service, argument, &mut out)? {
                    let outcome = service.on_favorite_toggle(&record.id);
                    let verb = if outcome.is_favorite { "added to" } else { "removed from" };
                    writeln!(
                        out,
                        "{} {verb} favorites ({} total)",
                        record.name, outcome.favorite_count
                    )?;
                }
            }
            "copy" => {
                if let Some(record) = find(service, argument, &mut out)? {
                    let outcome = service.on_copy(&record.number);
                    writeln!(out, "{}", outcome.notification())?;
                }
            }
            "call" => {
                if let Some(record) = find(service, argument, &mut out)? {
                    match service.on_call(&record.name, &record.number) {
                        Ok(outcome) => {
                            writeln!(out, "{}", outcome.notification())?;
                            if !outcome.persist.is_synced() {
                                writeln!(out, "(history not saved)")?;
                            }
                        }
                        Err(err) => writeln!(out, "{}", err.notification())?,
                    }
                }
            }
            "clear" => match service.request_clear() {
                Ok(confirmation) => {
                    writeln!(out, "{} [y/N]", confirmation.notification())?;
                    let answer = lines.next().transpose()?.unwrap_or_default();
                    if answer.trim().eq_ignore_ascii_case("y") {
                        match service.confirm_clear(confirmation) {
                            Ok(cleared) => writeln!(out, "{}", cleared.notification())?,
                            Err(err) => writeln!(out, "{}", err.notification())?,
                        }
                    } else {
                        writeln!(out, "Clear cancelled.")?;
                    }
                }
                Err(err) => writeln!(out, "{}", err.notification())?,
            },
            "history" => print_history(service, &mut out)?,
            "status" => print_status(service, &mut out)?,
            "help" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => break,
            other => writeln!(out, "unknown command `{other}`; {HELP}")?,
        }
    }
    Ok(())
}

fn find<S: HistoryStore>(
    service: &InteractionService<S>,
    id: &str,
    out: &mut impl Write,
) -> io::Result<Option<hotline_core::ServiceRecord>> {
    match service.catalog().get(id) {
        Some(record) => Ok(Some(record.clone())),
        None => {
            writeln!(out, "unknown service `{id}`; try `list`")?;
            Ok(None)
        }
    }
}

fn print_catalog<S: HistoryStore>(
    service: &InteractionService<S>,
    out: &mut impl Write,
) -> io::Result<()> {
    for record in service.catalog().records() {
        let heart = if service.is_favorite(&record.id) { "*" } else { " " };
        writeln!(
            out,
            "{heart} {:<22} {:<12} {} [{}]",
            record.id, record.number, record.name, record.category
        )?;
    }
    Ok(())
}

fn print_history<S: HistoryStore>(
    service: &InteractionService<S>,
    out: &mut impl Write,
) -> io::Result<()> {
    let history = service.history();
    if history.is_empty() {
        return writeln!(out, "No call history yet");
    }
    for entry in history {
        writeln!(
            out,
            "{} {} @{}",
            entry.service_name, entry.phone_number, entry.timestamp
        )?;
    }
    Ok(())
}

fn print_status<S: HistoryStore>(
    service: &InteractionService<S>,
    out: &mut impl Write,
) -> io::Result<()> {
    let snapshot = service.snapshot();
    writeln!(
        out,
        "coins={} favorites={} copies={} history={}",
        snapshot.balance,
        snapshot.favorite_count,
        snapshot.copy_count,
        snapshot.history.len()
    )
}

#[cfg(test)]
mod tests {
    use super::run;
    use hotline_core::{Catalog, InteractionService};

    fn run_script(script: &str) -> (String, InteractionService) {
        let mut service = InteractionService::new(Catalog::builtin());
        let mut out = Vec::new();
        run(&mut service, script.as_bytes(), &mut out).unwrap();
        (String::from_utf8(out).unwrap(), service)
    }

    #[test]
    fn call_and_copy_update_counters() {
        let (output, service) = run_script("call police\ncopy police\nstatus\n");
        assert!(output.contains("Calling Police Helpline Number at 999"));
        assert!(output.contains("Number 999 has been copied to clipboard!"));
        assert!(output.contains("coins=80 favorites=0 copies=1 history=1"));
        assert_eq!(service.balance(), 80);
    }

    #[test]
    fn clear_requires_confirmation() {
        let (output, service) = run_script("call brac\nclear\nn\n");
        assert!(output.contains("Are you sure you want to clear all call history? [y/N]"));
        assert!(output.contains("Clear cancelled."));
        assert_eq!(service.history().len(), 1);

        let (output, service) = run_script("call brac\nclear\ny\nclear\n");
        assert!(output.contains("Call history cleared successfully!"));
        assert!(output.contains("Call history is already empty!"));
        assert!(service.history().is_empty());
    }

    #[test]
    fn sixth_call_reports_insufficient_coins() {
        let script = "call police\n".repeat(6);
        let (output, service) = run_script(&script);
        assert!(output.contains("Insufficient coins! You need at least 20 coins to make a call."));
        assert_eq!(service.history().len(), 5);
    }

    #[test]
    fn unknown_ids_and_commands_are_reported() {
        let (output, service) = run_script("fav nowhere\ndance\nquit\ncall police\n");
        assert!(output.contains("unknown service `nowhere`"));
        assert!(output.contains("unknown command `dance`"));
        assert_eq!(service.favorite_count(), 0);
        assert_eq!(service.balance(), 100);
    }
}
