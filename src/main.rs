//! PhishGuard CLI.
//!
//! Usage:
//!   phishguard analyze <text...>     Analyze text (reads stdin if no text given)
//!   phishguard history               List past analyses, newest first
//!   phishguard show <index>          Show one history entry in full
//!   phishguard clear                 Delete all history
//!   phishguard set-key <key>         Store the Anthropic API key in the OS keychain

use phishguard_lib::{open_session, report, settings};
use std::io::Read;
use std::process::ExitCode;

fn usage() {
    eprintln!("Usage:");
    eprintln!("  phishguard analyze <text...>");
    eprintln!("  phishguard history");
    eprintln!("  phishguard show <index>");
    eprintln!("  phishguard clear");
    eprintln!("  phishguard set-key <key>");
}

fn read_stdin() -> Result<String, String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;
    Ok(buf)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // .env files first so RUST_LOG from them reaches the logger.
    if let Ok(cwd) = std::env::current_dir() {
        settings::load_env_files(&cwd);
    }
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        usage();
        return ExitCode::FAILURE;
    };

    if command == "set-key" {
        let Some(key) = args.get(1) else {
            usage();
            return ExitCode::FAILURE;
        };
        return match settings::save_api_key(key) {
            Ok(()) => {
                println!("Urufunguzo rwabitswe. (Clé enregistrée.)");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    let session = open_session(&settings::Settings::from_env());

    match command.as_str() {
        "analyze" => {
            let text = if args.len() > 1 {
                args[1..].join(" ")
            } else {
                match read_stdin() {
                    Ok(text) => text,
                    Err(e) => {
                        eprintln!("{}", e);
                        return ExitCode::FAILURE;
                    }
                }
            };
            match session.submit(&text).await {
                Some(outcome) => match (outcome.result, outcome.error) {
                    (Some(result), _) => {
                        println!("{}", report::render_result(&result));
                        ExitCode::SUCCESS
                    }
                    (None, Some(error)) => {
                        eprintln!("{}", report::render_error(&error));
                        ExitCode::FAILURE
                    }
                    (None, None) => ExitCode::FAILURE,
                },
                None => {
                    eprintln!("Isesengura riracariko rirakorwa. (Analyse déjà en cours.)");
                    ExitCode::FAILURE
                }
            }
        }
        "history" => {
            println!("{}", report::render_history(&session.history()));
            ExitCode::SUCCESS
        }
        "show" => {
            let index = args.get(1).and_then(|i| i.parse::<usize>().ok());
            match index.and_then(|i| session.select(i)) {
                Some(result) => {
                    println!("{}", report::render_result(&result));
                    ExitCode::SUCCESS
                }
                None => {
                    eprintln!("Nta kintu kiri kuri iyo nomero. (Aucune entrée à cet index.)");
                    ExitCode::FAILURE
                }
            }
        }
        "clear" => {
            session.clear();
            println!("Amateka yakuweho. (Historique effacé.)");
            ExitCode::SUCCESS
        }
        _ => {
            usage();
            ExitCode::FAILURE
        }
    }
}
