use std::process::ExitCode;
use std::time::Duration;

use creoson_rs::{ClientBuilder, CreosonError, OneOrMany};

#[derive(Debug)]
struct CliConfig {
    url: Option<String>,
    timeout_ms: u64,
}

#[derive(Debug)]
enum Command {
    Running,
    Session,
    Pwd,
    ServerPwd,
    ListFiles { filter: Option<String> },
    ListDirs { filter: Option<String> },
    Open { file: String },
    Active,
    Massprops { file: Option<String> },
    Disconnect,
    Smoke,
    Help,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            if matches!(err, CreosonError::Transport { .. } | CreosonError::Timeout { .. }) {
                eprintln!(
                    "hint: is the CREOSON server running? start CreosonSetup and press Start, then rerun this command."
                );
            }
            if let CreosonError::Api { message } = &err {
                if message.contains("no session") || message.contains("session") {
                    eprintln!("hint: the session may have expired; rerun to reconnect.");
                }
            }
            ExitCode::from(1)
        }
    }
}

async fn run() -> Result<(), CreosonError> {
    let (config, command) = parse_args()?;

    if matches!(command, Command::Help) {
        print_help();
        return Ok(());
    }

    let mut builder = ClientBuilder::new().timeout(Duration::from_millis(config.timeout_ms));
    if let Some(url) = config.url {
        builder = builder.base_url(url);
    }

    let client = builder.connect().await?;

    match command {
        Command::Running => {
            let running = client.is_creo_running().await?;
            println!("creo-running: {running}");
        }
        Command::Session => {
            println!("session: {}", client.session_id()?);
        }
        Command::Pwd => {
            let dirname = client.creo().pwd().await?;
            println!("pwd={dirname}");
        }
        Command::ServerPwd => {
            let dirname = client.server().pwd().await?;
            println!("server-pwd={dirname}");
        }
        Command::ListFiles { filter } => {
            let files = client.creo().list_files(filter.as_deref()).await?;
            if files.is_empty() {
                println!("no files matched");
            } else {
                for file in files {
                    println!("{file}");
                }
            }
        }
        Command::ListDirs { filter } => {
            let dirs = client.creo().list_dirs(filter.as_deref()).await?;
            if dirs.is_empty() {
                println!("no directories matched");
            } else {
                for dir in dirs {
                    println!("{dir}");
                }
            }
        }
        Command::Open { file } => {
            let report = client
                .file()
                .open(OneOrMany::One(file), Default::default())
                .await?;
            println!(
                "opened files={} dirname={}",
                report.files.join(","),
                report.dirname.as_deref().unwrap_or("-")
            );
        }
        Command::Active => {
            let active = client.file().get_active().await?;
            println!(
                "active file={} dirname={}",
                active.file.as_deref().unwrap_or("-"),
                active.dirname.as_deref().unwrap_or("-")
            );
        }
        Command::Massprops { file } => {
            let props = client.file().massprops(file.as_deref()).await?;
            println!(
                "mass={} volume={} surface_area={}",
                props.mass.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()),
                props.volume.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()),
                props
                    .surface_area
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            );
        }
        Command::Disconnect => {
            client.disconnect().await?;
            println!("disconnected");
        }
        Command::Smoke => {
            let running = client.is_creo_running().await?;
            let dirname = client.creo().pwd().await?;
            println!(
                "smoke ok: session={} creo_running={running} pwd={dirname}",
                client.session_id()?
            );
        }
        Command::Help => print_help(),
    }

    Ok(())
}

fn parse_args() -> Result<(CliConfig, Command), CreosonError> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() {
        return Ok((default_config(), Command::Help));
    }

    let mut config = default_config();
    let mut index = 0;

    while index < args.len() {
        match args[index].as_str() {
            "--url" => {
                let value = args.get(index + 1).ok_or_else(|| CreosonError::Config {
                    reason: "missing value for --url".to_string(),
                })?;
                config.url = Some(value.clone());
                args.drain(index..=index + 1);
            }
            "--timeout-ms" => {
                let value = args.get(index + 1).ok_or_else(|| CreosonError::Config {
                    reason: "missing value for --timeout-ms".to_string(),
                })?;
                config.timeout_ms = value.parse::<u64>().map_err(|err| CreosonError::Config {
                    reason: format!("invalid --timeout-ms value `{value}`: {err}"),
                })?;
                args.drain(index..=index + 1);
            }
            _ => {
                index += 1;
            }
        }
    }

    if args.is_empty() {
        return Ok((config, Command::Help));
    }

    let command = match args[0].as_str() {
        "help" | "--help" | "-h" => Command::Help,
        "running" => Command::Running,
        "session" => Command::Session,
        "pwd" => Command::Pwd,
        "server-pwd" => Command::ServerPwd,
        "list-files" => Command::ListFiles {
            filter: flag_value(&args, "--filter"),
        },
        "list-dirs" => Command::ListDirs {
            filter: flag_value(&args, "--filter"),
        },
        "open" => {
            let file = args.get(1).cloned().ok_or_else(|| CreosonError::Config {
                reason: "open requires a file name".to_string(),
            })?;
            Command::Open { file }
        }
        "active" => Command::Active,
        "massprops" => Command::Massprops {
            file: args.get(1).cloned(),
        },
        "disconnect" => Command::Disconnect,
        "smoke" => Command::Smoke,
        other => {
            return Err(CreosonError::Config {
                reason: format!("unknown command `{other}`"),
            });
        }
    };

    Ok((config, command))
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let mut index = 1;
    while index < args.len() {
        if args[index] == flag {
            return args.get(index + 1).cloned();
        }
        index += 1;
    }
    None
}

fn default_config() -> CliConfig {
    CliConfig {
        url: None,
        timeout_ms: 3_000,
    }
}

fn print_help() {
    println!(
        "creoson-cli\n\nUSAGE:\n  cargo run --features blocking --bin creoson-cli -- [--url URL] [--timeout-ms N] <command> [command options]\n\nCOMMANDS:\n  running                      Check whether Creo is running behind the server\n  session                      Show the session identifier for this connection\n  pwd                          Show Creo's working directory\n  server-pwd                   Show the CREOSON server's own working directory\n  list-files [--filter PAT]    List files in Creo's working directory\n  list-dirs [--filter PAT]     List subdirectories of Creo's working directory\n  open <file>                  Open a model from the working directory\n  active                       Show the active model\n  massprops [file]             Show mass properties of a model\n  disconnect                   End the session\n  smoke                        connect + running + pwd summary\n  help                         Show help\n"
    );
}
