use std::io::Write;

use anyhow::Result;
use dotenv::dotenv;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use ai_multitool::catalog::{self, AI_MODELS};
use ai_multitool::client::assembler::{Assembler, Phase, SubmitRejected};
use ai_multitool::client::settings::{CredentialStatus, FileStore, Settings};
use ai_multitool::client::{run_submission, RelayClient};
use ai_multitool::config::ClientConfig;

const HELP: &str = "\
Commands:
  /key <token>   set the OpenRouter API key
  /model <id>    select a model
  /models        list available models
  /clear         clear the conversation
  /help          show this help
  /quit          exit
Anything else is sent as a message.";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let config = ClientConfig::from_env()?;
    info!("Settings file: {}", config.settings_path.display());

    let mut settings = Settings::load(FileStore::new(&config.settings_path))?;
    let relay = RelayClient::new(&config.relay_url);
    let mut assembler = Assembler::new();

    println!("AI MultiTool - chatting through {}", config.relay_url);
    print_model(&settings.model());
    if settings.credential().is_empty() {
        println!("Please configure your API key first: /key sk-or-v1-...");
    }
    println!("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        if let Some(command) = line.trim().strip_prefix('/') {
            let (name, arg) = command
                .split_once(char::is_whitespace)
                .map(|(n, a)| (n, a.trim()))
                .unwrap_or((command, ""));
            match name {
                "quit" | "exit" => break,
                "help" => println!("{}", HELP),
                "models" => {
                    for model in AI_MODELS {
                        let price = model.pricing.map(|p| p.prompt).unwrap_or("-");
                        println!("  {:<45} {:<28} {}/M tokens", model.id, model.name, price);
                    }
                }
                "model" => match catalog::find(arg) {
                    Some(model) => {
                        settings.set_model(model.id)?;
                        print_model(model.id);
                    }
                    None => println!("Unknown model '{}'. Try /models.", arg),
                },
                "key" => {
                    settings.set_credential(arg)?;
                    match settings.credential_status() {
                        CredentialStatus::Empty => println!("API key cleared."),
                        CredentialStatus::LooksValid => println!("API key saved."),
                        CredentialStatus::Unrecognized => {
                            println!("API key saved, but it does not look like an OpenRouter key.")
                        }
                    }
                }
                "clear" => {
                    if assembler.clear() {
                        println!("Chat cleared.");
                    }
                }
                _ => println!("Unknown command. Type /help."),
            }
            continue;
        }

        let mut printer = ReplyPrinter::new(std::io::stdout());
        let outcome = run_submission(
            &mut assembler,
            &relay,
            &line,
            &settings.get(),
            |_, delta| {
                let _ = printer.delta(delta);
            },
        )
        .await;
        if let Err(e) = &outcome {
            warn!("Submission rejected: {}", e);
        }
        printer.finish(outcome, &assembler)?;
    }

    Ok(())
}

fn print_model(id: &str) {
    let name = catalog::find(id).map(|m| m.name).unwrap_or(id);
    println!("Model: {}", name);
}

/// Writes one reply. The `Assistant:` prefix only appears once the relay
/// has produced something to show.
struct ReplyPrinter<W: Write> {
    out: W,
    started: bool,
}

impl<W: Write> ReplyPrinter<W> {
    fn new(out: W) -> Self {
        Self { out, started: false }
    }

    fn delta(&mut self, text: &str) -> std::io::Result<()> {
        if !self.started {
            write!(self.out, "Assistant: ")?;
            self.started = true;
        }
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    fn finish(
        &mut self,
        outcome: Result<(), SubmitRejected>,
        assembler: &Assembler,
    ) -> std::io::Result<()> {
        match outcome {
            Ok(()) => {
                if *assembler.phase() == Phase::Failed {
                    if let Some(message) = assembler.messages().last() {
                        let prefix = if self.started { "\n" } else { "" };
                        write!(self.out, "{}Assistant: {}", prefix, message.content)?;
                    }
                }
                writeln!(self.out)?;
            }
            Err(SubmitRejected::EmptyInput) => {}
            Err(e) => writeln!(self.out, "({})", e)?,
        }
        self.out.flush()
    }
}
