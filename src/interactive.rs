//! Line-oriented navigator surface on stdin/stdout.

use tokio::io::{AsyncBufReadExt, BufReader};

use chatnav_navigator::{Entry, FeedbackKind, NavigatorController, ViewState};
use chatnav_protocols::MessageId;

const HELP: &str = "\
Commands:
  list              show indexed messages (newest first)
  search <text>     filter by text, case-insensitive
  clear             drop the filter
  jump <n>          scroll the page to message #n
  rescan            rescan the page, then list
  help              this text
  quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    List,
    Search(String),
    Clear,
    Jump(usize),
    Rescan,
    Help,
    Quit,
}

pub(crate) fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "" | "list" | "ls" => Ok(Command::List),
        "search" | "/" if rest.is_empty() => Ok(Command::Clear),
        "search" | "/" => Ok(Command::Search(rest.to_string())),
        "clear" => Ok(Command::Clear),
        "jump" | "j" => rest
            .trim_start_matches('#')
            .parse::<usize>()
            .map(Command::Jump)
            .map_err(|_| format!("not a message number: '{}'", rest)),
        "rescan" => Ok(Command::Rescan),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}' (try 'help')", other)),
    }
}

/// Message id behind badge `#n` in the rendered list.
pub(crate) fn resolve_badge(entries: &[Entry], n: usize) -> Option<MessageId> {
    let badge = format!("#{}", n);
    entries.iter().find(|e| e.badge == badge).map(|e| e.id)
}

fn render(controller: &NavigatorController) {
    match controller.state() {
        ViewState::Loading => println!("Loading..."),
        ViewState::Disconnected(reason) => println!("{}", reason),
        ViewState::Empty => println!("No messages found on this page yet."),
        ViewState::Ready => {
            let header = match controller.site_label() {
                Some(site) => format!("{} {}", controller.count_label(), site),
                None => controller.count_label(),
            };
            println!("{}", header);
            let entries = controller.entries();
            if entries.is_empty() {
                println!("  (nothing matches '{}')", controller.query().trim());
            }
            for entry in entries {
                println!("{:>5}  {}  ({})", entry.badge, entry.text, entry.age);
            }
        }
    }
}

pub(crate) async fn run(
    controller: &mut NavigatorController,
) -> Result<(), Box<dyn std::error::Error>> {
    controller.fetch().await;
    render(controller);
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::List => {
                controller.fetch().await;
                render(controller);
            }
            Command::Search(query) => {
                controller.set_query(query);
                render(controller);
            }
            Command::Clear => {
                controller.set_query("");
                render(controller);
            }
            Command::Jump(n) => {
                let Some(id) = resolve_badge(&controller.entries(), n) else {
                    println!("No message #{} in the current list", n);
                    continue;
                };
                let outcome = controller.select(id).await;
                if let Some(feedback) = &outcome.feedback {
                    let marker = match feedback.kind {
                        FeedbackKind::Success => "✓",
                        FeedbackKind::Info => "…",
                        FeedbackKind::Error => "✗",
                    };
                    println!("{} {}", marker, feedback.message);
                }
                if let Some(delay) = outcome.close_after {
                    tokio::time::sleep(delay).await;
                    controller.fetch().await;
                    render(controller);
                }
            }
            Command::Rescan => {
                match controller.rescan().await {
                    Ok(count) => println!("Rescanned: {} message(s) indexed", count),
                    Err(e) => println!("Rescan failed: {}", e),
                }
                controller.fetch().await;
                render(controller);
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}
