// aura - bookmarks, fuzzy navigation, and context-aware actions for the shell
//
// This is the main entry point. Parses CLI args and dispatches to handlers.
// stdout carries results only (the `go` path, listings); diagnostics go to stderr.

use anyhow::{bail, Context};
use aura_lib::{
    ai::{compose_question, ChatClient},
    context::{executor, DetectorRegistry},
    core::{paths, Resolver},
    git,
    store::BookmarkStore,
    AuraError, Config,
};
use clap::{Parser, Subcommand};
use std::env;
use std::io::{IsTerminal, Read, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(
    name = "aura",
    about = "Bookmark directories, jump to them by fuzzy name, and run context-aware actions",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage directory bookmarks
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },

    /// Resolve a bookmark and print its path (for a shell wrapper to cd into)
    Go {
        /// Alias or part of an alias/path
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Suggest actions for the current directory and run the one you pick
    Do {
        /// Print the suggestions instead of prompting
        #[arg(long)]
        list: bool,
    },

    /// Ask the AI assistant a question (stdin is included when piped)
    Ask {
        question: Vec<String>,
    },

    /// Git helpers
    Git {
        #[command(subcommand)]
        action: GitAction,
    },
}

#[derive(Subcommand)]
enum GitAction {
    /// Commit staged changes with an AI-suggested message
    Commit,
}

#[derive(Subcommand)]
enum BookmarkAction {
    /// Add a bookmark: `add <alias> [path]` or `add this as <alias>`
    Add {
        #[arg(required = true, num_args = 1..)]
        args: Vec<String>,
    },

    /// List all bookmarks
    List,

    /// Remove a bookmark by alias
    Remove { alias: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e.user_message());
            std::process::exit(e.exit_code());
        }
    };

    // RUST_LOG wins over the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let code = match run(cli.command, &config).await {
        Ok(code) => code,
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            e.downcast_ref::<AuraError>()
                .map(AuraError::exit_code)
                .unwrap_or(1)
        }
    };

    std::process::exit(code);
}

async fn run(command: Commands, config: &Config) -> anyhow::Result<i32> {
    match command {
        Commands::Bookmark { action } => {
            let (store, resolver) = open_resolver(config).await?;
            let result = handle_bookmark(&resolver, action).await;
            store.close().await;
            result
        }
        Commands::Go { query } => {
            let (store, resolver) = open_resolver(config).await?;
            let result = handle_go(&resolver, &query.join(" ")).await;
            store.close().await;
            result
        }
        Commands::Do { list } => handle_do(list).await,
        Commands::Ask { question } => handle_ask(config, &question).await,
        Commands::Git {
            action: GitAction::Commit,
        } => handle_commit(config).await,
    }
}

async fn open_resolver(config: &Config) -> anyhow::Result<(Arc<dyn BookmarkStore>, Resolver)> {
    let store = config
        .open_store()
        .await
        .context("failed to open bookmark store")?;
    let resolver = Resolver::new(Arc::clone(&store), config.history_limit);
    Ok((store, resolver))
}

async fn handle_bookmark(resolver: &Resolver, action: BookmarkAction) -> anyhow::Result<i32> {
    match action {
        BookmarkAction::Add { args } => {
            let (alias, raw_path) = parse_add_args(&args)?;
            paths::validate_alias(&alias)?;

            let cwd = env::current_dir().context("failed to read current directory")?;
            let target = paths::normalize(raw_path.as_deref().unwrap_or("."), &cwd);
            paths::ensure_directory(&target)?;
            let Some(path) = target.to_str() else {
                bail!("path '{}' is not valid UTF-8", target.display());
            };

            // Upsert convenience; the store itself rejects duplicates
            if let Some(existing) = resolver.get_bookmark(&alias).await? {
                eprintln!("Bookmark '{}' already exists, pointing to: {}", alias, existing.path);
                eprintln!("Updating to point to: {}", path);
            }

            resolver.replace_bookmark(&alias, path).await?;
            println!("Bookmark '{}' added for: {}", alias, path);
            Ok(0)
        }
        BookmarkAction::List => {
            let bookmarks = resolver.list_bookmarks().await?;

            if bookmarks.is_empty() {
                println!("No bookmarks found. Add one with: aura bookmark add <alias> <path>");
                return Ok(0);
            }

            println!("Saved bookmarks:");
            println!("{}", "=".repeat(60));
            for bookmark in &bookmarks {
                println!("  {} -> {}", bookmark.alias, bookmark.path);
            }
            Ok(0)
        }
        BookmarkAction::Remove { alias } => {
            resolver
                .remove_bookmark(&alias)
                .await
                .with_context(|| format!("failed to remove '{}'", alias))?;
            println!("Bookmark '{}' removed", alias);
            Ok(0)
        }
    }
}

/// Split `bookmark add` arguments into alias and optional path
fn parse_add_args(args: &[String]) -> anyhow::Result<(String, Option<String>)> {
    match args {
        [this, as_, alias] if this == "this" && as_ == "as" => Ok((alias.clone(), None)),
        [alias] => Ok((alias.clone(), None)),
        [alias, path @ ..] => Ok((alias.clone(), Some(path.join(" ")))),
        _ => bail!("usage: aura bookmark add <alias> [path] | aura bookmark add this as <alias>"),
    }
}

async fn handle_go(resolver: &Resolver, query: &str) -> anyhow::Result<i32> {
    match resolver.navigate(query).await {
        Ok(target) => {
            // No newline: a shell wrapper captures this verbatim
            print!("{}", target.display());
            std::io::stdout().flush()?;
            Ok(0)
        }
        Err(AuraError::AmbiguousMatch { query, candidates }) => {
            eprintln!("Multiple matches found for '{}':", query);
            for candidate in &candidates {
                eprintln!("  {}", candidate);
            }
            eprintln!("Please be more specific.");
            Ok(1)
        }
        Err(AuraError::NotFound(msg)) => {
            eprintln!("{}", msg);
            Ok(1)
        }
        Err(AuraError::InvalidPath(msg)) => {
            eprintln!("Error: {}", msg);
            Ok(2)
        }
        Err(e) => Err(e.into()),
    }
}

async fn handle_do(list: bool) -> anyhow::Result<i32> {
    let cwd = env::current_dir().context("failed to read current directory")?;
    let actions = DetectorRegistry::default().suggest(&cwd);

    if list {
        for action in &actions {
            println!("  {:<32} {}", action.name, action.command);
        }
        return Ok(0);
    }

    let names: Vec<&str> = actions.iter().map(|a| a.name.as_str()).collect();
    let selection = prompt_outcome(
        dialoguer::Select::with_theme(&dialoguer::theme::ColorfulTheme::default())
            .with_prompt("Select an action")
            .items(&names)
            .default(0)
            .max_length(10)
            .interact_opt(),
    )?;

    let Some(index) = selection else {
        println!("Cancelled.");
        return Ok(0);
    };

    let action = &actions[index];
    println!("Executing: {}", action.command);

    let status = executor::execute(&action.command)
        .await
        .with_context(|| format!("failed to run '{}'", action.command))?;
    Ok(status.code().unwrap_or(1))
}

/// Ctrl-C at a prompt counts as cancelling it, same as Esc
fn prompt_outcome<T>(result: dialoguer::Result<Option<T>>) -> anyhow::Result<Option<T>> {
    match result {
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        other => other.context("prompt failed"),
    }
}

async fn handle_commit(config: &Config) -> anyhow::Result<i32> {
    let cwd = env::current_dir().context("failed to read current directory")?;
    git::ensure_repository(&cwd).await?;

    let diff = git::staged_diff(&cwd).await?;
    if diff.trim().is_empty() {
        println!("No staged changes found. Stage some changes first with 'git add'.");
        return Ok(0);
    }

    let client = ChatClient::new(&config.ai)?;
    println!("Generating commit message...");
    let suggested = client
        .commit_message(&diff)
        .await
        .context("failed to generate commit message")?;

    println!();
    println!("Suggested commit message:");
    println!("{}", "-".repeat(60));
    println!("{}", suggested);
    println!("{}", "-".repeat(60));
    println!();

    let options = ["Yes, commit with this message", "No, let me edit it", "Cancel"];
    let choice = prompt_outcome(
        dialoguer::Select::with_theme(&dialoguer::theme::ColorfulTheme::default())
            .with_prompt("Use this commit message?")
            .items(&options)
            .default(0)
            .interact_opt(),
    )?;

    let message = match choice {
        Some(0) => suggested,
        Some(1) => {
            let edited = git::edit_message(&config.editor, &suggested)
                .await
                .context("failed to edit commit message")?;
            if edited.is_empty() {
                println!("Empty commit message. Aborting.");
                return Ok(0);
            }
            edited
        }
        _ => {
            println!("Cancelled.");
            return Ok(0);
        }
    };

    git::commit(&cwd, &message).await.context("git commit failed")?;
    println!("Committed successfully!");
    Ok(0)
}

async fn handle_ask(config: &Config, question: &[String]) -> anyhow::Result<i32> {
    let client = ChatClient::new(&config.ai)?;

    let piped = if std::io::stdin().is_terminal() {
        None
    } else {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read from stdin")?;
        Some(input)
    };

    let question = (!question.is_empty()).then(|| question.join(" "));

    match compose_question(question.as_deref(), piped.as_deref()) {
        Some(prompt) => {
            let answer = client.ask(&prompt).await.context("AI request failed")?;
            println!("\n{}", answer);
            Ok(0)
        }
        None if piped.is_some() => bail!("nothing to ask: pass a question or pipe some input"),
        None => interactive_ask(&client).await,
    }
}

async fn interactive_ask(client: &ChatClient) -> anyhow::Result<i32> {
    println!("Aura AI Assistant - Interactive Mode");
    println!("Type your questions or 'exit' to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await.context("error reading input")? else {
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            println!("Goodbye!");
            break;
        }

        match client.ask(input).await {
            Ok(answer) => println!("\n{}\n", answer),
            Err(e) => eprintln!("Error: {}\n", e.user_message()),
        }
    }

    Ok(0)
}
