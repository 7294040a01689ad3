//! Interactive guided-conversation command
//!
//! Runs the suggestion flow as a terminal chat: the assistant's question
//! and numbered options are rendered each turn, and a few keywords drive
//! the session (`voltar` to go back, `novo` for a new suggestion,
//! `carrinho` to add the suggested dish, `sair` to quit).

use crate::config::Config;
use crate::error::Result;
use crate::flow::FlowTable;
use crate::menu::InMemoryCart;
use crate::providers;
use crate::session::{GuidedSession, SessionPhase};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

/// Runs the interactive chat loop until the user quits
pub async fn run_chat(config: Config) -> Result<()> {
    let backend = providers::create_backend(&config.backend)?;
    let cart = Arc::new(InMemoryCart::new());
    let table = Arc::new(FlowTable::builtin());
    let mut session = GuidedSession::new(
        table,
        backend.clone(),
        backend,
        cart.clone(),
        config.restaurant.id.clone(),
    );

    let mut rl = DefaultEditor::new()?;
    let mut printed = 0;
    flush_transcript(&session, &mut printed);

    loop {
        render_prompt(&session);

        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        rl.add_history_entry(input).ok();

        match input.to_lowercase().as_str() {
            "sair" => break,
            "voltar" => session.go_back(),
            "novo" => session.reset(),
            "carrinho" => session.add_to_cart().await,
            other => match parse_choice(other, session.current_step().options.len()) {
                Some(index) => {
                    let option = session.current_step().options[index].clone();
                    session.select_option(&option).await;
                }
                None => {
                    println!(
                        "{}",
                        "Digite o número de uma opção, ou: voltar, novo, carrinho, sair.".yellow()
                    );
                }
            },
        }

        flush_transcript(&session, &mut printed);
    }

    let items = cart.items();
    if !items.is_empty() {
        println!();
        println!("{}", "Seu carrinho:".bold());
        for item in &items {
            println!(
                "  {}x {} (R$ {:.2})",
                item.quantity, item.dish.name, item.dish.price
            );
        }
        println!("  Total: R$ {:.2}", cart.total());
    }
    println!("{}", "Até a próxima!".green());
    Ok(())
}

/// Parses a 1-based option number typed by the user
fn parse_choice(input: &str, option_count: usize) -> Option<usize> {
    let number: usize = input.parse().ok()?;
    if number >= 1 && number <= option_count {
        Some(number - 1)
    } else {
        None
    }
}

/// Prints transcript messages added since the last flush
fn flush_transcript(session: &GuidedSession, printed: &mut usize) {
    for message in &session.messages()[*printed..] {
        match message.role {
            crate::providers::ChatRole::Assistant => {
                println!("{} {}", "Garçom:".green().bold(), message.content);
            }
            crate::providers::ChatRole::User => {
                println!("{} {}", "Você:".cyan().bold(), message.content);
            }
        }
    }
    *printed = session.messages().len();
}

/// Shows the current question and options, or the actions available in the
/// current phase
fn render_prompt(session: &GuidedSession) {
    println!();
    match session.phase() {
        SessionPhase::Active => {
            let step = session.current_step();
            println!("{} {}", "Garçom:".green().bold(), step.question);
            for (i, option) in step.options.iter().enumerate() {
                println!("  {}. {}", i + 1, option.label);
            }
            println!("{}", "(voltar / novo / sair)".dimmed());
        }
        SessionPhase::Suggested => {
            if session.added_to_cart() {
                println!("{}", "(novo / sair)".dimmed());
            } else {
                println!("{}", "(carrinho / novo / sair)".dimmed());
            }
        }
        SessionPhase::AwaitingSuggestion => {
            println!("{}", "(novo / voltar / sair)".dimmed());
        }
    }
}
