//! Assistant commands

use colored::*;
use wellsight_runtime::advisor::{Conversation, Speaker};

use crate::output::{print_json, OutputFormat};

pub fn ask(message: &str, format: OutputFormat) -> anyhow::Result<()> {
    let mut conversation = Conversation::new();
    if conversation.send(message).is_none() {
        anyhow::bail!("nothing to ask");
    }
    print_transcript(&conversation, format)
}

pub fn faq(number: Option<usize>, format: OutputFormat) -> anyhow::Result<()> {
    let mut conversation = Conversation::new();

    let Some(number) = number else {
        let entries = wellsight_runtime::advisor::Advisor::new().faq();
        if format == OutputFormat::Json {
            return print_json(entries);
        }
        for (i, entry) in entries.iter().enumerate() {
            println!("{}. {}", i + 1, entry.question);
        }
        return Ok(());
    };

    if number == 0 || conversation.ask_faq(number - 1).is_none() {
        anyhow::bail!("no question numbered {number}");
    }
    print_transcript(&conversation, format)
}

fn print_transcript(conversation: &Conversation, format: OutputFormat) -> anyhow::Result<()> {
    // Skip the greeting.
    let exchange = &conversation.messages()[1..];
    if format == OutputFormat::Json {
        return print_json(exchange);
    }

    for message in exchange {
        match message.speaker {
            Speaker::User => println!("{} {}", "you:".cyan().bold(), message.content),
            Speaker::Bot => println!("{} {}", "assistant:".green().bold(), message.content),
        }
    }
    Ok(())
}
