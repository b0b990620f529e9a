//! Colored terminal output for the chat REPL.

use colored::Colorize;
use solace_core::{ConversationMessage, SupportCatalog};

pub fn print_assistant(message: &ConversationMessage) {
    for line in message.text.lines() {
        println!("{}", line.bright_blue());
    }
    print_actions(&message.suggested_actions);
}

pub fn print_actions(actions: &[String]) {
    if actions.is_empty() {
        return;
    }
    for (i, action) in actions.iter().enumerate() {
        println!("  {}", format!("[{}] {}", i + 1, action).yellow());
    }
    println!();
}

pub fn print_resources(catalog: &SupportCatalog) {
    let resources = &catalog.resources;

    println!("{}", "=== Crisis Support Resources ===".bright_red().bold());
    for helpline in &resources.helplines {
        println!(
            "  {} {}",
            helpline.name.bold(),
            format!("({})", helpline.contact).bright_red()
        );
        println!("    {}", helpline.description.bright_black());
    }
    println!();
    println!("{}", "If you are in immediate danger:".red().bold());
    for step in &resources.emergency_guidance {
        println!("  • {}", step.red());
    }
    println!();
    println!("{}", resources.closing_note.bright_magenta());
    println!();
}

pub fn print_coping(catalog: &SupportCatalog) {
    let toolkit = &catalog.toolkit;

    println!("{}", "=== Coping Toolkit ===".bright_green().bold());
    println!("{}", "Grounding techniques".green().bold());
    for technique in &toolkit.grounding_techniques {
        println!("  {}", technique.title.bold());
        println!("    {}", technique.description);
    }
    println!();
    println!("{}", "Journal prompts".green().bold());
    for prompt in &toolkit.journal_prompts {
        println!("  • {}", prompt);
    }
    println!();
}

pub fn print_history(history: &[ConversationMessage]) {
    for message in history {
        let time = message.timestamp.format("%H:%M");
        if message.is_user() {
            println!("{} {}", time.to_string().bright_black(), message.text.green());
        } else {
            println!("{} {}", time.to_string().bright_black(), message.text.bright_blue());
        }
    }
    println!();
}
