use clap::Parser;
use kumiko::prelude::*;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;

/// A form schema validation and preview CLI
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the schema JSON file
    schema_path: Option<String>,
    /// Optional path to a values JSON file to validate against the schema
    values_path: Option<String>,

    /// Run in interactive mode and fill the form field by field
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.human {
        run_interactive();
    } else {
        run_non_interactive(cli);
    }
}

/// Runs the CLI in non-interactive mode, taking all arguments from the
/// command line.
fn run_non_interactive(cli: Cli) {
    let schema_path = cli.schema_path.unwrap_or_else(|| {
        exit_with_error("Schema path is required in non-interactive mode.");
    });

    let total_start = Instant::now();

    // --- 1. File Loading ---
    let load_start = Instant::now();
    let schema = load_schema(&schema_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load schema from '{}': {}",
            &schema_path, e
        ))
    });
    let values = match &cli.values_path {
        Some(path) => read_values(path),
        None => {
            println!("No values file provided. Validating the default (empty) form state.");
            ValueBag::default()
        }
    };
    let load_duration = load_start.elapsed();

    // --- 2. Rule Derivation ---
    let derive_start = Instant::now();
    let rules = build_rules(&schema.nodes);
    let derive_duration = derive_start.elapsed();

    println!("\nSchema '{}' ({} nodes)", schema.title, schema.nodes.len());
    print_rules(&schema);

    // --- 3. Evaluation ---
    let eval_start = Instant::now();
    let mut session = FormSession::new(&schema);
    for (id, value) in values {
        session.set_value(id, value);
    }
    let outcome = session.submit();
    let eval_duration = eval_start.elapsed();

    print_outcome(&session, outcome);

    let total_duration = total_start.elapsed();
    println!("\n--- Performance Summary ---");
    println!("File Loading:     {:?}", load_duration);
    println!("Rule Derivation:  {:?} ({} rules)", derive_duration, rules.len());
    println!("Evaluation:       {:?}", eval_duration);
    println!("---------------------------");
    println!("Total Execution:  {:?}", total_duration);
    println!();
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive() {
    println!("--- Kumiko Interactive Mode ---");

    let schema_path = prompt_for_input("Enter schema path", Some("data/schema.json"));
    let schema = load_schema(&schema_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to load schema from '{}': {}",
            &schema_path, e
        ))
    });

    println!("\nSchema '{}' ({} nodes)", schema.title, schema.nodes.len());
    print_rules(&schema);
    println!();

    let mut session = FormSession::new(&schema);
    let mut answered: Vec<String> = Vec::new();

    // Visibility can change with every answer, so re-resolve the next
    // unanswered visible field after each one.
    loop {
        let next = session
            .visible_fields()
            .into_iter()
            .find(|node| node.compute.is_none() && !answered.contains(&node.id))
            .cloned();
        let Some(node) = next else {
            break;
        };

        let value = prompt_for_field(&node);
        answered.push(node.id.clone());
        session.set_value(node.id.clone(), value);
    }

    let outcome = session.submit();
    print_outcome(&session, outcome);
}

fn prompt_for_field(node: &Node) -> Value {
    let hint = match &node.kind {
        NodeKind::Checkbox => " [y/n]".to_string(),
        NodeKind::Select { options, .. } => format!(" ({})", options.join(" | ")),
        NodeKind::Number { min, max } => match (min, max) {
            (Some(min), Some(max)) => format!(" [{} to {}]", min, max),
            (Some(min), None) => format!(" [>= {}]", min),
            (None, Some(max)) => format!(" [<= {}]", max),
            (None, None) => String::new(),
        },
        NodeKind::Text { placeholder, .. } => placeholder
            .as_ref()
            .map(|p| format!(" (e.g. {})", p))
            .unwrap_or_default(),
        NodeKind::Section { .. } => String::new(),
    };

    let raw = prompt_for_input(&format!("{}{}", node.label, hint), None);
    match &node.kind {
        NodeKind::Checkbox => {
            let checked = matches!(raw.to_lowercase().as_str(), "y" | "yes" | "true" | "1");
            Value::Bool(checked)
        }
        NodeKind::Number { .. } => {
            if raw.trim().is_empty() {
                Value::Null
            } else {
                // Unparseable input stays a string so validation can
                // report it as an invalid number.
                raw.trim()
                    .parse::<f64>()
                    .map(Value::Number)
                    .unwrap_or(Value::Str(raw))
            }
        }
        _ => Value::Str(raw),
    }
}

fn print_rules(schema: &Schema) {
    for node in &schema.nodes {
        let summary = match &node.kind {
            NodeKind::Section { children } => format!("section ({} children)", children.len()),
            NodeKind::Text { regex, .. } => match regex {
                Some(rx) => format!("text matching /{}/", rx),
                None => "text".to_string(),
            },
            NodeKind::Number { min, max } => format!("number [{:?} to {:?}]", min, max),
            NodeKind::Select { options, .. } => format!("select from {:?}", options),
            NodeKind::Checkbox => "checkbox".to_string(),
        };
        let required = if node.required { " (required)" } else { "" };
        println!("  - {}: {}{}", node.label, summary, required);
    }
}

fn print_outcome(session: &FormSession, outcome: std::result::Result<ValueBag, Vec<FieldError>>) {
    match outcome {
        Ok(values) => {
            println!("\nSubmission accepted!");
            match serde_json::to_string_pretty(&values) {
                Ok(json) => println!("{}", json),
                Err(e) => exit_with_error(&format!("Failed to encode payload: {}", e)),
            }
        }
        Err(errors) => {
            println!("\nSubmission blocked by {} validation error(s):", errors.len());
            for error in errors {
                let label = session
                    .visible_fields()
                    .iter()
                    .find(|n| n.id == error.field)
                    .map(|n| n.label.clone())
                    .unwrap_or_else(|| error.field.clone());
                println!("  - {}: {}", label, error.violation);
            }
        }
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn read_values(path: &str) -> ValueBag {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read values file '{}': {}", path, e)));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse values JSON: {}", e)))
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
