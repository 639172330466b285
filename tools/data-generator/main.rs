use clap::Parser;
use kumiko::prelude::*;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

/// A CLI tool to generate demo data for the Kumiko grid and designer
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated row dataset to
    #[arg(short, long, default_value = "generated_rows.json")]
    output: String,

    /// How many rows to generate
    #[arg(long, default_value_t = 10_247)]
    count: usize,

    /// Optional path to also write a small demo schema to
    #[arg(long)]
    schema_out: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut rng = rand::rng();

    println!("Generating {} rows of demo grid data...", cli.count);
    let rows = generate_rows(&mut rng, cli.count);

    let json_output = serde_json::to_string_pretty(&rows)?;
    fs::write(&cli.output, json_output)?;
    println!("Successfully saved row dataset to '{}'", cli.output);

    if let Some(schema_path) = &cli.schema_out {
        let schema = demo_schema();
        save_schema(schema_path, &schema)?;
        println!("Successfully saved demo schema to '{}'", schema_path);
    }

    Ok(())
}

/// Generates rows shaped like the grid's production dataset, with
/// randomized roles, statuses and activity dates.
fn generate_rows(rng: &mut ThreadRng, count: usize) -> Vec<Row> {
    const ROLES: [Role; 3] = [Role::User, Role::Admin, Role::Editor];
    const STATUSES: [Status; 3] = [Status::Active, Status::Inactive, Status::Pending];

    (1..=count as u64)
        .map(|id| Row {
            id,
            name: format!("User {}", id),
            email: format!("user{}@example.com", id),
            role: ROLES[rng.random_range(0..ROLES.len())],
            status: STATUSES[rng.random_range(0..STATUSES.len())],
            created: random_date(rng),
            last: random_date(rng),
        })
        .collect()
}

fn random_date(rng: &mut ThreadRng) -> String {
    format!(
        "2025-{:02}-{:02}T00:00:00.000Z",
        rng.random_range(1..=12),
        rng.random_range(1..=28)
    )
}

/// A small schema exercising every field kind plus a computed field.
fn demo_schema() -> Schema {
    let mut schema = Schema::new("Demo Form");

    let mut first = create_node(NodeType::Text);
    first.label = "First name".to_string();
    first.required = true;
    let first_id = first.id.clone();

    let mut last = create_node(NodeType::Text);
    last.label = "Last name".to_string();
    let last_id = last.id.clone();

    let mut full = create_node(NodeType::Text);
    full.label = "Full name".to_string();
    // Generated ids contain hyphens, so bracket access it is.
    full.compute = Some(format!(
        "values[\"{}\"] + ' ' + values[\"{}\"]",
        first_id, last_id
    ));

    let mut age = create_node(NodeType::Number);
    age.label = "Age".to_string();

    let mut role = create_node(NodeType::Select);
    role.label = "Role".to_string();

    let mut subscribed = create_node(NodeType::Checkbox);
    subscribed.label = "Subscribe to updates".to_string();

    schema.nodes = vec![first, last, full, age, role, subscribed];
    schema
}
