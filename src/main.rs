use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;

use ifc_finder::export::{build_report, export_csv, export_json};
use ifc_finder::fetch::{load_source, source_label};
use ifc_finder::model::ModelStore;
use ifc_finder::parser::parse_ifc_source;
use ifc_finder::queries::{Query, QueryGroup, Rule};
use ifc_finder::ui::App;

#[derive(Parser, Debug)]
#[command(name = "ifc-finder")]
#[command(about = "IFC Finder - isolate model elements with category and property queries")]
#[command(version)]
struct Args {
    /// IFC sources: file paths or http(s) URLs
    #[arg(required = true)]
    sources: Vec<String>,

    /// Category rule (regex over entity type names); repeatable
    #[arg(long, value_name = "REGEX")]
    category: Vec<String>,

    /// Property rule as NAME=VALUE regexes (bare VALUE matches any name); repeatable
    #[arg(long, value_name = "NAME=VALUE")]
    property: Vec<String>,

    /// Match elements satisfying any rule instead of all rules
    #[arg(long)]
    any_rule: bool,

    /// Export matches to CSV and exit
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Export matches to JSON and exit
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// Print matches to stdout instead of starting the UI
    #[arg(long)]
    no_tui: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut store = ModelStore::new();
    for source in &args.sources {
        let content = load_source(source)?;
        let model = parse_ifc_source(&source_label(source), &content)?;
        store.insert(model);
    }

    let query = build_cli_query(&args)?;

    let headless = args.no_tui || args.csv.is_some() || args.json.is_some();
    if headless {
        return run_headless(&args, &store, query);
    }

    // The filter fields show the first pattern of each kind; the
    // startup group still carries every CLI rule.
    let mut app = App::new(store).with_filters(
        args.category.first().cloned(),
        args.property.first().cloned(),
    );
    if !query.rules().is_empty() {
        app = app.with_startup_query(query);
        app.apply_group();
    }

    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

fn build_cli_query(args: &Args) -> Result<Query> {
    let mut query = Query::new("cli", !args.any_rule);
    for pattern in &args.category {
        query.add_rule(Rule::category(pattern)?);
    }
    for filter in &args.property {
        query.add_rule(Rule::property_filter(filter)?);
    }
    Ok(query)
}

fn run_headless(args: &Args, store: &ModelStore, query: Query) -> Result<()> {
    let group = QueryGroup::new().with_query(query);
    let result = group.update(store);

    if result.is_empty() {
        println!("No items found");
        return Ok(());
    }

    let report = build_report(store, &result);

    if let Some(csv_path) = &args.csv {
        export_csv(&report, csv_path)?;
        println!("Exported to CSV: {}", csv_path.display());
    }

    if let Some(json_path) = &args.json {
        export_json(&report, json_path)?;
        println!("Exported to JSON: {}", json_path.display());
    }

    if args.no_tui {
        for row in &report {
            println!(
                "{}\t#{}\t{}\t{}\t{}",
                row.model, row.element_id, row.category, row.name, row.storey
            );
        }
        println!("{} elements matched", report.len());
    }

    Ok(())
}
