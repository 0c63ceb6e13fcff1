//! CLI entry point for the termkit showcase.

mod cli;

use chrono::Datelike;
use clap::Parser;
use std::path::Path;
use termkit::console::{Console, Justify};
use termkit::error::UiError;
use termkit::layout::QuadrantLayout;
use termkit::live::{run_live, run_progress, run_status};
use termkit::prompts::{Confirm, MultiSelect, Secret, Select, TextPrompt, Validation};
use termkit::theme::load_theme_config;
use termkit::tree::{build_tree, PathEntry};
use termkit::widgets::{
    BarChart, BreakdownChart, Calendar, CalendarEvent, Columns, Grid, Panel, Table, Text,
};
use tokio::time::{sleep, Duration};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();
    let config = match load_theme_config(
        args.config.as_deref().map(Path::new),
        args.theme.as_deref(),
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let color = config.color && !args.no_color;
    let console = Console::with_theme(color, config.theme);

    if let Err(e) = run(&console, args.command).await {
        console.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(console: &Console, command: Option<cli::Command>) -> Result<(), UiError> {
    match command {
        None => showcase(console).await,
        Some(cli::Command::Tree) => {
            demo_tree(console);
            Ok(())
        }
        Some(cli::Command::Table) => {
            demo_table(console);
            Ok(())
        }
        Some(cli::Command::Charts) => {
            demo_charts(console);
            Ok(())
        }
        Some(cli::Command::Layout) => {
            demo_layout(console);
            Ok(())
        }
        Some(cli::Command::Calendar) => demo_calendar(console),
        Some(cli::Command::Prompts) => demo_prompts(console),
        Some(cli::Command::Progress) => demo_progress(console).await,
        Some(cli::Command::Live) => demo_live(console).await,
    }
}

/// Every rendering demo in sequence, separated by titled rules.
async fn showcase(console: &Console) -> Result<(), UiError> {
    console.banner("termkit");
    console.note(&format!("showcase {}", termkit::build_info::VERSION));
    console.blank_lines(1);

    console.rule_titled(Some("tree"), Justify::Left);
    demo_tree(console);
    console.rule_titled(Some("table"), Justify::Left);
    demo_table(console);
    console.rule_titled(Some("charts"), Justify::Left);
    demo_charts(console);
    console.rule_titled(Some("layout"), Justify::Left);
    demo_layout(console);
    console.rule_titled(Some("calendar"), Justify::Left);
    demo_calendar(console)?;
    console.rule_titled(Some("progress"), Justify::Left);
    demo_progress(console).await?;
    console.rule_titled(Some("live"), Justify::Left);
    demo_live(console).await?;
    console.rule();
    console.ok("showcase complete");
    Ok(())
}

fn demo_tree(console: &Console) {
    let entries = [
        PathEntry::new("src/console.rs"),
        PathEntry::decorated("src/markup.rs", "★"),
        PathEntry::new("src/widgets/table.rs"),
        PathEntry::new("src/widgets/chart.rs"),
        PathEntry::decorated("tests", "…"),
        PathEntry::new("Cargo.toml"),
    ];
    console.draw(&build_tree("termkit", &entries));
}

fn demo_table(console: &Console) {
    console.draw(
        &Table::new()
            .title("workers")
            .headers(["name", "state", "jobs"])
            .row(["indexer", "running", "12"])
            .row(["mailer", "idle", "0"])
            .row(["scraper [eu]", "backoff", "3"]),
    );
    console.blank_lines(1);
    console.draw(
        &Grid::new()
            .row(["region", "eu-west"])
            .row(["replicas", "4"])
            .row(["uptime", "99.99%"])
            .column_gaps([4]),
    );
    console.blank_lines(1);
    console.draw(&Columns::new([
        "alpha", "bravo", "charlie", "delta", "echo", "foxtrot",
    ]));
}

fn demo_charts(console: &Console) {
    console.draw(
        &BarChart::new()
            .title("requests by service")
            .bar_width(30)
            .item("gateway", 1250.0, Some("cyan"))
            .item("auth", 410.0, Some("green"))
            .item("billing", 87.0, None),
    );
    console.blank_lines(1);
    console.draw(
        &BreakdownChart::new()
            .title("disk usage")
            .bar_width(36)
            .item("data", 62.0, "cyan")
            .item("logs", 25.0, "yellow")
            .item("free", 13.0, "dark_grey"),
    );
}

fn demo_layout(console: &Console) {
    let layout = QuadrantLayout::new()
        .top_left(Panel::new("cpu 42%\nmem 63%").header("host"))
        .top_right(
            Table::new()
                .headers(["queue", "depth"])
                .row(["default", "3"])
                .row(["mail", "0"]),
        )
        .bottom_left(Text::new("logs: all quiet"))
        .bottom_right(
            BarChart::new()
                .bar_width(12)
                .item("in", 32.0, Some("green"))
                .item("out", 18.0, Some("cyan")),
        );
    console.draw(&layout);
}

fn demo_calendar(console: &Console) -> Result<(), UiError> {
    let today = chrono::Local::now().date_naive();
    let calendar = Calendar::new(today.year(), today.month())?
        .event(
            CalendarEvent::on(today.year(), today.month(), today.day())
                .description("today")
                .style("bold green"),
        )
        .event(CalendarEvent::on(today.year(), today.month(), 1));
    console.draw(&calendar);
    Ok(())
}

fn demo_prompts(console: &Console) -> Result<(), UiError> {
    if !console.require_interactive(Some("termkit table")) {
        return Ok(());
    }

    let flavor = Select::new("favorite flavor")
        .items(["vanilla", "chocolate", "pistachio", "mango", "coffee", "lemon"])
        .page_size(4)
        .ask_value(console)?;

    let toppings = MultiSelect::new("toppings (pick 1 to 3)")
        .items(["sprinkles", "fudge", "caramel", "mint", "sea salt"])
        .min(1)
        .max(3)
        .ask(console)?;

    let name = TextPrompt::new("order name")
        .validate(|input| {
            if input
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
            {
                Validation::ok()
            } else {
                Validation::fail("letters, digits and dashes only")
            }
        })
        .ask(console)?;

    let token = Secret::new("loyalty code").ask(console)?;
    let rush = Confirm::new("rush delivery?").default_answer(false).ask(console)?;

    console.ok(&format!(
        "order `{name}`: {flavor}, {} topping(s), code {} chars, rush: {rush}",
        toppings.len(),
        token.len()
    ));
    Ok(())
}

async fn demo_progress(console: &Console) -> Result<(), UiError> {
    run_status(console, "warming caches", || async {
        sleep(Duration::from_millis(600)).await;
    })
    .await?;
    run_progress(console, false, |ctx| async move {
        let download = ctx.add_task("downloading layers", 100.0);
        let index = ctx.add_task("building index", 40.0);
        for _ in 0..20 {
            download.advance(5.0);
            index.advance(2.0);
            sleep(Duration::from_millis(120)).await;
        }
        download.finish();
        index.finish();
    })
    .await?;
    console.ok("all tasks finished");
    Ok(())
}

async fn demo_live(console: &Console) -> Result<(), UiError> {
    let states = ["booting", "syncing", "serving", "draining", "stopped"];
    run_live(console, &Text::new("starting live view"), |live| async move {
        for (step, state) in states.iter().enumerate() {
            let frame = Table::new()
                .headers(["tick", "state"])
                .row([(step + 1).to_string(), state.to_string()]);
            live.update(&frame);
            sleep(Duration::from_millis(400)).await;
        }
    })
    .await?;
    console.blank_lines(1);
    Ok(())
}
