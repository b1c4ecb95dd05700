// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, bail};
use config::Config;
use kpiboard_app::{AppState, Catalogue, CategoryFilter, DateRangeState, TabKind};
use runtime::StaticRuntime;
use std::env;
use std::fmt::Write as _;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `kpiboard --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let mut runtime = StaticRuntime::builtin();
    let catalogue = runtime.check()?;
    let category = resolve_category(&options, &config, &catalogue)?;
    if options.check_only {
        return Ok(());
    }

    if options.list {
        print!("{}", render_listing(&catalogue, &category));
        return Ok(());
    }

    let log_path = logging::init(&config)?;
    info!(
        config = %options.config_path.display(),
        log = ?log_path,
        "kpiboard starting"
    );

    let mut state = initial_state(&options, &config, category)?;
    kpiboard_tui::run_app(&mut state, &mut runtime)
}

fn resolve_category(
    options: &CliOptions,
    config: &Config,
    catalogue: &Catalogue,
) -> Result<CategoryFilter> {
    let Some(raw) = &options.category else {
        return Ok(config.default_category());
    };

    let category = CategoryFilter::parse(raw);
    if let CategoryFilter::Only(name) = &category
        && !catalogue.has_category(name)
    {
        bail!(
            "unknown category {name:?} for --category; choose All or one of: {}",
            catalogue.categories().join(", ")
        );
    }
    Ok(category)
}

fn initial_state(
    options: &CliOptions,
    config: &Config,
    category: CategoryFilter,
) -> Result<AppState> {
    let active_tab = if options.details {
        TabKind::Details
    } else {
        config.default_tab()
    };
    let dates = DateRangeState {
        reset_on_open: config.reset_range_on_open(),
        ..DateRangeState::starting_with(Some(config.initial_range()?))
    };

    Ok(AppState {
        active_tab,
        category,
        dates,
        status_line: None,
    })
}

/// Plain-text catalogue dump: one KPI per line, columns padded to the
/// widest entry.
fn render_listing(catalogue: &Catalogue, category: &CategoryFilter) -> String {
    let kpis = catalogue.filter(category);
    if kpis.is_empty() {
        return format!("no KPIs in {}\n", category.label());
    }

    let name_width = kpis
        .iter()
        .map(|kpi| kpi.name.chars().count())
        .max()
        .unwrap_or(0);
    let value_width = kpis
        .iter()
        .map(|kpi| kpi.value.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for kpi in kpis {
        let line = format!(
            "{:<name_width$}  {:>value_width$}  {:<6}  {}",
            kpi.name,
            kpi.value,
            kpi.trend_display(),
            kpi.category
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    category: Option<String>,
    details: bool,
    check_only: bool,
    list: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        category: None,
        details: false,
        check_only: false,
        list: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--category" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--category requires a category name"))?;
                options.category = Some(value.as_ref().to_owned());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--details" => {
                options.details = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--list" => {
                options.list = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("kpiboard");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --category <name>        Start filtered to a category (\"All\" for every KPI)");
    println!("  --details                Start on the Details tab");
    println!("  --check                  Validate config + KPI catalogue, then exit");
    println!("  --list                   Print the (filtered) KPI catalogue and exit");
    println!("  --help                   Show this help");
}
