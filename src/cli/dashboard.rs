//! CLI commands for viewing the dashboard
//!
//! Implements the dashboard, single category drill-down and category
//! listing commands.

use super::args::{build_view, report_warnings, ViewArgs};
use crate::config::settings::Settings;
use crate::display::{format_category_detail, format_category_list, format_dashboard};
use crate::error::SankeyResult;
use crate::services::LoadCache;

/// Handle the dashboard command
pub fn handle_dashboard(
    cache: &mut LoadCache,
    settings: &Settings,
    args: &ViewArgs,
    category: Option<&str>,
) -> SankeyResult<()> {
    let loaded = build_view(cache, settings, args, category)?;
    report_warnings(&loaded.warnings);

    print!("{}", format_dashboard(&loaded.view, &settings.currency_symbol));
    Ok(())
}

/// Handle the category drill-down command
pub fn handle_category(
    cache: &mut LoadCache,
    settings: &Settings,
    args: &ViewArgs,
    category: &str,
) -> SankeyResult<()> {
    let loaded = build_view(cache, settings, args, Some(category))?;
    report_warnings(&loaded.warnings);

    println!("{}", loaded.view.range);
    println!();
    if let Some(detail) = &loaded.view.category_detail {
        print!("{}", format_category_detail(detail, &settings.currency_symbol));
    }

    if !loaded.view.categories.iter().any(|c| c == category) {
        println!();
        println!("Available categories:");
        print!("{}", format_category_list(&loaded.view.categories));
    }

    Ok(())
}

/// Handle the categories listing command
pub fn handle_categories(
    cache: &mut LoadCache,
    settings: &Settings,
    args: &ViewArgs,
) -> SankeyResult<()> {
    let loaded = build_view(cache, settings, args, None)?;
    report_warnings(&loaded.warnings);

    println!("Expense categories: {}", loaded.view.range);
    print!("{}", format_category_list(&loaded.view.categories));
    Ok(())
}
