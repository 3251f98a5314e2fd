use anstyle::AnsiColor;
use anyhow::Context;
use anyhow::Result;
use clap::crate_name;
use clap::crate_version;
use gridcal_lib::constants::style_from_fg;
use gridcal_lib::constants::ERROR_STYLE;
use gridcal_lib::constants::HELP_STYLE;
use gridcal_lib::constants::PRIMARY_STYLE;
use gridcal_lib::constants::SECONDARY_STYLE;
use gridcal_lib::ctx;
use gridcal_lib::error::Ctx;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;

/// Util function for getting the style for the CLI
pub fn get_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(style_from_fg(AnsiColor::Yellow).bold())
        .header(style_from_fg(AnsiColor::Green).bold().underline())
        .literal(style_from_fg(AnsiColor::Cyan).bold())
        .invalid(style_from_fg(AnsiColor::Blue).bold())
        .error(ERROR_STYLE)
        .valid(HELP_STYLE)
        .placeholder(style_from_fg(AnsiColor::White))
}

/// Pretty print gridcal's version
pub fn print_version(script: bool) {
    if script {
        println!("{} {}", crate_name!(), crate_version!());

        return;
    }

    println!(
        "{}{}{:#} at version {}{}{:#}",
        PRIMARY_STYLE,
        crate_name!(),
        PRIMARY_STYLE,
        SECONDARY_STYLE,
        crate_version!(),
        SECONDARY_STYLE
    );
}

/// Generates the progress bar used by the cli.
pub fn generate_progress_bar(len: u64) -> Result<ProgressBar> {
    let prog_style = ProgressStyle::with_template(
        "{prefix}[{spinner:.green}] {bar:.green/blue} {msg} {pos}/{len}",
    )
    .with_context(ctx!("Failed to create the progress bar",;"",))?
    .progress_chars("##-");

    let bar = ProgressBar::new(len);
    bar.set_style(prog_style);
    bar.set_message("Running trials...");

    Ok(bar)
}
