use std::path::Path;

use console::style;
use miette::Result;

use stencil::check::check_template;

pub fn run(template: String) -> Result<()> {
    let template_root = Path::new(&template);

    println!(
        "{} {}",
        style("Checking template at").bold(),
        style(template_root.display()).cyan()
    );

    let result = check_template(template_root)?;

    println!("  Expandable files: {}", result.expand_count);
    println!("  Verbatim files:   {}", result.pass_through_count);

    if !result.warnings.is_empty() {
        println!("\n{}", style("Warnings:").yellow().bold());
        for warning in &result.warnings {
            println!("  {} {}", style("\u{26a0}").yellow(), warning);
        }
    }

    if !result.errors.is_empty() {
        println!("\n{}", style("Errors:").red().bold());
        for error in &result.errors {
            println!("  {} {}", style("\u{2717}").red(), error);
        }
        println!(
            "\n{} Template has {} error(s)",
            style("\u{2717}").red().bold(),
            result.errors.len()
        );
        std::process::exit(1);
    }

    println!("\n{} Template is valid!", style("\u{2713}").green().bold());
    Ok(())
}
