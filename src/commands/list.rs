use std::path::Path;

use console::style;
use miette::Result;

use stencil::InflateOptions;

use super::load_data;

pub fn run(template: String, data_file: Option<String>) -> Result<()> {
    let template_root = Path::new(&template);
    let data = load_data(template_root, data_file)?;

    let set = stencil::inflate(template_root, &data, InflateOptions::default())?;

    if set.is_empty() {
        println!(
            "No files matched. Check the 'expand' patterns in {}.",
            style("template.json").cyan()
        );
        return Ok(());
    }

    println!(
        "{} ({} file{})\n",
        style(set.template_root().display()).bold(),
        set.len(),
        if set.len() == 1 { "" } else { "s" }
    );

    for file in set.iter() {
        let kind = if file.is_expandable() {
            style("expand  ").green()
        } else {
            style("verbatim").yellow()
        };
        println!("  {} {}", kind, file.relative_path().display());
    }

    Ok(())
}
