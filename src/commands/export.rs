use std::path::Path;

use console::style;
use miette::Result;

use stencil::{ExportOptions, InflateOptions};

use super::load_data;

pub fn run(
    template: String,
    output: String,
    data_file: Option<String>,
    overwrite: bool,
    clean: bool,
    dry_run: bool,
) -> Result<()> {
    let template_root = Path::new(&template);
    let output_dir = Path::new(&output);
    let data = load_data(template_root, data_file)?;

    if dry_run {
        let set = stencil::inflate(template_root, &data, InflateOptions::default())?;

        println!(
            "\n{} Dry run \u{2014} files that would be written to {}:",
            style("==>").cyan().bold(),
            style(output_dir.display()).cyan()
        );
        for file in set.iter() {
            let action = if file.is_expandable() { "render" } else { "copy  " };
            println!(
                "  {} {}",
                style(action).green(),
                file.relative_path().display()
            );
        }
        println!(
            "\n{} Dry run \u{2014} no files written.",
            style("\u{2139}").blue().bold()
        );
        return Ok(());
    }

    let options = ExportOptions {
        overwrite,
        clean,
        overrides: Vec::new(),
    };
    let result = stencil::export(template_root, &data, output_dir, options)?;

    println!(
        "\n{} Template exported to {}",
        style("\u{2713}").green().bold(),
        style(result.output_dir.display()).cyan()
    );
    println!(
        "  {} files rendered, {} files copied",
        result.files_rendered.len(),
        result.files_copied.len()
    );

    Ok(())
}
