use anyhow::Result;
use colored::Colorize;
use search_client::CityDirectory;

pub fn run(directory: &CityDirectory) -> Result<()> {
    for name in directory.state_names() {
        if let Some(entry) = directory.get(name) {
            println!(
                "{} {} {}",
                entry.code.bright_cyan().bold(),
                name,
                format!("({} cities)", entry.cities.len()).dimmed()
            );
        }
    }
    Ok(())
}
