use std::process;
use colored::*;

use jira_depgraph::cli::build_cli;
use jira_depgraph::config::{load_config, prompt_password, save_config, Settings};
use jira_depgraph::error::{DepGraphResult, ErrorContext};
use jira_depgraph::logging::{get_log_file_path, init_logging, log_error, log_info};
use jira_depgraph::{build_graph, CachedTracker, GraphvizRenderer, JiraClient};

async fn run(settings: Settings) -> DepGraphResult<()> {
    if settings.save_config {
        let path = save_config(&settings.to_config())?;
        println!("{} {}", "Saved settings to".bright_black(), path.display());
    }

    let password = match settings.password.clone() {
        Some(password) => password,
        None => prompt_password("Please enter the Jira password: ")?,
    };

    let client = JiraClient::new(&settings.base_url, settings.username.clone(), password)
        .with_context(|| format!("Failed to create HTTP client for {}", settings.base_url))?;
    let tracker = CachedTracker::new(client);

    let graph = build_graph(&tracker, &settings.start_key, settings.build_options())
        .await?;

    println!(
        "{} {}",
        "Writing to".bright_black(),
        settings.image_file.display().to_string().bold()
    );
    GraphvizRenderer::new(settings.layout).render(&graph, &settings.image_file)?;

    println!(
        "{} {} issues, {} relationships",
        "✅".green(),
        graph.node_count().to_string().bold(),
        graph.edge_count().to_string().bold()
    );
    log_info(&format!(
        "Wrote {} ({} nodes, {} edges)",
        settings.image_file.display(),
        graph.node_count(),
        graph.edge_count()
    ));

    Ok(())
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    if let Err(e) = init_logging() {
        eprintln!("{} Could not start log file: {}", "Warning:".yellow(), e);
    }

    let result = match Settings::from_matches(&matches, &load_config()) {
        Ok(settings) => run(settings).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        log_error(&e.to_string());
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(log_file) = get_log_file_path() {
            eprintln!("{} {}", "Log:".bright_black(), log_file.display());
        }
        process::exit(1);
    }
}
