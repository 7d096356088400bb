use clap::{Arg, ArgAction, Command};

use crate::constants::{DEFAULT_IMAGE_FILE, DEFAULT_JIRA_URL};
use crate::render::LayoutEngine;

pub fn build_cli() -> Command {
    Command::new("jira-depgraph")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Draw the dependency graph of a Jira issue with Graphviz")
        .arg(
            Arg::new("issue")
                .value_name("ISSUE_KEY")
                .help("Issue to start from (e.g., DEMO-1)")
                .required(true)
                .num_args(1)
                .index(1)
        )
        .arg(
            Arg::new("user")
                .long("user")
                .short('u')
                .value_name("USERNAME")
                .help("Username to access Jira (or JIRA_USER)")
        )
        .arg(
            Arg::new("password")
                .long("password")
                .short('p')
                .value_name("PASSWORD")
                .help("Password to access Jira (or JIRA_PASSWORD; prompted if absent)")
        )
        .arg(
            Arg::new("jira")
                .long("jira")
                .short('j')
                .value_name("URL")
                .help(format!("Jira base URL (or JIRA_URL) [default: {}]", DEFAULT_JIRA_URL))
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .value_name("FILE")
                .help("Filename to write the image to; the extension picks the format")
                .default_value(DEFAULT_IMAGE_FILE)
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Add every issue in the start issue's epic to the graph")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("no-subtasks")
                .long("no-subtasks")
                .help("Follow issue links only, not subtasks")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("layout")
                .long("layout")
                .short('l')
                .value_name("ENGINE")
                .help("Graphviz layout program")
                .value_parser(clap::value_parser!(LayoutEngine))
                .default_value("dot")
        )
        .arg(
            Arg::new("save-config")
                .long("save-config")
                .help("Remember the Jira URL and username for later runs")
                .action(ArgAction::SetTrue)
        )
}
