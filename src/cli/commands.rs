//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::TreeGenerator;
use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{Node, Tree};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => _completion(*shell),
        Some(Commands::Config) => _config(&load_settings(cli)?),
        Some(Commands::Tree) => _tree(&load_settings(cli)?),
        Some(Commands::Stats) => _stats(&load_settings(cli)?),
        Some(Commands::List) | None => _list(&load_settings(cli)?),
    }
}

/// Config layers first, command line flags on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = Settings::load(cli.config.as_deref())?.merge_with(&cli.overrides());
    debug!(?settings, "effective settings");
    Ok(settings)
}

fn generate_tree(settings: &Settings) -> CliResult<Tree> {
    let mut generator = TreeGenerator::from_seed_option(settings.seed);
    Ok(generator.build_tree(&settings.params())?)
}

#[instrument(skip(settings))]
fn _list(settings: &Settings) -> CliResult<()> {
    let tree = generate_tree(settings)?;
    for (count, (_, node)) in tree.iter().enumerate() {
        output::info(&format!("Node {} = '{}'", count + 1, node));
    }
    Ok(())
}

#[instrument(skip(settings))]
fn _tree(settings: &Settings) -> CliResult<()> {
    let tree = generate_tree(settings)?;
    output::info(&tree);
    Ok(())
}

#[instrument(skip(settings))]
fn _stats(settings: &Settings) -> CliResult<()> {
    let params = settings.params();
    let tree = generate_tree(settings)?;
    let size = tree.size();

    if i64::try_from(size).map_or(true, |size| size != params.node_count) {
        output::warning(&format!(
            "generated {} nodes instead of {}: depth and width guarantees take precedence",
            size, params.node_count
        ));
    }

    output::header("Tree");
    output::action("nodes", &size);
    output::action("leaves", &tree.leaf_nodes().len());
    output::action("depth", &tree.depth());

    let deepest = tree.deepest_node();
    let mut branch = vec![deepest];
    branch.extend(tree.path(deepest));
    output::action("deepest branch", &tree.names(&branch).join(" <- "));

    if let Some((name, fan_out)) = widest_fan_out(&tree) {
        output::action("widest fan-out", &format!("{} ({} children)", name, fan_out));
    }
    Ok(())
}

/// Node with the most direct children, first in pre-order on ties.
fn widest_fan_out(tree: &Tree) -> Option<(&str, usize)> {
    tree.iter()
        .map(|(_, node)| (node, node.children().len()))
        .filter(|&(_, count)| count > 0)
        .fold(None, |widest: Option<(&Node, usize)>, (node, count)| match widest {
            Some((_, max)) if max >= count => widest,
            _ => Some((node, count)),
        })
        .map(|(node, count)| (node.name(), count))
}

fn _config(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
