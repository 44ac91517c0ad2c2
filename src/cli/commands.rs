//! Command dispatch

use std::collections::BTreeMap;
use std::io::{self, BufRead};

use clap::CommandFactory;
use clap_complete::generate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::application::{Answer, ApplicationError, Catalog, QuizSession};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{
    format_value, Calculator, ClassificationGraph, GraphNode, HighlightState, Highlights,
    MatchResult, NodeKind,
};
use crate::exitcode;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Run a parsed command and return the process exit code.
pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<i32> {
    match &cli.command {
        Some(Commands::Tree { node }) => tree(container, node.as_deref()),
        Some(Commands::Path { node }) => path(container, node),
        Some(Commands::Guess { shape, answer }) => guess(container, shape, &answer.join(" ")),
        Some(Commands::Shape { shape, values }) => shape_info(container, shape, values),
        Some(Commands::Shapes) => shapes(container),
        Some(Commands::Quiz { seed }) => quiz(container, *seed),
        Some(Commands::Score { reset }) => score(container, *reset),
        Some(Commands::Config { command }) => config(container, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "quadriclass", &mut io::stdout());
            Ok(exitcode::OK)
        }
        None => {
            Cli::command()
                .print_help()
                .map_err(|e| InfraError::terminal("print help", e))?;
            Ok(exitcode::OK)
        }
    }
}

/// Display text of a node: question text, start label or shape name.
fn node_title(catalog: &Catalog, node: &GraphNode) -> String {
    match node.kind() {
        NodeKind::Outcome => catalog
            .concept(node.id())
            .map(|c| c.name.clone())
            .unwrap_or_else(|_| node.id().to_string()),
        _ => node.label().to_string(),
    }
}

fn subtree(
    catalog: &Catalog,
    graph: &ClassificationGraph,
    node: &GraphNode,
    highlights: &Highlights,
) -> Tree<String> {
    let state = highlights.node(node.id()).unwrap_or(HighlightState::Neutral);
    let title = node_title(catalog, node);
    let text = match node.decision.label() {
        Some(answer) => {
            let edge_state = node
                .parent
                .and_then(|p| graph.get_node(p))
                .and_then(|parent| highlights.edge(parent.id(), node.id()))
                .unwrap_or(HighlightState::Neutral);
            format!(
                "{} {}",
                output::highlighted(&format!("[{answer}]"), edge_state),
                output::highlighted(&title, state)
            )
        }
        None => output::highlighted(&title, state).to_string(),
    };

    let mut tree = Tree::new(text);
    for child in node.children.iter().filter_map(|&idx| graph.get_node(idx)) {
        tree.push(subtree(catalog, graph, child, highlights));
    }
    tree
}

#[instrument(skip(container))]
fn tree(container: &ServiceContainer, node: Option<&str>) -> CliResult<i32> {
    let catalog = &container.catalog;
    let graph = catalog.graph();
    let highlights = match node {
        Some(query) => catalog.select(catalog.resolve(query)?)?.highlights,
        None => graph.classify::<&str>(&[]),
    };

    match graph.get_node(graph.root()) {
        Some(root) => output::info(&subtree(catalog, graph, root, &highlights)),
        None => output::warning("graph has no root"),
    }
    Ok(exitcode::OK)
}

/// Question/answer lines along a path; the final shape only when `reveal`.
fn describe_path(catalog: &Catalog, path: &[String], reveal: bool) -> Vec<String> {
    let graph = catalog.graph();
    let mut lines = Vec::with_capacity(path.len());
    for step in path.windows(2) {
        let Some(node) = graph.node(&step[0]) else {
            continue;
        };
        if node.kind() != NodeKind::Question {
            continue;
        }
        let answer = graph
            .decision(&step[0], &step[1])
            .and_then(|d| d.label())
            .unwrap_or("?");
        lines.push(format!("{} → {}", node.label(), answer));
    }
    if reveal {
        if let Some(last) = path.last().and_then(|id| graph.node(id)) {
            lines.push(format!("= {}", node_title(catalog, last)));
        }
    }
    lines
}

#[instrument(skip(container))]
fn path(container: &ServiceContainer, node: &str) -> CliResult<i32> {
    let catalog = &container.catalog;
    let target = catalog.resolve(node)?;
    let selection = catalog.select(target)?;
    debug!("path: {:?}", selection.path);

    output::header(&selection.path.join(" → "));
    for line in describe_path(catalog, &selection.path, true) {
        output::detail(&line);
    }
    Ok(exitcode::OK)
}

#[instrument(skip(container))]
fn guess(container: &ServiceContainer, shape: &str, answer: &str) -> CliResult<i32> {
    let result = container.catalog.grade(shape, answer)?;
    output::verdict(&result);
    if result.is_match() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::WRONG_ANSWER)
    }
}

/// Parse `name=number` pairs from `--value`.
fn parse_values(values: &[String]) -> CliResult<BTreeMap<String, f64>> {
    values
        .iter()
        .map(|pair| {
            let (name, number) = pair
                .split_once('=')
                .ok_or_else(|| CliError::InvalidArgs(format!("expected NAME=NUMBER: {pair}")))?;
            let number: f64 = number
                .trim()
                .parse()
                .map_err(|_| CliError::InvalidArgs(format!("not a number: {pair}")))?;
            Ok((name.trim().to_string(), number))
        })
        .collect()
}

/// Accepted `--value` names with their labels, e.g. `d1 (d₁)`.
fn describe_inputs(calculator: Calculator) -> String {
    calculator
        .inputs()
        .iter()
        .map(|input| format!("{} ({})", input.id, input.label))
        .collect::<Vec<_>>()
        .join(", ")
}

#[instrument(skip(container))]
fn shape_info(container: &ServiceContainer, shape: &str, values: &[String]) -> CliResult<i32> {
    let catalog = &container.catalog;
    let id = catalog.resolve(shape)?;
    let concept = catalog.concept(id)?;

    output::header(&concept.name);
    output::info(&concept.description);
    for property in &concept.properties {
        output::detail(&format!("• {property}"));
    }
    output::action("L", &concept.formulas.perimeter);
    output::action("P", &concept.formulas.area);
    output::action("Пример", &concept.real_world);
    if let Some(calculator) = concept.calculator {
        output::action("--value", &describe_inputs(calculator));
    }

    if values.is_empty() {
        return Ok(exitcode::OK);
    }
    let calculator = concept
        .calculator
        .ok_or_else(|| CliError::Usage(format!("{} has no calculator", concept.name)))?;
    let measurement = calculator
        .measure(&parse_values(values)?)
        .map_err(ApplicationError::from)?;
    output::header("Калкулатор");
    output::detail(&format!("Периметар (L) = {}", format_value(measurement.perimeter)));
    output::detail(&format!("Плоштина (P) = {}", format_value(measurement.area)));
    Ok(exitcode::OK)
}

#[instrument(skip(container))]
fn shapes(container: &ServiceContainer) -> CliResult<i32> {
    for (id, concept) in container.catalog.shapes() {
        output::info(&format!(
            "{:<6} {:<18} {}",
            id,
            concept.name,
            concept.aliases.join(", ")
        ));
    }
    Ok(exitcode::OK)
}

#[instrument(skip(container))]
fn quiz(container: &ServiceContainer, seed: Option<u64>) -> CliResult<i32> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut session = QuizSession::start(
        container.catalog.clone(),
        container.settings.quiz,
        container.clock.clone(),
        rng,
    );
    output::header("Следи ја патеката и погоди ја формата! (:hint за помош, :quit за крај)");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    'rounds: loop {
        output::info("");
        output::action(
            "Поени",
            &format!("{}  ⏳ {}s", session.score(), session.remaining().as_secs()),
        );
        for line in describe_path(&container.catalog, &session.active_path()?, false) {
            output::detail(&line);
        }

        loop {
            output::prompt("Која фигура е ова?");
            let Some(line) = lines.next() else {
                break 'rounds;
            };
            let line = line.map_err(|e| InfraError::terminal("read answer", e))?;
            match line.trim() {
                ":quit" => break 'rounds,
                ":hint" => match session.hint() {
                    Ok(hint) => output::detail(&format!("Помош: {hint}")),
                    Err(ApplicationError::QuizFinished) => break 'rounds,
                    Err(e) => return Err(e.into()),
                },
                guess => match session.submit(guess)? {
                    Answer::Correct { result, awarded } => {
                        output::verdict(&result);
                        output::action("Поени", &format!("+{awarded}"));
                        continue 'rounds;
                    }
                    Answer::Incorrect => output::verdict(&MatchResult::NoMatch),
                    Answer::TimeUp => {
                        output::warning("Времето истече!");
                        break 'rounds;
                    }
                },
            }
        }
    }

    let summary = session.finish(container.scores.as_ref())?;
    output::header("Крај на играта!");
    output::action("Резултат", &summary.score);
    output::action("Решени", &summary.solved);
    output::action("Рекорд", &summary.high_score);
    if summary.new_record {
        output::success("🎉 НОВ РЕКОРД! 🎉");
    }
    Ok(exitcode::OK)
}

#[instrument(skip(container))]
fn score(container: &ServiceContainer, reset: bool) -> CliResult<i32> {
    let store = &container.scores;
    if reset {
        store
            .reset()
            .map_err(|e| InfraError::score_file(store.location(), e))?;
        output::success("Рекордот е избришан.");
        return Ok(exitcode::OK);
    }
    let high_score = store
        .load_high_score()
        .map_err(|e| InfraError::score_file(store.location(), e))?;
    output::action("🏆 Рекорд", &high_score);
    Ok(exitcode::OK)
}

#[instrument(skip(container))]
fn config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<i32> {
    match command {
        ConfigCommands::Show => output::info(&container.settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::warning("no config directory on this platform"),
            }
            output::action("data", &container.settings.data_dir.display());
        }
    }
    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_kite_when_describing_inputs_then_ascii_names_with_labels() {
        assert_eq!(
            describe_inputs(Calculator::Kite),
            "a (Страна a), b (Страна b), d1 (d₁), d2 (d₂)"
        );
    }

    #[test]
    fn given_value_pairs_when_parsing_then_trims_names() {
        let values = parse_values(&[" d1 = 4".to_string(), "d2=2.5".to_string()]).unwrap();
        assert_eq!(values.get("d1"), Some(&4.0));
        assert_eq!(values.get("d2"), Some(&2.5));
    }
}
