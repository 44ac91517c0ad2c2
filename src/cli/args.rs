//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Quadrilateral classification trainer: explore the decision tree, check answers, play the quiz
#[derive(Parser, Debug)]
#[command(name = "quadriclass")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the decision tree, optionally highlighting the path to a node
    Tree {
        /// Node id or shape name
        node: Option<String>,
    },

    /// Show the questions and answers leading to a shape
    Path {
        /// Node id or shape name
        node: String,
    },

    /// Check an answer for a shape
    Guess {
        /// Node id of the shape being guessed
        shape: String,
        /// The answer, may span several words
        #[arg(required = true, num_args = 1..)]
        answer: Vec<String>,
    },

    /// Describe a shape and calculate its perimeter and area
    Shape {
        /// Node id or shape name
        shape: String,
        /// Calculator input, e.g. --value a=3
        #[arg(short, long = "value", value_name = "NAME=NUMBER")]
        values: Vec<String>,
    },

    /// List all shapes with their accepted answers
    Shapes,

    /// Play the timed quiz
    Quiz {
        /// Seed for reproducible targets
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show or reset the high score
    Score {
        /// Forget the stored high score
        #[arg(long)]
        reset: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Print config file locations
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_multi_word_answer_when_parsing_then_collects_words() {
        let cli = Cli::parse_from(["quadriclass", "guess", "res_h", "рамнокрак", "трапез"]);
        match cli.command {
            Some(Commands::Guess { shape, answer }) => {
                assert_eq!(shape, "res_h");
                assert_eq!(answer, vec!["рамнокрак", "трапез"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn given_repeated_debug_flag_when_parsing_then_counts() {
        let cli = Cli::parse_from(["quadriclass", "-dd", "shapes"]);
        assert_eq!(cli.debug, 2);
    }
}
