use clap::{Parser, Subcommand};
use colored::Colorize;
use refa::{Dfa, Nfa};

#[derive(Parser)]
#[command(name = "refa")]
#[command(about = "refa - compile regex patterns to finite automata")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check if a pattern accepts an input string
    Match {
        /// The regex pattern
        pattern: String,
        /// The input string
        input: String,
        /// Match against the unminimized DFA
        #[arg(long)]
        no_minimize: bool,
    },
    /// Print the NFA and DFA transition tables for a pattern
    Table {
        /// The regex pattern
        pattern: String,
        /// Also minimize and print the reduced table
        #[arg(short, long)]
        minimize: bool,
    },
    /// Print the DFA as a Graphviz digraph
    Graph {
        /// The regex pattern
        pattern: String,
        /// Minimize before rendering
        #[arg(short, long)]
        minimize: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            pattern,
            input,
            no_minimize,
        } => cmd_match(&pattern, &input, no_minimize),
        Commands::Table { pattern, minimize } => cmd_table(&pattern, minimize),
        Commands::Graph { pattern, minimize } => cmd_graph(&pattern, minimize),
    }
}

fn compile(pattern: &str) -> Dfa {
    match refa::to_dfa(pattern) {
        Ok(dfa) => dfa,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(2);
        }
    }
}

fn cmd_match(pattern: &str, input: &str, no_minimize: bool) {
    let mut dfa = compile(pattern);
    if !no_minimize {
        dfa.minimize();
    }

    if dfa.matches(input) {
        println!("{}", "true".green());
        std::process::exit(0);
    } else {
        println!("{}", "false".red());
        std::process::exit(1);
    }
}

fn cmd_table(pattern: &str, minimize: bool) {
    let nfa = match Nfa::from_pattern(pattern) {
        Ok(nfa) => nfa,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(2);
        }
    };

    println!("{}", "NFA transition table:".bold());
    print_nfa_table(&nfa);

    let mut dfa = Dfa::new(nfa);
    println!();
    println!("{}", "DFA transition table:".bold());
    print_dfa_table(&dfa);

    if minimize {
        dfa.minimize();
        println!();
        println!("{}", "Minimized DFA transition table:".bold());
        print_dfa_table(&dfa);
    }
}

fn print_nfa_table(nfa: &Nfa) {
    let table = nfa.transition_table();
    for (state, row) in table.rows() {
        let marker = if table.accepting_state_numbers().contains(state) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        let mut cells: Vec<String> = row
            .transitions()
            .iter()
            .map(|(symbol, targets)| format!("{symbol} -> {targets:?}"))
            .collect();
        cells.push(format!("ε* -> {:?}", row.epsilon_closure()));
        println!("  {marker}{state}: {}", cells.join("  "));
    }
}

fn print_dfa_table(dfa: &Dfa) {
    for (state, row) in dfa.transition_table() {
        let marker = if dfa.accepting_state_numbers().contains(state) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        let cells: Vec<String> = row
            .iter()
            .map(|(symbol, target)| format!("{symbol} -> {target}"))
            .collect();
        println!("  {marker}{state}: {}", cells.join("  "));
    }
}

fn cmd_graph(pattern: &str, minimize: bool) {
    let mut dfa = compile(pattern);
    if minimize {
        dfa.minimize();
    }
    println!("{}", dfa.to_dot());
}
