use std::{fs::read_to_string, path::PathBuf, process::exit, time::Instant};

use clap::{Parser, ValueEnum};
use luaparse::{
    ast::{
        ast::{AstNode, Node},
        printer::print_block,
        walk::inspect,
    },
    lexer::{lexer::tokenize_with, tokens::Token},
    parse_tokens, render_error, Block, ParseError,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Debug form of the tree
    Ast,
    /// The tree as JSON, tagged by node kind
    Json,
    /// The tree printed back as Lua source
    Lua,
    /// One line per node, indented by depth
    Kinds,
    /// The token stream
    Tokens,
}

#[derive(Parser)]
#[command(name = "luaparse", about = "Parse Lua source and print its syntax tree", version)]
struct Cli {
    /// Lua source file
    file: PathBuf,

    /// Line number of the first line of the file
    #[arg(short, long, default_value_t = 1)]
    line: u32,

    /// Chunk name recorded on function literals (defaults to the file name)
    #[arg(short, long)]
    chunk: Option<String>,

    /// What to print
    #[arg(short, long, value_enum, default_value_t = Emit::Ast)]
    emit: Emit,

    /// Treat `continue` as an ordinary name
    #[arg(long)]
    no_continue: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: failed to read {}: {}", cli.file.display(), error);
            exit(1);
        }
    };

    let start = Instant::now();
    let tokens = match tokenize_with(&source, cli.line, !cli.no_continue) {
        Ok(tokens) => tokens,
        Err(error) => fail(&error, &source, &file_name, cli.line),
    };
    info!(tokens = tokens.len(), elapsed = ?start.elapsed(), "tokenized");

    if cli.emit == Emit::Tokens {
        print_tokens(&tokens);
        return;
    }

    let chunk = cli.chunk.unwrap_or_else(|| file_name.clone());
    let block = match parse_tokens(tokens, &chunk) {
        Ok(block) => block,
        Err(error) => fail(&error, &source, &file_name, cli.line),
    };
    info!(statements = block.len(), elapsed = ?start.elapsed(), "parsed");

    match cli.emit {
        Emit::Json => match serde_json::to_string_pretty(&block) {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("Error: failed to encode tree: {}", error);
                exit(1);
            }
        },
        Emit::Lua => print!("{}", print_block(&block)),
        Emit::Kinds => print_kinds(&block),
        Emit::Ast | Emit::Tokens => println!("{:#?}", block),
    }
}

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        println!("{:<8} {:<14} {:?}", token.position.to_string(), format!("{:?}", token.kind), token.value);
    }
}

fn print_kinds(block: &Block) {
    let mut depth = 0;
    for stmt in block {
        inspect(Node::Stmt(stmt), |node| {
            match node {
                Some(node) => {
                    println!("{}{} {}", "  ".repeat(depth), node.get_kind(), node.get_position());
                    depth += 1;
                }
                None => depth -= 1,
            }
            true
        });
    }
}

fn fail(error: &ParseError, source: &str, file: &str, start_line: u32) -> ! {
    eprint!("{}", render_error(error, source, file, start_line));
    exit(1);
}
