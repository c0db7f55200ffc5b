// CrAST: C dialect front end emitting a JSON syntax tree

mod parser;

use std::fs;
use std::path::Path;

use parser::parse::Parser;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        let program_name = args.get(0).map(|s| s.as_str()).unwrap_or("crast");
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <file.c>", program_name);
        std::process::exit(1);
    }

    let source_file = &args[1];

    if !Path::new(source_file).exists() {
        eprintln!("Error: File '{}' not found", source_file);
        std::process::exit(1);
    }

    let source = match fs::read_to_string(source_file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: Failed to read '{}': {}", source_file, e);
            std::process::exit(1);
        }
    };

    let mut parser = Parser::new(&source);
    let program = match parser.parse() {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Parser error: {}", e);
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&program.to_json()) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => {
            eprintln!("Error: Failed to serialize syntax tree: {}", e);
            std::process::exit(1);
        }
    }
}
