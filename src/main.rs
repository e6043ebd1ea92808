//! Sheetgen CLI - Command-line interface
//!
//! Commands:
//!   generate - Compile a workbook into a generated app
//!   sample   - Write the reference workbook
//!   schema   - Print JSON schema for a configuration record
//!   version  - Print version

use sheetgen::*;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_CONFIG: &str = "app-config.yaml";
const DEFAULT_OUT_DIR: &str = "generated-app";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "generate" => cmd_generate(&args[2..]),
        "sample" => cmd_sample(&args[2..]),
        "schema" => cmd_schema(&args[2..]),
        "version" | "--version" | "-v" => {
            println!("sheetgen {}", VERSION);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Err("Unknown command".into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"
Sheetgen - sheet-driven app synthesis

USAGE:
    sheetgen <COMMAND> [OPTIONS]

COMMANDS:
    generate [config.yaml]   Compile the workbook into a generated app
    sample [path]            Write the reference workbook to edit
    schema [name]            Print JSON schema for a config record
    version                  Print version

OPTIONS:
    --out <dir>              Output directory for generate (default: {DEFAULT_OUT_DIR})

EXAMPLES:
    sheetgen generate
    sheetgen generate app-config.yaml --out my-app
    sheetgen sample app-config.yaml
    sheetgen schema page
"#
    );
}

fn cmd_generate(args: &[String]) -> Result<()> {
    let config_arg = args
        .iter()
        .position(|a| !a.starts_with('-') && !is_option_value(args, a))
        .map(|i| args[i].as_str())
        .unwrap_or(DEFAULT_CONFIG);
    let out_dir = parse_out_arg(args).unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));

    let config_path = match Workbook::locate(config_arg) {
        Ok(path) => path,
        Err(Error::ConfigMissing(_)) => {
            // Recoverable: hand the operator a workbook to fill in, then
            // stop so they can edit it before retrying.
            fs::write(config_arg, Workbook::sample().to_yaml()?)?;
            println!("✓ No configuration found - wrote sample workbook: {config_arg}");
            println!("  Edit it, then run 'sheetgen generate {config_arg}' again.");
            return Err(Error::ConfigMissing(config_arg.to_string()));
        }
        Err(e) => return Err(e),
    };

    let workbook = Workbook::load(&config_path)?;
    let model = ConfigModel::load(&workbook)?;
    let output = compile(&model)?;

    for warning in &output.warnings {
        eprintln!("⚠ {warning}");
    }

    let written = Assembler::new(&out_dir).write(&output)?;
    println!("✓ {}: {} files written to {}", model.app_name(), written, out_dir.display());
    println!("\nNext steps:");
    println!("  cd {}", out_dir.display());
    println!("  npm install");
    println!("  npm run dev");
    Ok(())
}

fn cmd_sample(args: &[String]) -> Result<()> {
    let path = args
        .iter()
        .find(|a| !a.starts_with('-'))
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG);
    fs::write(path, Workbook::sample().to_yaml()?)?;
    println!("✓ Wrote sample workbook: {path}");
    Ok(())
}

fn cmd_schema(args: &[String]) -> Result<()> {
    let name = args.first().map(|s| s.as_str()).unwrap_or("list");

    match name {
        "list" => {
            println!("Available schemas: global, role, page, column, form-field, action");
            Ok(())
        }
        "global" => print_schema::<GlobalSetting>(),
        "role" => print_schema::<Role>(),
        "page" => print_schema::<Page>(),
        "column" => print_schema::<Column>(),
        "form-field" => print_schema::<FormField>(),
        "action" => print_schema::<Action>(),
        _ => Err(format!("Unknown schema: {}", name).into()),
    }
}

fn print_schema<T: schemars::JsonSchema>() -> Result<()> {
    let schema = schemars::schema_for!(T);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn parse_out_arg(args: &[String]) -> Option<PathBuf> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--out" || arg == "-o" {
            if let Some(path) = args.get(i + 1) {
                return Some(PathBuf::from(path));
            }
        }
    }
    None
}

/// Whether this positional-looking arg is actually the value of --out/-o
fn is_option_value(args: &[String], arg: &String) -> bool {
    args.iter()
        .position(|a| a == arg)
        .and_then(|i| i.checked_sub(1))
        .and_then(|i| args.get(i))
        .is_some_and(|prev| prev == "--out" || prev == "-o")
}
