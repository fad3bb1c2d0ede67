// Identity card extraction and verification from the command line

use clap::{Args, Parser, Subcommand};
use log::warn;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use idcheck::models::{DocumentType, VerificationInput};
use idcheck::utils::IdCheckError;
use idcheck::validation::FormatValidator;
use idcheck::{Config, DocumentVerifier, VerificationReport};

#[derive(Parser, Debug)]
#[command(name = "idcheck", version, about = "Extract and verify identity card fields (Aadhaar, PAN)")]
struct Cli {
    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Tesseract languages, e.g. "eng+hin"
    #[arg(long, global = true)]
    ocr_languages: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract fields from a card
    Extract(InputArgs),
    /// Extract fields and compare them with asserted values
    Verify {
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        name: String,
        /// Date of birth, dd/mm/yyyy or yyyy-mm-dd
        #[arg(long)]
        dob: String,
        #[arg(long)]
        gender: String,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Card type: aadhaar or pan
    #[arg(long, short)]
    document: DocumentType,

    /// FILE is already-recognized UTF-8 text, skip OCR
    #[arg(long)]
    text: bool,

    /// Card image (jpg, png), PDF, or text file with --text
    file: PathBuf,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, IdCheckError> {
    let mut config = Config::from_env()?;
    if let Some(languages) = cli.ocr_languages {
        config.ocr_languages = languages;
    }
    let verifier = DocumentVerifier::from_config(&config)?;

    match cli.command {
        Command::Extract(args) => {
            let report = process(&verifier, &args)?;
            print_report(&report, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify {
            input,
            name,
            dob,
            gender,
        } => {
            if !FormatValidator::is_valid_dob(&dob) {
                warn!("Asserted date of birth '{}' is not a valid past date", dob);
            }
            let asserted = VerificationInput {
                name,
                date_of_birth: dob,
                gender,
            };
            let report = DocumentVerifier::verify(process(&verifier, &input)?, &asserted);
            print_report(&report, cli.json)?;

            let matched = report.verdict.as_ref().map_or(false, |v| v.matched);
            Ok(if matched { ExitCode::SUCCESS } else { ExitCode::from(1) })
        }
    }
}

fn process(verifier: &DocumentVerifier, args: &InputArgs) -> Result<VerificationReport, IdCheckError> {
    if args.text {
        let text = fs::read_to_string(&args.file)?;
        Ok(verifier.process_text(text, args.document))
    } else {
        Ok(verifier.process_file(&args.file, args.document))
    }
}

fn print_report(report: &VerificationReport, json: bool) -> Result<(), IdCheckError> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let record = &report.record;
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    println!("\n===============================================");
    println!("      {} EXTRACTION REPORT", record.document_type.to_string().to_uppercase());
    println!("===============================================\n");
    println!("  Recognized: {}", if record.recognized { "YES" } else { "NO" });
    println!("  Number: {}", show(&record.identifier));
    println!("  Name: {}", show(&record.name));
    println!("  Date of Birth: {}", show(&record.date_of_birth));
    println!("  Gender: {}", show(&record.gender));
    if let Some(linked) = record.linked_flag {
        println!("  Aadhaar Linked: {}", if linked { "YES" } else { "NO" });
    }
    println!("  Source: {:?}", record.source);
    if let Some(error) = &record.error {
        println!("  Error: {}", error);
    }

    if let Some(verdict) = &report.verdict {
        let flag = |ok: bool| if ok { "MATCH" } else { "MISMATCH" };
        println!("\nVERIFICATION:");
        println!("  Name: {}", flag(verdict.name_match));
        println!("  Date of Birth: {}", flag(verdict.dob_match));
        println!("  Gender: {}", flag(verdict.gender_match));
        if !verdict.reasons.is_empty() {
            println!("\nISSUES FOUND:");
            for reason in &verdict.reasons {
                println!("  - {}", reason);
            }
        }
        println!("\nResult: {}", if verdict.matched { "VERIFIED" } else { "NOT VERIFIED" });
    }
    Ok(())
}
