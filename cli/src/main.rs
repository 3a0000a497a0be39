//! revpdf CLI - review-feedback export to PDF

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use revpdf::{
    group_records, load_records, Assembler, FontPreset, PdfCanvasFactory, OUTPUT_SUBDIR,
};

#[derive(Parser)]
#[command(name = "revpdf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert a review-feedback export into per-reviewee PDF documents", long_about = None)]
struct Cli {
    /// Input feedback export (CSV)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory (defaults to generated_pdfs beside the input)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Font preset for the generated documents
    #[arg(long, value_enum, default_value = "noto")]
    font: FontChoice,

    /// Directory holding the preset font folders
    #[arg(long, value_name = "DIR", default_value = "fonts")]
    fonts_dir: PathBuf,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FontChoice {
    /// NotoSans (default)
    Noto,
    /// DejaVuSans
    Dejavu,
}

impl FontChoice {
    fn key(self) -> &'static str {
        match self {
            FontChoice::Noto => "noto",
            FontChoice::Dejavu => "dejavu",
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let input = match cli.input {
        Some(path) => path,
        None => match prompt_for_file() {
            Some(path) => path,
            None => {
                println!("No file selected. Exiting...");
                return;
            }
        },
    };

    if !input.exists() {
        eprintln!(
            "{}: file not found: {}",
            "Error".red().bold(),
            input.display()
        );
        std::process::exit(1);
    }

    println!("Selected file: {}", input.display());

    if let Err(e) = run(&input, cli.output.as_deref(), cli.font, &cli.fonts_dir) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Ask for a path on stdin when none was given on the command line.
/// Non-interactive stdin gets no prompt and no document run.
fn prompt_for_file() -> Option<PathBuf> {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return None;
    }

    print!("Feedback export file: ");
    io::stdout().flush().ok()?;

    let mut line = String::new();
    stdin.lock().read_line(&mut line).ok()?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

fn run(
    input: &Path,
    output: Option<&Path>,
    font: FontChoice,
    fonts_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let fonts = FontPreset::by_key(font.key())?.load(fonts_dir)?;

    let output_dir = output.map(Path::to_path_buf).unwrap_or_else(|| {
        input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
            .join(OUTPUT_SUBDIR)
    });
    fs::create_dir_all(&output_dir)?;

    let records = load_records(input)?;
    let groups = group_records(records);
    if groups.is_empty() {
        println!("{}", "No feedback rows found. Nothing to generate.".yellow());
        return Ok(());
    }

    let pb = ProgressBar::new(groups.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let assembler = Assembler::new(PdfCanvasFactory::new(fonts), &output_dir);
    let mut generated = Vec::new();
    for (key, group) in &groups {
        pb.set_message(format!("{} - {}", key.reviewee, key.cycle));
        let path = assembler.generate_document(key, group)?;
        pb.println(format!("Generated: {}", path.display()));
        generated.push(path);
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} document(s) in {}",
        "Generated".green().bold(),
        generated.len(),
        output_dir.display()
    );

    Ok(())
}
