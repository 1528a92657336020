use anyhow::Context;
use clap::Parser;
use hanpin::{converter_from_config, join_slots, PinyinConfig, SegmenterKind, Style};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[command(name = "hanpin")]
#[command(about = "Convert Han text to pinyin")]
struct Args {
    /// Text to convert. Reads stdin line by line when omitted.
    text: Vec<String>,

    /// Output style: normal, tone, tone2, initials, first_letter, or a code 0-4
    #[arg(short, long, value_parser = parse_style)]
    style: Option<Style>,

    /// Print every distinct reading of heteronyms
    #[arg(long)]
    heteronym: bool,

    /// Segmentation adapter
    #[arg(long, value_enum)]
    segmenter: Option<SegmenterKind>,

    /// Character dictionary (.json, .txt, .bincode)
    #[arg(long)]
    char_dict: Option<PathBuf>,

    /// Phrase dictionary (.json, .txt, .bincode, .fst)
    #[arg(long)]
    phrase_dict: Option<PathBuf>,

    /// TOML configuration file; command-line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// NFC-normalize input before conversion
    #[arg(long)]
    normalize: bool,

    /// Separator between slots
    #[arg(long, default_value = " ")]
    separator: String,
}

fn parse_style(s: &str) -> Result<Style, String> {
    s.parse()
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

fn build_config(args: &Args) -> anyhow::Result<PinyinConfig> {
    let mut cfg = match &args.config {
        Some(path) => PinyinConfig::load_toml(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PinyinConfig::default(),
    };

    if let Some(style) = args.style {
        cfg.style = style;
    }
    if args.heteronym {
        cfg.heteronym = true;
    }
    if let Some(kind) = args.segmenter {
        cfg.segmenter = kind;
    }
    if let Some(path) = &args.char_dict {
        cfg.base_mut().char_dict = Some(path.clone());
    }
    if let Some(path) = &args.phrase_dict {
        cfg.base_mut().phrase_dict = Some(path.clone());
    }
    if args.normalize {
        cfg.base_mut().normalize_input = true;
    }
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let cfg = build_config(&args)?;

    if cfg.base().char_dict.is_none() {
        tracing::info!("no character dictionary given, using the demo table");
    }
    let converter = converter_from_config(&cfg).context("failed to load dictionaries")?;
    let options = cfg.options();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.text.is_empty() {
        let text = args.text.join(" ");
        let slots = converter.convert(&text, &options);
        writeln!(out, "{}", join_slots(&slots, &args.separator))?;
        return Ok(());
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        let slots = converter.convert(&line, &options);
        writeln!(out, "{}", join_slots(&slots, &args.separator))?;
    }
    Ok(())
}
