use std::path::PathBuf;

use clap::Parser;
use log::{debug, warn};
use sortgtf::{
    commands::{sortgtf_sort, SortOptions},
    io::FeatureFilter,
    GtfError,
};

const INFO: &str = "\
sortgtf: sort a GTF/GFF annotation file by sequence name, gene ID, transcript ID, start, and end
usage: sortgtf [--help] [options] <input> <output>

Only 'exon' records are sorted unless --all-features is given. Records without a
gene_id or transcript_id attribute, or with non-integer start/end coordinates, abort
the run; no output is written in that case.
";

#[derive(Parser)]
#[clap(name = "sortgtf")]
#[clap(about = INFO)]
#[command(version)]
struct Cli {
    /// increase logging verbosity (-d for debug, -dd for trace); RUST_LOG overrides this
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    /// an input GTF/GFF file (plaintext or gzip-compressed)
    #[arg(required = true)]
    input: PathBuf,

    /// the sorted output file (gzip-compressed if it ends in .gz)
    #[arg(required = true)]
    output: PathBuf,

    /// sort records of every feature type, not just 'exon' records (every record
    /// then needs a gene_id and a transcript_id)
    #[arg(long)]
    all_features: bool,

    /// only keep records on these sequences (comma-separated)
    #[arg(long, value_delimiter = ',')]
    seqnames: Option<Vec<String>>,

    /// drop records on these sequences (comma-separated); takes priority over --seqnames
    #[arg(long, value_delimiter = ',')]
    exclude_seqnames: Option<Vec<String>>,

    /// do not copy the input's leading comment lines to the output
    #[arg(long)]
    no_header: bool,
}

fn init_logging(debug: u8) {
    let level = match debug {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run() -> Result<(), GtfError> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let options = SortOptions {
        features: if cli.all_features {
            FeatureFilter::All
        } else {
            FeatureFilter::Exon
        },
        retain_seqnames: cli.seqnames,
        exclude_seqnames: cli.exclude_seqnames,
        keep_header: !cli.no_header,
    };
    debug!("{:?}", options);

    let output = sortgtf_sort(&cli.input, Some(&cli.output), &options)?;
    for issue in output.report().issues() {
        warn!("{}", issue);
    }
    Ok(())
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
