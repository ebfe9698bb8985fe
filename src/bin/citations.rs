//! CLI binary: citation metrics for an INSPIRE author.
//!
//! Usage: citations --bai E.Franzin.1 --collection all --latest 5

#[cfg(feature = "cli")]
mod cli {
    use chrono::Datelike;
    use clap::Parser;
    use inspire_metrics::profile::{download_profile, load_profile};
    use inspire_metrics::{
        analyze, Analysis, CitationTotals, Collection, Filters, IndexPair, InspireClient,
        ProfileCache, Report, YearWindow,
    };
    use indicatif::{ProgressBar, ProgressStyle};
    use tracing::{warn, Level};
    use tracing_subscriber::{fmt, EnvFilter};

    #[derive(Parser)]
    #[command(
        name = "citations",
        about = "Citation counts and author-level metrics from an INSPIRE-HEP profile",
        version
    )]
    struct Cli {
        /// INSPIRE author identifier (BAI), e.g. E.Franzin.1
        #[arg(short, long)]
        bai: String,

        /// Results for a given year, e.g. 2020
        #[arg(short, long, conflicts_with = "latest")]
        year: Option<i32>,

        /// Results for the latest given years, e.g. 5
        #[arg(short, long)]
        latest: Option<u32>,

        /// Collection: all, article, book, bookchapter, conferencepaper,
        /// introductory, lectures, note, proceedings, published, report,
        /// review, thesis
        #[arg(short, long, default_value = "article")]
        collection: Collection,

        /// Results with a given number of authors or less, e.g. 10
        #[arg(short, long)]
        authors: Option<u32>,

        /// List the items in chronological order
        #[arg(short, long)]
        reversed: bool,

        /// Download the profile again even if a cached copy exists
        #[arg(long)]
        refresh: bool,

        /// Output format
        #[arg(long, default_value = "table")]
        output: OutputFormat,

        /// Enable debug logging
        #[arg(short, long)]
        debug: bool,
    }

    #[derive(Clone, Copy, clap::ValueEnum)]
    enum OutputFormat {
        Table,
        Json,
    }

    impl Cli {
        fn filters(&self) -> Filters {
            let window = match (self.year, self.latest) {
                (Some(year), _) => Some(YearWindow::Single(year)),
                (None, Some(n)) => Some(YearWindow::Latest(n)),
                (None, None) => None,
            };
            Filters {
                collection: self.collection,
                window,
                max_authors: self.authors,
                chronological: self.reversed,
            }
        }
    }

    fn init_logging(debug: bool) {
        let level = if debug { Level::DEBUG } else { Level::WARN };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    fn ask_update(saved_on: chrono::NaiveDate) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(format!(
                "There is an old database with date {}; do you want to update it?",
                saved_on.format("%B %d, %Y")
            ))
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Update prompt unavailable, keeping the cached profile");
                false
            })
    }

    fn download_progress_bar(pages: u32) -> ProgressBar {
        let pb = ProgressBar::new(u64::from(pages));
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Downloading data");
        pb
    }

    fn print_records_table(report: &Report) {
        use comfy_table::{ContentArrangement, Table};

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Year", "Title", "Citations", "Excl. self"]);

        for record in &report.records {
            let mut title = record.title.clone();
            if record.refereed {
                title.push('*');
            }
            table.add_row(vec![
                record.publication_or_earliest_date.to_string(),
                title,
                record.citation_count.to_string(),
                record.citation_count_without_self_citations.to_string(),
            ]);
        }

        println!("{table}");
    }

    fn print_totals(totals: &CitationTotals, label: &str) {
        println!(
            "Total number of citations: {}; Excluding self cites: {}{}",
            totals.with_self, totals.without_self, label
        );
    }

    fn count(pair: &IndexPair<u32>) -> (String, String) {
        (pair.with_self.to_string(), pair.without_self.to_string())
    }

    fn ratio(pair: &IndexPair<f64>) -> (String, String) {
        (format!("{:.2}", pair.with_self), format!("{:.2}", pair.without_self))
    }

    fn print_report(report: &Report) {
        use comfy_table::{ContentArrangement, Table};

        print_records_table(report);

        let total = report.records.len();
        println!(
            "\nNumber of {}: {}, published*: {}, citeable: {}",
            report.filters.collection.title(),
            total,
            report.published_count,
            report.citeable_count
        );
        print_totals(&report.totals, "");
        if total != report.citeable_count {
            print_totals(&report.citeable_totals, " (Citeable only)");
        }
        if report.published_count > 0 {
            print_totals(&report.published_totals, " (Published only)");
        }

        if let Some(indices) = &report.indices {
            let heading = match report.filters.window {
                Some(YearWindow::Latest(n)) => format!("--Bibliometrics (last {} years)--", n),
                _ => "--Bibliometrics--".to_string(),
            };
            println!("\n{}", heading);
            match report.filters.window {
                Some(YearWindow::Single(year)) => println!(
                    "Number of publications: {}, citeable: {}, year: {}",
                    report.published_count, report.citeable_count, year
                ),
                _ => println!(
                    "Number of publications: {}, citeable: {}, active years: {} ({}--{})",
                    report.published_count,
                    report.citeable_count,
                    report.years.span,
                    report.years.first,
                    report.years.last
                ),
            }
            if let Some(n) = report.filters.max_authors {
                println!("Max number of authors: {}", n);
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Index", "Value", "Excluding self cites"]);
            let rows = [
                ("h-index", count(&indices.h_index)),
                ("h-frac", ratio(&indices.h_frac)),
                ("i10-index", count(&indices.i10_index)),
                ("g-index", count(&indices.g_index)),
                ("m-index", ratio(&indices.m_index)),
                ("o-index", ratio(&indices.o_index)),
                ("L-index", ratio(&indices.l_index)),
            ];
            for (name, (with_self, without_self)) in rows {
                table.add_row(vec![name.to_string(), with_self, without_self]);
            }
            println!("{table}");
        }

        if let Some(breakdown) = &report.breakdown {
            println!("\n{}", breakdown);
        }
    }

    pub async fn run() -> inspire_metrics::error::Result<()> {
        let cli = Cli::parse();
        init_logging(cli.debug);

        let client = InspireClient::from_env()?;
        let cache = ProfileCache::from_env()?;
        // Created on the first page only, so a cache hit draws nothing.
        let mut bar: Option<ProgressBar> = None;
        let mut on_page = |done: u32, pages: u32| {
            let pb = bar.get_or_insert_with(|| download_progress_bar(pages));
            pb.set_length(u64::from(pages));
            pb.set_position(u64::from(done));
        };
        let records = if cli.refresh {
            download_profile(&client, &cache, &cli.bai, &mut on_page).await
        } else {
            load_profile(&client, &cache, &cli.bai, ask_update, &mut on_page).await
        };
        if let Some(pb) = bar {
            pb.finish_and_clear();
        }
        let records = records?;

        let current_year = chrono::Local::now().year();
        let analysis = analyze(&records, &cli.filters(), current_year)?;

        match cli.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
            OutputFormat::Table => match &analysis {
                Analysis::Empty { warning } => println!("{}", warning),
                Analysis::Report(report) => print_report(report),
            },
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("This binary requires the 'cli' feature. Build with: cargo build --features cli");
    std::process::exit(1);
}
