use log::{error, info};
use std::path::PathBuf;
use structopt::StructOpt;
use ufwlog::ingest;
use ufwlog::{FilterConfig, LineParser, RecordFilter};

#[derive(StructOpt, Debug)]
#[structopt(name = "ufwlog")]
struct Opt {
    /// The path to the firewall logs
    #[structopt(short = "f", long = "file", parse(from_os_str))]
    file: PathBuf,

    /// TOML file with filter settings; flags below override it
    #[structopt(short = "c", long = "config", parse(from_os_str))]
    config: Option<PathBuf>,

    /// Year to stamp on parsed dates
    #[structopt(long = "year")]
    year: Option<i32>,

    /// Only show allowed packets
    #[structopt(long = "allow")]
    allow: bool,

    /// Only show blocked packets
    #[structopt(long = "block")]
    block: bool,

    /// Only show packets with an inbound interface
    #[structopt(long = "inbound")]
    inbound: bool,

    /// Only show packets with an outbound interface
    #[structopt(long = "outbound")]
    outbound: bool,

    #[structopt(long = "spt")]
    source_port: Option<u16>,

    #[structopt(long = "src")]
    source_ip: Option<String>,

    #[structopt(long = "dpt")]
    destination_port: Option<u16>,

    #[structopt(long = "dst")]
    destination_ip: Option<String>,
}

impl Opt {
    fn merge_into(&self, mut config: FilterConfig) -> FilterConfig {
        config.filter_allow_only |= self.allow;
        config.filter_block_only |= self.block;
        config.filter_inbound_only |= self.inbound;
        config.filter_outbound_only |= self.outbound;
        if let Some(port) = self.source_port {
            config = config.source_port(port);
        }
        if let Some(ip) = &self.source_ip {
            config = config.source_ip(ip.as_str());
        }
        if let Some(port) = self.destination_port {
            config = config.destination_port(port);
        }
        if let Some(ip) = &self.destination_ip {
            config = config.destination_ip(ip.as_str());
        }
        config
    }
}

fn run(opt: &Opt) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &opt.config {
        Some(path) => FilterConfig::from_file(path)?,
        None => FilterConfig::default(),
    };
    let config = opt.merge_into(config);

    let parser = opt.year.map(LineParser::with_year).unwrap_or_default();
    let ingested = ingest::read_file(&parser, &opt.file)?;
    info!(
        "read {} records from {} ({} skipped)",
        ingested.records.len(),
        opt.file.display(),
        ingested.skipped
    );

    let filter = RecordFilter::new(&ingested.records, &config)?;
    for record in &filter {
        println!("{}", record);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();

    let opt = Opt::from_args();
    if let Err(e) = run(&opt) {
        error!("ufwlog failed with: {}", e);
        std::process::exit(1);
    }
}
