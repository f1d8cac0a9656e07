use clap::Parser;
use log::info;

use domain_bitset::{Domain, DomainBitSet, DomainSet, Strategy};

const PLANETS: [&str; 8] = ["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"];

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Planets to exclude from the full set.
    #[arg(value_name = "PLANET", default_value = "Earth")]
    exclude: Vec<String>,

    /// Force the general strategy even for small domains.
    #[clap(long)]
    general: bool,

    /// Number of extra integer elements to append to the domain.
    #[clap(long, value_name = "INT", default_value = "0")]
    extra: usize,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let elements = PLANETS
        .iter()
        .map(|name| name.to_string())
        .chain((0..args.extra).map(|i| format!("Moon-{}", i)));
    let domain = Domain::shared(elements)?;
    println!("domain of {} elements = {:?}", domain.len(), domain);

    let strategy = if args.general { Strategy::General } else { Strategy::Auto };
    let all = DomainSet::with_strategy(domain.clone(), strategy)?.complement();
    info!("Using {:?} strategy", all.strategy());

    let rest = all.minus(&args.exclude)?;
    println!("rest = {}", rest);
    match rest.to_word() {
        Ok(word) => println!("word   = {:#b}", word),
        Err(e) => println!("word   = <{}>", e),
    }
    println!("bigint = {:#x}", rest.to_big_int());
    println!("bits   = {:?}", rest.to_bit_vec());

    let lengths = DomainSet::of(1..=8usize)?;
    let named = rest.semijoin(&lengths, |planet, len| planet.len() == *len);
    println!("planets with short names = {}", named);
    println!("(planet, length) pairs = {}", rest.cross(&lengths).len());

    for pair in rest.zip_with_position() {
        println!("  {}", pair);
    }

    let time_total = time_total.elapsed();
    println!("Total time: {:.3} s", time_total.as_secs_f64());

    Ok(())
}
