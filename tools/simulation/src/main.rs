//! Full-pipeline simulation binary
//!
//! Generates the four synthetic CSV feeds, wires the desk pipeline and
//! drives every feed through it. Inputs land in `data/`, persisted output
//! streams land alongside them.

use simulation::{DataSimulator, Desk, SimulationConfig};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;
use types::errors::DeskError;
use types::refdata::ReferenceData;
use types::risk::BucketedSector;

fn main() -> Result<(), DeskError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let data_dir = Path::new("data");
    std::fs::create_dir_all(data_dir)?;

    let simulator = DataSimulator::new(SimulationConfig::default());
    generate(&simulator, data_dir)?;

    let refdata = ReferenceData::us_treasuries();
    let desk = Desk::build(refdata.clone(), data_dir)?;

    let prices = desk.ingest_prices(open(data_dir, "prices.txt")?)?;
    let trades = desk.ingest_trades(open(data_dir, "trades.txt")?)?;
    let books = desk.ingest_market_data(open(data_dir, "marketdata.txt")?)?;
    let inquiries = desk.ingest_inquiries(open(data_dir, "inquiries.txt")?)?;
    info!(prices, trades, books, inquiries, "all feeds ingested");

    // Front-end / belly / long-end sector report.
    for (name, ids) in [
        ("FrontEnd", &["91282CLY5", "91282CMB4", "91282CMA6"][..]),
        ("Belly", &["91282CLZ2", "91282CLW9"][..]),
        ("LongEnd", &["912810UF3", "912810UE6"][..]),
    ] {
        let products = ids
            .iter()
            .map(|id| refdata.product(id))
            .collect::<Result<Vec<_>, _>>()?;
        let bucketed = desk.bucketed_risk(&BucketedSector::new(name, products));
        info!(sector = name, pv01 = %bucketed.pv01, "bucketed risk");
    }

    info!(
        executions = desk.algo_execution.borrow().executions_emitted(),
        gui_rows = desk.gui.borrow().rows_written(),
        "simulation complete"
    );
    Ok(())
}

fn generate(simulator: &DataSimulator, data_dir: &Path) -> Result<(), DeskError> {
    let mut prices = BufWriter::new(File::create(data_dir.join("prices.txt"))?);
    let mut trades = BufWriter::new(File::create(data_dir.join("trades.txt"))?);
    let mut books = BufWriter::new(File::create(data_dir.join("marketdata.txt"))?);
    let mut inquiries = BufWriter::new(File::create(data_dir.join("inquiries.txt"))?);

    let price_records = simulator.generate_prices(&mut prices)?;
    let trade_records = simulator.generate_trades(&mut trades)?;
    let book_lines = simulator.generate_market_data(&mut books)?;
    let inquiry_records = simulator.generate_inquiries(&mut inquiries)?;

    prices.flush()?;
    trades.flush()?;
    books.flush()?;
    inquiries.flush()?;

    info!(
        price_records,
        trade_records, book_lines, inquiry_records, "feeds generated"
    );
    Ok(())
}

fn open(data_dir: &Path, name: &str) -> Result<BufReader<File>, DeskError> {
    Ok(BufReader::new(File::open(data_dir.join(name))?))
}
