use marcxchange::Record;
use series_extract::SeriesRegistry;
use series_extract::SeriesStream;
use std::io::prelude::*;
use std::{env, fs, io};

struct RunOptions {
    input: Option<String>,
    destination: Destination,
    check: bool,
}

enum Destination {
    Stdout,
    File(String),
}

fn read_options() -> Option<RunOptions> {
    let args: Vec<String> = env::args().collect();
    let mut opts = getopts::Options::new();

    opts.optopt("", "out-file", "Output File", "OUTPUT_FILE");
    opts.optflag("", "check", "Reload the emitted output and log totals");
    opts.optflag("h", "help", "Help");

    let params = match opts.parse(&args[1..]) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error parsing options: {e}");
            return None;
        }
    };

    if params.opt_present("help") {
        print_help();
        return None;
    }

    let destination = match params.opt_str("out-file") {
        Some(filename) => Destination::File(filename),
        None => Destination::Stdout,
    };

    Some(RunOptions {
        input: params.free.first().cloned(),
        destination,
        check: params.opt_present("check"),
    })
}

fn print_help() {
    println!(
        r#"

Synopsis

    marc-to-series --out-file /tmp/series.json records.xml

Reads danMARC2 MarcXchange records (a collection document or a single
record) and emits one JSON object per series relationship, framed as a
comma-terminated stream between an opening and a closing bracket.

Options

    --out-file
        Write data to this file.
        Otherwise, writes to STDOUT.

    --check
        After the run, reload the emitted file and log how many works,
        series, and universes it describes.  Requires --out-file.

    --help Print help message

The input file is given as the sole free argument.  When omitted,
records are read from STDIN.

    "#
    );
}

fn run(ops: &RunOptions) -> Result<(), String> {
    // Where are we spewing bytes?
    let writer: Box<dyn Write> = match &ops.destination {
        Destination::File(fname) => {
            Box::new(fs::File::create(fname).map_err(|e| format!("Cannot create {fname}: {e}"))?)
        }
        Destination::Stdout => Box::new(io::stdout()),
    };

    let records = match &ops.input {
        Some(filename) => Record::from_xml_file(filename)?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("Error reading STDIN: {e}"))?;
            Record::from_xml(&text)
        }
    };

    let mut stream = SeriesStream::begin(writer)?;

    // Strictly one record at a time; nothing is shared across records
    // apart from the bracket framing.
    for record in records {
        stream.write_record(&record?)?;
    }

    let (records_in, objects_out) = stream.finish()?;

    log::info!("Processed {records_in} records, emitted {objects_out} series objects");

    if ops.check {
        check(ops)?;
    }

    Ok(())
}

fn check(ops: &RunOptions) -> Result<(), String> {
    let Destination::File(fname) = &ops.destination else {
        log::warn!("--check requires --out-file; skipping");
        return Ok(());
    };

    let text = fs::read_to_string(fname).map_err(|e| format!("Cannot read {fname}: {e}"))?;
    let registry = SeriesRegistry::from_output(&text)?;

    log::info!(
        "{fname} holds {} works, {} series, {} universes",
        registry.work_count(),
        registry.series_count(),
        registry.universe_count()
    );

    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::init();

    if let Some(options) = read_options() {
        run(&options)
    } else {
        Ok(())
    }
}
