use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{value_parser, Arg, Command};
use log::warn;
use serialport::{
    DataBits as SerialDataBits, FlowControl as SerialFlowControl, Parity as SerialParity,
    StopBits as SerialStopBits,
};

use gnss_nmea::{
    write_sentence, CancelToken, DecoderRegistry, Diagnostic, FramingConfig, NavEvent,
    NmeaPipeline, SerialPump,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = Command::new("gnss-nmea CLI example program")
        .author(clap::crate_authors!())
        .about("Streams NMEA sentences from a serial GNSS receiver and prints decoded results")
        .arg_required_else_help(true)
        .arg(
            Arg::new("port")
                .value_name("port")
                .short('p')
                .long("port")
                .required(true)
                .help("Serial port to open"),
        )
        .arg(
            Arg::new("baud")
                .value_name("baud")
                .short('s')
                .long("baud")
                .required(false)
                .default_value("9600")
                .value_parser(value_parser!(u32))
                .help("Baud rate of the port to open"),
        )
        .arg(
            Arg::new("stop-bits")
                .long("stop-bits")
                .help("Number of stop bits to use for open port")
                .required(false)
                .value_parser(["1", "2"])
                .default_value("1"),
        )
        .arg(
            Arg::new("data-bits")
                .long("data-bits")
                .help("Number of data bits to use for open port")
                .required(false)
                .value_parser(["7", "8"])
                .default_value("8"),
        )
        .arg(
            Arg::new("parity")
                .long("parity")
                .help("Parity to use for open port")
                .required(false)
                .value_parser(["even", "odd"]),
        )
        .arg(
            Arg::new("startup-command")
                .long("startup-command")
                .required(false)
                .help(
                    "Configuration sentence body to send once at startup, \
without '$' or checksum (e.g. PMTK314,0,1,1,1,1,5,0,0,0,0,0,0,0,0,0,0,0,0,0)",
                ),
        )
        .get_matches();

    let port_name = matches
        .get_one::<String>("port")
        .expect("Expected required 'port' cli argument");
    let baud = matches.get_one::<u32>("baud").cloned().unwrap_or(9600);
    let stop_bits = match matches.get_one::<String>("stop-bits").map(|s| s.as_str()) {
        Some("2") => SerialStopBits::Two,
        _ => SerialStopBits::One,
    };
    let data_bits = match matches.get_one::<String>("data-bits").map(|s| s.as_str()) {
        Some("7") => SerialDataBits::Seven,
        _ => SerialDataBits::Eight,
    };
    let parity = match matches.get_one::<String>("parity").map(|s| s.as_str()) {
        Some("odd") => SerialParity::Odd,
        Some("even") => SerialParity::Even,
        _ => SerialParity::None,
    };

    let mut port = serialport::new(port_name, baud)
        .stop_bits(stop_bits)
        .data_bits(data_bits)
        .parity(parity)
        .flow_control(SerialFlowControl::None)
        .timeout(Duration::from_millis(100))
        .open()
        .with_context(|| format!("failed to open {}", port_name))?;

    if let Some(body) = matches.get_one::<String>("startup-command") {
        println!("Sending startup command '{}' ...", body);
        write_sentence(&mut port, body).context("failed to send startup command")?;
    }

    let registry = Arc::new(DecoderRegistry::with_standard_decoders());
    let pipeline = NmeaPipeline::new(FramingConfig::nmea(), registry);
    let token = CancelToken::new();
    let mut pump = SerialPump::new(port, pipeline, token.clone());

    let worker = std::thread::spawn(move || pump.run(&mut print_event));

    println!("Listening on {}; press Enter to stop.", port_name);
    let _ = std::io::stdin().lock().read_line(&mut String::new());
    token.cancel();

    worker
        .join()
        .expect("pump thread panicked")
        .context("transport error")?;
    Ok(())
}

fn print_event(event: NavEvent) {
    match event {
        NavEvent::Position(fix) => {
            println!("{}", fix);
        },
        NavEvent::ActiveSatellites(set) => {
            println!(
                "{}: {} active satellites, pdop {:?}",
                set.talker,
                set.prns.len(),
                set.pdop
            );
        },
        NavEvent::Course(cog) => {
            println!(
                "{}: course {:?} deg, speed {:?} kn",
                cog.talker, cog.course_true, cog.speed_knots
            );
        },
        NavEvent::SatellitesInView(siv) => {
            println!(
                "{}: {} satellites in view ({}/{})",
                siv.talker, siv.satellites_in_view, siv.sentence_index, siv.total_sentences
            );
        },
        NavEvent::Diagnostic(diagnostic) => match diagnostic {
            Diagnostic::FramingOverflow { dropped } => {
                warn!("framing overflow, {} bytes lost", dropped);
            },
            Diagnostic::RejectedSentence { raw, reason } => {
                warn!("rejected sentence ({}): {}", reason, raw.trim_end());
            },
            Diagnostic::DecodeFailure { raw, reason } => {
                warn!("decode failure ({}): {}", reason, raw.trim_end());
            },
        },
    }
}
