extern crate clap;
extern crate mpeg2ps;
#[macro_use]
extern crate trackable;

use clap::{App, Arg};
use mpeg2ps::pes::{PesPacketDecoder, PesPacketReader, ReadPesPacket};
use mpeg2ps::ps::{PsPacketReader, ReadPsPacket};
use std::io::Write;
use trackable::error::Failure;

fn main() {
    let matches = App::new("parse")
        .arg(
            Arg::with_name("OUTPUT_TYPE")
                .long("output-type")
                .short("o")
                .takes_value(true)
                .possible_values(&["ps-packet", "pes-packet", "fields", "substream"])
                .default_value("pes-packet"),
        )
        .arg(
            Arg::with_name("SUBSTREAM")
                .long("substream")
                .short("s")
                .takes_value(true)
                .help("Sub-stream number to extract (e.g., 128)"),
        )
        .arg(
            Arg::with_name("STRICT")
                .long("strict")
                .help("Validates marker bits"),
        )
        .get_matches();
    let decoder = PesPacketDecoder::new().with_strict_markers(matches.is_present("STRICT"));
    let ps_reader = PsPacketReader::new(std::io::stdin());
    match matches.value_of("OUTPUT_TYPE").unwrap() {
        "ps-packet" => {
            let mut reader = ps_reader;
            while let Some(packet) = track_try_unwrap!(reader.read_ps_packet()) {
                println!("{} {} bytes", packet.stream_id, packet.bytes.len());
            }
        }
        "pes-packet" => {
            let mut reader = PesPacketReader::with_decoder(ps_reader, decoder);
            while let Some(packet) = track_try_unwrap!(reader.read_pes_packet()) {
                let pts = packet.pts().map(|t| t.as_u64());
                let dts = packet.dts().map(|t| t.as_u64());
                let substream = packet.substream.as_ref().map(|s| s.number);
                println!(
                    "{} PTS: {:?}, DTS: {:?}, substream: {:?}",
                    packet.stream_id, pts, dts, substream
                );
            }
        }
        "fields" => {
            let mut reader = PesPacketReader::with_decoder(ps_reader, decoder);
            while let Some(packet) = track_try_unwrap!(reader.read_pes_packet()) {
                for field in &packet.fields {
                    print!("{}", field);
                }
                println!();
            }
        }
        "substream" => {
            let wanted: Option<u8> = matches
                .value_of("SUBSTREAM")
                .map(|s| s.parse().expect("Invalid sub-stream number"));
            let mut reader = PesPacketReader::with_decoder(ps_reader, decoder);
            while let Some(packet) = track_try_unwrap!(reader.read_pes_packet()) {
                let substream = match packet.substream {
                    Some(substream) => substream,
                    None => continue,
                };
                if wanted.map_or(false, |n| n != substream.number) {
                    continue;
                }
                track_try_unwrap!(std::io::stdout()
                    .write_all(&substream.payload)
                    .map_err(Failure::from_error));
            }
        }
        _ => unreachable!(),
    }
}
