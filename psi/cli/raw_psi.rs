//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

#[macro_use]
extern crate log;
extern crate clap;

use clap::{App, Arg, ArgGroup};

use common::files;
use common::timer;
use psi::prelude::*;
use psi::raw::traits::{process_client_elements, IntersectionOutput};

fn load_elements(path: &str) -> Result<TElements, Box<dyn std::error::Error>> {
    let t = timer::Timer::new_silent("load");
    let elements = files::read_hex_lines(path)?
        .into_iter()
        .map(EncryptedElement::from)
        .collect::<TElements>();
    info!(
        "Loaded {} elements from {} in {:.5} sec",
        elements.len(),
        path,
        t.elapsed_secs()
    );
    Ok(elements)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let matches = App::new("Raw PSI")
        .version("0.1")
        .about("Matches pre-encrypted client elements against a sorted server set")
        .args(&[
            Arg::with_name("server")
                .long("server")
                .short("s")
                .takes_value(true)
                .required(true)
                .help("Path to server encrypted elements, one hex value per line"),
            Arg::with_name("client")
                .long("client")
                .short("c")
                .takes_value(true)
                .required(true)
                .help(
                    "Path to client elements, one hex value per line: \
                     encrypted for intersect/size, decrypted for associate",
                ),
            Arg::with_name("mode")
                .long("mode")
                .short("m")
                .takes_value(true)
                .possible_values(&["intersect", "size", "associate"])
                .default_value("intersect")
                .help("What the client learns"),
            Arg::with_name("output")
                .long("output")
                .short("o")
                .takes_value(true)
                .help("Path to output CSV file"),
            Arg::with_name("stdout")
                .long("stdout")
                .short("u")
                .takes_value(false)
                .help("Prints the output to stdout rather than file"),
            Arg::with_name("stdout-limit")
                .long("stdout-limit")
                .takes_value(true)
                .default_value("100")
                .help("Maximum number of rows printed to stdout"),
            Arg::with_name("original-order")
                .long("original-order")
                .takes_value(false)
                .help("Reports server positions of the association table in server input order"),
        ])
        .groups(&[ArgGroup::with_name("out")
            .args(&["output", "stdout"])
            .required(true)])
        .get_matches();

    let server_path = matches.value_of("server").unwrap_or_default();
    let client_path = matches.value_of("client").unwrap_or_default();
    let mode = matches.value_of("mode").unwrap_or("intersect");
    let output_path = matches.value_of("output");
    let original_order = matches.is_present("original-order");
    let stdout_limit = matches
        .value_of("stdout-limit")
        .unwrap_or("100")
        .parse::<usize>()?;

    // server side
    let (server_set, sorting_permutation) =
        EncryptedSet::create_with_permutation(load_elements(server_path)?);
    let setup = server_set.to_envelope().to_bytes()?;
    info!("ServerSetup message: {} bytes", setup.len());

    // client side
    let received = EncryptedSet::from_envelope(ServerSetup::from_bytes(&setup)?)?;
    let mut client = load_elements(client_path)?;

    let columns = match mode {
        "associate" => {
            let mut table = received.association_table(&mut client);
            if original_order {
                table = table.to_original_indices(&sorting_permutation)?;
            }
            info!("Association table size: {}", table.len());
            let (decrypted, encrypted) = table.into_parts();
            vec![decrypted, encrypted]
        }
        _ => match process_client_elements(&received, &client, mode == "intersect") {
            IntersectionOutput::Indices(indices) => {
                info!("Intersection size: {}", indices.len());
                vec![indices]
            }
            IntersectionOutput::Size(size) => {
                info!("Intersection size: {}", size);
                vec![vec![size]]
            }
        },
    };

    match output_path {
        Some(path) => files::write_indices_to_csv(&columns, path)?,
        None => files::write_indices_to_stdout(&columns, stdout_limit)?,
    }
    info!("Bye!");
    Ok(())
}
