//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

use clap::App;
use clap::Arg;
use log::info;

pub mod gen {
    use rand::prelude::SliceRandom;
    use rand::thread_rng;
    use rand::RngCore;
    use rayon::iter::IntoParallelIterator;
    use rayon::iter::ParallelIterator;

    /// Pre-encrypted inputs for both sides of the protocol
    pub struct Data {
        pub server: Vec<Vec<u8>>,
        pub client: Vec<Vec<u8>>,
    }

    /// Random elements standing in for encryption oracle outputs
    ///
    /// Both sides get `own_size` private elements plus the `intersection`
    /// shared ones. The first `duplicates` shared elements appear twice on
    /// each side so association tables show fan-out.
    pub fn random_data(
        server_size: usize,
        client_size: usize,
        intersection_size: usize,
        duplicates: usize,
        width: usize,
    ) -> Data {
        let intersection = par_random_elements(intersection_size, width);
        let repeated = &intersection[..duplicates.min(intersection.len())];
        let mut rng = thread_rng();

        let mut server = par_random_elements(server_size, width);
        server.extend_from_slice(&intersection);
        server.extend_from_slice(repeated);
        server.shuffle(&mut rng);

        let mut client = par_random_elements(client_size, width);
        client.extend_from_slice(&intersection);
        client.extend_from_slice(repeated);
        client.shuffle(&mut rng);

        Data { server, client }
    }

    pub fn par_random_elements(size: usize, width: usize) -> Vec<Vec<u8>> {
        (0..size)
            .into_par_iter()
            .map(|_| {
                let mut buf = vec![0u8; width];
                thread_rng().fill_bytes(&mut buf);
                buf
            })
            .collect::<Vec<Vec<u8>>>()
    }

    pub fn write_to_file(source: &[Vec<u8>], path: &str) -> Result<(), String> {
        use indicatif::ProgressBar;

        let mut wr = csv::WriterBuilder::new()
            .buffer_capacity(1024)
            .from_path(path)
            .map_err(|e| e.to_string())?;
        let progress_bar = ProgressBar::new(source.len() as u64);
        for (i, element) in source.iter().enumerate() {
            wr.write_record(&[hex::encode_upper(element)])
                .map_err(|e| e.to_string())?;
            if (i + 1) % 100 == 0 {
                progress_bar.inc(100);
            }
        }
        wr.flush().map_err(|e| e.to_string())?;
        progress_bar.finish();
        Ok(())
    }
}

fn parse_arg(matches: &clap::ArgMatches, name: &str) -> usize {
    matches
        .value_of(name)
        .unwrap_or("0")
        .parse::<usize>()
        .unwrap_or_else(|_| panic!("{} param should be a number", name))
}

fn main() {
    env_logger::init();

    let matches = App::new("Raw PSI data generator")
        .version("0.1")
        .about("Generates random pre-encrypted elements for both parties")
        .arg(
            Arg::with_name("dir")
                .short("d")
                .long("dir")
                .value_name("DIR")
                .help("output dir")
                .takes_value(true)
                .default_value("./"),
        )
        .arg(
            Arg::with_name("size")
                .short("n")
                .long("size")
                .value_name("SIZE")
                .help("private elements per party")
                .takes_value(true)
                .default_value("10"),
        )
        .arg(
            Arg::with_name("intersection")
                .short("i")
                .long("intersection")
                .value_name("INTERSECTION")
                .help("elements shared by both parties")
                .takes_value(true)
                .default_value("5"),
        )
        .arg(
            Arg::with_name("duplicates")
                .long("duplicates")
                .value_name("DUPLICATES")
                .help("shared elements repeated on both sides")
                .takes_value(true)
                .default_value("0"),
        )
        .arg(
            Arg::with_name("width")
                .short("w")
                .long("width")
                .value_name("BYTES")
                .help("element width in bytes")
                .takes_value(true)
                .default_value("32"),
        )
        .get_matches();

    let size = parse_arg(&matches, "size");
    let intersection = parse_arg(&matches, "intersection");
    let duplicates = parse_arg(&matches, "duplicates");
    let width = parse_arg(&matches, "width");
    let dir = matches.value_of("dir").unwrap_or("./");

    let fn_server = format!("{}/server_size_{}_int_{}.hex", dir, size, intersection);
    let fn_client = format!("{}/client_size_{}_int_{}.hex", dir, size, intersection);

    info!("Generating {} private elements per party", size);
    info!("Server output: {}", fn_server);
    info!("Client output: {}", fn_client);

    let data = gen::random_data(size, size, intersection, duplicates, width);
    info!("Data generation done, writing to files");
    gen::write_to_file(&data.server, &fn_server).unwrap();
    info!("File {} finished", fn_server);

    gen::write_to_file(&data.client, &fn_client).unwrap();
    info!("File {} finished", fn_client);

    info!("Bye!");
}
