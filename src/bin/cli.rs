use clap::{App, Arg, SubCommand};
use std::sync::Arc;
use vtpool::{
    Codec, Lz4Codec, OpaqueScanner, OpenMode, PassthroughCodec, PoolStore, PresetScanner,
    StoreConfig, READ_EOF,
};

fn main() -> vtpool::Result<()> {
    env_logger::init();

    let matches = App::new("vtpool-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Object pool store inspection tool")
        .subcommand(
            SubCommand::with_name("inspect")
                .about("Load a pool file and print its vitals")
                .arg(
                    Arg::with_name("file")
                        .value_name("FILE")
                        .help("Pool file to load")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("objects")
                        .short("o")
                        .long("objects")
                        .value_name("COUNT")
                        .help("Object count parsed out of band")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("lz4")
                        .long("lz4")
                        .help("Compress regions with the lz4 strategy"),
                ),
        )
        .subcommand(
            SubCommand::with_name("drain")
                .about("Stream a pool file in fixed-size chunks")
                .arg(
                    Arg::with_name("file")
                        .value_name("FILE")
                        .help("Pool file to load")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("chunk")
                        .short("c")
                        .long("chunk")
                        .value_name("BYTES")
                        .help("Chunk size per read (default 8, typical transport block)")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("lz4")
                        .long("lz4")
                        .help("Compress regions with the lz4 strategy"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        ("inspect", Some(sub)) => {
            let file = sub.value_of("file").unwrap();
            let objects = sub
                .value_of("objects")
                .map(|s| s.parse::<u16>().expect("objects must be a number"));
            let mut store = build_store(sub.is_present("lz4"), objects)?;

            let handle = store.load_by_filename(file);
            if handle == vtpool::NO_HANDLE {
                eprintln!("Failed to load pool from {}", file);
                std::process::exit(1);
            }

            let summary = store.summary(handle).expect("handle just registered");
            println!("Pool file: {}", file);
            println!("  Handle:             {}", summary.handle);
            println!("  Size:               {} bytes", summary.size);
            println!("  Objects:            {}", summary.object_count);
            println!("  Codec:              {}", summary.codec);
            println!(
                "  Regions:            {} ({} compressed)",
                summary.region_count, summary.compressed_regions
            );
            store.free(handle);
        }
        ("drain", Some(sub)) => {
            let file = sub.value_of("file").unwrap();
            let chunk_size: usize = sub
                .value_of("chunk")
                .unwrap_or("8")
                .parse()
                .expect("chunk must be a number");
            let mut store = build_store(sub.is_present("lz4"), None)?;

            let handle = store.load_by_filename(file);
            if handle == vtpool::NO_HANDLE {
                eprintln!("Failed to load pool from {}", file);
                std::process::exit(1);
            }
            if !store.open(handle, OpenMode::Stream) {
                eprintln!("Pool has nothing to serve");
                std::process::exit(1);
            }

            let total = store.size(handle) as usize;
            let mut chunk = vec![0u8; chunk_size];
            let mut delivered = 0usize;
            let mut calls = 0usize;
            loop {
                let want = chunk_size.min(total - delivered);
                if want == 0 {
                    break;
                }
                match store.read_exact(handle, &mut chunk[..want]) {
                    READ_EOF => break,
                    n => {
                        delivered += n as usize;
                        calls += 1;
                    }
                }
            }

            println!("Drained {} bytes in {} calls of {} bytes", delivered, calls, chunk_size);
            println!("  Final position: {}", store.pos(handle));
            store.close(handle);
            store.free(handle);
        }
        _ => {
            eprintln!("No subcommand given; try --help");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn build_store(lz4: bool, objects: Option<u16>) -> vtpool::Result<PoolStore> {
    let codec: Arc<dyn Codec> = if lz4 {
        Arc::new(Lz4Codec)
    } else {
        Arc::new(PassthroughCodec)
    };
    match objects {
        Some(count) => PoolStore::with_parts(
            StoreConfig::default(),
            codec,
            Arc::new(PresetScanner::new(count)),
        ),
        None => PoolStore::with_parts(StoreConfig::default(), codec, Arc::new(OpaqueScanner)),
    }
}
