//! Basic usage example of the vtpool object pool store

use std::sync::Arc;

use vtpool::{Lz4Codec, OpenMode, PoolStore, PresetScanner, Result, StoreConfig, READ_EOF};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    println!("vtpool Object Pool Store Example");
    println!("================================");

    // A store compressing with lz4; the scanner replays an object count
    // the display protocol parsed elsewhere.
    let mut store = PoolStore::with_parts(
        StoreConfig::default(),
        Arc::new(Lz4Codec),
        Arc::new(PresetScanner::new(47)),
    )?;

    // A synthetic pool: repetitive enough that lz4 earns its keep.
    let pool: Vec<u8> = (0..25_868u32).map(|i| (i % 64) as u8).collect();
    println!("\nLoading a {} byte pool...", pool.len());

    let handle = store.load_by_bytes(pool.clone());
    assert_ne!(handle, vtpool::NO_HANDLE);

    let summary = store.summary(handle).unwrap();
    println!("Pool registered!");
    println!("  Handle:  {}", summary.handle);
    println!("  Size:    {} bytes", summary.size);
    println!("  Objects: {}", summary.object_count);
    println!("  Codec:   {}", summary.codec);

    // Open and drain in transport-sized blocks.
    assert!(store.open(handle, OpenMode::Stream));
    println!("\nDraining in 8 byte chunks...");

    let total = store.size(handle) as usize;
    let mut out = Vec::with_capacity(total);
    let mut chunk = [0u8; 8];
    loop {
        let want = chunk.len().min(total - out.len());
        if want == 0 {
            break;
        }
        match store.read_exact(handle, &mut chunk[..want]) {
            READ_EOF => break,
            n => out.extend_from_slice(&chunk[..n as usize]),
        }
    }

    println!("Delivered {} bytes, position {}", out.len(), store.pos(handle));
    assert_eq!(out, pool);

    // Rewind and read the first block again.
    store.seek_to_begin(handle);
    let mut first = [0u8; 8];
    let n = store.read_exact(handle, &mut first);
    println!("After rewind, first block ({} bytes): {:?}", n, &first);

    // Tear down.
    store.close(handle);
    store.free(handle);
    println!("\nPool closed and freed; {} pools resident", store.pool_count());

    Ok(())
}
