use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use vtpool::{
    Codec, Lz4Codec, OpaqueScanner, OpenMode, PassthroughCodec, PoolStore, StoreConfig, READ_EOF,
};

fn pool_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 64) as u8).collect()
}

fn drain(store: &mut PoolStore, handle: u8, chunk_size: usize) -> usize {
    let total = store.size(handle) as usize;
    let mut chunk = vec![0u8; chunk_size];
    let mut delivered = 0;
    loop {
        let want = chunk_size.min(total - delivered);
        if want == 0 {
            break;
        }
        match store.read_exact(handle, &mut chunk[..want]) {
            READ_EOF => break,
            n => delivered += n as usize,
        }
    }
    delivered
}

fn benchmark_drain(c: &mut Criterion) {
    let pool_len = 64 * 1024;
    let codecs: [(&str, Arc<dyn Codec>); 2] = [
        ("passthrough", Arc::new(PassthroughCodec)),
        ("lz4", Arc::new(Lz4Codec)),
    ];

    for (name, codec) in codecs {
        let mut group = c.benchmark_group(format!("drain_{}", name));
        group.throughput(Throughput::Bytes(pool_len as u64));

        for chunk_size in [8usize, 64, 1024].iter() {
            group.bench_with_input(
                BenchmarkId::new("chunk", chunk_size),
                chunk_size,
                |b, &chunk_size| {
                    let mut store = PoolStore::with_parts(
                        StoreConfig::default(),
                        Arc::clone(&codec),
                        Arc::new(OpaqueScanner),
                    )
                    .unwrap();
                    let handle = store.load_by_bytes(pool_bytes(pool_len));

                    b.iter(|| {
                        // Reopen per iteration to reset the stream.
                        assert!(store.open(handle, OpenMode::Stream));
                        let delivered = drain(&mut store, handle, chunk_size);
                        assert_eq!(delivered, pool_len);
                    });
                },
            );
        }

        group.finish();
    }
}

fn benchmark_registry_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_churn");

    group.bench_function("load_free_cycle", |b| {
        let mut store = PoolStore::new();
        let bytes = pool_bytes(4096);

        b.iter(|| {
            let handle = store.load_by_bytes(bytes.clone());
            assert_ne!(handle, 0);
            assert!(store.free(handle));
        });
    });

    group.bench_function("fill_the_table", |b| {
        let bytes = pool_bytes(256);

        b.iter(|| {
            let mut store = PoolStore::new();
            for _ in 0..16 {
                assert_ne!(store.load_by_bytes(bytes.clone()), 0);
            }
            assert_eq!(store.load_by_bytes(bytes.clone()), 0);
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_drain, benchmark_registry_churn);
criterion_main!(benches);
