use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn get_input() -> Vec<(String, Vec<u8>)> {
    (0..256)
        .map(|i| {
            (
                format!("dir_{}/file_{i}.bin", i % 16),
                (0..i * 64).map(|b| (b % 251) as u8).collect(),
            )
        })
        .collect()
}

pub mod codec {
    use bunz_archive::{decode, encode, write::ContainerOptions};
    use divan::Bencher;

    #[divan::bench]
    fn encode_container(bencher: Bencher) {
        bencher.with_inputs(super::get_input).bench_refs(|files| {
            divan::black_box(encode(files.iter().map(|(p, c)| (p, c)), ContainerOptions::default()).unwrap());
        });
    }

    #[divan::bench]
    fn decode_container(bencher: Bencher) {
        bencher
            .with_inputs(|| encode(super::get_input(), ContainerOptions::default()).unwrap())
            .bench_refs(|data| {
                divan::black_box(decode(data).unwrap());
            });
    }
}

pub mod archive {
    use bunz_archive::{
        compression::{compress, decompress},
        encode,
        write::ContainerOptions,
        CompressionLevel,
    };
    use divan::Bencher;

    #[divan::bench(args = [1, 6, 9])]
    fn compress_container(bencher: Bencher, level: u32) {
        let container = encode(super::get_input(), ContainerOptions::default()).unwrap();
        bencher.bench_local(move || {
            divan::black_box(compress(&container, CompressionLevel::new(level)).unwrap());
        });
    }

    #[divan::bench(sample_count = 1)]
    fn decompress_container(bencher: Bencher) {
        let container = encode(super::get_input(), ContainerOptions::default()).unwrap();
        let compressed = compress(&container, CompressionLevel::DEFAULT).unwrap();
        bencher.bench_local(move || {
            divan::black_box(decompress(&compressed).unwrap());
        });
    }
}
