//! Load and lookup throughput of `WordIndex`.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::io::Cursor;

use wordcheck::WordIndex;

fn word_list() -> String {
    use std::fs;
    use std::io::ErrorKind;

    // Prefer the system word list; fall back to generated words.
    match fs::read_to_string("/usr/share/dict/words") {
        Ok(words) => words,
        Err(e) if e.kind() == ErrorKind::NotFound => (0..100_000)
            .map(|_| {
                let len = fastrand::usize(3..12);
                (0..len).map(|_| fastrand::lowercase()).collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Err(e) => panic!("{}", e),
    }
}

fn lookup(c: &mut Criterion) {
    let words = word_list();
    let mut index = WordIndex::new();
    index.load(Cursor::new(words.as_bytes())).unwrap();

    let sample: Vec<String> = words
        .split_whitespace()
        .filter(|_| fastrand::u8(..) < 16)
        .map(|w| w.to_ascii_uppercase())
        .collect();
    let sample_len = sample.len();

    c.bench_function("WordIndex::check hit", |b| {
        b.iter(|| {
            let word = &sample[fastrand::usize(..sample_len)];
            black_box(index.check(black_box(word)))
        })
    });

    c.bench_function("WordIndex::check miss", |b| {
        b.iter(|| black_box(index.check(black_box("qqqzzzxxy"))))
    });

    c.bench_function("WordIndex::load + unload", |b| {
        let mut scratch = WordIndex::new();
        b.iter(|| {
            scratch.load(Cursor::new(words.as_bytes())).unwrap();
            scratch.unload();
        })
    });
}

criterion_group!(benches, lookup);
criterion_main!(benches);
