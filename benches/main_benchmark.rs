use criterion::{Criterion, criterion_group, criterion_main};
use mkprops::compiler::CompilerMatcher;
use mkprops::parser::{parse_dry_run, tokens};
use mkprops::standard::normalize_standard;
use std::hint::black_box;
use std::path::Path;

const COMPILE_LINE: &str = r#"/usr/bin/gcc -Iinclude -Isrc -DNDEBUG -DVERSION="1.2 beta" -std=gnu11 -O2 -Wall -MMD -MF build/obj.d -c src/obj.c -o build/obj.o"#;

fn synthetic_log(lines: usize) -> Vec<String> {
    let mut log = Vec::with_capacity(lines);
    for i in 0..lines {
        match i % 4 {
            0 => log.push(format!("make[1]: Entering directory '/tmp/mkprops-bench/sub{}'", i)),
            1 => log.push(COMPILE_LINE.replace("obj", &format!("obj{}", i))),
            2 => log.push(format!("ar rcs build/lib{}.a build/obj{}.o", i, i)),
            _ => log.push(format!("make[1]: Leaving directory '/tmp/mkprops-bench/sub{}'", i)),
        }
    }
    log
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_compile_line", |b| {
        b.iter(|| tokens::tokenize(black_box(COMPILE_LINE)))
    });
}

fn bench_compiler_matcher(c: &mut Criterion) {
    let matcher = CompilerMatcher::default();
    c.bench_function("is_compiler", |b| {
        b.iter(|| {
            let _ = matcher.is_compiler(black_box("/usr/bin/gcc"));
            let _ = matcher.is_compiler(black_box("arm-none-eabi-g++-12"));
            let _ = matcher.is_compiler(black_box("ar"));
        })
    });
}

fn bench_parse_log(c: &mut Criterion) {
    let log = synthetic_log(4000);
    let matcher = CompilerMatcher::default();
    // include dirs do not exist, so canonicalization fails fast and is still measured
    c.bench_function("parse_dry_run_4000_lines", |b| {
        b.iter(|| parse_dry_run(black_box(&log), &matcher, Path::new("/tmp/mkprops-bench")))
    });
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_standard", |b| {
        b.iter(|| {
            let _ = normalize_standard(black_box("c++1z"));
            let _ = normalize_standard(black_box("gnu11"));
            let _ = normalize_standard(black_box("iso9899:2011"));
        })
    });
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_compiler_matcher,
    bench_parse_log,
    bench_normalize
);
criterion_main!(benches);
