use divan::AllocProfiler;
use errstack::{Error, ErrorExt, fields, restore_raw};
use std::io;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    // Run registered benchmarks.
    divan::main();
}

fn native_chain(depth: usize) -> Error {
    let mut error = Error::with_fields("root", fields! { "depth" => 0 });
    for i in 1..depth {
        error = error.wrap_with_fields(i.to_string(), fields! { "depth" => i });
    }
    error
}

#[divan::bench]
fn stack_foreign(bencher: divan::Bencher) {
    let error = io::Error::other("error");
    bencher.bench(|| error.stack());
}

#[divan::bench]
fn json_stack_foreign(bencher: divan::Bencher) {
    let error = io::Error::other("error");
    bencher.bench(|| error.json_stack());
}

#[divan::bench(args = [1, 8, 64])]
fn json_stack_native(bencher: divan::Bencher, depth: usize) {
    let error = native_chain(depth);
    bencher.bench(|| error.json_stack());
}

#[divan::bench(args = [1, 8, 64])]
fn restore_raw_native(bencher: divan::Bencher, depth: usize) {
    let raw = native_chain(depth).json_stack();
    bencher.bench(|| restore_raw(&raw));
}
