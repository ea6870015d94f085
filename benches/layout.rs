// These benchmarks track how layout cost scales with the size of the block tree being
// rendered, the same shape of check the unit-test suite's smaller cases don't cover.

use std::rc::Rc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use blockprint::block::{Block, LineBlock, StackBlock, TextBlock};
use blockprint::Options;

/// Generate a lorem ipsum text with roughly `length` characters, split into words.
fn lorem_ipsum_words(length: usize) -> Vec<String> {
    let mut text = lipsum::lipsum(length / 5);
    text.truncate(length);
    text.split_whitespace().map(str::to_string).collect()
}

/// Build a stack of comma-joined lines, each wrapping a chunk of words — roughly the shape a
/// real caller (e.g. a nested-list printer) would hand to the optimizer.
fn build_tree(word_count: usize, words_per_line: usize) -> Rc<dyn Block> {
    let words = lorem_ipsum_words(word_count * 6);
    let lines: Vec<Rc<dyn Block>> = words
        .chunks(words_per_line)
        .map(|chunk| {
            let elements: Vec<Rc<dyn Block>> = chunk
                .iter()
                .map(|w| Rc::new(TextBlock::new(w.clone())) as Rc<dyn Block>)
                .collect();
            Rc::new(LineBlock::new(elements).unwrap()) as Rc<dyn Block>
        })
        .collect();
    Rc::new(StackBlock::new(lines).unwrap())
}

fn bench_render(c: &mut Criterion) {
    let options = Options::new().with_margin_1(60);
    let mut group = c.benchmark_group("render");
    for &word_count in &[100usize, 200, 400, 800] {
        let tree = build_tree(word_count, 8);
        group.bench_with_input(
            BenchmarkId::from_parameter(word_count),
            &tree,
            |b, tree| b.iter(|| tree.render(&options).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
