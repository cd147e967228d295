use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use filter_compiler::lexer::Lexer;
use filter_compiler::{parse_filter, FieldMapping, Parser, QueryCompiler};
use std::hint::black_box;

const CASES: [(&str, &str); 4] = [
    ("simple", "timestamp < 1"),
    ("medium", "timestamp > 1 and CHANNEL_1 <= 1 or shotnum is not null"),
    (
        "complex",
        "not (shotnum >= 3.5 or activeArea = 'A1') and (CHANNEL_1 != CHANNEL_2 or CHANNEL_3 is null) and timestamp < 1700000000",
    ),
    (
        "deep_nesting",
        "((((a = 1 or b = 2) and c = 3) or not d = 4) and (e is null or (f != \"x\" and g > -1.5)))",
    ),
];

// 基准测试：词法分析性能
fn benchmark_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_performance");

    for (name, input) in CASES {
        group.bench_with_input(BenchmarkId::new("tokenize", name), &input, |b, &input| {
            b.iter(|| {
                let tokens: Vec<_> = Lexer::new(black_box(input)).collect();
                black_box(tokens)
            })
        });
    }

    group.finish();
}

// 基准测试：语法分析性能
fn benchmark_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_performance");

    for (name, input) in CASES {
        let tokens: Vec<_> = Lexer::new(input).collect();

        group.bench_with_input(BenchmarkId::new("parse", name), &tokens, |b, tokens| {
            b.iter(|| match Parser::new(black_box(tokens)).parse() {
                Ok(condition) => black_box(condition),
                Err(e) => panic!("解析失败: {}", e),
            })
        });
    }

    group.finish();
}

// 基准测试：文档渲染性能
fn benchmark_compiler(c: &mut Criterion) {
    let compiler = QueryCompiler::new(FieldMapping::default());
    let mut group = c.benchmark_group("compiler_performance");

    for (name, input) in CASES {
        let tokens: Vec<_> = Lexer::new(input).collect();
        let condition = Parser::new(&tokens).parse().expect("解析应该成功");

        group.bench_with_input(BenchmarkId::new("compile", name), &condition, |b, condition| {
            b.iter(|| black_box(compiler.compile(black_box(condition))))
        });
    }

    group.finish();
}

// 基准测试：完整的端到端处理
fn benchmark_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end_performance");

    for (name, input) in CASES {
        group.bench_with_input(BenchmarkId::new("full_pipeline", name), &input, |b, &input| {
            b.iter(|| {
                let tokens: Vec<_> = Lexer::new(black_box(input)).collect();
                let filter = parse_filter(&tokens).expect("编译应该成功");
                black_box(filter)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_lexer,
    benchmark_parser,
    benchmark_compiler,
    benchmark_end_to_end
);
criterion_main!(benches);
