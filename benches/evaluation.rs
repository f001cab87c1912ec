use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use evalexpr::{build_operator_tree, DefaultNumericTypes};
use fofx_rs::{evaluate_expression, Bindings, Evaluator, Value};
use rand::Rng;
use std::collections::HashMap;

/// Benchmark literal-only expressions
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simple arithmetic Expression Evaluation");

    let expr = "(10 + 20) * 3 / (4 - 1) + 5";
    let evaluator = Evaluator::new(expr).unwrap();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();
    let bindings = Bindings::new();

    group.bench_function("compile_and_evaluate", |b| {
        b.iter(|| {
            Evaluator::new(black_box(expr))
                .unwrap()
                .evaluate(&bindings)
                .unwrap()
        })
    });

    group.bench_function("cached_evaluate", |b| {
        b.iter(|| evaluate_expression(black_box(expr), &bindings).unwrap())
    });

    group.bench_function("precompiled_evaluate", |b| {
        b.iter(|| evaluator.evaluate(black_box(&bindings)).unwrap())
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box((10.0 + 20.0) * 3.0 / (4.0 - 1.0) + 5.0))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("evalexpr_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(expr)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });
}

/// Benchmark a formula re-evaluated with fresh bindings
fn benchmark_variable_bindings(c: &mut Criterion) {
    let mut group = c.benchmark_group("Variable Binding Evaluation");

    let expr = "t*32/88 + 220";
    let evaluator = Evaluator::new(expr).unwrap();
    let meval_fn = expr.parse::<meval::Expr>().unwrap().bind("t").unwrap();

    let mut rng = rand::rng();
    let inputs: Vec<f64> = (0..1000).map(|_| rng.random_range(0.0..1000.0)).collect();

    group.bench_function("precompiled_evaluate", |b| {
        let mut bindings = Bindings::new();
        let mut i = 0;
        b.iter(|| {
            bindings.insert("t".to_string(), Value::Float(inputs[i % inputs.len()]));
            i += 1;
            evaluator.evaluate(black_box(&bindings)).unwrap()
        })
    });

    group.bench_function("evaluate_f64", |b| {
        let mut bindings = HashMap::new();
        let mut i = 0;
        b.iter(|| {
            bindings.insert("t".to_string(), inputs[i % inputs.len()]);
            i += 1;
            evaluator.evaluate_f64(black_box(&bindings)).unwrap()
        })
    });

    group.bench_function("meval_bound", |b| {
        let mut i = 0;
        b.iter(|| {
            i += 1;
            meval_fn(black_box(inputs[i % inputs.len()]))
        })
    });

    group.bench_function("native_rust", |b| {
        let mut i = 0;
        b.iter(|| {
            i += 1;
            let t = black_box(inputs[i % inputs.len()]);
            t * 32.0 / 88.0 + 220.0
        })
    });
}

/// Benchmark namespace function calls
fn benchmark_function_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("Function Call Evaluation");

    let expr = "cos(theta)*r + sqrt(r)";
    let evaluator = Evaluator::new(expr).unwrap();
    let bindings = Bindings::from([
        ("theta".to_string(), Value::Float(0.5)),
        ("r".to_string(), Value::Float(3.4)),
    ]);

    group.bench_function("precompiled_function_call", |b| {
        b.iter(|| evaluator.evaluate(black_box(&bindings)).unwrap())
    });

    group.bench_function("native_rust_function_call", |b| {
        b.iter(|| {
            let (theta, r) = black_box((0.5f64, 3.4f64));
            theta.cos() * r + r.sqrt()
        })
    });
}

/// Benchmark parallel batch evaluation
fn benchmark_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch Evaluation");

    let evaluator = Evaluator::new("t*32/88 + 220").unwrap();
    let mut rng = rand::rng();

    for size in [10usize, 1_000, 10_000] {
        let batch: Vec<Bindings> = (0..size)
            .map(|_| Bindings::from([("t".to_string(), Value::Float(rng.random_range(0.0..1000.0)))]))
            .collect();

        group.bench_with_input(BenchmarkId::new("evaluate_batch", size), &batch, |b, batch| {
            b.iter(|| evaluator.evaluate_batch(black_box(batch)))
        });

        group.bench_with_input(BenchmarkId::new("sequential", size), &batch, |b, batch| {
            b.iter(|| {
                batch
                    .iter()
                    .map(|bindings| evaluator.evaluate(bindings))
                    .collect::<Vec<_>>()
            })
        });
    }
}

criterion_group!(
    benches,
    benchmark_simple_arithmetic,
    benchmark_variable_bindings,
    benchmark_function_calls,
    benchmark_batch,
);
criterion_main!(benches);
