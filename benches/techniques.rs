//! Compile and match cost per construction strategy.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput};

use fqdn_policy::{compile_with, CompileOptions, FqdnSelector, Strategy};

const RULES: usize = 500;

fn policy() -> Vec<FqdnSelector> {
    let mut selectors = vec![FqdnSelector::from_pattern("*.testing-domains.aws.baa")];
    for i in 0..RULES {
        if i % 3 == 0 {
            selectors.push(FqdnSelector::from_pattern(format!("*.svc{}.cluster{}.local", i, i % 7)));
        } else {
            selectors.push(FqdnSelector::from_name(format!("api{}.example{}.com", i, i % 11)));
        }
    }
    selectors
}

fn bench_compile(c: &mut Criterion) {
    let selectors = policy();
    let mut group = c.benchmark_group("compile");
    group.throughput(Throughput::Elements(selectors.len() as u64));

    for strategy in Strategy::ALL {
        let options = CompileOptions::new().with_strategy(strategy);
        group.bench_function(BenchmarkId::new("compile", strategy), |b| {
            b.iter(|| compile_with(black_box(&selectors), &options))
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let selectors = policy();
    let mut group = c.benchmark_group("evaluate");
    group.throughput(Throughput::Elements(1));

    let cases = [
        ("match-name", "api1.example1.com"),
        ("match-pattern", "abc.svc3.cluster3.local"),
        ("bad-match-pattern", "nope.nop.nop.nop.bar.hmm.svc3.cluster3.local"),
        ("bad-match-tld", "api1.example1.com.bar1s"),
    ];

    for strategy in Strategy::ALL {
        let options = CompileOptions::new().with_strategy(strategy);
        let Ok(matcher) = compile_with(&selectors, &options) else {
            continue;
        };
        for (case, name) in cases {
            group.bench_function(BenchmarkId::new(case, strategy), |b| {
                b.iter(|| matcher.evaluate(black_box(name)))
            });
        }
    }

    group.finish();
}

fn main() {
    let mut criterion = Criterion::default().configure_from_args();
    bench_compile(&mut criterion);
    bench_evaluate(&mut criterion);
    criterion.final_summary();
}
