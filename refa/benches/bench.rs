use criterion::{Criterion, black_box, criterion_group, criterion_main};
use refa::{Dfa, Nfa};

const PATTERN: &str = "(a|b)*abb(a|b)*";

fn bench_nfa_construction(c: &mut Criterion) {
    c.bench_function("nfa_construction", |b| {
        b.iter(|| black_box(Nfa::from_pattern(black_box(PATTERN)).unwrap()))
    });
}

fn bench_dfa_construction(c: &mut Criterion) {
    c.bench_function("dfa_construction", |b| {
        b.iter(|| {
            let nfa = Nfa::from_pattern(black_box(PATTERN)).unwrap();
            black_box(Dfa::new(nfa))
        })
    });
}

fn bench_minimization(c: &mut Criterion) {
    c.bench_function("dfa_minimization", |b| {
        b.iter(|| {
            let mut dfa = Dfa::new(Nfa::from_pattern(black_box(PATTERN)).unwrap());
            dfa.minimize();
            black_box(dfa)
        })
    });
}

fn bench_dfa_matching(c: &mut Criterion) {
    let mut dfa = Dfa::new(Nfa::from_pattern(PATTERN).unwrap());
    dfa.minimize();
    let input = "abbaabbbababababababababbbaabb";

    c.bench_function("dfa_match", |b| {
        b.iter(|| black_box(dfa.matches(black_box(input))))
    });
}

fn bench_nfa_matching(c: &mut Criterion) {
    let nfa = Nfa::from_pattern(PATTERN).unwrap();
    let input = "abbaabbbabab";

    c.bench_function("nfa_reference_match", |b| {
        b.iter(|| black_box(nfa.matches(black_box(input))))
    });
}

criterion_group!(
    benches,
    bench_nfa_construction,
    bench_dfa_construction,
    bench_minimization,
    bench_dfa_matching,
    bench_nfa_matching,
);

criterion_main!(benches);
