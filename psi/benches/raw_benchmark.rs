//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

use criterion::*;
use psi::prelude::*;
use rand::Rng;
use rand::RngCore;

fn random_elements(n: usize, width: usize) -> TElements {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| {
            let mut buf = vec![0u8; width];
            rng.fill_bytes(&mut buf);
            EncryptedElement::from(buf)
        })
        .collect::<TElements>()
}

/// Client holds half of the server elements plus as many fresh ones
fn client_for(set: &EncryptedSet, n: usize) -> TElements {
    let mut rng = rand::thread_rng();
    let mut client = random_elements(n / 2, 32);
    for _ in 0..(n - n / 2) {
        let i = rng.gen_range(0..set.size());
        client.push(set.elements()[i].clone());
    }
    client
}

fn raw_create(n: usize, c: &mut Criterion) {
    let data = random_elements(n, 32);
    c.bench_function(format!("raw create, size: {}", n).as_str(), move |b| {
        b.iter_batched(|| data.clone(), EncryptedSet::create, BatchSize::SmallInput)
    });
}

fn raw_intersect(n: usize, c: &mut Criterion) {
    let set = EncryptedSet::create(random_elements(n, 32));
    let client = client_for(&set, n);
    c.bench_function(format!("raw intersect, size: {}", n).as_str(), move |b| {
        b.iter(|| set.intersect(&client))
    });
}

fn raw_association(n: usize, c: &mut Criterion) {
    let set = EncryptedSet::create(random_elements(n, 32));
    let client = client_for(&set, n);
    c.bench_function(format!("raw association, size: {}", n).as_str(), move |b| {
        b.iter_batched(
            || client.clone(),
            |mut decrypted| set.association_table(&mut decrypted),
            BatchSize::SmallInput,
        )
    });
}

fn raw_create_x10k(c: &mut Criterion) {
    raw_create(10000, c);
}

fn raw_intersect_x10k(c: &mut Criterion) {
    raw_intersect(10000, c);
}

fn raw_association_x10k(c: &mut Criterion) {
    raw_association(10000, c);
}

criterion_group!(
name = raw;
config = Criterion::default()
        .sample_size(10)
        .nresamples(10);
targets = raw_create_x10k, raw_intersect_x10k, raw_association_x10k
);

criterion_main!(raw);
