//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::sync::Arc;
use std::thread;

use common::permutations;
use psi::prelude::*;
use rand::seq::SliceRandom;
use rand::thread_rng;
use rand::Rng;
use sha2::{Digest, Sha512};

const NUM_TEST_ITERATIONS: usize = 50;

/// Deterministic keyed map standing in for the external encryption oracle
fn oracle(key: &[u8], item: &str) -> EncryptedElement {
    let mut hasher = Sha512::new();
    hasher.update(key);
    hasher.update(item.as_bytes());
    EncryptedElement::from(hasher.finalize().to_vec())
}

fn encrypt_all(key: &[u8], items: &[String]) -> TElements {
    items.iter().map(|i| oracle(key, i)).collect::<TElements>()
}

/// Random items over a small alphabet so duplicates are frequent
fn random_items(n: usize, alphabet: usize) -> Vec<String> {
    let mut rng = thread_rng();
    (0..n)
        .map(|_| format!("item-{}", rng.gen_range(0..alphabet)))
        .collect::<Vec<String>>()
}

fn counts(items: &[EncryptedElement]) -> BTreeMap<EncryptedElement, usize> {
    let mut res = BTreeMap::new();
    for e in items {
        *res.entry(e.clone()).or_insert(0) += 1;
    }
    res
}

fn strs(values: &[&str]) -> TElements {
    values.iter().map(|&v| EncryptedElement::from(v)).collect()
}

#[test]
fn test_construction_scenario() {
    let (set, permutation) = EncryptedSet::create_with_permutation(strs(&["bb", "aa", "cc"]));
    assert_eq!(set.elements(), strs(&["aa", "bb", "cc"]).as_slice());
    assert_eq!(permutation, vec![1, 0, 2]);
}

#[test]
fn test_intersect_scenario() {
    let set = EncryptedSet::create(strs(&["aa", "bb", "cc"]));
    assert_eq!(set.intersect(&strs(&["zz", "bb", "aa"])), vec![2, 1]);
}

#[test]
fn test_association_scenario() {
    let set = EncryptedSet::create(strs(&["aa", "aa", "bb"]));
    let mut decrypted = strs(&["aa", "cc"]);
    let (d, e) = set.association_table(&mut decrypted).into_parts();
    assert_eq!(d, vec![0, 0]);
    assert_eq!(e, vec![0, 1]);
}

#[test]
fn test_empty_scenario() {
    let empty = EncryptedSet::create(vec![]);
    assert_eq!(empty.size(), 0);
    assert!(empty.intersect(&strs(&["aa", "bb"])).is_empty());

    let set = EncryptedSet::create(strs(&["aa", "bb"]));
    assert!(set.intersect(&[]).is_empty());
}

#[test]
fn test_sortedness_and_permutation_validity() {
    let key = b"server key";
    for _ in 0..NUM_TEST_ITERATIONS {
        let input = encrypt_all(key, &random_items(200, 50));
        let (set, permutation) = EncryptedSet::create_with_permutation(input.clone());

        assert!(set.elements().windows(2).all(|w| w[0] <= w[1]));
        assert!(permutations::is_permutation(&permutation));
        assert_eq!(permutations::gather(&permutation, &input), set.elements());
    }
}

#[test]
fn test_serialized_round_trip() {
    let key = b"server key";
    let set = EncryptedSet::create(encrypt_all(key, &random_items(300, 100)));
    let bytes = set.to_envelope().to_bytes().unwrap();

    let received = EncryptedSet::from_envelope(ServerSetup::from_bytes(&bytes).unwrap()).unwrap();
    assert_eq!(received.size(), set.size());
    assert_eq!(received.elements(), set.elements());
}

#[test]
fn test_corrupt_envelope() {
    let res = ServerSetup::from_bytes(&[0xff, 0x01]);
    assert!(matches!(res, Err(PsiError::InvalidInput(_))));

    let bytes = ServerSetup::default().to_bytes().unwrap();
    let res = EncryptedSet::from_envelope(ServerSetup::from_bytes(&bytes).unwrap());
    assert!(matches!(res, Err(PsiError::InvalidInput(_))));
}

#[test]
fn test_intersect_membership_and_multiplicity() {
    let key = b"shared key";
    for _ in 0..NUM_TEST_ITERATIONS {
        let server = encrypt_all(key, &random_items(150, 60));
        let client = encrypt_all(key, &random_items(100, 60));
        let set = EncryptedSet::create(server.clone());
        let server_counts = counts(&server);

        let mut res = set.intersect(&client);
        res.sort_unstable();

        // membership: exactly the client positions whose value is on the server
        let expected = client
            .iter()
            .enumerate()
            .filter(|(_, c)| server_counts.contains_key(*c))
            .map(|(i, _)| i)
            .collect::<Vec<usize>>();
        assert_eq!(res, expected);

        // multiplicity: as many outputs per value as client occurrences
        let matched = res.iter().map(|&i| client[i].clone()).collect::<Vec<_>>();
        for (value, k) in counts(&matched) {
            assert_eq!(k, client.iter().filter(|&c| *c == value).count());
        }
        assert_eq!(set.intersection_size(&client), expected.len());
    }
}

#[test]
fn test_association_cross_product_law() {
    let key = b"shared key";
    for _ in 0..NUM_TEST_ITERATIONS {
        let server = encrypt_all(key, &random_items(120, 40));
        let client = encrypt_all(key, &random_items(80, 40));
        let set = EncryptedSet::create(server);

        let mut decrypted = client.clone();
        let table = set.association_table(&mut decrypted);

        for (d, e) in table.pairs() {
            assert_eq!(client[d], set.elements()[e]);
        }

        let client_counts = counts(&client);
        let server_counts = counts(set.elements());
        let mut pairs_per_value: BTreeMap<EncryptedElement, usize> = BTreeMap::new();
        for (d, _) in table.pairs() {
            *pairs_per_value.entry(client[d].clone()).or_insert(0) += 1;
        }

        let expected = client_counts
            .iter()
            .filter_map(|(v, a)| server_counts.get(v).map(|b| (v.clone(), a * b)))
            .collect::<BTreeMap<EncryptedElement, usize>>();
        assert_eq!(pairs_per_value, expected);

        // no pair is emitted twice
        let mut pairs = table.pairs().collect::<Vec<_>>();
        let before = pairs.len();
        pairs.sort_unstable();
        pairs.dedup();
        assert_eq!(pairs.len(), before);
    }
}

#[test]
fn test_reveal_flow_with_original_server_order() {
    let key = b"server key";
    let server_items = vec!["Alice", "Bob", "Carol", "Bob", "Dave"]
        .into_iter()
        .map(String::from)
        .collect::<Vec<String>>();
    let client_items = vec!["Bob", "Eve", "Alice", "Bob"]
        .into_iter()
        .map(String::from)
        .collect::<Vec<String>>();

    // server builds and ships its setup
    let (set, sorting_permutation) =
        EncryptedSet::create_with_permutation(encrypt_all(key, &server_items));
    let bytes = set.to_envelope().to_bytes().unwrap();

    // client gets its own items back under the server key
    let received = EncryptedSet::from_envelope(ServerSetup::from_bytes(&bytes).unwrap()).unwrap();
    let mut decrypted = encrypt_all(key, &client_items);
    let table = received
        .association_table(&mut decrypted)
        .to_original_indices(&sorting_permutation)
        .unwrap();

    let mut pairs = table.pairs().collect::<Vec<_>>();
    pairs.sort_unstable();
    assert_eq!(pairs, vec![(0, 1), (0, 3), (2, 0), (3, 1), (3, 3)]);
    for (d, e) in pairs {
        assert_eq!(client_items[d], server_items[e]);
    }
}

#[test]
fn test_permutation_reorders_labels() {
    let key = b"server key";
    let items = random_items(64, 1000);
    let labels = (0..items.len()).map(|i| format!("label-{}", i)).collect::<Vec<_>>();
    let input = encrypt_all(key, &items);

    let (set, permutation) = EncryptedSet::create_with_permutation(input.clone());
    let sorted_labels = permutations::gather(&permutation, &labels);
    for (pos, label) in sorted_labels.iter().enumerate() {
        let original = labels.iter().position(|l| l == label).unwrap();
        assert_eq!(input[original], set.elements()[pos]);
    }
}

#[test]
fn test_concurrent_readers() {
    let key = b"shared key";
    let server = encrypt_all(key, &random_items(500, 300));
    let set = Arc::new(EncryptedSet::create(server));
    let mut client = encrypt_all(key, &random_items(200, 300));
    client.shuffle(&mut thread_rng());
    let expected = {
        let mut r = set.intersect(&client);
        r.sort_unstable();
        r
    };

    let handles = (0..4)
        .map(|_| {
            let set = Arc::clone(&set);
            let client = client.clone();
            thread::spawn(move || {
                let mut r = set.intersect(&client);
                r.sort_unstable();
                r
            })
        })
        .collect::<Vec<_>>();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}
