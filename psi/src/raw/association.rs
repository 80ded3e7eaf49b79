//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

use common::permutations;

use super::PsiError;

/// Index pairs `(d, e)` linking a decrypted client value `decrypted[d]` to an
/// equal server value at sorted position `e`
///
/// This is a relation rather than a map: with duplicates on either side a
/// client index may appear with several server positions and vice versa.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssociationTable {
    decrypted_indices: Vec<usize>,
    encrypted_indices: Vec<usize>,
}

impl AssociationTable {
    fn push(&mut self, decrypted: usize, encrypted: usize) {
        self.decrypted_indices.push(decrypted);
        self.encrypted_indices.push(encrypted);
    }

    /// Original client positions, parallel to `encrypted_indices`
    pub fn decrypted_indices(&self) -> &[usize] {
        &self.decrypted_indices
    }

    /// Sorted server positions, parallel to `decrypted_indices`
    pub fn encrypted_indices(&self) -> &[usize] {
        &self.encrypted_indices
    }

    pub fn len(&self) -> usize {
        self.decrypted_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decrypted_indices.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.decrypted_indices
            .iter()
            .copied()
            .zip(self.encrypted_indices.iter().copied())
    }

    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>) {
        (self.decrypted_indices, self.encrypted_indices)
    }

    /// Rewrites the server positions from sorted order to the order of the
    /// server's input, using the sorting permutation captured when the set
    /// was created
    pub fn to_original_indices(
        &self,
        sorting_permutation: &[usize],
    ) -> Result<AssociationTable, PsiError> {
        let encrypted_indices = self
            .encrypted_indices
            .iter()
            .map(|&e| {
                sorting_permutation.get(e).copied().ok_or_else(|| {
                    PsiError::InvalidInput(format!(
                        "sorted position {} outside of permutation of size {}",
                        e,
                        sorting_permutation.len()
                    ))
                })
            })
            .collect::<Result<Vec<usize>, PsiError>>()?;

        Ok(AssociationTable {
            decrypted_indices: self.decrypted_indices.clone(),
            encrypted_indices,
        })
    }
}

/// Associates every decrypted client value with every equal value of `sorted`
///
/// `decrypted` is taken in client order and is sorted in place; the emitted
/// client indices refer to the order it had on entry. For a value occurring
/// `a` times in `decrypted` and `b` times in `sorted` exactly `a * b` pairs
/// are emitted, values without a counterpart produce none.
///
/// The merge is linear apart from the cross products, whose total size is
/// bounded only by the inputs: a value repeated many times on both sides
/// makes the table quadratic. Callers handling untrusted input are
/// responsible for limiting duplicate fan-out.
pub fn association_table<T>(decrypted: &mut [T], sorted: &[T]) -> AssociationTable
where
    T: Ord + Sync,
{
    let permutation = permutations::permutation_sort(decrypted);
    let decrypted = &*decrypted;

    let mut table = AssociationTable::default();
    let (n, m) = (decrypted.len(), sorted.len());
    let (mut i, mut j) = (0, 0);

    while i < n && j < m {
        // advance decrypted until it is no longer behind sorted
        while i < n && decrypted[i] < sorted[j] {
            i += 1;
        }
        if i == n {
            break;
        }

        if decrypted[i] == sorted[j] {
            let block_start = j;
            let block_value = &sorted[j];
            loop {
                while j < m && decrypted[i] == sorted[j] {
                    table.push(permutation[i], j);
                    j += 1;
                }
                i += 1;
                if i < n && decrypted[i] == *block_value {
                    // same value again on the client side, replay the block
                    j = block_start;
                } else {
                    break;
                }
            }
            if i == n {
                break;
            }
        }

        // j is past the block, advance sorted until it catches up
        while j < m && sorted[j] < decrypted[i] {
            j += 1;
        }
    }
    table
}
