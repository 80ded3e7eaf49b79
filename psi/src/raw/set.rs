//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

use common::permutations;
use common::timer;
use common::vectors;

use super::association;
use super::association::AssociationTable;
use super::intersect;
use super::traits::PsiDataStructure;
use super::PsiError;
use crate::element::EncryptedElement;
use crate::envelope::RawSetup;
use crate::envelope::ServerSetup;

/// Ascending, immutable collection of the server's encrypted elements
///
/// Duplicates are kept. Once built the elements are never modified, so a
/// set can be shared between threads (e.g. behind an `Arc`) and read
/// concurrently without locking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncryptedSet {
    encrypted: Vec<EncryptedElement>,
}

impl EncryptedSet {
    /// Called by the server on its own encrypted data when building the
    /// setup message
    pub fn create(elements: Vec<EncryptedElement>) -> EncryptedSet {
        let (set, _) = EncryptedSet::create_with_permutation(elements);
        set
    }

    /// Same as [`EncryptedSet::create`], also returning the sorting
    /// permutation: `permutation[i]` is the input index of the element at
    /// sorted position `i`
    ///
    /// Callers holding data parallel to `elements` (labels, row ids) can
    /// bring it into the set order with [`permutations::gather`]. The order
    /// among equal elements is unspecified.
    pub fn create_with_permutation(
        mut elements: Vec<EncryptedElement>,
    ) -> (EncryptedSet, Vec<usize>) {
        let mut t = timer::Timer::new_silent("raw create");
        let permutation = permutations::permutation_sort(&mut elements);
        t.qps("sort", elements.len());
        (
            EncryptedSet {
                encrypted: elements,
            },
            permutation,
        )
    }

    /// Called by the client on the server's setup message
    ///
    /// The elements were sorted by the server and are taken as they are.
    pub fn from_envelope(setup: ServerSetup) -> Result<EncryptedSet, PsiError> {
        match setup.raw {
            Some(RawSetup { encrypted_elements }) => {
                if !vectors::is_sorted(&encrypted_elements) {
                    warn!(
                        "ServerSetup with {} elements is not sorted, intersections will be incomplete",
                        encrypted_elements.len()
                    );
                }
                Ok(EncryptedSet {
                    encrypted: encrypted_elements,
                })
            }
            None => {
                error!("ServerSetup has no raw section");
                Err(PsiError::InvalidInput(String::from("`ServerSetup` is corrupt!")))
            }
        }
    }

    pub fn elements(&self) -> &[EncryptedElement] {
        &self.encrypted
    }

    pub fn is_empty(&self) -> bool {
        self.encrypted.is_empty()
    }

    /// Associates the client's decrypted values with the server positions
    /// holding the same value
    ///
    /// Only used when the protocol reveals the full correspondence. The
    /// values must be passed in the order the client submitted them, the
    /// buffer is sorted in place. See [`association::association_table`]
    /// for the duplicate semantics and the fan-out caveat.
    pub fn association_table(&self, decrypted: &mut [EncryptedElement]) -> AssociationTable {
        let mut t = timer::Timer::new_silent("raw association");
        let table = association::association_table(decrypted, &self.encrypted);
        t.qps("associate", decrypted.len());
        debug!(
            "Association table with {} pairs for {} decrypted values",
            table.len(),
            decrypted.len()
        );
        table
    }
}

impl PsiDataStructure for EncryptedSet {
    fn size(&self) -> usize {
        self.encrypted.len()
    }

    /// Original indices of `elements` whose value is in the set
    fn intersect(&self, elements: &[EncryptedElement]) -> Vec<usize> {
        let mut t = timer::Timer::new_silent("raw intersect");
        let res = intersect::intersect(&self.encrypted, elements);
        t.qps("merge", elements.len());
        res
    }

    fn to_envelope(&self) -> ServerSetup {
        ServerSetup {
            raw: Some(RawSetup {
                encrypted_elements: self.encrypted.clone(),
            }),
        }
    }
}
