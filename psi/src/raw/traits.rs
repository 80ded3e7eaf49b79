//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

#[cfg(test)]
use mockall::automock;

use crate::element::EncryptedElement;
use crate::envelope::ServerSetup;

/// Server side container the client matches its encrypted elements against
#[cfg_attr(test, automock)]
pub trait PsiDataStructure {
    /// Number of server elements, duplicates included
    fn size(&self) -> usize;

    fn intersect(&self, elements: &[EncryptedElement]) -> Vec<usize>;

    fn intersection_size(&self, elements: &[EncryptedElement]) -> usize {
        self.intersect(elements).len()
    }

    fn to_envelope(&self) -> ServerSetup;
}

/// What the client learns from matching its elements
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntersectionOutput {
    /// Original indices of the matching client elements
    Indices(Vec<usize>),
    /// Cardinality only
    Size(usize),
}

/// Matches client elements according to the protocol mode: the matching
/// indices when the intersection is revealed, only its size otherwise
pub fn process_client_elements<D>(
    data_structure: &D,
    elements: &[EncryptedElement],
    reveal_intersection: bool,
) -> IntersectionOutput
where
    D: PsiDataStructure + ?Sized,
{
    if reveal_intersection {
        IntersectionOutput::Indices(data_structure.intersect(elements))
    } else {
        IntersectionOutput::Size(data_structure.intersection_size(elements))
    }
}
