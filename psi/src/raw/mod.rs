//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

//! The server set kept as plain sorted encrypted elements.
//!
//! [`EncryptedSet`] is built once by the server from its own encrypted items,
//! shipped to the client inside a [`crate::envelope::ServerSetup`] and
//! rebuilt there without re-sorting. The client then either intersects its
//! own encrypted items against it or, when the protocol reveals the full
//! correspondence, builds an [`AssociationTable`] from its decrypted items.

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PsiError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub mod association;
pub mod intersect;
pub mod set;
pub mod traits;

pub use association::AssociationTable;
pub use set::EncryptedSet;
