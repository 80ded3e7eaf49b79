//  Copyright (c) Facebook, Inc. and its affiliates.
//  SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![crate_name = "psi"]

#[macro_use]
extern crate log;

/// Encrypted element type
pub mod element;

/// Server setup message
pub mod envelope;

/// Sorted ("raw") server data structure
pub mod raw;

pub mod prelude {
    pub use crate::element::EncryptedElement;
    pub use crate::envelope::RawSetup;
    pub use crate::envelope::ServerSetup;
    pub use crate::raw::traits::PsiDataStructure;
    pub use crate::raw::AssociationTable;
    pub use crate::raw::EncryptedSet;
    pub use crate::raw::PsiError;

    pub type TElements = Vec<EncryptedElement>;
}
